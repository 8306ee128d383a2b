use crate::llm::{parse_response, Message, SummaryClient};
use crate::scanner::TreeNode;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, warn};
use std::time::Duration;

const INSTRUCTION: &str = "Let's play a game. Imagine you're a software developer \
tasked with reviewing a new project repository on GitHub. Your goal is to identify \
the framework (if applicable) of the repository. Your team is particularly \
interested in filenames that adhere to common naming conventions and contain \
keywords indicative of important components or functionalities within the codebase. \
Your task is to generate a summary of the repository, including relevant filenames \
and the suspected purpose of the repo. Answer questions quickly and briefly. \
The contents of the folder include: ";

const RETRY_MESSAGE: &str = "mhmm... something went wrong... try again maybe?";

/// One system message: the reviewer instruction with the serialized tree
/// appended, so the model only ever sees filenames, never file contents.
pub fn build_messages(tree: &TreeNode) -> Result<Vec<Message>, serde_json::Error> {
    let tree_json = serde_json::to_string(tree)?;
    Ok(vec![Message::system(format!("{}{}", INSTRUCTION, tree_json))])
}

/// Drives one summarization round: prompt, dispatch, extract, print. Every
/// failure past this point ends in the retry message instead of propagating;
/// an unparseable reply is only a warning.
pub async fn summarize_repository(tree: &TreeNode, client: &dyn SummaryClient) {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    spinner.set_message(format!("Waiting for {}...", client.provider_name()));
    spinner.enable_steady_tick(Duration::from_millis(120));

    let outcome = try_summarize(tree, client).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(Some(summary)) => {
            println!();
            println!("{}", summary);
        }
        Ok(None) => {
            warn!("{} replied with nothing recognizable", client.provider_name());
            println!("{}", RETRY_MESSAGE);
        }
        Err(err) => {
            error!("summarization failed: {}", err);
            println!("{}", RETRY_MESSAGE);
        }
    }
}

async fn try_summarize(
    tree: &TreeNode,
    client: &dyn SummaryClient,
) -> Result<Option<String>, Box<dyn std::error::Error>> {
    let messages = build_messages(tree)?;
    let envelope = client.complete(&messages).await?;
    Ok(parse_response(&envelope))
}
