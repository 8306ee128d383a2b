use clap::{CommandFactory, Parser};
use log::info;
use repo_summary::{
    config::ConfigStore,
    llm::{get_client, DEFAULT_PROVIDER},
    scanner::scan_directory,
    summary::summarize_repository,
};
use std::env;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Select the large language model to use. Default is OpenAI. All other
    /// models are intended for developer use and require API keys.
    #[clap(long, value_enum)]
    llm: Option<Provider>,

    /// Path to folder/repository to summarize.
    path: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Provider {
    Azure,
    Groq,
    Openai,
    Togetherai,
}

impl Provider {
    fn key(self) -> &'static str {
        match self {
            Provider::Azure => "azure",
            Provider::Groq => "groq",
            Provider::Openai => "openai",
            Provider::Togetherai => "togetherai",
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    if env::args().len() == 1 {
        eprintln!("{}", Args::command().render_help());
        process::exit(1);
    }

    let args = Args::parse();

    let store = ConfigStore::open()?;
    let mut settings = store.load()?;
    if !settings.contains_key("llm") {
        info!("no provider configured, defaulting to {}", DEFAULT_PROVIDER);
        settings.insert("llm".to_string(), DEFAULT_PROVIDER.to_string());
        store.save(&settings)?;
    }

    if let Some(provider) = args.llm {
        settings.insert("llm".to_string(), provider.key().to_string());
        store.save(&settings)?;
        println!("Using {}", provider.key());
        return Ok(());
    }

    let provider = settings
        .get("llm")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROVIDER);
    let client = get_client(provider)?;

    let path = args.path.unwrap_or_else(|| PathBuf::from("."));
    let tree = scan_directory(&path)?;
    info!(
        "scanned {} entries under {}",
        tree.node_count() - 1,
        path.display()
    );

    summarize_repository(&tree, client.as_ref()).await;
    Ok(())
}
