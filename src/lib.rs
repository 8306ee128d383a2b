pub mod config;
pub mod error;
pub mod llm;
pub mod scanner;
pub mod summary;

pub use config::{ConfigStore, Settings};
pub use error::RepoSummaryError;
pub use llm::SummaryClient;
pub use scanner::TreeNode;
