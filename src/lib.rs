pub mod config;
pub mod errors;
pub mod folder;
pub mod logger;
pub mod merge;
pub mod reporting;
pub mod rules;
pub mod utils;

pub use config::MergeConfig;
pub use errors::MergeError;
pub use merge::merge_folders;
pub use rules::IgnoreRules;
