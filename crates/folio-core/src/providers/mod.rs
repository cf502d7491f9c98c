// Repository source implementations for each forge
pub mod github;

pub use github::GitHubSource;
