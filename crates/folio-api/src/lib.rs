// Forge API client - the only thing in folio that talks to the network
pub mod github;

pub use github::{GitHubClient, GitHubError, GitHubRepo, GITHUB_API_BASE};
