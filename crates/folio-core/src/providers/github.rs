// GitHub source - bridges the API client with the RepositorySource trait
use async_trait::async_trait;
use folio_api::{GitHubClient, GitHubRepo};
use tracing::debug;

use crate::{aggregate::RepositorySource, models::RepositoryRecord, Result};

/// Wrapper around GitHubClient that implements RepositorySource
pub struct GitHubSource {
    client: GitHubClient,
}

impl GitHubSource {
    pub fn new(api_url: &str) -> Result<Self> {
        let client = GitHubClient::with_base_url(api_url)?;
        debug!("Using GitHub API at {}", client.base_url());
        Ok(Self { client })
    }
}

#[async_trait]
impl RepositorySource for GitHubSource {
    async fn fetch_repositories(&self, account: &str) -> Result<Vec<RepositoryRecord>> {
        let repos = self.client.list_user_repos(account).await?;
        Ok(repos.into_iter().map(github_to_record).collect())
    }
}

/// Convert a GitHub API repo to our internal record
fn github_to_record(gh: GitHubRepo) -> RepositoryRecord {
    RepositoryRecord {
        name: gh.name,
        description: gh.description,
        url: gh.html_url,
        updated_at: gh.updated_at,
    }
}
