use crate::{models::RepositoryRecord, Result};
use tracing::{debug, info, warn};

/// Anything that can list an account's repositories
///
/// The GitHub client implements this; tests use a mock so the aggregator
/// can be exercised without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_repositories(&self, account: &str) -> Result<Vec<RepositoryRecord>>;
}

/// Fans one source out across every configured account
pub struct Aggregator {
    source: Box<dyn RepositorySource>,
}

impl Aggregator {
    pub fn new(source: Box<dyn RepositorySource>) -> Self {
        Self { source }
    }

    /// Fetch every account concurrently and merge the results
    ///
    /// All fetches are awaited before anything is returned. If any account
    /// fails, the whole load fails with the first error in account order and
    /// nothing from the accounts that succeeded is kept.
    pub async fn load_all<S: AsRef<str>>(&self, accounts: &[S]) -> Result<Vec<RepositoryRecord>> {
        use futures::future::join_all;

        let fetches: Vec<_> = accounts
            .iter()
            .map(|account| self.source.fetch_repositories(account.as_ref()))
            .collect();

        let results = join_all(fetches).await;

        let mut repos = Vec::new();
        for (account, result) in accounts.iter().zip(results) {
            match result {
                Ok(mut r) => {
                    debug!("{} repositories from {}", r.len(), account.as_ref());
                    repos.append(&mut r);
                }
                Err(err) => {
                    warn!("Loading repositories for {} failed: {}", account.as_ref(), err);
                    return Err(err);
                }
            }
        }

        sort_by_updated(&mut repos);
        info!("Loaded {} repositories from {} accounts", repos.len(), accounts.len());
        Ok(repos)
    }
}

/// Most recently updated first; equal timestamps keep their input order
pub fn sort_by_updated(repos: &mut [RepositoryRecord]) {
    // slice::sort_by is stable
    repos.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::Error;
    use chrono::{TimeZone, Utc};

    pub(crate) fn record(name: &str, day: u32) -> RepositoryRecord {
        RepositoryRecord {
            name: name.to_string(),
            description: None,
            url: format!("https://github.com/someone/{}", name),
            updated_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_load_all_merges_and_sorts_descending() {
        let mut source = MockRepositorySource::new();
        source
            .expect_fetch_repositories()
            .times(2)
            .returning(|account| match account {
                "alice" => Ok(vec![record("a-old", 1), record("a-new", 20)]),
                _ => Ok(vec![record("b-mid", 10)]),
            });

        let aggregator = Aggregator::new(Box::new(source));
        let repos = aggregator.load_all(&["alice", "bob"]).await.unwrap();

        let names: Vec<_> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a-new", "b-mid", "a-old"]);
    }

    #[tokio::test]
    async fn test_load_all_ties_keep_account_order() {
        let mut source = MockRepositorySource::new();
        source
            .expect_fetch_repositories()
            .returning(|account| match account {
                "alice" => Ok(vec![record("first", 5)]),
                _ => Ok(vec![record("second", 5)]),
            });

        let aggregator = Aggregator::new(Box::new(source));
        let repos = aggregator.load_all(&["alice", "bob"]).await.unwrap();

        assert_eq!(repos[0].name, "first");
        assert_eq!(repos[1].name, "second");
    }

    #[tokio::test]
    async fn test_load_all_fails_closed_when_one_account_fails() {
        let mut source = MockRepositorySource::new();
        // Both fetches still run - join, not first-to-finish
        source
            .expect_fetch_repositories()
            .times(2)
            .returning(|account| match account {
                "alice" => Ok(vec![record("survivor", 3)]),
                _ => Err(Error::NetworkError("status 500".into())),
            });

        let aggregator = Aggregator::new(Box::new(source));
        let result = aggregator.load_all(&["alice", "bob"]).await;

        assert!(matches!(result, Err(Error::NetworkError(_))));
    }

    #[tokio::test]
    async fn test_load_all_reports_first_error_in_account_order() {
        let mut source = MockRepositorySource::new();
        source
            .expect_fetch_repositories()
            .returning(|account| match account {
                "alice" => Err(Error::ParseError("bad body".into())),
                _ => Err(Error::NetworkError("timeout".into())),
            });

        let aggregator = Aggregator::new(Box::new(source));
        let result = aggregator.load_all(&["alice", "bob"]).await;

        assert!(matches!(result, Err(Error::ParseError(_))));
    }

    #[tokio::test]
    async fn test_load_all_with_no_accounts_is_empty() {
        let source = MockRepositorySource::new();
        let aggregator = Aggregator::new(Box::new(source));
        let accounts: [&str; 0] = [];

        assert!(aggregator.load_all(&accounts).await.unwrap().is_empty());
    }
}
