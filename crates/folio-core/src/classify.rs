//! Splits a load into featured ("main") and residual ("side") projects.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{FeaturedEntry, ProjectDisplayRecord, RepositoryRecord};
use crate::project::{project, project_featured};

/// How residual repositories are excluded once featured slugs are matched
///
/// Featured lookups are always case-insensitive. Exclusion from the side
/// list is case-insensitive by default; `CaseSensitive` keeps the older
/// behaviour of excluding only repositories named exactly like the
/// configured slug, so a featured `hackergo` configured as `HackerGO`
/// also stays in the side list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionPolicy {
    #[default]
    CaseInsensitive,
    CaseSensitive,
}

/// Result of one classification pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub featured: Vec<ProjectDisplayRecord>,
    pub residual: Vec<ProjectDisplayRecord>,
}

/// Featured entries in display order: by rank, ties by declaration order
///
/// Entries without a rank take their position in the list as rank.
pub fn ordered_entries(config: &[FeaturedEntry]) -> Vec<&FeaturedEntry> {
    let mut entries: Vec<(i64, &FeaturedEntry)> = config
        .iter()
        .enumerate()
        .map(|(pos, entry)| (entry.rank.unwrap_or(pos as i64), entry))
        .collect();
    entries.sort_by_key(|(rank, _)| *rank);
    entries.into_iter().map(|(_, entry)| entry).collect()
}

pub fn classify(
    repos: &[RepositoryRecord],
    featured_config: &[FeaturedEntry],
    policy: ExclusionPolicy,
) -> Classification {
    // Later accounts win when two accounts share a slug
    let lookup: HashMap<String, &RepositoryRecord> =
        repos.iter().map(|repo| (repo.slug_key(), repo)).collect();

    let mut featured = Vec::new();
    let mut matched: HashSet<String> = HashSet::new();

    for entry in ordered_entries(featured_config) {
        if !entry.visible {
            continue;
        }

        let Some(repo) = lookup.get(&entry.slug.to_lowercase()) else {
            // Unknown slugs are skipped, not rendered as placeholders
            continue;
        };

        featured.push(project_featured(repo, entry));
        matched.insert(match policy {
            ExclusionPolicy::CaseInsensitive => repo.slug_key(),
            ExclusionPolicy::CaseSensitive => entry.slug.clone(),
        });
    }

    let residual = repos
        .iter()
        .filter(|repo| {
            let key = match policy {
                ExclusionPolicy::CaseInsensitive => repo.slug_key(),
                ExclusionPolicy::CaseSensitive => repo.name.clone(),
            };
            !matched.contains(&key)
        })
        .map(project)
        .collect();

    Classification { featured, residual }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::tests::record;
    use crate::models::NO_DESCRIPTION;

    fn titles(records: &[ProjectDisplayRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_featured_follows_config_order_not_fetch_order() {
        let repos = vec![record("c", 30), record("b", 20), record("a", 10)];
        let config = vec![
            FeaturedEntry::new("a"),
            FeaturedEntry::new("missing"),
            FeaturedEntry::new("c"),
        ];

        let result = classify(&repos, &config, ExclusionPolicy::default());

        assert_eq!(titles(&result.featured), vec!["a", "c"]);
        assert_eq!(titles(&result.residual), vec!["b"]);
    }

    #[test]
    fn test_rank_overrides_declaration_order() {
        let repos = vec![record("a", 1), record("b", 2), record("c", 3)];
        let config = vec![
            FeaturedEntry::new("a").with_rank(3),
            FeaturedEntry::new("b").with_rank(1),
            FeaturedEntry::new("c").with_rank(3),
        ];

        let result = classify(&repos, &config, ExclusionPolicy::default());
        assert_eq!(titles(&result.featured), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_scenario_hackergo_and_foo() {
        let mut hacker = record("HackerGO", 1);
        hacker.updated_at = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut foo = record("foo", 1);
        foo.updated_at = "2024-06-01T00:00:00Z".parse().unwrap();

        let mut repos = vec![hacker, foo];
        crate::aggregate::sort_by_updated(&mut repos);
        assert_eq!(repos[0].name, "foo");

        let result = classify(&repos, &[FeaturedEntry::new("HackerGO")], ExclusionPolicy::default());

        assert_eq!(result.featured.len(), 1);
        assert_eq!(result.featured[0].title, "HackerGO");
        assert_eq!(
            result.featured[0].link.as_deref(),
            Some("https://github.com/someone/HackerGO")
        );
        assert_eq!(result.residual.len(), 1);
        assert_eq!(result.residual[0].title, "foo");
        assert_eq!(result.residual[0].description, NO_DESCRIPTION);
    }

    #[test]
    fn test_featured_lookup_is_case_insensitive() {
        let repos = vec![record("HackerGO", 1)];
        let result = classify(&repos, &[FeaturedEntry::new("hackergo")], ExclusionPolicy::default());

        assert_eq!(titles(&result.featured), vec!["HackerGO"]);
        assert!(result.residual.is_empty());
    }

    #[test]
    fn test_curated_fields_win() {
        let mut repo = record("bluetakk", 1);
        repo.description = Some("raw".into());
        let config = vec![FeaturedEntry::new("bluetakk")
            .with_title("BlueTakk")
            .with_description("Bluetooth toolkit")];

        let result = classify(&[repo], &config, ExclusionPolicy::default());
        assert_eq!(result.featured[0].title, "BlueTakk");
        assert_eq!(result.featured[0].description, "Bluetooth toolkit");
    }

    #[test]
    fn test_hidden_entries_are_not_featured() {
        let repos = vec![record("PicChat", 1)];
        let config = vec![FeaturedEntry::new("PicChat").hidden()];

        let result = classify(&repos, &config, ExclusionPolicy::default());
        assert!(result.featured.is_empty());
        assert_eq!(titles(&result.residual), vec!["PicChat"]);
    }

    #[test]
    fn test_case_insensitive_exclusion_keeps_sets_disjoint() {
        let repos = vec![record("HackerGO", 2), record("hackergo", 1), record("other", 3)];
        let result = classify(&repos, &[FeaturedEntry::new("HackerGO")], ExclusionPolicy::CaseInsensitive);

        // Last write wins in the lookup, so the lower-case copy is featured
        assert_eq!(titles(&result.featured), vec!["hackergo"]);
        assert_eq!(titles(&result.residual), vec!["other"]);

        let featured: HashSet<_> = result.featured.iter().map(|r| r.title.to_lowercase()).collect();
        assert!(result
            .residual
            .iter()
            .all(|r| !featured.contains(&r.title.to_lowercase())));
    }

    #[test]
    fn test_case_sensitive_exclusion_lets_near_duplicates_through() {
        let repos = vec![record("HackerGO", 2), record("hackergo", 1)];
        let config = vec![FeaturedEntry::new("HackerGO")];

        let result = classify(&repos, &config, ExclusionPolicy::CaseSensitive);
        // The configured spelling is excluded, not the featured repo's own name
        assert_eq!(titles(&result.featured), vec!["hackergo"]);
        assert_eq!(titles(&result.residual), vec!["hackergo"]);
    }

    #[test]
    fn test_case_sensitive_exclusion_uses_configured_slug() {
        let repos = vec![record("hackergo", 1)];
        let config = vec![FeaturedEntry::new("HackerGO")];

        let result = classify(&repos, &config, ExclusionPolicy::CaseSensitive);
        assert_eq!(titles(&result.featured), vec!["hackergo"]);
        assert_eq!(titles(&result.residual), vec!["hackergo"]);
    }

    #[test]
    fn test_every_input_slug_lands_somewhere() {
        let repos: Vec<_> = (1..=12).map(|d| record(&format!("repo{d}"), d)).collect();
        let config = vec![FeaturedEntry::new("repo3"), FeaturedEntry::new("repo7"), FeaturedEntry::new("nope")];

        let result = classify(&repos, &config, ExclusionPolicy::default());
        assert_eq!(result.featured.len() + result.residual.len(), repos.len());
    }

    #[test]
    fn test_policy_parses_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            exclusion: ExclusionPolicy,
        }
        let parsed: Wrapper = toml::from_str("exclusion = \"case-sensitive\"").unwrap();
        assert_eq!(parsed.exclusion, ExclusionPolicy::CaseSensitive);
    }
}
