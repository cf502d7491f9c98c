use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::about::AboutContent;
use crate::classify::ExclusionPolicy;
use crate::contact::ContactDetails;
use crate::models::FeaturedEntry;
use crate::paginate::Breakpoints;

/// Main configuration structure
///
/// Loaded from `config.toml`; anything missing falls back to defaults.
/// CLI flags override what's in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default = "default_featured")]
    pub featured: Vec<FeaturedEntry>,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub classify: ClassifyConfig,
    #[serde(default)]
    pub contact: ContactDetails,
    #[serde(default)]
    pub about: AboutContent,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            featured: default_featured(),
            layout: LayoutConfig::default(),
            classify: ClassifyConfig::default(),
            contact: ContactDetails::default(),
            about: AboutContent::default(),
        }
    }
}

impl Config {
    /// Load config from the default location, or defaults if there is none
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load config from an explicit path, or defaults if it doesn't exist
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&contents)
                .map_err(|e| crate::Error::ConfigError(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Save config to disk
    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::ConfigError(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, contents)?;
        Ok(())
    }

    /// `{config_dir}/folio/config.toml` - XDG on Linux, Application Support on
    /// macOS, AppData on Windows
    pub fn config_path() -> crate::Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| crate::Error::ConfigError("Could not find config directory".into()))?
            .join("folio");

        Ok(config_dir.join("config.toml"))
    }

    fn validate(&self) -> crate::Result<()> {
        if self.layout.narrow_max > self.layout.medium_max {
            return Err(crate::Error::ConfigError(format!(
                "layout.narrow_max ({}) is wider than layout.medium_max ({})",
                self.layout.narrow_max, self.layout.medium_max
            )));
        }
        if self.layout.cell_width <= 0.0 {
            return Err(crate::Error::ConfigError("layout.cell_width must be positive".into()));
        }
        if let Some(entry) = self.featured.iter().find(|e| e.slug.trim().is_empty()) {
            return Err(crate::Error::ConfigError(format!(
                "featured entry with empty slug (rank {:?})",
                entry.rank
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// API URL (for GitHub Enterprise)
    #[serde(default = "default_github_url")]
    pub api_url: String,

    /// Accounts whose public repositories are shown
    #[serde(default = "default_accounts")]
    pub accounts: Vec<String>,
}

fn default_github_url() -> String {
    folio_api::GITHUB_API_BASE.to_string()
}

fn default_accounts() -> Vec<String> {
    vec!["NathanBrownBennett".to_string(), "JakkuAzzo".to_string()]
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_url(),
            accounts: default_accounts(),
        }
    }
}

fn default_featured() -> Vec<FeaturedEntry> {
    [
        "HackerGO",
        "blockbash",
        "MyMark",
        "BPO",
        "bluetakk",
        "PicChat",
        "MultiVol",
        "CYHA-MVP",
        "CyclomaticComplexityCalc",
        "Dynamic-Flowchart-For-Device-Provisioning-",
    ]
    .into_iter()
    .map(FeaturedEntry::new)
    .collect()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Widths up to here get one side project per page
    #[serde(default = "default_narrow_max")]
    pub narrow_max: f32,

    /// Widths up to here get six; anything wider gets nine
    #[serde(default = "default_medium_max")]
    pub medium_max: f32,

    /// Width units per terminal column, so breakpoints read like pixels
    #[serde(default = "default_cell_width")]
    pub cell_width: f32,

    /// Fraction of the viewport the about section must scroll above
    #[serde(default = "default_scroll_threshold")]
    pub scroll_threshold: f32,

    /// Drag distance (in width units) that counts as a swipe
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold: f32,

    #[serde(default = "default_carousel_gap")]
    pub carousel_gap: f32,
}

fn default_narrow_max() -> f32 {
    600.0
}

fn default_medium_max() -> f32 {
    900.0
}

fn default_cell_width() -> f32 {
    8.0 // a typical monospace cell is ~8px wide
}

fn default_scroll_threshold() -> f32 {
    crate::scroll::DEFAULT_THRESHOLD_RATIO
}

fn default_swipe_threshold() -> f32 {
    crate::carousel::SWIPE_THRESHOLD
}

fn default_carousel_gap() -> f32 {
    crate::carousel::DEFAULT_GAP
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            narrow_max: default_narrow_max(),
            medium_max: default_medium_max(),
            cell_width: default_cell_width(),
            scroll_threshold: default_scroll_threshold(),
            swipe_threshold: default_swipe_threshold(),
            carousel_gap: default_carousel_gap(),
        }
    }
}

impl LayoutConfig {
    pub fn breakpoints(&self) -> Breakpoints {
        Breakpoints {
            narrow_max: self.narrow_max,
            medium_max: self.medium_max,
        }
    }

    /// Convert terminal columns to layout width units
    pub fn width_of(&self, columns: u16) -> f32 {
        f32::from(columns) * self.cell_width
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct ClassifyConfig {
    #[serde(default)]
    pub exclusion: ExclusionPolicy,
}
