//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.content_dir`
//! - `preferences.store_dir`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_sections::{SectionDescriptor, TieBreak, ViewportBand};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page source directory.
    pub content_dir: Option<PathBuf>,
    /// Override preference store directory.
    pub store_dir: Option<PathBuf>,
    /// Override the ambient theme signal.
    pub ambient: Option<AmbientSetting>,
    /// Override the section tie-break policy.
    pub tie_break: Option<TieBreak>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Display preference configuration.
    pub preferences: PreferencesConfig,
    /// Copy-source configuration.
    pub export: ExportConfig,
    /// Active section tracking configuration.
    pub tracker: TrackerConfig,
    /// Navigation groups in sidebar order.
    pub groups: Vec<GroupConfig>,
    /// Pages in navigation order.
    pub pages: Vec<PageConfig>,

    /// Resolved page source directory (set after loading).
    #[serde(skip)]
    pub content_dir: PathBuf,
    /// Resolved preference store directory (set after loading).
    #[serde(skip)]
    pub store_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in the sidebar and the document title.
    pub title: String,
    /// Origin that scopes persisted preferences.
    pub origin: String,
    /// Page source directory, relative to the config file.
    content_dir: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            origin: "docs".to_owned(),
            content_dir: "docs".to_owned(),
        }
    }
}

/// Where the ambient light/dark signal comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmbientSetting {
    /// Query the platform settings.
    #[default]
    System,
    /// Always report light.
    Light,
    /// Always report dark.
    Dark,
    /// Report no preference.
    #[serde(rename = "none")]
    Disabled,
}

/// Display preference configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Storage key of the theme preference.
    pub key: String,
    /// Store directory, relative to the config file.
    store_dir: String,
    /// Ambient signal source.
    pub ambient: AmbientSetting,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            key: "puffin-docs-theme".to_owned(),
            store_dir: ".folio".to_owned(),
            ambient: AmbientSetting::System,
        }
    }
}

/// Copy-source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Confirmation window in milliseconds.
    pub confirm_ms: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { confirm_ms: 2000 }
    }
}

impl ExportConfig {
    /// Confirmation window.
    #[must_use]
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.confirm_ms)
    }
}

/// Active section tracking configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Excluded strip at the top of the viewport.
    pub top_inset: f64,
    /// Excluded share of the viewport at the bottom.
    pub bottom_ratio: f64,
    /// Policy when several sections enter the band at once.
    pub tie_break: TieBreak,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        let band = ViewportBand::default();
        Self {
            top_inset: band.top_inset,
            bottom_ratio: band.bottom_ratio,
            tie_break: TieBreak::default(),
        }
    }
}

impl TrackerConfig {
    /// Viewport band described by this configuration.
    #[must_use]
    pub fn band(&self) -> ViewportBand {
        ViewportBand {
            top_inset: self.top_inset,
            bottom_ratio: self.bottom_ratio,
        }
    }
}

/// Navigation group.
#[derive(Debug, Deserialize)]
pub struct GroupConfig {
    /// Group heading.
    pub title: String,
}

/// A documentation page.
#[derive(Debug, Deserialize)]
pub struct PageConfig {
    /// Navigation key (e.g., `docs/getting-started`).
    pub key: String,
    /// Stable page id.
    pub id: String,
    /// Navigation label.
    pub label: String,
    /// Title of the navigation group the page belongs to.
    pub group: String,
    /// Source file relative to the content directory. Defaults to `{id}.md`.
    #[serde(default)]
    pub source: Option<String>,
    /// "On this page" sections in order.
    #[serde(default)]
    pub sections: Vec<SectionDescriptor>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`preferences.store_dir`").
        field: String,
        /// Error message (e.g., "${`XDG_DATA_HOME`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered configuration file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.content_dir.clone_from(content_dir);
        }
        if let Some(store_dir) = &settings.store_dir {
            self.store_dir.clone_from(store_dir);
        }
        if let Some(ambient) = settings.ambient {
            self.preferences.ambient = ambient;
        }
        if let Some(tie_break) = settings.tie_break {
            self.tracker.tie_break = tie_break;
        }
    }

    /// Find a page by navigation key.
    #[must_use]
    pub fn page(&self, key: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.key == key)
    }

    /// Absolute path of a page's source file.
    #[must_use]
    pub fn page_source(&self, page: &PageConfig) -> PathBuf {
        match &page.source {
            Some(source) => self.content_dir.join(source),
            None => self.content_dir.join(format!("{}.md", page.id)),
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        let site = SiteConfig::default();
        let preferences = PreferencesConfig::default();
        Self {
            content_dir: base.join(&site.content_dir),
            store_dir: base.join(&preferences.store_dir),
            site,
            preferences,
            export: ExportConfig::default(),
            tracker: TrackerConfig::default(),
            groups: Vec::new(),
            pages: Vec::new(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_preferences()?;
        self.validate_export()?;
        self.validate_tracker()?;
        self.validate_pages()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.origin, "site.origin")?;
        // The origin names the store file
        if self.site.origin.contains(['/', '\\']) || self.site.origin.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "site.origin must be a plain name, got {:?}",
                self.site.origin
            )));
        }
        Ok(())
    }

    fn validate_preferences(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.preferences.key, "preferences.key")
    }

    fn validate_export(&self) -> Result<(), ConfigError> {
        if self.export.confirm_ms == 0 {
            return Err(ConfigError::Validation(
                "export.confirm_ms must be greater than 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_tracker(&self) -> Result<(), ConfigError> {
        let TrackerConfig {
            top_inset,
            bottom_ratio,
            ..
        } = self.tracker;

        if !top_inset.is_finite() || top_inset < 0.0 {
            return Err(ConfigError::Validation(
                "tracker.top_inset must be a non-negative number".to_owned(),
            ));
        }
        if !(0.0..1.0).contains(&bottom_ratio) {
            return Err(ConfigError::Validation(
                "tracker.bottom_ratio must be in [0, 1)".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        let groups: HashSet<&str> = self.groups.iter().map(|g| g.title.as_str()).collect();
        let mut keys = HashSet::new();
        let mut ids = HashSet::new();

        for page in &self.pages {
            require_non_empty(&page.key, "pages.key")?;
            require_non_empty(&page.id, "pages.id")?;
            if !keys.insert(page.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page key: {}",
                    page.key
                )));
            }
            if !ids.insert(page.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate page id: {}",
                    page.id
                )));
            }
            if !groups.contains(page.group.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "page {} references undeclared group {:?}",
                    page.key, page.group
                )));
            }
            for section in &page.sections {
                if section.id.trim().is_empty() {
                    return Err(ConfigError::Validation(format!(
                        "page {} has a section with an empty id",
                        page.key
                    )));
                }
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.content_dir = expand::expand_env(&self.site.content_dir, "site.content_dir")?;
        self.preferences.store_dir =
            expand::expand_env(&self.preferences.store_dir, "preferences.store_dir")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_dir = config_dir.join(&self.site.content_dir);
        self.store_dir = config_dir.join(&self.preferences.store_dir);
    }
}
