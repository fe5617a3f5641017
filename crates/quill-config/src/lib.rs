//! Site configuration for the quill blogging platform.
//!
//! Parses `quill.toml` with serde and provides auto-discovery of the
//! config file in parent directories. Every section has defaults, so an
//! empty file (or none at all, via [`Config::default`]) yields a working
//! site with all constructs enabled.
//!
//! Construct names are validated at load time: a typo in
//! `markup.constructs` is a configuration error surfaced immediately,
//! never deferred to compile time.
//!
//! ```toml
//! [site]
//! title = "PR0GRAMMER"
//! description = "Notes on code"
//!
//! [markup]
//! constructs = ["emdash", "figure", "callout", "gallery"]
//! escape_html = false
//!
//! [listing]
//! per_page = 5
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use quill_markup::{CompilerConfig, ConstructKind, MarkupError};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Error returned when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Config file is not valid TOML for the expected schema.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// `markup.constructs` names a construct that does not exist.
    #[error(transparent)]
    Markup(#[from] MarkupError),
    /// No config file found walking up from the start directory.
    #[error("no {CONFIG_FILENAME} found in {} or any parent directory", .start.display())]
    NotFound { start: PathBuf },
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,
    /// Markup compiler settings.
    pub markup: MarkupConfig,
    /// Post listing settings.
    pub listing: ListingConfig,

    /// Construct kinds resolved from `markup.constructs` (set after
    /// loading).
    #[serde(skip)]
    constructs_resolved: Vec<ConstructKind>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site: SiteConfig::default(),
            markup: MarkupConfig::default(),
            listing: ListingConfig::default(),
            constructs_resolved: ConstructKind::ALL.to_vec(),
        }
    }
}

/// Site identity shown in page chrome and feeds.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub description: String,
}

/// Markup compiler settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    /// Enabled constructs by name, in scan-priority order.
    pub constructs: Vec<String>,
    /// Escape raw HTML instead of passing it through. Off for this
    /// platform: post bodies are trusted.
    pub escape_html: bool,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            constructs: ConstructKind::ALL
                .iter()
                .map(|kind| kind.name().to_owned())
                .collect(),
            escape_html: false,
        }
    }
}

/// Post listing settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Posts per listing page.
    pub per_page: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { per_page: 5 }
    }
}

impl Config {
    /// Load configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read,
    /// [`ConfigError::Parse`] for invalid TOML, and
    /// [`ConfigError::Markup`] when `markup.constructs` names an
    /// unknown construct.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.resolve()?;
        Ok(config)
    }

    /// Find and load `quill.toml`, walking up from `start`.
    ///
    /// Returns the configuration together with the path it was loaded
    /// from.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] when no config file exists in
    /// `start` or any ancestor, otherwise the same errors as
    /// [`Config::load`].
    pub fn discover(start: &Path) -> Result<(Self, PathBuf), ConfigError> {
        for dir in start.ancestors() {
            let candidate = dir.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Ok((Self::load(&candidate)?, candidate));
            }
        }
        Err(ConfigError::NotFound {
            start: start.to_path_buf(),
        })
    }

    /// Resolve construct names, rejecting unknown ones.
    fn resolve(&mut self) -> Result<(), ConfigError> {
        let mut kinds = Vec::new();
        for name in &self.markup.constructs {
            let kind = ConstructKind::from_name(name)?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        self.constructs_resolved = kinds;
        Ok(())
    }

    /// The resolved construct kinds, in scan-priority order.
    #[must_use]
    pub fn constructs(&self) -> &[ConstructKind] {
        &self.constructs_resolved
    }

    /// Build the markup compiler configuration.
    #[must_use]
    pub fn compiler_config(&self) -> CompilerConfig {
        let mut config = CompilerConfig::new().with_escape_html(self.markup.escape_html);
        for &kind in &self.constructs_resolved {
            config = config.with_construct(kind);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use quill_markup::Compiler;

    use super::*;

    #[test]
    fn test_defaults_enable_all_constructs() {
        let config = Config::default();
        assert_eq!(config.constructs(), ConstructKind::ALL);
        assert_eq!(config.listing.per_page, 5);
        assert!(!config.markup.escape_html);
    }

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
            [site]
            title = "My Blog"
            description = "notes"

            [markup]
            constructs = ["emdash", "figure"]
            escape_html = false

            [listing]
            per_page = 10
            "#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.title, "My Blog");
        assert_eq!(
            config.constructs(),
            [ConstructKind::EmDash, ConstructKind::Figure]
        );
        assert_eq!(config.listing.per_page, 10);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\ntitle = \"T\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.site.title, "T");
        assert_eq!(config.constructs(), ConstructKind::ALL);
        assert_eq!(config.listing.per_page, 5);
    }

    #[test]
    fn test_unknown_construct_rejected_at_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[markup]\nconstructs = [\"emdash\", \"sparkles\"]\n").unwrap();

        let result = Config::load(&path);
        assert!(matches!(
            result,
            Err(ConfigError::Markup(MarkupError::UnknownConstruct(name))) if name == "sparkles"
        ));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "site = not toml").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        assert!(matches!(Config::load(&path), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "[site]\ntitle = \"up\"\n").unwrap();
        let nested = dir.path().join("a/b/c");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Config::discover(&nested).unwrap();
        assert_eq!(config.site.title, "up");
        assert_eq!(path, dir.path().join(CONFIG_FILENAME));
    }

    #[test]
    fn test_discover_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::discover(dir.path());
        // Discovery walks to the filesystem root; a quill.toml in some
        // ancestor of the temp dir would shadow the NotFound case.
        if let Err(err) = result {
            assert!(matches!(err, ConfigError::NotFound { .. }));
        }
    }

    #[test]
    fn test_compiler_config_bridges_to_markup() {
        let config = Config::default();
        let compiler = Compiler::new(config.compiler_config());
        assert_eq!(
            compiler.compile("This !-- is endash"),
            "<p>This \u{2014} is endash</p>\n"
        );
    }

    #[test]
    fn test_disabled_constructs_stay_disabled_through_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[markup]\nconstructs = [\"emdash\"]\n").unwrap();

        let config = Config::load(&path).unwrap();
        let compiler = Compiler::new(config.compiler_config());
        let html = compiler.compile("Gallery[a.png]");
        assert!(!html.contains("class=\"gallery"));
    }
}
