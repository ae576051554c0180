//! Configuration for extraction, suggestions and output shaping.
//!
//! Settings come from TOML files in which every field is optional, so a
//! partial file only overrides what it names. Files cascade in this order,
//! later entries winning:
//!
//! 1. `<platform config dir>/verso/config.toml`
//! 2. `./.verso.toml`
//! 3. an explicit path (for example the CLI's `--config`)

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

use crate::extractor::HighlightPolicy;
use crate::{Error, Result};

/// Default per-side token ceiling enforced by the review service.
pub const DEFAULT_MAX_TOKENS: usize = 5_000;
/// Strategy used when none is configured.
pub const DEFAULT_STRATEGY: &str = "placeholder";
/// Default time budget for one external suggestion command.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 30;

const LOCAL_CONFIG_FILE: &str = ".verso.toml";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VersoConfig {
    /// Extraction settings.
    pub extractor: ExtractorConfig,
    /// Suggestion strategy selection.
    pub suggestions: SuggestionConfig,
    /// Response shaping.
    pub output: OutputConfig,
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Whether repeated phrases are reported once or per occurrence.
    pub highlight_policy: HighlightPolicy,
    /// Maximum number of tokens accepted per side.
    pub max_tokens: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            highlight_policy: HighlightPolicy::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

/// Suggestion strategy selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Registry id of the strategy to use.
    pub strategy: String,
    /// External command backing the `command` strategy.
    pub command: Option<CommandConfig>,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            strategy: DEFAULT_STRATEGY.to_string(),
            command: None,
        }
    }
}

/// External suggestion command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Program to execute.
    pub program: String,
    /// Arguments passed before the JSON payload is written to stdin.
    pub args: Vec<String>,
    /// Seconds before the program is killed.
    pub timeout_secs: u64,
}

/// Response shaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    /// Include the full segment list in responses.
    pub include_segments: bool,
}

/// On-disk TOML layout. All fields are optional so partial files merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// `[extractor]` table.
    pub extractor: Option<ExtractorSection>,
    /// `[suggestions]` table.
    pub suggestions: Option<SuggestionSection>,
    /// `[output]` table.
    pub output: Option<OutputSection>,
}

/// `[extractor]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorSection {
    /// `per_occurrence` or `unique`.
    pub highlight_policy: Option<HighlightPolicy>,
    /// Per-side token ceiling.
    pub max_tokens: Option<usize>,
}

/// `[suggestions]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionSection {
    /// Strategy id.
    pub strategy: Option<String>,
    /// `[suggestions.command]` table.
    pub command: Option<CommandSection>,
}

/// `[suggestions.command]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSection {
    /// Program to execute.
    pub program: Option<String>,
    /// Program arguments.
    pub args: Option<Vec<String>>,
    /// Timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// `[output]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Include segments in responses.
    pub include_segments: Option<bool>,
}

impl ConfigFile {
    /// Parse TOML content; `origin` names the source in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the content is not valid for this layout.
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::Config {
            path: origin.to_string(),
            source,
        })
    }

    /// Merge two files: values present in `overlay` take precedence.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        let extractor = match (self.extractor, overlay.extractor) {
            (Some(base), Some(top)) => Some(ExtractorSection {
                highlight_policy: top.highlight_policy.or(base.highlight_policy),
                max_tokens: top.max_tokens.or(base.max_tokens),
            }),
            (base, top) => top.or(base),
        };

        let suggestions = match (self.suggestions, overlay.suggestions) {
            (Some(base), Some(top)) => Some(SuggestionSection {
                strategy: top.strategy.or(base.strategy),
                command: match (base.command, top.command) {
                    (Some(base), Some(top)) => Some(CommandSection {
                        program: top.program.or(base.program),
                        args: top.args.or(base.args),
                        timeout_secs: top.timeout_secs.or(base.timeout_secs),
                    }),
                    (base, top) => top.or(base),
                },
            }),
            (base, top) => top.or(base),
        };

        let output = match (self.output, overlay.output) {
            (Some(base), Some(top)) => Some(OutputSection {
                include_segments: top.include_segments.or(base.include_segments),
            }),
            (base, top) => top.or(base),
        };

        Self {
            extractor,
            suggestions,
            output,
        }
    }

    /// Fill every unset value with its default.
    #[must_use]
    pub fn resolve(self) -> VersoConfig {
        let defaults = VersoConfig::default();
        let extractor = self.extractor.unwrap_or_default();
        let suggestions = self.suggestions.unwrap_or_default();
        let output = self.output.unwrap_or_default();

        let command = suggestions.command.and_then(|section| {
            let program = section.program.filter(|program| !program.trim().is_empty())?;
            Some(CommandConfig {
                program,
                args: section.args.unwrap_or_default(),
                timeout_secs: section
                    .timeout_secs
                    .unwrap_or(DEFAULT_COMMAND_TIMEOUT_SECS),
            })
        });

        VersoConfig {
            extractor: ExtractorConfig {
                highlight_policy: extractor
                    .highlight_policy
                    .unwrap_or(defaults.extractor.highlight_policy),
                max_tokens: extractor.max_tokens.unwrap_or(defaults.extractor.max_tokens),
            },
            suggestions: SuggestionConfig {
                strategy: suggestions
                    .strategy
                    .unwrap_or(defaults.suggestions.strategy),
                command,
            },
            output: OutputConfig {
                include_segments: output
                    .include_segments
                    .unwrap_or(defaults.output.include_segments),
            },
        }
    }
}

/// Platform config path: `<config_dir>/verso/config.toml`.
#[must_use]
pub fn config_path() -> Option<Utf8PathBuf> {
    dirs::config_dir()
        .and_then(|dir| Utf8PathBuf::from_path_buf(dir).ok())
        .map(|dir| dir.join("verso").join("config.toml"))
}

/// Load a config file if it exists.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file exists but cannot be read and
/// [`Error::Config`] when it cannot be parsed.
pub fn load_from_path(path: &Utf8Path) -> Result<Option<ConfigFile>> {
    match std::fs::read_to_string(path) {
        Ok(content) => ConfigFile::parse(&content, path.as_str()).map(Some),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Io {
            path: path.to_string(),
            source,
        }),
    }
}

/// Load configuration by cascading platform, working-directory and explicit files.
///
/// # Errors
///
/// Fails when any present file is unreadable or malformed, or when `explicit`
/// names a file that does not exist.
pub fn load_config(explicit: Option<&Utf8Path>) -> Result<VersoConfig> {
    let mut merged = ConfigFile::default();

    if let Some(path) = config_path() {
        if let Some(file) = load_from_path(&path)? {
            tracing::debug!(path = %path, "loaded platform config");
            merged = merged.merge(file);
        }
    }

    let local = Utf8Path::new(LOCAL_CONFIG_FILE);
    if let Some(file) = load_from_path(local)? {
        tracing::debug!(path = %local, "loaded working directory config");
        merged = merged.merge(file);
    }

    if let Some(path) = explicit {
        let file = load_from_path(path)?.ok_or_else(|| Error::Io {
            path: path.to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
        })?;
        tracing::debug!(path = %path, "loaded explicit config");
        merged = merged.merge(file);
    }

    Ok(merged.resolve())
}
