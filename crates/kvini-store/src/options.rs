use serde::{Deserialize, Serialize};

/// Name of the implicit section holding pairs that precede any header.
pub const DEFAULT_SECTION: &str = "";

/// Line separator used unless a parse call supplies another.
pub const DEFAULT_LINE_SEPARATOR: &str = "\n";

/// Key/value separator used unless a parse call supplies another.
pub const DEFAULT_KV_SEPARATOR: &str = "=";

/// Per-store parsing and serialization settings.
///
/// Applies uniformly to every parse and write performed by the owning
/// [`Ini`](crate::Ini). There is no process-wide configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IniOptions {
    /// Token that splits input into lines and terminates written lines.
    pub line_separator: String,
    /// Token between a key and its value.
    pub kv_separator: String,
    /// Recognize `[name]` lines as section headers.
    pub parse_section: bool,
    /// Skip lines starting with `;`. Lines starting with `#` are always skipped.
    pub skip_comments: bool,
    /// Strip any run of `'` and `"` from both ends of parsed values.
    pub trim_quotes: bool,
}

impl Default for IniOptions {
    fn default() -> Self {
        Self {
            line_separator: DEFAULT_LINE_SEPARATOR.to_string(),
            kv_separator: DEFAULT_KV_SEPARATOR.to_string(),
            parse_section: false,
            skip_comments: false,
            trim_quotes: false,
        }
    }
}

impl IniOptions {
    /// The settings file parsing forces: default separators, section
    /// headers and `;` comments recognized.
    pub fn file() -> Self {
        Self {
            parse_section: true,
            skip_comments: true,
            ..Default::default()
        }
    }

    /// Builder-style switch for `trim_quotes`.
    pub fn with_trim_quotes(mut self, trim_quotes: bool) -> Self {
        self.trim_quotes = trim_quotes;
        self
    }

    /// Builder-style override for both separators.
    pub fn with_separators(mut self, line_separator: &str, kv_separator: &str) -> Self {
        self.line_separator = line_separator.to_string();
        self.kv_separator = kv_separator.to_string();
        self
    }
}
