//! Configuration for the Tiny pipeline
//!
//! Everything defaults to the classic TINY behavior, so `Config::default()`
//! is what most callers want. A configuration can also be loaded from JSON:
//!
//! ```rust
//! use tiny_lang::Config;
//!
//! let config = Config::from_json(r#"{ "language": { "equality_lexeme": "==" } }"#).unwrap();
//! assert_eq!(config.language.equality_lexeme, "==");
//! assert_eq!(config.language.max_lexeme_len, 40);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Longest lexeme the scanner accepts by default
pub const DEFAULT_MAX_LEXEME_LEN: usize = 40;

/// Deepest block, parenthesis or operator-chain nesting accepted by default
pub const DEFAULT_MAX_NESTING: usize = 128;

/// Default spelling of the equality operator
pub const DEFAULT_EQUALITY_LEXEME: &str = "=";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Token vocabulary settings
    pub language: LanguageConfig,
    /// Execution settings
    pub interpreter: InterpreterConfig,
}

impl Config {
    /// Parse a configuration from JSON, filling omitted fields with defaults
    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text).map_err(|e| Error::config(e.to_string()))?;
        config.language.validate()?;
        Ok(config)
    }
}

/// Token vocabulary settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageConfig {
    /// Spelling of the equality operator (`=` or `==` in practice)
    pub equality_lexeme: String,
    /// Identifier and number runs longer than this become error tokens
    pub max_lexeme_len: usize,
    /// Parser nesting limit; every later stage recurses no deeper than this
    pub max_nesting: usize,
}

impl Default for LanguageConfig {
    fn default() -> Self {
        LanguageConfig {
            equality_lexeme: DEFAULT_EQUALITY_LEXEME.to_string(),
            max_lexeme_len: DEFAULT_MAX_LEXEME_LEN,
            max_nesting: DEFAULT_MAX_NESTING,
        }
    }
}

impl LanguageConfig {
    /// Config with a different equality lexeme
    pub fn with_equality_lexeme(lexeme: impl Into<String>) -> Self {
        LanguageConfig {
            equality_lexeme: lexeme.into(),
            ..Default::default()
        }
    }

    /// Check the settings can form an unambiguous token table
    pub fn validate(&self) -> Result<()> {
        let eq = self.equality_lexeme.as_str();
        if eq.is_empty() {
            return Err(Error::config("equality lexeme must not be empty"));
        }
        if eq
            .chars()
            .any(|c| c.is_whitespace() || c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(Error::config(format!(
                "equality lexeme '{}' may only contain punctuation",
                eq
            )));
        }
        // `{` would open a comment, the rest are already taken.
        if crate::lexer::FIXED_SYMBOLS.iter().any(|(lexeme, _)| *lexeme == eq) || eq.starts_with('{') {
            return Err(Error::config(format!(
                "equality lexeme '{}' collides with another token",
                eq
            )));
        }
        if self.max_lexeme_len == 0 {
            return Err(Error::config("max_lexeme_len must be at least 1"));
        }
        if self.max_nesting == 0 {
            return Err(Error::config("max_nesting must be at least 1"));
        }
        Ok(())
    }
}

/// Execution settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Upper bound on total repeat-loop iterations (`None` = unbounded)
    pub max_loop_iterations: Option<usize>,
}
