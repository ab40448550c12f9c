//! Banned-word filter cog.

use crate::cog::{Cog, CogContext, CogInit};
use crate::error::{CogError, CogResult};
use serde::Deserialize;
use serde_yaml::Value;
use std::any::Any;
use std::collections::BTreeSet;
use tracing::debug;

/// Section layout of the `filter` cog.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FilterConfig {
    banned_words: Vec<String>,
}

/// Flags messages containing banned words.
///
/// Matching is case-insensitive and on whole words.
#[derive(Debug, Default)]
pub struct FilterCog {
    banned_words: BTreeSet<String>,
}

impl FilterCog {
    /// Banned words, lowercased and sorted.
    pub fn banned_words(&self) -> impl Iterator<Item = &str> {
        self.banned_words.iter().map(String::as_str)
    }

    /// Whether `word` is banned.
    pub fn is_banned(&self, word: &str) -> bool {
        self.banned_words.contains(&word.to_lowercase())
    }

    /// First banned word found in `text`.
    pub fn find_banned<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .find(|word| self.is_banned(word))
    }
}

impl Cog for FilterCog {
    fn update(&mut self, section: &Value) -> CogResult<()> {
        let config: FilterConfig = serde_yaml::from_value(section.clone())
            .map_err(|e| CogError::invalid_section(Self::NAME, e))?;

        self.banned_words = config
            .banned_words
            .iter()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        debug!(banned = self.banned_words.len(), "Loaded banned words");
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl CogInit for FilterCog {
    const NAME: &'static str = "filter";

    fn init(_context: &CogContext) -> Self {
        Self::default()
    }
}
