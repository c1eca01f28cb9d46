//! Expansion configuration.
//!
//! A [`Config`] is an explicit value handed to the expansion entry points and
//! the column-generation driver; there is no process-global state. Callers
//! override fields with struct-update syntax and can reset any subset by name
//! through [`Config::restore_default`].

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::combine::{CrossProduct, GroupCombiner, PairCombiner, PositionalZip};
use crate::template::TemplateParser;
use crate::transform::TransformPipeline;

/// Configuration-layer errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A restore call named a key outside the recognized set.
    #[error("unknown configuration key `{key}`")]
    UnknownKey { key: String },
}

/// A configuration field addressable by name in [`Config::restore_default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Parser,
    MatchTransform,
    NewColCombiner,
    ColPairCombiner,
    Unpack,
    Drop,
}

impl ConfigKey {
    /// Every recognized key, in declaration order.
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::Parser,
        ConfigKey::MatchTransform,
        ConfigKey::NewColCombiner,
        ConfigKey::ColPairCombiner,
        ConfigKey::Unpack,
        ConfigKey::Drop,
    ];

    /// The name used to address this key.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::Parser => "parser",
            ConfigKey::MatchTransform => "match_transform",
            ConfigKey::NewColCombiner => "new_col_combiner",
            ConfigKey::ColPairCombiner => "col_pair_combiner",
            ConfigKey::Unpack => "unpack",
            ConfigKey::Drop => "drop",
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, ConfigError> {
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey { key: s.to_string() })
    }
}

/// The options consulted by template expansion and the gencol driver.
#[derive(Debug, Clone)]
pub struct Config {
    /// Template parser: placeholder pattern and sub-token separator.
    pub parser: TemplateParser,
    /// Enrichment pipeline applied to every parsed match.
    pub match_transform: TransformPipeline,
    /// Strategy combining placeholder groups into argument tuples.
    pub new_col_combiner: Arc<dyn GroupCombiner>,
    /// Strategy pairing source columns with dictionary entries.
    pub col_pair_combiner: Arc<dyn PairCombiner>,
    /// Hand builders raw token values instead of matches whenever no match in
    /// the dictionary carries payload metadata.
    pub unpack: bool,
    /// Drop the source column after generating.
    pub drop: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            parser: TemplateParser::default(),
            match_transform: TransformPipeline::default(),
            new_col_combiner: Arc::new(PositionalZip),
            col_pair_combiner: Arc::new(CrossProduct),
            unpack: true,
            drop: false,
        }
    }
}

impl Config {
    /// Returns a copy of `self` with the named keys reset to their defaults.
    ///
    /// An empty `keys` resets everything, so `config.restore_default(&[])`
    /// is `Config::default()`. An unrecognized name fails with
    /// [`ConfigError::UnknownKey`] and restores nothing.
    pub fn restore_default(&self, keys: &[&str]) -> Result<Config, ConfigError> {
        if keys.is_empty() {
            return Ok(Config::default());
        }
        let defaults = Config::default();
        let mut restored = self.clone();
        for key in keys {
            match key.parse::<ConfigKey>()? {
                ConfigKey::Parser => restored.parser = defaults.parser.clone(),
                ConfigKey::MatchTransform => {
                    restored.match_transform = defaults.match_transform.clone();
                }
                ConfigKey::NewColCombiner => {
                    restored.new_col_combiner = Arc::clone(&defaults.new_col_combiner);
                }
                ConfigKey::ColPairCombiner => {
                    restored.col_pair_combiner = Arc::clone(&defaults.col_pair_combiner);
                }
                ConfigKey::Unpack => restored.unpack = defaults.unpack,
                ConfigKey::Drop => restored.drop = defaults.drop,
            }
        }
        Ok(restored)
    }
}
