//! Template parsing and argument expansion for declarative column generation.
//!
//! A template such as `"born_{.year,.month}"` declares a family of output
//! columns in one string. This crate turns that string into an ordered
//! dictionary from output-column name to argument tuple:
//!
//! - [`TemplateParser`] splits the template into a [`Skeleton`] plus one
//!   match group per `{...}` placeholder (plain tokens, inclusive
//!   `start:end[:step]` ranges, `key=value` tokens),
//! - a [`TransformPipeline`] enriches each [`Match`], recognizing attribute
//!   (`.name`) and method (`name!`) tokens,
//! - a [`GroupCombiner`] pairs the groups into tuples and each tuple renders
//!   one output name through the skeleton.
//!
//! [`expand_template`] and [`expand_template_with`] run the whole pipeline;
//! [`Config`] carries the pluggable pieces as an explicit value.

#![forbid(unsafe_code)]

mod combine;
mod config;
mod error;
mod expand;
mod template;
mod token;
mod transform;

pub use combine::{CrossProduct, GroupCombiner, PairCombiner, PositionalZip};
pub use config::{Config, ConfigError, ConfigKey};
pub use error::ExpandError;
pub use expand::{expand_template, expand_template_with, ArgTuple, ArgsDict, ArgsDictBuilder};
pub use template::{Skeleton, TemplateParser, DEFAULT_PATTERN, DEFAULT_SEPARATOR};
pub use token::{BuilderKind, Match, Payload, TokenValue};
pub use transform::{MatchTransform, MethodTransform, PropertyTransform, TransformPipeline};
