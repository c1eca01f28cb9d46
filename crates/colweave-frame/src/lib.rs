//! Column-store boundary for colweave templates.
//!
//! The engine expands a template like `"born_{.year,.month}"` into an
//! ordered argument dictionary; this crate drives that dictionary against
//! tabular data:
//!
//! - [`ColumnStore`] is the trait a table implements (four column
//!   primitives); [`gencol`](ColumnStore::gencol) and
//!   [`mutcol`](ColumnStore::mutcol) come for free on top,
//! - [`Frame`] is a small in-memory store with insertion-ordered columns,
//! - [`colbuilders`] holds the built-in builders plus the glue that turns
//!   payload tags (`.year`, `lower!`) into default builders.

#![forbid(unsafe_code)]

pub mod colbuilders;
mod error;
mod frame;
mod value;

pub use colbuilders::{
    as_attribute, as_method, resolve_builder, splitter, BoundBuilder, BuilderArgs, ColBuilder,
};
pub use error::FrameError;
pub use frame::{ColumnStore, Frame};
pub use value::Value;

pub use colweave_engine::{
    expand_template, expand_template_with, ArgTuple, ArgsDict, BuilderKind, Config, ExpandError,
    Match, TokenValue,
};
