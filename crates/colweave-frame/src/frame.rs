//! The column-store boundary and its generation driver.
//!
//! [`ColumnStore`] is the seam between template expansion and tabular data:
//! implementors supply four column primitives and get the
//! [`gencol`](ColumnStore::gencol) / [`mutcol`](ColumnStore::mutcol) driver
//! for free. [`Frame`] is the in-memory implementation.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use colweave_engine::{ArgsDict, ArgsDictBuilder, Config};

use crate::colbuilders::{resolve_builder, BuilderArgs, ColBuilder};
use crate::error::FrameError;
use crate::value::Value;

/// True when no match anywhere in the dictionary carries payload metadata,
/// which is what lets builders receive raw token values.
fn unpackable(args: &ArgsDict) -> bool {
    args.values().flatten().all(|m| m.payload.is_empty())
}

/// Row-aligned named columns.
pub trait ColumnStore {
    /// The values of column `name`, if it exists.
    fn get_column(&self, name: &str) -> Option<&[Value]>;

    /// Maps column `name` through `f`, returning the new values. Fails with
    /// [`FrameError::UnknownColumn`] when the column does not exist and
    /// propagates the first error `f` returns.
    fn map_column(
        &self,
        name: &str,
        f: &mut dyn FnMut(&Value) -> Result<Value, FrameError>,
    ) -> Result<Vec<Value>, FrameError>;

    /// Inserts or replaces a column.
    fn set_column(&mut self, name: &str, values: Vec<Value>);

    /// Removes a column.
    fn drop_column(&mut self, name: &str) -> Result<(), FrameError>;

    /// Generates new columns from the template `newcols`, deriving each from
    /// the source column `col`.
    ///
    /// ```text
    /// frame.gencol("born_{.year,.month}", "born", None, None, None)?;
    /// ```
    ///
    /// adds `born_year` and `born_month`, derived per row from `born` by the
    /// default attribute builder the `.`-tokens imply. An explicit `builder`
    /// overrides the default; enumerated builders also see the output-column
    /// index, so `"{first,last}_name"` with [`splitter`](crate::splitter)
    /// keeps piece 0 for `first_name` and piece 1 for `last_name`.
    ///
    /// `drop` removes the source column afterwards; `None` falls back to
    /// `config.drop`, as does a `None` config to the default [`Config`].
    /// Generated columns land in dictionary order, whole columns at a time.
    fn gencol(
        &mut self,
        newcols: &str,
        col: &str,
        builder: Option<&ColBuilder>,
        drop: Option<bool>,
        config: Option<&Config>,
    ) -> Result<(), FrameError> {
        let default_config;
        let config = match config {
            Some(config) => config,
            None => {
                default_config = Config::default();
                &default_config
            }
        };
        let drop = drop.unwrap_or(config.drop);

        let args = ArgsDictBuilder::from_config(config).build(newcols)?;
        let unpack = config.unpack && unpackable(&args);

        let sources = [col.to_string()];
        let pairs = config.col_pair_combiner.pair(&sources, &args);
        for (index, (source, (new_name, tuple))) in pairs.into_iter().enumerate() {
            let bound = resolve_builder(builder, &tuple)?;
            let builder_args = BuilderArgs::for_tuple(&tuple, unpack);
            let values = self.map_column(&source, &mut |x| bound.apply(index, x, &builder_args))?;
            self.set_column(&new_name, values);
        }

        if drop {
            self.drop_column(col)?;
        }
        Ok(())
    }

    /// Rewrites `col` in place: the template is the column name itself and
    /// the source is never dropped.
    ///
    /// The template expands to the single name `col`, so the new column
    /// replaces the old one. Builders receive the templateless sentinel as
    /// their argument.
    fn mutcol(
        &mut self,
        col: &str,
        builder: Option<&ColBuilder>,
        config: Option<&Config>,
    ) -> Result<(), FrameError> {
        self.gencol(col, col, builder, Some(false), config)
    }
}

/// In-memory column store with insertion-ordered columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    columns: IndexMap<String, Vec<Value>>,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Frame::default()
    }

    /// Builds a frame from `(name, values)` pairs, keeping their order.
    ///
    /// Fails with [`FrameError::LengthMismatch`] when the columns do not all
    /// share one length.
    pub fn from_columns<N, I>(columns: I) -> Result<Self, FrameError>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Vec<Value>)>,
    {
        let mut frame = Frame::new();
        let mut expected = None;
        for (name, values) in columns {
            let name = name.into();
            let expected = *expected.get_or_insert(values.len());
            if values.len() != expected {
                return Err(FrameError::LengthMismatch {
                    name,
                    len: values.len(),
                    expected,
                });
            }
            frame.columns.insert(name, values);
        }
        Ok(frame)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Column names in their current order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }
}

impl ColumnStore for Frame {
    fn get_column(&self, name: &str) -> Option<&[Value]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    fn map_column(
        &self,
        name: &str,
        f: &mut dyn FnMut(&Value) -> Result<Value, FrameError>,
    ) -> Result<Vec<Value>, FrameError> {
        let Some(values) = self.columns.get(name) else {
            return Err(FrameError::UnknownColumn {
                name: name.to_string(),
            });
        };
        values.iter().map(f).collect()
    }

    fn set_column(&mut self, name: &str, values: Vec<Value>) {
        self.columns.insert(name.to_string(), values);
    }

    fn drop_column(&mut self, name: &str) -> Result<(), FrameError> {
        // shift_remove keeps the remaining columns in their declared order.
        match self.columns.shift_remove(name) {
            Some(_) => Ok(()),
            None => Err(FrameError::UnknownColumn {
                name: name.to_string(),
            }),
        }
    }
}
