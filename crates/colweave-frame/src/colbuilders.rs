//! Column builders.
//!
//! A builder turns one source value plus one expanded argument into one new
//! cell. Callers either pass an explicit [`ColBuilder`] or rely on the
//! default recovered from the argument's payload tag: `.name` tokens resolve
//! to [`as_attribute`], `name!` tokens to [`as_method`].

use std::fmt;

use chrono::{Datelike, Timelike};

use colweave_engine::{ArgTuple, BuilderKind, Match, TokenValue};

use crate::error::FrameError;
use crate::value::Value;

/// Looks up `name` as an attribute of `x` (the `.name` template form).
///
/// Dates and datetimes expose their calendar fields, datetimes additionally
/// their clock fields, and text exposes `len`.
pub fn as_attribute(x: &Value, name: &str) -> Result<Value, FrameError> {
    let unknown = || FrameError::UnknownAttribute {
        kind: x.kind(),
        name: name.to_string(),
    };
    match x {
        Value::Date(date) => match name {
            "year" => Ok(Value::Int(i64::from(date.year()))),
            "month" => Ok(Value::Int(i64::from(date.month()))),
            "day" => Ok(Value::Int(i64::from(date.day()))),
            _ => Err(unknown()),
        },
        Value::DateTime(dt) => match name {
            "year" => Ok(Value::Int(i64::from(dt.year()))),
            "month" => Ok(Value::Int(i64::from(dt.month()))),
            "day" => Ok(Value::Int(i64::from(dt.day()))),
            "hour" => Ok(Value::Int(i64::from(dt.hour()))),
            "minute" => Ok(Value::Int(i64::from(dt.minute()))),
            "second" => Ok(Value::Int(i64::from(dt.second()))),
            _ => Err(unknown()),
        },
        Value::Text(text) => match name {
            "len" => Ok(Value::Int(text.chars().count() as i64)),
            _ => Err(unknown()),
        },
        _ => Err(unknown()),
    }
}

/// Calls `name` as a zero-argument method of `x` (the `name!` template form).
pub fn as_method(x: &Value, name: &str) -> Result<Value, FrameError> {
    let unknown = || FrameError::UnknownMethod {
        kind: x.kind(),
        name: name.to_string(),
    };
    match x {
        Value::Text(text) => match name {
            "lower" => Ok(Value::Text(text.to_lowercase())),
            "upper" => Ok(Value::Text(text.to_uppercase())),
            "trim" => Ok(Value::Text(text.trim().to_string())),
            _ => Err(unknown()),
        },
        Value::Int(n) => match name {
            "abs" => Ok(Value::Int(n.saturating_abs())),
            _ => Err(unknown()),
        },
        Value::Float(f) => match name {
            "abs" => Ok(Value::Float(f.abs())),
            _ => Err(unknown()),
        },
        _ => Err(unknown()),
    }
}

/// The argument a builder receives for one output column, shaped by the
/// unpack rule.
///
/// When unpacking applies (the configuration allows it and no match in the
/// whole dictionary carries payload metadata), builders see raw token values
/// and a one-element tuple collapses to a single value. Otherwise they see
/// the full matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderArgs<'a> {
    /// Unpacked single argument.
    Value(&'a TokenValue),
    /// Unpacked multi-argument tuple.
    Values(Vec<&'a TokenValue>),
    /// Full matches, metadata included.
    Matches(&'a [Match]),
}

impl<'a> BuilderArgs<'a> {
    /// Shapes the argument view for `tuple` under the unpack rule.
    #[must_use]
    pub fn for_tuple(tuple: &'a ArgTuple, unpack: bool) -> Self {
        if !unpack {
            return BuilderArgs::Matches(tuple);
        }
        match tuple.as_slice() {
            [only] => BuilderArgs::Value(&only.value),
            _ => BuilderArgs::Values(tuple.iter().map(|m| &m.value).collect()),
        }
    }

    /// The single unpacked value, if that is what this argument is.
    #[must_use]
    pub fn as_value(&self) -> Option<&TokenValue> {
        match self {
            BuilderArgs::Value(value) => Some(value),
            _ => None,
        }
    }
}

type ValueFn = dyn Fn(&Value, &BuilderArgs<'_>) -> Result<Value, FrameError> + Send + Sync;
type EnumeratedFn =
    dyn Fn(usize, &Value, &BuilderArgs<'_>) -> Result<Value, FrameError> + Send + Sync;

/// A caller-supplied column builder.
///
/// `Value` builders receive the source value and the argument; `Enumerated`
/// builders additionally receive the output-column index, counted across the
/// columns one `gencol` call generates.
pub enum ColBuilder {
    Value(Box<ValueFn>),
    Enumerated(Box<EnumeratedFn>),
}

impl ColBuilder {
    pub fn value(
        f: impl Fn(&Value, &BuilderArgs<'_>) -> Result<Value, FrameError> + Send + Sync + 'static,
    ) -> Self {
        ColBuilder::Value(Box::new(f))
    }

    pub fn enumerated(
        f: impl Fn(usize, &Value, &BuilderArgs<'_>) -> Result<Value, FrameError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        ColBuilder::Enumerated(Box::new(f))
    }
}

impl fmt::Debug for ColBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColBuilder::Value(_) => f.write_str("ColBuilder::Value(..)"),
            ColBuilder::Enumerated(_) => f.write_str("ColBuilder::Enumerated(..)"),
        }
    }
}

/// Builder factory splitting text on `pattern` (a single space by default)
/// and keeping the piece matching the output-column index.
///
/// `frame.gencol("{first,last}_name", "name", Some(&splitter(None)), ..)`
/// fills `first_name` with piece 0 and `last_name` with piece 1.
#[must_use]
pub fn splitter(pattern: Option<&str>) -> ColBuilder {
    let pattern = pattern.unwrap_or(" ").to_string();
    ColBuilder::enumerated(move |index, x, _args| {
        let Some(text) = x.as_text() else {
            return Err(FrameError::NotText { kind: x.kind() });
        };
        text.split(pattern.as_str())
            .nth(index)
            .map(|piece| Value::Text(piece.to_string()))
            .ok_or_else(|| FrameError::MissingPiece {
                text: text.to_string(),
                index,
            })
    })
}

/// A builder bound to one generated column, ready to run per row.
#[derive(Debug)]
pub enum BoundBuilder<'a> {
    /// The caller's explicit builder.
    User(&'a ColBuilder),
    /// Accessor recovered from the first match's payload tag, bound to that
    /// match's working value.
    Tagged(BuilderKind, &'a TokenValue),
}

impl BoundBuilder<'_> {
    /// Applies the builder to one source value. `index` is the output-column
    /// index; `args` the tuple view shaped by the unpack rule.
    pub fn apply(
        &self,
        index: usize,
        x: &Value,
        args: &BuilderArgs<'_>,
    ) -> Result<Value, FrameError> {
        match self {
            BoundBuilder::User(ColBuilder::Value(f)) => f(x, args),
            BoundBuilder::User(ColBuilder::Enumerated(f)) => f(index, x, args),
            BoundBuilder::Tagged(BuilderKind::Attribute, value) => {
                as_attribute(x, &value.to_string())
            }
            BoundBuilder::Tagged(BuilderKind::Method, value) => as_method(x, &value.to_string()),
        }
    }
}

/// Picks the explicit builder when one is given, otherwise falls back to the
/// default-builder tag on the tuple's first match.
pub fn resolve_builder<'a>(
    explicit: Option<&'a ColBuilder>,
    args: &'a ArgTuple,
) -> Result<BoundBuilder<'a>, FrameError> {
    if let Some(builder) = explicit {
        return Ok(BoundBuilder::User(builder));
    }
    let Some(first) = args.first() else {
        return Err(FrameError::NoDefaultBuilder);
    };
    let Some(kind) = first.payload.default_builder else {
        return Err(FrameError::NoDefaultBuilder);
    };
    Ok(BoundBuilder::Tagged(kind, &first.value))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn attributes_of_dates_and_text() {
        let born = date(1890, 2, 11);
        assert_eq!(as_attribute(&born, "year").unwrap(), Value::Int(1890));
        assert_eq!(as_attribute(&born, "month").unwrap(), Value::Int(2));
        assert_eq!(as_attribute(&born, "day").unwrap(), Value::Int(11));
        assert_eq!(
            as_attribute(&Value::from("hello"), "len").unwrap(),
            Value::Int(5)
        );
    }

    #[test]
    fn unknown_attributes_are_reported_with_their_kind() {
        assert_eq!(
            as_attribute(&Value::Int(1), "year").unwrap_err(),
            FrameError::UnknownAttribute {
                kind: "int",
                name: "year".to_string(),
            }
        );
    }

    #[test]
    fn methods_over_text_and_numbers() {
        assert_eq!(
            as_method(&Value::from("Ada"), "lower").unwrap(),
            Value::from("ada")
        );
        assert_eq!(
            as_method(&Value::from(" x "), "trim").unwrap(),
            Value::from("x")
        );
        assert_eq!(as_method(&Value::Int(-4), "abs").unwrap(), Value::Int(4));
        assert_eq!(
            as_method(&Value::from("Ada"), "reverse").unwrap_err(),
            FrameError::UnknownMethod {
                kind: "text",
                name: "reverse".to_string(),
            }
        );
    }

    #[test]
    fn unpacking_collapses_singleton_tuples() {
        let tuple = vec![Match::token("a")];
        assert_eq!(
            BuilderArgs::for_tuple(&tuple, true),
            BuilderArgs::Value(&TokenValue::Text("a".to_string()))
        );

        let pair = vec![Match::token("a"), Match::int(1)];
        assert_eq!(
            BuilderArgs::for_tuple(&pair, true),
            BuilderArgs::Values(vec![
                &TokenValue::Text("a".to_string()),
                &TokenValue::Int(1),
            ])
        );
    }

    #[test]
    fn without_unpacking_builders_see_full_matches() {
        let tuple = vec![Match::token("a")];
        assert_eq!(
            BuilderArgs::for_tuple(&tuple, false),
            BuilderArgs::Matches(&tuple)
        );
    }

    #[test]
    fn splitter_keeps_the_indexed_piece() {
        let builder = splitter(None);
        let bound = BoundBuilder::User(&builder);
        let name = Value::from("Hedy Lamarr");
        let args = BuilderArgs::Value(&TokenValue::None);
        assert_eq!(bound.apply(0, &name, &args).unwrap(), Value::from("Hedy"));
        assert_eq!(bound.apply(1, &name, &args).unwrap(), Value::from("Lamarr"));
        assert_eq!(
            bound.apply(2, &name, &args).unwrap_err(),
            FrameError::MissingPiece {
                text: "Hedy Lamarr".to_string(),
                index: 2,
            }
        );
    }

    #[test]
    fn splitter_rejects_non_text() {
        let builder = splitter(Some(","));
        let bound = BoundBuilder::User(&builder);
        assert_eq!(
            bound
                .apply(0, &Value::Int(3), &BuilderArgs::Value(&TokenValue::None))
                .unwrap_err(),
            FrameError::NotText { kind: "int" }
        );
    }

    #[test]
    fn tagged_matches_resolve_to_their_accessor() {
        let mut m = Match::token(".year");
        m.value = TokenValue::Text("year".to_string());
        m.payload.default_builder = Some(BuilderKind::Attribute);
        let tuple = vec![m];

        let bound = resolve_builder(None, &tuple).unwrap();
        let args = BuilderArgs::for_tuple(&tuple, false);
        assert_eq!(
            bound.apply(0, &date(1888, 11, 7), &args).unwrap(),
            Value::Int(1888)
        );
    }

    #[test]
    fn untagged_matches_need_an_explicit_builder() {
        let tuple = vec![Match::token("a")];
        assert!(matches!(
            resolve_builder(None, &tuple),
            Err(FrameError::NoDefaultBuilder)
        ));

        let builder = ColBuilder::value(|x, _| Ok(x.clone()));
        assert!(matches!(
            resolve_builder(Some(&builder), &tuple),
            Ok(BoundBuilder::User(_))
        ));
    }

    #[test]
    fn empty_tuples_have_no_default_builder() {
        assert!(matches!(
            resolve_builder(None, &Vec::new()),
            Err(FrameError::NoDefaultBuilder)
        ));
    }
}
