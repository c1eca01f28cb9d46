//! Template splitting.
//!
//! A template is literal text with zero or more placeholders, `{...}` by
//! default. [`TemplateParser::parse`] splits it into a [`Skeleton`] (the
//! literal shape with placeholders reduced to slots) plus one group of
//! [`Match`]es per placeholder. Placeholder bodies are comma-separated lists
//! of plain tokens, inclusive `start:end[:step]` ranges, and `key=value`
//! tokens.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ExpandError;
use crate::token::Match;

/// Default placeholder pattern: non-greedy `{...}` with the body captured.
pub const DEFAULT_PATTERN: &str = r"\{(.*?)\}";

/// Default sub-token separator within a placeholder body.
pub const DEFAULT_SEPARATOR: &str = ",";

fn default_pattern() -> Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(DEFAULT_PATTERN).expect("default placeholder pattern compiles"))
        .clone()
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot,
}

/// The literal shape of a template, with each placeholder reduced to a
/// positional slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    segments: Vec<Segment>,
}

impl Skeleton {
    /// Number of placeholder slots.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.segments
            .iter()
            .filter(|segment| matches!(segment, Segment::Slot))
            .count()
    }

    /// Substitutes `names` into the slots, in order. Callers supply one name
    /// per slot; any slot past the end of `names` renders as empty.
    #[must_use]
    pub fn render(&self, names: &[String]) -> String {
        let mut out = String::new();
        let mut names = names.iter();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot => {
                    if let Some(name) = names.next() {
                        out.push_str(name);
                    }
                }
            }
        }
        out
    }
}

impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Slot => f.write_str("{}")?,
            }
        }
        Ok(())
    }
}

/// Splits templates into a skeleton plus per-placeholder match groups.
#[derive(Debug, Clone)]
pub struct TemplateParser {
    pattern: Regex,
    separator: String,
}

impl Default for TemplateParser {
    fn default() -> Self {
        TemplateParser {
            pattern: default_pattern(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl TemplateParser {
    /// Parser with a custom placeholder pattern and sub-token separator.
    ///
    /// The pattern's first capture group is taken as the placeholder body;
    /// a pattern without capture groups uses the whole match.
    pub fn new(pattern: &str, separator: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(TemplateParser {
            pattern: Regex::new(pattern)?,
            separator: separator.into(),
        })
    }

    /// The placeholder pattern in use.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// The sub-token separator in use.
    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Splits `template` into its skeleton and one match group per
    /// placeholder.
    ///
    /// A template without placeholders yields a skeleton equal to the input
    /// and a single group holding the templateless sentinel, so every
    /// template expands to at least one output name.
    pub fn parse(&self, template: &str) -> Result<(Skeleton, Vec<Vec<Match>>), ExpandError> {
        let mut segments = Vec::new();
        let mut groups = Vec::new();
        let mut last = 0;
        for caps in self.pattern.captures_iter(template) {
            let whole = match caps.get(0) {
                Some(whole) => whole,
                None => continue,
            };
            let body = caps.get(1).map_or(whole.as_str(), |group| group.as_str());
            push_literal(&mut segments, template, &template[last..whole.start()])?;
            segments.push(Segment::Slot);
            groups.push(self.parse_group(body)?);
            last = whole.end();
        }
        push_literal(&mut segments, template, &template[last..])?;

        if groups.is_empty() {
            groups.push(vec![Match::templateless()]);
        }
        Ok((Skeleton { segments }, groups))
    }

    /// Parses one placeholder body like `"a,1:3,k=v"`.
    ///
    /// `=` wins over `:`, so `k=1:3` is a keyed token whose value happens to
    /// contain a colon, not a range.
    fn parse_group(&self, body: &str) -> Result<Vec<Match>, ExpandError> {
        let mut matches = Vec::new();
        for token in body.split(self.separator.as_str()) {
            if let Some((key, value)) = token.split_once('=') {
                matches.push(Match::keyed(token, key, value));
            } else if token.contains(':') {
                matches.extend(expand_range(token)?);
            } else {
                matches.push(Match::token(token));
            }
        }
        Ok(matches)
    }
}

fn push_literal(
    segments: &mut Vec<Segment>,
    template: &str,
    text: &str,
) -> Result<(), ExpandError> {
    // A brace in literal text means a placeholder failed to close (or never
    // opened); rendering such a name would silently misbehave.
    if text.contains('{') || text.contains('}') {
        return Err(ExpandError::MalformedTemplate {
            template: template.to_string(),
        });
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

/// Expands an inclusive `start:end[:step]` token into integer matches.
///
/// A missing bound reads as 0, so `"6:"` is the descending range 6..=0 and
/// `":6"` the ascending 0..=6. When `start > end` the range runs downward,
/// stepping from the highest step-aligned value.
fn expand_range(token: &str) -> Result<Vec<Match>, ExpandError> {
    let bounds: Vec<&str> = token.split(':').collect();
    if bounds.len() != 2 && bounds.len() != 3 {
        return Err(ExpandError::InvalidRangeFormat {
            token: token.to_string(),
        });
    }

    let start = if bounds[0].is_empty() { "0" } else { bounds[0] };
    let end = if bounds[1].is_empty() { "0" } else { bounds[1] };
    let step = match bounds.get(2) {
        Some(step) if !step.is_empty() => step,
        _ => "1",
    };

    let start = parse_bound(token, start)?;
    let end = parse_bound(token, end)?;
    let step = parse_bound(token, step)?;
    // step_by takes a usize, so steps past usize::MAX are rejected alongside 0.
    let step = usize::try_from(step)
        .ok()
        .filter(|step| *step != 0)
        .ok_or_else(|| ExpandError::InvalidRangeBound {
            token: token.to_string(),
            bound: step.to_string(),
        })?;

    let (lo, hi, descending) = if start > end {
        (end, start, true)
    } else {
        (start, end, false)
    };
    let mut values: Vec<i64> = (lo..=hi).step_by(step).collect();
    if descending {
        values.reverse();
    }
    Ok(values.into_iter().map(Match::int).collect())
}

/// Parses one bound as a non-negative integer. Signs, decimals and anything
/// non-numeric are rejected rather than guessed at.
fn parse_bound(token: &str, bound: &str) -> Result<i64, ExpandError> {
    let invalid = || ExpandError::InvalidRangeBound {
        token: token.to_string(),
        bound: bound.to_string(),
    };
    if bound.is_empty() || !bound.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    bound.parse().map_err(|_| invalid())
}
