use std::fmt::Write as _;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use rand_regex::Regex as RandRegex;

use rowforge_core::{ColumnSpec, ProviderFormats};
use rowforge_dict::{Category, Dictionary};

use crate::errors::GenerationError;
use crate::strategy::{BoolKind, DateKind, Strategy};

/// Significant digits used when a numeric column has no length set.
pub const DEFAULT_NUMERIC_LENGTH: u32 = 10;
/// Repetition cap applied to unbounded pattern quantifiers.
const MAX_REPEAT: u32 = 16;
/// Candidates drawn before a pattern is declared unsatisfiable.
const MAX_PATTERN_ATTEMPTS: usize = 32;
/// Synthesized dates fall inside [2000-01-01, 2029-12-31].
const DATE_SPAN_DAYS: i64 = 10_957;

/// One synthesized value, carrying how it renders as an SQL literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Quoted and escaped on render (strings, dates, yes/no tokens).
    Text(String),
    /// Emitted verbatim (digit-valid numeric literals).
    Numeric(String),
    /// Emitted verbatim (`true`/`false`).
    Keyword(&'static str),
}

impl Value {
    /// Render as an SQL literal token; single quotes are doubled.
    pub fn to_sql(&self) -> String {
        match self {
            Value::Text(value) => format!("'{}'", value.replace('\'', "''")),
            Value::Numeric(value) => value.clone(),
            Value::Keyword(value) => (*value).to_string(),
        }
    }
}

/// Executes generation strategies against the dictionary and the column's
/// length/precision constraints. Pure computation; the only shared state is
/// the read-only dictionary.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer<'a> {
    dict: &'a Dictionary,
    formats: &'a ProviderFormats,
}

impl<'a> Synthesizer<'a> {
    pub fn new(dict: &'a Dictionary, formats: &'a ProviderFormats) -> Self {
        Self { dict, formats }
    }

    /// Produce one value for a column according to its resolved strategy.
    pub fn synthesize(
        &self,
        spec: &ColumnSpec,
        strategy: &Strategy,
        rng: &mut impl Rng,
    ) -> Result<Value, GenerationError> {
        match strategy {
            Strategy::Dictionary(category) => self
                .dictionary_value(spec, *category, rng)
                .map(Value::Text),
            Strategy::Pattern(pattern) => {
                pattern_value(&spec.name, pattern, rng).map(Value::Text)
            }
            Strategy::Numeric { precision } => {
                numeric_value(&spec.name, spec.length, *precision, rng).map(Value::Numeric)
            }
            Strategy::Date(kind) => date_value(&spec.name, *kind, self.formats, rng).map(Value::Text),
            Strategy::Boolean(BoolKind::YesNo) => {
                let token = if rng.random_bool(0.5) { "Y" } else { "N" };
                Ok(Value::Text(token.to_string()))
            }
            Strategy::Boolean(BoolKind::TrueFalse) => {
                let token = if rng.random_bool(0.5) { "true" } else { "false" };
                Ok(Value::Keyword(token))
            }
            Strategy::ColumnName => Ok(Value::Text(spec.name.clone())),
        }
    }

    fn dictionary_value(
        &self,
        spec: &ColumnSpec,
        category: Category,
        rng: &mut impl Rng,
    ) -> Result<String, GenerationError> {
        let samples = self
            .dict
            .lookup(category)
            .map_err(|source| GenerationError::Dictionary {
                column: spec.name.clone(),
                source,
            })?;
        let sample = &samples[rng.random_range(0..samples.len())];

        // Truncate to the requested length on a char boundary; never pad.
        if let Some(limit) = spec.length {
            let limit = limit as usize;
            if sample.chars().count() > limit {
                return Ok(sample.chars().take(limit).collect());
            }
        }
        Ok(sample.clone())
    }
}

/// Generate a string guaranteed to match the given anchored pattern.
///
/// The sampler cannot handle anchors, so one outer `^`/`$` pair is stripped
/// before compiling and every candidate is verified against the full pattern.
/// A candidate that fails verification is redrawn; running out of attempts is
/// a synthesis failure, never a silently mismatched value.
fn pattern_value(
    column: &str,
    pattern: &str,
    rng: &mut impl Rng,
) -> Result<String, GenerationError> {
    let pattern_err = |reason: String| GenerationError::Pattern {
        column: column.to_string(),
        pattern: pattern.to_string(),
        reason,
    };

    let inner = strip_anchors(pattern);
    let sampler = RandRegex::compile(inner, MAX_REPEAT).map_err(|err| pattern_err(err.to_string()))?;
    let verifier = regex::Regex::new(&format!("^(?:{inner})$"))
        .map_err(|err| pattern_err(err.to_string()))?;

    for _ in 0..MAX_PATTERN_ATTEMPTS {
        let candidate: String = rng.sample(&sampler);
        if verifier.is_match(&candidate) {
            return Ok(candidate);
        }
    }

    Err(pattern_err(format!(
        "no candidate matched after {MAX_PATTERN_ATTEMPTS} attempts"
    )))
}

fn strip_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    pattern.strip_suffix('$').unwrap_or(pattern)
}

/// Numeric literal with exactly `length` significant digits and `precision`
/// digits after the decimal point. Unsigned by policy; the leading digit is
/// never zero, so the digit budget is always fully used.
fn numeric_value(
    column: &str,
    length: Option<u32>,
    precision: u32,
    rng: &mut impl Rng,
) -> Result<String, GenerationError> {
    let length = length.unwrap_or(DEFAULT_NUMERIC_LENGTH);
    if length == 0 {
        return Err(GenerationError::Constraint {
            column: column.to_string(),
            reason: "numeric length must be at least 1".to_string(),
        });
    }
    if precision >= length {
        return Err(GenerationError::Constraint {
            column: column.to_string(),
            reason: format!("precision {precision} must be smaller than length {length}"),
        });
    }

    let mut digits = String::with_capacity(length as usize + 1);
    digits.push(digit(rng.random_range(1..=9)));
    for _ in 1..length {
        digits.push(digit(rng.random_range(0..=9)));
    }

    if precision > 0 {
        digits.insert(digits.len() - precision as usize, '.');
    }
    Ok(digits)
}

fn digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('0')
}

/// Date or date-time text within a bounded plausible calendar range,
/// formatted with the provider-owned layout string.
fn date_value(
    column: &str,
    kind: DateKind,
    formats: &ProviderFormats,
    rng: &mut impl Rng,
) -> Result<String, GenerationError> {
    let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
    let date = base + chrono::Duration::days(rng.random_range(0..=DATE_SPAN_DAYS));

    let (layout, timestamp) = match kind {
        DateKind::Date => return render_layout(column, &formats.date_format, date.format(&formats.date_format)),
        DateKind::DateTime => (
            formats.date_time_format.as_str(),
            NaiveDateTime::new(date, NaiveTime::default()),
        ),
        DateKind::Timestamp => {
            let seconds = rng.random_range(0..86_400);
            let time =
                NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0).unwrap_or_default();
            (formats.date_time_format.as_str(), NaiveDateTime::new(date, time))
        }
    };
    render_layout(column, layout, timestamp.format(layout))
}

// The layout is opaque caller input; a bad specifier surfaces as an error
// instead of a formatting panic.
fn render_layout(
    column: &str,
    layout: &str,
    formatted: impl std::fmt::Display,
) -> Result<String, GenerationError> {
    let mut out = String::new();
    write!(out, "{formatted}").map_err(|_| GenerationError::Constraint {
        column: column.to_string(),
        reason: format!("invalid date layout '{layout}'"),
    })?;
    Ok(out)
}
