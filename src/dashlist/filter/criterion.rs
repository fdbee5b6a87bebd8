//! Filter criteria and their evaluation against records.

use super::{FilterValue, RecencyWindow};
use crate::error::ValidationError;
use crate::model::{parse_datetime, value_to_datetime, Record};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Operation applied to a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOp {
    /// Exact match; strings compared case-insensitively.
    Eq(FilterValue),
    /// Field present and not equal.
    Ne(FilterValue),
    /// Equal to any of the values.
    In(Vec<FilterValue>),
    /// Array field has an element equal to the value.
    Contains(FilterValue),
    /// Timestamp field satisfies `now - t <= window`.
    Within(RecencyWindow),
    /// Timestamp field in the inclusive range.
    Between(DateTime<Utc>, DateTime<Utc>),
}

/// A condition on one record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriterion {
    /// Dotted field path (e.g. "role", "author.name")
    pub field: String,
    pub op: FilterOp,
    /// Invert the outcome after evaluation
    pub negated: bool,
}

impl FilterCriterion {
    pub fn new(field: impl Into<String>, op: FilterOp) -> Self {
        Self {
            field: field.into(),
            op,
            negated: false,
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq(value.into()))
    }

    pub fn ne(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Ne(value.into()))
    }

    pub fn any_of(field: impl Into<String>, values: Vec<FilterValue>) -> Self {
        Self::new(field, FilterOp::In(values))
    }

    pub fn contains(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Contains(value.into()))
    }

    pub fn within(field: impl Into<String>, window: RecencyWindow) -> Self {
        Self::new(field, FilterOp::Within(window))
    }

    pub fn between(field: impl Into<String>, from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self::new(field, FilterOp::Between(from, to))
    }

    /// Logical NOT of this criterion.
    pub fn negate(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Evaluate with an explicit reference time for recency operations.
    pub fn matches_at(&self, record: &Record, now: DateTime<Utc>) -> bool {
        self.evaluate(record, now) != self.negated
    }

    fn evaluate(&self, record: &Record, now: DateTime<Utc>) -> bool {
        let stored = if self.field == "id" {
            Some(Value::String(record.id.clone()))
        } else {
            record.get_path(&self.field).cloned()
        };
        let Some(stored) = stored else {
            return false;
        };

        match &self.op {
            FilterOp::Eq(expected) => expected.equals(&stored),
            FilterOp::Ne(expected) => expected.same_type(&stored) && !expected.equals(&stored),
            FilterOp::In(values) => values.iter().any(|v| v.equals(&stored)),
            FilterOp::Contains(expected) => match &stored {
                Value::Array(items) => items.iter().any(|item| expected.equals(item)),
                _ => false,
            },
            FilterOp::Within(window) => value_to_datetime(&stored)
                .is_some_and(|t| now.signed_duration_since(t) <= window.duration()),
            FilterOp::Between(from, to) => {
                value_to_datetime(&stored).is_some_and(|t| *from <= t && t <= *to)
            }
        }
    }
}

/// AND of all criteria; an empty list accepts everything.
pub fn matches_all(record: &Record, criteria: &[FilterCriterion], now: DateTime<Utc>) -> bool {
    criteria.iter().all(|c| c.matches_at(record, now))
}

impl FromStr for FilterCriterion {
    type Err = ValidationError;

    /// Parse the compact criterion syntax used on the command line.
    ///
    /// `field=value`, `field!=value`, `field~value`, `field^a,b`,
    /// `field@30d`, `field@2024-01-01..2024-02-01`, with an optional leading `!`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (negated, body) = match trimmed.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let Some(pos) = body.find(['=', '~', '^', '@']) else {
            return Err(ValidationError::criterion(
                input,
                "expected one of =, !=, ~, ^ or @",
            ));
        };

        let mut field = &body[..pos];
        let operator = body.as_bytes()[pos];
        let operand = &body[pos + 1..];

        let op = match operator {
            b'=' if field.ends_with('!') => {
                field = &field[..field.len() - 1];
                FilterOp::Ne(FilterValue::parse_literal(operand))
            }
            b'=' => FilterOp::Eq(FilterValue::parse_literal(operand)),
            b'~' => FilterOp::Contains(FilterValue::parse_literal(operand)),
            b'^' => FilterOp::In(
                operand
                    .split(',')
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(FilterValue::parse_literal)
                    .collect(),
            ),
            _ => parse_time_operand(input, operand)?,
        };

        let field = field.trim();
        if field.is_empty() {
            return Err(ValidationError::criterion(input, "missing field name"));
        }
        if let FilterOp::In(values) = &op {
            if values.is_empty() {
                return Err(ValidationError::criterion(input, "empty value list"));
            }
        }

        Ok(Self {
            field: field.to_string(),
            op,
            negated,
        })
    }
}

fn parse_time_operand(input: &str, operand: &str) -> Result<FilterOp, ValidationError> {
    if let Some((from, to)) = operand.split_once("..") {
        let from = parse_datetime(from)
            .ok_or_else(|| ValidationError::criterion(input, format!("bad date '{}'", from)))?;
        let to = parse_datetime(to)
            .ok_or_else(|| ValidationError::criterion(input, format!("bad date '{}'", to)))?;
        if from > to {
            return Err(ValidationError::criterion(input, "range start is after its end"));
        }
        return Ok(FilterOp::Between(from, to));
    }
    Ok(FilterOp::Within(operand.parse()?))
}

impl fmt::Display for FilterCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            write!(f, "!")?;
        }
        match &self.op {
            FilterOp::Eq(v) => write!(f, "{}={}", self.field, v),
            FilterOp::Ne(v) => write!(f, "{}!={}", self.field, v),
            FilterOp::In(values) => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{}^{}", self.field, joined.join(","))
            }
            FilterOp::Contains(v) => write!(f, "{}~{}", self.field, v),
            FilterOp::Within(w) => write!(f, "{}@{}", self.field, w),
            FilterOp::Between(from, to) => write!(
                f,
                "{}@{}..{}",
                self.field,
                from.format("%Y-%m-%d"),
                to.format("%Y-%m-%d")
            ),
        }
    }
}
