//! # Predicate Library
//!
//! Attribute filters over [`Record`](crate::model::Record)s. A filter is a
//! [`FilterCriterion`]: a field path, an operation, and an optional negation.
//! Criteria combine with logical AND through [`matches_all`].
//!
//! | Op | Example | Meaning |
//! |----|---------|---------|
//! | `Eq` | `role=admin` | equal, strings compared case-insensitively |
//! | `Ne` | `status!=draft` | present and not equal |
//! | `In` | `gradeLevel.id^l1,l2` | equal to any listed value |
//! | `Contains` | `genre~action` | array field has the value |
//! | `Within` | `lastLogin@30d` | timestamp no older than the window |
//! | `Between` | `createdAt@2024-01-01..2024-02-01` | timestamp in the inclusive range |
//!
//! A leading `!` negates the whole criterion after evaluation, so
//! `!lastLogin@30d` also matches users who never logged in.
//!
//! ## Missing fields
//!
//! Every primitive operation evaluates to `false` when the field is absent or
//! `null`. Predicates never panic and never return errors.

mod criterion;
mod facets;
mod value;

pub use criterion::{matches_all, FilterCriterion, FilterOp};
pub use facets::facet_values;
pub use value::{FilterValue, RecencyWindow};
