//! Field validation for bound request bodies.
//!
//! DTOs implement [`Validate`] and report [`Violation`]s; the binding stage
//! turns them into a `FailureSignal::ValidationFailure` with one human
//! sentence per failing field.

pub mod rules;
pub mod time_layout;

use std::fmt;

use crate::errors::messages;
use time_layout::TimeLayout;

/// Name of a validated field as it should appear in error output.
///
/// The wire name (the serde name) wins over the structural Rust name; an
/// omitted field never appears in the error list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName {
    structural: &'static str,
    wire: Option<&'static str>,
    omitted: bool,
}

impl FieldName {
    pub const fn new(structural: &'static str) -> Self {
        Self {
            structural,
            wire: None,
            omitted: false,
        }
    }

    pub const fn wire(mut self, name: &'static str) -> Self {
        self.wire = Some(name);
        self
    }

    pub const fn omitted(mut self) -> Self {
        self.omitted = true;
        self
    }

    pub fn resolve(&self) -> Option<&'static str> {
        if self.omitted {
            return None;
        }
        Some(self.wire.unwrap_or(self.structural))
    }
}

/// A failed validation tag together with its parameter, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Required,
    Len(String),
    Max(String),
    Min(String),
    Gte(String),
    Lte(String),
    DecimalGte(String),
    DecimalLte(String),
    DecimalGt(String),
    DecimalLt(String),
    Eq(String),
    Email,
    Numeric,
    Boolean,
    TimeFormat(TimeLayout),
    /// Any tag without a dedicated message.
    Other(String),
}

impl Rule {
    /// Render the message for this rule applied to `field`.
    pub fn message(&self, field: &str) -> String {
        match self {
            Rule::Required => format!("{field} is required"),
            Rule::Len(p) => format!("{field} length or value must be exactly {p}"),
            Rule::Max(p) => format!("{field} length or value {p} must be at most"),
            Rule::Min(p) => format!("{field} length or value must be at least {p}"),
            Rule::Gte(p) | Rule::DecimalGte(p) => {
                format!("{field} must be greater than or equal to {p}")
            }
            Rule::Lte(p) => format!("{field} must be lower than or equal to {p}"),
            Rule::DecimalLte(p) => format!("{field} must be less than or equal to {p}"),
            Rule::DecimalGt(p) => format!("{field} must be greater than to {p}"),
            Rule::DecimalLt(p) => format!("{field} must be less than to {p}"),
            Rule::Eq(p) => format!("{field} must be equal to {p}"),
            Rule::Email => format!("{field} has invalid email format"),
            Rule::Numeric => format!("{field} must be a number"),
            Rule::Boolean => format!("{field} must be a boolean"),
            Rule::TimeFormat(layout) => messages::time_format(layout.readable()),
            Rule::Other(_) => "invalid input".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: FieldName,
    pub rule: Rule,
}

impl Violation {
    pub fn new(field: FieldName, rule: Rule) -> Self {
        Self { field, rule }
    }

    pub fn message(&self) -> String {
        let name = self.field.resolve().unwrap_or(self.field.structural);
        self.rule.message(name)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Implemented by every request DTO bound through `ValidatedJson`.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<Violation>>;
}

/// Accumulates violations in declaration order.
#[derive(Debug, Default)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rule` against `field` unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: FieldName, rule: Rule) -> &mut Self {
        if !ok {
            self.0.push(Violation::new(field, rule));
        }
        self
    }

    pub fn push(&mut self, violation: Violation) -> &mut Self {
        self.0.push(violation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn finish(self) -> Result<(), Vec<Violation>> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self.0)
        }
    }
}
