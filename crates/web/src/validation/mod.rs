//! Declarative request validation.
//!
//! A [`RuleSet`] holds one [`FieldRule`] chain per field. Each chain runs its
//! checks in order and stops at its first failure; chains are independent,
//! so failures from different fields accumulate in declaration order.

mod extract;
pub mod parse;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::ValidateLength;

pub use extract::Validated;

/// One failed rule, reported to the client as `{field, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Body of a 422 validation response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationFailure {
    pub msg: Vec<FieldError>,
}

/// Request types declare the rules their fields must satisfy.
pub trait RequestRules {
    fn rules() -> RuleSet;
}

#[derive(Debug)]
enum Check {
    Required(&'static str),
    Length {
        min: u64,
        max: u64,
        message: &'static str,
    },
    Matches(&'static Regex, &'static str),
    Uuid(&'static str),
    Float { min: f64, message: &'static str },
    Int { min: i32, message: &'static str },
    Boolean(&'static str),
}

impl Check {
    /// Returns the failure message, if any.
    fn run(&self, value: &str) -> Option<&'static str> {
        let passed = match self {
            Check::Required(_) => !value.is_empty(),
            Check::Length { min, max, .. } => value.validate_length(Some(*min), Some(*max), None),
            Check::Matches(pattern, _) => pattern.is_match(value),
            Check::Uuid(_) => parse::is_uuid(value),
            Check::Float { min, .. } => parse::parse_float(value).is_some_and(|v| v >= *min),
            Check::Int { min, .. } => parse::parse_int(value).is_some_and(|v| v >= *min),
            Check::Boolean(_) => parse::parse_flag(value).is_some(),
        };

        if passed { None } else { Some(self.message()) }
    }

    fn message(&self) -> &'static str {
        match self {
            Check::Required(message)
            | Check::Length { message, .. }
            | Check::Matches(_, message)
            | Check::Uuid(message)
            | Check::Float { message, .. }
            | Check::Int { message, .. }
            | Check::Boolean(message) => *message,
        }
    }
}

/// Rule chain for a single field.
#[derive(Debug)]
pub struct FieldRule {
    field: &'static str,
    optional: bool,
    trim: bool,
    checks: Vec<Check>,
}

impl FieldRule {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            optional: false,
            trim: false,
            checks: Vec::new(),
        }
    }

    /// Skip the whole chain when the field is absent, `null` or empty.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn trim(mut self) -> Self {
        self.trim = true;
        self
    }

    pub fn required(self, message: &'static str) -> Self {
        self.check(Check::Required(message))
    }

    /// Inclusive bounds, counted in characters.
    pub fn length(self, min: u64, max: u64, message: &'static str) -> Self {
        self.check(Check::Length { min, max, message })
    }

    pub fn matches(self, pattern: &'static Regex, message: &'static str) -> Self {
        self.check(Check::Matches(pattern, message))
    }

    pub fn uuid(self, message: &'static str) -> Self {
        self.check(Check::Uuid(message))
    }

    pub fn float_min(self, min: f64, message: &'static str) -> Self {
        self.check(Check::Float { min, message })
    }

    pub fn int_min(self, min: i32, message: &'static str) -> Self {
        self.check(Check::Int { min, message })
    }

    pub fn boolean(self, message: &'static str) -> Self {
        self.check(Check::Boolean(message))
    }

    /// Message for an array or object value: the first check that
    /// describes the value's format, falling back to the presence check.
    fn shape_message(&self) -> &'static str {
        self.checks
            .iter()
            .find(|check| !matches!(check, Check::Required(_)))
            .or_else(|| self.checks.first())
            .map_or("Invalid value", Check::message)
    }

    fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    /// Runs the chain against `input`, rewriting the field to its normalized
    /// string form when it passes and removing it when an optional field is
    /// skipped.
    fn apply(&self, input: &mut Map<String, Value>) -> Option<FieldError> {
        let raw = match input.get(self.field) {
            Some(Value::Array(_) | Value::Object(_)) => {
                return Some(FieldError::new(self.field, self.shape_message()));
            }
            other => other.and_then(string_form),
        };

        if self.optional && raw.as_deref().is_none_or(str::is_empty) {
            input.remove(self.field);
            return None;
        }

        let mut value = raw.clone().unwrap_or_default();
        if self.trim {
            value = value.trim().to_string();
        }

        if let Some(message) = self.checks.iter().find_map(|check| check.run(&value)) {
            return Some(FieldError::new(self.field, message));
        }

        if raw.is_some() {
            input.insert(self.field.to_string(), Value::String(value));
        }

        None
    }
}

/// Scalars are validated through their string form; `null` counts as absent.
fn string_form(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rule: FieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Runs every chain. Returns all failures, one per failing field at most.
    pub fn apply(&self, input: &mut Map<String, Value>) -> Result<(), Vec<FieldError>> {
        let errors: Vec<FieldError> = self
            .rules
            .iter()
            .filter_map(|rule| rule.apply(input))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
