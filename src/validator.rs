//! Declarative rule engine for request payloads
//!
//! A [`RuleSet`] pairs dotted field paths with ordered rule lists and
//! evaluates them against a `serde_json::Value` payload. Evaluation is
//! fail-fast: the first violated rule anywhere stops the walk and its
//! message, with `{{field}}` substituted by the field's dotted path,
//! becomes the single validation error.

use crate::error::{Result, WingPayError};
use serde_json::Value;

/// Expected JSON type for a [`Rule::TypeOf`] check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Integer,
    Object,
}

impl ValueKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Integer => value.is_i64() || value.is_u64(),
            ValueKind::Object => value.is_object(),
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            ValueKind::String => "string",
            ValueKind::Integer => "integer",
            ValueKind::Object => "object",
        }
    }
}

/// A single validation rule.
///
/// `Required` and `RequiredWhen` are presence rules and fail on
/// missing, null, or empty-string values. Every other rule is skipped
/// for absent values, so an optional field only has to be well-formed
/// when it is actually supplied.
#[derive(Clone)]
pub enum Rule {
    /// Field must be present and non-empty
    Required,
    /// Field, if present, must have the given JSON type
    TypeOf(ValueKind),
    /// Field, if present, must equal one of the listed values
    OneOf(&'static [&'static str]),
    /// Field is required only when another field equals a value
    RequiredWhen {
        field: &'static str,
        value: &'static str,
    },
    /// Custom predicate over the field's value, skipped when absent
    Custom {
        name: &'static str,
        check: fn(&Value) -> bool,
        message: &'static str,
    },
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::Required => write!(f, "Required"),
            Rule::TypeOf(kind) => write!(f, "TypeOf({:?})", kind),
            Rule::OneOf(values) => write!(f, "OneOf({:?})", values),
            Rule::RequiredWhen { field, value } => {
                write!(f, "RequiredWhen({}, {})", field, value)
            }
            Rule::Custom { name, .. } => write!(f, "Custom({})", name),
        }
    }
}

/// Money-format rule: zero or more digits, a literal dot, exactly two
/// digits. Absent or empty values are a pass, not a failure.
pub fn is_money() -> Rule {
    fn check(value: &Value) -> bool {
        let Some(text) = value.as_str() else {
            return false;
        };
        let Some((whole, fraction)) = text.split_once('.') else {
            return false;
        };
        whole.chars().all(|c| c.is_ascii_digit())
            && fraction.len() == 2
            && fraction.chars().all(|c| c.is_ascii_digit())
    }

    Rule::Custom {
        name: "is_money",
        check,
        message: "The {{field}} must be a valid money amount.",
    }
}

/// Ordered ruleset mapping dotted field paths to rule lists
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<(&'static str, Vec<Rule>)>,
}

impl RuleSet {
    /// Create an empty ruleset
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field with its ordered rules
    pub fn field(mut self, path: &'static str, rules: Vec<Rule>) -> Self {
        self.fields.push((path, rules));
        self
    }

    /// Validate a payload, returning the first violated rule's message
    /// as a [`WingPayError::Validation`].
    pub fn validate(&self, payload: &Value) -> Result<()> {
        for (path, rules) in &self.fields {
            for rule in rules {
                if let Some(message) = check_rule(rule, path, payload) {
                    return Err(WingPayError::validation(message));
                }
            }
        }
        Ok(())
    }
}

/// Resolve a dotted path against the payload root.
fn lookup<'a>(payload: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(payload, |value, segment| value.get(segment))
}

/// Missing, null, and empty-string values all count as absent.
fn is_absent(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn check_rule(rule: &Rule, path: &str, payload: &Value) -> Option<String> {
    let value = lookup(payload, path);

    let failed_template = match rule {
        Rule::Required => {
            if is_absent(value) {
                Some("The {{field}} field is required.".to_string())
            } else {
                None
            }
        }
        Rule::RequiredWhen { field, value: expected } => {
            let trigger = lookup(payload, field)
                .and_then(Value::as_str)
                .map(|actual| actual == *expected)
                .unwrap_or(false);
            if trigger && is_absent(value) {
                Some(format!(
                    "The {{{{field}}}} field is required when {} is {}.",
                    field, expected
                ))
            } else {
                None
            }
        }
        Rule::TypeOf(kind) => match value {
            Some(v) if !is_absent(Some(v)) && !kind.matches(v) => {
                let article = match kind {
                    ValueKind::String => "a",
                    ValueKind::Integer | ValueKind::Object => "an",
                };
                Some(format!(
                    "The {{{{field}}}} must be {} {}.",
                    article,
                    kind.noun()
                ))
            }
            _ => None,
        },
        Rule::OneOf(allowed) => match value {
            Some(v) if !is_absent(Some(v)) => {
                let matches = v
                    .as_str()
                    .map(|s| allowed.contains(&s))
                    .unwrap_or(false);
                if matches {
                    None
                } else {
                    Some("The selected {{field}} is invalid.".to_string())
                }
            }
            _ => None,
        },
        Rule::Custom { check, message, .. } => match value {
            Some(v) if !is_absent(Some(v)) && !check(v) => Some((*message).to_string()),
            _ => None,
        },
    };

    failed_template.map(|template| template.replace("{{field}}", path))
}
