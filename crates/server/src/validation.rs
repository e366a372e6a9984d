//! Argument validation against a tool's declared input schema.
//!
//! Runs before the tool's build function, so invalid input never reaches the gateway. Argument
//! names the schema does not declare are not an error: they are dropped when the arguments are
//! mapped to a request, and [`unknown_parameters`] reports them for logging.

use jsonschema::Validator;
use jsonschema::error::ValidationErrorKind;
use serde_json::{Map, Value};
use std::fmt;

/// One reason the arguments were rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    MissingRequired {
        parameter: String,
    },
    Constraint {
        instance_path: String,
        message: String,
    },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired { parameter } => {
                write!(f, "missing required parameter '{parameter}'")
            }
            Self::Constraint {
                instance_path,
                message,
            } if instance_path.is_empty() => write!(f, "{message}"),
            Self::Constraint {
                instance_path,
                message,
            } => write!(f, "{instance_path}: {message}"),
        }
    }
}

/// All violations found for one call.
///
/// Displays as `Invalid params: validation failed with N error(s)` followed by one
/// `- <violation>` line each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParams {
    pub violations: Vec<Violation>,
}

impl fmt::Display for InvalidParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid params: validation failed with {} error(s)",
            self.violations.len()
        )?;
        for v in &self.violations {
            write!(f, "\n- {v}")?;
        }
        Ok(())
    }
}

impl std::error::Error for InvalidParams {}

/// An argument name the schema does not declare, with close declared names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownParameter {
    pub parameter: String,
    pub suggestions: Vec<String>,
}

impl fmt::Display for UnknownParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suggestions.first() {
            Some(s) => write!(f, "'{}' (did you mean '{s}'?)", self.parameter),
            None => write!(f, "'{}'", self.parameter),
        }
    }
}

/// Compile a tool's input schema with format checks (`uri`) enabled.
pub fn compile(schema: &Value) -> Result<Validator, String> {
    jsonschema::options()
        .should_validate_formats(true)
        .build(schema)
        .map_err(|e| e.to_string())
}

fn declared_properties(schema: &Value) -> Map<String, Value> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default()
}

/// Check `args` against `schema` (the raw schema, for required names) and its compiled
/// `validator`: missing required parameters, then type and range constraints.
pub fn validate_arguments(
    schema: &Value,
    validator: &Validator,
    args: &Map<String, Value>,
) -> Result<(), InvalidParams> {
    let required: Vec<&str> = schema
        .get("required")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .collect();

    let mut violations = Vec::new();

    for r in required {
        if !args.contains_key(r) {
            violations.push(Violation::MissingRequired {
                parameter: r.to_string(),
            });
        }
    }

    let instance = Value::Object(args.clone());
    for e in validator.iter_errors(&instance) {
        // Already reported above with a clearer message.
        if matches!(e.kind(), ValidationErrorKind::Required { .. }) {
            continue;
        }
        violations.push(Violation::Constraint {
            instance_path: e.instance_path().to_string(),
            message: e.to_string(),
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(InvalidParams { violations })
    }
}

/// Argument names in `args` that `schema` does not declare, in argument order.
#[must_use]
pub fn unknown_parameters(schema: &Value, args: &Map<String, Value>) -> Vec<UnknownParameter> {
    let props = declared_properties(schema);
    let valid_params: Vec<&str> = props.keys().map(String::as_str).collect();

    args.keys()
        .filter(|k| !props.contains_key(*k))
        .map(|k| UnknownParameter {
            parameter: k.clone(),
            suggestions: find_similar_strings(k, &valid_params),
        })
        .collect()
}

fn find_similar_strings(unknown: &str, known: &[&str]) -> Vec<String> {
    let mut candidates: Vec<(f64, String)> = Vec::new();
    for k in known {
        let score = strsim::jaro(unknown, k);
        if score > 0.7 {
            candidates.push((score, (*k).to_string()));
        }
    }
    candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(_, s)| s).collect()
}
