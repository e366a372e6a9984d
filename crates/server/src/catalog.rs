//! The registered tool set: records from [`crate::tools`] with their schemas compiled.

use crate::annotations::annotations_for;
use crate::error::{Result, ServerError};
use crate::tools::{self, ToolSpec};
use crate::validation::{self, InvalidParams, UnknownParameter};
use jsonschema::Validator;
use rmcp::model::{JsonObject, Tool};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

struct Entry {
    spec: ToolSpec,
    schema: Value,
    validator: Validator,
}

/// Immutable after construction; shared by every in-flight call.
pub struct Catalog {
    entries: Vec<Entry>,
    by_name: HashMap<&'static str, usize>,
}

impl Catalog {
    /// # Errors
    ///
    /// Returns an error if two records share a name, a schema is not an object, or a schema
    /// does not compile.
    pub fn new(specs: Vec<ToolSpec>) -> Result<Self> {
        let mut entries = Vec::with_capacity(specs.len());
        let mut by_name = HashMap::with_capacity(specs.len());

        for spec in specs {
            if by_name.insert(spec.name, entries.len()).is_some() {
                return Err(ServerError::Catalog(format!(
                    "duplicate tool name '{}'",
                    spec.name
                )));
            }
            let schema = (spec.input_schema)();
            if !schema.is_object() {
                return Err(ServerError::Catalog(format!(
                    "tool '{}': input schema must be a JSON object",
                    spec.name
                )));
            }
            let validator = validation::compile(&schema).map_err(|e| {
                ServerError::Catalog(format!("tool '{}': invalid input schema: {e}", spec.name))
            })?;
            entries.push(Entry {
                spec,
                schema,
                validator,
            });
        }

        Ok(Self { entries, by_name })
    }

    /// Every tool this server exposes.
    ///
    /// # Errors
    ///
    /// Only if the built-in records are inconsistent.
    pub fn standard() -> Result<Self> {
        Self::new(tools::all())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.by_name.get(name).map(|&i| &self.entries[i].spec)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate `args` for tool `name`. Unknown names pass; callers look the tool up first.
    pub fn validate(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> std::result::Result<(), InvalidParams> {
        match self.by_name.get(name) {
            Some(&i) => {
                let entry = &self.entries[i];
                validation::validate_arguments(&entry.schema, &entry.validator, args)
            }
            None => Ok(()),
        }
    }

    /// Argument names tool `name` does not declare.
    #[must_use]
    pub fn unknown_parameters(
        &self,
        name: &str,
        args: &Map<String, Value>,
    ) -> Vec<UnknownParameter> {
        match self.by_name.get(name) {
            Some(&i) => validation::unknown_parameters(&self.entries[i].schema, args),
            None => Vec::new(),
        }
    }

    /// MCP tool descriptors, in registration order.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        self.entries
            .iter()
            .map(|e| {
                let schema: JsonObject = e.schema.as_object().cloned().unwrap_or_default();
                let mut tool = Tool::new(e.spec.name, e.spec.description, Arc::new(schema));
                tool.title = Some(e.spec.title.to_string());
                tool.annotations = Some(annotations_for(e.spec.title, e.spec.effect));
                tool
            })
            .collect()
    }
}
