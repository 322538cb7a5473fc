//! Prompt Template - Flat `{name}` placeholder substitution
//!
//! A `PromptTemplate` discovers its placeholder names once, at construction,
//! so callers can inspect which variables a template requires before filling it.
//! Filling validates the supplied variables against that set and substitutes
//! every placeholder in a single pass.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use log::debug;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PromptError, Result};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.*?)\}").expect("valid placeholder regex"));

/// A text template with named `{placeholder}` slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PromptTemplate {
    template: String,
    variables: Vec<String>,
}

impl PromptTemplate {
    /// Create a template and extract its placeholder names
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        let variables = extract_variables(&template);
        debug!("Parsed template with {} variable(s): {:?}", variables.len(), variables);
        Self { template, variables }
    }

    /// The raw template text
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Distinct placeholder names, in order of first appearance
    pub fn expected_variables(&self) -> &[String] {
        &self.variables
    }

    /// Fill the template with the given variables
    ///
    /// The key set of `variables` must equal `expected_variables()` exactly.
    /// Values are inserted verbatim; placeholder-like text inside a value is
    /// not expanded again.
    ///
    /// # Errors
    /// * `UnexpectedVariable` - some keys have no placeholder (checked first)
    /// * `MissingVariable` - some placeholders have no value
    pub fn fill_variables(&self, variables: &HashMap<String, String>) -> Result<String> {
        let mut unexpected: Vec<String> = variables
            .keys()
            .filter(|name| !self.variables.contains(name))
            .cloned()
            .collect();
        if !unexpected.is_empty() {
            unexpected.sort();
            return Err(PromptError::UnexpectedVariable(unexpected));
        }

        let missing: Vec<String> = self
            .variables
            .iter()
            .filter(|name| !variables.contains_key(*name))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(PromptError::MissingVariable(missing));
        }

        let filled = PLACEHOLDER_RE.replace_all(&self.template, |caps: &Captures| {
            variables.get(caps[1].trim()).cloned().unwrap_or_default()
        });

        debug!("Filled template with {} variable(s)", variables.len());
        Ok(filled.into_owned())
    }

    /// Fill the template from name/value pairs
    ///
    /// A repeated name keeps its last value.
    pub fn fill<I, K, V>(&self, pairs: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let variables: HashMap<String, String> = pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        self.fill_variables(&variables)
    }

    /// Fill the template from any serializable context that maps to a flat object
    ///
    /// Strings are used verbatim, numbers and booleans by their JSON text, and
    /// null as an empty string. Nested arrays or objects are rejected.
    pub fn fill_with<T: Serialize>(&self, context: &T) -> Result<String> {
        let variables = match serde_json::to_value(context)? {
            Value::Object(map) => map
                .into_iter()
                .map(|(name, value)| Ok((name.clone(), flatten_value(&name, value)?)))
                .collect::<Result<HashMap<_, _>>>()?,
            Value::Null => HashMap::new(),
            other => {
                return Err(PromptError::InvalidContext(format!(
                    "expected an object, got {}",
                    json_kind(&other)
                )));
            }
        };
        self.fill_variables(&variables)
    }
}

fn extract_variables(template: &str) -> Vec<String> {
    let mut variables: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let name = caps[1].trim();
        if !variables.iter().any(|v| v == name) {
            variables.push(name.to_string());
        }
    }
    variables
}

fn flatten_value(name: &str, value: Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Bool(_) | Value::Number(_) => Ok(value.to_string()),
        other => Err(PromptError::InvalidContext(format!(
            "variable '{}' is {}, expected a scalar",
            name,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl From<String> for PromptTemplate {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

impl From<&str> for PromptTemplate {
    fn from(template: &str) -> Self {
        Self::new(template)
    }
}

impl From<PromptTemplate> for String {
    fn from(template: PromptTemplate) -> Self {
        template.template
    }
}

impl FromStr for PromptTemplate {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Display for PromptTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}
