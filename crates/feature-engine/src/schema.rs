//! Feature Schema

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Numeric slots filled directly from the applicant input
pub const NUMERIC_FEATURES: [&str; 3] = ["age", "travel_history_count", "application_month"];

/// Errors building a feature schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Duplicate feature name in schema: {0}")]
    DuplicateFeature(String),
}

/// Ordered feature names a trained model expects as input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FeatureSchema {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Create a schema from names in model column order
    pub fn new<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut index = HashMap::with_capacity(names.len());

        for (position, name) in names.iter().enumerate() {
            if index.insert(name.clone(), position).is_some() {
                return Err(SchemaError::DuplicateFeature(name.clone()));
            }
        }

        Ok(Self { names, index })
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the schema has no features
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Feature names in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column position of a feature
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Whether the schema has a feature with this exact name
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Numeric slots this schema does not carry
    pub fn missing_numeric_slots(&self) -> Vec<&'static str> {
        NUMERIC_FEATURES
            .iter()
            .copied()
            .filter(|name| !self.contains(name))
            .collect()
    }

    /// Category values known for a one-hot prefix, in column order
    pub fn categories<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.names
            .iter()
            .filter_map(move |name| name.strip_prefix(prefix))
    }
}

impl TryFrom<Vec<String>> for FeatureSchema {
    type Error = SchemaError;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(names)
    }
}

impl From<FeatureSchema> for Vec<String> {
    fn from(schema: FeatureSchema) -> Self {
        schema.names
    }
}
