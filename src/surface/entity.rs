use serde::{Deserialize, Serialize};

use super::category::{classify, Category};

/// A capability exposed by a device, as reported by the entity source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub key: u32,
    pub kind: String,
    pub name: String,
    pub object_id: String,
    /// Only set for selectable entities
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl Entity {
    #[cfg(test)]
    pub fn new(key: u32, kind: &str, name: &str, object_id: &str) -> Self {
        Self {
            key,
            kind: kind.into(),
            name: name.into(),
            object_id: object_id.into(),
            options: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn category(&self) -> Category {
        classify(&self.kind)
    }

    pub fn display_line(&self) -> String {
        format!("  [{}] {} ({})", self.key, self.name, self.object_id)
    }
}
