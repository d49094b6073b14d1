use crate::table::{ConfigError, FieldDescriptor, FieldKind, FieldTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A field table as written in a grammar file.
///
/// ```toml
/// [[field]]
/// name = "major"
/// kind = "numeric"
/// index = 0
/// routes = { "." = 1 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grammar {
    #[serde(rename = "field", default)]
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: FieldKind,
    pub index: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub routes: BTreeMap<String, usize>,
}

impl FieldSpec {
    fn into_descriptor(self) -> Result<FieldDescriptor, ConfigError> {
        let name = self.name.unwrap_or_else(|| format!("field{}", self.index));
        let mut descriptor = FieldDescriptor::new(name, self.kind, self.index);
        for (key, target) in self.routes {
            let byte = match key.as_bytes() {
                [b] if b.is_ascii() => *b,
                _ => {
                    return Err(ConfigError::InvalidTerminator {
                        field: descriptor.name().to_string(),
                        key,
                    })
                }
            };
            descriptor = descriptor.route(byte, target);
        }
        Ok(descriptor)
    }
}

impl Grammar {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading grammar");
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// validate into a table
    pub fn build(self) -> Result<FieldTable, ConfigError> {
        let fields = self
            .fields
            .into_iter()
            .map(FieldSpec::into_descriptor)
            .collect::<Result<Vec<_>, _>>()?;
        let table = FieldTable::new(fields)?;
        tracing::trace!(fields = table.len(), "grammar ready");
        Ok(table)
    }
}

impl From<&FieldTable> for Grammar {
    fn from(table: &FieldTable) -> Self {
        let fields = table
            .iter()
            .map(|f| FieldSpec {
                name: Some(f.name().to_string()),
                kind: f.kind(),
                index: f.index(),
                routes: f
                    .routes()
                    .iter()
                    .map(|(&b, &target)| ((b as char).to_string(), target))
                    .collect(),
            })
            .collect();
        Self { fields }
    }
}

impl FieldTable {
    /// parse and validate a grammar file's contents
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Grammar::from_toml(text)?.build()
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Grammar::load(path)?.build()
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Grammar::from(self).to_toml()
    }
}
