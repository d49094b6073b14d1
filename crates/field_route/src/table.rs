use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// What a field decodes its segment into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// base 10 integer, optionally signed
    Numeric,
    /// the segment verbatim
    Text,
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => f.write_str("numeric"),
            Self::Text => f.write_str("text"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("field table is empty")]
    Empty,

    #[error("field index {index} is used by both `{first}` and `{second}`")]
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },

    #[error("field index {index} is missing, indices must be dense starting at 0")]
    MissingIndex { index: usize },

    #[error("field `{field}` routes {terminator:?} to field {target}, which does not exist")]
    DanglingRoute {
        field: String,
        terminator: char,
        target: usize,
    },

    #[error("field `{field}` has a non-ascii terminator byte 0x{byte:02x}")]
    NonAsciiTerminator { field: String, byte: u8 },

    #[error("field `{field}` has route key {key:?}, a terminator must be a single ascii character")]
    InvalidTerminator { field: String, key: String },

    #[error("failed to read grammar file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid grammar")]
    Toml(#[from] toml::de::Error),

    #[error("failed to render grammar")]
    Render(#[from] toml::ser::Error),
}

/// Describes one field of a record: its kind, its position, and where the
/// scan goes next for each terminator byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    kind: FieldKind,
    index: usize,
    routes: BTreeMap<u8, usize>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind, index: usize) -> Self {
        Self {
            name: name.into(),
            kind,
            index,
            routes: BTreeMap::new(),
        }
    }

    pub fn numeric(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, FieldKind::Numeric, index)
    }

    pub fn text(name: impl Into<String>, index: usize) -> Self {
        Self::new(name, FieldKind::Text, index)
    }

    /// close this field on `terminator` and continue with field `target`
    pub fn route(mut self, terminator: u8, target: usize) -> Self {
        self.routes.insert(terminator, target);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn routes(&self) -> &BTreeMap<u8, usize> {
        &self.routes
    }

    /// the field that `b` leads to, if `b` terminates this field
    pub fn next(&self, b: u8) -> Option<usize> {
        self.routes.get(&b).copied()
    }

    /// a terminal field is only closed by the end of the input
    pub fn is_terminal(&self) -> bool {
        self.routes.is_empty()
    }
}

/// A validated set of field descriptors, ordered by sequence index.
///
/// Indices are dense from 0 and every route points at an existing field.
/// A table is immutable once built and can be shared between threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    fields: Vec<FieldDescriptor>,
}

impl FieldTable {
    /// Check the descriptors and build the table. The descriptors may be
    /// given in any order.
    pub fn new(mut fields: Vec<FieldDescriptor>) -> Result<Self, ConfigError> {
        if fields.is_empty() {
            return Err(ConfigError::Empty);
        }

        fields.sort_by_key(|f| f.index);

        for (position, field) in fields.iter().enumerate() {
            // sorted, so a lower index than the position was already seen
            if field.index < position {
                return Err(ConfigError::DuplicateIndex {
                    index: field.index,
                    first: fields[position - 1].name.clone(),
                    second: field.name.clone(),
                });
            }
            if field.index > position {
                return Err(ConfigError::MissingIndex { index: position });
            }
        }

        for field in &fields {
            for (&byte, &target) in &field.routes {
                if !byte.is_ascii() {
                    return Err(ConfigError::NonAsciiTerminator {
                        field: field.name.clone(),
                        byte,
                    });
                }
                if target >= fields.len() {
                    return Err(ConfigError::DanglingRoute {
                        field: field.name.clone(),
                        terminator: byte as char,
                        target,
                    });
                }
            }
        }

        Ok(Self { fields })
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FieldDescriptor> {
        self.fields.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    // indices handed out by a validated table are always in range
    pub(crate) fn field(&self, index: usize) -> &FieldDescriptor {
        &self.fields[index]
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
