use crate::scan::{FieldSink, FieldValue, ParseError};
use crate::table::{FieldDescriptor, FieldKind, FieldTable};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Numeric(i128),
    Text(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A record shaped at run time by a table, used with grammar files.
///
/// Slots are `None` until the scan reaches their field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicRecord {
    names: Vec<String>,
    kinds: Vec<FieldKind>,
    values: Vec<Option<Value>>,
}

impl DynamicRecord {
    pub fn for_table(table: &FieldTable) -> Self {
        Self {
            names: table.iter().map(|f| f.name().to_string()).collect(),
            kinds: table.iter().map(|f| f.kind()).collect(),
            values: vec![None; table.len()],
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn by_name(&self, name: &str) -> Option<&Value> {
        let index = self.names.iter().position(|n| n == name)?;
        self.get(index)
    }

    /// (name, value) for every field, in sequence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> + '_ {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Option::as_ref))
    }

    pub fn clear(&mut self) {
        self.values.iter_mut().for_each(|v| *v = None);
    }
}

impl FieldSink for DynamicRecord {
    fn store(&mut self, field: &FieldDescriptor, value: FieldValue<'_>) -> Result<(), ParseError> {
        let index = field.index();
        if self.kinds.get(index) != Some(&value.kind()) {
            return Err(ParseError::unknown_field(field));
        }
        self.values[index] = Some(match value {
            FieldValue::Numeric(n) => Value::Numeric(n),
            FieldValue::Text(s) => Value::Text(s.to_string()),
        });
        Ok(())
    }
}

// serialized as a map of field name to value, unreached fields are null
impl Serialize for DynamicRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
