use crate::table::{FieldDescriptor, FieldKind, FieldTable};

/// A decoded segment, borrowed from the input for text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Numeric(i128),
    Text(&'a str),
}

impl FieldValue<'_> {
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Numeric(_) => FieldKind::Numeric,
            Self::Text(_) => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("field `{name}` (index {index}): {raw:?} is not an integer")]
    NumericConversion {
        index: usize,
        name: String,
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("field `{name}` (index {index}): {value} is out of range")]
    OutOfRange {
        index: usize,
        name: String,
        value: i128,
    },

    #[error("field `{name}` (index {index}): record has no {kind} field at this index")]
    UnknownField {
        index: usize,
        name: String,
        kind: FieldKind,
    },
}

impl ParseError {
    /// for sinks handed a field they do not own
    pub fn unknown_field(field: &FieldDescriptor) -> Self {
        Self::UnknownField {
            index: field.index(),
            name: field.name().to_string(),
            kind: field.kind(),
        }
    }

    /// for sinks whose storage is narrower than the decoded number
    pub fn out_of_range(field: &FieldDescriptor, value: i128) -> Self {
        Self::OutOfRange {
            index: field.index(),
            name: field.name().to_string(),
            value,
        }
    }

    /// sequence index of the field that failed
    pub fn index(&self) -> usize {
        match self {
            Self::NumericConversion { index, .. } => *index,
            Self::OutOfRange { index, .. } => *index,
            Self::UnknownField { index, .. } => *index,
        }
    }
}

/// The destination of a parse. The sink owns one storage slot per field of
/// the table it is parsed with, addressed by the field's sequence index.
pub trait FieldSink {
    fn store(&mut self, field: &FieldDescriptor, value: FieldValue<'_>) -> Result<(), ParseError>;
}

impl<S: FieldSink + ?Sized> FieldSink for &mut S {
    fn store(&mut self, field: &FieldDescriptor, value: FieldValue<'_>) -> Result<(), ParseError> {
        (**self).store(field, value)
    }
}

struct Cursor {
    field: usize,
    segment_start: usize,
}

fn close<S: FieldSink + ?Sized>(field: &FieldDescriptor, sink: &mut S, raw: &str) -> Result<(), ParseError> {
    let value = match field.kind() {
        FieldKind::Numeric => {
            let n = raw.parse::<i128>().map_err(|source| ParseError::NumericConversion {
                index: field.index(),
                name: field.name().to_string(),
                raw: raw.to_string(),
                source,
            })?;
            FieldValue::Numeric(n)
        }
        FieldKind::Text => FieldValue::Text(raw),
    };
    sink.store(field, value)
}

/// Scan `input` once, left to right, storing each segment into `sink`.
///
/// Fields the input never routes to are not written. On error the sink may
/// hold a mix of old and new values.
pub fn parse<S: FieldSink + ?Sized>(table: &FieldTable, sink: &mut S, input: &str) -> Result<(), ParseError> {
    let mut cursor = Cursor {
        field: 0,
        segment_start: 0,
    };

    for (i, &b) in input.as_bytes().iter().enumerate() {
        let field = table.field(cursor.field);
        let Some(next) = field.next(b) else {
            continue;
        };

        // terminators are ascii, so i is a char boundary
        close(field, sink, &input[cursor.segment_start..i])?;
        cursor.segment_start = i + 1;
        cursor.field = next;
    }

    let field = table.field(cursor.field);
    close(field, sink, &input[cursor.segment_start..])
}
