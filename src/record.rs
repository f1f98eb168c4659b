use crate::value::{FieldValue, Fields};

/// Assembled log record, handed to the serializer.
///
/// Entries keep the order they were added in: core fields first, then
/// constants, tags and caller fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogRecord {
    fields: Fields,
}

impl LogRecord {
    pub fn new(fields: Fields) -> Self {
        LogRecord { fields }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn into_fields(self) -> Fields {
        self.fields
    }
}
