use serde::Deserialize;

/// JSON key names the builder writes its own fields under.
///
/// These keys are reserved: caller-supplied fields with the same name are
/// dropped. Renaming a key here changes the record layout without touching
/// any call site.
///
/// **Fields**
/// - `level`: severity name (`"DEBUG"` .. `"CRITICAL"`).
/// - `message`: the interpolated template.
/// - `location`: call site of the statement.
/// - `timestamp`: RFC 3339 UTC time the record was built.
/// - `tags`: list of free-form labels, only present when non-empty.
/// - `without`: caller field that carries extra keys to suppress; it is
///   consumed and never written to the record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldKeys {
    pub level: String,
    pub message: String,
    pub location: String,
    pub timestamp: String,
    pub tags: String,
    pub without: String,
}

impl Default for FieldKeys {
    fn default() -> Self {
        Self {
            level: "level".to_string(),
            message: "msg".to_string(),
            location: "location".to_string(),
            timestamp: "ts".to_string(),
            tags: "tags".to_string(),
            without: "without".to_string(),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("field key for {role} must not be empty")]
    EmptyKey { role: &'static str },

    #[error("field key {key:?} is used for both {first} and {second}")]
    DuplicateKey {
        key: String,
        first: &'static str,
        second: &'static str,
    },
}

impl FieldKeys {
    fn roles(&self) -> [(&'static str, &str); 6] {
        [
            ("level", self.level.as_str()),
            ("message", self.message.as_str()),
            ("location", self.location.as_str()),
            ("timestamp", self.timestamp.as_str()),
            ("tags", self.tags.as_str()),
            ("without", self.without.as_str()),
        ]
    }

    /// Check that every key is non-empty and that no two roles share a key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let roles = self.roles();
        for (i, &(role, key)) in roles.iter().enumerate() {
            if key.is_empty() {
                return Err(ConfigError::EmptyKey { role });
            }
            if let Some(&(second, _)) = roles[i + 1..].iter().find(|(_, other)| *other == key) {
                return Err(ConfigError::DuplicateKey {
                    key: key.to_string(),
                    first: role,
                    second,
                });
            }
        }
        Ok(())
    }

    /// Whether `key` is one of the names the builder owns.
    pub fn is_reserved(&self, key: &str) -> bool {
        self.roles().iter().any(|(_, k)| *k == key)
    }
}
