use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Identity of one browser conversation, carried in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(new_id())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Only canonical UUIDs are accepted so arbitrary cookie values never
/// become map keys.
impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = uuid::Uuid::parse_str(s.trim())?;
        Ok(Self(parsed.to_string()))
    }
}
