//! User record returned by the authentication backend.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Authenticated user as reported by the backend.
///
/// The frontend treats the record as opaque: only `id` is required, a few
/// display fields are read when present, and everything else is carried
/// through untouched in `extra` so it survives a round trip through the
/// session store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl User {
    /// Creates a user with only an identity.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: None,
            email: None,
            role: None,
            extra: Map::new(),
        }
    }

    /// Name shown in the UI: full name, then email, then the raw id.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or(&self.id)
    }
}
