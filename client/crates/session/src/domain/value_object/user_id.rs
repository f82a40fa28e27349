use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Backend-assigned account id, persisted under `loggedId`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct UserId(String);

impl UserId {
    /// `None` for empty strings
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        (!id.is_empty()).then_some(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
