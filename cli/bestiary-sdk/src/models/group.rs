//! Displayable group model.

use serde::Serialize;

use crate::models::record::display_name;

/// A group key paired with its human-formatted name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInfo {
    pub key: String,
    pub display_name: String,
}

impl GroupInfo {
    pub fn from_key(key: impl Into<String>) -> Self {
        let key = key.into();
        GroupInfo {
            display_name: display_name(&key),
            key,
        }
    }
}
