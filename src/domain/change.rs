use serde::{Deserialize, Serialize};

/// One element of the batch body for `POST /api/providers/{id}/apply`.
///
/// `duration` and `brightness` are accepted by the backend but unused by the
/// toggle path, so they are omitted from the JSON when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub group_id: String,
    pub lamp_id: String,
    pub state: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
}

impl Change {
    pub fn set_state(group_id: &str, lamp_id: &str, state: bool) -> Self {
        Change {
            group_id: group_id.to_string(),
            lamp_id: lamp_id.to_string(),
            state,
            duration: None,
            brightness: None,
        }
    }
}

/// Body for `POST /api/providers/{id}/apply/all`: transition every lamp of
/// the provider to `state` over `duration` milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkChange {
    pub state: bool,
    pub duration: u64,
}
