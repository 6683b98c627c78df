use crate::domain::Named;
use serde::{Deserialize, Serialize};

/// A single controllable light with a boolean on/off state.
///
/// `state` is the state at fetch time. The live, optimistically updated
/// value lives in the lamp's control; this field is never written after the
/// snapshot arrives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lamp {
    pub id: String,
    pub name: String,
    pub group_id: String,
    pub state: bool,
}

impl Named for Lamp {
    fn display_name(&self) -> &str {
        &self.name
    }
}
