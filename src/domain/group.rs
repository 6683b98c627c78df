use crate::domain::Named;
use serde::{Deserialize, Serialize};

/// A named collection of lamps within one provider.
///
/// `provider_id` is expected to match the provider whose snapshot the group
/// was fetched under; the session logs a warning when it does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub provider_id: String,
}

impl Named for Group {
    fn display_name(&self) -> &str {
        &self.name
    }
}
