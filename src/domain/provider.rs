use crate::domain::Named;
use serde::{Deserialize, Serialize};

/// Summary of a lighting backend as returned by `GET /api/providers`.
///
/// Providers are created and destroyed entirely by the backend; the client
/// only ever holds read-only summaries of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
}

impl Named for Provider {
    fn display_name(&self) -> &str {
        &self.name
    }
}
