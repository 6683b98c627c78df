use crate::domain::{Group, Lamp};
use serde::{Deserialize, Serialize};

/// The full groups+lamps payload fetched for one provider at one point in
/// time, as returned by `GET /api/providers/{id}`.
///
/// A snapshot is the sole source of truth for its provider's subtree until
/// the next fetch; partial updates are never merged into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSnapshot {
    pub groups: Vec<Group>,
    pub lamps: Vec<Lamp>,
}
