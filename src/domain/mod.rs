mod change;
mod group;
mod lamp;
mod provider;
mod snapshot;

pub use change::{BulkChange, Change};
pub use group::Group;
pub use lamp::Lamp;
pub use provider::Provider;
pub use snapshot::ProviderSnapshot;

/// Accessor for the display key collections are ordered by.
pub trait Named {
    fn display_name(&self) -> &str;
}
