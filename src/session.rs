use crate::domain::{BulkChange, Group, Lamp, Provider, ProviderSnapshot};
use crate::fetch_state::FetchState;
use crate::gateway::{Gateway, GatewayError};
use crate::group_view;
use crate::lamp_control::LampControl;
use crate::ordering::ordered_by_name;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Transition time for a bulk on/off command, in milliseconds.
pub const BULK_TRANSITION_MS: u64 = 1000;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session for provider '{0}' has no snapshot yet")]
    NotReady(String),
    #[error("unknown lamp '{0}'")]
    UnknownLamp(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Owns the lifecycle of exactly one provider snapshot and mediates every
/// command against that provider's subtree.
///
/// Mounting issues exactly one fetch; re-mounting an already mounted session
/// does nothing. A failed fetch parks the session in `Failed` until `retry`
/// is invoked; nothing retries automatically. At every `Ready` transition
/// one lamp control per lamp is seeded from the snapshot's state; the
/// snapshot itself is never written afterwards.
#[derive(Debug)]
pub struct ProviderSession {
    provider: Provider,
    snapshot: FetchState<ProviderSnapshot>,
    controls: HashMap<String, LampControl>,
}

impl ProviderSession {
    pub fn new(provider: Provider) -> Self {
        ProviderSession {
            provider,
            snapshot: FetchState::Idle,
            controls: HashMap::new(),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    pub fn state(&self) -> &FetchState<ProviderSnapshot> {
        &self.snapshot
    }

    /// Issues the session's one snapshot fetch. A no-op on an already
    /// mounted session, so re-rendering never triggers additional fetches.
    #[instrument(skip(self, gateway), fields(provider_id = %self.provider.id))]
    pub async fn mount(&mut self, gateway: &dyn Gateway) {
        if !self.snapshot.is_idle() {
            debug!(provider_id = self.provider.id, "Session already mounted ({})", self.snapshot);
            return;
        }
        self.snapshot = FetchState::Loading;
        self.fetch(gateway).await;
    }

    /// Re-fetches after a failure. Only valid from `Failed`; the default
    /// policy never invokes this automatically.
    #[instrument(skip(self, gateway), fields(provider_id = %self.provider.id))]
    pub async fn retry(&mut self, gateway: &dyn Gateway) {
        if !self.snapshot.is_failed() {
            debug!(provider_id = self.provider.id, "Ignoring retry, session is {}", self.snapshot);
            return;
        }
        self.snapshot = FetchState::Loading;
        self.fetch(gateway).await;
    }

    /// Explicit, user-invoked re-fetch of a ready session. This is the only
    /// way a bulk apply ever becomes visible locally. On failure the
    /// previous snapshot stays in place.
    #[instrument(skip(self, gateway), fields(provider_id = %self.provider.id))]
    pub async fn refresh(&mut self, gateway: &dyn Gateway) -> Result<(), SessionError> {
        if self.snapshot.ready().is_none() {
            return Err(SessionError::NotReady(self.provider.id.clone()));
        }
        let snapshot = gateway.provider_snapshot(&self.provider.id).await?;
        self.install(snapshot);
        Ok(())
    }

    async fn fetch(&mut self, gateway: &dyn Gateway) {
        match gateway.provider_snapshot(&self.provider.id).await {
            Ok(snapshot) => self.install(snapshot),
            Err(e) => {
                #[rustfmt::skip]
                warn!(provider_id = self.provider.id, "⚠️ Could not fetch snapshot for provider '{}': {}", self.provider.name, e);
                self.snapshot = FetchState::Failed(e.to_string());
            }
        }
    }

    fn install(&mut self, snapshot: ProviderSnapshot) {
        self.check_invariants(&snapshot);
        self.controls = snapshot
            .lamps
            .iter()
            .map(|lamp| (lamp.id.clone(), LampControl::new(lamp, lamp.state)))
            .collect();
        #[rustfmt::skip]
        info!(provider_id = self.provider.id, "🔵 Installed snapshot for provider '{}': {} group(s), {} lamp(s)", self.provider.name, snapshot.groups.len(), snapshot.lamps.len());
        self.snapshot = FetchState::Ready(snapshot);
    }

    fn check_invariants(&self, snapshot: &ProviderSnapshot) {
        for group in &snapshot.groups {
            if group.provider_id != self.provider.id {
                #[rustfmt::skip]
                warn!(provider_id = self.provider.id, "⚠️ Group '{}' claims provider '{}' but was fetched under '{}'", group.name, group.provider_id, self.provider.id);
            }
        }

        let group_ids = snapshot.groups.iter().map(|group| group.id.as_str()).collect::<HashSet<_>>();
        for lamp in &snapshot.lamps {
            if !group_ids.contains(lamp.group_id.as_str()) {
                #[rustfmt::skip]
                warn!(provider_id = self.provider.id, "⚠️ Lamp '{}' references group '{}' which is not in the snapshot", lamp.name, lamp.group_id);
            }
        }
    }

    /// The snapshot's groups ordered by display name. Empty until `Ready`.
    pub fn groups(&self) -> Vec<Group> {
        match self.snapshot.ready() {
            Some(snapshot) => ordered_by_name(&snapshot.groups),
            None => Vec::new(),
        }
    }

    /// The lamps belonging to `group`, ordered by display name.
    pub fn lamps_in(&self, group: &Group) -> Vec<Lamp> {
        match self.snapshot.ready() {
            Some(snapshot) => group_view::lamps_for(group, &snapshot.lamps),
            None => Vec::new(),
        }
    }

    /// The lamp's local, optimistically updated state.
    pub fn lamp_state(&self, lamp_id: &str) -> Option<bool> {
        self.controls.get(lamp_id).map(|control| control.state())
    }

    /// Toggles one lamp through its control.
    pub async fn toggle(&mut self, gateway: &dyn Gateway, lamp_id: &str) -> Result<bool, SessionError> {
        if self.snapshot.ready().is_none() {
            return Err(SessionError::NotReady(self.provider.id.clone()));
        }
        let control = self
            .controls
            .get_mut(lamp_id)
            .ok_or_else(|| SessionError::UnknownLamp(lamp_id.to_string()))?;
        Ok(control.toggle(gateway, &self.provider.id).await?)
    }

    /// Transitions every lamp of this provider to `desired` over a fixed
    /// one-second transition. Local lamp state is left untouched: the panel
    /// reflects a bulk change only after an explicit `refresh`.
    #[instrument(skip(self, gateway), fields(provider_id = %self.provider.id))]
    pub async fn apply_all(&self, gateway: &dyn Gateway, desired: bool) -> Result<(), SessionError> {
        if self.snapshot.ready().is_none() {
            return Err(SessionError::NotReady(self.provider.id.clone()));
        }

        let change = BulkChange {
            state: desired,
            duration: BULK_TRANSITION_MS,
        };
        gateway.apply_all(&self.provider.id, &change).await?;

        let state_text = if desired { "on" } else { "off" };
        info!(provider_id = self.provider.id, "🟢 Turned {} all lamps of provider '{}'", state_text, self.provider.name);
        Ok(())
    }
}
