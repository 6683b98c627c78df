use crate::domain::Provider;
use crate::fetch_state::FetchState;
use crate::gateway::Gateway;
use crate::ordering::ordered_by_name;
use crate::session::ProviderSession;
use tracing::{debug, info, instrument, warn};

/// The panel's root: fetches the flat provider list once, orders it by name
/// and composes one session per provider.
///
/// Same lifecycle as a session: one fetch on mount, re-mounts are no-ops, a
/// failed fetch waits in `Failed` for an explicit retry.
#[derive(Debug)]
pub struct ProviderDirectory {
    providers: FetchState<Vec<Provider>>,
    sessions: Vec<ProviderSession>,
}

impl ProviderDirectory {
    pub fn new() -> Self {
        ProviderDirectory {
            providers: FetchState::Idle,
            sessions: Vec::new(),
        }
    }

    pub fn state(&self) -> &FetchState<Vec<Provider>> {
        &self.providers
    }

    /// The provider summaries ordered by name. Empty until `Ready`.
    pub fn providers(&self) -> &[Provider] {
        self.providers.ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn sessions(&self) -> &[ProviderSession] {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut [ProviderSession] {
        &mut self.sessions
    }

    pub fn session(&mut self, provider_id: &str) -> Option<&mut ProviderSession> {
        self.sessions.iter_mut().find(|session| session.provider().id == provider_id)
    }

    #[instrument(skip_all)]
    pub async fn mount(&mut self, gateway: &dyn Gateway) {
        if !self.providers.is_idle() {
            debug!("Directory already mounted ({})", self.providers);
            return;
        }
        self.providers = FetchState::Loading;
        self.fetch(gateway).await;
    }

    #[instrument(skip_all)]
    pub async fn retry(&mut self, gateway: &dyn Gateway) {
        if !self.providers.is_failed() {
            debug!("Ignoring retry, directory is {}", self.providers);
            return;
        }
        self.providers = FetchState::Loading;
        self.fetch(gateway).await;
    }

    async fn fetch(&mut self, gateway: &dyn Gateway) {
        match gateway.list_providers().await {
            Ok(providers) => {
                let ordered = ordered_by_name(&providers);
                self.sessions = ordered.iter().cloned().map(ProviderSession::new).collect();
                info!("🔵 Directory ready with {} provider(s)", ordered.len());
                self.providers = FetchState::Ready(ordered);
            }
            Err(e) => {
                warn!("⚠️ Could not fetch the provider list: {}", e);
                self.providers = FetchState::Failed(e.to_string());
            }
        }
    }
}

impl Default for ProviderDirectory {
    fn default() -> Self {
        Self::new()
    }
}
