use crate::domain::{Change, Lamp};
use crate::gateway::{Gateway, GatewayError};
use tracing::{debug, info, instrument};

/// Local control state for a single lamp.
///
/// The boolean mirrors the lamp's on/off state. It is seeded exactly once
/// from an explicit constructor argument and never re-synced afterwards; the
/// canonical entity stays in the owning session's snapshot.
///
/// Toggles are reconciled with a single-flight token: every `begin_toggle`
/// supersedes tracking of the previous one, and only the completion matching
/// the latest issued token is applied. An out-of-order completion of a
/// superseded command is dropped, so rapid repeated toggles cannot leave the
/// local boolean trailing a stale response.
#[derive(Debug)]
pub struct LampControl {
    lamp_id: String,
    group_id: String,
    name: String,
    state: bool,
    issued: u64,
}

/// An issued-but-unacknowledged toggle command.
#[derive(Debug)]
pub struct PendingToggle {
    token: u64,
    desired: bool,
}

impl PendingToggle {
    pub fn desired(&self) -> bool {
        self.desired
    }
}

impl LampControl {
    /// `seed_state` is an explicit argument so the seed-vs-sync boundary is
    /// visible at the call site.
    pub fn new(lamp: &Lamp, seed_state: bool) -> Self {
        LampControl {
            lamp_id: lamp.id.clone(),
            group_id: lamp.group_id.clone(),
            name: lamp.name.clone(),
            state: seed_state,
            issued: 0,
        }
    }

    pub fn lamp_id(&self) -> &str {
        &self.lamp_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> bool {
        self.state
    }

    /// Issues a new toggle intent targeting the opposite of the current
    /// local state. Supersedes any earlier pending toggle.
    pub fn begin_toggle(&mut self) -> PendingToggle {
        self.issued += 1;
        PendingToggle {
            token: self.issued,
            desired: !self.state,
        }
    }

    /// Applies a successfully acknowledged toggle to the local state, unless
    /// a newer toggle was issued in the meantime. Returns whether it applied.
    pub fn complete_toggle(&mut self, pending: PendingToggle) -> bool {
        if pending.token != self.issued {
            #[rustfmt::skip]
            debug!(lamp_id = self.lamp_id, "Dropping stale toggle completion for lamp '{}' (token {}, latest {})", self.name, pending.token, self.issued);
            return false;
        }
        self.state = pending.desired;
        true
    }

    /// Submits a single-element change batch for this lamp and flips the
    /// local state only after the command completes successfully. A failed
    /// or never-resolving command leaves the local state unchanged.
    #[instrument(skip(self, gateway), fields(lamp_id = %self.lamp_id))]
    pub async fn toggle(&mut self, gateway: &dyn Gateway, provider_id: &str) -> Result<bool, GatewayError> {
        let pending = self.begin_toggle();
        let desired = pending.desired();

        let change = Change::set_state(&self.group_id, &self.lamp_id, desired);
        gateway.apply(provider_id, &[change]).await?;

        let applied = self.complete_toggle(pending);
        if applied {
            let state_text = if desired { "on" } else { "off" };
            info!(lamp_id = self.lamp_id, "🟢 Turned {} lamp '{}'", state_text, self.name);
        }
        Ok(applied)
    }
}
