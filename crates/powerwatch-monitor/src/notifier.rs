//! Send-versus-edit decisions and state synchronisation.
//!
//! A new outage (the record does not report one) always gets a fresh message
//! so the chat raises an alert. Updates to a live outage and the recovery
//! notice edit that message in place. The notifier is the only writer of the
//! state file and writes only after the transport acknowledged the message.

use powerwatch_core::{fingerprint, NotificationState, OutageCategory, RawStatus, SiteClock};
use powerwatch_telegram::ChatTransport;

use crate::error::NotifyError;
use crate::messages;
use crate::store::StateStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishPolicy {
    /// Start a fresh message when the site-local day differs from the day
    /// the live message was published.
    pub new_message_each_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryAction {
    Sent,
    Edited,
    /// Same outage, same fingerprint: nothing was sent.
    Suppressed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub action: DeliveryAction,
    /// State on record after this delivery.
    pub state: NotificationState,
}

pub struct Notifier<'a, T: ChatTransport + ?Sized> {
    transport: &'a T,
    store: &'a StateStore,
    clock: SiteClock,
    policy: PublishPolicy,
}

impl<'a, T: ChatTransport + ?Sized> Notifier<'a, T> {
    #[must_use]
    pub fn new(
        transport: &'a T,
        store: &'a StateStore,
        clock: SiteClock,
        policy: PublishPolicy,
    ) -> Self {
        Self {
            transport,
            store,
            clock,
            policy,
        }
    }

    /// Publish `raw` as an outage (`is_outage`) or as a recovery.
    ///
    /// `current` is the state loaded at the start of the cycle.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Transport`] with the state file untouched if the
    /// send or edit fails, or [`NotifyError::Store`] if the message went out
    /// but the new state could not be written.
    pub async fn notify(
        &self,
        current: &NotificationState,
        category: OutageCategory,
        raw: &RawStatus,
        is_outage: bool,
    ) -> Result<Delivery, NotifyError> {
        let hash = fingerprint(raw);

        if is_outage
            && current.reports_outage()
            && current.last_update_hash.as_deref() == Some(hash.as_str())
        {
            tracing::debug!(fingerprint = %hash, "outage unchanged; nothing to publish");
            return Ok(Delivery {
                action: DeliveryAction::Suppressed,
                state: current.clone(),
            });
        }

        let now = self.clock.now();
        let today = now.date_naive();
        let text = if is_outage {
            messages::outage_message(category, raw, now)
        } else {
            messages::recovery_message(raw, now)
        };

        let rolled_over = self.policy.new_message_each_day
            && current.published_at.is_some_and(|day| day != today);
        let new_outage = is_outage && !current.reports_outage();

        let (action, sent) = match current.message_id.as_deref() {
            Some(id) if !rolled_over && !new_outage => (
                DeliveryAction::Edited,
                self.transport.edit_message(id, &text).await?,
            ),
            _ => (
                DeliveryAction::Sent,
                self.transport.send_message(&text).await?,
            ),
        };

        let state = NotificationState::published(sent.id, is_outage, today, hash);
        self.store.save(&state)?;

        tracing::info!(
            action = ?action,
            is_outage,
            category = %category,
            message_id = state.message_id.as_deref().unwrap_or_default(),
            "notification published"
        );
        Ok(Delivery { action, state })
    }
}
