//! One polling cycle: fetch, classify, derive the phase, then act.

use powerwatch_core::{
    classify, fingerprint, ClassifierKeywords, NotificationState, OutageSignal, RawStatus,
    SiteClock,
};
use powerwatch_scraper::StatusSource;
use powerwatch_telegram::ChatTransport;

use crate::debounce::{transition, Decision, Phase, RecheckDelay};
use crate::error::CycleError;
use crate::notifier::{Delivery, Notifier, PublishPolicy};
use crate::store::StateStore;

/// What a cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No outage, none on record.
    Idle,
    /// Outage on record and the sample's fingerprint matches it.
    Unchanged,
    Published(Delivery),
    RecoveryConfirmed(Delivery),
    /// The re-check saw the outage again; the re-checked data was published
    /// (or suppressed, if it matched the record).
    RecoveryAborted(Delivery),
}

/// Read-only evaluation of the current sample.
#[derive(Debug, Clone)]
pub struct Inspection {
    pub raw: RawStatus,
    pub signal: OutageSignal,
    pub fingerprint: String,
    pub state: NotificationState,
    pub phase: Phase,
    pub decision: Decision,
}

pub struct Monitor<S, T> {
    source: S,
    transport: T,
    store: StateStore,
    keywords: ClassifierKeywords,
    clock: SiteClock,
    recheck: RecheckDelay,
    policy: PublishPolicy,
}

impl<S: StatusSource, T: ChatTransport> Monitor<S, T> {
    #[must_use]
    pub fn new(
        source: S,
        transport: T,
        store: StateStore,
        keywords: ClassifierKeywords,
        clock: SiteClock,
    ) -> Self {
        Self {
            source,
            transport,
            store,
            keywords,
            clock,
            recheck: RecheckDelay::default(),
            policy: PublishPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_recheck_delay(mut self, recheck: RecheckDelay) -> Self {
        self.recheck = recheck;
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: PublishPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Fetch and evaluate without notifying or writing state.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Fetch`] or [`CycleError::Store`] if the sample or
    /// the stored record cannot be read.
    pub async fn inspect(&self) -> Result<Inspection, CycleError> {
        let raw = self.source.fetch_status().await?;
        let state = self.store.load()?;
        let phase = Phase::from_state(&state);
        let (signal, fingerprint, decision) = self.evaluate(&raw, &state, phase);
        Ok(Inspection {
            raw,
            signal,
            fingerprint,
            state,
            phase,
            decision,
        })
    }

    /// Run one cycle to completion, including at most one recovery re-check.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError`] if fetching, reading state, or publishing
    /// fails. Nothing is written unless a message was delivered.
    pub async fn run_cycle(&self) -> Result<CycleOutcome, CycleError> {
        let mut raw = self.source.fetch_status().await?;
        let state = self.store.load()?;
        let mut phase = Phase::from_state(&state);

        let notifier = Notifier::new(&self.transport, &self.store, self.clock, self.policy);

        // PendingRecovery never yields ScheduleRecheck, so this loops at most twice.
        loop {
            let (signal, _, decision) = self.evaluate(&raw, &state, phase);
            tracing::info!(
                phase = ?phase,
                decision = ?decision,
                is_outage = signal.is_outage,
                category = %signal.category,
                "sample evaluated"
            );

            match decision {
                Decision::Idle if phase == Phase::Outage => return Ok(CycleOutcome::Unchanged),
                Decision::Idle => return Ok(CycleOutcome::Idle),
                Decision::Publish => {
                    let delivery = notifier.notify(&state, signal.category, &raw, true).await?;
                    return Ok(if phase == Phase::PendingRecovery {
                        tracing::info!("outage still present on re-check; recovery aborted");
                        CycleOutcome::RecoveryAborted(delivery)
                    } else {
                        CycleOutcome::Published(delivery)
                    });
                }
                Decision::ConfirmRecovery => {
                    let delivery = notifier.notify(&state, signal.category, &raw, false).await?;
                    return Ok(CycleOutcome::RecoveryConfirmed(delivery));
                }
                Decision::ScheduleRecheck => {
                    let delay = self.recheck.sample();
                    tracing::info!(
                        delay_secs = delay.as_secs(),
                        "outage no longer reported; re-checking before announcing recovery"
                    );
                    tokio::time::sleep(delay).await;
                    raw = self.source.fetch_status().await?;
                    phase = Phase::PendingRecovery;
                }
            }
        }
    }

    fn evaluate(
        &self,
        raw: &RawStatus,
        state: &NotificationState,
        phase: Phase,
    ) -> (OutageSignal, String, Decision) {
        let signal = classify(raw, &self.keywords, self.clock.now());
        let fingerprint = fingerprint(raw);
        let changed = state.last_update_hash.as_deref() != Some(fingerprint.as_str());
        let (_, decision) = transition(phase, signal.is_outage, changed);
        (signal, fingerprint, decision)
    }
}

#[cfg(test)]
#[path = "cycle_test.rs"]
mod tests;
