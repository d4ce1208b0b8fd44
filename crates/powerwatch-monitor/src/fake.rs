//! In-memory collaborators for the notifier and cycle tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use powerwatch_core::{HouseRecord, RawStatus};
use powerwatch_scraper::{FetchError, StatusSource};
use powerwatch_telegram::{ChatTransport, SentMessage, TransportError};

pub(crate) fn outage_status() -> RawStatus {
    RawStatus {
        house: Some(HouseRecord::from_provider(
            Some("аварійне"),
            Some("2024-01-01 10:00"),
            Some("2024-01-01 14:00"),
            None,
        )),
        update_timestamp: Some("10:05 01.01.2024".to_string()),
    }
}

pub(crate) fn no_outage_status() -> RawStatus {
    RawStatus {
        house: Some(HouseRecord::from_provider(Some(""), None, None, None)),
        update_timestamp: Some("10:05 01.01.2024".to_string()),
    }
}

/// Hands out queued samples in order.
#[derive(Default)]
pub(crate) struct FakeSource {
    queue: Mutex<VecDeque<Result<RawStatus, FetchError>>>,
    fetches: Mutex<usize>,
}

impl FakeSource {
    pub(crate) fn with(samples: impl IntoIterator<Item = RawStatus>) -> Self {
        Self {
            queue: Mutex::new(samples.into_iter().map(Ok).collect()),
            fetches: Mutex::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            queue: Mutex::new(VecDeque::from([Err(FetchError::UnexpectedStatus {
                status: 503,
                url: "https://example.test/ua/shutdowns".to_string(),
            })])),
            fetches: Mutex::new(0),
        }
    }

    pub(crate) fn fetches(&self) -> usize {
        *self.fetches.lock()
    }
}

#[async_trait]
impl StatusSource for FakeSource {
    async fn fetch_status(&self) -> Result<RawStatus, FetchError> {
        *self.fetches.lock() += 1;
        self.queue
            .lock()
            .pop_front()
            .expect("fake source ran out of samples")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Send { text: String },
    Edit { id: String, text: String },
}

/// Records every call; ids are handed out from 100 upwards.
#[derive(Clone, Default)]
pub(crate) struct FakeTransport {
    calls: Arc<Mutex<Vec<Call>>>,
    fail: Arc<Mutex<bool>>,
}

impl FakeTransport {
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn set_failing(&self, fail: bool) {
        *self.fail.lock() = fail;
    }

    fn check_failure(&self, method: &str) -> Result<(), TransportError> {
        if *self.fail.lock() {
            return Err(TransportError::Api {
                method: method.to_string(),
                status: 500,
                description: "fake transport failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ChatTransport for FakeTransport {
    async fn send_message(&self, text: &str) -> Result<SentMessage, TransportError> {
        self.check_failure("sendMessage")?;
        let mut calls = self.calls.lock();
        calls.push(Call::Send {
            text: text.to_string(),
        });
        Ok(SentMessage {
            id: (100 + calls.len()).to_string(),
        })
    }

    async fn edit_message(&self, message_id: &str, text: &str) -> Result<SentMessage, TransportError> {
        self.check_failure("editMessageText")?;
        self.calls.lock().push(Call::Edit {
            id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(SentMessage {
            id: message_id.to_string(),
        })
    }
}
