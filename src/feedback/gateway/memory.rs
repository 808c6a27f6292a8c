//! In-memory gateway used by unit and behavioural tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};

use super::FeedbackGateway;
use crate::feedback::error::FeedbackError;
use crate::feedback::models::{FeedbackEntry, FeedbackId, NewFeedback, SortDirection};

#[derive(Debug, Default)]
struct Table {
    entries: Vec<FeedbackEntry>,
    next_id: u64,
}

/// Feedback gateway that keeps entries in a vector.
///
/// Inserted entries receive sequential ids and strictly increasing
/// timestamps, one second apart, so ordering is deterministic.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackGateway {
    table: Mutex<Table>,
    insert_calls: AtomicUsize,
    select_calls: AtomicUsize,
    fail_inserts: AtomicBool,
    fail_selects: AtomicBool,
}

impl InMemoryFeedbackGateway {
    /// Creates an empty gateway.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a gateway pre-populated with `entries` in the given order.
    #[must_use]
    pub fn with_entries(entries: Vec<FeedbackEntry>) -> Self {
        let gateway = Self::default();
        if let Ok(mut table) = gateway.table.lock() {
            table.next_id = u64::try_from(entries.len()).unwrap_or(u64::MAX);
            table.entries = entries;
        }
        gateway
    }

    /// Makes subsequent inserts fail with a network error.
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    /// Makes subsequent reads fail with a network error.
    pub fn fail_selects(&self, fail: bool) {
        self.fail_selects.store(fail, Ordering::SeqCst);
    }

    /// Number of insert calls received, including failed ones.
    #[must_use]
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    /// Number of read calls received, including failed ones.
    #[must_use]
    pub fn select_calls(&self) -> usize {
        self.select_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of stored entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> Vec<FeedbackEntry> {
        self.table
            .lock()
            .map(|table| table.entries.clone())
            .unwrap_or_default()
    }

    fn lock_table(&self) -> Result<std::sync::MutexGuard<'_, Table>, FeedbackError> {
        self.table.lock().map_err(|_| FeedbackError::Storage {
            message: "in-memory table lock poisoned".to_owned(),
        })
    }
}

fn clock_origin() -> DateTime<Utc> {
    Utc.timestamp_opt(1_792_314_000, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

#[async_trait]
impl FeedbackGateway for InMemoryFeedbackGateway {
    async fn insert(&self, feedback: &NewFeedback) -> Result<(), FeedbackError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(FeedbackError::Network {
                message: "insert feedback failed: connection refused".to_owned(),
            });
        }

        let mut table = self.lock_table()?;
        table.next_id += 1;
        let id = table.next_id;
        let latest = table
            .entries
            .iter()
            .map(|entry| entry.created_at)
            .max()
            .unwrap_or_else(clock_origin);
        table.entries.push(FeedbackEntry {
            id: FeedbackId::new(id.to_string()),
            name: feedback.name().to_owned(),
            email: feedback.email().map(ToOwned::to_owned),
            rating: feedback.rating(),
            comments: feedback.comments().to_owned(),
            created_at: latest + Duration::seconds(1),
        });
        Ok(())
    }

    async fn select_all(
        &self,
        direction: SortDirection,
    ) -> Result<Vec<FeedbackEntry>, FeedbackError> {
        self.select_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_selects.load(Ordering::SeqCst) {
            return Err(FeedbackError::Network {
                message: "list feedback failed: connection refused".to_owned(),
            });
        }

        let mut entries = self.lock_table()?.entries.clone();
        entries.sort_by(|left, right| {
            left.created_at
                .cmp(&right.created_at)
                .then_with(|| left.id.as_str().len().cmp(&right.id.as_str().len()))
                .then_with(|| left.id.cmp(&right.id))
        });
        if direction == SortDirection::Descending {
            entries.reverse();
        }
        Ok(entries)
    }
}
