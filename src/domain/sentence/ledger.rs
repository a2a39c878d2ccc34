//! Per-term lookup ledger
//!
//! Remembers, for each exact query term, how many examples the upstream
//! source returned the last time it was consulted and when that was. The
//! count describes what exists upstream, not what is stored locally.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::term::Term;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub term: Term,
    pub updated: DateTime<Utc>,
    pub count: usize,
}

impl LedgerEntry {
    pub fn new(term: Term, count: usize, updated: DateTime<Utc>) -> Self {
        Self {
            term,
            updated,
            count,
        }
    }

    /// True when the upstream had nothing for this term
    pub fn is_empty_result(&self) -> bool {
        self.count == 0
    }

    /// True when the entry was written more than `ttl` before `now`
    pub fn is_older_than(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.updated
            .checked_add_signed(ttl)
            .is_some_and(|expiry| expiry < now)
    }
}

impl StorageEntity for LedgerEntry {
    type Key = Term;

    fn key(&self) -> &Self::Key {
        &self.term
    }
}

/// Exact-match reads and full-replace writes of [`LedgerEntry`] values
#[derive(Debug, Clone)]
pub struct Ledger {
    storage: Arc<dyn Storage<LedgerEntry>>,
}

impl Ledger {
    pub fn new(storage: Arc<dyn Storage<LedgerEntry>>) -> Self {
        Self { storage }
    }

    pub async fn get_entry(&self, term: &Term) -> Result<Option<LedgerEntry>, DomainError> {
        self.storage.get(term).await
    }

    /// Upserts the entry for `term`, replacing any previous count and timestamp
    pub async fn put_entry(
        &self,
        term: &Term,
        count: usize,
        now: DateTime<Utc>,
    ) -> Result<LedgerEntry, DomainError> {
        self.storage
            .replace(LedgerEntry::new(term.clone(), count, now))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;

    fn term(value: &str) -> Term {
        Term::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_get_entry_absent() {
        let ledger = Ledger::new(Arc::new(MockStorage::<LedgerEntry>::new()));
        assert!(ledger.get_entry(&term("猫")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_entry_replaces_in_full() {
        let ledger = Ledger::new(Arc::new(MockStorage::<LedgerEntry>::new()));
        let first = Utc::now();
        let second = first + Duration::seconds(10);

        ledger.put_entry(&term("猫"), 12, first).await.unwrap();
        ledger.put_entry(&term("猫"), 0, second).await.unwrap();

        let entry = ledger.get_entry(&term("猫")).await.unwrap().unwrap();
        assert_eq!(entry.count, 0);
        assert_eq!(entry.updated, second);
        assert!(entry.is_empty_result());
    }

    #[tokio::test]
    async fn test_lookup_is_exact() {
        let ledger = Ledger::new(Arc::new(MockStorage::<LedgerEntry>::new()));
        ledger.put_entry(&term("食べる"), 3, Utc::now()).await.unwrap();

        assert!(ledger.get_entry(&term("食べ")).await.unwrap().is_none());
        assert!(ledger.get_entry(&term("食べる ")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_storage_errors_propagate() {
        let storage = MockStorage::<LedgerEntry>::new().with_read_error("down");
        let ledger = Ledger::new(Arc::new(storage));

        let result = ledger.get_entry(&term("猫")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[test]
    fn test_is_older_than() {
        let now = Utc::now();
        let entry = LedgerEntry::new(term("猫"), 0, now - Duration::days(2));

        assert!(entry.is_older_than(Duration::days(1), now));
        assert!(!entry.is_older_than(Duration::days(3), now));
    }

    #[test]
    fn test_is_older_than_saturates_on_overflow() {
        let now = Utc::now();
        let entry = LedgerEntry::new(term("猫"), 0, now - Duration::days(2));
        let ttl = Duration::try_seconds(9_000_000_000_000_000).unwrap();

        assert!(!entry.is_older_than(ttl, now));
    }
}
