//! Cache-through example sentence lookup
//!
//! Decides per request whether the local store can answer a term, falls back
//! to the upstream source otherwise, and writes fetched results back on a
//! detached task.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

use crate::domain::sentence::{
    ExampleSentence, FuzzyPattern, Ledger, LedgerEntry, SentenceSource, Term,
};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Policy knobs of the sentence cache
#[derive(Debug, Clone)]
pub struct SentenceCacheConfig {
    /// Known result count, and local match count, at which the store is trusted
    pub min_sufficient: usize,
    /// Upper bound on records returned from a fuzzy store read
    pub max_local_results: usize,
    /// Age after which a zero-result entry is re-checked; `None` never re-checks
    pub empty_result_ttl: Option<Duration>,
}

impl Default for SentenceCacheConfig {
    fn default() -> Self {
        Self {
            min_sufficient: 5,
            max_local_results: 500,
            empty_result_ttl: None,
        }
    }
}

impl SentenceCacheConfig {
    pub fn with_min_sufficient(mut self, min: usize) -> Self {
        self.min_sufficient = min;
        self
    }

    pub fn with_max_local_results(mut self, max: usize) -> Self {
        self.max_local_results = max;
        self
    }

    pub fn with_empty_result_ttl(mut self, ttl: Duration) -> Self {
        self.empty_result_ttl = Some(ttl);
        self
    }

    fn local_read_limit(&self) -> usize {
        self.max_local_results.max(self.min_sufficient)
    }
}

/// Where the examples of a [`Lookup`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOrigin {
    /// The term is known to have no examples
    CachedEmpty,
    /// Fuzzy read of the local store
    Store,
    /// Fresh upstream call
    Upstream,
}

impl fmt::Display for LookupOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CachedEmpty => write!(f, "cached_empty"),
            Self::Store => write!(f, "store"),
            Self::Upstream => write!(f, "upstream"),
        }
    }
}

/// Summary of a finished background write-back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReconcileReport {
    pub ledger_written: bool,
    pub examples_written: usize,
    pub examples_failed: usize,
}

/// Result of a single lookup
#[derive(Debug)]
pub struct Lookup {
    pub examples: Vec<ExampleSentence>,
    pub origin: LookupOrigin,
    /// Write-back task, present only for upstream lookups. Dropping the
    /// handle detaches the task; it still runs to completion.
    pub reconciliation: Option<JoinHandle<ReconcileReport>>,
}

impl Lookup {
    fn local(examples: Vec<ExampleSentence>, origin: LookupOrigin) -> Self {
        Self {
            examples,
            origin,
            reconciliation: None,
        }
    }
}

/// Coordinates the ledger, the sentence store and the upstream source
pub struct SentenceService {
    ledger: Ledger,
    sentences: Arc<dyn Storage<ExampleSentence>>,
    source: Arc<dyn SentenceSource>,
    config: SentenceCacheConfig,
    reconciliations: TaskTracker,
}

impl fmt::Debug for SentenceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentenceService")
            .field("ledger", &self.ledger)
            .field("sentences", &self.sentences)
            .field("config", &self.config)
            .field("pending_reconciliations", &self.reconciliations.len())
            .finish()
    }
}

impl SentenceService {
    pub fn new(
        ledger: Arc<dyn Storage<LedgerEntry>>,
        sentences: Arc<dyn Storage<ExampleSentence>>,
        source: Arc<dyn SentenceSource>,
        config: SentenceCacheConfig,
    ) -> Self {
        Self {
            ledger: Ledger::new(ledger),
            sentences,
            source,
            config,
            reconciliations: TaskTracker::new(),
        }
    }

    /// Number of write-backs still running
    pub fn pending_reconciliations(&self) -> usize {
        self.reconciliations.len()
    }

    /// Waits for every write-back spawned so far. Lookups made afterwards
    /// still reconcile, but are no longer waited for.
    pub async fn shutdown(&self) {
        self.reconciliations.close();

        let pending = self.reconciliations.len();
        if pending > 0 {
            info!(pending, "Waiting for write-backs to finish");
        }

        self.reconciliations.wait().await;
    }

    /// Validates the raw `q` value and looks it up
    pub async fn search(&self, q: Option<&str>) -> Result<Lookup, DomainError> {
        let term = Term::parse(q)?;
        self.lookup(&term).await
    }

    pub async fn lookup(&self, term: &Term) -> Result<Lookup, DomainError> {
        let now = Utc::now();

        if let Some(entry) = self.ledger.get_entry(term).await? {
            if entry.is_empty_result() && !self.empty_result_expired(&entry, now) {
                debug!(term = %term, origin = %LookupOrigin::CachedEmpty, "Serving lookup");
                return Ok(Lookup::local(Vec::new(), LookupOrigin::CachedEmpty));
            }

            if entry.count >= self.config.min_sufficient {
                let local = self.find_local(term).await?;

                if local.len() >= self.config.min_sufficient {
                    debug!(
                        term = %term,
                        origin = %LookupOrigin::Store,
                        count = local.len(),
                        "Serving lookup"
                    );
                    return Ok(Lookup::local(local, LookupOrigin::Store));
                }

                debug!(
                    term = %term,
                    known = entry.count,
                    stored = local.len(),
                    "Local store fell short"
                );
            }
        }

        let examples = self.source.look_up(term.as_str()).await?;
        debug!(
            term = %term,
            origin = %LookupOrigin::Upstream,
            count = examples.len(),
            "Serving lookup"
        );

        let reconciliation = self.spawn_reconciliation(term.clone(), examples.clone());

        Ok(Lookup {
            examples,
            origin: LookupOrigin::Upstream,
            reconciliation: Some(reconciliation),
        })
    }

    fn empty_result_expired(&self, entry: &LedgerEntry, now: DateTime<Utc>) -> bool {
        self.config
            .empty_result_ttl
            .is_some_and(|ttl| entry.is_older_than(ttl, now))
    }

    async fn find_local(&self, term: &Term) -> Result<Vec<ExampleSentence>, DomainError> {
        let filter = FuzzyPattern::from_term(term).to_filter(ExampleSentence::TEXT_FIELD);
        self.sentences
            .find(&filter, Some(self.config.local_read_limit()))
            .await
    }

    /// Writes the ledger entry and the examples on a task of its own so that
    /// neither the caller's latency nor its cancellation affects them.
    fn spawn_reconciliation(
        &self,
        term: Term,
        examples: Vec<ExampleSentence>,
    ) -> JoinHandle<ReconcileReport> {
        let ledger = self.ledger.clone();
        let sentences = self.sentences.clone();

        self.reconciliations
            .spawn(async move { reconcile(ledger, sentences, term, examples).await })
    }
}

async fn reconcile(
    ledger: Ledger,
    sentences: Arc<dyn Storage<ExampleSentence>>,
    term: Term,
    examples: Vec<ExampleSentence>,
) -> ReconcileReport {
    let now = Utc::now();
    let count = examples.len();

    let write_ledger = async {
        match ledger.put_entry(&term, count, now).await {
            Ok(_) => true,
            Err(e) => {
                error!(term = %term, error = %e, "Failed to write ledger entry");
                false
            }
        }
    };

    let write_examples = async {
        if examples.is_empty() {
            return (0, 0);
        }

        let stamped = examples.into_iter().map(|ex| ex.stamped(now)).collect();
        let result = sentences.bulk_replace(stamped).await;

        for failure in &result.failures {
            error!(
                term = %term,
                id = %failure.key,
                error = %failure.error,
                "Failed to store example sentence"
            );
        }

        (result.written, result.failures.len())
    };

    let (ledger_written, (examples_written, examples_failed)) =
        tokio::join!(write_ledger, write_examples);

    if ledger_written && examples_failed == 0 {
        info!(term = %term, count, "Cached upstream lookup");
    } else {
        warn!(
            term = %term,
            ledger_written,
            examples_written,
            examples_failed,
            "Cached upstream lookup partially"
        );
    }

    ReconcileReport {
        ledger_written,
        examples_written,
        examples_failed,
    }
}
