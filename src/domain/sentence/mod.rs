//! Sentence domain - Example sentences, the per-term ledger and fuzzy matching

mod entity;
mod fuzzy;
mod ledger;
mod source;
mod term;

pub use entity::{ExampleId, ExampleSentence};
pub use fuzzy::{is_kana, FuzzyPattern};
pub use ledger::{Ledger, LedgerEntry};
pub use source::{LookupData, LookupResponse, SentenceSource};
pub use term::{Term, INVALID_TERM_MESSAGE};

#[cfg(test)]
pub use source::MockSentenceSource;
