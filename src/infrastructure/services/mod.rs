//! Infrastructure services

mod sentence_service;

pub use sentence_service::{
    Lookup, LookupOrigin, ReconcileReport, SentenceCacheConfig, SentenceService,
};
