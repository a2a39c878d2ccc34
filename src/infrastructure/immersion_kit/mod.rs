//! Immersion Kit - upstream source of example sentences

mod client;

pub use client::{ImmersionKitClient, DEFAULT_BASE_URL};
