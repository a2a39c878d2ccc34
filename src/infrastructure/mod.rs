//! Infrastructure layer - External service implementations

pub mod immersion_kit;
pub mod logging;
pub mod services;
pub mod storage;
