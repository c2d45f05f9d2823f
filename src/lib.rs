#![doc(test(attr(deny(warnings))))]

//! Garage Core tracks configuration checklists for individual car units:
//! saved records, feature packages, and JSON import/export for backup.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod session;
pub mod store;
pub mod sync;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Garage Core tracing initialized.");
    });
}
