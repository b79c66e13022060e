//! ledgerflow-core
//!
//! The functional state & derivation engine. State transitions are pure
//! functions from (old state, event) to new state, dispatched through an
//! ordered event bus; reports, forecasts, and alerts are side-effect-free
//! projections over the current state. Depends on ledgerflow-domain.
//! No UI, no auth, no storage beyond seed parsing.

pub mod bus;
pub mod error;
pub mod forecast;
pub mod pipeline;
pub mod reducers;
pub mod scope;
pub mod seed;
pub mod service;
pub mod tree;
pub mod validation;

pub use bus::*;
pub use error::CoreError;
pub use forecast::*;
pub use pipeline::*;
pub use reducers::*;
pub use scope::*;
pub use seed::*;
pub use service::*;
pub use tree::*;
pub use validation::*;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::from_default_env()
            .add_directive("ledgerflow_core=info".parse().expect("valid directive"));

        fmt().with_env_filter(filter).init();
        tracing::info!("ledgerflow tracing initialized");
    });
}
