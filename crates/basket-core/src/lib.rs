#![forbid(unsafe_code)]
//! basket-core library.
//!
//! Shared building blocks for basketgraph: the transaction model, the error
//! taxonomy, project/user configuration, and transaction loaders.
//!
//! # Conventions
//!
//! - **Errors**: Library functions return [`error::Result`]; binaries wrap
//!   with `anyhow`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod load;
pub mod metric;
pub mod model;
pub mod threshold;

pub use error::{BasketError, ErrorCode, Result};
pub use metric::WeightMetric;
pub use model::{Item, Transaction, TransactionSet};
