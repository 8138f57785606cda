//! Bay status aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! bay_status table (external writer)
//!     → bays.rs (newest reading per bay, 3s query bound)
//!     → codec.rs (raw id/code → display values, fail closed)
//!     → freshness.rs (caller-side gate on reading age)
//!     → HTTP handler serializes the result
//! ```
//!
//! # Design Decisions
//! - Readings are read-only here; ingestion is someone else's job
//! - Validation is fail-closed: one bad row poisons the whole call
//! - Staleness is the caller's decision, not the aggregator's

pub mod bays;
pub mod codec;
pub mod freshness;

pub use bays::{BayRepo, BayStatus, StatusError};
