//! Claims Domain
//!
//! This crate registers insurance claims and reconstructs the insurance
//! history of a car.
//!
//! # Claim registration
//!
//! A claim is accepted only for an existing car that had active coverage on
//! the claim date. Description and amount arrive as validated value types
//! (`ClaimDescription`, `Amount`), so the registrar never sees malformed
//! input.
//!
//! # History
//!
//! ```text
//! policies ──► POLICY_START (+ POLICY_END once ended) ─┐
//!                                                     ├─► stable sort by date
//! claims   ──► CLAIM (provider = first covering policy)┘
//! ```

pub mod claim;
pub mod history;
pub mod ports;
pub mod registrar;
pub mod error;

pub use claim::{ClaimDescription, InsuranceClaim, NewClaim};
pub use history::{compose_history, CarHistoryEvent, HistoryComposer, HistoryEventType, UNKNOWN_PROVIDER};
pub use ports::ClaimPort;
pub use registrar::ClaimRegistrar;
pub use error::ClaimError;
