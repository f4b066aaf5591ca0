//! Request and response bodies
//!
//! JSON field names are camelCase throughout.

pub mod car;
pub mod claim;

pub use car::{CarResponse, InsuranceValidityQuery, InsuranceValidityResponse, OwnerRequest, RegisterCarRequest};
pub use claim::{ClaimResponse, RegisterClaimRequest};
