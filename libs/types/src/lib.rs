//! Types library for the PIX transfer risk client
//!
//! This library provides the domain types shared by the transfer orchestrator
//! and its front ends. Everything here is pure: no I/O, no clocks except where
//! a caller passes one in.
//!
//! # Modules
//! - `ids`: Identifiers (AccountId, TransactionId, ProtocolNumber)
//! - `numeric`: Monetary amounts and currency display formatting
//! - `transfer`: Transfer request, PIX key shapes and transfer results
//! - `risk`: Risk assessment and the verdict union over risk actions
//! - `score`: Process-wide security score and its display band
//! - `report`: Scam-type catalog and fraud report form
//! - `errors`: Validation error taxonomy

pub mod ids;
pub mod numeric;
pub mod transfer;
pub mod risk;
pub mod score;
pub mod report;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ids::*;
    pub use crate::numeric::*;
    pub use crate::transfer::*;
    pub use crate::risk::*;
    pub use crate::score::*;
    pub use crate::report::*;
    pub use crate::errors::*;
}
