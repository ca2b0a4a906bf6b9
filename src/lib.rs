//! Paymaster co-signing for ERC-4337 user operations.
//!
//! [`encoding`] builds the canonical paymaster digest, [`signer`] turns a digest
//! into an `r ‖ s ‖ v` signature and [`paymaster`] glues the two together for a
//! verifying paymaster. [`rpc`] exposes the result as `pm_sponsorUserOperation`.

pub mod config;
pub mod encoding;
pub mod error;
pub mod paymaster;
pub mod rpc;
pub mod signer;
pub mod types;

pub use error::{EncodingError, PaymasterError, SigningError};
pub use paymaster::{paymaster_sign, Paymaster};
pub use signer::{PaymasterSigner, PrivateKeySigner};
pub use types::{PaymasterAndData, PaymasterResponse, SponsorshipContext, UserOperation};
