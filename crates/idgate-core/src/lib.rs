//! # idgate-core: Foundational Types for idgate
//!
//! Leaf crate of the workspace. Defines the wire contract shared by the
//! upstream user-service client and the gateway's own HTTP surface.
//!
//! ## Contents
//!
//! - [`Envelope`]: the generic `{code, msg, data}` response wrapper used in
//!   both directions, with success classification and typed decoding.
//! - [`DelegationError`] / [`EnvelopeError`]: business failure reported by
//!   an envelope versus a body that could not be decoded at all.
//! - [`User`] / [`UserProfile`]: the user record as returned by the
//!   upstream identity service.
//! - [`Identity`]: the immutable, verified principal attached to a request.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `idgate-*` crates.
//! - No I/O. Every function here is a pure transform.
//! - No `.unwrap()` outside tests.

pub mod envelope;
pub mod error;
pub mod identity;
pub mod user;

pub use envelope::{Envelope, LEGACY_SUCCESS_CODE, SUCCESS_CODE};
pub use error::{DelegationError, EnvelopeError};
pub use identity::Identity;
pub use user::{User, UserId, UserProfile};
