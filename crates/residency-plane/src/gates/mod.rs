//! Identity-provider lifecycle gates
//!
//! The identity provider calls into this core at exactly two points of its
//! authentication lifecycle:
//!
//! - [`signup::register`] — once, synchronously, during account creation,
//!   before the account is considered provisioned
//! - [`auth::admit`] — on every authentication attempt, before credentials
//!   are accepted
//!
//! Both gates derive the pseudonymous user id through the same shared
//! function and fail closed: a user never completes sign-up without a
//! residency record, and never authenticates without a matching one.

pub mod auth;
pub mod signup;

pub use auth::{admit, LookupGrace};
pub use signup::{register, SignupDecision};
