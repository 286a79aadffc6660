//! # Feedr Shared
//!
//! Request/response types for the REST surface and the RFC 7807 error
//! envelope both surfaces fall back to.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
