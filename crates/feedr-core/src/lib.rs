//! # Feedr Core
//!
//! The domain layer of the Feedr publishing backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the entities, the ports (capabilities the engine consumes), and the services
//! that both protocol adapters call into.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validate;

pub use error::DomainError;
