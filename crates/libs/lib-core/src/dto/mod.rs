//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the quote provider and the ledger
//! connection.

pub mod ledger;
pub mod quote;
pub mod swap;

pub use ledger::*;
pub use quote::*;
pub use swap::*;
