//! Entity structs for funil domain objects.
//!
//! Entities mirror rows of the hosted database. The board only ever holds
//! transient copies; the remote table stays authoritative.

mod lead;

pub use lead::Lead;
