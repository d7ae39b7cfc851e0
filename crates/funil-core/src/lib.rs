//! # funil-core
//!
//! Core types shared across all funil crates:
//! - The [`Lead`](entities::Lead) record as stored by the remote lead table
//! - The [`FunnelStage`](enums::FunnelStage) enum and its fixed stage ↔ column table
//! - Cross-cutting error types
//! - JSON response types rendered by the CLI

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
