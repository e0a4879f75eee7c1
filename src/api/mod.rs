//! # Playground API
//!
//! The remote CRUD service that persists named playgrounds. This module
//! only knows how to talk HTTP; deciding *when* to talk happens in
//! `core::effects`.

pub mod client;
pub mod types;

pub use client::{ApiError, HttpApi, PlaygroundApi};
pub use types::{Playground, PlaygroundDraft, PlaygroundEnvelope, PlaygroundList};
