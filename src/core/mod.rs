//! # Core Application Logic
//!
//! This module contains the playground's state management.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • AppState             │
//!                    │  • Action (intents)     │
//!                    │  • update() (reducer)   │
//!                    │  • Store + subscribers  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Effects   │      │    API     │
//!     │  Adapter   │      │ (network,  │      │  (reqwest) │
//!     │ (ratatui)  │      │  history)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `AppState` and `Language`, all page data in one value
//! - [`action`]: the `Action` enum and the pure `update()` reducer
//! - [`store`]: dispatch loop, subscribers, cross-task `Dispatcher`
//! - [`effects`]: subscribers that fetch, save, and navigate
//! - [`history`]: the current path, shared with the router
//! - [`compile`]: Ruby → JS compiler seam
//! - [`config`]: settings file, env, and CLI resolution

pub mod action;
pub mod compile;
pub mod config;
pub mod effects;
pub mod history;
pub mod state;
pub mod store;
