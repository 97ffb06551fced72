//! # Core Application Logic
//!
//! This module contains the consultation client's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI.         │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    API     │
//!           │  Adapter   │              │  (reqwest) │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct and the request state machine
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`conversation`]: Ordered conversation turns
//! - [`quick_actions`]: FAQ catalog with canned answers
//! - [`timestamp`]: 12-hour display times
//! - [`config`]: Settings resolution

pub mod action;
pub mod config;
pub mod conversation;
pub mod quick_actions;
pub mod state;
pub mod timestamp;
