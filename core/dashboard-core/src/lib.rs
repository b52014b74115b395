//! # gesturedash-core
//!
//! Session state model for the gesture dashboard: the snapshot every renderer
//! reads, the reducer that folds pushed backend events into it, and the one
//! persisted client preference (theme).
//!
//! ## Design Principles
//!
//! - **Synchronous**: no async runtime dependency. Clients wrap with async if
//!   they need to.
//! - **Not thread-safe**: the snapshot is owned by one logical thread of
//!   control; clients provide their own synchronization if they share it.
//! - **Graceful degradation**: missing or partial event fields fall back to
//!   fixed defaults, never errors.

pub mod error;
pub mod reducer;
pub mod snapshot;
pub mod theme;

pub use error::{DashError, Result};
pub use reducer::reduce;
pub use snapshot::{AuxStates, GestureTelemetry, SessionSnapshot};
pub use theme::ThemePreference;
