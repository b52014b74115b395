//! # gesturedash-client
//!
//! Transport-facing half of the dashboard's session state synchronization:
//! the [`SessionSync`] controller that owns the snapshot, the
//! [`CommandTransport`] seam for the backend's HTTP command surface, and a
//! blocking HTTP implementation of it.
//!
//! The push-event channel itself (socket transport, reconnection) is an
//! external collaborator; this crate only consumes the decoded events it
//! delivers, in delivery order.

pub mod commands;
pub mod http;
pub mod logging;
pub mod sync;

pub use commands::{CommandKind, CommandPolicy, CommandTransport};
pub use http::HttpCommands;
pub use sync::SessionSync;
