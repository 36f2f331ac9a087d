//! Recording session state

mod state;

pub use state::{CloseReason, MediaKind, SessionState};
