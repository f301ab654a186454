//! Login gate for the reviewer
//!
//! The gate checks submitted credentials against an injected
//! [`CredentialTable`] and flips an explicit [`SessionState`] owned by the
//! caller. Nothing here is global, so one gate can serve many sessions.

mod credentials;
mod gate;
mod session;

pub use credentials::CredentialTable;
pub use gate::{LoginOutcome, LogoutOutcome, SessionGate};
pub use session::{SessionPhase, SessionState};
