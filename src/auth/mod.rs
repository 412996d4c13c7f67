pub mod gate;
pub mod sessions;
pub mod token;

pub use gate::{avatar_initials, gate, session_token, Gate};
pub use sessions::{lock_session, Session, SessionStore};
