//! Authentication
//!
//! Login/registration against the user backend and the persisted session token.

mod client;
mod session;

pub use client::{AuthClient, Credentials, Registration};
pub use session::Session;
