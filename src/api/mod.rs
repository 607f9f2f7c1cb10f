//! Client side of the Story HTTP API
//!
//! Login, the authenticated session and the wire types.

pub mod auth;
pub mod session;
pub mod types;

pub use auth::{obtain_token, AuthCredentials, AuthToken};
pub use session::{ClientSession, RawResponse};
pub use types::*;
