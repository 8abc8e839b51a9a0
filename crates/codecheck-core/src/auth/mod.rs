//! Authentication module for managing the login session.
//!
//! This module provides:
//! - `SessionClient`: login/logout against the CodeChecker server plus a
//!   persisted logged-in flag
//! - `SessionStore`: the device-local key-value store backing the flag
//! - `CredentialStore`: secure OS-level credential storage via keyring
//!
//! The logged-in flag is a single key in the store; its presence is the
//! whole session state.

pub mod credentials;
pub mod session;
pub mod store;

pub use credentials::{CredentialStore, Credentials};
pub use session::{SessionClient, SESSION_KEY};
pub use store::{FileStore, MemoryStore, SessionStore};
