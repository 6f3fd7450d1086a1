//! Session layer and binary for the `fairshare` CLI.
//!
//! The mutate → persist → notify orchestration lives here as library code so
//! integration tests can drive the exact flow the binary runs.

pub mod session;

pub use session::{Session, SessionError};
