//! AI advisor: chat session state machine and the advisory service client
//!
//! The session owns the transcript and the single-flight contract; the
//! client owns the wire. They meet only at the `AdvisoryCapability` trait,
//! so sessions are testable against a stub.

pub mod client;
pub mod session;
