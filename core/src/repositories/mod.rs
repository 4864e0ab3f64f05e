//! Repository interfaces and implementations for outstanding passcodes.

pub mod otp;

pub use otp::{InMemoryOtpStore, OtpStore};
