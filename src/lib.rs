//! PaddleCoach landing page session flow.
//!
//! A simulated authentication flow: sign-up with local password checks and a
//! 6-digit email verification code, a log-in that always succeeds, and a
//! logged-in flag persisted in key/value storage that drives the page layout.
//! Nothing here authenticates anyone.

pub mod cli;
pub mod flow;
pub mod storage;
