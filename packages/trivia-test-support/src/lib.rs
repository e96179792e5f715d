//! Shared helpers for the trivia server's integration tests.

pub mod logging;
