#![allow(dead_code)]

pub mod players;
pub mod websocket;

pub use app_builder::{sample_bank, test_state};
