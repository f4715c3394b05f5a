//! Cached session handling.

pub mod storage;
