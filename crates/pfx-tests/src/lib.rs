//! Integration tests for pfx crates.
//!
//! End-to-end checks across `pfx-core` and `pfx-ops`: whole-buffer
//! properties of every filter, the driving loop contract, and the
//! background job.

#[cfg(test)]
mod parity;
