//! Deterministic random number generation
//!
//! Uses xorshift64* for fast, deterministic random number generation.
//! All randomness used to build a scenario goes through this module; the
//! simulation core itself never draws random numbers.

mod xorshift;

pub use xorshift::RngManager;
