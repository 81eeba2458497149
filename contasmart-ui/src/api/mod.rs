//! API Access
//!
//! Browser transport for the calculation server.

mod client;

pub use client::*;
