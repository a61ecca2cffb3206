//! Top-level facade crate for reqpulse.
//!
//! Re-exports the core metric primitives and the server library so users can
//! depend on a single crate.

pub mod core {
    pub use reqpulse_core::*;
}

pub mod server {
    pub use reqpulse_server::*;
}
