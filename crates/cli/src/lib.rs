//! Coffee-pot demonstration application for the httpot protocol stack.
//!
//! Implements an HTCPCP-style pot control API: an alternates index and
//! start/stop brew endpoints per pot and beverage type.

pub mod pot;
pub mod routes;

pub use pot::{Pot, PotError};
pub use routes::build_router;
