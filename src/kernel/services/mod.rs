//! Services layer (ports + adapters).
//!
//! - `ports`: pure contracts/types shared by every layer.
//! - `adapters`: runtime specific implementations (threads, tokio, filesystem).

pub mod adapters;
pub mod ports;
