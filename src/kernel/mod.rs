//! Headless search core.

pub mod services;
