//! Core framework abstractions.

pub mod service;

pub use service::Service;
