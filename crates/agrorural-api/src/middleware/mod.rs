//! HTTP middleware

pub mod logging;

pub use logging::timing_middleware;
