//! Utility modules: build info, persistence helpers, logging setup.

pub mod build_info;
pub mod logging;
pub mod persistence;
