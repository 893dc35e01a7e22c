//! Core services and infrastructure

pub mod error_handling;
pub mod logging;
pub mod styles; // terminal palette shared by CLI help and output
pub mod validation;
