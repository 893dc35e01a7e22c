//! Application module

pub mod cli;
pub mod query;
pub mod startup;
