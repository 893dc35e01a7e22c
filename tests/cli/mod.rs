//! CLI integration test modules

pub mod argument_parsing;
pub mod query_run;
pub mod toml_config;
