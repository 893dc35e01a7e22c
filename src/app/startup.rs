//! Application startup
//!
//! Parses the command line, merges the configuration file, starts logging and
//! runs the query. Replies (reports, image paths, failure notes) go to the
//! given writer; diagnostics go to stderr.

use super::cli::args::{initial_color_choice, Args};
use super::cli::config::{AppConfig, ConfigError};
use super::query::run_query;
use crate::core::error_handling::{log_error_with_context, user_facing_message};
use crate::core::logging::init_logging;
use crate::core::styles::StyleRole;
use std::io::{IsTerminal, Write};

pub const EXIT_OK: i32 = 0;
/// The status API could not be queried
pub const EXIT_QUERY_FAILED: i32 = 1;
/// Configuration file or values were rejected
pub const EXIT_CONFIG: i32 = 2;

/// Entry point used by `main`
pub async fn startup() -> i32 {
    let argv: Vec<String> = std::env::args().collect();
    let mut stdout = std::io::stdout();
    run(&argv, &mut stdout).await
}

/// Run one invocation and return the process exit code
pub async fn run<S: AsRef<str>>(argv: &[S], out: &mut dyn Write) -> i32 {
    let argv: Vec<&str> = argv.iter().map(|a| a.as_ref()).collect();

    // help and usage errors are styled before the config file is known
    let args = match Args::try_parse_with(&argv, resolve_color(initial_color_choice(&argv))) {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return e.exit_code();
        }
    };

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            let color = resolve_color(args.color_choice());
            let message = format!("配置错误: {}", user_facing_message(&e, "无法加载配置"));
            eprintln!("{}", StyleRole::Error.paint(&message, color));
            return EXIT_CONFIG;
        }
    };

    let color = resolve_color(config.color);
    colored::control::set_override(color);
    if let Err(e) = init_logging(&config.log_settings(color)) {
        eprintln!("Warning: logging not started: {}", e);
    }
    log::debug!("bdsquery {} querying {}", crate::long_version(), config.api_url);

    match run_query(&args.command, &config).await {
        Ok(deliveries) => {
            for delivery in deliveries {
                if let Err(e) = writeln!(out, "{}", delivery) {
                    log::error!("Could not write output: {}", e);
                    return EXIT_QUERY_FAILED;
                }
            }
            EXIT_OK
        }
        Err(e) => {
            log_error_with_context(&e, "查询失败");
            let _ = writeln!(out, "查询失败: {}", e);
            EXIT_QUERY_FAILED
        }
    }
}

async fn load_config(args: &Args) -> Result<AppConfig, ConfigError> {
    let mut config = AppConfig::load(args.config_file.as_deref()).await?;
    config.apply_args(args)?;
    Ok(config)
}

/// Explicit choice wins; otherwise color only on a terminal without `NO_COLOR`
fn resolve_color(choice: Option<bool>) -> bool {
    choice.unwrap_or_else(|| {
        std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
    })
}
