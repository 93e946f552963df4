//! GG-CATALOG entry point.
//!
//! Loads configuration from the environment, initializes logging and runs
//! one catalog command against the local catalog.
//!
//! ## CLI Subcommands
//!
//! - `gg-catalog query [FILTER]` - List matching models
//! - `gg-catalog frameworks|tasks|scripts [FILTER]` - Catalog listings
//! - `gg-catalog url <MODEL_ID> <VERSION>` - Print a model's URL
//! - `gg-catalog config show|defaults|validate` - Inspect configuration

use std::process::ExitCode;

use gg_catalog::cli::{
    self, build_engine, parse_query_args, run_listing, run_query, run_url, Listing, EXIT_USAGE,
};
use gg_catalog::config as gg_config;
use gg_catalog::telemetry::init_logging;

#[tokio::main]
async fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("help");
    let rest = args.get(2..).unwrap_or(&[]);

    match command {
        "query" | "frameworks" | "tasks" | "scripts" => {
            let parsed = match parse_query_args(rest) {
                Ok(parsed) => parsed,
                Err(e) => {
                    eprintln!("{}", e);
                    print_command_help(command);
                    return ExitCode::from(EXIT_USAGE as u8);
                }
            };
            let env = gg_config::load();
            start_logging(&env);
            let engine = build_engine(&env);
            let code = match command {
                "frameworks" => run_listing(&engine, Listing::Frameworks, &parsed).await,
                "tasks" => run_listing(&engine, Listing::Tasks, &parsed).await,
                "scripts" => run_listing(&engine, Listing::Scripts, &parsed).await,
                _ => run_query(&engine, &parsed).await,
            };
            ExitCode::from(code as u8)
        }
        "url" => {
            let env = gg_config::load();
            start_logging(&env);
            let engine = build_engine(&env);
            let code = run_url(&engine, rest).await;
            ExitCode::from(code as u8)
        }
        "help" | "--help" | "-h" => {
            if let Some(subcommand) = args.get(2) {
                print_command_help(subcommand);
            } else {
                print_usage();
            }
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("gg-catalog {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "config" => {
            let subcommand = args.get(2).map(|s| s.as_str()).unwrap_or("show");
            match subcommand {
                "show" => {
                    cli::config_cmd::run_show();
                    ExitCode::SUCCESS
                }
                "defaults" => {
                    cli::config_cmd::run_defaults();
                    ExitCode::SUCCESS
                }
                "validate" => {
                    let code = cli::config_cmd::run_validate();
                    ExitCode::from(code as u8)
                }
                _ => {
                    eprintln!("Unknown config subcommand: {}", subcommand);
                    print_command_help("config");
                    ExitCode::FAILURE
                }
            }
        }
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn start_logging(env: &gg_config::EnvConfig) {
    if let Err(e) = init_logging(&env.log_config()) {
        eprintln!("Logging disabled: {}", e);
    }
}

fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "gg-catalog - tri-state filter queries over a versioned model catalog v{}

USAGE:
    gg-catalog [COMMAND] [OPTIONS]

COMMANDS:
    query        List models matching a filter
    frameworks   List frameworks of matching models
    tasks        List tasks of matching models
    scripts      List script scopes (inference, training) of matching models
    url          Print the URL of one model version
    config       Inspect configuration (show, defaults, validate)
    version      Show version information
    help         Show this help message

EXAMPLES:
    gg-catalog query
    gg-catalog query \"framework == pytorch\" --versions --old
    gg-catalog query \"task in [ic, od]\" --region eu-west-1
    gg-catalog scripts \"training_supported == true\"
    gg-catalog url pytorch-ic-mobilenet 2.0.0
    gg-catalog config validate

ENVIRONMENT:
    GG_CATALOG_ROOT                   Catalog directory (default: ./catalog)
    GG_CATALOG_REGION                 Default region (default: us-west-2)
    GG_CATALOG_SDK_VERSION            SDK version used for supported_model
    GG_CATALOG_MAX_CONCURRENT_FETCHES Concurrent entry evaluations
    GG_CATALOG_QUERY_DEADLINE_MS      Per-query deadline, 0 = none
    GG_CATALOG_LOG_LEVEL              Log filter (default: info)
    GG_CATALOG_LOG_FORMAT             json or pretty

EXIT CODES:
    0  Success
    1  Usage or filter error
    3  Catalog could not be read
",
        version
    );
}

/// Print detailed help for a specific command.
fn print_command_help(command: &str) {
    match command {
        "query" => {
            eprintln!(
                "gg-catalog query - List models matching a filter

USAGE:
    gg-catalog query [FILTER] [OPTIONS]

OPTIONS:
    --region R     Query region R instead of GG_CATALOG_REGION
    --old          Include every matching version, not only the newest
    --versions     Print (model id, version) pairs
    --incomplete   Keep models whose filter result is unknown

FILTER:
    ATTR OP VALUE with OP one of ==, !=, is, is not, equals, in, not in.
    `in` takes a list: task in [ic, od]. The bare filters true, false and
    unknown are constants. Deprecated, vulnerable and unsupported models are
    hidden unless the filter names that attribute.

EXAMPLES:
    gg-catalog query \"framework == pytorch\"
    gg-catalog query \"deprecated == true\" --versions
"
            );
        }
        "frameworks" | "tasks" | "scripts" => {
            eprintln!(
                "gg-catalog {} - Catalog listing

USAGE:
    gg-catalog {} [FILTER] [--region R]
",
                command, command
            );
        }
        "url" => {
            eprintln!(
                "gg-catalog url - Print the URL of one model version

USAGE:
    gg-catalog url <MODEL_ID> <VERSION> [--region R]
"
            );
        }
        "config" => {
            eprintln!(
                "gg-catalog config - Inspect configuration

USAGE:
    gg-catalog config <SUBCOMMAND>

SUBCOMMANDS:
    show           Show current configuration
    validate       Validate configuration
    defaults       Show default configuration
"
            );
        }
        _ => {
            eprintln!(
                "No detailed help available for '{}'. Use 'gg-catalog help' for general usage.",
                command
            );
        }
    }
}
