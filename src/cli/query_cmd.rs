// Copyright 2024-2026 GG-CORE Contributors
// SPDX-License-Identifier: Apache-2.0

//! Query and listing subcommands.

use super::{exit_code, EXIT_OK, EXIT_USAGE};
use crate::engine::{CatalogQueryEngine, QueryOptions, QueryResult};

/// Parsed arguments shared by `query` and the listing commands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryArgs {
    /// Filter text; None = always true.
    pub filter: Option<String>,
    pub region: Option<String>,
    pub list_old_models: bool,
    pub list_versions: bool,
    pub list_incomplete_models: bool,
}

impl QueryArgs {
    pub fn options(&self) -> QueryOptions {
        let mut options = QueryOptions::new()
            .list_old_models(self.list_old_models)
            .list_versions(self.list_versions)
            .list_incomplete_models(self.list_incomplete_models);
        if let Some(filter) = &self.filter {
            options = options.filter(filter.as_str());
        }
        if let Some(region) = &self.region {
            options = options.region(region.as_str());
        }
        options
    }

    fn filter_text(&self) -> &str {
        self.filter.as_deref().unwrap_or("true")
    }
}

/// Listing commands over the query pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Frameworks,
    Tasks,
    Scripts,
}

/// Parse arguments after the subcommand name.
///
/// One positional filter is accepted; flags may appear anywhere.
pub fn parse_query_args(args: &[String]) -> Result<QueryArgs, String> {
    let mut parsed = QueryArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--region" => {
                if i + 1 < args.len() {
                    parsed.region = Some(args[i + 1].clone());
                    i += 2;
                } else {
                    return Err("Missing value for --region".into());
                }
            }
            "--old" => {
                parsed.list_old_models = true;
                i += 1;
            }
            "--versions" => {
                parsed.list_versions = true;
                i += 1;
            }
            "--incomplete" => {
                parsed.list_incomplete_models = true;
                i += 1;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown argument: {}", flag));
            }
            filter => {
                if parsed.filter.is_some() {
                    return Err(format!("Unexpected argument: {}", filter));
                }
                parsed.filter = Some(filter.to_string());
                i += 1;
            }
        }
    }
    Ok(parsed)
}

/// Run `query`. Returns the process exit code.
pub async fn run_query(engine: &CatalogQueryEngine, args: &QueryArgs) -> i32 {
    match engine.query(args.options()).await {
        Ok(result) => {
            print_result(&result);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

/// Run `frameworks`, `tasks` or `scripts`.
pub async fn run_listing(engine: &CatalogQueryEngine, listing: Listing, args: &QueryArgs) -> i32 {
    let filter = args.filter_text();
    let region = args.region.as_deref();
    let result = match listing {
        Listing::Frameworks => engine.list_frameworks(filter, region).await,
        Listing::Tasks => engine.list_tasks(filter, region).await,
        Listing::Scripts => engine.list_scripts(filter, region).await,
    };
    match result {
        Ok(values) => {
            for value in values {
                println!("{}", value);
            }
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

/// Run `url <MODEL_ID> <VERSION> [--region R]`.
pub async fn run_url(engine: &CatalogQueryEngine, args: &[String]) -> i32 {
    let mut positional = Vec::new();
    let mut region = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--region" if i + 1 < args.len() => {
                region = Some(args[i + 1].as_str());
                i += 2;
            }
            other => {
                positional.push(other);
                i += 1;
            }
        }
    }
    let [model_id, version] = positional[..] else {
        eprintln!("Usage: gg-catalog url <MODEL_ID> <VERSION> [--region R]");
        return EXIT_USAGE;
    };

    match engine.model_url(model_id, version, region).await {
        Ok(Some(url)) => {
            println!("{}", url);
            EXIT_OK
        }
        Ok(None) => {
            eprintln!("No URL recorded for {} {}", model_id, version);
            EXIT_OK
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code(&e)
        }
    }
}

/// Print a query result to stdout.
pub fn print_result(result: &QueryResult) {
    match result {
        QueryResult::Ids(ids) => {
            for id in ids {
                println!("{}", id);
            }
        }
        QueryResult::Versions(pairs) => {
            if pairs.is_empty() {
                println!("No matching models.");
                return;
            }
            println!("{:<50} {:<12}", "MODEL ID", "VERSION");
            println!("{}", "-".repeat(63));
            for (model_id, version) in pairs {
                println!("{:<50} {:<12}", model_id, version);
            }
            println!("{}", "-".repeat(63));
            println!("{} model version(s)", pairs.len());
        }
    }
}
