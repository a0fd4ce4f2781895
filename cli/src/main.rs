//! headerblock CLI: try a header filter configuration without a server.
//!
//! Subcommands:
//! - `check <config>`: validate that every pattern compiles
//! - `eval <config> [--header Name=Value...] [--url URL]`: decide on a request
//!
//! Set `RUST_LOG=debug` to see rule compilation details.

use std::process;

use headerblock::prelude::*;
use headerblock_http::canonical_header_name;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "eval" => cmd_eval(&args[2..]),
        "check" => cmd_check(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("error: unknown command \"{other}\"");
            print_usage();
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Commands
// ═══════════════════════════════════════════════════════════════════════════════

fn cmd_eval(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("eval requires a config file path".into());
    }

    let config_path = &args[0];
    let request = parse_request(&args[1..])?;

    let engine = build_engine(&load_config(config_path)?)?;
    let trace = engine.explain(&request.headers);
    if engine.logs_decisions() {
        log::info!("{}: {}", request.url, trace.reason());
    }

    println!("{}: {}", trace.decision, trace.reason());
    println!("  {trace}");
    Ok(())
}

fn cmd_check(args: &[String]) -> Result<(), String> {
    if args.is_empty() {
        return Err("check requires a config file path".into());
    }

    let config = load_config(&args[0])?;
    let engine = build_engine(&config)?;

    println!(
        "Config valid: {} mode, {} block rules, {} allow rules",
        engine.mode(),
        config.request_headers.len(),
        config.whitelist_request_headers.len()
    );
    Ok(())
}

fn build_engine(config: &EngineConfig) -> Result<Engine, String> {
    Engine::build(config).map_err(|e| format!("config invalid: {e}"))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Config loading
// ═══════════════════════════════════════════════════════════════════════════════

fn load_config(path: &str) -> Result<EngineConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read \"{path}\": {e}"))?;

    let is_json = std::path::Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        EngineConfig::from_json(&content)
    } else {
        // Default to YAML (handles .yaml and .yml)
        EngineConfig::from_yaml(&content)
    };
    parsed.map_err(|e| e.to_string())
}

// ═══════════════════════════════════════════════════════════════════════════════
// Argument parsing
// ═══════════════════════════════════════════════════════════════════════════════

/// A request assembled from the command line.
#[derive(Debug)]
struct CliRequest {
    url: String,
    headers: RequestHeaders,
}

fn parse_request(args: &[String]) -> Result<CliRequest, String> {
    let mut request = CliRequest {
        url: "/".into(),
        headers: RequestHeaders::new(),
    };
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--header" | "-H" => {
                i += 1;
                if args.get(i).map_or(true, |arg| arg.starts_with('-')) {
                    return Err("--header requires Name=Value".into());
                }
                while i < args.len() && !args[i].starts_with('-') {
                    let pair = &args[i];
                    let (name, value) = pair.split_once('=').ok_or_else(|| {
                        format!("invalid header \"{pair}\", expected Name=Value")
                    })?;
                    if name.is_empty() {
                        return Err(format!("invalid header \"{pair}\", empty name"));
                    }
                    // Same form the middleware presents
                    request.headers.append(canonical_header_name(name), value);
                    i += 1;
                }
            }
            "--url" => {
                request.url = args
                    .get(i + 1)
                    .ok_or("--url requires a value")?
                    .clone();
                i += 2;
            }
            other => return Err(format!("unexpected argument \"{other}\"")),
        }
    }

    Ok(request)
}

fn print_usage() {
    eprintln!(
        "Usage: headerblock <command> [options]

Commands:
  eval <config> [--header Name=Value...] [--url URL]   Decide on a request
  check <config>                                       Validate config
  help                                                 Show this help

Config files ending in .json are read as JSON, anything else as YAML."
    );
}
