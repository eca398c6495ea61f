//! Command-line front end for the image URL resolver.
//!
//! Normalizes and classifies image URLs without starting the HTTP service.
//!
//! # Usage
//!
//! ```bash
//! # Normalize one or more references (reads stdin lines when none are given)
//! cargo run --bin imgurl -- normalize "example.orghttps//cdn.example.com/img.png" /uploads/x.jpg
//!
//! # Check which URLs bypass the image optimizer
//! cargo run --bin imgurl -- classify https://images.unsplash.com/a.jpg
//!
//! # Resolve an API payload containing an `images` array
//! cargo run --bin imgurl -- resolve campaign.json
//!
//! # Show the effective configuration
//! cargo run --bin imgurl -- config
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `BACKEND_URL`, `UNOPTIMIZED_HOSTS`, `RUST_LOG`, `LOG_FORMAT`.
//! `--origin` overrides `BACKEND_URL`.

use image_url_resolver::api::dto::images::ResolvedItem;
use image_url_resolver::config::{self, Config};
use image_url_resolver::domain::entities::{BackendOrigin, ImageRecord};
use image_url_resolver::{ImageService, telemetry};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::{Value, json};
use std::io::{self, BufRead, Read};

/// Repair malformed image URLs and classify image hosts.
#[derive(Parser)]
#[command(name = "imgurl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend origin for relative paths (overrides BACKEND_URL)
    #[arg(long, global = true)]
    origin: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize image references, one result per line
    Normalize {
        /// Raw references; read from stdin when omitted
        inputs: Vec<String>,
    },

    /// Tell whether URLs bypass the image optimizer
    Classify {
        /// URLs to classify, matched as given
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Resolve a JSON payload with an `images` array
    Resolve {
        /// Path to a JSON file, or `-` for stdin
        file: String,
    },

    /// Show the effective configuration
    Config,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_config(cli.origin.as_deref())?;
    telemetry::init(&config.log_level, &config.log_format);

    let service = ImageService::from_config(&config);

    match cli.command {
        Commands::Normalize { inputs } => normalize(&service, inputs, cli.json)?,
        Commands::Classify { urls } => classify(&service, &urls, cli.json),
        Commands::Resolve { file } => resolve(&service, &file)?,
        Commands::Config => show_config(&config, cli.json),
    }

    Ok(())
}

/// Loads configuration from the environment. `--origin` replaces `BACKEND_URL`.
fn load_config(origin: Option<&str>) -> Result<Config> {
    let origin = origin
        .map(|raw| BackendOrigin::parse(raw).with_context(|| format!("Invalid --origin '{raw}'")))
        .transpose()?;

    config::load_from_env_with_origin(origin).context("Failed to load configuration")
}

fn normalize(service: &ImageService, inputs: Vec<String>, as_json: bool) -> Result<()> {
    let inputs = if inputs.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("Failed to read stdin")?
    } else {
        inputs
    };

    for input in inputs {
        let normalized = service.normalizer().normalize(Some(&input));

        if as_json {
            println!("{}", json!({ "input": input, "src": normalized }));
        } else {
            println!("{normalized}");
        }
    }

    Ok(())
}

fn classify(service: &ImageService, urls: &[String], as_json: bool) {
    for url in urls {
        let unoptimized = service.is_unoptimized(Some(url));

        if as_json {
            println!("{}", json!({ "url": url, "unoptimized": unoptimized }));
        } else if unoptimized {
            println!("{}\t{}", url, "bypass".yellow());
        } else {
            println!("{}\t{}", url, "optimize".green());
        }
    }
}

fn resolve(service: &ImageService, file: &str) -> Result<()> {
    let raw = if file == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read '{file}'"))?
    };

    let payload: Value = serde_json::from_str(&raw).context("Input is not valid JSON")?;
    let output = resolve_payload(service, payload)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Resolves every record in `payload`, echoing `input` and `alt` like the HTTP endpoint.
fn resolve_payload(service: &ImageService, payload: Value) -> Result<Value> {
    let records = extract_records(payload)?;

    let resolved = service.resolve_all(&records);
    let items: Vec<ResolvedItem> = records
        .into_iter()
        .zip(resolved)
        .map(|(record, image)| ResolvedItem::new(record, image))
        .collect();
    let primary = items.iter().find(|item| !item.src.is_empty());

    Ok(json!({
        "items": items,
        "primary": primary,
    }))
}

/// Accepts `{"images": [...]}` or a bare array of image records.
fn extract_records(payload: Value) -> Result<Vec<ImageRecord>> {
    let images = match payload {
        Value::Array(_) => payload,
        Value::Object(mut map) => map
            .remove("images")
            .context("JSON object has no 'images' field")?,
        _ => anyhow::bail!("Expected a JSON array or an object with an 'images' field"),
    };

    serde_json::from_value(images).context("'images' must be an array of objects")
}

fn show_config(config: &Config, as_json: bool) {
    let allowlist = config.allowlist();
    let origin = config.backend_origin.as_ref().map(|o| o.to_string());

    if as_json {
        println!(
            "{}",
            json!({
                "backend_origin": origin,
                "unoptimized_hosts": allowlist.entries(),
                "max_batch_size": config.max_batch_size,
            })
        );
        return;
    }

    println!("{}", "Configuration".bold());
    match origin {
        Some(origin) => println!("  {} {}", "Backend origin:".cyan(), origin),
        None => println!("  {} {}", "Backend origin:".cyan(), "not set".dimmed()),
    }
    println!("  {}", "Unoptimized hosts:".cyan());
    for entry in allowlist.entries() {
        println!("    - {entry}");
    }
    println!("  {} {}", "Max batch size:".cyan(), config.max_batch_size);
}
