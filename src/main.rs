//! gigatile - resolve a tile-request path against the local filesystem.
//!
//! A diagnostic front end for the resolution core: sanitizes the supplied
//! path fragment, probes for a single file or a multi-angle sequence, and
//! reports what a tile server would serve for it.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gigatile::{
    probe_source,
    request::{self, ConditionalOutcome, ViewState},
    CodecKind, Config, SourceKind,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    run_check(config).await
}

async fn run_check(config: Config) -> ExitCode {
    // Sanitize the raw path fragment
    let decoded = request::path::decode(&config.path);
    println!("Path:       {} => {}", config.path, decoded.path);
    if decoded.embedded_nul {
        println!("            (embedded NUL byte dropped)");
    }

    // Probe the filesystem
    let descriptor = match probe_source(
        &config.filesystem_prefix,
        &decoded.path,
        &config.filename_pattern,
    )
    .await
    {
        Ok(descriptor) => descriptor,
        Err(e) => {
            error!("Resolution failed (status {}): {}", e.status_code(), e);
            return ExitCode::FAILURE;
        }
    };

    match descriptor.kind {
        SourceKind::SingleFile => {
            println!("Source:     single file");
        }
        SourceKind::Sequence => {
            println!("Source:     image sequence");
            println!("Horizontal: {:?}", descriptor.horizontal_angles);
            println!("Vertical:   {:?}", descriptor.vertical_angles);
        }
    }
    println!("Extension:  {}", descriptor.extension);

    match CodecKind::from_extension(&descriptor.extension) {
        Ok(kind) => println!("Codec:      {:?}", kind),
        Err(e) => {
            error!("Dispatch failed (status {}): {}", e.status_code(), e);
            return ExitCode::FAILURE;
        }
    }

    println!(
        "Modified:   {}",
        httpdate::fmt_http_date(descriptor.timestamp)
    );

    // Optionally evaluate a conditional request against the timestamp
    if let Some(ref header) = config.if_modified_since {
        let mut view = ViewState::default();
        match request::conditional::evaluate(descriptor.timestamp, Some(header), &mut view) {
            ConditionalOutcome::NotModified => println!("Condition:  not modified (304)"),
            ConditionalOutcome::Proceed => println!("Condition:  modified, serve normally"),
        }
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "gigatile=debug"
    } else {
        "gigatile=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
