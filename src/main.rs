//! Main entry point for vgrab CLI

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vgrab::cli::args::VerbosityLevel;
use vgrab::cli::output::ConsoleSink;
use vgrab::cli::prompt::{ConsolePrompt, DeclinePrompt};
use vgrab::cli::Args;
use vgrab::core::orchestrator::ResolutionPrompt;
use vgrab::download::ItemDownloader;
use vgrab::resolver::manifest::ManifestResolver;
use vgrab::{Orchestrator, OrchestratorOptions, Target};

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let args = Args::parse();
    debug!("Starting vgrab with args: {:?}", args);

    match run(&args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let target = Target::parse(&args.target, args.playlist);

    let service_base = args
        .service_base()
        .ok_or("cannot derive the resolver service from a raw identifier; pass --service URL")?;

    let resolver = Arc::new(ManifestResolver::with_timeout(
        service_base,
        args.timeout_duration(),
    ));

    let sink = Arc::new(ConsoleSink::new(args.verbosity_level(), !args.no_progress));

    // A fixed --resolution makes the run non-interactive
    let prompt: Arc<dyn ResolutionPrompt> = if args.resolution.is_some() {
        Arc::new(DeclinePrompt)
    } else {
        Arc::new(ConsolePrompt)
    };

    let options = OrchestratorOptions {
        requested_resolution: args.resolution.clone(),
        concurrency: args.concurrency.max(1),
        limit: args.limit_option(),
    };

    let orchestrator = Orchestrator::new(resolver, prompt, sink, options)
        .with_downloader(ItemDownloader::with_timeout(args.timeout_duration()));

    // Ctrl-C cancels cooperatively between items
    let cancel = orchestrator.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    if target.is_collection() {
        info!("Processing collection: {}", target.id());
        let result = orchestrator
            .run_collection(target.id(), &args.output)
            .await?;

        if args.verbosity_level() != VerbosityLevel::Quiet {
            println!(
                "Saved {} of {} items under {:?}",
                result.succeeded(),
                result.items.len(),
                result.destination
            );
        }

        // Non-zero exit when nothing at all was downloaded
        if !result.items.is_empty() && result.succeeded() == 0 {
            return Ok(ExitCode::FAILURE);
        }
        Ok(ExitCode::SUCCESS)
    } else {
        info!("Processing single item: {}", target.id());
        let outcome = orchestrator.download_item(target.id(), &args.output).await;
        if outcome.is_success() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initialize logging system
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact(),
        )
        .init();

    Ok(())
}
