use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use ferry::cli::DaemonOpts;
use ferry::logger::{FileLog, NoopLog, SessionLog};
use ferry::server;

fn main() -> Result<()> {
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    let opts = DaemonOpts::parse();

    if !opts.share_dir.exists() {
        anyhow::bail!(
            "Error: Share directory does not exist: {}",
            opts.share_dir.display()
        );
    }
    if !opts.share_dir.is_dir() {
        anyhow::bail!(
            "Error: Share path is not a directory: {}",
            opts.share_dir.display()
        );
    }
    std::fs::create_dir_all(&opts.upload_dir).with_context(|| {
        format!("Failed to create upload directory: {}", opts.upload_dir.display())
    })?;

    println!("Starting ferryd:");
    println!("  Bind:    {}", opts.bind);
    println!("  Share:   {}", opts.share_dir.display());
    println!("  Uploads: {}", opts.upload_dir.display());
    if let Some(ref p) = opts.log_file {
        println!("  Log:     {}", p.display());
    }

    let log: Arc<dyn SessionLog> = match &opts.log_file {
        Some(p) => Arc::new(
            FileLog::new(p).with_context(|| format!("Failed to open log file: {}", p.display()))?,
        ),
        None => Arc::new(NoopLog),
    };

    server::serve(&opts, log)
}
