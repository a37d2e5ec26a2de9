//! ferry — interactive client for a ferryd server
//!
//! Connects, asks which way the file goes, performs the one transfer, exits.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};

use ferry::catalog;
use ferry::cli::ClientOpts;
use ferry::client;
use ferry::progress::BarProgress;

fn main() -> Result<()> {
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    })
    .expect("Error setting Ctrl-C handler");

    let opts = ClientOpts::parse();
    let mut stream = client::connect(&opts.server)?;
    println!("Connected to {}\n", stream.peer_addr()?);

    println!("\t[1] Download a file\n\t[2] Upload a file\n");
    let choice = prompt("Choose an option [1/2]: ")?;
    match choice.trim() {
        "1" => {
            let text = client::fetch_catalog(&mut stream)?;
            print!("{text}");
            let pick: u32 = prompt("Enter the file number to download: ")?
                .trim()
                .parse()
                .context("not a number")?;
            let mut bar = BarProgress::percent_bar();
            let done = client::download(&mut stream, pick, &opts.downloads, &mut bar)?;
            println!(
                "Download complete. Saved as {} ({} bytes)",
                done.path.display(),
                done.bytes
            );
        }
        "2" => {
            let names = catalog::list_directory(&opts.uploads);
            if names.is_empty() {
                anyhow::bail!("nothing to upload in {}", opts.uploads.display());
            }
            println!("Available files to upload:");
            for (i, name) in names.iter().enumerate() {
                println!("[{}] {}", i + 1, name);
            }
            let pick: usize = prompt("Enter the file number to upload: ")?
                .trim()
                .parse()
                .context("not a number")?;
            if pick == 0 || pick > names.len() {
                anyhow::bail!("invalid file index {pick}");
            }
            let source = opts.uploads.join(&names[pick - 1]);
            let mut bar = BarProgress::percent_bar();
            let bytes = client::upload(&mut stream, &source, &mut bar)?;
            println!("Upload complete: {} ({} bytes)", source.display(), bytes);
        }
        other => anyhow::bail!("unknown option {other:?}"),
    }

    println!("Disconnected from server.");
    Ok(())
}

fn prompt(msg: &str) -> Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line)
}
