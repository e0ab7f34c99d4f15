//! Utility to display information about CAP files
//!
//! Analyzes a CAP archive and prints its package AID, version, applet
//! AIDs, and manifest metadata without touching any card.

use std::path::PathBuf;

use clap::Parser;
use otalink_ota::cap::CapFile;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the CAP file to analyze
    cap_file: PathBuf,

    /// List every entry in the CAP archive
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .init();

    let cli = Cli::parse();

    if !cli.cap_file.exists() {
        return Err(format!("CAP file not found: {}", cli.cap_file.display()).into());
    }

    println!("Analyzing CAP file: {}", cli.cap_file.display());
    println!("========================================");

    let cap = CapFile::open(&cli.cap_file)?;
    let info = cap.info();

    match &info.header.package_aid {
        Some(aid) => println!("Package AID: {aid}"),
        None => println!("Package AID: Not found"),
    }

    match info.header.version {
        Some((major, minor)) => println!("Version: {major}.{minor}"),
        None => println!("Version: Unknown"),
    }

    if info.header.magic.is_some() && !info.header.has_valid_magic() {
        println!("Warning: header magic does not match the CAP constant");
    }
    if info.header.truncated {
        println!("Warning: Header component is truncated");
    }

    println!("\nApplets:");
    if info.applets.aids.is_empty() {
        println!("  None found");
    } else {
        for (i, aid) in info.applets.aids.iter().enumerate() {
            println!("  {}. AID: {aid}", i + 1);
        }
    }
    if info.applets.truncated {
        println!(
            "  (component truncated after {} of {} records)",
            info.applets.aids.len(),
            info.applets.declared_count
        );
    }

    if let Some(name) = &info.manifest.package_name {
        println!("\nPackage name: {name}");
    }
    if let Some(version) = &info.manifest.package_version {
        println!("Package version: {version}");
    }

    if cli.verbose {
        println!("\nCAP File Contents:");
        for (i, file) in cap.files().iter().enumerate() {
            println!("  {}. {}", i + 1, file);
        }
    }

    Ok(())
}
