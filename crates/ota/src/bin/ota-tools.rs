//! Command-line tool for OTA applet management
//!
//! Generates AIDs for a project, analyzes CAP files, and assembles the
//! OTA SMS parts for install and delete operations. The SMPP dispatch
//! itself lives behind the transport boundary, so the install/delete
//! subcommands print the exact hex parts that would be submitted.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use otalink_apdu_core::ApduCommand;
use otalink_ota::cap::CapFile;
use otalink_ota::constants::sms;
use otalink_ota::session::{normalize_msisdn, validate_msisdn};
use otalink_ota::{
    Aid, AidGenerator, DeleteCommand, InstallCommand, Operation, Rid, envelope, fragment, util,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate AIDs for a project
    Generate {
        /// Dotted package name (e.g. com.example.myapp)
        package: String,

        /// Applet names
        #[arg(required = true)]
        applets: Vec<String>,

        /// Package version (decimal 0-255)
        #[arg(short, long, default_value = "01")]
        version: String,

        /// RID prefix to derive under
        #[arg(short, long, value_enum, default_value = "custom")]
        rid: RidChoice,
    },

    /// Analyze a CAP file
    Analyze {
        /// Path to the CAP file
        cap_file: PathBuf,
    },

    /// Assemble the OTA SMS parts for an applet installation
    Install {
        /// Destination MSISDN
        destination: String,

        /// Applet AID (hex)
        aid: String,

        /// Load file data (hex)
        #[arg(default_value = "")]
        data: String,

        /// Maximum payload bytes per SMS part
        #[arg(short, long, default_value_t = sms::MAX_SEGMENT_PAYLOAD)]
        part_size: usize,

        /// Concatenation reference number
        #[arg(short, long, default_value_t = 0)]
        reference: u8,
    },

    /// Assemble the OTA SMS parts for an applet deletion
    Delete {
        /// Destination MSISDN
        destination: String,

        /// Applet AID (hex)
        aid: String,

        /// Maximum payload bytes per SMS part
        #[arg(short, long, default_value_t = sms::MAX_SEGMENT_PAYLOAD)]
        part_size: usize,

        /// Concatenation reference number
        #[arg(short, long, default_value_t = 0)]
        reference: u8,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum RidChoice {
    Test,
    Custom,
    Demo,
    Research,
}

impl From<RidChoice> for Rid {
    fn from(choice: RidChoice) -> Self {
        match choice {
            RidChoice::Test => Self::Test,
            RidChoice::Custom => Self::Custom,
            RidChoice::Demo => Self::Demo,
            RidChoice::Research => Self::Research,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            package,
            applets,
            version,
            rid,
        } => {
            let generator = AidGenerator::new(rid.into());
            let project = generator.project_aids(&package, &applets, &version);

            println!("Package Name: {}", project.package_name);
            println!("Package AID:  {}", project.package_aid);
            println!("Version:      {:02X}", project.version);
            println!("\nApplet AIDs:");
            for applet in &project.applets {
                println!("  {}: {}", applet.name, applet.aid);
            }
        }

        Commands::Analyze { cap_file } => {
            let cap = CapFile::open(&cap_file)?;
            let info = cap.info();

            match &info.header.package_aid {
                Some(aid) => println!("Package AID: {aid}"),
                None => println!("Package AID: Not found"),
            }
            println!("Applet AIDs:");
            if info.applets.aids.is_empty() {
                println!("  None found");
            } else {
                for aid in &info.applets.aids {
                    println!("  {aid}");
                }
            }
        }

        Commands::Install {
            destination,
            aid,
            data,
            part_size,
            reference,
        } => {
            let aid = Aid::from_hex(&aid)?;
            let load_data = util::decode_hex(&data)?;
            let apdu = InstallCommand::new(&aid, &load_data)?.to_bytes()?;
            let message = envelope::wrap(&apdu, Operation::Install)?;
            print_parts(&destination, &message, part_size, reference)?;
        }

        Commands::Delete {
            destination,
            aid,
            part_size,
            reference,
        } => {
            let aid = Aid::from_hex(&aid)?;
            let apdu = DeleteCommand::new(&aid)?.to_bytes()?;
            let message = envelope::wrap(&apdu, Operation::Delete)?;
            print_parts(&destination, &message, part_size, reference)?;
        }
    }

    Ok(())
}

fn print_parts(
    destination: &str,
    message: &[u8],
    part_size: usize,
    reference: u8,
) -> Result<(), Box<dyn std::error::Error>> {
    if !validate_msisdn(destination) {
        return Err(format!("invalid destination MSISDN: {destination}").into());
    }
    let destination = normalize_msisdn(destination);

    let parts = fragment::fragment(message, part_size, reference)?;
    println!("OTA message for {destination}: {} part(s)", parts.len());
    for part in &parts {
        println!(
            "  [{}/{}] {}",
            part.index(),
            part.total(),
            util::encode_hex_upper(&part.to_bytes())
        );
    }
    Ok(())
}
