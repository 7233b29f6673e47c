//! DPU Config CLI - inspect serialized master configurations.
//!
//! Reads a master container produced by `FragmentRegistry::serialize_all`
//! from a file (or `-` for stdin) and reports what it holds.

mod inspect;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "dpu-config")]
#[command(about = "Inspect serialized DPU configurations")]
struct Args {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the fragments stored in a master configuration
    List {
        /// Master configuration file, or `-` for stdin
        input: PathBuf,
    },
    /// Check whether a configuration may hold a type tag
    Contains {
        /// Configuration file, or `-` for stdin
        input: PathBuf,
        /// Type tag or alias to look for
        tag: String,
    },
    /// Print the tag derived from a Rust type path
    Tag {
        /// Type path such as `my_dpu::settings::Config`
        path: String,
        /// Treat the last segment as nested in the one before it
        #[arg(long)]
        nested: bool,
    },
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Logs go to stderr so command output stays clean
    let log_level = if args.debug { Level::DEBUG } else { Level::WARN };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    debug!("Running {:?}", args.command);

    match args.command {
        Command::List { input } => {
            let blob = inspect::read_input(&input)?;
            for line in inspect::list_fragments(&blob)? {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Contains { input, tag } => {
            let blob = inspect::read_input(&input)?;
            let found = dpu_config::can_contain_tag(&blob, &tag);
            println!("{}", found);
            Ok(if found {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Tag { path, nested } => {
            let descriptor = inspect::descriptor_for(&path, nested)?;
            println!("{}", descriptor.tag());
            Ok(ExitCode::SUCCESS)
        }
    }
}
