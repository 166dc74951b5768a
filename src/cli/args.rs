// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute (serve or generate)
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the flashcard generation endpoint over HTTP
    Serve {
        /// Address to bind, overrides the config file
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,

        /// Port to listen on, overrides the config file
        #[arg(short = 'P', long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Generate flashcards for a prompt and print them
    Generate {
        /// Topic or text to build flashcards from
        #[arg(value_name = "TEXT")]
        text: String,

        /// Front color as CSS hex, e.g. #1E1E1E
        #[arg(long, value_name = "COLOR")]
        front_color: Option<String>,

        /// Back color as CSS hex, e.g. #FF2D55
        #[arg(long, value_name = "COLOR")]
        back_color: Option<String>,

        /// Output flashcards as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
}
