mod runner;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// rill flow-simulation language toolchain.
#[derive(Parser)]
#[command(name = "rill", version, about = "rill flow-simulation language toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program and print the recorded per-step series
    Run {
        /// Path to the .rill program
        file: PathBuf,
        /// Number of stepped passes after the initial pass
        #[arg(long, default_value_t = 0)]
        steps: u32,
    },

    /// Lex and parse a program without running it
    Check {
        /// Path to the .rill program
        file: PathBuf,
        /// Print the token kinds
        #[arg(long)]
        dump_tokens: bool,
        /// Print the parse tree
        #[arg(long)]
        dump_tree: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let code = match cli.command {
        Commands::Run { file, steps } => runner::cmd_run(&file, steps, cli.output),
        Commands::Check {
            file,
            dump_tokens,
            dump_tree,
        } => runner::cmd_check(&file, dump_tokens, dump_tree, cli.output),
    };
    process::exit(code);
}
