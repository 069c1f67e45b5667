use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;

/// Clav language interpreter.
///
/// Clav is a small dynamically typed scripting language with numbers,
/// strings, booleans, nil, global variables and `print`.
///
/// EXAMPLES:
///     clav run main.clav           Run a Clav program
///     clav tokens main.clav        Dump the token stream
///     clav ast main.clav           Dump the syntax tree
///     clav repl                    Start interactive REPL
///     clav                         Same as `clav repl`
///
/// ENVIRONMENT VARIABLES:
///     CLAV_DIAGNOSTICS   Set to 'json' for JSON diagnostics by default
///     CLAV_NO_HISTORY    Set to disable REPL history
///     CLAV_HISTORY_FILE  Custom REPL history file
///     CLAV_LOG           Tracing filter (e.g. 'clav_runtime=trace')
///     NO_COLOR           Set to disable colored output
#[derive(Parser)]
#[command(name = "clav")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging for the interpreter
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Clav source file
    ///
    /// Scans, parses and executes the file. Any error makes the process
    /// exit with a non-zero status; syntax errors stop the program before
    /// anything runs.
    ///
    /// EXAMPLES:
    ///     clav run main.clav              Run a program
    ///     clav run main.clav --json       Output diagnostics as JSON
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Clav source file
        file: String,
        /// Output diagnostics in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive REPL
    ///
    /// Each line is run as a program against the same global state.
    /// A missing trailing semicolon is added for you.
    ///
    /// REPL COMMANDS:
    ///     :help, :h      Show help
    ///     :quit, :q      Exit REPL
    ///     :reset         Clear all variables
    ///     :vars          List defined variables
    Repl {
        /// Disable history persistence (for privacy)
        #[arg(long, env = "CLAV_NO_HISTORY")]
        no_history: bool,
    },

    /// Dump the token stream
    ///
    /// EXAMPLES:
    ///     clav tokens main.clav           One token per line
    ///     clav tokens main.clav --json    JSON array of tokens
    Tokens {
        /// Path to the Clav source file
        file: String,
        /// Output tokens as JSON
        #[arg(long)]
        json: bool,
    },

    /// Dump the syntax tree
    ///
    /// Prints one S-expression per statement, or the versioned JSON
    /// tree with --json.
    ///
    /// EXAMPLES:
    ///     clav ast main.clav              Print S-expressions
    ///     clav ast main.clav --json       Print JSON
    Ast {
        /// Path to the Clav source file
        file: String,
        /// Output the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    ///
    /// EXAMPLES:
    ///     clav completions bash > /etc/bash_completion.d/clav
    ///     clav completions zsh > ~/.zfunc/_clav
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Install the stderr tracing subscriber
///
/// `CLAV_LOG` wins when set; otherwise `--verbose` turns on runtime debug
/// events and everything else stays at `warn`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "clav_runtime=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CLAV_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = config::Config::from_env();
    tracing::debug!(?config, "loaded configuration");

    match cli.command {
        Some(Commands::Run { file, json }) => {
            commands::run::run(&file, json || config.default_json, &config)?;
        }
        Some(Commands::Repl { no_history }) => {
            commands::repl::run(no_history || config.no_history, &config)?;
        }
        None => {
            commands::repl::run(config.no_history, &config)?;
        }
        Some(Commands::Tokens { file, json }) => {
            commands::tokens::run(&file, json, &config)?;
        }
        Some(Commands::Ast { file, json }) => {
            commands::ast::run(&file, json, &config)?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
    }

    Ok(())
}
