//! REPL command implementation

use crate::config::Config;
use anyhow::Result;
use clav_runtime::diagnostic::formatter::DiagnosticFormatter;
use clav_runtime::{ReplCore, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// What the loop should do with a line that starts with `:`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Quit,
    Help,
    Reset,
    Vars,
    Unknown,
}

fn parse_command(line: &str) -> Option<Command> {
    let word = line.strip_prefix(':')?.split_whitespace().next().unwrap_or("");
    Some(match word {
        "quit" | "q" => Command::Quit,
        "help" | "h" => Command::Help,
        "reset" => Command::Reset,
        "vars" | "v" => Command::Vars,
        _ => Command::Unknown,
    })
}

/// Run the interactive REPL
///
/// If `no_history` is true, history is neither loaded nor saved.
pub fn run(no_history: bool, config: &Config) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut repl = ReplCore::new();
    let formatter = DiagnosticFormatter::new(config.color_mode());

    let history_path = if no_history {
        None
    } else {
        config.history_path()
    };
    if let Some(ref path) = history_path {
        let _ = rl.load_history(path); // Ignore errors if file doesn't exist
    }

    println!("Clav v{} REPL", clav_runtime::VERSION);
    println!("Type statements to run them, or :quit to exit");
    println!("Commands: :quit (or :q), :reset, :help, :vars");
    println!();

    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                if let Some(command) = parse_command(trimmed) {
                    match command {
                        Command::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        Command::Help => print_help(),
                        Command::Reset => {
                            repl.reset();
                            println!("REPL state reset");
                        }
                        Command::Vars => print_vars(&repl.variables()),
                        Command::Unknown => {
                            println!("Unknown command '{}'; try :help", trimmed);
                        }
                    }
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let result = repl.eval_line(&line);
                if !result.is_ok() {
                    formatter.emit_all(&result.diagnostics)?;
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C
                println!("^C");
                println!("Use :quit or :q to exit");
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D
                println!("Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(path) = history_path {
        if let Some(parent) = path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save REPL history");
        }
    }

    Ok(())
}

fn print_help() {
    println!("Clav REPL Commands:");
    println!("  :quit, :q         Exit the REPL");
    println!("  :reset            Clear all variables");
    println!("  :help, :h         Show this help message");
    println!("  :vars, :v         List variables and their values");
    println!();
    println!("A missing trailing ';' is added for you.");
    println!("Examples:");
    println!("  >> var x = 42");
    println!("  >> print x * 2");
    println!("  >> x = \"now a string\"");
}

/// `name = value`, with strings quoted so `"1"` and `1` differ
fn format_binding(name: &str, value: &Value) -> String {
    match value {
        Value::String(s) => format!("{} = \"{}\"", name, s),
        other => format!("{} = {}", name, other),
    }
}

fn print_vars(bindings: &[(String, Value)]) {
    if bindings.is_empty() {
        println!("No variables defined.");
        return;
    }
    for (name, value) in bindings {
        println!("{}", format_binding(name, value));
    }
}
