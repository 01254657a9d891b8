use anyhow::Context;
use calc_core::{Calculator, keypad, tokenize};
use clap::{Parser, Subcommand};
use inquire::{InquireError, Text};
use tracing::debug;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "calc", version, about = "Keypad calculator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Press a sequence of keys and print the final display.
    Eval {
        /// Key labels, e.g. `2 + 3 = ` or `"9 0 sin"`. Quote `*` to keep it from the shell.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        keys: Vec<String>,

        /// Print the display after every key. Accepted before or after the keys.
        #[arg(long)]
        steps: bool,
    },

    /// Interactive prompt; each line is a list of keys.
    Repl,

    /// Show the keypad layout.
    Keypad,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Eval { keys, steps } => {
                let (keys, steps) = take_steps_flag(keys, steps);
                eval(&keys.join(" "), steps)
            }
            Command::Repl => repl(),
            Command::Keypad => {
                print_keypad();
                Ok(())
            }
        }
    }
}

/// Trailing arguments swallow flags, so pull a `--steps` given after the keys back out.
fn take_steps_flag(keys: Vec<String>, steps: bool) -> (Vec<String>, bool) {
    let (flags, keys): (Vec<String>, Vec<String>) =
        keys.into_iter().partition(|key| key == "--steps");
    (keys, steps || !flags.is_empty())
}

fn eval(line: &str, steps: bool) -> anyhow::Result<()> {
    let tokens = tokenize(line).context("Invalid key sequence")?;
    let mut calc = Calculator::new();

    for token in tokens {
        let display = calc.handle_input(token);
        if steps {
            println!("{:>5}  {display}", token.to_string());
        }
    }

    if !steps {
        println!("{}", calc.display());
    }

    Ok(())
}

fn repl() -> anyhow::Result<()> {
    let mut calc = Calculator::new();
    println!("Enter keys separated by spaces (e.g. `1 0 + 5 =`). Type `quit` to leave.");

    loop {
        let line = match Text::new(&format!("[{}]", calc.display())).prompt() {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read keys"),
        };

        let line = line.trim();
        if matches!(line, "quit" | "exit") {
            break;
        }

        match tokenize(line) {
            Ok(tokens) => println!("{}", calc.feed(tokens)),
            Err(e) => {
                debug!(%line, error = %e, "Rejected key line");
                eprintln!("{e}");
            }
        }
    }

    Ok(())
}

fn print_keypad() {
    for row in keypad() {
        let cells: Vec<String> = row
            .iter()
            .map(|button| {
                let label = button.label();
                let width = 6 * usize::from(button.span);
                format!("[{label:^width$}]")
            })
            .collect();
        println!("{}", cells.join(" "));
    }

    println!();
    for row in keypad() {
        for button in row {
            let style = button.style();
            let tooltip = button.tooltip.map(|t| format!("  ({t})")).unwrap_or_default();
            println!(
                "{:<4} {:<6} bg={:<12} fg={}{tooltip}",
                button.label(),
                button.kind.as_str(),
                style.background,
                style.foreground,
            );
        }
    }
}
