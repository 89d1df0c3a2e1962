use abacus::{calculate, evaluate, ParserState, Tokenizer};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => run_repl().map_err(|err| {
            error!("line editor failed: {err}");
            err.to_string()
        }),
        Some("-e") => match args.get(2) {
            Some(expression) => run_expression(expression),
            None => Err("Usage: abacus [-e EXPRESSION | FILE]".to_string()),
        },
        Some(filename) => run_script(filename),
    }
}

fn run_expression(expression: &str) -> Result<(), String> {
    let value = calculate(expression).map_err(|err| format!("Error: {err}"))?;
    println!("{value}");
    Ok(())
}

fn run_script(filename: &str) -> Result<(), String> {
    let lines = match read_lines(filename) {
        Ok(lines) => lines,
        Err(_) => return Err(format!("{filename} not found. No such file or directory.")),
    };
    info!("evaluating {filename}");
    let mut failures = 0;
    for (lineno, line) in lines.enumerate() {
        let line = line.map_err(|err| {
            error!("reading {filename} failed: {err}");
            err.to_string()
        })?;
        if line.trim().is_empty() {
            continue;
        }
        match calculate(&line) {
            Ok(value) => println!("{}: {value}", lineno + 1),
            Err(err) => {
                warn!("line {}: {err}", lineno + 1);
                println!("{}: Error: {err}", lineno + 1);
                failures += 1;
            }
        }
    }
    info!("finished {filename} with {failures} failed expression(s)");
    if failures > 0 {
        return Err(format!("{failures} expression(s) in {filename} failed"));
    }
    Ok(())
}

fn run_repl() -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    #[cfg(feature = "with-file-history")]
    if rl.load_history("history.txt").is_err() {
        println!("No previous history.");
    }
    let mut tokenizer = Tokenizer::new();
    let mut prompt = ">> ";
    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if line.trim().is_empty() && prompt == ">> " {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;
                match tokenizer.tokenize([line.as_str()]) {
                    ParserState::ContinuationNeeded => {
                        prompt = ".. ";
                        continue;
                    }
                    ParserState::Error(err) => println!("Error: {err}"),
                    ParserState::Ok => {
                        let tokens = tokenizer.finalize();
                        debug!(?tokens, "evaluating");
                        match evaluate(&tokens) {
                            Ok(value) => println!("{value}"),
                            Err(err) => println!("Error: {err}"),
                        }
                    }
                }
                tokenizer = Tokenizer::new();
                prompt = ">> ";
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    #[cfg(feature = "with-file-history")]
    rl.save_history("history.txt")?;
    Ok(())
}

fn read_lines<P>(filename: P) -> io::Result<io::Lines<io::BufReader<File>>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    Ok(io::BufReader::new(file).lines())
}
