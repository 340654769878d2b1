use std::io;
use std::sync::Once;

use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as ReplResult};
use turkon::{parse, run_file, Config, ForLoop, Interpreter, ParserState, Tokenizer};

static TRACING_INIT: Once = Once::new();

/// Run by `--samples`, relative to the working directory.
const SAMPLES: [&str; 5] = [
    "test_files/example1.tkn",
    "test_files/example2.tkn",
    "test_files/example3.tkn",
    "test_files/example4.tkn",
    "test_files/example5.tkn",
];

fn main() -> Result<(), String> {
    init_tracing();
    let (config, files) = parse_args(std::env::args().skip(1))?;
    if files.is_empty() {
        run_repl(config).map_err(|err| err.to_string())?;
    } else {
        run_scripts(&files, config)?
    }
    Ok(())
}

/// Logs go to stderr, and only when `RUST_LOG` is set
/// (e.g. `RUST_LOG=turkon=trace`).
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Config, Vec<String>), String> {
    let mut config = Config::default();
    let mut files = vec![];
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--legacy-for" => config = config.with_for_loop(ForLoop::EagerIncrement),
            "--samples" => files.extend(SAMPLES.iter().map(|sample| sample.to_string())),
            "--max-steps" => {
                let limit = args
                    .next()
                    .ok_or("--max-steps needs a value")?
                    .parse::<u64>()
                    .map_err(|err| format!("--max-steps: {err}"))?;
                config = config.with_step_limit(limit);
            }
            _ => files.push(arg),
        }
    }
    Ok((config, files))
}

// Every file gets a fresh interpreter; a failing file does not stop the rest.
fn run_scripts(files: &[String], config: Config) -> Result<(), String> {
    println!("=== TURKON Programming Language Interpreter ===");
    let mut failed = 0;
    for file in files {
        println!("\n--- Processing {file} ---");
        let mut interpreter = Interpreter::with_config(io::stdout(), config);
        match run_file(file, &mut interpreter) {
            Ok(()) => println!("[OK] {file} completed successfully."),
            Err(err) => {
                eprintln!("Error processing {file}: {err}");
                failed += 1;
            }
        }
    }
    println!("\n=== TURKON Language Processing Complete ===");
    if failed > 0 {
        return Err(format!("{failed} of {} programs failed", files.len()));
    }
    Ok(())
}

fn run_repl(config: Config) -> ReplResult<()> {
    let mut rl = DefaultEditor::new()?;
    let mut interpreter = Interpreter::with_config(io::stdout(), config);
    let mut tokenizer = Tokenizer::new();
    let mut pending = false;
    loop {
        let readline = rl.readline(if pending { ".. " } else { ">> " });
        match readline {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let state = tokenizer.tokenize(std::iter::once(line));
                if let ParserState::ContinuationNeeded = state {
                    pending = true;
                    continue;
                }
                pending = false;
                let tokens = std::mem::take(&mut tokenizer).finalize();
                let result = match state {
                    ParserState::Error(err) => Err(err),
                    _ => parse(&tokens).and_then(|program| interpreter.run(&program)),
                };
                if let Err(err) = result {
                    println!("Error: {err}");
                }
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
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(args: &[&str]) -> impl Iterator<Item = String> {
        args.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn test_parse_args() {
        let (config, files) = parse_args(args(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert!(files.is_empty());

        let (config, files) =
            parse_args(args(&["a.tkn", "--legacy-for", "--max-steps", "50", "b.tkn"])).unwrap();
        assert_eq!(
            config,
            Config::default()
                .with_for_loop(ForLoop::EagerIncrement)
                .with_step_limit(50)
        );
        assert_eq!(files, vec!["a.tkn", "b.tkn"]);

        let (_, files) = parse_args(args(&["--samples", "extra.tkn"])).unwrap();
        assert_eq!(files.len(), SAMPLES.len() + 1);
        assert_eq!(files[0], "test_files/example1.tkn");
        assert_eq!(files.last().unwrap(), "extra.tkn");
    }

    #[test]
    fn test_parse_args_rejects_bad_step_limits() {
        assert_eq!(
            parse_args(args(&["--max-steps"])).unwrap_err(),
            "--max-steps needs a value"
        );
        let err = parse_args(args(&["--max-steps", "many"])).unwrap_err();
        assert!(err.starts_with("--max-steps: "), "{err}");
    }

    #[test]
    fn test_run_scripts_counts_failures() {
        let dir = env!("CARGO_MANIFEST_DIR");
        let files = [
            format!("{dir}/test_files/division_by_zero.tkn"),
            format!("{dir}/test_files/example2.tkn"),
            format!("{dir}/test_files/missing.tkn"),
        ];
        assert_eq!(
            run_scripts(&files, Config::default()).unwrap_err(),
            "2 of 3 programs failed"
        );
        assert!(run_scripts(&files[1..2], Config::default()).is_ok());
    }
}
