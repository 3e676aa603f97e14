mod args;

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use log::debug;
use wordgen_core::{GenError, GenerationInput, Inventory, WordGenerator};

use crate::args::{Args, USAGE};

/// Exit status for generation and I/O errors.
const EXIT_FAILURE: u8 = 1;

/// Exit status for malformed command lines.
const EXIT_USAGE: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();

    let raw: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let code = execute(&raw, &mut out, &mut io::stderr());

    // A closed pipe on stdout is not worth a second error
    let _ = out.flush();
    ExitCode::from(code)
}

/// Parses `raw`, runs the command and returns the process exit status.
///
/// - `0`: success (including `--help`)
/// - `1`: generation or I/O error, reported on `err`
/// - `2`: malformed command line, usage and error reported on `err`
fn execute<O: Write, E: Write>(raw: &[String], out: &mut O, err: &mut E) -> u8 {
    let args = match args::parse(raw) {
        Ok(args) => args,
        Err(e) => {
            let _ = writeln!(err, "{USAGE}\n\nwordgen: error: {e}");
            return EXIT_USAGE;
        }
    };

    if args.help {
        return match writeln!(out, "{USAGE}") {
            Ok(()) => 0,
            Err(_) => EXIT_FAILURE,
        };
    }

    match run(&args, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "wordgen: error: {e}");
            EXIT_FAILURE
        }
    }
}

/// Builds the generator from the arguments and writes the requested lines to `out`.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), Box<dyn std::error::Error>> {
    // Load a custom inventory, or use the built-in one
    let inventory = match &args.inventory {
        Some(path) => Inventory::load(path)?,
        None => Inventory::default(),
    };
    debug!("using inventory '{}'", inventory.name());

    // A limit of 0 disables the word limit
    let mut generator = WordGenerator::new(inventory);
    if let Some(limit) = args.limit {
        generator = generator.with_word_limit((limit > 0).then_some(limit));
    }

    if args.count {
        writeln!(out, "{}", generator.count(args.syllables)?)?;
        return Ok(());
    }

    let input = GenerationInput {
        syllables: args.syllables,
        number: args.number,
        random: args.random,
        seed: args.seed,
        conjugate: args.conjugate,
    };

    let lines = match generator.produce(&input) {
        Ok(lines) => lines,
        Err(e @ GenError::TooManyWords { .. }) => {
            return Err(format!("{e} (raise it with --limit, or 0 to remove it)").into());
        }
        Err(e) => return Err(e.into()),
    };

    if !lines.is_empty() {
        writeln!(out, "{}", lines.join("\n"))?;
    }
    Ok(())
}
