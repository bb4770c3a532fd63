//! astdump - print the syntax tree of Go source fragments.

mod stdin;

use std::{env, process};

use clap::Parser;
use diagnostic::{Diagnostic, Emitter, InputId, Inputs, TerminalEmitter};
use tracing_subscriber::EnvFilter;

use crate::stdin::{Reason, StdinSource};

const SOURCE_HELP: &str =
    "Go source to dump. Each argument is parsed separately, and can be an \
     expression, a statement, a declaration or a whole file. A `-` reads \
     stdin, which is also the default when nothing is given.";

const EXAMPLES: &str = "EXAMPLES:
    astdump '_ *= 123'
    astdump someIdent '_ *= 123' 'someVar := \"somestr\"'
    cat source.go | astdump -f -";

#[derive(Debug, Parser)]
#[clap(
    name = "astdump",
    version,
    about = "print the syntax tree of Go source fragments",
    after_help = EXAMPLES
)]
struct Args {
    #[clap(value_name = "SOURCE", help = SOURCE_HELP)]
    sources: Vec<String>,

    /// Also print each tree formatted as Go source
    #[clap(short, long)]
    fmt: bool,
}

fn main() {
    let args = Args::parse();
    init_logging();

    let mut inputs = Inputs::default();
    let ids = match read_inputs(&args.sources, &mut inputs) {
        Ok(ids) => ids,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let mut emitter = TerminalEmitter::stderr();
    for (index, id) in ids.into_iter().enumerate() {
        dump(index, id, &inputs, &mut emitter, args.fmt);
    }
}

/// Resolve every argument to text before parsing anything, so a bad set of
/// arguments fails before any output.
fn read_inputs(
    sources: &[String],
    inputs: &mut Inputs,
) -> Result<Vec<InputId>, stdin::StdinError> {
    let mut stdin = StdinSource::new(if sources.is_empty() {
        Reason::NoArgs
    } else {
        Reason::Dash
    });

    if sources.is_empty() {
        return Ok(vec![inputs.stdin(stdin.read()?)]);
    }

    let mut ids = Vec::with_capacity(sources.len());
    for (index, source) in sources.iter().enumerate() {
        let id = if source == "-" {
            inputs.stdin(stdin.read()?)
        } else {
            inputs.argument(index, source.clone())
        };
        ids.push(id);
    }

    Ok(ids)
}

fn dump(
    index: usize,
    id: InputId,
    inputs: &Inputs,
    emitter: &mut TerminalEmitter,
    fmt: bool,
) {
    let text = inputs.get_input_buffer(id);

    let node = match astfrom::source(text) {
        Ok(parsed) => {
            tracing::debug!(category = %parsed.category, "argument {}", index);
            astfrom::reduce(parsed.node)
        }
        Err(error) => {
            let diagnostic = to_diagnostic(&error).input(id);
            if let Err(e) = emitter.emit(&diagnostic, inputs) {
                tracing::error!("cannot write diagnostic: {}", e);
            }
            astfrom::fallback(&error)
        }
    };

    println!("  --------  [Source - Arg #{}]  --------", index);
    println!("{:#?}", node);

    if fmt {
        println!("\n  --------  [Formatted - Arg #{}]  --------", index);
        println!("{}\n", node);
    }
}

fn to_diagnostic(error: &astfrom::Error) -> Diagnostic {
    match error {
        astfrom::Error::Parse { source, .. } => Diagnostic::from(source),
        other => Diagnostic::new(other.to_string()),
    }
}

/// Logs go to stderr, filtered by `ASTDUMP_LOG`, then `RUST_LOG`.
fn init_logging() {
    let filter = env::var("ASTDUMP_LOG")
        .or_else(|_| env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
