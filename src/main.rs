use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use dotpipe::{compile, tokenize, Context, Error, Evaluator, Object, Options};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// dotpipe runs scripts written as chains of `|function:arg:arg` calls.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None)]
struct Args {
  /// Script to run. Reads standard input when neither a file nor `-e` is given.
  file: Option<PathBuf>,

  /// Run this source text instead of a file.
  #[clap(short, long, value_name = "CODE", conflicts_with = "file")]
  eval: Option<String>,

  /// Evaluate standard input line by line, keeping bindings between lines.
  #[clap(short, long)]
  interactive: bool,

  /// Turn lexer and parser recoveries into errors.
  #[clap(long)]
  strict: bool,

  /// Seed for `random`.
  #[clap(long, value_name = "N")]
  seed: Option<u64>,

  /// Print the token stream and exit.
  #[clap(long)]
  tokens: bool,

  /// Print the syntax tree and exit.
  #[clap(long, conflicts_with = "tokens")]
  ast: bool,

  /// Do not print the value of the last statement.
  #[clap(short, long)]
  quiet: bool,

  /// Raise the log level; repeat for more detail. RUST_LOG takes precedence.
  #[clap(short, long, action = clap::ArgAction::Count)]
  verbose: u64,
}

fn init_tracing(verbose: u64) {
  let level = match verbose {
    0 => "warn",
    1 => "debug",
    _ => "trace",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(io::stderr).with_target(false))
    .with(filter)
    .init();
}

fn main() {
  let args = Args::parse();
  init_tracing(args.verbose);

  if let Err(e) = run(&args) {
    eprintln!("error: {}", e);
    process::exit(1);
  }
}

fn run(args: &Args) -> Result<(), Error> {
  let options = Options {
    strict: args.strict,
    seed: args.seed,
  };

  if args.interactive {
    return repl(&options, args.quiet);
  }

  let source = match (&args.eval, &args.file) {
    (Some(code), _) => code.clone(),
    (None, Some(path)) => fs::read_to_string(path)?,
    (None, None) => {
      let mut source = String::new();
      io::stdin().read_to_string(&mut source)?;
      source
    }
  };

  if args.tokens {
    for token in tokenize(&source) {
      println!("{} {:?} {:?}", token.span, token.kind, token.slice);
    }
    return Ok(());
  }

  let program = compile(&source, &options)?;

  if args.ast {
    println!("{:#?}", program);
    return Ok(());
  }

  let mut evaluator = Evaluator::with_context(Context::stdio(options.seed));
  let value = evaluator.eval(&program)?;
  report(&value, args.quiet);

  Ok(())
}

/// Lines share one evaluator. A failing line is reported and the session
/// carries on.
fn repl(options: &Options, quiet: bool) -> Result<(), Error> {
  let mut evaluator = Evaluator::with_context(Context::stdio(options.seed));

  loop {
    print!("> ");
    io::stdout().flush()?;

    let line = match evaluator.context().read_line()? {
      Some(line) => line,
      None => break,
    };

    let result = compile(&line, options).and_then(|program| evaluator.eval(&program));
    match result {
      Ok(value) => report(&value, quiet),
      Err(e) => eprintln!("error: {}", e),
    }
  }

  println!();
  Ok(())
}

fn report(value: &Object, quiet: bool) {
  if !quiet && *value != Object::Null {
    println!("{}", value);
  }
}
