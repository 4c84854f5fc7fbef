use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;

use asmc::{DriverError, Program, Report, Word, DEFAULT_SEED};

#[derive(Parser, Debug)]
#[command(author, version, about = "Runs a tiny assembly program and estimates its cycle cost")]
struct Opts {
  /// Initial memory words x, y, z, written at offsets 0, 4 and 8 [default: 2 3 5]
  #[arg(value_name = "WORD", num_args = 0..=3, allow_negative_numbers = true)]
  seed: Vec<Word>,
  /// Read the program from this file instead of standard input
  #[arg(short, long)]
  input: Option<PathBuf>,
  /// Print the final registers and memory
  #[arg(long)]
  show_state: bool,
  /// Print the cost of every instruction
  #[arg(long)]
  breakdown: bool,
  /// More logging; repeat for more detail
  #[arg(short, long, action = ArgAction::Count)]
  verbose: u8,
}

fn main() {
  let opts = Opts::parse();

  if let Err(e) = run(&opts) {
    eprintln!("Error: {}", e);
    process::exit(1);
  }
}

fn run(opts: &Opts) -> Result<(), DriverError> {
  let level = match opts.verbose {
    0 => LevelFilter::Warn,
    1 => LevelFilter::Info,
    2 => LevelFilter::Debug,
    _ => LevelFilter::Trace,
  };
  SimpleLogger::new().with_level(level).init()?;

  #[cfg(feature = "trace_computation")]
  info!("Computation tracing available at -vvv");

  let text = match &opts.input {
    Some(path) => fs::read_to_string(path)?,
    None => {
      let mut buffer = String::new();
      io::stdin().read_to_string(&mut buffer)?;
      buffer
    }
  };

  let seed: &[Word] = match opts.seed.is_empty() {
    true  => &DEFAULT_SEED[..],
    false => &opts.seed[..]
  };
  info!("Seeding memory with {:?}", seed);

  let program = match Program::assemble(&text) {
    Ok(program) => program,
    Err(invalid) => {
      println!("{}", Report::Invalid(invalid));
      return Ok(());
    }
  };

  let machine = program.execute(seed)?;
  println!("{}", Report::new(machine.snapshot(), program.cycle_cost()));

  if opts.breakdown {
    println!("{}", program.cost_breakdown());
  }
  if opts.show_state {
    println!("{}", machine);
  }
  Ok(())
}
