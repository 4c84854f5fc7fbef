//! Turns program text into a report: decode every line, then evaluate and price the result.
//!
//! Decoding finishes, and must succeed for every line, before anything runs. A single bad line
//! anywhere means neither the evaluator nor the cost model ever see the program.

use std::fmt::{Display, Formatter};

use log::{debug, info};
use thiserror::Error;

use crate::bytecode::{decode, Instruction};
use crate::cost::{cycle_cost, CostBreakdown, Cycles};
use crate::error::{DecodeError, MachineError};
use crate::machine::{Machine, Snapshot, Word};

/// The initial memory words when none are given.
pub const DEFAULT_SEED: [Word; 3] = [2, 3, 5];

/// The first line of a program that failed to decode.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("line {line}: {error}")]
pub struct InvalidLine {
  /// 1-based.
  pub line  : usize,
  pub error : DecodeError,
}

/// A fully decoded program.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Program {
  instructions: Vec<Instruction>
}

/// The outcome of a program, in the form printed for the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Report {
  Completed {
    snapshot : Snapshot,
    cycles   : Cycles
  },
  /// The program holds a compile error instruction, so it has no cycle cost. The memory as of
  /// the point execution stopped is still known.
  CompileError {
    snapshot : Snapshot
  },
  Invalid(InvalidLine),
}

impl Report {
  /// The report for a program that decoded and ran; no cost means a compile error.
  pub fn new(snapshot: Snapshot, cycles: Option<Cycles>) -> Report {
    match cycles {
      Some(cycles) => Report::Completed { snapshot, cycles },
      None         => Report::CompileError { snapshot }
    }
  }
}

impl Program {
  /// Decodes `lines` in order, stopping at the first one that fails.
  pub fn from_lines<'a, I>(lines: I) -> Result<Program, InvalidLine>
    where I: IntoIterator<Item = &'a str>
  {
    let mut instructions = vec![];

    for (i, text) in lines.into_iter().enumerate() {
      match decode(text) {

        Ok(instruction) => {
          instructions.push(instruction);
        }

        Err(error) => {
          let invalid = InvalidLine { line: i + 1, error };
          info!("Rejected program at {}", invalid);
          return Err(invalid);
        }

      }
    }

    debug!("Decoded {} instructions", instructions.len());
    Ok(Program { instructions })
  }

  /// Decodes program text with one instruction per line.
  pub fn assemble(text: &str) -> Result<Program, InvalidLine> {
    // `lines` also strips a `\r` before each `\n`, so CRLF text decodes like LF text.
    Program::from_lines(text.lines())
  }

  pub fn instructions(&self) -> &[Instruction] {
    &self.instructions
  }

  /// Runs the program on a fresh machine seeded with `seed` and hands back the machine in its
  /// final state.
  pub fn execute(&self, seed: &[Word]) -> Result<Machine, MachineError> {
    let mut machine = Machine::new();
    machine.seed(seed)?;
    machine.run(&self.instructions)?;
    Ok(machine)
  }

  pub fn cycle_cost(&self) -> Option<Cycles> {
    cycle_cost(&self.instructions)
  }

  pub fn cost_breakdown(&self) -> CostBreakdown {
    CostBreakdown::new(&self.instructions)
  }

  pub fn report(&self, seed: &[Word]) -> Result<Report, MachineError> {
    let snapshot = self.execute(seed)?.snapshot();
    Ok(Report::new(snapshot, self.cycle_cost()))
  }
}

/// Decodes, runs and prices `text` in one go.
pub fn run(text: &str, seed: &[Word]) -> Result<Report, MachineError> {
  match Program::assemble(text) {
    Ok(program)  => program.report(seed),
    Err(invalid) => Ok(Report::Invalid(invalid))
  }
}

impl Display for Report {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Report::Completed { snapshot, cycles } => {
        write!(f, "{}\nTotal cycle = {}", snapshot, cycles)
      }

      Report::CompileError { .. } => {
        write!(f, "CE instruction found.")
      }

      Report::Invalid(invalid) => {
        write!(f, "Instruction invalid at line: {}.", invalid.line)
      }

    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn load_add_store_scenario(){
    let text = "load r0 [0]\nload r1 [4]\nadd r2 r0 r1\nstore [0] r2\n";
    let report = run(text, &DEFAULT_SEED).unwrap();
    assert_eq!(
      report,
      Report::Completed { snapshot: Snapshot { x: 5, y: 3, z: 5 }, cycles: 610 }
    );
    assert_eq!(report.to_string(), "x, y, z = 5, 3, 5\nTotal cycle = 610");
  }

  #[test]
  fn high_register_scenario(){
    let report = run("mul r10 2 3", &DEFAULT_SEED).unwrap();
    assert_eq!(
      report,
      Report::Completed { snapshot: Snapshot { x: 2, y: 3, z: 5 }, cycles: 60 }
    );
  }

  #[test]
  fn first_invalid_line_is_reported(){
    let report = run("add r0 5 3\nfoo bar\nadd r1 1 1", &DEFAULT_SEED).unwrap();
    assert_eq!(
      report,
      Report::Invalid(InvalidLine {
        line  : 2,
        error : DecodeError::Unrecognized { line: "foo bar".to_string() }
      })
    );
    assert_eq!(report.to_string(), "Instruction invalid at line: 2.");
  }

  #[test]
  fn invalid_line_stops_before_execution(){
    // The division by zero on line 1 never runs.
    let report = run("div r0 1 0\nadd r0 300 1", &DEFAULT_SEED).unwrap();
    match report {
      Report::Invalid(InvalidLine { line, .. }) => assert_eq!(line, 2),
      other => panic!("unexpected report {:?}", other)
    }
  }

  #[test]
  fn decoding_stops_at_first_invalid_line(){
    let lines = vec!["add r0 1 1", "store [0] r999", "bogus"];
    assert_eq!(
      Program::from_lines(lines),
      Err(InvalidLine {
        line  : 2,
        error : DecodeError::OutOfRange {
          kind    : crate::operand::OperandKind::Register,
          literal : "999".to_string()
        }
      })
    );
  }

  #[test]
  fn compile_error_report_keeps_snapshot(){
    let report = run("add r0 7 0\nstore [8] r0\nCompile Error!\nstore [0] r0", &DEFAULT_SEED).unwrap();
    assert_eq!(report, Report::CompileError { snapshot: Snapshot { x: 2, y: 3, z: 7 } });
    assert_eq!(report.to_string(), "CE instruction found.");
  }

  #[test]
  fn machine_faults_are_errors(){
    assert_eq!(
      run("div r0 1 0", &DEFAULT_SEED),
      Err(MachineError::DivisionByZero { position: 0 })
    );
  }

  #[test]
  fn empty_program(){
    let program = Program::assemble("").unwrap();
    assert!(program.instructions().is_empty());
    assert_eq!(
      program.report(&DEFAULT_SEED),
      Ok(Report::Completed { snapshot: Snapshot { x: 2, y: 3, z: 5 }, cycles: 0 })
    );
  }

  #[test]
  fn windows_line_endings(){
    let program = Program::assemble("add r0 1 1\r\nstore [0] r0\r\n").unwrap();
    assert_eq!(program.instructions().len(), 2);
    // A lone carriage return is still part of the line.
    assert_eq!(
      Program::from_lines(vec!["add r0 1 1\r"]),
      Err(InvalidLine {
        line  : 1,
        error : DecodeError::Unrecognized { line: "add r0 1 1\r".to_string() }
      })
    );
  }

  #[test]
  fn reports_are_repeatable(){
    let program = Program::assemble("load r3 [8]\nrem r4 r3 3\nstore [4] r4").unwrap();
    assert_eq!(program.report(&[1, 0, 11]), program.report(&[1, 0, 11]));
    assert_eq!(
      program.report(&[1, 0, 11]),
      Ok(Report::Completed { snapshot: Snapshot { x: 1, y: 2, z: 11 }, cycles: 460 })
    );
  }
}
