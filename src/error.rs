//! Errors raised while decoding and running programs.
//!
//! Decoding failures are ordinary results of reading untrusted text. `MachineError`s are faults
//! of a program that decoded fine but cannot run to completion.

use thiserror::Error;

use crate::operand::OperandKind;

/// Why a line failed to decode.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum DecodeError {
  /// The line matches none of the instruction forms.
  #[error("`{line}` is not an instruction")]
  Unrecognized { line: String },
  /// The line has a valid shape but names a value outside `[0, 256)`.
  #[error("{kind} operand {literal} is outside [0, 256)")]
  OutOfRange { kind: OperandKind, literal: String },
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum MachineError {
  /// `div` or `rem` with a zero divisor. `position` is the 0-based instruction index.
  #[error("division by zero in instruction {position}")]
  DivisionByZero { position: usize },
  /// A word access that would run past the end of memory.
  #[error("word access at byte offset {offset} runs past the end of memory")]
  MemoryOutOfBounds { offset: usize },
}

/// Failures of the command line driver.
#[derive(Debug, Error)]
pub enum DriverError {
  #[error("could not read program text: {0}")]
  Io(#[from] std::io::Error),
  #[error(transparent)]
  Machine(#[from] MachineError),
  #[error("could not initialize logging: {0}")]
  Logger(#[from] log::SetLoggerError),
}
