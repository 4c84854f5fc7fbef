use std::fmt::{Display, Formatter};

use crate::operand::{Index, Operand};
use super::Operation;

/// The positional view of an instruction: destination first, unused slots are `None`.
pub type Operands = [Option<Operand>; 3];

/// Holds the decoded components of an instruction. As such, it enumerates the possible
/// instruction shapes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Instruction {
  /// `<op> r<destination> <left> <right>`. The operation is one of the arithmetic opcodes and
  /// each source is a register or an immediate.
  Arithmetic {
    operation   : Operation,
    destination : Index,
    left        : Operand,
    right       : Operand
  },
  /// `load r<destination> [<offset>]`
  Load {
    destination : Index,
    offset      : Index
  },
  /// `store [<offset>] r<source>`
  Store {
    offset : Index,
    source : Index
  },
  /// The compile error sentinel. Halts evaluation and makes the cycle cost undefined.
  CompileError,
}

impl Instruction {
  pub fn operation(&self) -> Operation {
    match self {
      Instruction::Arithmetic { operation, .. } => *operation,
      Instruction::Load { .. }                  => Operation::Load,
      Instruction::Store { .. }                 => Operation::Store,
      Instruction::CompileError                 => Operation::CompileError,
    }
  }

  pub fn operands(&self) -> Operands {
    match self {

      Instruction::Arithmetic { destination, left, right, .. } => {
        [Some(Operand::Register(*destination)), Some(*left), Some(*right)]
      }

      Instruction::Load { destination, offset } => {
        [Some(Operand::Register(*destination)), Some(Operand::Memory(*offset)), None]
      }

      Instruction::Store { offset, source } => {
        [Some(Operand::Memory(*offset)), Some(Operand::Register(*source)), None]
      }

      Instruction::CompileError => [None, None, None]

    }
  }

  /// Whether any operand addresses a register outside the fast window.
  pub fn uses_high_register(&self) -> bool {
    self.operands()
        .iter()
        .flatten()
        .any(Operand::is_high_register)
  }
}

impl Display for Instruction {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {

      Instruction::CompileError => {
        write!(f, "{}", Operation::CompileError)
      }

      instruction => {
        let operands = instruction.operands()
                                  .iter()
                                  .flatten()
                                  .map(Operand::to_string)
                                  .collect::<Vec<String>>()
                                  .join(" ");
        write!(f, "{} {}", instruction.operation(), operands)
      }

    }
  }
}
