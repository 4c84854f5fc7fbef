//! The register/memory machine that executes decoded programs.
//!
//! A `Machine` owns one register file and one memory; nothing is shared between runs, so two
//! evaluations of the same program and seed always agree.

mod registers;
mod memory;

pub use registers::{RegisterFile, REGISTER_COUNT};
pub use memory::{decode_word, encode_word, Memory, MEMORY_SIZE, WORD_SIZE};

use std::fmt::{Display, Formatter};

use log::debug;
#[cfg(feature = "trace_computation")]
use log::{log_enabled, trace, Level};

use crate::bytecode::{Instruction, Operation};
use crate::error::MachineError;
use crate::operand::Operand;
use crate::table::{make_word_table, TABLE_DISPLAY_FORMAT};

/// The machine word held by registers and memory.
pub type Word = i32;

/// The words at offsets 0, 4 and 8 at the end of a run.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Snapshot {
  pub x: Word,
  pub y: Word,
  pub z: Word,
}

impl Display for Snapshot {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    write!(f, "x, y, z = {}, {}, {}", self.x, self.y, self.z)
  }
}

/// What the machine does after an instruction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Flow {
  Continue,
  Halt,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Machine {
  registers : RegisterFile,
  memory    : Memory,

  executed  : usize, // Number of instructions executed, a cursor into the program
  halted    : bool,  // Set by a compile error instruction
}

/// Runs `program` on a fresh machine whose memory is seeded with `seed`.
pub fn evaluate(program: &[Instruction], seed: &[Word]) -> Result<Snapshot, MachineError> {
  let mut machine = Machine::new();
  machine.seed(seed)?;
  machine.run(program)
}

impl Machine {

  // region Low-level utility methods

  pub fn new() -> Machine {
    Machine {
      registers : RegisterFile::new(),
      memory    : Memory::new(),
      executed  : 0,
      halted    : false,
    }
  }

  /// Writes the initial words at offsets 0, 4, 8, ... in order.
  pub fn seed(&mut self, values: &[Word]) -> Result<(), MachineError> {
    self.memory.seed(values)
  }

  /// Returns the machine to its freshly built state.
  pub fn reset(&mut self) {
    self.registers.reset();
    self.memory.reset();
    self.executed = 0;
    self.halted   = false;
  }

  pub fn registers(&self) -> &RegisterFile {
    &self.registers
  }

  pub fn memory(&self) -> &Memory {
    &self.memory
  }

  pub fn executed(&self) -> usize {
    self.executed
  }

  pub fn is_halted(&self) -> bool {
    self.halted
  }

  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      x: self.memory.word_at(0),
      y: self.memory.word_at(WORD_SIZE),
      z: self.memory.word_at(2 * WORD_SIZE),
    }
  }

  /// The value an operand denotes in the current state.
  fn resolve(&self, operand: Operand) -> Result<Word, MachineError> {
    match operand {
      Operand::Register(index)  => Ok(self.registers.read(index)),
      Operand::Memory(offset)   => self.memory.read_word(offset as usize),
      Operand::Immediate(value) => Ok(value as Word),
    }
  }

  // endregion

  // region Interpretation

  /**
    Executes every instruction of `program` in order, stopping early at a compile error
    instruction. Either way the result is the snapshot of the first three memory words.

    A machine that has already halted executes nothing more.
  */
  pub fn run(&mut self, program: &[Instruction]) -> Result<Snapshot, MachineError> {
    for instruction in program {
      if let Flow::Halt = self.step(instruction)? {
        break;
      }
    }

    debug!(
      "Executed {} of {} instructions{}: {}",
      self.executed,
      program.len(),
      if self.halted { ", halted on compile error" } else { "" },
      self.snapshot()
    );
    Ok(self.snapshot())
  }

  /// Executes a single instruction.
  pub fn step(&mut self, instruction: &Instruction) -> Result<Flow, MachineError> {
    if self.halted {
      return Ok(Flow::Halt);
    }

    let flow =
      match *instruction {

        Instruction::Arithmetic { operation, destination, left, right } => {
          let left  = self.resolve(left)?;
          let right = self.resolve(right)?;
          let value = self.apply(operation, left, right)?;
          self.registers.write(destination, value);
          Flow::Continue
        }

        Instruction::Load { destination, offset } => {
          let value = self.resolve(Operand::Memory(offset))?;
          self.registers.write(destination, value);
          Flow::Continue
        }

        Instruction::Store { offset, source } => {
          let value = self.resolve(Operand::Register(source))?;
          self.memory.write_word(offset as usize, value)?;
          Flow::Continue
        }

        Instruction::CompileError => {
          self.halted = true;
          Flow::Halt
        }

      };
    self.executed += 1;

    #[cfg(feature = "trace_computation")]
      {
        if log_enabled!(Level::Trace) {
          trace!("{}\n{}", instruction, self);
        }
      }

    Ok(flow)
  }

  /**
    Computes `left <operation> right` with 32 bit two's complement wrapping. Division
    truncates toward zero and the remainder takes the sign of the dividend, so that
    `(left / right) * right + left % right == left`.

    Panics if `operation` is not arithmetic; the decoder never builds such an instruction.
  */
  fn apply(&self, operation: Operation, left: Word, right: Word) -> Result<Word, MachineError> {
    let value =
      match operation {
        Operation::Add => left.wrapping_add(right),
        Operation::Sub => left.wrapping_sub(right),
        Operation::Mul => left.wrapping_mul(right),

        | Operation::Div
        | Operation::Rem if right == 0 => {
          return Err(MachineError::DivisionByZero { position: self.executed });
        }

        Operation::Div => left.wrapping_div(right),
        Operation::Rem => left.wrapping_rem(right),

        _ => unreachable!("`{}` is not an arithmetic operation", operation)
      };
    Ok(value)
  }

  // endregion

}

impl Default for Machine {
  fn default() -> Self {
    Machine::new()
  }
}

impl Display for Machine {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let r_table = make_word_table(
      self.registers.nonzero().map(|(i, value)| (format!("r{}", i), value))
    );
    let m_table = make_word_table(
      self.memory.nonzero_words().map(|(offset, value)| (format!("[{}]", offset), value))
    );

    let mut combined_table = table!([r_table, m_table]);

    combined_table.set_titles(row![ub->"Registers", ub->"Memory"]);
    combined_table.set_format(*TABLE_DISPLAY_FORMAT);

    let status = match self.halted {
      true  => "Halted on compile error.",
      false => "Running."
    };

    write!(f, "Executed: {}\t{}\n{}", self.executed, status, combined_table)
  }
}
