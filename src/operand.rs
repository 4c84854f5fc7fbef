//! An operand holds the index of either a register or a memory word, or an immediate value,
//! with some convenience functions.

use std::fmt::{Display, Formatter};

use strum_macros::Display as StrumDisplay;

/// Every operand payload lies in `[0, 256)`, so the index type is exactly a byte. A literal
/// that does not fit is rejected by the decoder.
pub type Index = u8;

/// Registers at or above this index are outside the fast register window.
pub const FAST_REGISTER_COUNT: Index = 8;

#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum Operand {
  /// An index into the register file.
  Register(Index),
  /// A byte offset into memory, addressing the word that starts there.
  Memory(Index),
  /// A literal value.
  Immediate(Index),
}

/// The kind of an operand without its payload. Used in diagnostics.
#[derive(StrumDisplay, Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperandKind {
  #[strum(serialize = "register")]
  Register,
  #[strum(serialize = "memory")]
  Memory,
  #[strum(serialize = "immediate")]
  Immediate,
}

impl Operand {
  /// The raw payload, regardless of kind.
  pub fn index(&self) -> Index {
    match self {
      | Operand::Register(i)
      | Operand::Memory(i)
      | Operand::Immediate(i) => *i
    }
  }

  pub fn kind(&self) -> OperandKind {
    match self {
      Operand::Register(_)  => OperandKind::Register,
      Operand::Memory(_)    => OperandKind::Memory,
      Operand::Immediate(_) => OperandKind::Immediate,
    }
  }

  pub fn is_register(&self) -> bool {
    match self {
      Operand::Register(_) => true,
      _ => false
    }
  }

  /// True for a register operand addressing beyond the fast register window.
  pub fn is_high_register(&self) -> bool {
    match self {
      Operand::Register(i) => *i >= FAST_REGISTER_COUNT,
      _ => false
    }
  }
}


impl Display for Operand {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Operand::Register(i) => {
        write!(f, "r{}", i)
      },
      Operand::Memory(i) => {
        write!(f, "[{}]", i)
      },
      Operand::Immediate(i) => {
        write!(f, "{}", i)
      }
    }
  }
}
