use crate::operand::Index;
use super::Word;

pub const REGISTER_COUNT: usize = Index::max_value() as usize + 1;

/// A bank of `REGISTER_COUNT` word registers, all zero initially.
///
/// Register indices are `Index`es, so every index addresses a register and no bounds check is
/// needed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisterFile {
  values: [Word; REGISTER_COUNT]
}

impl RegisterFile {
  pub fn new() -> RegisterFile {
    RegisterFile {
      values: [0; REGISTER_COUNT]
    }
  }

  pub fn read(&self, index: Index) -> Word {
    self.values[index as usize]
  }

  pub fn write(&mut self, index: Index, value: Word) {
    self.values[index as usize] = value;
  }

  pub fn reset(&mut self) {
    self.values = [0; REGISTER_COUNT];
  }

  /// `(index, value)` for every register holding something other than zero.
  pub fn nonzero(&self) -> impl Iterator<Item = (usize, Word)> + '_ {
    self.values
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, value)| *value != 0)
  }
}

impl Default for RegisterFile {
  fn default() -> Self {
    RegisterFile::new()
  }
}
