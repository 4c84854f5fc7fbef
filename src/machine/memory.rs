/*!
  Byte-addressed memory accessed in words.

  A word is stored as the `WORD_SIZE` bytes of its host-native representation, starting at
  any byte offset. Words may overlap: writing at offset 2 changes the words read back at
  offsets 0 and 4. `encode_word` and `decode_word` are the only two places that know the
  layout, so reads and writes always agree.
*/

use crate::error::MachineError;
use super::Word;

pub const MEMORY_SIZE: usize = 256;
pub const WORD_SIZE: usize = std::mem::size_of::<Word>();

/// Lays out a word as bytes in host byte order.
pub fn encode_word(word: Word) -> [u8; WORD_SIZE] {
  word.to_ne_bytes()
}

/// Inverse of `encode_word`.
pub fn decode_word(bytes: [u8; WORD_SIZE]) -> Word {
  Word::from_ne_bytes(bytes)
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Memory {
  bytes: [u8; MEMORY_SIZE]
}

impl Memory {
  pub fn new() -> Memory {
    Memory {
      bytes: [0; MEMORY_SIZE]
    }
  }

  pub fn read_word(&self, offset: usize) -> Result<Word, MachineError> {
    Memory::check_bounds(offset)?;
    Ok(self.word_at(offset))
  }

  pub fn write_word(&mut self, offset: usize, word: Word) -> Result<(), MachineError> {
    Memory::check_bounds(offset)?;
    self.bytes[offset..offset + WORD_SIZE].copy_from_slice(&encode_word(word));
    Ok(())
  }

  /// Writes `values` as consecutive words from offset 0. Everything else is left untouched.
  pub fn seed(&mut self, values: &[Word]) -> Result<(), MachineError> {
    for (i, value) in values.iter().enumerate() {
      self.write_word(i * WORD_SIZE, *value)?;
    }
    Ok(())
  }

  pub fn reset(&mut self) {
    self.bytes = [0; MEMORY_SIZE];
  }

  /// `(offset, value)` for every word-aligned word that is not zero.
  pub fn nonzero_words(&self) -> impl Iterator<Item = (usize, Word)> + '_ {
    (0..MEMORY_SIZE).step_by(WORD_SIZE)
                    .map(move |offset| (offset, self.word_at(offset)))
                    .filter(|(_, value)| *value != 0)
  }

  /// The caller guarantees `offset + WORD_SIZE <= MEMORY_SIZE`.
  pub(crate) fn word_at(&self, offset: usize) -> Word {
    let mut bytes = [0u8; WORD_SIZE];
    bytes.copy_from_slice(&self.bytes[offset..offset + WORD_SIZE]);
    decode_word(bytes)
  }

  fn check_bounds(offset: usize) -> Result<(), MachineError> {
    match offset.checked_add(WORD_SIZE) {
      Some(end) if end <= MEMORY_SIZE => Ok(()),
      _ => Err(MachineError::MemoryOutOfBounds { offset })
    }
  }
}

impl Default for Memory {
  fn default() -> Self {
    Memory::new()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn words_survive_encoding(){
    for word in &[0, 1, -1, 0x1234_5678, i32::min_value(), i32::max_value()] {
      assert_eq!(decode_word(encode_word(*word)), *word);
    }
  }

  #[test]
  fn seed_fills_leading_words(){
    let mut memory = Memory::new();
    memory.seed(&[2, 3, 5]).unwrap();
    assert_eq!(memory.read_word(0), Ok(2));
    assert_eq!(memory.read_word(4), Ok(3));
    assert_eq!(memory.read_word(8), Ok(5));
    assert_eq!(memory.read_word(12), Ok(0));
  }

  #[test]
  fn partial_seed(){
    let mut memory = Memory::new();
    memory.seed(&[-9]).unwrap();
    assert_eq!(memory.read_word(0), Ok(-9));
    assert_eq!(memory.read_word(4), Ok(0));
    assert_eq!(memory.read_word(8), Ok(0));
  }

  #[test]
  fn seed_fills_all_of_memory_and_no_more(){
    let mut memory = Memory::new();
    assert_eq!(memory.seed(&[7; 64]), Ok(()));
    assert_eq!(memory.read_word(252), Ok(7));

    let mut memory = Memory::new();
    assert_eq!(memory.seed(&[7; 65]), Err(MachineError::MemoryOutOfBounds { offset: 256 }));
  }

  #[test]
  fn unaligned_words_overlap(){
    let mut memory = Memory::new();
    memory.write_word(2, -1).unwrap();
    assert_eq!(memory.read_word(2), Ok(-1));
    // Two of the four 0xFF bytes land in each neighbouring word.
    assert_ne!(memory.read_word(0), Ok(0));
    assert_ne!(memory.read_word(4), Ok(0));
    assert_eq!(memory.read_word(8), Ok(0));
  }

  #[test]
  fn last_word_and_past_the_end(){
    let mut memory = Memory::new();
    assert_eq!(memory.write_word(252, 7), Ok(()));
    assert_eq!(memory.read_word(252), Ok(7));
    assert_eq!(memory.read_word(253), Err(MachineError::MemoryOutOfBounds { offset: 253 }));
    assert_eq!(memory.write_word(255, 1), Err(MachineError::MemoryOutOfBounds { offset: 255 }));
    assert_eq!(memory.read_word(usize::max_value()),
               Err(MachineError::MemoryOutOfBounds { offset: usize::max_value() }));
  }

  #[test]
  fn nonzero_words_and_reset(){
    let mut memory = Memory::new();
    memory.seed(&[1, 0, 3]).unwrap();
    assert_eq!(memory.nonzero_words().collect::<Vec<_>>(), vec![(0, 1), (8, 3)]);
    memory.reset();
    assert_eq!(memory, Memory::new());
  }
}
