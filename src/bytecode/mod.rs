/*!

  Instructions are kept in the decoded form only; there is no binary encoding. Each line of
  assembly decodes to one `Instruction`, which is immutable once built and is consumed by both
  the evaluator and the cost model.

  The assembly language has three line shapes plus one sentinel:

    ```text
    <arith>  r<d> <src> <src>     where <arith> is add | sub | mul | div | rem
                                  and <src> is r<n> | <n>
    load     r<d> [<offset>]
    store    [<offset>] r<s>
    Compile Error!
    ```

  Every number is a decimal literal in `[0, 256)`. A line naming a larger value matches the
  grammar but is still rejected.

  One design decision that needed to be made is whether to keep the opcode and a positional
  operand array, or to store the arguments as data members of enum variants, one variant per
  instruction shape. The variants win here: a `CompileError` carrying operands, or a `Load`
  whose source is a register, simply cannot be built. The positional view is still available
  through `Instruction::operands()` for code that only cares about operand kinds.

*/

mod instruction;
mod assembly;

pub use instruction::{Instruction, Operands};
pub use assembly::{decode, COMPILE_ERROR_SENTINEL};

use strum_macros::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/**
  Opcodes of the machine.

  The strum serializations are the assembly mnemonics, so `Operation::from_str("mul")` and
  `Operation::Mul.to_string()` convert between the two. `CompileError` serializes to the
  sentinel line itself.
*/
#[derive(
  StrumDisplay, IntoStaticStr, EnumString, EnumIter,
  Clone,        Copy,          Eq, PartialEq,  Debug,  Hash
)]
pub enum Operation {
  // Arithmetic: r<d> <- src <op> src //
  #[strum(serialize = "add")]
  Add,
  #[strum(serialize = "sub")]
  Sub,
  #[strum(serialize = "mul")]
  Mul,
  #[strum(serialize = "div")]
  Div,
  #[strum(serialize = "rem")]
  Rem,

  // Memory transfer //
  #[strum(serialize = "store")]
  Store,             // store [offset] r<s>
  #[strum(serialize = "load")]
  Load,              // load r<d> [offset]

  // Sentinel //
  #[strum(serialize = "Compile Error!")]
  CompileError,
}

impl Operation {
  pub fn is_arithmetic(&self) -> bool {
    match self {
      | Operation::Add
      | Operation::Sub
      | Operation::Mul
      | Operation::Div
      | Operation::Rem => true,
      _ => false
    }
  }

  /// The mnemonic as written in assembly.
  pub fn mnemonic(&self) -> &'static str {
    (*self).into()
  }
}


#[cfg(test)]
mod tests {
  use super::*;
  use std::str::FromStr;
  use strum::IntoEnumIterator;

  #[test]
  fn mnemonics_parse_back(){
    for operation in Operation::iter() {
      assert_eq!(Operation::from_str(operation.mnemonic()), Ok(operation));
    }
  }

  #[test]
  fn mnemonics_are_case_sensitive(){
    assert!(Operation::from_str("ADD").is_err());
    assert!(Operation::from_str("Load").is_err());
  }

  #[test]
  fn arithmetic_opcodes(){
    let arithmetic: Vec<Operation> = Operation::iter().filter(Operation::is_arithmetic).collect();
    assert_eq!(
      arithmetic,
      vec![Operation::Add, Operation::Sub, Operation::Mul, Operation::Div, Operation::Rem]
    );
  }
}
