/*!
  A miniature register/memory machine for a tiny assembly language.

  ```text
  text lines -> [`bytecode::decode`] -> `Instruction`s -> [`machine::evaluate`] -> `Snapshot`
                                                      \-> [`cost::cycle_cost`]  -> cycles
  ```

  The evaluator and the cost model work independently on the same, fully decoded program.
  `driver` ties the pieces together the way the command line tool uses them.
*/

#[macro_use] extern crate prettytable;
#[macro_use] extern crate lazy_static;

pub mod operand;
pub mod bytecode;
pub mod machine;
pub mod cost;
pub mod driver;
pub mod error;
mod table;

pub use bytecode::{decode, Instruction, Operation};
pub use cost::{cycle_cost, Cycles};
pub use driver::{run, Program, Report, DEFAULT_SEED};
pub use error::{DecodeError, DriverError, MachineError};
pub use machine::{evaluate, Machine, Snapshot, Word};
pub use operand::{Index, Operand};
