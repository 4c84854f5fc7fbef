/*!
  The cycle cost model.

  Every opcode has a fixed base cost. An instruction that names a register outside the fast
  window (index 8 or above) in any operand slot pays double. The cost of a program is the sum
  over its instructions, and is undefined, `None`, as soon as a compile error instruction
  appears anywhere in it.

  The cost is a static property of the instruction list. It does not run the program, so
  it is unaffected by where a compile error would stop execution.
*/

use std::fmt::{Display, Formatter};

use prettytable::Table;

use crate::bytecode::{Instruction, Operation};
use crate::table::TABLE_DISPLAY_FORMAT;

pub type Cycles = u64;

/// Multiplier applied to an instruction that touches a high register.
pub const HIGH_REGISTER_PENALTY: Cycles = 2;

impl Operation {
  /// `None` for the compile error sentinel, which has no cost.
  pub fn base_cost(&self) -> Option<Cycles> {
    match self {
      Operation::Add          => Some(10),
      Operation::Sub          => Some(10),
      Operation::Mul          => Some(30),
      Operation::Div          => Some(50),
      Operation::Rem          => Some(60),
      Operation::Store        => Some(200),
      Operation::Load         => Some(200),
      Operation::CompileError => None,
    }
  }
}

pub fn instruction_cost(instruction: &Instruction) -> Option<Cycles> {
  let base = instruction.operation().base_cost()?;
  match instruction.uses_high_register() {
    true  => Some(base * HIGH_REGISTER_PENALTY),
    false => Some(base)
  }
}

/// Total cost of `program`, or `None` if it contains a compile error instruction.
pub fn cycle_cost(program: &[Instruction]) -> Option<Cycles> {
  program.iter().map(instruction_cost).sum()
}


/// One line of a `CostBreakdown`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CostEntry {
  pub instruction : Instruction,
  pub base        : Option<Cycles>,
  pub penalized   : bool,
  pub cost        : Option<Cycles>,
}

/// Per-instruction costs of a program, for display.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CostBreakdown {
  entries : Vec<CostEntry>,
  total   : Option<Cycles>,
}

impl CostBreakdown {
  pub fn new(program: &[Instruction]) -> CostBreakdown {
    let entries =
      program.iter()
             .map(|instruction| {
               CostEntry {
                 instruction : *instruction,
                 base        : instruction.operation().base_cost(),
                 penalized   : instruction.uses_high_register(),
                 cost        : instruction_cost(instruction),
               }
             })
             .collect::<Vec<CostEntry>>();
    let total = entries.iter().map(|entry| entry.cost).sum();

    CostBreakdown { entries, total }
  }

  pub fn entries(&self) -> &[CostEntry] {
    &self.entries
  }

  /// Same as `cycle_cost` of the program.
  pub fn total(&self) -> Option<Cycles> {
    self.total
  }
}

fn cycles_to_string(cycles: Option<Cycles>) -> String {
  match cycles {
    Some(cycles) => cycles.to_string(),
    None         => "undefined".to_string()
  }
}

impl Display for CostBreakdown {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mut table = Table::new();

    table.set_format(*TABLE_DISPLAY_FORMAT);
    table.set_titles(row![ubr->"#", ubl->"Instruction", ubr->"Base", ubc->"x2", ubr->"Cycles"]);

    for (i, entry) in self.entries.iter().enumerate() {
      table.add_row(row![
        r->i + 1,
        entry.instruction,
        r->cycles_to_string(entry.base),
        c->if entry.penalized { "*" } else { "" },
        r->cycles_to_string(entry.cost)
      ]);
    }
    table.add_row(row![r->"", b->"Total", r->"", c->"", br->cycles_to_string(self.total)]);

    write!(f, "{}", table)
  }
}
