//! Shared `prettytable` styling for the machine state and cost breakdown displays.

use prettytable::{format as TableFormat, Table};

use crate::machine::Word;

lazy_static! {
  pub static ref TABLE_DISPLAY_FORMAT: TableFormat::TableFormat =
    TableFormat::FormatBuilder::new()
      .column_separator('│')
      .borders(' ')
      .separator(
        TableFormat::LinePosition::Title,
        TableFormat::LineSeparator::new('─', '┼', ' ', ' ')
      )
      .separator(
        TableFormat::LinePosition::Bottom,
        TableFormat::LineSeparator::new('─', '┴', ' ', ' ')
      )
      .padding(1, 1)
      .build();
}

/// A two column table of labelled words. An empty table gets a single placeholder row so
/// that it still lines up next to its neighbours.
pub fn make_word_table<I>(entries: I) -> Table
  where I: Iterator<Item = (String, Word)>
{
  let mut table = Table::new();

  table.set_format(*TABLE_DISPLAY_FORMAT);
  table.set_titles(row![ubr->"Address", ubl->"Contents"]);

  let mut empty = true;
  for (label, word) in entries {
    table.add_row(row![r->format!("{} =", label), word]);
    empty = false;
  }

  if empty {
    table.add_row(row![r->"(all zero)", ""]);
  }
  table
}
