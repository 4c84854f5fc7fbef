/*!
  Decodes one line of assembly into an `Instruction`.

  The language is given by the following EBNF, where `' '+` is one or more ASCII spaces and
  nothing else may precede or follow the instruction on its line:
    ```text
    <line>        ::=  <arithmetic> | <load> | <store> | 'Compile Error!'
    <arithmetic>  ::=  <arith_op> ' '+ <register> ' '+ <source> ' '+ <source>
    <load>        ::=  'load' ' '+ <register> ' '+ <memory>
    <store>       ::=  'store' ' '+ <memory> ' '+ <register>
    <arith_op>    ::=  'add' | 'sub' | 'mul' | 'div' | 'rem'
    <source>      ::=  <register> | <digits>
    <register>    ::=  'r' <digits>
    <memory>      ::=  '[' <digits> ']'
    ```

  Parsing happens in two passes. The nom grammar only recognizes the shape of the line and
  hands back the digit strings untouched; `ParsedSyntax::validate` then converts them,
  rejecting any value outside `[0, 256)`. This keeps "does not look like an instruction"
  distinct from "looks like one but names a register that does not exist."
*/

use std::str::FromStr;

use nom::{
  branch::alt,
  bytes::complete::{
    tag,
    take_while1
  },
  character::complete::{
    alpha1,
    char as one_char,
    digit1
  },
  combinator::{
    all_consuming,
    map,
    map_res
  },
  error::ErrorKind,
  sequence::{
    delimited,
    preceded,
    tuple
  },
  Err as NomErr,
  IResult
};

use crate::error::DecodeError;
use crate::operand::{Index, Operand, OperandKind};
use super::{Instruction, Operation};

/// The exact line that stands for a compile error upstream.
pub const COMPILE_ERROR_SENTINEL: &str = "Compile Error!";

/// A source operand before range checking.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Source<'a> {
  Register(&'a str),
  Immediate(&'a str),
}

/// A line whose shape is valid, with its numbers still in textual form.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum ParsedSyntax<'a> {
  Arithmetic {
    operation   : Operation,
    destination : &'a str,
    left        : Source<'a>,
    right       : Source<'a>
  },
  Load {
    destination : &'a str,
    offset      : &'a str
  },
  Store {
    offset : &'a str,
    source : &'a str
  },
}


/**
  Decodes a single line of assembly. The line must not include its line terminator.

  This is a pure function of `line`; the caller decides what to do with a failure.
*/
pub fn decode(line: &str) -> Result<Instruction, DecodeError> {
  if line == COMPILE_ERROR_SENTINEL {
    return Ok(Instruction::CompileError);
  }

  match pline(line) {
    Ok((_rest, syntax)) => syntax.validate(),
    Err(_e) => Err(DecodeError::Unrecognized { line: line.to_string() })
  }
}


impl<'a> ParsedSyntax<'a> {
  /// Converts every literal, failing on the first one outside `[0, 256)`.
  fn validate(self) -> Result<Instruction, DecodeError> {
    let instruction =
      match self {

        ParsedSyntax::Arithmetic { operation, destination, left, right } => {
          Instruction::Arithmetic {
            operation,
            destination : parse_index(destination, OperandKind::Register)?,
            left        : left.validate()?,
            right       : right.validate()?
          }
        }

        ParsedSyntax::Load { destination, offset } => {
          Instruction::Load {
            destination : parse_index(destination, OperandKind::Register)?,
            offset      : parse_index(offset, OperandKind::Memory)?
          }
        }

        ParsedSyntax::Store { offset, source } => {
          Instruction::Store {
            offset : parse_index(offset, OperandKind::Memory)?,
            source : parse_index(source, OperandKind::Register)?
          }
        }

      };
    Ok(instruction)
  }
}

impl<'a> Source<'a> {
  fn validate(self) -> Result<Operand, DecodeError> {
    match self {
      Source::Register(digits)  => Ok(Operand::Register(parse_index(digits, OperandKind::Register)?)),
      Source::Immediate(digits) => Ok(Operand::Immediate(parse_index(digits, OperandKind::Immediate)?)),
    }
  }
}

/// `digits` is known to be a nonempty run of ASCII digits, so the only possible failure is a
/// value too large for `Index`.
fn parse_index(digits: &str, kind: OperandKind) -> Result<Index, DecodeError> {
  digits.parse::<Index>()
        .map_err(|_| DecodeError::OutOfRange { kind, literal: digits.to_string() })
}


/// <line> ::= <arithmetic> | <load> | <store>
fn pline(text: &str) -> IResult<&str, ParsedSyntax> {
  all_consuming(
    alt((parithmetic, pload, pstore))
  )(text)
}

/// <arithmetic> ::= <arith_op> ' '+ <register> ' '+ <source> ' '+ <source>
fn parithmetic(text: &str) -> IResult<&str, ParsedSyntax> {
  map(
    tuple((
      parith_op,
      preceded(pgap, pregister),
      preceded(pgap, psource),
      preceded(pgap, psource)
    )),
    |(operation, destination, left, right)| {
      ParsedSyntax::Arithmetic { operation, destination, left, right }
    }
  )(text)
}

/// <load> ::= 'load' ' '+ <register> ' '+ <memory>
fn pload(text: &str) -> IResult<&str, ParsedSyntax> {
  map(
    tuple((
      tag("load"),
      preceded(pgap, pregister),
      preceded(pgap, pmemory)
    )),
    |(_, destination, offset)| ParsedSyntax::Load { destination, offset }
  )(text)
}

/// <store> ::= 'store' ' '+ <memory> ' '+ <register>
fn pstore(text: &str) -> IResult<&str, ParsedSyntax> {
  map(
    tuple((
      tag("store"),
      preceded(pgap, pmemory),
      preceded(pgap, pregister)
    )),
    |(_, offset, source)| ParsedSyntax::Store { offset, source }
  )(text)
}

/**
  <arith_op> ::= 'add' | 'sub' | 'mul' | 'div' | 'rem'

  Leans on the strum `EnumString` derive of `Operation`, then refuses the non-arithmetic
  mnemonics.
*/
fn parith_op(text: &str) -> IResult<&str, Operation> {
  let result: IResult<&str, Operation> = map_res(alpha1, Operation::from_str)(text);
  let (rest, operation) = result?;

  match operation.is_arithmetic() {
    true  => Ok((rest, operation)),
    false => Err(NomErr::Error((text, ErrorKind::Verify)))
  }
}

/// <source> ::= <register> | <digits>
fn psource(text: &str) -> IResult<&str, Source> {
  alt((
    map(pregister, Source::Register),
    map(digit1, Source::Immediate)
  ))(text)
}

/// <register> ::= 'r' <digits>
fn pregister(text: &str) -> IResult<&str, &str> {
  preceded(one_char('r'), digit1)(text)
}

/// <memory> ::= '[' <digits> ']'
fn pmemory(text: &str) -> IResult<&str, &str> {
  delimited(one_char('['), digit1, one_char(']'))(text)
}

/// ' '+. Tabs are not separators.
fn pgap(text: &str) -> IResult<&str, &str> {
  take_while1(|c: char| c == ' ')(text)
}


#[cfg(test)]
mod tests {
  use super::*;

  fn unrecognized(line: &str) -> Result<Instruction, DecodeError> {
    Err(DecodeError::Unrecognized { line: line.to_string() })
  }

  #[test]
  fn arithmetic_with_immediates(){
    assert_eq!(
      decode("add r0 5 3"),
      Ok(Instruction::Arithmetic {
        operation   : Operation::Add,
        destination : 0,
        left        : Operand::Immediate(5),
        right       : Operand::Immediate(3)
      })
    );
  }

  #[test]
  fn arithmetic_with_registers(){
    assert_eq!(
      decode("add r0 r1 r2"),
      Ok(Instruction::Arithmetic {
        operation   : Operation::Add,
        destination : 0,
        left        : Operand::Register(1),
        right       : Operand::Register(2)
      })
    );
    assert_eq!(
      decode("rem r255 r3 17"),
      Ok(Instruction::Arithmetic {
        operation   : Operation::Rem,
        destination : 255,
        left        : Operand::Register(3),
        right       : Operand::Immediate(17)
      })
    );
  }

  #[test]
  fn load_and_store(){
    assert_eq!(decode("load r9 [4]"), Ok(Instruction::Load { destination: 9, offset: 4 }));
    assert_eq!(decode("store [8] r3"), Ok(Instruction::Store { offset: 8, source: 3 }));
  }

  #[test]
  fn compile_error_sentinel(){
    assert_eq!(decode("Compile Error!"), Ok(Instruction::CompileError));
    assert_eq!(decode("compile error!"), unrecognized("compile error!"));
    assert_eq!(decode("Compile Error! "), unrecognized("Compile Error! "));
  }

  #[test]
  fn runs_of_spaces_separate_tokens(){
    assert_eq!(decode("mul   r1    2  r0"), decode("mul r1 2 r0"));
    assert_eq!(decode("load  r1   [0]"), Ok(Instruction::Load { destination: 1, offset: 0 }));
  }

  #[test]
  fn out_of_range_literals(){
    assert_eq!(
      decode("add r0 300 1"),
      Err(DecodeError::OutOfRange { kind: OperandKind::Immediate, literal: "300".to_string() })
    );
    assert_eq!(
      decode("sub r256 1 1"),
      Err(DecodeError::OutOfRange { kind: OperandKind::Register, literal: "256".to_string() })
    );
    assert_eq!(
      decode("load r0 [256]"),
      Err(DecodeError::OutOfRange { kind: OperandKind::Memory, literal: "256".to_string() })
    );
    assert_eq!(
      decode("store [0] r99999999999999999999999"),
      Err(DecodeError::OutOfRange {
        kind    : OperandKind::Register,
        literal : "99999999999999999999999".to_string()
      })
    );
  }

  #[test]
  fn boundary_values_are_accepted(){
    assert_eq!(decode("store [255] r255"), Ok(Instruction::Store { offset: 255, source: 255 }));
    assert_eq!(
      decode("div r0 255 r007"),
      Ok(Instruction::Arithmetic {
        operation   : Operation::Div,
        destination : 0,
        left        : Operand::Immediate(255),
        right       : Operand::Register(7)
      })
    );
  }

  #[test]
  fn malformed_lines(){
    for line in &[
      "",
      "foo bar",
      "add r0 5",                // Too few operands
      "add r0 5 3 1",            // Too many operands
      "add 5 r1 r2",             // Destination must be a register
      "ADD r0 1 2",              // Mnemonics are lower case
      " add r0 1 2",             // Leading space
      "add r0 1 2 ",             // Trailing space
      "add\tr0 1 2",             // Tabs do not separate
      "add r0 -1 2",             // No signed literals
      "add r0 [4] 2",            // No memory sources in arithmetic
      "load r0 4",               // Load source must be memory
      "load [4] r0",             // Operands reversed
      "load r0 [ 4 ]",           // No spaces inside brackets
      "store r3 [8]",            // Operands reversed
      "store [8] 3",             // Store source must be a register
      "loadr0 [4]",
      "addr0 1 2",
    ] {
      assert_eq!(decode(line), unrecognized(line), "line: {:?}", line);
    }
  }

  #[test]
  fn decoding_is_repeatable(){
    let line = "mul r10 2 3";
    assert_eq!(decode(line), decode(line));
  }

  #[test]
  fn displayed_instructions_decode_to_themselves(){
    for line in &["add r0 5 3", "sub r1 r2 r3", "load r9 [4]", "store [8] r3", "Compile Error!"] {
      let instruction = decode(line).unwrap();
      assert_eq!(&instruction.to_string(), line);
      assert_eq!(decode(&instruction.to_string()), Ok(instruction));
    }
  }
}
