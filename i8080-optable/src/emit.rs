//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::fmt::Display;

use crate::record::OpcodeTable;

/// Source language the tables are written out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
	#[default]
	Rust,
	Cpp,
}

/// The three parallel tables, indexed by opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tables<'a> {
	pub mnemonics: Vec<&'a str>,
	pub operand_formats: Vec<&'a str>,
	pub lengths: Vec<u8>,
}

/// Tables written out as source code. Use its [`Display`] implementation.
pub struct Rendered<'t, 'a> {
	tables: &'t Tables<'a>,
	syntax: Syntax,
}

enum Literal<'a> {
	String(&'a str),
	Integer(u8),
}

impl Display for Literal<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::String(string) => write!(f, "\"{}\"", string),
			Self::Integer(integer) => write!(f, "{}", integer),
		}
	}
}

impl Syntax {
	const fn declarations(&self) -> [&'static str; 3] {
		match self {
			Self::Rust => [
				"pub static MNEMONICS: [&str; 256]",
				"pub static OPERAND_FORMATS: [&str; 256]",
				"pub static INSTRUCTION_LENGTHS: [u8; 256]",
			],
			Self::Cpp => [
				"const std::string mnemonics[]",
				"const std::string arguments[]",
				"const byte instructionLengths[]",
			],
		}
	}

	const fn delimiters(&self) -> (&'static str, &'static str) {
		match self {
			Self::Rust => ("[", "]"),
			Self::Cpp => ("{", "}"),
		}
	}

	fn write_block<'a>(
		&self,
		f: &mut std::fmt::Formatter<'_>,
		declaration: &str,
		literals: impl ExactSizeIterator<Item = Literal<'a>>,
	) -> std::fmt::Result {
		let (open, close) = self.delimiters();
		let last = literals.len().saturating_sub(1);

		writeln!(f, "{} = {}", declaration, open)?;
		for (index, literal) in literals.enumerate() {
			match self {
				// C++ initializer lists are written without a trailing comma
				Self::Cpp if index == last => writeln!(f, "\t{}", literal)?,
				_ => writeln!(f, "\t{},", literal)?,
			}
		}
		writeln!(f, "{};", close)
	}
}

impl<'a> Tables<'a> {
	pub fn new(table: &'a OpcodeTable) -> Self {
		Self {
			mnemonics: table.records().map(|record| record.mnemonic.as_str()).collect(),
			operand_formats: table
				.records()
				.map(|record| record.operand_format.as_str())
				.collect(),
			lengths: table.records().map(|record| u8::from(record.length)).collect(),
		}
	}

	pub fn rendered(&self, syntax: Syntax) -> Rendered<'_, 'a> {
		Rendered {
			tables: self,
			syntax,
		}
	}
}

impl Display for Rendered<'_, '_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let [mnemonics, operand_formats, lengths] = self.syntax.declarations();

		self.syntax.write_block(
			f,
			mnemonics,
			self.tables.mnemonics.iter().map(|string| Literal::String(string)),
		)?;
		writeln!(f)?;
		self.syntax.write_block(
			f,
			operand_formats,
			self.tables
				.operand_formats
				.iter()
				.map(|string| Literal::String(string)),
		)?;
		writeln!(f)?;
		self.syntax.write_block(
			f,
			lengths,
			self.tables.lengths.iter().map(|&length| Literal::Integer(length)),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tables() -> Tables<'static> {
		Tables {
			mnemonics: vec!["NOP", "LXI"],
			operand_formats: vec!["", "BC, wwww"],
			lengths: vec![1, 3],
		}
	}

	#[test]
	fn renders_rust_statics() {
		let text = tables().rendered(Syntax::Rust).to_string();

		assert_eq!(
			text,
			"pub static MNEMONICS: [&str; 256] = [\n\t\"NOP\",\n\t\"LXI\",\n];\n\
			 \n\
			 pub static OPERAND_FORMATS: [&str; 256] = [\n\t\"\",\n\t\"BC, wwww\",\n];\n\
			 \n\
			 pub static INSTRUCTION_LENGTHS: [u8; 256] = [\n\t1,\n\t3,\n];\n"
		);
	}

	#[test]
	fn renders_cpp_arrays() {
		let text = tables().rendered(Syntax::Cpp).to_string();

		assert_eq!(
			text,
			"const std::string mnemonics[] = {\n\t\"NOP\",\n\t\"LXI\"\n};\n\
			 \n\
			 const std::string arguments[] = {\n\t\"\",\n\t\"BC, wwww\"\n};\n\
			 \n\
			 const byte instructionLengths[] = {\n\t1,\n\t3\n};\n"
		);
	}
}
