//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Reading emitted tables back into an [`OpcodeTable`], in either target syntax.

use std::collections::BTreeMap;

use pest::{
	iterators::{Pair, Pairs},
	Parser,
};
use pest_derive::Parser;
use tracing::debug;

use crate::{
	error::{StructuralMismatch, TableError},
	record::{InstructionRecord, OpcodeTable, OPCODE_COUNT},
	resolve::InstructionLength,
};

#[derive(Parser)]
#[grammar = "emitted_tables.pest"]
struct EmittedParser;

const TABLE_NAMES: [&str; 3] = ["mnemonic", "operand format", "instruction length"];

fn block_literals(block: Pair<'_, Rule>) -> Vec<Pair<'_, Rule>> {
	block
		.into_inner()
		.filter(|pair| matches!(pair.as_rule(), Rule::string | Rule::integer))
		.collect()
}

fn strings<'a>(
	table: &'static str,
	literals: &[Pair<'a, Rule>],
) -> Result<Vec<&'a str>, TableError> {
	literals
		.iter()
		.enumerate()
		.map(|(index, literal)| match literal.as_rule() {
			Rule::string => Ok(literal
				.clone()
				.into_inner()
				.next()
				.map_or("", |content| content.as_str())),
			_ => Err(TableError::UnexpectedLiteral { table, index }),
		})
		.collect()
}

fn lengths(table: &'static str, literals: &[Pair<'_, Rule>]) -> Result<Vec<u64>, TableError> {
	literals
		.iter()
		.enumerate()
		.map(|(index, literal)| match literal.as_rule() {
			Rule::integer => literal
				.as_str()
				.parse()
				.map_err(|_| TableError::UnexpectedLiteral { table, index }),
			_ => Err(TableError::UnexpectedLiteral { table, index }),
		})
		.collect()
}

impl OpcodeTable {
	/// Parses the output of [`crate::Tables::rendered`] back into records.
	pub fn from_emitted(text: &str) -> Result<Self, TableError> {
		let pairs: Pairs<'_, Rule> = EmittedParser::parse(Rule::tables, text).map_err(Box::new)?;

		let blocks: Vec<_> = pairs
			.flatten()
			.filter(|pair| pair.as_rule() == Rule::block)
			.map(block_literals)
			.collect();

		debug!(found = blocks.len(), "parsed emitted tables");

		let [mnemonics, operand_formats, instruction_lengths] = <[_; 3]>::try_from(blocks)
			.map_err(|blocks: Vec<_>| StructuralMismatch::TableCount {
				found: blocks.len(),
			})?;

		for literals in [&mnemonics, &operand_formats, &instruction_lengths] {
			if literals.len() != OPCODE_COUNT {
				return Err(TableError::RecordCountMismatch {
					found: literals.len(),
				});
			}
		}

		let mnemonics = strings(TABLE_NAMES[0], &mnemonics)?;
		let operand_formats = strings(TABLE_NAMES[1], &operand_formats)?;
		let instruction_lengths = lengths(TABLE_NAMES[2], &instruction_lengths)?;

		let mut records = BTreeMap::new();

		for (opcode, ((mnemonic, operand_format), value)) in mnemonics
			.into_iter()
			.zip(operand_formats)
			.zip(instruction_lengths)
			.enumerate()
		{
			let opcode = opcode as u8;
			let length = u8::try_from(value)
				.ok()
				.and_then(|value| InstructionLength::try_from(value).ok())
				.ok_or(TableError::InvalidLength { opcode, value })?;

			records.insert(
				opcode as usize,
				InstructionRecord {
					opcode,
					mnemonic: mnemonic.to_owned(),
					operand_format: operand_format.to_owned(),
					length,
				},
			);
		}

		Self::from_records(records)
	}
}
