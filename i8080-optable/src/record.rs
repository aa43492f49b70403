//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{collections::BTreeMap, fmt::Display};

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace};

use crate::{
	error::TableError,
	resolve::{InstructionLength, Resolved, BYTE_PLACEHOLDER, WORD_PLACEHOLDER},
	source::ROW_LEN,
};

/// Number of opcodes in the table.
pub const OPCODE_COUNT: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
	pub opcode: u8,
	pub mnemonic: String,
	/// Operands with `bb`/`wwww` standing in for the bytes that follow the opcode.
	pub operand_format: String,
	pub length: InstructionLength,
}

/// Every opcode from `0x00` through `0xFF`, each with exactly one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeTable {
	records: Vec<InstructionRecord>,
}

impl InstructionRecord {
	/// Fills in the operand format with the bytes following the opcode.
	///
	/// `bb` becomes `byte2` and `wwww` becomes the little-endian word `byte3:byte2`,
	/// both in upper-case hexadecimal.
	pub fn format_operands(&self, byte2: u8, byte3: u8) -> String {
		if self.operand_format.contains(BYTE_PLACEHOLDER) {
			self.operand_format
				.replacen(BYTE_PLACEHOLDER, &format!("{:02X}", byte2), 1)
		} else if self.operand_format.contains(WORD_PLACEHOLDER) {
			let word = LittleEndian::read_u16(&[byte2, byte3]);
			self.operand_format
				.replacen(WORD_PLACEHOLDER, &format!("{:04X}", word), 1)
		} else {
			self.operand_format.clone()
		}
	}
}

impl Display for InstructionRecord {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.mnemonic).and_then(|_| {
			if self.operand_format.is_empty() {
				Ok(())
			} else {
				write!(f, " {}", self.operand_format)
			}
		})
	}
}

impl OpcodeTable {
	/// Checks that `records` holds exactly the opcodes `0..256`.
	pub(crate) fn from_records(
		records: BTreeMap<usize, InstructionRecord>,
	) -> Result<Self, TableError> {
		if records.len() != OPCODE_COUNT || records.keys().next_back() != Some(&(OPCODE_COUNT - 1))
		{
			return Err(TableError::RecordCountMismatch {
				found: records.len(),
			});
		}

		Ok(Self {
			records: records.into_values().collect(),
		})
	}

	pub fn get(&self, opcode: u8) -> &InstructionRecord {
		&self.records[opcode as usize]
	}

	/// Records in ascending opcode order.
	pub fn records(&self) -> impl Iterator<Item = &InstructionRecord> + '_ {
		self.records.iter()
	}

	pub fn len(&self) -> usize {
		self.records.len()
	}

	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}
}

/// Opcode of the instruction in the given row and column of the table.
pub const fn opcode_at(row: usize, column: usize) -> usize {
	row * ROW_LEN + column
}

/// Keys resolved cells by their row-major position and checks that all 256 opcodes are present.
pub fn assemble<'a, I>(rows: I) -> Result<OpcodeTable, TableError>
where
	I: IntoIterator<Item = [Resolved<'a>; ROW_LEN]>,
{
	let mut records = BTreeMap::new();

	for (row, cells) in rows.into_iter().enumerate() {
		for (column, cell) in cells.into_iter().enumerate() {
			let opcode = opcode_at(row, column);

			trace!(
				opcode,
				mnemonic = cell.mnemonic,
				operands = cell.operand_format.as_str(),
				"assembled instruction"
			);

			// opcodes past 0xFF only inflate the count checked below
			records.insert(
				opcode,
				InstructionRecord {
					opcode: opcode as u8,
					mnemonic: cell.mnemonic.to_owned(),
					operand_format: cell.operand_format,
					length: cell.length,
				},
			);
		}
	}

	debug!(found = records.len(), "assembled opcode records");

	OpcodeTable::from_records(records)
}
