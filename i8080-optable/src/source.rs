//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Splitting the textual opcode table into row groups and extracting the raw
//! instruction cells of each row.

use pest::{iterators::Pair, Parser};
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::error::{StructuralMismatch, TableError};

/// Number of row groups in the table (one per high nibble of the opcode).
pub const ROW_COUNT: usize = 16;
/// Number of instruction cells in each row group (one per low nibble).
pub const ROW_LEN: usize = 16;

#[derive(Parser)]
#[grammar = "opcode_table.pest"]
struct SourceParser;

/// The text of one row of the table, without its `Nx` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowGroup<'a> {
	pub label: char,
	pub text: &'a str,
}

/// The second operand of a cell as written in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawSecondary<'a> {
	Register(&'a str),
	/// `d8`
	ByteImmediate,
	/// `d16`
	WordImmediate,
	/// `a16`
	WordAddress,
}

/// One instruction cell before any operand resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
	/// Includes the leading `*` of undocumented encodings.
	pub mnemonic: &'a str,
	pub primary: Option<&'a str>,
	pub secondary: Option<RawSecondary<'a>>,
}

/// Splits the table text on its row labels, discarding whatever precedes the first label.
pub fn split_rows(text: &str) -> Result<Vec<RowGroup<'_>>, TableError> {
	let pairs = SourceParser::parse(Rule::table, text).map_err(Box::new)?;

	let groups: Vec<_> = pairs
		.flatten()
		.filter(|pair| pair.as_rule() == Rule::row_group)
		.map(row_group)
		.collect();

	debug!(found = groups.len(), "split opcode table into row groups");

	if groups.len() != ROW_COUNT {
		return Err(StructuralMismatch::RowCount {
			found: groups.len(),
		}
		.into());
	}

	for (row, group) in groups.iter().enumerate() {
		let expected = char::from_digit(row as u32, 16).map(|digit| digit.to_ascii_uppercase());

		if expected != Some(group.label) {
			return Err(StructuralMismatch::RowLabel {
				row,
				label: group.label,
			}
			.into());
		}
	}

	Ok(groups)
}

/// Extracts the 16 instruction cells of a row group, ignoring the cycle counts
/// and flag annotations interleaved with them.
pub fn tokenize_row<'a>(
	row: usize,
	group: &RowGroup<'a>,
) -> Result<[RawToken<'a>; ROW_LEN], TableError> {
	let pairs = SourceParser::parse(Rule::row, group.text).map_err(Box::new)?;

	let tokens: Vec<_> = pairs
		.flatten()
		.filter(|pair| pair.as_rule() == Rule::cell)
		.map(raw_token)
		.collect();
	let found = tokens.len();

	trace!(row, found, "tokenized row group");

	<[RawToken<'a>; ROW_LEN]>::try_from(tokens)
		.map_err(|_| StructuralMismatch::CellCount { row, found }.into())
}

fn row_group(pair: Pair<'_, Rule>) -> RowGroup<'_> {
	let mut group = RowGroup {
		label: '?',
		text: "",
	};

	for inner in pair.into_inner() {
		match inner.as_rule() {
			Rule::row_label => group.label = inner.as_str().chars().next().unwrap_or('?'),
			Rule::row_text => group.text = inner.as_str(),
			_ => unreachable!(),
		}
	}

	group
}

fn raw_token(cell: Pair<'_, Rule>) -> RawToken<'_> {
	let mut token = RawToken {
		mnemonic: "",
		primary: None,
		secondary: None,
	};

	for part in cell.into_inner() {
		match part.as_rule() {
			Rule::mnemonic => token.mnemonic = part.as_str(),
			Rule::primary => token.primary = Some(part.as_str()),
			Rule::secondary => token.secondary = part.into_inner().next().map(raw_secondary),
			_ => unreachable!(),
		}
	}

	token
}

fn raw_secondary(operand: Pair<'_, Rule>) -> RawSecondary<'_> {
	match operand.as_rule() {
		Rule::byte_immediate => RawSecondary::ByteImmediate,
		Rule::word_immediate => RawSecondary::WordImmediate,
		Rule::word_address => RawSecondary::WordAddress,
		Rule::register => RawSecondary::Register(operand.as_str()),
		_ => unreachable!(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn cell(instruction: &str) -> String {
		format!("{}\n1  5\nS Z A P -\t", instruction)
	}

	fn table_with_labels(labels: &[char]) -> String {
		let mut text = String::from("\n");
		for label in labels {
			text.push_str(&format!(" {}x \t", label));
			for _ in 0..ROW_LEN {
				text.push_str(&cell("INR B"));
			}
			text.push('\n');
		}
		text
	}

	const LABELS: [char; 16] = [
		'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F',
	];

	#[test]
	fn splits_into_labelled_row_groups() {
		let text = table_with_labels(&LABELS);
		let groups = split_rows(&text).unwrap();

		assert_eq!(groups.len(), ROW_COUNT);
		for (group, label) in groups.iter().zip(LABELS) {
			assert_eq!(group.label, label);
			assert!(group.text.contains("INR B"));
		}
	}

	#[test]
	fn preamble_is_discarded() {
		let text = format!("some heading\n{}", table_with_labels(&LABELS));
		let groups = split_rows(&text).unwrap();

		assert!(!groups[0].text.contains("heading"));
	}

	#[test]
	fn missing_row_group_is_rejected() {
		let text = table_with_labels(&LABELS[..15]);

		assert!(matches!(
			split_rows(&text),
			Err(TableError::StructuralMismatch(StructuralMismatch::RowCount { found: 15 }))
		));
	}

	#[test]
	fn out_of_order_row_group_is_rejected() {
		let mut labels = LABELS;
		labels.swap(3, 4);
		let text = table_with_labels(&labels);

		assert!(matches!(
			split_rows(&text),
			Err(TableError::StructuralMismatch(StructuralMismatch::RowLabel {
				row: 3,
				label: '4'
			}))
		));
	}

	#[test]
	fn cells_are_classified() {
		let instructions = [
			"NOP", "LXI SP,d16", "STAX B", "SHLD a16", "MVI M,d8", "MOV B,C", "PUSH PSW", "*NOP",
			"RST 3", "CPI d8", "*CALL a16", "INR A", "DAD SP", "XCHG", "OUT d8", "JMP a16",
		];
		let text: String = instructions.iter().map(|instr| cell(instr)).collect();
		let group = RowGroup { label: '0', text: &text };

		let tokens = tokenize_row(0, &group).unwrap();

		assert_eq!(
			tokens[0],
			RawToken {
				mnemonic: "NOP",
				primary: None,
				secondary: None
			}
		);
		assert_eq!(tokens[1].primary, Some("SP"));
		assert_eq!(tokens[1].secondary, Some(RawSecondary::WordImmediate));
		assert_eq!(tokens[2].primary, Some("B"));
		assert_eq!(tokens[2].secondary, None);
		assert_eq!(tokens[3].primary, None);
		assert_eq!(tokens[3].secondary, Some(RawSecondary::WordAddress));
		assert_eq!(tokens[4].primary, Some("M"));
		assert_eq!(tokens[4].secondary, Some(RawSecondary::ByteImmediate));
		assert_eq!(tokens[5].secondary, Some(RawSecondary::Register("C")));
		assert_eq!(tokens[6].primary, Some("PSW"));
		assert_eq!(tokens[7].mnemonic, "*NOP");
		assert_eq!(tokens[8].mnemonic, "RST");
		assert_eq!(tokens[8].primary, None);
		assert_eq!(tokens[8].secondary, None);
		assert_eq!(tokens[10].mnemonic, "*CALL");
		assert_eq!(tokens[10].secondary, Some(RawSecondary::WordAddress));
		assert_eq!(tokens[13].mnemonic, "XCHG");
	}

	#[test]
	fn annotations_are_not_cells() {
		let text = "S Z A P C\t17/11\n- - - - -\n";
		let group = RowGroup { label: '0', text };

		assert!(matches!(
			tokenize_row(0, &group),
			Err(TableError::StructuralMismatch(StructuralMismatch::CellCount {
				row: 0,
				found: 0
			}))
		));
	}

	#[test]
	fn extra_cell_is_rejected() {
		let text: String = (0..ROW_LEN + 1).map(|_| cell("DCR E")).collect();
		let group = RowGroup { label: '7', text: &text };

		assert!(matches!(
			tokenize_row(7, &group),
			Err(TableError::StructuralMismatch(StructuralMismatch::CellCount {
				row: 7,
				found: 17
			}))
		));
	}
}
