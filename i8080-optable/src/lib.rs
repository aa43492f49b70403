//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

//! Intel 8080 opcode metadata derived from a human-authored opcode table.
//!
//! The table text is split into its sixteen `Nx` row groups, each row is
//! tokenized into sixteen instruction cells, every cell is resolved into an
//! operand format and an instruction length, and the results are keyed by
//! opcode (`row * 16 + column`). The finished [`OpcodeTable`] can then be
//! written out as three parallel static arrays with [`Tables`].
//!
//! ```
//! let table = i8080_optable::reference_table().unwrap();
//! let lxi = table.get(0x01);
//!
//! assert_eq!(lxi.mnemonic, "LXI");
//! assert_eq!(lxi.operand_format, "BC, wwww");
//! assert_eq!(lxi.format_operands(0x34, 0x12), "BC, 1234");
//! ```

mod emit;
mod error;
mod record;
mod resolve;

pub mod reparse;
pub mod source;

use tracing::debug;

pub use crate::{
	emit::{Rendered, Syntax, Tables},
	error::{StructuralMismatch, TableError},
	record::{assemble, opcode_at, InstructionRecord, OpcodeTable, OPCODE_COUNT},
	resolve::{
		resolve, restart_vector, InstructionLength, Resolved, BYTE_PLACEHOLDER, WORD_PLACEHOLDER,
	},
};

/// The 8080 opcode table from pastraiser.com, as copied from the web page.
pub const REFERENCE_SOURCE: &str = include_str!("i8080_opcodes.txt");

/// Runs the whole pipeline over a textual opcode table.
pub fn parse_table(text: &str) -> Result<OpcodeTable, TableError> {
	let groups = source::split_rows(text)?;
	let mut rows: Vec<[Resolved<'_>; source::ROW_LEN]> = Vec::with_capacity(groups.len());

	for (row, group) in groups.iter().enumerate() {
		let tokens = source::tokenize_row(row, group)?;

		rows.push(std::array::from_fn(|column| {
			resolve(&tokens[column], opcode_at(row, column) as u8)
		}));
	}

	debug!(rows = rows.len(), "resolved opcode table");

	assemble(rows)
}

/// Parses [`REFERENCE_SOURCE`].
pub fn reference_table() -> Result<OpcodeTable, TableError> {
	parse_table(REFERENCE_SOURCE)
}

/// Parses `text` and renders its three tables, or fails without producing any output.
pub fn generate(text: &str, syntax: Syntax) -> Result<String, TableError> {
	let table = parse_table(text)?;

	Ok(Tables::new(&table).rendered(syntax).to_string())
}
