//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use thiserror::Error;

use crate::{reparse, source};

/// The shape of the input text does not match a 16x16 opcode table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralMismatch {
	#[error("expected 16 row groups but found {found}")]
	RowCount { found: usize },

	#[error("row group {row} is labelled \"{label}x\"")]
	RowLabel { row: usize, label: char },

	#[error("expected 16 instructions in row {row:X} but found {found}")]
	CellCount { row: usize, found: usize },

	#[error("expected 3 emitted tables but found {found}")]
	TableCount { found: usize },
}

#[derive(Debug, Error)]
pub enum TableError {
	#[error("malformed opcode table: {0}")]
	StructuralMismatch(#[from] StructuralMismatch),

	#[error("expected 256 instructions in total but found {found}")]
	RecordCountMismatch { found: usize },

	#[error("entry {index} of the {table} table has the wrong literal type")]
	UnexpectedLiteral { table: &'static str, index: usize },

	#[error("opcode {opcode:#04X} has an invalid instruction length of {value}")]
	InvalidLength { opcode: u8, value: u64 },

	#[error("failed to parse opcode table:\n{0}")]
	Syntax(#[from] Box<pest::error::Error<source::Rule>>),

	#[error("failed to parse emitted tables:\n{0}")]
	EmittedSyntax(#[from] Box<pest::error::Error<reparse::Rule>>),
}
