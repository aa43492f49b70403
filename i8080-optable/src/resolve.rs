//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::collections::HashMap;

use lazy_static::lazy_static;
use num_enum::{IntoPrimitive, TryFromPrimitive};

use crate::source::{RawSecondary, RawToken};

/// Stands for the byte following the opcode in an operand format.
pub const BYTE_PLACEHOLDER: &str = "bb";
/// Stands for the little-endian word following the opcode in an operand format.
pub const WORD_PLACEHOLDER: &str = "wwww";

const RESTART_MNEMONIC: &str = "RST";

/// Instructions whose register operand names a register pair.
const REGISTER_PAIR_MNEMONICS: [&str; 6] = ["LXI", "POP", "PUSH", "INX", "DAD", "DCX"];

lazy_static! {
	static ref REGISTER_PAIR_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
		("B", "BC"),
		("D", "DE"),
		("H", "HL"),
		("SP", "SP"),
		("PSW", "PSW"),
	]);
}

/// Encoded size of an instruction, opcode byte included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum InstructionLength {
	One = 1,
	Two = 2,
	Three = 3,
}

/// A cell after operand resolution, still positioned only by its row and column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<'a> {
	pub mnemonic: &'a str,
	pub operand_format: String,
	pub length: InstructionLength,
}

/// The vector number of a restart instruction lives in bits 3-5 of its opcode.
pub const fn restart_vector(opcode: u8) -> u8 {
	(opcode & 0b0011_1000) >> 3
}

/// Produces the operand format and length of a cell.
///
/// This never fails: every cell the grammar accepts has a resolution.
pub fn resolve<'a>(token: &RawToken<'a>, opcode: u8) -> Resolved<'a> {
	let (secondary, length) = if token.mnemonic == RESTART_MNEMONIC {
		(Some(restart_vector(opcode).to_string()), InstructionLength::One)
	} else {
		match token.secondary {
			Some(RawSecondary::ByteImmediate) => {
				(Some(BYTE_PLACEHOLDER.to_owned()), InstructionLength::Two)
			},
			Some(RawSecondary::WordImmediate | RawSecondary::WordAddress) => {
				(Some(WORD_PLACEHOLDER.to_owned()), InstructionLength::Three)
			},
			Some(RawSecondary::Register(register)) => {
				(Some(register.to_owned()), InstructionLength::One)
			},
			None => (None, InstructionLength::One),
		}
	};

	let primary = token.primary.map(|primary| {
		if REGISTER_PAIR_MNEMONICS.contains(&token.mnemonic) {
			REGISTER_PAIR_NAMES.get(primary).copied().unwrap_or(primary)
		} else {
			primary
		}
	});

	let operand_format = match (primary, secondary) {
		(Some(primary), Some(secondary)) => format!("{}, {}", primary, secondary),
		(Some(primary), None) => primary.to_owned(),
		(None, Some(secondary)) => secondary,
		(None, None) => String::new(),
	};

	Resolved {
		mnemonic: token.mnemonic,
		operand_format,
		length,
	}
}
