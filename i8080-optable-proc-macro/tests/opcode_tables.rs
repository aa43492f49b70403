//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use i8080_optable_proc_macro::opcode_tables;

opcode_tables! {
	/// Mnemonics indexed by opcode.
	mnemonics => pub static MNEMONICS,
	operand_formats => static OPERAND_FORMATS,
	lengths => pub(crate) static INSTRUCTION_LENGTHS,
}

mod partial {
	i8080_optable_proc_macro::opcode_tables! {
		lengths => pub static LENGTHS
	}
}

#[test]
fn tables_are_indexed_by_opcode() {
	assert_eq!(MNEMONICS.len(), 256);
	assert_eq!(MNEMONICS[0x00], "NOP");
	assert_eq!(MNEMONICS[0x76], "HLT");
	assert_eq!(MNEMONICS[0xFD], "*CALL");

	assert_eq!(OPERAND_FORMATS[0x01], "BC, wwww");
	assert_eq!(OPERAND_FORMATS[0x3E], "A, bb");
	assert_eq!(OPERAND_FORMATS[0xFF], "7");

	assert_eq!(INSTRUCTION_LENGTHS[0x01], 3);
	assert_eq!(INSTRUCTION_LENGTHS[0x3E], 2);
	assert_eq!(INSTRUCTION_LENGTHS[0xFF], 1);
}

#[test]
fn tables_match_the_library() {
	let table = i8080_optable::reference_table().unwrap();

	for record in table.records() {
		let opcode = record.opcode as usize;
		assert_eq!(MNEMONICS[opcode], record.mnemonic);
		assert_eq!(OPERAND_FORMATS[opcode], record.operand_format);
		assert_eq!(INSTRUCTION_LENGTHS[opcode], u8::from(record.length));
	}

	assert_eq!(partial::LENGTHS, INSTRUCTION_LENGTHS);
}
