//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use i8080_optable::{reference_table, Tables, OPCODE_COUNT};
use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;
use syn::{
	parse::{Parse, ParseStream},
	parse_macro_input,
	punctuated::Punctuated,
	Attribute, Token, Visibility,
};

mod kw {
	use syn::custom_keyword;

	custom_keyword!(mnemonics);
	custom_keyword!(operand_formats);
	custom_keyword!(lengths);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableKind {
	Mnemonics,
	OperandFormats,
	Lengths,
}

struct TableItem {
	attrs: Vec<Attribute>,
	kind: TableKind,
	kind_span: Span,
	vis: Visibility,
	name: Ident,
}

struct TableItems(Vec<TableItem>);

impl Parse for TableKind {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let lookahead = input.lookahead1();

		if lookahead.peek(kw::mnemonics) {
			input.parse::<kw::mnemonics>()?;
			Ok(Self::Mnemonics)
		} else if lookahead.peek(kw::operand_formats) {
			input.parse::<kw::operand_formats>()?;
			Ok(Self::OperandFormats)
		} else if lookahead.peek(kw::lengths) {
			input.parse::<kw::lengths>()?;
			Ok(Self::Lengths)
		} else {
			Err(lookahead.error())
		}
	}
}

impl Parse for TableItem {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let attrs = input.call(Attribute::parse_outer)?;
		let kind_span = input.span();
		let kind = input.parse()?;
		input.parse::<Token![=>]>()?;
		let vis = input.parse()?;
		input.parse::<Token![static]>()?;
		let name = input.parse()?;

		Ok(Self {
			attrs,
			kind,
			kind_span,
			vis,
			name,
		})
	}
}

impl Parse for TableItems {
	fn parse(input: ParseStream) -> syn::Result<Self> {
		let items = Punctuated::<TableItem, Token![,]>::parse_terminated(input)?;
		let mut seen: Vec<TableKind> = Vec::new();

		for item in &items {
			if seen.contains(&item.kind) {
				return Err(syn::Error::new(
					item.kind_span,
					"Each table can only be generated once",
				));
			}
			seen.push(item.kind);
		}

		Ok(Self(items.into_iter().collect()))
	}
}

fn expand_item(item: &TableItem, tables: &Tables) -> TokenStream {
	let TableItem {
		attrs, vis, name, ..
	} = item;
	let count = Literal::usize_unsuffixed(OPCODE_COUNT);

	match item.kind {
		TableKind::Mnemonics => {
			let values = &tables.mnemonics;
			quote! { #(#attrs)* #vis static #name: [&str; #count] = [#(#values),*]; }
		},
		TableKind::OperandFormats => {
			let values = &tables.operand_formats;
			quote! { #(#attrs)* #vis static #name: [&str; #count] = [#(#values),*]; }
		},
		TableKind::Lengths => {
			let values = tables.lengths.iter().copied().map(Literal::u8_unsuffixed);
			quote! { #(#attrs)* #vis static #name: [u8; #count] = [#(#values),*]; }
		},
	}
}

/// Expands into static arrays built from the 8080 reference opcode table, indexed by opcode.
///
/// ```ignore
/// opcode_tables! {
/// 	mnemonics => pub static MNEMONICS,
/// 	operand_formats => pub static OPERAND_FORMATS,
/// 	lengths => pub(crate) static INSTRUCTION_LENGTHS,
/// }
/// ```
///
/// Any subset of the three tables can be requested, each at most once. Operand
/// formats use `bb` and `wwww` for the byte and word following the opcode.
#[proc_macro]
pub fn opcode_tables(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let items = parse_macro_input!(item as TableItems);

	let table = match reference_table() {
		Ok(table) => table,
		Err(err) => {
			return syn::Error::new(
				Span::call_site(),
				format!("Failed to build the opcode tables: {}", err),
			)
			.to_compile_error()
			.into()
		},
	};
	let tables = Tables::new(&table);

	let expanded = items.0.iter().map(|item| expand_item(item, &tables));

	quote! { #(#expanded)* }.into()
}
