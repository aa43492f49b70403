//
// Copyright (C) 2023 Ariel Abreu
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//

use std::{
	borrow::Cow,
	fs,
	io::{self, Write},
	path::PathBuf,
	process::exit,
};

use clap::{Parser as ClapParser, ValueEnum};
use i8080_optable::{Syntax, REFERENCE_SOURCE};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prints the Intel 8080 mnemonic, operand format and instruction length tables.
#[derive(ClapParser)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Opcode table text to use instead of the built-in reference table
	#[arg(short, long)]
	source: Option<PathBuf>,

	/// Write the tables here instead of to standard output
	#[arg(short, long)]
	output: Option<PathBuf>,

	#[arg(long, value_enum, default_value_t = Language::Rust)]
	language: Language,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Language {
	Rust,
	Cpp,
}

impl From<Language> for Syntax {
	fn from(language: Language) -> Self {
		match language {
			Language::Rust => Syntax::Rust,
			Language::Cpp => Syntax::Cpp,
		}
	}
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(io::stderr)
		.init();

	let cli = Args::parse();

	let input = match &cli.source {
		Some(path) => match fs::read_to_string(path) {
			Ok(x) => Cow::Owned(x),
			Err(e) => {
				eprintln!("Failed to read \"{}\": {}", path.display(), e);
				exit(1);
			},
		},
		None => Cow::Borrowed(REFERENCE_SOURCE),
	};

	// nothing is written until every table has been built
	let tables = match i8080_optable::generate(&input, cli.language.into()) {
		Ok(x) => x,
		Err(e) => {
			eprintln!("Failed to generate opcode tables: {}", e);
			exit(1);
		},
	};

	info!(language = ?cli.language, bytes = tables.len(), "generated opcode tables");

	let written = match &cli.output {
		Some(path) => fs::write(path, &tables),
		None => io::stdout().lock().write_all(tables.as_bytes()),
	};

	match written {
		Ok(_) => {},
		Err(err) => {
			eprintln!("Failed to write opcode tables: {}", err);
			exit(1);
		},
	}
}
