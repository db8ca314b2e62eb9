//! Command-line interface related structures.

use std::str::FromStr;

use crate::common::PseudoAddress;
use crate::segments::BlockVariant;

/// Assembly-wide switches. These are set once before the first instruction and never change during a run.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
#[cfg_attr(feature = "binaries", derive(clap::Args))]
pub struct AssemblerOptions {
	/// Hardware generation to assemble for.
	#[cfg_attr(feature = "binaries", arg(long, value_enum, default_value = "block2"))]
	pub block:    BlockVariant,
	/// Shift common-fixed literal operands (02000-03777) into the current fixed bank, as Raytheon's assembler
	/// did.
	#[cfg_attr(feature = "binaries", arg(long))]
	pub raytheon: bool,
	/// Treat EDRUPT as an implied-address instruction, as the BLK2 program did.
	#[cfg_attr(feature = "binaries", arg(long))]
	pub blk2:     bool,
}

impl AssemblerOptions {
	/// Options for the given hardware generation with both compatibility switches off.
	#[must_use]
	pub const fn for_block(block: BlockVariant) -> Self {
		Self { block, raytheon: false, blk2: false }
	}
}

/// A symbol defined on the command line as `NAME=OCTAL`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SymbolDefinition {
	/// Symbol name.
	pub name:  String,
	/// Pseudo-address the symbol stands for.
	pub value: PseudoAddress,
}

impl FromStr for SymbolDefinition {
	type Err = String;

	fn from_str(definition: &str) -> Result<Self, Self::Err> {
		let (name, value) =
			definition.split_once('=').ok_or_else(|| format!("expected NAME=OCTAL, got `{definition}`"))?;
		let name = name.trim();
		if name.is_empty() {
			return Err("symbol name is empty".to_string());
		}
		Ok(Self { name: name.to_owned(), value: parse_octal(value)? })
	}
}

/// Parse an unsigned octal number as used for addresses on the command line.
///
/// # Errors
/// If the text is not an octal number.
pub fn parse_octal(text: &str) -> Result<PseudoAddress, String> {
	let text = text.trim();
	if text.is_empty() || !text.bytes().all(|digit| matches!(digit, b'0' ..= b'7')) {
		return Err(format!("`{text}` is not an octal number"));
	}
	PseudoAddress::from_str_radix(text, 8).map_err(|error| error.to_string())
}

#[cfg(feature = "binaries")]
mod clap_dependent {
	use std::path::PathBuf;

	use clap::Parser;

	use super::{AssemblerOptions, SymbolDefinition, parse_octal};
	use crate::common::PseudoAddress;

	/// AGC instruction encoder.
	///
	/// Reads one instruction per line (`MNEMONIC [OPERAND [MOD1 [MOD2]]]`, `#` starts a comment) and prints the
	/// pseudo-address and octal word of each.
	#[derive(Parser)]
	#[command(author, version, about, long_about = None)]
	pub struct AgcasmCli {
		/// Source file to encode.
		pub input:       PathBuf,
		#[allow(missing_docs)]
		#[command(flatten)]
		pub options:     AssemblerOptions,
		/// Define a symbol, as NAME=OCTAL pseudo-address. May be repeated.
		#[arg(long = "define", short = 'D')]
		pub definitions: Vec<SymbolDefinition>,
		/// Octal pseudo-address of the first instruction.
		#[arg(long, default_value = "4000", value_parser = parse_octal)]
		pub origin:      PseudoAddress,
		/// Verbosity level to use.
		#[arg(long, short, action = clap::ArgAction::Count)]
		pub verbose:     u8,
	}
}

#[cfg(feature = "binaries")]
pub use clap_dependent::*;
