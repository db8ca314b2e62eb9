//! A minimal line-oriented front end.
//!
//! Each line holds `MNEMONIC [OPERAND [MOD1 [MOD2]]]`, separated by whitespace; `#` starts a comment. Lines are
//! encoded in order, each one placed at the location counter the previous one left behind, and the EXTEND and
//! INDEX state flows from line to line.

use crate::assembler::{EncodedInstruction, InstructionRecord, Mnemonic, Session};
use crate::common::Parse;
use crate::error::AssemblyError;
use crate::segments::SegmentedAddress;
use crate::symbol::SymbolResolver;

/// One tokenized instruction line.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SourceLine {
	/// One-based line number in the source file.
	pub number:   usize,
	/// Mnemonic as written.
	pub mnemonic: String,
	/// Operand field, possibly empty.
	pub operand:  String,
	/// First modifier field, possibly empty.
	pub mod1:     String,
	/// Second modifier field, possibly empty.
	pub mod2:     String,
}

impl SourceLine {
	/// Tokenize a line. Blank and comment-only lines yield nothing.
	#[must_use]
	pub fn parse(number: usize, text: &str) -> Option<Self> {
		let code = text.split_once('#').map_or(text, |(code, _)| code);
		let mut fields = code.split_whitespace();
		let mnemonic = fields.next()?.to_owned();
		let mut next_field = || fields.next().unwrap_or_default().to_owned();
		Some(Self { number, mnemonic, operand: next_field(), mod1: next_field(), mod2: next_field() })
	}
}

/// One line of the listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListingLine {
	/// The source line.
	pub source:          SourceLine,
	/// Where the instruction was placed.
	pub program_counter: SegmentedAddress,
	/// The encoded instruction, or the reason the mnemonic could not be looked up.
	pub output:          Result<EncodedInstruction, AssemblyError>,
}

impl ListingLine {
	/// All diagnostics of this line.
	#[must_use]
	pub fn diagnostics(&self) -> Vec<AssemblyError> {
		match &self.output {
			Ok(output) => output.diagnostics.clone(),
			Err(error) => vec![error.clone()],
		}
	}

	/// Whether this line failed to assemble.
	#[must_use]
	pub fn is_fatal(&self) -> bool {
		match &self.output {
			Ok(output) => output.fatal,
			Err(_) => true,
		}
	}
}

/// Encode a whole source text, starting at `origin`.
pub fn assemble_source(
	text: &str,
	session: &mut Session,
	symbols: &dyn SymbolResolver,
	origin: SegmentedAddress,
) -> Vec<ListingLine> {
	let mut previous: Option<EncodedInstruction> = None;
	let mut listing = Vec::new();
	for (index, line) in text.lines().enumerate() {
		let Some(source) = SourceLine::parse(index + 1, line) else {
			continue;
		};
		let record = match &previous {
			Some(previous) => InstructionRecord::following(previous, source.operand.clone()),
			None => InstructionRecord::new(origin, source.operand.clone()),
		}
		.with_modifiers(source.mod1.clone(), source.mod2.clone());
		let program_counter = record.program_counter;

		let output = Mnemonic::parse(&source.mnemonic).map(|mnemonic| session.assemble(mnemonic, &record, symbols));
		if let Ok(output) = &output {
			previous = Some(output.clone());
		}
		listing.push(ListingLine { source, program_counter, output });
	}
	listing
}
