//! Common includes and functions for both library and executable.

use std::fmt::Write;

pub use super::error::{AssemblyError, SymbolError};

/// A flat address over the whole erasable and fixed memory, 0 through 0117777.
pub type PseudoAddress = i32;

/// One 15-bit machine word. The parity bit is not represented.
pub type Word = u16;

/// Mask of the bits a machine word can hold.
pub const WORD_MASK: Word = 0o77777;

/// Parse a value from its source text.
pub trait Parse: Sized {
	/// Parse the given text.
	/// # Errors
	/// If the text does not name any value of this type.
	fn parse(value: &str) -> Result<Self, AssemblyError>;
}

/// Provides a name for enum variants.
pub trait VariantName {
	/// Returns the name of this variant.
	fn variant_name(&self) -> &'static str;
}

/// Pretty-print words as five-digit octal, eight to a line like the listings of the time.
#[must_use]
pub fn pretty_octal(words: &[Word]) -> String {
	let mut string = String::new();
	// five digits + ' ' per word
	string.reserve(words.len() * 6);
	for line in words.chunks(8) {
		for word in line {
			// Writing to a String cannot fail.
			let _ = write!(string, " {word:05o}");
		}
		string.push('\n');
	}
	string
}
