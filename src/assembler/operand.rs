//! Operand text: numerals and symbolic references.

use crate::AssemblyError;
use crate::common::PseudoAddress;
use crate::segments::{Advancer, BlockVariant, SegmentedAddress, classify};
use crate::symbol::SymbolResolver;

/// A numeric operand.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Numeral {
	/// The value, including its sign.
	pub value:  PseudoAddress,
	/// Whether the text carried an explicit sign, which makes it relative to the location counter.
	pub signed: bool,
}

impl Numeral {
	/// Parse an octal-or-decimal numeral: an optional sign, then digits. A trailing `D` makes the digits
	/// decimal; otherwise they are octal and may not contain 8 or 9.
	#[must_use]
	pub fn parse(text: &str) -> Option<Self> {
		let text = text.trim();
		let (negative, signed, digits) = match text.as_bytes().first()? {
			b'+' => (false, true, &text[1 ..]),
			b'-' => (true, true, &text[1 ..]),
			_ => (false, false, text),
		};
		let (digits, radix) = match digits.strip_suffix(['D', 'd']) {
			Some(decimal) => (decimal, 10),
			None => (digits, 8),
		};
		if digits.is_empty() || !digits.bytes().all(|digit| digit.is_ascii_digit()) {
			return None;
		}
		let magnitude = PseudoAddress::from_str_radix(digits, radix).ok()?;
		Some(Self { value: if negative { -magnitude } else { magnitude }, signed })
	}
}

/// What an unsigned numeral operand stands for.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NumeralMode {
	/// An absolute pseudo-address.
	#[default]
	Address,
	/// A plain number, which only some encoders accept in place of an address.
	Constant,
}

/// Resolve operand text to an address. Signed numerals are relative to the location counter, unsigned ones are
/// read according to `mode`, and anything else is a symbol with `offset` as its offset text.
///
/// # Errors
/// If the symbol resolver fails; the diagnostic names the operand text as written.
pub fn resolve_operand(
	operand: &str,
	offset: &str,
	program_counter: &SegmentedAddress,
	mode: NumeralMode,
	block: BlockVariant,
	advance: Advancer,
	symbols: &dyn SymbolResolver,
) -> Result<SegmentedAddress, AssemblyError> {
	match Numeral::parse(operand) {
		Some(Numeral { value, signed: true }) => Ok(advance(program_counter, value, block)),
		Some(Numeral { value, signed: false }) => Ok(match mode {
			NumeralMode::Address => classify(value, block),
			NumeralMode::Constant => SegmentedAddress::Constant(value),
		}),
		None => resolve_symbol(operand, offset, program_counter, symbols),
	}
}

/// Resolve operand text as a symbol plus offset, whatever it looks like.
///
/// # Errors
/// If the symbol resolver fails; the diagnostic names the operand text as written.
pub fn resolve_symbol(
	operand: &str,
	offset: &str,
	program_counter: &SegmentedAddress,
	symbols: &dyn SymbolResolver,
) -> Result<SegmentedAddress, AssemblyError> {
	symbols.resolve_symbol_plus_offset(program_counter, operand, offset).map_err(|error| {
		::log::debug!("cannot resolve `{operand}` `{offset}`: {error}");
		AssemblyError::UndefinedSymbol { symbol: operand.to_owned() }
	})
}
