//! Symbol lookup.
//!
//! Symbol definition belongs to the front end; the encoders only need to look a symbol up and apply a numeric
//! offset to it.

use std::collections::HashMap;

use crate::assembler::operand::Numeral;
use crate::common::{PseudoAddress, SymbolError};
use crate::segments::{BlockVariant, SegmentedAddress, advance, classify};

/// Resolves `SYMBOL` or `SYMBOL +N` operands.
pub trait SymbolResolver {
	/// Look up `symbol` and move it by the numeral in `offset`, which may be empty.
	///
	/// # Errors
	/// If the symbol is undefined or the offset is not a numeral.
	fn resolve_symbol_plus_offset(
		&self,
		program_counter: &SegmentedAddress,
		symbol: &str,
		offset: &str,
	) -> Result<SegmentedAddress, SymbolError>;
}

/// A plain map from symbol names to their values.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
	symbols: HashMap<String, SegmentedAddress>,
	block:   BlockVariant,
}

impl SymbolTable {
	/// Creates an empty table for the given hardware generation.
	#[must_use]
	pub fn new(block: BlockVariant) -> Self {
		Self { symbols: HashMap::new(), block }
	}

	/// Defines a symbol, replacing any previous definition.
	pub fn define(&mut self, name: impl Into<String>, value: SegmentedAddress) -> &mut Self {
		self.symbols.insert(name.into(), value);
		self
	}

	/// Defines a symbol as the memory location at a pseudo-address.
	pub fn define_address(&mut self, name: impl Into<String>, value: PseudoAddress) -> &mut Self {
		let address = classify(value, self.block);
		self.define(name, address)
	}

	/// Defines a symbol as a plain number.
	pub fn define_constant(&mut self, name: impl Into<String>, value: PseudoAddress) -> &mut Self {
		self.define(name, SegmentedAddress::Constant(value))
	}

	/// The value of a symbol, if it is defined.
	#[must_use]
	pub fn get(&self, name: &str) -> Option<&SegmentedAddress> {
		self.symbols.get(name)
	}
}

impl SymbolResolver for SymbolTable {
	fn resolve_symbol_plus_offset(
		&self,
		_program_counter: &SegmentedAddress,
		symbol: &str,
		offset: &str,
	) -> Result<SegmentedAddress, SymbolError> {
		let value = self.get(symbol).ok_or_else(|| SymbolError::Undefined(symbol.to_owned()))?;
		if offset.trim().is_empty() {
			return Ok(*value);
		}
		let offset = Numeral::parse(offset).ok_or_else(|| SymbolError::BadOffset(offset.to_owned()))?;
		Ok(advance(value, offset.value, self.block))
	}
}
