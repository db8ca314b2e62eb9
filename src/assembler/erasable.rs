//! ECADR: a constant holding the address of an erasable register.

use super::operand::{Numeral, NumeralMode, resolve_operand, resolve_symbol};
use super::{EncodedInstruction, ExtendState, InstructionRecord, Session};
use crate::common::{PseudoAddress, Word};
use crate::error::AssemblyError;
use crate::segments::{Location, Region, SegmentedAddress, classify_erasable_banked};
use crate::symbol::SymbolResolver;

/// Highest pseudo-address in erasable memory.
const MAX_ERASABLE: PseudoAddress = 0o3777;
/// Highest pseudo-address in unswitched erasable memory.
const MAX_UNBANKED_ERASABLE: PseudoAddress = 0o1377;

impl Session {
	/// Encode an erasable address constant. The word is the pseudo-address of the register, or 0 if there is
	/// none.
	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	pub fn encode_erasable_destination(
		&self,
		record: &InstructionRecord,
		symbols: &dyn SymbolResolver,
	) -> EncodedInstruction {
		let mut output = EncodedInstruction::new(self.advance(&record.program_counter, 1), record.banks);
		if output.program_counter.is_overflow() {
			output.report(AssemblyError::NextCodeMayOverflow);
		}

		if record.extend != ExtendState::None && !record.index_pending {
			output.report(AssemblyError::IllegalExtend);
		}
		if record.index_pending {
			output.report(AssemblyError::IllegalIndex);
		}

		// A numeral with an offset is not a numeral operand, so it has to resolve as a symbol.
		let resolved = if Numeral::parse(&record.operand).is_some() && !record.mod1.is_empty() {
			resolve_symbol(&record.operand, &record.mod1, &record.program_counter, symbols)
		} else {
			resolve_operand(
				&record.operand,
				&record.mod1,
				&record.program_counter,
				NumeralMode::Constant,
				self.options.block,
				self.advancer,
				symbols,
			)
		};
		match resolved.and_then(erasable_location) {
			Ok(location) => {
				output.operand = SegmentedAddress::Address(location);
				output.words[0] = location.value as Word;
			},
			Err(error) => output.report(error),
		}
		output
	}
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn erasable_location(address: SegmentedAddress) -> Result<Location, AssemblyError> {
	let address = match address {
		SegmentedAddress::Invalid => return Err(AssemblyError::UnresolvedDestination),
		SegmentedAddress::Constant(value @ 0 ..= MAX_UNBANKED_ERASABLE) =>
			SegmentedAddress::Address(Location { value, region: Region::UnbankedErasable, s_reg: value as Word }),
		SegmentedAddress::Constant(value @ 0 ..= MAX_ERASABLE) => classify_erasable_banked(value),
		other => other,
	};
	match address {
		SegmentedAddress::Address(location) if !location.is_erasable() => Err(AssemblyError::DestinationNotErasable),
		SegmentedAddress::Address(location) if !(0 ..= MAX_ERASABLE).contains(&location.value) =>
			Err(AssemblyError::DestinationOutOfRange),
		SegmentedAddress::Address(location) => Ok(location),
		SegmentedAddress::Overflow { .. } => Err(AssemblyError::DestinationOutOfRange),
		_ => Err(AssemblyError::NotAMemoryAddress),
	}
}
