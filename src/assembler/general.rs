//! The encoder shared by nearly every basic and extended instruction.

use super::opcode::{AddressField, MemoryRequirement, OpcodeSpec, PAGE_CODE_MASK, PageCode, QUARTER_CODE_MASK, QuarterCode};
use super::operand::{Numeral, NumeralMode, resolve_operand};
use super::{EncodedInstruction, ExtendState, InstructionRecord, Session};
use crate::common::{PseudoAddress, Word};
use crate::error::AssemblyError;
use crate::segments::{BlockVariant, FIXED_BANK_SIZE, Location, Region, SegmentedAddress, classify};
use crate::symbol::SymbolResolver;

/// Literals in this range address fixed-fixed memory, but Raytheon's assembler placed them in the current bank.
const RAYTHEON_LITERALS: std::ops::Range<PseudoAddress> = 0o2000 .. 0o4000;

impl Session {
	/// Encode one instruction from its base opcode and options.
	pub fn encode_general(
		&mut self,
		record: &InstructionRecord,
		spec: OpcodeSpec,
		symbols: &dyn SymbolResolver,
	) -> EncodedInstruction {
		let opcode_offset = self.opcode_offset.take();
		let keep_extend = std::mem::take(&mut self.keep_extend);
		let block = self.options.block;

		let mut output = EncodedInstruction::new(self.advance(&record.program_counter, 1), record.banks);
		if output.program_counter.is_overflow() {
			output.report(AssemblyError::NextCodeMayOverflow);
		}

		let field = match block {
			BlockVariant::Block1 => AddressField::Plain,
			BlockVariant::Block2 => spec.field,
		};
		let opcode = spec.opcode | field.opcode_bits();
		output.words[0] = if field == AddressField::NonZeroQuarterCode { opcode | QUARTER_CODE_MASK } else { opcode };

		if block == BlockVariant::Block2 {
			match (record.extend, spec.requires_extend) {
				(ExtendState::None, true) => output.report(AssemblyError::MissingExtend),
				(ExtendState::FromExtend, false) if !record.index_pending && !keep_extend =>
					output.report(AssemblyError::IllegalExtend),
				_ => {},
			}
		}

		let modifiers = format!("{}{}", record.mod1, record.mod2);
		match self.resolve(record, spec, &modifiers, symbols) {
			Ok(address) => {
				output.operand = address;
				match self.locate(address, spec) {
					Ok(location) => {
						output.operand = SegmentedAddress::Address(location);
						let address_field = if record.index_pending {
							location.s_reg
						} else {
							check_operand(&mut output, &location, spec.memory, field, opcode)
						};
						output.words[0] = opcode | address_field;
					},
					Err(error) => output.report(error),
				}
			},
			Err(error) => output.report(error),
		}

		output.extend = if keep_extend {
			record.extend
		} else if opcode == 0 && !spec.requires_extend && is_register_six(&output.operand) {
			if record.alias.is_none() { ExtendState::FromExplicitTc6 } else { ExtendState::FromExtend }
		} else {
			ExtendState::None
		};
		output.index_pending = false;

		if let Some(offset) = opcode_offset {
			output.add_opcode_offset(offset);
		}
		output
	}

	/// Resolve the operand text, remembering a numeral in the modifiers for the next instruction when the operand
	/// itself is numeric.
	fn resolve(
		&mut self,
		record: &InstructionRecord,
		spec: OpcodeSpec,
		modifiers: &str,
		symbols: &dyn SymbolResolver,
	) -> Result<SegmentedAddress, AssemblyError> {
		let numeral = Numeral::parse(&record.operand);
		let resolved = match numeral {
			Some(Numeral { value, signed: false })
				if spec.literal_numerals && self.options.raytheon && RAYTHEON_LITERALS.contains(&value) =>
			{
				let fbank = record.program_counter.location().and_then(Location::fbank).unwrap_or_default();
				let shifted = value + 0o10000 + PseudoAddress::from(fbank) * FIXED_BANK_SIZE;
				trace!("shifting literal {value:o} to {shifted:o}");
				Ok(classify(shifted, self.options.block))
			},
			_ => resolve_operand(
				&record.operand,
				modifiers,
				&record.program_counter,
				NumeralMode::Address,
				self.options.block,
				self.advancer,
				symbols,
			),
		};
		if numeral.is_some() {
			self.capture_opcode_offset(modifiers);
		}
		resolved
	}

	/// Turn a resolved operand into the memory location the instruction addresses.
	fn locate(&self, address: SegmentedAddress, spec: OpcodeSpec) -> Result<Location, AssemblyError> {
		let location = match address {
			SegmentedAddress::Invalid => return Err(AssemblyError::UnresolvedDestination),
			SegmentedAddress::Overflow { .. } => return Err(AssemblyError::DestinationOutOfRange),
			// Bare numbers are accepted where they could only mean an unswitched erasable register.
			SegmentedAddress::Constant(value) => match classify(value, self.options.block) {
				SegmentedAddress::Address(location) if location.region == Region::UnbankedErasable => location,
				_ => return Err(AssemblyError::NotAnAddress),
			},
			SegmentedAddress::Address(location) => location,
		};
		if !spec.double_word {
			return Ok(location);
		}
		match self.advance(&SegmentedAddress::Address(location), 1) {
			SegmentedAddress::Address(next) => Ok(next),
			_ => Err(AssemblyError::DestinationOutOfRange),
		}
	}
}

/// Check the operand against the memory and address-field restrictions and return the address field to merge
/// into the opcode. Conflicting bits are cleared (or forced, for non-zero quarter codes) in the result.
fn check_operand(
	output: &mut EncodedInstruction,
	location: &Location,
	memory: MemoryRequirement,
	field: AddressField,
	opcode: Word,
) -> Word {
	let mut address = location.s_reg;
	match memory {
		MemoryRequirement::Fixed if !location.is_fixed() => {
			address &= !0o7000;
			output.report(AssemblyError::NotInFixedMemory);
		},
		MemoryRequirement::Erasable if !location.is_erasable() => {
			address &= !0o7600;
			output.report(AssemblyError::NotInErasableMemory);
		},
		_ => {},
	}

	match field {
		AddressField::Plain => {},
		AddressField::PageCode(_) => {
			// Compared against the opcode itself, since some base opcodes already carry page bits.
			let page = PageCode::of_address(address);
			if page != PageCode::Pc0 && page != PageCode::of_address(opcode) {
				address &= !PAGE_CODE_MASK;
				output.report(AssemblyError::OperandOutOfRange);
			}
		},
		AddressField::QuarterCode(_) => {
			let quarter = QuarterCode::of_address(address);
			if quarter != QuarterCode::Qc0 && quarter != QuarterCode::of_address(opcode) {
				address &= !QUARTER_CODE_MASK;
				output.report(AssemblyError::QuarterCodeOutOfRange { value: address });
			}
		},
		AddressField::NonZeroQuarterCode =>
			if QuarterCode::of_address(location.s_reg) == QuarterCode::Qc0 {
				address |= QUARTER_CODE_MASK;
				output.report(AssemblyError::OperandOutOfRange);
			},
	}
	address
}

/// Whether the operand is register 6, which makes `TC` behave as EXTEND.
fn is_register_six(operand: &SegmentedAddress) -> bool {
	match operand {
		SegmentedAddress::Constant(value) => *value == 6,
		SegmentedAddress::Address(location) => location.region == Region::UnbankedErasable && location.s_reg == 6,
		_ => false,
	}
}
