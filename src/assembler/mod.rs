//! Instruction encoding.
//!
//! The front end hands one [`InstructionRecord`] per source line to a [`Session`], which picks the encoder from
//! the opcode catalog and returns an [`EncodedInstruction`]. The EXTEND and INDEX state of the output feeds the
//! record of the following line.

use ::log::debug;

use crate::cli::AssemblerOptions;
use crate::common::{PseudoAddress, VariantName, WORD_MASK, Word};
use crate::error::AssemblyError;
use crate::segments::{Advancer, SegmentedAddress, advance};
use crate::symbol::SymbolResolver;

mod erasable;
mod general;
pub mod opcode;
pub mod operand;
mod table;

pub use opcode::{AddressField, MemoryRequirement, OpcodeSpec, PageCode, QuarterCode};
pub use table::{CatalogEntry, Mnemonic, catalog_entry};


/// Where a pending EXTEND came from.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ExtendState {
	/// No EXTEND is pending.
	#[default]
	None,
	/// A real EXTEND pseudo-instruction.
	FromExtend,
	/// A literal `TC 6`. These turn up as INDEX targets that never actually extend anything, so a following
	/// basic instruction is tolerated.
	FromExplicitTc6,
}

/// The bank registers as the front end tracks them from EBANK= and SBANK= directives.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct BankContext {
	/// Erasable bank in effect.
	pub ebank: u8,
	/// Superbank in effect.
	pub sbank: u8,
}

/// One instruction line as the front end hands it to the encoders.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InstructionRecord {
	/// Operand text.
	pub operand:         String,
	/// First modifier field, usually an offset such as `+2` or a lone `+`.
	pub mod1:            String,
	/// Second modifier field; a lone number here completes a `SYMBOL + N` operand.
	pub mod2:            String,
	/// The mnemonic this instruction was written as, if it is an alias of another one (`EXTEND` for `TC 6`).
	pub alias:           Option<String>,
	/// Location counter of this instruction.
	pub program_counter: SegmentedAddress,
	/// EXTEND state left by the previous instruction.
	pub extend:          ExtendState,
	/// Whether the previous instruction was an INDEX.
	pub index_pending:   bool,
	/// Bank registers in effect.
	pub banks:           BankContext,
}

impl InstructionRecord {
	/// A record with no modifiers and no pending state.
	#[must_use]
	pub fn new(program_counter: SegmentedAddress, operand: impl Into<String>) -> Self {
		Self {
			operand: operand.into(),
			mod1: String::new(),
			mod2: String::new(),
			alias: None,
			program_counter,
			extend: ExtendState::None,
			index_pending: false,
			banks: BankContext::default(),
		}
	}

	/// Set the modifier fields.
	#[must_use]
	pub fn with_modifiers(mut self, mod1: impl Into<String>, mod2: impl Into<String>) -> Self {
		self.mod1 = mod1.into();
		self.mod2 = mod2.into();
		self
	}

	/// Set the EXTEND state.
	#[must_use]
	pub const fn with_extend(mut self, extend: ExtendState) -> Self {
		self.extend = extend;
		self
	}

	/// Mark the instruction as the target of an INDEX.
	#[must_use]
	pub const fn indexed(mut self) -> Self {
		self.index_pending = true;
		self
	}

	/// The record for the next line: location counter, bank registers and pending state come from `previous`.
	#[must_use]
	pub fn following(previous: &EncodedInstruction, operand: impl Into<String>) -> Self {
		Self {
			extend: previous.extend,
			index_pending: previous.index_pending,
			banks: previous.banks,
			..Self::new(previous.program_counter, operand)
		}
	}
}

/// The result of encoding one instruction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedInstruction {
	/// Encoded words; always exactly one for instructions.
	pub words:           Vec<Word>,
	/// Location counter after this instruction.
	pub program_counter: SegmentedAddress,
	/// Bank registers, passed through.
	pub banks:           BankContext,
	/// The instruction could not be encoded; the word is a best guess and the run has failed.
	pub fatal:           bool,
	/// Something is suspicious but the word is good.
	pub warning:         bool,
	/// Diagnostics in the order they were found. The last one is the one a listing prints.
	pub diagnostics:     Vec<AssemblyError>,
	/// The operand address as finally used.
	pub operand:         SegmentedAddress,
	/// EXTEND state for the next instruction.
	pub extend:          ExtendState,
	/// INDEX state for the next instruction.
	pub index_pending:   bool,
}

impl EncodedInstruction {
	fn new(program_counter: SegmentedAddress, banks: BankContext) -> Self {
		Self {
			words: vec![0],
			program_counter,
			banks,
			fatal: false,
			warning: false,
			diagnostics: Vec::new(),
			operand: SegmentedAddress::Invalid,
			extend: ExtendState::None,
			index_pending: false,
		}
	}

	/// Record a diagnostic and raise the matching flag.
	fn report(&mut self, error: AssemblyError) {
		debug!("{error}");
		if error.is_fatal() {
			self.fatal = true;
		} else {
			self.warning = true;
		}
		self.diagnostics.push(error);
	}

	/// Record a diagnostic that logically precedes everything the encoder found.
	fn report_first(&mut self, error: AssemblyError) {
		self.report(error);
		self.diagnostics.rotate_right(1);
	}

	/// The diagnostic a listing shows for this instruction.
	#[must_use]
	pub fn message(&self) -> Option<String> {
		self.diagnostics.last().map(ToString::to_string)
	}

	/// The instruction word.
	#[must_use]
	pub fn word(&self) -> Word {
		self.words.first().copied().unwrap_or_default()
	}

	#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
	fn add_opcode_offset(&mut self, offset: PseudoAddress) {
		if let Some(word) = self.words.first_mut() {
			*word = PseudoAddress::from(*word).wrapping_add(offset) as Word & WORD_MASK;
		}
	}
}

/// State that lives for one assembly run and is threaded through every encoder call in source order.
#[derive(Clone, Debug)]
pub struct Session {
	options:       AssemblerOptions,
	/// One-shot: the next general encode accepts and passes through the incoming EXTEND state.
	keep_extend:   bool,
	/// Numeral found in the modifier fields of the previous instruction, added to the next opcode.
	opcode_offset: Option<PseudoAddress>,
	advancer:      Advancer,
}

impl Session {
	/// Creates a session using the default location-counter arithmetic.
	#[must_use]
	pub const fn new(options: AssemblerOptions) -> Self {
		Self { options, keep_extend: false, opcode_offset: None, advancer: advance }
	}

	/// Replace the location-counter arithmetic.
	#[must_use]
	pub const fn with_advancer(mut self, advancer: Advancer) -> Self {
		self.advancer = advancer;
		self
	}

	/// The assembly-wide switches.
	#[must_use]
	pub const fn options(&self) -> &AssemblerOptions {
		&self.options
	}

	/// Make the next general encode accept its incoming EXTEND state and pass it through unchanged. INDEX uses
	/// this to keep an EXTEND alive for the instruction it modifies.
	pub const fn keep_extend_once(&mut self) {
		self.keep_extend = true;
	}

	/// The opcode offset that the next encode will add to its word.
	#[must_use]
	pub const fn pending_opcode_offset(&self) -> Option<PseudoAddress> {
		self.opcode_offset
	}

	fn advance(&self, current: &SegmentedAddress, offset: PseudoAddress) -> SegmentedAddress {
		(self.advancer)(current, offset, self.options.block)
	}

	/// Remember the numeral in the modifier fields, if any, for the next instruction.
	fn capture_opcode_offset(&mut self, modifiers: &str) {
		if let Some(numeral) = operand::Numeral::parse(modifiers) {
			trace!("carrying opcode offset {} to the next instruction", numeral.value);
			self.opcode_offset = Some(numeral.value);
		}
	}

	/// Encode one instruction through its catalog entry.
	pub fn assemble(
		&mut self,
		mnemonic: Mnemonic,
		record: &InstructionRecord,
		symbols: &dyn SymbolResolver,
	) -> EncodedInstruction {
		trace!("{} {} at {}", mnemonic.variant_name(), record.operand, record.program_counter);
		match catalog_entry(mnemonic, self.options.block) {
			CatalogEntry::General(spec) => self.encode_general(record, spec, symbols),
			CatalogEntry::DefaultOperand { spec, operand } =>
				if record.operand.is_empty() {
					let record = InstructionRecord { operand: operand.to_owned(), ..record.clone() };
					self.encode_general(&record, spec, symbols)
				} else {
					self.encode_general(record, spec, symbols)
				},
			CatalogEntry::Implied { spec, operand } => {
				let extra_fields = !record.operand.is_empty();
				let record = InstructionRecord {
					operand: operand.to_owned(),
					mod1: String::new(),
					mod2: String::new(),
					alias: Some(mnemonic.variant_name().to_owned()),
					..record.clone()
				};
				let mut output = self.encode_general(&record, spec, symbols);
				if extra_fields {
					output.report_first(AssemblyError::ExtraFields);
				}
				output
			},
			CatalogEntry::Edrupt(spec) =>
				if self.options.blk2 {
					// BLK2 assembled EDRUPT as an implied-address instruction, always 07000.
					let extra_fields = !record.operand.is_empty();
					let record = InstructionRecord { operand: "0".to_owned(), ..record.clone() };
					let mut output = self.encode_general(&record, spec, symbols);
					if extra_fields {
						output.report_first(AssemblyError::ExtraFields);
					}
					output
				} else {
					self.encode_general(record, spec, symbols)
				},
			CatalogEntry::Index(spec) => {
				// INDEX may sit between an EXTEND and the extended instruction it modifies.
				self.keep_extend_once();
				let mut output = self.encode_general(record, spec, symbols);
				output.index_pending = true;
				output
			},
			CatalogEntry::ErasableDestination => self.encode_erasable_destination(record, symbols),
		}
	}
}
