//! Assembler diagnostics.

use miette::{Diagnostic, Severity};
use thiserror::Error;

/// All diagnostics that the instruction encoders can report to the user.
///
/// The display text of each variant is the exact message a listing shows for the condition, so front ends may
/// match on it.
#[derive(Error, Debug, Diagnostic, Clone, Eq, PartialEq)]
#[allow(clippy::module_name_repetitions, missing_docs)]
pub enum AssemblyError {
	//#region Program counter
	#[error("Next code may overflow storage.")]
	#[diagnostic(
		code(agcasm::storage_overflow),
		severity(Warning),
		help("The location counter has left its memory bank; the following instruction will not fit.")
	)]
	NextCodeMayOverflow,

	#[error("Addresses must be between 0 and 0117777.")]
	#[diagnostic(code(agcasm::address_out_of_bounds), severity(Error))]
	AddressOutOfBounds { value: i32 },
	//#endregion

	//#region EXTEND and INDEX sequencing
	#[error("Illegally preceded by EXTEND.")]
	#[diagnostic(
		code(agcasm::illegal_extend),
		severity(Error),
		help("Only extended instructions may follow EXTEND. Remove the EXTEND or use the extended opcode.")
	)]
	IllegalExtend,

	#[error("Required EXTEND is missing.")]
	#[diagnostic(code(agcasm::missing_extend), severity(Error), help("Insert an EXTEND before this instruction."))]
	MissingExtend,

	#[error("Illegally preceded by INDEX.")]
	#[diagnostic(code(agcasm::illegal_index), severity(Error))]
	IllegalIndex,
	//#endregion

	//#region Operand resolution
	#[error("Symbol \"{symbol}\" undefined or offset bad")]
	#[diagnostic(
		code(agcasm::undefined_symbol),
		severity(Error),
		help("Any symbol must be defined somewhere. Did you misspell the symbol's name?")
	)]
	UndefinedSymbol { symbol: String },

	#[error("Destination address not resolved.")]
	#[diagnostic(code(agcasm::unresolved_destination), severity(Error))]
	UnresolvedDestination,

	#[error("Destination address out of range.")]
	#[diagnostic(code(agcasm::destination_out_of_range), severity(Error))]
	DestinationOutOfRange,

	#[error("Destination not an address.")]
	#[diagnostic(
		code(agcasm::not_an_address),
		severity(Error),
		help("Only constants in unswitched erasable memory are accepted in place of an address.")
	)]
	NotAnAddress,

	#[error("Destination is not a memory address.")]
	#[diagnostic(code(agcasm::not_a_memory_address), severity(Error))]
	NotAMemoryAddress,

	#[error("Destination not in erasable memory.")]
	#[diagnostic(code(agcasm::destination_not_erasable), severity(Error))]
	DestinationNotErasable,
	//#endregion

	//#region Memory class and address field
	#[error("The address is not in fixed memory.")]
	#[diagnostic(code(agcasm::not_fixed), severity(Error))]
	NotInFixedMemory,

	#[error("The address is not in erasable memory.")]
	#[diagnostic(code(agcasm::not_erasable), severity(Error))]
	NotInErasableMemory,

	#[error("Operand out of range.")]
	#[diagnostic(
		code(agcasm::operand_out_of_range),
		severity(Error),
		help("The operand's high address bits collide with the opcode's page or quarter code.")
	)]
	OperandOutOfRange,

	#[error("Operand (0{value:o}) out of range.")]
	#[diagnostic(
		code(agcasm::quarter_code_out_of_range),
		severity(Error),
		help("The operand's quarter-code bits collide with the opcode's quarter code.")
	)]
	QuarterCodeOutOfRange { value: u16 },
	//#endregion

	//#region Front end
	#[error("Extra fields are present.")]
	#[diagnostic(code(agcasm::extra_fields), severity(Warning), help("This instruction takes no operand."))]
	ExtraFields,

	#[error("`{constant}` is not a valid {typename}")]
	#[diagnostic(code(agcasm::invalid_constant), severity(Error))]
	InvalidConstant { constant: String, typename: String },
	//#endregion
}

impl AssemblyError {
	/// Whether this diagnostic aborts the instruction it was reported for. Everything that is not a warning is
	/// fatal.
	#[must_use]
	pub fn is_fatal(&self) -> bool {
		!matches!(self.severity(), Some(Severity::Warning | Severity::Advice))
	}
}

/// Failure of the external symbol resolver.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum SymbolError {
	/// The symbol is not defined.
	#[error("symbol `{0}` is not defined")]
	Undefined(String),
	/// The offset text following the symbol is not a numeral.
	#[error("offset `{0}` is not a number")]
	BadOffset(String),
}
