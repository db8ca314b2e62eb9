//! Per-mnemonic encoding options.

use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

use crate::common::Word;

/// Address bits that a page code occupies.
pub const PAGE_CODE_MASK: Word = 0o7000;
/// Address bits that a quarter code occupies.
pub const QUARTER_CODE_MASK: Word = 0o6000;

/// Opcode bits selected by each quarter code. QC1, QC2 and QC3 share their bit patterns with PC2, PC4 and PC6.
const QUARTER_CODE_BITS: [Word; 4] = [0, 0o2000, 0o4000, 0o6000];

/// One of the eight page codes (bits 10-12 of the address field).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, FromPrimitive, ToPrimitive)]
#[allow(missing_docs)]
pub enum PageCode {
	Pc0 = 0,
	Pc1 = 1,
	Pc2 = 2,
	Pc3 = 3,
	Pc4 = 4,
	Pc5 = 5,
	Pc6 = 6,
	Pc7 = 7,
}

impl PageCode {
	/// The page code an address field lies in.
	#[must_use]
	#[allow(clippy::missing_panics_doc)]
	pub fn of_address(field: Word) -> Self {
		Self::from_u16((field & PAGE_CODE_MASK) >> 9).expect("three bits always name a page code")
	}

	/// The opcode bits this page code sets.
	#[must_use]
	pub const fn bits(self) -> Word {
		(self as Word) << 9
	}
}

/// One of the four quarter codes (bits 11-12 of the address field).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, FromPrimitive, ToPrimitive)]
#[allow(missing_docs)]
pub enum QuarterCode {
	Qc0 = 0,
	Qc1 = 1,
	Qc2 = 2,
	Qc3 = 3,
}

impl QuarterCode {
	/// The quarter code an address field lies in.
	#[must_use]
	#[allow(clippy::missing_panics_doc)]
	pub fn of_address(field: Word) -> Self {
		Self::from_u16((field & QUARTER_CODE_MASK) >> 10).expect("two bits always name a quarter code")
	}

	/// The opcode bits this quarter code sets.
	#[must_use]
	pub const fn bits(self) -> Word {
		QUARTER_CODE_BITS[self as usize]
	}
}

/// How the high bits of the address field are shared with the opcode.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum AddressField {
	/// The whole 12-bit field is address.
	#[default]
	Plain,
	/// The opcode owns the page-code bits.
	PageCode(PageCode),
	/// The opcode owns the quarter-code bits.
	QuarterCode(QuarterCode),
	/// The quarter-code bits must not all be zero, since QC0 selects a different instruction.
	NonZeroQuarterCode,
}

impl AddressField {
	/// Opcode bits this selector contributes.
	#[must_use]
	pub const fn opcode_bits(self) -> Word {
		match self {
			Self::Plain | Self::NonZeroQuarterCode => 0,
			Self::PageCode(page) => page.bits(),
			Self::QuarterCode(quarter) => quarter.bits(),
		}
	}
}

/// Memory class the operand has to be in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum MemoryRequirement {
	/// Either memory.
	#[default]
	Any,
	/// Fixed memory only.
	Fixed,
	/// Erasable memory only.
	Erasable,
}

/// Encoding recipe for one mnemonic: base opcode plus how its operand is merged in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct OpcodeSpec {
	/// Base opcode, with the page or quarter code bits still zero.
	pub opcode:           Word,
	/// The instruction only exists after EXTEND.
	pub requires_extend:  bool,
	/// Memory class restriction on the operand.
	pub memory:           MemoryRequirement,
	/// Address-field selector.
	pub field:            AddressField,
	/// Unsigned numerals in fixed-fixed memory are literals that Raytheon builds shift into the current bank.
	pub literal_numerals: bool,
	/// The operand names the first of two words; the instruction addresses the second.
	pub double_word:      bool,
}

impl OpcodeSpec {
	/// A plain instruction with the given base opcode.
	#[must_use]
	pub const fn new(opcode: Word) -> Self {
		Self {
			opcode,
			requires_extend: false,
			memory: MemoryRequirement::Any,
			field: AddressField::Plain,
			literal_numerals: false,
			double_word: false,
		}
	}

	/// Require a preceding EXTEND.
	#[must_use]
	pub const fn extended(mut self) -> Self {
		self.requires_extend = true;
		self
	}

	/// Require a fixed-memory operand.
	#[must_use]
	pub const fn fixed(mut self) -> Self {
		self.memory = MemoryRequirement::Fixed;
		self
	}

	/// Require an erasable-memory operand.
	#[must_use]
	pub const fn erasable(mut self) -> Self {
		self.memory = MemoryRequirement::Erasable;
		self
	}

	/// Select a page code.
	#[must_use]
	pub const fn page_code(mut self, page: PageCode) -> Self {
		self.field = AddressField::PageCode(page);
		self
	}

	/// Select a quarter code.
	#[must_use]
	pub const fn quarter_code(mut self, quarter: QuarterCode) -> Self {
		self.field = AddressField::QuarterCode(quarter);
		self
	}

	/// Require a non-zero quarter code in the operand.
	#[must_use]
	pub const fn non_zero_quarter_code(mut self) -> Self {
		self.field = AddressField::NonZeroQuarterCode;
		self
	}

	/// Subject unsigned numerals to the Raytheon literal shift.
	#[must_use]
	pub const fn numeric(mut self) -> Self {
		self.literal_numerals = true;
		self
	}

	/// Address the word after the operand.
	#[must_use]
	pub const fn double_word(mut self) -> Self {
		self.double_word = true;
		self
	}
}
