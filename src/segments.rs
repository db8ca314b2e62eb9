//! Segmented address model.
//!
//! Both memories are addressed through a 12-bit register field (the "S register"); which physical word that
//! field selects depends on the memory region and the bank registers. Pseudo-addresses number every word
//! linearly, and this module converts between the two views.

use std::fmt::{Display, Formatter};

use crate::common::{PseudoAddress, Word};

/// The largest valid pseudo-address.
pub const MAX_PSEUDO_ADDRESS: PseudoAddress = 0o117777;

/// Words per erasable bank.
pub const ERASABLE_BANK_SIZE: PseudoAddress = 0o400;
/// Words per fixed bank.
pub const FIXED_BANK_SIZE: PseudoAddress = 0o2000;

/// S-register address of the switched erasable window.
const BANKED_ERASABLE_BASE: Word = 0o1400;
/// S-register address of the switched fixed window.
const BANKED_FIXED_BASE: Word = 0o2000;
/// S-register address of the switched fixed window on Block I.
const BLOCK1_BANKED_FIXED_BASE: Word = 0o6000;

/// First pseudo-address of the banked fixed memory.
const BANKED_FIXED_START: PseudoAddress = 0o10000;
/// First pseudo-address that needs the superbank bit.
const SUPER_BANK_START: PseudoAddress = 0o110000;
/// Pseudo-address base that superbank numbers are counted from.
const SUPER_BANK_BASE: PseudoAddress = 0o30000;

/// Hardware generation being assembled for. The generations disagree on memory layout and opcode numbering.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "binaries", derive(clap::ValueEnum))]
pub enum BlockVariant {
	/// The early generation without switched erasable memory or EXTEND-based instructions.
	Block1,
	/// The flight generation.
	#[default]
	Block2,
}

/// Erasable (read/write) or fixed (read-only) memory.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MemoryClass {
	/// Read/write core memory.
	Erasable,
	/// Read-only rope memory.
	Fixed,
}

/// The memory region an address lies in. Bank numbers only exist for the switched regions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Region {
	/// Erasable memory that is always addressable.
	UnbankedErasable,
	/// Erasable memory behind the EBANK register.
	BankedErasable {
		/// Erasable bank number.
		ebank: u8,
	},
	/// Fixed memory that is always addressable ("fixed-fixed").
	UnbankedFixed,
	/// Fixed memory behind the FBANK register.
	BankedFixed {
		/// Fixed bank number as loaded into FBANK.
		fbank:      u8,
		/// Whether the superbank bit must be set as well.
		super_bank: bool,
	},
}

impl Region {
	/// The memory class of this region.
	#[must_use]
	pub const fn memory_class(self) -> MemoryClass {
		match self {
			Self::UnbankedErasable | Self::BankedErasable { .. } => MemoryClass::Erasable,
			Self::UnbankedFixed | Self::BankedFixed { .. } => MemoryClass::Fixed,
		}
	}

	/// Whether the region is only reachable through a bank register.
	#[must_use]
	pub const fn is_banked(self) -> bool {
		matches!(self, Self::BankedErasable { .. } | Self::BankedFixed { .. })
	}
}

/// A fully classified memory location.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Location {
	/// The pseudo-address this location was classified from.
	pub value:  PseudoAddress,
	/// Memory region and bank.
	pub region: Region,
	/// The address as the instruction's address field encodes it.
	pub s_reg:  Word,
}

impl Location {
	/// Memory class of this location.
	#[must_use]
	pub const fn memory_class(&self) -> MemoryClass {
		self.region.memory_class()
	}

	/// Whether this location is in erasable memory.
	#[must_use]
	pub const fn is_erasable(&self) -> bool {
		matches!(self.memory_class(), MemoryClass::Erasable)
	}

	/// Whether this location is in fixed memory.
	#[must_use]
	pub const fn is_fixed(&self) -> bool {
		matches!(self.memory_class(), MemoryClass::Fixed)
	}

	/// The erasable bank, if this is banked erasable memory.
	#[must_use]
	pub const fn ebank(&self) -> Option<u8> {
		match self.region {
			Region::BankedErasable { ebank } => Some(ebank),
			_ => None,
		}
	}

	/// The FBANK register value, if this is banked fixed memory.
	#[must_use]
	pub const fn fbank(&self) -> Option<u8> {
		match self.region {
			Region::BankedFixed { fbank, .. } => Some(fbank),
			_ => None,
		}
	}

	/// The physical fixed bank this location lives in. Unlike [`Self::fbank`] this also numbers the fixed-fixed
	/// banks, which the hardware selects from the address field itself, and adds the superbank offset.
	#[must_use]
	pub const fn fixed_bank(&self, block: BlockVariant) -> Option<u8> {
		match (self.region, block) {
			(Region::BankedFixed { fbank, super_bank: true }, _) => Some(fbank + 0o10),
			(Region::BankedFixed { fbank, super_bank: false }, _) => Some(fbank),
			(Region::UnbankedFixed, BlockVariant::Block2) => Some(if self.s_reg < 0o6000 { 2 } else { 3 }),
			(Region::UnbankedFixed, BlockVariant::Block1) => Some(if self.s_reg < 0o4000 { 1 } else { 2 }),
			_ => None,
		}
	}

	/// Re-derive the pseudo-address from bank and register alone.
	#[must_use]
	pub fn pseudo_address(&self, block: BlockVariant) -> PseudoAddress {
		let s_reg = PseudoAddress::from(self.s_reg);
		match (self.region, block) {
			(Region::UnbankedErasable | Region::UnbankedFixed, _) => s_reg,
			(Region::BankedErasable { ebank }, _) =>
				PseudoAddress::from(ebank) * ERASABLE_BANK_SIZE + s_reg - PseudoAddress::from(BANKED_ERASABLE_BASE),
			// Bank 3 is the first switched bank, and its window already starts at 06000.
			(Region::BankedFixed { fbank, .. }, BlockVariant::Block1) =>
				(PseudoAddress::from(fbank) - 3) * FIXED_BANK_SIZE + s_reg,
			(Region::BankedFixed { fbank, super_bank }, BlockVariant::Block2) =>
				(if super_bank { SUPER_BANK_BASE } else { BANKED_FIXED_START })
					+ PseudoAddress::from(fbank) * FIXED_BANK_SIZE
					+ s_reg - PseudoAddress::from(BANKED_FIXED_BASE),
		}
	}
}

/// The classified form of an address or operand value. Exactly one category holds at a time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SegmentedAddress {
	/// Not resolvable, or outside the pseudo-address space.
	Invalid,
	/// Address arithmetic left the bank or region it started in.
	Overflow {
		/// The pseudo-address the arithmetic produced.
		value: PseudoAddress,
	},
	/// A plain number rather than a memory address.
	Constant(PseudoAddress),
	/// A memory address.
	Address(Location),
}

impl SegmentedAddress {
	/// The classified location, if this is an address.
	#[must_use]
	pub const fn location(&self) -> Option<&Location> {
		match self {
			Self::Address(location) => Some(location),
			_ => None,
		}
	}

	/// The address field value, if this is an address.
	#[must_use]
	pub const fn s_reg(&self) -> Option<Word> {
		match self {
			Self::Address(location) => Some(location.s_reg),
			_ => None,
		}
	}

	/// The underlying number for everything but invalid values.
	#[must_use]
	pub const fn value(&self) -> Option<PseudoAddress> {
		match self {
			Self::Invalid => None,
			Self::Overflow { value } | Self::Constant(value) => Some(*value),
			Self::Address(location) => Some(location.value),
		}
	}

	/// Whether this is an invalid value.
	#[must_use]
	pub const fn is_invalid(&self) -> bool {
		matches!(self, Self::Invalid)
	}

	/// Whether address arithmetic overflowed.
	#[must_use]
	pub const fn is_overflow(&self) -> bool {
		matches!(self, Self::Overflow { .. })
	}
}

impl Display for SegmentedAddress {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Invalid => write!(f, "INVALID"),
			Self::Overflow { .. } => write!(f, "OVERFLOW"),
			Self::Constant(value) if *value < 0 => write!(f, "-{:o}", value.unsigned_abs()),
			Self::Constant(value) => write!(f, "{value:o}"),
			Self::Address(Location { region: Region::BankedErasable { ebank }, s_reg, .. }) =>
				write!(f, "E{ebank:o},{s_reg:04o}"),
			Self::Address(Location { region: Region::BankedFixed { fbank, super_bank }, s_reg, .. }) =>
				write!(f, "{:02o},{s_reg:04o}", if *super_bank { fbank + 0o10 } else { *fbank }),
			Self::Address(Location { s_reg, .. }) => write!(f, "{s_reg:04o}"),
		}
	}
}

/// Classify a pseudo-address, preferring unbanked memory whenever the address can be reached without a bank
/// register.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn classify(value: PseudoAddress, block: BlockVariant) -> SegmentedAddress {
	if !(0 ..= MAX_PSEUDO_ADDRESS).contains(&value) {
		return SegmentedAddress::Invalid;
	}

	let location = match block {
		BlockVariant::Block1 => match value {
			0 ..= 0o1777 => Location { value, region: Region::UnbankedErasable, s_reg: value as Word },
			0o2000 ..= 0o5777 => Location { value, region: Region::UnbankedFixed, s_reg: value as Word },
			_ => Location {
				value,
				region: Region::BankedFixed {
					fbank:      (3 + (value - 0o6000) / FIXED_BANK_SIZE) as u8,
					super_bank: false,
				},
				s_reg: BLOCK1_BANKED_FIXED_BASE + (value % FIXED_BANK_SIZE) as Word,
			},
		},
		BlockVariant::Block2 => match value {
			0 ..= 0o1377 => Location { value, region: Region::UnbankedErasable, s_reg: value as Word },
			0o1400 ..= 0o3777 => banked_erasable(value),
			// Fixed-fixed; banks 2 and 3 are selected by the address field itself.
			0o4000 ..= 0o7777 => Location { value, region: Region::UnbankedFixed, s_reg: value as Word },
			_ => banked_fixed(value),
		},
	};
	SegmentedAddress::Address(location)
}

/// Classify a pseudo-address like [`classify`] does for Block II, but express all of the low 04000 words as
/// switched erasable even where unswitched addressing would reach them.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn classify_erasable_banked(value: PseudoAddress) -> SegmentedAddress {
	match value {
		0 ..= 0o3777 => SegmentedAddress::Address(banked_erasable(value)),
		_ => classify(value, BlockVariant::Block2),
	}
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn banked_erasable(value: PseudoAddress) -> Location {
	Location {
		value,
		region: Region::BankedErasable { ebank: (value / ERASABLE_BANK_SIZE) as u8 },
		s_reg: BANKED_ERASABLE_BASE + (value % ERASABLE_BANK_SIZE) as Word,
	}
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
const fn banked_fixed(value: PseudoAddress) -> Location {
	let region = if value < SUPER_BANK_START {
		Region::BankedFixed { fbank: ((value - BANKED_FIXED_START) / FIXED_BANK_SIZE) as u8, super_bank: false }
	} else {
		Region::BankedFixed { fbank: ((value - SUPER_BANK_BASE) / FIXED_BANK_SIZE) as u8, super_bank: true }
	};
	Location { value, region, s_reg: BANKED_FIXED_BASE + (value % FIXED_BANK_SIZE) as Word }
}

/// Signature of a program-counter advancer: move `current` by `offset` words.
pub type Advancer = fn(current: &SegmentedAddress, offset: PseudoAddress, block: BlockVariant) -> SegmentedAddress;

/// The default [`Advancer`]. Addresses move within their own region; leaving it (the unswitched region, or the
/// bank for switched memory) yields [`SegmentedAddress::Overflow`]. Constants are plain arithmetic.
#[must_use]
pub fn advance(current: &SegmentedAddress, offset: PseudoAddress, block: BlockVariant) -> SegmentedAddress {
	match current {
		SegmentedAddress::Invalid => SegmentedAddress::Invalid,
		SegmentedAddress::Overflow { value } => SegmentedAddress::Overflow { value: value.saturating_add(offset) },
		SegmentedAddress::Constant(value) => SegmentedAddress::Constant(value.saturating_add(offset)),
		SegmentedAddress::Address(location) => {
			let value = location.value.saturating_add(offset);
			let next = match location.region {
				Region::BankedErasable { .. } => classify_erasable_banked(value),
				_ => classify(value, block),
			};
			match next {
				SegmentedAddress::Address(next) if next.region == location.region => SegmentedAddress::Address(next),
				_ => SegmentedAddress::Overflow { value },
			}
		},
	}
}
