//! Opcode catalog.
//!
//! Every mnemonic maps to one encoder and the fixed options it is applied with. The catalog is data only; the
//! encoders live in the sibling modules.

use agcasm_derive::{Parse, VariantName};

use super::opcode::{OpcodeSpec, PageCode, QuarterCode};
use crate::common::Word;
use crate::segments::BlockVariant;

/// All instruction mnemonics the encoders know.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Parse, VariantName)]
#[allow(missing_docs)]
pub enum Mnemonic {
	Ad,
	Ads,
	Aug,
	Bzmf,
	Bzf,
	Ca,
	Cae,
	Caf,
	Ccs,
	Com,
	Cs,
	Das,
	Dca,
	Dcs,
	Ddoubl,
	Dim,
	Dnchan,
	Double,
	Dv,
	Dxch,
	Ecadr,
	Edrupt,
	Extend,
	Incr,
	#[parse(alias = "ndx")]
	Index,
	Inhint,
	Lxch,
	Mask,
	Mp,
	Msu,
	Qxch,
	Rand,
	Read,
	Relint,
	Resume,
	Return,
	Ror,
	Rxor,
	Square,
	Su,
	#[parse(alias = "tcr")]
	Tc,
	Tcf,
	Ts,
	Wand,
	Wor,
	Write,
	Xch,
	Xlq,
	Zl,
	Zq,
}

/// How a mnemonic is encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CatalogEntry {
	/// The general encoder with these options.
	General(OpcodeSpec),
	/// The general encoder, substituting `operand` when the source gives none.
	DefaultOperand {
		/// Options for the general encoder.
		spec:    OpcodeSpec,
		/// Operand text used for an empty operand.
		operand: &'static str,
	},
	/// An alias of another instruction with a fixed operand. Any operand in the source is ignored with a
	/// warning.
	Implied {
		/// Options of the aliased instruction.
		spec:    OpcodeSpec,
		/// The fixed operand text.
		operand: &'static str,
	},
	/// EDRUPT, whose operand the BLK2 switch drops.
	Edrupt(OpcodeSpec),
	/// INDEX, which marks the next instruction as indexed and keeps a pending EXTEND alive for it.
	Index(OpcodeSpec),
	/// The erasable-address constant encoder.
	ErasableDestination,
}

const TC: OpcodeSpec = OpcodeSpec::new(0).numeric();

const fn index(block: BlockVariant) -> OpcodeSpec {
	match block {
		BlockVariant::Block1 => OpcodeSpec::new(0o20000).numeric(),
		BlockVariant::Block2 => OpcodeSpec::new(0o50000).quarter_code(QuarterCode::Qc0).numeric(),
	}
}

const fn block_dependent(block: BlockVariant, block1: Word, block2: Word) -> Word {
	match block {
		BlockVariant::Block1 => block1,
		BlockVariant::Block2 => block2,
	}
}

/// Look up the encoder for a mnemonic on the given hardware generation.
#[must_use]
pub const fn catalog_entry(mnemonic: Mnemonic, block: BlockVariant) -> CatalogEntry {
	use CatalogEntry::{DefaultOperand, Edrupt, ErasableDestination, General, Implied, Index};
	use PageCode::{Pc0, Pc1, Pc2, Pc3, Pc4, Pc5, Pc6, Pc7};
	use QuarterCode::{Qc0, Qc1, Qc2, Qc3};

	let ad = OpcodeSpec::new(0o60000).numeric();
	let cs = OpcodeSpec::new(0o40000).numeric();
	let das = OpcodeSpec::new(0o20000).quarter_code(Qc0).double_word();
	let lxch = OpcodeSpec::new(0o20000).quarter_code(Qc1).numeric();
	let mp = OpcodeSpec::new(block_dependent(block, 0o40000, 0o70000)).extended();
	let qxch = OpcodeSpec::new(0o20000).extended().quarter_code(Qc1).numeric();

	match mnemonic {
		Mnemonic::Ad => General(ad),
		Mnemonic::Ads => General(OpcodeSpec::new(0o20000).quarter_code(Qc3)),
		Mnemonic::Aug => General(OpcodeSpec::new(0o20000).extended().quarter_code(Qc2)),
		Mnemonic::Bzmf => General(OpcodeSpec::new(0o60000).extended().non_zero_quarter_code()),
		Mnemonic::Bzf => General(OpcodeSpec::new(0o10000).extended().non_zero_quarter_code()),
		Mnemonic::Ca => General(OpcodeSpec::new(0o30000).numeric()),
		Mnemonic::Cae => General(OpcodeSpec::new(0o30000).erasable().numeric()),
		Mnemonic::Caf => General(OpcodeSpec::new(0o30000).fixed().numeric()),
		Mnemonic::Ccs => General(OpcodeSpec::new(0o10000).quarter_code(Qc0).numeric()),
		Mnemonic::Cs => General(cs),
		Mnemonic::Das => General(das),
		Mnemonic::Dca => General(OpcodeSpec::new(0o30000).extended().double_word().numeric()),
		Mnemonic::Dcs => General(OpcodeSpec::new(0o40000).extended().double_word().numeric()),
		Mnemonic::Dim => General(OpcodeSpec::new(0o20000).extended().quarter_code(Qc3)),
		Mnemonic::Dnchan => General(OpcodeSpec::new(0o34000).page_code(Pc0).numeric()),
		Mnemonic::Dv =>
			General(OpcodeSpec::new(block_dependent(block, 0o50000, 0o10000)).extended().quarter_code(Qc0)),
		Mnemonic::Dxch => General(OpcodeSpec::new(0o50000).quarter_code(Qc1).double_word().numeric()),
		Mnemonic::Edrupt => Edrupt(OpcodeSpec::new(0).extended().page_code(Pc7)),
		Mnemonic::Lxch => General(lxch),
		Mnemonic::Incr => General(OpcodeSpec::new(0o20000).quarter_code(Qc2)),
		Mnemonic::Mask => General(OpcodeSpec::new(0o70000)),
		Mnemonic::Mp => General(mp),
		Mnemonic::Msu => General(OpcodeSpec::new(0o20000).extended().quarter_code(Qc0).numeric()),
		Mnemonic::Qxch => General(qxch),
		Mnemonic::Rand => General(OpcodeSpec::new(0).extended().page_code(Pc2).numeric()),
		Mnemonic::Read => General(OpcodeSpec::new(0).extended().page_code(Pc0).numeric()),
		Mnemonic::Ror => General(OpcodeSpec::new(0).extended().page_code(Pc4).numeric()),
		Mnemonic::Rxor => General(OpcodeSpec::new(0).extended().page_code(Pc6).numeric()),
		Mnemonic::Su => General(OpcodeSpec::new(0o60000).extended().quarter_code(Qc0).numeric()),
		Mnemonic::Tc => General(TC),
		// An empty TCF is TCF +0, a jump to the next word.
		Mnemonic::Tcf =>
			DefaultOperand { spec: OpcodeSpec::new(0o10000).non_zero_quarter_code().numeric(), operand: "+0" },
		Mnemonic::Ts => General(OpcodeSpec::new(0o50000).quarter_code(Qc2).numeric()),
		Mnemonic::Wand => General(OpcodeSpec::new(0).extended().page_code(Pc3).numeric()),
		Mnemonic::Wor => General(OpcodeSpec::new(0).extended().page_code(Pc5).numeric()),
		Mnemonic::Write => General(OpcodeSpec::new(0).extended().page_code(Pc1).numeric()),
		Mnemonic::Xch =>
			General(OpcodeSpec::new(block_dependent(block, 0o30000, 0o50000)).quarter_code(Qc3).numeric()),
		Mnemonic::Ecadr => ErasableDestination,
		Mnemonic::Index => Index(index(block)),

		Mnemonic::Extend => Implied { spec: TC, operand: "6" },
		Mnemonic::Inhint => Implied { spec: TC, operand: "4" },
		Mnemonic::Relint => Implied { spec: TC, operand: "3" },
		Mnemonic::Xlq => Implied { spec: TC, operand: "1" },
		Mnemonic::Return => Implied { spec: TC, operand: "2" },
		Mnemonic::Double => Implied { spec: ad, operand: "0" },
		Mnemonic::Com => Implied { spec: cs, operand: "0" },
		Mnemonic::Ddoubl => Implied { spec: das, operand: "0" },
		Mnemonic::Square => Implied { spec: mp, operand: "0" },
		Mnemonic::Zl => Implied { spec: lxch, operand: "7" },
		Mnemonic::Zq => Implied { spec: qxch, operand: "7" },
		Mnemonic::Resume => Implied { spec: index(block), operand: "017" },
	}
}
