#![allow(clippy::unwrap_used)]

use rstest::rstest;

use crate::assembler::operand::Numeral;
use crate::cli::{SymbolDefinition, parse_octal};
use crate::common::pretty_octal;
use crate::segments::{
	BlockVariant, Location, MAX_PSEUDO_ADDRESS, Region, SegmentedAddress, advance, classify, classify_erasable_banked,
};
use crate::source::{SourceLine, assemble_source};
use crate::{AssemblyError, Session, SymbolError, SymbolResolver, SymbolTable};

#[rstest]
fn classify_round_trip(#[values(BlockVariant::Block1, BlockVariant::Block2)] block: BlockVariant) {
	for value in 0 ..= MAX_PSEUDO_ADDRESS {
		let SegmentedAddress::Address(location) = classify(value, block) else {
			panic!("{value:o} did not classify as an address");
		};
		assert_eq!(location.value, value);
		assert_eq!(location.pseudo_address(block), value, "{value:o} round-trips through {location:?}");
		assert_eq!(location.ebank().is_some(), matches!(location.region, Region::BankedErasable { .. }));
		assert_eq!(location.fbank().is_some(), matches!(location.region, Region::BankedFixed { .. }));
		assert_eq!(location.is_fixed(), location.fixed_bank(block).is_some());
	}
}

#[rstest]
fn classify_bounds(#[values(BlockVariant::Block1, BlockVariant::Block2)] block: BlockVariant) {
	assert!(classify(0o117777, block).location().is_some());
	assert_eq!(classify(0o120000, block), SegmentedAddress::Invalid);
	assert_eq!(classify(-1, block), SegmentedAddress::Invalid);
}

#[rstest]
#[case::unbanked_erasable(0o1377, Region::UnbankedErasable, 0o1377)]
#[case::banked_erasable(0o1400, Region::BankedErasable { ebank: 3 }, 0o1400)]
#[case::last_erasable(0o3777, Region::BankedErasable { ebank: 7 }, 0o1777)]
#[case::fixed_fixed(0o4000, Region::UnbankedFixed, 0o4000)]
#[case::first_bank(0o10000, Region::BankedFixed { fbank: 0, super_bank: false }, 0o2000)]
#[case::last_normal_bank(0o107777, Region::BankedFixed { fbank: 0o37, super_bank: false }, 0o3777)]
#[case::super_bank(0o110000, Region::BankedFixed { fbank: 0o30, super_bank: true }, 0o2000)]
fn block2_regions(#[case] value: i32, #[case] region: Region, #[case] s_reg: u16) {
	assert_eq!(classify(value, BlockVariant::Block2), SegmentedAddress::Address(Location { value, region, s_reg }));
}

#[rstest]
#[case::erasable(0o1777, Region::UnbankedErasable, 0o1777)]
#[case::fixed_fixed(0o2000, Region::UnbankedFixed, 0o2000)]
#[case::first_bank(0o6000, Region::BankedFixed { fbank: 3, super_bank: false }, 0o6000)]
#[case::later_bank(0o10001, Region::BankedFixed { fbank: 4, super_bank: false }, 0o6001)]
fn block1_regions(#[case] value: i32, #[case] region: Region, #[case] s_reg: u16) {
	assert_eq!(classify(value, BlockVariant::Block1), SegmentedAddress::Address(Location { value, region, s_reg }));
}

#[test]
fn fixed_banks() {
	let bank = |value| classify(value, BlockVariant::Block2).location().unwrap().fixed_bank(BlockVariant::Block2);
	assert_eq!(bank(0o4000), Some(2));
	assert_eq!(bank(0o6000), Some(3));
	assert_eq!(bank(0o12000), Some(1));
	assert_eq!(bank(0o110000), Some(0o40));
	assert_eq!(bank(0o100), None);
}

#[test]
fn erasable_banked_preference() {
	let location = *classify_erasable_banked(0o100).location().unwrap();
	assert_eq!(location.region, Region::BankedErasable { ebank: 0 });
	assert_eq!(location.s_reg, 0o1500);
	assert_eq!(location.pseudo_address(BlockVariant::Block2), 0o100);
	assert_eq!(classify_erasable_banked(0o4000), classify(0o4000, BlockVariant::Block2));
}

#[test]
fn advancing() {
	let block = BlockVariant::Block2;
	assert_eq!(advance(&classify(0o10000, block), 1, block), classify(0o10001, block));
	assert_eq!(advance(&classify(0o1377, block), 1, block), SegmentedAddress::Overflow { value: 0o1400 });
	assert_eq!(advance(&classify(0o1777, block), 1, block), SegmentedAddress::Overflow { value: 0o2000 });
	assert_eq!(advance(&classify(0o11777, block), 1, block), SegmentedAddress::Overflow { value: 0o12000 });
	assert_eq!(advance(&classify(0o7777, block), 1, block), SegmentedAddress::Overflow { value: 0o10000 });
	assert_eq!(advance(&classify(0o4010, block), -0o10, block), classify(0o4000, block));
	assert_eq!(advance(&SegmentedAddress::Invalid, 1, block), SegmentedAddress::Invalid);
	assert_eq!(advance(&SegmentedAddress::Constant(5), 3, block), SegmentedAddress::Constant(8));

	// Switched erasable stays in its own bank even where unswitched addressing would reach the result.
	let banked = classify_erasable_banked(0o100);
	assert_eq!(advance(&banked, 1, block), classify_erasable_banked(0o101));
}

#[test]
fn address_display() {
	let block = BlockVariant::Block2;
	assert_eq!(classify(0o120, block).to_string(), "0120");
	assert_eq!(classify(0o1400, block).to_string(), "E3,1400");
	assert_eq!(classify(0o4000, block).to_string(), "4000");
	assert_eq!(classify(0o12000, block).to_string(), "01,2000");
	assert_eq!(classify(0o110000, block).to_string(), "40,2000");
	assert_eq!(SegmentedAddress::Constant(-5).to_string(), "-5");
	assert_eq!(SegmentedAddress::Invalid.to_string(), "INVALID");
}

#[rstest]
#[case::octal("17", Some(Numeral { value: 0o17, signed: false }))]
#[case::plus("+2", Some(Numeral { value: 2, signed: true }))]
#[case::minus("-10", Some(Numeral { value: -0o10, signed: true }))]
#[case::decimal("10D", Some(Numeral { value: 10, signed: false }))]
#[case::signed_decimal("-12d", Some(Numeral { value: -12, signed: true }))]
#[case::not_octal("18", None)]
#[case::empty("", None)]
#[case::bare_sign("+", None)]
#[case::symbol("ABC", None)]
fn numerals(#[case] text: &str, #[case] expected: Option<Numeral>) {
	assert_eq!(Numeral::parse(text), expected);
}

#[test]
fn symbol_table() {
	let mut symbols = SymbolTable::new(BlockVariant::Block2);
	symbols.define_address("FOO", 0o1400).define_constant("SEVEN", 7);
	let pc = classify(0o4000, BlockVariant::Block2);

	assert_eq!(symbols.resolve_symbol_plus_offset(&pc, "FOO", ""), Ok(classify(0o1400, BlockVariant::Block2)));
	assert_eq!(symbols.resolve_symbol_plus_offset(&pc, "FOO", "+2"), Ok(classify(0o1402, BlockVariant::Block2)));
	assert_eq!(symbols.resolve_symbol_plus_offset(&pc, "SEVEN", "1"), Ok(SegmentedAddress::Constant(0o10)));
	assert_eq!(
		symbols.resolve_symbol_plus_offset(&pc, "FOO", "X"),
		Err(SymbolError::BadOffset("X".to_owned()))
	);
	assert_eq!(symbols.resolve_symbol_plus_offset(&pc, "BAR", ""), Err(SymbolError::Undefined("BAR".to_owned())));
}

#[test]
fn octal_dump() {
	assert_eq!(pretty_octal(&[0o30000, 7]), " 30000 00007\n");
	assert_eq!(pretty_octal(&[1; 9]).lines().count(), 2);
	assert_eq!(pretty_octal(&[]), "");
}

#[test]
fn command_line_definitions() {
	assert_eq!(
		"FOO=1400".parse::<SymbolDefinition>(),
		Ok(SymbolDefinition { name: "FOO".to_owned(), value: 0o1400 })
	);
	assert!("=5".parse::<SymbolDefinition>().is_err());
	assert!("FOO=9".parse::<SymbolDefinition>().is_err());
	assert!("FOO".parse::<SymbolDefinition>().is_err());
	assert_eq!(parse_octal("4000"), Ok(0o4000));
	assert!(parse_octal("-1").is_err());
}

#[test]
fn diagnostic_severity() {
	assert!(!AssemblyError::NextCodeMayOverflow.is_fatal());
	assert!(!AssemblyError::ExtraFields.is_fatal());
	assert!(AssemblyError::IllegalExtend.is_fatal());
	assert_eq!(AssemblyError::QuarterCodeOutOfRange { value: 0o1234 }.to_string(), "Operand (01234) out of range.");
}

#[test]
fn source_lines() {
	assert_eq!(
		SourceLine::parse(3, "  CA  FOO  +  2 # load it"),
		Some(SourceLine {
			number:   3,
			mnemonic: "CA".to_owned(),
			operand:  "FOO".to_owned(),
			mod1:     "+".to_owned(),
			mod2:     "2".to_owned(),
		})
	);
	assert_eq!(SourceLine::parse(1, "EXTEND").unwrap().operand, "");
	assert_eq!(SourceLine::parse(1, "# comment only"), None);
	assert_eq!(SourceLine::parse(1, "   "), None);
}

#[test]
fn source_listing() {
	let text = "CA 100\n\n# the next two go together\nEXTEND\nWAND 100\nNOPE 1\nTCF\n";
	let symbols = SymbolTable::new(BlockVariant::Block2);
	let mut session = Session::new(crate::cli::AssemblerOptions::default());
	let listing = assemble_source(text, &mut session, &symbols, classify(0o4000, BlockVariant::Block2));

	let words: Vec<_> = listing.iter().map(|line| line.output.clone().map(|output| output.word())).collect();
	assert_eq!(words, vec![
		Ok(0o30100),
		Ok(0o6),
		Ok(0o3100),
		Err(AssemblyError::InvalidConstant { constant: "NOPE".to_owned(), typename: "mnemonic".to_owned() }),
		Ok(0o14003),
	]);
	let places: Vec<_> = listing.iter().map(|line| line.program_counter.to_string()).collect();
	assert_eq!(places, vec!["4000", "4001", "4002", "4003", "4003"]);
	let numbers: Vec<_> = listing.iter().map(|line| line.source.number).collect();
	assert_eq!(numbers, vec![1, 4, 5, 6, 7]);
	assert_eq!(listing.iter().filter(|line| line.is_fatal()).count(), 1);
	assert_eq!(listing[3].diagnostics().len(), 1);
}
