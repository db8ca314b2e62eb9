//! agcasm binary.

use std::process::ExitCode;

use agcasm::cli::AgcasmCli;
use agcasm::common::pretty_octal;
use agcasm::source::assemble_source;
use agcasm::{AssemblyError, Session, SymbolTable, classify};
use clap::Parser;
use log::{LevelFilter, info};
use miette::{IntoDiagnostic, WrapErr};

fn main() -> miette::Result<ExitCode> {
	human_panic::setup_panic!();
	miette::set_hook(Box::new(|_| {
		Box::new(miette::MietteHandlerOpts::new().unicode(true).context_lines(2).tab_width(4).build())
	}))?;

	let args = AgcasmCli::parse();
	env_logger::Builder::new()
		.filter_level(match args.verbose {
			0 => LevelFilter::Warn,
			1 => LevelFilter::Info,
			2 => LevelFilter::Debug,
			_ => LevelFilter::Trace,
		})
		.parse_default_env()
		.init();

	let mut symbols = SymbolTable::new(args.options.block);
	for definition in &args.definitions {
		symbols.define_address(definition.name.clone(), definition.value);
	}

	let origin = classify(args.origin, args.options.block);
	if origin.is_invalid() {
		return Err(AssemblyError::AddressOutOfBounds { value: args.origin }.into());
	}

	let text = std::fs::read_to_string(&args.input)
		.into_diagnostic()
		.wrap_err_with(|| format!("could not read {}", args.input.display()))?;
	let mut session = Session::new(args.options);
	let listing = assemble_source(&text, &mut session, &symbols, origin);
	info!("encoded {} instructions from {}", listing.len(), args.input.display());

	let mut words = Vec::with_capacity(listing.len());
	let mut had_error = false;
	for line in &listing {
		let word = line.output.as_ref().map(agcasm::EncodedInstruction::word).unwrap_or_default();
		words.push(word);
		println!(
			"{:>6} {:<10} {word:05o}    {} {} {} {}",
			line.source.number,
			line.program_counter.to_string(),
			line.source.mnemonic,
			line.source.operand,
			line.source.mod1,
			line.source.mod2
		);
		for diagnostic in line.diagnostics() {
			let report = miette::Report::new(diagnostic)
				.wrap_err(format!("line {}: {} {}", line.source.number, line.source.mnemonic, line.source.operand));
			eprintln!("{report:?}");
		}
		had_error |= line.is_fatal();
	}
	print!("{}", pretty_octal(&words));

	Ok(if had_error { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
