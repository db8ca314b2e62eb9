//! AGC instruction encoder.
//!
//! This crate turns one tokenized source line at a time into the 15-bit word a Block I or Block II Apollo Guidance
//! Computer executes. It covers the address model shared by both machine generations, operand resolution, the
//! general-purpose encoder that nearly every basic and extended instruction goes through, and the encoder for
//! erasable address constants. Source scanning, symbol definition and object output are left to a front end; a
//! minimal one lives in [`source`] and drives the `agcasm` binary.

#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

#[macro_use]
mod log;

pub mod assembler;
pub mod cli;
pub mod common;
mod error;
pub mod segments;
pub mod source;
pub mod symbol;

pub use assembler::{EncodedInstruction, ExtendState, InstructionRecord, Mnemonic, Session};
pub use error::{AssemblyError, SymbolError};
pub use segments::{BlockVariant, SegmentedAddress, classify};
pub use symbol::{SymbolResolver, SymbolTable};

#[cfg(test)] mod test;
