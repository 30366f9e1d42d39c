// src/exec/mod.rs

//! Per-invocation execution engine.
//!
//! - [`slot`] holds the write-once value slots steps settle into.
//! - [`executor`] fans out one task per operation step and fans the
//!   results back in.
//! - [`aggregate`] zips the settled values onto the program's step names.

pub(crate) mod aggregate;
pub(crate) mod executor;
pub(crate) mod slot;

pub(crate) use executor::run;
