//! dynvars — dynamic-variable resolution for task payloads.
//!
//! Finds `$[[ node :!: <<variable>> ]]$` references in nested values and
//! substitutes the outputs of upstream tasks into them.

pub mod cli;
pub mod core;
