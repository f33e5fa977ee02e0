//! Core resolution logic — types, notation parsing, validation, injection.

pub mod config;
pub mod error;
pub mod injector;
pub mod notation;
pub mod payload;
pub mod types;
pub mod validator;
