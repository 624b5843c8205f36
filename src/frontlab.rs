//! Main module for frontlab library functionality

pub mod analysis;
pub mod codegen;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod grammar;
pub mod lexing;
pub mod location;
pub mod parsing;
pub mod processor;
pub mod testing;
pub mod token;
pub mod trace;
