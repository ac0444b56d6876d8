//! Main module for goon library functionality

pub mod ast;
pub mod building;
pub mod error;
pub mod eval;
pub mod formats;
pub mod grammar;
pub mod input;
pub mod parsing;
pub mod testing;
