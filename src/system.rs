//! Management tool invocation and output parsing.

pub mod executor;
pub mod parser;
