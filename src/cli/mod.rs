//! Command-line interface: argument types and parsing.

pub mod args;
