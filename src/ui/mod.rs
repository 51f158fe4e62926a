//! UI module - Command Line Interface
//!
//! The console front end: a reedline REPL that feeds free text to the
//! command engine and `:`-prefixed directives to the shell.

pub mod cli;
