//! Aurora - Voice-First Marketplace Command Console
//!
//! Library crate exposing the command engine, the catalog processor,
//! and the console shell that owns all mutable state. The binary in
//! `main.rs` is a thin front end over these modules.

pub mod app;
pub mod catalog;
pub mod engine;
pub mod model;
pub mod ui;
