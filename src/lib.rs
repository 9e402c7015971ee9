// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod file;
pub mod progress;
pub mod runner;
pub mod source;
pub mod specs;
