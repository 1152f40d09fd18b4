//! Gaussian basis sets for quantum chemistry: library file parsing, contracted gaussian
//! functions and their overlap integrals.

pub mod atom;
pub mod basis;
pub mod config;
pub mod integrals;
pub mod library;
pub mod periodic_table;
