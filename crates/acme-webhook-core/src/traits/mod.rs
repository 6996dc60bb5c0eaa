//! Core traits for ACME webhook solvers
//!
//! - [`Solver`]: Publish and remove DNS-01 challenge records

pub mod solver;

pub use solver::Solver;
