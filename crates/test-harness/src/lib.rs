//! Test harness for the dihedral geometry kernel.
//!
//! Provides oracles that re-derive kernel results independently, a catalogue
//! of textbook exercises with their known answers, and assertion helpers that
//! report every mismatch with enough context to diagnose it.
//!
//! # Key Components
//!
//! - [`oracle`]: Verification functions returning pass/fail verdicts
//! - [`scenarios`]: Worked exercises run through the query dispatcher
//! - [`helpers`]: Error type and entity constructors
//! - [`assertions`]: Tolerance-aware assertion helpers with diagnostics

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod scenarios;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use scenarios::{Expected, Scenario, ScenarioOutcome, run_catalogue, run_scenario};
