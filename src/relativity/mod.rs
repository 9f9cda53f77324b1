//! Special relativity calculator.
//!
//! Everything in here is a pure function of its inputs. Callers (the TUI,
//! the plot exporter, the clock animator) recompute on every change.

pub mod error;
pub mod special;
pub mod state;
pub mod units;

pub use error::RelativityError;
pub use state::{RelativisticState, Regime, StateInputs};
