//! `standpos-advisor`
//!
//! **Responsibility:** Optional AI business-advice boundary.
//!
//! - It reads ledger snapshots, never the live ledger.
//! - It never mutates ledger state.
//! - A missing credential disables it without affecting anything else.

pub mod advisor;
pub mod error;
pub mod gemini;
pub mod model;
pub mod prompt;

pub use advisor::{Advice, Advisor, AdvisorConfig, Availability};
pub use error::AdvisorError;
pub use gemini::GeminiModel;
pub use model::CompletionModel;
pub use prompt::{build_prompt, render_ledger_context};
