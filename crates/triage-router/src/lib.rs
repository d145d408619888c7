//! triage-router
//!
//! The orchestration state machine that routes a clinical-assessment
//! request to predictive models.
//!
//! Public API:
//! - `Orchestrator::invoke()`: classify → match/dispatch → report, one run
//! - `Orchestrator::invoke_until()`: the same, racing a cancellation future
//! - `Dispatcher::dispatch()`: concurrent, order-preserving model fan-out
//! - `ReportAssembler::assemble()`: context building + report generation
//!
//! A run ends in exactly one of `complete`, `need_more_data` or `error`.
//! Runs are independent: resubmitting an enriched payload after a
//! `need_more_data` result just starts a new run.

pub mod dispatch;
pub mod error;
pub mod orchestrate;
pub mod report;
pub mod settings;
pub mod state;

pub use crate::dispatch::Dispatcher;
pub use crate::error::RouterError;
pub use crate::orchestrate::{Collaborators, Orchestrator};
pub use crate::report::{AssembledReport, ReportAssembler};
pub use crate::settings::RouterSettings;
pub use crate::state::{OrchestrationState, Stage};
