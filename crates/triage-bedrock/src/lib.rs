//! triage-bedrock
//!
//! Bedrock Converse-backed intent classification and report generation,
//! with tolerant parsing of the models' structured JSON output.

pub mod classifier;
pub mod client;
pub mod converse;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod report;

pub use crate::classifier::BedrockIntentClassifier;
pub use crate::report::BedrockReportBackend;
