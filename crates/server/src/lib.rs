//! Server crate for the Moodie recommendation retriever.
//!
//! This crate contains the orchestrator that turns a mood into an ordered
//! list of enriched movies, and the configuration it is built from.

pub mod config;
pub mod orchestrator;

pub use config::{MAX_CANDIDATES, RetrieverConfig};
pub use orchestrator::{Apology, MoodOrchestrator, Suggestions};
