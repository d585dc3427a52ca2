//! Report compositor for the compliance workflow backend.
//!
//! Takes the hierarchical compliance dataset (topics, questions, answers,
//! attachments) and renders it into two container formats — a fixed-page
//! PDF with manual pagination and a flowing DOCX — with one shared card
//! model so both carry the same information. The surrounding CRUD/auth
//! application talks to this crate through the traits in [`providers`].

pub mod config;
pub mod models;
pub mod providers;
pub mod report;

pub use config::ReportsConfig;
pub use report::{ReportError, ReportService};
