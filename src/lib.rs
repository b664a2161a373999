//! Weekly job hours ingestion engine.
//!
//! This crate reconciles weekly labor-hour reports supplied as spreadsheets,
//! CSV files or PDF text into one canonical per-job, per-week table of
//! straight and overtime hours, rounded to a configured increment.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod decode;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod models;
