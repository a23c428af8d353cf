//! Command line front end for polar pass segmentation
//!
//! Reads trajectory CSV files, runs the segmenter on each and reports the
//! passes as JSON or as a readable table.

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod runner;
pub mod trajectory;
