//! `trendfit` library crate.
//!
//! The binary (`trendfit`) is a thin wrapper around this library so that:
//!
//! - the fitter is testable and reusable without the CLI
//! - data sources and render sinks stay swappable behind their traits
//!
//! Core entry points: [`fit::fit`], [`fit::predict`] and [`fit::Fitter`].

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
