//! Scrapes per-map player statistics of a vlr.gg event and loads CSV extracts
//! of them into PostgreSQL.

pub mod assemble;
mod client;
pub mod config;
pub mod dataset;
mod error;
pub mod import;
pub mod model;
pub mod normalize;
pub(crate) mod scraper;

pub use client::StatsClient;
pub use crate::config::{ImportSettings, NameMap, ScrapeConfig, SummaryPolicy};
pub use dataset::Dataset;
pub use error::{Result, StatsError};
pub use import::{Importer, PgSink, StatsSink};
pub use model::*;
