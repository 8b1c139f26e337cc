pub use client::KboClient;
pub use config::Config;
pub use crawler::{PageFetcher, PageScan, StopReason, TeamCrawler};
pub use error::{KboError, Result};
pub use model::*;
pub use persist::{CsvSink, MemorySink, TableSink};
pub use season::SeasonAggregator;

mod client;
pub mod config;
pub mod crawler;
mod error;
pub(crate) mod kbo_scraper;
pub mod model;
pub mod persist;
pub mod season;
