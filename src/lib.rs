// Export modules for library usage
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod filters;
pub mod io;
pub mod metrics;
pub mod parser;
pub mod pipeline;

// Re-export commonly used types
pub use crate::catalog::{Catalog, FileCatalog};
pub use crate::core::errors::{CatalogError, ParseError, PipelineError};
pub use crate::core::{
    Category, Color, FileRef, Game, GameResult, GameType, Move, Player,
};
pub use crate::filters::{Filter, FilterChain};
pub use crate::metrics::{Metric, MetricSet};
pub use crate::parser::ReplayParser;
pub use crate::pipeline::{Pipeline, PipelineOptions, RunSummary};
