pub mod config;
pub mod constants;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod metrics;
pub mod report;

pub use domain::{ParseError, ParsedResult, Project, UnitConfiguration};
pub use error::{IngestError, Result};
pub use ingest::parse;
