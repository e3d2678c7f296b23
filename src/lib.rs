//! Country statistics pipeline.
//!
//! ```text
//!  restcountries.com
//!        │  fetch
//!        ▼
//!  countriesListOutput.json ──clean──► (same file)
//!        │  enrich
//!        ▼
//!  adjustedCountriesListOutput.json
//!        │  cluster
//!        ▼
//!  viewer / summary / CSV
//! ```

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
