//! # dataflow
//!
//! Streaming database-to-database copy engine over ODBC.
//!
//! Given a source and a target described by ODBC connection details, the
//! engine copies configured tables one at a time:
//!
//! - **Schema translation** creates missing target tables from source
//!   column metadata through a vendor dialect (generic, MSSQL, Oracle)
//! - **Streaming copy** moves rows through a forward-only block cursor
//!   into batched, periodically committed prepared inserts
//! - **Best-effort hooks** run pre/post task statements and post-run
//!   scripts without ever aborting the data movement
//!
//! ## Example
//!
//! ```rust,no_run
//! use dataflow::{Orchestrator, PipelineConfig};
//!
//! fn main() -> dataflow::Result<()> {
//!     let config = PipelineConfig::load("pipeline-config.json")?;
//!     let result = Orchestrator::new(config)?.run()?;
//!     println!("Copied {} rows", result.rows_copied);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod copy;
pub mod db;
pub mod dialect;
pub mod error;
pub mod orchestrator;
pub mod schema;
pub mod tasks;
pub mod value;

// Re-exports for convenient access
pub use config::{PipelineConfig, TableImport};
pub use dialect::{Dialect, DialectImpl, GenericType};
pub use error::{FlowError, Result};
pub use orchestrator::{CopyResult, Orchestrator};
pub use value::SqlValue;
