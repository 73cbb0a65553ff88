//! Copy orchestrator - sequences the per-table pipeline.
//!
//! Tables are copied strictly in configuration order:
//! pre-tasks → ensure-table → copy-rows → post-tasks, then source-level
//! post scripts once every table is done. Schema and copy failures unwind
//! and fail the run; task and script failures never do.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::copy::RowCopier;
use crate::db::OdbcPool;
use crate::dialect::{Dialect, DialectImpl};
use crate::error::Result;
use crate::schema::SchemaTranslator;
use crate::tasks;

/// Drives a whole copy run from a validated configuration.
pub struct Orchestrator {
    config: PipelineConfig,
    dialect: DialectImpl,
    source: OdbcPool,
    target: OdbcPool,
}

/// Result of a completed copy run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyResult {
    /// Tables copied.
    pub tables_copied: usize,

    /// Total rows moved across all tables.
    pub rows_copied: i64,

    /// Total duration in seconds.
    pub duration_seconds: f64,

    /// Average throughput over the whole run.
    pub rows_per_second: i64,
}

impl CopyResult {
    /// Serialize the result for machine consumers.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Orchestrator {
    /// Connect both sides and select the target dialect.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let dialect = DialectImpl::from_name(config.target.dialect.as_deref());
        info!("Using {} dialect for the target", dialect.name());

        if let Some(folder) = config
            .target
            .output_folder
            .as_deref()
            .filter(|f| !f.is_empty())
        {
            std::fs::create_dir_all(folder)?;
        }

        let source = OdbcPool::new("source", config.source.rdms.connection_string())?;
        let target = OdbcPool::new(
            "target",
            config.target.connection_string(&config.source.application),
        )?;

        Ok(Self {
            config,
            dialect,
            source,
            target,
        })
    }

    /// Run the copy.
    pub fn run(&self) -> Result<CopyResult> {
        let started = Instant::now();

        if let Some(sql) = &self.config.target.sql_setup_command {
            self.target.execute_statement(sql)?;
        }
        if let Some(sql) = &self.config.source.rdms.sql_setup_command {
            self.source.execute_statement(sql)?;
        }

        match self.source.product_name() {
            Ok(product) => info!("Database product: {}", product),
            Err(e) => debug!("Could not read source product name: {}", e),
        }

        let translator = SchemaTranslator::new(&self.dialect);
        let copier = RowCopier::new(
            &self.dialect,
            self.config.target.insert_batch_size(),
            self.config.target.log_batch_size(),
            self.config.source.rdms.fetch_size,
        );

        let mut rows_copied: i64 = 0;
        let mut tables_copied = 0usize;

        for import in &self.config.source.rdms.imports {
            info!("Importing {}...", import.table);

            if let Some(pre) = &import.target_pre_tasks {
                let conn = self.target.connect()?;
                tasks::run_tasks(&conn, &import.table, pre);
            }

            translator.ensure_table(&self.source, &self.target, import)?;
            rows_copied += copier.copy_table(&self.source, &self.target, import)?;

            if let Some(post) = &import.target_post_tasks {
                let conn = self.target.connect()?;
                tasks::run_tasks(&conn, &import.table, post);
            }

            tables_copied += 1;
        }

        if let Some(scripts) = &self.config.source.rdms.target_post_scripts {
            let conn = self.target.connect()?;
            tasks::run_post_scripts(&conn, scripts);
        }

        let duration_seconds = started.elapsed().as_secs_f64();
        let rows_per_second = if duration_seconds > 0.0 {
            (rows_copied as f64 / duration_seconds) as i64
        } else {
            0
        };

        info!(
            "Copied {} table(s), {} row(s) in {:.2}s",
            tables_copied, rows_copied, duration_seconds
        );

        Ok(CopyResult {
            tables_copied,
            rows_copied,
            duration_seconds,
            rows_per_second,
        })
    }
}
