//! Configuration validation.

use super::PipelineConfig;
use crate::error::{FlowError, Result};

/// Validate the configuration.
pub fn validate(config: &PipelineConfig) -> Result<()> {
    if config.source.application.is_empty() {
        return Err(FlowError::Config("source.application is required".into()));
    }
    if config.source.rdms.driver.is_empty() {
        return Err(FlowError::Config("source.rdms.driver is required".into()));
    }
    if config.source.rdms.url.is_empty() {
        return Err(FlowError::Config("source.rdms.url is required".into()));
    }

    if config.target.driver.is_empty() {
        return Err(FlowError::Config("target.driver is required".into()));
    }
    if config.target.url_protocol.is_empty() {
        return Err(FlowError::Config("target.urlProtocol is required".into()));
    }

    for import in &config.source.rdms.imports {
        if import.table.is_empty() {
            return Err(FlowError::Config(
                "every import requires a non-empty table name".into(),
            ));
        }
        if let Some(0) = import.fetch_size {
            return Err(FlowError::Config(format!(
                "import {}: fetchSize must be at least 1",
                import.table
            )));
        }
    }

    // Only reject values that were explicitly set to something unusable.
    if let Some(0) = config.source.rdms.fetch_size {
        return Err(FlowError::Config("source fetchSize must be at least 1".into()));
    }
    if let Some(0) = config.target.export_batch_size {
        return Err(FlowError::Config(
            "target.exportBatchSize must be at least 1".into(),
        ));
    }
    if let Some(0) = config.target.log_batch_size {
        return Err(FlowError::Config(
            "target.logBatchSize must be at least 1".into(),
        ));
    }

    Ok(())
}
