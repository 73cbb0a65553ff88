//! Configuration type definitions.
//!
//! Field names follow the camelCase convention of the pipeline-config JSON
//! files this tool consumes.

use serde::{Deserialize, Serialize};

/// Default number of pending inserts per flushed batch.
pub const DEFAULT_INSERT_BATCH_SIZE: usize = 10_000;

/// Root configuration structure, loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    /// The system rows are copied from.
    pub source: SourceSystem,

    /// The database rows are copied into.
    pub target: ExportConfig,
}

/// Source side: an application label plus its connection detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSystem {
    /// Human-readable name of the system being copied. Also used to derive
    /// the target file name when the target is file backed.
    pub application: String,

    /// Connection detail for the source database.
    pub rdms: ConnectionDetail,
}

/// Connection detail for the source database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionDetail {
    /// ODBC driver name, e.g. "Oracle 21 ODBC driver".
    pub driver: String,

    /// Connection string fragment (everything but driver and credentials).
    pub url: String,

    /// Username, when the driver does not carry it in the URL.
    #[serde(default)]
    pub username: Option<String>,

    /// Password, when the driver does not carry it in the URL.
    #[serde(default)]
    pub password: Option<String>,

    /// Statement executed once after connecting, before any copy starts.
    #[serde(default)]
    pub sql_setup_command: Option<String>,

    /// Extra key/value pairs appended to the connection string.
    #[serde(default)]
    pub data_source_properties: Option<Vec<DataSourceProperty>>,

    /// Default rows-per-fetch hint for streaming cursors. Individual
    /// imports may override this.
    #[serde(default)]
    pub fetch_size: Option<usize>,

    /// Tables to copy, in order.
    #[serde(default)]
    pub imports: Vec<TableImport>,

    /// Scripts run against the target once every table is done.
    #[serde(default)]
    pub target_post_scripts: Option<Vec<PostRunScript>>,
}

/// An extra data-source property passed through to the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSourceProperty {
    pub property: String,
    pub value: String,
}

/// One table to copy from source to target.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableImport {
    /// Source table name.
    pub table: String,

    /// Target table name (defaults to the source name).
    #[serde(default)]
    pub target: Option<String>,

    /// Custom SELECT replacing the default full-table read.
    #[serde(default)]
    pub query: Option<String>,

    /// Rows-per-fetch hint for this table only.
    #[serde(default)]
    pub fetch_size: Option<usize>,

    /// Statements run against the target before the copy (best effort).
    #[serde(default)]
    pub target_pre_tasks: Option<Vec<DbTask>>,

    /// Statements run against the target after the copy (best effort).
    #[serde(default)]
    pub target_post_tasks: Option<Vec<DbTask>>,
}

impl TableImport {
    /// Effective target table name.
    pub fn target_table(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.table)
    }

    /// Effective SELECT statement for streaming rows.
    pub fn select_sql(&self) -> String {
        self.query
            .clone()
            .unwrap_or_else(|| format!("SELECT * FROM {}", self.table))
    }

    /// Zero-row probe used for schema translation. A custom query is
    /// wrapped so its projection, not the base table, defines the columns.
    pub fn schema_probe_sql(&self) -> String {
        match &self.query {
            Some(query) => format!("SELECT * FROM ({}) src WHERE 1 = 2", query),
            None => format!("SELECT * FROM {} WHERE 1 = 2", self.table),
        }
    }
}

/// An auxiliary statement run against the target around a table copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DbTask {
    pub sql: String,
}

/// A labelled script run against the target after all tables are copied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRunScript {
    pub label: String,
    pub sql: String,
}

/// Target side configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportConfig {
    /// ODBC driver name for the target database.
    pub driver: String,

    /// Leading part of the target connection string.
    pub url_protocol: String,

    /// Trailing options of the target connection string.
    #[serde(default)]
    pub url_options: String,

    /// When set, the target is file backed: the folder is created at
    /// startup and the database file name is derived from the source
    /// application label.
    #[serde(default)]
    pub output_folder: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Statement executed once after connecting, before any copy starts.
    #[serde(default)]
    pub sql_setup_command: Option<String>,

    /// Extra key/value pairs appended to the connection string.
    #[serde(default)]
    pub data_source_properties: Option<Vec<DataSourceProperty>>,

    /// Dialect name: "ORACLE", "MSSQL" or anything else for generic.
    #[serde(default)]
    pub dialect: Option<String>,

    /// Rows accumulated before a batch flush and commit.
    #[serde(default)]
    pub export_batch_size: Option<usize>,

    /// Rows between progress log lines (defaults to the batch size).
    #[serde(default)]
    pub log_batch_size: Option<usize>,
}

impl ExportConfig {
    /// Effective insert batch size.
    pub fn insert_batch_size(&self) -> usize {
        self.export_batch_size.unwrap_or(DEFAULT_INSERT_BATCH_SIZE)
    }

    /// Effective progress-log cadence.
    pub fn log_batch_size(&self) -> usize {
        self.log_batch_size.unwrap_or_else(|| self.insert_batch_size())
    }

    /// Build the target URL. File-backed targets get a file name derived
    /// from the application label inside the configured output folder.
    pub fn export_url(&self, application: &str) -> String {
        match self.output_folder.as_deref() {
            None | Some("") => format!("{}{}", self.url_protocol, self.url_options),
            Some(folder) => {
                let file = application.to_lowercase().replace(' ', "_");
                format!("{}{}{}-import{}", self.url_protocol, folder, file, self.url_options)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn import(table: &str) -> TableImport {
        TableImport {
            table: table.to_string(),
            target: None,
            query: None,
            fetch_size: None,
            target_pre_tasks: None,
            target_post_tasks: None,
        }
    }

    #[test]
    fn test_target_table_defaults_to_source_name() {
        let mut entry = import("CUSTOMERS");
        assert_eq!(entry.target_table(), "CUSTOMERS");

        entry.target = Some("CUSTOMERS_COPY".to_string());
        assert_eq!(entry.target_table(), "CUSTOMERS_COPY");
    }

    #[test]
    fn test_select_sql_defaults_to_full_table() {
        let mut entry = import("ORDERS");
        assert_eq!(entry.select_sql(), "SELECT * FROM ORDERS");

        entry.query = Some("SELECT ID, TOTAL FROM ORDERS WHERE TOTAL > 0".to_string());
        assert_eq!(entry.select_sql(), "SELECT ID, TOTAL FROM ORDERS WHERE TOTAL > 0");
    }

    #[test]
    fn test_schema_probe_wraps_custom_query() {
        let mut entry = import("ORDERS");
        assert_eq!(entry.schema_probe_sql(), "SELECT * FROM ORDERS WHERE 1 = 2");

        entry.query = Some("SELECT ID FROM ORDERS".to_string());
        assert_eq!(
            entry.schema_probe_sql(),
            "SELECT * FROM (SELECT ID FROM ORDERS) src WHERE 1 = 2"
        );
    }

    #[test]
    fn test_batch_size_defaults() {
        let mut target = ExportConfig {
            driver: "SQLite3".to_string(),
            url_protocol: "Database=".to_string(),
            url_options: ";Timeout=5".to_string(),
            output_folder: None,
            username: None,
            password: None,
            sql_setup_command: None,
            data_source_properties: None,
            dialect: None,
            export_batch_size: None,
            log_batch_size: None,
        };

        assert_eq!(target.insert_batch_size(), DEFAULT_INSERT_BATCH_SIZE);
        assert_eq!(target.log_batch_size(), DEFAULT_INSERT_BATCH_SIZE);

        target.export_batch_size = Some(500);
        assert_eq!(target.insert_batch_size(), 500);
        assert_eq!(target.log_batch_size(), 500);

        target.log_batch_size = Some(2_000);
        assert_eq!(target.log_batch_size(), 2_000);
    }

    #[test]
    fn test_export_url_derivation() {
        let mut target = ExportConfig {
            driver: "SQLite3".to_string(),
            url_protocol: "Database=".to_string(),
            url_options: ";Timeout=5".to_string(),
            output_folder: None,
            username: None,
            password: None,
            sql_setup_command: None,
            data_source_properties: None,
            dialect: None,
            export_batch_size: None,
            log_batch_size: None,
        };

        assert_eq!(target.export_url("Billing System"), "Database=;Timeout=5");

        target.output_folder = Some("out/".to_string());
        assert_eq!(
            target.export_url("Billing System"),
            "Database=out/billing_system-import;Timeout=5"
        );
    }
}
