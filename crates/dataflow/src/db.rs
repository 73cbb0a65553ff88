//! ODBC access shared by both sides of the pipeline.
//!
//! A pool here is an ODBC environment plus a connection string: connections
//! are cheap to open per use and are released by drop on every exit path,
//! so each table copy gets its own short-lived connection pair.

use odbc_api::{ColumnDescription, Connection, ConnectionOptions, Environment, ResultSetMetadata};
use std::sync::Arc;
use tracing::{debug, info};

use crate::dialect::GenericType;
use crate::error::{FlowError, Result};

/// Column metadata derived from a zero-row probe against the source.
#[derive(Debug, Clone)]
pub struct ColumnDescriptor {
    /// 1-based ordinal position in the result set.
    pub ordinal: u16,

    /// Column name as reported by the driver.
    pub name: String,

    /// Portable type code for DDL generation and value binding.
    pub generic_type: GenericType,

    /// Declared precision (character or binary size, numeric precision).
    pub precision: i32,

    /// Declared scale for numeric columns.
    pub scale: i32,

    /// True when the driver reports the column never holds NULL.
    pub no_nulls: bool,
}

/// One side of the pipeline: an ODBC environment plus its connection
/// string. Safe for sequential reuse; no connection outlives the table
/// copy that opened it.
pub struct OdbcPool {
    env: Arc<Environment>,
    connection_string: String,
    side: &'static str,
}

impl OdbcPool {
    /// Create a pool and verify the database is reachable.
    pub fn new(side: &'static str, connection_string: String) -> Result<Self> {
        let env = Environment::new().map_err(|e| {
            FlowError::connection(
                side,
                format!(
                    "Failed to create ODBC environment: {}. \
                     Verify an ODBC driver manager is installed.",
                    e
                ),
            )
        })?;

        let pool = Self {
            env: Arc::new(env),
            connection_string,
            side,
        };

        debug!(
            "{} connection string (credentials hidden): {}",
            side,
            pool.redacted_connection_string()
        );

        // Fail fast on bad drivers or credentials.
        drop(pool.connect()?);
        info!("Connected to {} database", side);

        Ok(pool)
    }

    /// Open a new connection.
    pub fn connect(&self) -> Result<Connection<'_>> {
        self.env
            .connect_with_connection_string(&self.connection_string, ConnectionOptions::default())
            .map_err(|e| {
                FlowError::connection(self.side, format!("connection failed: {}", e))
            })
    }

    /// Execute a standalone statement on a fresh connection.
    pub fn execute_statement(&self, sql: &str) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(sql, ()).map_err(|e| {
            FlowError::connection(self.side, format!("statement failed: {} - SQL: {}", e, sql))
        })?;
        Ok(())
    }

    /// Report the database product name, for the run log.
    pub fn product_name(&self) -> Result<String> {
        let conn = self.connect()?;
        conn.database_management_system_name()
            .map_err(|e| FlowError::connection(self.side, e.to_string()))
    }

    fn redacted_connection_string(&self) -> String {
        redact_password(&self.connection_string)
    }
}

/// Probe column metadata through a zero-row query. `label` names the table
/// in error messages.
pub fn probe_columns(
    conn: &Connection<'_>,
    sql: &str,
    label: &str,
) -> Result<Vec<ColumnDescriptor>> {
    let mut cursor = conn
        .execute(sql, ())
        .map_err(|e| FlowError::schema(label, format!("metadata probe failed: {} - SQL: {}", e, sql)))?
        .ok_or_else(|| FlowError::schema(label, "metadata probe produced no result set"))?;

    let count = cursor
        .num_result_cols()
        .map_err(|e| FlowError::schema(label, format!("failed to count columns: {}", e)))?
        as u16;

    let mut columns = Vec::with_capacity(count as usize);

    for ordinal in 1..=count {
        let mut description = ColumnDescription::default();
        cursor
            .describe_col(ordinal, &mut description)
            .map_err(|e| {
                FlowError::schema(label, format!("failed to describe column {}: {}", ordinal, e))
            })?;

        let name = description
            .name_to_string()
            .map_err(|_| FlowError::schema(label, format!("column {} has an undecodable name", ordinal)))?;

        let (generic_type, precision, scale) = GenericType::from_odbc(description.data_type);

        columns.push(ColumnDescriptor {
            ordinal,
            name,
            generic_type,
            precision,
            scale,
            no_nulls: !description.could_be_nullable(),
        });
    }

    Ok(columns)
}

/// Blank out the PWD attribute of a connection string for logging.
fn redact_password(connection_string: &str) -> String {
    connection_string
        .split(';')
        .map(|part| {
            if part.trim_start().to_uppercase().starts_with("PWD=") {
                "PWD=***"
            } else {
                part
            }
        })
        .collect::<Vec<_>>()
        .join(";")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_password() {
        let cs = "Driver={X};Server=db;UID=sa;PWD=hunter2;Encrypt=no;";
        let redacted = redact_password(cs);
        assert!(redacted.contains("PWD=***"));
        assert!(!redacted.contains("hunter2"));
        assert!(redacted.contains("UID=sa"));
    }

    #[test]
    fn test_redact_without_password_is_identity() {
        let cs = "Driver={X};Server=db;Trusted_Connection=yes";
        assert_eq!(redact_password(cs), cs);
    }
}
