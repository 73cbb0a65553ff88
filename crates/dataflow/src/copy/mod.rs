//! Batched streaming copy from a source cursor into target inserts.
//!
//! The copier streams the source result set through a block cursor of
//! bounded size, binds every cell through the dialect's type dispatch
//! table, and flushes/commits the target in fixed-size batches so memory
//! stays flat for multi-million-row tables.

use odbc_api::buffers::TextRowSet;
use odbc_api::handles::AsStatementRef;
use odbc_api::parameter::InputParameter;
use odbc_api::{Cursor, Prepared, ResultSetMetadata};
use std::time::Instant;
use tracing::info;

use crate::config::TableImport;
use crate::db::{probe_columns, OdbcPool};
use crate::dialect::{Dialect, GenericType};
use crate::error::{FlowError, Result};
use crate::value::SqlValue;

/// Rows fetched per block when no fetch size is configured.
const DEFAULT_FETCH_ROWS: usize = 5_000;

/// Upper bound per text cell in the fetch buffer.
const MAX_CELL_BYTES: usize = 65_536;

/// Streams rows for one table at a time.
pub struct RowCopier<'a> {
    dialect: &'a dyn Dialect,
    insert_batch_size: usize,
    log_batch_size: usize,
    default_fetch_size: Option<usize>,
}

impl<'a> RowCopier<'a> {
    pub fn new(
        dialect: &'a dyn Dialect,
        insert_batch_size: usize,
        log_batch_size: usize,
        default_fetch_size: Option<usize>,
    ) -> Self {
        Self {
            dialect,
            insert_batch_size: insert_batch_size.max(1),
            log_batch_size: log_batch_size.max(1),
            default_fetch_size,
        }
    }

    /// Copy one table from source to target, returning the row count.
    pub fn copy_table(
        &self,
        source: &OdbcPool,
        target: &OdbcPool,
        import: &TableImport,
    ) -> Result<i64> {
        let target_table = import.target_table();
        let select_sql = import.select_sql();

        // The dispatch table comes from the import table itself, not the
        // custom query; it governs binding for every streamed row.
        let column_types: Vec<GenericType> = {
            let conn = source.connect()?;
            let probe = format!("SELECT * FROM {} WHERE 1 = 2", import.table);
            probe_columns(&conn, &probe, &import.table)?
                .iter()
                .map(|c| c.generic_type)
                .collect()
        };

        if column_types.is_empty() {
            return Err(FlowError::copy(&import.table, "source probe reported no columns"));
        }

        let insert_sql = format!(
            "INSERT INTO {} VALUES ({})",
            target_table,
            placeholder_list(column_types.len())
        );

        let fetch_rows = import
            .fetch_size
            .or(self.default_fetch_size)
            .unwrap_or(DEFAULT_FETCH_ROWS)
            .max(1);

        let source_conn = source.connect()?;

        info!("Running select from {}", import.table);

        let mut cursor = source_conn
            .execute(&select_sql, ())
            .map_err(|e| {
                FlowError::copy(
                    &import.table,
                    format!("select failed: {} - SQL: {}", e, select_sql),
                )
            })?
            .ok_or_else(|| FlowError::copy(&import.table, "select produced no result set"))?;

        // A custom query must project the same columns the dispatch table
        // was built from, or binding would transpose values.
        let select_cols = cursor
            .num_result_cols()
            .map_err(|e| FlowError::copy(&import.table, format!("failed to count columns: {}", e)))?
            as usize;
        if select_cols != column_types.len() {
            return Err(FlowError::copy(
                &import.table,
                format!(
                    "select returns {} column(s) but the table probe reported {}",
                    select_cols,
                    column_types.len()
                ),
            ));
        }

        info!("Results from {} received, copying to target...", import.table);

        let target_conn = target.connect()?;
        target_conn.set_autocommit(false).map_err(|e| {
            FlowError::copy(target_table, format!("disabling autocommit failed: {}", e))
        })?;

        let mut statement = target_conn.prepare(&insert_sql).map_err(|e| {
            FlowError::copy(target_table, format!("prepare failed: {} - SQL: {}", e, insert_sql))
        })?;

        let mut buffers = TextRowSet::for_cursor(fetch_rows, &mut cursor, Some(MAX_CELL_BYTES))
            .map_err(|e| {
                FlowError::copy(&import.table, format!("failed to create fetch buffer: {}", e))
            })?;
        let mut block_cursor = cursor.bind_buffer(&mut buffers).map_err(|e| {
            FlowError::copy(&import.table, format!("failed to bind fetch buffer: {}", e))
        })?;

        let mut pending: Vec<Vec<SqlValue>> = Vec::new();
        let mut tracker = BatchTracker::new(self.insert_batch_size, self.log_batch_size);
        let mut meter = ProgressMeter::start();

        while let Some(batch) = block_cursor
            .fetch()
            .map_err(|e| FlowError::copy(&import.table, format!("fetch failed: {}", e)))?
        {
            for row_index in 0..batch.num_rows() {
                let mut row = Vec::with_capacity(column_types.len());
                for (col_index, ty) in column_types.iter().enumerate() {
                    row.push(self.dialect.bind_value(*ty, batch.at(col_index, row_index)));
                }
                pending.push(row);

                let action = tracker.advance();

                if action.flush {
                    flush_batch(&mut statement, &mut pending, target_table)?;
                    target_conn.commit().map_err(|e| {
                        FlowError::copy(target_table, format!("commit failed: {}", e))
                    })?;
                }

                if action.log {
                    info!(
                        "Imported {} record(s) from {} so far (batch avg {} rows/s, rolling avg {} rows/s)",
                        tracker.rows(),
                        import.table,
                        meter.batch_rate(self.log_batch_size as u64),
                        meter.rolling_rate(tracker.rows()),
                    );
                }
            }
        }

        // A partially filled last batch still has to land; an exactly full
        // one was already flushed and committed above.
        if tracker.needs_final_flush() {
            flush_batch(&mut statement, &mut pending, target_table)?;
            target_conn
                .commit()
                .map_err(|e| FlowError::copy(target_table, format!("commit failed: {}", e)))?;
        }

        info!(
            "Processed {} record(s) from {} (avg {} rows/s)",
            tracker.rows(),
            import.table,
            meter.rolling_rate(tracker.rows()),
        );

        Ok(tracker.rows() as i64)
    }
}

/// Execute every pending row through the prepared insert and clear the
/// batch.
fn flush_batch<S: AsStatementRef>(
    statement: &mut Prepared<S>,
    pending: &mut Vec<Vec<SqlValue>>,
    table: &str,
) -> Result<()> {
    for row in pending.drain(..) {
        let params: Vec<Box<dyn InputParameter>> =
            row.into_iter().map(SqlValue::into_parameter).collect();

        statement
            .execute(params.as_slice())
            .map_err(|e| FlowError::copy(table, format!("batch insert failed: {}", e)))?;
    }
    Ok(())
}

/// `?, ?, ..., ?` with one placeholder per column.
fn placeholder_list(columns: usize) -> String {
    vec!["?"; columns].join(", ")
}

/// What to do after accepting one more row.
#[derive(Debug, Clone, Copy)]
struct RowAction {
    flush: bool,
    log: bool,
}

/// Tracks batch flush and progress-log boundaries.
#[derive(Debug)]
struct BatchTracker {
    insert_every: u64,
    log_every: u64,
    rows: u64,
}

impl BatchTracker {
    fn new(insert_every: usize, log_every: usize) -> Self {
        Self {
            insert_every: insert_every.max(1) as u64,
            log_every: log_every.max(1) as u64,
            rows: 0,
        }
    }

    fn advance(&mut self) -> RowAction {
        self.rows += 1;
        RowAction {
            flush: self.rows % self.insert_every == 0,
            log: self.rows % self.log_every == 0,
        }
    }

    fn rows(&self) -> u64 {
        self.rows
    }

    /// True when a partial batch is still pending after the cursor ends.
    fn needs_final_flush(&self) -> bool {
        self.rows % self.insert_every != 0
    }
}

/// Wall-clock throughput accounting for progress and summary lines.
struct ProgressMeter {
    started: Instant,
    batch_started: Instant,
}

impl ProgressMeter {
    fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            batch_started: now,
        }
    }

    /// Average rate since the copy started.
    fn rolling_rate(&self, rows: u64) -> i64 {
        rate(rows, self.started.elapsed().as_secs_f64())
    }

    /// Rate over the rows since the previous progress line; resets the
    /// interval timer.
    fn batch_rate(&mut self, rows: u64) -> i64 {
        let result = rate(rows, self.batch_started.elapsed().as_secs_f64());
        self.batch_started = Instant::now();
        result
    }
}

fn rate(rows: u64, elapsed_seconds: f64) -> i64 {
    if elapsed_seconds > 0.0 {
        (rows as f64 / elapsed_seconds) as i64
    } else {
        0
    }
}
