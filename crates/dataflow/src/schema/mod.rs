//! Schema translation: probe the source, emit a matching CREATE TABLE on
//! the target.

use tracing::info;

use crate::config::TableImport;
use crate::db::{probe_columns, ColumnDescriptor, OdbcPool};
use crate::dialect::Dialect;
use crate::error::{FlowError, Result};

/// Creates missing target tables from source column metadata.
pub struct SchemaTranslator<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> SchemaTranslator<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    /// Make sure the target table exists, creating it from source metadata
    /// when the existence probe fails.
    pub fn ensure_table(
        &self,
        source: &OdbcPool,
        target: &OdbcPool,
        import: &TableImport,
    ) -> Result<()> {
        let target_table = import.target_table();

        {
            let conn = target.connect()?;
            let probe = format!("SELECT * FROM {} WHERE 1 = 2", target_table);

            // Any failure is read as "table missing". This conflates real
            // absence with permission or syntax errors; those surface later
            // as a CREATE TABLE failure instead.
            if conn.execute(&probe, ()).is_ok() {
                info!("Target table [{}] already exists and will be used", target_table);
                return Ok(());
            }
        }

        let columns = {
            let conn = source.connect()?;
            probe_columns(&conn, &import.schema_probe_sql(), &import.table)?
        };

        if columns.is_empty() {
            return Err(FlowError::schema(
                target_table,
                "source probe reported no columns",
            ));
        }

        let ddl = create_table_ddl(self.dialect, target_table, &columns);

        let conn = target.connect()?;
        conn.execute(&ddl, ()).map_err(|e| {
            FlowError::schema(target_table, format!("CREATE TABLE failed: {} - DDL: {}", e, ddl))
        })?;

        info!("Created target table [{}]", target_table);
        Ok(())
    }
}

/// Render the CREATE TABLE statement for the probed columns, in ordinal
/// order.
pub fn create_table_ddl(
    dialect: &dyn Dialect,
    target_table: &str,
    columns: &[ColumnDescriptor],
) -> String {
    let col_defs: Vec<String> = columns
        .iter()
        .map(|col| column_definition(dialect, col))
        .collect();

    format!("CREATE TABLE {} ({})", target_table, col_defs.join(", "))
}

fn column_definition(dialect: &dyn Dialect, col: &ColumnDescriptor) -> String {
    let type_name = dialect.type_name(col.generic_type);

    let mut def = format!("{} {}", col.name, type_name);

    if dialect.is_sizable(type_name) && dialect.is_numeric(type_name) {
        if col.precision == 0 {
            // Zero precision means the driver did not report one; size the
            // column to the dialect maximum rather than truncate.
            def.push_str(&format!("({})", dialect.default_max_numeric_precision()));
        } else {
            def.push_str(&format!("({}, {})", col.precision, col.scale));
        }
    } else if dialect.is_sizable(type_name) {
        if col.precision == 0 {
            def.push_str(&format!("({})", dialect.default_max_text_size()));
        } else {
            def.push_str(&format!("({})", col.precision));
        }
    }

    if col.no_nulls {
        def.push_str(" NOT NULL");
    }

    def
}
