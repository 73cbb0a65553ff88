//! SQL Server naming overrides.
//!
//! <https://docs.microsoft.com/en-us/sql/connect/jdbc/using-basic-data-types>

use super::generic::generic_type_name;
use super::{Dialect, GenericType};

/// SQL-Server-flavoured dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDialect;

impl Dialect for MssqlDialect {
    fn name(&self) -> &str {
        "mssql"
    }

    fn type_name(&self, ty: GenericType) -> &'static str {
        match ty {
            // MAX is always used so special column types such as geometry,
            // which some drivers report with zero length, never truncate.
            GenericType::VarBinary | GenericType::LongVarBinary => "VARBINARY(MAX)",
            GenericType::LongVarChar => "VARCHAR(MAX)",
            other => generic_type_name(other),
        }
    }

    fn default_max_text_size(&self) -> &'static str {
        "MAX"
    }

    fn default_max_numeric_precision(&self) -> &'static str {
        "38, 18"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_binary_always_max() {
        let d = MssqlDialect;
        assert_eq!(d.type_name(GenericType::VarBinary), "VARBINARY(MAX)");
        assert_eq!(d.type_name(GenericType::LongVarBinary), "VARBINARY(MAX)");
        assert_eq!(d.type_name(GenericType::LongVarChar), "VARCHAR(MAX)");
    }

    #[test]
    fn test_pre_sized_names_take_no_size_clause() {
        let d = MssqlDialect;
        assert!(!d.is_sizable(d.type_name(GenericType::VarBinary)));
        assert!(d.is_sizable(d.type_name(GenericType::VarChar)));
    }

    #[test]
    fn test_other_codes_match_generic() {
        let d = MssqlDialect;
        assert_eq!(d.type_name(GenericType::Integer), "INT");
        assert_eq!(d.type_name(GenericType::Timestamp), "DATETIME");
        assert_eq!(d.type_name(GenericType::Numeric), "NUMERIC");
    }
}
