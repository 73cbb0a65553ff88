//! Portable fallback dialect for targets without vendor-specific naming.

use super::{Dialect, GenericType};

/// Dialect using portable SQL type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericDialect;

/// Portable name table shared by the vendor dialects for codes they do not
/// override.
pub(super) fn generic_type_name(ty: GenericType) -> &'static str {
    match ty {
        GenericType::Array => "ARRAY",
        GenericType::BigInt => "BIGINT",
        GenericType::Binary => "BINARY",
        GenericType::Bit => "BIT",
        GenericType::Blob => "BLOB",
        GenericType::Boolean => "BIT",
        GenericType::Char => "CHAR",
        GenericType::Clob => "CLOB",
        GenericType::Date => "DATE",
        GenericType::Decimal => "DECIMAL",
        GenericType::Double => "DOUBLE",
        GenericType::Float => "FLOAT",
        GenericType::Integer => "INT",
        GenericType::LongVarBinary => "BLOB",
        GenericType::LongVarChar => "CLOB",
        GenericType::NChar => "NCHAR",
        GenericType::NVarChar => "NVARCHAR",
        GenericType::Numeric => "NUMERIC",
        GenericType::Real => "REAL",
        GenericType::RowId => "BIGINT",
        GenericType::SmallInt => "SMALLINT",
        GenericType::SqlXml => "BLOB",
        GenericType::Time => "TIME",
        GenericType::Timestamp => "DATETIME",
        GenericType::TinyInt => "TINYINT",
        GenericType::VarBinary => "VARBINARY",
        GenericType::VarChar => "VARCHAR",
        GenericType::Other => "BLOB",
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &str {
        "generic"
    }

    fn type_name(&self, ty: GenericType) -> &'static str {
        generic_type_name(ty)
    }

    fn default_max_text_size(&self) -> &'static str {
        "MAX"
    }

    fn default_max_numeric_precision(&self) -> &'static str {
        "38, 12"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_mappings() {
        let d = GenericDialect;
        assert_eq!(d.type_name(GenericType::Integer), "INT");
        assert_eq!(d.type_name(GenericType::VarChar), "VARCHAR");
        assert_eq!(d.type_name(GenericType::Timestamp), "DATETIME");
        assert_eq!(d.type_name(GenericType::Boolean), "BIT");
        assert_eq!(d.type_name(GenericType::RowId), "BIGINT");
    }

    #[test]
    fn test_unmapped_codes_fall_back_to_blob() {
        let d = GenericDialect;
        assert_eq!(d.type_name(GenericType::Other), "BLOB");
        assert_eq!(d.type_name(GenericType::SqlXml), "BLOB");
    }

    #[test]
    fn test_sizable_and_numeric_tables() {
        let d = GenericDialect;
        assert!(d.is_sizable("VARCHAR"));
        assert!(d.is_sizable("DECIMAL"));
        assert!(!d.is_sizable("BLOB"));
        assert!(!d.is_sizable("VARBINARY(MAX)"));

        assert!(d.is_numeric("NUMERIC"));
        assert!(d.is_numeric("NUMBER"));
        assert!(!d.is_numeric("VARCHAR"));
    }
}
