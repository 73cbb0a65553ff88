//! Oracle naming overrides.
//!
//! <https://docs.oracle.com/cd/B28359_01/java.111/b31226/datamap.htm>

use super::generic::generic_type_name;
use super::{Dialect, GenericType};

/// Oracle-flavoured dialect.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDialect;

impl Dialect for OracleDialect {
    fn name(&self) -> &str {
        "oracle"
    }

    fn type_name(&self, ty: GenericType) -> &'static str {
        match ty {
            GenericType::Array => "VARRAY",
            GenericType::Binary => "BLOB",
            GenericType::Boolean => "BOOLEAN",
            GenericType::Double | GenericType::Float => "DOUBLE PRECISION",
            GenericType::Integer => "INTEGER",
            GenericType::Numeric => "NUMBER",
            GenericType::NVarChar => "NVARCHAR2",
            GenericType::SqlXml => "XML",
            // Oracle DATE carries both date and time-of-day.
            GenericType::Time | GenericType::Timestamp => "DATE",
            GenericType::VarBinary => "VARCHAR FOR BIT DATA",
            GenericType::VarChar => "VARCHAR2",
            other => generic_type_name(other),
        }
    }

    fn default_max_text_size(&self) -> &'static str {
        "4000"
    }

    fn default_max_numeric_precision(&self) -> &'static str {
        "38, 12"
    }
}
