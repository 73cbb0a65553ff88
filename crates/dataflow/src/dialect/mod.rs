//! Target dialects: generic-type naming, sizing rules and value binding.
//!
//! A dialect maps portable generic type codes onto the SQL type names of a
//! target database and decides how sized types fall back when the source
//! driver reports no size. The set of dialects is closed and small, so the
//! engine dispatches through an enum wrapper instead of boxed trait
//! objects.

mod generic;
mod mssql;
mod oracle;

pub use generic::GenericDialect;
pub use mssql::MssqlDialect;
pub use oracle::OracleDialect;

use odbc_api::DataType;

use crate::value::{NullKind, SqlValue};

/// Portable column type code, the dispatch key for both DDL generation and
/// value binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericType {
    Array,
    BigInt,
    Binary,
    Bit,
    Blob,
    Boolean,
    Char,
    Clob,
    Date,
    Decimal,
    Double,
    Float,
    Integer,
    LongVarBinary,
    LongVarChar,
    NChar,
    NVarChar,
    Numeric,
    Real,
    RowId,
    SmallInt,
    SqlXml,
    Time,
    Timestamp,
    TinyInt,
    VarBinary,
    VarChar,
    Other,
}

impl GenericType {
    /// Map an ODBC column data type to a generic code plus its declared
    /// precision (size) and scale.
    pub fn from_odbc(data_type: DataType) -> (Self, i32, i32) {
        fn len(length: Option<std::num::NonZeroUsize>) -> i32 {
            length.map(|n| n.get() as i32).unwrap_or(0)
        }

        match data_type {
            DataType::TinyInt => (GenericType::TinyInt, 0, 0),
            DataType::SmallInt => (GenericType::SmallInt, 0, 0),
            DataType::Integer => (GenericType::Integer, 0, 0),
            DataType::BigInt => (GenericType::BigInt, 0, 0),
            DataType::Real => (GenericType::Real, 0, 0),
            DataType::Float { .. } => (GenericType::Float, 0, 0),
            DataType::Double => (GenericType::Double, 0, 0),
            DataType::Bit => (GenericType::Bit, 0, 0),
            DataType::Numeric { precision, scale } => {
                (GenericType::Numeric, precision as i32, scale as i32)
            }
            DataType::Decimal { precision, scale } => {
                (GenericType::Decimal, precision as i32, scale as i32)
            }
            DataType::Char { length } => (GenericType::Char, len(length), 0),
            DataType::WChar { length } => (GenericType::NChar, len(length), 0),
            DataType::Varchar { length } => (GenericType::VarChar, len(length), 0),
            DataType::WVarchar { length } => (GenericType::NVarChar, len(length), 0),
            DataType::LongVarchar { length } => (GenericType::LongVarChar, len(length), 0),
            DataType::Binary { length } => (GenericType::Binary, len(length), 0),
            DataType::Varbinary { length } => (GenericType::VarBinary, len(length), 0),
            DataType::LongVarbinary { length } => (GenericType::LongVarBinary, len(length), 0),
            DataType::Date => (GenericType::Date, 0, 0),
            DataType::Time { .. } => (GenericType::Time, 0, 0),
            DataType::Timestamp { .. } => (GenericType::Timestamp, 0, 0),
            // Unknown, driver-specific and any future codes stream as
            // large binary objects.
            _ => (GenericType::Other, 0, 0),
        }
    }

    /// NULL binding hint for this type code.
    pub fn null_kind(self) -> NullKind {
        match self {
            GenericType::BigInt | GenericType::RowId => NullKind::I64,
            GenericType::Integer => NullKind::I32,
            GenericType::SmallInt | GenericType::TinyInt => NullKind::I16,
            GenericType::Bit | GenericType::Boolean => NullKind::Bool,
            GenericType::Double => NullKind::F64,
            GenericType::Float | GenericType::Real => NullKind::F32,
            GenericType::Decimal | GenericType::Numeric => NullKind::Decimal,
            GenericType::Date => NullKind::Date,
            GenericType::Time => NullKind::Time,
            GenericType::Timestamp => NullKind::DateTime,
            GenericType::Binary
            | GenericType::VarBinary
            | GenericType::LongVarBinary
            | GenericType::Blob
            | GenericType::Other => NullKind::Bytes,
            GenericType::Array
            | GenericType::Char
            | GenericType::Clob
            | GenericType::LongVarChar
            | GenericType::NChar
            | GenericType::NVarChar
            | GenericType::SqlXml
            | GenericType::VarChar => NullKind::Text,
        }
    }
}

/// SQL naming, sizing and binding strategy for a target database.
pub trait Dialect: Send + Sync {
    /// Dialect identifier for logging.
    fn name(&self) -> &str;

    /// Target SQL type name for a generic type code. Total: unmapped codes
    /// fall back to a large binary object type.
    fn type_name(&self, ty: GenericType) -> &'static str;

    /// Size used for sizable non-numeric columns whose declared size is 0.
    fn default_max_text_size(&self) -> &'static str;

    /// Precision/scale used for numeric columns whose declared precision
    /// is 0.
    fn default_max_numeric_precision(&self) -> &'static str;

    /// Whether the named type takes a size clause.
    fn is_sizable(&self, type_name: &str) -> bool {
        matches!(
            type_name,
            "VARCHAR2" | "VARCHAR" | "NUMERIC" | "NUMBER" | "DECIMAL" | "CHAR" | "NCHAR"
                | "NVARCHAR" | "NVARCHAR2" | "VARBINARY" | "BINARY"
        )
    }

    /// Whether the named type takes a precision/scale pair.
    fn is_numeric(&self, type_name: &str) -> bool {
        matches!(type_name, "NUMERIC" | "DECIMAL" | "NUMBER")
    }

    /// Convert one fetched cell into the value bound for the matching
    /// insert parameter. The dispatch is identical for every dialect: the
    /// same generic type always converts through the same method.
    fn bind_value(&self, ty: GenericType, raw: Option<&[u8]>) -> SqlValue {
        convert_cell(ty, raw)
    }
}

/// Convert a raw text-mode cell into a typed value keyed by the generic
/// type code. Unparseable cells bind as typed NULLs rather than aborting
/// the copy.
fn convert_cell(ty: GenericType, raw: Option<&[u8]>) -> SqlValue {
    let Some(bytes) = raw else {
        return SqlValue::Null(ty.null_kind());
    };
    let text = String::from_utf8_lossy(bytes);

    match ty {
        GenericType::BigInt | GenericType::RowId => text
            .trim()
            .parse::<i64>()
            .map(SqlValue::I64)
            .unwrap_or(SqlValue::Null(NullKind::I64)),
        GenericType::Integer => text
            .trim()
            .parse::<i32>()
            .map(SqlValue::I32)
            .unwrap_or(SqlValue::Null(NullKind::I32)),
        GenericType::SmallInt => text
            .trim()
            .parse::<i16>()
            .map(SqlValue::I16)
            .unwrap_or(SqlValue::Null(NullKind::I16)),
        // Tiny integers are unsigned bytes on some systems, so parse the
        // full 0..=255 range and widen.
        GenericType::TinyInt => text
            .trim()
            .parse::<u8>()
            .map(|v| SqlValue::I16(v as i16))
            .or_else(|_| text.trim().parse::<i16>().map(SqlValue::I16))
            .unwrap_or(SqlValue::Null(NullKind::I16)),
        GenericType::Bit | GenericType::Boolean => match text.trim() {
            "1" | "true" | "True" | "TRUE" => SqlValue::Bool(true),
            "0" | "false" | "False" | "FALSE" => SqlValue::Bool(false),
            other => SqlValue::Bool(other.parse().unwrap_or(false)),
        },
        GenericType::Double => text
            .trim()
            .parse::<f64>()
            .map(SqlValue::F64)
            .unwrap_or(SqlValue::Null(NullKind::F64)),
        GenericType::Float | GenericType::Real => text
            .trim()
            .parse::<f32>()
            .map(SqlValue::F32)
            .unwrap_or(SqlValue::Null(NullKind::F32)),
        GenericType::Decimal | GenericType::Numeric => {
            let cleaned = text.replace(['$', ','], "");
            rust_decimal::Decimal::from_str_exact(cleaned.trim())
                .or_else(|_| cleaned.trim().parse::<rust_decimal::Decimal>())
                .map(SqlValue::Decimal)
                .unwrap_or_else(|_| {
                    cleaned
                        .trim()
                        .parse::<f64>()
                        .map(SqlValue::F64)
                        .unwrap_or(SqlValue::Null(NullKind::Decimal))
                })
        }
        GenericType::Date => chrono::NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .map(SqlValue::Date)
            .unwrap_or(SqlValue::Null(NullKind::Date)),
        GenericType::Time => chrono::NaiveTime::parse_from_str(text.trim(), "%H:%M:%S%.f")
            .or_else(|_| chrono::NaiveTime::parse_from_str(text.trim(), "%H:%M:%S"))
            .map(SqlValue::Time)
            .unwrap_or(SqlValue::Null(NullKind::Time)),
        GenericType::Timestamp => {
            let trimmed = text.trim();
            chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f")
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f"))
                .or_else(|_| chrono::NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S"))
                .map(SqlValue::DateTime)
                .unwrap_or(SqlValue::Null(NullKind::DateTime))
        }
        GenericType::Binary
        | GenericType::VarBinary
        | GenericType::LongVarBinary
        | GenericType::Blob
        | GenericType::Other => {
            // ODBC text buffers deliver binary columns hex encoded.
            let hex_str = text
                .strip_prefix("0x")
                .or_else(|| text.strip_prefix("0X"))
                .unwrap_or(&text);
            hex::decode(hex_str)
                .map(SqlValue::Bytes)
                .unwrap_or_else(|_| SqlValue::Bytes(bytes.to_vec()))
        }
        GenericType::Array
        | GenericType::Char
        | GenericType::Clob
        | GenericType::LongVarChar
        | GenericType::NChar
        | GenericType::NVarChar
        | GenericType::SqlXml
        | GenericType::VarChar => SqlValue::Text(text.into_owned()),
    }
}

/// Enum-based static dispatch over the closed dialect set.
#[derive(Debug, Clone)]
pub enum DialectImpl {
    Generic(GenericDialect),
    Mssql(MssqlDialect),
    Oracle(OracleDialect),
}

impl DialectImpl {
    /// Select a dialect by configured name, case-insensitively. Unknown or
    /// absent names fall back to the generic dialect.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|n| n.to_uppercase()).as_deref() {
            Some("ORACLE") => DialectImpl::Oracle(OracleDialect),
            Some("MSSQL") => DialectImpl::Mssql(MssqlDialect),
            _ => DialectImpl::Generic(GenericDialect),
        }
    }
}

impl Dialect for DialectImpl {
    fn name(&self) -> &str {
        match self {
            DialectImpl::Generic(d) => d.name(),
            DialectImpl::Mssql(d) => d.name(),
            DialectImpl::Oracle(d) => d.name(),
        }
    }

    fn type_name(&self, ty: GenericType) -> &'static str {
        match self {
            DialectImpl::Generic(d) => d.type_name(ty),
            DialectImpl::Mssql(d) => d.type_name(ty),
            DialectImpl::Oracle(d) => d.type_name(ty),
        }
    }

    fn default_max_text_size(&self) -> &'static str {
        match self {
            DialectImpl::Generic(d) => d.default_max_text_size(),
            DialectImpl::Mssql(d) => d.default_max_text_size(),
            DialectImpl::Oracle(d) => d.default_max_text_size(),
        }
    }

    fn default_max_numeric_precision(&self) -> &'static str {
        match self {
            DialectImpl::Generic(d) => d.default_max_numeric_precision(),
            DialectImpl::Mssql(d) => d.default_max_numeric_precision(),
            DialectImpl::Oracle(d) => d.default_max_numeric_precision(),
        }
    }
}

/// All generic type codes, for totality checks.
#[cfg(test)]
const ALL_TYPES: [GenericType; 28] = [
    GenericType::Array,
    GenericType::BigInt,
    GenericType::Binary,
    GenericType::Bit,
    GenericType::Blob,
    GenericType::Boolean,
    GenericType::Char,
    GenericType::Clob,
    GenericType::Date,
    GenericType::Decimal,
    GenericType::Double,
    GenericType::Float,
    GenericType::Integer,
    GenericType::LongVarBinary,
    GenericType::LongVarChar,
    GenericType::NChar,
    GenericType::NVarChar,
    GenericType::Numeric,
    GenericType::Real,
    GenericType::RowId,
    GenericType::SmallInt,
    GenericType::SqlXml,
    GenericType::Time,
    GenericType::Timestamp,
    GenericType::TinyInt,
    GenericType::VarBinary,
    GenericType::VarChar,
    GenericType::Other,
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_dialect_selection_is_case_insensitive() {
        assert!(matches!(
            DialectImpl::from_name(Some("oracle")),
            DialectImpl::Oracle(_)
        ));
        assert!(matches!(
            DialectImpl::from_name(Some("MsSql")),
            DialectImpl::Mssql(_)
        ));
    }

    #[test]
    fn test_unknown_dialect_falls_back_to_generic() {
        assert!(matches!(
            DialectImpl::from_name(Some("db2")),
            DialectImpl::Generic(_)
        ));
        assert!(matches!(DialectImpl::from_name(None), DialectImpl::Generic(_)));
    }

    #[test]
    fn test_type_name_total_and_deterministic() {
        let dialects: [DialectImpl; 3] = [
            DialectImpl::Generic(GenericDialect),
            DialectImpl::Mssql(MssqlDialect),
            DialectImpl::Oracle(OracleDialect),
        ];

        for dialect in &dialects {
            for ty in ALL_TYPES {
                let first = dialect.type_name(ty);
                assert!(!first.is_empty());
                assert_eq!(first, dialect.type_name(ty));
            }
        }
    }

    #[test]
    fn test_bind_dispatch_is_stable_across_dialects() {
        let dialects: [DialectImpl; 3] = [
            DialectImpl::Generic(GenericDialect),
            DialectImpl::Mssql(MssqlDialect),
            DialectImpl::Oracle(OracleDialect),
        ];

        for ty in ALL_TYPES {
            let expected = dialects[0].bind_value(ty, Some(b"1"));
            for dialect in &dialects[1..] {
                assert_eq!(dialect.bind_value(ty, Some(b"1")), expected);
            }
        }
    }

    #[test]
    fn test_convert_null_cells() {
        assert_eq!(
            convert_cell(GenericType::Integer, None),
            SqlValue::Null(NullKind::I32)
        );
        assert_eq!(
            convert_cell(GenericType::VarChar, None),
            SqlValue::Null(NullKind::Text)
        );
        assert_eq!(
            convert_cell(GenericType::Timestamp, None),
            SqlValue::Null(NullKind::DateTime)
        );
    }

    #[test]
    fn test_convert_integer_cells() {
        assert_eq!(convert_cell(GenericType::Integer, Some(b"42")), SqlValue::I32(42));
        assert_eq!(
            convert_cell(GenericType::BigInt, Some(b"9223372036854775807")),
            SqlValue::I64(i64::MAX)
        );
        assert_eq!(convert_cell(GenericType::SmallInt, Some(b"-32768")), SqlValue::I16(-32768));
        assert_eq!(convert_cell(GenericType::TinyInt, Some(b"255")), SqlValue::I16(255));
        assert_eq!(convert_cell(GenericType::RowId, Some(b"17")), SqlValue::I64(17));
    }

    #[test]
    fn test_convert_boolean_cells() {
        assert_eq!(convert_cell(GenericType::Bit, Some(b"1")), SqlValue::Bool(true));
        assert_eq!(convert_cell(GenericType::Boolean, Some(b"FALSE")), SqlValue::Bool(false));
    }

    #[test]
    fn test_convert_decimal_cells() {
        match convert_cell(GenericType::Decimal, Some(b"123.456")) {
            SqlValue::Decimal(d) => assert_eq!(d.to_string(), "123.456"),
            other => panic!("expected decimal, got {:?}", other),
        }

        // Currency formatting from money-style columns is stripped.
        match convert_cell(GenericType::Numeric, Some(b"$1,234.56")) {
            SqlValue::Decimal(d) => assert_eq!(d.to_string(), "1234.56"),
            other => panic!("expected decimal, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_temporal_cells() {
        match convert_cell(GenericType::Timestamp, Some(b"2023-12-25 10:30:45.123")) {
            SqlValue::DateTime(dt) => {
                assert_eq!(dt.year(), 2023);
                assert_eq!(dt.hour(), 10);
            }
            other => panic!("expected datetime, got {:?}", other),
        }

        match convert_cell(GenericType::Date, Some(b"2023-12-25")) {
            SqlValue::Date(d) => assert_eq!(d.day(), 25),
            other => panic!("expected date, got {:?}", other),
        }

        match convert_cell(GenericType::Time, Some(b"14:30:45")) {
            SqlValue::Time(t) => assert_eq!(t.minute(), 30),
            other => panic!("expected time, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_binary_cells() {
        assert_eq!(
            convert_cell(GenericType::VarBinary, Some(b"0xDEADBEEF")),
            SqlValue::Bytes(vec![0xDE, 0xAD, 0xBE, 0xEF])
        );
        assert_eq!(
            convert_cell(GenericType::Binary, Some(b"CAFEBABE")),
            SqlValue::Bytes(vec![0xCA, 0xFE, 0xBA, 0xBE])
        );
        // Cells that are not valid hex pass through untouched.
        assert_eq!(
            convert_cell(GenericType::Blob, Some(b"zz")),
            SqlValue::Bytes(b"zz".to_vec())
        );
    }

    #[test]
    fn test_convert_invalid_cells_bind_as_typed_null() {
        assert_eq!(
            convert_cell(GenericType::Integer, Some(b"not_a_number")),
            SqlValue::Null(NullKind::I32)
        );
        assert_eq!(
            convert_cell(GenericType::Date, Some(b"not-a-date")),
            SqlValue::Null(NullKind::Date)
        );
    }

    #[test]
    fn test_from_odbc_maps_lengths() {
        let (ty, size, scale) =
            GenericType::from_odbc(DataType::Varchar { length: std::num::NonZeroUsize::new(120) });
        assert_eq!(ty, GenericType::VarChar);
        assert_eq!(size, 120);
        assert_eq!(scale, 0);

        let (ty, size, scale) =
            GenericType::from_odbc(DataType::Decimal { precision: 18, scale: 2 });
        assert_eq!(ty, GenericType::Decimal);
        assert_eq!(size, 18);
        assert_eq!(scale, 2);

        let (ty, size, _) = GenericType::from_odbc(DataType::Varchar { length: None });
        assert_eq!(ty, GenericType::VarChar);
        assert_eq!(size, 0);
    }
}
