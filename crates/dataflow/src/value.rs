//! SQL value types carried between the source cursor and the target
//! prepared statement.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use odbc_api::parameter::InputParameter;
use odbc_api::{Bit, IntoParameter, Nullable};
use rust_decimal::Decimal;

/// Type hint for NULL values so the target parameter is bound with the
/// right C type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NullKind {
    Bool,
    I16,
    I32,
    I64,
    F32,
    F64,
    Decimal,
    Text,
    Bytes,
    Date,
    Time,
    DateTime,
}

/// A single cell value bound into one parameter slot of the insert
/// statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// NULL with a type hint for binding.
    Null(NullKind),

    /// Boolean / bit value.
    Bool(bool),

    /// 16-bit signed integer (also carries tiny unsigned bytes).
    I16(i16),

    /// 32-bit signed integer.
    I32(i32),

    /// 64-bit signed integer.
    I64(i64),

    /// 32-bit floating point.
    F32(f32),

    /// 64-bit floating point.
    F64(f64),

    /// Arbitrary-precision decimal, bound as text.
    Decimal(Decimal),

    /// Character data.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),

    /// Date without time component.
    Date(NaiveDate),

    /// Time without date component.
    Time(NaiveTime),

    /// Timestamp without timezone.
    DateTime(NaiveDateTime),
}

impl SqlValue {
    /// Check if this value is NULL.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Convert into an owned ODBC input parameter.
    ///
    /// Decimal and temporal values are bound as text and converted by the
    /// target driver; everything else binds through its native C type.
    pub fn into_parameter(self) -> Box<dyn InputParameter> {
        match self {
            SqlValue::Null(kind) => null_parameter(kind),
            SqlValue::Bool(v) => Box::new(Bit(u8::from(v)).into_parameter()),
            SqlValue::I16(v) => Box::new(v.into_parameter()),
            SqlValue::I32(v) => Box::new(v.into_parameter()),
            SqlValue::I64(v) => Box::new(v.into_parameter()),
            SqlValue::F32(v) => Box::new(v.into_parameter()),
            SqlValue::F64(v) => Box::new(v.into_parameter()),
            SqlValue::Decimal(v) => Box::new(v.to_string().into_parameter()),
            SqlValue::Text(v) => Box::new(v.into_parameter()),
            SqlValue::Bytes(v) => Box::new(v.into_parameter()),
            SqlValue::Date(v) => Box::new(v.format("%Y-%m-%d").to_string().into_parameter()),
            SqlValue::Time(v) => Box::new(v.format("%H:%M:%S%.3f").to_string().into_parameter()),
            SqlValue::DateTime(v) => {
                Box::new(v.format("%Y-%m-%d %H:%M:%S%.3f").to_string().into_parameter())
            }
        }
    }
}

fn null_parameter(kind: NullKind) -> Box<dyn InputParameter> {
    match kind {
        NullKind::Bool => Box::new(Nullable::<Bit>::null().into_parameter()),
        NullKind::I16 => Box::new(Nullable::<i16>::null().into_parameter()),
        NullKind::I32 => Box::new(Nullable::<i32>::null().into_parameter()),
        NullKind::I64 => Box::new(Nullable::<i64>::null().into_parameter()),
        NullKind::F32 => Box::new(Nullable::<f32>::null().into_parameter()),
        NullKind::F64 => Box::new(Nullable::<f64>::null().into_parameter()),
        NullKind::Bytes => Box::new(Option::<Vec<u8>>::None.into_parameter()),
        // Text-bound kinds share a NULL VARCHAR binding.
        NullKind::Decimal | NullKind::Text | NullKind::Date | NullKind::Time
        | NullKind::DateTime => Box::new(Option::<String>::None.into_parameter()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_null() {
        assert!(SqlValue::Null(NullKind::Text).is_null());
        assert!(!SqlValue::I32(42).is_null());
    }

    #[test]
    fn test_temporal_text_rendering() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 25).unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2023-12-25");

        let stamp = date.and_hms_milli_opt(10, 30, 45, 123).unwrap();
        assert_eq!(
            stamp.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            "2023-12-25 10:30:45.123"
        );
    }

    #[test]
    fn test_into_parameter_accepts_every_variant() {
        let values = vec![
            SqlValue::Null(NullKind::I64),
            SqlValue::Bool(true),
            SqlValue::I16(1),
            SqlValue::I32(2),
            SqlValue::I64(3),
            SqlValue::F32(1.5),
            SqlValue::F64(2.5),
            SqlValue::Decimal(Decimal::new(12345, 2)),
            SqlValue::Text("hello".to_string()),
            SqlValue::Bytes(vec![0xDE, 0xAD]),
            SqlValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            SqlValue::Time(NaiveTime::from_hms_opt(12, 0, 0).unwrap()),
            SqlValue::DateTime(
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap(),
            ),
        ];

        let params: Vec<_> = values.into_iter().map(SqlValue::into_parameter).collect();
        assert_eq!(params.len(), 13);
    }
}
