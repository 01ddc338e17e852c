//! Native value types storable in fixed-width columns, and the owned
//! row-value representation exchanged across the column boundary.

use crate::column::primitive::PrimitiveColumn;
use crate::column::Column;
use crate::ord::IsFloat;

/// Rows longer than this cannot be materialized as a single [`Value`];
/// consumers that box a row as one scalar value rely on this bound.
pub const MAX_ARRAY_SIZE_AS_VALUE: u64 = 1_000_000;

/// One materialized value: a scalar element, a null marker, or a whole row
/// of a nested column.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    UInt8(u8),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    UInt32(u32),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Array(Vec<Value>),
}

impl Value {
    /// The variant name, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::UInt8(_) => "UInt8",
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::UInt32(_) => "UInt32",
            Value::UInt64(_) => "UInt64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::String(_) => "String",
            Value::Array(_) => "Array",
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

/// A value storable in a [`PrimitiveColumn`]: fixed width, plain old data.
pub trait NativeType:
    'static + Copy + Send + Sync + Default + PartialOrd + std::fmt::Debug + bytemuck::Pod + IsFloat
{
    /// Type name as it appears in column names and error messages.
    const NAME: &'static str;

    fn into_value(self) -> Value;

    /// The native value carried by `value`, if it is of this exact type.
    /// There is no numeric coercion across column types.
    fn from_value(value: &Value) -> Option<Self>;

    /// Wraps a column of this type into the engine's column sum type.
    fn upcast_column(column: PrimitiveColumn<Self>) -> Column;
}

macro_rules! impl_native_type {
    ($t:ty, $variant:ident) => {
        impl NativeType for $t {
            const NAME: &'static str = stringify!($variant);

            #[inline]
            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            #[inline]
            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(*v),
                    _ => None,
                }
            }

            #[inline]
            fn upcast_column(column: PrimitiveColumn<Self>) -> Column {
                Column::$variant(column)
            }
        }

        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$variant(v)
            }
        }
    };
}

impl_native_type!(u8, UInt8);
impl_native_type!(i8, Int8);
impl_native_type!(i16, Int16);
impl_native_type!(i32, Int32);
impl_native_type!(i64, Int64);
impl_native_type!(u32, UInt32);
impl_native_type!(u64, UInt64);
impl_native_type!(f32, Float32);
impl_native_type!(f64, Float64);
