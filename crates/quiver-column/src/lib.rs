//! In-memory columnar batch representation of the Quiver vectorized engine.
//!
//! A column stores one value per logical row in a flat buffer. Nested
//! (`Array`) columns store one *array of values* per row as a flattened
//! element column plus a cumulative per-row length index; every bulk operator
//! of the engine (filter, replicate, permute, range insert, erase, arena
//! serialization, hashing, comparison) is implemented over that pair.
//!
//! Columns are exclusively owned by one pipeline-stage execution context at a
//! time. None of the operators synchronize internally; sharing across stages
//! is read-only or via an explicit structural copy.

pub mod arena;
pub mod column;
pub mod offsets;
pub mod ord;
pub mod types;

pub use arena::{Arena, ScratchArena};
pub use column::array::ArrayColumn;
pub use column::constant::ConstColumn;
pub use column::nullable::NullableColumn;
pub use column::primitive::PrimitiveColumn;
pub use column::string::StringColumn;
pub use column::{Column, Permutation};
pub use offsets::Offsets;
pub use ord::NanDirection;
pub use types::{NativeType, Value, MAX_ARRAY_SIZE_AS_VALUE};
