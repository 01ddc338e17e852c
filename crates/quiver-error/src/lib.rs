//! Error types shared by the Quiver engine crates.

use std::borrow::Cow;
use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

pub type Result<T> = std::result::Result<T, QuiverError>;

/// A wrapper around an error message so that both `&'static str` and
/// formatted `String`s convert into the error variants without extra
/// allocations for the static case.
#[derive(Clone, PartialEq, Eq)]
pub struct ErrString(Cow<'static, str>);

impl<T> From<T> for ErrString
where
    T: Into<Cow<'static, str>>,
{
    fn from(msg: T) -> Self {
        ErrString(msg.into())
    }
}

impl AsRef<str> for ErrString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for ErrString {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for ErrString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuiverError {
    /// A kernel could not produce a result for otherwise well-formed inputs.
    ComputeError(ErrString),
    /// A broken invariant or violated precondition. Indicates a logic defect
    /// in the engine, not bad user data; callers abort the current batch.
    InternalError(ErrString),
    /// Input data that the engine cannot represent or refuses to process.
    InvalidArgument(ErrString),
}

impl Display for QuiverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            QuiverError::ComputeError(msg) => write!(f, "compute error: {msg}"),
            QuiverError::InternalError(msg) => write!(f, "internal error: {msg}"),
            QuiverError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for QuiverError {}

#[macro_export]
macro_rules! quiver_err {
    ($variant:ident: $fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::QuiverError::$variant(format!($fmt $(, $arg)*).into())
    };
}

#[macro_export]
macro_rules! quiver_bail {
    ($($tt:tt)+) => {
        return Err($crate::quiver_err!($($tt)+))
    };
}

#[macro_export]
macro_rules! quiver_ensure {
    ($cond:expr, $($tt:tt)+) => {
        if !$cond {
            $crate::quiver_bail!($($tt)+);
        }
    };
}
