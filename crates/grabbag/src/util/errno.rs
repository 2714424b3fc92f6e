//! Errno-style error classification.
//!
//! An error is *errno-like* when it carries an OS-style error code: a
//! symbolic name such as `ENOENT` plus a numeric errno. Two sources qualify:
//!
//! - [`ErrnoError`] values, which carry both fields explicitly;
//! - [`std::io::Error`] values that wrap a raw OS error number. Errors built
//!   from a bare [`std::io::ErrorKind`] have no code and do not qualify.
//!
//! # Example
//!
//! ```
//! use grabbag::util::errno::{matches_code, ErrnoCode, ErrnoError};
//!
//! let err = ErrnoError::new("ENOENT", -2, "no such file or directory");
//! assert!(matches_code(Some(&err), &ErrnoCode::from("ENOENT")));
//! assert!(matches_code(Some(&err), &ErrnoCode::from(-2)));
//! assert!(!matches_code(None, &ErrnoCode::from("ENOENT")));
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::io;

use serde_json::Value;

use crate::error::{Error, Result};

/// Code name reported for OS error numbers missing from the name table.
pub const UNKNOWN_CODE: &str = "UNKNOWN";

#[cfg(unix)]
const ERRNO_NAMES: &[(i32, &str)] = &[
    (libc::EPERM, "EPERM"),
    (libc::ENOENT, "ENOENT"),
    (libc::ESRCH, "ESRCH"),
    (libc::EINTR, "EINTR"),
    (libc::EIO, "EIO"),
    (libc::ENXIO, "ENXIO"),
    (libc::E2BIG, "E2BIG"),
    (libc::ENOEXEC, "ENOEXEC"),
    (libc::EBADF, "EBADF"),
    (libc::ECHILD, "ECHILD"),
    (libc::EAGAIN, "EAGAIN"),
    (libc::ENOMEM, "ENOMEM"),
    (libc::EACCES, "EACCES"),
    (libc::EFAULT, "EFAULT"),
    (libc::EBUSY, "EBUSY"),
    (libc::EEXIST, "EEXIST"),
    (libc::EXDEV, "EXDEV"),
    (libc::ENODEV, "ENODEV"),
    (libc::ENOTDIR, "ENOTDIR"),
    (libc::EISDIR, "EISDIR"),
    (libc::EINVAL, "EINVAL"),
    (libc::ENFILE, "ENFILE"),
    (libc::EMFILE, "EMFILE"),
    (libc::ENOTTY, "ENOTTY"),
    (libc::EFBIG, "EFBIG"),
    (libc::ENOSPC, "ENOSPC"),
    (libc::ESPIPE, "ESPIPE"),
    (libc::EROFS, "EROFS"),
    (libc::EMLINK, "EMLINK"),
    (libc::EPIPE, "EPIPE"),
    (libc::ERANGE, "ERANGE"),
    (libc::ENAMETOOLONG, "ENAMETOOLONG"),
    (libc::ENOSYS, "ENOSYS"),
    (libc::ENOTEMPTY, "ENOTEMPTY"),
    (libc::ELOOP, "ELOOP"),
    (libc::ENOTSOCK, "ENOTSOCK"),
    (libc::EADDRINUSE, "EADDRINUSE"),
    (libc::EADDRNOTAVAIL, "EADDRNOTAVAIL"),
    (libc::ENETDOWN, "ENETDOWN"),
    (libc::ENETUNREACH, "ENETUNREACH"),
    (libc::ECONNABORTED, "ECONNABORTED"),
    (libc::ECONNRESET, "ECONNRESET"),
    (libc::ENOTCONN, "ENOTCONN"),
    (libc::ETIMEDOUT, "ETIMEDOUT"),
    (libc::ECONNREFUSED, "ECONNREFUSED"),
    (libc::EHOSTUNREACH, "EHOSTUNREACH"),
    (libc::EALREADY, "EALREADY"),
    (libc::EINPROGRESS, "EINPROGRESS"),
    (libc::ECANCELED, "ECANCELED"),
];

#[cfg(not(unix))]
const ERRNO_NAMES: &[(i32, &str)] = &[];

/// Look up the symbolic name of an OS error number.
///
/// Returns `None` when the number is not in the platform table.
pub fn errno_name(errno: i32) -> Option<&'static str> {
    ERRNO_NAMES
        .iter()
        .find(|(number, _)| *number == errno)
        .map(|(_, name)| *name)
}

// ============================================================================
// ErrnoError
// ============================================================================

/// An error carrying an explicit errno-style code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrnoError {
    code: String,
    errno: i32,
    message: String,
}

impl ErrnoError {
    /// Create an errno error from its parts.
    pub fn new(code: impl Into<String>, errno: i32, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            errno,
            message: message.into(),
        }
    }

    /// Build an errno error from an I/O error carrying a raw OS error.
    ///
    /// Returns `None` when the I/O error has no OS error number.
    pub fn from_io(err: &io::Error) -> Option<Self> {
        let errno = err.raw_os_error()?;
        let code = errno_name(errno).unwrap_or(UNKNOWN_CODE);
        Some(Self::new(code, errno, err.to_string()))
    }

    /// The symbolic code, e.g. `ENOENT`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The numeric errno.
    pub fn errno(&self) -> i32 {
        self.errno
    }
}

impl fmt::Display for ErrnoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl StdError for ErrnoError {}

// ============================================================================
// ErrnoCode
// ============================================================================

/// An expected code to compare an errno error against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrnoCode {
    /// Compared against the error's symbolic code.
    Name(String),
    /// Compared against the error's numeric errno.
    Number(i32),
}

impl From<&str> for ErrnoCode {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for ErrnoCode {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<i32> for ErrnoCode {
    fn from(number: i32) -> Self {
        Self::Number(number)
    }
}

impl TryFrom<&Value> for ErrnoCode {
    type Error = Error;

    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::String(name) => Ok(Self::Name(name.clone())),
            Value::Number(n) => integral_errno(n).map(Self::Number).ok_or_else(|| {
                Error::invalid_argument(format!("errno code is not an i32 integer: {value}"))
            }),
            other => Err(Error::invalid_argument(format!(
                "expected a string or numeric errno code, got {other}"
            ))),
        }
    }
}

/// Map a JSON number to an errno when it is integral and fits in an `i32`.
///
/// Float-typed callers send `-2.0` for errno `-2`.
fn integral_errno(n: &serde_json::Number) -> Option<i32> {
    if let Some(int) = n.as_i64() {
        return i32::try_from(int).ok();
    }
    let float = n.as_f64()?;
    let in_range = float >= f64::from(i32::MIN) && float <= f64::from(i32::MAX);
    (float.fract() == 0.0 && in_range).then_some(float as i32)
}

// ============================================================================
// Classification
// ============================================================================

/// The code and errno extracted from an errno-like error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrnoDetails<'a> {
    /// Symbolic code, `UNKNOWN` when the number has no known name
    pub code: &'a str,
    /// Numeric errno
    pub errno: i32,
}

/// Extract the errno code and number from an error, if it carries them.
pub fn errno_details<'a>(err: &'a (dyn StdError + 'static)) -> Option<ErrnoDetails<'a>> {
    if let Some(errno_err) = err.downcast_ref::<ErrnoError>() {
        return Some(ErrnoDetails {
            code: errno_err.code(),
            errno: errno_err.errno(),
        });
    }

    let io_err = err.downcast_ref::<io::Error>()?;
    if let Some(errno) = io_err.raw_os_error() {
        return Some(ErrnoDetails {
            code: errno_name(errno).unwrap_or(UNKNOWN_CODE),
            errno,
        });
    }

    // io::Error wrapping an ErrnoError payload
    io_err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<ErrnoError>())
        .map(|errno_err| ErrnoDetails {
            code: errno_err.code(),
            errno: errno_err.errno(),
        })
}

/// Returns `true` if the error carries an errno-style code.
pub fn is_errno_like(err: &(dyn StdError + 'static)) -> bool {
    errno_details(err).is_some()
}

/// Compare an error's code against an expected code.
///
/// A name is compared with the error's symbolic code, a number with its
/// errno. Absent or non-errno errors never match.
pub fn matches_code(err: Option<&(dyn StdError + 'static)>, code: &ErrnoCode) -> bool {
    let Some(details) = err.and_then(errno_details) else {
        return false;
    };

    match code {
        ErrnoCode::Name(name) => details.code == name,
        ErrnoCode::Number(number) => details.errno == *number,
    }
}

/// Compare an error's code against a dynamically typed expected code.
///
/// Returns `Ok(false)` for absent or non-errno errors without inspecting
/// `code`. A string is compared with the symbolic code; any number is
/// compared numerically with the errno, so `-2.0` matches errno `-2` and
/// `1.5` matches nothing.
///
/// # Errors
///
/// [`Error::InvalidArgument`] when `code` is neither a string nor a number.
pub fn matches_code_value(err: Option<&(dyn StdError + 'static)>, code: &Value) -> Result<bool> {
    let Some(details) = err.and_then(errno_details) else {
        return Ok(false);
    };

    match code {
        Value::String(name) => Ok(details.code == name),
        Value::Number(n) => Ok(n.as_f64() == Some(f64::from(details.errno))),
        other => Err(Error::invalid_argument(format!(
            "expected a string or numeric errno code, got {other}"
        ))),
    }
}
