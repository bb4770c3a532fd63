//! A boundary that turns panics into errors.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

use crate::error::{Error, Fault};

/// Run `op`, turning a panic into an [`Error`].
///
/// A panic carrying an [`Error`] comes back as that error. Panics from the
/// standard library's runtime checks become [`Error::Runtime`], and any other
/// message becomes [`Error::Panic`].
///
/// # Example
///
/// ```
/// let result: Result<(), _> = astfrom::guard(|| panic!("x"));
/// assert_eq!(result.unwrap_err().to_string(), "panic: x");
/// ```
pub fn guard<T, F>(op: F) -> Result<T, Error>
where
    F: FnOnce() -> Result<T, Error>,
{
    match panic::catch_unwind(AssertUnwindSafe(op)) {
        Ok(result) => result,
        Err(payload) => {
            let error = from_payload(payload);
            warn!(%error, "recovered from a panic");
            Err(error)
        }
    }
}

fn from_payload(payload: Box<dyn Any + Send>) -> Error {
    let payload = match payload.downcast::<Error>() {
        Ok(error) => return *error,
        Err(payload) => payload,
    };

    let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        return Error::Panic("<non-string panic payload>".into());
    };

    match Fault::classify(&message) {
        Some(fault) => Error::Runtime { fault, message },
        None => Error::Panic(message),
    }
}
