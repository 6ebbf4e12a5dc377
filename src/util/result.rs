use std::alloc;
use std::error::Error;

use crate::util::error::StorageError;

pub(crate) trait ResultExtension<T, E: Error> {
    /// A method similar to [`Result::unwrap`], except that it applies only to types which implement
    /// [`Error`] and panics with the message of the error itself.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{}", error),
        }
    }
}

pub(crate) trait StorageResultExtension<T> {
    /// Unwraps a storage result for the infallible API. Allocation failures are forwarded to
    /// [`alloc::handle_alloc_error`] as the standard collections do, while capacity overflows
    /// panic with their message.
    ///
    /// # Panics
    /// Panics if the result holds [`StorageError::CapacityExceeded`].
    fn or_handle(self) -> T;
}

impl<T> StorageResultExtension<T> for Result<T, StorageError> {
    fn or_handle(self) -> T {
        match self {
            Ok(val) => val,
            Err(StorageError::AllocFailure(failure)) => alloc::handle_alloc_error(failure.layout),
            Err(StorageError::CapacityExceeded(exceeded)) => Err::<T, _>(exceeded).throw(),
        }
    }
}
