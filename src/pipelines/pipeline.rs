//! Pipeline trait.
use crate::error::Error;

/// This trait must be implemented for each Pipeline,
/// and is generic over the return type so that
/// any pipeline that returns a run summary can use the trait aswell.
pub trait Pipeline<T> {
    fn run(&self) -> Result<T, Error>;
}
