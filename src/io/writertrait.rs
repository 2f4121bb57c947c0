//! Writer trait.
use crate::error::Error;

/// Destination of produced rows, written in bulk or one at a time.
pub trait WriterTrait {
    type Item;

    fn write(&mut self, vals: Vec<Self::Item>) -> Result<(), Error>;
    fn write_single(&mut self, val: &Self::Item) -> Result<(), Error>;
}

/// In-memory writer, mostly used to compare strategies.
impl<T: Clone> WriterTrait for Vec<T> {
    type Item = T;

    fn write(&mut self, vals: Vec<T>) -> Result<(), Error> {
        self.extend(vals);
        Ok(())
    }

    fn write_single(&mut self, val: &T) -> Result<(), Error> {
        self.push(val.clone());
        Ok(())
    }
}
