use std::marker::PhantomData;
use std::sync::Arc;

use vision_foundry_core::{FoundryError, FoundryResult};

/// Trait for datasets.
///
/// A dataset is a fixed-size, randomly indexable collection of samples.
/// `len` must be constant for the lifetime of the value and `get` must not
/// mutate any state, so a dataset can be read from several places at once.
pub trait Dataset {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at `index`.
    ///
    /// # Errors
    /// Returns [`FoundryError::IndexOutOfBounds`] when `index >= self.len()`.
    fn get(&self, index: usize) -> FoundryResult<Self::Item>;
}

/// Bounds check shared by the concrete datasets.
pub(crate) fn check_index(index: usize, size: usize) -> FoundryResult<()> {
    if index >= size {
        return Err(FoundryError::IndexOutOfBounds { index, size });
    }
    Ok(())
}

impl<D: Dataset + ?Sized> Dataset for &D {
    type Item = D::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> FoundryResult<Self::Item> {
        (**self).get(index)
    }
}

impl<D: Dataset + ?Sized> Dataset for Box<D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> FoundryResult<Self::Item> {
        (**self).get(index)
    }
}

impl<D: Dataset + ?Sized> Dataset for Arc<D> {
    type Item = D::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, index: usize) -> FoundryResult<Self::Item> {
        (**self).get(index)
    }
}

/// An in-memory dataset backed by a `Vec`.
#[derive(Debug, Clone, PartialEq)]
pub struct VecDataset<T: Clone> {
    items: Vec<T>,
}

impl<T: Clone> VecDataset<T> {
    pub fn new(items: Vec<T>) -> Self {
        VecDataset { items }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T: Clone> From<Vec<T>> for VecDataset<T> {
    fn from(items: Vec<T>) -> Self {
        VecDataset::new(items)
    }
}

impl<T: Clone> Dataset for VecDataset<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> FoundryResult<T> {
        self.items
            .get(index)
            .cloned()
            .ok_or(FoundryError::IndexOutOfBounds {
                index,
                size: self.items.len(),
            })
    }
}

/// A dataset whose samples come from a caller-supplied closure.
///
/// This is how an implementation living outside this crate (a file reader,
/// a generator, a foreign runtime) plugs into the loader: hand over a size
/// and a `get_item` function. Indices are bounds-checked before the closure
/// is invoked, so the closure only ever sees `0..len`.
pub struct FnDataset<T, F>
where
    F: Fn(usize) -> FoundryResult<T>,
{
    len: usize,
    get_item: F,
    _item: PhantomData<fn() -> T>,
}

impl<T, F> FnDataset<T, F>
where
    F: Fn(usize) -> FoundryResult<T>,
{
    pub fn new(len: usize, get_item: F) -> Self {
        FnDataset {
            len,
            get_item,
            _item: PhantomData,
        }
    }
}

impl<T, F> Dataset for FnDataset<T, F>
where
    F: Fn(usize) -> FoundryResult<T>,
{
    type Item = T;

    fn len(&self) -> usize {
        self.len
    }

    fn get(&self, index: usize) -> FoundryResult<T> {
        check_index(index, self.len)?;
        (self.get_item)(index)
    }
}
