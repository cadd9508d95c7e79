//! Random access over lazy producers.

use crate::error::{FractalError, Result};

/// Memoizing, index-addressable view over an iterator.
///
/// Elements are pulled from the wrapped producer only when an index at or beyond
/// the realized prefix is requested, and are kept for the lifetime of the cache.
/// `get(i)` always returns the `i`-th element the producer yielded.
#[derive(Debug)]
pub struct IndexedCache<I: Iterator> {
    source: I,
    realized: Vec<I::Item>,
}

impl<I: Iterator> IndexedCache<I> {
    /// Wraps `source` without pulling anything from it.
    pub fn new(source: I) -> Self {
        Self {
            source,
            realized: Vec::new(),
        }
    }

    /// Returns the element at `index`, pulling from the producer as needed.
    ///
    /// Fails with [`FractalError::Exhausted`] if the producer ends first. The
    /// elements pulled before it ended stay cached.
    pub fn get(&mut self, index: usize) -> Result<&I::Item> {
        while self.realized.len() <= index {
            match self.source.next() {
                Some(item) => self.realized.push(item),
                None => {
                    return Err(FractalError::Exhausted {
                        requested: index,
                        available: self.realized.len(),
                    });
                }
            }
        }
        Ok(&self.realized[index])
    }

    /// Number of elements realized so far.
    pub fn len(&self) -> usize {
        self.realized.len()
    }

    /// Returns `true` if nothing has been requested yet.
    pub fn is_empty(&self) -> bool {
        self.realized.is_empty()
    }

    /// The realized prefix, in producer order.
    pub fn realized(&self) -> &[I::Item] {
        &self.realized
    }
}

/// Converts a user-supplied, signed generation number into a cache index.
pub fn generation_index(raw: i64) -> Result<usize> {
    usize::try_from(raw).map_err(|_| FractalError::InvalidIndex(raw))
}
