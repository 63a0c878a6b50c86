//! A helpful trait to allow us to iterate over all variants of an enum type

use std::marker::PhantomData;

/// Marks an enum whose variants can be iterated over in the order they are defined.
///
/// Derive this with [`hexfield_macros::IterableEnum`].
pub trait IterableEnum: Sized {
    /// The number of variants of this enum
    const N_VARIANTS: usize;

    /// Iterates over the possible variants in the order they were defined.
    fn variants() -> EnumIter<Self> {
        EnumIter::default()
    }

    /// Returns the variant stored at the provided index if it exists.
    ///
    /// This is mostly used internally, to enable space-efficient iteration.
    fn get_at(index: usize) -> Option<Self>;

    /// Returns the position of this variant in the defining enum
    fn index(&self) -> usize;
}

/// An iterator of enum variants.
///
/// Created by calling [`IterableEnum::variants`].
#[derive(Debug, Clone)]
pub struct EnumIter<A: IterableEnum> {
    /// Keeps track of which variant should be provided next.
    ///
    /// This is also the number of variants that have already been yielded.
    index: usize,
    /// Marker used to keep track of which `IterableEnum` this `EnumIter` iterates through.
    _phantom: PhantomData<A>,
}

impl<A: IterableEnum> Iterator for EnumIter<A> {
    type Item = A;

    fn next(&mut self) -> Option<A> {
        let item = A::get_at(self.index);
        if item.is_some() {
            self.index += 1;
        }

        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = A::N_VARIANTS.saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<A: IterableEnum> ExactSizeIterator for EnumIter<A> {}

// We can't derive this, because otherwise it won't work when A is not default
impl<A: IterableEnum> Default for EnumIter<A> {
    fn default() -> Self {
        EnumIter {
            index: 0,
            _phantom: PhantomData,
        }
    }
}
