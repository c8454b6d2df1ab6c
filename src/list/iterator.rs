use crate::list::cursor::Cursor;
use crate::list::List;
use crate::ListError;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// A fail-fast iterator over clones of the elements of a `List`.
///
/// It drives a [`Cursor`] forward, so it shares the list's internals
/// instead of borrowing the list: the list may still be mutated while the
/// iterator is alive. When that happens, the iterator yields
/// `Err(ListError::ConcurrentModification)` once, and then ends.
///
/// This `struct` is created by the [`iter`] method on [`List`].
///
/// # Examples
///
/// ```
/// use sentinel_list::{List, ListError};
/// use std::iter::FromIterator;
///
/// let mut list = List::from_iter([1, 2, 3]);
///
/// let doubled: Result<Vec<i32>, ListError> = list.iter().map(|x| x.map(|x| x * 2)).collect();
/// assert_eq!(doubled, Ok(vec![2, 4, 6]));
///
/// let mut iter = list.iter();
/// assert_eq!(iter.next(), Some(Ok(1)));
/// list.pop_back();
/// assert_eq!(iter.next(), Some(Err(ListError::ConcurrentModification)));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: List::iter
pub struct Iter<T> {
    cursor: Cursor<T>,
    finished: bool,
}

impl<T> Iter<T> {
    pub(crate) fn new(cursor: Cursor<T>) -> Self {
        Self {
            cursor,
            finished: false,
        }
    }
}

impl<T> fmt::Debug for Iter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("cursor", &self.cursor)
            .field("finished", &self.finished)
            .finish()
    }
}

impl<T: Clone> Iterator for Iter<T> {
    type Item = Result<T, ListError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.cursor.has_next() {
            Ok(true) => Some(self.cursor.next()),
            Ok(false) => {
                self.finished = true;
                None
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl<T: Clone> FusedIterator for Iter<T> {}

/// An owning iterator over the elements of a `List`.
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("list", &self.list)
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.list.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T: Clone> IntoIterator for &'a List<T> {
    type Item = Result<T, ListError>;
    type IntoIter = Iter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.push_back(item));
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}
