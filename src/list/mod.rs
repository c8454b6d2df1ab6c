use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::iter::FromIterator;
use std::rc::Rc;

use crate::list::cursor::Cursor;
use crate::list::node::{Nodes, GHOST};
use crate::{Iter, ListError};

pub mod cursor;
pub mod iterator;

mod node;

/// The `List` is a doubly-linked list with a ghost node, implemented as a
/// cyclic list. It allows inserting and removing elements at a cursor in
/// constant time. In compromise, accessing or mutating elements at any
/// position take *O*(*n*) time.
///
/// The `List` shares its internals with every [`Cursor`] created from it:
/// - the node arena, where the ghost node is the first slot and is never
///   freed;
/// - the length of the list;
/// - the modification counter, bumped once per element added or removed.
///
/// Every positional method drives a fresh cursor to its target, so a
/// structural change through the list makes all live cursors fail fast,
/// exactly like a change through another cursor.
pub struct List<T> {
    chain: Rc<RefCell<Chain<T>>>,
}

/// State shared by a list and its cursors.
pub(crate) struct Chain<T> {
    pub(crate) nodes: Nodes<T>,
    pub(crate) len: usize,
    /// wraps around, only compared for equality
    pub(crate) modifications: usize,
}

impl<T> Chain<T> {
    fn new() -> Self {
        Self {
            nodes: Nodes::new(),
            len: 0,
            modifications: 0,
        }
    }

    /// Record one structural change and return the new counter value.
    pub(crate) fn bump(&mut self) -> usize {
        self.modifications = self.modifications.wrapping_add(1);
        self.modifications
    }
}

// private methods
impl<T> List<T> {
    fn check_index(&self, index: usize, bound: usize) -> Result<(), ListError> {
        if index >= bound {
            return Err(ListError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn modifications(&self) -> usize {
        self.chain.borrow().modifications
    }
}

impl<T> List<T> {
    /// Create an empty `List`
    ///
    /// # Examples
    /// ```
    /// use sentinel_list::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            chain: Rc::new(RefCell::new(Chain::new())),
        }
    }

    /// Returns the length of the `List`.
    ///
    /// This never fails, even while cursors over the list are stale.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn len(&self) -> usize {
        self.chain.borrow().len
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chain.borrow().nodes.next_of(GHOST) == GHOST
    }

    /// Provides a cursor before the first element of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next_index(), Ok(0));
    /// assert_eq!(cursor.next(), Ok(1));
    /// ```
    pub fn cursor(&self) -> Cursor<T> {
        Cursor::start(Rc::clone(&self.chain))
    }

    /// Provides a cursor after the last element of the list.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    /// assert_eq!(cursor.next_index(), Ok(3));
    /// assert_eq!(cursor.previous(), Ok(3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<T> {
        Cursor::end(Rc::clone(&self.chain))
    }

    /// Provides a cursor whose next element is at index `at`, or fails if
    /// `at > len`.
    ///
    /// The cursor walks from whichever end of the list is nearer.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(min(*at*, *n* - *at*)) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3, 4]);
    /// let mut cursor = list.cursor_at(3).unwrap();
    /// assert_eq!(cursor.next(), Ok(4));
    ///
    /// assert_eq!(
    ///     list.cursor_at(5).unwrap_err(),
    ///     ListError::IndexOutOfBounds { index: 5, len: 4 }
    /// );
    /// ```
    pub fn cursor_at(&self, at: usize) -> Result<Cursor<T>, ListError> {
        let len = self.len();
        self.check_index(at, len + 1)?;
        // current=|, target=t, ghost=#
        if at <= len - at {
            // target is near the start: [|-->t       #]
            let mut cursor = self.cursor();
            cursor.seek_forward(at)?;
            Ok(cursor)
        } else {
            // target is near the end: [       t<--|#]
            let mut cursor = self.cursor_end();
            cursor.seek_backward(len - at)?;
            Ok(cursor)
        }
    }

    /// Replaces the element at index `at`, and returns the old one.
    ///
    /// Replacing is not a structural change, so live cursors stay valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.set(1, 5), Ok(2));
    /// assert!(list.set(3, 6).is_err());
    /// assert_eq!(Vec::from_iter(list), vec![1, 5, 3]);
    /// ```
    pub fn set(&mut self, at: usize, element: T) -> Result<T, ListError> {
        self.check_index(at, self.len())?;
        let mut cursor = self.cursor_at(at)?;
        cursor.step_forward()?;
        cursor.set(element)
    }

    /// Adds an element at the given index in the list, or fails if
    /// `at > len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// list.insert(2, 4).unwrap();
    /// list.insert(4, 5).unwrap();
    /// assert!(list.insert(7, 6).is_err());
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 2, 4, 3, 5]);
    /// ```
    pub fn insert(&mut self, at: usize, element: T) -> Result<(), ListError> {
        self.cursor_at(at)?.add(element)
    }

    /// Removes the element at the given index and returns it, or fails if
    /// `at >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.remove(0), Ok(1));
    /// assert!(list.remove(1).is_err());
    /// assert_eq!(list.remove(0), Ok(3));
    /// ```
    pub fn remove(&mut self, at: usize) -> Result<T, ListError> {
        self.check_index(at, self.len())?;
        let mut cursor = self.cursor_at(at)?;
        cursor.step_forward()?;
        cursor.remove()
    }

    /// Adds an element first in the list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn push_front(&mut self, element: T) {
        self.cursor()
            .add(element)
            .expect("a fresh cursor is never stale")
    }

    /// Appends an element to the back of a list.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.back(), Some(3));
    /// ```
    pub fn push_back(&mut self, element: T) {
        self.cursor_end()
            .add(element)
            .expect("a fresh cursor is never stale")
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&mut self) -> Option<T> {
        let mut cursor = self.cursor();
        cursor.step_forward().ok()?;
        cursor.remove().ok()
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    pub fn pop_back(&mut self) -> Option<T> {
        let mut cursor = self.cursor_end();
        cursor.step_backward().ok()?;
        cursor.remove().ok()
    }

    /// Removes all elements from the `List`.
    ///
    /// Every removal is a structural change, so all live cursors become
    /// stale unless the list was already empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    #[inline]
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
    }

    /// Provides a fail-fast iterator over clones of the elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    ///
    /// let sum: Result<i32, ListError> = list.iter().sum();
    /// assert_eq!(sum, Ok(6));
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(Ok(1)));
    /// list.push_back(4);
    /// assert_eq!(iter.next(), Some(Err(ListError::ConcurrentModification)));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<T> {
        Iter::new(self.cursor())
    }
}

impl<T: Clone> List<T> {
    /// Returns a clone of the element at index `at`, or fails if
    /// `at >= len`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter(['a', 'b', 'c']);
    /// assert_eq!(list.get(2), Ok('c'));
    /// assert_eq!(list.get(3), Err(ListError::IndexOutOfBounds { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, at: usize) -> Result<T, ListError> {
        self.check_index(at, self.len())?;
        self.cursor_at(at)?.next()
    }

    /// Returns a clone of the front element, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(1));
    /// ```
    pub fn front(&self) -> Option<T> {
        self.cursor().next().ok()
    }

    /// Returns a clone of the back element, or `None` if the list is empty.
    pub fn back(&self) -> Option<T> {
        self.cursor_end().previous().ok()
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let chain = self.chain.borrow();
        f.debug_list().entries(chain.nodes.elements()).finish()
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Clones the elements into a new, independent list.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let chain = self.chain.borrow();
        List::from_iter(chain.nodes.elements().cloned())
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        let (this, other) = (self.chain.borrow(), other.chain.borrow());
        this.len == other.len && this.nodes.elements().eq(other.nodes.elements())
    }
}

impl<T: Eq> Eq for List<T> {}

/// Dropping the list removes its elements and counts one more change, so
/// cursors that outlive it fail with [`ListError::ConcurrentModification`],
/// even if the list was already empty.
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
        self.chain.borrow_mut().bump();
    }
}

#[cfg(test)]
mod tests {
    use crate::list::List;
    use crate::ListError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::cell::RefCell;
    use std::fmt::Debug;
    use std::iter::FromIterator;

    fn list_eq<T, I>(list: &List<T>, expected: I)
    where
        T: Debug + Clone + Eq,
        I: IntoIterator<Item = T>,
    {
        assert_eq!(
            list.iter().collect::<Result<Vec<_>, _>>(),
            Ok(Vec::from_iter(expected))
        );
        let chain = list.chain.borrow();
        chain.nodes.assert_cyclic(chain.len);
    }

    #[test]
    fn list_create() {
        let mut list = List::<i32>::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.modifications(), 0);
        list.push_back(1);
        assert!(!list.is_empty());
        assert_eq!(list.pop_back(), Some(1));
        assert!(list.is_empty());
        list_eq(&list, None);
    }

    #[test]
    fn list_drop() {
        #[derive(Debug)]
        struct DropChecker<'a, T: Copy> {
            value: T,
            dropped: &'a RefCell<Vec<T>>,
        }
        impl<'a, T: Copy> DropChecker<'a, T> {
            fn new(value: T, dropped: &'a RefCell<Vec<T>>) -> Self {
                Self { value, dropped }
            }
        }
        impl<'a, T: Copy> Drop for DropChecker<'a, T> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }
        let dropped = RefCell::new(Vec::<i32>::new());
        let mut list = List::new();
        list.push_back(DropChecker::new(1, &dropped));
        list.push_back(DropChecker::new(2, &dropped));
        list.push_back(DropChecker::new(3, &dropped));
        let cursor = list.cursor();
        drop(list);
        // elements are dropped with the list, not with the last cursor
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
        drop(cursor);
        assert_eq!(dropped.borrow().len(), 3);
    }

    #[test]
    fn list_push_and_pop() {
        let mut list = List::new();
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);

        list.push_back(1);
        assert_eq!(list.back(), Some(1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());

        list.push_front(1);
        list.push_front(2);
        list.push_back(3);
        list_eq(&list, [2, 1, 3]);
        assert_eq!(list.back(), Some(3));
        assert_eq!(list.front(), Some(2));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));

        assert_eq!(list.front(), Some(1));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn list_insert_and_remove() {
        let mut list = List::from_iter(0..10);
        list.insert(5, 10).unwrap();
        list_eq(&list, (0..5).chain(Some(10)).chain(5..10));

        assert_eq!(list.remove(10), Ok(9));
        assert_eq!(list.back(), Some(8));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert(0, 11).unwrap();
        assert_eq!(list.front(), Some(11));
        list_eq(&list, (11..=11).chain((0..5).chain(Some(10)).chain(5..9)));

        assert_eq!(list.remove(0), Ok(11));
        assert_eq!(list.front(), Some(0));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9));

        list.insert(10, 12).unwrap();
        assert_eq!(list.back(), Some(12));
        list_eq(&list, (0..5).chain(Some(10)).chain(5..9).chain(Some(12)));
    }

    #[test]
    fn list_index_out_of_bounds() {
        let mut list = List::from_iter(0..3);
        let out_of_bounds =
            |index| -> Result<i32, ListError> { Err(ListError::IndexOutOfBounds { index, len: 3 }) };
        assert_eq!(list.get(3), out_of_bounds(3));
        assert_eq!(list.set(3, 0), out_of_bounds(3));
        assert_eq!(list.remove(3), out_of_bounds(3));
        assert_eq!(list.insert(4, 0), out_of_bounds(4).map(drop));
        assert!(list.cursor_at(4).is_err());
        assert!(list.cursor_at(3).is_ok());
        assert_eq!(list.modifications(), 3);
        list_eq(&list, 0..3);
    }

    #[test]
    fn list_get_and_set() {
        let mut list = List::from_iter(0..7);
        for i in 0..7 {
            assert_eq!(list.get(i), Ok(i));
        }
        let modifications = list.modifications();
        for i in 0..7 {
            assert_eq!(list.set(i, i * 2), Ok(i));
        }
        assert_eq!(list.modifications(), modifications);
        list_eq(&list, (0..7).map(|i| i * 2));
    }

    #[test]
    fn list_cursor_at_seeks_from_nearer_end() {
        let list = List::from_iter(0..10);
        for at in 0..=10 {
            let mut cursor = list.cursor_at(at).unwrap();
            assert_eq!(cursor.next_index(), Ok(at));
            assert_eq!(cursor.previous_index(), Ok(at.checked_sub(1)));
            // seeking leaves nothing to remove
            assert_eq!(cursor.remove(), Err(ListError::InvalidCursorState));
            if at < 10 {
                assert_eq!(cursor.next(), Ok(at));
            } else {
                assert_eq!(cursor.next(), Err(ListError::NoSuchElement));
            }
        }
    }

    #[test]
    fn list_modifications_count_structural_changes() {
        let mut list = List::new();
        list.push_back(1);
        list.push_front(0);
        list.insert(2, 2).unwrap();
        assert_eq!(list.modifications(), 3);
        list.set(1, 10).unwrap();
        let _ = list.get(1);
        let _ = list.iter().count();
        assert_eq!(list.modifications(), 3);
        list.remove(0).unwrap();
        list.pop_back();
        assert_eq!(list.modifications(), 5);
        list.clear();
        assert_eq!(list.modifications(), 6);
        list.clear();
        assert_eq!(list.modifications(), 6);
    }

    #[test]
    fn list_modifications_wrap_around() {
        let list = List::from_iter([1, 2]);
        list.chain.borrow_mut().modifications = usize::MAX;
        let mut a = list.cursor();
        let b = list.cursor();
        a.next().unwrap();
        a.remove().unwrap();
        assert_eq!(list.modifications(), 0);
        assert_eq!(a.has_next(), Ok(true));
        assert_eq!(b.has_next(), Err(ListError::ConcurrentModification));
    }

    #[test]
    fn list_clone_and_eq() {
        let list = List::from_iter(["a", "b", "c"]);
        let cloned = list.clone();
        assert_eq!(list, cloned);
        // the clone does not share the chain with the original
        let cursor = list.cursor();
        let mut cloned = cloned;
        cloned.push_back("d");
        assert_ne!(list, cloned);
        assert_eq!(cursor.has_next(), Ok(true));
        assert_ne!(list, List::from_iter(["a", "b"]));
        assert_eq!(List::<i32>::new(), List::default());
    }

    #[test]
    fn list_debug() {
        let list = List::from_iter([1, 2, 3]);
        assert_eq!(format!("{:?}", list), "[1, 2, 3]");
        assert_eq!(format!("{:?}", List::<i32>::new()), "[]");
    }

    #[test]
    fn list_randomized_single_cursor() {
        #[derive(Debug)]
        enum Op {
            Next,
            Previous,
            Remove,
            Set(u32),
            Add(u32),
        }

        let mut rng = StdRng::seed_from_u64(0x5eed_1157);
        for _ in 0..50 {
            let list = List::from_iter(0..rng.random_range(0..8u32));
            let mut model = Vec::from_iter(0..list.len() as u32);
            let mut cursor = list.cursor_at(rng.random_range(0..=model.len())).unwrap();
            let mut index = cursor.next_index().unwrap();
            let mut last: Option<usize> = None;

            for _ in 0..200 {
                let op = match rng.random_range(0..5) {
                    0 => Op::Next,
                    1 => Op::Previous,
                    2 => Op::Remove,
                    3 => Op::Set(rng.random_range(100..200)),
                    _ => Op::Add(rng.random_range(100..200)),
                };
                match op {
                    Op::Next => {
                        if index < model.len() {
                            assert_eq!(cursor.next(), Ok(model[index]));
                            last = Some(index);
                            index += 1;
                        } else {
                            assert_eq!(cursor.next(), Err(ListError::NoSuchElement));
                        }
                    }
                    Op::Previous => {
                        if index > 0 {
                            index -= 1;
                            last = Some(index);
                            assert_eq!(cursor.previous(), Ok(model[index]));
                        } else {
                            assert_eq!(cursor.previous(), Err(ListError::NoSuchElement));
                        }
                    }
                    Op::Remove => match last.take() {
                        Some(at) => {
                            assert_eq!(cursor.remove(), Ok(model.remove(at)));
                            if at < index {
                                index -= 1;
                            }
                        }
                        None => assert_eq!(cursor.remove(), Err(ListError::InvalidCursorState)),
                    },
                    Op::Set(value) => match last.take() {
                        Some(at) => {
                            let old = std::mem::replace(&mut model[at], value);
                            assert_eq!(cursor.set(value), Ok(old));
                        }
                        None => assert_eq!(cursor.set(value), Err(ListError::InvalidCursorState)),
                    },
                    Op::Add(value) => {
                        assert_eq!(cursor.add(value), Ok(()));
                        model.insert(index, value);
                        index += 1;
                        last = None;
                    }
                }
                assert_eq!(cursor.next_index(), Ok(index), "after {:?}", op);
                assert_eq!(cursor.has_next(), Ok(index < model.len()));
                assert_eq!(cursor.has_previous(), Ok(index > 0));
                assert_eq!(list.len(), model.len());
            }
            list_eq(&list, model);
        }
    }
}
