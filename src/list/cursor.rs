use crate::list::node::{NodeIndex, GHOST};
use crate::list::Chain;
use crate::ListError;
use std::cell::RefCell;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;

/// A fail-fast cursor over a `List`.
///
/// A `Cursor` sits in a *gap* between two elements. In a list with length
/// *n*, there are *n* + 1 gaps, indexed by 0, 1, ..., *n*: gap *i* lies
/// right before the element at index *i* (gap *n* is before the ghost node).
/// The cursor can step over the element on either side of its gap, and can
/// insert at the gap or edit the element it stepped over last.
///
/// Cursors share the list's internals, so any number of them can be used
/// over the same list, interleaved. A cursor resynchronizes after its own
/// structural changes; a structural change made through any other cursor, or
/// through the list itself, makes every other cursor fail with
/// [`ListError::ConcurrentModification`] on its next operation. Replacing an
/// element with [`set`] is not a structural change.
///
/// # Examples
///
/// Here is a simple example showing how a cursor moves and edits. (The gap
/// of the cursor is denoted by `|`).
/// ```
/// use sentinel_list::{List, ListError};
/// use std::iter::FromIterator;
///
/// // Create a list: [ A B C ]
/// let list = List::from_iter(['A', 'B', 'C']);
///
/// // [|A B C ]
/// let mut cursor = list.cursor();
/// assert_eq!(cursor.previous(), Err(ListError::NoSuchElement));
///
/// // [ A|B C ]
/// assert_eq!(cursor.next(), Ok('A'));
/// assert_eq!(cursor.next_index(), Ok(1));
///
/// // Insert at the gap: [ A X|B C ]
/// cursor.add('X').unwrap();
/// assert_eq!(cursor.next(), Ok('B'));
///
/// // Remove the element stepped over last: [ A X|C ]
/// assert_eq!(cursor.remove(), Ok('B'));
/// assert_eq!(cursor.remove(), Err(ListError::InvalidCursorState));
///
/// assert_eq!(Vec::from_iter(list), vec!['A', 'X', 'C']);
/// ```
///
/// [`set`]: Cursor::set
pub struct Cursor<T> {
    chain: Rc<RefCell<Chain<T>>>,
    /// index of the element a forward step would return
    index: usize,
    prev: NodeIndex,
    next: NodeIndex,
    /// the node stepped over last, target of `remove` and `set`
    last: Option<NodeIndex>,
    expected_modifications: usize,
}

// Private methods
impl<T> Cursor<T> {
    /// Create a cursor at gap 0, before the first element.
    pub(crate) fn start(chain: Rc<RefCell<Chain<T>>>) -> Self {
        let (next, expected_modifications) = {
            let chain = chain.borrow();
            (chain.nodes.next_of(GHOST), chain.modifications)
        };
        Self {
            chain,
            index: 0,
            prev: GHOST,
            next,
            last: None,
            expected_modifications,
        }
    }

    /// Create a cursor at gap *n*, after the last element.
    pub(crate) fn end(chain: Rc<RefCell<Chain<T>>>) -> Self {
        let (prev, index, expected_modifications) = {
            let chain = chain.borrow();
            (chain.nodes.prev_of(GHOST), chain.len, chain.modifications)
        };
        Self {
            chain,
            index,
            prev,
            next: GHOST,
            last: None,
            expected_modifications,
        }
    }

    fn check(&self, chain: &Chain<T>) -> Result<(), ListError> {
        if chain.modifications != self.expected_modifications {
            log::debug!(
                "stale cursor at index {}: expected modification {}, found {}",
                self.index,
                self.expected_modifications,
                chain.modifications
            );
            return Err(ListError::ConcurrentModification);
        }
        Ok(())
    }

    /// Step over the next element and return its node.
    pub(crate) fn step_forward(&mut self) -> Result<NodeIndex, ListError> {
        let chain = self.chain.borrow();
        self.check(&chain)?;
        if self.index >= chain.len {
            return Err(ListError::NoSuchElement);
        }
        let node = self.next;
        self.last = Some(node);
        self.prev = node;
        self.next = chain.nodes.next_of(node);
        self.index += 1;
        Ok(node)
    }

    /// Step over the previous element and return its node, which is the
    /// new `next` of the cursor.
    pub(crate) fn step_backward(&mut self) -> Result<NodeIndex, ListError> {
        let chain = self.chain.borrow();
        self.check(&chain)?;
        if self.index == 0 {
            return Err(ListError::NoSuchElement);
        }
        self.last = Some(self.prev);
        self.next = self.prev;
        self.prev = chain.nodes.prev_of(self.prev);
        self.index -= 1;
        Ok(self.next)
    }

    /// Move forward by `steps` elements, leaving nothing to `remove` or `set`.
    pub(crate) fn seek_forward(&mut self, steps: usize) -> Result<(), ListError> {
        (0..steps).try_for_each(|_| self.step_forward().map(drop))?;
        self.last = None;
        Ok(())
    }

    /// Move backward by `steps` elements, leaving nothing to `remove` or `set`.
    pub(crate) fn seek_backward(&mut self, steps: usize) -> Result<(), ListError> {
        (0..steps).try_for_each(|_| self.step_backward().map(drop))?;
        self.last = None;
        Ok(())
    }
}

impl<T> Cursor<T> {
    /// Returns `true` if there is an element after the cursor.
    pub fn has_next(&self) -> Result<bool, ListError> {
        let chain = self.chain.borrow();
        self.check(&chain)?;
        Ok(self.index < chain.len)
    }

    /// Returns `true` if there is an element before the cursor.
    pub fn has_previous(&self) -> Result<bool, ListError> {
        let chain = self.chain.borrow();
        self.check(&chain)?;
        Ok(self.index > 0)
    }

    /// Return the index of the element a call to [`Cursor::next`] would
    /// return, which is the list length at the end of the list.
    pub fn next_index(&self) -> Result<usize, ListError> {
        let chain = self.chain.borrow();
        self.check(&chain)?;
        Ok(self.index)
    }

    /// Return the index of the element a call to [`Cursor::previous`] would
    /// return, or `None` at the start of the list.
    pub fn previous_index(&self) -> Result<Option<usize>, ListError> {
        let chain = self.chain.borrow();
        self.check(&chain)?;
        Ok(self.index.checked_sub(1))
    }

    /// Remove the element returned by the last call to [`Cursor::next`] or
    /// [`Cursor::previous`], and return it.
    ///
    /// Fails with [`ListError::InvalidCursorState`] if neither was called,
    /// or if [`Cursor::add`], [`Cursor::remove`] or [`Cursor::set`] was
    /// called after it.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    ///
    /// assert_eq!(cursor.previous(), Ok(3));
    /// assert_eq!(cursor.previous(), Ok(2));
    /// assert_eq!(cursor.remove(), Ok(2));
    /// assert_eq!(cursor.next_index(), Ok(1));
    /// assert_eq!(cursor.next(), Ok(3));
    ///
    /// assert_eq!(Vec::from_iter(list), vec![1, 3]);
    /// ```
    pub fn remove(&mut self) -> Result<T, ListError> {
        let mut chain = self.chain.borrow_mut();
        self.check(&chain)?;
        let last = self.last.take().ok_or(ListError::InvalidCursorState)?;
        if self.next == last {
            self.next = chain.nodes.next_of(last);
        }
        if self.prev == last {
            self.prev = chain.nodes.prev_of(last);
            self.index -= 1;
        }
        let element = chain.nodes.unlink(last);
        chain.len -= 1;
        self.expected_modifications = chain.bump();
        Ok(element)
    }

    /// Replace the element returned by the last call to [`Cursor::next`] or
    /// [`Cursor::previous`], and return the old one.
    ///
    /// Replacing is not a structural change: other cursors stay valid. It
    /// does consume the target, so a second `set` (or a `remove`) needs
    /// another step first.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor();
    /// let other = list.cursor();
    ///
    /// assert_eq!(cursor.next(), Ok(1));
    /// assert_eq!(cursor.set(10), Ok(1));
    /// assert_eq!(cursor.set(20), Err(ListError::InvalidCursorState));
    ///
    /// assert!(other.has_next().is_ok());
    /// assert_eq!(Vec::from_iter(list), vec![10, 2, 3]);
    /// ```
    pub fn set(&mut self, element: T) -> Result<T, ListError> {
        let mut chain = self.chain.borrow_mut();
        self.check(&chain)?;
        let last = self.last.take().ok_or(ListError::InvalidCursorState)?;
        Ok(std::mem::replace(chain.nodes.element_mut(last), element))
    }

    /// Insert an element at the gap of the cursor.
    ///
    /// The new element ends up before the cursor, so a following
    /// [`Cursor::next`] is unaffected and a following [`Cursor::previous`]
    /// returns the new element.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::new();
    /// let mut cursor = list.cursor();
    /// cursor.add('x').unwrap();
    /// cursor.add('y').unwrap();
    /// assert_eq!(cursor.next_index(), Ok(2));
    ///
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(Vec::from_iter(list), vec!['x', 'y']);
    /// ```
    pub fn add(&mut self, element: T) -> Result<(), ListError> {
        let mut chain = self.chain.borrow_mut();
        self.check(&chain)?;
        self.prev = chain.nodes.insert_after(self.prev, element);
        self.last = None;
        chain.len += 1;
        self.expected_modifications = chain.bump();
        self.index += 1;
        Ok(())
    }
}

impl<T: Clone> Cursor<T> {
    /// Step over the next element and return a clone of it, or fail with
    /// [`ListError::NoSuchElement`] at the end of the list.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use sentinel_list::{List, ListError};
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor();
    /// assert_eq!(cursor.next(), Ok(1));
    /// assert_eq!(cursor.next(), Ok(2));
    /// assert_eq!(cursor.next(), Err(ListError::NoSuchElement));
    /// ```
    pub fn next(&mut self) -> Result<T, ListError> {
        let node = self.step_forward()?;
        let chain = self.chain.borrow();
        Ok(chain.nodes.element(node).clone())
    }

    /// Step over the previous element and return a clone of it, or fail
    /// with [`ListError::NoSuchElement`] at the start of the list.
    ///
    /// This operation should compute in *O*(1) time.
    pub fn previous(&mut self) -> Result<T, ListError> {
        let node = self.step_backward()?;
        let chain = self.chain.borrow();
        Ok(chain.nodes.element(node).clone())
    }
}

impl<T> fmt::Debug for Cursor<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("last", &self.last)
            .field("expected_modifications", &self.expected_modifications)
            .finish()
    }
}
