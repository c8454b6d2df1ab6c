//! This crate provides a doubly-linked list with a ghost node and fail-fast
//! cursors, implemented as a cyclic list.
//!
//! The [`List`] allows inserting, removing elements at a cursor in constant
//! time. In compromise, accessing or mutating elements at any position take
//! *O*(*n*) time.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use sentinel_list::{List, ListError};
//! use std::iter::FromIterator;
//!
//! let list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor();
//!
//! cursor.add(0).unwrap(); // insert 0 at the beginning of the list
//! assert_eq!(cursor.next(), Ok(1));
//!
//! assert_eq!(cursor.next(), Ok(2));
//! assert_eq!(cursor.remove(), Ok(2)); // remove the element just returned
//!
//! // another cursor, created before the last change, is now stale
//! let mut stale = list.cursor();
//! cursor.add(5).unwrap();
//! assert_eq!(stale.next(), Err(ListError::ConcurrentModification));
//!
//! assert_eq!(Vec::from_iter(list), vec![0, 1, 5, 3, 4]);
//! ```
//!
//! # Memory Layout
//!
//! The nodes of a list live in an arena and link to each other by index:
//! ```text
//!            ┌──────────────────────────────────────────────────────────┐
//!            ↓       (Ghost) slot 0        slot i            slot j     │
//!      ╔═══════════╗   ┌───────────┐   ┌───────────┐   ┌───────────┐    │
//!      ║   arena   ║ → │ next: i   │ → │ next: j   │ → │ next: 0   │ ───┘
//!      ╟───────────╢   ├───────────┤   ├───────────┤   ├───────────┤
//!      ║    len    ║   │ prev: j   │   │ prev: 0   │   │ prev: i   │
//!      ╟───────────╢   ├───────────┤   ├───────────┤   ├───────────┤
//!      ║   mods    ║   ┊No element ┊   │ element T │   │ element T │
//!      ╚═══════════╝   └╌╌╌╌╌╌╌╌╌╌╌┘   └───────────┘   └───────────┘
//!   shared by the list
//!   and its cursors
//! ```
//! The list and its cursors share:
//! - the arena of nodes, whose slot 0 is the ghost node;
//! - the length `len` of the list;
//! - the modification counter `mods`.
//!
//! Each node holds:
//! - the `next` index of the next element (or the ghost node if it is the
//!   last element in the list);
//! - the `prev` index of the previous element (or the ghost node if it is the
//!   first element in the list);
//! - the actual element `T`, except the ghost node.
//!
//! Initially, there is a ghost node in an empty list, of which the `next` and
//! `prev` indices point to itself. Neither index is ever absent, so no
//! operation has to special-case the ends of the list.
//!
//! Removing an element frees its slot, and later insertions reuse it.
//!
//! # Cursors
//!
//! A [`Cursor`] sits in a gap between two elements and moves with
//! [`next`] and [`previous`]. It can [`add`] an element at its gap, and
//! [`remove`] or [`set`] the element it stepped over last.
//!
//! # Fail-fast
//!
//! Every element added or removed bumps the modification counter. A cursor
//! remembers the counter when it is created and after each of its own
//! structural changes, and compares it with the live counter before every
//! operation. A mismatch means that the list was changed by someone else,
//! and the cursor fails with [`ListError::ConcurrentModification`] from then
//! on. Replacing an element is not a structural change.
//!
//! This detects interleaved use on a single thread. `List` and `Cursor` are
//! not `Send`.
//!
//! [`List`]: crate::List
//! [`Cursor`]: crate::Cursor
//! [`next`]: crate::Cursor::next
//! [`previous`]: crate::Cursor::previous
//! [`add`]: crate::Cursor::add
//! [`remove`]: crate::Cursor::remove
//! [`set`]: crate::Cursor::set

#[doc(inline)]
pub use error::ListError;
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{IntoIter, Iter};
#[doc(inline)]
pub use list::List;

pub mod error;
pub mod list;
