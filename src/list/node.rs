use slab::Slab;

/// Index of a node in the node arena.
pub(crate) type NodeIndex = usize;

/// The ghost node is the first slot allocated in every arena and is never freed.
pub(crate) const GHOST: NodeIndex = 0;

pub(crate) struct Node<T> {
    pub(crate) next: NodeIndex,
    pub(crate) prev: NodeIndex,
    /// `None` only for the ghost node.
    pub(crate) element: Option<T>,
}

/// The arena holding the ghost node and every element node of a list.
///
/// Nodes refer to their neighbours by index, so the cyclic `next`/`prev`
/// structure owns nothing: the arena does. Slots freed by [`Nodes::unlink`]
/// are recycled by later insertions.
pub(crate) struct Nodes<T> {
    slab: Slab<Node<T>>,
}

impl<T> Nodes<T> {
    /// Create an arena containing only the ghost node, linked to itself.
    pub(crate) fn new() -> Self {
        let mut slab = Slab::new();
        let ghost = slab.insert(Node {
            next: GHOST,
            prev: GHOST,
            element: None,
        });
        debug_assert_eq!(ghost, GHOST);
        Self { slab }
    }

    pub(crate) fn next_of(&self, at: NodeIndex) -> NodeIndex {
        self.slab[at].next
    }

    pub(crate) fn prev_of(&self, at: NodeIndex) -> NodeIndex {
        self.slab[at].prev
    }

    pub(crate) fn element(&self, at: NodeIndex) -> &T {
        self.slab[at]
            .element
            .as_ref()
            .expect("the ghost node carries no element")
    }

    pub(crate) fn element_mut(&mut self, at: NodeIndex) -> &mut T {
        self.slab[at]
            .element
            .as_mut()
            .expect("the ghost node carries no element")
    }

    fn connect(&mut self, prev: NodeIndex, next: NodeIndex) {
        self.slab[prev].next = next;
        self.slab[next].prev = prev;
    }

    /// Allocate a node holding `element` and splice it right after `at`.
    ///
    /// Both `at.next` and the old successor's `prev` are updated, so the
    /// chain stays cyclic. Returns the index of the new node.
    pub(crate) fn insert_after(&mut self, at: NodeIndex, element: T) -> NodeIndex {
        let next = self.next_of(at);
        #[cfg(debug_assertions)]
        self.assert_adjacent(at, next);
        let node = self.slab.insert(Node {
            next,
            prev: at,
            element: Some(element),
        });
        self.connect(at, node);
        self.connect(node, next);
        log::trace!("linked node {} between {} and {}", node, at, next);
        #[cfg(debug_assertions)]
        {
            self.assert_adjacent(at, node);
            self.assert_adjacent(node, next);
        }
        node
    }

    /// Unlink the node `at` from its neighbours, free its slot and return
    /// its element.
    ///
    /// `at` must not be the ghost node.
    pub(crate) fn unlink(&mut self, at: NodeIndex) -> T {
        debug_assert_ne!(at, GHOST, "the ghost node is never unlinked");
        let node = self.slab.remove(at);
        self.connect(node.prev, node.next);
        log::trace!("unlinked node {} from between {} and {}", at, node.prev, node.next);
        #[cfg(debug_assertions)]
        self.assert_adjacent(node.prev, node.next);
        node.element.expect("the ghost node carries no element")
    }

    /// Iterate the elements front to back, without any fail-fast check.
    pub(crate) fn elements(&self) -> Elements<'_, T> {
        Elements {
            nodes: self,
            current: self.next_of(GHOST),
        }
    }

    #[cfg(debug_assertions)]
    fn assert_adjacent(&self, prev: NodeIndex, next: NodeIndex) {
        assert_eq!(self.slab[prev].next, next);
        assert_eq!(self.slab[next].prev, prev);
    }

    /// Check that following `next` (and `prev`) from the ghost node returns
    /// to it after exactly `len + 1` steps.
    #[cfg(test)]
    pub(crate) fn assert_cyclic(&self, len: usize) {
        for step in [Self::next_of as fn(&Self, NodeIndex) -> NodeIndex, Self::prev_of] {
            let mut current = GHOST;
            for _ in 0..len {
                current = step(self, current);
                assert_ne!(current, GHOST, "the chain is shorter than {}", len);
                assert!(self.slab.contains(current));
            }
            assert_eq!(step(self, current), GHOST, "the chain is longer than {}", len);
        }
        assert_eq!(self.slab.len(), len + 1);
    }
}

pub(crate) struct Elements<'a, T> {
    nodes: &'a Nodes<T>,
    current: NodeIndex,
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current == GHOST {
            return None;
        }
        let element = self.nodes.element(self.current);
        self.current = self.nodes.next_of(self.current);
        Some(element)
    }
}
