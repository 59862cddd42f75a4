use std::fmt::{self, Debug, Formatter};
use std::rc::Rc;

/// An immutable cursor over a shared input sequence.
///
/// Advancing produces a new `Stream`; the old one stays valid, so a parser
/// backtracks by simply holding on to an earlier value. Cloning is an `Rc`
/// bump.
pub struct Stream<C> {
    items: Rc<[C]>,
    pos: usize,
}

impl<C> Stream<C> {
    pub fn new(items: impl Into<Rc<[C]>>) -> Self {
        Stream {
            items: items.into(),
            pos: 0,
        }
    }

    /// Number of elements consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos >= self.items.len()
    }

    pub fn remaining(&self) -> &[C] {
        &self.items[self.pos.min(self.items.len())..]
    }

    pub fn peek(&self) -> Option<&C> {
        self.items.get(self.pos)
    }
}

impl<C: Clone> Stream<C> {
    pub fn next(&self) -> Option<(C, Stream<C>)> {
        let item = self.items.get(self.pos)?.clone();
        Some((
            item,
            Stream {
                items: self.items.clone(),
                pos: self.pos + 1,
            },
        ))
    }
}

impl<C> Clone for Stream<C> {
    fn clone(&self) -> Self {
        Stream {
            items: self.items.clone(),
            pos: self.pos,
        }
    }
}

impl<C: Debug> Debug for Stream<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("pos", &self.pos)
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl<C> FromIterator<C> for Stream<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Stream::new(iter.into_iter().collect::<Vec<_>>())
    }
}

impl From<&str> for Stream<char> {
    fn from(source: &str) -> Self {
        source.chars().collect()
    }
}
