use std::borrow::Borrow;
use std::rc::Rc;

struct InnerFrame<K, V> {
    name: K,
    value: V,
    parent: Frame<K, V>,
}

/// An immutable chain of bindings. Binding a name returns a new frame that
/// shadows the parent's binding of that name; the parent is left as is and
/// stays shared.
pub struct Frame<K, V>(Option<Rc<InnerFrame<K, V>>>);

impl<K, V> Frame<K, V> {
    pub fn new() -> Self {
        Self(None)
    }

    pub fn bind(&self, name: K, value: V) -> Self {
        Self(Some(Rc::new(InnerFrame {
            name,
            value,
            parent: self.clone(),
        })))
    }

    pub fn lookup<Q>(&self, name: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let mut frame = self.0.as_deref();
        while let Some(inner) = frame {
            let bound: &Q = inner.name.borrow();
            if bound == name {
                return Some(&inner.value);
            }
            frame = inner.parent.0.as_deref();
        }
        None
    }
}

impl<K, V> Default for Frame<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Frame<K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
