
/*!
# Persistent list
A singly-linked, structurally shared list.
Cloning is O(1) and pushing never disturbs other clones, which is what lets replay paths branch cheaply.
*/

use std::sync::Arc;

struct Node<T> {
    value: T,
    previous: Option<Arc<Node<T>>>
}

/// Append-only persistent list; the most recent push is the head.
pub struct ChainList<T> {
    head: Option<Arc<Node<T>>>,
    length: usize
}

impl<T> ChainList<T> {
    /// Creates an empty list
    pub fn new() -> Self {
        Self {
            head: None,
            length: 0
        }
    }

    /// Appends a value; existing clones are unaffected
    pub fn push(&mut self, value: T) {
        let previous = self.head.take();
        self.head = Some(Arc::new(Node { value, previous }));
        self.length += 1;
    }

    /// The most recently pushed value
    pub fn last(&self) -> Option<&T> {
        self.head.as_ref().map(|node| &node.value)
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Iterates from the most recent push back to the first
    pub fn iter(&self) -> ChainIter<'_, T> {
        ChainIter {
            next: self.head.as_deref()
        }
    }
}

impl<T: Clone> ChainList<T> {
    /// Copies the values out in push order
    pub fn to_vec(&self) -> Vec<T> {
        let mut values: Vec<T> = self.iter().cloned().collect();
        values.reverse();
        values
    }
}

impl<T> Clone for ChainList<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            length: self.length
        }
    }
}

impl<T> Default for ChainList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ChainList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Drop for ChainList<T> {
    // unlinks iteratively so long chains cannot overflow the stack
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(node) = current {
            match Arc::try_unwrap(node) {
                Ok(mut node) => current = node.previous.take(),
                Err(_) => break
            }
        }
    }
}

pub struct ChainIter<'a, T> {
    next: Option<&'a Node<T>>
}

impl<'a, T> Iterator for ChainIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.previous.as_deref();
            &node.value
        })
    }
}
