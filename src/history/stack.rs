use std::collections::VecDeque;

/// Ordered container the history keeps its entries in.
///
/// The top of the stack is the most recently pushed item. `get` and
/// `pop_bottom` address the other end so a bounded history can evict
/// its oldest entry.
pub trait Stack<T> {
    fn push(&mut self, item: T);
    fn pop(&mut self) -> Option<T>;
    fn peek(&self) -> Option<&T>;
    fn peek_mut(&mut self) -> Option<&mut T>;
    fn len(&self) -> usize;
    fn clear(&mut self);

    /// Item at `idx`, counted from the bottom (0 = oldest)
    fn get(&self, idx: usize) -> Option<&T>;

    /// Remove the oldest item
    fn pop_bottom(&mut self) -> Option<T>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Default stack, backed by a ring buffer so eviction from the bottom is cheap
#[derive(Debug, Clone)]
pub struct DequeStack<T> {
    items: VecDeque<T>,
}

impl<T> DequeStack<T> {
    pub fn new() -> Self {
        Self { items: VecDeque::new() }
    }
}

impl<T> Default for DequeStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Stack<T> for DequeStack<T> {
    fn push(&mut self, item: T) {
        self.items.push_back(item);
    }

    fn pop(&mut self) -> Option<T> {
        self.items.pop_back()
    }

    fn peek(&self) -> Option<&T> {
        self.items.back()
    }

    fn peek_mut(&mut self) -> Option<&mut T> {
        self.items.back_mut()
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    fn pop_bottom(&mut self) -> Option<T> {
        self.items.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_is_lifo() {
        let mut stack = DequeStack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);

        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_empty_peek_and_pop() {
        let mut stack: DequeStack<u8> = DequeStack::default();
        assert!(stack.is_empty());
        assert_eq!(stack.peek(), None);
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.pop_bottom(), None);
    }

    #[test]
    fn test_get_counts_from_bottom() {
        let mut stack = DequeStack::new();
        stack.push("a");
        stack.push("b");

        assert_eq!(stack.get(0), Some(&"a"));
        assert_eq!(stack.get(1), Some(&"b"));
        assert_eq!(stack.get(2), None);
        assert_eq!(stack.peek(), Some(&"b"));
    }

    #[test]
    fn test_pop_bottom_evicts_oldest() {
        let mut stack = DequeStack::new();
        stack.push(1);
        stack.push(2);

        assert_eq!(stack.pop_bottom(), Some(1));
        assert_eq!(stack.len(), 1);
        assert_eq!(stack.peek(), Some(&2));
    }

    #[test]
    fn test_peek_mut_and_clear() {
        let mut stack = DequeStack::new();
        stack.push(String::from("x"));
        if let Some(top) = stack.peek_mut() {
            top.push('y');
        }
        assert_eq!(stack.peek().map(String::as_str), Some("xy"));

        stack.clear();
        assert!(stack.is_empty());
    }
}
