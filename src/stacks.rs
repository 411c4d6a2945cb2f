//! The named stack store: per-parse mutable scratch state actions use to
//! accumulate results.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The distinguished stack backing the store's top-level operations.
pub const MAIN_STACK: &str = "main";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StackError {
    #[error("stack '{0}' is empty")]
    Empty(String),

    #[error("stack '{name}' holds a value that is not a {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}

fn mismatch<T>(name: &str) -> StackError {
    StackError::TypeMismatch {
        name: name.to_string(),
        expected: std::any::type_name::<T>(),
    }
}

/// A collection of named, heterogeneous LIFO stacks.
///
/// A fresh store is created for every parse call and returned as its
/// result. Values are stored untyped; callers state the expected type at
/// the point of use and get a [`StackError::TypeMismatch`] if the stack
/// disagrees. The unnamed operations work on the [`MAIN_STACK`].
#[derive(Default)]
pub struct Stacks {
    stacks: HashMap<String, Vec<Box<dyn Any + Send>>>,
}

impl Stacks {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Named-stack operations ---

    pub fn push_to<T: Any + Send>(&mut self, name: impl Into<String>, value: T) {
        self.stacks
            .entry(name.into())
            .or_default()
            .push(Box::new(value));
    }

    /// Borrows the top of a stack; empty stacks are an error.
    pub fn peek_from<T: Any>(&self, name: &str) -> Result<&T, StackError> {
        self.try_peek_from(name)?
            .ok_or_else(|| StackError::Empty(name.to_string()))
    }

    /// Borrows the top of a stack, or `None` when the stack is empty.
    pub fn try_peek_from<T: Any>(&self, name: &str) -> Result<Option<&T>, StackError> {
        match self.stacks.get(name).and_then(|stack| stack.last()) {
            None => Ok(None),
            Some(value) => value
                .downcast_ref::<T>()
                .map(Some)
                .ok_or_else(|| mismatch::<T>(name)),
        }
    }

    /// Removes and returns the top of a stack; empty stacks are an error.
    pub fn pop_from<T: Any>(&mut self, name: &str) -> Result<T, StackError> {
        self.try_pop_from(name)?
            .ok_or_else(|| StackError::Empty(name.to_string()))
    }

    /// Removes and returns the top of a stack, or `None` when empty. The
    /// type is checked before anything is removed, so a mismatch leaves
    /// the stack untouched.
    pub fn try_pop_from<T: Any>(&mut self, name: &str) -> Result<Option<T>, StackError> {
        let Some(stack) = self.stacks.get_mut(name) else {
            return Ok(None);
        };
        match stack.last() {
            None => Ok(None),
            Some(top) if top.is::<T>() => Ok(stack
                .pop()
                .and_then(|boxed| boxed.downcast::<T>().ok())
                .map(|boxed| *boxed)),
            Some(_) => Err(mismatch::<T>(name)),
        }
    }

    /// Drains a whole stack, oldest value first. All elements are
    /// type-checked before any is removed.
    pub fn pop_list_from<T: Any>(&mut self, name: &str) -> Result<Vec<T>, StackError> {
        if let Some(stack) = self.stacks.get(name)
            && stack.iter().any(|value| !value.is::<T>())
        {
            return Err(mismatch::<T>(name));
        }
        let drained = self
            .stacks
            .get_mut(name)
            .map(std::mem::take)
            .unwrap_or_default();
        Ok(drained
            .into_iter()
            .filter_map(|boxed| boxed.downcast::<T>().ok())
            .map(|boxed| *boxed)
            .collect())
    }

    /// Borrows a whole stack, oldest value first, without removing
    /// anything.
    pub fn peek_list_from<T: Any>(&self, name: &str) -> Result<Vec<&T>, StackError> {
        self.stacks
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(|value| value.downcast_ref::<T>().ok_or_else(|| mismatch::<T>(name)))
            .collect()
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.stacks.get(name).is_none_or(Vec::is_empty)
    }

    pub fn len(&self, name: &str) -> usize {
        self.stacks.get(name).map(Vec::len).unwrap_or(0)
    }

    pub fn stack_names(&self) -> impl Iterator<Item = &str> {
        self.stacks.keys().map(String::as_str)
    }

    // --- Default-stack shorthands ---

    pub fn push<T: Any + Send>(&mut self, value: T) {
        self.push_to(MAIN_STACK, value);
    }

    pub fn peek<T: Any>(&self) -> Result<&T, StackError> {
        self.peek_from(MAIN_STACK)
    }

    pub fn try_peek<T: Any>(&self) -> Result<Option<&T>, StackError> {
        self.try_peek_from(MAIN_STACK)
    }

    pub fn pop<T: Any>(&mut self) -> Result<T, StackError> {
        self.pop_from(MAIN_STACK)
    }

    pub fn try_pop<T: Any>(&mut self) -> Result<Option<T>, StackError> {
        self.try_pop_from(MAIN_STACK)
    }

    pub fn pop_list<T: Any>(&mut self) -> Result<Vec<T>, StackError> {
        self.pop_list_from(MAIN_STACK)
    }

    pub fn peek_list<T: Any>(&self) -> Result<Vec<&T>, StackError> {
        self.peek_list_from(MAIN_STACK)
    }
}

impl fmt::Debug for Stacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (name, stack) in &self.stacks {
            map.entry(name, &stack.len());
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_peek_pop() {
        let mut stacks = Stacks::new();
        stacks.push_to("numbers", 1_i64);
        stacks.push_to("numbers", 2_i64);

        assert_eq!(stacks.peek_from::<i64>("numbers").unwrap(), &2);
        assert_eq!(stacks.pop_from::<i64>("numbers").unwrap(), 2);
        assert_eq!(stacks.pop_from::<i64>("numbers").unwrap(), 1);
        assert!(matches!(
            stacks.pop_from::<i64>("numbers"),
            Err(StackError::Empty(_))
        ));
    }

    #[test]
    fn test_default_stack_is_main() {
        let mut stacks = Stacks::new();
        stacks.push("hello".to_string());
        assert_eq!(stacks.len(MAIN_STACK), 1);
        assert_eq!(stacks.pop::<String>().unwrap(), "hello");
    }

    #[test]
    fn test_try_variants_on_empty() {
        let mut stacks = Stacks::new();
        assert_eq!(stacks.try_peek_from::<i64>("missing").unwrap(), None);
        assert_eq!(stacks.try_pop_from::<i64>("missing").unwrap(), None);
    }

    #[test]
    fn test_type_mismatch_does_not_remove() {
        let mut stacks = Stacks::new();
        stacks.push_to("mixed", "text".to_string());

        assert!(matches!(
            stacks.try_pop_from::<i64>("mixed"),
            Err(StackError::TypeMismatch { .. })
        ));
        assert_eq!(stacks.len("mixed"), 1);
        assert_eq!(stacks.pop_from::<String>("mixed").unwrap(), "text");
    }

    #[test]
    fn test_pop_list_is_oldest_first_and_atomic() {
        let mut stacks = Stacks::new();
        stacks.push_to("args", 0.3_f64);
        stacks.push_to("args", 0.2_f64);

        let values = stacks.pop_list_from::<f64>("args").unwrap();
        assert_eq!(values, vec![0.3, 0.2]);
        assert!(stacks.is_empty("args"));

        stacks.push_to("args", 1.0_f64);
        stacks.push_to("args", "oops".to_string());
        assert!(stacks.pop_list_from::<f64>("args").is_err());
        assert_eq!(stacks.len("args"), 2);
    }

    #[test]
    fn test_peek_list_keeps_values() {
        let mut stacks = Stacks::new();
        stacks.push_to("names", "a".to_string());
        stacks.push_to("names", "b".to_string());

        let snapshot = stacks.peek_list_from::<String>("names").unwrap();
        assert_eq!(snapshot, vec!["a", "b"]);
        assert_eq!(stacks.len("names"), 2);
    }

    #[test]
    fn test_heterogeneous_values_on_one_stack() {
        let mut stacks = Stacks::new();
        stacks.push_to("record", 34_i64);
        stacks.push_to("record", "Name".to_string());

        assert_eq!(stacks.pop_from::<String>("record").unwrap(), "Name");
        assert_eq!(stacks.pop_from::<i64>("record").unwrap(), 34);
    }
}
