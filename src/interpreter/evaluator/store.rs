use std::collections::HashMap;

use crate::interpreter::value::core::Value;

/// A named value held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The name the variable was assigned under.
    pub name:  String,
    /// Its current value.
    pub value: Value,
}

/// Stores the variables of one evaluation run.
///
/// The store starts empty and only grows: the first assignment to a name
/// inserts it, later assignments update the existing entry in place, and
/// nothing is ever removed. Dropping the store ends the run's state.
///
/// ## Example
/// ```
/// use xlang::interpreter::{evaluator::store::VariableStore, value::core::Value};
///
/// let mut store = VariableStore::new();
///
/// assert!(store.assign("x", Value::Integer(1)));
/// assert!(!store.assign("x", Value::Real(2.5)));
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.get("x"), Some(Value::Real(2.5)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    variables: HashMap<String, Variable>,
}

impl VariableStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current value of `name`, if it was ever assigned.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.variables.get(name).map(|variable| variable.value)
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    /// Binds `name` to `value`.
    ///
    /// # Returns
    /// `true` if the variable was created, `false` if an existing one was
    /// updated.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(variable) = self.variables.get_mut(name) {
            variable.value = value;
            return false;
        }

        self.variables.insert(name.to_string(),
                              Variable { name: name.to_string(),
                                         value });
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
