use std::collections::BTreeMap;

use crate::foundation::error::{ReferenceKind, SlideError, SlideResult};
use crate::foundation::value::Value;
use crate::project::model::{Project, SetOperation};

/// Current value of every project variable for one playback session.
///
/// Seeded from each [`crate::Variable`]'s initial value. Integers are kept in their
/// narrowest representation, matching how the codec decodes them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableStore {
    values: BTreeMap<String, Option<Value>>,
}

impl VariableStore {
    /// Seed a store from the project's declared variables.
    pub fn seed(project: &Project) -> Self {
        let values = project
            .variables
            .iter()
            .map(|v| (v.id.clone(), v.value.clone().map(Value::normalized)))
            .collect();
        Self { values }
    }

    /// `true` if the variable is declared (with or without a value).
    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Current value; `None` for undeclared variables and variables without a value.
    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id).and_then(Option::as_ref)
    }

    /// Overwrite a declared variable and return its previous value.
    pub fn set(&mut self, id: &str, value: Value) -> SlideResult<Option<Value>> {
        let slot = self
            .values
            .get_mut(id)
            .ok_or_else(|| SlideError::dangling(ReferenceKind::Variable, id))?;
        Ok(std::mem::replace(slot, Some(value.normalized())))
    }

    /// Iterate `(id, value)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

/// Compute the result of applying `op` to a variable's current value.
///
/// Errors carry a short, human-readable reason and leave the variable untouched.
pub(crate) fn apply_operation(
    current: Option<&Value>,
    op: SetOperation,
    operand: Option<&Value>,
) -> Result<Value, String> {
    match op {
        SetOperation::Assign => operand
            .cloned()
            .ok_or_else(|| "assign requires a value".to_owned()),
        SetOperation::Add | SetOperation::Subtract => {
            let operand = operand.ok_or_else(|| format!("{op:?} requires a value"))?;
            let current = current.ok_or_else(|| "variable has no value".to_owned())?;
            let result = match op {
                SetOperation::Add => current.checked_add(operand),
                _ => current.checked_sub(operand),
            };
            result.ok_or_else(|| {
                format!(
                    "cannot apply {op:?} to {} and {}",
                    current.type_name(),
                    operand.type_name()
                )
            })
        }
        SetOperation::Toggle => match current {
            Some(Value::Bool(b)) => Ok(Value::Bool(!b)),
            Some(other) => Err(format!("cannot toggle a {} value", other.type_name())),
            None => Err("variable has no value".to_owned()),
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/variables.rs"]
mod tests;
