//! The operation domain model.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Alias for the integer type used for operation IDs.
pub type OperationId = i64;

/// The name of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct OperationName(String);

impl OperationName {
    /// Create an operation name.
    ///
    /// Leading and trailing whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyOperationName] if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyOperationName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create an operation name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    ///
    /// This function has `_unchecked` in the name but is not `unsafe`, because if the non-empty
    /// invariant is violated it will cause incorrect behaviour but not affect memory safety.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for OperationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for OperationName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperationName::new(s)
    }
}

impl Display for OperationName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An income or expense type, e.g., 'Salary' (income) or 'Shopping'
/// (expense). Categories group transactions under an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct Operation {
    /// The ID of the operation.
    pub id: OperationId,

    /// The name of the operation.
    pub name: OperationName,

    /// Whether the operation represents money coming in or going out.
    pub is_income: bool,
}
