/*! Defines logical variables. */

use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};

/// Represents a logical variable, optionally tagged with the name of its domain.
///
/// **Note**: variables are compared and hashed by name only; the domain and constraints
/// are descriptive.
#[derive(Clone)]
pub struct Variable {
    name: String,
    domain: Option<String>,
    constraints: Option<Vec<String>>,
}

impl Variable {
    /// Creates an untyped variable.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            domain: None,
            constraints: None,
        }
    }

    /// Creates a variable ranging over the type named `domain`.
    pub fn typed<S: Into<String>, T: Into<String>>(name: S, domain: T) -> Self {
        Self {
            name: name.into(),
            domain: Some(domain.into()),
            constraints: None,
        }
    }

    /// Returns a copy of the receiver with the given textual constraints attached.
    pub fn with_constraints(self, constraints: Vec<String>) -> Self {
        Self {
            constraints: Some(constraints),
            ..self
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline(always)]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    #[inline(always)]
    pub fn constraints(&self) -> Option<&[String]> {
        self.constraints.as_deref()
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state)
    }
}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl<S: Into<String>> From<S> for Variable {
    fn from(name: S) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "?{}", self.name)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.domain {
            Some(domain) => write!(f, "?{}: {}", self.name, domain),
            None => write!(f, "?{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn variable_identity_is_its_name() {
        assert_eq!(Variable::new("x"), Variable::typed("x", "str"));
        assert_ne!(Variable::new("x"), Variable::new("y"));

        let set: HashSet<_> = vec![Variable::new("x"), Variable::typed("x", "int")]
            .into_iter()
            .collect();
        assert_eq!(1, set.len());
    }

    #[test]
    fn variable_to_string() {
        assert_eq!("?x", Variable::typed("x", "str").to_string());
        assert_eq!("?x: str", format!("{:?}", Variable::typed("x", "str")));
        assert_eq!("?y", format!("{:?}", Variable::new("y")));
    }

    #[test]
    fn variable_constraints() {
        let x = Variable::new("x").with_constraints(vec!["x > 0".into()]);
        assert_eq!(Some(&["x > 0".to_string()][..]), x.constraints());
        assert_eq!(None, Variable::new("x").constraints());
    }
}
