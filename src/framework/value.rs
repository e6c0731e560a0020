//! Tri-state attribute values.

/// The value of one local attribute: unknown (not yet resolved during
/// planning), explicitly null, or known.
///
/// This is the field type of every resource model struct; the coercion
/// engine in `crate::mapping` converts between these and the remote API's
/// representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value<T> {
    Unknown,
    Null,
    Known(T),
}

impl<T> Value<T> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Value::Known(_))
    }

    pub fn as_known(&self) -> Option<&T> {
        match self {
            Value::Known(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Value<U> {
        match self {
            Value::Known(v) => Value::Known(f(v)),
            Value::Null => Value::Null,
            Value::Unknown => Value::Unknown,
        }
    }
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Null
    }
}

impl<T> From<Option<T>> for Value<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => Value::Known(v),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_null() {
        let v: Value<String> = Value::default();
        assert!(v.is_null());
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(Some(1)), Value::Known(1));
        assert_eq!(Value::<i64>::from(None), Value::Null);
    }

    #[test]
    fn map_preserves_null_and_unknown() {
        assert_eq!(Value::Known(2).map(|n: i64| n * 2), Value::Known(4));
        assert_eq!(Value::<i64>::Null.map(|n| n * 2), Value::Null);
        assert_eq!(Value::<i64>::Unknown.map(|n| n * 2), Value::Unknown);
    }
}
