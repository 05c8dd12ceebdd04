//! Index key encoding
//!
//! Keys use an enum with deterministic cross-type ordering:
//! Bool < Int < Float < String. Floats are stored as total-ordering bits.

use serde_json::Value;

/// Index key representing a serialized field value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexKey {
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value (stored as bits for total ordering)
    Float(u64),
    /// String value
    String(String),
}

impl IndexKey {
    /// Create a key from a boolean
    pub fn from_bool(v: bool) -> Self {
        IndexKey::Bool(v)
    }

    /// Create a key from an integer
    pub fn from_int(v: i64) -> Self {
        IndexKey::Int(v)
    }

    /// Create a key from a float
    ///
    /// Uses bit representation for total ordering.
    pub fn from_float(v: f64) -> Self {
        let bits = v.to_bits();
        // Negative floats: flip all bits. Positive: flip sign bit.
        let ordered = if (bits >> 63) == 1 {
            !bits
        } else {
            bits ^ (1 << 63)
        };
        IndexKey::Float(ordered)
    }

    /// Create a key from a string
    pub fn from_string(v: impl Into<String>) -> Self {
        IndexKey::String(v.into())
    }

    /// Create a key from a JSON value.
    ///
    /// Arrays, objects, and null are not indexable.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(IndexKey::from_bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(IndexKey::from_int(i))
                } else {
                    n.as_f64().map(IndexKey::from_float)
                }
            }
            Value::String(s) => Some(IndexKey::from_string(s)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_float_total_ordering() {
        let neg = IndexKey::from_float(-2.5);
        let zero = IndexKey::from_float(0.0);
        let pos = IndexKey::from_float(13.99);

        assert!(neg < zero);
        assert!(zero < pos);
    }

    #[test]
    fn test_cross_type_ordering() {
        assert!(IndexKey::from_bool(true) < IndexKey::from_int(0));
        assert!(IndexKey::from_int(99) < IndexKey::from_float(0.0));
        assert!(IndexKey::from_float(1e9) < IndexKey::from_string("a"));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(IndexKey::from_json(&json!(1965)), Some(IndexKey::Int(1965)));
        assert_eq!(
            IndexKey::from_json(&json!("Fiction")),
            Some(IndexKey::String("Fiction".into()))
        );
        assert_eq!(IndexKey::from_json(&json!(null)), None);
        assert_eq!(IndexKey::from_json(&json!([1, 2])), None);
        assert_eq!(IndexKey::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn test_no_numeric_coercion_between_int_and_float() {
        assert_ne!(
            IndexKey::from_json(&json!(10)),
            IndexKey::from_json(&json!(10.0))
        );
    }
}
