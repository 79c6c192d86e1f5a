//! Request parameters and their canonical rendering.

use std::collections::BTreeMap;
use std::fmt;

/// A single parameter value.
///
/// The service only understands scalar values. `Unsupported` exists so that
/// dynamic input (for example a `serde_json::Value` taken from a config file)
/// can still be carried through; it renders as an empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point, rendered fixed-point with six fractional digits.
    Float(f64),
    /// Boolean, rendered `true` / `false`.
    Bool(bool),
    /// String, rendered verbatim.
    Str(String),
    /// A value outside the scalar kinds above.
    Unsupported {
        /// Name of the rejected kind, used for logging.
        kind: &'static str,
    },
}

impl ParamValue {
    /// Render the value the way the service expects it in the signed string.
    ///
    /// Unsupported values log a warning and render as `""`.
    pub fn render(&self) -> String {
        match self {
            Self::Int(v) => v.to_string(),
            Self::UInt(v) => v.to_string(),
            Self::Float(v) => render_float(*v),
            Self::Bool(v) => v.to_string(),
            Self::Str(v) => v.clone(),
            Self::Unsupported { kind } => {
                tracing::warn!(kind = %kind, "Unsupported parameter value type, rendering as empty");
                String::new()
            }
        }
    }
}

fn render_float(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        format!("{:.6}", v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(v: $t) -> Self {
                    Self::$variant(v as $target)
                }
            }
        )*
    };
}

impl_from_int!(Int, i64: i8, i16, i32, i64, isize);
impl_from_int!(UInt, u64: u8, u16, u32, u64, usize);

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<serde_json::Value> for ParamValue {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;

        match v {
            Value::Bool(b) => Self::Bool(b),
            Value::String(s) => Self::Str(s),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Self::UInt(u)
                } else {
                    // Every finite JSON number is representable as f64.
                    n.as_f64()
                        .map(Self::Float)
                        .unwrap_or(Self::Unsupported { kind: "number" })
                }
            }
            Value::Null => Self::Unsupported { kind: "null" },
            Value::Array(_) => Self::Unsupported { kind: "array" },
            Value::Object(_) => Self::Unsupported { kind: "object" },
        }
    }
}

/// Parameters for one request.
///
/// Keys are unique and iterate in byte-wise ascending order, which is the
/// order the signature is computed over.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    entries: BTreeMap<String, ParamValue>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parameter, returning the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> Option<ParamValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in canonical key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rendered `(key, value)` pairs in canonical key order.
    ///
    /// Query strings and form bodies are encoded from these pairs so that the
    /// transmitted arguments match the signed ones.
    pub fn rendered_pairs(&self) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.render()))
            .collect()
    }

    /// Build the canonical argument string: `k1=v1&k2=v2...` in key order.
    ///
    /// Values are not URL-encoded. An empty set yields `""`.
    pub fn canonical_string(&self) -> String {
        canonical_join(&self.rendered_pairs())
    }
}

/// Join already rendered pairs as `k1=v1&k2=v2...`, keeping their order.
///
/// Pass the output of [`ParameterSet::rendered_pairs`] to sign exactly the
/// pairs that are transmitted.
pub fn canonical_join(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}
