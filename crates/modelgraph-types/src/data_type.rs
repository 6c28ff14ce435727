//! Constructed data type values.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::call::parse_call;
use crate::kind::{ArgSpec, TypeKind};

/// Validation capabilities and the absent value carried by a type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeProperties {
    /// Values of this type can be enumerated (listed and counted distinctly).
    pub enumerable: bool,
    /// Values of this type have a total order usable in range comparisons.
    pub comparable: bool,
    /// Values of this type participate in text search.
    pub searchable: bool,
    /// Values of this type can be split into fragments for partial matching.
    pub fragmentable: bool,
    /// The value that stands in for "not provided", if any.
    pub absent_value: Option<Value>,
}

/// One-shot property overrides applied at attribute construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOverrides {
    /// Override the enumerable flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enumerable: Option<bool>,
    /// Override the comparable flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparable: Option<bool>,
    /// Override the searchable flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable: Option<bool>,
    /// Override the fragmentable flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fragmentable: Option<bool>,
    /// Override the absent value (`null` clears it).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub absent_value: Option<Value>,
}

impl PropertyOverrides {
    /// Check whether any override is set.
    pub fn is_empty(&self) -> bool {
        self.enumerable.is_none()
            && self.comparable.is_none()
            && self.searchable.is_none()
            && self.fragmentable.is_none()
            && self.absent_value.is_none()
    }
}

/// A constructed scalar type: kind, call arguments, and properties.
///
/// Values are built through the per-kind constructors (`DataType::string`,
/// `DataType::uuid`, ...) or parsed from a call string with
/// [`parse_call`](crate::parse_call).
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    kind: TypeKind,
    /// Resolved maximum length for length-bounded kinds.
    length: Option<u32>,
    /// Upper bound for numeric kinds; `None` means unbounded.
    bound: Option<i64>,
    properties: TypeProperties,
}

/// A single rendered call argument plus whether it equals the default.
#[derive(Debug, Clone)]
pub(crate) struct CallArg {
    pub rendered: String,
    pub is_default: bool,
}

impl DataType {
    fn new(kind: TypeKind, length: Option<u32>, bound: Option<i64>) -> Self {
        DataType {
            kind,
            length,
            bound,
            properties: kind.default_properties(),
        }
    }

    /// Construct a type of the given kind with all-default arguments.
    pub fn with_defaults(kind: TypeKind) -> Self {
        DataType::from_args(kind, None, None)
    }

    /// Construct from positional call arguments, resolving defaults.
    pub(crate) fn from_args(kind: TypeKind, length: Option<u32>, bound: Option<i64>) -> Self {
        match kind.arg_spec() {
            ArgSpec::Length { default } => DataType::new(kind, Some(length.unwrap_or(default)), None),
            ArgSpec::Bound => DataType::new(kind, None, bound),
            ArgSpec::None => DataType::new(kind, None, None),
        }
    }

    /// `STRING(maxLen)`; defaults to 255.
    pub fn string(max_len: impl Into<Option<u32>>) -> Self {
        DataType::new(TypeKind::String, Some(max_len.into().unwrap_or(255)), None)
    }

    /// `BINARY(maxLen)`; defaults to 255.
    pub fn binary(max_len: impl Into<Option<u32>>) -> Self {
        DataType::new(TypeKind::Binary, Some(max_len.into().unwrap_or(255)), None)
    }

    /// `TEXT()`.
    pub fn text() -> Self {
        DataType::new(TypeKind::Text, None, None)
    }

    /// `TINYTEXT()`.
    pub fn tinytext() -> Self {
        DataType::new(TypeKind::TinyText, None, None)
    }

    /// `CITEXT()`.
    pub fn citext() -> Self {
        DataType::new(TypeKind::CiText, None, None)
    }

    /// `INTEGER(max)`; unbounded by default.
    pub fn integer(max: impl Into<Option<i64>>) -> Self {
        DataType::new(TypeKind::Integer, None, max.into())
    }

    /// `BIGINT(max)`; unbounded by default.
    pub fn bigint(max: impl Into<Option<i64>>) -> Self {
        DataType::new(TypeKind::BigInt, None, max.into())
    }

    /// `FLOAT(max)`; unbounded by default.
    pub fn float(max: impl Into<Option<i64>>) -> Self {
        DataType::new(TypeKind::Float, None, max.into())
    }

    /// `REAL(max)`; unbounded by default.
    pub fn real(max: impl Into<Option<i64>>) -> Self {
        DataType::new(TypeKind::Real, None, max.into())
    }

    /// `DOUBLE(max)`; unbounded by default.
    pub fn double(max: impl Into<Option<i64>>) -> Self {
        DataType::new(TypeKind::Double, None, max.into())
    }

    /// `DATETIME()`.
    pub fn datetime() -> Self {
        DataType::new(TypeKind::DateTime, None, None)
    }

    /// `DATEONLY()`.
    pub fn dateonly() -> Self {
        DataType::new(TypeKind::DateOnly, None, None)
    }

    /// `TIMEONLY()`.
    pub fn timeonly() -> Self {
        DataType::new(TypeKind::TimeOnly, None, None)
    }

    /// `BOOLEAN()`.
    pub fn boolean() -> Self {
        DataType::new(TypeKind::Boolean, None, None)
    }

    /// `BLOB()`.
    pub fn blob() -> Self {
        DataType::new(TypeKind::Blob, None, None)
    }

    /// `TINYBLOB()`.
    pub fn tinyblob() -> Self {
        DataType::new(TypeKind::TinyBlob, None, None)
    }

    /// `UUID()`.
    pub fn uuid() -> Self {
        DataType::new(TypeKind::Uuid, None, None)
    }

    /// `CIDR()`.
    pub fn cidr() -> Self {
        DataType::new(TypeKind::Cidr, None, None)
    }

    /// `INET()`.
    pub fn inet() -> Self {
        DataType::new(TypeKind::Inet, None, None)
    }

    /// `MACADDR()`.
    pub fn macaddr() -> Self {
        DataType::new(TypeKind::MacAddr, None, None)
    }

    /// The kind this type was constructed from.
    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Resolved maximum length, for length-bounded kinds.
    pub fn length(&self) -> Option<u32> {
        self.length
    }

    /// Upper bound, for numeric kinds; `None` means unbounded.
    pub fn bound(&self) -> Option<i64> {
        self.bound
    }

    /// The full property set.
    pub fn properties(&self) -> &TypeProperties {
        &self.properties
    }

    pub fn is_enumerable(&self) -> bool {
        self.properties.enumerable
    }

    pub fn is_comparable(&self) -> bool {
        self.properties.comparable
    }

    pub fn is_searchable(&self) -> bool {
        self.properties.searchable
    }

    pub fn is_fragmentable(&self) -> bool {
        self.properties.fragmentable
    }

    /// The configured absent value, if any.
    pub fn absent_value(&self) -> Option<&Value> {
        self.properties.absent_value.as_ref()
    }

    /// Apply property overrides in place. Intended to run once, right after
    /// construction; an explicit `null` absent value clears it.
    pub fn apply_properties(&mut self, overrides: &PropertyOverrides) {
        if let Some(v) = overrides.enumerable {
            self.properties.enumerable = v;
        }
        if let Some(v) = overrides.comparable {
            self.properties.comparable = v;
        }
        if let Some(v) = overrides.searchable {
            self.properties.searchable = v;
        }
        if let Some(v) = overrides.fragmentable {
            self.properties.fragmentable = v;
        }
        if let Some(v) = &overrides.absent_value {
            self.properties.absent_value = if v.is_null() { None } else { Some(v.clone()) };
        }
    }

    /// Canonical serialized form: lowercase constructor with explicit finite
    /// arguments, e.g. `string(255)` or `integer()`.
    pub fn serialize(&self) -> String {
        let name = self.kind.name().to_ascii_lowercase();
        match (self.length, self.bound) {
            (Some(len), _) => format!("{name}({len})"),
            (None, Some(max)) => format!("{name}({max})"),
            (None, None) => format!("{name}()"),
        }
    }

    /// Rendered call arguments, in positional order, with default markers.
    pub(crate) fn call_args(&self) -> Vec<CallArg> {
        match self.kind.arg_spec() {
            ArgSpec::None => Vec::new(),
            ArgSpec::Length { default } => {
                let len = self.length.unwrap_or(default);
                vec![CallArg {
                    rendered: len.to_string(),
                    is_default: len == default,
                }]
            }
            ArgSpec::Bound => match self.bound {
                Some(max) => vec![CallArg {
                    rendered: max.to_string(),
                    is_default: false,
                }],
                // Unbounded is the default and has no literal rendering.
                None => vec![CallArg {
                    rendered: String::new(),
                    is_default: true,
                }],
            },
        }
    }
}

impl Serialize for DataType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.serialize())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let call = String::deserialize(deserializer)?;
        parse_call(&call).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_constructor_defaults() {
        let ty = DataType::string(None);
        assert_eq!(ty.kind(), TypeKind::String);
        assert_eq!(ty.length(), Some(255));

        let ty = DataType::string(42);
        assert_eq!(ty.length(), Some(42));

        let ty = DataType::integer(None);
        assert_eq!(ty.bound(), None);

        let ty = DataType::float(100);
        assert_eq!(ty.bound(), Some(100));
    }

    #[test]
    fn test_serialize_canonical_form() {
        assert_eq!(DataType::string(None).serialize(), "string(255)");
        assert_eq!(DataType::string(42).serialize(), "string(42)");
        assert_eq!(DataType::integer(None).serialize(), "integer()");
        assert_eq!(DataType::float(100).serialize(), "float(100)");
        assert_eq!(DataType::uuid().serialize(), "uuid()");
    }

    #[test]
    fn test_apply_properties() {
        let mut ty = DataType::float(None);
        assert!(ty.absent_value().is_none());

        ty.apply_properties(&PropertyOverrides {
            searchable: Some(true),
            absent_value: Some(json!(0)),
            ..PropertyOverrides::default()
        });
        assert!(ty.is_searchable());
        assert_eq!(ty.absent_value(), Some(&json!(0)));

        // An explicit null clears the absent value.
        ty.apply_properties(&PropertyOverrides {
            absent_value: Some(Value::Null),
            ..PropertyOverrides::default()
        });
        assert!(ty.absent_value().is_none());
    }

    #[test]
    fn test_with_defaults_matches_constructors() {
        assert_eq!(DataType::with_defaults(TypeKind::String), DataType::string(None));
        assert_eq!(DataType::with_defaults(TypeKind::Integer), DataType::integer(None));
        assert_eq!(DataType::with_defaults(TypeKind::Uuid), DataType::uuid());
    }

    #[test]
    fn test_serde_round_trip() {
        let ty = DataType::string(42);
        let encoded = serde_json::to_value(&ty).unwrap();
        assert_eq!(encoded, json!("string(42)"));

        let decoded: DataType = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, ty);

        let from_call: DataType = serde_json::from_value(json!("STRING(42)")).unwrap();
        assert_eq!(from_call, ty);
    }
}
