//! Type constructor kinds and their per-kind defaults.

use crate::data_type::TypeProperties;

/// The known scalar type constructors.
///
/// Each kind corresponds to one SQL-flavored constructor, e.g. `STRING(42)`
/// or `DATETIME()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Bounded character string, `STRING(maxLen)`.
    String,
    /// Bounded byte string, `BINARY(maxLen)`.
    Binary,
    /// Unbounded text.
    Text,
    /// Small unbounded text.
    TinyText,
    /// Case-insensitive text.
    CiText,
    /// Integer, optionally bounded: `INTEGER(max)`.
    Integer,
    /// Large integer, optionally bounded.
    BigInt,
    /// Floating point, optionally bounded.
    Float,
    /// Single-precision floating point, optionally bounded.
    Real,
    /// Double-precision floating point, optionally bounded.
    Double,
    /// Date and time of day.
    DateTime,
    /// Calendar date without time.
    DateOnly,
    /// Time of day without date.
    TimeOnly,
    /// Boolean flag.
    Boolean,
    /// Binary large object.
    Blob,
    /// Small binary large object.
    TinyBlob,
    /// 128-bit universally unique identifier.
    Uuid,
    /// IPv4/IPv6 network in CIDR notation.
    Cidr,
    /// IPv4/IPv6 host address.
    Inet,
    /// Hardware MAC address.
    MacAddr,
}

/// Which call arguments a kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ArgSpec {
    /// No call arguments.
    None,
    /// One optional length argument with the given default.
    Length { default: u32 },
    /// One optional upper-bound argument, unbounded by default.
    Bound,
}

impl TypeKind {
    /// All known kinds, in declaration order.
    pub fn all() -> &'static [TypeKind] {
        use TypeKind::*;
        &[
            String, Binary, Text, TinyText, CiText, Integer, BigInt, Float, Real, Double,
            DateTime, DateOnly, TimeOnly, Boolean, Blob, TinyBlob, Uuid, Cidr, Inet, MacAddr,
        ]
    }

    /// The constructor name, e.g. `"STRING"`.
    pub fn name(self) -> &'static str {
        match self {
            TypeKind::String => "STRING",
            TypeKind::Binary => "BINARY",
            TypeKind::Text => "TEXT",
            TypeKind::TinyText => "TINYTEXT",
            TypeKind::CiText => "CITEXT",
            TypeKind::Integer => "INTEGER",
            TypeKind::BigInt => "BIGINT",
            TypeKind::Float => "FLOAT",
            TypeKind::Real => "REAL",
            TypeKind::Double => "DOUBLE",
            TypeKind::DateTime => "DATETIME",
            TypeKind::DateOnly => "DATEONLY",
            TypeKind::TimeOnly => "TIMEONLY",
            TypeKind::Boolean => "BOOLEAN",
            TypeKind::Blob => "BLOB",
            TypeKind::TinyBlob => "TINYBLOB",
            TypeKind::Uuid => "UUID",
            TypeKind::Cidr => "CIDR",
            TypeKind::Inet => "INET",
            TypeKind::MacAddr => "MACADDR",
        }
    }

    /// Look up a kind by constructor name, case-insensitively.
    pub fn from_name(name: &str) -> Option<TypeKind> {
        TypeKind::all()
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Check if this kind takes a length argument.
    pub fn is_length_bounded(self) -> bool {
        matches!(self, TypeKind::String | TypeKind::Binary)
    }

    /// Check if this kind takes a numeric upper-bound argument.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            TypeKind::Integer | TypeKind::BigInt | TypeKind::Float | TypeKind::Real | TypeKind::Double
        )
    }

    pub(crate) fn arg_spec(self) -> ArgSpec {
        if self.is_length_bounded() {
            ArgSpec::Length { default: 255 }
        } else if self.is_numeric() {
            ArgSpec::Bound
        } else {
            ArgSpec::None
        }
    }

    /// Capability flags a freshly constructed type of this kind carries.
    ///
    /// Flag table, by family:
    ///
    /// | family                              | enumerable | comparable | searchable | fragmentable |
    /// |-------------------------------------|------------|------------|------------|--------------|
    /// | STRING                              | yes        | yes        | yes        | yes          |
    /// | BINARY                              | yes        | yes        | no         | yes          |
    /// | TEXT, TINYTEXT, CITEXT              | no         | no         | yes        | yes          |
    /// | INTEGER..DOUBLE, DATETIME..TIMEONLY | yes        | yes        | no         | no           |
    /// | BOOLEAN, UUID, CIDR, INET, MACADDR  | yes        | no         | no         | no           |
    /// | BLOB, TINYBLOB                      | no         | no         | no         | yes          |
    pub fn default_properties(self) -> TypeProperties {
        let (enumerable, comparable, searchable, fragmentable) = match self {
            TypeKind::String => (true, true, true, true),
            TypeKind::Binary => (true, true, false, true),
            TypeKind::Text | TypeKind::TinyText | TypeKind::CiText => (false, false, true, true),
            TypeKind::Integer
            | TypeKind::BigInt
            | TypeKind::Float
            | TypeKind::Real
            | TypeKind::Double
            | TypeKind::DateTime
            | TypeKind::DateOnly
            | TypeKind::TimeOnly => (true, true, false, false),
            TypeKind::Boolean
            | TypeKind::Uuid
            | TypeKind::Cidr
            | TypeKind::Inet
            | TypeKind::MacAddr => (true, false, false, false),
            TypeKind::Blob | TypeKind::TinyBlob => (false, false, false, true),
        };
        TypeProperties {
            enumerable,
            comparable,
            searchable,
            fragmentable,
            absent_value: None,
        }
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(TypeKind::from_name("STRING"), Some(TypeKind::String));
        assert_eq!(TypeKind::from_name("string"), Some(TypeKind::String));
        assert_eq!(TypeKind::from_name("MacAddr"), Some(TypeKind::MacAddr));
        assert_eq!(TypeKind::from_name("POINT"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for kind in TypeKind::all() {
            assert_eq!(TypeKind::from_name(kind.name()), Some(*kind));
        }
    }

    #[test]
    fn test_families() {
        assert!(TypeKind::String.is_length_bounded());
        assert!(TypeKind::Binary.is_length_bounded());
        assert!(!TypeKind::Text.is_length_bounded());

        assert!(TypeKind::Integer.is_numeric());
        assert!(TypeKind::Double.is_numeric());
        assert!(!TypeKind::Uuid.is_numeric());
    }

    #[test]
    fn test_default_flags() {
        let string = TypeKind::String.default_properties();
        assert!(string.enumerable && string.comparable && string.searchable && string.fragmentable);

        let text = TypeKind::Text.default_properties();
        assert!(!text.enumerable && text.searchable);

        let blob = TypeKind::Blob.default_properties();
        assert!(!blob.enumerable && !blob.comparable && !blob.searchable && blob.fragmentable);

        assert!(TypeKind::DateOnly.default_properties().comparable);
        assert!(!TypeKind::Boolean.default_properties().comparable);
    }
}
