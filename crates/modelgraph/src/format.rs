//! Template rendering formats.

/// How library-specific values (relationship types, data types) are rendered
/// in exported templates.
///
/// The set is closed: there is no way to request an unrecognized format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    /// Raw internal representation: the cardinality ordinal, the serialized
    /// type value.
    Internal,
    /// Human-readable call-like strings: `"ONE_TO_MANY"`, `"STRING(42)"`.
    #[default]
    Explicit,
    /// Namespaced string form referencing the owning module:
    /// `"Relationship.ONE_TO_MANY"`, `"Types.STRING(42)"`.
    Object,
}
