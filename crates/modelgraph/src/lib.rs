//! modelgraph - declarative entity modeling over an in-memory graph.
//!
//! Callers describe entities ("models"), their typed attributes, and their
//! relationships via plain templates. The [`Environment`] links relationship
//! endpoints to model objects as they arrive in any order, derives the mirror
//! of every edge, reports inconsistencies, and answers traversal queries over
//! the resulting graph. No data rows are stored and no I/O is performed; this
//! is a metadata layer only.

pub mod attribute;
pub mod environment;
pub mod error;
pub mod format;
pub mod model;
pub mod relationship;
mod render;

pub use attribute::{Attribute, AttributeTemplate, TypeSpec};
pub use environment::{
    ConsistencyIssue, Environment, ModelId, ModelTree, PathStep, RelId, RelationshipRow,
    TraversalOrder,
};
pub use error::Error;
pub use format::TemplateFormat;
pub use model::{Model, ModelExportOptions, ModelTemplate};
pub use relationship::{
    Cardinality, CardinalityValue, Direction, DirectionSet, Relationship, RelationshipTemplate,
};
pub use render::TemplateStringOptions;

/// Re-export the attribute type library.
pub use modelgraph_types as types;
