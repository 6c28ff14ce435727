//! Modeling layer errors.

use thiserror::Error;

/// Errors raised by template validation and environment loading.
#[derive(Debug, Error)]
pub enum Error {
    /// A template is missing a required field or carries an unusable value.
    #[error("invalid template: {0}")]
    Template(String),

    /// A relationship type name or ordinal outside the recognized set.
    #[error("unknown relationship type: {0}")]
    UnknownCardinality(String),

    /// A type call string could not be parsed.
    #[error(transparent)]
    Type(#[from] modelgraph_types::TypeError),

    /// A model with this name is already loaded.
    #[error("environment already has a model named '{name}'")]
    DuplicateModel {
        /// The conflicting model name.
        name: String,
    },

    /// A relationship with this alias pair is already loaded.
    #[error("a relationship between '{source_name}' as '{source_alias}' and '{target}' as '{target_alias}' already exists")]
    DuplicateRelationship {
        /// Source model name of the rejected relationship.
        source_name: String,
        /// Source alias (or name) of the rejected relationship.
        source_alias: String,
        /// Target model name of the rejected relationship.
        target: String,
        /// Target alias (or name) of the rejected relationship.
        target_alias: String,
    },

    /// A traversal was started from a model that is not loaded.
    #[error("no model named '{name}' is loaded")]
    UnknownModel {
        /// The requested model name.
        name: String,
    },

    /// The environment has dangling relationship endpoints.
    #[error("environment incomplete: {missing} missing and {unlinked} unlinked model references")]
    Incomplete {
        /// Number of missing-model descriptors.
        missing: usize,
        /// Number of unlinked-model descriptors.
        unlinked: usize,
    },

    /// Template-string rendering failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}
