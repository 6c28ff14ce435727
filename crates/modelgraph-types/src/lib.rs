//! modelgraph-types - SQL-flavored scalar type constructors.
//!
//! Each constructor produces a [`DataType`] carrying validation capability
//! flags and an optional absent value. Types serialize to a canonical call
//! string and can be reconstructed from either rendering via [`parse_call`].

mod call;
mod data_type;
mod error;
mod kind;

pub use call::{get_call, parse_call};
pub use data_type::{DataType, PropertyOverrides, TypeProperties};
pub use error::TypeError;
pub use kind::TypeKind;
