use xb_reflect::ops::{EntryError, ShapeError};
use xb_reflect::ScalarError;

use crate::secret::SecretError;

/// Everything that can go wrong while saving or loading a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The document's root element names a different type than requested.
    #[error("document root is <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },

    /// A polymorphic node carries no type alias.
    #[error("polymorphic property {property:?} has no type marker")]
    MissingAlias { property: String },

    /// A type alias is absent from the document's alias table.
    #[error("type alias {0:?} is not declared by the document")]
    UnknownAlias(String),

    /// A document names a type the registry does not allow.
    #[error("type {0:?} is not registered with this formatter")]
    UnregisteredType(String),

    #[error(transparent)]
    Scalar(#[from] ScalarError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error("cannot parse {0:?} as a date")]
    BadDate(String),

    #[error("cannot parse {0:?} as a duration")]
    BadDuration(String),

    /// An array's dimension attribute failed to parse.
    #[error("cannot parse array dimensions {0:?}")]
    BadDimensions(String),

    #[error("node <{node}> is missing attribute {attr:?}")]
    MissingAttribute { node: String, attr: String },

    /// Document structure the codec cannot make sense of.
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
