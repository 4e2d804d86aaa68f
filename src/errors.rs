//! # Errors
//!
//! Crate-wide error type. Local rule violations (cardinality, formats,
//! duplicate identities) fail the call that would have broken the invariant;
//! document-wide checks are batched into [`Error::Validation`].

use crate::{model::SbolClass, validation::ValidationReport};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// An identity is already registered in the document or collection.
    #[error("object `{uri}` already exists")]
    DuplicateUri { uri: String },

    /// A URI, property value or index lookup missed.
    #[error("{what} `{key}` not found")]
    NotFound { what: &'static str, key: String },

    /// A set/add/remove call would break the declared cardinality.
    #[error("cardinality violation on `{property}` of `{subject}`: {message}")]
    Cardinality {
        subject: String,
        property: String,
        message: String,
    },

    /// A stored or supplied value does not match the expected lexical form.
    #[error("invalid value `{value}` for `{property}`: expected {expected}")]
    InvalidFormat {
        property: String,
        value: String,
        expected: String,
    },

    /// A looked-up object exists but belongs to another class.
    #[error("object `{uri}` is a {found}, expected a {expected}")]
    TypeMismatch {
        uri: String,
        expected: SbolClass,
        found: SbolClass,
    },

    /// A definition chain loops back on itself.
    #[error("cyclic reference through `{uri}`")]
    CyclicReference { uri: String },

    /// The document lacks a namespace declaration the wire format requires.
    #[error("document does not declare the `{namespace}` namespace")]
    MissingNamespace { namespace: String },

    #[error("{0}")]
    InvalidArgument(String),

    /// Global validation found at least one error-level violation.
    #[error("document failed validation: {0}")]
    Validation(ValidationReport),

    /// The serialized document is structurally unusable.
    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Config(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    pub(crate) fn cardinality(
        subject: impl Into<String>,
        property: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Cardinality {
            subject: subject.into(),
            property: property.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_format(
        property: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidFormat {
            property: property.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }

    pub(crate) fn duplicate(uri: impl Into<String>) -> Self {
        Self::DuplicateUri { uri: uri.into() }
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Self::Xml(err.into())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::Malformed(err.to_string())
    }
}
