//! Typed object model for SBOL synthetic-biology designs.
//!
//! Every SBOL entity is an [`SbolObject`]: an identity, a class tag and an
//! ordered property store. Typed access goes through declared property,
//! ownership and reference descriptors that live on the class markers in
//! [`classes`]. A [`Document`] indexes every registered object by URI,
//! enforces identity uniqueness and round-trips the whole graph through
//! RDF/XML.
//!
//! ```
//! use sbol::{classes::ComponentDefinition, Config, Document, Identified};
//!
//! let config = Config::default().with_homespace("http://sys-bio.org");
//! let mut document = Document::new(config.clone());
//! let promoter = ComponentDefinition::new(&config, "B0032").unwrap();
//! document.add(promoter).unwrap();
//!
//! let stored = document
//!     .get::<ComponentDefinition>("http://sys-bio.org/B0032/1.0.0")
//!     .unwrap();
//! assert_eq!(stored.display_id(), Some("B0032"));
//! ```

pub mod classes;
pub mod config;
pub mod document;
mod errors;
pub mod io;
pub mod logger;
pub mod model;
pub mod validation;
pub mod vocab;

pub use config::Config;
pub use document::{Document, DocumentSummary};
pub use errors::Error;
pub use model::{
    Cardinality, Documented, Identified, OwnedDef, PropertyDef, PropertyValue, ReferencedDef,
    SbolClass, SbolObject, SbolType,
};
pub use validation::{Severity, ValidationReport, Violation, ViolationKind};

/// Application results options list
pub type Result<T, E = Error> = std::result::Result<T, E>;
