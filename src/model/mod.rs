//! Generic property/object core shared by every SBOL class.
//!
//! An [`SbolObject`] stores tagged values in an ordered multimap keyed by
//! property URI, and owns its children in per-property collections. The
//! declared descriptors ([`PropertyDef`], [`OwnedDef`], [`ReferencedDef`])
//! fix, per property URI, how values are interpreted and how many are
//! allowed; accessors built from them enforce cardinality and format rules
//! before anything is stored.

mod class;
pub mod identity;
mod object;
mod owned;
pub mod property;
mod referenced;
pub mod value_objects;

pub use class::{SbolClass, SbolType, Seed};
pub use object::{
    Children, Descendants, Documented, Identified, PropertyStore, PropertyValue, SbolObject,
};
pub(crate) use object::OwnedCollection;
pub use owned::{OwnedDef, OwnedObject};
pub use property::{
    kind, Cardinality, DateTimeProperty, FieldSpec, FloatProperty, IntProperty, Property,
    PropertyDef, Shape, TextProperty, UriProperty, ValueKind, VersionProperty,
};
pub use referenced::{ReferencedDef, ReferencedObject, References};
pub use value_objects::{Iri, IriError, Timestamp, Version};
