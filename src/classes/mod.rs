//! SBOL class markers and their declared properties.
//!
//! Each class is a zero-sized marker implementing [`SbolType`]. Its property
//! descriptors are associated constants, so typed access reads as
//! `object.property(ComponentDefinition::ROLES)`.
//!
//! [`SbolType`]: crate::model::SbolType

macro_rules! sbol_class {
    ($(#[$meta:meta])* $name:ident => $class:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl $crate::model::SbolType for $name {
            const CLASS: $crate::model::SbolClass = $crate::model::SbolClass::$class;
        }
    };
}

mod component;
pub mod identified;
mod location;
mod module;
mod provenance;
mod toplevel;

pub use component::{Component, ComponentDefinition, Sequence, SequenceAnnotation, SequenceConstraint};
pub use identified::{AnyObject, TopLevel};
pub use location::{Cut, GenericLocation, Location, Polarity, Range, Span};
pub use module::{
    FunctionalComponent, Interaction, MapsTo, Measurement, Model, Module, ModuleDefinition,
    Participation,
};
pub use provenance::{Activity, Agent, Association, Plan, Usage};
pub use toplevel::{Attachment, Collection};
