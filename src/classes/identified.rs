//! Properties every SBOL object carries, and the abstract markers.

use crate::{
    classes::{Activity, Attachment},
    model::{kind, FieldSpec, PropertyDef, ReferencedDef},
    vocab,
};

sbol_class!(
    /// Any SBOL object; the root of the class hierarchy.
    AnyObject => Identified
);

sbol_class!(
    /// Any object that can be registered directly in a document.
    TopLevel => TopLevel
);

/// Identity fields are minted and rewritten by the crate, never set directly.
pub(crate) const PERSISTENT_IDENTITY: PropertyDef<kind::Uri> =
    PropertyDef::optional(vocab::PERSISTENT_IDENTITY);
pub(crate) const DISPLAY_ID: PropertyDef<kind::Text> = PropertyDef::optional(vocab::DISPLAY_ID);
pub(crate) const VERSION: PropertyDef<kind::Version> = PropertyDef::optional(vocab::VERSION);
/// `dcterms:title`.
pub const NAME: PropertyDef<kind::Text> = PropertyDef::optional(vocab::TITLE);
pub const DESCRIPTION: PropertyDef<kind::Text> = PropertyDef::optional(vocab::DESCRIPTION);
pub const WAS_DERIVED_FROM: PropertyDef<kind::Uri> = PropertyDef::many(vocab::WAS_DERIVED_FROM);
pub const WAS_GENERATED_BY: ReferencedDef<Activity> = ReferencedDef::many(vocab::WAS_GENERATED_BY);

/// Top levels only.
pub const ATTACHMENTS: ReferencedDef<Attachment> = ReferencedDef::many(vocab::ATTACHMENT);

pub(crate) const FIELDS: &[FieldSpec] = &[
    PERSISTENT_IDENTITY.field(),
    DISPLAY_ID.field(),
    VERSION.field(),
    NAME.field(),
    DESCRIPTION.field(),
    WAS_DERIVED_FROM.field(),
    WAS_GENERATED_BY.field(),
];

pub(crate) const TOP_LEVEL_FIELDS: &[FieldSpec] = &[ATTACHMENTS.field()];
