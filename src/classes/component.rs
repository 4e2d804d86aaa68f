//! Structural classes: parts, their sub-components, annotations and
//! sequences.

use crate::{
    classes::{Location, MapsTo, Measurement, Polarity, Range, Span},
    config::Config,
    model::{
        kind, FieldSpec, Identified, OwnedDef, PropertyDef, ReferencedDef, SbolClass, SbolObject,
        SbolType,
    },
    vocab, Result,
};

sbol_class!(
    /// A genetic part or design: DNA, RNA, protein, small molecule or
    /// complex.
    ComponentDefinition => ComponentDefinition
);

impl ComponentDefinition {
    pub const TYPES: PropertyDef<kind::Uri> = PropertyDef::required_many(vocab::TYPE);
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::ROLE);
    pub const SEQUENCES: ReferencedDef<Sequence> = ReferencedDef::many(vocab::SEQUENCE);
    pub const COMPONENTS: OwnedDef<Component> = OwnedDef::many(vocab::COMPONENT);
    pub const SEQUENCE_ANNOTATIONS: OwnedDef<SequenceAnnotation> =
        OwnedDef::many(vocab::SEQUENCE_ANNOTATION);
    pub const SEQUENCE_CONSTRAINTS: OwnedDef<SequenceConstraint> =
        OwnedDef::many(vocab::SEQUENCE_CONSTRAINT);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::TYPES.field(),
        Self::ROLES.field(),
        Self::SEQUENCES.field(),
        Self::COMPONENTS.field(),
        Self::SEQUENCE_ANNOTATIONS.field(),
        Self::SEQUENCE_CONSTRAINTS.field(),
    ];

    /// A new DNA-region definition.
    ///
    /// # Errors
    ///
    /// As [`SbolObject::new`].
    pub fn new(config: &Config, id: &str) -> Result<SbolObject> {
        SbolObject::new(config, Self::CLASS, id)
    }

    /// Creates a sub-component instantiating `instance_of`. Nothing is
    /// attached when the URI is rejected.
    ///
    /// # Errors
    ///
    /// As [`crate::model::OwnedObject::create`], or `InvalidFormat` for a
    /// malformed definition URI.
    pub fn add_component<'a>(
        definition: &'a mut SbolObject,
        config: &Config,
        id: &str,
        instance_of: &str,
    ) -> Result<&'a mut SbolObject> {
        definition
            .owned(Self::COMPONENTS)
            .create_with(config, id, |component| {
                component.referenced(Component::DEFINITION).set(instance_of)
            })
    }
}

sbol_class!(
    /// An instance of a ComponentDefinition inside another one.
    Component => Component
);

impl Component {
    pub const DEFINITION: ReferencedDef<ComponentDefinition> =
        ReferencedDef::required(vocab::DEFINITION);
    pub const ACCESS: PropertyDef<kind::Uri> = PropertyDef::required(vocab::ACCESS);
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::ROLE);
    pub const ROLE_INTEGRATION: PropertyDef<kind::Uri> =
        PropertyDef::optional(vocab::ROLE_INTEGRATION);
    pub const MAPS_TOS: OwnedDef<MapsTo> = OwnedDef::many(vocab::MAPS_TO);
    pub const SOURCE_LOCATIONS: OwnedDef<Location> = OwnedDef::many(vocab::SOURCE_LOCATION);
    pub const MEASURES: OwnedDef<Measurement> = OwnedDef::many(vocab::MEASURE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::DEFINITION.field(),
        Self::ACCESS.field(),
        Self::ROLES.field(),
        Self::ROLE_INTEGRATION.field(),
        Self::MAPS_TOS.field(),
        Self::SOURCE_LOCATIONS.field(),
        Self::MEASURES.field(),
    ];
}

sbol_class!(
    /// Marks a region of the parent's sequence.
    SequenceAnnotation => SequenceAnnotation
);

impl SequenceAnnotation {
    pub const LOCATIONS: OwnedDef<Location> = OwnedDef::required_many(vocab::LOCATION);
    pub const COMPONENT: ReferencedDef<Component> = ReferencedDef::optional(vocab::COMPONENT);
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::ROLE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::LOCATIONS.field(),
        Self::COMPONENT.field(),
        Self::ROLES.field(),
    ];

    /// Adds a `[start, end]` range location.
    ///
    /// # Errors
    ///
    /// As [`crate::model::OwnedObject::create_as`].
    pub fn add_range<'a>(
        annotation: &'a mut SbolObject,
        config: &Config,
        id: &str,
        start: i64,
        end: i64,
    ) -> Result<&'a mut SbolObject> {
        annotation
            .owned(Self::LOCATIONS)
            .create_as_with::<Range, _>(config, id, |range| {
                range.property(Range::START).set(start)?;
                range.property(Range::END).set(end)
            })
    }

    /// Spans of every range location, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails when a range lacks `start` or `end`.
    pub fn spans(annotation: &SbolObject) -> Result<Vec<Span>> {
        annotation
            .children(Self::LOCATIONS)
            .filter(|location| location.class() == SbolClass::Range)
            .map(Range::span)
            .collect()
    }

    /// Combined strand of all locations.
    #[must_use]
    pub fn polarity(annotation: &SbolObject) -> Polarity {
        Polarity::combine(
            annotation
                .children(Self::LOCATIONS)
                .flat_map(|location| location.property_values(vocab::ORIENTATION))
                .map(|orientation| Polarity::from_orientation(orientation.as_str())),
        )
    }
}

sbol_class!(
    /// A positional or orientational relation between two sub-components.
    SequenceConstraint => SequenceConstraint
);

impl SequenceConstraint {
    pub const SUBJECT: ReferencedDef<Component> = ReferencedDef::required(vocab::SUBJECT);
    pub const OBJECT: ReferencedDef<Component> = ReferencedDef::required(vocab::OBJECT);
    pub const RESTRICTION: PropertyDef<kind::Uri> = PropertyDef::required(vocab::RESTRICTION);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::SUBJECT.field(),
        Self::OBJECT.field(),
        Self::RESTRICTION.field(),
    ];
}

sbol_class!(
    /// Primary structure of a part.
    Sequence => Sequence
);

impl Sequence {
    pub const ELEMENTS: PropertyDef<kind::Text> = PropertyDef::required(vocab::ELEMENTS);
    pub const ENCODING: PropertyDef<kind::Uri> = PropertyDef::required(vocab::ENCODING);

    pub(crate) const FIELDS: &'static [FieldSpec] =
        &[Self::ELEMENTS.field(), Self::ENCODING.field()];

    /// A new IUPAC DNA sequence.
    ///
    /// # Errors
    ///
    /// As [`SbolObject::new`]; `Cardinality` for empty `elements`.
    pub fn new(config: &Config, id: &str, elements: &str) -> Result<SbolObject> {
        let mut sequence = SbolObject::new(config, Self::CLASS, id)?;
        sequence.property(Self::ELEMENTS).set(elements)?;
        Ok(sequence)
    }
}
