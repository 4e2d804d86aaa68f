use std::fmt::{self, Display, Formatter};

use crate::{
    classes::{self, identified},
    model::{FieldSpec, PropertyValue},
    vocab,
};

/// Sealed enumeration of the SBOL classes.
///
/// `Identified`, `TopLevel` and `Location` are abstract: they tag
/// descriptors and lookups, never stored objects. `Custom` covers any type
/// URI outside the fixed vocabulary; such objects keep their own type URI
/// and round-trip verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SbolClass {
    Identified,
    TopLevel,
    Location,
    ComponentDefinition,
    Component,
    SequenceAnnotation,
    SequenceConstraint,
    Range,
    Cut,
    GenericLocation,
    Sequence,
    ModuleDefinition,
    Module,
    FunctionalComponent,
    Interaction,
    Participation,
    MapsTo,
    Measurement,
    Collection,
    Model,
    Attachment,
    Activity,
    Agent,
    Plan,
    Usage,
    Association,
    Custom,
}

impl SbolClass {
    /// Every class an object can be instantiated as, `Custom` excluded.
    pub const CONCRETE: &'static [Self] = &[
        Self::ComponentDefinition,
        Self::Component,
        Self::SequenceAnnotation,
        Self::SequenceConstraint,
        Self::Range,
        Self::Cut,
        Self::GenericLocation,
        Self::Sequence,
        Self::ModuleDefinition,
        Self::Module,
        Self::FunctionalComponent,
        Self::Interaction,
        Self::Participation,
        Self::MapsTo,
        Self::Measurement,
        Self::Collection,
        Self::Model,
        Self::Attachment,
        Self::Activity,
        Self::Agent,
        Self::Plan,
        Self::Usage,
        Self::Association,
    ];

    /// Class name as used in typed URIs and messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Identified => "Identified",
            Self::TopLevel => "TopLevel",
            Self::Location => "Location",
            Self::ComponentDefinition => "ComponentDefinition",
            Self::Component => "Component",
            Self::SequenceAnnotation => "SequenceAnnotation",
            Self::SequenceConstraint => "SequenceConstraint",
            Self::Range => "Range",
            Self::Cut => "Cut",
            Self::GenericLocation => "GenericLocation",
            Self::Sequence => "Sequence",
            Self::ModuleDefinition => "ModuleDefinition",
            Self::Module => "Module",
            Self::FunctionalComponent => "FunctionalComponent",
            Self::Interaction => "Interaction",
            Self::Participation => "Participation",
            Self::MapsTo => "MapsTo",
            Self::Measurement => "Measure",
            Self::Collection => "Collection",
            Self::Model => "Model",
            Self::Attachment => "Attachment",
            Self::Activity => "Activity",
            Self::Agent => "Agent",
            Self::Plan => "Plan",
            Self::Usage => "Usage",
            Self::Association => "Association",
            Self::Custom => "Custom",
        }
    }

    /// RDF type URI of a concrete class.
    #[must_use]
    pub fn type_uri(self) -> Option<&'static str> {
        let uri = match self {
            Self::Identified | Self::TopLevel | Self::Location | Self::Custom => return None,
            Self::ComponentDefinition => "http://sbols.org/v2#ComponentDefinition",
            Self::Component => "http://sbols.org/v2#Component",
            Self::SequenceAnnotation => "http://sbols.org/v2#SequenceAnnotation",
            Self::SequenceConstraint => "http://sbols.org/v2#SequenceConstraint",
            Self::Range => "http://sbols.org/v2#Range",
            Self::Cut => "http://sbols.org/v2#Cut",
            Self::GenericLocation => "http://sbols.org/v2#GenericLocation",
            Self::Sequence => "http://sbols.org/v2#Sequence",
            Self::ModuleDefinition => "http://sbols.org/v2#ModuleDefinition",
            Self::Module => "http://sbols.org/v2#Module",
            Self::FunctionalComponent => "http://sbols.org/v2#FunctionalComponent",
            Self::Interaction => "http://sbols.org/v2#Interaction",
            Self::Participation => "http://sbols.org/v2#Participation",
            Self::MapsTo => "http://sbols.org/v2#MapsTo",
            Self::Measurement => "http://www.ontology-of-units-of-measure.org/resource/om-2/Measure",
            Self::Collection => "http://sbols.org/v2#Collection",
            Self::Model => "http://sbols.org/v2#Model",
            Self::Attachment => "http://sbols.org/v2#Attachment",
            Self::Activity => "http://www.w3.org/ns/prov#Activity",
            Self::Agent => "http://www.w3.org/ns/prov#Agent",
            Self::Plan => "http://www.w3.org/ns/prov#Plan",
            Self::Usage => "http://www.w3.org/ns/prov#Usage",
            Self::Association => "http://www.w3.org/ns/prov#Association",
        };
        Some(uri)
    }

    /// Maps a type URI back to its class, falling back to `Custom`.
    #[must_use]
    pub fn from_type_uri(uri: &str) -> Self {
        Self::CONCRETE
            .iter()
            .copied()
            .find(|class| class.type_uri() == Some(uri))
            .unwrap_or(Self::Custom)
    }

    #[must_use]
    pub fn is_abstract(self) -> bool {
        matches!(self, Self::Identified | Self::TopLevel | Self::Location)
    }

    /// Whether objects of this class may be registered directly in a
    /// document. Extension objects qualify as generic top levels.
    #[must_use]
    pub fn is_top_level(self) -> bool {
        matches!(
            self,
            Self::TopLevel
                | Self::ComponentDefinition
                | Self::ModuleDefinition
                | Self::Sequence
                | Self::Collection
                | Self::Model
                | Self::Attachment
                | Self::Activity
                | Self::Agent
                | Self::Plan
                | Self::Custom
        )
    }

    /// Subclass test along the fixed hierarchy.
    #[must_use]
    pub fn is_a(self, other: Self) -> bool {
        match other {
            Self::Identified => true,
            Self::TopLevel => self.is_top_level(),
            Self::Location => matches!(
                self,
                Self::Location | Self::Range | Self::Cut | Self::GenericLocation
            ),
            _ => self == other,
        }
    }

    /// Declared properties: the Identified base, the TopLevel extras where
    /// they apply, then the class's own.
    pub fn fields(self) -> impl Iterator<Item = &'static FieldSpec> {
        let top_level: &'static [FieldSpec] = if self.is_top_level() && self != Self::Custom {
            identified::TOP_LEVEL_FIELDS
        } else {
            &[]
        };
        identified::FIELDS
            .iter()
            .chain(top_level)
            .chain(self.own_fields())
    }

    /// Looks up the declared field for a property URI.
    #[must_use]
    pub fn field(self, uri: &str) -> Option<&'static FieldSpec> {
        self.fields().find(|field| field.uri == uri)
    }

    fn own_fields(self) -> &'static [FieldSpec] {
        match self {
            Self::ComponentDefinition => classes::ComponentDefinition::FIELDS,
            Self::Component => classes::Component::FIELDS,
            Self::SequenceAnnotation => classes::SequenceAnnotation::FIELDS,
            Self::SequenceConstraint => classes::SequenceConstraint::FIELDS,
            Self::Range => classes::Range::FIELDS,
            Self::Cut => classes::Cut::FIELDS,
            Self::GenericLocation | Self::Location => classes::Location::FIELDS,
            Self::Sequence => classes::Sequence::FIELDS,
            Self::ModuleDefinition => classes::ModuleDefinition::FIELDS,
            Self::Module => classes::Module::FIELDS,
            Self::FunctionalComponent => classes::FunctionalComponent::FIELDS,
            Self::Interaction => classes::Interaction::FIELDS,
            Self::Participation => classes::Participation::FIELDS,
            Self::MapsTo => classes::MapsTo::FIELDS,
            Self::Measurement => classes::Measurement::FIELDS,
            Self::Collection => classes::Collection::FIELDS,
            Self::Model => classes::Model::FIELDS,
            Self::Attachment => classes::Attachment::FIELDS,
            Self::Activity => classes::Activity::FIELDS,
            Self::Usage => classes::Usage::FIELDS,
            Self::Association => classes::Association::FIELDS,
            Self::Identified | Self::TopLevel | Self::Agent | Self::Plan | Self::Custom => &[],
        }
    }

    /// Values seeded into every new object of this class.
    #[must_use]
    pub fn defaults(self) -> &'static [Seed] {
        match self {
            Self::ComponentDefinition => COMPONENT_DEFINITION_DEFAULTS,
            Self::Component => COMPONENT_DEFAULTS,
            Self::FunctionalComponent => FUNCTIONAL_COMPONENT_DEFAULTS,
            Self::MapsTo => MAPS_TO_DEFAULTS,
            Self::Sequence => SEQUENCE_DEFAULTS,
            _ => &[],
        }
    }
}

const COMPONENT_DEFINITION_DEFAULTS: &[Seed] =
    &[Seed::reference(vocab::TYPE, vocab::types::DNA_REGION)];
const COMPONENT_DEFAULTS: &[Seed] = &[Seed::reference(vocab::ACCESS, vocab::ACCESS_PUBLIC)];
const FUNCTIONAL_COMPONENT_DEFAULTS: &[Seed] = &[
    Seed::reference(vocab::ACCESS, vocab::ACCESS_PUBLIC),
    Seed::reference(vocab::DIRECTION, vocab::DIRECTION_NONE),
];
const MAPS_TO_DEFAULTS: &[Seed] = &[Seed::reference(
    vocab::REFINEMENT,
    vocab::REFINEMENT_VERIFY_IDENTICAL,
)];
const SEQUENCE_DEFAULTS: &[Seed] = &[Seed::reference(vocab::ENCODING, vocab::ENCODING_IUPAC_DNA)];

impl Display for SbolClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A default property value applied at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed {
    pub property: &'static str,
    pub value: &'static str,
    pub reference: bool,
}

impl Seed {
    #[must_use]
    pub const fn reference(property: &'static str, value: &'static str) -> Self {
        Self {
            property,
            value,
            reference: true,
        }
    }

    #[must_use]
    pub const fn literal(property: &'static str, value: &'static str) -> Self {
        Self {
            property,
            value,
            reference: false,
        }
    }

    pub(crate) fn to_value(self) -> PropertyValue {
        if self.reference {
            PropertyValue::Reference(self.value.to_string())
        } else {
            PropertyValue::Literal(self.value.to_string())
        }
    }
}

/// Compile-time handle for one SBOL class.
///
/// Implemented by the zero-sized markers in [`crate::classes`]; used to type
/// descriptors and document lookups.
pub trait SbolType {
    const CLASS: SbolClass;

    /// Whether an object of `class` can stand where this type is expected.
    fn accepts(class: SbolClass) -> bool {
        class.is_a(Self::CLASS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_uris_round_trip_for_concrete_classes() {
        for class in SbolClass::CONCRETE {
            let uri = class.type_uri().expect("concrete class has a type");
            assert_eq!(SbolClass::from_type_uri(uri), *class);
        }
    }

    #[test]
    fn unknown_types_become_custom() {
        assert_eq!(
            SbolClass::from_type_uri("http://igem.org/Annotation"),
            SbolClass::Custom
        );
        assert!(SbolClass::Custom.is_top_level());
    }

    #[test]
    fn hierarchy_follows_abstract_classes() {
        assert!(SbolClass::Range.is_a(SbolClass::Location));
        assert!(SbolClass::Cut.is_a(SbolClass::Identified));
        assert!(!SbolClass::Range.is_a(SbolClass::TopLevel));
        assert!(SbolClass::Sequence.is_a(SbolClass::TopLevel));
        assert!(!SbolClass::Component.is_top_level());
        assert!(!SbolClass::ComponentDefinition.is_a(SbolClass::Component));
    }

    #[test]
    fn fields_include_the_identified_base() {
        let display_id = SbolClass::Range
            .field(vocab::DISPLAY_ID)
            .expect("displayId is declared everywhere");
        assert!(!display_id.cardinality.is_required());
        assert!(SbolClass::Range.field(vocab::START).is_some());
        assert!(SbolClass::Range.field(vocab::ATTACHMENT).is_none());
        assert!(SbolClass::Sequence.field(vocab::ATTACHMENT).is_some());
    }
}
