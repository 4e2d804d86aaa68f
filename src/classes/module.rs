//! Functional classes: modules, interactions and measurements.

use crate::{
    classes::{AnyObject, ComponentDefinition},
    config::Config,
    model::{kind, FieldSpec, OwnedDef, PropertyDef, ReferencedDef, SbolObject, SbolType},
    vocab, Result,
};

sbol_class!(
    /// A functional design grouping interactions between components.
    ModuleDefinition => ModuleDefinition
);

impl ModuleDefinition {
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::ROLE);
    pub const MODULES: OwnedDef<Module> = OwnedDef::many(vocab::MODULE);
    pub const INTERACTIONS: OwnedDef<Interaction> = OwnedDef::many(vocab::INTERACTION);
    pub const FUNCTIONAL_COMPONENTS: OwnedDef<FunctionalComponent> =
        OwnedDef::many(vocab::FUNCTIONAL_COMPONENT);
    pub const MODELS: ReferencedDef<Model> = ReferencedDef::many(vocab::MODEL);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::ROLES.field(),
        Self::MODULES.field(),
        Self::INTERACTIONS.field(),
        Self::FUNCTIONAL_COMPONENTS.field(),
        Self::MODELS.field(),
    ];

    /// # Errors
    ///
    /// As [`SbolObject::new`].
    pub fn new(config: &Config, id: &str) -> Result<SbolObject> {
        SbolObject::new(config, Self::CLASS, id)
    }

    /// Creates a sub-module instantiating `instance_of`.
    ///
    /// # Errors
    ///
    /// As [`crate::model::OwnedObject::create`], or `InvalidFormat` for a
    /// malformed definition URI.
    pub fn add_module<'a>(
        definition: &'a mut SbolObject,
        config: &Config,
        id: &str,
        instance_of: &str,
    ) -> Result<&'a mut SbolObject> {
        definition
            .owned(Self::MODULES)
            .create_with(config, id, |module| {
                module.referenced(Module::DEFINITION).set(instance_of)
            })
    }

    /// Creates a functional component instantiating `instance_of`.
    ///
    /// # Errors
    ///
    /// As [`ModuleDefinition::add_module`].
    pub fn add_functional_component<'a>(
        definition: &'a mut SbolObject,
        config: &Config,
        id: &str,
        instance_of: &str,
    ) -> Result<&'a mut SbolObject> {
        definition
            .owned(Self::FUNCTIONAL_COMPONENTS)
            .create_with(config, id, |component| {
                component
                    .referenced(FunctionalComponent::DEFINITION)
                    .set(instance_of)
            })
    }
}

sbol_class!(
    /// An instance of a ModuleDefinition inside another one.
    Module => Module
);

impl Module {
    pub const DEFINITION: ReferencedDef<ModuleDefinition> =
        ReferencedDef::required(vocab::DEFINITION);
    pub const MAPS_TOS: OwnedDef<MapsTo> = OwnedDef::many(vocab::MAPS_TO);
    pub const MEASURES: OwnedDef<Measurement> = OwnedDef::many(vocab::MEASURE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::DEFINITION.field(),
        Self::MAPS_TOS.field(),
        Self::MEASURES.field(),
    ];
}

sbol_class!(
    /// A ComponentDefinition used inside a module, with an access level and
    /// a direction.
    FunctionalComponent => FunctionalComponent
);

impl FunctionalComponent {
    pub const DEFINITION: ReferencedDef<ComponentDefinition> =
        ReferencedDef::required(vocab::DEFINITION);
    pub const ACCESS: PropertyDef<kind::Uri> = PropertyDef::required(vocab::ACCESS);
    pub const DIRECTION: PropertyDef<kind::Uri> = PropertyDef::required(vocab::DIRECTION);
    pub const MAPS_TOS: OwnedDef<MapsTo> = OwnedDef::many(vocab::MAPS_TO);
    pub const MEASURES: OwnedDef<Measurement> = OwnedDef::many(vocab::MEASURE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::DEFINITION.field(),
        Self::ACCESS.field(),
        Self::DIRECTION.field(),
        Self::MAPS_TOS.field(),
        Self::MEASURES.field(),
    ];
}

sbol_class!(
    /// A biochemical process between functional components.
    Interaction => Interaction
);

impl Interaction {
    pub const TYPES: PropertyDef<kind::Uri> = PropertyDef::required_many(vocab::TYPE);
    pub const PARTICIPATIONS: OwnedDef<Participation> = OwnedDef::many(vocab::PARTICIPATION);
    pub const MEASURES: OwnedDef<Measurement> = OwnedDef::many(vocab::MEASURE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::TYPES.field(),
        Self::PARTICIPATIONS.field(),
        Self::MEASURES.field(),
    ];

    /// Creates an interaction of type `interaction_type` on a module.
    ///
    /// # Errors
    ///
    /// As [`crate::model::OwnedObject::create`], or `InvalidFormat` for a
    /// malformed type URI.
    pub fn create<'a>(
        definition: &'a mut SbolObject,
        config: &Config,
        id: &str,
        interaction_type: &str,
    ) -> Result<&'a mut SbolObject> {
        definition
            .owned(ModuleDefinition::INTERACTIONS)
            .create_with(config, id, |interaction| {
                interaction.property(Self::TYPES).set(interaction_type)
            })
    }

    /// Adds a participant playing `role`.
    ///
    /// # Errors
    ///
    /// As [`Interaction::create`].
    pub fn add_participation<'a>(
        interaction: &'a mut SbolObject,
        config: &Config,
        id: &str,
        participant: &str,
        role: &str,
    ) -> Result<&'a mut SbolObject> {
        interaction
            .owned(Self::PARTICIPATIONS)
            .create_with(config, id, |participation| {
                participation
                    .referenced(Participation::PARTICIPANT)
                    .set(participant)?;
                participation.property(Participation::ROLES).add(role)
            })
    }
}

sbol_class!(
    /// The role a functional component plays in an interaction.
    Participation => Participation
);

impl Participation {
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::ROLE);
    pub const PARTICIPANT: ReferencedDef<FunctionalComponent> =
        ReferencedDef::required(vocab::PARTICIPANT);
    pub const MEASURES: OwnedDef<Measurement> = OwnedDef::many(vocab::MEASURE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::ROLES.field(),
        Self::PARTICIPANT.field(),
        Self::MEASURES.field(),
    ];
}

sbol_class!(
    /// Identifies a local component with a remote one across a module
    /// boundary.
    MapsTo => MapsTo
);

impl MapsTo {
    pub const LOCAL: ReferencedDef<AnyObject> =
        ReferencedDef::required(vocab::LOCAL);
    pub const REMOTE: ReferencedDef<AnyObject> =
        ReferencedDef::required(vocab::REMOTE);
    pub const REFINEMENT: PropertyDef<kind::Uri> = PropertyDef::required(vocab::REFINEMENT);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::LOCAL.field(),
        Self::REMOTE.field(),
        Self::REFINEMENT.field(),
    ];
}

sbol_class!(
    /// A quantity with a unit (`om:Measure`).
    Measurement => Measurement
);

impl Measurement {
    pub const VALUE: PropertyDef<kind::Float> = PropertyDef::required(vocab::HAS_NUMERICAL_VALUE);
    pub const UNIT: PropertyDef<kind::Uri> = PropertyDef::required(vocab::HAS_UNIT);
    pub const TYPES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::TYPE);

    pub(crate) const FIELDS: &'static [FieldSpec] =
        &[Self::VALUE.field(), Self::UNIT.field(), Self::TYPES.field()];
}

sbol_class!(
    /// An external computational model of a module.
    Model => Model
);

impl Model {
    pub const SOURCE: PropertyDef<kind::Uri> = PropertyDef::required(vocab::SOURCE);
    pub const LANGUAGE: PropertyDef<kind::Uri> = PropertyDef::required(vocab::LANGUAGE);
    pub const FRAMEWORK: PropertyDef<kind::Uri> = PropertyDef::required(vocab::FRAMEWORK);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::SOURCE.field(),
        Self::LANGUAGE.field(),
        Self::FRAMEWORK.field(),
    ];

    /// # Errors
    ///
    /// As [`SbolObject::new`], or `InvalidFormat` for a malformed URI.
    pub fn new(
        config: &Config,
        id: &str,
        source: &str,
        language: &str,
        framework: &str,
    ) -> Result<SbolObject> {
        let mut model = SbolObject::new(config, Self::CLASS, id)?;
        model.property(Self::SOURCE).set(source)?;
        model.property(Self::LANGUAGE).set(language)?;
        model.property(Self::FRAMEWORK).set(framework)?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Identified, vocab::sbo, Error};

    fn config() -> Config {
        Config::default().with_homespace("http://sys-bio.org")
    }

    #[test]
    fn functional_component_defaults() {
        let config = config();
        let mut circuit = ModuleDefinition::new(&config, "toggle").expect("module");
        let tetr = ModuleDefinition::add_functional_component(
            &mut circuit,
            &config,
            "TetR",
            "http://sys-bio.org/TetR/1.0.0",
        )
        .expect("functional component");
        assert_eq!(
            tetr.value(FunctionalComponent::DIRECTION).expect("direction"),
            Some(vocab::DIRECTION_NONE.to_string())
        );
        assert_eq!(
            tetr.value(FunctionalComponent::ACCESS).expect("access"),
            Some(vocab::ACCESS_PUBLIC.to_string())
        );
    }

    #[test]
    fn interactions_collect_participations() {
        let config = config();
        let mut circuit = ModuleDefinition::new(&config, "toggle").expect("module");
        let interaction = Interaction::create(&mut circuit, &config, "repression", sbo::INHIBITION)
            .expect("interaction");
        Interaction::add_participation(
            interaction,
            &config,
            "inhibitor",
            "http://sys-bio.org/toggle/TetR/1.0.0",
            sbo::INHIBITOR,
        )
        .expect("participation");
        let participation = interaction
            .child(Interaction::PARTICIPATIONS, "inhibitor")
            .expect("participation");
        assert_eq!(
            participation.identity(),
            "http://sys-bio.org/toggle/repression/inhibitor/1.0.0"
        );
        assert_eq!(
            participation.values(Participation::ROLES).expect("roles"),
            vec![sbo::INHIBITOR.to_string()]
        );
    }

    #[test]
    fn measurement_value_must_be_numeric() {
        let config = config();
        let mut circuit = ModuleDefinition::new(&config, "toggle").expect("module");
        let interaction = Interaction::create(&mut circuit, &config, "repression", sbo::INHIBITION)
            .expect("interaction");
        let measure = interaction
            .owned(Interaction::MEASURES)
            .create(&config, "rate")
            .expect("measure");
        assert!(matches!(
            measure.property(Measurement::VALUE).set_str("fast"),
            Err(Error::InvalidFormat { .. })
        ));
        measure.property(Measurement::VALUE).set(0.25).expect("float");
        assert_eq!(measure.value(Measurement::VALUE).expect("read"), Some(0.25));
    }

    #[test]
    fn maps_to_defaults_to_verify_identical() {
        let config = config();
        let mut circuit = ModuleDefinition::new(&config, "toggle").expect("module");
        let module = ModuleDefinition::add_module(
            &mut circuit,
            &config,
            "sub",
            "http://sys-bio.org/inverter/1.0.0",
        )
        .expect("module");
        let maps_to = module
            .owned(Module::MAPS_TOS)
            .create(&config, "link")
            .expect("maps to");
        assert_eq!(
            maps_to.value(MapsTo::REFINEMENT).expect("refinement"),
            Some(vocab::REFINEMENT_VERIFY_IDENTICAL.to_string())
        );
    }

    #[test]
    fn rejected_definitions_leave_no_instance_behind() {
        let config = config();
        let mut circuit = ModuleDefinition::new(&config, "toggle").expect("module");

        let err = ModuleDefinition::add_module(&mut circuit, &config, "sub", "not a uri")
            .expect_err("malformed module definition");
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert!(circuit.owned(ModuleDefinition::MODULES).is_empty());

        let err = ModuleDefinition::add_functional_component(&mut circuit, &config, "TetR", "")
            .expect_err("empty definition");
        assert!(matches!(err, Error::Cardinality { .. }));
        assert!(circuit
            .owned(ModuleDefinition::FUNCTIONAL_COMPONENTS)
            .is_empty());

        let err = Interaction::create(&mut circuit, &config, "repression", "inhibition of TetR")
            .expect_err("malformed type");
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert!(circuit.owned(ModuleDefinition::INTERACTIONS).is_empty());
        assert_eq!(circuit.owned_collections().count(), 0);
    }

    #[test]
    fn rejected_participation_leaves_the_interaction_unchanged() {
        let config = config();
        let mut circuit = ModuleDefinition::new(&config, "toggle").expect("module");
        let interaction = Interaction::create(&mut circuit, &config, "repression", sbo::INHIBITION)
            .expect("interaction");

        let err = Interaction::add_participation(
            interaction,
            &config,
            "inhibitor",
            "not a uri",
            sbo::INHIBITOR,
        )
        .expect_err("malformed participant");
        assert!(matches!(err, Error::InvalidFormat { .. }));

        let err = Interaction::add_participation(
            interaction,
            &config,
            "inhibitor",
            "http://sys-bio.org/toggle/TetR/1.0.0",
            "the inhibitor",
        )
        .expect_err("malformed role");
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert!(interaction.owned(Interaction::PARTICIPATIONS).is_empty());
    }
}
