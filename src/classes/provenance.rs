//! PROV-O classes recording how designs were produced.

use crate::{
    config::Config,
    model::{kind, FieldSpec, OwnedDef, PropertyDef, ReferencedDef, SbolObject, SbolType},
    vocab, Result,
};

sbol_class!(
    /// A process that generated or changed objects (`prov:Activity`).
    Activity => Activity
);

impl Activity {
    pub const TYPES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::TYPE);
    pub const STARTED_AT_TIME: PropertyDef<kind::DateTime> =
        PropertyDef::optional(vocab::STARTED_AT_TIME);
    pub const ENDED_AT_TIME: PropertyDef<kind::DateTime> =
        PropertyDef::optional(vocab::ENDED_AT_TIME);
    pub const USAGES: OwnedDef<Usage> = OwnedDef::many(vocab::QUALIFIED_USAGE);
    pub const ASSOCIATIONS: OwnedDef<Association> = OwnedDef::many(vocab::QUALIFIED_ASSOCIATION);
    pub const WAS_INFORMED_BY: ReferencedDef<Activity> =
        ReferencedDef::many(vocab::WAS_INFORMED_BY);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::TYPES.field(),
        Self::STARTED_AT_TIME.field(),
        Self::ENDED_AT_TIME.field(),
        Self::USAGES.field(),
        Self::ASSOCIATIONS.field(),
        Self::WAS_INFORMED_BY.field(),
    ];

    /// # Errors
    ///
    /// As [`SbolObject::new`].
    pub fn new(config: &Config, id: &str) -> Result<SbolObject> {
        SbolObject::new(config, Self::CLASS, id)
    }
}

sbol_class!(
    /// A person, organisation or tool responsible for an activity.
    Agent => Agent
);

impl Agent {
    /// # Errors
    ///
    /// As [`SbolObject::new`].
    pub fn new(config: &Config, id: &str) -> Result<SbolObject> {
        SbolObject::new(config, Self::CLASS, id)
    }
}

sbol_class!(
    /// A protocol an agent followed.
    Plan => Plan
);

impl Plan {
    /// # Errors
    ///
    /// As [`SbolObject::new`].
    pub fn new(config: &Config, id: &str) -> Result<SbolObject> {
        SbolObject::new(config, Self::CLASS, id)
    }
}

sbol_class!(
    /// An entity consumed by an activity.
    Usage => Usage
);

impl Usage {
    pub const ENTITY: PropertyDef<kind::Uri> = PropertyDef::required(vocab::ENTITY);
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::HAD_ROLE);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[Self::ENTITY.field(), Self::ROLES.field()];
}

sbol_class!(
    /// Links an activity to the agent that carried it out.
    Association => Association
);

impl Association {
    pub const AGENT: ReferencedDef<Agent> = ReferencedDef::required(vocab::AGENT);
    pub const ROLES: PropertyDef<kind::Uri> = PropertyDef::many(vocab::HAD_ROLE);
    pub const PLAN: ReferencedDef<Plan> = ReferencedDef::optional(vocab::HAD_PLAN);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Self::AGENT.field(),
        Self::ROLES.field(),
        Self::PLAN.field(),
    ];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::Timestamp, Error};

    #[test]
    fn activity_timestamps_accept_three_iso_shapes() {
        let config = Config::default();
        let mut activity = Activity::new(&config, "assembly").expect("activity");
        activity
            .property(Activity::STARTED_AT_TIME)
            .set_str("2024-03-01")
            .expect("date");
        activity
            .property(Activity::ENDED_AT_TIME)
            .set_str("2024-03-01T17:45:00+01:00")
            .expect("offset date-time");
        assert!(matches!(
            activity.value(Activity::STARTED_AT_TIME),
            Ok(Some(Timestamp::Date(_)))
        ));

        let err = activity
            .property(Activity::ENDED_AT_TIME)
            .set_str("17:45")
            .expect_err("time only");
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert_eq!(
            activity.property_values(vocab::ENDED_AT_TIME)[0].as_str(),
            "2024-03-01T17:45:00+01:00"
        );
    }

    #[test]
    fn association_links_agent_and_plan() {
        let config = Config::default();
        let mut activity = Activity::new(&config, "assembly").expect("activity");
        let association = activity
            .owned(Activity::ASSOCIATIONS)
            .create(&config, "who")
            .expect("association");
        association
            .referenced(Association::AGENT)
            .set("http://examples.com/lab_robot/1.0.0")
            .expect("agent");
        association
            .referenced(Association::PLAN)
            .set("http://examples.com/golden_gate/1.0.0")
            .expect("plan");
        assert_eq!(
            association.references(Association::AGENT).first(),
            Some("http://examples.com/lab_robot/1.0.0")
        );
    }
}
