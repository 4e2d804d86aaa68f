use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::{
    model::{
        property::{check_value, kind},
        Cardinality, FieldSpec, Identified, PropertyValue, SbolObject, SbolType, Shape,
    },
    Document, Error, Result,
};

/// Declares a property whose values are URIs of other SBOL objects of
/// class `T`. Targets are resolved on demand, never checked on write.
pub struct ReferencedDef<T> {
    pub uri: &'static str,
    pub cardinality: Cardinality,
    class: PhantomData<fn() -> T>,
}

impl<T> Clone for ReferencedDef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ReferencedDef<T> {}

impl<T> Debug for ReferencedDef<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReferencedDef")
            .field("uri", &self.uri)
            .field("cardinality", &self.cardinality)
            .finish()
    }
}

impl<T> ReferencedDef<T> {
    #[must_use]
    pub const fn new(uri: &'static str, cardinality: Cardinality) -> Self {
        Self {
            uri,
            cardinality,
            class: PhantomData,
        }
    }

    #[must_use]
    pub const fn optional(uri: &'static str) -> Self {
        Self::new(uri, Cardinality::OptionalOne)
    }

    #[must_use]
    pub const fn required(uri: &'static str) -> Self {
        Self::new(uri, Cardinality::RequiredOne)
    }

    #[must_use]
    pub const fn many(uri: &'static str) -> Self {
        Self::new(uri, Cardinality::OptionalMany)
    }

    #[must_use]
    pub const fn required_many(uri: &'static str) -> Self {
        Self::new(uri, Cardinality::RequiredMany)
    }
}

impl<T: SbolType> ReferencedDef<T> {
    #[must_use]
    pub const fn field(self) -> FieldSpec {
        FieldSpec {
            uri: self.uri,
            cardinality: self.cardinality,
            shape: Shape::Reference(T::CLASS),
        }
    }
}

/// Read-only view of a reference property.
pub struct References<'a, T> {
    owner: &'a SbolObject,
    def: ReferencedDef<T>,
}

impl<'a, T> Clone for References<'a, T> {
    fn clone(&self) -> Self {
        Self {
            owner: self.owner,
            def: self.def,
        }
    }
}

impl<'a, T: SbolType> References<'a, T> {
    pub(crate) fn new(owner: &'a SbolObject, def: ReferencedDef<T>) -> Self {
        Self { owner, def }
    }

    #[must_use]
    pub fn first(&self) -> Option<&'a str> {
        self.owner
            .property_values(self.def.uri)
            .first()
            .map(PropertyValue::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> {
        self.owner
            .property_values(self.def.uri)
            .iter()
            .map(PropertyValue::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owner.property_values(self.def.uri).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up the first referenced object in `document`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the property is unset or the target is not
    /// registered; `TypeMismatch` when the target is not a `T`.
    pub fn resolve<'d>(&self, document: &'d Document) -> Result<&'d SbolObject> {
        let uri = self.first().ok_or_else(|| {
            Error::not_found(
                "reference",
                format!("{} on {}", self.def.uri, self.owner.identity()),
            )
        })?;
        document.get::<T>(uri)
    }

    /// Looks up every referenced object.
    ///
    /// # Errors
    ///
    /// As [`References::resolve`], for the first target that fails.
    pub fn resolve_all<'d>(&self, document: &'d Document) -> Result<Vec<&'d SbolObject>> {
        self.iter().map(|uri| document.get::<T>(uri)).collect()
    }
}

/// Mutable view of a reference property. Writes check that the owner's
/// class declares the property, URI syntax and cardinality; targets are
/// not resolved.
pub struct ReferencedObject<'a, T> {
    owner: &'a mut SbolObject,
    def: ReferencedDef<T>,
}

impl<'a, T: SbolType> ReferencedObject<'a, T> {
    pub(crate) fn new(owner: &'a mut SbolObject, def: ReferencedDef<T>) -> Self {
        Self { owner, def }
    }

    fn view(&self) -> References<'_, T> {
        References::new(self.owner, self.def)
    }

    #[must_use]
    pub fn get(&self) -> Option<&str> {
        self.view().first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.view().iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.view().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Errors
    ///
    /// As [`References::resolve`].
    pub fn resolve<'d>(&self, document: &'d Document) -> Result<&'d SbolObject> {
        self.view().resolve(document)
    }

    /// Replaces the reference.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the owner's class does not declare the
    /// property, `InvalidFormat` for a malformed URI, `Cardinality` when a
    /// many-valued property already holds several references.
    pub fn set(&mut self, uri: &str) -> Result<()> {
        self.declared()?;
        let value = self.check(uri)?;
        let count = self.len();
        if count > 1 {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                format!("holds {count} references; use `add` or `remove`"),
            ));
        }
        self.owner.store_mut().replace(self.def.uri, vec![value]);
        Ok(())
    }

    /// Appends a reference.
    ///
    /// # Errors
    ///
    /// `Cardinality` on a single-valued property, `InvalidFormat` for a
    /// malformed URI.
    pub fn add(&mut self, uri: &str) -> Result<()> {
        self.declared()?;
        if !self.def.cardinality.is_many() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "single-valued reference; use `set`",
            ));
        }
        let value = self.check(uri)?;
        self.owner.store_mut().push(self.def.uri, value);
        Ok(())
    }

    /// Removes the reference at `index` and returns its URI.
    ///
    /// # Errors
    ///
    /// `NotFound` for an index out of range, `Cardinality` when removing
    /// the only value of a required reference.
    pub fn remove(&mut self, index: usize) -> Result<String> {
        self.declared()?;
        let count = self.len();
        if count == 1 && index == 0 && self.def.cardinality.is_required() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "cannot remove the only value of a required reference",
            ));
        }
        self.owner
            .store_mut()
            .remove_at(self.def.uri, index)
            .map(|value| value.as_str().to_string())
            .ok_or_else(|| {
                Error::not_found("reference index", format!("{}[{index}]", self.def.uri))
            })
    }

    /// # Errors
    ///
    /// `Cardinality` on a required reference that is set.
    pub fn clear(&mut self) -> Result<()> {
        self.declared()?;
        if self.def.cardinality.is_required() && !self.is_empty() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "cannot clear a required reference",
            ));
        }
        self.owner.store_mut().replace(self.def.uri, Vec::new());
        Ok(())
    }

    fn declared(&self) -> Result<()> {
        self.owner.check_declared(self.def.field())
    }

    fn check(&self, uri: &str) -> Result<PropertyValue> {
        check_value::<kind::Uri>(self.owner.identity(), self.def.uri, self.def.cardinality, uri)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classes::{Component, ComponentDefinition, Sequence},
        Config,
    };

    fn config() -> Config {
        Config::default().with_homespace("http://sys-bio.org")
    }

    #[test]
    fn references_are_not_checked_on_write() {
        let mut part = ComponentDefinition::new(&config(), "B0032").expect("part");
        part.referenced(ComponentDefinition::SEQUENCES)
            .add("http://sys-bio.org/missing/1.0.0")
            .expect("dangling reference is allowed");
        assert_eq!(part.references(ComponentDefinition::SEQUENCES).len(), 1);
    }

    #[test]
    fn malformed_reference_is_rejected() {
        let mut part = ComponentDefinition::new(&config(), "B0032").expect("part");
        let err = part
            .referenced(ComponentDefinition::SEQUENCES)
            .add("no spaces allowed")
            .expect_err("malformed");
        assert!(matches!(err, Error::InvalidFormat { .. }));
    }

    #[test]
    fn resolve_checks_registration_and_class() {
        let config = config();
        let mut document = Document::new(config.clone());
        let sequence = Sequence::new(&config, "seq", "atgc").expect("sequence");
        let sequence_uri = sequence.identity().to_string();
        document.add(sequence).expect("registered");

        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        part.referenced(ComponentDefinition::SEQUENCES)
            .add(&sequence_uri)
            .expect("reference");
        let resolved = part
            .references(ComponentDefinition::SEQUENCES)
            .resolve(&document)
            .expect("resolved");
        assert_eq!(resolved.identity(), sequence_uri);

        let component = part
            .owned(ComponentDefinition::COMPONENTS)
            .create(&config, "sub")
            .expect("component");
        component
            .referenced(Component::DEFINITION)
            .set(&sequence_uri)
            .expect("syntax only");
        let err = component
            .references(Component::DEFINITION)
            .resolve(&document)
            .expect_err("wrong class");
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn required_reference_keeps_its_last_value() {
        let config = config();
        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        let component = part
            .owned(ComponentDefinition::COMPONENTS)
            .create(&config, "sub")
            .expect("component");
        let mut definition = component.referenced(Component::DEFINITION);
        definition.set("http://sys-bio.org/B0034/1.0.0").expect("set");
        assert!(matches!(definition.clear(), Err(Error::Cardinality { .. })));
        assert!(matches!(definition.remove(0), Err(Error::Cardinality { .. })));
        assert!(matches!(definition.remove(4), Err(Error::NotFound { .. })));
    }

    #[test]
    fn references_of_other_classes_are_rejected() {
        let mut sequence = Sequence::new(&config(), "seq", "atg").expect("sequence");
        let err = sequence
            .referenced(Component::DEFINITION)
            .set("http://sys-bio.org/B0032/1.0.0")
            .expect_err("not declared on Sequence");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert!(sequence.references(Component::DEFINITION).is_empty());
    }
}
