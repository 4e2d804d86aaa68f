use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;

use crate::{
    config::Config,
    model::{
        identity, Cardinality, Children, FieldSpec, Identified, SbolClass, SbolObject, SbolType,
        Shape,
    },
    Error, Result,
};

/// Declares a collection of child objects of class `T`.
pub struct OwnedDef<T> {
    pub uri: &'static str,
    pub cardinality: Cardinality,
    class: PhantomData<fn() -> T>,
}

impl<T> Clone for OwnedDef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for OwnedDef<T> {}

impl<T> Debug for OwnedDef<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedDef")
            .field("uri", &self.uri)
            .field("cardinality", &self.cardinality)
            .finish()
    }
}

impl<T> OwnedDef<T> {
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
    pub const fn many(uri: &'static str) -> Self {
        Self::new(uri, Cardinality::OptionalMany)
    }

    #[must_use]
    pub const fn required_many(uri: &'static str) -> Self {
        Self::new(uri, Cardinality::RequiredMany)
    }
}

impl<T: SbolType> OwnedDef<T> {
    #[must_use]
    pub const fn field(self) -> FieldSpec {
        FieldSpec {
            uri: self.uri,
            cardinality: self.cardinality,
            shape: Shape::Owned(T::CLASS),
        }
    }
}

/// Mutable view of one owned collection.
///
/// Children are keyed by identity; lookups also accept a displayId, which
/// is expanded the way compliant child identities are minted.
pub struct OwnedObject<'a, T> {
    owner: &'a mut SbolObject,
    def: OwnedDef<T>,
}

impl<'a, T: SbolType> OwnedObject<'a, T> {
    pub(crate) fn new(owner: &'a mut SbolObject, def: OwnedDef<T>) -> Self {
        Self { owner, def }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owner
            .collection(self.def.uri)
            .map_or(0, |collection| collection.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_ok()
    }

    #[must_use]
    pub fn iter(&self) -> Children<'_> {
        self.owner.children(self.def)
    }

    /// # Errors
    ///
    /// `NotFound` when no child matches `key`.
    pub fn get(&self, key: &str) -> Result<&SbolObject> {
        self.owner.child(self.def, key)
    }

    /// # Errors
    ///
    /// `NotFound` when no child matches `key`.
    pub fn get_mut(self, key: &str) -> Result<&'a mut SbolObject> {
        self.declared()?;
        let identity = self.owner.child_key(self.def.uri, key);
        self.owner
            .collection_mut(self.def.uri)
            .and_then(|collection| collection.get_mut(&identity))
            .ok_or_else(|| Error::not_found("child", key))
    }

    /// Constructs a child of class `T` with its identity minted under the
    /// owner, and attaches it.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `T` is abstract or not declared on the
    /// owner's class, `InvalidFormat` for a bad displayId, `DuplicateUri`
    /// when the identity is taken and `Cardinality` when a single-valued
    /// collection is already full.
    pub fn create(self, config: &Config, id: &str) -> Result<&'a mut SbolObject> {
        self.build(config, T::CLASS, id, |_| Ok(()))
    }

    /// Like [`OwnedObject::create`], running `init` on the child before it
    /// is attached. The owner is left untouched when `init` fails.
    ///
    /// # Errors
    ///
    /// As `create`, or whatever `init` returns.
    pub fn create_with<F>(self, config: &Config, id: &str, init: F) -> Result<&'a mut SbolObject>
    where
        F: FnOnce(&mut SbolObject) -> Result<()>,
    {
        self.build(config, T::CLASS, id, init)
    }

    /// Like [`OwnedObject::create`] for a concrete subclass `U` of `T`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when `U` is not a `T`; otherwise as `create`.
    pub fn create_as<U: SbolType>(self, config: &Config, id: &str) -> Result<&'a mut SbolObject> {
        self.create_as_with::<U, _>(config, id, |_| Ok(()))
    }

    /// [`OwnedObject::create_as`] with an initializer, as in
    /// [`OwnedObject::create_with`].
    ///
    /// # Errors
    ///
    /// As `create_as`, or whatever `init` returns.
    pub fn create_as_with<U: SbolType, F>(
        self,
        config: &Config,
        id: &str,
        init: F,
    ) -> Result<&'a mut SbolObject>
    where
        F: FnOnce(&mut SbolObject) -> Result<()>,
    {
        if !T::accepts(U::CLASS) {
            return Err(Error::TypeMismatch {
                uri: id.to_string(),
                expected: T::CLASS,
                found: U::CLASS,
            });
        }
        self.build(config, U::CLASS, id, init)
    }

    fn build<F>(self, config: &Config, class: SbolClass, id: &str, init: F) -> Result<&'a mut SbolObject>
    where
        F: FnOnce(&mut SbolObject) -> Result<()>,
    {
        self.declared()?;
        let type_uri = class.type_uri().ok_or_else(|| {
            Error::InvalidArgument(format!("cannot instantiate abstract class {class}"))
        })?;
        self.check_capacity()?;
        let minted = identity::child(config, self.owner, id)?;
        let mut child = SbolObject::minted(class, type_uri.to_string(), minted);
        init(&mut child)?;
        self.owner.insert_child(self.def.uri, child)
    }

    /// Attaches an existing unowned object.
    ///
    /// In compliant mode the object and its subtree are re-identified under
    /// the owner, and references inside the subtree follow.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for an object of another class, `InvalidArgument`
    /// when it already has an owner, `DuplicateUri` when two objects of the
    /// subtree would share an identity, plus the `create` failures.
    pub fn add(self, config: &Config, object: SbolObject) -> Result<&'a mut SbolObject> {
        self.declared()?;
        if !T::accepts(object.class()) || object.class().is_top_level() {
            return Err(Error::TypeMismatch {
                uri: object.identity().to_string(),
                expected: T::CLASS,
                found: object.class(),
            });
        }
        if let Some(parent) = object.parent() {
            return Err(Error::InvalidArgument(format!(
                "`{}` is already owned by `{parent}`; remove it first",
                object.identity()
            )));
        }
        self.check_capacity()?;
        let object = if config.sbol_compliant_uris {
            identity::rebase(object, self.owner)?
        } else {
            object
        };
        self.owner.insert_child(self.def.uri, object)
    }

    /// Detaches a child and returns it unowned.
    ///
    /// # Errors
    ///
    /// `NotFound` when no child matches `key`.
    pub fn remove(&mut self, key: &str) -> Result<SbolObject> {
        self.declared()?;
        let identity = self.owner.child_key(self.def.uri, key);
        self.owner
            .take_child(self.def.uri, &identity)
            .ok_or_else(|| Error::not_found("child", key))
    }

    fn declared(&self) -> Result<()> {
        self.owner.check_declared(self.def.field())
    }

    fn check_capacity(&self) -> Result<()> {
        if !self.def.cardinality.is_many() && !self.is_empty() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "single-valued collection already holds a child",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classes::{ComponentDefinition, Cut, Location, Range, SequenceAnnotation};

    fn config() -> Config {
        Config::default().with_homespace("http://sys-bio.org")
    }

    fn annotated() -> SbolObject {
        let config = config();
        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        part.owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create(&config, "anno")
            .expect("annotation");
        part
    }

    #[test]
    fn create_mints_child_identity_under_the_owner() {
        let part = annotated();
        let child = part
            .child(ComponentDefinition::SEQUENCE_ANNOTATIONS, "anno")
            .expect("lookup by displayId");
        assert_eq!(child.identity(), "http://sys-bio.org/B0032/anno/1.0.0");
        assert_eq!(
            child.persistent_identity(),
            Some("http://sys-bio.org/B0032/anno")
        );
        assert_eq!(child.parent(), Some("http://sys-bio.org/B0032/1.0.0"));
    }

    #[test]
    fn duplicate_child_is_rejected() {
        let mut part = annotated();
        let err = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create(&config(), "anno")
            .expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateUri { .. }));
        assert_eq!(
            part.children(ComponentDefinition::SEQUENCE_ANNOTATIONS).count(),
            1
        );
    }

    #[test]
    fn abstract_location_needs_a_concrete_subclass() {
        let config = config();
        let mut part = annotated();
        let annotation = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .get_mut("anno")
            .expect("annotation");
        let err = annotation
            .owned(SequenceAnnotation::LOCATIONS)
            .create(&config, "loc")
            .expect_err("abstract");
        assert!(matches!(err, Error::InvalidArgument(_)));

        let cut = annotation
            .owned(SequenceAnnotation::LOCATIONS)
            .create_as::<Cut>(&config, "cut")
            .expect("concrete location");
        assert_eq!(cut.class(), SbolClass::Cut);
    }

    #[test]
    fn create_as_rejects_unrelated_classes() {
        let config = config();
        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        let err = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create_as::<Range>(&config, "range")
            .expect_err("not an annotation");
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn remove_detaches_and_clears_the_parent() {
        let mut part = annotated();
        let removed = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .remove("anno")
            .expect("removed");
        assert_eq!(removed.parent(), None);
        assert!(part.owned(ComponentDefinition::SEQUENCE_ANNOTATIONS).is_empty());
        assert_eq!(part.owned_collections().count(), 0);
    }

    #[test]
    fn add_rejects_objects_with_another_owner() {
        let config = config();
        let mut first = annotated();
        let mut second = ComponentDefinition::new(&config, "B0034").expect("part");
        let attached = first
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .get("anno")
            .expect("annotation")
            .clone();
        let err = second
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .add(&config, attached)
            .expect_err("already owned");
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn compliant_add_rebases_the_subtree() {
        let config = config();
        let mut first = annotated();
        let mut detached = first
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .remove("anno")
            .expect("removed");
        SequenceAnnotation::add_range(&mut detached, &config, "range", 1, 4).expect("range");

        let mut second = ComponentDefinition::new(&config, "B0034").expect("part");
        let moved = second
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .add(&config, detached)
            .expect("attached");
        assert_eq!(moved.identity(), "http://sys-bio.org/B0034/anno/1.0.0");
        let range = moved
            .child(SequenceAnnotation::LOCATIONS, "range")
            .expect("range follows");
        assert_eq!(range.identity(), "http://sys-bio.org/B0034/anno/range/1.0.0");
        assert_eq!(range.parent(), Some("http://sys-bio.org/B0034/anno/1.0.0"));
        assert!(Location::accepts(range.class()));
    }

    #[test]
    fn failed_initializer_leaves_the_owner_unchanged() {
        let config = config();
        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        let err = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create_with(&config, "anno", |annotation| {
                annotation
                    .property(SequenceAnnotation::ROLES)
                    .add("not a uri")
            })
            .expect_err("bad role");
        assert!(matches!(err, Error::InvalidFormat { .. }));
        assert!(part.owned(ComponentDefinition::SEQUENCE_ANNOTATIONS).is_empty());
        assert_eq!(part.owned_collections().count(), 0);
    }

    #[test]
    fn collections_of_other_classes_are_rejected() {
        let config = config();
        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        let err = part
            .owned(SequenceAnnotation::LOCATIONS)
            .create_as::<Range>(&config, "range")
            .expect_err("not declared on ComponentDefinition");
        assert!(matches!(err, Error::InvalidArgument(_)));
        assert_eq!(part.owned_collections().count(), 0);
    }
}
