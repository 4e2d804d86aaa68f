use std::collections::{BTreeMap, HashMap};

use crate::{
    config::Config,
    io::split_uri,
    model::{
        identity,
        owned::{OwnedDef, OwnedObject},
        property::{self, FieldSpec, Property, PropertyDef, Shape, ValueKind},
        referenced::{ReferencedDef, ReferencedObject, References},
        value_objects::Iri,
        SbolClass, SbolType,
    },
    validation::RuleSet,
    vocab, Error, Result,
};

/// A stored property value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PropertyValue {
    /// Element text.
    Literal(String),
    /// A URI serialized as `rdf:resource`.
    Reference(String),
}

impl PropertyValue {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(value) | Self::Reference(value) => value,
        }
    }

    #[must_use]
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }
}

/// Ordered multimap from property URI to values. Keys iterate in URI
/// order, values in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyStore {
    entries: BTreeMap<String, Vec<PropertyValue>>,
}

impl PropertyStore {
    #[must_use]
    pub fn get(&self, uri: &str) -> &[PropertyValue] {
        self.entries.get(uri).map_or(&[], Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PropertyValue])> {
        self.entries
            .iter()
            .map(|(uri, values)| (uri.as_str(), values.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replaces all values; an empty list drops the key.
    pub(crate) fn replace(&mut self, uri: &str, values: Vec<PropertyValue>) {
        if values.is_empty() {
            self.entries.remove(uri);
        } else {
            self.entries.insert(uri.to_string(), values);
        }
    }

    pub(crate) fn push(&mut self, uri: &str, value: PropertyValue) {
        self.entries.entry(uri.to_string()).or_default().push(value);
    }

    pub(crate) fn remove_at(&mut self, uri: &str, index: usize) -> Option<PropertyValue> {
        let values = self.entries.get_mut(uri)?;
        if index >= values.len() {
            return None;
        }
        let removed = values.remove(index);
        if values.is_empty() {
            self.entries.remove(uri);
        }
        Some(removed)
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut PropertyValue> {
        self.entries.values_mut().flatten()
    }
}

/// Children owned under one property, keyed by identity and iterated in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct OwnedCollection {
    order: Vec<String>,
    items: HashMap<String, SbolObject>,
}

impl OwnedCollection {
    pub(crate) fn get(&self, identity: &str) -> Option<&SbolObject> {
        self.items.get(identity)
    }

    pub(crate) fn get_mut(&mut self, identity: &str) -> Option<&mut SbolObject> {
        self.items.get_mut(identity)
    }

    pub(crate) fn contains(&self, identity: &str) -> bool {
        self.items.contains_key(identity)
    }

    pub(crate) fn len(&self) -> usize {
        self.order.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub(crate) fn insert(&mut self, child: SbolObject) -> Result<&mut SbolObject> {
        if self.items.contains_key(child.identity()) {
            return Err(Error::duplicate(child.identity()));
        }
        let identity = child.identity().to_string();
        self.order.push(identity.clone());
        Ok(self.items.entry(identity).or_insert(child))
    }

    pub(crate) fn remove(&mut self, identity: &str) -> Option<SbolObject> {
        let child = self.items.remove(identity)?;
        self.order.retain(|id| id != identity);
        Some(child)
    }

    pub(crate) fn into_children(self) -> impl Iterator<Item = SbolObject> {
        let mut items = self.items;
        self.order
            .into_iter()
            .filter_map(move |identity| items.remove(&identity))
    }

    pub(crate) fn iter(&self) -> Children<'_> {
        Children {
            order: self.order.iter(),
            items: Some(&self.items),
        }
    }
}

/// Children of one owned collection in insertion order.
#[derive(Clone, Debug)]
pub struct Children<'a> {
    order: std::slice::Iter<'a, String>,
    items: Option<&'a HashMap<String, SbolObject>>,
}

impl<'a> Children<'a> {
    pub(crate) fn empty() -> Self {
        Self {
            order: [].iter(),
            items: None,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a SbolObject;

    fn next(&mut self) -> Option<Self::Item> {
        let items = self.items?;
        self.order.find_map(|identity| items.get(identity))
    }
}

/// Pre-order walk over an object and everything it owns.
#[derive(Clone, Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a SbolObject>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a SbolObject;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        let children: Vec<&SbolObject> = next
            .owned
            .values()
            .flat_map(OwnedCollection::iter)
            .collect();
        self.stack.extend(children.into_iter().rev());
        Some(next)
    }
}

/// One SBOL entity: identity, class tag, properties and owned children.
///
/// The parent is kept as the owner's identity, never as a pointer; it is
/// set when the object is attached and cleared when it is detached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SbolObject {
    class: SbolClass,
    type_uri: String,
    identity: String,
    parent: Option<String>,
    properties: PropertyStore,
    owned: BTreeMap<String, OwnedCollection>,
}

impl SbolObject {
    /// Creates an unowned object of a concrete class with defaults applied.
    ///
    /// In compliant mode `id` is a displayId and the identity is minted from
    /// the configured namespace and version; otherwise `id` is the full
    /// identity URI.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for abstract classes, `InvalidFormat` for a
    /// malformed displayId or URI.
    pub fn new(config: &Config, class: SbolClass, id: &str) -> Result<Self> {
        let type_uri = class.type_uri().ok_or_else(|| {
            Error::InvalidArgument(format!("cannot instantiate abstract class {class}"))
        })?;
        let minted = identity::top_level(config, class, id)?;
        Ok(Self::minted(class, type_uri.to_string(), minted))
    }

    /// Creates an extension object carrying its own RDF type.
    ///
    /// A type URI of the fixed vocabulary yields that class instead.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` when `type_uri` is not an absolute IRI ending in an
    /// XML name, otherwise as [`SbolObject::new`].
    pub fn extension(config: &Config, type_uri: &str, id: &str) -> Result<Self> {
        let type_uri = element_uri("rdf:type", type_uri)?;
        let class = SbolClass::from_type_uri(&type_uri);
        let minted = identity::top_level(config, class, id)?;
        Ok(Self::minted(class, type_uri, minted))
    }

    pub(crate) fn minted(class: SbolClass, type_uri: String, minted: identity::Minted) -> Self {
        let mut object = Self::bare(class, type_uri, minted.identity.clone());
        minted.seed(&mut object.properties);
        for seed in class.defaults() {
            object.properties.push(seed.property, seed.to_value());
        }
        object
    }

    /// An object with nothing but its identity, as read from the wire.
    pub(crate) fn bare(class: SbolClass, type_uri: String, identity: String) -> Self {
        Self {
            class,
            type_uri,
            identity,
            parent: None,
            properties: PropertyStore::default(),
            owned: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn type_uri(&self) -> &str {
        &self.type_uri
    }

    /// Identity of the owning object, if attached.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    #[must_use]
    pub fn properties(&self) -> &PropertyStore {
        &self.properties
    }

    #[must_use]
    pub fn property_values(&self, uri: &str) -> &[PropertyValue] {
        self.properties.get(uri)
    }

    /// Mutable accessor for a declared property.
    pub fn property<K: ValueKind>(&mut self, def: PropertyDef<K>) -> Property<'_, K> {
        Property::new(self, def)
    }

    /// First value of a declared property.
    ///
    /// # Errors
    ///
    /// As [`Property::get`].
    pub fn value<K: ValueKind>(&self, def: PropertyDef<K>) -> Result<Option<K::Value>> {
        property::first(self, def)
    }

    /// Every value of a declared property.
    ///
    /// # Errors
    ///
    /// As [`Property::values`].
    pub fn values<K: ValueKind>(&self, def: PropertyDef<K>) -> Result<Vec<K::Value>> {
        property::all(self, def)
    }

    /// Mutable accessor for an owned collection.
    pub fn owned<T: SbolType>(&mut self, def: OwnedDef<T>) -> OwnedObject<'_, T> {
        OwnedObject::new(self, def)
    }

    /// Children held under an owned collection.
    pub fn children<T: SbolType>(&self, def: OwnedDef<T>) -> Children<'_> {
        self.collection(def.uri)
            .map_or_else(Children::empty, OwnedCollection::iter)
    }

    /// Looks up one child by identity or, in compliant mode, by displayId.
    ///
    /// # Errors
    ///
    /// `NotFound` when no child matches, `InvalidArgument` when the class
    /// does not declare the collection.
    pub fn child<T: SbolType>(&self, def: OwnedDef<T>, key: &str) -> Result<&SbolObject> {
        self.check_declared(def.field())?;
        let identity = self.child_key(def.uri, key);
        self.collection(def.uri)
            .and_then(|collection| collection.get(&identity))
            .ok_or_else(|| Error::not_found("child", key))
    }

    /// Mutable accessor for a reference property.
    pub fn referenced<T: SbolType>(&mut self, def: ReferencedDef<T>) -> ReferencedObject<'_, T> {
        ReferencedObject::new(self, def)
    }

    /// Read-only view of a reference property.
    pub fn references<T: SbolType>(&self, def: ReferencedDef<T>) -> References<'_, T> {
        References::new(self, def)
    }

    /// Owned collections in property-URI order.
    pub fn owned_collections(&self) -> impl Iterator<Item = (&str, Children<'_>)> {
        self.owned
            .iter()
            .map(|(uri, collection)| (uri.as_str(), collection.iter()))
    }

    /// This object followed by everything it owns, pre-order.
    #[must_use]
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// Appends a value under a property the class does not declare.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `property` is declared (use its typed
    /// accessor), `InvalidFormat` when it is not a URI ending in an XML name
    /// or the value breaks a local rule.
    pub fn annotate(&mut self, property: &str, value: PropertyValue) -> Result<()> {
        self.check_annotation(property)?;
        if value.is_reference() {
            crate::model::value_objects::check_uri(value.as_str())
                .map_err(|expected| Error::invalid_format(property, value.as_str(), expected))?;
        }
        RuleSet::sbol().check_value(property, value.as_str())?;
        self.properties.push(property, value);
        Ok(())
    }

    /// Removes every value of an undeclared property.
    ///
    /// # Errors
    ///
    /// As [`SbolObject::annotate`].
    pub fn clear_annotation(&mut self, property: &str) -> Result<()> {
        self.check_annotation(property)?;
        self.properties.replace(property, Vec::new());
        Ok(())
    }

    /// Nests an extension object under a property the class does not
    /// declare.
    ///
    /// # Errors
    ///
    /// As [`SbolObject::annotate`]; `InvalidArgument` when `object` is
    /// already owned, `DuplicateUri` when the identity is taken.
    pub fn attach_annotation(
        &mut self,
        property: &str,
        mut object: SbolObject,
    ) -> Result<&mut SbolObject> {
        self.check_annotation(property)?;
        if let Some(parent) = object.parent() {
            return Err(Error::InvalidArgument(format!(
                "`{}` is already owned by `{parent}`",
                object.identity
            )));
        }
        object.parent = Some(self.identity.clone());
        self.owned.entry(property.to_string()).or_default().insert(object)
    }

    fn check_annotation(&self, property: &str) -> Result<()> {
        element_uri("property", property)?;
        if self.class.field(property).is_some() {
            return Err(Error::InvalidArgument(format!(
                "`{property}` is a declared property of {}; use its typed accessor",
                self.class
            )));
        }
        Ok(())
    }

    pub(crate) fn store_mut(&mut self) -> &mut PropertyStore {
        &mut self.properties
    }

    /// Rewrites identity-bearing state after a rebase or copy.
    pub(crate) fn rename(&mut self, identity: String) {
        self.identity = identity;
    }

    pub(crate) fn owned_mut(&mut self) -> &mut BTreeMap<String, OwnedCollection> {
        &mut self.owned
    }

    pub(crate) fn take_owned(&mut self) -> BTreeMap<String, OwnedCollection> {
        std::mem::take(&mut self.owned)
    }

    /// Fails unless this object's class declares `field` exactly;
    /// extension objects accept any descriptor.
    pub(crate) fn check_declared(&self, field: FieldSpec) -> Result<()> {
        if self.class == SbolClass::Custom || self.class.field(field.uri) == Some(&field) {
            return Ok(());
        }
        Err(Error::InvalidArgument(format!(
            "`{}` is not declared on {}",
            field.uri, self.class
        )))
    }

    pub(crate) fn set_parent(&mut self, parent: Option<String>) {
        self.parent = parent;
    }

    pub(crate) fn collection(&self, uri: &str) -> Option<&OwnedCollection> {
        self.owned.get(uri)
    }

    pub(crate) fn collection_mut(&mut self, uri: &str) -> Option<&mut OwnedCollection> {
        self.owned.get_mut(uri)
    }

    /// Attaches a child under `uri`, creating the collection on first use.
    pub(crate) fn insert_child(&mut self, uri: &str, mut child: SbolObject) -> Result<&mut SbolObject> {
        child.parent = Some(self.identity.clone());
        self.owned.entry(uri.to_string()).or_default().insert(child)
    }

    /// Detaches a child; empty collections are dropped.
    pub(crate) fn take_child(&mut self, uri: &str, identity: &str) -> Option<SbolObject> {
        let collection = self.owned.get_mut(uri)?;
        let mut child = collection.remove(identity)?;
        if collection.is_empty() {
            self.owned.remove(uri);
        }
        child.parent = None;
        Some(child)
    }

    /// Resolves a child key: an identity as is, or a displayId expanded the
    /// way compliant child identities are minted.
    pub(crate) fn child_key(&self, uri: &str, key: &str) -> String {
        let known = self
            .collection(uri)
            .is_some_and(|collection| collection.contains(key));
        if known {
            return key.to_string();
        }
        identity::child_identity(self, key)
    }

    /// Count of values or children for a declared field.
    pub(crate) fn field_count(&self, uri: &str, shape: Shape) -> usize {
        match shape {
            Shape::Owned(_) => self.collection(uri).map_or(0, OwnedCollection::len),
            Shape::Literal | Shape::Uri | Shape::Reference(_) => self.property_values(uri).len(),
        }
    }

    fn first_str(&self, uri: &str) -> Option<&str> {
        self.properties.get(uri).first().map(PropertyValue::as_str)
    }

    fn all_str(&self, uri: &str) -> Vec<&str> {
        self.properties
            .get(uri)
            .iter()
            .map(PropertyValue::as_str)
            .collect()
    }
}

/// Checks a URI that will be written as an element name: an absolute IRI
/// whose local part is an XML name.
fn element_uri(what: &str, uri: &str) -> Result<String> {
    const EXPECTED: &str = "an absolute IRI ending in an XML name";
    let iri = Iri::new(uri).map_err(|_| Error::invalid_format(what, uri, EXPECTED))?;
    if split_uri(uri).is_none() {
        return Err(Error::invalid_format(what, uri, EXPECTED));
    }
    Ok(iri.into_string())
}

/// Identity, naming and provenance shared by every SBOL object.
pub trait Identified {
    fn identity(&self) -> &str;

    fn class(&self) -> SbolClass;

    /// Identity without the version segment.
    fn persistent_identity(&self) -> Option<&str>;

    fn display_id(&self) -> Option<&str>;

    fn version(&self) -> Option<&str>;

    fn was_derived_from(&self) -> Vec<&str>;

    fn was_generated_by(&self) -> Vec<&str>;

    fn is_top_level(&self) -> bool {
        self.class().is_top_level()
    }
}

/// Human-readable naming on top of [`Identified`].
pub trait Documented: Identified {
    fn name(&self) -> Option<&str>;

    fn description(&self) -> Option<&str>;
}

impl Identified for SbolObject {
    fn identity(&self) -> &str {
        &self.identity
    }

    fn class(&self) -> SbolClass {
        self.class
    }

    fn persistent_identity(&self) -> Option<&str> {
        self.first_str(vocab::PERSISTENT_IDENTITY)
    }

    fn display_id(&self) -> Option<&str> {
        self.first_str(vocab::DISPLAY_ID)
    }

    fn version(&self) -> Option<&str> {
        self.first_str(vocab::VERSION)
    }

    fn was_derived_from(&self) -> Vec<&str> {
        self.all_str(vocab::WAS_DERIVED_FROM)
    }

    fn was_generated_by(&self) -> Vec<&str> {
        self.all_str(vocab::WAS_GENERATED_BY)
    }
}

impl Documented for SbolObject {
    fn name(&self) -> Option<&str> {
        self.first_str(vocab::TITLE)
    }

    fn description(&self) -> Option<&str> {
        self.first_str(vocab::DESCRIPTION)
    }
}
