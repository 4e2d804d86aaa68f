//! Typed property descriptors and the accessor that enforces them.

use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;

use crate::{
    model::{Identified, PropertyValue, SbolClass, SbolObject},
    validation::RuleSet,
    Error, Result,
};

/// Allowed number of values for a property: lower bound 0 or 1, upper
/// bound 1 or unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cardinality {
    OptionalOne,
    RequiredOne,
    OptionalMany,
    RequiredMany,
}

impl Cardinality {
    /// Builds a cardinality from textual bounds (`"0"`/`"1"` and
    /// `"1"`/`"*"`).
    #[must_use]
    pub fn from_bounds(lower: &str, upper: &str) -> Option<Self> {
        match (lower, upper) {
            ("0", "1") => Some(Self::OptionalOne),
            ("1", "1") => Some(Self::RequiredOne),
            ("0", "*") => Some(Self::OptionalMany),
            ("1", "*") => Some(Self::RequiredMany),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::RequiredOne | Self::RequiredMany)
    }

    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::OptionalMany | Self::RequiredMany)
    }

    /// Whether `count` values satisfy both bounds.
    #[must_use]
    pub const fn admits(self, count: usize) -> bool {
        (count > 0 || !self.is_required()) && (count <= 1 || self.is_many())
    }
}

impl Display for Cardinality {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let bounds = match self {
            Self::OptionalOne => "0..1",
            Self::RequiredOne => "1",
            Self::OptionalMany => "0..*",
            Self::RequiredMany => "1..*",
        };
        f.write_str(bounds)
    }
}

/// How a declared property stores its values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Literal text, parsed on read.
    Literal,
    /// A URI naming something outside the object model (ontology terms,
    /// external resources).
    Uri,
    /// A URI naming another SBOL object of the given class.
    Reference(SbolClass),
    /// Child objects of the given class.
    Owned(SbolClass),
}

/// Untyped summary of a descriptor, used by class metadata and validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub uri: &'static str,
    pub cardinality: Cardinality,
    pub shape: Shape,
}

/// Interpretation of raw stored text as a typed value.
pub trait ValueKind {
    type Value;
    /// Stored as `rdf:resource` rather than element text.
    const REFERENCE: bool;

    /// Parses raw text, returning the expected form on failure.
    fn parse(raw: &str) -> Result<Self::Value, String>;

    fn render(value: &Self::Value) -> String;
}

/// The value kinds available to [`PropertyDef`].
pub mod kind {
    use super::ValueKind;
    use crate::model::value_objects::{self, Timestamp};

    #[derive(Clone, Copy, Debug)]
    pub struct Text;

    impl ValueKind for Text {
        type Value = String;
        const REFERENCE: bool = false;

        fn parse(raw: &str) -> Result<String, String> {
            Ok(raw.to_string())
        }

        fn render(value: &String) -> String {
            value.clone()
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub struct Int;

    impl ValueKind for Int {
        type Value = i64;
        const REFERENCE: bool = false;

        fn parse(raw: &str) -> Result<i64, String> {
            raw.trim()
                .parse()
                .map_err(|_| "a signed integer".to_string())
        }

        fn render(value: &i64) -> String {
            value.to_string()
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub struct Float;

    impl ValueKind for Float {
        type Value = f64;
        const REFERENCE: bool = false;

        fn parse(raw: &str) -> Result<f64, String> {
            raw.trim()
                .parse()
                .map_err(|_| "a decimal number".to_string())
        }

        fn render(value: &f64) -> String {
            value.to_string()
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub struct Uri;

    impl ValueKind for Uri {
        type Value = String;
        const REFERENCE: bool = true;

        fn parse(raw: &str) -> Result<String, String> {
            value_objects::check_uri(raw)?;
            Ok(raw.to_string())
        }

        fn render(value: &String) -> String {
            value.clone()
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub struct Version;

    impl ValueKind for Version {
        type Value = value_objects::Version;
        const REFERENCE: bool = false;

        fn parse(raw: &str) -> Result<Self::Value, String> {
            value_objects::Version::parse(raw)
        }

        fn render(value: &Self::Value) -> String {
            value.as_str().to_string()
        }
    }

    #[derive(Clone, Copy, Debug)]
    pub struct DateTime;

    impl ValueKind for DateTime {
        type Value = Timestamp;
        const REFERENCE: bool = false;

        fn parse(raw: &str) -> Result<Timestamp, String> {
            Timestamp::parse(raw)
        }

        fn render(value: &Timestamp) -> String {
            value.to_string()
        }
    }
}

/// Declares a property: its URI, cardinality and value kind.
pub struct PropertyDef<K> {
    pub uri: &'static str,
    pub cardinality: Cardinality,
    kind: PhantomData<fn() -> K>,
}

impl<K> Clone for PropertyDef<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for PropertyDef<K> {}

impl<K> Debug for PropertyDef<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDef")
            .field("uri", &self.uri)
            .field("cardinality", &self.cardinality)
            .finish()
    }
}

impl<K> PropertyDef<K> {
    #[must_use]
    pub const fn new(uri: &'static str, cardinality: Cardinality) -> Self {
        Self {
            uri,
            cardinality,
            kind: PhantomData,
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

impl<K: ValueKind> PropertyDef<K> {
    #[must_use]
    pub const fn field(self) -> FieldSpec {
        FieldSpec {
            uri: self.uri,
            cardinality: self.cardinality,
            shape: if K::REFERENCE {
                Shape::Uri
            } else {
                Shape::Literal
            },
        }
    }
}

pub type TextProperty<'a> = Property<'a, kind::Text>;
pub type IntProperty<'a> = Property<'a, kind::Int>;
pub type FloatProperty<'a> = Property<'a, kind::Float>;
pub type UriProperty<'a> = Property<'a, kind::Uri>;
pub type VersionProperty<'a> = Property<'a, kind::Version>;
pub type DateTimeProperty<'a> = Property<'a, kind::DateTime>;

/// Mutable view of one declared property on one object.
///
/// Every write is checked against the object's class, the cardinality and
/// the registered local rules first; a rejected write leaves the object
/// unchanged.
pub struct Property<'a, K> {
    owner: &'a mut SbolObject,
    def: PropertyDef<K>,
}

impl<'a, K: ValueKind> Property<'a, K> {
    pub(crate) fn new(owner: &'a mut SbolObject, def: PropertyDef<K>) -> Self {
        Self { owner, def }
    }

    #[must_use]
    pub fn uri(&self) -> &'static str {
        self.def.uri
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.raw().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw().is_empty()
    }

    /// Stored values without interpretation.
    #[must_use]
    pub fn raw(&self) -> &[PropertyValue] {
        self.owner.property_values(self.def.uri)
    }

    /// First value, or `None` when an optional property is unset.
    ///
    /// # Errors
    ///
    /// `NotFound` when a required property is unset; `InvalidFormat` when
    /// the stored text does not parse as `K`; `InvalidArgument` when the
    /// object's class does not declare the property.
    pub fn get(&self) -> Result<Option<K::Value>> {
        first(self.owner, self.def)
    }

    /// Every value in insertion order.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` when a stored value does not parse as `K`.
    pub fn values(&self) -> Result<Vec<K::Value>> {
        all(self.owner, self.def)
    }

    /// Replaces the value.
    ///
    /// # Errors
    ///
    /// See [`Property::set_str`].
    pub fn set(&mut self, value: impl Into<K::Value>) -> Result<()> {
        let raw = K::render(&value.into());
        self.set_str(&raw)
    }

    /// Replaces the value from its textual form.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the object's class does not declare the
    /// property, `InvalidFormat` when `raw` does not parse or breaks a local
    /// rule, `Cardinality` when a required value is set empty or a
    /// many-valued property already holds more than one value.
    pub fn set_str(&mut self, raw: &str) -> Result<()> {
        self.declared()?;
        let value = self.check(raw)?;
        let count = self.len();
        if count > 1 {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                format!("holds {count} values; use `add`, `remove` or `set_all`"),
            ));
        }
        self.owner.store_mut().replace(self.def.uri, vec![value]);
        Ok(())
    }

    /// Replaces every value at once.
    ///
    /// # Errors
    ///
    /// `Cardinality` when the new count breaks the declared bounds, or the
    /// first value that fails [`Property::set_str`] checks.
    pub fn set_all<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Into<K::Value>,
    {
        self.declared()?;
        let values = values
            .into_iter()
            .map(|value| self.check(&K::render(&value.into())))
            .collect::<Result<Vec<_>>>()?;
        if !self.def.cardinality.admits(values.len()) {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                format!(
                    "{} values do not fit cardinality {}",
                    values.len(),
                    self.def.cardinality
                ),
            ));
        }
        self.owner.store_mut().replace(self.def.uri, values);
        Ok(())
    }

    /// Appends a value to a many-valued property.
    ///
    /// # Errors
    ///
    /// `Cardinality` on a single-valued property; otherwise as
    /// [`Property::set_str`].
    pub fn add(&mut self, value: impl Into<K::Value>) -> Result<()> {
        let raw = K::render(&value.into());
        self.add_str(&raw)
    }

    /// Appends a value from its textual form.
    ///
    /// # Errors
    ///
    /// As [`Property::add`].
    pub fn add_str(&mut self, raw: &str) -> Result<()> {
        self.declared()?;
        if !self.def.cardinality.is_many() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "single-valued property; use `set`",
            ));
        }
        let value = self.check(raw)?;
        self.owner.store_mut().push(self.def.uri, value);
        Ok(())
    }

    /// Removes the value at `index`.
    ///
    /// # Errors
    ///
    /// `NotFound` when `index` is out of range, `Cardinality` when removing
    /// the last value of a required property.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        self.declared()?;
        let count = self.len();
        if index >= count {
            return Err(Error::not_found(
                "property value",
                format!("{}[{index}]", self.def.uri),
            ));
        }
        if count == 1 && self.def.cardinality.is_required() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "cannot remove the only value of a required property",
            ));
        }
        self.owner.store_mut().remove_at(self.def.uri, index);
        Ok(())
    }

    /// Removes every value.
    ///
    /// # Errors
    ///
    /// `Cardinality` on a required property that currently holds values.
    pub fn clear(&mut self) -> Result<()> {
        self.declared()?;
        if self.def.cardinality.is_required() && !self.is_empty() {
            return Err(Error::cardinality(
                self.owner.identity(),
                self.def.uri,
                "cannot clear a required property",
            ));
        }
        self.owner.store_mut().replace(self.def.uri, Vec::new());
        Ok(())
    }

    fn declared(&self) -> Result<()> {
        self.owner.check_declared(self.def.field())
    }

    fn check(&self, raw: &str) -> Result<PropertyValue> {
        check_value::<K>(self.owner.identity(), self.def.uri, self.def.cardinality, raw)
    }
}

/// Validates `raw` for a property of kind `K` and wraps it for storage.
pub(crate) fn check_value<K: ValueKind>(
    subject: &str,
    uri: &str,
    cardinality: Cardinality,
    raw: &str,
) -> Result<PropertyValue> {
    if raw.is_empty() && cardinality.is_required() {
        return Err(Error::cardinality(
            subject,
            uri,
            "required property cannot be empty",
        ));
    }
    K::parse(raw).map_err(|expected| Error::invalid_format(uri, raw, expected))?;
    RuleSet::sbol().check_value(uri, raw)?;
    Ok(if K::REFERENCE {
        PropertyValue::Reference(raw.to_string())
    } else {
        PropertyValue::Literal(raw.to_string())
    })
}

pub(crate) fn decode<K: ValueKind>(uri: &str, value: &PropertyValue) -> Result<K::Value> {
    if value.is_reference() != K::REFERENCE {
        let expected = if K::REFERENCE {
            "a resource reference"
        } else {
            "literal text"
        };
        return Err(Error::invalid_format(uri, value.as_str(), expected));
    }
    K::parse(value.as_str()).map_err(|expected| Error::invalid_format(uri, value.as_str(), expected))
}

pub(crate) fn first<K: ValueKind>(
    owner: &SbolObject,
    def: PropertyDef<K>,
) -> Result<Option<K::Value>> {
    owner.check_declared(def.field())?;
    match owner.property_values(def.uri).first() {
        Some(value) => decode::<K>(def.uri, value).map(Some),
        None if def.cardinality.is_required() => Err(Error::not_found(
            "required property",
            format!("{} on {}", def.uri, owner.identity()),
        )),
        None => Ok(None),
    }
}

pub(crate) fn all<K: ValueKind>(owner: &SbolObject, def: PropertyDef<K>) -> Result<Vec<K::Value>> {
    owner.check_declared(def.field())?;
    owner
        .property_values(def.uri)
        .iter()
        .map(|value| decode::<K>(def.uri, value))
        .collect()
}
