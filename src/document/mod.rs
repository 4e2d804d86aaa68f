//! # Document
//!
//! Registry of top-level objects with a URI index over every object they
//! own, the namespace declarations used on the wire, and the entry points
//! for serialization, copying and validation.

mod hierarchy;
mod index;
mod summary;

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    path::Path,
};

use tracing::{debug, info, warn};

pub use self::{
    hierarchy::{Hierarchy, HierarchyNode},
    summary::DocumentSummary,
};
pub(crate) use self::hierarchy::sub_definitions;
use self::index::Locator;
use crate::{
    config::Config,
    io,
    model::{identity, value_objects::Iri, Identified, SbolClass, SbolObject, SbolType},
    validation::{RuleSet, ValidationReport},
    vocab, Error, Result,
};

/// A set of SBOL objects addressable by URI.
///
/// Only top-level objects are registered directly; their owned
/// descendants are indexed with them. Registered objects are changed
/// through [`Document::modify`] so the index never goes stale.
#[derive(Clone, Debug)]
pub struct Document {
    config: Config,
    namespaces: BTreeMap<String, String>,
    registry: BTreeMap<String, SbolObject>,
    index: HashMap<String, Locator>,
}

impl Document {
    /// An empty document declaring the default prefixes.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let namespaces = vocab::DEFAULT_PREFIXES
            .iter()
            .map(|(prefix, namespace)| ((*prefix).to_string(), (*namespace).to_string()))
            .collect();
        Self {
            config,
            namespaces,
            registry: BTreeMap::new(),
            index: HashMap::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Registers a top-level object and everything it owns.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` when the object is not top-level, `InvalidArgument`
    /// when it is owned, `DuplicateUri` when any identity in the subtree is
    /// taken. Nothing is registered on error.
    pub fn add(&mut self, object: SbolObject) -> Result<()> {
        self.add_all([object])
    }

    /// Registers several top-level objects at once; either all of them are
    /// registered or none is.
    ///
    /// # Errors
    ///
    /// As [`Document::add`], including identities shared between the new
    /// objects.
    pub fn add_all(&mut self, objects: impl IntoIterator<Item = SbolObject>) -> Result<()> {
        let objects: Vec<SbolObject> = objects.into_iter().collect();
        let mut staged: HashMap<String, Locator> = HashMap::new();
        for object in &objects {
            check_registrable(object)?;
            for (identity, locator) in index::collect(object)? {
                if self.index.contains_key(&identity) || staged.contains_key(&identity) {
                    return Err(Error::duplicate(identity));
                }
                staged.insert(identity, locator);
            }
        }
        for object in objects {
            info!(uri = %object.identity(), class = %object.class(), "document_add");
            self.registry.insert(object.identity().to_string(), object);
        }
        self.index.extend(staged);
        Ok(())
    }

    /// Looks up an object of class `T` (or a subclass).
    ///
    /// # Errors
    ///
    /// `NotFound` when `uri` is not indexed, `TypeMismatch` when the object
    /// is not a `T`.
    pub fn get<T: SbolType>(&self, uri: &str) -> Result<&SbolObject> {
        let object = self
            .find(uri)
            .ok_or_else(|| Error::not_found("object", uri))?;
        if !T::accepts(object.class()) {
            return Err(Error::TypeMismatch {
                uri: uri.to_string(),
                expected: T::CLASS,
                found: object.class(),
            });
        }
        Ok(object)
    }

    /// Looks up any indexed object.
    #[must_use]
    pub fn find(&self, uri: &str) -> Option<&SbolObject> {
        self.index
            .get(uri)
            .and_then(|locator| index::resolve(&self.registry, locator))
    }

    #[must_use]
    pub fn contains(&self, uri: &str) -> bool {
        self.index.contains_key(uri)
    }

    /// Number of indexed objects, owned ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Top-level objects in identity order.
    pub fn top_levels(&self) -> impl Iterator<Item = &SbolObject> {
        self.registry.values()
    }

    /// Every indexed object: each top level followed by its descendants.
    pub fn objects(&self) -> impl Iterator<Item = &SbolObject> {
        self.registry.values().flat_map(SbolObject::descendants)
    }

    /// Indexed objects of class `T` (or a subclass).
    pub fn iter<T: SbolType>(&self) -> impl Iterator<Item = &SbolObject> {
        self.objects().filter(|object| T::accepts(object.class()))
    }

    /// Runs `change` against a registered object, then re-indexes its top
    /// level.
    ///
    /// The closure may edit properties and add or remove children but must
    /// keep the object's identity and class.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown `uri`; the closure's own error;
    /// `InvalidArgument` when identity or class changed; `DuplicateUri`
    /// when a new child collides with an indexed object. On any error the
    /// top level is restored as it was.
    pub fn modify<R>(
        &mut self,
        uri: &str,
        change: impl FnOnce(&mut SbolObject) -> Result<R>,
    ) -> Result<R> {
        let locator = self
            .index
            .get(uri)
            .cloned()
            .ok_or_else(|| Error::not_found("object", uri))?;
        let snapshot = self
            .registry
            .get(&locator.root)
            .cloned()
            .ok_or_else(|| Error::not_found("object", &locator.root))?;
        let outcome = self.apply(uri, &locator, change);
        if outcome.is_err() {
            debug!(uri, "document_modify_restored");
            self.registry.insert(locator.root, snapshot);
        }
        outcome
    }

    fn apply<R>(
        &mut self,
        uri: &str,
        locator: &Locator,
        change: impl FnOnce(&mut SbolObject) -> Result<R>,
    ) -> Result<R> {
        let object = index::resolve_mut(&mut self.registry, locator)
            .ok_or_else(|| Error::not_found("object", uri))?;
        let class = object.class();
        let result = change(object)?;
        if object.identity() != uri || object.class() != class {
            return Err(Error::InvalidArgument(format!(
                "modify cannot change the identity or class of `{uri}`"
            )));
        }
        self.reindex(&locator.root)?;
        Ok(result)
    }

    /// Replaces the index entries of one top level; the index is left
    /// untouched on error.
    fn reindex(&mut self, root: &str) -> Result<()> {
        let object = self
            .registry
            .get(root)
            .ok_or_else(|| Error::not_found("object", root))?;
        let entries = index::collect(object)?;
        for (identity, _) in &entries {
            if self
                .index
                .get(identity)
                .is_some_and(|existing| existing.root != root)
            {
                return Err(Error::duplicate(identity.as_str()));
            }
        }
        self.index.retain(|_, locator| locator.root != root);
        self.index.extend(entries);
        Ok(())
    }

    /// Removes an object and everything it owns, returning it detached.
    ///
    /// References to the removed objects are left in place and logged;
    /// validation reports them as dangling.
    ///
    /// # Errors
    ///
    /// `NotFound` when `uri` is not indexed.
    pub fn remove(&mut self, uri: &str) -> Result<SbolObject> {
        let locator = self
            .index
            .get(uri)
            .cloned()
            .ok_or_else(|| Error::not_found("object", uri))?;
        let removed = match locator.path.split_last() {
            None => self.registry.remove(&locator.root),
            Some(((property, identity), steps)) => {
                let owner = Locator {
                    root: locator.root.clone(),
                    path: steps.to_vec(),
                };
                index::resolve_mut(&mut self.registry, &owner)
                    .and_then(|owner| owner.take_child(property, identity))
            }
        }
        .ok_or_else(|| Error::not_found("object", uri))?;

        let gone: HashSet<&str> = removed.descendants().map(SbolObject::identity).collect();
        self.index
            .retain(|identity, _| !gone.contains(identity.as_str()));
        for referrer in self.objects() {
            for (property, values) in referrer.properties().iter() {
                let dangling = values
                    .iter()
                    .filter(|value| value.is_reference() && gone.contains(value.as_str()));
                for value in dangling {
                    warn!(
                        uri = value.as_str(),
                        referrer = referrer.identity(),
                        property,
                        "dangling_reference"
                    );
                }
            }
        }
        info!(uri, removed = gone.len(), "document_remove");
        Ok(removed)
    }

    /// Copies every top level, with its subtree, into `target` under a new
    /// namespace and/or version. Internal references follow the copies.
    ///
    /// Returns the number of top levels copied.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when neither namespace nor version is given or the
    /// version does not exceed a source version; `DuplicateUri` when a copy
    /// collides in `target`. `target` is unchanged on error.
    pub fn copy_into(
        &self,
        target: &mut Self,
        namespace: Option<&str>,
        version: Option<&str>,
    ) -> Result<usize> {
        if namespace.is_none() && version.is_none() {
            return Err(Error::InvalidArgument(
                "copy needs a target namespace or version".to_string(),
            ));
        }
        let sources: Vec<&SbolObject> = self.top_levels().collect();
        let copies = identity::copy_all(&self.config, &sources, namespace, version)?;
        let count = copies.len();
        target.add_all(copies)?;
        for (prefix, declared) in &self.namespaces {
            target
                .namespaces
                .entry(prefix.clone())
                .or_insert_with(|| declared.clone());
        }
        info!(
            count,
            namespace = namespace.unwrap_or_default(),
            version = version.unwrap_or_default(),
            "document_copy"
        );
        Ok(count)
    }

    /// [`Document::copy_into`] a fresh document with the same configuration.
    ///
    /// # Errors
    ///
    /// As [`Document::copy_into`].
    pub fn copy(&self, namespace: Option<&str>, version: Option<&str>) -> Result<Self> {
        let mut target = Self::new(self.config.clone());
        self.copy_into(&mut target, namespace, version)?;
        Ok(target)
    }

    /// Declared `(prefix, namespace)` pairs in prefix order.
    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces
            .iter()
            .map(|(prefix, namespace)| (prefix.as_str(), namespace.as_str()))
    }

    /// Whether any prefix is bound to `namespace`.
    #[must_use]
    pub fn declares(&self, namespace: &str) -> bool {
        self.namespaces.values().any(|declared| declared == namespace)
    }

    /// Binds `prefix` to `namespace`, replacing an earlier binding.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for a prefix that is not an XML name or a namespace
    /// that is not an absolute IRI.
    pub fn add_namespace(&mut self, prefix: &str, namespace: &str) -> Result<()> {
        if !io::is_xml_name(prefix) || prefix.eq_ignore_ascii_case("xml") {
            return Err(Error::invalid_format(
                "namespace prefix",
                prefix,
                "an XML name",
            ));
        }
        Iri::new(namespace)
            .map_err(|_| Error::invalid_format("namespace", namespace, "an absolute IRI"))?;
        self.namespaces
            .insert(prefix.to_string(), namespace.to_string());
        Ok(())
    }

    /// Binds each free prefix whose namespace is not declared yet.
    fn adopt(&mut self, bindings: impl IntoIterator<Item = (String, String)>) {
        for (prefix, namespace) in bindings {
            if self.namespaces.contains_key(&prefix) || self.declares(&namespace) {
                continue;
            }
            self.namespaces.insert(prefix, namespace);
        }
    }

    /// Drops a prefix binding, returning its namespace.
    pub fn remove_namespace(&mut self, prefix: &str) -> Option<String> {
        self.namespaces.remove(prefix)
    }

    /// Runs the global rule-set.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let report = RuleSet::sbol().check_document(self);
        debug!(
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "validation_report"
        );
        report
    }

    /// Serializes the document as RDF/XML.
    ///
    /// # Errors
    ///
    /// `MissingNamespace` when the rdf or sbol namespace is not declared;
    /// `Validation` when validation is enabled and finds errors;
    /// `InvalidArgument` for a property or type URI that cannot be written
    /// as an XML element name.
    pub fn to_rdf_xml(&self) -> Result<String> {
        for namespace in [vocab::RDF, vocab::SBOL] {
            if !self.declares(namespace) {
                return Err(Error::MissingNamespace {
                    namespace: namespace.to_string(),
                });
            }
        }
        if self.config.validate {
            let report = self.validate();
            if !report.is_valid() {
                return Err(Error::Validation(report));
            }
        }
        io::writer::to_string(self)
    }

    /// Writes [`Document::to_rdf_xml`] to `path`.
    ///
    /// # Errors
    ///
    /// As [`Document::to_rdf_xml`], plus I/O failures.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_rdf_xml()?)?;
        info!(path = %path.display(), objects = self.len(), "document_written");
        Ok(())
    }

    /// Reads an RDF/XML file into a new document.
    ///
    /// # Errors
    ///
    /// As [`Document::read_str`], plus I/O failures.
    pub fn read(path: impl AsRef<Path>, config: Config) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::read_str(&content, config)
    }

    /// Parses RDF/XML into a new document.
    ///
    /// Prefixes bound anywhere in the file are declared first; the default
    /// prefixes then fill in any namespace still unbound, so a file that
    /// uses a default `xmlns` can be written back.
    ///
    /// # Errors
    ///
    /// `Xml` or `Malformed` for unusable input; as [`Document::add_all`] for
    /// the parsed objects.
    pub fn read_str(content: &str, config: Config) -> Result<Self> {
        let parsed = io::reader::parse(content)?;
        let mut document = Self::new(config);
        let defaults = std::mem::take(&mut document.namespaces);
        document.adopt(parsed.namespaces);
        document.adopt(defaults);
        document.add_all(parsed.objects)?;
        info!(objects = document.len(), "document_read");
        Ok(document)
    }

    /// Merges the objects of an RDF/XML file into this document.
    ///
    /// # Errors
    ///
    /// As [`Document::append_str`], plus I/O failures.
    pub fn append(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let content = std::fs::read_to_string(path.as_ref())?;
        self.append_str(&content)
    }

    /// Merges serialized objects into this document, all or nothing.
    /// Prefixes and namespaces not yet bound here are adopted.
    ///
    /// Returns the number of top levels added.
    ///
    /// # Errors
    ///
    /// As [`Document::read_str`].
    pub fn append_str(&mut self, content: &str) -> Result<usize> {
        let parsed = io::reader::parse(content)?;
        let count = parsed.objects.len();
        self.add_all(parsed.objects)?;
        self.adopt(parsed.namespaces);
        info!(count, "document_append");
        Ok(count)
    }

    #[must_use]
    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary::from(self)
    }

    /// Walks the definition hierarchy below a ComponentDefinition or
    /// ModuleDefinition.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown `uri`, `InvalidArgument` when it names
    /// another class.
    pub fn hierarchy(&self, uri: &str) -> Result<Hierarchy<'_>> {
        let root = self
            .find(uri)
            .ok_or_else(|| Error::not_found("object", uri))?;
        match root.class() {
            SbolClass::ComponentDefinition | SbolClass::ModuleDefinition => {
                Ok(Hierarchy::new(self, root))
            }
            class => Err(Error::InvalidArgument(format!(
                "`{uri}` is a {class}; hierarchies start at a ComponentDefinition or ModuleDefinition"
            ))),
        }
    }
}

fn check_registrable(object: &SbolObject) -> Result<()> {
    if !object.class().is_top_level() {
        return Err(Error::TypeMismatch {
            uri: object.identity().to_string(),
            expected: SbolClass::TopLevel,
            found: object.class(),
        });
    }
    if let Some(parent) = object.parent() {
        return Err(Error::InvalidArgument(format!(
            "`{}` is owned by `{parent}`; detach it first",
            object.identity()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classes::{ComponentDefinition, Sequence, SequenceAnnotation, TopLevel},
        model::PropertyValue,
    };

    fn config() -> Config {
        Config::default().with_homespace("http://sys-bio.org")
    }

    fn part_with_range(config: &Config, id: &str) -> SbolObject {
        let mut part = ComponentDefinition::new(config, id).expect("part");
        let annotation = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create(config, "anno")
            .expect("annotation");
        SequenceAnnotation::add_range(annotation, config, "range", 1, 10).expect("range");
        part
    }

    #[test]
    fn add_indexes_owned_descendants() {
        let config = config();
        let mut document = Document::new(config.clone());
        document.add(part_with_range(&config, "B0032")).expect("added");

        assert_eq!(document.len(), 3);
        assert_eq!(document.top_levels().count(), 1);
        let range = document
            .find("http://sys-bio.org/B0032/anno/range/1.0.0")
            .expect("indexed");
        assert_eq!(range.parent(), Some("http://sys-bio.org/B0032/anno/1.0.0"));
    }

    #[test]
    fn add_rejects_owned_classes() {
        let config = config();
        let mut document = Document::new(config.clone());
        let loose = SbolObject::new(&config, SbolClass::SequenceAnnotation, "loose")
            .expect("annotation");
        let err = document.add(loose).expect_err("not top-level");
        assert!(matches!(err, Error::TypeMismatch { .. }));
        assert!(document.is_empty());
    }

    #[test]
    fn add_all_is_atomic() {
        let config = config();
        let mut document = Document::new(config.clone());
        document
            .add(ComponentDefinition::new(&config, "taken").expect("part"))
            .expect("added");

        let err = document
            .add_all([
                Sequence::new(&config, "fresh", "atgc").expect("sequence"),
                ComponentDefinition::new(&config, "taken").expect("part"),
            ])
            .expect_err("duplicate");
        assert!(matches!(err, Error::DuplicateUri { .. }));
        assert_eq!(document.len(), 1);
        assert!(!document.contains("http://sys-bio.org/fresh/1.0.0"));
    }

    #[test]
    fn get_checks_the_class() {
        let config = config();
        let mut document = Document::new(config.clone());
        document
            .add(Sequence::new(&config, "seq", "atgc").expect("sequence"))
            .expect("added");
        let uri = "http://sys-bio.org/seq/1.0.0";

        assert!(document.get::<Sequence>(uri).is_ok());
        assert!(document.get::<TopLevel>(uri).is_ok());
        assert!(matches!(
            document.get::<ComponentDefinition>(uri),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(matches!(
            document.get::<Sequence>("http://sys-bio.org/other/1.0.0"),
            Err(Error::NotFound { .. })
        ));
        assert_eq!(document.iter::<Sequence>().count(), 1);
    }

    #[test]
    fn modify_reindexes_new_children() {
        let config = config();
        let mut document = Document::new(config.clone());
        document
            .add(ComponentDefinition::new(&config, "B0032").expect("part"))
            .expect("added");

        document
            .modify("http://sys-bio.org/B0032/1.0.0", |part| {
                part.owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
                    .create(&config, "anno")
                    .map(drop)
            })
            .expect("modified");
        assert!(document.contains("http://sys-bio.org/B0032/anno/1.0.0"));
    }

    #[test]
    fn failed_modify_restores_the_object() {
        let config = config();
        let mut document = Document::new(config.clone());
        document
            .add_all([
                ComponentDefinition::new(&config, "B0032").expect("part"),
                ComponentDefinition::new(&config, "other").expect("part"),
            ])
            .expect("added");
        let before = document
            .find("http://sys-bio.org/B0032/1.0.0")
            .cloned()
            .expect("registered");

        let clash = SbolObject::extension(&config, "http://igem.org/Note", "other")
            .expect("extension");
        let err = document
            .modify("http://sys-bio.org/B0032/1.0.0", |part| {
                part.annotate(
                    "http://igem.org/status",
                    PropertyValue::Literal("draft".into()),
                )?;
                part.attach_annotation("http://igem.org/note", clash)
                    .map(drop)
            })
            .expect_err("identity clash");
        assert!(matches!(err, Error::DuplicateUri { .. }));
        assert_eq!(
            document.find("http://sys-bio.org/B0032/1.0.0"),
            Some(&before)
        );
        assert_eq!(document.len(), 2);
    }

    #[test]
    fn remove_cascades_to_owned_objects() {
        let config = config();
        let mut document = Document::new(config.clone());
        document.add(part_with_range(&config, "B0032")).expect("added");

        let annotation = document
            .remove("http://sys-bio.org/B0032/anno/1.0.0")
            .expect("removed");
        assert_eq!(annotation.parent(), None);
        assert_eq!(document.len(), 1);
        assert!(!document.contains("http://sys-bio.org/B0032/anno/range/1.0.0"));

        document
            .remove("http://sys-bio.org/B0032/1.0.0")
            .expect("removed");
        assert!(document.is_empty());
    }

    #[test]
    fn copy_moves_every_top_level_to_a_new_namespace() {
        let config = config();
        let mut document = Document::new(config.clone());
        let mut part = part_with_range(&config, "B0032");
        part.referenced(ComponentDefinition::SEQUENCES)
            .add("http://sys-bio.org/B0032_seq/1.0.0")
            .expect("sequence reference");
        document
            .add_all([part, Sequence::new(&config, "B0032_seq", "atgc").expect("seq")])
            .expect("added");

        let copy = document.copy(Some("http://igem.org"), None).expect("copy");
        assert_eq!(copy.len(), document.len());
        let part = copy
            .get::<ComponentDefinition>("http://igem.org/B0032/1.0.0")
            .expect("copied");
        assert_eq!(
            part.references(ComponentDefinition::SEQUENCES).first(),
            Some("http://igem.org/B0032_seq/1.0.0")
        );
        assert_eq!(part.was_derived_from(), vec!["http://sys-bio.org/B0032/1.0.0"]);
        assert!(copy.contains("http://igem.org/B0032/anno/range/1.0.0"));

        assert!(matches!(
            document.copy(None, None),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn namespaces_can_be_declared_and_dropped() {
        let mut document = Document::new(config());
        assert!(document.declares(vocab::SBOL));
        document
            .add_namespace("igem", "http://wiki.synbiohub.org/wiki/Terms/igem#")
            .expect("declared");
        assert!(document.add_namespace("1bad", "http://bad.org/").is_err());
        assert!(document.add_namespace("ok", "not an iri").is_err());

        assert_eq!(document.remove_namespace("sbol"), Some(vocab::SBOL.to_string()));
        assert!(matches!(
            document.to_rdf_xml(),
            Err(Error::MissingNamespace { .. })
        ));
        let report = document.validate();
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn hierarchy_rejects_other_classes() {
        let config = config();
        let mut document = Document::new(config.clone());
        document
            .add(Sequence::new(&config, "seq", "atgc").expect("sequence"))
            .expect("added");
        assert!(matches!(
            document.hierarchy("http://sys-bio.org/seq/1.0.0"),
            Err(Error::InvalidArgument(_))
        ));
    }
}
