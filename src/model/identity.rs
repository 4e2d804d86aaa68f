//! Identity minting and rewriting.
//!
//! Compliant identities follow `{namespace}/[{Class}/]{displayId}/{version}`
//! for top levels and `{owner persistentIdentity}/{displayId}/{version}` for
//! children; the persistent identity is the same URI without the version.

use std::collections::HashMap;

use crate::{
    config::Config,
    model::{
        value_objects::{check_display_id, Iri, Version},
        Identified, PropertyStore, PropertyValue, SbolClass, SbolObject,
    },
    vocab, Error, Result,
};

/// Identity fields for a new object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Minted {
    pub identity: String,
    pub persistent_identity: String,
    pub display_id: Option<String>,
    pub version: Option<String>,
}

impl Minted {
    pub(crate) fn seed(&self, store: &mut PropertyStore) {
        store.push(
            vocab::PERSISTENT_IDENTITY,
            PropertyValue::Reference(self.persistent_identity.clone()),
        );
        if let Some(display_id) = &self.display_id {
            store.push(vocab::DISPLAY_ID, PropertyValue::Literal(display_id.clone()));
        }
        if let Some(version) = &self.version {
            store.push(vocab::VERSION, PropertyValue::Literal(version.clone()));
        }
    }
}

/// Builds a compliant URI from its parts.
#[must_use]
pub fn compliant_uri(
    namespace: &str,
    class: Option<SbolClass>,
    display_id: &str,
    version: Option<&str>,
) -> String {
    let namespace = namespace.trim_end_matches(['/', '#']);
    let persistent = match class {
        Some(class) => format!("{namespace}/{}/{display_id}", class.name()),
        None => format!("{namespace}/{display_id}"),
    };
    versioned(&persistent, version)
}

fn versioned(persistent: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{persistent}/{version}"),
        None => persistent.to_string(),
    }
}

fn configured_version(config: &Config) -> Option<String> {
    Some(config.version.clone()).filter(|version| !version.is_empty())
}

fn checked_display_id(id: &str) -> Result<()> {
    check_display_id(id).map_err(|expected| Error::invalid_format(vocab::DISPLAY_ID, id, expected))
}

fn open_world(config: &Config, id: &str) -> Result<Minted> {
    let identity = Iri::new(id)
        .map_err(|_| Error::invalid_format("identity", id, "an absolute IRI"))?
        .into_string();
    Ok(Minted {
        persistent_identity: identity.clone(),
        identity,
        display_id: None,
        version: configured_version(config),
    })
}

/// Identity for an unowned object.
pub(crate) fn top_level(config: &Config, class: SbolClass, id: &str) -> Result<Minted> {
    if !config.sbol_compliant_uris {
        return open_world(config, id);
    }
    checked_display_id(id)?;
    let version = configured_version(config);
    let typed = (config.sbol_typed_uris && class != SbolClass::Custom).then_some(class);
    let persistent_identity = compliant_uri(config.namespace(), typed, id, None);
    Ok(Minted {
        identity: versioned(&persistent_identity, version.as_deref()),
        persistent_identity,
        display_id: Some(id.to_string()),
        version,
    })
}

fn owner_base(owner: &SbolObject) -> &str {
    owner
        .persistent_identity()
        .unwrap_or_else(|| owner.identity())
}

/// Identity for a child created under `owner`.
pub(crate) fn child(config: &Config, owner: &SbolObject, id: &str) -> Result<Minted> {
    if !config.sbol_compliant_uris {
        return open_world(config, id);
    }
    checked_display_id(id)?;
    let persistent_identity = format!("{}/{id}", owner_base(owner));
    let version = owner.version().map(str::to_string);
    Ok(Minted {
        identity: versioned(&persistent_identity, version.as_deref()),
        persistent_identity,
        display_id: Some(id.to_string()),
        version,
    })
}

/// The identity a compliant child with `display_id` would have.
pub(crate) fn child_identity(owner: &SbolObject, display_id: &str) -> String {
    versioned(
        &format!("{}/{display_id}", owner_base(owner)),
        owner.version(),
    )
}

/// Identity mapping applied to a subtree (or several) in one pass, so
/// references between rewritten objects stay consistent.
struct Rewrite<'a> {
    namespace: Option<(&'a str, &'a str)>,
    version: Option<String>,
    identities: HashMap<String, String>,
    /// New identity back to the source object that claimed it.
    claimed: HashMap<String, String>,
}

impl<'a> Rewrite<'a> {
    fn new(namespace: Option<(&'a str, &'a str)>, version: Option<String>) -> Self {
        Self {
            namespace,
            version,
            identities: HashMap::new(),
            claimed: HashMap::new(),
        }
    }

    fn swap(&self, uri: &str) -> String {
        let Some((from, to)) = self.namespace else {
            return uri.to_string();
        };
        match uri.strip_prefix(from) {
            Some(rest) if rest.is_empty() || rest.starts_with(['/', '#']) => format!("{to}{rest}"),
            _ => uri.to_string(),
        }
    }

    /// Records new identities for `object` and its subtree. `persistent` is
    /// the new persistent identity when it is derived from the owner.
    ///
    /// Fails with `DuplicateUri` when two source objects would end up with
    /// the same identity, e.g. siblings sharing a displayId.
    fn plan(&mut self, object: &SbolObject, persistent: Option<String>) -> Result<()> {
        let version = self
            .version
            .clone()
            .or_else(|| object.version().map(str::to_string));
        let (persistent, identity) = match (persistent, object.display_id()) {
            (Some(persistent), Some(_)) => {
                let identity = versioned(&persistent, version.as_deref());
                (persistent, identity)
            }
            _ => {
                let old = object.persistent_identity().unwrap_or(object.identity());
                (self.swap(old), self.swap(object.identity()))
            }
        };
        match self.claimed.get(&identity) {
            Some(source) if source != object.identity() => {
                return Err(Error::DuplicateUri { uri: identity });
            }
            _ => {
                self.claimed
                    .insert(identity.clone(), object.identity().to_string());
            }
        }
        self.identities
            .insert(object.identity().to_string(), identity);
        if let Some(old) = object.persistent_identity() {
            self.identities.insert(old.to_string(), persistent.clone());
        }
        for (_, children) in object.owned_collections() {
            for child in children {
                let derived = child
                    .display_id()
                    .map(|display_id| format!("{persistent}/{display_id}"));
                self.plan(child, derived)?;
            }
        }
        Ok(())
    }

    fn mapped(&self, uri: &str) -> String {
        self.identities
            .get(uri)
            .cloned()
            .unwrap_or_else(|| uri.to_string())
    }

    fn apply(&self, mut object: SbolObject, parent: Option<String>) -> Result<SbolObject> {
        let identity = self.mapped(object.identity());
        object.rename(identity.clone());
        object.set_parent(parent);
        for value in object.store_mut().values_mut() {
            if let PropertyValue::Reference(uri) = value {
                if let Some(mapped) = self.identities.get(uri.as_str()) {
                    uri.clone_from(mapped);
                }
            }
        }
        if let Some(version) = &self.version {
            if !object.property_values(vocab::VERSION).is_empty() {
                object.store_mut().replace(
                    vocab::VERSION,
                    vec![PropertyValue::Literal(version.clone())],
                );
            }
        }
        let collections = object.take_owned();
        for (uri, collection) in collections {
            let mut rebuilt = crate::model::OwnedCollection::default();
            for child in collection.into_children() {
                rebuilt.insert(self.apply(child, Some(identity.clone()))?)?;
            }
            object.owned_mut().insert(uri, rebuilt);
        }
        Ok(object)
    }
}

/// Re-identifies an unowned subtree for attachment under `owner`.
/// Objects without a displayId keep their identity.
pub(crate) fn rebase(object: SbolObject, owner: &SbolObject) -> Result<SbolObject> {
    let Some(display_id) = object.display_id() else {
        return Ok(object);
    };
    let persistent = format!("{}/{display_id}", owner_base(owner));
    let mut rewrite = Rewrite::new(None, owner.version().map(str::to_string));
    rewrite.plan(&object, Some(persistent))?;
    rewrite.apply(object, Some(owner.identity().to_string()))
}

fn parse_version(raw: &str) -> Result<Version> {
    Version::parse(raw).map_err(|expected| Error::invalid_format(vocab::VERSION, raw, expected))
}

/// Copies top-level objects with their subtrees under a new namespace
/// and/or version, rewriting every identity and internal reference.
///
/// Each copy records its source in `wasDerivedFrom`. An explicit version
/// must exceed every source version.
pub(crate) fn copy_all(
    config: &Config,
    objects: &[&SbolObject],
    namespace: Option<&str>,
    version: Option<&str>,
) -> Result<Vec<SbolObject>> {
    let version = match version {
        Some(raw) => {
            let target = parse_version(raw)?;
            for object in objects {
                if let Some(source) = object.version() {
                    if target <= parse_version(source)? {
                        return Err(Error::InvalidArgument(format!(
                            "copy version {raw} does not exceed {source} of `{}`",
                            object.identity()
                        )));
                    }
                }
            }
            Some(raw.to_string())
        }
        None => None,
    };
    let target_namespace = namespace.map(|ns| ns.trim_end_matches(['/', '#']));
    let swap = target_namespace.map(|to| (config.namespace(), to));

    let mut rewrite = Rewrite::new(swap, version);
    for object in objects {
        let persistent = object
            .display_id()
            .and(object.persistent_identity())
            .map(|old| rewrite.swap(old));
        rewrite.plan(object, persistent)?;
    }

    let mut copies = Vec::with_capacity(objects.len());
    for object in objects {
        let source = object.identity().to_string();
        let mut copy = rewrite.apply((*object).clone(), None)?;
        if copy.identity() == source {
            return Err(Error::DuplicateUri { uri: source });
        }
        copy.store_mut()
            .push(vocab::WAS_DERIVED_FROM, PropertyValue::Reference(source));
        copies.push(copy);
    }
    Ok(copies)
}

impl SbolObject {
    /// Copies this object and its subtree.
    ///
    /// With a namespace, identities under the configured homespace move to
    /// it and the version is kept unless given. Without either, the patch
    /// version is incremented. Owned children follow their new owner;
    /// references into the copied subtree are rewritten, references to
    /// anything else are kept.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when an explicit version does not exceed the
    /// current one, `InvalidFormat` for a malformed version, and
    /// `DuplicateUri` when the copy would keep the source identity or two
    /// objects of the subtree would share one.
    pub fn copy(
        &self,
        config: &Config,
        namespace: Option<&str>,
        version: Option<&str>,
    ) -> Result<SbolObject> {
        let incremented;
        let version = match (namespace, version, self.version()) {
            (None, None, Some(current)) => {
                incremented = parse_version(current)?.increment_patch();
                Some(incremented.as_str())
            }
            (_, version, _) => version,
        };
        let mut copies = copy_all(config, &[self], namespace, version)?;
        copies
            .pop()
            .ok_or_else(|| Error::Message("copy produced no object".to_string()))
    }
}
