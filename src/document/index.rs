use std::collections::{BTreeMap, HashSet};

use crate::{
    model::{Identified, SbolObject},
    Error, Result,
};

/// Where an indexed object lives: the top level that owns it and the
/// `(property, identity)` steps down to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Locator {
    pub(crate) root: String,
    pub(crate) path: Vec<(String, String)>,
}

impl Locator {
    fn child(&self, property: &str, identity: &str) -> Self {
        let mut path = self.path.clone();
        path.push((property.to_string(), identity.to_string()));
        Self {
            root: self.root.clone(),
            path,
        }
    }
}

/// Index entries for a top-level object and everything it owns.
///
/// # Errors
///
/// `DuplicateUri` when two objects in the subtree share an identity.
pub(crate) fn collect(root: &SbolObject) -> Result<Vec<(String, Locator)>> {
    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let locator = Locator {
        root: root.identity().to_string(),
        path: Vec::new(),
    };
    walk(root, locator, &mut entries, &mut seen)?;
    Ok(entries)
}

fn walk<'a>(
    object: &'a SbolObject,
    locator: Locator,
    entries: &mut Vec<(String, Locator)>,
    seen: &mut HashSet<&'a str>,
) -> Result<()> {
    if !seen.insert(object.identity()) {
        return Err(Error::duplicate(object.identity()));
    }
    for (property, children) in object.owned_collections() {
        for child in children {
            walk(child, locator.child(property, child.identity()), entries, seen)?;
        }
    }
    entries.push((object.identity().to_string(), locator));
    Ok(())
}

pub(crate) fn resolve<'a>(
    registry: &'a BTreeMap<String, SbolObject>,
    locator: &Locator,
) -> Option<&'a SbolObject> {
    let mut object = registry.get(&locator.root)?;
    for (property, identity) in &locator.path {
        object = object.collection(property)?.get(identity)?;
    }
    Some(object)
}

pub(crate) fn resolve_mut<'a>(
    registry: &'a mut BTreeMap<String, SbolObject>,
    locator: &Locator,
) -> Option<&'a mut SbolObject> {
    let mut object = registry.get_mut(&locator.root)?;
    for (property, identity) in &locator.path {
        object = object.collection_mut(property)?.get_mut(identity)?;
    }
    Some(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classes::{ComponentDefinition, SequenceAnnotation},
        Config,
    };

    #[test]
    fn locators_reach_every_descendant() {
        let config = Config::default();
        let mut part = ComponentDefinition::new(&config, "gene").expect("part");
        let annotation = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create(&config, "anno")
            .expect("annotation");
        SequenceAnnotation::add_range(annotation, &config, "range", 1, 9).expect("range");

        let entries = collect(&part).expect("entries");
        assert_eq!(entries.len(), 3);

        let mut registry = BTreeMap::new();
        registry.insert(part.identity().to_string(), part);
        for (identity, locator) in &entries {
            let found = resolve(&registry, locator).expect("resolves");
            assert_eq!(found.identity(), identity);
        }
        let (_, deepest) = entries
            .iter()
            .find(|(identity, _)| identity.ends_with("range/1.0.0"))
            .expect("range entry");
        assert_eq!(deepest.path.len(), 2);
    }
}
