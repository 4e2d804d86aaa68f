use std::{
    collections::BTreeMap,
    fmt::{self, Display, Formatter},
};

use serde::Serialize;

use crate::{
    model::{Identified, SbolClass},
    Document,
};

/// Counts describing a document without walking it again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DocumentSummary {
    /// Number of declared namespace prefixes.
    pub namespaces: usize,
    /// Number of top-level objects.
    pub top_levels: usize,
    /// Number of indexed objects, top levels included.
    pub objects: usize,
    /// Object count per class name; extension objects count under their
    /// type URI.
    pub classes: BTreeMap<String, usize>,
}

impl From<&Document> for DocumentSummary {
    fn from(document: &Document) -> Self {
        let mut classes = BTreeMap::new();
        for object in document.objects() {
            let name = match object.class() {
                SbolClass::Custom => object.type_uri().to_string(),
                class => class.name().to_string(),
            };
            *classes.entry(name).or_insert(0) += 1;
        }
        Self {
            namespaces: document.namespaces().count(),
            top_levels: document.top_levels().count(),
            objects: document.len(),
            classes,
        }
    }
}

impl Display for DocumentSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} object(s), {} top-level, {} namespace(s)",
            self.objects, self.top_levels, self.namespaces
        )?;
        for (class, count) in &self.classes {
            write!(f, "\n  {class}: {count}")?;
        }
        Ok(())
    }
}
