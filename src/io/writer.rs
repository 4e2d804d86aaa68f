use std::collections::{BTreeMap, HashMap};

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use super::split_uri;
use crate::{
    model::{Identified, PropertyValue, SbolObject},
    vocab, Document, Error, Result,
};

/// Prefix bindings for one serialization: the document's declarations plus
/// generated `nsN` prefixes for any other namespace in use.
#[derive(Debug, Default)]
struct Prefixes {
    declared: BTreeMap<String, String>,
    by_namespace: HashMap<String, String>,
}

impl Prefixes {
    fn for_document(document: &Document) -> Result<Self> {
        let mut prefixes = Self::default();
        for (prefix, namespace) in document.namespaces() {
            prefixes
                .declared
                .insert(prefix.to_string(), namespace.to_string());
            prefixes
                .by_namespace
                .entry(namespace.to_string())
                .or_insert_with(|| prefix.to_string());
        }
        for object in document.objects() {
            prefixes.ensure(object.type_uri())?;
            for (property, _) in object.properties().iter() {
                prefixes.ensure(property)?;
            }
            for (property, _) in object.owned_collections() {
                prefixes.ensure(property)?;
            }
        }
        Ok(prefixes)
    }

    fn ensure(&mut self, uri: &str) -> Result<()> {
        let (namespace, _) = split(uri)?;
        if self.by_namespace.contains_key(namespace) {
            return Ok(());
        }
        let mut counter = 0;
        let prefix = loop {
            let candidate = format!("ns{counter}");
            if !self.declared.contains_key(&candidate) {
                break candidate;
            }
            counter += 1;
        };
        self.declared.insert(prefix.clone(), namespace.to_string());
        self.by_namespace.insert(namespace.to_string(), prefix);
        Ok(())
    }

    fn qualify(&self, uri: &str) -> Result<String> {
        let (namespace, local) = split(uri)?;
        let prefix = self
            .by_namespace
            .get(namespace)
            .ok_or_else(|| Error::MissingNamespace {
                namespace: namespace.to_string(),
            })?;
        Ok(format!("{prefix}:{local}"))
    }
}

fn split(uri: &str) -> Result<(&str, &str)> {
    split_uri(uri).ok_or_else(|| {
        Error::InvalidArgument(format!("`{uri}` cannot be written as an XML element name"))
    })
}

/// Renders the whole document, top levels in identity order.
pub(crate) fn to_string(document: &Document) -> Result<String> {
    let prefixes = Prefixes::for_document(document)?;
    let about = prefixes.qualify(vocab::RDF_ABOUT)?;
    let resource = prefixes.qualify(vocab::RDF_RESOURCE)?;
    let root = prefixes.qualify(vocab::RDF_ROOT)?;

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    let mut start = BytesStart::new(root.as_str());
    for (prefix, namespace) in &prefixes.declared {
        let key = format!("xmlns:{prefix}");
        start.push_attribute((key.as_str(), namespace.as_str()));
    }
    writer.write_event(Event::Start(start))?;

    let names = Names {
        prefixes: &prefixes,
        about: &about,
        resource: &resource,
    };
    for object in document.top_levels() {
        names.write_object(&mut writer, object)?;
    }
    writer.write_event(Event::End(BytesEnd::new(root.as_str())))?;
    Ok(String::from_utf8(writer.into_inner())?)
}

struct Names<'p> {
    prefixes: &'p Prefixes,
    about: &'p str,
    resource: &'p str,
}

impl Names<'_> {
    fn write_object(&self, writer: &mut Writer<Vec<u8>>, object: &SbolObject) -> Result<()> {
        let name = self.prefixes.qualify(object.type_uri())?;
        let mut start = BytesStart::new(name.as_str());
        start.push_attribute((self.about, object.identity()));
        writer.write_event(Event::Start(start))?;

        for (property, values) in object.properties().iter() {
            let element = self.prefixes.qualify(property)?;
            for value in values {
                match value {
                    PropertyValue::Reference(uri) => {
                        let mut empty = BytesStart::new(element.as_str());
                        empty.push_attribute((self.resource, uri.as_str()));
                        writer.write_event(Event::Empty(empty))?;
                    }
                    PropertyValue::Literal(text) if text.is_empty() => {
                        writer.write_event(Event::Empty(BytesStart::new(element.as_str())))?;
                    }
                    PropertyValue::Literal(text) => {
                        writer.write_event(Event::Start(BytesStart::new(element.as_str())))?;
                        writer.write_event(Event::Text(BytesText::new(text)))?;
                        writer.write_event(Event::End(BytesEnd::new(element.as_str())))?;
                    }
                }
            }
        }

        for (property, children) in object.owned_collections() {
            let element = self.prefixes.qualify(property)?;
            for child in children {
                writer.write_event(Event::Start(BytesStart::new(element.as_str())))?;
                self.write_object(writer, child)?;
                writer.write_event(Event::End(BytesEnd::new(element.as_str())))?;
            }
        }

        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        classes::{ComponentDefinition, SequenceAnnotation},
        model::PropertyValue,
        Config, Document,
    };

    #[test]
    fn nests_owned_objects_and_marks_references() {
        let config = Config::default().with_homespace("http://sys-bio.org");
        let mut part = ComponentDefinition::new(&config, "B0032").expect("part");
        let annotation = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create(&config, "anno")
            .expect("annotation");
        SequenceAnnotation::add_range(annotation, &config, "range", 1, 10).expect("range");
        part.annotate(
            "http://igem.org/experience",
            PropertyValue::Literal("Works <well> & fast".into()),
        )
        .expect("annotation");
        let mut document = Document::new(config);
        document.add(part).expect("added");

        let xml = super::to_string(&document).expect("serialized");
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("xmlns:ns0=\"http://igem.org/\""));
        assert!(xml.contains("<sbol:ComponentDefinition rdf:about=\"http://sys-bio.org/B0032/1.0.0\">"));
        assert!(xml.contains(
            "<sbol:type rdf:resource=\"http://www.biopax.org/release/biopax-level3.owl#DnaRegion\"/>"
        ));
        assert!(xml.contains("<sbol:displayId>B0032</sbol:displayId>"));
        assert!(xml.contains("<ns0:experience>Works &lt;well&gt; &amp; fast</ns0:experience>"));
        assert!(xml.contains("<sbol:start>1</sbol:start>"));
        assert!(xml.contains("<sbol:Range rdf:about=\"http://sys-bio.org/B0032/anno/range/1.0.0\">"));
    }
}
