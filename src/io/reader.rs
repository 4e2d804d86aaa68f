use quick_xml::{
    events::{BytesStart, Event},
    Reader,
};

use crate::{
    model::{Identified, PropertyValue, SbolClass, SbolObject},
    vocab, Error, Result,
};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Objects and prefix bindings read from one RDF/XML document.
#[derive(Debug, Default)]
pub(crate) struct Parsed {
    /// Prefixed bindings in document order, root element first. Default
    /// namespaces carry no prefix to reuse and are left out.
    pub(crate) namespaces: Vec<(String, String)>,
    /// Top-level objects with their owned subtrees attached.
    pub(crate) objects: Vec<SbolObject>,
}

/// Element tree with names expanded to full URIs.
#[derive(Debug, Default)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    fn attribute(&self, uri: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(name, _)| name == uri)
            .map(|(_, value)| value.as_str())
    }
}

type Bindings = Vec<(String, String)>;

pub(crate) fn parse(content: &str) -> Result<Parsed> {
    let (root, declared) = parse_tree(content)?;
    if root.name != vocab::RDF_ROOT {
        return Err(Error::Malformed(format!(
            "root element `{}` is not rdf:RDF",
            root.name
        )));
    }
    let objects = root
        .children
        .into_iter()
        .map(read_object)
        .collect::<Result<Vec<_>>>()?;
    let namespaces = declared
        .into_iter()
        .filter(|(prefix, _)| !prefix.is_empty())
        .collect();
    Ok(Parsed {
        namespaces,
        objects,
    })
}

fn parse_tree(content: &str) -> Result<(Element, Bindings)> {
    let mut reader = Reader::from_str(content);
    let mut scopes: Vec<Bindings> = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut declared = Bindings::new();

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let (element, bindings) = open_element(&start, &scopes, root.is_some())?;
                declared.extend(bindings.iter().cloned());
                scopes.push(bindings);
                open.push(element);
            }
            Event::Empty(start) => {
                let (element, bindings) = open_element(&start, &scopes, root.is_some())?;
                declared.extend(bindings);
                close(element, &mut open, &mut root);
            }
            Event::End(_) => {
                scopes.pop();
                let element = open
                    .pop()
                    .ok_or_else(|| Error::Malformed("unbalanced end tag".to_string()))?;
                close(element, &mut open, &mut root);
            }
            Event::Text(text) => {
                let text = text.unescape()?;
                append_text(&mut open, &text)?;
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)?;
                append_text(&mut open, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(Error::Malformed(format!(
            "element `{}` is never closed",
            element.name
        )));
    }
    root.map(|element| (element, declared))
        .ok_or_else(|| Error::Malformed("document has no root element".to_string()))
}

fn close(element: Element, open: &mut [Element], root: &mut Option<Element>) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn append_text(open: &mut [Element], text: &str) -> Result<()> {
    match open.last_mut() {
        Some(element) => element.text.push_str(text),
        None if text.trim().is_empty() => {}
        None => {
            return Err(Error::Malformed(
                "text outside the root element".to_string(),
            ))
        }
    }
    Ok(())
}

/// Reads the namespace declarations of `start` and expands its names
/// against them and the enclosing scopes.
fn open_element(
    start: &BytesStart<'_>,
    scopes: &[Bindings],
    after_root: bool,
) -> Result<(Element, Bindings)> {
    if after_root && scopes.is_empty() {
        return Err(Error::Malformed(
            "more than one root element".to_string(),
        ));
    }
    let mut bindings = Bindings::new();
    let mut raw = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let key = std::str::from_utf8(attribute.key.as_ref())?.to_string();
        let value = attribute.unescape_value()?.into_owned();
        if key == "xmlns" {
            bindings.push((String::new(), value));
        } else if let Some(prefix) = key.strip_prefix("xmlns:") {
            bindings.push((prefix.to_string(), value));
        } else {
            raw.push((key, value));
        }
    }

    let qname = std::str::from_utf8(start.name().as_ref())?.to_string();
    let name = expand(&qname, true, &bindings, scopes)?;
    let attributes = raw
        .into_iter()
        .map(|(key, value)| Ok((expand(&key, false, &bindings, scopes)?, value)))
        .collect::<Result<Vec<_>>>()?;
    Ok((
        Element {
            name,
            attributes,
            ..Element::default()
        },
        bindings,
    ))
}

fn lookup<'s>(prefix: &str, bindings: &'s Bindings, scopes: &'s [Bindings]) -> Option<&'s str> {
    std::iter::once(bindings)
        .chain(scopes.iter().rev())
        .find_map(|scope| {
            scope
                .iter()
                .rev()
                .find(|(bound, _)| bound == prefix)
                .map(|(_, namespace)| namespace.as_str())
        })
}

/// Unprefixed attributes stay local; unprefixed elements take the default
/// namespace.
fn expand(qname: &str, element: bool, bindings: &Bindings, scopes: &[Bindings]) -> Result<String> {
    match qname.split_once(':') {
        Some(("xml", local)) => Ok(format!("{XML_NAMESPACE}{local}")),
        Some((prefix, local)) => lookup(prefix, bindings, scopes)
            .map(|namespace| format!("{namespace}{local}"))
            .ok_or_else(|| Error::Malformed(format!("unbound prefix `{prefix}` in `{qname}`"))),
        None if element => lookup("", bindings, scopes)
            .map(|namespace| format!("{namespace}{qname}"))
            .ok_or_else(|| Error::Malformed(format!("element `{qname}` has no namespace"))),
        None => Ok(qname.to_string()),
    }
}

/// Builds an object from a typed node element. Property elements carrying
/// `rdf:resource` become references, elements with nested nodes become
/// owned children, anything else is a literal.
fn read_object(element: Element) -> Result<SbolObject> {
    let identity = element
        .attribute(vocab::RDF_ABOUT)
        .ok_or_else(|| Error::Malformed(format!("`{}` element has no rdf:about", element.name)))?
        .to_string();
    let class = SbolClass::from_type_uri(&element.name);
    let mut object = SbolObject::bare(class, element.name, identity);

    for property in element.children {
        if let Some(uri) = property.attribute(vocab::RDF_RESOURCE) {
            if !property.children.is_empty() {
                return Err(Error::Malformed(format!(
                    "`{}` of `{}` has both rdf:resource and nested objects",
                    property.name,
                    object.identity()
                )));
            }
            let value = PropertyValue::Reference(uri.to_string());
            object.store_mut().push(&property.name, value);
        } else if property.children.is_empty() {
            object
                .store_mut()
                .push(&property.name, PropertyValue::Literal(property.text));
        } else {
            for node in property.children {
                let child = read_object(node)?;
                object.insert_child(&property.name, child)?;
            }
        }
    }
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:sbol="http://sbols.org/v2#" xmlns:igem="http://igem.org/">
  <sbol:ComponentDefinition rdf:about="http://sys-bio.org/B0032/1.0.0">
    <sbol:displayId>B0032</sbol:displayId>
    <sbol:type rdf:resource="http://www.biopax.org/release/biopax-level3.owl#DnaRegion"/>
    <igem:notes>RBS &amp; spacer</igem:notes>
    <igem:sketch><![CDATA[<rbs>]]></igem:sketch>
    <sbol:sequenceAnnotation>
      <sbol:SequenceAnnotation rdf:about="http://sys-bio.org/B0032/anno/1.0.0">
        <sbol:displayId>anno</sbol:displayId>
      </sbol:SequenceAnnotation>
    </sbol:sequenceAnnotation>
  </sbol:ComponentDefinition>
</rdf:RDF>
"#;

    #[test]
    fn reads_objects_and_root_prefixes() {
        let parsed = parse(DOCUMENT).expect("parsed");
        assert_eq!(
            parsed
                .namespaces
                .iter()
                .map(|(prefix, _)| prefix.as_str())
                .collect::<Vec<_>>(),
            vec!["rdf", "sbol", "igem"]
        );
        assert_eq!(parsed.objects.len(), 1);

        let part = &parsed.objects[0];
        assert_eq!(part.class(), SbolClass::ComponentDefinition);
        assert_eq!(part.display_id(), Some("B0032"));
        assert_eq!(
            part.property_values("http://igem.org/notes"),
            &[PropertyValue::Literal("RBS & spacer".to_string())]
        );
        assert_eq!(
            part.property_values("http://igem.org/sketch"),
            &[PropertyValue::Literal("<rbs>".to_string())]
        );
        assert!(part.property_values(vocab::TYPE)[0].is_reference());

        let (property, mut children) = part.owned_collections().next().expect("owned");
        assert_eq!(property, vocab::SEQUENCE_ANNOTATION);
        let annotation = children.next().expect("annotation");
        assert_eq!(annotation.class(), SbolClass::SequenceAnnotation);
        assert_eq!(annotation.parent(), Some("http://sys-bio.org/B0032/1.0.0"));
    }

    #[test]
    fn collects_nested_prefixes_and_skips_default_namespaces() {
        let content = r#"<RDF xmlns="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <Sequence xmlns="http://sbols.org/v2#" xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" rdf:about="http://examples.com/seq/1.0.0">
    <elements>atg</elements>
    <igem:status xmlns:igem="http://igem.org/">Available</igem:status>
  </Sequence>
</RDF>"#;
        let parsed = parse(content).expect("parsed");
        assert_eq!(
            parsed.namespaces,
            vec![
                ("rdf".to_string(), vocab::RDF.to_string()),
                ("igem".to_string(), "http://igem.org/".to_string()),
            ]
        );
        let sequence = &parsed.objects[0];
        assert_eq!(sequence.class(), SbolClass::Sequence);
        assert_eq!(
            sequence.property_values(vocab::ELEMENTS),
            &[PropertyValue::Literal("atg".to_string())]
        );
        assert_eq!(
            sequence.property_values("http://igem.org/status"),
            &[PropertyValue::Literal("Available".to_string())]
        );
    }

    #[test]
    fn rejects_unbound_prefixes() {
        let content = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
  <sbol:Sequence rdf:about="http://examples.com/seq/1.0.0"/>
</rdf:RDF>"#;
        assert!(matches!(
            parse(content),
            Err(Error::Malformed(message)) if message.contains("unbound prefix `sbol`")
        ));
    }

    #[test]
    fn rejects_other_roots_and_anonymous_nodes() {
        let content = r#"<sbol:Sequence xmlns:sbol="http://sbols.org/v2#"/>"#;
        assert!(matches!(parse(content), Err(Error::Malformed(_))));

        let content = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns:sbol="http://sbols.org/v2#">
  <sbol:Sequence/>
</rdf:RDF>"#;
        assert!(matches!(
            parse(content),
            Err(Error::Malformed(message)) if message.contains("no rdf:about")
        ));
    }
}
