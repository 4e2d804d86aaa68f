//! RDF/XML codec.
//!
//! Every top-level object is an element named by its type URI and carrying
//! `rdf:about`. Literal properties are child elements with text content,
//! references are empty child elements with `rdf:resource`, and owned
//! objects nest inside an element named by their owning property.

pub(crate) mod reader;
pub(crate) mod writer;

/// Splits a URI into namespace and local name at the last `#` or `/`.
///
/// Returns `None` when the local name is not an XML name, i.e. the URI
/// cannot be written as a qualified element name.
#[must_use]
pub fn split_uri(uri: &str) -> Option<(&str, &str)> {
    let at = uri.rfind(['#', '/'])?;
    let (namespace, local) = (&uri[..=at], &uri[at + 1..]);
    is_xml_name(local).then_some((namespace, local))
}

/// Whether `name` is usable as an XML prefix or local name.
pub(crate) fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("http://sbols.org/v2#displayId", Some(("http://sbols.org/v2#", "displayId")))]
    #[case(
        "http://www.ontology-of-units-of-measure.org/resource/om-2/hasUnit",
        Some(("http://www.ontology-of-units-of-measure.org/resource/om-2/", "hasUnit"))
    )]
    #[case("http://igem.org/", None)]
    #[case("http://igem.org/2020", None)]
    #[case("urn:isbn", None)]
    fn splits_uris_into_qualified_names(
        #[case] uri: &str,
        #[case] expected: Option<(&str, &str)>,
    ) {
        assert_eq!(split_uri(uri), expected);
    }
}
