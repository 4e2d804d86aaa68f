use std::collections::{BTreeSet, HashMap};

use super::{Findings, GlobalRule, ViolationKind};
use crate::{
    document::sub_definitions,
    model::{Identified, SbolClass, SbolObject, Shape},
    vocab, Document,
};

pub(super) fn global() -> Vec<GlobalRule> {
    vec![
        GlobalRule {
            name: "namespace_presence",
            check: namespace_presence,
        },
        GlobalRule {
            name: "required_properties",
            check: required_properties,
        },
        GlobalRule {
            name: "persistent_identity_version",
            check: persistent_identity_version,
        },
        GlobalRule {
            name: "reference_targets",
            check: reference_targets,
        },
        GlobalRule {
            name: "derivation_cycles",
            check: derivation_cycles,
        },
        GlobalRule {
            name: "definition_cycles",
            check: definition_cycles,
        },
    ]
}

fn namespace_presence(document: &Document, findings: &mut Findings<'_>) {
    for (prefix, namespace) in [("rdf", vocab::RDF), ("sbol", vocab::SBOL)] {
        if !document.declares(namespace) {
            findings.error(
                ViolationKind::MissingNamespace,
                namespace,
                format!("document must declare the {prefix} namespace"),
            );
        }
    }
}

fn required_properties(document: &Document, findings: &mut Findings<'_>) {
    for object in document.objects() {
        for field in object.class().fields() {
            let count = object.field_count(field.uri, field.shape);
            if !field.cardinality.admits(count) {
                findings.error(
                    ViolationKind::Cardinality,
                    object.identity(),
                    format!(
                        "`{}` holds {count} value(s), expected {}",
                        field.uri, field.cardinality
                    ),
                );
            }
        }
    }
}

fn persistent_identity_version(document: &Document, findings: &mut Findings<'_>) {
    let mut seen: HashMap<(&str, Option<&str>), &str> = HashMap::new();
    for object in document.objects() {
        let Some(persistent) = object.persistent_identity() else {
            continue;
        };
        if let Some(first) = seen.insert((persistent, object.version()), object.identity()) {
            findings.error(
                ViolationKind::DuplicateUri,
                object.identity(),
                format!("shares persistentIdentity `{persistent}` and version with `{first}`"),
            );
        }
    }
}

fn reference_targets(document: &Document, findings: &mut Findings<'_>) {
    for object in document.objects() {
        for field in object.class().fields() {
            let Shape::Reference(expected) = field.shape else {
                continue;
            };
            for value in object.property_values(field.uri) {
                let uri = value.as_str();
                match document.find(uri) {
                    None => findings.warning(
                        ViolationKind::DanglingReference,
                        object.identity(),
                        format!(
                            "`{}` points at `{uri}`, which is not in the document",
                            field.uri
                        ),
                    ),
                    Some(target) if !target.class().is_a(expected) => findings.error(
                        ViolationKind::TypeMismatch,
                        object.identity(),
                        format!(
                            "`{}` points at {} `{uri}`, expected a {expected}",
                            field.uri,
                            target.class()
                        ),
                    ),
                    Some(_) => {}
                }
            }
        }
    }
}

fn derivation_cycles(document: &Document, findings: &mut Findings<'_>) {
    let roots: Vec<&str> = document.objects().map(SbolObject::identity).collect();
    let successors = |uri: &str| -> Vec<String> {
        document
            .find(uri)
            .map(|object| {
                object
                    .was_derived_from()
                    .into_iter()
                    .filter(|source| document.contains(source))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };
    for uri in closing_nodes(&roots, successors) {
        findings.error(
            ViolationKind::CyclicReference,
            uri,
            "wasDerivedFrom chain loops back to this object",
        );
    }
}

fn definition_cycles(document: &Document, findings: &mut Findings<'_>) {
    let roots: Vec<&str> = document
        .top_levels()
        .filter(|object| {
            matches!(
                object.class(),
                SbolClass::ComponentDefinition | SbolClass::ModuleDefinition
            )
        })
        .map(SbolObject::identity)
        .collect();
    let successors = |uri: &str| -> Vec<String> {
        document
            .find(uri)
            .map(|definition| {
                sub_definitions(document, definition)
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    };
    for uri in closing_nodes(&roots, successors) {
        findings.error(
            ViolationKind::CyclicReference,
            uri,
            "definition hierarchy instantiates this definition inside itself",
        );
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Done,
}

/// Nodes reached again while still on the depth-first path, i.e. the
/// entry points of every cycle.
fn closing_nodes(roots: &[&str], successors: impl Fn(&str) -> Vec<String>) -> BTreeSet<String> {
    let mut marks: HashMap<String, Mark> = HashMap::new();
    let mut closing = BTreeSet::new();
    for root in roots {
        if marks.contains_key(*root) {
            continue;
        }
        // explicit stack of (node, successors still to visit)
        let mut stack: Vec<(String, std::vec::IntoIter<String>)> = Vec::new();
        marks.insert((*root).to_string(), Mark::Active);
        stack.push(((*root).to_string(), successors(*root).into_iter()));
        while let Some((node, pending)) = stack.last_mut() {
            match pending.next() {
                Some(next) => match marks.get(&next) {
                    Some(Mark::Active) => {
                        closing.insert(next);
                    }
                    Some(Mark::Done) => {}
                    None => {
                        marks.insert(next.clone(), Mark::Active);
                        let followers = successors(&next).into_iter();
                        stack.push((next, followers));
                    }
                },
                None => {
                    marks.insert(node.clone(), Mark::Done);
                    stack.pop();
                }
            }
        }
    }
    closing
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        classes::{identified, ComponentDefinition},
        validation::RuleSet,
        Config,
    };

    fn graph<'a>(edges: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Vec<String> + 'a {
        move |node| {
            edges
                .iter()
                .filter(|(from, _)| *from == node)
                .map(|(_, to)| (*to).to_string())
                .collect()
        }
    }

    #[test]
    fn acyclic_graphs_have_no_closing_nodes() {
        let edges = [("a", "b"), ("b", "c"), ("a", "c")];
        assert!(closing_nodes(&["a", "b", "c"], graph(&edges)).is_empty());
    }

    #[test]
    fn cycles_are_reported_once_at_their_entry() {
        let edges = [("a", "b"), ("b", "c"), ("c", "a"), ("d", "d")];
        let closing = closing_nodes(&["a", "d"], graph(&edges));
        assert_eq!(
            closing.into_iter().collect::<Vec<_>>(),
            vec!["a".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn self_derivation_closes_a_loop() {
        let config = Config::default();
        let mut part = ComponentDefinition::new(&config, "part").expect("part");
        part.property(identified::WAS_DERIVED_FROM)
            .add("http://examples.com/part/1.0.0")
            .expect("derivation");
        let mut document = Document::new(config);
        document.add(part).expect("registered");

        let report = RuleSet::sbol().check_document(&document);
        let found: Vec<_> = report
            .errors()
            .map(|violation| (violation.rule, violation.subject.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![("derivation_cycles", "http://examples.com/part/1.0.0")]
        );
    }
}
