use crate::{
    classes::{Component, ComponentDefinition, Module, ModuleDefinition},
    model::{Identified, SbolClass, SbolObject},
    Document, Error, Result,
};

/// One definition reached while walking a design hierarchy.
#[derive(Clone, Copy, Debug)]
pub struct HierarchyNode<'a> {
    pub object: &'a SbolObject,
    /// Zero for the starting definition.
    pub depth: usize,
}

#[derive(Clone, Debug)]
struct Frame<'a> {
    object: &'a SbolObject,
    depth: usize,
    /// Identities from the root down to `object`, inclusive.
    path: Vec<&'a str>,
}

/// Lazy pre-order walk over the definitions a ComponentDefinition or
/// ModuleDefinition instantiates through its components or modules.
///
/// A clone taken before iterating walks the same hierarchy again.
/// Definitions outside the document are skipped. A definition instantiated
/// inside itself yields one `CyclicReference` error, after which the walk
/// ends.
#[derive(Clone, Debug)]
pub struct Hierarchy<'a> {
    document: &'a Document,
    stack: Vec<Frame<'a>>,
    cycle: Option<String>,
    finished: bool,
}

impl<'a> Hierarchy<'a> {
    pub(crate) fn new(document: &'a Document, root: &'a SbolObject) -> Self {
        Self {
            document,
            stack: vec![Frame {
                object: root,
                depth: 0,
                path: vec![root.identity()],
            }],
            cycle: None,
            finished: false,
        }
    }
}

impl<'a> Iterator for Hierarchy<'a> {
    type Item = Result<HierarchyNode<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(uri) = self.cycle.take() {
            self.finished = true;
            return Some(Err(Error::CyclicReference { uri }));
        }
        let Some(frame) = self.stack.pop() else {
            self.finished = true;
            return None;
        };
        for uri in sub_definitions(self.document, frame.object).into_iter().rev() {
            if frame.path.contains(&uri) {
                self.cycle = Some(uri.to_string());
                continue;
            }
            let Some(definition) = self.document.find(uri) else {
                continue;
            };
            let mut path = frame.path.clone();
            path.push(definition.identity());
            self.stack.push(Frame {
                object: definition,
                depth: frame.depth + 1,
                path,
            });
        }
        Some(Ok(HierarchyNode {
            object: frame.object,
            depth: frame.depth,
        }))
    }
}

/// Definitions a ComponentDefinition or ModuleDefinition instantiates,
/// restricted to those registered in `document`, in child order.
pub(crate) fn sub_definitions<'d>(
    document: &Document,
    definition: &'d SbolObject,
) -> Vec<&'d str> {
    let instances: Vec<&SbolObject> = match definition.class() {
        SbolClass::ComponentDefinition => definition
            .children(ComponentDefinition::COMPONENTS)
            .collect(),
        SbolClass::ModuleDefinition => definition.children(ModuleDefinition::MODULES).collect(),
        _ => Vec::new(),
    };
    instances
        .into_iter()
        .filter_map(|instance| match instance.class() {
            SbolClass::Component => instance.references(Component::DEFINITION).first(),
            SbolClass::Module => instance.references(Module::DEFINITION).first(),
            _ => None,
        })
        .filter(|uri| document.contains(uri))
        .collect()
}
