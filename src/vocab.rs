//! Namespace and term URIs of the SBOL vocabulary.
//!
//! Property and class URIs are spelled out in full so the descriptors in
//! [`crate::classes`] can be `const`.

/// RDF namespace.
pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// SBOL core namespace.
pub const SBOL: &str = "http://sbols.org/v2#";
/// Dublin Core terms namespace.
pub const DCTERMS: &str = "http://purl.org/dc/terms/";
/// W3C provenance namespace.
pub const PROV: &str = "http://www.w3.org/ns/prov#";
/// Ontology of units of measure namespace.
pub const OM: &str = "http://www.ontology-of-units-of-measure.org/resource/om-2/";

/// Prefixes declared by every new document.
pub const DEFAULT_PREFIXES: &[(&str, &str)] = &[
    ("rdf", RDF),
    ("sbol", SBOL),
    ("dcterms", DCTERMS),
    ("prov", PROV),
    ("om", OM),
];

pub const RDF_ROOT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#RDF";
pub const RDF_ABOUT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#about";
pub const RDF_RESOURCE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#resource";

// Identified
pub const PERSISTENT_IDENTITY: &str = "http://sbols.org/v2#persistentIdentity";
pub const DISPLAY_ID: &str = "http://sbols.org/v2#displayId";
pub const VERSION: &str = "http://sbols.org/v2#version";
pub const TITLE: &str = "http://purl.org/dc/terms/title";
pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
pub const WAS_DERIVED_FROM: &str = "http://www.w3.org/ns/prov#wasDerivedFrom";
pub const WAS_GENERATED_BY: &str = "http://www.w3.org/ns/prov#wasGeneratedBy";
pub const CREATED: &str = "http://purl.org/dc/terms/created";
pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
pub const ATTACHMENT: &str = "http://sbols.org/v2#attachment";

// Shared SBOL properties
pub const TYPE: &str = "http://sbols.org/v2#type";
pub const ROLE: &str = "http://sbols.org/v2#role";
pub const DEFINITION: &str = "http://sbols.org/v2#definition";
pub const ACCESS: &str = "http://sbols.org/v2#access";
pub const MAPS_TO: &str = "http://sbols.org/v2#mapsTo";
pub const MEASURE: &str = "http://sbols.org/v2#measure";
pub const ORIENTATION: &str = "http://sbols.org/v2#orientation";
pub const SEQUENCE: &str = "http://sbols.org/v2#sequence";

// ComponentDefinition and its children
pub const COMPONENT: &str = "http://sbols.org/v2#component";
pub const SEQUENCE_ANNOTATION: &str = "http://sbols.org/v2#sequenceAnnotation";
pub const SEQUENCE_CONSTRAINT: &str = "http://sbols.org/v2#sequenceConstraint";
pub const ROLE_INTEGRATION: &str = "http://sbols.org/v2#roleIntegration";
pub const SOURCE_LOCATION: &str = "http://sbols.org/v2#sourceLocation";
pub const LOCATION: &str = "http://sbols.org/v2#location";
pub const SUBJECT: &str = "http://sbols.org/v2#subject";
pub const OBJECT: &str = "http://sbols.org/v2#object";
pub const RESTRICTION: &str = "http://sbols.org/v2#restriction";
pub const START: &str = "http://sbols.org/v2#start";
pub const END: &str = "http://sbols.org/v2#end";
pub const AT: &str = "http://sbols.org/v2#at";
pub const ELEMENTS: &str = "http://sbols.org/v2#elements";
pub const ENCODING: &str = "http://sbols.org/v2#encoding";

// ModuleDefinition and its children
pub const MODULE: &str = "http://sbols.org/v2#module";
pub const INTERACTION: &str = "http://sbols.org/v2#interaction";
pub const FUNCTIONAL_COMPONENT: &str = "http://sbols.org/v2#functionalComponent";
pub const MODEL: &str = "http://sbols.org/v2#model";
pub const DIRECTION: &str = "http://sbols.org/v2#direction";
pub const PARTICIPATION: &str = "http://sbols.org/v2#participation";
pub const PARTICIPANT: &str = "http://sbols.org/v2#participant";
pub const LOCAL: &str = "http://sbols.org/v2#local";
pub const REMOTE: &str = "http://sbols.org/v2#remote";
pub const REFINEMENT: &str = "http://sbols.org/v2#refinement";
pub const HAS_NUMERICAL_VALUE: &str =
    "http://www.ontology-of-units-of-measure.org/resource/om-2/hasNumericalValue";
pub const HAS_UNIT: &str = "http://www.ontology-of-units-of-measure.org/resource/om-2/hasUnit";

// Other top levels
pub const MEMBER: &str = "http://sbols.org/v2#member";
pub const SOURCE: &str = "http://sbols.org/v2#source";
pub const LANGUAGE: &str = "http://sbols.org/v2#language";
pub const FRAMEWORK: &str = "http://sbols.org/v2#framework";
pub const FORMAT: &str = "http://sbols.org/v2#format";
pub const SIZE: &str = "http://sbols.org/v2#size";
pub const HASH: &str = "http://sbols.org/v2#hash";

// Provenance
pub const STARTED_AT_TIME: &str = "http://www.w3.org/ns/prov#startedAtTime";
pub const ENDED_AT_TIME: &str = "http://www.w3.org/ns/prov#endedAtTime";
pub const QUALIFIED_USAGE: &str = "http://www.w3.org/ns/prov#qualifiedUsage";
pub const QUALIFIED_ASSOCIATION: &str = "http://www.w3.org/ns/prov#qualifiedAssociation";
pub const WAS_INFORMED_BY: &str = "http://www.w3.org/ns/prov#wasInformedBy";
pub const ENTITY: &str = "http://www.w3.org/ns/prov#entity";
pub const HAD_ROLE: &str = "http://www.w3.org/ns/prov#hadRole";
pub const AGENT: &str = "http://www.w3.org/ns/prov#agent";
pub const HAD_PLAN: &str = "http://www.w3.org/ns/prov#hadPlan";

/// Molecule types (BioPAX).
pub mod types {
    pub const DNA_REGION: &str = "http://www.biopax.org/release/biopax-level3.owl#DnaRegion";
    pub const RNA_REGION: &str = "http://www.biopax.org/release/biopax-level3.owl#RnaRegion";
    pub const PROTEIN: &str = "http://www.biopax.org/release/biopax-level3.owl#Protein";
    pub const SMALL_MOLECULE: &str =
        "http://www.biopax.org/release/biopax-level3.owl#SmallMolecule";
    pub const COMPLEX: &str = "http://www.biopax.org/release/biopax-level3.owl#Complex";
}

/// Sequence Ontology roles.
pub mod roles {
    pub const PROMOTER: &str = "http://identifiers.org/so/SO:0000167";
    pub const RBS: &str = "http://identifiers.org/so/SO:0000139";
    pub const CDS: &str = "http://identifiers.org/so/SO:0000316";
    pub const TERMINATOR: &str = "http://identifiers.org/so/SO:0000141";
    pub const ENGINEERED_REGION: &str = "http://identifiers.org/so/SO:0000804";
}

/// Systems Biology Ontology interaction types and participation roles.
pub mod sbo {
    pub const INHIBITION: &str = "http://identifiers.org/biomodels.sbo/SBO:0000169";
    pub const STIMULATION: &str = "http://identifiers.org/biomodels.sbo/SBO:0000170";
    pub const GENETIC_PRODUCTION: &str = "http://identifiers.org/biomodels.sbo/SBO:0000589";
    pub const INHIBITOR: &str = "http://identifiers.org/biomodels.sbo/SBO:0000020";
    pub const STIMULATOR: &str = "http://identifiers.org/biomodels.sbo/SBO:0000459";
    pub const TEMPLATE: &str = "http://identifiers.org/biomodels.sbo/SBO:0000645";
    pub const PRODUCT: &str = "http://identifiers.org/biomodels.sbo/SBO:0000011";
    pub const REACTANT: &str = "http://identifiers.org/biomodels.sbo/SBO:0000010";
}

pub const ACCESS_PUBLIC: &str = "http://sbols.org/v2#public";
pub const ACCESS_PRIVATE: &str = "http://sbols.org/v2#private";
pub const DIRECTION_IN: &str = "http://sbols.org/v2#in";
pub const DIRECTION_OUT: &str = "http://sbols.org/v2#out";
pub const DIRECTION_INOUT: &str = "http://sbols.org/v2#inout";
pub const DIRECTION_NONE: &str = "http://sbols.org/v2#none";
pub const REFINEMENT_USE_REMOTE: &str = "http://sbols.org/v2#useRemote";
pub const REFINEMENT_USE_LOCAL: &str = "http://sbols.org/v2#useLocal";
pub const REFINEMENT_VERIFY_IDENTICAL: &str = "http://sbols.org/v2#verifyIdentical";
pub const REFINEMENT_MERGE: &str = "http://sbols.org/v2#merge";
pub const ORIENTATION_INLINE: &str = "http://sbols.org/v2#inline";
pub const ORIENTATION_REVERSE_COMPLEMENT: &str = "http://sbols.org/v2#reverseComplement";
pub const RESTRICTION_PRECEDES: &str = "http://sbols.org/v2#precedes";
pub const RESTRICTION_SAME_ORIENTATION: &str = "http://sbols.org/v2#sameOrientationAs";
pub const RESTRICTION_OPPOSITE_ORIENTATION: &str = "http://sbols.org/v2#oppositeOrientationAs";
pub const ENCODING_IUPAC_DNA: &str = "http://www.chem.qmul.ac.uk/iubmb/misc/naseq.html";
pub const ENCODING_IUPAC_PROTEIN: &str = "http://www.chem.qmul.ac.uk/iupac/AminoAcid/";
pub const ENCODING_SMILES: &str = "http://www.opensmiles.org/opensmiles.html";
