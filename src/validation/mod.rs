//! # Validation
//!
//! Local rules run when a constrained value is written and fail the write.
//! Global rules run over a whole [`Document`] and accumulate every
//! violation into a [`ValidationReport`].

mod rules;

use std::{
    fmt::{self, Display, Formatter},
    sync::OnceLock,
};

use serde::Serialize;

use crate::{
    model::value_objects::{check_display_id, Timestamp, Version},
    vocab, Document, Error, Result,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Warning,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Category of a violation, mirroring the error kinds of the local layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingNamespace,
    Cardinality,
    DuplicateUri,
    DanglingReference,
    TypeMismatch,
    CyclicReference,
}

/// One finding of a global rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Name of the rule that produced it.
    pub rule: &'static str,
    pub severity: Severity,
    pub kind: ViolationKind,
    /// URI of the offending object, or the missing namespace.
    pub subject: String,
    pub message: String,
}

impl Display for Violation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity, self.rule, self.subject, self.message
        )
    }
}

/// Every violation found by one validation pass, in rule order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// No error-level violations; warnings are allowed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().next().is_none()
    }

    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.with_severity(Severity::Warning)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |violation| violation.severity == severity)
    }
}

impl Display for ValidationReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.errors().count(),
            self.warnings().count()
        )?;
        for violation in &self.violations {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

/// Collects the findings of one global rule.
pub(crate) struct Findings<'r> {
    rule: &'static str,
    violations: &'r mut Vec<Violation>,
}

impl Findings<'_> {
    pub(crate) fn error(
        &mut self,
        kind: ViolationKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Error, kind, subject.into(), message.into());
    }

    pub(crate) fn warning(
        &mut self,
        kind: ViolationKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Severity::Warning, kind, subject.into(), message.into());
    }

    fn push(&mut self, severity: Severity, kind: ViolationKind, subject: String, message: String) {
        self.violations.push(Violation {
            rule: self.rule,
            severity,
            kind,
            subject,
            message,
        });
    }
}

/// A check on one written value, bound to the properties it guards.
pub(crate) struct LocalRule {
    pub(crate) name: &'static str,
    pub(crate) properties: &'static [&'static str],
    pub(crate) check: fn(&str) -> std::result::Result<(), String>,
}

/// A check over a whole document.
pub(crate) struct GlobalRule {
    pub(crate) name: &'static str,
    pub(crate) check: fn(&Document, &mut Findings<'_>),
}

/// Registry of named local and global rules.
pub struct RuleSet {
    local: Vec<LocalRule>,
    global: Vec<GlobalRule>,
}

impl RuleSet {
    /// The SBOL rule-set, built once.
    #[must_use]
    pub fn sbol() -> &'static Self {
        static RULES: OnceLock<RuleSet> = OnceLock::new();
        RULES.get_or_init(|| Self {
            local: vec![
                LocalRule {
                    name: "display_id_format",
                    properties: &[vocab::DISPLAY_ID],
                    check: check_display_id,
                },
                LocalRule {
                    name: "timestamp_format",
                    properties: &[
                        vocab::STARTED_AT_TIME,
                        vocab::ENDED_AT_TIME,
                        vocab::CREATED,
                        vocab::MODIFIED,
                    ],
                    check: |raw| Timestamp::parse(raw).map(drop),
                },
                LocalRule {
                    name: "version_format",
                    properties: &[vocab::VERSION],
                    check: |raw| Version::parse(raw).map(drop),
                },
            ],
            global: rules::global(),
        })
    }

    /// Names of every registered rule, local first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.local
            .iter()
            .map(|rule| rule.name)
            .chain(self.global.iter().map(|rule| rule.name))
    }

    /// Runs the local rules guarding `property` against `raw`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` naming the expected form, from the first rule that
    /// rejects the value.
    pub fn check_value(&self, property: &str, raw: &str) -> Result<()> {
        self.local
            .iter()
            .filter(|rule| rule.properties.contains(&property))
            .try_for_each(|rule| {
                (rule.check)(raw).map_err(|expected| Error::invalid_format(property, raw, expected))
            })
    }

    /// Runs every global rule and gathers the findings.
    #[must_use]
    pub fn check_document(&self, document: &Document) -> ValidationReport {
        let mut violations = Vec::new();
        for rule in &self.global {
            let mut findings = Findings {
                rule: rule.name,
                violations: &mut violations,
            };
            (rule.check)(document, &mut findings);
        }
        ValidationReport { violations }
    }
}
