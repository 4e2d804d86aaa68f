//! Locations on a sequence, and the arithmetic over range spans.

use std::fmt::{self, Display, Formatter};

use crate::{
    classes::Sequence,
    model::{kind, FieldSpec, Identified, PropertyDef, ReferencedDef, SbolObject, SbolType},
    vocab, Error, Result,
};

sbol_class!(
    /// Abstract base of Range, Cut and GenericLocation.
    Location => Location
);

impl Location {
    pub const ORIENTATION: PropertyDef<kind::Uri> = PropertyDef::optional(vocab::ORIENTATION);
    pub const SEQUENCE: ReferencedDef<Sequence> = ReferencedDef::optional(vocab::SEQUENCE);

    pub(crate) const FIELDS: &'static [FieldSpec] =
        &[Self::ORIENTATION.field(), Self::SEQUENCE.field()];
}

sbol_class!(
    /// An inclusive `[start, end]` interval, 1-based.
    Range => Range
);

impl Range {
    pub const START: PropertyDef<kind::Int> = PropertyDef::required(vocab::START);
    pub const END: PropertyDef<kind::Int> = PropertyDef::required(vocab::END);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Location::ORIENTATION.field(),
        Location::SEQUENCE.field(),
        Self::START.field(),
        Self::END.field(),
    ];

    /// Reads the interval of a Range object.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` for other classes, `NotFound` or `InvalidFormat` when
    /// `start` or `end` is unset or not an integer.
    pub fn span(range: &SbolObject) -> Result<Span> {
        if range.class() != Self::CLASS {
            return Err(Error::TypeMismatch {
                uri: range.identity().to_string(),
                expected: Self::CLASS,
                found: range.class(),
            });
        }
        let bound = |def: PropertyDef<kind::Int>| {
            range
                .value(def)?
                .ok_or_else(|| Error::not_found("required property", def.uri))
        };
        Ok(Span::new(bound(Self::START)?, bound(Self::END)?))
    }

    /// Gap between `range` and a later `other`; see [`Span::precedes`].
    ///
    /// # Errors
    ///
    /// As [`Range::span`].
    pub fn precedes(range: &SbolObject, other: &SbolObject) -> Result<Option<u64>> {
        Ok(Self::span(range)?.precedes(Self::span(other)?))
    }

    /// # Errors
    ///
    /// As [`Range::span`].
    pub fn follows(range: &SbolObject, other: &SbolObject) -> Result<Option<u64>> {
        Ok(Self::span(range)?.follows(Self::span(other)?))
    }

    /// # Errors
    ///
    /// As [`Range::span`].
    pub fn contains(range: &SbolObject, other: &SbolObject) -> Result<Option<u64>> {
        Ok(Self::span(range)?.contains(Self::span(other)?))
    }

    /// # Errors
    ///
    /// As [`Range::span`].
    pub fn overlaps(range: &SbolObject, other: &SbolObject) -> Result<Option<u64>> {
        Ok(Self::span(range)?.overlaps(Self::span(other)?))
    }
}

sbol_class!(
    /// A point between two bases: after position `at`.
    Cut => Cut
);

impl Cut {
    pub const AT: PropertyDef<kind::Int> = PropertyDef::required(vocab::AT);

    pub(crate) const FIELDS: &'static [FieldSpec] = &[
        Location::ORIENTATION.field(),
        Location::SEQUENCE.field(),
        Self::AT.field(),
    ];
}

sbol_class!(
    /// A location with no fixed coordinates.
    GenericLocation => GenericLocation
);

/// Inclusive interval of sequence positions.
///
/// A span whose end lies before its start is empty: it precedes, follows,
/// contains and overlaps nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: i64,
    pub end: i64,
}

impl Span {
    #[must_use]
    pub const fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end < self.start
    }

    /// Number of positions covered.
    #[must_use]
    pub const fn len(self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.end.abs_diff(self.start) + 1
        }
    }

    /// Positions strictly between the end of `self` and the start of
    /// `other`, when `self` ends first. Adjoining spans give `Some(0)`.
    #[must_use]
    pub fn precedes(self, other: Self) -> Option<u64> {
        if self.is_empty() || other.is_empty() || self.end >= other.start {
            return None;
        }
        Some(other.start.abs_diff(self.end) - 1)
    }

    /// Mirror of [`Span::precedes`].
    #[must_use]
    pub fn follows(self, other: Self) -> Option<u64> {
        other.precedes(self)
    }

    /// Length of `other` when it lies entirely inside `self`.
    #[must_use]
    pub fn contains(self, other: Self) -> Option<u64> {
        let inside = !self.is_empty()
            && !other.is_empty()
            && self.start <= other.start
            && other.end <= self.end;
        inside.then(|| other.len())
    }

    /// Number of shared positions, when there is at least one.
    #[must_use]
    pub fn overlaps(self, other: Self) -> Option<u64> {
        let shared = Self::new(self.start.max(other.start), self.end.min(other.end));
        if self.is_empty() || other.is_empty() || shared.is_empty() {
            return None;
        }
        Some(shared.len())
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// Strand of an annotated region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    Positive,
    Negative,
    Both,
    Unknown,
}

impl Polarity {
    /// Polarity of one orientation URI.
    #[must_use]
    pub fn from_orientation(orientation: &str) -> Self {
        match orientation {
            vocab::ORIENTATION_INLINE => Self::Positive,
            vocab::ORIENTATION_REVERSE_COMPLEMENT => Self::Negative,
            _ => Self::Unknown,
        }
    }

    /// Combined polarity; `Unknown` entries contribute nothing.
    pub fn combine(polarities: impl IntoIterator<Item = Self>) -> Self {
        let (positive, negative) =
            polarities
                .into_iter()
                .fold((false, false), |(positive, negative), polarity| match polarity {
                    Self::Positive => (true, negative),
                    Self::Negative => (positive, true),
                    Self::Both => (true, true),
                    Self::Unknown => (positive, negative),
                });
        match (positive, negative) {
            (true, true) => Self::Both,
            (true, false) => Self::Positive,
            (false, true) => Self::Negative,
            (false, false) => Self::Unknown,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
            Self::Both => "+-",
            Self::Unknown => "?",
        }
    }
}

impl Display for Polarity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{classes::ComponentDefinition, classes::SequenceAnnotation, Config};

    #[rstest]
    #[case(Span::new(1, 10), Span::new(20, 30), Some(9))]
    #[case(Span::new(1, 10), Span::new(11, 20), Some(0))]
    #[case(Span::new(1, 10), Span::new(10, 20), None)]
    #[case(Span::new(1, 10), Span::new(5, 8), None)]
    #[case(Span::new(20, 30), Span::new(1, 10), None)]
    #[case(Span::new(5, 3), Span::new(10, 20), None)]
    fn precedes_measures_the_gap(
        #[case] span: Span,
        #[case] other: Span,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(span.precedes(other), expected);
        assert_eq!(other.follows(span), expected);
    }

    #[rstest]
    #[case(Span::new(1, 10), Span::new(5, 15), Some(6))]
    #[case(Span::new(1, 10), Span::new(10, 15), Some(1))]
    #[case(Span::new(1, 10), Span::new(11, 15), None)]
    #[case(Span::new(1, 10), Span::new(3, 4), Some(2))]
    #[case(Span::new(5, 3), Span::new(1, 10), None)]
    fn overlaps_counts_shared_positions(
        #[case] span: Span,
        #[case] other: Span,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(span.overlaps(other), expected);
        assert_eq!(other.overlaps(span), expected);
    }

    #[rstest]
    #[case(Span::new(1, 10), Span::new(3, 4), Some(2))]
    #[case(Span::new(1, 10), Span::new(1, 10), Some(10))]
    #[case(Span::new(1, 10), Span::new(5, 15), None)]
    #[case(Span::new(3, 4), Span::new(1, 10), None)]
    fn contains_reports_the_inner_length(
        #[case] span: Span,
        #[case] other: Span,
        #[case] expected: Option<u64>,
    ) {
        assert_eq!(span.contains(other), expected);
    }

    #[test]
    fn inverted_ranges_are_accepted_but_empty() {
        let config = Config::default();
        let mut part = ComponentDefinition::new(&config, "gene").expect("part");
        let annotation = part
            .owned(ComponentDefinition::SEQUENCE_ANNOTATIONS)
            .create(&config, "anno")
            .expect("annotation");
        SequenceAnnotation::add_range(annotation, &config, "inverted", 5, 3)
            .expect("no cross-field rule");
        SequenceAnnotation::add_range(annotation, &config, "later", 10, 12).expect("range");

        let inverted = annotation
            .child(SequenceAnnotation::LOCATIONS, "inverted")
            .expect("range");
        let later = annotation
            .child(SequenceAnnotation::LOCATIONS, "later")
            .expect("range");
        assert_eq!(Range::span(inverted).expect("span").len(), 0);
        assert_eq!(Range::overlaps(inverted, later).expect("spans"), None);
        assert_eq!(Range::precedes(inverted, later).expect("spans"), None);
    }

    #[rstest]
    #[case(&[], Polarity::Unknown)]
    #[case(&[Polarity::Positive, Polarity::Positive], Polarity::Positive)]
    #[case(&[Polarity::Negative, Polarity::Unknown], Polarity::Negative)]
    #[case(&[Polarity::Positive, Polarity::Negative], Polarity::Both)]
    fn polarity_cases_are_exclusive(#[case] parts: &[Polarity], #[case] expected: Polarity) {
        assert_eq!(Polarity::combine(parts.iter().copied()), expected);
    }

    #[test]
    fn polarity_renders_one_symbol() {
        let rendered: Vec<String> = [
            Polarity::Positive,
            Polarity::Negative,
            Polarity::Both,
            Polarity::Unknown,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(rendered, vec!["+", "-", "+-", "?"]);
    }

    #[test]
    fn span_of_a_non_range_is_a_type_mismatch() {
        let part = ComponentDefinition::new(&Config::default(), "gene").expect("part");
        assert!(matches!(
            Range::span(&part),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
