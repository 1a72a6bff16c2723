use crate::{
    error::ParserError,
    events::{
        AttributeDefinition, AttributeIndex, AttributeKind, AttributeTable, AttributeValue, Event,
        FrequencyCap, FrequencyKind,
    },
    strings::{StringId, StringTable},
};
use itertools::{EitherOrBoth, Itertools};
use rust_decimal::{prelude::ToPrimitive, Decimal};

const EARTH_RADIUS_KM: f64 = 6372.8;

#[derive(Hash, Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    attribute: AttributeIndex,
    kind: PredicateKind,
}

impl Predicate {
    pub fn new(
        attributes: &AttributeTable,
        name: &str,
        kind: PredicateKind,
    ) -> Result<Self, ParserError> {
        let id = resolve(attributes, name)?;
        validate_predicate(attributes, name, &kind, &attributes.by_id(id))?;
        Ok(Predicate {
            attribute: id,
            kind,
        })
    }

    pub fn comparison(
        attributes: &AttributeTable,
        name: &str,
        operator: ComparisonOperator,
        value: Literal<'_>,
    ) -> Result<Self, ParserError> {
        let id = resolve(attributes, name)?;
        let value = match (attributes.by_id(id), value) {
            (AttributeKind::Integer, Literal::Integer(value)) => ComparisonValue::Integer(value),
            (AttributeKind::Float, Literal::Integer(value)) => {
                ComparisonValue::Float(Decimal::from(value))
            }
            (AttributeKind::Float, Literal::Float(value)) => ComparisonValue::Float(value),
            (expected, actual) => return Err(mismatch(name, expected, actual.describe())),
        };
        Self::new(
            attributes,
            name,
            PredicateKind::Comparison(operator, value),
        )
    }

    pub fn equality(
        attributes: &AttributeTable,
        strings: &mut StringTable,
        name: &str,
        operator: EqualityOperator,
        value: Literal<'_>,
    ) -> Result<Self, ParserError> {
        let id = resolve(attributes, name)?;
        let value = match (attributes.by_id(id), value) {
            (AttributeKind::Integer, Literal::Integer(value)) => PrimitiveLiteral::Integer(value),
            (AttributeKind::Float, Literal::Integer(value)) => {
                PrimitiveLiteral::Float(Decimal::from(value))
            }
            (AttributeKind::Float, Literal::Float(value)) => PrimitiveLiteral::Float(value),
            (AttributeKind::String, Literal::String(value)) => {
                PrimitiveLiteral::String(intern(attributes, strings, id, value)?)
            }
            (expected, actual) => return Err(mismatch(name, expected, actual.describe())),
        };
        Self::new(attributes, name, PredicateKind::Equality(operator, value))
    }

    /// A scalar attribute tested against a set of literals, e.g. `country in ['CA', 'US']`.
    pub fn set(
        attributes: &AttributeTable,
        strings: &mut StringTable,
        name: &str,
        operator: SetOperator,
        values: Vec<Literal<'_>>,
    ) -> Result<Self, ParserError> {
        let id = resolve(attributes, name)?;
        let values = match attributes.by_id(id) {
            AttributeKind::Integer => integer_list(name, AttributeKind::Integer, values)?,
            AttributeKind::String => string_list(attributes, strings, id, values)?,
            expected => return Err(mismatch(name, expected, "list")),
        };
        Self::new(attributes, name, PredicateKind::Set(operator, values))
    }

    /// A literal looked up in a list attribute, e.g. `1 in segment_ids`.
    pub fn membership(
        attributes: &AttributeTable,
        strings: &mut StringTable,
        value: Literal<'_>,
        operator: SetOperator,
        name: &str,
    ) -> Result<Self, ParserError> {
        let operator = match operator {
            SetOperator::In => ListOperator::OneOf,
            SetOperator::NotIn => ListOperator::NoneOf,
        };
        Self::list(attributes, strings, name, operator, vec![value])
    }

    pub fn list(
        attributes: &AttributeTable,
        strings: &mut StringTable,
        name: &str,
        operator: ListOperator,
        values: Vec<Literal<'_>>,
    ) -> Result<Self, ParserError> {
        let id = resolve(attributes, name)?;
        let values = match attributes.by_id(id) {
            AttributeKind::IntegerList => integer_list(name, AttributeKind::IntegerList, values)?,
            AttributeKind::StringList => string_list(attributes, strings, id, values)?,
            expected => return Err(mismatch(name, expected, "list")),
        };
        Self::new(attributes, name, PredicateKind::List(operator, values))
    }

    pub fn null(
        attributes: &AttributeTable,
        name: &str,
        operator: NullOperator,
    ) -> Result<Self, ParserError> {
        Self::new(attributes, name, PredicateKind::Null(operator))
    }

    pub fn variable(attributes: &AttributeTable, name: &str) -> Result<Self, ParserError> {
        Self::new(attributes, name, PredicateKind::Variable)
    }

    pub fn segment(
        attributes: &AttributeTable,
        operator: SegmentOperator,
        name: &str,
        segment: i64,
        seconds: i64,
        now: &str,
    ) -> Result<Self, ParserError> {
        let now = resolve(attributes, now)?;
        let arguments = SegmentArguments {
            segment,
            seconds,
            now,
        };
        Self::new(attributes, name, PredicateKind::Segment(operator, arguments))
    }

    /// `within_frequency_cap(frequency_caps, 'flight', 'ns', 10, 3600, now)`: fewer than `10`
    /// impressions of the flight were served in the hour before `now`.
    ///
    /// The capped identifier comes from an insertion constant, see
    /// [`Predicate::assign_constants`].
    #[allow(clippy::too_many_arguments)]
    pub fn frequency(
        attributes: &AttributeTable,
        name: &str,
        kind: &str,
        namespace: &str,
        value: i64,
        length: i64,
        now: &str,
    ) -> Result<Self, ParserError> {
        let kind = kind
            .parse::<FrequencyKind>()
            .map_err(|_| ParserError::InvalidFrequencyKind(kind.to_string()))?;
        let now = resolve(attributes, now)?;
        let arguments = FrequencyArguments {
            kind,
            id: None,
            namespace: namespace.to_string(),
            value,
            length,
            now,
        };
        Self::new(attributes, name, PredicateKind::Frequency(arguments))
    }

    /// Whether the point held by the `latitude` and `longitude` attributes lies within `radius`
    /// kilometers of the given coordinates.
    pub fn geo(
        attributes: &AttributeTable,
        latitude: &str,
        longitude: &str,
        center: (Decimal, Decimal),
        radius: Decimal,
    ) -> Result<Self, ParserError> {
        let longitude = resolve(attributes, longitude)?;
        let arguments = GeoArguments {
            latitude: center.0,
            longitude: center.1,
            radius,
            longitude_attribute: longitude,
        };
        Self::new(attributes, latitude, PredicateKind::Geo(arguments))
    }

    pub fn pattern(
        attributes: &AttributeTable,
        name: &str,
        operator: PatternOperator,
        pattern: &str,
    ) -> Result<Self, ParserError> {
        Self::new(
            attributes,
            name,
            PredicateKind::Pattern(operator, pattern.to_string()),
        )
    }

    /// Resolve the identifier of a frequency cap from the constants given at insertion.
    ///
    /// Returns the name of the missing constant on failure.
    pub fn assign_constants(&mut self, constants: &[(&str, i64)]) -> Result<(), &'static str> {
        let PredicateKind::Frequency(arguments) = &mut self.kind else {
            return Ok(());
        };
        let name = arguments.kind.constant();
        let id = constants
            .iter()
            .find(|(constant, _)| *constant == name)
            .and_then(|(_, value)| u32::try_from(*value).ok())
            .ok_or(name)?;
        arguments.id = Some(id);
        Ok(())
    }

    #[inline]
    pub fn attribute(&self) -> AttributeIndex {
        self.attribute
    }

    #[inline]
    pub fn kind(&self) -> &PredicateKind {
        &self.kind
    }

    /// Every attribute read by this predicate.
    pub fn attributes(&self) -> impl Iterator<Item = AttributeIndex> + '_ {
        let other = match &self.kind {
            PredicateKind::Segment(_, arguments) => Some(arguments.now),
            PredicateKind::Frequency(arguments) => Some(arguments.now),
            PredicateKind::Geo(arguments) => Some(arguments.longitude_attribute),
            _ => None,
        };
        std::iter::once(self.attribute).chain(other)
    }

    pub fn evaluate(&self, event: &Event) -> bool {
        let value = event.get(self.attribute);
        match (&self.kind, value) {
            (PredicateKind::Null(operator), value) => operator.evaluate(value),
            (_, AttributeValue::Undefined) => false,
            (PredicateKind::Variable, AttributeValue::Boolean(value)) => *value,
            (PredicateKind::Set(operator, haystack), needle) => operator.evaluate(haystack, needle),
            (PredicateKind::Comparison(operator, a), b) => operator.evaluate(a, b),
            (PredicateKind::Equality(operator, a), b) => operator.evaluate(a, b),
            (PredicateKind::List(operator, a), b) => operator.evaluate(a, b),
            (PredicateKind::Segment(operator, arguments), AttributeValue::Segments(segments)) => {
                match event.get(arguments.now) {
                    AttributeValue::Integer(now) => operator.evaluate(arguments, segments, *now),
                    _ => false,
                }
            }
            (PredicateKind::Frequency(arguments), AttributeValue::FrequencyCaps(caps)) => {
                if caps.is_empty() {
                    return true;
                }
                match event.get(arguments.now) {
                    AttributeValue::Integer(now) => arguments.evaluate(caps, *now),
                    _ => false,
                }
            }
            (PredicateKind::Geo(arguments), AttributeValue::Float(latitude)) => {
                match event.get(arguments.longitude_attribute) {
                    AttributeValue::Float(longitude) => arguments.evaluate(*latitude, *longitude),
                    _ => false,
                }
            }
            (PredicateKind::Pattern(operator, pattern), AttributeValue::String(_, value)) => {
                operator.evaluate(value, pattern)
            }
            (kind, value) => {
                unreachable!("Invalid => got: {kind:?} with {value:?}. This is a bug.");
            }
        }
    }
}

fn resolve(attributes: &AttributeTable, name: &str) -> Result<AttributeIndex, ParserError> {
    attributes
        .by_name(name)
        .ok_or_else(|| ParserError::NonExistingAttribute(name.to_string()))
}

fn mismatch(name: &str, expected: AttributeKind, actual: &str) -> ParserError {
    ParserError::MismatchingTypes {
        name: name.to_string(),
        expected,
        actual: actual.to_string(),
    }
}

fn intern(
    attributes: &AttributeTable,
    strings: &mut StringTable,
    id: AttributeIndex,
    value: &str,
) -> Result<StringId, ParserError> {
    let domain: &AttributeDefinition = attributes.domain(id);
    let max_id = domain.bound().max_string_id().unwrap_or(usize::MAX);
    strings
        .get_or_update(id, value, max_id)
        .ok_or_else(|| ParserError::StringOutOfBounds {
            name: domain.name().to_string(),
            value: value.to_string(),
        })
}

fn integer_list(
    name: &str,
    expected: AttributeKind,
    values: Vec<Literal<'_>>,
) -> Result<ListLiteral, ParserError> {
    let values: Vec<_> = values
        .into_iter()
        .map(|value| match value {
            Literal::Integer(value) => Ok(value),
            actual => Err(mismatch(name, expected.clone(), actual.describe())),
        })
        .collect::<Result<_, _>>()?;
    Ok(ListLiteral::IntegerList(
        values.into_iter().sorted_unstable().dedup().collect(),
    ))
}

fn string_list(
    attributes: &AttributeTable,
    strings: &mut StringTable,
    id: AttributeIndex,
    values: Vec<Literal<'_>>,
) -> Result<ListLiteral, ParserError> {
    let name = attributes.name(id);
    let values: Vec<_> = values
        .into_iter()
        .map(|value| match value {
            Literal::String(value) => intern(attributes, strings, id, value),
            actual => Err(mismatch(name, attributes.by_id(id), actual.describe())),
        })
        .collect::<Result<_, _>>()?;
    Ok(ListLiteral::StringList(
        values.into_iter().sorted_unstable().dedup().collect(),
    ))
}

fn validate_predicate(
    attributes: &AttributeTable,
    name: &str,
    kind: &PredicateKind,
    attribute_kind: &AttributeKind,
) -> Result<(), ParserError> {
    match (&kind, attribute_kind) {
        (PredicateKind::Set(_, ListLiteral::StringList(_)), AttributeKind::String) => Ok(()),
        (PredicateKind::Set(_, ListLiteral::IntegerList(_)), AttributeKind::Integer) => Ok(()),

        (PredicateKind::Comparison(_, ComparisonValue::Integer(_)), AttributeKind::Integer) => {
            Ok(())
        }
        (PredicateKind::Comparison(_, ComparisonValue::Float(_)), AttributeKind::Float) => Ok(()),

        (PredicateKind::Equality(_, PrimitiveLiteral::Integer(_)), AttributeKind::Integer) => {
            Ok(())
        }
        (PredicateKind::Equality(_, PrimitiveLiteral::Float(_)), AttributeKind::Float) => Ok(()),
        (PredicateKind::Equality(_, PrimitiveLiteral::String(_)), AttributeKind::String) => Ok(()),

        (PredicateKind::List(_, ListLiteral::IntegerList(_)), AttributeKind::IntegerList) => Ok(()),
        (PredicateKind::List(_, ListLiteral::StringList(_)), AttributeKind::StringList) => Ok(()),

        (PredicateKind::Variable, AttributeKind::Boolean) => Ok(()),

        (PredicateKind::Null(NullOperator::IsEmpty), AttributeKind::StringList) => Ok(()),
        (PredicateKind::Null(NullOperator::IsEmpty), AttributeKind::IntegerList) => Ok(()),
        (PredicateKind::Null(NullOperator::IsNull | NullOperator::IsNotNull), _) => Ok(()),

        (PredicateKind::Segment(_, SegmentArguments { now, .. }), AttributeKind::Segments)
        | (PredicateKind::Frequency(FrequencyArguments { now, .. }), AttributeKind::FrequencyCaps) => {
            match attributes.by_id(*now) {
                AttributeKind::Integer => Ok(()),
                expected => Err(mismatch(attributes.name(*now), expected, "timestamp")),
            }
        }
        (PredicateKind::Geo(arguments), AttributeKind::Float) => {
            match attributes.by_id(arguments.longitude_attribute) {
                AttributeKind::Float => Ok(()),
                expected => Err(mismatch(
                    attributes.name(arguments.longitude_attribute),
                    expected,
                    "longitude",
                )),
            }
        }
        (PredicateKind::Pattern(_, _), AttributeKind::String) => Ok(()),
        (actual, expected) => Err(mismatch(name, expected.clone(), &format!("{actual:?}"))),
    }
}

/// A literal as written in an expression, before it is checked against its attribute.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal<'a> {
    Integer(i64),
    Float(Decimal),
    String(&'a str),
}

impl Literal<'_> {
    fn describe(&self) -> &'static str {
        match self {
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub enum PredicateKind {
    Variable,
    Set(SetOperator, ListLiteral),
    Comparison(ComparisonOperator, ComparisonValue),
    Equality(EqualityOperator, PrimitiveLiteral),
    List(ListOperator, ListLiteral),
    Null(NullOperator),
    Segment(SegmentOperator, SegmentArguments),
    Frequency(FrequencyArguments),
    Geo(GeoArguments),
    Pattern(PatternOperator, String),
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SetOperator {
    NotIn,
    In,
}

impl SetOperator {
    fn evaluate(&self, haystack: &ListLiteral, needle: &AttributeValue) -> bool {
        match (haystack, needle) {
            (ListLiteral::StringList(haystack), AttributeValue::String(needle, _)) => {
                self.apply(haystack, needle)
            }
            (ListLiteral::IntegerList(haystack), AttributeValue::Integer(needle)) => {
                self.apply(haystack, needle)
            }
            (a, b) => {
                unreachable!("Set operation ({self:?}) in haystack {a:?} for {b:?} should never happen. This is a bug.")
            }
        }
    }

    fn apply<T: Ord>(&self, haystack: &[T], needle: &T) -> bool {
        let found = haystack.binary_search(needle).is_ok();
        match self {
            Self::In => found,
            Self::NotIn => !found,
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum ComparisonOperator {
    LessThan,
    LessThanEqual,
    GreaterThanEqual,
    GreaterThan,
}

impl ComparisonOperator {
    /// The operator to use once the operands are swapped: `15 < price` is `price > 15`.
    pub fn mirror(self) -> Self {
        match self {
            Self::LessThan => Self::GreaterThan,
            Self::LessThanEqual => Self::GreaterThanEqual,
            Self::GreaterThanEqual => Self::LessThanEqual,
            Self::GreaterThan => Self::LessThan,
        }
    }

    fn evaluate(&self, a: &ComparisonValue, b: &AttributeValue) -> bool {
        match (a, b) {
            (ComparisonValue::Float(b), AttributeValue::Float(a)) => self.apply(a, b),
            (ComparisonValue::Integer(b), AttributeValue::Integer(a)) => self.apply(a, b),
            (a, b) => {
                unreachable!("Comparison ({self:?}) between {a:?} and {b:?} should never happen. This is a bug.")
            }
        }
    }

    fn apply<T: PartialOrd>(&self, a: &T, b: &T) -> bool {
        match self {
            Self::LessThan => *a < *b,
            Self::LessThanEqual => *a <= *b,
            Self::GreaterThan => *a > *b,
            Self::GreaterThanEqual => *a >= *b,
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub enum ComparisonValue {
    Integer(i64),
    Float(Decimal),
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum EqualityOperator {
    Equal,
    NotEqual,
}

impl EqualityOperator {
    fn evaluate(&self, a: &PrimitiveLiteral, b: &AttributeValue) -> bool {
        match (a, b) {
            (PrimitiveLiteral::Float(a), AttributeValue::Float(b)) => self.apply(a, b),
            (PrimitiveLiteral::Integer(a), AttributeValue::Integer(b)) => self.apply(a, b),
            (PrimitiveLiteral::String(a), AttributeValue::String(b, _)) => self.apply(a, b),
            (a, b) => {
                unreachable!("Equality ({self:?}) between {a:?} and {b:?} should never happen. This is a bug.")
            }
        }
    }

    fn apply<T: PartialEq>(&self, a: &T, b: &T) -> bool {
        match self {
            Self::Equal => *a == *b,
            Self::NotEqual => *a != *b,
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum ListOperator {
    OneOf,
    NoneOf,
    AllOf,
}

impl ListOperator {
    fn evaluate(&self, a: &ListLiteral, b: &AttributeValue) -> bool {
        match (a, b) {
            (ListLiteral::IntegerList(a), AttributeValue::IntegerList(b)) => self.apply(a, b),
            (ListLiteral::StringList(a), AttributeValue::StringList(b)) => self.apply(a, b),
            (a, b) => {
                unreachable!("List operation ({self:?}) between {a:?} and {b:?} should never happen. This is a bug.")
            }
        }
    }

    /// Both lists are sorted and free of duplicates.
    fn apply<T: Ord>(&self, expected: &[T], actual: &[T]) -> bool {
        let mut joined = expected
            .iter()
            .merge_join_by(actual.iter(), |a, b| a.cmp(b));
        match self {
            Self::OneOf => joined.any(|entry| matches!(entry, EitherOrBoth::Both(_, _))),
            Self::NoneOf => !joined.any(|entry| matches!(entry, EitherOrBoth::Both(_, _))),
            Self::AllOf => !joined.any(|entry| matches!(entry, EitherOrBoth::Left(_))),
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum NullOperator {
    IsNull,
    IsNotNull,
    IsEmpty,
}

impl NullOperator {
    fn evaluate(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Self::IsNull, AttributeValue::Undefined) => true,
            (Self::IsNull, _) => false,
            (Self::IsNotNull, AttributeValue::Undefined) => false,
            (Self::IsNotNull, _) => true,
            (Self::IsEmpty, AttributeValue::StringList(list)) => list.is_empty(),
            (Self::IsEmpty, AttributeValue::IntegerList(list)) => list.is_empty(),
            (Self::IsEmpty, AttributeValue::Undefined) => false,
            (_, value) => {
                unreachable!(
                    "Null check ({self:?}) for {value:?} should never happen. This is a bug."
                )
            }
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum SegmentOperator {
    Within,
    Before,
}

impl SegmentOperator {
    fn evaluate(&self, arguments: &SegmentArguments, segments: &[(i64, i64)], now: i64) -> bool {
        let Ok(index) = segments.binary_search_by_key(&arguments.segment, |(segment, _)| *segment)
        else {
            return false;
        };
        let (_, timestamp) = segments[index];
        let threshold = now.saturating_sub(arguments.seconds);
        match self {
            Self::Within => threshold <= timestamp,
            Self::Before => threshold > timestamp,
        }
    }
}

/// `segment_within(segments, 12, 3600, now)`: segment `12` was seen in the hour before the
/// timestamp held by the `now` attribute.
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct SegmentArguments {
    pub segment: i64,
    pub seconds: i64,
    pub now: AttributeIndex,
}

/// `within_frequency_cap(frequency_caps, 'flight', 'ns', 10, 3600, now)`.
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct FrequencyArguments {
    pub kind: FrequencyKind,
    /// Assigned from the insertion constants; unassigned caps never match.
    pub id: Option<u32>,
    pub namespace: String,
    pub value: i64,
    /// Window in seconds; zero or less only compares the count.
    pub length: i64,
    pub now: AttributeIndex,
}

impl FrequencyArguments {
    fn evaluate(&self, caps: &[FrequencyCap], now: i64) -> bool {
        let Some(id) = self.id else {
            return false;
        };
        let Some(cap) = caps.iter().find(|cap| {
            cap.id() == id && cap.kind() == self.kind && cap.namespace() == self.namespace
        }) else {
            return true;
        };
        if self.length <= 0 {
            return self.value > i64::from(cap.value());
        }
        let Some(timestamp) = cap.timestamp() else {
            return true;
        };
        now.saturating_sub(timestamp / 1_000_000) > self.length
            || self.value > i64::from(cap.value())
    }
}

/// `geo_within_radius(latitude, longitude, 45.5, -73.5, 10)`.
#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub struct GeoArguments {
    pub latitude: Decimal,
    pub longitude: Decimal,
    /// In kilometers.
    pub radius: Decimal,
    pub longitude_attribute: AttributeIndex,
}

impl GeoArguments {
    /// Great-circle distance through the chord between both points.
    fn evaluate(&self, latitude: Decimal, longitude: Decimal) -> bool {
        let degrees = |value: Decimal| value.to_f64().unwrap_or(f64::NAN);
        let delta = (degrees(self.longitude) - degrees(longitude)).to_radians();
        let from = degrees(self.latitude).to_radians();
        let to = degrees(latitude).to_radians();

        let dz = from.sin() - to.sin();
        let dx = delta.cos() * from.cos() - to.cos();
        let dy = delta.sin() * from.cos();
        let distance = ((dx * dx + dy * dy + dz * dz).sqrt() / 2.).asin() * 2. * EARTH_RADIUS_KM;
        distance <= degrees(self.radius)
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub enum PatternOperator {
    Contains,
    StartsWith,
    EndsWith,
}

impl PatternOperator {
    fn evaluate(&self, value: &str, pattern: &str) -> bool {
        match self {
            Self::Contains => value.contains(pattern),
            Self::StartsWith => value.starts_with(pattern),
            Self::EndsWith => value.ends_with(pattern),
        }
    }
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub enum ListLiteral {
    IntegerList(Vec<i64>),
    StringList(Vec<StringId>),
}

#[derive(Hash, PartialEq, Eq, Clone, Debug)]
pub enum PrimitiveLiteral {
    Integer(i64),
    Float(Decimal),
    String(StringId),
}
