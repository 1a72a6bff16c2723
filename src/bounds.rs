use crate::{
    ast::Node,
    events::{AttributeIndex, AttributeValue},
    predicates::{
        ComparisonOperator, ComparisonValue, EqualityOperator, ListLiteral, ListOperator,
        Predicate, PredicateKind, PrimitiveLiteral, SetOperator,
    },
};
use rust_decimal::{prelude::ToPrimitive, Decimal};

/// Smallest step between two floats, used to exclude the operand of a strict comparison.
const FLOAT_STEP: Decimal = Decimal::from_parts(1, 0, 0, false, 28);

/// A closed range of values for one attribute.
///
/// String ranges are expressed over the identifiers of the interned strings. Segments and frequency
/// caps are never bounded and cannot be split.
#[derive(Clone, PartialEq, Debug)]
pub enum ValueBound {
    Boolean { min: bool, max: bool },
    Integer { min: i64, max: i64 },
    Float { min: Decimal, max: Decimal },
    String { min: usize, max: usize },
    IntegerList { min: i64, max: i64 },
    StringList { min: usize, max: usize },
    Segments,
    Frequency,
}

impl ValueBound {
    pub(crate) fn is_valid(&self) -> bool {
        match self {
            Self::Boolean { min, max } => min <= max,
            Self::Integer { min, max } | Self::IntegerList { min, max } => min <= max,
            Self::Float { min, max } => min <= max,
            Self::String { min, max } | Self::StringList { min, max } => min <= max,
            Self::Segments | Self::Frequency => true,
        }
    }

    pub(crate) fn max_string_id(&self) -> Option<usize> {
        match self {
            Self::String { max, .. } | Self::StringList { max, .. } => Some(*max),
            _ => None,
        }
    }

    /// Whether the bound holds a single value and can no longer be split.
    ///
    /// Float bounds narrower than one unit count as atomic since splitting works in whole units.
    pub fn is_atomic(&self) -> bool {
        match self {
            Self::Boolean { min, max } => min == max,
            Self::Integer { min, max } | Self::IntegerList { min, max } => min == max,
            Self::Float { min, max } => max
                .checked_sub(*min)
                .is_some_and(|width| width < Decimal::ONE),
            Self::String { min, max } | Self::StringList { min, max } => min == max,
            Self::Segments | Self::Frequency => true,
        }
    }

    /// Number of units covered by the bound, saturating for the unbounded domains.
    pub fn width(&self) -> usize {
        match self {
            Self::Boolean { .. } => 1,
            Self::Integer { min, max } | Self::IntegerList { min, max } => {
                if *min == i64::MIN && *max == i64::MAX {
                    return usize::MAX;
                }
                let width = (i128::from(*max) - i128::from(*min)).unsigned_abs();
                usize::try_from(width).unwrap_or(usize::MAX)
            }
            Self::Float { min, max } => {
                if *min == Decimal::MIN && *max == Decimal::MAX {
                    return usize::MAX;
                }
                max.checked_sub(*min)
                    .and_then(|width| width.abs().trunc().to_usize())
                    .unwrap_or(usize::MAX)
            }
            Self::String { min, max } | Self::StringList { min, max } => max - min,
            Self::Segments | Self::Frequency => {
                unreachable!("{self:?} have no width. This is a bug.")
            }
        }
    }

    /// Whether a domain with this bound may be split into value ranges.
    pub fn is_splittable(&self, max_domain_for_split: usize) -> bool {
        match self {
            Self::Boolean { .. } => true,
            Self::Integer { min, max } | Self::IntegerList { min, max } => {
                *min != i64::MIN && *max != i64::MAX && self.width() < max_domain_for_split
            }
            Self::Float { min, max } => {
                *min != Decimal::MIN && *max != Decimal::MAX && self.width() < max_domain_for_split
            }
            Self::String { max, .. } | Self::StringList { max, .. } => {
                *max != usize::MAX && self.width() < max_domain_for_split
            }
            Self::Segments | Self::Frequency => false,
        }
    }

    /// Split the bound in two halves sharing their middle value, except for ranges of two
    /// values which are split into two atomic bounds.
    ///
    /// # Panics
    ///
    /// When the bound is atomic or cannot be split at all.
    pub fn split_in_half(&self) -> (Self, Self) {
        match self {
            Self::Boolean {
                min: false,
                max: true,
            } => (
                Self::Boolean {
                    min: false,
                    max: false,
                },
                Self::Boolean {
                    min: true,
                    max: true,
                },
            ),
            Self::Integer { min, max } => {
                let ((lmin, lmax), (rmin, rmax)) = split_integers(*min, *max);
                (
                    Self::Integer {
                        min: lmin,
                        max: lmax,
                    },
                    Self::Integer {
                        min: rmin,
                        max: rmax,
                    },
                )
            }
            Self::IntegerList { min, max } => {
                let ((lmin, lmax), (rmin, rmax)) = split_integers(*min, *max);
                (
                    Self::IntegerList {
                        min: lmin,
                        max: lmax,
                    },
                    Self::IntegerList {
                        min: rmin,
                        max: rmax,
                    },
                )
            }
            Self::Float { min, max } => {
                let ((lmin, lmax), (rmin, rmax)) = split_floats(*min, *max);
                (
                    Self::Float {
                        min: lmin,
                        max: lmax,
                    },
                    Self::Float {
                        min: rmin,
                        max: rmax,
                    },
                )
            }
            Self::String { min, max } => {
                let ((lmin, lmax), (rmin, rmax)) = split_ids(*min, *max);
                (
                    Self::String {
                        min: lmin,
                        max: lmax,
                    },
                    Self::String {
                        min: rmin,
                        max: rmax,
                    },
                )
            }
            Self::StringList { min, max } => {
                let ((lmin, lmax), (rmin, rmax)) = split_ids(*min, *max);
                (
                    Self::StringList {
                        min: lmin,
                        max: lmax,
                    },
                    Self::StringList {
                        min: rmin,
                        max: rmax,
                    },
                )
            }
            bound => {
                unreachable!("Cannot split {bound:?}. This is a bug.")
            }
        }
    }

    /// Whether this bound lies entirely within `outer`.
    pub fn is_enclosed_by(&self, outer: &ValueBound) -> bool {
        match (self, outer) {
            (Self::Boolean { min, max }, Self::Boolean { min: lo, max: hi }) => {
                lo <= min && max <= hi
            }
            (Self::Integer { min, max }, Self::Integer { min: lo, max: hi })
            | (Self::IntegerList { min, max }, Self::IntegerList { min: lo, max: hi }) => {
                lo <= min && max <= hi
            }
            (Self::Float { min, max }, Self::Float { min: lo, max: hi }) => {
                lo <= min && max <= hi
            }
            (Self::String { min, max }, Self::String { min: lo, max: hi })
            | (Self::StringList { min, max }, Self::StringList { min: lo, max: hi }) => {
                lo <= min && max <= hi
            }
            (Self::Segments, Self::Segments) | (Self::Frequency, Self::Frequency) => true,
            (inner, outer) => {
                unreachable!("Cannot compare {inner:?} with {outer:?}. This is a bug.")
            }
        }
    }

    /// Whether an event value falls within the bound itself.
    pub fn contains(&self, value: &AttributeValue) -> bool {
        self.reaches(value, false, false)
    }

    /// Whether an event value falls within the bound.
    ///
    /// `open_left` and `open_right` extend the bound to everything below and above it
    /// respectively. Undefined values, empty lists, segments and frequency caps are always
    /// reached.
    pub fn reaches(&self, value: &AttributeValue, open_left: bool, open_right: bool) -> bool {
        match (self, value) {
            (_, AttributeValue::Undefined) => true,
            (Self::Boolean { min, max }, AttributeValue::Boolean(value)) => {
                min <= value && value <= max
            }
            (Self::Integer { min, max }, AttributeValue::Integer(value)) => {
                (open_left || min <= value) && (open_right || value <= max)
            }
            (Self::Float { min, max }, AttributeValue::Float(value)) => {
                (open_left || min <= value) && (open_right || value <= max)
            }
            (Self::String { min, max }, AttributeValue::String(value, _)) => {
                *min <= value.0 && (open_right || value.0 <= *max)
            }
            (Self::IntegerList { min, max }, AttributeValue::IntegerList(values)) => {
                match (values.first(), values.last()) {
                    (Some(first), Some(last)) => {
                        let lo = if open_left { i64::MIN } else { *min };
                        let hi = if open_right { i64::MAX } else { *max };
                        *first <= hi && lo <= *last
                    }
                    _ => true,
                }
            }
            (Self::StringList { min, max }, AttributeValue::StringList(values)) => {
                match (values.first(), values.last()) {
                    (Some(first), Some(last)) => {
                        let hi = if open_right { usize::MAX } else { *max };
                        first.0 <= hi && *min <= last.0
                    }
                    _ => true,
                }
            }
            (Self::Segments, AttributeValue::Segments(_)) => true,
            (Self::Frequency, AttributeValue::FrequencyCaps(_)) => true,
            (bound, value) => {
                unreachable!("Cannot test {value:?} against {bound:?}. This is a bug.")
            }
        }
    }
}

fn split_integers(min: i64, max: i64) -> ((i64, i64), (i64, i64)) {
    match i128::from(max) - i128::from(min) {
        1 => ((min, min), (max, max)),
        width if width > 1 => {
            let middle = min + (width / 2) as i64;
            ((min, middle), (middle, max))
        }
        _ => unreachable!("Cannot split atomic bound [{min}, {max}]. This is a bug."),
    }
}

fn split_ids(min: usize, max: usize) -> ((usize, usize), (usize, usize)) {
    match max.checked_sub(min) {
        Some(1) => ((min, min), (max, max)),
        Some(width) if width > 1 => {
            let middle = min + width / 2;
            ((min, middle), (middle, max))
        }
        _ => unreachable!("Cannot split atomic bound [{min}, {max}]. This is a bug."),
    }
}

fn split_floats(min: Decimal, max: Decimal) -> ((Decimal, Decimal), (Decimal, Decimal)) {
    match max.checked_sub(min) {
        Some(width) if width == Decimal::ONE => ((min, min), (max, max)),
        Some(width) if width > Decimal::ONE => {
            let middle = min + (width / Decimal::TWO).ceil();
            ((min, middle), (middle, max))
        }
        _ => unreachable!("Cannot split atomic bound [{min}, {max}]. This is a bug."),
    }
}

/// Range of values of `attribute` for which `expression` may be true, within `domain`.
///
/// Conjunctions keep the union of the ranges of their operands rather than their intersection.
/// The result is wider than needed for expressions such as `a > 1 and a < 5` but never drops a
/// value that could match.
pub fn bound_of(attribute: AttributeIndex, domain: &ValueBound, expression: &Node) -> ValueBound {
    match domain {
        ValueBound::Boolean { min, max } => {
            let limits = walk(expression, attribute, false, &boolean_limits);
            ValueBound::Boolean {
                min: limits.min.unwrap_or(*min),
                max: limits.max.unwrap_or(*max),
            }
        }
        ValueBound::Integer { min, max } => {
            let limits = walk(expression, attribute, false, &integer_limits);
            ValueBound::Integer {
                min: limits.min.unwrap_or(*min),
                max: limits.max.unwrap_or(*max),
            }
        }
        ValueBound::IntegerList { min, max } => {
            let limits = walk(expression, attribute, false, &integer_list_limits);
            ValueBound::IntegerList {
                min: limits.min.unwrap_or(*min),
                max: limits.max.unwrap_or(*max),
            }
        }
        ValueBound::Float { min, max } => {
            let limits = walk(expression, attribute, false, &float_limits);
            ValueBound::Float {
                min: limits.min.unwrap_or(*min),
                max: limits.max.unwrap_or(*max),
            }
        }
        ValueBound::String { min, max } => {
            let limits = walk(expression, attribute, false, &string_limits);
            ValueBound::String {
                min: limits.min.unwrap_or(*min),
                max: limits.max.unwrap_or(*max),
            }
        }
        ValueBound::StringList { min, max } => {
            let limits = walk(expression, attribute, false, &string_list_limits);
            ValueBound::StringList {
                min: limits.min.unwrap_or(*min),
                max: limits.max.unwrap_or(*max),
            }
        }
        ValueBound::Segments => ValueBound::Segments,
        ValueBound::Frequency => ValueBound::Frequency,
    }
}

/// Range covering the literals `expression` compares `attribute` against, if it mentions any.
///
/// Strict comparisons contribute the first value they accept. Strings and booleans only report
/// whether they are mentioned, with an empty range.
pub(crate) fn literal_span(
    attribute: AttributeIndex,
    domain: &ValueBound,
    expression: &Node,
) -> Option<ValueBound> {
    match domain {
        ValueBound::Integer { .. } => {
            let (min, max) = span(expression, attribute, false, &integer_span)?;
            Some(ValueBound::Integer { min, max })
        }
        ValueBound::IntegerList { .. } => {
            let (min, max) = span(expression, attribute, false, &integer_list_span)?;
            Some(ValueBound::IntegerList { min, max })
        }
        ValueBound::Float { .. } => {
            let (min, max) = span(expression, attribute, false, &float_span)?;
            Some(ValueBound::Float { min, max })
        }
        ValueBound::String { .. } => {
            span(expression, attribute, false, &string_span)?;
            Some(ValueBound::String { min: 0, max: 0 })
        }
        ValueBound::StringList { .. } => {
            span(expression, attribute, false, &string_list_span)?;
            Some(ValueBound::StringList { min: 0, max: 0 })
        }
        ValueBound::Boolean { .. } | ValueBound::Segments | ValueBound::Frequency => None,
    }
}

/// Limits implied by part of an expression; `None` leaves that side to the domain.
#[derive(Clone, Copy, Debug)]
struct Limits<T> {
    min: Option<T>,
    max: Option<T>,
}

impl<T: Copy + Ord> Limits<T> {
    fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    fn exactly(value: T) -> Self {
        Self {
            min: Some(value),
            max: Some(value),
        }
    }

    fn spanning(values: &[T]) -> Self {
        Self {
            min: values.first().copied(),
            max: values.last().copied(),
        }
    }

    fn at_least(value: T) -> Self {
        Self {
            min: Some(value),
            max: None,
        }
    }

    fn at_most(value: T) -> Self {
        Self {
            min: None,
            max: Some(value),
        }
    }

    /// Both operands must constrain a side for it to stay constrained.
    fn union(self, other: Self) -> Self {
        Self {
            min: self.min.zip(other.min).map(|(a, b)| a.min(b)),
            max: self.max.zip(other.max).map(|(a, b)| a.max(b)),
        }
    }

    /// Either operand constrains a side; when both do, their union is kept.
    ///
    /// Wider than the true intersection: `a > 2 and a > 5` keeps `a >= 3`, which places the
    /// subscription in a coarser bucket than needed. Matches are never lost.
    fn widened_intersection(self, other: Self) -> Self {
        Self {
            min: self.min.into_iter().chain(other.min).min(),
            max: self.max.into_iter().chain(other.max).max(),
        }
    }
}

fn walk<T, F>(node: &Node, attribute: AttributeIndex, reversed: bool, leaf: &F) -> Limits<T>
where
    T: Copy + Ord,
    F: Fn(&Predicate, bool) -> Limits<T>,
{
    match node {
        Node::Value(predicate) if predicate.attribute() == attribute => leaf(predicate, reversed),
        Node::Value(_) => Limits::unbounded(),
        Node::Not(node) => walk(node, attribute, !reversed, leaf),
        Node::And(left, right) | Node::Or(left, right) => {
            let left = walk(left, attribute, reversed, leaf);
            let right = walk(right, attribute, reversed, leaf);
            // Under a negation, a conjunction behaves as a disjunction and vice versa.
            let conjunction = matches!(node, Node::And(_, _)) != reversed;
            if conjunction {
                left.widened_intersection(right)
            } else {
                left.union(right)
            }
        }
    }
}

fn comparison_limits<T: Copy + Ord>(
    operator: ComparisonOperator,
    value: T,
    reversed: bool,
    before: fn(T) -> T,
    after: fn(T) -> T,
) -> Limits<T> {
    match (operator, reversed) {
        (ComparisonOperator::LessThan, false) => Limits::at_most(before(value)),
        (ComparisonOperator::LessThan, true) => Limits::at_least(value),
        (ComparisonOperator::LessThanEqual, false) => Limits::at_most(value),
        (ComparisonOperator::LessThanEqual, true) => Limits::at_least(after(value)),
        (ComparisonOperator::GreaterThan, false) => Limits::at_least(after(value)),
        (ComparisonOperator::GreaterThan, true) => Limits::at_most(value),
        (ComparisonOperator::GreaterThanEqual, false) => Limits::at_least(value),
        (ComparisonOperator::GreaterThanEqual, true) => Limits::at_most(before(value)),
    }
}

fn equality_limits<T: Copy + Ord>(
    operator: EqualityOperator,
    value: T,
    reversed: bool,
) -> Limits<T> {
    match (operator, reversed) {
        (EqualityOperator::Equal, false) | (EqualityOperator::NotEqual, true) => {
            Limits::exactly(value)
        }
        _ => Limits::unbounded(),
    }
}

fn membership_limits<T: Copy + Ord>(includes: bool, values: &[T], reversed: bool) -> Limits<T> {
    if includes != reversed {
        Limits::spanning(values)
    } else {
        Limits::unbounded()
    }
}

fn boolean_limits(predicate: &Predicate, reversed: bool) -> Limits<bool> {
    match predicate.kind() {
        PredicateKind::Variable => Limits::exactly(!reversed),
        _ => Limits::unbounded(),
    }
}

fn integer_limits(predicate: &Predicate, reversed: bool) -> Limits<i64> {
    match predicate.kind() {
        PredicateKind::Comparison(operator, ComparisonValue::Integer(value)) => comparison_limits(
            *operator,
            *value,
            reversed,
            |v| v.saturating_sub(1),
            |v| v.saturating_add(1),
        ),
        PredicateKind::Equality(operator, PrimitiveLiteral::Integer(value)) => {
            equality_limits(*operator, *value, reversed)
        }
        PredicateKind::Set(operator, ListLiteral::IntegerList(values)) => {
            membership_limits(*operator == SetOperator::In, values, reversed)
        }
        _ => Limits::unbounded(),
    }
}

fn float_limits(predicate: &Predicate, reversed: bool) -> Limits<Decimal> {
    match predicate.kind() {
        PredicateKind::Comparison(operator, ComparisonValue::Float(value)) => comparison_limits(
            *operator,
            *value,
            reversed,
            |v| v.checked_sub(FLOAT_STEP).unwrap_or(v),
            |v| v.checked_add(FLOAT_STEP).unwrap_or(v),
        ),
        PredicateKind::Equality(operator, PrimitiveLiteral::Float(value)) => {
            equality_limits(*operator, *value, reversed)
        }
        _ => Limits::unbounded(),
    }
}

fn string_limits(predicate: &Predicate, reversed: bool) -> Limits<usize> {
    match predicate.kind() {
        PredicateKind::Equality(operator, PrimitiveLiteral::String(value)) => {
            equality_limits(*operator, value.0, reversed)
        }
        PredicateKind::Set(operator, ListLiteral::StringList(values)) => {
            let values: Vec<_> = values.iter().map(|id| id.0).collect();
            membership_limits(*operator == SetOperator::In, &values, reversed)
        }
        _ => Limits::unbounded(),
    }
}

fn integer_list_limits(predicate: &Predicate, reversed: bool) -> Limits<i64> {
    match predicate.kind() {
        PredicateKind::List(operator, ListLiteral::IntegerList(values)) => {
            membership_limits(*operator != ListOperator::NoneOf, values, reversed)
        }
        _ => Limits::unbounded(),
    }
}

fn string_list_limits(predicate: &Predicate, reversed: bool) -> Limits<usize> {
    match predicate.kind() {
        PredicateKind::List(operator, ListLiteral::StringList(values)) => {
            let values: Vec<_> = values.iter().map(|id| id.0).collect();
            membership_limits(*operator != ListOperator::NoneOf, &values, reversed)
        }
        _ => Limits::unbounded(),
    }
}

/// Grow `domain` to cover `span`, as computed by [`literal_span`].
///
/// An unbounded side is replaced by the span rather than widened. String domains grow to the
/// `interned` strings of the attribute instead.
pub(crate) fn widen_domain(domain: &ValueBound, span: &ValueBound, interned: usize) -> ValueBound {
    match (domain, span) {
        (ValueBound::Integer { min, max }, ValueBound::Integer { min: lo, max: hi }) => {
            ValueBound::Integer {
                min: widen_min(*min, *lo, i64::MIN),
                max: widen_max(*max, *hi, i64::MAX),
            }
        }
        (ValueBound::IntegerList { min, max }, ValueBound::IntegerList { min: lo, max: hi }) => {
            ValueBound::IntegerList {
                min: widen_min(*min, *lo, i64::MIN),
                max: widen_max(*max, *hi, i64::MAX),
            }
        }
        (ValueBound::Float { min, max }, ValueBound::Float { min: lo, max: hi }) => {
            ValueBound::Float {
                min: widen_min(*min, *lo, Decimal::MIN),
                max: widen_max(*max, *hi, Decimal::MAX),
            }
        }
        (ValueBound::String { min, max }, ValueBound::String { .. }) => ValueBound::String {
            min: *min,
            max: widen_max(*max, interned.saturating_sub(1), usize::MAX),
        },
        (ValueBound::StringList { min, max }, ValueBound::StringList { .. }) => {
            ValueBound::StringList {
                min: *min,
                max: widen_max(*max, interned.saturating_sub(1), usize::MAX),
            }
        }
        (domain, _) => domain.clone(),
    }
}

fn widen_min<T: Copy + Ord>(current: T, value: T, unbounded: T) -> T {
    if current == unbounded {
        value
    } else {
        current.min(value)
    }
}

fn widen_max<T: Copy + Ord>(current: T, value: T, unbounded: T) -> T {
    if current == unbounded {
        value
    } else {
        current.max(value)
    }
}

fn span<T, F>(node: &Node, attribute: AttributeIndex, reversed: bool, leaf: &F) -> Option<(T, T)>
where
    T: Copy + Ord,
    F: Fn(&Predicate, bool) -> Option<(T, T)>,
{
    match node {
        Node::Value(predicate) if predicate.attribute() == attribute => leaf(predicate, reversed),
        Node::Value(_) => None,
        Node::Not(node) => span(node, attribute, !reversed, leaf),
        Node::And(left, right) | Node::Or(left, right) => {
            match (
                span(left, attribute, reversed, leaf),
                span(right, attribute, reversed, leaf),
            ) {
                (Some((lmin, lmax)), Some((rmin, rmax))) => Some((lmin.min(rmin), lmax.max(rmax))),
                (left, right) => left.or(right),
            }
        }
    }
}

fn comparison_point<T>(
    operator: ComparisonOperator,
    value: T,
    reversed: bool,
    before: fn(T) -> T,
    after: fn(T) -> T,
) -> T {
    match (operator, reversed) {
        (ComparisonOperator::LessThan, false) | (ComparisonOperator::GreaterThanEqual, true) => {
            before(value)
        }
        (ComparisonOperator::GreaterThan, false) | (ComparisonOperator::LessThanEqual, true) => {
            after(value)
        }
        _ => value,
    }
}

fn first_and_last<T: Copy>(values: &[T]) -> Option<(T, T)> {
    values.first().copied().zip(values.last().copied())
}

fn integer_span(predicate: &Predicate, reversed: bool) -> Option<(i64, i64)> {
    match predicate.kind() {
        PredicateKind::Comparison(operator, ComparisonValue::Integer(value)) => {
            let point = comparison_point(
                *operator,
                *value,
                reversed,
                |v| v.saturating_sub(1),
                |v| v.saturating_add(1),
            );
            Some((point, point))
        }
        PredicateKind::Equality(_, PrimitiveLiteral::Integer(value)) => Some((*value, *value)),
        PredicateKind::Set(_, ListLiteral::IntegerList(values)) => first_and_last(values),
        _ => None,
    }
}

fn float_span(predicate: &Predicate, reversed: bool) -> Option<(Decimal, Decimal)> {
    match predicate.kind() {
        PredicateKind::Comparison(operator, ComparisonValue::Float(value)) => {
            let point = comparison_point(
                *operator,
                *value,
                reversed,
                |v| v.checked_sub(FLOAT_STEP).unwrap_or(v),
                |v| v.checked_add(FLOAT_STEP).unwrap_or(v),
            );
            Some((point, point))
        }
        PredicateKind::Equality(_, PrimitiveLiteral::Float(value)) => Some((*value, *value)),
        _ => None,
    }
}

fn integer_list_span(predicate: &Predicate, _: bool) -> Option<(i64, i64)> {
    match predicate.kind() {
        PredicateKind::List(_, ListLiteral::IntegerList(values)) => first_and_last(values),
        _ => None,
    }
}

fn string_span(predicate: &Predicate, _: bool) -> Option<(usize, usize)> {
    match predicate.kind() {
        PredicateKind::Equality(_, PrimitiveLiteral::String(value)) => Some((value.0, value.0)),
        PredicateKind::Set(_, ListLiteral::StringList(values)) => {
            first_and_last(values).map(|(first, last)| (first.0, last.0))
        }
        _ => None,
    }
}

fn string_list_span(predicate: &Predicate, _: bool) -> Option<(usize, usize)> {
    match predicate.kind() {
        PredicateKind::List(_, ListLiteral::StringList(values)) => {
            first_and_last(values).map(|(first, last)| (first.0, last.0))
        }
        _ => None,
    }
}
