use crate::{
    events::{AttributeIndex, Event},
    predicates::{NullOperator, Predicate, PredicateKind},
};
use itertools::Itertools;

pub type TreeNode = Box<Node>;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Node {
    And(TreeNode, TreeNode),
    Or(TreeNode, TreeNode),
    Not(TreeNode),
    Value(Predicate),
}

impl Node {
    pub fn evaluate(&self, event: &Event) -> bool {
        match self {
            Self::And(left, right) => left.evaluate(event) && right.evaluate(event),
            Self::Or(left, right) => left.evaluate(event) || right.evaluate(event),
            Self::Not(node) => !node.evaluate(event),
            Self::Value(predicate) => predicate.evaluate(event),
        }
    }

    /// Resolve the capped identifiers of frequency predicates from insertion constants.
    ///
    /// Returns the name of the first missing constant.
    pub fn assign_constants(&mut self, constants: &[(&str, i64)]) -> Result<(), &'static str> {
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                left.assign_constants(constants)?;
                right.assign_constants(constants)
            }
            Self::Not(node) => node.assign_constants(constants),
            Self::Value(predicate) => predicate.assign_constants(constants),
        }
    }

    /// The distinct attributes referenced by the expression, in ascending order.
    pub fn attributes(&self) -> Vec<AttributeIndex> {
        let mut attributes = Vec::new();
        self.collect_attributes(&mut attributes);
        attributes.into_iter().sorted_unstable().dedup().collect()
    }

    fn collect_attributes(&self, attributes: &mut Vec<AttributeIndex>) {
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_attributes(attributes);
                right.collect_attributes(attributes);
            }
            Self::Not(node) => node.collect_attributes(attributes),
            Self::Value(predicate) => attributes.extend(predicate.attributes()),
        }
    }

    /// What the expression evaluates to whenever `attribute` is undefined, if that is known
    /// without looking at the other attributes.
    pub(crate) fn outcome_when_undefined(&self, attribute: AttributeIndex) -> Outcome {
        self.outcome(attribute, false)
    }

    fn outcome(&self, attribute: AttributeIndex, inverted: bool) -> Outcome {
        match self {
            Self::And(left, right) => {
                let (left, right) = (
                    left.outcome(attribute, inverted),
                    right.outcome(attribute, inverted),
                );
                if inverted {
                    left.or(right)
                } else {
                    left.and(right)
                }
            }
            Self::Or(left, right) => {
                let (left, right) = (
                    left.outcome(attribute, inverted),
                    right.outcome(attribute, inverted),
                );
                if inverted {
                    left.and(right)
                } else {
                    left.or(right)
                }
            }
            Self::Not(node) => node.outcome(attribute, !inverted),
            Self::Value(predicate) if predicate.attributes().any(|a| a == attribute) => {
                let passes = match predicate.kind() {
                    PredicateKind::Null(NullOperator::IsNull)
                        if predicate.attribute() == attribute =>
                    {
                        true
                    }
                    // An empty set of caps passes without looking at the time.
                    PredicateKind::Frequency(_) if predicate.attribute() != attribute => {
                        return Outcome::Unknown;
                    }
                    _ => false,
                };
                if passes != inverted {
                    Outcome::Pass
                } else {
                    Outcome::Fail
                }
            }
            Self::Value(_) => Outcome::Unknown,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Outcome {
    Pass,
    Fail,
    Unknown,
}

impl Outcome {
    fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Fail, _) | (_, Self::Fail) => Self::Fail,
            (Self::Pass, Self::Pass) => Self::Pass,
            _ => Self::Unknown,
        }
    }

    fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::Pass, _) | (_, Self::Pass) => Self::Pass,
            (Self::Fail, Self::Fail) => Self::Fail,
            _ => Self::Unknown,
        }
    }
}
