use crate::{
    ast::{Node, Outcome},
    events::{AttributeIndex, AttributeTable, Event},
};

pub type SubscriptionId = u64;

/// An expression registered in the index along with what the index needs to place it.
#[derive(Clone, Debug)]
pub(crate) struct Subscription {
    pub(crate) id: SubscriptionId,
    pub(crate) expression: Node,
    attributes: Vec<AttributeIndex>,
    short_circuit: ShortCircuit,
}

/// Attributes whose absence from an event decides the expression on its own.
#[derive(Clone, Default, Debug)]
struct ShortCircuit {
    pass: Vec<AttributeIndex>,
    fail: Vec<AttributeIndex>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, expression: Node, attributes: &AttributeTable) -> Self {
        let referenced = expression.attributes();
        let mut short_circuit = ShortCircuit::default();
        for attribute in referenced
            .iter()
            .copied()
            .filter(|attribute| attributes.domain(*attribute).allows_undefined())
        {
            match expression.outcome_when_undefined(attribute) {
                Outcome::Pass => short_circuit.pass.push(attribute),
                Outcome::Fail => short_circuit.fail.push(attribute),
                Outcome::Unknown => {}
            }
        }

        Self {
            id,
            expression,
            attributes: referenced,
            short_circuit,
        }
    }

    /// Sorted and free of duplicates.
    #[inline]
    pub(crate) fn attributes(&self) -> &[AttributeIndex] {
        &self.attributes
    }

    #[inline]
    pub(crate) fn has_attribute(&self, attribute: AttributeIndex) -> bool {
        self.attributes.binary_search(&attribute).is_ok()
    }

    /// The outcome the event forces through an undefined attribute, if any.
    pub(crate) fn short_circuit(&self, event: &Event) -> Option<bool> {
        if self
            .short_circuit
            .pass
            .iter()
            .any(|attribute| !event.is_defined(*attribute))
        {
            return Some(true);
        }
        if self
            .short_circuit
            .fail
            .iter()
            .any(|attribute| !event.is_defined(*attribute))
        {
            return Some(false);
        }
        None
    }

    #[inline]
    pub(crate) fn evaluate(&self, event: &Event) -> bool {
        self.expression.evaluate(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        events::{AttributeDefinition, EventBuilder},
        parser::parse,
        strings::StringTable,
    };

    fn define_attributes() -> AttributeTable {
        let definitions = [
            AttributeDefinition::integer("a").allow_undefined(),
            AttributeDefinition::integer("b").allow_undefined(),
            AttributeDefinition::integer("c"),
        ];
        AttributeTable::new(&definitions).unwrap()
    }

    fn subscription(expression: &str, attributes: &AttributeTable) -> Subscription {
        let mut strings = StringTable::new();
        let node = parse(expression, attributes, &mut strings).unwrap();
        Subscription::new(1, node, attributes)
    }

    #[test]
    fn collect_the_referenced_attributes() {
        let attributes = define_attributes();

        let subscription = subscription("c = 1 and (a = 1 or c = 2)", &attributes);

        assert_eq!(
            &[AttributeIndex(0), AttributeIndex(2)],
            subscription.attributes()
        );
        assert!(subscription.has_attribute(AttributeIndex(2)));
        assert!(!subscription.has_attribute(AttributeIndex(1)));
    }

    #[test]
    fn reject_without_evaluating_when_a_required_attribute_is_missing() {
        let attributes = define_attributes();
        let strings = StringTable::new();
        let subscription = subscription("a = 1 and c = 2", &attributes);
        let mut builder = EventBuilder::new(&attributes, &strings);
        builder.with_integer("c", 2).unwrap();
        let event = builder.build().unwrap();

        assert_eq!(Some(false), subscription.short_circuit(&event));
    }

    #[test]
    fn accept_without_evaluating_when_a_negated_attribute_is_missing() {
        let attributes = define_attributes();
        let strings = StringTable::new();
        let subscription = subscription("not (b = 1) or c = 2", &attributes);
        let event = EventBuilder::new(&attributes, &strings).build().unwrap();

        assert_eq!(Some(true), subscription.short_circuit(&event));
    }

    #[test]
    fn fall_back_to_evaluation_when_every_attribute_is_defined() {
        let attributes = define_attributes();
        let strings = StringTable::new();
        let subscription = subscription("a = 1 and c = 2", &attributes);
        let mut builder = EventBuilder::new(&attributes, &strings);
        builder.with_integer("a", 1).unwrap();
        builder.with_integer("c", 2).unwrap();
        let event = builder.build().unwrap();

        assert_eq!(None, subscription.short_circuit(&event));
        assert!(subscription.evaluate(&event));
    }

    #[test]
    fn ignore_attributes_that_must_be_defined() {
        let attributes = define_attributes();
        let strings = StringTable::new();
        let subscription = subscription("c = 2", &attributes);
        let event = EventBuilder::new(&attributes, &strings).build().unwrap();

        assert_eq!(None, subscription.short_circuit(&event));
    }
}
