use crate::{
    ast::Node,
    bounds::{literal_span, widen_domain},
    config::Config,
    events::{AttributeDefinition, AttributeTable, Event, EventBuilder, EventError},
    parser::{self, BETreeParseError},
    strings::StringTable,
    subscription::{Subscription, SubscriptionId},
    tree::Tree,
};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BETreeError<'a> {
    #[error("failed to parse the expression with {0:?}")]
    ParseError(BETreeParseError<'a>),
    #[error("failed with {0:?}")]
    Event(EventError),
    #[error("subscription {0} is already indexed")]
    DuplicateSubscription(SubscriptionId),
    #[error("missing constant {0}")]
    MissingConstant(&'static str),
    #[error("domains can only change while the index is empty")]
    NotEmpty,
}

/// An index of boolean expressions over a fixed set of attributes.
///
/// ```
/// use betree::{AttributeDefinition, BETree};
///
/// let attributes = [
///     AttributeDefinition::bounded_integer("exchange_id", 0, 10),
///     AttributeDefinition::string_list("deal_ids"),
/// ];
/// let mut tree = BETree::new(&attributes).unwrap();
/// tree.insert(1, r#"exchange_id = 5 and deal_ids one of ["deal-1", "deal-2"]"#).unwrap();
/// tree.insert(2, "exchange_id <> 5").unwrap();
///
/// let mut builder = tree.make_event();
/// builder.with_integer("exchange_id", 5).unwrap();
/// builder.with_string_list("deal_ids", &["deal-3", "deal-1"]).unwrap();
/// let event = builder.build().unwrap();
///
/// assert_eq!(&[1], tree.search(&event).matches());
/// ```
#[derive(Debug)]
pub struct BETree {
    attributes: AttributeTable,
    strings: StringTable,
    tree: Tree,
}

impl BETree {
    pub fn new(definitions: &[AttributeDefinition]) -> Result<Self, BETreeError<'static>> {
        Self::with_config(definitions, Config::default())
    }

    pub fn with_config(
        definitions: &[AttributeDefinition],
        config: Config,
    ) -> Result<Self, BETreeError<'static>> {
        let attributes = AttributeTable::new(definitions).map_err(BETreeError::Event)?;
        Ok(Self {
            attributes,
            strings: StringTable::new(),
            tree: Tree::new(config),
        })
    }

    /// Parse an expression against the attributes of the index.
    ///
    /// String literals are interned as a side effect, even if the expression is never inserted.
    pub fn parse<'a>(&mut self, expression: &'a str) -> Result<Node, BETreeError<'a>> {
        parser::parse(expression, &self.attributes, &mut self.strings)
            .map_err(BETreeError::ParseError)
    }

    pub fn insert<'a>(
        &mut self,
        id: SubscriptionId,
        expression: &'a str,
    ) -> Result<(), BETreeError<'a>> {
        self.insert_with_constants(id, expression, &[])
    }

    /// Insert an expression whose frequency caps refer to the entity named by a constant, such
    /// as `("flight_id", 12)` for `within_frequency_cap('flight', 'ns', 10, 3600)`.
    pub fn insert_with_constants<'a>(
        &mut self,
        id: SubscriptionId,
        expression: &'a str,
        constants: &[(&str, i64)],
    ) -> Result<(), BETreeError<'a>> {
        if self.tree.contains(id) {
            return Err(BETreeError::DuplicateSubscription(id));
        }
        let mut node = self.parse(expression)?;
        node.assign_constants(constants)
            .map_err(BETreeError::MissingConstant)?;
        self.insert_expression(id, node)
    }

    /// Index an expression built by [`BETree::parse`].
    ///
    /// Frequency caps only match once [`Node::assign_constants`] resolved their identifiers.
    pub fn insert_expression(
        &mut self,
        id: SubscriptionId,
        expression: Node,
    ) -> Result<(), BETreeError<'static>> {
        let subscription = Subscription::new(id, expression, &self.attributes);
        if !self.tree.insert(&self.attributes, subscription) {
            return Err(BETreeError::DuplicateSubscription(id));
        }
        Ok(())
    }

    /// Grow the domains of the attributes an expression compares so that they cover its
    /// literals.
    ///
    /// Running every expression through this before inserting any lets unbounded attributes be
    /// split by value. An unbounded side of a domain is first replaced by the literals, then
    /// widened by the following expressions. String domains grow to the strings interned so far.
    /// Booleans, segments and frequency caps are left untouched.
    pub fn change_boundaries<'a>(&mut self, expression: &'a str) -> Result<(), BETreeError<'a>> {
        if !self.is_empty() {
            return Err(BETreeError::NotEmpty);
        }
        let attributes = self.attributes.with_unbounded_strings();
        let node = parser::parse(expression, &attributes, &mut self.strings)
            .map_err(BETreeError::ParseError)?;
        for attribute in node.attributes() {
            let domain = self.attributes.domain(attribute).bound();
            let Some(span) = literal_span(attribute, domain, &node) else {
                continue;
            };
            let widened = widen_domain(domain, &span, self.strings.count(attribute));
            if widened != *domain {
                debug!(
                    attribute = self.attributes.name(attribute),
                    from = ?domain,
                    to = ?widened,
                    "changed a domain"
                );
                self.attributes.set_bound(attribute, widened);
            }
        }
        Ok(())
    }

    /// Remove a subscription. Returns `false` when no subscription has this identifier.
    pub fn delete(&mut self, id: SubscriptionId) -> bool {
        self.tree.delete(&self.attributes, id)
    }

    pub fn make_event(&self) -> EventBuilder<'_> {
        EventBuilder::new(&self.attributes, &self.strings)
    }

    /// Find every subscription matching the event.
    pub fn search(&self, event: &Event) -> Report {
        let candidates = self.tree.candidates(&self.attributes, event);
        self.evaluate(event, candidates)
    }

    /// Find the subscriptions matching the event among `ids`.
    pub fn search_ids(&self, event: &Event, ids: &[SubscriptionId]) -> Report {
        let ids: HashSet<_> = ids.iter().copied().collect();
        let candidates = self
            .tree
            .candidates(&self.attributes, event)
            .into_iter()
            .filter(|key| ids.contains(&self.tree.subscription(*key).id));
        self.evaluate(event, candidates)
    }

    /// Whether at least one subscription matches the event.
    pub fn exists(&self, event: &Event) -> bool {
        let mut report = Report::default();
        self.tree
            .candidates(&self.attributes, event)
            .into_iter()
            .any(|key| report.check(self.tree.subscription(key), event))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tree.len() == 0
    }

    #[inline]
    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.tree.contains(id)
    }

    fn evaluate<I>(&self, event: &Event, candidates: I) -> Report
    where
        I: IntoIterator<Item = usize>,
    {
        let mut report = Report::default();
        for key in candidates {
            let subscription = self.tree.subscription(key);
            if report.check(subscription, event) {
                report.matches.push(subscription.id);
            }
        }
        debug!(
            matched = report.matches.len(),
            evaluated = report.evaluated,
            shorted = report.shorted,
            "searched the index"
        );
        report
    }
}

/// The subscriptions matching an event along with how much work it took to find them.
#[derive(Clone, Default, PartialEq, Eq, Debug)]
pub struct Report {
    matches: Vec<SubscriptionId>,
    evaluated: usize,
    shorted: usize,
}

impl Report {
    #[inline]
    pub fn matches(&self) -> &[SubscriptionId] {
        &self.matches
    }

    /// Number of expressions that were fully evaluated.
    #[inline]
    pub fn evaluated(&self) -> usize {
        self.evaluated
    }

    /// Number of expressions decided by an undefined attribute alone.
    #[inline]
    pub fn shorted(&self) -> usize {
        self.shorted
    }

    fn check(&mut self, subscription: &Subscription, event: &Event) -> bool {
        match subscription.short_circuit(event) {
            Some(outcome) => {
                self.shorted += 1;
                outcome
            }
            None => {
                self.evaluated += 1;
                subscription.evaluate(event)
            }
        }
    }
}
