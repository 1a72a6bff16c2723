use crate::{
    bounds::ValueBound,
    strings::{StringId, StringTable},
};
use rust_decimal::Decimal;
use std::{collections::HashMap, str::FromStr};
use thiserror::Error;

#[derive(Error, PartialEq, Debug)]
pub enum EventError {
    #[error("attribute {0} has already been defined")]
    AlreadyPresent(String),
    #[error("attribute {0} does not exist")]
    NonExisting(String),
    #[error("attribute {0} has an empty domain")]
    InvalidBounds(String),
    #[error("{name:?}: mismatching types => expected: {expected:?}, found: {actual:?}")]
    MismatchingTypes {
        name: String,
        expected: AttributeKind,
        actual: AttributeKind,
    },
}

/// Collects the values of an event.
///
/// Attributes that are never set stay undefined: events only need to carry the attributes they
/// know about.
pub struct EventBuilder<'a> {
    by_ids: Vec<AttributeValue>,
    attributes: &'a AttributeTable,
    strings: &'a StringTable,
}

impl<'a> EventBuilder<'a> {
    pub fn new(attributes: &'a AttributeTable, strings: &'a StringTable) -> Self {
        Self {
            attributes,
            strings,
            by_ids: vec![AttributeValue::Undefined; attributes.len()],
        }
    }

    pub fn build(self) -> Result<Event, EventError> {
        Ok(Event(self.by_ids))
    }

    pub fn with_boolean(&mut self, name: &str, value: bool) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::Boolean, |_, _| {
            AttributeValue::Boolean(value)
        })
    }

    /// Set an integer value. Float attributes accept integers as well.
    pub fn with_integer(&mut self, name: &str, value: i64) -> Result<(), EventError> {
        let is_float = self
            .attributes
            .by_name(name)
            .is_some_and(|id| self.attributes.by_id(id) == AttributeKind::Float);
        if is_float {
            return self.with_float(name, Decimal::from(value));
        }
        self.add_value(name, AttributeKind::Integer, |_, _| {
            AttributeValue::Integer(value)
        })
    }

    pub fn with_float(&mut self, name: &str, value: Decimal) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::Float, |_, _| AttributeValue::Float(value))
    }

    pub fn with_string(&mut self, name: &str, value: &str) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::String, |strings, id| {
            AttributeValue::String(strings.get(id, value), value.to_string())
        })
    }

    pub fn with_integer_list(&mut self, name: &str, values: &[i64]) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::IntegerList, |_, _| {
            let mut values = values.to_vec();
            values.sort_unstable();
            values.dedup();
            AttributeValue::IntegerList(values)
        })
    }

    pub fn with_string_list(&mut self, name: &str, values: &[&str]) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::StringList, |strings, id| {
            let mut values: Vec<_> = values.iter().map(|v| strings.get(id, v)).collect();
            values.sort_unstable();
            values.dedup();
            AttributeValue::StringList(values)
        })
    }

    /// Set the segments of an event as `(segment id, timestamp in seconds)` pairs.
    pub fn with_segments(&mut self, name: &str, values: &[(i64, i64)]) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::Segments, |_, _| {
            let mut values = values.to_vec();
            values.sort_unstable();
            values.dedup_by_key(|(segment, _)| *segment);
            AttributeValue::Segments(values)
        })
    }

    /// Set the impressions already served, one cap per capped entity.
    pub fn with_frequency_caps(
        &mut self,
        name: &str,
        caps: &[FrequencyCap],
    ) -> Result<(), EventError> {
        self.add_value(name, AttributeKind::FrequencyCaps, |_, _| {
            AttributeValue::FrequencyCaps(caps.to_vec())
        })
    }

    fn add_value<F>(&mut self, name: &str, actual: AttributeKind, f: F) -> Result<(), EventError>
    where
        F: FnOnce(&StringTable, AttributeIndex) -> AttributeValue,
    {
        let index = self
            .attributes
            .by_name(name)
            .ok_or_else(|| EventError::NonExisting(name.to_string()))?;
        let expected = self.attributes.by_id(index);
        if actual != expected {
            return Err(EventError::MismatchingTypes {
                name: name.to_string(),
                expected,
                actual,
            });
        }
        self.by_ids[index.0] = f(self.strings, index);
        Ok(())
    }
}

/// The values of an event, indexed by attribute.
#[derive(Clone, Debug)]
pub struct Event(Vec<AttributeValue>);

impl Event {
    #[inline]
    pub fn get(&self, attribute: AttributeIndex) -> &AttributeValue {
        self.0
            .get(attribute.0)
            .unwrap_or(&AttributeValue::Undefined)
    }

    #[inline]
    pub fn is_defined(&self, attribute: AttributeIndex) -> bool {
        !matches!(self.get(attribute), AttributeValue::Undefined)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Float(Decimal),
    /// The interned identifier along with the text, which pattern predicates look into.
    String(StringId, String),
    IntegerList(Vec<i64>),
    StringList(Vec<StringId>),
    Segments(Vec<(i64, i64)>),
    FrequencyCaps(Vec<FrequencyCap>),
    Undefined,
}

/// Impressions served for one capped entity.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FrequencyCap {
    kind: FrequencyKind,
    id: u32,
    namespace: String,
    timestamp: Option<i64>,
    value: u32,
}

impl FrequencyCap {
    /// `timestamp` is the time of the last impression, in microseconds.
    pub fn new(
        kind: FrequencyKind,
        id: u32,
        namespace: &str,
        timestamp: Option<i64>,
        value: u32,
    ) -> Self {
        Self {
            kind,
            id,
            namespace: namespace.to_string(),
            timestamp,
            value,
        }
    }

    #[inline]
    pub fn kind(&self) -> FrequencyKind {
        self.kind
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn timestamp(&self) -> Option<i64> {
        self.timestamp
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }
}

#[derive(Hash, Clone, Copy, PartialEq, Eq, Debug)]
pub enum FrequencyKind {
    Advertiser,
    AdvertiserIp,
    Campaign,
    CampaignIp,
    CampaignGroup,
    CampaignGroupIp,
    Flight,
    FlightIp,
    Product,
    ProductIp,
}

impl FrequencyKind {
    /// Name of the insertion constant holding the identifier of the capped entity.
    pub fn constant(self) -> &'static str {
        match self {
            Self::Advertiser | Self::AdvertiserIp => "advertiser_id",
            Self::Campaign | Self::CampaignIp => "campaign_id",
            Self::CampaignGroup | Self::CampaignGroupIp => "campaign_group_id",
            Self::Flight | Self::FlightIp => "flight_id",
            Self::Product | Self::ProductIp => "product_id",
        }
    }
}

impl FromStr for FrequencyKind {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "advertiser" => Ok(Self::Advertiser),
            "advertiser:ip" => Ok(Self::AdvertiserIp),
            "campaign" => Ok(Self::Campaign),
            "campaign:ip" => Ok(Self::CampaignIp),
            "campaign_group" => Ok(Self::CampaignGroup),
            "campaign_group:ip" => Ok(Self::CampaignGroupIp),
            "flight" => Ok(Self::Flight),
            "flight:ip" => Ok(Self::FlightIp),
            "product" => Ok(Self::Product),
            "product:ip" => Ok(Self::ProductIp),
            _ => Err(()),
        }
    }
}

/// Registry of the attributes known to an index along with their domains.
#[derive(Clone, Debug)]
pub struct AttributeTable {
    by_names: HashMap<String, AttributeIndex>,
    by_ids: Vec<AttributeDefinition>,
}

#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Debug)]
pub struct AttributeIndex(pub(crate) usize);

impl AttributeTable {
    pub fn new(definitions: &[AttributeDefinition]) -> Result<Self, EventError> {
        let size = definitions.len();
        let mut by_names = HashMap::with_capacity(size);
        let mut by_ids = Vec::with_capacity(size);
        for (i, definition) in definitions.iter().enumerate() {
            let name = definition.name.to_lowercase();
            if by_names.contains_key(&name) {
                return Err(EventError::AlreadyPresent(definition.name.clone()));
            }
            if !definition.bound.is_valid() {
                return Err(EventError::InvalidBounds(definition.name.clone()));
            }

            by_names.insert(name, AttributeIndex(i));
            by_ids.push(definition.clone());
        }

        Ok(Self { by_names, by_ids })
    }

    pub fn by_name(&self, name: &str) -> Option<AttributeIndex> {
        self.by_names.get(&name.to_lowercase()).cloned()
    }

    pub fn by_id(&self, id: AttributeIndex) -> AttributeKind {
        self.by_ids[id.0].kind.clone()
    }

    pub fn domain(&self, id: AttributeIndex) -> &AttributeDefinition {
        &self.by_ids[id.0]
    }

    pub fn name(&self, id: AttributeIndex) -> &str {
        &self.by_ids[id.0].name
    }

    pub(crate) fn set_bound(&mut self, id: AttributeIndex, bound: ValueBound) {
        self.by_ids[id.0].bound = bound;
    }

    /// A copy whose string domains accept any number of strings.
    pub(crate) fn with_unbounded_strings(&self) -> Self {
        let mut table = self.clone();
        for definition in &mut table.by_ids {
            let bound = match definition.bound {
                ValueBound::String { min, .. } => ValueBound::String {
                    min,
                    max: usize::MAX,
                },
                ValueBound::StringList { min, .. } => ValueBound::StringList {
                    min,
                    max: usize::MAX,
                },
                ref bound => bound.clone(),
            };
            definition.bound = bound;
        }
        table
    }

    pub fn len(&self) -> usize {
        self.by_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ids.is_empty()
    }
}

/// An attribute's name, type and domain.
///
/// The domain is the range of values subscriptions are expected to use. Narrow domains let the
/// index split the subscriptions into value buckets; unbounded ones are only partitioned by
/// attribute.
#[derive(Clone, Debug)]
pub struct AttributeDefinition {
    name: String,
    kind: AttributeKind,
    bound: ValueBound,
    allow_undefined: bool,
}

#[derive(Clone, PartialEq, Debug)]
pub enum AttributeKind {
    Boolean,
    Integer,
    Float,
    String,
    IntegerList,
    StringList,
    Segments,
    FrequencyCaps,
}

impl AttributeDefinition {
    fn with_bound(name: &str, kind: AttributeKind, bound: ValueBound) -> Self {
        Self {
            name: name.to_owned(),
            kind,
            bound,
            allow_undefined: false,
        }
    }

    pub fn boolean(name: &str) -> Self {
        let bound = ValueBound::Boolean {
            min: false,
            max: true,
        };
        Self::with_bound(name, AttributeKind::Boolean, bound)
    }

    pub fn integer(name: &str) -> Self {
        Self::bounded_integer(name, i64::MIN, i64::MAX)
    }

    pub fn bounded_integer(name: &str, min: i64, max: i64) -> Self {
        let bound = ValueBound::Integer { min, max };
        Self::with_bound(name, AttributeKind::Integer, bound)
    }

    pub fn float(name: &str) -> Self {
        Self::bounded_float(name, Decimal::MIN, Decimal::MAX)
    }

    pub fn bounded_float(name: &str, min: Decimal, max: Decimal) -> Self {
        let bound = ValueBound::Float { min, max };
        Self::with_bound(name, AttributeKind::Float, bound)
    }

    pub fn string(name: &str) -> Self {
        let bound = ValueBound::String {
            min: 0,
            max: usize::MAX,
        };
        Self::with_bound(name, AttributeKind::String, bound)
    }

    /// A string attribute whose expressions use at most `count` distinct strings.
    ///
    /// A `count` of zero leaves no room for any string and is rejected when the attribute table
    /// is built.
    pub fn bounded_string(name: &str, count: usize) -> Self {
        let (min, max) = string_ids(count);
        let bound = ValueBound::String { min, max };
        Self::with_bound(name, AttributeKind::String, bound)
    }

    pub fn integer_list(name: &str) -> Self {
        Self::bounded_integer_list(name, i64::MIN, i64::MAX)
    }

    pub fn bounded_integer_list(name: &str, min: i64, max: i64) -> Self {
        let bound = ValueBound::IntegerList { min, max };
        Self::with_bound(name, AttributeKind::IntegerList, bound)
    }

    pub fn string_list(name: &str) -> Self {
        let bound = ValueBound::StringList {
            min: 0,
            max: usize::MAX,
        };
        Self::with_bound(name, AttributeKind::StringList, bound)
    }

    /// See [`AttributeDefinition::bounded_string`].
    pub fn bounded_string_list(name: &str, count: usize) -> Self {
        let (min, max) = string_ids(count);
        let bound = ValueBound::StringList { min, max };
        Self::with_bound(name, AttributeKind::StringList, bound)
    }

    pub fn segments(name: &str) -> Self {
        Self::with_bound(name, AttributeKind::Segments, ValueBound::Segments)
    }

    pub fn frequency_caps(name: &str) -> Self {
        Self::with_bound(name, AttributeKind::FrequencyCaps, ValueBound::Frequency)
    }

    /// Let events leave this attribute out while still reaching the subscriptions partitioned
    /// on it.
    pub fn allow_undefined(mut self) -> Self {
        self.allow_undefined = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    pub fn bound(&self) -> &ValueBound {
        &self.bound
    }

    pub fn allows_undefined(&self) -> bool {
        self.allow_undefined
    }
}

/// Identifiers `0..count` as a closed range; an empty range is kept inverted.
fn string_ids(count: usize) -> (usize, usize) {
    match count.checked_sub(1) {
        Some(max) => (0, max),
        None => (1, 0),
    }
}
