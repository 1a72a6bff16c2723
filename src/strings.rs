use crate::events::AttributeIndex;
use std::collections::HashMap;

/// Interns the string literals of expressions into dense identifiers.
///
/// Identifiers are allocated per attribute, starting at zero, so that a string attribute's domain
/// can be expressed as a range of identifiers and split like an integer range.
#[derive(Default, Debug)]
pub struct StringTable {
    by_attributes: HashMap<AttributeIndex, HashMap<String, usize>>,
}

impl StringTable {
    const SENTINEL_ID: usize = usize::MAX;

    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a string seen at event time. Strings that no expression refers to map to a
    /// sentinel that lies outside every domain.
    pub fn get(&self, attribute: AttributeIndex, value: &str) -> StringId {
        let index = self
            .by_attributes
            .get(&attribute)
            .and_then(|values| values.get(value))
            .cloned()
            .unwrap_or(Self::SENTINEL_ID);
        StringId(index)
    }

    /// Number of strings interned for `attribute`.
    pub fn count(&self, attribute: AttributeIndex) -> usize {
        self.by_attributes.get(&attribute).map_or(0, HashMap::len)
    }

    /// Intern `value` for `attribute`, refusing to allocate an identifier above `max_id`.
    pub fn get_or_update(
        &mut self,
        attribute: AttributeIndex,
        value: &str,
        max_id: usize,
    ) -> Option<StringId> {
        let values = self.by_attributes.entry(attribute).or_default();
        if let Some(index) = values.get(value) {
            return Some(StringId(*index));
        }

        let index = values.len();
        if index > max_id || index == Self::SENTINEL_ID {
            return None;
        }
        values.insert(value.to_string(), index);
        Some(StringId(index))
    }
}

#[derive(Clone, Copy, Eq, Ord, PartialEq, PartialOrd, Hash, Debug)]
pub struct StringId(pub(crate) usize);
