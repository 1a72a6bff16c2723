//! The self-partitioning index itself.
//!
//! Every room of the tree is a [`CNode`]: a leaf holding subscriptions plus, once the leaf has
//! overflowed, a directory of partitions keyed by attribute. Each partition owns a binary range
//! tree over the attribute's domain ([`CDir`]) whose every bucket is a room of its own.
//!
//! Nodes live in slabs and refer to each other through typed indices; parent links are plain
//! indices used to walk upwards.
use crate::{
    bounds::{bound_of, ValueBound},
    config::Config,
    events::{AttributeDefinition, AttributeIndex, AttributeTable, Event},
    subscription::{Subscription, SubscriptionId},
};
use slab::Slab;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct CNodeId(usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct PNodeId(usize);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
struct CDirId(usize);

#[derive(Debug)]
struct LNode {
    subscriptions: Vec<usize>,
    max_capacity: usize,
}

impl LNode {
    #[inline]
    fn is_overflowed(&self) -> bool {
        self.subscriptions.len() > self.max_capacity
    }
}

#[derive(Debug)]
struct CNode {
    parent: Option<CDirId>,
    lnode: LNode,
    pdir: Option<PDir>,
}

impl CNode {
    #[inline]
    fn is_empty(&self) -> bool {
        self.lnode.subscriptions.is_empty() && self.pdir.is_none()
    }
}

#[derive(Default, Debug)]
struct PDir {
    pnodes: Vec<PNodeId>,
}

#[derive(Debug)]
struct PNode {
    parent: CNodeId,
    attribute: AttributeIndex,
    cdir: CDirId,
    score: f64,
}

#[derive(Clone, Copy, Debug)]
enum CDirParent {
    PNode(PNodeId),
    CDir(CDirId),
}

#[derive(Debug)]
struct CDir {
    parent: CDirParent,
    attribute: AttributeIndex,
    bound: ValueBound,
    cnode: CNodeId,
    /// Left and right halves of `bound`, always created and freed together.
    children: Option<(CDirId, CDirId)>,
}

#[derive(Debug)]
pub(crate) struct Tree {
    config: Config,
    subscriptions: Slab<Subscription>,
    by_ids: HashMap<SubscriptionId, usize>,
    cnodes: Slab<CNode>,
    pnodes: Slab<PNode>,
    cdirs: Slab<CDir>,
    root: CNodeId,
}

impl Tree {
    pub(crate) fn new(config: Config) -> Self {
        let mut tree = Self {
            config,
            subscriptions: Slab::new(),
            by_ids: HashMap::new(),
            cnodes: Slab::new(),
            pnodes: Slab::new(),
            cdirs: Slab::new(),
            root: CNodeId(0),
        };
        tree.root = tree.create_cnode(None);
        tree
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.subscriptions.len()
    }

    #[inline]
    pub(crate) fn contains(&self, id: SubscriptionId) -> bool {
        self.by_ids.contains_key(&id)
    }

    #[inline]
    pub(crate) fn subscription(&self, key: usize) -> &Subscription {
        &self.subscriptions[key]
    }

    /// Register a subscription and place it in the tree.
    ///
    /// Returns `false` without touching the tree when the identifier is already taken.
    pub(crate) fn insert(&mut self, attributes: &AttributeTable, subscription: Subscription) -> bool {
        if self.contains(subscription.id) {
            return false;
        }
        let id = subscription.id;
        let key = self.subscriptions.insert(subscription);
        self.by_ids.insert(id, key);
        self.insert_into(attributes, key, self.root);
        true
    }

    /// Remove a subscription, pruning the partitions and buckets it leaves empty.
    ///
    /// The root is never freed. Returns `false` for an unknown identifier.
    pub(crate) fn delete(&mut self, attributes: &AttributeTable, id: SubscriptionId) -> bool {
        let Some(key) = self.by_ids.get(&id).copied() else {
            return false;
        };
        if !self.delete_from_cnode(attributes, key, self.root) {
            unreachable!("Subscription {id} is registered but not in the tree. This is a bug.");
        }
        self.by_ids.remove(&id);
        self.subscriptions.remove(key);
        true
    }

    /// Keys of the subscriptions stored in the buckets the event can reach.
    pub(crate) fn candidates(&self, attributes: &AttributeTable, event: &Event) -> Vec<usize> {
        let mut candidates = Vec::new();
        self.match_cnode(attributes, event, self.root, &mut candidates);
        candidates
    }

    fn create_cnode(&mut self, parent: Option<CDirId>) -> CNodeId {
        let cnode = CNode {
            parent,
            lnode: LNode {
                subscriptions: Vec::new(),
                max_capacity: self.config.lnode_max_capacity(),
            },
            pdir: None,
        };
        CNodeId(self.cnodes.insert(cnode))
    }

    fn create_cdir(
        &mut self,
        parent: CDirParent,
        attribute: AttributeIndex,
        bound: ValueBound,
    ) -> CDirId {
        let id = CDirId(self.cdirs.vacant_key());
        let cnode = self.create_cnode(Some(id));
        let key = self.cdirs.insert(CDir {
            parent,
            attribute,
            bound,
            cnode,
            children: None,
        });
        debug_assert_eq!(id.0, key);
        id
    }

    fn create_pnode(
        &mut self,
        attributes: &AttributeTable,
        cnode: CNodeId,
        attribute: AttributeIndex,
    ) -> PNodeId {
        let id = PNodeId(self.pnodes.vacant_key());
        let bound = attributes.domain(attribute).bound().clone();
        let cdir = self.create_cdir(CDirParent::PNode(id), attribute, bound);
        let key = self.pnodes.insert(PNode {
            parent: cnode,
            attribute,
            cdir,
            score: 0.,
        });
        debug_assert_eq!(id.0, key);
        self.cnodes[cnode.0]
            .pdir
            .get_or_insert_with(PDir::default)
            .pnodes
            .push(id);
        id
    }

    fn insert_into(&mut self, attributes: &AttributeTable, key: usize, cnode: CNodeId) {
        if let Some(pnode) = self.best_pnode(key, cnode) {
            let cdir = self.insert_cdir(attributes, key, self.pnodes[pnode.0].cdir);
            self.insert_into(attributes, key, self.cdirs[cdir.0].cnode);
            self.update_pnode_score(attributes, pnode);
            return;
        }

        self.cnodes[cnode.0].lnode.subscriptions.push(key);
        match self.cnodes[cnode.0].parent {
            None => self.partition_space(attributes, cnode),
            Some(cdir) => self.cluster_space(attributes, cdir),
        }
    }

    /// The highest scoring partition of `cnode` on one of the subscription's attributes.
    ///
    /// Ties go to the lowest attribute.
    fn best_pnode(&self, key: usize, cnode: CNodeId) -> Option<PNodeId> {
        if self.cnodes[cnode.0].pdir.is_none() {
            return None;
        }
        let mut best: Option<PNodeId> = None;
        for attribute in self.subscriptions[key].attributes() {
            let Some(pnode) = self.find_pnode(cnode, *attribute) else {
                continue;
            };
            if self.is_used_in_parent(cnode, *attribute) {
                continue;
            }
            let score = self.pnodes[pnode.0].score;
            if best.map_or(true, |best| score > self.pnodes[best.0].score) {
                best = Some(pnode);
            }
        }
        best
    }

    fn find_pnode(&self, cnode: CNodeId, attribute: AttributeIndex) -> Option<PNodeId> {
        self.cnodes[cnode.0]
            .pdir
            .as_ref()?
            .pnodes
            .iter()
            .copied()
            .find(|pnode| self.pnodes[pnode.0].attribute == attribute)
    }

    /// Whether a partition above `cnode` already splits on `attribute`.
    fn is_used_in_parent(&self, cnode: CNodeId, attribute: AttributeIndex) -> bool {
        let mut current = self.cnodes[cnode.0].parent;
        while let Some(cdir) = current {
            if self.cdirs[cdir.0].attribute == attribute {
                return true;
            }
            let pnode = self.owning_pnode(cdir);
            current = self.cnodes[self.pnodes[pnode.0].parent.0].parent;
        }
        false
    }

    fn owning_pnode(&self, mut cdir: CDirId) -> PNodeId {
        loop {
            match self.cdirs[cdir.0].parent {
                CDirParent::PNode(pnode) => return pnode,
                CDirParent::CDir(parent) => cdir = parent,
            }
        }
    }

    /// Descend towards the narrowest bucket that encloses the subscription.
    fn insert_cdir(&self, attributes: &AttributeTable, key: usize, cdir: CDirId) -> CDirId {
        match self.cdirs[cdir.0].children {
            Some((left, _)) if self.is_sub_enclosed(attributes, key, left) => {
                self.insert_cdir(attributes, key, left)
            }
            Some((_, right)) if self.is_sub_enclosed(attributes, key, right) => {
                self.insert_cdir(attributes, key, right)
            }
            _ => cdir,
        }
    }

    fn is_sub_enclosed(&self, attributes: &AttributeTable, key: usize, cdir: CDirId) -> bool {
        let subscription = &self.subscriptions[key];
        let cdir = &self.cdirs[cdir.0];
        if !subscription.has_attribute(cdir.attribute) {
            return false;
        }
        let domain = attributes.domain(cdir.attribute).bound();
        bound_of(cdir.attribute, domain, &subscription.expression).is_enclosed_by(&cdir.bound)
    }

    /// Move subscriptions out of an overflowed leaf into new partitions, best attribute first.
    fn partition_space(&mut self, attributes: &AttributeTable, cnode: CNodeId) {
        while self.cnodes[cnode.0].lnode.is_overflowed() {
            let Some((attribute, count)) = self.next_partition_attribute(attributes, cnode) else {
                break;
            };
            if count < self.config.partition_min_size() {
                break;
            }

            let pnode = self.create_pnode(attributes, cnode, attribute);
            let root = self.pnodes[pnode.0].cdir;
            let subscriptions = std::mem::take(&mut self.cnodes[cnode.0].lnode.subscriptions);
            let (moving, staying): (Vec<_>, Vec<_>) = subscriptions
                .into_iter()
                .partition(|key| self.subscriptions[*key].has_attribute(attribute));
            self.cnodes[cnode.0].lnode.subscriptions = staying;
            for key in moving {
                let cdir = self.insert_cdir(attributes, key, root);
                let target = self.cdirs[cdir.0].cnode;
                self.cnodes[target.0].lnode.subscriptions.push(key);
            }

            self.cluster_space(attributes, root);
            self.update_pnode_score(attributes, pnode);
            debug!(
                attribute = attributes.name(attribute),
                moved = count,
                score = self.pnodes[pnode.0].score,
                "opened a partition"
            );
        }
        self.update_cluster_capacity(cnode);
    }

    fn next_partition_attribute(
        &self,
        attributes: &AttributeTable,
        cnode: CNodeId,
    ) -> Option<(AttributeIndex, usize)> {
        let mut counts = BTreeMap::<AttributeIndex, usize>::new();
        for key in &self.cnodes[cnode.0].lnode.subscriptions {
            for attribute in self.subscriptions[*key].attributes() {
                *counts.entry(*attribute).or_default() += 1;
            }
        }

        let mut best = None;
        let mut highest = 0.;
        for (attribute, count) in counts {
            let domain = attributes.domain(attribute);
            if !domain
                .bound()
                .is_splittable(self.config.max_domain_for_split())
                || self.is_used_in_parent(cnode, attribute)
                || self.find_pnode(cnode, attribute).is_some()
            {
                continue;
            }
            let score = score(domain, count);
            if score > highest {
                highest = score;
                best = Some((attribute, count));
            }
        }
        best
    }

    /// Split an overflowed bucket by value, falling back to partitioning once the bucket has
    /// been split already or holds a single value.
    fn cluster_space(&mut self, attributes: &AttributeTable, cdir: CDirId) {
        let cnode = self.cdirs[cdir.0].cnode;
        if !self.cnodes[cnode.0].lnode.is_overflowed() {
            return;
        }

        let node = &self.cdirs[cdir.0];
        if node.children.is_some() || node.bound.is_atomic() {
            self.partition_space(attributes, cnode);
        } else {
            let attribute = node.attribute;
            let (left_bound, right_bound) = node.bound.split_in_half();
            debug!(
                attribute = attributes.name(attribute),
                left = ?left_bound,
                right = ?right_bound,
                "split a cluster directory"
            );
            let left = self.create_cdir(CDirParent::CDir(cdir), attribute, left_bound);
            let right = self.create_cdir(CDirParent::CDir(cdir), attribute, right_bound);
            self.cdirs[cdir.0].children = Some((left, right));

            let subscriptions = std::mem::take(&mut self.cnodes[cnode.0].lnode.subscriptions);
            let mut staying = Vec::with_capacity(subscriptions.len());
            for key in subscriptions {
                let target = if self.is_sub_enclosed(attributes, key, left) {
                    left
                } else if self.is_sub_enclosed(attributes, key, right) {
                    right
                } else {
                    staying.push(key);
                    continue;
                };
                let target = self.cdirs[target.0].cnode;
                self.cnodes[target.0].lnode.subscriptions.push(key);
            }
            self.cnodes[cnode.0].lnode.subscriptions = staying;

            self.partition_space(attributes, cnode);
            self.cluster_space(attributes, left);
            self.cluster_space(attributes, right);
        }
        self.update_cluster_capacity(cnode);
    }

    /// Grow the capacity of a leaf that could not be brought back under its limit. Capacities
    /// never shrink.
    fn update_cluster_capacity(&mut self, cnode: CNodeId) {
        let step = self.config.lnode_max_capacity();
        let lnode = &mut self.cnodes[cnode.0].lnode;
        let capacity = step.max(lnode.subscriptions.len().div_ceil(step) * step);
        if capacity > lnode.max_capacity {
            trace!(
                from = lnode.max_capacity,
                to = capacity,
                "grew a leaf's capacity"
            );
            lnode.max_capacity = capacity;
        }
    }

    fn update_pnode_score(&mut self, attributes: &AttributeTable, pnode: PNodeId) {
        let PNode {
            attribute, cdir, ..
        } = self.pnodes[pnode.0];
        let count = self.count_attribute_in_cdir(attribute, cdir);
        self.pnodes[pnode.0].score = score(attributes.domain(attribute), count);
    }

    fn count_attribute_in_cdir(&self, attribute: AttributeIndex, cdir: CDirId) -> usize {
        let node = &self.cdirs[cdir.0];
        let here = self.cnodes[node.cnode.0]
            .lnode
            .subscriptions
            .iter()
            .filter(|key| self.subscriptions[**key].has_attribute(attribute))
            .count();
        let below = node.children.map_or(0, |(left, right)| {
            self.count_attribute_in_cdir(attribute, left)
                + self.count_attribute_in_cdir(attribute, right)
        });
        here + below
    }

    fn match_cnode(
        &self,
        attributes: &AttributeTable,
        event: &Event,
        cnode: CNodeId,
        candidates: &mut Vec<usize>,
    ) {
        let node = &self.cnodes[cnode.0];
        candidates.extend_from_slice(&node.lnode.subscriptions);
        let Some(pdir) = &node.pdir else {
            return;
        };
        for pnode in &pdir.pnodes {
            let pnode = &self.pnodes[pnode.0];
            if event.is_defined(pnode.attribute)
                || attributes.domain(pnode.attribute).allows_undefined()
            {
                self.search_cdir(attributes, event, pnode.cdir, true, true, candidates);
            }
        }
    }

    /// The outermost buckets of a directory stay open towards their side so that values
    /// outside of the domain still reach the subscriptions bounded past it.
    fn search_cdir(
        &self,
        attributes: &AttributeTable,
        event: &Event,
        cdir: CDirId,
        open_left: bool,
        open_right: bool,
        candidates: &mut Vec<usize>,
    ) {
        let node = &self.cdirs[cdir.0];
        self.match_cnode(attributes, event, node.cnode, candidates);
        let Some((left, right)) = node.children else {
            return;
        };
        if self.is_event_enclosed(event, left, open_left, false) {
            self.search_cdir(attributes, event, left, open_left, false, candidates);
        }
        if self.is_event_enclosed(event, right, false, open_right) {
            self.search_cdir(attributes, event, right, false, open_right, candidates);
        }
    }

    fn is_event_enclosed(
        &self,
        event: &Event,
        cdir: CDirId,
        open_left: bool,
        open_right: bool,
    ) -> bool {
        let cdir = &self.cdirs[cdir.0];
        let value = event.get(cdir.attribute);
        if open_left || open_right {
            cdir.bound.reaches(value, open_left, open_right)
        } else {
            cdir.bound.contains(value)
        }
    }

    fn delete_from_cnode(&mut self, attributes: &AttributeTable, key: usize, cnode: CNodeId) -> bool {
        let lnode = &mut self.cnodes[cnode.0].lnode;
        if let Some(position) = lnode.subscriptions.iter().position(|k| *k == key) {
            lnode.subscriptions.swap_remove(position);
            return true;
        }

        let pnodes: Vec<_> = self.subscriptions[key]
            .attributes()
            .iter()
            .filter_map(|attribute| self.find_pnode(cnode, *attribute))
            .collect();
        for pnode in pnodes {
            let cdir = self.pnodes[pnode.0].cdir;
            if self.search_delete_cdir(attributes, key, cdir) {
                if self.is_cdir_empty(cdir) {
                    self.remove_pnode(attributes, cnode, pnode);
                }
                return true;
            }
        }
        false
    }

    fn search_delete_cdir(&mut self, attributes: &AttributeTable, key: usize, cdir: CDirId) -> bool {
        let children = self.cdirs[cdir.0].children;
        let found = match children {
            Some((left, _)) if self.is_sub_enclosed(attributes, key, left) => {
                self.search_delete_cdir(attributes, key, left)
            }
            Some((_, right)) if self.is_sub_enclosed(attributes, key, right) => {
                self.search_delete_cdir(attributes, key, right)
            }
            _ => self.delete_from_cnode(attributes, key, self.cdirs[cdir.0].cnode),
        };

        if found {
            if let Some((left, right)) = self.cdirs[cdir.0].children {
                if self.is_cdir_empty(left) && self.is_cdir_empty(right) {
                    debug!(
                        attribute = attributes.name(self.cdirs[cdir.0].attribute),
                        bound = ?self.cdirs[cdir.0].bound,
                        "collapsed a cluster directory"
                    );
                    self.free_cdir(left);
                    self.free_cdir(right);
                    self.cdirs[cdir.0].children = None;
                }
            }
        }
        found
    }

    fn is_cdir_empty(&self, cdir: CDirId) -> bool {
        let node = &self.cdirs[cdir.0];
        self.cnodes[node.cnode.0].is_empty()
            && node.children.map_or(true, |(left, right)| {
                self.is_cdir_empty(left) && self.is_cdir_empty(right)
            })
    }

    fn remove_pnode(&mut self, attributes: &AttributeTable, cnode: CNodeId, pnode: PNodeId) {
        debug!(
            attribute = attributes.name(self.pnodes[pnode.0].attribute),
            "removed an empty partition"
        );
        self.free_pnode(pnode);
        let node = &mut self.cnodes[cnode.0];
        if let Some(pdir) = &mut node.pdir {
            pdir.pnodes.retain(|p| *p != pnode);
            if pdir.pnodes.is_empty() {
                node.pdir = None;
            }
        }
    }

    fn free_cnode(&mut self, cnode: CNodeId) {
        let node = self.cnodes.remove(cnode.0);
        for pnode in node.pdir.into_iter().flat_map(|pdir| pdir.pnodes) {
            self.free_pnode(pnode);
        }
    }

    fn free_pnode(&mut self, pnode: PNodeId) {
        let node = self.pnodes.remove(pnode.0);
        self.free_cdir(node.cdir);
    }

    fn free_cdir(&mut self, cdir: CDirId) {
        let node = self.cdirs.remove(cdir.0);
        self.free_cnode(node.cnode);
        if let Some((left, right)) = node.children {
            self.free_cdir(left);
            self.free_cdir(right);
        }
    }

    pub(crate) fn root_lnode_len(&self) -> usize {
        self.cnodes[self.root.0].lnode.subscriptions.len()
    }

    pub(crate) fn root_partitions(&self) -> Vec<AttributeIndex> {
        self.cnodes[self.root.0]
            .pdir
            .iter()
            .flat_map(|pdir| &pdir.pnodes)
            .map(|pnode| self.pnodes[pnode.0].attribute)
            .collect()
    }

    /// Number of subscriptions reachable from the root.
    pub(crate) fn walk_count(&self) -> usize {
        self.count_in_cnode(self.root)
    }

    fn count_in_cnode(&self, cnode: CNodeId) -> usize {
        let node = &self.cnodes[cnode.0];
        node.lnode.subscriptions.len()
            + node
                .pdir
                .iter()
                .flat_map(|pdir| &pdir.pnodes)
                .map(|pnode| self.count_in_cdir(self.pnodes[pnode.0].cdir))
                .sum::<usize>()
    }

    fn count_in_cdir(&self, cdir: CDirId) -> usize {
        let node = &self.cdirs[cdir.0];
        self.count_in_cnode(node.cnode)
            + node.children.map_or(0, |(left, right)| {
                self.count_in_cdir(left) + self.count_in_cdir(right)
            })
    }

    /// Capacity of every leaf, keyed by the slot of its room.
    pub(crate) fn capacities(&self) -> Vec<(usize, usize)> {
        self.cnodes
            .iter()
            .map(|(key, cnode)| (key, cnode.lnode.max_capacity))
            .collect()
    }

    pub(crate) fn root_capacity(&self) -> usize {
        self.cnodes[self.root.0].lnode.max_capacity
    }
}

/// Favours attributes shared by many subscriptions over narrow domains, and attributes that
/// events must define.
fn score(domain: &AttributeDefinition, count: usize) -> f64 {
    let weight = if domain.allows_undefined() { 1. } else { 10. };
    let width = domain.bound().width().max(1);
    count as f64 * weight / width as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{events::EventBuilder, parser::parse, strings::StringTable};
    use rust_decimal::Decimal;

    struct Fixture {
        attributes: AttributeTable,
        strings: StringTable,
        tree: Tree,
    }

    impl Fixture {
        fn new(definitions: &[AttributeDefinition]) -> Self {
            Self::with_config(definitions, Config::default())
        }

        fn with_config(definitions: &[AttributeDefinition], config: Config) -> Self {
            Self {
                attributes: AttributeTable::new(definitions).unwrap(),
                strings: StringTable::new(),
                tree: Tree::new(config),
            }
        }

        fn insert(&mut self, id: SubscriptionId, expression: &str) {
            let node = parse(expression, &self.attributes, &mut self.strings).unwrap();
            let subscription = Subscription::new(id, node, &self.attributes);
            assert!(self.tree.insert(&self.attributes, subscription));
        }

        fn delete(&mut self, id: SubscriptionId) -> bool {
            self.tree.delete(&self.attributes, id)
        }

        fn attribute(&self, name: &str) -> AttributeIndex {
            self.attributes.by_name(name).unwrap()
        }

        fn ids(&self, cnode: CNodeId) -> Vec<SubscriptionId> {
            let mut ids: Vec<_> = self.tree.cnodes[cnode.0]
                .lnode
                .subscriptions
                .iter()
                .map(|key| self.tree.subscriptions[*key].id)
                .collect();
            ids.sort_unstable();
            ids
        }

        fn pnode(&self, cnode: CNodeId, name: &str) -> &PNode {
            let pnode = self.tree.find_pnode(cnode, self.attribute(name)).unwrap();
            &self.tree.pnodes[pnode.0]
        }

        fn cdir(&self, cnode: CNodeId, name: &str) -> &CDir {
            &self.tree.cdirs[self.pnode(cnode, name).cdir.0]
        }

        /// Number of subscriptions stored under the partition of `cnode` on `name`.
        fn count_under(&self, cnode: CNodeId, name: &str) -> usize {
            self.tree.count_in_cdir(self.pnode(cnode, name).cdir)
        }

        fn candidates(&self, values: &[(&str, i64)]) -> Vec<SubscriptionId> {
            let mut builder = EventBuilder::new(&self.attributes, &self.strings);
            for (name, value) in values {
                builder.with_integer(name, *value).unwrap();
            }
            let event = builder.build().unwrap();
            let mut ids: Vec<_> = self
                .tree
                .candidates(&self.attributes, &event)
                .into_iter()
                .map(|key| self.tree.subscriptions[key].id)
                .collect();
            ids.sort_unstable();
            ids
        }
    }

    fn bounded(names: &[&str], min: i64, max: i64) -> Vec<AttributeDefinition> {
        names
            .iter()
            .map(|name| AttributeDefinition::bounded_integer(name, min, max))
            .collect()
    }

    #[test]
    fn keep_subscriptions_in_the_root_until_it_overflows() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));

        fixture.insert(0, "a = 0");
        fixture.insert(1, "a = 1");
        fixture.insert(2, "a = 2");

        let root = fixture.tree.root;
        assert_eq!(vec![0, 1, 2], fixture.ids(root));
        assert!(fixture.tree.cnodes[root.0].pdir.is_none());
    }

    #[test]
    fn partition_the_root_on_the_most_common_attribute() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));

        fixture.insert(0, "a = 0");
        fixture.insert(1, "a = 1");
        fixture.insert(2, "a = 2");
        fixture.insert(3, "b = 0");

        let root = fixture.tree.root;
        let cdir = fixture.cdir(root, "a");
        assert_eq!(vec![3], fixture.ids(root));
        assert_eq!(vec![fixture.attribute("a")], fixture.tree.root_partitions());
        assert!(cdir.children.is_none());
        assert!(fixture.tree.cnodes[cdir.cnode.0].pdir.is_none());
        assert_eq!(vec![0, 1, 2], fixture.ids(cdir.cnode));
    }

    #[test]
    fn open_one_partition_per_attribute() {
        let mut fixture = Fixture::new(&bounded(&["a", "b", "c"], 0, 10));

        for id in 1..=3 {
            fixture.insert(id, "a = 0");
        }
        for id in 4..=6 {
            fixture.insert(id, "b = 0");
        }
        fixture.insert(7, "c = 0");

        let root = fixture.tree.root;
        assert_eq!(vec![7], fixture.ids(root));
        assert_eq!(
            vec![fixture.attribute("a"), fixture.attribute("b")],
            fixture.tree.root_partitions()
        );
        assert_eq!(vec![1, 2, 3], fixture.ids(fixture.cdir(root, "a").cnode));
        assert_eq!(vec![4, 5, 6], fixture.ids(fixture.cdir(root, "b").cnode));
    }

    #[test]
    fn insert_through_the_highest_scoring_partition() {
        let mut fixture = Fixture::new(&[
            AttributeDefinition::bounded_integer("a", 0, 10),
            AttributeDefinition::bounded_integer("b", 0, 100),
        ]);
        for id in 1..=3 {
            fixture.insert(id, "a = 0");
        }
        for id in 4..=7 {
            fixture.insert(id, "b = 0");
        }
        let root = fixture.tree.root;
        assert_eq!(
            vec![fixture.attribute("a"), fixture.attribute("b")],
            fixture.tree.root_partitions()
        );
        assert!(fixture.pnode(root, "a").score > fixture.pnode(root, "b").score);

        fixture.insert(8, "a = 1 and b = 1");

        assert!(fixture.ids(root).is_empty());
        assert_eq!(4, fixture.count_under(root, "a"));
        assert_eq!(4, fixture.count_under(root, "b"));
    }

    #[test]
    fn break_score_ties_with_the_lowest_attribute() {
        let mut fixture = Fixture::new(&bounded(&["a", "b", "c"], 0, 10));
        for id in 1..=3 {
            fixture.insert(id, "b = 0");
        }
        for id in 4..=6 {
            fixture.insert(id, "a = 0");
        }
        fixture.insert(7, "c = 0");
        let root = fixture.tree.root;
        assert_eq!(
            vec![fixture.attribute("b"), fixture.attribute("a")],
            fixture.tree.root_partitions()
        );
        assert_eq!(fixture.pnode(root, "a").score, fixture.pnode(root, "b").score);

        fixture.insert(8, "b = 1 and a = 1");

        assert_eq!(vec![7], fixture.ids(root));
        assert_eq!(4, fixture.count_under(root, "a"));
        assert_eq!(3, fixture.count_under(root, "b"));
    }

    #[test]
    fn split_a_cluster_directory_by_value() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));

        for id in 1..=3 {
            fixture.insert(id, "a = 2");
        }
        fixture.insert(4, "b = 0");
        for id in 5..=7 {
            fixture.insert(id, "a = 7");
        }

        let root = fixture.tree.root;
        let cdir = fixture.cdir(root, "a");
        let (left, right) = cdir.children.unwrap();
        assert_eq!(vec![4], fixture.ids(root));
        assert!(fixture.ids(cdir.cnode).is_empty());
        assert_eq!(
            ValueBound::Integer { min: 0, max: 5 },
            fixture.tree.cdirs[left.0].bound
        );
        assert_eq!(vec![1, 2, 3], fixture.ids(fixture.tree.cdirs[left.0].cnode));
        assert_eq!(vec![5, 6, 7], fixture.ids(fixture.tree.cdirs[right.0].cnode));
    }

    #[test]
    fn split_float_domains_on_whole_units() {
        let mut fixture = Fixture::new(&[AttributeDefinition::bounded_float(
            "a",
            Decimal::ZERO,
            Decimal::TEN,
        )]);

        for id in 0..3 {
            fixture.insert(id, "a = 0.0");
        }
        fixture.insert(3, "a = 7.0");

        let cdir = fixture.cdir(fixture.tree.root, "a");
        let (left, right) = cdir.children.unwrap();
        assert!(fixture.ids(cdir.cnode).is_empty());
        assert_eq!(vec![0, 1, 2], fixture.ids(fixture.tree.cdirs[left.0].cnode));
        assert_eq!(vec![3], fixture.ids(fixture.tree.cdirs[right.0].cnode));
    }

    #[test]
    fn partition_atomic_buckets_on_another_attribute() {
        let mut fixture = Fixture::new(&[
            AttributeDefinition::bounded_integer("a", 0, 0),
            AttributeDefinition::bounded_integer("b", 0, 1),
        ]);

        fixture.insert(1, "a = 0 and b = 0");
        fixture.insert(2, "a = 1");
        fixture.insert(3, "a = 0 and b = 0");
        fixture.insert(4, "a = 0 and b = 1");

        let root = fixture.tree.root;
        let cnode_a = fixture.cdir(root, "a").cnode;
        let cdir_b = fixture.cdir(cnode_a, "b");
        assert!(fixture.ids(root).is_empty());
        assert_eq!(vec![fixture.attribute("a")], fixture.tree.root_partitions());
        assert_eq!(vec![2], fixture.ids(cnode_a));
        assert!(cdir_b.children.is_none());
        assert_eq!(vec![1, 3, 4], fixture.ids(cdir_b.cnode));
        assert!(fixture.tree.is_used_in_parent(cdir_b.cnode, fixture.attribute("a")));
        assert!(fixture.tree.is_used_in_parent(cdir_b.cnode, fixture.attribute("b")));
    }

    #[test]
    fn reach_the_deepest_bucket_when_searching() {
        let mut fixture = Fixture::new(&[
            AttributeDefinition::bounded_integer("a", 0, 0),
            AttributeDefinition::bounded_integer("b", 0, 1),
        ]);
        fixture.insert(1, "a = 0 and b = 0");
        fixture.insert(2, "a = 1");
        fixture.insert(3, "a = 0 and b = 0");
        fixture.insert(4, "a = 0 and b = 1");

        let reached = fixture.candidates(&[("a", 0), ("b", 1)]);
        let pruned = fixture.candidates(&[("b", 1)]);

        assert_eq!(vec![1, 2, 3, 4], reached);
        assert!(pruned.is_empty());
    }

    #[test]
    fn prune_buckets_that_do_not_hold_the_event_value() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));
        for id in 1..=3 {
            fixture.insert(id, "a = 2");
        }
        fixture.insert(4, "b = 0");
        for id in 5..=7 {
            fixture.insert(id, "a = 7");
        }

        let candidates = fixture.candidates(&[("a", 7)]);

        assert_eq!(vec![4, 5, 6, 7], candidates);
    }

    #[test]
    fn hold_only_their_own_values_in_inner_buckets() {
        let mut fixture = Fixture::new(&bounded(&["a"], 0, 10));
        for id in 1..=4 {
            fixture.insert(id, "a = 4");
        }

        assert_eq!(0, fixture.tree.root_lnode_len());
        assert_eq!(vec![1, 2, 3, 4], fixture.candidates(&[("a", 4)]));
        assert!(fixture.candidates(&[("a", 3)]).is_empty());
        assert!(fixture.candidates(&[("a", -1)]).is_empty());
    }

    #[test]
    fn reach_out_of_domain_values_through_the_outer_buckets() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));
        for id in 1..=3 {
            fixture.insert(id, "a < 1");
        }
        fixture.insert(4, "b = 0");
        for id in 5..=7 {
            fixture.insert(id, "a > 9");
        }

        assert_eq!(vec![1, 2, 3, 4], fixture.candidates(&[("a", -5)]));
        assert_eq!(vec![4, 5, 6, 7], fixture.candidates(&[("a", 15)]));
    }

    #[test]
    fn search_partitions_of_attributes_allowed_to_be_undefined() {
        let mut fixture = Fixture::new(&[
            AttributeDefinition::bounded_integer("a", 0, 10).allow_undefined(),
            AttributeDefinition::bounded_integer("b", 0, 10),
        ]);
        fixture.insert(1, "a = 0");
        fixture.insert(2, "a = 1");
        fixture.insert(3, "a = 0 or b = 0");
        fixture.insert(4, "b = 1");

        let root = fixture.tree.root;
        assert_eq!(vec![1, 2], fixture.ids(root));
        assert_eq!(vec![fixture.attribute("b")], fixture.tree.root_partitions());
        assert_eq!(vec![3, 4], fixture.ids(fixture.cdir(root, "b").cnode));
        assert_eq!(vec![1, 2, 3, 4], fixture.candidates(&[("b", 0)]));
    }

    #[test]
    fn grow_the_capacity_instead_of_partitioning_rare_attributes() {
        let definitions = bounded(&["a", "b", "c"], 0, 10);
        let mut eager = Fixture::new(&definitions);
        let mut reluctant =
            Fixture::with_config(&definitions, Config::default().with_partition_min_size(3));

        for fixture in [&mut eager, &mut reluctant] {
            fixture.insert(0, "a = 0");
            fixture.insert(1, "a = 0");
            fixture.insert(2, "b = 0");
            fixture.insert(3, "c = 0");
        }

        assert_eq!(2, eager.tree.root_lnode_len());
        assert_eq!(vec![eager.attribute("a")], eager.tree.root_partitions());
        assert_eq!(4, reluctant.tree.root_lnode_len());
        assert_eq!(6, reluctant.tree.root_capacity());
    }

    #[test]
    fn never_split_wide_domains() {
        let mut fixture = Fixture::new(&bounded(&["a"], 0, 10_000));

        for id in 0..100 {
            fixture.insert(id, &format!("a = {id}"));
        }

        assert_eq!(100, fixture.tree.root_lnode_len());
        assert!(fixture.tree.root_partitions().is_empty());
        assert_eq!(102, fixture.tree.root_capacity());
    }

    #[test]
    fn never_partition_on_frequency_caps() {
        let mut fixture = Fixture::new(&[
            AttributeDefinition::frequency_caps("frequency_caps"),
            AttributeDefinition::integer("now"),
        ]);

        for id in 0..4 {
            fixture.insert(
                id,
                &format!("within_frequency_cap('flight', 'ns-{id}', 10, 60)"),
            );
        }

        assert_eq!(4, fixture.tree.root_lnode_len());
        assert!(fixture.tree.root_partitions().is_empty());
    }

    #[test]
    fn collapse_the_partition_directory_once_emptied() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));
        for id in 1..=3 {
            fixture.insert(id, "a = 0");
        }
        fixture.insert(4, "b = 0");

        assert!(fixture.delete(1));
        assert!(fixture.delete(2));
        assert!(fixture.tree.cnodes[fixture.tree.root.0].pdir.is_some());
        assert!(fixture.delete(3));

        let root = fixture.tree.root;
        assert!(fixture.tree.cnodes[root.0].pdir.is_none());
        assert_eq!(vec![4], fixture.ids(root));
        assert_eq!(1, fixture.tree.cnodes.len());
        assert!(fixture.tree.pnodes.is_empty());
        assert!(fixture.tree.cdirs.is_empty());
    }

    #[test]
    fn collapse_split_buckets_once_emptied() {
        let mut fixture = Fixture::new(&bounded(&["a", "b"], 0, 10));
        for id in 1..=3 {
            fixture.insert(id, "a = 2");
        }
        fixture.insert(4, "b = 0");
        fixture.insert(5, "a = 7");
        fixture.insert(6, "a = 7");

        for id in [1, 2, 3] {
            assert!(fixture.delete(id));
        }

        let cdir = fixture.cdir(fixture.tree.root, "a");
        assert!(cdir.children.is_some());

        assert!(fixture.delete(5));
        assert!(fixture.delete(6));

        assert!(fixture.tree.root_partitions().is_empty());
        assert_eq!(1, fixture.tree.walk_count());
    }

    #[test]
    fn delete_subscriptions_from_nested_partitions() {
        let mut fixture = Fixture::new(&[
            AttributeDefinition::bounded_integer("a", 0, 0),
            AttributeDefinition::bounded_integer("b", 0, 1),
        ]);
        fixture.insert(1, "a = 0 and b = 0");
        fixture.insert(2, "a = 1");
        fixture.insert(3, "a = 0 and b = 0");
        fixture.insert(4, "a = 0 and b = 1");

        for id in [4, 1, 3] {
            assert!(fixture.delete(id));
        }

        let cnode_a = fixture.cdir(fixture.tree.root, "a").cnode;
        assert!(fixture.tree.cnodes[cnode_a.0].pdir.is_none());
        assert_eq!(vec![2], fixture.ids(cnode_a));
        assert!(fixture.delete(2));
        assert!(fixture.tree.root_partitions().is_empty());
    }

    #[test]
    fn return_false_when_deleting_an_unknown_subscription() {
        let mut fixture = Fixture::new(&bounded(&["a"], 0, 10));
        fixture.insert(1, "a = 0");

        assert!(!fixture.delete(2));
        assert!(fixture.delete(1));
        assert!(!fixture.delete(1));
        assert_eq!(0, fixture.tree.walk_count());
        assert_eq!(1, fixture.tree.cnodes.len());
    }

    #[test]
    fn refuse_duplicate_identifiers() {
        let mut fixture = Fixture::new(&bounded(&["a"], 0, 10));
        fixture.insert(1, "a = 0");
        let node = parse("a = 1", &fixture.attributes, &mut fixture.strings).unwrap();

        let inserted = fixture
            .tree
            .insert(&fixture.attributes, Subscription::new(1, node, &fixture.attributes));

        assert!(!inserted);
        assert_eq!(1, fixture.tree.len());
    }

    #[test]
    fn favour_narrow_domains_that_events_must_define() {
        let narrow = AttributeDefinition::bounded_integer("a", 0, 10);
        let wide = AttributeDefinition::bounded_integer("b", 0, 100);
        let optional = AttributeDefinition::bounded_integer("c", 0, 10).allow_undefined();

        assert_eq!(3., score(&narrow, 3));
        assert_eq!(0.3, score(&wide, 3));
        assert_eq!(0.3, score(&optional, 3));
    }
}
