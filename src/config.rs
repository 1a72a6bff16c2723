/// Tuning parameters of an index, fixed when the index is created.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Config {
    lnode_max_capacity: usize,
    partition_min_size: usize,
    max_domain_for_split: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lnode_max_capacity: 3,
            partition_min_size: 0,
            max_domain_for_split: 1000,
        }
    }
}

impl Config {
    /// Number of subscriptions a leaf holds before the index tries to partition it. Leaves
    /// that cannot be partitioned grow their capacity in steps of this size.
    pub fn with_lnode_max_capacity(mut self, capacity: usize) -> Self {
        self.lnode_max_capacity = capacity.max(1);
        self
    }

    /// Minimum number of subscriptions that must reference an attribute before a partition is
    /// opened on it.
    pub fn with_partition_min_size(mut self, size: usize) -> Self {
        self.partition_min_size = size;
        self
    }

    /// Domains at least this wide are only partitioned by attribute, never split by value.
    pub fn with_max_domain_for_split(mut self, width: usize) -> Self {
        self.max_domain_for_split = width;
        self
    }

    #[inline]
    pub fn lnode_max_capacity(&self) -> usize {
        self.lnode_max_capacity
    }

    #[inline]
    pub fn partition_min_size(&self) -> usize {
        self.partition_min_size
    }

    #[inline]
    pub fn max_domain_for_split(&self) -> usize {
        self.max_domain_for_split
    }
}
