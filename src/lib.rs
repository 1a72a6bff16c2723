//! An implementation of the [BE-Tree: An Index Structure to Efficiently Match Boolean Expressions over High-dimensional Discrete Space](https://dl.acm.org/doi/10.1145/1989323.1989416) paper.
//!
//! Subscriptions are boolean expressions over a fixed set of typed attributes. They are first
//! partitioned by the attributes they reference and then clustered by the range of values they
//! accept, so that matching an event only evaluates the subscriptions it could satisfy.
mod ast;
mod betree;
mod bounds;
mod config;
mod error;
mod events;
mod lexer;
mod parser;
mod predicates;
mod strings;
mod subscription;
mod tree;

pub use crate::{
    ast::Node,
    betree::{BETree, BETreeError, Report},
    config::Config,
    error::ParserError,
    events::{
        AttributeDefinition, AttributeKind, Event, EventBuilder, EventError, FrequencyCap,
        FrequencyKind,
    },
    parser::BETreeParseError,
    subscription::SubscriptionId,
};
