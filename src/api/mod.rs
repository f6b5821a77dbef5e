//! Definition of the GraphQL API.

use juniper::{EmptyMutation, EmptySubscription};

use self::query::Query;

pub(crate) mod err;
pub(crate) mod model;

mod context;
mod query;

#[cfg(test)]
mod tests;

pub(crate) use self::context::Context;


/// Creates and returns the API root node.
pub(crate) fn root_node() -> RootNode {
    RootNode::new(Query, Mutation::new(), Subscription::new())
}

/// Type of our API root node.
pub(crate) type RootNode = juniper::RootNode<'static, Query, Mutation, Subscription>;

/// The API is read-only, so there are no mutations.
pub(crate) type Mutation = EmptyMutation<Context>;

/// The root subscription object. Does not offer any resolvers.
pub(crate) type Subscription = EmptySubscription<Context>;
