//! This module and its children define the GraphQL object types of the API.

pub(crate) mod project;
pub(crate) mod workflow;
