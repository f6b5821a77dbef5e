use std::sync::Arc;

use crate::model::Store;


/// The context that is accessible to every resolver in our API.
///
/// The store is shared between all requests and never modified, so resolvers
/// can read from it without any synchronization.
pub(crate) struct Context {
    pub(crate) store: Arc<Store>,
}

impl juniper::Context for Context {}

impl Context {
    pub(crate) fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}
