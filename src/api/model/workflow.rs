//! The stored workflow records are exposed as they are, so the object
//! definitions live directly on the model types.

use juniper::{graphql_object, ID};

use crate::{
    api::Context,
    model::{Action, Workflow},
};


#[graphql_object(Context = Context)]
impl Workflow {
    fn id(&self) -> ID {
        ID::from(self.id.clone())
    }

    /// ID of the project this workflow belongs to. `null` if it does not
    /// belong to any project.
    fn project_id(&self) -> Option<ID> {
        self.project_id.clone().map(ID::from)
    }

    /// Events triggering this workflow. `null` means there are no triggers.
    fn trigger_types(&self) -> Option<&[String]> {
        self.trigger_types.as_deref()
    }

    fn actions(&self) -> Option<&[Action]> {
        self.actions.as_deref()
    }
}

/// One step of a workflow.
#[graphql_object(Context = Context)]
impl Action {
    fn name(&self) -> &str {
        &self.name
    }
}
