use juniper::graphql_object;

use super::{
    Context,
    model::project::Project,
};
use crate::model::Workflow;


/// The root query object.
pub(crate) struct Query;

#[graphql_object(Context = Context)]
impl Query {
    /// Returns all projects in the order they are stored. If `id` is given
    /// and not empty, only the project with exactly that ID is returned (or
    /// nothing, if there is no such project).
    fn projects(id: Option<String>, context: &Context) -> Vec<Project> {
        Project::load(id.as_deref(), context)
    }

    /// Returns all workflows in the order they are stored. If `id` is given
    /// and not empty, only workflows with exactly that ID are returned. An
    /// unknown ID results in an empty list, not in an error.
    fn workflow(id: Option<String>, context: &Context) -> Vec<Workflow> {
        context.store.workflows(id.as_deref()).cloned().collect()
    }
}
