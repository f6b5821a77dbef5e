use juniper::{graphql_object, ID};

use crate::{
    api::{Context, err::{self, ApiResult}},
    model::{self, Workflow},
    prelude::*,
};


/// A project. Only its ID is stored here: the name and the workflows are
/// looked up by that ID when they are requested.
pub(crate) struct Project {
    project_id: String,
}

#[graphql_object(Context = Context)]
impl Project {
    fn id(&self) -> ID {
        ID::from(self.project_id.clone())
    }

    /// The human readable name of this project. Every project is expected to
    /// have a name: if none exists, resolving this field fails with a
    /// `MISSING_JOIN_TARGET` error (and it is `null`).
    fn name(&self, context: &Context) -> ApiResult<Option<String>> {
        match context.store.name_of(&self.project_id) {
            Some(name) => Ok(Some(name.to_owned())),
            None => {
                warn!("Project '{}' has no name record", self.project_id);
                Err(err::missing_join_target!(
                    key = "project.missing-name",
                    "project '{}' has no name",
                    self.project_id,
                ))
            }
        }
    }

    /// All workflows belonging to this project. Empty if there are none.
    fn workflows(&self, context: &Context) -> Vec<Workflow> {
        context.store.workflows_of(&self.project_id).cloned().collect()
    }
}

impl Project {
    /// Returns all projects matching the (optional) ID filter.
    pub(crate) fn load(filter: Option<&str>, context: &Context) -> Vec<Self> {
        context.store.projects(filter).map(Self::from_record).collect()
    }

    fn from_record(record: &model::Project) -> Self {
        Self {
            project_id: record.project_id.clone(),
        }
    }
}
