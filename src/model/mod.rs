//! Items that define the domain data model: projects, their names and their
//! workflows.
//!
//! All data lives in a [`Store`] that is built once at startup (from the
//! built-in sample data or from a fixture file) and is never modified
//! afterwards. Records reference each other via their project ID, the "join
//! key". Nothing enforces referential integrity; instead, [`Store::lint`]
//! reports suspicious data.

use std::{collections::HashSet, fmt, fs, path::PathBuf};
use serde::Deserialize;

use crate::prelude::*;


mod sample;

#[cfg(test)]
mod tests;


#[derive(Debug, confique::Config)]
pub(crate) struct DataConfig {
    /// Path to a YAML file containing the data to serve. If this is not set,
    /// a small built-in sample data set is used. The file can contain the
    /// top-level keys `projects`, `names` and `workflows`, all of which are
    /// optional. Example:
    ///
    ///     projects:
    ///       - projectId: abc
    ///     names:
    ///       - { projectId: abc, name: "The ABC project" }
    ///     workflows:
    ///       - id: w1
    ///         projectId: abc
    ///         triggerTypes: [enter, exit]
    ///         actions: [{ name: "notify" }]
    pub(crate) fixture: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct Project {
    pub(crate) project_id: String,
}

/// Human readable label of a project. There should be exactly one per project.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct Name {
    pub(crate) project_id: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct Workflow {
    pub(crate) id: String,

    /// A workflow does not need to belong to any project.
    pub(crate) project_id: Option<String>,

    /// `None` means the workflow has no triggers.
    pub(crate) trigger_types: Option<Vec<String>>,
    pub(crate) actions: Option<Vec<Action>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Action {
    pub(crate) name: String,
}

/// The complete, immutable data set. The order of all collections is
/// preserved and defines the order of query results.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Store {
    #[serde(default)]
    projects: Vec<Project>,
    #[serde(default)]
    workflows: Vec<Workflow>,
    #[serde(default)]
    names: Vec<Name>,
}

impl Store {
    /// Loads the store as configured: from the fixture file if one is
    /// specified, otherwise the built-in sample data.
    pub(crate) fn load(config: &DataConfig) -> Result<Self> {
        let Some(path) = &config.fixture else {
            debug!("No fixture file configured, using built-in sample data");
            return Ok(Self::sample());
        };

        let src = fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture file '{}'", path.display()))?;
        let store = Self::from_yaml(&src)
            .with_context(|| format!("invalid fixture file '{}'", path.display()))?;

        info!(
            "Loaded data from '{}' ({} projects, {} workflows, {} names)",
            path.display(),
            store.projects.len(),
            store.workflows.len(),
            store.names.len(),
        );
        Ok(store)
    }

    pub(crate) fn from_yaml(src: &str) -> Result<Self> {
        serde_yaml::from_str(src).map_err(Into::into)
    }

    /// Returns all projects, or only the ones with exactly the given ID if
    /// `filter` is a non-empty string.
    pub(crate) fn projects<'a>(
        &'a self,
        filter: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Project> + 'a {
        let filter = active_filter(filter);
        self.projects.iter()
            .filter(move |p| filter.map_or(true, |id| p.project_id == id))
    }

    /// Returns the name of the given project. If there are multiple name
    /// records for that project, the first one is returned.
    pub(crate) fn name_of(&self, project_id: &str) -> Option<&str> {
        self.names.iter()
            .find(|n| n.project_id == project_id)
            .map(|n| n.name.as_str())
    }

    /// Returns all workflows belonging to the given project.
    pub(crate) fn workflows_of<'a>(
        &'a self,
        project_id: &'a str,
    ) -> impl Iterator<Item = &'a Workflow> + 'a {
        self.workflows.iter()
            .filter(move |w| w.project_id.as_deref() == Some(project_id))
    }

    /// Returns all workflows, or only the ones with exactly the given ID if
    /// `filter` is a non-empty string.
    pub(crate) fn workflows<'a>(
        &'a self,
        filter: Option<&'a str>,
    ) -> impl Iterator<Item = &'a Workflow> + 'a {
        let filter = active_filter(filter);
        self.workflows.iter()
            .filter(move |w| filter.map_or(true, |id| w.id == id))
    }

    /// Checks the data for inconsistencies and returns all of them. Nothing
    /// here prevents the store from being used: all lookups have well defined
    /// behavior even for inconsistent data.
    pub(crate) fn issues(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        let mut project_ids = HashSet::new();
        for project in &self.projects {
            let id = project.project_id.as_str();
            if !project_ids.insert(id) {
                issues.push(Issue::DuplicateProject(id.to_owned()));
                continue;
            }

            match self.names.iter().filter(|n| n.project_id == id).count() {
                0 => issues.push(Issue::MissingName(id.to_owned())),
                1 => {}
                _ => issues.push(Issue::AmbiguousName(id.to_owned())),
            }
        }

        let mut workflow_ids = HashSet::new();
        for workflow in &self.workflows {
            if !workflow_ids.insert(workflow.id.as_str()) {
                issues.push(Issue::DuplicateWorkflow(workflow.id.clone()));
            }
            if let Some(project) = &workflow.project_id {
                if !project_ids.contains(project.as_str()) {
                    issues.push(Issue::UnknownProject {
                        workflow: workflow.id.clone(),
                        project: project.clone(),
                    });
                }
            }
        }

        issues
    }

    /// Like [`Self::issues`], but also emits a warning for each issue.
    pub(crate) fn lint(&self) -> Vec<Issue> {
        let issues = self.issues();
        for issue in &issues {
            warn!("Inconsistent data: {issue}");
        }
        issues
    }
}

/// Only non-empty IDs filter anything: `Some("")` is treated like `None`.
fn active_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|id| !id.is_empty())
}

/// Inconsistency in the data found by [`Store::issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Issue {
    DuplicateProject(String),

    /// Resolving the name of this project will fail.
    MissingName(String),

    /// Only the first name record is ever used.
    AmbiguousName(String),

    DuplicateWorkflow(String),
    UnknownProject { workflow: String, project: String },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateProject(id) => write!(f, "project '{id}' is defined multiple times"),
            Self::MissingName(id) => write!(f, "project '{id}' has no name"),
            Self::AmbiguousName(id) => write!(f, "project '{id}' has multiple names"),
            Self::DuplicateWorkflow(id) => write!(f, "workflow '{id}' is defined multiple times"),
            Self::UnknownProject { workflow, project } => {
                write!(f, "workflow '{workflow}' belongs to unknown project '{project}'")
            }
        }
    }
}
