use super::{Action, Name, Project, Store, Workflow};


impl Store {
    /// The built-in data set that is served if no fixture file is configured.
    pub(crate) fn sample() -> Self {
        let project = |id: &str| Project { project_id: id.into() };
        let name = |id: &str, name: &str| Name { project_id: id.into(), name: name.into() };

        Self {
            projects: vec![project("abc"), project("xyz"), project("xxx")],
            workflows: vec![
                Workflow {
                    id: "w1".into(),
                    project_id: Some("abc".into()),
                    trigger_types: Some(vec!["enter".into(), "exit".into()]),
                    actions: Some(vec![Action { name: "do x".into() }]),
                },
                Workflow {
                    id: "w2".into(),
                    project_id: Some("xyz".into()),
                    trigger_types: None,
                    actions: None,
                },
            ],
            names: vec![
                name("abc", "i know my abcs"),
                name("xyz", "i know my xyzs"),
                name("xxx", "i know nothing jon snow"),
            ],
        }
    }
}
