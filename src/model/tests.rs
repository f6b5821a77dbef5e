use crate::prelude::*;
use super::{Action, DataConfig, Issue, Store};


fn project_ids<'a>(store: &'a Store, filter: Option<&'a str>) -> Vec<&'a str> {
    store.projects(filter).map(|p| p.project_id.as_str()).collect()
}

fn workflow_ids<'a>(it: impl Iterator<Item = &'a super::Workflow>) -> Vec<&'a str> {
    it.map(|w| w.id.as_str()).collect()
}

#[test]
fn projects_unfiltered_keep_storage_order() {
    let store = Store::sample();
    assert_eq!(project_ids(&store, None), ["abc", "xyz", "xxx"]);
}

#[test]
fn projects_filter_by_exact_id() {
    let store = Store::sample();
    for id in ["abc", "xyz", "xxx"] {
        assert_eq!(project_ids(&store, Some(id)), [id]);
    }

    for id in ["ab", "ABC", "abc ", "nope"] {
        assert!(project_ids(&store, Some(id)).is_empty(), "'{id}' should not match");
    }
}

#[test]
fn empty_filter_is_no_filter() {
    let store = Store::sample();
    assert_eq!(project_ids(&store, Some("")), project_ids(&store, None));
    assert_eq!(
        workflow_ids(store.workflows(Some(""))),
        workflow_ids(store.workflows(None)),
    );
}

#[test]
fn names() {
    let store = Store::sample();
    assert_eq!(store.name_of("abc"), Some("i know my abcs"));
    assert_eq!(store.name_of("xyz"), Some("i know my xyzs"));
    assert_eq!(store.name_of("xxx"), Some("i know nothing jon snow"));
    assert_eq!(store.name_of("w1"), None);
}

#[test]
fn workflows_of_project() {
    let store = Store::sample();
    assert_eq!(workflow_ids(store.workflows_of("abc")), ["w1"]);
    assert_eq!(workflow_ids(store.workflows_of("xyz")), ["w2"]);
    assert!(workflow_ids(store.workflows_of("xxx")).is_empty());
}

#[test]
fn workflows_filter() {
    let store = Store::sample();
    assert_eq!(workflow_ids(store.workflows(None)), ["w1", "w2"]);
    assert!(workflow_ids(store.workflows(Some("nonexistent"))).is_empty());

    let w1 = store.workflows(Some("w1")).collect::<Vec<_>>();
    assert_eq!(w1.len(), 1);
    assert_eq!(w1[0].trigger_types.as_deref(), Some(&["enter".to_owned(), "exit".to_owned()][..]));
    assert_eq!(w1[0].actions.as_deref(), Some(&[Action { name: "do x".into() }][..]));

    let w2 = store.workflows(Some("w2")).next().unwrap();
    assert_eq!(w2.trigger_types, None);
    assert_eq!(w2.actions, None);
}

#[test]
fn sample_data_is_consistent() {
    assert!(Store::sample().issues().is_empty());
}

#[test]
fn first_name_wins() -> Result<()> {
    let store = Store::from_yaml("
        projects: [{ projectId: a }]
        names:
          - { projectId: a, name: first }
          - { projectId: a, name: second }
    ")?;
    assert_eq!(store.name_of("a"), Some("first"));
    assert_eq!(store.issues(), [Issue::AmbiguousName("a".into())]);

    Ok(())
}

#[test]
fn issues_are_reported() -> Result<()> {
    let store = Store::from_yaml("
        projects:
          - projectId: a
          - projectId: b
          - projectId: a
        names:
          - { projectId: a, name: A }
        workflows:
          - { id: w1, projectId: a }
          - { id: w1, projectId: c }
          - { id: w3 }
    ")?;

    assert_eq!(store.lint(), [
        Issue::MissingName("b".into()),
        Issue::DuplicateProject("a".into()),
        Issue::DuplicateWorkflow("w1".into()),
        Issue::UnknownProject { workflow: "w1".into(), project: "c".into() },
    ]);

    Ok(())
}

#[test]
fn yaml_fixture() -> Result<()> {
    let store = Store::from_yaml("
        projects:
          - projectId: p1
        names:
          - projectId: p1
            name: Project One
        workflows:
          - id: w
            projectId: p1
            triggerTypes: [enter]
            actions:
              - name: notify
    ")?;

    assert_eq!(project_ids(&store, None), ["p1"]);
    assert_eq!(store.name_of("p1"), Some("Project One"));
    let w = store.workflows_of("p1").next().unwrap();
    assert_eq!(w.trigger_types, Some(vec!["enter".to_owned()]));
    assert_eq!(w.actions, Some(vec![Action { name: "notify".into() }]));

    Ok(())
}

#[test]
fn yaml_fixture_keys_are_optional() -> Result<()> {
    let store = Store::from_yaml("projects: [{ projectId: lonely }]")?;
    assert_eq!(project_ids(&store, None), ["lonely"]);
    assert_eq!(store.workflows(None).count(), 0);
    assert_eq!(store.issues(), [Issue::MissingName("lonely".into())]);

    Ok(())
}

#[test]
fn yaml_fixture_rejects_unknown_keys() {
    assert!(Store::from_yaml("projects: [{ id: abc }]").is_err());
    assert!(Store::from_yaml("launches: []").is_err());
}

#[test]
fn load_without_fixture_uses_sample() -> Result<()> {
    let store = Store::load(&DataConfig { fixture: None })?;
    assert_eq!(project_ids(&store, None), ["abc", "xyz", "xxx"]);

    Ok(())
}

#[test]
fn load_missing_fixture_fails() {
    let config = DataConfig { fixture: Some("/this/file/does/not/exist.yaml".into()) };
    assert!(Store::load(&config).is_err());
}
