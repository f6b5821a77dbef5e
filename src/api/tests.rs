use std::sync::Arc;

use juniper::{DefaultScalarValue, ExecutionError, Value, Variables, graphql_value};

use crate::model::Store;
use super::{Context, root_node};


fn run_with(store: Store, query: &str) -> (Value, Vec<ExecutionError<DefaultScalarValue>>) {
    let context = Context::new(Arc::new(store));
    juniper::execute_sync(query, None, &root_node(), &Variables::new(), &context)
        .unwrap_or_else(|e| panic!("query '{query}' failed to execute: {e:?}"))
}

/// Runs the query against the sample data and asserts that no errors occured.
fn run(query: &str) -> Value {
    let (value, errors) = run_with(Store::sample(), query);
    assert!(errors.is_empty(), "unexpected errors: {errors:#?}");
    value
}

#[test]
fn all_projects_in_storage_order() {
    assert_eq!(
        run("{ projects { id } }"),
        graphql_value!({ "projects": [{ "id": "abc" }, { "id": "xyz" }, { "id": "xxx" }] }),
    );
}

#[test]
fn project_by_known_id() {
    for id in ["abc", "xyz", "xxx"] {
        assert_eq!(
            run(&format!(r#"{{ projects(id: "{id}") {{ id }} }}"#)),
            graphql_value!({ "projects": [{ "id": id }] }),
        );
    }
}

#[test]
fn project_by_unknown_id() {
    assert_eq!(run(r#"{ projects(id: "nope") { id } }"#), graphql_value!({ "projects": [] }));
    assert_eq!(run(r#"{ projects(id: "ABC") { id } }"#), graphql_value!({ "projects": [] }));
}

#[test]
fn empty_id_does_not_filter() {
    assert_eq!(run(r#"{ projects(id: "") { id } }"#), run("{ projects { id } }"));
    assert_eq!(run(r#"{ workflow(id: "") { id } }"#), run("{ workflow { id } }"));
}

#[test]
fn project_names() {
    assert_eq!(
        run("{ projects { id name } }"),
        graphql_value!({ "projects": [
            { "id": "abc", "name": "i know my abcs" },
            { "id": "xyz", "name": "i know my xyzs" },
            { "id": "xxx", "name": "i know nothing jon snow" },
        ] }),
    );
}

#[test]
fn project_workflows() {
    assert_eq!(
        run("{ projects { id workflows { id projectId } } }"),
        graphql_value!({ "projects": [
            { "id": "abc", "workflows": [{ "id": "w1", "projectId": "abc" }] },
            { "id": "xyz", "workflows": [{ "id": "w2", "projectId": "xyz" }] },
            { "id": "xxx", "workflows": [] },
        ] }),
    );
}

#[test]
fn workflow_with_triggers_and_actions() {
    assert_eq!(
        run(r#"{ workflow(id: "w1") { projectId triggerTypes actions { name } } }"#),
        graphql_value!({ "workflow": [{
            "projectId": "abc",
            "triggerTypes": ["enter", "exit"],
            "actions": [{ "name": "do x" }],
        }] }),
    );
}

#[test]
fn workflow_without_triggers_and_actions() {
    assert_eq!(
        run(r#"{ workflow(id: "w2") { projectId triggerTypes actions { name } } }"#),
        graphql_value!({ "workflow": [{
            "projectId": "xyz",
            "triggerTypes": null,
            "actions": null,
        }] }),
    );
}

#[test]
fn workflow_not_found() {
    assert_eq!(
        run(r#"{ workflow(id: "nonexistent") { id } }"#),
        graphql_value!({ "workflow": [] }),
    );
}

#[test]
fn all_workflows() {
    assert_eq!(
        run("{ workflow { id } }"),
        graphql_value!({ "workflow": [{ "id": "w1" }, { "id": "w2" }] }),
    );
}

#[test]
fn missing_name_is_a_field_error() {
    let store = Store::from_yaml("
        projects:
          - projectId: named
          - projectId: nameless
        names:
          - { projectId: named, name: Named }
        workflows:
          - { id: w, projectId: nameless }
    ").unwrap();

    let (value, errors) = run_with(store, "{ projects { id name workflows { id } } }");

    // Only the `name` field of the broken project is affected.
    assert_eq!(value, graphql_value!({ "projects": [
        { "id": "named", "name": "Named", "workflows": [] },
        { "id": "nameless", "name": null, "workflows": [{ "id": "w" }] },
    ] }));

    assert_eq!(errors.len(), 1);
    let path = errors[0].path();
    assert_eq!(path.first().map(String::as_str), Some("projects"));
    assert_eq!(path.last().map(String::as_str), Some("name"));
    assert_eq!(errors[0].error().message(), "Missing join target: project 'nameless' has no name");
    assert_eq!(errors[0].error().extensions(), &graphql_value!({
        "kind": "MISSING_JOIN_TARGET",
        "key": "project.missing-name",
    }));
}

#[test]
fn workflow_without_project() {
    let store = Store::from_yaml("workflows: [{ id: orphan }]").unwrap();
    let (value, errors) = run_with(store, "{ projects { id } workflow { id projectId } }");
    assert!(errors.is_empty());
    assert_eq!(value, graphql_value!({
        "projects": [],
        "workflow": [{ "id": "orphan", "projectId": null }],
    }));
}

#[test]
fn repeated_queries_are_identical() {
    let query = "{ projects { id name workflows { id triggerTypes actions { name } } } }";
    let first = serde_json::to_string(&run(query)).unwrap();
    for _ in 0..3 {
        assert_eq!(serde_json::to_string(&run(query)).unwrap(), first);
    }
}

#[test]
fn schema_declares_all_fields() {
    let sdl = root_node().as_sdl();
    for expected in [
        "projects(id: String): [Project!]!",
        "workflow(id: String): [Workflow!]!",
        "name: String\n",
        "workflows: [Workflow!]!",
        "projectId: ID\n",
        "triggerTypes: [String!]\n",
        "actions: [Action!]\n",
    ] {
        assert!(sdl.contains(expected), "'{expected}' missing in schema:\n{sdl}");
    }
    assert!(!sdl.contains("type Mutation"));
}
