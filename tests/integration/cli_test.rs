use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

fn bindable() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("bindable").unwrap()
}

fn write_manifest(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

const ANNOTATED_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: databases.example.org
  annotations:
    service.binding/host: "path={.status.host}"
    foo: bar
spec:
  group: example.org
"#;

const SCHEMA_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: backingservices.app1.example.org
spec:
  versions:
    - name: v1alpha1
      schema:
        openAPIV3Schema:
          properties:
            status:
              properties:
                binding:
                  properties:
                    name:
                      type: string
"#;

const PLAIN_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: widgets.example.org
  annotations:
    foo: bar
spec:
  versions:
    - name: v1
      schema:
        openAPIV3Schema:
          properties:
            status:
              properties:
                binding:
                  properties:
                    name:
                      type: not-string
"#;

#[test]
fn check_annotated_crd() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "annotated.yaml", ANNOTATED_CRD);
    bindable()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("BINDABLE"))
        .stdout(predicates::str::contains("service.binding/host"));
}

#[test]
fn check_schema_convention_crd() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "schema.yaml", SCHEMA_CRD);
    bindable()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("schema convention in version v1alpha1"));
}

#[test]
fn check_plain_crd_is_not_bindable() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "plain.yaml", PLAIN_CRD);
    bindable()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("NOT BINDABLE"));
}

#[test]
fn fail_if_not_bindable_exits_two() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "plain.yaml", PLAIN_CRD);
    bindable()
        .args(["check", "--fail-if-not-bindable"])
        .arg(&path)
        .assert()
        .code(2);
}

#[test]
fn fail_if_not_bindable_passes_when_all_bindable() {
    let dir = TempDir::new().unwrap();
    let stream = format!("{}---\n{}", ANNOTATED_CRD, SCHEMA_CRD);
    let path = write_manifest(&dir, "both.yaml", &stream);
    bindable()
        .args(["check", "--fail-if-not-bindable"])
        .arg(&path)
        .assert()
        .success();
}

#[test]
fn check_json_reports_each_document() {
    let dir = TempDir::new().unwrap();
    let stream = format!("{}---\n{}---\n{}", ANNOTATED_CRD, SCHEMA_CRD, PLAIN_CRD);
    let path = write_manifest(&dir, "all.yaml", &stream);
    let output = bindable()
        .args(["check", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0]["bindable"], true);
    assert_eq!(reports[0]["reason"], "annotated");
    assert_eq!(reports[1]["reason"], "schema_convention");
    assert_eq!(reports[1]["version"], "v1alpha1");
    assert_eq!(reports[2]["bindable"], false);
    assert_eq!(reports[2]["name"], "widgets.example.org");
}

#[test]
fn check_reads_json_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        "crd.json",
        r#"{"kind": "CustomResourceDefinition",
            "metadata": {"name": "x", "annotations": {"service.binding": "path={.spec}"}}}"#,
    );
    bindable()
        .arg("check")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("CustomResourceDefinition/x"));
}

#[test]
fn check_reads_stdin() {
    bindable()
        .args(["check", "-"])
        .write_stdin(SCHEMA_CRD)
        .assert()
        .success()
        .stdout(predicates::str::contains("BINDABLE"));
}

#[test]
fn check_missing_file_fails() {
    let dir = TempDir::new().unwrap();
    bindable()
        .arg("check")
        .arg(dir.path().join("absent.yaml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicates::str::contains("failed to read"));
}

#[test]
fn check_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "broken.json", "{not json");
    bindable()
        .arg("check")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicates::str::contains("not valid JSON"));
}

#[test]
fn annotations_lists_raw_values() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "annotated.yaml", ANNOTATED_CRD);
    bindable()
        .arg("annotations")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("service.binding/host = path={.status.host}"))
        .stdout(predicates::str::contains("foo").not());
}

#[test]
fn annotations_json() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "annotated.yaml", ANNOTATED_CRD);
    let output = bindable()
        .args(["annotations", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let listings: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(listings.len(), 1);
    let annotations = listings[0]["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["key"], "service.binding/host");
    assert_eq!(annotations[0]["value"], "path={.status.host}");
}

#[test]
fn check_requires_a_file() {
    bindable().arg("check").assert().failure();
}

#[test]
fn check_expands_list_manifest() {
    let dir = TempDir::new().unwrap();
    let list = r#"
apiVersion: v1
kind: List
items:
  - apiVersion: apiextensions.k8s.io/v1
    kind: CustomResourceDefinition
    metadata:
      name: first.example.org
      annotations:
        service.binding: "path={.spec}"
  - apiVersion: apiextensions.k8s.io/v1
    kind: CustomResourceDefinition
    metadata:
      name: second.example.org
"#;
    let path = write_manifest(&dir, "list.yaml", list);
    let output = bindable()
        .args(["check", "--json"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: Vec<Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0]["name"], "first.example.org");
    assert_eq!(reports[0]["bindable"], true);
    assert_eq!(reports[1]["bindable"], false);
}

#[test]
fn check_list_kind_without_items_is_one_resource() {
    let dir = TempDir::new().unwrap();
    let doc = r#"
kind: ConfigMapList
metadata:
  name: cm
  annotations:
    service.binding: "path={.spec}"
"#;
    let path = write_manifest(&dir, "cmlist.yaml", doc);
    bindable()
        .args(["check", "--fail-if-not-bindable"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("ConfigMapList/cm  (annotation service.binding)"));
}

#[test]
fn fail_if_not_bindable_exits_two_when_nothing_checked() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "empty.yaml", "---\n");
    bindable()
        .args(["check", "--fail-if-not-bindable"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(predicates::str::contains("No resources in"));
}

#[test]
fn empty_manifest_without_flag_succeeds() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "empty.yaml", "");
    bindable().arg("check").arg(&path).assert().success();
}

#[test]
fn annotations_reports_none_for_plain_crd() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "plain.yaml", PLAIN_CRD);
    bindable()
        .arg("annotations")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicates::str::contains("CustomResourceDefinition/widgets.example.org"))
        .stdout(predicates::str::contains("(no binding annotations)"));
}
