use assert_cmd::Command;
use mockito::Server;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn nupm() -> Command {
    Command::cargo_bin("nupm").unwrap()
}

fn write_manifest(dir: &std::path::Path, content: &str) -> std::path::PathBuf {
    let path = dir.join("project.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_end_to_end_search() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_index = server
        .mock("GET", "/index.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{
                "version": "3.0.0",
                "resources": [
                    {{ "@id": "{}/query", "@type": "SearchQueryService" }},
                    {{ "@id": "{}/flat2", "@type": "PackageBaseAddress/3.0.0" }}
                ]
            }}"#,
            url, url
        ))
        .create();

    let _mock_query = server
        .mock("GET", "/query?q=serilog&take=20")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "totalHits": 2,
                "data": [
                    { "id": "Serilog", "version": "2.0.0", "description": "Simple structured logging" },
                    { "id": "Serilog.Sinks.Console", "version": "3.1.1" }
                ]
            }"#,
        )
        .create();

    nupm()
        .args(["--feed-url", &format!("{}/index.json", url), "search", "serilog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Serilog 2.0.0"))
        .stdout(predicate::str::contains("Simple structured logging"))
        .stdout(predicate::str::contains("Serilog.Sinks.Console 3.1.1"));
}

#[test]
fn test_search_with_unreachable_feed_resolves_empty() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_index = server
        .mock("GET", "/index.json")
        .with_status(500)
        .create();

    nupm()
        .args(["--feed-url", &format!("{}/index.json", url), "search", "serilog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages found for 'serilog'."));
}

#[test]
fn test_search_with_malformed_discovery_document_resolves_empty() {
    let mut server = Server::new();
    let url = server.url();

    let _mock_index = server
        .mock("GET", "/index.json")
        .with_status(200)
        .with_body("random")
        .create();

    nupm()
        .args(["--feed-url", &format!("{}/index.json", url), "search", "serilog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages found"));
}

#[test]
fn test_search_offline_resolves_empty() {
    nupm()
        .args(["--offline", "search", "serilog"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No packages found"));
}

#[test]
fn test_add_records_dependency() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path(), r#"{ "name": "app", "dependencies": {} }"#);

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "add", "Newtonsoft.Json", "9.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Newtonsoft.Json 9.0.1"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(written["dependencies"]["Newtonsoft.Json"], "9.0.1");
    // Unrelated fields survive the rewrite
    assert_eq!(written["name"], "app");
}

#[test]
fn test_add_without_version_records_any() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path(), r#"{ "dependencies": {} }"#);

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "add", "Serilog"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(written["dependencies"]["Serilog"], "");
}

#[test]
fn test_add_twice_keeps_latest_version() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(dir.path(), r#"{ "dependencies": {} }"#);

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "add", "Serilog", "1.5.9"])
        .assert()
        .success();

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "add", "Serilog", "2.0.0"])
        .assert()
        .success();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    let deps = written["dependencies"].as_object().unwrap();
    assert_eq!(deps.len(), 1);
    assert_eq!(deps["Serilog"], "2.0.0");
}

#[test]
fn test_add_fails_without_manifest() {
    let dir = tempdir().unwrap();

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "add", "Serilog", "2.0.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No manifest found"));
}

#[test]
fn test_remove_deletes_dependency() {
    let dir = tempdir().unwrap();
    let manifest = write_manifest(
        dir.path(),
        r#"{ "name": "app", "dependencies": { "testPackage": "1.0.0" } }"#,
    );

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "remove", "testPackage"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed testPackage"));

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert!(written["dependencies"].get("testPackage").is_none());
    assert_eq!(written["name"], "app");
}

#[test]
fn test_remove_fails_on_missing_package() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), r#"{ "dependencies": { "testPackage": "1.0.0" } }"#);

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "remove", "MySql.Data.Entity"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a declared dependency"));
}

#[test]
fn test_remove_twice_fails_the_second_time() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), r#"{ "dependencies": { "testPackage": "1.0.0" } }"#);

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "remove", "testPackage"])
        .assert()
        .success();

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "remove", "testPackage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a declared dependency"));
}

#[test]
fn test_remove_fails_on_invalid_manifest() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), "random");

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "remove", "testPackage"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid manifest"));
}

#[test]
fn test_list_prints_dependencies() {
    let dir = tempdir().unwrap();
    write_manifest(
        dir.path(),
        r#"{ "dependencies": { "Serilog": "2.0.0", "Newtonsoft.Json": "" } }"#,
    );

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Serilog 2.0.0"))
        .stdout(predicate::str::contains("Newtonsoft.Json (any)"));
}

#[test]
fn test_list_empty_dependencies() {
    let dir = tempdir().unwrap();
    write_manifest(dir.path(), r#"{ "dependencies": {} }"#);

    nupm()
        .args(["-C", dir.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No dependencies declared."));
}
