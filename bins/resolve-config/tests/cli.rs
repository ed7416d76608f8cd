use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const DEFAULTS: &str = r#"
application_id = "com.example.once_upon_a_line"
min_sdk = 21
target_sdk = 34
compile_sdk = 34
version_code = 1
version_name = "1.0.0"
"#;

const KEY_PROPERTIES: &str = "\
storeFile=/keys/upload.jks
storePassword=store-secret
keyAlias=upload
keyPassword=key-secret
";

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("buildvar.toml"), DEFAULTS).unwrap();
    dir
}

fn write(dir: &TempDir, name: &str, content: &str) {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("resolve-config").unwrap();
    cmd.current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("BUILDVAR_DEFAULTS")
        .arg("--no-color");
    cmd
}

#[test]
fn resolves_with_discovered_defaults_and_missing_keystore() {
    let dir = project();
    write(&dir, "local.properties", "flutter.versionCode=12\nflutter.versionName=1.2.0\n");

    cmd(dir.path())
        .args(["local.properties", "android/key.properties", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicate::str::contains("applicationId=com.example.once_upon_a_line"))
        .stdout(predicate::str::contains("versionCode=12"))
        .stdout(predicate::str::contains("versionName=1.2.0"))
        .stdout(predicate::str::contains("storeFile").not())
        .stderr(predicate::str::contains("Skipping missing property file"))
        .stderr(predicate::str::contains("debug keystore"));
}

#[test]
fn strict_signing_refuses_debug_fallback() {
    let dir = project();

    cmd(dir.path())
        .arg("--strict-signing")
        .assert()
        .code(14)
        .stderr(predicate::str::contains("No release signing credentials"));
}

#[test]
fn strict_signing_passes_with_keystore() {
    let dir = project();
    write(&dir, "android/key.properties", KEY_PROPERTIES);

    cmd(dir.path())
        .args(["android/key.properties", "--strict-signing"])
        .assert()
        .success();
}

#[test]
fn incomplete_keystore_properties() {
    let dir = project();
    write(&dir, "key.properties", "storeFile=/keys/upload.jks\nstorePassword=x\nkeyPassword=y\n");

    cmd(dir.path())
        .arg("key.properties")
        .assert()
        .code(11)
        .stderr(predicate::str::contains("keyAlias"));
}

#[test]
fn sdk_order_violation() {
    let dir = project();

    cmd(dir.path())
        .args(["--set", "minSdk=21", "--set", "targetSdk=30", "--set", "compileSdk=19"])
        .assert()
        .code(13)
        .stderr(predicate::str::contains("compileSdk=19"));
}

#[test]
fn invalid_application_id() {
    let dir = project();

    cmd(dir.path())
        .args(["--set", "applicationId=app"])
        .assert()
        .code(12);
}

#[test]
fn missing_required_field_without_defaults() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["--set", "applicationId=com.example.app"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("minSdk"));
}

#[test]
fn malformed_set_argument() {
    let dir = project();

    cmd(dir.path())
        .args(["--set", "versionCode"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Expected key=value"));
}

#[test]
fn broken_defaults_file() {
    let dir = TempDir::new().unwrap();
    write(&dir, "custom.toml", "min_sdk = \"twenty-one\"\n");

    cmd(dir.path())
        .args(["--defaults", "custom.toml"])
        .assert()
        .code(3);
}

#[test]
fn explicit_missing_defaults_file() {
    let dir = TempDir::new().unwrap();

    cmd(dir.path())
        .args(["--defaults", "nope.toml"])
        .assert()
        .code(3);
}

#[test]
fn text_output_masks_passwords() {
    let dir = project();
    write(&dir, "key.properties", KEY_PROPERTIES);

    cmd(dir.path())
        .arg("key.properties")
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.once_upon_a_line"))
        .stdout(predicate::str::contains("/keys/upload.jks"))
        .stdout(predicate::str::contains("store-secret").not())
        .stdout(predicate::str::contains("key-secret").not());
}

#[test]
fn json_output() {
    let dir = project();
    write(&dir, "key.properties", KEY_PROPERTIES);

    let output = cmd(dir.path())
        .args(["key.properties", "--format", "json", "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["application_id"], "com.example.once_upon_a_line");
    assert_eq!(json["min_sdk"], 21);
    assert_eq!(json["release_signing_fallback"], false);
    assert_eq!(json["signing"]["release"]["key_alias"], "upload");
    assert_eq!(json["signing"]["debug"]["key_alias"], "androiddebugkey");
}

#[test]
fn json_error_report() {
    let dir = project();

    let output = cmd(dir.path())
        .args(["--set", "applicationId=app", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(12));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["code"], "INVALID_IDENTIFIER");
    assert_eq!(json["code_str"], "E6002");
}

#[test]
fn properties_output_resolves_to_itself() {
    let dir = project();
    write(&dir, "key.properties", KEY_PROPERTIES);

    let first = cmd(dir.path())
        .args(["key.properties", "--set", "versionCode=7", "--format", "properties"])
        .output()
        .unwrap();
    assert!(first.status.success());
    write(&dir, "resolved.properties", &String::from_utf8(first.stdout.clone()).unwrap());

    let second = cmd(dir.path())
        .args(["resolved.properties", "--format", "properties"])
        .output()
        .unwrap();
    assert!(second.status.success());

    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn later_sources_override_earlier() {
    let dir = project();
    write(&dir, "a.properties", "versionName=1.0.0-a\n");
    write(&dir, "b.properties", "versionName=1.0.0-b\n");

    cmd(dir.path())
        .args(["a.properties", "b.properties", "--format", "properties"])
        .assert()
        .success()
        .stdout(predicate::str::contains("versionName=1.0.0-b"));
}
