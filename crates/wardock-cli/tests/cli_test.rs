use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// The binary with engine connection variables cleared.
fn wardock() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("wardock");
    cmd.env_remove("DOCKER_HOST")
        .env_remove("DOCKER_TLS_VERIFY")
        .env_remove("DOCKER_CERT_PATH")
        .env_remove("WARDOCK_ENGINE");
    cmd
}

/// Creates `<dir>/target/shop.war` and returns its path.
fn place_artifact(dir: &Path) -> PathBuf {
    std::fs::create_dir_all(dir.join("target")).unwrap();
    let artifact = dir.join("target/shop.war");
    std::fs::write(&artifact, b"PK\x03\x04").unwrap();
    artifact
}

const EXPECTED_DOCKERFILE: &str = "FROM tomcat\nMAINTAINER user\nADD shop.war /usr/local/tomcat/webapps/\nCMD [\"catalina.sh\",\"run\"]\n";

// ── Help / Version ──

#[test]
fn shows_help() {
    wardock()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Build Tomcat container images"));
}

#[test]
fn shows_version() {
    wardock()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wardock"));
}

// ── Init Command ──

#[test]
fn init_writes_default_config() {
    let tmp = TempDir::new().unwrap();

    wardock()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created wardock.toml"));

    let content = std::fs::read_to_string(tmp.path().join("wardock.toml")).unwrap();
    assert!(content.contains("base_image = \"tomcat\""));
    assert!(content.contains("binary = \"docker\""));
}

#[test]
fn init_fails_on_second_run() {
    let tmp = TempDir::new().unwrap();

    wardock().current_dir(tmp.path()).arg("init").assert().success();

    wardock()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ── Dockerfile Command ──

#[test]
fn dockerfile_written_next_to_artifact() {
    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());

    wardock()
        .current_dir(tmp.path())
        .args(["dockerfile", "target/shop.war"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let content = std::fs::read_to_string(tmp.path().join("target/Dockerfile")).unwrap();
    assert_eq!(content, EXPECTED_DOCKERFILE);
}

#[test]
fn dockerfile_stdout_does_not_write() {
    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());

    wardock()
        .current_dir(tmp.path())
        .args(["dockerfile", "target/shop.war", "--stdout"])
        .assert()
        .success()
        .stdout(EXPECTED_DOCKERFILE);

    assert!(!tmp.path().join("target/Dockerfile").exists());
}

#[test]
fn dockerfile_bare_name_uses_working_directory() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("shop.war"), b"PK").unwrap();

    wardock()
        .current_dir(tmp.path())
        .args(["dockerfile", "shop.war"])
        .assert()
        .success();

    assert!(tmp.path().join("Dockerfile").exists());
}

#[test]
fn dockerfile_honours_config() {
    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());
    std::fs::write(
        tmp.path().join("wardock.toml"),
        "[image]\nbase_image = \"tomcat:10-jdk17\"\ndeploy_dir = \"/opt/webapps/\"\n",
    )
    .unwrap();

    wardock()
        .current_dir(tmp.path())
        .args(["dockerfile", "target/shop.war", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("FROM tomcat:10-jdk17"))
        .stdout(predicate::str::contains("ADD shop.war /opt/webapps/"));
}

#[test]
fn dockerfile_rejects_template_without_slot() {
    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());
    std::fs::write(tmp.path().join("Dockerfile.template"), "FROM tomcat\n").unwrap();
    std::fs::write(
        tmp.path().join("wardock.toml"),
        "[image]\ntemplate = \"Dockerfile.template\"\n",
    )
    .unwrap();

    wardock()
        .current_dir(tmp.path())
        .args(["dockerfile", "target/shop.war"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dockerfile.template"));
}

// ── Build Command ──

#[cfg(unix)]
#[test]
fn build_runs_engine_in_artifact_directory() {
    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());

    // `echo` prints the argv it was given in place of an image id.
    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "echo")
        .args([
            "build",
            "--creator",
            "wso2",
            "--name",
            "shop",
            "--version",
            "1.0.0",
            "target/shop.war",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Built wso2/shop:1.0.0 (build --tag wso2/shop:1.0.0 --quiet -- target)",
        ));

    let content = std::fs::read_to_string(tmp.path().join("target/Dockerfile")).unwrap();
    assert_eq!(content, EXPECTED_DOCKERFILE);
}

#[test]
fn build_missing_artifact_fails_with_identifier() {
    let tmp = TempDir::new().unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "echo")
        .args(["build", "-c", "wso2", "-n", "shop", "ghost.war"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not create the docker image [image-identifier]: wso2/shop:latest",
        ));

    assert!(!tmp.path().join("Dockerfile").exists());
}

#[test]
fn build_with_tls_but_no_certificates_fails() {
    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());
    let certs = tmp.path().join("certs");
    std::fs::create_dir(&certs).unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("DOCKER_TLS_VERIFY", "1")
        .env("DOCKER_CERT_PATH", &certs)
        .args(["build", "-c", "wso2", "-n", "shop", "target/shop.war"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not create the container engine client",
        ));

    assert!(!tmp.path().join("target/Dockerfile").exists());
}

#[cfg(unix)]
#[test]
fn build_does_not_leak_resolved_docker_variables() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    place_artifact(tmp.path());
    // Stand-in engine that reports what it inherited as the image id.
    let engine = tmp.path().join("fake-engine");
    std::fs::write(
        &engine,
        "#!/bin/sh\necho \"tls=${DOCKER_TLS_VERIFY-unset} host=${DOCKER_HOST-unset}\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&engine, std::fs::Permissions::from_mode(0o755)).unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", &engine)
        .env("DOCKER_TLS_VERIFY", "0")
        .env("DOCKER_HOST", "")
        .args(["build", "-c", "wso2", "-n", "shop", "target/shop.war"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Built wso2/shop:latest (tls=unset host=unset)",
        ));
}

#[test]
fn build_requires_creator() {
    wardock()
        .args(["build", "--name", "shop", "shop.war"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--creator"));
}

// ── Remove Command ──

#[cfg(unix)]
#[test]
fn remove_reports_removed_identifier() {
    let tmp = TempDir::new().unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "true")
        .args(["remove", "-c", "wso2", "-n", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed wso2/shop:latest"));
}

#[cfg(unix)]
#[test]
fn remove_failure_names_identifier() {
    let tmp = TempDir::new().unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "false")
        .args(["remove", "-c", "wso2", "-n", "shop", "-t", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "could not remove the docker image [image-identifier]: wso2/shop:2.0",
        ));
}

#[test]
fn remove_with_empty_name_fails() {
    let tmp = TempDir::new().unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "wardock-no-such-engine")
        .args(["remove", "-c", "wso2", "-n", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid image identifier"));
}

// ── Doctor Command ──

#[test]
fn doctor_reports_unusable_tls_settings() {
    let tmp = TempDir::new().unwrap();
    let certs = tmp.path().join("certs");
    std::fs::create_dir(&certs).unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("DOCKER_TLS_VERIFY", "1")
        .env("DOCKER_CERT_PATH", &certs)
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ca.pem"))
        .stdout(predicate::str::contains("Dockerfile template"))
        .stdout(predicate::str::contains("builtin"))
        .stderr(predicate::str::contains("some checks failed"));
}

#[test]
fn doctor_reports_invalid_config_and_keeps_checking() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("wardock.toml"), "[image\nbase_image = ").unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "wardock-no-such-engine")
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Config file"))
        .stdout(predicate::str::contains("wardock.toml"))
        .stdout(predicate::str::contains("Engine CLI"))
        .stderr(predicate::str::contains("some checks failed"));
}

#[test]
fn doctor_reports_broken_template() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("Dockerfile.template"), "FROM tomcat\n").unwrap();
    std::fs::write(
        tmp.path().join("wardock.toml"),
        "[image]\ntemplate = \"Dockerfile.template\"\n",
    )
    .unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "wardock-no-such-engine")
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("ADD_DIRECTIVE"));
}

#[test]
fn doctor_fails_without_engine() {
    let tmp = TempDir::new().unwrap();

    wardock()
        .current_dir(tmp.path())
        .env("WARDOCK_ENGINE", "wardock-no-such-engine")
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("NG"))
        .stderr(predicate::str::contains("some checks failed"));
}
