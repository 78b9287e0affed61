use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::os::unix::fs::PermissionsExt;

#[test]
fn push_hands_request_to_lightsailctl() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = dir.path().join("lightsailctl");
    let captured = dir.path().join("request.json");
    fs::write(
        &plugin,
        format!(
            "#!/bin/sh\n\
             [ \"$1\" = \"--plugin\" ] && [ \"$2\" = \"--input-stdin\" ] || exit 3\n\
             cat > '{}'\n\
             echo 'Image pushed.'\n",
            captured.display()
        ),
    )
    .unwrap();
    fs::set_permissions(&plugin, fs::Permissions::from_mode(0o755)).unwrap();

    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!("[plugin]\nlightsailctl_path = \"{}\"\n", plugin.display()),
    )
    .unwrap();

    Command::cargo_bin("lightsail")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["--region", "eu-central-1", "push-container-image"])
        .args(["--service-name", "web", "--label", "api", "--image", "api:v3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image pushed."));

    let request: Value = serde_json::from_slice(&fs::read(&captured).unwrap()).unwrap();
    assert_eq!(
        request,
        json!({
            "inputVersion": "1",
            "operation": "PushContainerImage",
            "payload": {"service": "web", "label": "api", "image": "api:v3"},
            "configuration": {"region": "eu-central-1"}
        })
    );
}

#[test]
fn missing_plugin_explains_how_to_install() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        "[plugin]\nlightsailctl_path = \"/nonexistent/lightsailctl\"\n",
    )
    .unwrap();

    Command::cargo_bin("lightsail")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["push-container-image", "--service-name", "s", "--label", "l", "--image", "i"])
        .assert()
        .code(255)
        .stderr(predicate::str::contains("lightsailctl"));
}

#[test]
fn chatty_plugin_output_is_relayed_in_full() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = dir.path().join("lightsailctl");
    fs::write(
        &plugin,
        "#!/bin/sh\n\
         cat > /dev/null\n\
         head -c 200000 /dev/zero | tr '\\0' '.'\n\
         echo 'layer pushed' >&2\n",
    )
    .unwrap();
    fs::set_permissions(&plugin, fs::Permissions::from_mode(0o755)).unwrap();

    let config = dir.path().join("config.toml");
    fs::write(
        &config,
        format!(
            "[plugin]\nlightsailctl_path = \"{}\"\ntimeout_secs = 10\n",
            plugin.display()
        ),
    )
    .unwrap();

    let out = Command::cargo_bin("lightsail")
        .unwrap()
        .arg("--config")
        .arg(&config)
        .args(["push-container-image", "--service-name", "s", "--label", "l", "--image", "i"])
        .assert()
        .success()
        .stderr(predicate::str::contains("layer pushed"))
        .get_output()
        .stdout
        .clone();
    assert_eq!(out.len(), 200_000);
}
