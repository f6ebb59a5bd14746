use std::fs;
use std::process::Command;

#[test]
fn test_github_output_mode_appends_to_named_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("images.json");
    let results = dir.path().join("update_results.json");
    let gh_output = dir.path().join("gh_output");
    fs::write(&config, r#"{"images": []}"#).expect("write config");

    let bin = env!("CARGO_BIN_EXE_image-update-checker");
    let out = Command::new(bin)
        .args([
            "--config",
            config.to_str().expect("utf-8 path"),
            "--results",
            results.to_str().expect("utf-8 path"),
            "--ci-output",
            "github",
        ])
        .env("GITHUB_OUTPUT", &gh_output)
        .current_dir(dir.path())
        .output()
        .expect("failed to run image-update-checker");

    assert!(
        out.status.success(),
        "exited non-zero: {:?}\nstderr:\n{}",
        out.status.code(),
        String::from_utf8_lossy(&out.stderr)
    );

    let body = fs::read_to_string(&gh_output).expect("GITHUB_OUTPUT file must exist");
    assert_eq!(body, "has_updates=false\n");

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        !stdout.contains("::set-output"),
        "legacy lines must not appear in github mode:\n{}",
        stdout
    );
}

#[test]
fn test_github_output_mode_requires_env() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("images.json");
    fs::write(&config, r#"{"images": []}"#).expect("write config");

    let bin = env!("CARGO_BIN_EXE_image-update-checker");
    let out = Command::new(bin)
        .args([
            "--config",
            config.to_str().expect("utf-8 path"),
            "--ci-output",
            "github",
        ])
        .env_remove("GITHUB_OUTPUT")
        .current_dir(dir.path())
        .output()
        .expect("failed to run image-update-checker");

    assert_eq!(out.status.code(), Some(1));
    let err = String::from_utf8_lossy(&out.stderr);
    assert!(
        err.contains("GITHUB_OUTPUT"),
        "expected GITHUB_OUTPUT hint in stderr, got:\n{}",
        err
    );
}
