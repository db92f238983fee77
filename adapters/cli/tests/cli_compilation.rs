use std::process::Command;

#[test]
fn cli_compiles_without_warnings() {
    let status = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["check", "--quiet", "--bin", "cookieman"])
        .status()
        .expect("failed to invoke cargo check for cookieman CLI binary");

    assert!(status.success(), "cargo check --bin cookieman should succeed");
}

#[test]
fn bundled_layout_runs_to_completion() {
    let layout = concat!(env!("CARGO_MANIFEST_DIR"), "/layouts/corner.toml");
    let output = Command::new(env!("CARGO"))
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .args(["run", "--quiet", "--bin", "cookieman", "--", "--layout", layout])
        .output()
        .expect("failed to invoke cargo run for cookieman CLI binary");

    assert!(output.status.success(), "cookieman should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("final cell (1, 3)"),
        "unexpected output: {stdout}"
    );
}
