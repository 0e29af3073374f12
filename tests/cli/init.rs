use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .potkitrc.json

    ----- stderr -----
    ");

    let content = test.read_file(".potkitrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["packageName"], "PACKAGE");
    assert_eq!(parsed["outputEncoding"], "UTF-8");
    assert_eq!(parsed["ignoreFuzzy"], true);
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".potkitrc.json", "{}")?;

    let output = test.command().arg("init").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "Error: .potkitrc.json already exists\n");
    assert_eq!(test.read_file(".potkitrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::with_file("lib/app.rb", "_(\"Hello\")\n")?;

    test.command().arg("init").output()?;

    let output = test
        .xgettext_command()
        .args(["lib", "-o", "po/app.pot"])
        .output()?;
    assert!(
        output.status.success(),
        "xgettext should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}
