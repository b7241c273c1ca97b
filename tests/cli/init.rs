use anyhow::{Context, Result};
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for field in ["includes", "ignores", "catalogPath", "importName", "importPath", "format"] {
        assert!(
            parsed.get(field).is_some(),
            "Config should have '{}' field",
            field
        );
    }
    assert_eq!(parsed["importName"], "i18n");
    assert_eq!(parsed["format"], true);

    // 2-space indentation
    assert!(
        content.contains("  "),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Created .hanexrc.json"));
    assert!(test.root().join(".hanexrc.json").exists());

    let content = test.read_file(".hanexrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".hanexrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("already exists"));
    // The existing file is left alone.
    assert_eq!(test.read_file(".hanexrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.js", "const greeting = '你好';\n")?;

    let output = test.extract_command().output()?;
    assert_eq!(
        output.status.code(),
        Some(0),
        "extract should work with initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Checked 1 file: 1 rewritten"));

    Ok(())
}
