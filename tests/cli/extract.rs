use anyhow::Result;
use hanex::key::key_for;
use serde_json::Value;

use crate::CliTest;

/// Config used by most tests: explicit catalog path and no prettier pass,
/// so rewritten bytes are exactly what the splicer produced.
const CONFIG: &str = r#"{
  "includes": ["src"],
  "catalogPath": "./zh-CN.json",
  "importName": "i18n",
  "importPath": "@/i18n",
  "format": false
}"#;

fn project_with(files: &[(&str, &str)]) -> Result<CliTest> {
    let test = CliTest::with_file(".hanexrc.json", CONFIG)?;
    for (path, content) in files {
        test.write_file(path, content)?;
    }
    Ok(test)
}

#[test]
fn test_dry_run_reports_without_writing() -> Result<()> {
    let source = "const msg = '你好';\n";
    let test = project_with(&[("src/main.js", source)])?;

    let output = test.extract_command().output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Checked 1 file: 1 rewritten"));
    assert!(stdout.contains("Would add 1 entry to ./zh-CN.json"));
    assert!(stdout.contains("Run with --apply"));

    // Nothing on disk changed.
    assert_eq!(test.read_file("src/main.js")?, source);
    assert!(!test.root().join("zh-CN.json").exists());

    Ok(())
}

#[test]
fn test_apply_writes_files_and_catalog() -> Result<()> {
    let test = project_with(&[("src/main.js", "const msg = '你好';\n")])?;

    let output = test.extract_command().arg("--apply").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Checked 1 file: 1 rewritten"));
    assert!(stdout.contains("Added 1 entry to ./zh-CN.json"));

    let key = key_for("你好");
    assert_eq!(
        test.read_file("src/main.js")?,
        format!("import i18n from '@/i18n';\nconst msg = i18n.t('{}');\n", key)
    );

    let catalog_text = test.read_file("zh-CN.json")?;
    let catalog: Value = serde_json::from_str(&catalog_text)?;
    assert_eq!(catalog[&key], "你好");
    assert!(catalog_text.ends_with('\n'));

    Ok(())
}

#[test]
fn test_second_run_changes_nothing() -> Result<()> {
    let test = project_with(&[("src/main.js", "const msg = '你好';\n")])?;

    test.extract_command().arg("--apply").output()?;
    let rewritten = test.read_file("src/main.js")?;
    let catalog = test.read_file("zh-CN.json")?;

    let output = test.extract_command().arg("--apply").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Checked 1 file: 0 rewritten, 1 unchanged"));
    assert!(!stdout.contains("Added"));
    assert_eq!(test.read_file("src/main.js")?, rewritten);
    assert_eq!(test.read_file("zh-CN.json")?, catalog);

    Ok(())
}

#[test]
fn test_disabled_file_is_untouched() -> Result<()> {
    let source = "// i18n-disable\nconst msg = '你好';\n";
    let test = project_with(&[("src/skip.js", source)])?;

    let output = test.extract_command().arg("--apply").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("1 disabled"));
    assert_eq!(test.read_file("src/skip.js")?, source);
    assert!(!test.root().join("zh-CN.json").exists());

    Ok(())
}

#[test]
fn test_vue_component_end_to_end() -> Result<()> {
    let source = "<template>\n  <p>你好</p>\n</template>\n\n<script>\nexport default {\n  methods: {\n    hello() {\n      return '世界';\n    },\n  },\n};\n</script>\n";
    let test = project_with(&[("src/App.vue", source)])?;

    let output = test.extract_command().arg("--apply").output()?;
    assert_eq!(output.status.code(), Some(0));

    let expected = format!(
        "<template>\n  <p>{{{{ $t('{greet}') }}}}</p>\n</template>\n\n<script>\nimport i18n from '@/i18n';\nexport default {{\n  methods: {{\n    hello() {{\n      return this.$t('{world}');\n    }},\n  }},\n}};\n</script>\n",
        greet = key_for("你好"),
        world = key_for("世界"),
    );
    assert_eq!(test.read_file("src/App.vue")?, expected);

    let catalog: Value = serde_json::from_str(&test.read_file("zh-CN.json")?)?;
    assert_eq!(catalog[&key_for("你好")], "你好");
    assert_eq!(catalog[&key_for("世界")], "世界");

    Ok(())
}

#[test]
fn test_positional_paths_bypass_scan() -> Result<()> {
    // lib/ is outside the configured includes.
    let test = project_with(&[("lib/util.js", "const label = '标签';\n")])?;

    let output = test
        .extract_command()
        .args(["lib/util.js", "--apply"])
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("Checked 1 file: 1 rewritten"));
    assert!(test.read_file("lib/util.js")?.contains("i18n.t("));

    Ok(())
}

#[test]
fn test_unsupported_path_warns_and_succeeds() -> Result<()> {
    let test = project_with(&[("notes.md", "# 说明\n")])?;

    let output = test.extract_command().arg("notes.md").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("warning: notes.md is not a .js or .vue file, skipped"));
    assert!(stdout.contains("1 unsupported"));

    Ok(())
}

#[test]
fn test_parse_failure_fails_run_but_not_other_files() -> Result<()> {
    let test = project_with(&[
        ("src/bad.js", "const = '你好';\n"),
        ("src/ok.js", "const msg = '再见';\n"),
    ])?;

    let output = test.extract_command().arg("--apply").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("1 failed"));
    assert!(stdout.contains("src/bad.js"));

    // The good file was still rewritten and cataloged.
    assert!(test.read_file("src/ok.js")?.contains("i18n.t("));
    let catalog: Value = serde_json::from_str(&test.read_file("zh-CN.json")?)?;
    assert_eq!(catalog[&key_for("再见")], "再见");
    // The broken file kept its bytes.
    assert_eq!(test.read_file("src/bad.js")?, "const = '你好';\n");

    Ok(())
}

#[test]
fn test_catalog_conflict_fails_that_file() -> Result<()> {
    let test = project_with(&[("src/main.js", "const msg = '你好';\n")])?;
    // Seed the catalog with the same key bound to different text.
    let seeded = format!("{{\n  \"{}\": \"别的文案\"\n}}\n", key_for("你好"));
    test.write_file("zh-CN.json", &seeded)?;

    let output = test.extract_command().arg("--apply").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("1 failed"));
    // Neither the source nor the catalog moved.
    assert_eq!(test.read_file("src/main.js")?, "const msg = '你好';\n");
    assert_eq!(test.read_file("zh-CN.json")?, seeded);

    Ok(())
}

#[test]
fn test_cli_overrides_import_and_catalog() -> Result<()> {
    let test = project_with(&[("src/main.js", "const msg = '你好';\n")])?;

    let output = test
        .extract_command()
        .args([
            "--apply",
            "--catalog",
            "./locales/zh.json",
            "--import-name",
            "intl",
            "--import-path",
            "@/locale",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let rewritten = test.read_file("src/main.js")?;
    assert!(rewritten.starts_with("import intl from '@/locale';\n"));
    assert!(rewritten.contains("intl.t("));
    assert!(test.root().join("locales/zh.json").exists());
    assert!(!test.root().join("zh-CN.json").exists());

    Ok(())
}

#[test]
fn test_verbose_lists_extracted_pairs() -> Result<()> {
    let test = project_with(&[("src/main.js", "const msg = '你好';\n")])?;

    let output = test.extract_command().arg("-v").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("src/main.js: 1 replaced"));
    assert!(stdout.contains("你好"));
    assert!(stdout.contains(&key_for("你好")));

    Ok(())
}

#[test]
fn test_missing_prettier_falls_back_with_warning() -> Result<()> {
    // format defaults to true; the test environment has no prettier on an
    // emptied PATH, so the run warns once and writes unformatted output.
    let config = r#"{
  "includes": ["src"],
  "catalogPath": "./zh-CN.json",
  "importName": "i18n",
  "importPath": "@/i18n"
}"#;
    let test = CliTest::with_file(".hanexrc.json", config)?;
    test.write_file("src/App.vue", "<template>\n  <p>你好</p>\n</template>\n")?;

    let output = test.extract_command().arg("--apply").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr.contains("prettier not found"));
    assert_eq!(
        test.read_file("src/App.vue")?,
        format!(
            "<template>\n  <p>{{{{ $t('{}') }}}}</p>\n</template>\n",
            key_for("你好")
        )
    );

    Ok(())
}
