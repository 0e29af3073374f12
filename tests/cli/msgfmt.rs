use anyhow::Result;
use serde_json::{Value, json};

use crate::{CliTest, stderr, stdout};

const JA_PO: &str = r#"msgid ""
msgstr ""
"Content-Type: text/plain; charset=UTF-8\n"

msgid "Hello"
msgstr "こんにちは"

#, fuzzy
msgid "World"
msgstr "世界"

msgctxt "menu"
msgid "Open"
msgstr ""

msgid "file"
msgid_plural "files"
msgstr[0] "ファイル"
msgstr[1] "ファイル"

#~ msgid "Old"
#~ msgstr "古い"
"#;

#[test]
fn test_compile_ignores_fuzzy_by_default() -> Result<()> {
    let test = CliTest::with_file("po/ja.po", JA_PO)?;

    let output = test
        .msgfmt_command()
        .args(["po/ja.po", "-o", "ja.json"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stderr(&output),
        "Warning: fuzzy message was ignored.\n  po/ja.po: msgid 'World'\n"
    );
    assert_eq!(
        stdout(&output),
        "✓ 2 translated messages, 2 untranslated\nwarning: 1 fuzzy entry\n"
    );

    let table: Value = serde_json::from_str(&test.read_file("ja.json")?)?;
    assert_eq!(
        table,
        json!({
            "": "Content-Type: text/plain; charset=UTF-8\n",
            "Hello": "こんにちは",
            "World": null,
            "menu\u{4}Open": null,
            "file\u{0}files": "ファイル\u{0}ファイル",
        })
    );

    Ok(())
}

#[test]
fn test_compile_use_fuzzy_without_warnings() -> Result<()> {
    let test = CliTest::with_file("po/ja.po", JA_PO)?;

    let output = test
        .msgfmt_command()
        .args(["po/ja.po", "--use-fuzzy", "--no-warnings"])
        .output()?;

    assert!(output.status.success());
    let table: Value = serde_json::from_str(&stdout(&output))?;
    assert_eq!(table["World"], "世界");
    assert_eq!(
        stderr(&output),
        "✓ 3 translated messages, 1 untranslated\n"
    );

    Ok(())
}

#[test]
fn test_config_can_keep_fuzzy() -> Result<()> {
    let test = CliTest::with_file("po/ja.po", JA_PO)?;
    test.write_file(".potkitrc.json", r#"{ "ignoreFuzzy": false }"#)?;

    let output = test.msgfmt_command().arg("po/ja.po").output()?;

    assert!(output.status.success());
    assert!(stderr(&output).starts_with(
        "Warning: fuzzy message was used.\n  po/ja.po: msgid 'World'\n"
    ));

    Ok(())
}

#[test]
fn test_duplicate_message_is_an_error() -> Result<()> {
    let test = CliTest::with_file(
        "po/dup.po",
        "msgid \"a\"\nmsgstr \"1\"\n\nmsgid \"a\"\nmsgstr \"2\"\n",
    )?;

    let output = test.msgfmt_command().arg("po/dup.po").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("po/dup.po:4: duplicate message definition"));
    assert!(stdout(&output).is_empty());

    Ok(())
}
