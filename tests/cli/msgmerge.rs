use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, stderr, stdout};

const JA_PO: &str = r#"msgid ""
msgstr ""
"Project-Id-Version: hello 1.0\n"
"POT-Creation-Date: 2012-08-01 10:00+0900\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Plural-Forms: nplurals=1; plural=0;\n"

# greeting
#: ../lib/a.rb:1
msgid "Hello"
msgstr "こんにちは"

#: ../lib/a.rb:2
msgid "Gone"
msgstr "消えた"
"#;

const APP_POT: &str = r#"#, fuzzy
msgid ""
msgstr ""
"Project-Id-Version: hello 1.0\n"
"POT-Creation-Date: 2012-08-19 18:10+0900\n"
"Content-Type: text/plain; charset=UTF-8\n"

#: ../lib/a.rb:3
msgid "Hello"
msgstr ""

#: ../lib/b.rb:1
msgid "apple"
msgid_plural "apples"
msgstr[0] ""
msgstr[1] ""
"#;

fn project() -> Result<CliTest> {
    let test = CliTest::new()?;
    test.write_file("po/ja.po", JA_PO)?;
    test.write_file("po/app.pot", APP_POT)?;
    Ok(test)
}

#[test]
fn test_merge_to_file() -> Result<()> {
    let test = project()?;

    let output = test
        .msgmerge_command()
        .args(["po/ja.po", "po/app.pot", "-o", "po/ja.new.po"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Merged hello 1.0: 1 matched, 0 revived, 1 untranslated, 1 obsolete\n"
    );

    assert_snapshot!(test.read_file("po/ja.new.po")?, @r#"
    msgid ""
    msgstr ""
    "Project-Id-Version: hello 1.0\n"
    "POT-Creation-Date: 2012-08-19 18:10+0900\n"
    "Content-Type: text/plain; charset=UTF-8\n"
    "Plural-Forms: nplurals=1; plural=0;\n"

    # greeting
    #: ../lib/a.rb:3
    msgid "Hello"
    msgstr "こんにちは"

    #: ../lib/b.rb:1
    msgid "apple"
    msgid_plural "apples"
    msgstr[0] ""

    #~ msgid "Gone"
    #~ msgstr "消えた"
    "#);

    // Inputs are left alone.
    assert_eq!(test.read_file("po/ja.po")?, JA_PO);

    Ok(())
}

#[test]
fn test_merge_update_in_place() -> Result<()> {
    let test = project()?;

    let output = test
        .msgmerge_command()
        .args(["po/ja.po", "po/app.pot", "--update"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let po = test.read_file("po/ja.po")?;
    assert!(po.contains("#: ../lib/a.rb:3\nmsgid \"Hello\"\nmsgstr \"こんにちは\"\n"));
    assert!(po.contains("#~ msgid \"Gone\"\n"));

    Ok(())
}

#[test]
fn test_merge_to_stdout() -> Result<()> {
    let test = project()?;

    let output = test
        .msgmerge_command()
        .args(["po/ja.po", "po/app.pot"])
        .output()?;

    assert!(output.status.success());
    assert!(stdout(&output).starts_with("msgid \"\"\nmsgstr \"\"\n"));
    assert!(stderr(&output).starts_with("✓ Merged hello 1.0"));

    Ok(())
}

#[test]
fn test_merge_reports_parse_errors() -> Result<()> {
    let test = project()?;
    test.write_file("po/broken.po", "msgid \"a\"\nmsgstr \"b\n")?;

    let output = test
        .msgmerge_command()
        .args(["po/broken.po", "po/app.pot"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("po/broken.po:2: unterminated string"));

    Ok(())
}
