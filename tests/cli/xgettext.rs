use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, DATE_FILTER, stderr, stdout};

#[test]
fn test_extract_to_file() -> Result<()> {
    let test = CliTest::with_file("lib/xgettext.rb", "_(\"Hello\")\n")?;

    let output = test
        .xgettext_command()
        .args(["lib/xgettext.rb", "-o", "po/xgettext.pot"])
        .output()?;

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "✓ Extracted 1 message from 1 file into po/xgettext.pot\n"
    );

    let pot = test.read_file("po/xgettext.pot")?;
    insta::with_settings!({ filters => vec![(DATE_FILTER, "[DATE]")] }, {
        assert_snapshot!(pot, @r#"
        # SOME DESCRIPTIVE TITLE.
        # Copyright (C) YEAR THE PACKAGE'S COPYRIGHT HOLDER
        # This file is distributed under the same license as the PACKAGE package.
        # FIRST AUTHOR <EMAIL@ADDRESS>, YEAR.
        #
        #, fuzzy
        msgid ""
        msgstr ""
        "Project-Id-Version: PACKAGE VERSION\n"
        "Report-Msgid-Bugs-To: \n"
        "POT-Creation-Date: [DATE]\n"
        "PO-Revision-Date: [DATE]\n"
        "Last-Translator: FULL NAME <EMAIL@ADDRESS>\n"
        "Language-Team: LANGUAGE <LL@li.org>\n"
        "Language: \n"
        "MIME-Version: 1.0\n"
        "Content-Type: text/plain; charset=UTF-8\n"
        "Content-Transfer-Encoding: 8bit\n"
        "Plural-Forms: nplurals=INTEGER; plural=EXPRESSION;\n"

        #: ../lib/xgettext.rb:1
        msgid "Hello"
        msgstr ""
        "#);
    });

    Ok(())
}

#[test]
fn test_extract_to_stdout() -> Result<()> {
    let test = CliTest::with_file("lib/a.rb", "_(\"Hello\")\n")?;

    let output = test.xgettext_command().arg("lib/a.rb").output()?;

    assert!(output.status.success());
    assert!(stdout(&output).ends_with("#: lib/a.rb:1\nmsgid \"Hello\"\nmsgstr \"\"\n"));
    assert_eq!(
        stderr(&output),
        "✓ Extracted 1 message from 1 file into stdout\n"
    );

    Ok(())
}

#[test]
fn test_consolidates_across_files_and_languages() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("app/models/user.rb", "_(\"Hello\")\n")?;
    test.write_file("app/views/index.html.erb", "<p>\n<%= _(\"Hello\") %>\n</p>\n")?;
    test.write_file(
        "app/assets/app.js",
        "const x = ngettext(\"One item\", \"%d items\", n);\n",
    )?;
    test.write_file("app/README.md", "_(\"ignored\")\n")?;

    let output = test
        .xgettext_command()
        .args(["app", "-o", "po/app.pot"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("po/app.pot")?;
    let body = pot.split_once("\n\n").map(|(_, body)| body).unwrap_or_default();
    assert_snapshot!(body, @r#"
    #: ../app/assets/app.js:1
    msgid "One item"
    msgid_plural "%d items"
    msgstr[0] ""
    msgstr[1] ""

    #: ../app/models/user.rb:1 ../app/views/index.html.erb:2
    msgid "Hello"
    msgstr ""
    "#);

    Ok(())
}

#[test]
fn test_header_from_config_and_flags() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".potkitrc.json",
        r#"{ "packageName": "hello", "packageVersion": "1.0", "msgidBugsAddress": "bugs@example.com" }"#,
    )?;
    test.write_file("lib/a.rb", "_(\"Hi\")\n")?;

    let output = test
        .xgettext_command()
        .args(["lib", "-o", "po/hello.pot", "--package-version", "2.0"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("po/hello.pot")?;
    assert!(pot.contains("\"Project-Id-Version: hello 2.0\\n\"\n"));
    assert!(pot.contains("\"Report-Msgid-Bugs-To: bugs@example.com\\n\"\n"));
    assert!(pot.contains("# This file is distributed under the same license as the hello package.\n"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".potkitrc.json", r#"{ "ignores": ["**/vendor/**"] }"#)?;
    test.write_file("lib/a.rb", "_(\"kept\")\n")?;
    test.write_file("lib/vendor/b.rb", "_(\"skipped\")\n")?;

    let output = test
        .xgettext_command()
        .args(["lib", "-o", "app.pot"])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let pot = test.read_file("app.pot")?;
    assert!(pot.contains("#: lib/a.rb:1\nmsgid \"kept\"\n"));
    assert!(!pot.contains("skipped"));

    Ok(())
}

#[test]
fn test_mixed_source_encodings() -> Result<()> {
    let test = CliTest::new()?;
    let (euc, _, _) = encoding_rs::EUC_JP.encode("# -*- coding: euc-jp -*-\n_(\"わたし\")\n");
    let (sjis, _, _) =
        encoding_rs::SHIFT_JIS.encode("<%#-*- coding: cp932 -*-%>\n<html>\n<%= _(\"ぼく\") %>\n");
    test.write_bytes("lib/euc.rb", &euc)?;
    test.write_bytes("views/sjis.rhtml", &sjis)?;

    let output = test
        .xgettext_command()
        .args([
            "lib/euc.rb",
            "views/sjis.rhtml",
            "-o",
            "po/ja.pot",
            "--output-encoding",
            "euc-jp",
        ])
        .output()?;
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let bytes = test.read_bytes("po/ja.pot")?;
    let (text, _, had_errors) = encoding_rs::EUC_JP.decode(&bytes);
    assert!(!had_errors);
    assert!(text.contains("charset=euc-jp\\n"));
    assert!(text.contains("#: ../lib/euc.rb:2\nmsgid \"わたし\"\n"));
    assert!(text.contains("#: ../views/sjis.rhtml:3\nmsgid \"ぼく\"\n"));

    Ok(())
}

#[test]
fn test_scanner_error_writes_nothing() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/good.rb", "_(\"fine\")\n")?;
    test.write_file("lib/bad.rb", "_(\"broken)\n")?;

    let output = test
        .xgettext_command()
        .args(["lib", "-o", "po/app.pot"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("unterminated string starting at line 1"));
    assert!(!test.root().join("po/app.pot").exists());

    Ok(())
}

#[test]
fn test_invalid_output_encoding() -> Result<()> {
    let test = CliTest::with_file("lib/a.rb", "_(\"x\")\n")?;

    let output = test
        .xgettext_command()
        .args(["lib", "--output-encoding", "klingon"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Invalid output encoding: \"klingon\""));

    Ok(())
}
