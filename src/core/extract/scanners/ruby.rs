//! Ruby scanner.
//!
//! A small lexer rather than a full parser: it tracks comments, string
//! literals and embedded documents so that only real calls of the gettext
//! family are picked up, and reads the leading literal arguments of each call.

use std::path::Path;

use super::{CallShape, RawMessage, Scanner, has_extension};
use crate::core::error::{PoError, Result};

const EXTENSIONS: &[&str] = &["rb"];

const TRANSLATORS_PREFIX: &str = "TRANSLATORS:";

#[derive(Debug, Default, Clone, Copy)]
pub struct RubyScanner;

impl RubyScanner {
    /// Scan Ruby code. Shared with the ERB scanner.
    pub(crate) fn scan(path: &Path, source: &str) -> Result<Vec<RawMessage>> {
        Lexer::new(path, source).run()
    }

    fn shape(name: &str) -> Option<CallShape> {
        match name {
            "_" | "N_" | "gettext" | "s_" | "sgettext" => Some(CallShape::Singular),
            "n_" | "Nn_" | "ngettext" | "ns_" | "nsgettext" => Some(CallShape::Plural),
            "p_" | "pgettext" => Some(CallShape::Context),
            "np_" | "npgettext" => Some(CallShape::ContextPlural),
            _ => None,
        }
    }
}

impl Scanner for RubyScanner {
    fn name(&self) -> &str {
        "ruby"
    }

    fn target(&self, path: &Path) -> bool {
        has_extension(path, EXTENSIONS)
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<RawMessage>> {
        Self::scan(path, source)
    }
}

/// A `# TRANSLATORS:` comment block and the line it ends on.
struct Note {
    text: String,
    last_line: usize,
}

struct Lexer<'a> {
    path: &'a Path,
    chars: Vec<char>,
    pos: usize,
    line: usize,
    note: Option<Note>,
    messages: Vec<RawMessage>,
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_ident_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

impl<'a> Lexer<'a> {
    fn new(path: &'a Path, source: &str) -> Self {
        Self {
            path,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            note: None,
            messages: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.chars[self.pos - 1] == '\n'
    }

    fn starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, c)| self.peek_at(i) == Some(c))
    }

    /// Advance to the next newline without consuming it.
    fn skip_line(&mut self) {
        while self.peek().is_some_and(|c| c != '\n') {
            self.pos += 1;
        }
    }

    fn skip_blanks(&mut self, newlines: bool) {
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' || (newlines && c == '\n') {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn unterminated(&self, start_line: usize) -> PoError {
        PoError::Scanner {
            path: self.path.to_path_buf(),
            message: format!("unterminated string starting at line {start_line}"),
        }
    }

    fn run(mut self) -> Result<Vec<RawMessage>> {
        while let Some(c) = self.peek() {
            if self.at_line_start() {
                if self.starts_with("__END__")
                    && matches!(self.peek_at(7), None | Some('\n' | '\r'))
                {
                    break;
                }
                if self.starts_with("=begin") {
                    self.skip_embedded_doc();
                    continue;
                }
            }

            match c {
                '#' => self.read_comment(),
                '"' | '\'' | '`' => {
                    self.read_string(c)?;
                }
                c if c.is_ascii_digit() => {
                    while self.peek().is_some_and(is_ident_char) {
                        self.bump();
                    }
                }
                c if is_ident_start(c) => self.read_identifier()?,
                _ => {
                    self.bump();
                }
            }
        }
        Ok(self.messages)
    }

    fn skip_embedded_doc(&mut self) {
        loop {
            self.skip_line();
            if self.bump().is_none() {
                return;
            }
            if self.starts_with("=end") {
                self.skip_line();
                return;
            }
        }
    }

    fn read_comment(&mut self) {
        let line = self.line;
        self.bump();
        let start = self.pos;
        self.skip_line();
        let text: String = self.chars[start..self.pos].iter().collect();
        let text = text.trim();

        if text.starts_with(TRANSLATORS_PREFIX) {
            self.note = Some(Note {
                text: text.to_string(),
                last_line: line,
            });
        } else if let Some(note) = &mut self.note
            && note.last_line + 1 == line
        {
            note.text.push('\n');
            note.text.push_str(text);
            note.last_line = line;
        }
    }

    fn read_identifier(&mut self) -> Result<()> {
        let line = self.line;
        let receiver = self.pos > 0 && matches!(self.chars[self.pos - 1], '.' | ':' | '$' | '@');

        let mut ident = String::new();
        while let Some(c) = self.peek().filter(|&c| is_ident_char(c)) {
            ident.push(c);
            self.bump();
        }
        // `foo?` and `foo!` are different methods.
        if matches!(self.peek(), Some('?' | '!')) {
            self.bump();
            return Ok(());
        }

        if !receiver
            && let Some(shape) = RubyScanner::shape(&ident)
            && let Some(args) = self.read_call_args()?
            && let Some(message) = shape.build(&args, line)
        {
            self.push(message);
        }
        Ok(())
    }

    fn push(&mut self, mut message: RawMessage) {
        if let Some(note) = &self.note
            && note.last_line + 1 == message.line
        {
            message.extracted_comment = Some(note.text.clone());
        }
        self.messages.push(message);
    }

    /// Leading string-literal arguments of a call, or `None` when the
    /// identifier is not followed by an argument list.
    fn read_call_args(&mut self) -> Result<Option<Vec<String>>> {
        let mut ahead = self.pos;
        while matches!(self.chars.get(ahead), Some(' ' | '\t')) {
            ahead += 1;
        }
        let parenthesized = match self.chars.get(ahead) {
            Some('(') => true,
            Some('"' | '\'') if ahead > self.pos => false,
            _ => return Ok(None),
        };
        self.pos = ahead;
        if parenthesized {
            self.bump();
        }

        let mut args = Vec::new();
        loop {
            self.skip_blanks(parenthesized);
            let Some(quote @ ('"' | '\'')) = self.peek() else {
                break;
            };
            args.push(self.read_string_expr(quote)?);
            self.skip_blanks(parenthesized);
            if self.peek() != Some(',') {
                break;
            }
            self.bump();
            self.skip_blanks(true);
        }
        Ok(Some(args))
    }

    /// A literal followed by adjacent, `+`-joined or `\`-continued literals.
    fn read_string_expr(&mut self, quote: char) -> Result<String> {
        let mut value = self.read_string(quote)?;
        loop {
            let (pos, line) = (self.pos, self.line);
            self.skip_blanks(false);
            match self.peek() {
                Some(q @ ('"' | '\'')) => value.push_str(&self.read_string(q)?),
                Some('\\') if self.peek_at(1) == Some('\n') => {
                    self.bump();
                    self.bump();
                }
                Some('+') => {
                    self.bump();
                    self.skip_blanks(true);
                    match self.peek() {
                        Some(q @ ('"' | '\'')) => value.push_str(&self.read_string(q)?),
                        _ => {
                            (self.pos, self.line) = (pos, line);
                            break;
                        }
                    }
                }
                _ => {
                    (self.pos, self.line) = (pos, line);
                    break;
                }
            }
        }
        Ok(value)
    }

    fn read_string(&mut self, quote: char) -> Result<String> {
        let start_line = self.line;
        self.bump();
        let mut out = String::new();
        loop {
            let c = self.bump().ok_or_else(|| self.unterminated(start_line))?;
            match c {
                c if c == quote => return Ok(out),
                '\\' => {
                    let next = self.bump().ok_or_else(|| self.unterminated(start_line))?;
                    if quote == '\'' {
                        if next != '\\' && next != '\'' {
                            out.push('\\');
                        }
                        out.push(next);
                    } else {
                        self.push_escape(next, &mut out);
                    }
                }
                '#' if quote != '\'' && self.peek() == Some('{') => {
                    out.push('#');
                    self.copy_interpolation(&mut out, start_line)?;
                }
                c => out.push(c),
            }
        }
    }

    fn push_escape(&mut self, escape: char, out: &mut String) {
        let decoded = match escape {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            's' => ' ',
            'e' => '\u{1b}',
            'a' => '\u{7}',
            'b' => '\u{8}',
            'f' => '\u{c}',
            'v' => '\u{b}',
            '\n' => return,
            '0'..='7' => {
                let mut value = escape.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.peek().and_then(|c| c.to_digit(8)) {
                        Some(digit) => {
                            value = value * 8 + digit;
                            self.bump();
                        }
                        None => break,
                    }
                }
                char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            'x' => {
                let value = self.read_hex(2);
                char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            'u' => {
                let value = if self.peek() == Some('{') {
                    self.bump();
                    let value = self.read_hex(6);
                    if self.peek() == Some('}') {
                        self.bump();
                    }
                    value
                } else {
                    self.read_hex(4)
                };
                char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
            }
            other => other,
        };
        out.push(decoded);
    }

    fn read_hex(&mut self, max_digits: usize) -> u32 {
        let mut value = 0;
        for _ in 0..max_digits {
            match self.peek().and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 16 + digit;
                    self.bump();
                }
                None => break,
            }
        }
        value
    }

    /// Copy a `#{...}` interpolation verbatim.
    fn copy_interpolation(&mut self, out: &mut String, start_line: usize) -> Result<()> {
        let mut depth = 0usize;
        loop {
            let c = self.bump().ok_or_else(|| self.unterminated(start_line))?;
            out.push(c);
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(code: &str) -> Vec<RawMessage> {
        RubyScanner::scan(Path::new("test.rb"), code).unwrap()
    }

    fn ids(code: &str) -> Vec<String> {
        scan(code).into_iter().map(|m| m.msgid).collect()
    }

    #[test]
    fn extracts_simple_call() {
        assert_eq!(scan("_(\"Hello\")\n"), vec![RawMessage::new("Hello", 1)]);
    }

    #[test]
    fn extracts_call_shapes() {
        let code = r#"
n_("apple", "apples", n)
p_("Fruit", "Orange")
np_("Fruit", "Peach", "Peaches", 2)
s_("Menu|Open")
"#;
        let messages = scan(code);
        assert_eq!(messages.len(), 4);

        assert_eq!(messages[0].msgid, "apple");
        assert_eq!(messages[0].msgid_plural.as_deref(), Some("apples"));
        assert_eq!(messages[0].line, 2);

        assert_eq!(messages[1].msgctxt.as_deref(), Some("Fruit"));
        assert_eq!(messages[1].msgid, "Orange");

        assert_eq!(messages[2].msgctxt.as_deref(), Some("Fruit"));
        assert_eq!(messages[2].msgid_plural.as_deref(), Some("Peaches"));

        assert_eq!(messages[3].msgid, "Menu|Open");
        assert_eq!(messages[3].msgctxt, None);
    }

    #[test]
    fn extracts_long_names_and_bare_calls() {
        let code = "gettext(\"one\")\nputs _ \"two\"\nngettext('three', 'threes', 3)\n";
        assert_eq!(ids(code), ["one", "two", "three"]);
    }

    #[test]
    fn joins_literal_pieces() {
        let code = "_(\"Hello \" \\\n  \"world\")\n_('a' + 'b' \"c\")\n";
        assert_eq!(ids(code), ["Hello world", "abc"]);
    }

    #[test]
    fn decodes_escapes() {
        let code = r#"_("tab\there\n\x41\101é")
_('it\'s \n')
"#;
        assert_eq!(ids(code), ["tab\there\nAAé", "it's \\n"]);
    }

    #[test]
    fn keeps_interpolation_text() {
        assert_eq!(ids("_(\"Hi #{user.name}\")\n"), ["Hi #{user.name}"]);
    }

    #[test]
    fn ignores_calls_in_comments_strings_and_docs() {
        let code = r#"# _("in comment")
puts "_(\"in string\")"
=begin
_("in doc")
=end
obj._("method")
foo_bar("other")
_(variable)
_("real")
__END__
_("after end")
"#;
        let messages = scan(code);
        assert_eq!(messages, vec![RawMessage::new("real", 9)]);
    }

    #[test]
    fn attaches_translator_comments() {
        let code = "# TRANSLATORS: shown on the\n# login page\n_(\"Sign in\")\n\n_(\"Sign out\")\n";
        let messages = scan(code);
        assert_eq!(
            messages[0].extracted_comment.as_deref(),
            Some("TRANSLATORS: shown on the\nlogin page")
        );
        assert_eq!(messages[1].extracted_comment, None);
    }

    #[test]
    fn counts_lines_across_multiline_literals() {
        let code = "x = \"a\nb\"\n_(\"c\")\n";
        assert_eq!(scan(code), vec![RawMessage::new("c", 3)]);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = RubyScanner::scan(Path::new("bad.rb"), "_(\"oops)\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "bad.rb: unterminated string starting at line 1"
        );
    }
}
