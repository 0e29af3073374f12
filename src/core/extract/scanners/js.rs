//! JavaScript/TypeScript scanner built on swc.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use swc_common::{FileName, Globals, GLOBALS, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::{BinaryOp, CallExpr, Callee, Expr, Lit};
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};
use swc_ecma_visit::{Visit, VisitWith};

use super::{CallShape, RawMessage, Scanner, has_extension};
use crate::core::error::{PoError, Result};

const EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "mts", "cts"];

/// Prefix that marks a comment as a note for translators.
const TRANSLATORS_PREFIX: &str = "TRANSLATORS:";

#[derive(Debug, Default, Clone, Copy)]
pub struct JsScanner;

impl JsScanner {
    fn shape(name: &str) -> Option<CallShape> {
        match name {
            "_" | "gettext" | "N_" => Some(CallShape::Singular),
            "ngettext" | "n_" => Some(CallShape::Plural),
            "pgettext" | "p_" => Some(CallShape::Context),
            "npgettext" | "np_" => Some(CallShape::ContextPlural),
            _ => None,
        }
    }

    fn syntax(path: &Path) -> Syntax {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "ts" | "mts" | "cts" => Syntax::Typescript(TsSyntax::default()),
            "tsx" => Syntax::Typescript(TsSyntax {
                tsx: true,
                ..Default::default()
            }),
            _ => Syntax::Es(EsSyntax {
                jsx: true,
                ..Default::default()
            }),
        }
    }
}

impl Scanner for JsScanner {
    fn name(&self) -> &str {
        "js"
    }

    fn target(&self, path: &Path) -> bool {
        has_extension(path, EXTENSIONS)
    }

    fn parse(&self, path: &Path, source: &str) -> Result<Vec<RawMessage>> {
        let source_map: Arc<SourceMap> = Default::default();

        GLOBALS.set(&Globals::new(), || {
            let source_file = source_map
                .new_source_file(FileName::Real(path.into()).into(), source.to_string());

            let comments = SingleThreadedComments::default();
            let mut parser = Parser::new(
                Self::syntax(path),
                StringInput::from(&*source_file),
                Some(&comments),
            );
            let module = parser.parse_module().map_err(|e| PoError::Scanner {
                path: path.to_path_buf(),
                message: format!("{:?}", e),
            })?;

            let mut collector = CallCollector {
                source_map: &source_map,
                notes: translator_notes(&comments, &source_map),
                messages: Vec::new(),
            };
            module.visit_with(&mut collector);
            Ok(collector.messages)
        })
    }
}

/// `TRANSLATORS:` comments keyed by the line they end on.
fn translator_notes(
    comments: &SingleThreadedComments,
    source_map: &SourceMap,
) -> BTreeMap<usize, String> {
    let (leading, trailing) = comments.borrow_all();
    leading
        .iter()
        .chain(trailing.iter())
        .flat_map(|(_, cmts)| cmts.iter())
        .filter_map(|cmt| {
            let text = cmt.text.trim();
            text.starts_with(TRANSLATORS_PREFIX).then(|| {
                let line = source_map.lookup_char_pos(cmt.span.hi).line;
                (line, text.to_string())
            })
        })
        .collect()
}

struct CallCollector<'a> {
    source_map: &'a SourceMap,
    notes: BTreeMap<usize, String>,
    messages: Vec<RawMessage>,
}

impl CallCollector<'_> {
    fn string_args(call: &CallExpr) -> Vec<String> {
        call.args
            .iter()
            .map_while(|arg| {
                if arg.spread.is_some() {
                    return None;
                }
                static_string(&arg.expr)
            })
            .collect()
    }
}

impl Visit for CallCollector<'_> {
    fn visit_call_expr(&mut self, node: &CallExpr) {
        if let Callee::Expr(callee) = &node.callee
            && let Expr::Ident(ident) = &**callee
            && let Some(shape) = JsScanner::shape(ident.sym.as_str())
        {
            let line = self.source_map.lookup_char_pos(node.span.lo).line;
            let args = Self::string_args(node);
            if let Some(mut message) = shape.build(&args, line) {
                message.extracted_comment = self
                    .notes
                    .get(&line.saturating_sub(1))
                    .or_else(|| self.notes.get(&line))
                    .cloned();
                self.messages.push(message);
            }
        }
        node.visit_children_with(self);
    }
}

/// Value of a literal string expression: plain strings, template literals
/// without substitutions and `+` concatenations of those.
fn static_string(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Lit(Lit::Str(s)) => s.value.as_str().map(|s| s.to_string()),
        Expr::Tpl(tpl) if tpl.exprs.is_empty() => tpl
            .quasis
            .first()
            .and_then(|q| q.cooked.as_ref())
            .and_then(|s| s.as_str().map(|s| s.to_string())),
        Expr::Paren(paren) => static_string(&paren.expr),
        Expr::Bin(bin) if bin.op == BinaryOp::Add => {
            let mut left = static_string(&bin.left)?;
            left.push_str(&static_string(&bin.right)?);
            Some(left)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scan(name: &str, code: &str) -> Vec<RawMessage> {
        JsScanner.parse(Path::new(name), code).unwrap()
    }

    #[test]
    fn targets_script_extensions() {
        assert!(JsScanner.target(Path::new("app.js")));
        assert!(JsScanner.target(Path::new("view.TSX")));
        assert!(!JsScanner.target(Path::new("app.rb")));
    }

    #[test]
    fn collects_gettext_family() {
        let code = r#"
const a = _("Hello");
const b = ngettext("One file", "%d files", n);
const c = pgettext("menu", "Open");
const d = npgettext("mail", "One message", "%d messages", n);
"#;
        let messages = scan("app.js", code);
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0], RawMessage::new("Hello", 2));
        assert_eq!(messages[1].msgid_plural.as_deref(), Some("%d files"));
        assert_eq!(messages[2].msgctxt.as_deref(), Some("menu"));
        assert_eq!(messages[2].msgid, "Open");
        assert_eq!(messages[3].msgctxt.as_deref(), Some("mail"));
        assert_eq!(messages[3].msgid_plural.as_deref(), Some("%d messages"));
        assert_eq!(messages[3].line, 5);
    }

    #[test]
    fn joins_concatenated_literals() {
        let messages = scan("app.ts", "let s: string = gettext(\"Hello, \" + `world`);\n");
        assert_eq!(messages, vec![RawMessage::new("Hello, world", 1)]);
    }

    #[test]
    fn skips_dynamic_arguments_and_other_callees() {
        let code = "_(name);\nobj._(\"x\");\nt(\"y\");\n";
        assert!(scan("app.js", code).is_empty());
    }

    #[test]
    fn finds_nested_calls() {
        let messages = scan("view.jsx", "render(<p title={_(\"Title\")}>{_(\"Body\")}</p>);\n");
        let ids: Vec<_> = messages.iter().map(|m| m.msgid.as_str()).collect();
        assert_eq!(ids, ["Title", "Body"]);
    }

    #[test]
    fn attaches_translator_comment_from_previous_line() {
        let code = "// TRANSLATORS: greeting on the front page\n_(\"Hi\");\n_(\"Bye\");\n";
        let messages = scan("app.js", code);
        assert_eq!(
            messages[0].extracted_comment.as_deref(),
            Some("TRANSLATORS: greeting on the front page")
        );
        assert_eq!(messages[1].extracted_comment, None);
    }

    #[test]
    fn syntax_error_is_a_scanner_error() {
        let err = JsScanner.parse(Path::new("bad.js"), "_(\"x\"").unwrap_err();
        assert!(matches!(err, PoError::Scanner { .. }));
    }
}
