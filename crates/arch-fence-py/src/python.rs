//! Python language extractor using Tree-sitter.

use arch_fence_core::ImportRef;
use tree_sitter::{Language, Node, Parser};

use crate::extractor::{Extraction, LanguageExtractor, SkipReason};

/// Extracts `import` and `from ... import` references from Python source.
///
/// The whole tree is walked, so imports nested in functions, classes, or
/// `try` / `if` blocks are reported too.
pub struct PythonExtractor {
    language: Language,
}

impl PythonExtractor {
    /// Creates a new Python extractor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn text<'a>(node: &Node<'_>, src: &'a [u8]) -> &'a str {
        node.utf8_text(src).unwrap_or("")
    }

    /// Join the identifier parts of a `dotted_name` node with dots.
    fn dotted_name(node: &Node<'_>, src: &[u8]) -> String {
        let mut parts = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "identifier" {
                parts.push(Self::text(&child, src));
            }
        }
        parts.join(".")
    }

    /// `import a.b, c as d` yields `a.b` and `c`.
    fn extract_import(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportRef>) {
        let line = node.start_position().row + 1;
        let mut cursor = node.walk();
        for name in node.children_by_field_name("name", &mut cursor) {
            let dotted = match name.kind() {
                "aliased_import" => name.child_by_field_name("name"),
                "dotted_name" => Some(name),
                _ => None,
            };
            if let Some(dotted) = dotted {
                out.push(ImportRef::new(line, Self::dotted_name(&dotted, src)));
            }
        }
    }

    /// `from x.y import z` yields `x.y`; `from .x import z` yields `x`;
    /// `from . import z` yields nothing.
    fn extract_from_import(node: &Node<'_>, src: &[u8], out: &mut Vec<ImportRef>) {
        let Some(module) = node.child_by_field_name("module_name") else {
            return;
        };

        let dotted = match module.kind() {
            "dotted_name" => Some(module),
            "relative_import" => {
                let mut cursor = module.walk();
                let found = module
                    .named_children(&mut cursor)
                    .find(|c| c.kind() == "dotted_name");
                found
            }
            _ => None,
        };

        if let Some(dotted) = dotted {
            out.push(ImportRef::new(
                node.start_position().row + 1,
                Self::dotted_name(&dotted, src),
            ));
        }
    }

    fn collect_imports(root: Node<'_>, src: &[u8]) -> Vec<ImportRef> {
        let mut imports = Vec::new();
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            let descend = match node.kind() {
                "import_statement" => {
                    Self::extract_import(&node, src, &mut imports);
                    false
                }
                "import_from_statement" => {
                    Self::extract_from_import(&node, src, &mut imports);
                    false
                }
                "future_import_statement" => {
                    imports.push(ImportRef::new(node.start_position().row + 1, "__future__"));
                    false
                }
                _ => true,
            };

            if descend && cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return imports;
                }
            }
        }
    }

    /// Line of the first error or missing node, in document order.
    fn first_error_line(root: Node<'_>) -> usize {
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            if node.is_error() || node.is_missing() {
                return node.start_position().row + 1;
            }

            if node.has_error() && cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return root.start_position().row + 1;
                }
            }
        }
    }

    /// Line of the first construct the grammar accepts but Python 3 rejects:
    /// Python 2 `print` / `exec` statements and misordered call arguments.
    fn first_rejected_line(root: Node<'_>) -> Option<usize> {
        let mut cursor = root.walk();

        loop {
            let node = cursor.node();
            let rejected = match node.kind() {
                "print_statement" | "exec_statement" => true,
                "argument_list" => Self::misordered_arguments(&node),
                _ => false,
            };
            if rejected {
                return Some(node.start_position().row + 1);
            }

            if cursor.goto_first_child() {
                continue;
            }
            while !cursor.goto_next_sibling() {
                if !cursor.goto_parent() {
                    return None;
                }
            }
        }
    }

    /// Positional after keyword (`f(a=1, 2)`), or any unpacking other than
    /// `**` / keywords after `**` (`f(**kw, *args)`).
    fn misordered_arguments(node: &Node<'_>) -> bool {
        let mut seen_keyword = false;
        let mut seen_double_splat = false;
        let mut cursor = node.walk();

        for arg in node.named_children(&mut cursor) {
            match arg.kind() {
                "keyword_argument" => seen_keyword = true,
                "dictionary_splat" => seen_double_splat = true,
                "comment" => {}
                "list_splat" => {
                    if seen_double_splat {
                        return true;
                    }
                }
                _ => {
                    if seen_keyword || seen_double_splat {
                        return true;
                    }
                }
            }
        }

        false
    }
}

impl Default for PythonExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageExtractor for PythonExtractor {
    fn language_id(&self) -> &'static str {
        "python"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".py"]
    }

    fn extract(&self, source: &str) -> Extraction {
        let mut parser = Parser::new();
        if parser.set_language(&self.language).is_err() {
            return Extraction::Skipped(SkipReason::ParserUnavailable);
        }

        let src = source.as_bytes();
        let Some(tree) = parser.parse(src, None) else {
            return Extraction::Skipped(SkipReason::ParserUnavailable);
        };
        let root = tree.root_node();

        if root.has_error() {
            return Extraction::Skipped(SkipReason::Malformed {
                line: Self::first_error_line(root),
            });
        }
        if let Some(line) = Self::first_rejected_line(root) {
            return Extraction::Skipped(SkipReason::Malformed { line });
        }

        Extraction::Parsed(Self::collect_imports(root, src))
    }
}
