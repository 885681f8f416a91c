//! Top-level declaration matching for the TypeScript grammar.
//!
//! Recognised shapes: function declarations, `const`/`let`/`var` bound to a
//! function or arrow expression, class methods, and `export function`.
//! Nested functions, destructured bindings, computed method keys and
//! default exports are not indexed.

use tree_sitter::{Node, Tree};

use super::{SymbolKind, SymbolRecord, ANONYMOUS};

const FUNCTION_DECLARATIONS: &[&str] = &["function_declaration", "generator_function_declaration"];

const FUNCTION_EXPRESSIONS: &[&str] = &[
    "arrow_function",
    "function_expression",
    "function",
    "generator_function",
];

/// A top-level statement that may carry function-like symbols.
#[derive(Debug, Clone, Copy)]
enum Declaration<'tree> {
    /// `function foo() {}`
    Function(Node<'tree>),
    /// `const foo = () => {}` or `var foo = function () {}`
    FunctionVariable(Node<'tree>),
    /// `class Foo { bar() {} }`
    Class(Node<'tree>),
    /// `export function foo() {}`
    ExportedFunction {
        statement: Node<'tree>,
        function: Node<'tree>,
    },
}

impl<'tree> Declaration<'tree> {
    fn classify(node: Node<'tree>) -> Option<Self> {
        match node.kind() {
            kind if FUNCTION_DECLARATIONS.contains(&kind) => Some(Self::Function(node)),
            "lexical_declaration" | "variable_declaration" => Some(Self::FunctionVariable(node)),
            "class_declaration" | "abstract_class_declaration" => Some(Self::Class(node)),
            "export_statement" => {
                if is_default_export(node) {
                    return None;
                }
                let function = node.child_by_field_name("declaration")?;
                FUNCTION_DECLARATIONS
                    .contains(&function.kind())
                    .then_some(Self::ExportedFunction {
                        statement: node,
                        function,
                    })
            }
            _ => None,
        }
    }

    fn collect(&self, source: &[u8], symbols: &mut Vec<SymbolRecord>) {
        match *self {
            Self::Function(node) => {
                symbols.push(record(
                    function_name(node, source),
                    SymbolKind::Function,
                    node,
                    None,
                ));
            }
            Self::FunctionVariable(statement) => {
                let mut cursor = statement.walk();
                for declarator in statement.named_children(&mut cursor) {
                    if let Some(name) = function_binding(declarator, source) {
                        symbols.push(record(name, SymbolKind::Variable, statement, None));
                    }
                }
            }
            Self::Class(class) => {
                let Some(body) = class.child_by_field_name("body") else {
                    return;
                };
                let class_name = class
                    .child_by_field_name("name")
                    .map(|n| node_text(n, source));

                let mut cursor = body.walk();
                for member in body.named_children(&mut cursor) {
                    if member.kind() != "method_definition" {
                        continue;
                    }
                    match member.child_by_field_name("name") {
                        Some(key) if key.kind() == "property_identifier" => {
                            symbols.push(record(
                                node_text(key, source),
                                SymbolKind::Method,
                                member,
                                class_name.clone(),
                            ));
                        }
                        _ => {}
                    }
                }
            }
            Self::ExportedFunction {
                statement,
                function,
            } => {
                symbols.push(record(
                    function_name(function, source),
                    SymbolKind::Export,
                    statement,
                    None,
                ));
            }
        }
    }
}

/// Extract function-like symbols from the program's top-level statements,
/// in source order.
pub fn extract(tree: &Tree, source: &[u8]) -> Vec<SymbolRecord> {
    let root = tree.root_node();
    let mut symbols = Vec::new();
    let mut cursor = root.walk();

    for statement in root.named_children(&mut cursor) {
        if let Some(declaration) = Declaration::classify(statement) {
            declaration.collect(source, &mut symbols);
        }
    }

    symbols
}

/// Name bound by a declarator whose initializer is a function, if the
/// binding is a plain identifier.
fn function_binding(declarator: Node, source: &[u8]) -> Option<String> {
    if declarator.kind() != "variable_declarator" {
        return None;
    }
    let name = declarator.child_by_field_name("name")?;
    let value = declarator.child_by_field_name("value")?;

    (name.kind() == "identifier" && FUNCTION_EXPRESSIONS.contains(&value.kind()))
        .then(|| node_text(name, source))
}

// The grammar requires a name on function declarations, and a nameless
// `export function` is a syntax error, so the fallback is not reachable today.
fn function_name(function: Node, source: &[u8]) -> String {
    function
        .child_by_field_name("name")
        .map(|n| node_text(n, source))
        .unwrap_or_else(|| ANONYMOUS.to_string())
}

fn is_default_export(statement: Node) -> bool {
    let mut cursor = statement.walk();
    let found = statement
        .children(&mut cursor)
        .any(|child| child.kind() == "default");
    found
}

fn record(name: String, kind: SymbolKind, span: Node, parent: Option<String>) -> SymbolRecord {
    SymbolRecord {
        name,
        kind,
        start_offset: span.start_byte(),
        end_offset: span.end_byte(),
        parent,
    }
}

fn node_text(node: Node, source: &[u8]) -> String {
    source
        .get(node.start_byte()..node.end_byte())
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
        .unwrap_or_default()
}
