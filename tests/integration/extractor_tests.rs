use anyhow::Result;

use codefetch::extractor::{
    extract_function_by_name, extract_symbols, minimize, parse_source, SymbolKind,
};
use codefetch::Error;

const SAMPLE_TS: &str = include_str!("../fixtures/languages/typescript/sample.ts");

#[test]
fn test_sample_file_symbols() -> Result<()> {
    let parsed = parse_source("sample.ts", SAMPLE_TS)?;
    let symbols = extract_symbols(&parsed);

    let found: Vec<(&str, SymbolKind)> = symbols
        .iter()
        .map(|s| (s.name.as_str(), s.kind))
        .collect();
    assert_eq!(
        found,
        vec![
            ("add", SymbolKind::Function),
            ("multiply", SymbolKind::Variable),
            ("legacy", SymbolKind::Variable),
            ("publicApi", SymbolKind::Export),
            ("increment", SymbolKind::Method),
            ("zero", SymbolKind::Method),
            ("sequence", SymbolKind::Function),
        ]
    );

    Ok(())
}

#[test]
fn test_sample_ranges_slice_verbatim() -> Result<()> {
    let parsed = parse_source("sample.ts", SAMPLE_TS)?;

    for symbol in extract_symbols(&parsed) {
        assert!(symbol.start_offset < symbol.end_offset);
        let text = &SAMPLE_TS[symbol.range()];
        assert!(
            text.contains(&symbol.name),
            "slice for {} does not mention it: {:?}",
            symbol.name,
            text
        );
    }

    let multiply = extract_function_by_name(&parsed, "multiply").expect("multiply is indexed");
    assert_eq!(
        &SAMPLE_TS[multiply],
        "const multiply = (a: number, b: number): number => {\n  return a * b;\n};"
    );

    let increment = extract_function_by_name(&parsed, "increment").expect("increment is indexed");
    assert_eq!(
        &SAMPLE_TS[increment],
        "increment() {\n    this.count += 1;\n    return this.count;\n  }"
    );

    Ok(())
}

#[test]
fn test_unindexed_shapes_are_absent() -> Result<()> {
    let parsed = parse_source("sample.ts", SAMPLE_TS)?;

    for name in ["picked", "helper", "main", "start", "constructor", "Service"] {
        assert_eq!(
            extract_function_by_name(&parsed, name),
            None,
            "{} should not be indexed",
            name
        );
    }

    Ok(())
}

#[test]
fn test_minimized_sample_function() -> Result<()> {
    let parsed = parse_source("sample.ts", SAMPLE_TS)?;
    let range = extract_function_by_name(&parsed, "add").expect("add is indexed");

    assert_eq!(
        minimize(&SAMPLE_TS[range]),
        "function add(a: number, b: number): number {\n...\n}"
    );

    Ok(())
}

#[test]
fn test_syntax_error_is_not_an_empty_result() {
    let result = parse_source("broken.ts", "function ok() {}\nconst = ;\n");
    assert!(matches!(result, Err(Error::Syntax { .. })));
}

#[test]
fn test_javascript_source() -> Result<()> {
    let source = "function legacy(cb) {\n  cb();\n}\nvar handler = function (req, res) {\n  res.end();\n};\n";
    let parsed = parse_source("server.js", source)?;
    let names: Vec<String> = extract_symbols(&parsed).into_iter().map(|s| s.name).collect();

    assert_eq!(names, vec!["legacy", "handler"]);
    Ok(())
}

#[test]
fn test_tsx_component() -> Result<()> {
    let source = "export function Button(props: { label: string }) {\n  return <button>{props.label}</button>;\n}\n";
    let parsed = parse_source("Button.tsx", source)?;
    let symbols = extract_symbols(&parsed);

    assert_eq!(symbols.len(), 1);
    assert_eq!(symbols[0].name, "Button");
    assert_eq!(&source[symbols[0].range()], source.trim_end());
    Ok(())
}
