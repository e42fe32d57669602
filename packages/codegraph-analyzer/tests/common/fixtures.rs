//! Test fixture generators
//!
//! Python sources and `{path → source}` batches.

use std::collections::BTreeMap;

/// Build a batch from (path, source) pairs
pub fn batch(files: &[(&str, &str)]) -> BTreeMap<String, String> {
    files
        .iter()
        .map(|(path, source)| (path.to_string(), source.to_string()))
        .collect()
}

/// `class Foo` with method `bar`, and a module-level `baz` calling both
pub fn fixture_foo_bar_baz() -> &'static str {
    "\
class Foo:
    def bar(self):
        return 1

def baz():
    bar()
    return Foo().bar()
"
}

/// A file that does not parse
pub fn fixture_syntax_error() -> &'static str {
    "def broken(:\n    pass\n"
}

/// Generate a Python file with N functions
pub fn fixture_n_functions(n: usize) -> String {
    (0..n)
        .map(|i| format!("def func_{i}():\n    pass\n"))
        .collect()
}

/// Generate a Python class with methods
pub fn fixture_simple_class(class_name: &str, method_count: usize) -> String {
    let methods: String = (0..method_count)
        .map(|i| format!("    def method_{i}(self):\n        pass\n"))
        .collect();

    format!("class {class_name}:\n{methods}")
}

/// Generate a Python file with imports
pub fn fixture_with_imports(imports: &[&str]) -> String {
    let import_lines: String = imports
        .iter()
        .map(|imp| format!("import {imp}\n"))
        .collect();

    format!("{import_lines}def main():\n    pass\n")
}

/// A batch of `modules` files where each module calls into the previous one
pub fn fixture_call_chain(modules: usize) -> BTreeMap<String, String> {
    (0..modules)
        .map(|i| {
            let body = if i == 0 {
                "    return 0\n".to_string()
            } else {
                format!("    return step_{}() + 1\n", i - 1)
            };
            (
                format!("pkg/mod_{i}.py"),
                format!("import os\n\ndef step_{i}():\n{body}"),
            )
        })
        .collect()
}
