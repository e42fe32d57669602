//! Node identity scheme
//!
//! Identities are plain strings so that call resolution can work on them
//! directly (`path:Class:method` ends with `:method`).

/// `path`
#[inline]
pub fn file_id(path: &str) -> String {
    path.to_string()
}

/// `path:ClassName`
#[inline]
pub fn class_id(path: &str, class: &str) -> String {
    format!("{path}:{class}")
}

/// `path:ClassName:methodName`
#[inline]
pub fn method_id(path: &str, class: &str, method: &str) -> String {
    format!("{path}:{class}:{method}")
}

/// `path:functionName`
#[inline]
pub fn function_id(path: &str, function: &str) -> String {
    format!("{path}:{function}")
}

/// `import:<dotted name>`
#[inline]
pub fn import_id(name: &str) -> String {
    format!("import:{name}")
}

/// `path_error`
#[inline]
pub fn error_id(path: &str) -> String {
    format!("{path}_error")
}

/// `ref:<callee>`
#[inline]
pub fn reference_id(callee: &str) -> String {
    format!("ref:{callee}")
}

/// Identity of the lexical context a call site sits in.
///
/// Precedence: class+function > class > function > file.
pub fn context_id(path: &str, class: Option<&str>, function: Option<&str>) -> String {
    match (class, function) {
        (Some(class), Some(function)) => method_id(path, class, function),
        (Some(class), None) => class_id(path, class),
        (None, Some(function)) => function_id(path, function),
        (None, None) => file_id(path),
    }
}
