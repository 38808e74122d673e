use crate::interpreter::{
    evaluator::function::{
        LibraryDef, access, arithmetic, array, file, find, io, parse, special, string,
    },
    scope::Scope,
    value::{
        core::{MapEntries, MapKey, Value},
        function::Function,
    },
};

/// Namespaces installed as maps of library functions, reached through dotted
/// names such as `Array.map`.
pub static NAMESPACES: &[(&str, &[LibraryDef])] = &[("Array", array::FUNCTIONS),
                                                   ("String", string::FUNCTIONS),
                                                   ("Parse", parse::FUNCTIONS),
                                                   ("IO", io::FUNCTIONS),
                                                   ("File", file::FUNCTIONS)];

/// `IO` functions also installed under their bare names.
const TOP_LEVEL_IO: &[&str] = &["echo", "cd", "cwd"];

/// Builds the core library scope.
///
/// The scope holds the special forms, the arithmetic and access functions, and
/// one map per namespace. It has no module scope of its own; sessions evaluate
/// in a module scope created below it.
///
/// # Example
/// ```
/// use lish::interpreter::evaluator::function::core::core_scope;
///
/// let core = core_scope();
/// assert!(core.get_variable("Array").is_some());
/// assert!(core.get_variable("let").is_some());
/// assert!(core.module_scope().is_none());
/// ```
#[must_use]
pub fn core_scope() -> Scope {
    let scope = Scope::root();

    for &(name, func) in special::FORMS {
        scope.define_local(name, Value::from(Function::Macro { name, func }));
    }

    for def in arithmetic::FUNCTIONS.iter().chain(access::FUNCTIONS) {
        scope.define_local(def.name, Value::from(def.to_function()));
    }

    for name in TOP_LEVEL_IO {
        if let Some(def) = find(io::FUNCTIONS, name) {
            scope.define_local(def.name, Value::from(def.to_function()));
        }
    }

    for &(namespace, table) in NAMESPACES {
        scope.define_local(namespace, namespace_map(table));
    }

    tracing::trace!(names = ?scope.local_names(), "core library installed");
    scope
}

/// A map from member name to library function.
fn namespace_map(table: &[LibraryDef]) -> Value {
    let entries = table.iter()
                       .map(|def| (MapKey::from(def.name), Value::from(def.to_function())))
                       .collect::<MapEntries>();
    Value::from(entries)
}
