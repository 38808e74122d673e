use crate::interpreter::value::function::{Arity, Function, LibFn};

/// A library function as listed in a namespace table.
pub struct LibraryDef {
    /// Name the function is installed under.
    pub name:  &'static str,
    /// Accepted argument counts.
    pub arity: Arity,
    /// The implementation.
    pub func:  LibFn,
}

impl LibraryDef {
    /// The callable value for this entry.
    #[must_use]
    pub const fn to_function(&self) -> Function {
        Function::Lib { name:  self.name,
                        arity: self.arity,
                        func:  self.func, }
    }
}

/// Finds the entry called `name` in a namespace table.
#[must_use]
pub fn find(table: &'static [LibraryDef], name: &str) -> Option<&'static LibraryDef> {
    table.iter().find(|def| def.name == name)
}

/// Defines a table of library functions.
///
/// Each entry provides:
/// - a string name,
/// - an arity specification,
/// - a function pointer implementing the function.
///
/// The macro produces a `pub static FUNCTIONS: &[LibraryDef]` for the module
/// it is invoked in.
macro_rules! library_functions {
    (
        $(
            $name:literal => {
                arity: $arity:expr,
                func: $func:expr $(,)?
            }
        ),* $(,)?
    ) => {
        pub static FUNCTIONS: &[$crate::interpreter::evaluator::function::LibraryDef] = &[
            $(
                $crate::interpreter::evaluator::function::LibraryDef {
                    name: $name,
                    arity: $arity,
                    func: $func,
                },
            )*
        ];
    };
}

/// `get` and `set`: member access on maps, arrays and strings.
///
/// Looking up a namespace function on an array, sequence or string produces
/// a bound method.
pub mod access;
/// The `Array` namespace: lazy ranges and sequence operations.
pub mod array;
/// Arithmetic, comparison and logic.
pub mod arithmetic;
/// Installation of the core library scope.
pub mod core;
/// The `File` namespace.
pub mod file;
/// The `IO` namespace.
pub mod io;
/// The `Parse` namespace: splitting command output into structured values.
pub mod parse;
/// Special forms.
///
/// Each receives its arguments unevaluated and decides itself what to
/// evaluate, in which order and in which scope.
pub mod special;
/// The `String` namespace.
pub mod string;
