use std::{
    cell::RefCell,
    collections::HashMap,
    fmt,
    rc::{Rc, Weak},
};

use crate::interpreter::value::core::Value;

/// A chain of variable bindings.
///
/// Lookups search the scope itself first and then each parent in turn. Writes
/// always go to the scope they are made on, so a child never changes what its
/// parent sees; the one exception is `def`, which writes to the module scope
/// reachable from every scope created below it.
///
/// `Scope` is a cheap handle: clones refer to the same bindings.
#[derive(Clone)]
pub struct Scope(Rc<Frame>);

struct Frame {
    bindings: RefCell<HashMap<String, Value>>,
    parent:   Option<Scope>,
    module:   Weak<Frame>,
}

impl Scope {
    /// Creates a scope with no parent and no module, such as the core library
    /// scope.
    #[must_use]
    pub fn root() -> Self {
        Self(Rc::new(Frame { bindings: RefCell::new(HashMap::new()),
                             parent:   None,
                             module:   Weak::new(), }))
    }

    /// Creates a module scope below `parent`.
    ///
    /// The module scope refers to itself as the module, and every scope
    /// created from it inherits that reference.
    #[must_use]
    pub fn module(parent: &Self) -> Self {
        Self(Rc::new_cyclic(|me| Frame { bindings: RefCell::new(HashMap::new()),
                                         parent:   Some(parent.clone()),
                                         module:   me.clone(), }))
    }

    /// Creates a child scope. The child reads through to `self` and shares its
    /// module scope.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(Frame { bindings: RefCell::new(HashMap::new()),
                             parent:   Some(self.clone()),
                             module:   self.0.module.clone(), }))
    }

    /// Looks a variable up along the chain.
    ///
    /// # Example
    /// ```
    /// use lish::interpreter::{scope::Scope, value::core::Value};
    ///
    /// let root = Scope::root();
    /// root.define_local("x", Value::Number(1.0));
    ///
    /// let child = root.child();
    /// child.define_local("y", Value::Number(2.0));
    ///
    /// assert_eq!(child.get_variable("x"), Some(Value::Number(1.0)));
    /// assert_eq!(root.get_variable("y"), None);
    /// ```
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.0.bindings.borrow().get(name) {
                return Some(value.clone());
            }
            scope = current.0.parent.as_ref();
        }
        None
    }

    /// Binds a variable in this scope, replacing any existing local binding.
    pub fn define_local(&self, name: &str, value: Value) {
        self.0.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Removes the nearest binding of `name`, searching up to and including the
    /// module scope. Bindings above the module (the core library) are never
    /// removed.
    pub fn remove_nearest(&self, name: &str) -> Option<Value> {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if let Some(value) = current.0.bindings.borrow_mut().remove(name) {
                return Some(value);
            }
            if current.is_module() {
                break;
            }
            scope = current.0.parent.as_ref();
        }
        None
    }

    /// The module scope this scope belongs to, if any.
    #[must_use]
    pub fn module_scope(&self) -> Option<Self> {
        self.0.module.upgrade().map(Self)
    }

    /// Whether this scope is a module scope.
    #[must_use]
    pub fn is_module(&self) -> bool {
        std::ptr::eq(self.0.module.as_ptr(), Rc::as_ptr(&self.0))
    }

    /// Names bound directly in this scope, sorted.
    #[must_use]
    pub fn local_names(&self) -> Vec<String> {
        let mut names = self.0.bindings.borrow().keys().cloned().collect::<Vec<_>>();
        names.sort();
        names
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
         .field("names", &self.local_names())
         .field("module", &self.is_module())
         .finish_non_exhaustive()
    }
}
