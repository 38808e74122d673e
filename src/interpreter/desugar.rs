/// The pass list and the tree walk shared by every pass.
pub mod core;

/// Reclassifies bare-word call heads as commands.
pub mod command;

/// Rewrites `|`, `|>` and `;` into nested call forms.
pub mod pipe;

/// Rewrites `.field` heads and dotted names into `get`/`set` calls.
pub mod dot_access;

/// Merges nested sequences produced by `;` into one flat `do`.
pub mod flatten;
