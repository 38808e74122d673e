use crate::{
    ast::Location,
    interpreter::{
        evaluator::{
            core::{EvalResult, Interpreter},
            function::{LibraryDef, array, find, string},
        },
        value::{
            core::{MapKey, Value},
            function::{Arity, BoundMethod, Function},
        },
    },
    util::num::{f64_to_usize_checked, usize_to_f64},
};

library_functions! {
    "get" => { arity: Arity::AtLeast(1), func: get },
    "set" => { arity: Arity::AtLeast(3), func: set },
}

/// `(get obj k1 k2 ...)`: follows each key in turn.
///
/// Any step that finds nothing yields `null`, and so does everything after it.
///
/// # Example
/// ```
/// use lish::get_value;
///
/// let value = get_value(r#"(get {"a" [10 20]} "a" 1)"#).unwrap();
/// assert_eq!(value.to_string(), "20");
/// ```
fn get(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let Some((object, path)) = args.split_first() else {
        return Ok(Value::Nil);
    };
    path.iter()
        .try_fold(object.clone(), |current, key| member(&current, key, location))
}

/// Looks `key` up on `object`.
fn member(object: &Value, key: &Value, location: Location) -> EvalResult<Value> {
    let found = match (object, key) {
        (Value::Map(entries), key) => entries.borrow()
                                             .get(&MapKey::from_value(key, location)?)
                                             .cloned(),
        (Value::Array(items), Value::Number(index)) => f64_to_usize_checked(*index, location).ok()
                                                                       .and_then(|i| items.get(i).cloned()),
        (Value::Array(items), Value::String(name)) => match name.as_str() {
            "length" => Some(Value::Number(usize_to_f64(items.len()))),
            name => name.parse()
                        .ok()
                        .and_then(|index| f64_to_usize_checked(index, location).ok())
                        .and_then(|i| items.get(i).cloned())
                        .or_else(|| bind(object, array::FUNCTIONS, name)),
        },
        (Value::Sequence(_), Value::String(name)) => bind(object, array::FUNCTIONS, name),
        (Value::String(s), Value::String(name)) => match name.as_str() {
            "length" => Some(Value::Number(usize_to_f64(s.chars().count()))),
            name => bind(object, string::FUNCTIONS, name),
        },
        _ => None,
    };
    Ok(found.unwrap_or(Value::Nil))
}

/// Binds the namespace function `name` to `receiver`.
fn bind(receiver: &Value, table: &'static [LibraryDef], name: &str) -> Option<Value> {
    find(table, name).map(|def| {
                         Value::from(Function::Bound(BoundMethod { receiver: receiver.clone(),
                                                                   name:     def.name,
                                                                   arity:    def.arity,
                                                                   method:   def.func, }))
                     })
}

/// `(set obj k1 ... kn value)`: writes `value` under `kn` in the map reached
/// through `k1 ... k(n-1)`, and returns `obj`.
///
/// # Errors
/// `TypeError` if the object or any intermediate member is not a map.
fn set(_: &Interpreter, args: &[Value], location: Location) -> EvalResult<Value> {
    let [object, path @ .., last_key, value] = args else {
        return Ok(Value::Nil);
    };

    let mut target = object.clone();
    for key in path {
        target.as_map(location)?;
        target = member(&target, key, location)?;
    }

    target.as_map(location)?
          .borrow_mut()
          .insert(MapKey::from_value(last_key, location)?, value.clone());

    Ok(object.clone())
}
