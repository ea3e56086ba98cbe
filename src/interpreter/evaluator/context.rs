use std::{collections::HashMap, fmt::Debug, sync::Arc};

use tracing::debug;

use crate::{
    ast::Tree,
    interpreter::value::{core::Value, undefined::Undefined},
};

/// A host function callable from expressions.
///
/// It receives the evaluated arguments, with multi-values already spread, and
/// answers with a single value. Returning `Undefined` is the way to report a
/// failure.
pub type Function = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// A host object whose members expressions can read and call.
///
/// Properties are read with `:object.name:` and methods are called with
/// `object.name(a b ...)`. Only one level of member access exists.
pub trait Object: Send + Sync {
    /// The property called `name`, if the object has one.
    fn property(&self, name: &str) -> Option<Value>;

    /// The method called `name`, if the object has one.
    fn method(&self, _name: &str) -> Option<Method> {
        None
    }
}

/// A callable member of an [`Object`] with a fixed number of parameters.
///
/// # Example
/// ```
/// use tally::interpreter::{evaluator::context::Method, value::core::Value};
///
/// let double = Method::new(1, |args: &[Value]| &args[0] + &args[0]);
/// assert_eq!(double.call("double", &[Value::from(4)]), Value::from(8));
/// assert!(double.call("double", &[]).is_undefined());
/// ```
#[derive(Clone)]
pub struct Method {
    arity: usize,
    body:  Function,
}

impl Method {
    /// Wraps `body`, which is only ever called with exactly `arity`
    /// arguments.
    pub fn new<F, R>(arity: usize, body: F) -> Self
        where F: Fn(&[Value]) -> R + Send + Sync + 'static,
              R: Into<Value>
    {
        Self { arity,
               body: Arc::new(move |args: &[Value]| -> Value { body(args).into() }) }
    }

    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Calls the method, or answers with `Undefined` when the argument count
    /// does not match the arity. `name` is only used in that message.
    #[must_use]
    pub fn call(&self, name: &str, args: &[Value]) -> Value {
        if args.len() != self.arity {
            return Undefined::new(format!("method '{name}' expects {} argument(s), got {}",
                                          self.arity,
                                          args.len())).into();
        }
        (self.body)(args)
    }
}

impl Debug for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Method").field("arity", &self.arity).finish_non_exhaustive()
    }
}

/// An [`Object`] assembled from a registration table.
///
/// # Example
/// ```
/// use tally::{
///     evaluate,
///     interpreter::{
///         evaluator::context::{Context, Record},
///         value::core::Value,
///     },
/// };
///
/// let account = Record::new().with_property("balance", 120)
///                            .with_method("fee", 1, |args: &[Value]| &args[0] * &Value::from(2));
/// let context = Context::new().with_object("account", account);
///
/// assert_eq!(evaluate(":account.balance: - account.fee(5)", &context), Value::from(110));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    properties: HashMap<String, Value>,
    methods:    HashMap<String, Method>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Registers a method taking exactly `arity` arguments.
    #[must_use]
    pub fn with_method<F, R>(mut self, name: impl Into<String>, arity: usize, body: F) -> Self
        where F: Fn(&[Value]) -> R + Send + Sync + 'static,
              R: Into<Value>
    {
        self.methods.insert(name.into(), Method::new(arity, body));
        self
    }
}

impl Object for Record {
    fn property(&self, name: &str) -> Option<Value> {
        self.properties.get(name).cloned()
    }

    fn method(&self, name: &str) -> Option<Method> {
        self.methods.get(name).cloned()
    }
}

/// The names an expression can resolve: variables, functions and host
/// objects.
///
/// A context is passed to every evaluation and is never modified by it, so
/// one context can serve any number of evaluations, concurrently included.
/// Anything not registered resolves to `Undefined` naming what was missing.
///
/// # Example
/// ```
/// use tally::{evaluate, interpreter::{evaluator::context::Context, value::core::Value}};
///
/// let context = Context::new().with_variable("x", 4)
///                             .with_function("twice", |args: &[Value]| &args[0] * &Value::from(2));
///
/// assert_eq!(evaluate("twice(:x:) + 1", &context), Value::from(9));
/// assert!(evaluate(":y:", &context).is_undefined());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Function>,
    objects:   HashMap<String, Arc<dyn Object>>,
}

impl Context {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a variable, replacing any previous binding of the same name.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Registers a host function. Built-in functions of the same name take
    /// precedence.
    #[must_use]
    pub fn with_function<F, R>(mut self, name: impl Into<String>, function: F) -> Self
        where F: Fn(&[Value]) -> R + Send + Sync + 'static,
              R: Into<Value>
    {
        self.functions.insert(name.into(), Arc::new(move |args: &[Value]| -> Value { function(args).into() }));
        self
    }

    /// Registers a host object.
    #[must_use]
    pub fn with_object(mut self, name: impl Into<String>, object: impl Object + 'static) -> Self {
        self.objects.insert(name.into(), Arc::new(object));
        self
    }

    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    #[must_use]
    pub fn object(&self, name: &str) -> Option<&dyn Object> {
        self.objects.get(name).map(AsRef::as_ref)
    }

    pub(crate) fn resolve_variable(&self, name: &str) -> Value {
        self.variable(name).cloned().unwrap_or_else(|| {
                                       debug!(name, "unknown variable");
                                       Undefined::new(format!("unknown variable '{name}'")).into()
                                   })
    }

    pub(crate) fn resolve_property(&self, object: &str, member: &str) -> Value {
        let target = match self.member_owner(object, member) {
            Ok(target) => target,
            Err(undefined) => return undefined,
        };

        target.property(member).unwrap_or_else(|| {
                                   debug!(object, member, "unknown property");
                                   Undefined::new(format!("object '{object}' has no property '{member}'")).into()
                               })
    }

    pub(crate) fn call_method(&self, object: &str, member: &str, arguments: &[Tree]) -> Value {
        let target = match self.member_owner(object, member) {
            Ok(target) => target,
            Err(undefined) => return undefined,
        };

        let Some(method) = target.method(member) else {
            debug!(object, member, "unknown method");
            return Undefined::new(format!("object '{object}' has no method '{member}'")).into();
        };

        match self.eval_arguments(arguments) {
            Ok(args) => method.call(&format!("{object}.{member}"), &args),
            Err(undefined) => undefined,
        }
    }

    /// Finds the object a member is read from. Only one level of member
    /// access is supported.
    fn member_owner(&self, object: &str, member: &str) -> Result<&dyn Object, Value> {
        if member.contains('.') {
            let message = format!("'{object}.{member}' addresses more than one level of members");
            return Err(Undefined::syntax(message).into());
        }

        self.object(object).ok_or_else(|| {
                               debug!(object, "unknown object");
                               Undefined::new(format!("unknown object '{object}'")).into()
                           })
    }
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut functions: Vec<_> = self.functions.keys().collect();
        let mut objects: Vec<_> = self.objects.keys().collect();
        functions.sort();
        objects.sort();

        f.debug_struct("Context")
         .field("variables", &self.variables)
         .field("functions", &functions)
         .field("objects", &objects)
         .finish()
    }
}
