// vim: tw=80
//! The description of a single intercepted method call.
//!
//! Whatever intercepts calls on a mock object (hand-written code, a proxy
//! generator, ...) converts each call into an [`Invocation`] and hands it to
//! a [`Dispatch`](crate::Dispatch) implementation.

use downcast::{downcast, Any};
use std::{
    any::{self, TypeId},
    fmt,
    hash::{Hash, Hasher},
    rc::Rc
};

/// Any argument or return value that can pass through the engine.
///
/// Implemented for every `'static` type that implements `Debug`.  A
/// `dyn Value` can be downcast back to its concrete type with
/// `downcast_ref`.
pub trait Value: Any + fmt::Debug {
    /// The runtime type of this value
    fn value_type(&self) -> TypeInfo;
}

impl<T: Any + fmt::Debug> Value for T {
    fn value_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }
}

downcast!(dyn Value);

/// Identity of a type, with its name for diagnostics.
///
/// Two `TypeInfo`s are equal iff they describe the same type.
#[derive(Clone, Copy, Debug)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str
}

impl TypeInfo {
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeInfo{id: TypeId::of::<T>(), name: any::type_name::<T>()}
    }

    /// Does this describe type `T`?
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

fn default_value_of<T: Value + Default>() -> Rc<dyn Value> {
    Rc::new(T::default())
}

/// The declared return type of a method.
///
/// Besides the type itself it knows how to produce the type's default value,
/// if there is one.  That is what an expectation without any action returns.
#[derive(Clone, Copy, Debug)]
pub struct ReturnType {
    info: TypeInfo,
    default: Option<fn() -> Rc<dyn Value>>
}

impl ReturnType {
    /// A return type whose default is `T::default()`
    pub fn of<T: Value + Default>() -> Self {
        ReturnType {
            info: TypeInfo::of::<T>(),
            default: Some(default_value_of::<T>)
        }
    }

    /// A return type that has no sensible default value
    pub fn without_default<T: Value>() -> Self {
        ReturnType{info: TypeInfo::of::<T>(), default: None}
    }

    /// The return type of methods that don't return anything
    pub fn unit() -> Self {
        Self::of::<()>()
    }

    /// Create a fresh default value, if the type has one.
    pub fn default_value(&self) -> Option<Rc<dyn Value>> {
        self.default.map(|f| f())
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }
}

impl Default for ReturnType {
    fn default() -> Self {
        ReturnType::unit()
    }
}

/// Identity of a mock object.
///
/// Equality is by id only; the name is for diagnostics.  Normally allocated
/// by [`Mockery::mock`](crate::Mockery::mock).
#[derive(Clone, Debug)]
pub struct MockObject {
    id: usize,
    name: Rc<str>
}

impl MockObject {
    pub fn new<S: Into<Rc<str>>>(id: usize, name: S) -> Self {
        MockObject{id, name: name.into()}
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for MockObject {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for MockObject {}

impl Hash for MockObject {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for MockObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One intercepted call: receiver, method, parameter types, arguments and
/// declared return type.
///
/// There is always exactly one parameter type per argument.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let turtle = MockObject::new(0, "turtle");
/// let invocation = Invocation::new(&turtle, "forward")
///     .arg(10i32)
///     .returns(ReturnType::of::<u32>());
/// assert_eq!("turtle.forward(10)", invocation.to_string());
/// ```
#[derive(Clone, Debug)]
pub struct Invocation {
    receiver: MockObject,
    method: String,
    parameter_types: Vec<TypeInfo>,
    arguments: Vec<Rc<dyn Value>>,
    return_type: ReturnType
}

impl Invocation {
    /// An invocation of `method` on `receiver` with no arguments that
    /// returns `()`.
    pub fn new<S: Into<String>>(receiver: &MockObject, method: S) -> Self {
        Invocation {
            receiver: receiver.clone(),
            method: method.into(),
            parameter_types: Vec::new(),
            arguments: Vec::new(),
            return_type: ReturnType::unit()
        }
    }

    /// Append an argument, with its parameter type.
    pub fn arg<T: Value>(mut self, value: T) -> Self {
        self.parameter_types.push(TypeInfo::of::<T>());
        self.arguments.push(Rc::new(value));
        self
    }

    /// Set the declared return type.
    pub fn returns(mut self, return_type: ReturnType) -> Self {
        self.return_type = return_type;
        self
    }

    pub fn argument(&self, i: usize) -> Option<&dyn Value> {
        self.arguments.get(i).map(|a| &**a)
    }

    pub fn arguments(&self) -> &[Rc<dyn Value>] {
        &self.arguments
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn parameter_types(&self) -> &[TypeInfo] {
        &self.parameter_types
    }

    pub fn receiver(&self) -> &MockObject {
        &self.receiver
    }

    pub fn return_type(&self) -> &ReturnType {
        &self.return_type
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.receiver, self.method)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", arg)?;
        }
        f.write_str(")")
    }
}
