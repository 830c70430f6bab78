// vim: tw=80
//! What an expectation does when it is invoked.
//!
//! Actions are shared as `Rc<dyn Action>`, so one default action can be
//! inherited by many expectations.  Stateful actions keep their state behind
//! interior mutability.

use std::{
    cell::{Cell, RefCell},
    error,
    fmt,
    rc::Rc
};

use crate::{
    error::{Error, Thrown},
    invocation::{Invocation, Value}
};

/// The outcome of invoking an expectation: either a returned value or a
/// failure.
pub type InvocationResult = Result<Rc<dyn Value>, Error>;

/// Computes or simulates the result of an invocation.
///
/// The `Display` impl is a short description, like "returns 42", that is
/// used in expectation descriptions.
pub trait Action: fmt::Display {
    fn invoke(&self, invocation: &Invocation) -> InvocationResult;
}

impl<A: Action + ?Sized> Action for Rc<A> {
    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        (**self).invoke(invocation)
    }
}

impl<A: Action + ?Sized> Action for Box<A> {
    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        (**self).invoke(invocation)
    }
}

/// Returns the same value every time.
///
/// Every invocation yields a handle to the very same object.
#[derive(Clone, Debug)]
pub struct ReturnValue(Rc<dyn Value>);

impl ReturnValue {
    pub fn new<T: Value>(value: T) -> Self {
        ReturnValue(Rc::new(value))
    }

    /// Return an already shared value.
    pub fn shared(value: Rc<dyn Value>) -> Self {
        ReturnValue(value)
    }
}

impl fmt::Display for ReturnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "returns {:?}", self.0)
    }
}

impl Action for ReturnValue {
    fn invoke(&self, _invocation: &Invocation) -> InvocationResult {
        Ok(self.0.clone())
    }
}

/// Fails with the same error object every time.
#[derive(Clone)]
pub struct Throw(Rc<dyn error::Error>);

impl Throw {
    pub fn new<E: error::Error + 'static>(error: E) -> Self {
        Throw(Rc::new(error))
    }

    pub fn shared(error: Rc<dyn error::Error>) -> Self {
        Throw(error)
    }
}

impl fmt::Debug for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Throw").field(&self.0).finish()
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "throws {}", self.0)
    }
}

impl Action for Throw {
    fn invoke(&self, _invocation: &Invocation) -> InvocationResult {
        Err(Error::Thrown(Thrown::new(self.0.clone())))
    }
}

fn join(actions: &[Rc<dyn Action>]) -> String {
    actions.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Performs a different action on each consecutive invocation.
///
/// Once the list is exhausted, the last action is repeated forever.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let turtle = MockObject::new(0, "turtle");
/// let invocation = Invocation::new(&turtle, "heading")
///     .returns(ReturnType::of::<u32>());
/// let seq = on_consecutive_calls(actions![
///     return_value(1u32),
///     return_value(2u32)
/// ]);
/// let mut results = Vec::new();
/// for _ in 0..3 {
///     let r = seq.invoke(&invocation).unwrap();
///     results.push(*r.downcast_ref::<u32>().unwrap());
/// }
/// assert_eq!(vec![1, 2, 2], results);
/// ```
pub struct ActionSequence {
    actions: Vec<Rc<dyn Action>>,
    cursor: Cell<usize>
}

impl ActionSequence {
    pub fn new(actions: Vec<Rc<dyn Action>>) -> Self {
        ActionSequence{actions, cursor: Cell::new(0)}
    }
}

impl fmt::Display for ActionSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "calls these actions in order: {}", join(&self.actions))
    }
}

impl Action for ActionSequence {
    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        let last = match self.actions.len().checked_sub(1) {
            Some(last) => last,
            None => return Err(Error::Malformed(
                "a sequence of actions must not be empty".to_string()))
        };
        let i = self.cursor.get().min(last);
        self.cursor.set((i + 1).min(last));
        self.actions[i].invoke(invocation)
    }
}

/// Performs every action in order and returns the result of the last one.
///
/// If any action fails, the remaining actions are skipped and the failure is
/// returned.  With no actions at all, it returns the default value of the
/// declared return type.
pub struct DoAll(Vec<Rc<dyn Action>>);

impl DoAll {
    pub fn new(actions: Vec<Rc<dyn Action>>) -> Self {
        DoAll(actions)
    }
}

impl fmt::Display for DoAll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "does all of: {}", join(&self.0))
    }
}

impl Action for DoAll {
    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        let mut result = None;
        for action in self.0.iter() {
            result = Some(action.invoke(invocation)?);
        }
        match result {
            Some(value) => Ok(value),
            None => ReturnDefault.invoke(invocation)
        }
    }
}

/// Returns the default value of the invocation's declared return type.
///
/// This is what an expectation does if it was never told to do anything
/// else.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnDefault;

impl fmt::Display for ReturnDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("returns a default value")
    }
}

impl Action for ReturnDefault {
    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        let return_type = invocation.return_type();
        return_type.default_value()
            .ok_or(Error::NoDefaultValue{return_type: return_type.info()})
    }
}

/// Computes the result with a closure.
///
/// The closure may not invoke the same action recursively.
pub struct Returning<F> {
    func: RefCell<F>
}

impl<F> Returning<F>
    where F: FnMut(&Invocation) -> InvocationResult
{
    pub fn new(func: F) -> Self {
        Returning{func: RefCell::new(func)}
    }
}

impl<F> fmt::Display for Returning<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("calls a custom function")
    }
}

impl<F> Action for Returning<F>
    where F: FnMut(&Invocation) -> InvocationResult
{
    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        match self.func.try_borrow_mut() {
            Ok(mut func) => (&mut *func)(invocation),
            Err(_) => Err(Error::Malformed(
                "a custom action was invoked recursively".to_string()))
        }
    }
}

/// Return `value` on every invocation.
pub fn return_value<T: Value>(value: T) -> ReturnValue {
    ReturnValue::new(value)
}

/// Fail with `error` on every invocation.
pub fn throw<E: error::Error + 'static>(error: E) -> Throw {
    Throw::new(error)
}

/// Perform `actions` one after the other on consecutive invocations.
pub fn on_consecutive_calls(actions: Vec<Rc<dyn Action>>) -> ActionSequence {
    ActionSequence::new(actions)
}

/// Perform all of `actions` on every invocation.
pub fn do_all(actions: Vec<Rc<dyn Action>>) -> DoAll {
    DoAll::new(actions)
}

/// Compute each result with `func`.
///
/// # Examples
/// ```
/// # use std::rc::Rc;
/// # use mockset::*;
/// let double = returning(|inv: &Invocation| {
///     let x = inv.argument(0)
///         .and_then(|a| a.downcast_ref::<u32>().ok())
///         .copied()
///         .unwrap_or_default();
///     Ok(Rc::new(2 * x) as Rc<dyn Value>)
/// });
/// let turtle = MockObject::new(0, "turtle");
/// let inv = Invocation::new(&turtle, "scale").arg(21u32);
/// let r = double.invoke(&inv).unwrap();
/// assert_eq!(42, *r.downcast_ref::<u32>().unwrap());
/// ```
pub fn returning<F>(func: F) -> Returning<F>
    where F: FnMut(&Invocation) -> InvocationResult
{
    Returning::new(func)
}

/// Collect actions of different types into a list for
/// [`on_consecutive_calls`] or [`do_all`].
///
/// # Examples
/// ```
/// # use mockset::*;
/// let all = do_all(actions![return_value(1u32), return_value("x")]);
/// assert_eq!("does all of: returns 1, returns \"x\"", all.to_string());
/// ```
#[macro_export]
macro_rules! actions {
    ($($action:expr),* $(,)?) => {
        vec![
            $(
                ::std::rc::Rc::new($action)
                    as ::std::rc::Rc<dyn $crate::Action>
            ),*
        ]
    }
}
