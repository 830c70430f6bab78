// vim: tw=80
//! Matchers for invocations and their arguments.
//!
//! Argument matchers are ordinary [`Predicate`]s from the `predicates` crate.
//! Because arguments travel through the engine as `dyn Value`, a typed
//! predicate must be lifted with [`arg`] before it can match one.
//!
//! Invocation matchers are stateful: they count the invocations that they
//! have accepted and decide when an expectation is exhausted or satisfied.

use predicates::{
    ord::EqPredicate,
    reflection::{Case, PredicateReflection, Product}
};
use std::{cell::Cell, fmt, marker::PhantomData, rc::Rc};

use crate::{
    cardinality::{Cardinality, times},
    error::Error,
    invocation::{Invocation, TypeInfo, Value},
    predicate,
    Predicate
};

/// A stateful matcher that tracks how often an expectation was invoked.
pub trait InvocationMatcher {
    /// May `invocation` be accepted in the current state?
    fn matches(&self, invocation: &Invocation) -> bool;

    /// Record that `invocation` was accepted.
    fn invoked(&self, invocation: &Invocation);

    fn invocation_count(&self) -> usize;

    /// Have enough invocations been recorded?
    fn is_satisfied(&self) -> bool;

    /// Reason phrase for a failed verification
    fn unsatisfied_reason(&self) -> String;

    /// Append what is expected, like "expected once".
    fn describe_expected(&self, out: &mut String);

    /// Append what has happened so far.  Appends nothing before the first
    /// invocation.
    fn describe_status(&self, out: &mut String);

    fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_expected(&mut out);
        self.describe_status(&mut out);
        out
    }

    fn verify(&self) -> Result<(), Error> {
        if self.is_satisfied() {
            Ok(())
        } else {
            Err(Error::Unsatisfied {
                reason: self.unsatisfied_reason(),
                description: self.describe()
            })
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum OnceState {
    NotYetInvoked,
    Invoked
}

/// Matches any invocation, but only once.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let turtle = MockObject::new(0, "turtle");
/// let invocation = Invocation::new(&turtle, "penDown");
/// let once = InvokeOnce::new();
/// assert!(once.matches(&invocation));
/// once.invoked(&invocation);
/// assert!(!once.matches(&invocation));
/// assert_eq!("expected once (has been invoked)", once.describe());
/// ```
#[derive(Debug)]
pub struct InvokeOnce {
    state: Cell<OnceState>
}

impl InvokeOnce {
    pub fn new() -> Self {
        InvokeOnce{state: Cell::new(OnceState::NotYetInvoked)}
    }
}

impl Default for InvokeOnce {
    fn default() -> Self {
        Self::new()
    }
}

impl InvocationMatcher for InvokeOnce {
    fn matches(&self, _invocation: &Invocation) -> bool {
        self.state.get() == OnceState::NotYetInvoked
    }

    fn invoked(&self, _invocation: &Invocation) {
        self.state.set(OnceState::Invoked);
    }

    fn invocation_count(&self) -> usize {
        match self.state.get() {
            OnceState::NotYetInvoked => 0,
            OnceState::Invoked => 1
        }
    }

    fn is_satisfied(&self) -> bool {
        self.state.get() == OnceState::Invoked
    }

    fn unsatisfied_reason(&self) -> String {
        "expected method was not invoked".to_string()
    }

    fn describe_expected(&self, out: &mut String) {
        out.push_str("expected once");
    }

    fn describe_status(&self, out: &mut String) {
        if self.state.get() == OnceState::Invoked {
            out.push_str(" (has been invoked)");
        }
    }
}

/// Counts invocations against a [`Cardinality`].
#[derive(Debug)]
pub struct InvokeCount {
    cardinality: Cardinality,
    count: Cell<usize>
}

impl InvokeCount {
    pub fn new<C: Into<Cardinality>>(cardinality: C) -> Self {
        InvokeCount{cardinality: cardinality.into(), count: Cell::new(0)}
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

impl InvocationMatcher for InvokeCount {
    fn matches(&self, _invocation: &Invocation) -> bool {
        self.cardinality.allows_more_invocations(self.count.get())
    }

    fn invoked(&self, _invocation: &Invocation) {
        self.count.set(self.count.get() + 1);
    }

    fn invocation_count(&self) -> usize {
        self.count.get()
    }

    fn is_satisfied(&self) -> bool {
        self.cardinality.is_satisfied(self.count.get())
    }

    fn unsatisfied_reason(&self) -> String {
        let count = self.count.get();
        let required = self.cardinality.required();
        if count == 0 {
            "expected method was not invoked".to_string()
        } else if count < required {
            format!("expected method was invoked {}, {} fewer than required",
                times(count), required - count)
        } else {
            format!("expected method was invoked {}, more than allowed",
                times(count))
        }
    }

    fn describe_expected(&self, out: &mut String) {
        out.push_str(&self.cardinality.to_string());
    }

    fn describe_status(&self, out: &mut String) {
        let count = self.count.get();
        if count > 0 {
            out.push_str(&format!(" (invoked {})", times(count)));
        }
    }
}

/// Lifts a [`Predicate`] over `T` into a predicate over any argument value.
///
/// Arguments of any other type are rejected.  Created by [`arg`].
pub struct Arg<T, P> {
    predicate: P,
    _type: PhantomData<fn(&T)>
}

/// Match an argument of type `T` with `predicate`.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let p = arg::<u32, _>(predicate::gt(41u32));
/// assert!(p.eval(&42u32 as &dyn Value));
/// assert!(!p.eval(&41u32 as &dyn Value));
/// assert!(!p.eval(&42i64 as &dyn Value));
/// ```
pub fn arg<T, P>(predicate: P) -> Arg<T, P>
    where T: Value, P: Predicate<T>
{
    Arg{predicate, _type: PhantomData}
}

impl<T, P: fmt::Display> fmt::Display for Arg<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.predicate.fmt(f)
    }
}

impl<T, P: Predicate<T>> PredicateReflection for Arg<T, P> {}

impl<T, P> Predicate<dyn Value> for Arg<T, P>
    where T: Value, P: Predicate<T>
{
    fn eval(&self, variable: &dyn Value) -> bool {
        variable.downcast_ref::<T>()
            .map_or(false, |v| self.predicate.eval(v))
    }

    fn find_case<'a>(&'a self, expected: bool, variable: &dyn Value)
        -> Option<Case<'a>>
    {
        match variable.downcast_ref::<T>() {
            Ok(v) => self.predicate.find_case(expected, v)
                .map(|child| Case::new(Some(self), expected).add_child(child)),
            Err(_) if !expected => Some(Case::new(Some(self), false)
                .add_product(Product::new("expected type",
                    TypeInfo::of::<T>().name()))
                .add_product(Product::new("actual type",
                    variable.value_type().name()))),
            Err(_) => None
        }
    }
}

/// Match an argument equal to `value`.
///
/// Shorthand for `arg(predicate::eq(value))` that doesn't need a type
/// annotation.
pub fn equal<T>(value: T) -> Arg<T, EqPredicate<T>>
    where T: Value + PartialEq
{
    arg::<T, _>(predicate::eq(value))
}

/// Matches any argument value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Anything;

/// Match any argument value.
pub fn anything() -> Anything {
    Anything
}

impl fmt::Display for Anything {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("anything")
    }
}

impl PredicateReflection for Anything {}

impl Predicate<dyn Value> for Anything {
    fn eval(&self, _variable: &dyn Value) -> bool {
        true
    }
}

/// Matches any argument of type `T`, whatever its value.
pub struct IsA<T>(PhantomData<fn(&T)>);

/// Match any argument of type `T`.
pub fn a<T: Value>() -> IsA<T> {
    IsA(PhantomData)
}

impl<T> fmt::Display for IsA<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a {}", std::any::type_name::<T>())
    }
}

impl<T> PredicateReflection for IsA<T> {}

impl<T: Value> Predicate<dyn Value> for IsA<T> {
    fn eval(&self, variable: &dyn Value) -> bool {
        variable.value_type().is::<T>()
    }
}

/// Matches the very same shared value, not merely an equal one.
pub struct Same<T>(Rc<T>);

/// Match an argument that is a clone of `value`.
///
/// The argument must be an `Rc<T>` pointing at the same allocation as
/// `value`.
///
/// # Examples
/// ```
/// # use mockset::*;
/// # use std::rc::Rc;
/// let pen = Rc::new(String::from("red"));
/// let p = same(pen.clone());
/// assert!(p.eval(&pen as &dyn Value));
/// assert!(!p.eval(&Rc::new(String::from("red")) as &dyn Value));
/// ```
pub fn same<T: fmt::Debug + 'static>(value: Rc<T>) -> Same<T> {
    Same(value)
}

impl<T: fmt::Debug> fmt::Display for Same<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "same as {:?}", self.0)
    }
}

impl<T: fmt::Debug> PredicateReflection for Same<T> {}

impl<T: fmt::Debug + 'static> Predicate<dyn Value> for Same<T> {
    fn eval(&self, variable: &dyn Value) -> bool {
        variable.downcast_ref::<Rc<T>>()
            .map_or(false, |v| Rc::ptr_eq(v, &self.0))
    }
}

/// Matches a method name exactly.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MethodName(String);

impl MethodName {
    pub fn new<S: Into<String>>(name: S) -> Self {
        MethodName(name.into())
    }
}

impl fmt::Display for MethodName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PredicateReflection for MethodName {}

impl Predicate<str> for MethodName {
    fn eval(&self, variable: &str) -> bool {
        self.0 == variable
    }
}
