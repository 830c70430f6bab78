// vim: tw=80
//! Fluent specification of expectation groups.
//!
//! An [`ExpectationGroupBuilder`] holds at most one open expectation.  Each
//! cardinality method (`one`, `exactly`, `allowing`, ...) closes the open
//! expectation and opens a new one; the other methods refine the open
//! expectation.  Mistakes are recorded where they happen and reported by
//! [`ExpectationGroupBuilder::to_expectation`].
//!
//! # Examples
//! ```
//! # use mockset::*;
//! let turtle = MockObject::new(0, "turtle");
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.one().of(&turtle).method("penDown");
//! builder.exactly(2).of(&turtle).method("forward").with(equal(10i32));
//! builder.allowing().of(&turtle).method("heading")
//!     .will(return_value(90u32));
//! let group = builder.to_expectation().unwrap();
//! assert_eq!(3, group.len());
//! ```

use std::rc::Rc;
use tracing::warn;

use crate::{
    action::Action,
    cardinality::Cardinality,
    error::Error,
    expectation::{Expectation, InvocationExpectation},
    group::{ExpectationGroup, Order},
    invocation::{MockObject, TypeInfo, Value},
    matcher::{InvocationMatcher, InvokeCount, InvokeOnce, MethodName},
    Predicate
};

const NO_EXPECTATION: &str = "no expectation was specified; use exactly, \
    at_least, at_most, between, one, allowing, ignoring or never first";

/// An expectation that is still being specified
struct OpenExpectation {
    expectation: InvocationExpectation,
    has_receiver: bool,
    has_method: bool,
}

impl OpenExpectation {
    fn new<M: InvocationMatcher + 'static>(counter: M) -> Self {
        OpenExpectation {
            expectation: InvocationExpectation::counted_by(counter),
            has_receiver: false,
            has_method: false
        }
    }

    fn is_complete(&self) -> bool {
        self.has_receiver && self.has_method
    }
}

enum Element {
    Invocation(InvocationExpectation),
    Group(ExpectationGroupBuilder),
}

/// Accumulates expectations into an [`ExpectationGroup`].
#[derive(Default)]
pub struct ExpectationGroupBuilder {
    order: Order,
    elements: Vec<Element>,
    current: Option<OpenExpectation>,
    default_action: Option<Rc<dyn Action>>,
    /// The first mistake made while specifying
    error: Option<Error>,
}

impl ExpectationGroupBuilder {
    /// Build an unordered group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a group whose members must be invoked in order.
    pub fn in_sequence() -> Self {
        ExpectationGroupBuilder{order: Order::InSequence, .. Self::default()}
    }

    fn fail(&mut self, message: String) {
        warn!(%message, "Malformed expectation");
        if self.error.is_none() {
            self.error = Some(Error::Malformed(message));
        }
    }

    /// Validate and store the open expectation, if any.
    fn close(&mut self) {
        if let Some(open) = self.current.take() {
            if open.is_complete() {
                self.elements.push(Element::Invocation(open.expectation));
            } else {
                self.fail(format!("expectation was not fully specified: {}",
                    open.expectation));
            }
        }
    }

    fn open<M: InvocationMatcher + 'static>(&mut self, counter: M)
        -> &mut Self
    {
        self.close();
        self.current = Some(OpenExpectation::new(counter));
        self
    }

    fn open_counted<C: Into<Cardinality>>(&mut self, cardinality: C)
        -> &mut Self
    {
        self.open(InvokeCount::new(cardinality))
    }

    /// Refine the open expectation with `f`, or record a mistake if there
    /// is none.
    fn specify<F>(&mut self, f: F) -> &mut Self
        where F: FnOnce(&mut OpenExpectation)
    {
        if let Some(open) = self.current.as_mut() {
            f(open);
            return self;
        }
        self.fail(NO_EXPECTATION.to_string());
        self
    }

    /// Expect exactly `n` invocations.
    pub fn exactly(&mut self, n: usize) -> &mut Self {
        self.open_counted(Cardinality::exactly(n))
    }

    pub fn at_least(&mut self, n: usize) -> &mut Self {
        self.open_counted(Cardinality::at_least(n))
    }

    pub fn at_most(&mut self, n: usize) -> &mut Self {
        self.open_counted(Cardinality::at_most(n))
    }

    /// Expect between `min` and `max` invocations, inclusive.
    pub fn between(&mut self, min: usize, max: usize) -> &mut Self {
        if min > max {
            self.close();
            self.fail(format!(
                "invalid cardinality: lower bound {} exceeds upper bound {}",
                min, max));
            return self;
        }
        self.open_counted(Cardinality::between(min, max))
    }

    /// Expect a single invocation.
    pub fn one(&mut self) -> &mut Self {
        self.open(InvokeOnce::new())
    }

    /// Allow any number of invocations, including none.
    pub fn allowing(&mut self) -> &mut Self {
        self.open_counted(Cardinality::any())
    }

    /// Forbid the invocation.
    pub fn never(&mut self) -> &mut Self {
        self.open_counted(Cardinality::exactly(0))
    }

    /// Allow any invocation of any method of `receiver`.
    ///
    /// Unlike the other cardinality methods, this needs no further
    /// specification.
    pub fn ignoring(&mut self, receiver: &MockObject) -> &mut Self {
        self.allowing().of(receiver);
        if let Some(open) = self.current.as_mut() {
            open.has_method = true;
        }
        self.close();
        self
    }

    /// The mock object on which the invocation is expected.
    ///
    /// # Errors
    ///
    /// Without an open expectation this records [`Error::Malformed`].  The
    /// builder stays usable; the error is returned later by
    /// [`to_expectation`](Self::to_expectation) or
    /// [`Mockery::checking`](crate::Mockery::checking).
    pub fn of(&mut self, receiver: &MockObject) -> &mut Self {
        let receiver = receiver.clone();
        self.specify(|open| {
            open.expectation.set_receiver(receiver);
            open.has_receiver = true;
        })
    }

    /// Expect the method named `name`.
    pub fn method<S: Into<String>>(&mut self, name: S) -> &mut Self {
        self.method_matching(MethodName::new(name))
    }

    /// Expect any method whose name matches `predicate`.
    pub fn method_matching<P>(&mut self, predicate: P) -> &mut Self
        where P: Predicate<str> + 'static
    {
        self.specify(|open| {
            open.expectation.set_method(predicate);
            open.has_method = true;
        })
    }

    pub fn parameter_types(&mut self, types: Vec<TypeInfo>) -> &mut Self {
        self.specify(|open| {
            open.expectation.set_parameter_types(types);
        })
    }

    /// Constrain the next argument of the invocation.
    ///
    /// # Errors
    ///
    /// Without an open expectation this records [`Error::Malformed`].  The
    /// builder stays usable; the error is returned later by
    /// [`to_expectation`](Self::to_expectation) or
    /// [`Mockery::checking`](crate::Mockery::checking).
    pub fn with<P>(&mut self, predicate: P) -> &mut Self
        where P: Predicate<dyn Value> + 'static
    {
        self.specify(|open| {
            open.expectation.add_argument(predicate);
        })
    }

    pub fn with_no_arguments(&mut self) -> &mut Self {
        self.specify(|open| {
            open.expectation.set_no_arguments();
        })
    }

    /// What the invocation should do.
    ///
    /// # Errors
    ///
    /// Without an open expectation this records [`Error::Malformed`].  The
    /// builder stays usable; the error is returned later by
    /// [`to_expectation`](Self::to_expectation) or
    /// [`Mockery::checking`](crate::Mockery::checking).
    pub fn will<A: Action + 'static>(&mut self, action: A) -> &mut Self {
        self.specify(|open| {
            open.expectation.set_action(action);
        })
    }

    /// Add a nested group, such as a sequence.
    pub fn expects(&mut self, group: ExpectationGroupBuilder) -> &mut Self {
        self.close();
        self.elements.push(Element::Group(group));
        self
    }

    /// What every expectation of this group, including nested groups, does
    /// if it wasn't told to do anything else.
    ///
    /// A nested group's own default takes precedence.
    pub fn set_default_action<A>(&mut self, action: A) -> &mut Self
        where A: Action + 'static
    {
        self.default_action = Some(Rc::new(action));
        self
    }

    /// Finish specifying and produce the group.
    ///
    /// Fails with [`Error::Malformed`] if any mistake was made while
    /// specifying, including leaving the last expectation incomplete.
    pub fn to_expectation(mut self) -> Result<ExpectationGroup, Error> {
        self.close();
        if let Some(e) = self.error {
            return Err(e);
        }
        let mut group = ExpectationGroup::with_order(self.order);
        for element in self.elements {
            match element {
                Element::Invocation(e) => group.add(e),
                Element::Group(g) => group.add(g.to_expectation()?)
            }
        }
        if let Some(action) = self.default_action {
            group.set_default_action(action);
        }
        Ok(group)
    }
}
