// vim: tw=80
//! The boundary between mock objects and the expectation engine.

use std::{cell::RefCell, rc::Rc};
use tracing::{debug, trace, warn};

use crate::{
    action::{Action, InvocationResult},
    builder::ExpectationGroupBuilder,
    error::Error,
    expectation::Expectation,
    group::ExpectationGroup,
    invocation::{Invocation, MockObject, TypeInfo, Value}
};

/// Accepts the invocations intercepted by mock objects.
///
/// A mock object converts each call made on it into an [`Invocation`],
/// dispatches it, and converts the result back into the method's return
/// type.
pub trait Dispatch {
    fn dispatch(&self, invocation: Invocation) -> InvocationResult;
}

/// The context of a single test.
///
/// It names mock objects, owns their expectations, dispatches invocations to
/// the expectations and finally verifies them.
///
/// # Examples
/// ```
/// # use mockset::*;
/// struct MockTurtle<'a> {
///     mockery: &'a Mockery,
///     object: MockObject
/// }
///
/// impl<'a> MockTurtle<'a> {
///     fn heading(&self) -> u32 {
///         let invocation = Invocation::new(&self.object, "heading")
///             .returns(ReturnType::of::<u32>());
///         self.mockery.dispatch_as::<u32>(invocation).unwrap_or_default()
///     }
/// }
///
/// let mockery = Mockery::new();
/// let turtle = MockTurtle {
///     mockery: &mockery,
///     object: mockery.mock("turtle").unwrap()
/// };
/// let mut builder = ExpectationGroupBuilder::new();
/// builder.one().of(&turtle.object).method("heading")
///     .will(return_value(90u32));
/// mockery.checking(builder).unwrap();
///
/// assert_eq!(90, turtle.heading());
/// mockery.assert_is_satisfied();
/// ```
#[derive(Default)]
pub struct Mockery {
    expectations: RefCell<ExpectationGroup>,
    names: RefCell<Vec<Rc<str>>>,
    default_action: RefCell<Option<Rc<dyn Action>>>,
    /// The first engine error reported to any mock object
    first_error: RefCell<Option<Error>>,
}

impl Mockery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new mock object identity.
    ///
    /// Every mock object of a `Mockery` must have a distinct name.
    pub fn mock<S: Into<Rc<str>>>(&self, name: S) -> Result<MockObject, Error>
    {
        let name = name.into();
        let mut names = self.names.borrow_mut();
        if names.contains(&name) {
            warn!(%name, "Duplicate mock object name");
            return Err(Error::Malformed(format!(
                "a mock object named {} already exists", name)));
        }
        let object = MockObject::new(names.len(), name.clone());
        names.push(name);
        Ok(object)
    }

    /// What expectations registered from now on do if they weren't told to do
    /// anything else.
    ///
    /// Defaults set on the builders take precedence.
    pub fn set_default_action<A: Action + 'static>(&self, action: A) {
        *self.default_action.borrow_mut() = Some(Rc::new(action));
    }

    /// Register the expectations specified by `builder`.
    pub fn checking(&self, builder: ExpectationGroupBuilder)
        -> Result<(), Error>
    {
        let mut group = builder.to_expectation()?;
        if let Some(action) = self.default_action.borrow().clone() {
            group.set_default_action(action);
        }
        let mut expectations = self.expectations.try_borrow_mut()
            .map_err(|_| Error::Malformed("cannot add expectations while an \
                invocation is being dispatched".to_string()))?;
        expectations.add(group);
        Ok(())
    }

    /// Dispatch `invocation` and downcast the result to `T`.
    pub fn dispatch_as<T: Value + Clone>(&self, invocation: Invocation)
        -> Result<T, Error>
    {
        let value = self.dispatch(invocation)?;
        match (*value).downcast_ref::<T>() {
            Ok(v) => Ok(v.clone()),
            Err(_) => Err(Error::ReturnType {
                expected: TypeInfo::of::<T>(),
                actual: (*value).value_type()
            })
        }
    }

    /// Check that every registered expectation has been satisfied.
    ///
    /// If any invocation was unexpected, that is reported first, even if the
    /// code under test ignored the error.
    pub fn verify(&self) -> Result<(), Error> {
        if let Some(e) = self.first_error.borrow().clone() {
            debug!(%e, "Verification failed");
            return Err(e);
        }
        let expectations = self.expectations.try_borrow()
            .map_err(|_| Error::Malformed("cannot verify while expectations \
                are being modified".to_string()))?;
        expectations.verify().map_err(|e| {
            debug!(%e, "Verification failed");
            e
        })
    }

    /// Like [`verify`](Mockery::verify), but panic on failure.
    ///
    /// # Panics
    ///
    /// If any expectation is unsatisfied or any invocation was unexpected.
    pub fn assert_is_satisfied(&self) {
        if let Err(e) = self.verify() {
            panic!("{}", e);
        }
    }

    /// Verify all expectations, then forget them.
    ///
    /// Mock objects remain valid and new expectations may be registered
    /// afterwards.  The expectations are forgotten even if verification
    /// fails.
    pub fn checkpoint(&self) -> Result<(), Error> {
        let result = self.verify();
        let mut expectations = self.expectations.try_borrow_mut()
            .map_err(|_| Error::Malformed("cannot checkpoint while an \
                invocation is being dispatched".to_string()))?;
        expectations.clear();
        *self.first_error.borrow_mut() = None;
        result
    }

    fn record(&self, error: &Error) {
        let mut first_error = self.first_error.borrow_mut();
        if first_error.is_none() {
            *first_error = Some(error.clone());
        }
    }
}

impl Dispatch for Mockery {
    fn dispatch(&self, invocation: Invocation) -> InvocationResult {
        trace!(%invocation, "Dispatching");
        let result = match self.expectations.try_borrow() {
            Ok(expectations) if expectations.matches(&invocation) =>
                expectations.invoke(&invocation),
            Ok(expectations) => {
                let mut report = Vec::new();
                expectations.explain_mismatch(&invocation, &mut report);
                Err(Error::unexpected(&invocation, report))
            },
            Err(_) => Err(Error::Malformed("cannot dispatch while expectations \
                are being modified".to_string()))
        };
        let result = result.and_then(|value| {
            let expected = invocation.return_type().info();
            let actual = (*value).value_type();
            if expected == actual {
                Ok(value)
            } else {
                Err(Error::ReturnType{expected, actual})
            }
        });
        if let Err(e) = &result {
            if !e.is_thrown() {
                debug!(%e, "Invocation failed");
                self.record(e);
            }
        }
        result
    }
}
