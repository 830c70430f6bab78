// vim: tw=80
//! Expectations: what invocations are expected, how often, and what they do.

use predicates_tree::CaseTreeExt;
use std::{fmt, rc::Rc};

use crate::{
    action::{Action, InvocationResult, ReturnDefault},
    cardinality::Cardinality,
    error::{Error, Mismatch, MismatchReason},
    invocation::{Invocation, MockObject, TypeInfo, Value},
    matcher::{InvocationMatcher, InvokeCount},
    Predicate
};

/// Anything that can accept invocations and later be verified.
///
/// Implemented by single expectations and by groups of them, so that groups
/// can nest.  `Display` renders the expectation's description.
pub trait Expectation: fmt::Display {
    /// Would this expectation accept `invocation` right now?
    ///
    /// This is a pure query.
    fn matches(&self, invocation: &Invocation) -> bool;

    /// Accept `invocation` and perform the bound action.
    ///
    /// Callers should check [`matches`](Expectation::matches) first.  If
    /// they don't, and the invocation doesn't match, the result is
    /// [`Error::UnexpectedInvocation`].
    fn invoke(&self, invocation: &Invocation) -> InvocationResult;

    /// Has this expectation been invoked often enough?
    fn is_satisfied(&self) -> bool;

    /// Check the invocation count against the expected cardinality.
    fn verify(&self) -> Result<(), Error>;

    /// Append the reasons why `invocation` is not accepted to `report`.
    fn explain_mismatch(&self, invocation: &Invocation,
                        report: &mut Vec<Mismatch>);

    /// Perform `action` when invoked, unless some other action has already
    /// been chosen.
    fn set_default_action(&mut self, action: Rc<dyn Action>);

    fn describe(&self) -> String {
        self.to_string()
    }
}

/// An expectation of a single kind of invocation.
///
/// Each constraint is optional; an unset constraint accepts anything.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let turtle = MockObject::new(0, "turtle");
/// let mut e = InvocationExpectation::new(1);
/// e.set_receiver(turtle.clone())
///     .set_method(MethodName::new("forward"))
///     .add_argument(equal(10i32))
///     .set_action(return_value(true));
/// let inv = Invocation::new(&turtle, "forward").arg(10i32);
/// assert!(e.matches(&inv));
/// e.invoke(&inv).unwrap();
/// assert!(!e.matches(&inv));
/// assert!(e.verify().is_ok());
/// ```
pub struct InvocationExpectation {
    receiver: Option<MockObject>,
    method: Option<Box<dyn Predicate<str>>>,
    parameter_types: Option<Vec<TypeInfo>>,
    arguments: Option<Vec<Box<dyn Predicate<dyn Value>>>>,
    counter: Box<dyn InvocationMatcher>,
    action: Option<Rc<dyn Action>>,
    default_action: Option<Rc<dyn Action>>,
}

impl InvocationExpectation {
    /// An expectation that accepts any invocation, `cardinality` times.
    pub fn new<C: Into<Cardinality>>(cardinality: C) -> Self {
        Self::counted_by(InvokeCount::new(cardinality))
    }

    /// An expectation that accepts any invocation, as often as `counter`
    /// permits.
    pub fn counted_by<M: InvocationMatcher + 'static>(counter: M) -> Self {
        InvocationExpectation {
            receiver: None,
            method: None,
            parameter_types: None,
            arguments: None,
            counter: Box::new(counter),
            action: None,
            default_action: None
        }
    }

    pub fn set_receiver(&mut self, receiver: MockObject) -> &mut Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn set_method<P>(&mut self, method: P) -> &mut Self
        where P: Predicate<str> + 'static
    {
        self.method = Some(Box::new(method));
        self
    }

    pub fn set_parameter_types(&mut self, types: Vec<TypeInfo>) -> &mut Self {
        self.parameter_types = Some(types);
        self
    }

    /// Constrain the next argument.
    ///
    /// Once any argument is constrained, the invocation must have exactly as
    /// many arguments as there are constraints.
    pub fn add_argument<P>(&mut self, predicate: P) -> &mut Self
        where P: Predicate<dyn Value> + 'static
    {
        self.arguments.get_or_insert_with(Vec::new).push(Box::new(predicate));
        self
    }

    /// Only accept invocations without arguments.
    pub fn set_no_arguments(&mut self) -> &mut Self {
        self.arguments = Some(Vec::new());
        self
    }

    pub fn set_action<A: Action + 'static>(&mut self, action: A) -> &mut Self {
        self.action = Some(Rc::new(action));
        self
    }

    pub fn has_action(&self) -> bool {
        self.action.is_some()
    }

    pub fn invocation_count(&self) -> usize {
        self.counter.invocation_count()
    }

    fn arguments_match(&self, invocation: &Invocation) -> bool {
        match &self.arguments {
            None => true,
            Some(predicates) => {
                let args = invocation.arguments();
                predicates.len() == args.len() &&
                    predicates.iter()
                        .zip(args.iter())
                        .all(|(p, a)| p.eval(&**a))
            }
        }
    }
}

impl fmt::Display for InvocationExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut expected = String::new();
        self.counter.describe_expected(&mut expected);
        write!(f, "{}: ", expected)?;
        match &self.receiver {
            Some(receiver) => write!(f, "{}", receiver)?,
            None => f.write_str("<any object>")?
        }
        match &self.method {
            Some(method) => write!(f, ".{}(", method)?,
            None => f.write_str(".<any method>(")?
        }
        match &self.arguments {
            Some(predicates) => {
                for (i, p) in predicates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", p)?;
                }
            },
            None => f.write_str("<any arguments>")?
        }
        f.write_str(")")?;
        let mut status = String::new();
        self.counter.describe_status(&mut status);
        f.write_str(&status)?;
        if let Some(action) = &self.action {
            write!(f, ", {}", action)?;
        }
        Ok(())
    }
}

impl Expectation for InvocationExpectation {
    fn matches(&self, invocation: &Invocation) -> bool {
        self.receiver.as_ref()
            .map_or(true, |r| r == invocation.receiver()) &&
        self.method.as_ref()
            .map_or(true, |m| m.eval(invocation.method())) &&
        self.parameter_types.as_ref()
            .map_or(true, |t| t.as_slice() == invocation.parameter_types()) &&
        self.arguments_match(invocation) &&
        self.counter.matches(invocation)
    }

    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        if !self.matches(invocation) {
            let mut report = Vec::new();
            self.explain_mismatch(invocation, &mut report);
            return Err(Error::unexpected(invocation, report));
        }
        self.counter.invoked(invocation);
        match self.action.as_ref().or(self.default_action.as_ref()) {
            Some(action) => action.invoke(invocation),
            None => ReturnDefault.invoke(invocation)
        }
    }

    fn is_satisfied(&self) -> bool {
        self.counter.is_satisfied()
    }

    fn verify(&self) -> Result<(), Error> {
        if self.counter.is_satisfied() {
            Ok(())
        } else {
            Err(Error::Unsatisfied {
                reason: self.counter.unsatisfied_reason(),
                description: self.to_string()
            })
        }
    }

    fn explain_mismatch(&self, invocation: &Invocation,
                        report: &mut Vec<Mismatch>)
    {
        let mut reasons = Vec::new();
        if let Some(receiver) = &self.receiver {
            if receiver != invocation.receiver() {
                reasons.push(MismatchReason::Receiver {
                    expected: receiver.to_string(),
                    actual: invocation.receiver().to_string()
                });
            }
        }
        if let Some(method) = &self.method {
            if !method.eval(invocation.method()) {
                reasons.push(MismatchReason::Method {
                    expected: method.to_string(),
                    actual: invocation.method().to_string()
                });
            }
        }
        if let Some(types) = &self.parameter_types {
            if types.as_slice() != invocation.parameter_types() {
                reasons.push(MismatchReason::ParameterTypes {
                    expected: types.clone(),
                    actual: invocation.parameter_types().to_vec()
                });
            }
        }
        if let Some(predicates) = &self.arguments {
            let args = invocation.arguments();
            if predicates.len() != args.len() {
                reasons.push(MismatchReason::ArgumentCount {
                    expected: predicates.len(),
                    actual: args.len()
                });
            } else {
                for (index, (p, a)) in predicates.iter()
                    .zip(args.iter())
                    .enumerate()
                {
                    if p.eval(&**a) {
                        continue;
                    }
                    let case = match p.find_case(false, &**a) {
                        Some(case) => case.tree().to_string(),
                        None => p.to_string()
                    };
                    reasons.push(MismatchReason::Argument {
                        index,
                        actual: format!("{:?}", a),
                        case
                    });
                }
            }
        }
        if !self.counter.matches(invocation) {
            reasons.push(MismatchReason::Exhausted(self.counter.describe()));
        }
        report.push(Mismatch::new(self.to_string(), reasons));
    }

    fn set_default_action(&mut self, action: Rc<dyn Action>) {
        if self.default_action.is_none() {
            self.default_action = Some(action);
        }
    }
}
