// vim: tw=80
//! Composite expectations.
//!
//! An [`ExpectationGroup`] holds an ordered list of expectations, which may
//! themselves be groups, and implements the same [`Expectation`] contract as
//! its members.  When several members would accept an invocation, the one
//! that was added first wins.

use std::{cell::Cell, fmt, rc::Rc};
use tracing::trace;

use crate::{
    action::{Action, InvocationResult},
    error::{indent, Error, Mismatch, MismatchReason},
    expectation::Expectation,
    invocation::Invocation
};

/// How the members of a group may be invoked relative to each other.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Order {
    /// Any member may be invoked at any time.
    #[default]
    Unordered,
    /// Members must be invoked in the order in which they were added.  A
    /// member may only be skipped once it is satisfied.
    InSequence,
}

/// An ordered collection of expectations.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let turtle = MockObject::new(0, "turtle");
/// let mut pen_up = InvocationExpectation::new(1);
/// pen_up.set_method(MethodName::new("penUp"));
/// let mut pen_down = InvocationExpectation::new(1);
/// pen_down.set_method(MethodName::new("penDown"));
///
/// let mut group = ExpectationGroup::in_sequence();
/// group.add(pen_down);
/// group.add(pen_up);
/// assert!(!group.matches(&Invocation::new(&turtle, "penUp")));
/// assert!(group.matches(&Invocation::new(&turtle, "penDown")));
/// ```
#[derive(Default)]
pub struct ExpectationGroup {
    order: Order,
    children: Vec<Box<dyn Expectation>>,
    /// For sequences, the index of the most recently invoked member
    position: Cell<usize>,
}

impl ExpectationGroup {
    /// An empty, unordered group
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty group whose members must be invoked in order
    pub fn in_sequence() -> Self {
        Self::with_order(Order::InSequence)
    }

    pub fn with_order(order: Order) -> Self {
        ExpectationGroup{order, .. Self::default()}
    }

    /// Append a member.  Members added earlier take precedence.
    pub fn add<E: Expectation + 'static>(&mut self, expectation: E) {
        self.children.push(Box::new(expectation));
    }

    /// Remove all members.
    pub fn clear(&mut self) {
        self.children.clear();
        self.position.set(0);
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Find the member that should handle `invocation`, if any.
    fn find_match(&self, invocation: &Invocation) -> Option<usize> {
        match self.order {
            Order::Unordered => self.children.iter()
                .position(|child| child.matches(invocation)),
            Order::InSequence => {
                let start = self.position.get();
                for (i, child) in self.children.iter().enumerate().skip(start)
                {
                    if child.matches(invocation) {
                        return Some(i);
                    }
                    if !child.is_satisfied() {
                        break;
                    }
                }
                None
            }
        }
    }

    fn explain_sequence(&self, invocation: &Invocation,
                        report: &mut Vec<Mismatch>)
    {
        let position = self.position.get();
        let mut blocker: Option<&dyn Expectation> = None;
        for (i, child) in self.children.iter().enumerate() {
            let reason = if !child.matches(invocation) {
                None
            } else if i < position {
                Some("the sequence has already moved past it".to_string())
            } else {
                blocker.map(|b| format!("waiting for {}", b.describe()))
            };
            match reason {
                Some(reason) => report.push(Mismatch::new(child.describe(),
                    vec![MismatchReason::OutOfOrder(reason)])),
                None => child.explain_mismatch(invocation, report)
            }
            if i >= position && blocker.is_none() && !child.is_satisfied() {
                blocker = Some(&**child);
            }
        }
    }
}

impl fmt::Display for ExpectationGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.children.is_empty() {
            return f.write_str("no expectations");
        }
        match self.order {
            Order::Unordered => f.write_str("in any order:")?,
            Order::InSequence => f.write_str("in sequence:")?
        }
        for child in self.children.iter() {
            write!(f, "\n  - {}", indent(&child.describe(), "    "))?;
        }
        Ok(())
    }
}

impl Expectation for ExpectationGroup {
    fn matches(&self, invocation: &Invocation) -> bool {
        self.find_match(invocation).is_some()
    }

    fn invoke(&self, invocation: &Invocation) -> InvocationResult {
        match self.find_match(invocation) {
            Some(i) => {
                trace!(index = i, %invocation, "Selected expectation");
                if self.order == Order::InSequence {
                    self.position.set(i);
                }
                self.children[i].invoke(invocation)
            },
            None => {
                let mut report = Vec::new();
                self.explain_mismatch(invocation, &mut report);
                Err(Error::unexpected(invocation, report))
            }
        }
    }

    fn is_satisfied(&self) -> bool {
        self.children.iter().all(|child| child.is_satisfied())
    }

    /// Verify the members in order, stopping at the first failure.
    fn verify(&self) -> Result<(), Error> {
        self.children.iter().try_for_each(|child| child.verify())
    }

    fn explain_mismatch(&self, invocation: &Invocation,
                        report: &mut Vec<Mismatch>)
    {
        match self.order {
            Order::Unordered => {
                for child in self.children.iter() {
                    child.explain_mismatch(invocation, report);
                }
            },
            Order::InSequence => self.explain_sequence(invocation, report)
        }
    }

    fn set_default_action(&mut self, action: Rc<dyn Action>) {
        for child in self.children.iter_mut() {
            child.set_default_action(action.clone());
        }
    }
}
