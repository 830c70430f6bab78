// vim: tw=80
//! Everything that can go wrong while matching, invoking or verifying
//! expectations.

use std::{error, fmt, rc::Rc};

use thiserror::Error;

use crate::invocation::{Invocation, TypeInfo};

/// A failure produced on purpose by a [`Throw`](crate::Throw) action.
///
/// It wraps the very error object that the action was configured with.
/// Every invocation of the action yields a handle to the same object, so
/// tests can check identity with [`Thrown::is`].
#[derive(Clone)]
pub struct Thrown(Rc<dyn error::Error>);

impl Thrown {
    pub fn new(error: Rc<dyn error::Error>) -> Self {
        Thrown(error)
    }

    /// Try to view the thrown error as a concrete type.
    pub fn downcast_ref<E>(&self) -> Option<&E>
        where E: error::Error + 'static
    {
        self.0.downcast_ref::<E>()
    }

    pub fn error(&self) -> &Rc<dyn error::Error> {
        &self.0
    }

    /// Is this the very same error object as `other`?
    pub fn is(&self, other: &Rc<dyn error::Error>) -> bool {
        Rc::ptr_eq(&self.0, other)
    }
}

impl fmt::Debug for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Thrown").field(&self.0).finish()
    }
}

impl fmt::Display for Thrown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl error::Error for Thrown {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.0.source()
    }
}

/// One reason why an expectation did not accept an invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MismatchReason {
    /// The call was made on a different mock object
    Receiver { expected: String, actual: String },
    /// The method name was rejected
    Method { expected: String, actual: String },
    ParameterTypes { expected: Vec<TypeInfo>, actual: Vec<TypeInfo> },
    ArgumentCount { expected: usize, actual: usize },
    /// Argument `index` was rejected by its matcher.  `case` is the
    /// rendered case tree of the failing predicate.
    Argument { index: usize, actual: String, case: String },
    /// The expectation has already been invoked as often as allowed
    Exhausted(String),
    /// The expectation is part of a sequence and it isn't its turn
    OutOfOrder(String),
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchReason::Receiver{expected, actual} => write!(f,
                "receiver mismatch: expected {}, but was {}", expected, actual),
            MismatchReason::Method{expected, actual} => write!(f,
                "method name mismatch: expected {}, but was {}", expected,
                actual),
            MismatchReason::ParameterTypes{expected, actual} => write!(f,
                "parameter types mismatch: expected ({}), but was ({})",
                join(expected), join(actual)),
            MismatchReason::ArgumentCount{expected, actual} => write!(f,
                "argument count mismatch: expected {}, but was {}", expected,
                actual),
            MismatchReason::Argument{index, actual, case} => write!(f,
                "argument {} mismatch: {} was rejected by\n{}", index, actual,
                indent(case, "  ")),
            MismatchReason::Exhausted(d) =>
                write!(f, "cardinality exhausted: {}", d),
            MismatchReason::OutOfOrder(d) => write!(f, "out of order: {}", d),
        }
    }
}

/// Why one expectation did not match an invocation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Mismatch {
    /// Description of the rejecting expectation
    pub expectation: String,
    pub reasons: Vec<MismatchReason>,
}

impl Mismatch {
    pub fn new(expectation: String, reasons: Vec<MismatchReason>) -> Self {
        Mismatch{expectation, reasons}
    }
}

/// Per-expectation diagnostics attached to an unexpected invocation.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MismatchReport(pub Vec<Mismatch>);

impl MismatchReport {
    /// All reasons given by all expectations, in registration order.
    pub fn reasons(&self) -> impl Iterator<Item = &MismatchReason> {
        self.0.iter().flat_map(|m| m.reasons.iter())
    }
}

impl fmt::Display for MismatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("no expectations have been registered");
        }
        f.write_str("expectations:")?;
        for mismatch in self.0.iter() {
            write!(f, "\n  - {}", indent(&mismatch.expectation, "    "))?;
            for reason in mismatch.reasons.iter() {
                let reason = reason.to_string();
                write!(f, "\n      {}", indent(&reason, "      "))?;
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Error)]
pub enum Error {
    /// A failure simulated by an action.  This is the intended behavior of
    /// the mock, not an error of the engine.
    #[error(transparent)]
    Thrown(Thrown),

    /// No expectation accepted the invocation
    #[error("unexpected invocation: {invocation}\n{report}")]
    UnexpectedInvocation { invocation: String, report: MismatchReport },

    /// An expectation's cardinality was not satisfied at verification time
    #[error("{reason}: {description}")]
    Unsatisfied { reason: String, description: String },

    /// The test itself is broken: an expectation was specified incorrectly
    #[error("malformed expectation: {0}")]
    Malformed(String),

    #[error("return type mismatch: expected {expected}, \
        but the action returned {actual}")]
    ReturnType { expected: TypeInfo, actual: TypeInfo },

    #[error("no default value is known for return type {return_type}")]
    NoDefaultValue { return_type: TypeInfo },
}

impl Error {
    /// Was this error produced on purpose by a [`Throw`](crate::Throw)
    /// action?
    pub fn is_thrown(&self) -> bool {
        matches!(self, Error::Thrown(_))
    }

    pub(crate) fn unexpected(invocation: &Invocation, mismatches: Vec<Mismatch>)
        -> Self
    {
        Error::UnexpectedInvocation {
            invocation: invocation.to_string(),
            report: MismatchReport(mismatches)
        }
    }

    /// The mismatch report of an unexpected invocation, if this is one.
    pub fn report(&self) -> Option<&MismatchReport> {
        match self {
            Error::UnexpectedInvocation{report, ..} => Some(report),
            _ => None
        }
    }
}

/// Prefix every line of `text` but the first with `prefix`
pub(crate) fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .collect::<Vec<_>>()
        .join(&format!("\n{}", prefix))
}

fn join(types: &[TypeInfo]) -> String {
    types.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod t {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn indent_multiline() {
        assert_eq!("a\n  b\n  c", indent("a\nb\nc", "  "));
    }

    #[test]
    fn indent_single_line() {
        assert_eq!("abc", indent("abc", "    "));
    }

    #[test]
    fn report_display() {
        let report = MismatchReport(vec![
            Mismatch::new("expected once: a.b()".to_string(), vec![
                MismatchReason::ArgumentCount{expected: 0, actual: 1},
                MismatchReason::Exhausted("expected once".to_string())
            ])
        ]);
        assert_eq!("expectations:\n  \
            - expected once: a.b()\n      \
              argument count mismatch: expected 0, but was 1\n      \
              cardinality exhausted: expected once",
            report.to_string());
    }

    #[test]
    fn parameter_types_display() {
        let reason = MismatchReason::ParameterTypes {
            expected: vec![TypeInfo::of::<u8>(), TypeInfo::of::<bool>()],
            actual: vec![]
        };
        assert_eq!(
            "parameter types mismatch: expected (u8, bool), but was ()",
            reason.to_string());
    }
}
