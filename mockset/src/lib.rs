// vim: tw=80
//! An expectation-matching and verification engine for mock objects.
//!
//! Mockset decides, for every call made on a mock object, which of the test's
//! expectations the call satisfies and what it should return.  At the end of
//! the test it checks that every expectation was invoked as often as
//! required.  It does not generate mock objects itself.  A mock object is any
//! type that turns the calls made on it into [`Invocation`]s and hands them
//! to a [`Dispatch`] implementation, normally a [`Mockery`].
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Return values`](#return-values)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Call counts`](#call-counts)
//! * [`Sequences`](#sequences)
//! * [`Default actions`](#default-actions)
//! * [`Checkpoints`](#checkpoints)
//! * [`Unexpected invocations`](#unexpected-invocations)
//!
//! ## Getting Started
//!
//! A mock object needs an identity, allocated by [`Mockery::mock`], and a way
//! to reach the `Mockery`.  Each of its methods builds an [`Invocation`] and
//! dispatches it.
//!
//! ```
//! use mockset::*;
//!
//! trait Turtle {
//!     fn forward(&self, distance: i32);
//!     fn heading(&self) -> u32;
//! }
//!
//! struct MockTurtle<'a> {
//!     mockery: &'a Mockery,
//!     object: MockObject
//! }
//!
//! impl<'a> Turtle for MockTurtle<'a> {
//!     fn forward(&self, distance: i32) {
//!         let invocation = Invocation::new(&self.object, "forward")
//!             .arg(distance);
//!         self.mockery.dispatch(invocation).unwrap();
//!     }
//!
//!     fn heading(&self) -> u32 {
//!         let invocation = Invocation::new(&self.object, "heading")
//!             .returns(ReturnType::of::<u32>());
//!         self.mockery.dispatch_as::<u32>(invocation).unwrap()
//!     }
//! }
//!
//! fn draw_square(turtle: &dyn Turtle) {
//!     for _ in 0..4 {
//!         turtle.forward(10);
//!     }
//! }
//!
//! let mockery = Mockery::new();
//! let turtle = MockTurtle {
//!     mockery: &mockery,
//!     object: mockery.mock("turtle").unwrap()
//! };
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.exactly(4).of(&turtle.object).method("forward").with(equal(10i32));
//! mockery.checking(builder).unwrap();
//!
//! draw_square(&turtle);
//! mockery.assert_is_satisfied();
//! ```
//!
//! ## Return values
//!
//! What an invocation does is decided by an [`Action`].  Mockset provides
//! [`return_value`], [`throw`], [`on_consecutive_calls`], [`do_all`] and
//! [`returning`].  An expectation without an action returns the default value
//! of the invocation's [`ReturnType`].
//!
//! ```
//! # use mockset::*;
//! let mockery = Mockery::new();
//! let turtle = mockery.mock("turtle").unwrap();
//! let heading = || Invocation::new(&turtle, "heading")
//!     .returns(ReturnType::of::<u32>());
//!
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.exactly(3).of(&turtle).method("heading")
//!     .will(on_consecutive_calls(actions![
//!         return_value(0u32),
//!         return_value(90u32)
//!     ]));
//! mockery.checking(builder).unwrap();
//!
//! assert_eq!(0, mockery.dispatch_as::<u32>(heading()).unwrap());
//! assert_eq!(90, mockery.dispatch_as::<u32>(heading()).unwrap());
//! assert_eq!(90, mockery.dispatch_as::<u32>(heading()).unwrap());
//! ```
//!
//! A [`throw`] action makes the invocation fail with an error of the test's
//! choosing.  It is returned as [`Error::Thrown`], and unlike the engine's
//! own errors it is not reported again by [`Mockery::verify`].
//!
//! ```
//! # use mockset::*;
//! # use std::io;
//! let mockery = Mockery::new();
//! let disk = mockery.mock("disk").unwrap();
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.one().of(&disk).method("flush")
//!     .will(throw(io::Error::from(io::ErrorKind::Other)));
//! mockery.checking(builder).unwrap();
//!
//! let e = mockery.dispatch(Invocation::new(&disk, "flush")).unwrap_err();
//! assert!(e.is_thrown());
//! assert!(mockery.verify().is_ok());
//! ```
//!
//! ## Matching arguments
//!
//! Arguments are matched with [`Predicate`]s from the `predicates` crate.
//! Because arguments travel through the engine as `dyn` [`Value`], a typed
//! predicate must be lifted with [`arg`].  [`equal`], [`same`], [`anything`]
//! and [`a`] cover the common cases.
//!
//! ```
//! # use mockset::*;
//! let mockery = Mockery::new();
//! let turtle = mockery.mock("turtle").unwrap();
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.allowing().of(&turtle).method("turn")
//!     .with(arg::<i32, _>(predicate::in_iter(vec![-90i32, 90])));
//! mockery.checking(builder).unwrap();
//!
//! assert!(mockery.dispatch(Invocation::new(&turtle, "turn").arg(90i32))
//!     .is_ok());
//! assert!(mockery.dispatch(Invocation::new(&turtle, "turn").arg(45i32))
//!     .is_err());
//! ```
//!
//! ## Call counts
//!
//! Every expectation starts with its [`Cardinality`]: [`one`], [`exactly`],
//! [`at_least`], [`at_most`], [`between`], [`allowing`] or [`never`].
//! [`ignoring`] allows any invocation of any method of an object.  Once an
//! expectation has been invoked as often as allowed it no longer matches, so
//! a later expectation for the same method can take over.
//!
//! ```
//! # use mockset::*;
//! let mockery = Mockery::new();
//! let turtle = mockery.mock("turtle").unwrap();
//! let heading = || Invocation::new(&turtle, "heading")
//!     .returns(ReturnType::of::<u32>());
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.one().of(&turtle).method("heading").will(return_value(0u32));
//! builder.allowing().of(&turtle).method("heading").will(return_value(180u32));
//! mockery.checking(builder).unwrap();
//!
//! assert_eq!(0, mockery.dispatch_as::<u32>(heading()).unwrap());
//! assert_eq!(180, mockery.dispatch_as::<u32>(heading()).unwrap());
//! ```
//!
//! ## Sequences
//!
//! By default, the expectations of a group may be invoked in any order.  The
//! members of a group built by [`ExpectationGroupBuilder::in_sequence`] must
//! be invoked in the order that they were specified in.  A member may be
//! skipped once it is satisfied.
//!
//! ```
//! # use mockset::*;
//! let mockery = Mockery::new();
//! let turtle = mockery.mock("turtle").unwrap();
//! let mut seq = ExpectationGroupBuilder::in_sequence();
//! seq.one().of(&turtle).method("penDown");
//! seq.one().of(&turtle).method("penUp");
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.expects(seq);
//! mockery.checking(builder).unwrap();
//!
//! assert!(mockery.dispatch(Invocation::new(&turtle, "penUp")).is_err());
//! ```
//!
//! ## Default actions
//!
//! [`ExpectationGroupBuilder::set_default_action`] and
//! [`Mockery::set_default_action`] choose what expectations do when they were
//! not given an action of their own.  The innermost default wins.
//!
//! ## Checkpoints
//!
//! [`Mockery::checkpoint`] verifies every expectation registered so far and
//! then forgets them, so that new expectations can be registered for the
//! next phase of a test.
//!
//! ```
//! # use mockset::*;
//! let mockery = Mockery::new();
//! let turtle = mockery.mock("turtle").unwrap();
//! let mut builder = ExpectationGroupBuilder::new();
//! builder.exactly(2).of(&turtle).method("penDown");
//! mockery.checking(builder).unwrap();
//!
//! mockery.dispatch(Invocation::new(&turtle, "penDown")).unwrap();
//! assert!(mockery.checkpoint().is_err());
//! // The expectation is gone now
//! assert!(mockery.dispatch(Invocation::new(&turtle, "penDown")).is_err());
//! ```
//!
//! ## Unexpected invocations
//!
//! An invocation that no expectation accepts fails immediately with
//! [`Error::UnexpectedInvocation`].  Its message lists every expectation and
//! why each one rejected the invocation.  Since the code under test may
//! swallow that error, [`Mockery::verify`] reports it again.
//!
//! [`one`]: ExpectationGroupBuilder::one
//! [`exactly`]: ExpectationGroupBuilder::exactly
//! [`at_least`]: ExpectationGroupBuilder::at_least
//! [`at_most`]: ExpectationGroupBuilder::at_most
//! [`between`]: ExpectationGroupBuilder::between
//! [`allowing`]: ExpectationGroupBuilder::allowing
//! [`never`]: ExpectationGroupBuilder::never
//! [`ignoring`]: ExpectationGroupBuilder::ignoring

pub mod action;
pub mod builder;
pub mod cardinality;
pub mod error;
pub mod expectation;
pub mod group;
pub mod invocation;
pub mod matcher;
pub mod mockery;

pub use predicates::prelude::{Predicate, predicate};

pub use action::{
    Action,
    ActionSequence,
    DoAll,
    InvocationResult,
    ReturnDefault,
    ReturnValue,
    Returning,
    Throw,
    do_all,
    on_consecutive_calls,
    return_value,
    returning,
    throw
};
pub use builder::ExpectationGroupBuilder;
pub use cardinality::Cardinality;
pub use error::{Error, Mismatch, MismatchReason, MismatchReport, Thrown};
pub use expectation::{Expectation, InvocationExpectation};
pub use group::{ExpectationGroup, Order};
pub use invocation::{Invocation, MockObject, ReturnType, TypeInfo, Value};
pub use matcher::{
    Anything,
    Arg,
    InvocationMatcher,
    InvokeCount,
    InvokeOnce,
    IsA,
    MethodName,
    Same,
    a,
    anything,
    arg,
    equal,
    same
};
pub use mockery::{Dispatch, Mockery};
