// vim: tw=80
//! Specifying expectations with ExpectationGroupBuilder

use mockset::*;
use pretty_assertions::assert_eq;

fn turtle() -> MockObject {
    MockObject::new(0, "turtle")
}

fn heading() -> Invocation {
    Invocation::new(&turtle(), "heading").returns(ReturnType::of::<u32>())
}

fn value<T: Value + Clone>(result: InvocationResult) -> T {
    result.unwrap().downcast_ref::<T>().unwrap().clone()
}

fn malformed(builder: ExpectationGroupBuilder) -> String {
    match builder.to_expectation() {
        Err(Error::Malformed(message)) => message,
        Err(e) => panic!("Unexpected error {}", e),
        Ok(group) => panic!("Unexpectedly built {}", group)
    }
}

#[test]
fn builds_in_order() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.one().of(&turtle()).method("penDown");
    builder.exactly(2).of(&turtle()).method("forward").with(a::<i32>());
    builder.never().of(&turtle()).method("penUp");
    let group = builder.to_expectation().unwrap();
    assert_eq!("in any order:\n  \
        - expected once: turtle.penDown(<any arguments>)\n  \
        - expected exactly 2 times: turtle.forward(a i32)\n  \
        - expected never: turtle.penUp(<any arguments>)",
        group.to_string());
}

#[test]
fn empty() {
    let group = ExpectationGroupBuilder::new().to_expectation().unwrap();
    assert!(group.is_empty());
}

#[test]
fn cardinalities() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.at_least(1).of(&turtle()).method("a");
    builder.at_most(2).of(&turtle()).method("b");
    builder.between(1, 3).of(&turtle()).method("c");
    builder.allowing().of(&turtle()).method("d");
    let group = builder.to_expectation().unwrap();
    let description = group.to_string();
    assert!(description.contains("expected at least once: turtle.a("));
    assert!(description.contains("expected at most 2 times: turtle.b("));
    assert!(description.contains("expected between 1 and 3 times: turtle.c("));
    assert!(description.contains("allowed: turtle.d("));
}

#[test]
fn ignoring() {
    let pen = MockObject::new(1, "pen");
    let mut builder = ExpectationGroupBuilder::new();
    builder.ignoring(&pen);
    builder.one().of(&turtle()).method("penDown");
    let group = builder.to_expectation().unwrap();
    assert!(group.matches(&Invocation::new(&pen, "color").arg("red")));
    assert!(group.matches(&Invocation::new(&pen, "width")));
    assert!(!group.matches(&Invocation::new(&turtle(), "penUp")));
    assert_eq!(2, group.len());
}

#[test]
fn method_matching() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.allowing().of(&turtle())
        .method_matching(predicate::str::starts_with("pen"));
    let group = builder.to_expectation().unwrap();
    assert!(group.matches(&Invocation::new(&turtle(), "penUp")));
    assert!(!group.matches(&Invocation::new(&turtle(), "forward")));
}

#[test]
fn never() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.never().of(&turtle()).method("penUp");
    let group = builder.to_expectation().unwrap();
    assert!(!group.matches(&Invocation::new(&turtle(), "penUp")));
    assert!(group.verify().is_ok());
}

#[test]
fn one() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.one().of(&turtle()).method("heading").will(return_value(90u32));
    let group = builder.to_expectation().unwrap();
    assert_eq!(90, value::<u32>(group.invoke(&heading())));
    assert!(!group.matches(&heading()));
    assert_eq!("in any order:\n  \
        - expected once: turtle.heading(<any arguments>) (has been invoked), \
        returns 90",
        group.to_string());
}

#[test]
fn parameter_types() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.allowing().of(&turtle()).method("forward")
        .parameter_types(vec![TypeInfo::of::<i32>()]);
    let group = builder.to_expectation().unwrap();
    assert!(group.matches(&Invocation::new(&turtle(), "forward").arg(5i32)));
    assert!(!group.matches(&Invocation::new(&turtle(), "forward").arg(5u64)));
}

#[test]
fn sequence() {
    let mut seq = ExpectationGroupBuilder::in_sequence();
    seq.one().of(&turtle()).method("penDown");
    seq.one().of(&turtle()).method("penUp");
    let mut builder = ExpectationGroupBuilder::new();
    builder.allowing().of(&turtle()).method("heading");
    builder.expects(seq);
    let group = builder.to_expectation().unwrap();
    assert!(!group.matches(&Invocation::new(&turtle(), "penUp")));
    group.invoke(&Invocation::new(&turtle(), "penDown")).unwrap();
    group.invoke(&heading()).unwrap();
    group.invoke(&Invocation::new(&turtle(), "penUp")).unwrap();
    assert!(group.verify().is_ok());
}

#[test]
fn with_no_arguments() {
    let mut builder = ExpectationGroupBuilder::new();
    builder.allowing().of(&turtle()).method("forward").with_no_arguments();
    let group = builder.to_expectation().unwrap();
    assert!(group.matches(&Invocation::new(&turtle(), "forward")));
    assert!(!group.matches(&Invocation::new(&turtle(), "forward").arg(1i32)));
}

mod default_action {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn explicit_action_wins() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.set_default_action(return_value(1u32));
        builder.one().of(&turtle()).method("heading").will(return_value(2u32));
        let group = builder.to_expectation().unwrap();
        assert_eq!(2, value::<u32>(group.invoke(&heading())));
    }

    #[test]
    fn inherited() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.set_default_action(return_value(1u32));
        builder.one().of(&turtle()).method("heading");
        let group = builder.to_expectation().unwrap();
        assert_eq!(1, value::<u32>(group.invoke(&heading())));
    }

    #[test]
    fn innermost_wins() {
        let mut seq = ExpectationGroupBuilder::in_sequence();
        seq.set_default_action(return_value(2u32));
        seq.one().of(&turtle()).method("heading");
        let mut builder = ExpectationGroupBuilder::new();
        builder.set_default_action(return_value(1u32));
        builder.expects(seq);
        builder.one().of(&turtle()).method("heading");
        let group = builder.to_expectation().unwrap();
        assert_eq!(2, value::<u32>(group.invoke(&heading())));
        assert_eq!(1, value::<u32>(group.invoke(&heading())));
    }
}

mod malformed {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn between_backwards() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.between(3, 1).of(&turtle()).method("forward");
        assert_eq!(
            "invalid cardinality: lower bound 3 exceeds upper bound 1",
            malformed(builder));
    }

    #[test]
    fn first_mistake_wins() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.method("forward");
        builder.one().method("penUp");
        assert!(malformed(builder).starts_with("no expectation was specified"));
    }

    #[test]
    fn in_nested_group() {
        let mut seq = ExpectationGroupBuilder::in_sequence();
        seq.will(return_value(5u32));
        let mut builder = ExpectationGroupBuilder::new();
        builder.one().of(&turtle()).method("penUp");
        builder.expects(seq);
        assert!(malformed(builder).starts_with("no expectation was specified"));
    }

    #[test]
    fn no_expectation() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.of(&turtle());
        assert_eq!(
            "no expectation was specified; use exactly, at_least, at_most, \
            between, one, allowing, ignoring or never first",
            malformed(builder));
    }

    #[test]
    fn pending_until_registered() {
        let mockery = Mockery::new();
        let turtle = mockery.mock("turtle").unwrap();
        let mut builder = ExpectationGroupBuilder::new();
        builder.with(anything());
        builder.allowing().of(&turtle).method("penUp");
        match mockery.checking(builder) {
            Err(Error::Malformed(m)) =>
                assert!(m.starts_with("no expectation was specified")),
            r => panic!("Unexpected result {:?}", r)
        }
        // Nothing from the rejected builder was registered
        assert!(mockery.dispatch(Invocation::new(&turtle, "penUp")).is_err());
    }

    #[test]
    fn no_method() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.one().of(&turtle());
        builder.one().of(&turtle()).method("penUp");
        assert_eq!(
            "expectation was not fully specified: \
            expected once: turtle.<any method>(<any arguments>)",
            malformed(builder));
    }

    #[test]
    fn no_receiver() {
        let mut builder = ExpectationGroupBuilder::new();
        builder.exactly(2).method("forward");
        assert_eq!(
            "expectation was not fully specified: \
            expected exactly 2 times: <any object>.forward(<any arguments>)",
            malformed(builder));
    }
}
