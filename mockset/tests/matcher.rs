// vim: tw=80
//! Invocation matchers and argument matchers

use std::rc::Rc;

use mockset::*;
use pretty_assertions::assert_eq;

fn turtle() -> MockObject {
    MockObject::new(0, "turtle")
}

mod invoke_once {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn not_invoked() {
        let once = InvokeOnce::new();
        let invocation = Invocation::new(&turtle(), "penDown");
        assert!(once.matches(&invocation));
        assert!(!once.is_satisfied());
        let e = once.verify().unwrap_err();
        assert!(e.to_string().contains("expected method was not invoked"));
    }

    #[test]
    fn invoked() {
        let once = InvokeOnce::new();
        let invocation = Invocation::new(&turtle(), "penDown");
        once.invoked(&invocation);
        assert!(!once.matches(&invocation));
        assert!(once.is_satisfied());
        assert!(once.verify().is_ok());
        assert_eq!(1, once.invocation_count());
    }

    #[test]
    fn describe() {
        let once = InvokeOnce::new();
        assert_eq!("expected once", once.describe());
        once.invoked(&Invocation::new(&turtle(), "penDown"));
        let description = once.describe();
        assert!(description.contains("expected once"));
        assert!(description.contains("has been invoked"));
    }

    #[test]
    fn ignores_invocation_content() {
        let once = InvokeOnce::new();
        let other = MockObject::new(1, "pen");
        assert!(once.matches(&Invocation::new(&turtle(), "penDown")));
        assert!(once.matches(&Invocation::new(&other, "x").arg(5u8)));
    }
}

mod invoke_count {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn exactly() {
        let count = InvokeCount::new(3);
        let invocation = Invocation::new(&turtle(), "forward");
        count.invoked(&invocation);
        count.invoked(&invocation);
        assert!(count.matches(&invocation));
        assert_eq!(
            "expected method was invoked 2 times, 1 fewer than required: \
            expected exactly 3 times (invoked 2 times)",
            count.verify().unwrap_err().to_string());

        count.invoked(&invocation);
        assert!(!count.matches(&invocation));
        assert!(count.verify().is_ok());
    }

    #[test]
    fn not_invoked() {
        let count = InvokeCount::new(1..);
        assert_eq!(
            "expected method was not invoked: expected at least once",
            count.verify().unwrap_err().to_string());
    }

    #[test]
    fn too_many() {
        let count = InvokeCount::new(Cardinality::at_most(1));
        let invocation = Invocation::new(&turtle(), "forward");
        count.invoked(&invocation);
        count.invoked(&invocation);
        assert_eq!(
            "expected method was invoked 2 times, more than allowed: \
            expected at most once (invoked 2 times)",
            count.verify().unwrap_err().to_string());
    }
}

mod arg {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn eq() {
        let p = equal(String::from("north"));
        assert!(p.eval(&String::from("north") as &dyn Value));
        assert!(!p.eval(&String::from("south") as &dyn Value));
    }

    #[test]
    fn function() {
        let p = arg::<i32, _>(predicate::function(|x: &i32| *x % 2 == 0));
        assert!(p.eval(&4i32 as &dyn Value));
        assert!(!p.eval(&5i32 as &dyn Value));
    }

    #[test]
    fn wrong_type() {
        let p = equal(5i32);
        let v = 5i64;
        assert!(!p.eval(&v as &dyn Value));
        let case = p.find_case(false, &v as &dyn Value).unwrap();
        let products = case.products()
            .map(|p| format!("{}", p.value()))
            .collect::<Vec<_>>();
        assert_eq!(vec!["i32".to_string(), "i64".to_string()], products);
    }
}

#[test]
fn anything() {
    let p = mockset::anything();
    assert!(p.eval(&5i32 as &dyn Value));
    assert!(p.eval(&"five" as &dyn Value));
    assert_eq!("anything", p.to_string());
}

#[test]
fn is_a() {
    let p = a::<u16>();
    assert!(p.eval(&5u16 as &dyn Value));
    assert!(!p.eval(&5u32 as &dyn Value));
    assert_eq!("a u16", p.to_string());
}

mod same {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn identity() {
        let pen = Rc::new(String::from("red"));
        let p = same(pen.clone());
        assert!(p.eval(&pen as &dyn Value));
        assert!(!p.eval(&Rc::new(String::from("red")) as &dyn Value));
        assert_eq!("same as \"red\"", p.to_string());
    }

    #[test]
    fn wrong_type() {
        let p = same(Rc::new(5i32));
        assert!(!p.eval(&5i32 as &dyn Value));
    }

    #[test]
    fn in_expectation() {
        let pen = Rc::new(String::from("red"));
        let mut builder = ExpectationGroupBuilder::new();
        builder.allowing().of(&turtle()).method("setPen")
            .with(same(pen.clone()));
        let group = builder.to_expectation().unwrap();

        let copy = Rc::new(String::from("red"));
        assert!(group.matches(&Invocation::new(&turtle(), "setPen").arg(pen)));
        assert!(!group.matches(&Invocation::new(&turtle(), "setPen")
            .arg(copy)));
    }
}

#[test]
fn method_name() {
    let p = MethodName::new("forward");
    assert!(p.eval("forward"));
    assert!(!p.eval("backward"));
    assert_eq!("forward", p.to_string());
}
