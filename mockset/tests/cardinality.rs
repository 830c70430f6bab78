// vim: tw=80
//! Cardinalities decide when an expectation is satisfied and when it is
//! exhausted.

use mockset::*;

#[test]
fn any() {
    let c = Cardinality::any();
    assert!(c.is_satisfied(0));
    assert!(c.is_satisfied(1000));
    assert!(c.allows_more_invocations(1000));
    assert_eq!(c, Cardinality::default());
}

#[test]
fn at_least() {
    let c = Cardinality::at_least(2);
    assert!(!c.is_satisfied(1));
    assert!(c.is_satisfied(2));
    assert!(c.is_satisfied(99));
    assert!(c.allows_more_invocations(99));
    assert_eq!(None, c.maximum());
}

#[test]
fn at_most() {
    let c = Cardinality::at_most(2);
    assert!(c.is_satisfied(0));
    assert!(c.is_satisfied(2));
    assert!(!c.is_satisfied(3));
    assert!(c.allows_more_invocations(1));
    assert!(!c.allows_more_invocations(2));
}

#[test]
fn between() {
    for (a, b) in [(0, 0), (0, 3), (2, 2), (1, 4)] {
        let c = Cardinality::between(a, b);
        for count in 0..=b + 1 {
            assert_eq!(a <= count && count <= b, c.is_satisfied(count),
                "between({}, {}) at count {}", a, b, count);
            assert_eq!(count < b, c.allows_more_invocations(count),
                "between({}, {}) at count {}", a, b, count);
        }
    }
}

#[test]
#[should_panic(expected = "Cardinality lower bound 3 exceeds upper bound 1")]
fn between_backwards() {
    let _c = Cardinality::between(3, 1);
}

#[test]
fn exactly() {
    for n in 0..5 {
        let c = Cardinality::exactly(n);
        assert!(c.is_exact());
        for count in 0..n {
            assert!(c.allows_more_invocations(count));
            assert!(!c.is_satisfied(count));
        }
        assert!(!c.allows_more_invocations(n));
        assert!(c.is_satisfied(n));
        assert!(!c.is_satisfied(n + 1));
    }
}

mod display {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn allowed() {
        assert_eq!("allowed", Cardinality::any().to_string());
    }

    #[test]
    fn at_least() {
        assert_eq!("expected at least once",
            Cardinality::at_least(1).to_string());
        assert_eq!("expected at least 3 times",
            Cardinality::at_least(3).to_string());
    }

    #[test]
    fn at_most() {
        assert_eq!("expected at most 2 times",
            Cardinality::at_most(2).to_string());
    }

    #[test]
    fn between() {
        assert_eq!("expected between 1 and 3 times",
            Cardinality::between(1, 3).to_string());
    }

    #[test]
    fn exactly() {
        assert_eq!("expected exactly 2 times",
            Cardinality::exactly(2).to_string());
    }

    #[test]
    fn never() {
        assert_eq!("expected never", Cardinality::exactly(0).to_string());
        assert_eq!("expected never", Cardinality::at_most(0).to_string());
    }

    #[test]
    fn once() {
        assert_eq!("expected once", Cardinality::exactly(1).to_string());
    }
}

mod from {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn count() {
        assert_eq!(Cardinality::exactly(4), Cardinality::from(4));
    }

    #[test]
    fn range() {
        assert_eq!(Cardinality::between(1, 3), Cardinality::from(1..4));
    }

    #[test]
    #[should_panic(expected = "Cardinality range 2..2 is empty")]
    fn range_empty() {
        let _c = Cardinality::from(2..2);
    }

    #[test]
    fn range_from() {
        assert_eq!(Cardinality::at_least(2), Cardinality::from(2..));
    }

    #[test]
    fn range_full() {
        assert_eq!(Cardinality::any(), Cardinality::from(..));
    }

    #[test]
    fn range_inclusive() {
        assert_eq!(Cardinality::between(1, 3), Cardinality::from(1..=3));
    }

    #[test]
    fn range_to() {
        assert_eq!(Cardinality::at_most(3), Cardinality::from(..4));
    }

    #[test]
    fn range_to_inclusive() {
        assert_eq!(Cardinality::at_most(3), Cardinality::from(..=3));
    }
}
