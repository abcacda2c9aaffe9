//! Integration tests for the fixpoint engine and equivalence checker.
//!
//! Tests cover:
//! - idempotence on an already stable environment
//! - convergence of acyclic rules within their chain length
//! - equivalence symmetry and flatness
//! - the iteration cap and unbounded configuration

use ql_eval::{equivalent, EngineConfig, Environment, EvalError, FixpointEngine};
use ql_types::Value;
use std::cell::RefCell;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn b(v: bool) -> Value {
    Value::Bool(v)
}

fn env(pairs: &[(&str, Value)]) -> Environment {
    pairs.iter().cloned().collect()
}

fn get(env: &Environment, name: &str) -> Value {
    env.get(name).cloned().unwrap_or(num(0.0))
}

/// `foo_c := foo`, `bar_c := !bar`, computed in place.
fn foo_bar_rule(mut env: Environment) -> Environment {
    let foo = get(&env, "foo");
    let bar = env.get("bar").map(Value::is_truthy).unwrap_or(false);
    env.set("foo_c", foo);
    env.set("bar_c", !bar);
    env
}

/// `c1 := a`, `c2 := c1`, both read from the input snapshot so the
/// dependency takes one application per hop.
fn two_hop_rule(env: Environment) -> Environment {
    let a = get(&env, "a");
    let c1 = get(&env, "c1");
    let mut next = env.clone();
    next.set("c1", a);
    next.set("c2", c1);
    next
}

/// `c{i} := c{i-1}` for i in 1..=len, with `c0` the input.
fn chain_rule(len: usize) -> impl Fn(Environment) -> Environment {
    move |env: Environment| {
        let mut next = env.clone();
        for i in 1..=len {
            next.set(format!("c{i}"), get(&env, &format!("c{}", i - 1)));
        }
        next
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Idempotence
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn stable_environment_takes_exactly_one_application() {
    let engine = FixpointEngine::default();
    let mut e = env(&[
        ("foo", num(3.0)),
        ("bar", b(true)),
        ("foo_c", num(3.0)),
        ("bar_c", b(false)),
    ]);
    let before = e.clone();
    let report = engine.stabilize(&mut e, &foo_bar_rule).unwrap();
    assert_eq!(report.applications, 1);
    assert!(equivalent(&e, &before));
}

#[test]
fn stabilizing_twice_changes_nothing() {
    let engine = FixpointEngine::default();
    let mut e = env(&[("a", num(1.0)), ("c1", num(0.0)), ("c2", num(0.0))]);
    engine.stabilize(&mut e, &two_hop_rule).unwrap();
    let settled = e.clone();
    let report = engine.stabilize(&mut e, &two_hop_rule).unwrap();
    assert_eq!(report.applications, 1);
    assert_eq!(e, settled);
}

// ══════════════════════════════════════════════════════════════════════════════
// Scenario A: copy and negate
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_a_single_edit_settles_in_one_round() {
    let engine = FixpointEngine::default();
    let mut e = env(&[("foo", num(0.0)), ("bar", b(false))]);
    e.set("foo", 5);

    let report = engine.stabilize(&mut e, &foo_bar_rule).unwrap();
    assert_eq!(report.changed_rounds(), 1);
    assert_eq!(report.applications, 2);
    assert_eq!(
        e,
        env(&[
            ("foo", num(5.0)),
            ("bar", b(false)),
            ("foo_c", num(5.0)),
            ("bar_c", b(true)),
        ])
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Scenario C: two-hop chain
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_c_two_hop_chain() {
    let engine = FixpointEngine::default();
    let mut e = env(&[("a", num(1.0)), ("c1", num(0.0)), ("c2", num(0.0))]);

    let snapshots = RefCell::new(Vec::new());
    let verdicts = RefCell::new(Vec::new());
    let report = engine
        .stabilize_with(&mut e, &two_hop_rule, |next, prev| {
            let same = equivalent(next, prev);
            snapshots.borrow_mut().push(next.clone());
            verdicts.borrow_mut().push(same);
            same
        })
        .unwrap();

    assert_eq!(report.changed_rounds(), 2);
    assert_eq!(report.applications, 3);
    assert_eq!(verdicts.into_inner(), vec![false, false, true]);
    assert_eq!(e, env(&[("a", num(1.0)), ("c1", num(1.0)), ("c2", num(1.0))]));

    let snapshots = snapshots.into_inner();
    assert_eq!(
        snapshots[0],
        env(&[("a", num(1.0)), ("c1", num(1.0)), ("c2", num(0.0))])
    );
    assert!(!equivalent(&snapshots[0], &snapshots[1]));
    assert!(equivalent(&snapshots[1], &snapshots[2]));
}

// ══════════════════════════════════════════════════════════════════════════════
// Convergence bound
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn acyclic_chain_converges_within_its_length() {
    let engine = FixpointEngine::default();
    for len in 1..=8 {
        let rule = chain_rule(len);
        let mut e: Environment = (0..=len)
            .map(|i| (format!("c{i}"), num(0.0)))
            .collect();
        e.set("c0", 9);

        let report = engine.stabilize(&mut e, &rule).unwrap();
        assert!(
            report.changed_rounds() <= len,
            "chain of {len} took {} changing rounds",
            report.changed_rounds()
        );
        for i in 0..=len {
            assert_eq!(e.get(&format!("c{i}")), Some(&num(9.0)));
        }
    }
}

#[test]
fn rule_may_add_keys() {
    let engine = FixpointEngine::default();
    let mut e = env(&[("foo", num(1.0))]);
    engine.stabilize(&mut e, &foo_bar_rule).unwrap();
    assert!(e.contains("foo_c"));
    assert!(e.contains("bar_c"));
    assert_eq!(e.len(), 3);
}

#[test]
fn rule_may_return_a_fresh_environment() {
    let engine = FixpointEngine::default();
    let mut e = env(&[("x", num(2.0)), ("stale", b(true))]);
    let rule = |env: Environment| -> Environment {
        let x = get(&env, "x");
        [("x", x.clone()), ("double", num(x.as_number().unwrap_or(0.0) * 2.0))]
            .into_iter()
            .collect()
    };
    engine.stabilize(&mut e, &rule).unwrap();
    assert_eq!(e, env(&[("x", num(2.0)), ("double", num(4.0))]));
}

// ══════════════════════════════════════════════════════════════════════════════
// Non-convergence
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn cyclic_rule_hits_the_configured_cap() {
    let engine = FixpointEngine::new(EngineConfig::with_max_iterations(25)).unwrap();
    let mut e = env(&[("flip", b(false))]);
    let toggle = |mut env: Environment| {
        let flip = env.get("flip").map(Value::is_truthy).unwrap_or(false);
        env.set("flip", !flip);
        env
    };
    let err = engine.stabilize(&mut e, &toggle).unwrap_err();
    assert_eq!(err, EvalError::NonConvergence { iterations: 25 });
    assert_eq!(err.to_string(), "no fixpoint reached after 25 update rule applications");
}

#[test]
fn unbounded_config_still_converges_on_acyclic_rules() {
    let engine = FixpointEngine::new(EngineConfig::unbounded()).unwrap();
    let mut e = env(&[("a", num(4.0))]);
    let report = engine.stabilize(&mut e, &two_hop_rule).unwrap();
    assert_eq!(e.get("c2"), Some(&num(4.0)));
    assert_eq!(report.applications, 3);
}

#[test]
fn nan_input_still_reaches_a_fixpoint() {
    let engine = FixpointEngine::new(EngineConfig::with_max_iterations(5)).unwrap();
    let mut e = env(&[("foo", num(f64::NAN)), ("bar", b(false))]);
    let report = engine.stabilize(&mut e, &foo_bar_rule).unwrap();
    assert_eq!(report.applications, 2);
    assert!(get(&e, "foo_c").as_number().unwrap().is_nan());
}

// ══════════════════════════════════════════════════════════════════════════════
// Equivalence properties
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn equivalence_is_symmetric() {
    let samples = [
        env(&[]),
        env(&[("a", num(1.0))]),
        env(&[("a", num(1.0)), ("b", b(true))]),
        env(&[("a", num(2.0)), ("b", b(true))]),
        env(&[("a", num(1.0)), ("b", Value::from("true"))]),
        env(&[("b", b(true)), ("a", num(1.0))]),
        env(&[("z", num(1.0)), ("b", b(true))]),
    ];
    for x in &samples {
        for y in &samples {
            assert_eq!(equivalent(x, y), equivalent(y, x), "{x:?} vs {y:?}");
        }
    }
}

#[test]
fn equivalence_ignores_insertion_order() {
    let mut x = Environment::new();
    x.set("first", 1);
    x.set("second", "two");
    let mut y = Environment::new();
    y.set("second", "two");
    y.set("first", 1);
    assert!(equivalent(&x, &y));
}

#[test]
fn equivalence_detects_single_scalar_change() {
    let x = env(&[("a", num(1.0)), ("b", b(true)), ("c", Value::from("x"))]);
    for (key, changed) in [("a", num(1.5)), ("b", b(false)), ("c", Value::from("X"))] {
        let mut y = x.clone();
        y.set(key, changed);
        assert!(!equivalent(&x, &y), "change to {key} went unnoticed");
    }
}
