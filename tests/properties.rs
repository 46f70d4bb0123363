//! Property-based tests for contract checking
//!
//! These tests verify the laws a signed function must obey for any input:
//! - `a -> a` around identity accepts every value
//! - A variable bound to two values of different types is always rejected
//! - Two-argument consistency agrees with `compare_types`
//! - Empty arrays never make a variable inconsistent
//! - Class predicates decide acceptance exactly
//! - Printing a parsed signature and parsing it again is stable

use proptest::prelude::*;

use notary::test_support::{constant, identity, positive};
use notary::{
    compare_types, infer_type, parse_signature, BaseType, ClassEnv, ContractError, Notary,
    Primitive, Type, Value,
};

// ============================================================================
// Generators
// ============================================================================

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-1.0e6..1.0e6f64).prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
        "[a-z]{1,4}".prop_map(Value::symbol),
    ]
}

/// Nested arrays and objects over scalar leaves
fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,3}", inner, 0..3).prop_map(Value::Object),
        ]
    })
}

fn arb_type() -> impl Strategy<Value = Type> {
    let base = prop_oneof![
        prop::sample::select(Primitive::ALL.to_vec()).prop_map(BaseType::Primitive),
        "[a-d]".prop_map(BaseType::Var),
    ];
    (base, 0usize..4).prop_map(|(base, depth)| Type::new(base, depth))
}

fn rendered(types: &[Type]) -> String {
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Identity under `a -> a` never violates its contract
    #[test]
    fn identity_is_always_accepted(value in arb_value()) {
        let signed = Notary::default().sign("a -> a", identity).unwrap();
        prop_assert_eq!(signed.call(&[value.clone()]), Ok(value));
    }

    /// Returning a value of another type breaks `a -> a`
    #[test]
    fn changing_the_type_is_always_rejected(arg in arb_value(), result in arb_value()) {
        prop_assume!(!compare_types(&infer_type(&arg), &infer_type(&result)));
        let signed = Notary::default().sign("a -> a", constant(result)).unwrap();
        let rejected = matches!(
            signed.call(&[arg]),
            Err(ContractError::InconsistentTypeVariable { .. })
        );
        prop_assert!(rejected);
    }

    /// `a -> a -> a` accepts a pair exactly when their types agree
    #[test]
    fn pair_consistency_matches_compare_types(x in arb_value(), y in arb_value()) {
        let signed = Notary::default().sign("a -> a -> a", identity).unwrap();
        let agree = compare_types(&infer_type(&x), &infer_type(&y));
        prop_assert_eq!(signed.call(&[x, y]).is_ok(), agree);
    }

    /// `[a] -> a` called with `[]` binds nothing from the argument
    #[test]
    fn empty_array_never_conflicts(result in arb_value()) {
        let signed = Notary::default().sign("[a] -> a", constant(result)).unwrap();
        let conflict = matches!(
            signed.call(&[Value::array([])]),
            Err(ContractError::InconsistentTypeVariable { .. })
        );
        prop_assert!(!conflict);
    }

    /// A predicate class accepts exactly the values its predicate accepts
    #[test]
    fn positive_constraint_is_exact(n in -1.0e6..1.0e6f64) {
        let env = ClassEnv::new().with_class("Positive", positive()).unwrap();
        let signed = Notary::new(env).sign("Positive a => a -> a", identity).unwrap();
        prop_assert_eq!(signed.call(&[Value::from(n)]).is_ok(), n > 0.0);
    }

    /// Inferring an array of copies of one scalar adds exactly one level
    #[test]
    fn uniform_arrays_add_one_level(value in arb_scalar(), len in 1usize..5) {
        let array = Value::array(std::iter::repeat(value.clone()).take(len));
        let element = infer_type(&value);
        prop_assert_eq!(infer_type(&array), Type::new(element.base, element.depth + 1));
    }

    /// Printed signatures parse back to the same types
    #[test]
    fn display_round_trips(types in prop::collection::vec(arb_type(), 2..5)) {
        let source = rendered(&types);
        let sig = parse_signature(&source).unwrap();
        prop_assert_eq!(sig.types(), &types[..]);
        prop_assert_eq!(sig.to_string(), source);
    }

    /// Printable ASCII never panics the parser
    #[test]
    fn parser_never_panics(source in "[ -~]{0,30}") {
        let _ = parse_signature(&source);
    }
}
