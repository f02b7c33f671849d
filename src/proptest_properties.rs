//! Property-based tests using `proptest` for arithmetic invariants.
//!
//! Covers the algebraic guarantees the crate makes:
//!
//! 1. **Exact addition** — `(a + b) - b == a` with no rounding.
//! 2. **Negation involution** — `-(-a) == a`.
//! 3. **Multiplication/division round-trip** — `(a * b) / b` within a
//!    few ulps of `a`.
//! 4. **Widening casts are lossless** — cast up then back down is the
//!    identity.
//! 5. **Range validation** — bounded families accept exactly the
//!    integers inside `[-2^(ib-1), 2^(ib-1))`.
//! 6. **Pythagorean identity** — `sin² + cos² ≈ 1`.
//! 7. **Inverse pairs** — `exp(ln x) ≈ x`, `sqrt(x)² ≈ x`,
//!    `asin(sin x) ≈ x`.

use num_traits::Signed;
use proptest::prelude::*;

use crate::family::FxFamily;
use crate::number::FxNum;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fam48() -> FxFamily {
    let Ok(f) = FxFamily::new(48) else {
        panic!("valid family");
    };
    f
}

/// Builds `units/1000` in the given family.
fn milli(units: i64, fam: &FxFamily) -> FxNum {
    let Ok(n) = FxNum::from_int(units, fam) else {
        panic!("in range");
    };
    n / 1000
}

fn assert_close(a: &FxNum, b: &FxNum, ulps: u64) {
    let Ok(diff) = a.try_sub(b) else {
        panic!("same family");
    };
    assert!(
        diff.scaled_value().abs() <= num_bigint::BigInt::from(ulps),
        "{a} != {b} within {ulps} ulps"
    );
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Millis in roughly [-1e6, 1e6], i.e. values in [-1000, 1000].
fn milli_strategy() -> impl Strategy<Value = i64> {
    -1_000_000i64..=1_000_000i64
}

/// Strictly positive millis, for logarithms and square roots.
fn positive_milli_strategy() -> impl Strategy<Value = i64> {
    1i64..=1_000_000i64
}

/// Millis inside the open unit interval, for inverse trigonometry.
fn unit_milli_strategy() -> impl Strategy<Value = i64> {
    -999i64..=999i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // -- Property 1: exact addition -----------------------------------------

    #[test]
    fn prop_addition_is_exact(a in milli_strategy(), b in milli_strategy()) {
        let fam = fam48();
        let x = milli(a, &fam);
        let y = milli(b, &fam);
        prop_assert_eq!(&(&x + &y) - &y, x);
    }

    // -- Property 2: negation involution ------------------------------------

    #[test]
    fn prop_negation_is_involutive(a in milli_strategy()) {
        let fam = fam48();
        let x = milli(a, &fam);
        prop_assert_eq!(-(-&x), x);
    }

    // -- Property 3: multiply/divide round-trip ------------------------------

    #[test]
    fn prop_mul_div_round_trip(
        a in milli_strategy(),
        b in positive_milli_strategy(),
    ) {
        let fam = fam48();
        let x = milli(a, &fam);
        let y = milli(b, &fam);
        let Ok(product) = x.try_mul(&y) else {
            panic!("unbounded family never overflows");
        };
        let Ok(back) = product.try_div(&y) else {
            panic!("divisor is non-zero");
        };
        assert_close(&back, &x, 1 << 12);
    }

    // -- Property 4: widening casts are lossless -----------------------------

    #[test]
    fn prop_widening_cast_round_trip(a in milli_strategy()) {
        let narrow = fam48();
        let Ok(wide) = FxFamily::new(96) else {
            panic!("valid family");
        };
        let x = milli(a, &narrow);
        let Ok(up) = x.cast(&wide) else {
            panic!("widening cannot overflow");
        };
        let Ok(down) = up.cast(&narrow) else {
            panic!("value originated in the narrow family");
        };
        prop_assert_eq!(down, x);
    }

    // -- Property 5: bounded-range validation --------------------------------

    #[test]
    fn prop_bounded_family_range(v in -40i64..=40i64) {
        let Ok(fam) = FxFamily::with_integer_bits(16, 6) else {
            panic!("valid family");
        };
        let in_range = (-32..32).contains(&v);
        prop_assert_eq!(FxNum::from_int(v, &fam).is_ok(), in_range);
    }

    // -- Property 6: Pythagorean identity ------------------------------------

    #[test]
    fn prop_pythagorean_identity(a in milli_strategy()) {
        let fam = fam48();
        let x = milli(a, &fam);
        let Ok((sn, cs)) = x.sincos() else {
            panic!("sincos computes on an unbounded family");
        };
        let total = &sn * &sn + &cs * &cs;
        let Ok(one) = fam.unity() else {
            panic!("unity in range");
        };
        assert_close(&total, &one, 1 << 12);
    }

    // -- Property 7: inverse pairs -------------------------------------------

    #[test]
    fn prop_exp_inverts_ln(a in positive_milli_strategy()) {
        let fam = fam48();
        let x = milli(a, &fam);
        let Ok(lg) = x.ln() else {
            panic!("argument is strictly positive");
        };
        let Ok(back) = lg.exp() else {
            panic!("unbounded family never overflows");
        };
        assert_close(&back, &x, 1 << 14);
    }

    #[test]
    fn prop_square_of_sqrt(a in positive_milli_strategy()) {
        let fam = fam48();
        let x = milli(a, &fam);
        let Ok(root) = x.sqrt() else {
            panic!("argument is non-negative");
        };
        assert_close(&(&root * &root), &x, 1 << 10);
    }

    #[test]
    fn prop_asin_inverts_sin(a in unit_milli_strategy()) {
        let fam = fam48();
        let x = milli(a, &fam);
        let Ok(sn) = x.sin() else {
            panic!("sine computes on an unbounded family");
        };
        let Ok(back) = sn.asin() else {
            panic!("sine magnitude is within unity");
        };
        assert_close(&back, &x, 1 << 12);
    }
}
