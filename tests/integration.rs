//! Integration tests exercising the full public API end to end:
//! construction, cross-family casts, string rendering, bounded-range
//! enforcement, and the transcendental suite at several precisions.

#![allow(clippy::panic)]

use fxnum::prelude::*;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn fam(bits: u32) -> FxFamily {
    let Ok(f) = FxFamily::new(bits) else {
        panic!("valid family");
    };
    f
}

fn num(v: i64, f: &FxFamily) -> FxNum {
    let Ok(n) = FxNum::from_int(v, f) else {
        panic!("in range");
    };
    n
}

fn ok(r: Result<FxNum>) -> FxNum {
    match r {
        Ok(v) => v,
        Err(e) => panic!("expected Ok: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Default-precision arithmetic
// ---------------------------------------------------------------------------

#[test]
fn default_family_quotient_and_square_root() {
    let f = FxFamily::default();
    let x = num(21, &f) / 10;
    assert_eq!(x.to_string(), "2.0999999999999999999");

    let rx = ok(x.sqrt());
    assert_eq!(rx.to_string(), "1.4491376746189438573");

    let v = &x + 2 * &rx;
    assert_eq!(v.to_string(), "4.9982753492378877146");
}

#[test]
fn float_construction_carries_the_float_error() {
    // 2.1 is not exactly representable in binary floating point; the
    // conversion is faithful to the f64 bit pattern, not the literal.
    let f = FxFamily::default();
    let x = ok(FxNum::from_f64(2.1, &f));
    assert_eq!(x.to_string(), "2.1000000000000000888");
}

#[test]
fn exact_ratio_beats_float_construction() {
    // The ratio path rounds 2.1 * 2^64 to nearest in a single step; the
    // division path's half-up bias lands one ulp below it.
    let f = FxFamily::default();
    let from_ratio = ok(FxNum::from_ratio(21, 10, &f));
    let from_ints = num(21, &f) / 10;
    assert!(from_ratio > from_ints);
    let diff = ok(from_ratio.try_sub(&from_ints));
    assert!(diff.scaled_value().magnitude().bits() <= 1);
}

// ---------------------------------------------------------------------------
// Low-precision families
// ---------------------------------------------------------------------------

#[test]
fn twelve_bit_logarithm_round_trip() {
    let f = fam(12);
    let y = ok(FxNum::from_f64(3.2, &f));
    let ly = ok(y.ln());
    assert_eq!(ly.to_string(), "1.162841");
    assert_eq!(ok(ly.exp()).to_string(), "3.198730");
    assert!((y.to_f64() - 3.199951171875).abs() < 1e-15);
}

#[test]
fn bounded_family_enforces_magnitude_limit() {
    let Ok(f) = FxFamily::with_integer_bits(12, 4) else {
        panic!("valid family");
    };
    let a = ok(FxNum::from_f64(1.4, &f));
    assert_eq!(a.to_string(), "1.399902");
    assert_eq!((&a * 5).to_string(), "6.999511");
    assert_eq!((&a * -5).to_string(), "-6.999511");
    assert!(matches!(a.try_mul(&num(6, &f)), Err(FxError::Overflow { .. })));
    assert!(matches!(FxNum::from_int(8, &f), Err(FxError::Overflow { .. })));
    assert!(FxNum::from_int(-8, &f).is_ok());
}

// ---------------------------------------------------------------------------
// Cross-family casts
// ---------------------------------------------------------------------------

#[test]
fn mixed_families_require_an_explicit_cast() {
    let f64bits = FxFamily::default();
    let f12 = fam(12);

    let x = num(21, &f64bits) / 10;
    let y = ok(FxNum::from_f64(3.2, &f12));

    assert!(matches!(
        x.try_add(&y),
        Err(FxError::FamilyMismatch { .. })
    ));

    let a = &x + ok(y.cast(&f64bits));
    assert_eq!(a.to_string(), "5.3000732421874999999");
}

#[test]
fn widening_cast_preserves_value_exactly() {
    let narrow = fam(12);
    let wide = fam(64);
    let y = ok(FxNum::from_f64(3.2, &narrow));
    let up = ok(y.cast(&wide));
    assert_eq!(ok(up.cast(&narrow)), y);
}

// ---------------------------------------------------------------------------
// Family constants
// ---------------------------------------------------------------------------

#[test]
fn pi_at_high_precision() {
    let f = fam(200);
    let Ok(pi) = f.pi() else {
        panic!("pi computes");
    };
    assert_eq!(
        pi.to_string(),
        "3.141592653589793238462643383279502884197169399375105820974944",
    );
}

#[test]
fn constants_agree_with_float_references() {
    let f = fam(64);
    let consts = [
        (f.e(), std::f64::consts::E),
        (f.ln2(), std::f64::consts::LN_2),
        (f.pi(), std::f64::consts::PI),
        (f.sqrt2(), std::f64::consts::SQRT_2),
    ];
    for (value, reference) in consts {
        assert!((ok(value).to_f64() - reference).abs() < 1e-15);
    }
}

#[test]
fn constants_are_cached_per_family() {
    let f = fam(64);
    assert_eq!(ok(f.pi()), ok(f.pi()));

    // Distinct handles to an equal family recompute independently but
    // agree on the result.
    let g = fam(64);
    assert_eq!(ok(f.pi()), ok(g.pi()));
}

// ---------------------------------------------------------------------------
// String rendering
// ---------------------------------------------------------------------------

#[test]
fn decimal_rendering_controls() {
    let f = fam(64);
    let x = num(21, &f) / 10;
    assert_eq!(x.to_decimal_string(Some(4), true), "2.1000");
    assert_eq!(x.to_decimal_string(Some(0), false), "2");
}

#[test]
fn full_precision_decimal_survives_a_round_trip() {
    // Rendered at the family's full fractional width, the decimal form
    // carries every bit; re-reading it as an exact ratio reproduces the
    // value to within one unit in the last place.
    let f = fam(24);
    for (n, d) in [(1i64, 3i64), (-22, 7), (355, 113), (1, 10)] {
        let x = ok(FxNum::from_ratio(n, d, &f));
        let rendered = x.to_decimal_string(Some(f.fraction_bits()), false);

        let (sign, digits) = match rendered.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1, rendered.as_str()),
        };
        let (whole, frac) = digits.split_once('.').unwrap_or((digits, ""));
        let Ok(mantissa) = format!("{whole}{frac}").parse::<i128>() else {
            panic!("decimal output parses as an integer");
        };
        let denom = 10i128.pow(frac.len() as u32);
        let back = ok(FxNum::from_ratio(sign as i128 * mantissa, denom, &f));

        let diff = ok(back.try_sub(&x));
        assert!(diff.scaled_value().magnitude().bits() <= 1, "{rendered}");
    }
}

#[test]
fn binary_rendering_across_radices() {
    let Ok(f) = FxFamily::with_integer_bits(4, 4) else {
        panic!("valid family");
    };
    let x = num(3, &f) / 2;
    assert_eq!(x.to_binary_string(BinaryRadix::Binary, false), "0001.1000");
    assert_eq!(x.to_binary_string(BinaryRadix::Hex, false), "1.8");
    let minus = -&x;
    assert_eq!(minus.to_binary_string(BinaryRadix::Binary, true), "1110.1000");
}

// ---------------------------------------------------------------------------
// Transcendental suite at full precision
// ---------------------------------------------------------------------------

#[test]
fn trigonometric_angle_addition() {
    let f = fam(64);
    let a = num(7, &f) / 10;
    let b = num(3, &f) / 10;

    let Ok((sa, ca)) = a.sincos() else {
        panic!("sincos computes");
    };
    let Ok((sb, cb)) = b.sincos() else {
        panic!("sincos computes");
    };
    let lhs = ok((&a + &b).sin());
    let rhs = &sa * &cb + &ca * &sb;
    let diff = ok(lhs.try_sub(&rhs)).to_f64().abs();
    assert!(diff < 1e-17);
}

#[test]
fn power_laws_hold() {
    let f = fam(64);
    let base = num(3, &f) / 2;
    let p = num(5, &f) / 4;
    let q = num(3, &f) / 4;

    let lhs = ok(base.pow(&ok(p.try_add(&q))));
    let rhs = ok(base.pow(&p)) * ok(base.pow(&q));
    let diff = ok(lhs.try_sub(&rhs)).to_f64().abs();
    assert!(diff < 1e-17);
}

#[test]
fn domain_errors_surface_from_every_entry_point() {
    let f = fam(64);
    assert!(matches!(num(-1, &f).sqrt(), Err(FxError::Domain(_))));
    assert!(matches!(num(0, &f).ln(), Err(FxError::Domain(_))));
    assert!(matches!(num(-1, &f).log2(), Err(FxError::Domain(_))));
    assert!(matches!(num(2, &f).asin(), Err(FxError::Domain(_))));
    assert!(matches!(num(-2, &f).acos(), Err(FxError::Domain(_))));
    assert!(matches!(
        num(0, &f).pow(&num(0, &f)),
        Err(FxError::Domain(_))
    ));
    assert_eq!(
        num(1, &f).try_div(&num(0, &f)),
        Err(FxError::DivisionByZero)
    );
}
