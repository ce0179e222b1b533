use proptest::prelude::*;
use rungs::{Complex, ComplexRect, ContinuedFraction, Decimal, MathContext, Numeric, Rational, Real};

fn small_i64() -> impl Strategy<Value = i64> {
    -100_000i64..100_000i64
}

fn denominator() -> impl Strategy<Value = u64> {
    1u64..10_000u64
}

fn fraction() -> impl Strategy<Value = Rational> {
    (small_i64(), denominator()).prop_map(|(n, d)| Rational::fraction(n, d).unwrap())
}

// [a₀; a₁, …, aₖ, period…] with at least one term before the period
fn periodic_fraction() -> impl Strategy<Value = ContinuedFraction> {
    (
        -50i64..50,
        prop::collection::vec(1i64..50, 0..4),
        prop::collection::vec(1i64..50, 1..5),
    )
        .prop_map(|(first, prefix, period)| {
            let mut terms = vec![first];
            terms.extend(prefix);
            let start = terms.len();
            terms.extend(period);
            ContinuedFraction::periodic(terms, start).unwrap()
        })
}

fn epsilon(text: &str) -> Decimal {
    text.parse().unwrap()
}

fn rational(n: Numeric) -> Rational {
    match n {
        Numeric::ContinuedFraction(cf) => cf.to_rational().unwrap(),
        other => panic!("expected a finite continued fraction, got {other:?}"),
    }
}

proptest! {
    #[test]
    fn continued_fraction_identity(r in fraction()) {
        let cf = ContinuedFraction::from_rational(&r).unwrap();
        prop_assert!(cf.is_exact());
        prop_assert_eq!(cf.to_rational().unwrap(), r);
    }

    #[test]
    fn gosper_agrees_with_rationals(a in fraction(), b in fraction()) {
        let (x, y) = (
            ContinuedFraction::from_rational(&a).unwrap(),
            ContinuedFraction::from_rational(&b).unwrap(),
        );
        prop_assert_eq!(rational(x.add(&y).unwrap()), a.clone() + b.clone());
        prop_assert_eq!(rational(x.subtract(&y).unwrap()), a.clone() - b.clone());
        prop_assert_eq!(rational(x.multiply(&y).unwrap()), a.clone() * b.clone());
        if !b.is_zero() {
            prop_assert_eq!(rational(x.divide(&y).unwrap()), (a / b).unwrap());
        }
    }

    #[test]
    fn convergents_approach(r in fraction()) {
        let cf = ContinuedFraction::from_rational(&r).unwrap();
        let last = cf.convergents().last().unwrap();
        prop_assert_eq!(last, r);
    }

    #[test]
    fn rational_text_round_trip(r in fraction()) {
        let text = r.to_string();
        let back: Rational = text.parse().unwrap();
        prop_assert!(back.eq_terms(&r));
    }

    #[test]
    fn periodic_text_round_trip(cf in periodic_fraction()) {
        for text in [cf.to_string(), format!("{cf:#}")] {
            let back: ContinuedFraction = text.parse().unwrap();
            prop_assert!(back.is_periodic());
            prop_assert_eq!(back.terms(24), cf.terms(24));
        }
    }

    #[test]
    fn periodic_negation_and_inverse(cf in periodic_fraction()) {
        let minus = cf.negate().unwrap();
        prop_assert!(minus.is_periodic());
        prop_assert_eq!(minus.negate().unwrap().terms(24), cf.terms(24));
        let ctx = MathContext::with_precision(20);
        let sum = minus.to_real(ctx).unwrap() + cf.to_real(ctx).unwrap();
        prop_assert!(sum.approx_eq(&Real::zero(), &epsilon("1e-15")));
        prop_assert_eq!(cf.inverse().unwrap().inverse().unwrap().terms(24), cf.terms(24));
        prop_assert_eq!(minus.inverse().unwrap().inverse().unwrap().terms(24), minus.terms(24));
    }

    #[test]
    fn exactness_is_conjunctive(a in small_i64(), b in small_i64()) {
        let (x, y) = (Numeric::from(a), Numeric::from(b));
        prop_assert!(x.add(&y).unwrap().is_exact());
        prop_assert!(x.multiply(&y).unwrap().is_exact());
        let e: Numeric = Real::e(MathContext::DECIMAL64).unwrap().into();
        prop_assert!(!x.add(&e).unwrap().is_exact());
        if a != 0 {
            prop_assert!(!x.multiply(&e).unwrap().is_exact());
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn polar_rectangular_equivalence(re in -1000i64..1000, im in -1000i64..1000) {
        prop_assume!(re != 0 || im != 0);
        let z = ComplexRect::new(Real::from(re), Real::from(im));
        let back = z.to_polar().unwrap().to_rect().unwrap();
        let tolerance = epsilon("1e-25");
        prop_assert!(back.real().approx_eq(z.real(), &tolerance));
        prop_assert!(back.imaginary().approx_eq(z.imaginary(), &tolerance));
    }

    #[test]
    fn roots_raise_back(re in -50i64..50, im in -50i64..50, n in 2i64..6) {
        prop_assume!(re != 0 || im != 0);
        let z = Complex::new(Real::from(re), Real::from(im));
        let roots = z.nth_roots(n).unwrap();
        prop_assert_eq!(roots.len() as i64, n);
        let tolerance = epsilon("1e-20");
        for root in &roots {
            let raised = root.powi(n).unwrap().to_rect().unwrap();
            prop_assert!(raised.real().approx_eq(&Real::from(re), &tolerance));
            prop_assert!(raised.imaginary().approx_eq(&Real::from(im), &tolerance));
        }
        let mut arguments: Vec<f64> = roots.iter().map(|r| r.argument().unwrap().to_f64()).collect();
        arguments.sort_by(f64::total_cmp);
        let step = std::f64::consts::TAU / n as f64;
        for pair in arguments.windows(2) {
            prop_assert!((pair[1] - pair[0] - step).abs() < 1e-12);
        }
        let around = arguments[0] + std::f64::consts::TAU - arguments[arguments.len() - 1];
        prop_assert!((around - step).abs() < 1e-12);
    }
}
