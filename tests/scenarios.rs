use rungs::{Complex, Config, Consts, ContinuedFraction, MathContext, Numeric, Problem, ProblemKind};
use rungs::{Rational, Real, Special};

#[test]
fn third_as_decimal() {
    let third: Rational = "1/3".parse().unwrap();
    let d = third.as_decimal(MathContext::with_precision(10)).unwrap();
    assert_eq!(d.to_string(), "0.3333333333");
}

#[test]
fn pythagorean_magnitude() {
    let z: Complex = "3+4i".parse().unwrap();
    let m = z.magnitude().unwrap();
    assert_eq!(m, Real::from(5));
    assert!(m.is_exact());
}

#[test]
fn pi_to_twenty_digits() {
    let pi = Real::pi(MathContext::with_precision(20)).unwrap();
    assert!(pi.to_string().starts_with("3.1415926535897932384"));
    assert!(pi.is_irrational());
    let consts = Consts::default();
    assert_eq!(consts.pi(MathContext::with_precision(20)).unwrap(), pi);
}

#[test]
fn fibonacci_fraction() {
    let ones = ContinuedFraction::new(vec![1, 1, 1, 1, 1]).unwrap();
    assert_eq!(ones.to_rational().unwrap(), Rational::fraction(8, 5).unwrap());
    assert_eq!(ones.convergent(3), Rational::fraction(5, 3).unwrap());
}

#[test]
fn point_at_infinity() {
    let one = Numeric::from(1);
    let problem = one.divide(&Numeric::from(0)).unwrap_err();
    assert_eq!(problem, Problem::DivideByZero);
    assert_eq!(problem.kind(), ProblemKind::Arithmetic);

    let _guard = Config::default().extended(true).install();
    let zero = one.divide(&Special::PointAtInfinity.into()).unwrap();
    assert!(matches!(zero, Numeric::Special(Special::ExactZero)));
    assert!(zero.is_exact());
}

#[test]
fn negated_fraction() {
    let cf: ContinuedFraction = "[2; 3]".parse().unwrap();
    assert_eq!(cf.negate().unwrap().to_string(), "[-3; 1, 2]");
}

#[test]
fn e_as_fraction_and_decimal() {
    let ctx = MathContext::with_precision(15);
    let from_series = Real::e(ctx).unwrap();
    let from_fraction = ContinuedFraction::e().to_real(ctx).unwrap();
    assert_eq!(from_series.to_string(), "2.71828182845905");
    assert_eq!(from_fraction.to_string(), "2.71828182845905");
}

#[test]
fn constants() {
    let ctx = MathContext::with_precision(12);
    assert_eq!(Real::phi(ctx).unwrap().to_string(), "1.61803398875");
    assert_eq!(Real::gamma(ctx).unwrap().to_string(), "0.577215664902");
}
