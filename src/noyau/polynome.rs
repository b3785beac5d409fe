// src/noyau/polynome.rs
//
// Résolution d’équations polynomiales en une variable (forme zéro : P(x) = 0).
//
// Pipeline : Expr -> coefficients rationnels exacts -> racines.
// - degré 0 : P = c ≠ 0 => aucune solution ; P ≡ 0 => indéterminée (erreur)
// - degré 1 : racine rationnelle exacte
// - degré 2 : discriminant exact ; racines exactes si carré parfait,
//             sinon flottantes ; complexes conjuguées si discriminant < 0
// - degré > 2 : non supporté
//
// Ordre des racines (stable) : (-b + √Δ) / 2a puis (-b - √Δ) / 2a.

use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use super::erreur::ErreurMoteur;
use super::expr::{rational_sqrt_exact, Expr};
use super::numerique::{evaluer, Portee};

/// Exposant entier maximal accepté pour développer u^n.
const DEGRE_DEVELOPPE_MAX: i64 = 16;

/// Degré maximal résolu.
const DEGRE_MAX: usize = 2;

/// Degré maximal d’un développement intermédiaire (les termes peuvent encore s’annuler).
const DEGRE_INTERMEDIAIRE_MAX: usize = 64;

/// Coefficients c[0] + c[1]·x + c[2]·x² + ...
type Coeffs = Vec<BigRational>;

fn normalise(mut c: Coeffs) -> Coeffs {
    while c.len() > 1 && c.last().is_some_and(|r| r.is_zero()) {
        c.pop();
    }
    c
}

fn somme(a: &[BigRational], b: &[BigRational], signe_b: bool) -> Coeffs {
    let n = a.len().max(b.len());
    let mut out = vec![BigRational::zero(); n];
    for (i, r) in a.iter().enumerate() {
        out[i] += r;
    }
    for (i, r) in b.iter().enumerate() {
        if signe_b {
            out[i] += r;
        } else {
            out[i] -= r;
        }
    }
    normalise(out)
}

/// Anti-gel : le développement s’arrête dès que le degré dépasse la borne.
fn borne_degre(degre: usize) -> Result<(), ErreurMoteur> {
    if degre > DEGRE_INTERMEDIAIRE_MAX {
        return Err(ErreurMoteur::DegreNonSupporte(degre));
    }
    Ok(())
}

fn produit(a: &[BigRational], b: &[BigRational]) -> Result<Coeffs, ErreurMoteur> {
    borne_degre((a.len() - 1) + (b.len() - 1))?;
    let mut out = vec![BigRational::zero(); a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    Ok(normalise(out))
}

/// Valeur rationnelle d’une sous-expression constante (sans `v`).
/// Exacte si l’arbre se replie en Rat, sinon approchée via l’évaluation flottante.
fn constante(e: &Expr) -> Result<BigRational, ErreurMoteur> {
    if let Expr::Rat(r) = e.clone().simplify() {
        return Ok(r);
    }
    let z = evaluer(e, &Portee::vide())?;
    if z.im != 0.0 || !z.re.is_finite() {
        return Err(ErreurMoteur::NonFini);
    }
    BigRational::from_f64(z.re).ok_or(ErreurMoteur::NonFini)
}

/// Extrait les coefficients de `expr` vue comme polynôme en `v`.
pub fn coefficients(expr: &Expr, v: &str) -> Result<Coeffs, ErreurMoteur> {
    use Expr::*;

    let non_poly = || ErreurMoteur::NonPolynomial(v.to_string());

    if !expr.contient_var(v) {
        return Ok(normalise(vec![constante(expr)?]));
    }

    match expr {
        Var(_) => Ok(vec![BigRational::zero(), BigRational::from_integer(1.into())]),

        Neg(a) => Ok(coefficients(a, v)?.into_iter().map(|r| -r).collect()),

        Add(a, b) => Ok(somme(&coefficients(a, v)?, &coefficients(b, v)?, true)),
        Sub(a, b) => Ok(somme(&coefficients(a, v)?, &coefficients(b, v)?, false)),
        Mul(a, b) => produit(&coefficients(a, v)?, &coefficients(b, v)?),

        Div(a, b) => {
            if b.contient_var(v) {
                return Err(non_poly());
            }
            let d = constante(b)?;
            if d.is_zero() {
                return Err(ErreurMoteur::NonFini);
            }
            Ok(coefficients(a, v)?.into_iter().map(|r| r / &d).collect())
        }

        Pow(a, b) => {
            if b.contient_var(v) {
                return Err(non_poly());
            }
            let n = constante(b)?;
            if !n.is_integer() || n.is_negative() {
                return Err(non_poly());
            }
            let n = n.to_integer().to_i64().ok_or_else(non_poly)?;
            if n > DEGRE_DEVELOPPE_MAX {
                return Err(non_poly());
            }
            let base = coefficients(a, v)?;
            borne_degre((base.len() - 1).saturating_mul(n as usize))?;
            let mut acc: Coeffs = vec![BigRational::from_integer(1.into())];
            for _ in 0..n {
                acc = produit(&acc, &base)?;
            }
            Ok(acc)
        }

        Rat(_) | Pi | E | I | Fonc(..) => Err(non_poly()),
    }
}

/// Racines de P(v) = 0.
pub fn racines(expr: &Expr, v: &str) -> Result<Vec<Complex64>, ErreurMoteur> {
    let c = coefficients(expr, v)?;
    let degre = c.len() - 1;

    let f = |r: &BigRational| r.to_f64().unwrap_or(f64::NAN);
    let reelle = |r: BigRational| Complex64::new(f(&r), 0.0);

    match degre {
        0 => {
            if c[0].is_zero() {
                Err(ErreurMoteur::Indeterminee)
            } else {
                Ok(Vec::new())
            }
        }

        1 => Ok(vec![reelle(-&c[0] / &c[1])]),

        2 => {
            let (a, b, cc) = (&c[2], &c[1], &c[0]);
            let deux_a = a * BigRational::from_integer(2.into());
            let delta = b * b - a * cc * BigRational::from_integer(4.into());

            if delta.is_zero() {
                return Ok(vec![reelle(-b / &deux_a)]);
            }

            if delta.is_positive() {
                if let Some(rd) = rational_sqrt_exact(&delta) {
                    return Ok(vec![
                        reelle((-b + &rd) / &deux_a),
                        reelle((-b - &rd) / &deux_a),
                    ]);
                }
                let rd = f(&delta).sqrt();
                let (fb, f2a) = (f(b), f(&deux_a));
                return Ok(vec![
                    Complex64::new((-fb + rd) / f2a, 0.0),
                    Complex64::new((-fb - rd) / f2a, 0.0),
                ]);
            }

            // Δ < 0 : racines conjuguées
            let re = f(&(-b / &deux_a));
            let im = match rational_sqrt_exact(&-&delta) {
                Some(rd) => f(&(rd / &deux_a)),
                None => f(&-&delta).sqrt() / f(&deux_a),
            };
            Ok(vec![Complex64::new(re, im), Complex64::new(re, -im)])
        }

        d => {
            debug_assert!(d > DEGRE_MAX);
            Err(ErreurMoteur::DegreNonSupporte(d))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::expr::rational_pow_int;
    use crate::noyau::jetons::tokenize;
    use crate::noyau::rpn::{from_rpn, to_rpn};
    use num_bigint::BigInt;

    /// P(x) exact, pour vérifier les coefficients.
    fn evalue_exact(c: &[BigRational], x: &BigRational) -> BigRational {
        c.iter()
            .enumerate()
            .map(|(i, ci)| ci * rational_pow_int(x.clone(), i as i64))
            .fold(BigRational::zero(), |acc, t| acc + t)
    }

    fn parse(s: &str) -> Expr {
        from_rpn(&to_rpn(&tokenize(s).unwrap()).unwrap()).unwrap()
    }

    fn r(n: i64) -> BigRational {
        BigRational::from_integer(BigInt::from(n))
    }

    fn reels(s: &str) -> Vec<f64> {
        racines(&parse(s), "x")
            .unwrap()
            .into_iter()
            .map(|z| {
                assert_eq!(z.im, 0.0, "racine complexe inattendue pour {s:?}");
                z.re
            })
            .collect()
    }

    #[test]
    fn coefficients_developpes() {
        let c = coefficients(&parse("(x+1)^2"), "x").unwrap();
        assert_eq!(c, vec![r(1), r(2), r(1)]);
        assert_eq!(evalue_exact(&c, &r(3)), r(16));

        let c = coefficients(&parse("(x^2) - (4)"), "x").unwrap();
        assert_eq!(c, vec![r(-4), r(0), r(1)]);
    }

    #[test]
    fn lineaire() {
        assert_eq!(reels("(2*x+1) - (5)"), vec![2.0]);
        assert_eq!(reels("x/4 - 1"), vec![4.0]);
    }

    #[test]
    fn quadratique_ordre_stable() {
        assert_eq!(reels("(x^2-4) - (0)"), vec![2.0, -2.0]);
        assert_eq!(reels("x^2 - 2*x + 1"), vec![1.0]);
    }

    #[test]
    fn quadratique_irrationnelle() {
        let v = reels("x^2 - 2");
        assert!((v[0] - 2.0_f64.sqrt()).abs() < 1e-12);
        assert!((v[1] + 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn quadratique_complexe() {
        let v = racines(&parse("x^2 + 1"), "x").unwrap();
        assert_eq!(v, vec![Complex64::new(0.0, 1.0), Complex64::new(0.0, -1.0)]);
    }

    #[test]
    fn degre_zero() {
        assert!(racines(&parse("(x+1) - (x)"), "x").unwrap().is_empty());
        assert_eq!(
            racines(&parse("(x) - (x)"), "x"),
            Err(ErreurMoteur::Indeterminee)
        );
    }

    #[test]
    fn developpement_borne() {
        assert_eq!(
            coefficients(&parse("((((x^16)^16)^16)^16) - (0)"), "x"),
            Err(ErreurMoteur::DegreNonSupporte(256))
        );
        assert_eq!(
            coefficients(&parse("x^16 * x^16 * x^16 * x^16 * x^16"), "x"),
            Err(ErreurMoteur::DegreNonSupporte(80))
        );

        // les termes de haut degré qui s’annulent restent acceptés
        assert_eq!(reels("(x^2)^2 - x^4 + x - 3"), vec![3.0]);
    }

    #[test]
    fn refus() {
        assert_eq!(
            racines(&parse("x^3 - 1"), "x"),
            Err(ErreurMoteur::DegreNonSupporte(3))
        );
        assert!(matches!(
            racines(&parse("sin(x)"), "x"),
            Err(ErreurMoteur::NonPolynomial(_))
        ));
        assert!(matches!(
            racines(&parse("1/x - 1"), "x"),
            Err(ErreurMoteur::NonPolynomial(_))
        ));
    }
}
