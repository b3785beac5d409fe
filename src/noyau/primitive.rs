// src/noyau/primitive.rs
//
// Primitive symbolique (sans constante d’intégration).
//
// Couverture volontairement bornée :
// 1. linéarité (a ± b, -a, c·f, f/c)
// 2. constantes : ∫c = c·x
// 3. puissance : ∫u^n = u^(n+1) / (a·(n+1)), ∫u^-1 = log(u) / a
// 4. exponentielle : ∫c^u = c^u / (a·log(c))
// 5. fonctions usuelles de u
// ... où u = a·x + b est LINÉAIRE en x (a = u', constante).
// Hors de ce domaine : PrimitiveInconnue (jamais de résultat inventé).

use super::derivee::deriver;
use super::erreur::ErreurMoteur;
use super::expr::{add, div, entier, fonc, mul, neg, pow, sub, var, Expr, Fonction};

/// ∫ `expr` d`var`, simplifiée.
pub fn integrer(expr: &Expr, var: &str) -> Result<Expr, ErreurMoteur> {
    Ok(primitive_brute(&expr.clone().simplify(), var)?.simplify())
}

/// Si `u` est linéaire en `v` (u = a·v + b), renvoie a.
fn coeff_lineaire(u: &Expr, v: &str) -> Option<Expr> {
    if !u.contient_var(v) {
        return None;
    }
    let a = deriver(u, v);
    if a.contient_var(v) || a.est_zero() {
        None
    } else {
        Some(a)
    }
}

fn inconnue(expr: &Expr) -> ErreurMoteur {
    ErreurMoteur::PrimitiveInconnue(expr.to_string())
}

fn primitive_brute(expr: &Expr, v: &str) -> Result<Expr, ErreurMoteur> {
    use Expr::*;

    // ∫c = c·x
    if !expr.contient_var(v) {
        return Ok(mul(expr.clone(), var(v)));
    }

    match expr {
        Var(_) => Ok(div(pow(expr.clone(), entier(2)), entier(2))),

        Neg(a) => Ok(neg(primitive_brute(a, v)?)),

        Add(a, b) => Ok(add(primitive_brute(a, v)?, primitive_brute(b, v)?)),
        Sub(a, b) => Ok(sub(primitive_brute(a, v)?, primitive_brute(b, v)?)),

        Mul(a, b) => {
            if !a.contient_var(v) {
                return Ok(mul(a.as_ref().clone(), primitive_brute(b, v)?));
            }
            if !b.contient_var(v) {
                return Ok(mul(b.as_ref().clone(), primitive_brute(a, v)?));
            }
            Err(inconnue(expr))
        }

        Div(a, b) => {
            if !b.contient_var(v) {
                return Ok(div(primitive_brute(a, v)?, b.as_ref().clone()));
            }
            // c / u = c · u^-1
            if !a.contient_var(v) {
                let reciproque = pow(b.as_ref().clone(), entier(-1));
                return Ok(mul(a.as_ref().clone(), primitive_puissance(&reciproque, v)?));
            }
            Err(inconnue(expr))
        }

        Pow(..) => primitive_puissance(expr, v),

        Fonc(f, u) => {
            let a = coeff_lineaire(u, v).ok_or_else(|| inconnue(expr))?;
            let u = u.as_ref().clone();
            let brute = match f {
                Fonction::Sin => neg(fonc(Fonction::Cos, u)),
                Fonction::Cos => fonc(Fonction::Sin, u),
                Fonction::Tan => neg(fonc(Fonction::Log, fonc(Fonction::Cos, u))),
                Fonction::Sinh => fonc(Fonction::Cosh, u),
                Fonction::Cosh => fonc(Fonction::Sinh, u),
                Fonction::Exp => fonc(Fonction::Exp, u),
                // ∫√u = 2·u^(3/2) / 3
                Fonction::Sqrt => div(
                    mul(entier(2), pow(u, div(entier(3), entier(2)))),
                    entier(3),
                ),
                _ => return Err(inconnue(expr)),
            };
            Ok(div(brute, a))
        }

        Rat(_) | Pi | E | I => Ok(mul(expr.clone(), var(v))),
    }
}

fn primitive_puissance(expr: &Expr, v: &str) -> Result<Expr, ErreurMoteur> {
    let Expr::Pow(base, exp) = expr else {
        return Err(inconnue(expr));
    };

    // u^n, u linéaire, n constant
    if !exp.contient_var(v) {
        let a = coeff_lineaire(base, v).ok_or_else(|| inconnue(expr))?;
        let n = exp.as_ref().clone().simplify();

        if n == entier(-1) {
            return Ok(div(fonc(Fonction::Log, base.as_ref().clone()), a));
        }
        let n1 = add(n, entier(1));
        return Ok(div(
            pow(base.as_ref().clone(), n1.clone()),
            mul(a, n1),
        ));
    }

    // c^u, u linéaire, c constant
    if !base.contient_var(v) {
        let a = coeff_lineaire(exp, v).ok_or_else(|| inconnue(expr))?;
        return Ok(div(
            expr.clone(),
            mul(a, fonc(Fonction::Log, base.as_ref().clone())),
        ));
    }

    Err(inconnue(expr))
}
