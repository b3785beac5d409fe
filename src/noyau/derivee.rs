// src/noyau/derivee.rs
//
// Dérivation symbolique par rapport à une variable.
// Règles : somme, produit, quotient, puissance, exponentielle, chaîne.
// Le résultat brut est très redondant (1 * x, x ^ 1, ...) : simplify() final obligatoire.

use super::expr::{add, div, entier, fonc, mul, neg, pow, sub, Expr, Fonction};

/// d/d`var` de `expr`, simplifiée.
pub fn deriver(expr: &Expr, var: &str) -> Expr {
    derivee_brute(expr, var).simplify()
}

fn derivee_brute(expr: &Expr, v: &str) -> Expr {
    use Expr::*;

    // constante vis-à-vis de v (couvre Rat, Pi, E, autres variables)
    if !expr.contient_var(v) {
        return entier(0);
    }

    match expr {
        Rat(_) | Pi | E | I => entier(0),
        Var(_) => entier(1), // contient_var => c’est v

        Neg(a) => neg(derivee_brute(a, v)),

        Add(a, b) => add(derivee_brute(a, v), derivee_brute(b, v)),
        Sub(a, b) => sub(derivee_brute(a, v), derivee_brute(b, v)),

        Mul(a, b) => {
            // facteur constant : pas de règle du produit
            if !a.contient_var(v) {
                return mul(a.as_ref().clone(), derivee_brute(b, v));
            }
            if !b.contient_var(v) {
                return mul(derivee_brute(a, v), b.as_ref().clone());
            }
            // (uv)' = u'v + uv'
            add(
                mul(derivee_brute(a, v), b.as_ref().clone()),
                mul(a.as_ref().clone(), derivee_brute(b, v)),
            )
        }

        Div(a, b) => {
            if !b.contient_var(v) {
                return div(derivee_brute(a, v), b.as_ref().clone());
            }
            // (u/w)' = (u'w - uw') / w^2
            div(
                sub(
                    mul(derivee_brute(a, v), b.as_ref().clone()),
                    mul(a.as_ref().clone(), derivee_brute(b, v)),
                ),
                pow(b.as_ref().clone(), entier(2)),
            )
        }

        Pow(a, b) => {
            let u = a.as_ref();
            let n = b.as_ref();

            if !n.contient_var(v) {
                // (u^n)' = n * u^(n-1) * u'
                return mul(
                    mul(n.clone(), pow(u.clone(), sub(n.clone(), entier(1)))),
                    derivee_brute(u, v),
                );
            }

            if !u.contient_var(v) {
                // (c^w)' = c^w * log(c) * w'   (log(e) se simplifie en 1)
                return mul(
                    mul(expr.clone(), fonc(Fonction::Log, u.clone())),
                    derivee_brute(n, v),
                );
            }

            // (u^w)' = u^w * (w' * log(u) + w * u' / u)
            mul(
                expr.clone(),
                add(
                    mul(derivee_brute(n, v), fonc(Fonction::Log, u.clone())),
                    div(mul(n.clone(), derivee_brute(u, v)), u.clone()),
                ),
            )
        }

        Fonc(f, a) => {
            let u = a.as_ref().clone();
            let du = derivee_brute(a, v);
            regle_chaine(*f, u, du)
        }
    }
}

/// f(u)' = f'(u) * u'
fn regle_chaine(f: Fonction, u: Expr, du: Expr) -> Expr {
    use Fonction::*;

    let un_moins_u2 = || sub(entier(1), pow(u.clone(), entier(2)));

    match f {
        Sin => mul(fonc(Cos, u), du),
        Cos => mul(neg(fonc(Sin, u)), du),
        Tan => div(du, pow(fonc(Cos, u), entier(2))),
        Asin => div(du, fonc(Sqrt, un_moins_u2())),
        Acos => neg(div(du, fonc(Sqrt, un_moins_u2()))),
        Atan => div(du, add(entier(1), pow(u, entier(2)))),
        Sinh => mul(fonc(Cosh, u), du),
        Cosh => mul(fonc(Sinh, u), du),
        Tanh => div(du, pow(fonc(Cosh, u), entier(2))),
        Sqrt => div(du, mul(entier(2), fonc(Sqrt, u))),
        Exp => mul(fonc(Exp, u), du),
        Log => div(du, u),
        Log10 => div(du, mul(u, fonc(Log, entier(10)))),
        Abs => mul(div(u.clone(), fonc(Abs, u)), du),
    }
}
