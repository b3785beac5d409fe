//! Noyau NumiCore (collaborateur mathématique)
//!
//! Organisation interne :
//! - jetons.rs    : tokenisation (décimaux exacts)
//! - rpn.rs       : shunting-yard + construction Expr
//! - expr.rs      : AST exact + simplify + affichage symbolique
//! - numerique.rs : évaluation flottante/complexe
//! - derivee.rs   : dérivée symbolique
//! - primitive.rs : primitive symbolique (substitution linéaire)
//! - polynome.rs  : équations polynomiales (degré ≤ 2)
//! - format.rs    : affichage des nombres
//!
//! L’UI ne voit que `MoteurMath`, `Valeur` et `ExprCompilee`.

pub mod derivee;
pub mod erreur;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod numerique;
pub mod polynome;
pub mod primitive;
pub mod rpn;

#[cfg(test)]
mod tests_moteur;

use num_complex::Complex64;

pub use erreur::ErreurMoteur;
pub use numerique::Portee;

use expr::Expr;

/// Résultat étiqueté renvoyé par le moteur.
#[derive(Clone, Debug, PartialEq)]
pub enum Valeur {
    Nombre(f64),
    Complexe(Complex64),
    Symbolique(Expr),
}

impl From<Complex64> for Valeur {
    fn from(z: Complex64) -> Self {
        if z.im == 0.0 {
            Valeur::Nombre(z.re)
        } else {
            Valeur::Complexe(z)
        }
    }
}

/// Expression analysée une fois, évaluée autant de fois que nécessaire.
#[derive(Clone, Debug)]
pub struct ExprCompilee {
    expr: Expr,
}

impl ExprCompilee {
    /// Non-finis propagés : au traceur de décider.
    pub fn evaluer(&self, portee: &Portee) -> Result<Valeur, ErreurMoteur> {
        numerique::evaluer(&self.expr, portee).map(Valeur::from)
    }
}

/// Capacités mathématiques consommées par l’application.
pub trait MoteurMath {
    /// Évaluation numérique générale (aucune variable libre, résultat fini).
    fn evaluer(&self, source: &str) -> Result<Valeur, ErreurMoteur>;

    fn deriver(&self, source: &str, var: &str) -> Result<Valeur, ErreurMoteur>;

    fn integrer(&self, source: &str, var: &str) -> Result<Valeur, ErreurMoteur>;

    /// Racines de `equation` (forme zéro) en `var`, dans l’ordre du solveur.
    fn resoudre(&self, equation: &str, var: &str) -> Result<Vec<Valeur>, ErreurMoteur>;

    fn compiler(&self, source: &str) -> Result<ExprCompilee, ErreurMoteur>;
}

/// Implémentation livrée : AST exact + évaluation complexe.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoyauNumicore;

impl NoyauNumicore {
    fn analyser(source: &str) -> Result<Expr, ErreurMoteur> {
        let s = source.trim();
        if s.is_empty() {
            return Err(ErreurMoteur::Vide);
        }
        let tokens = jetons::tokenize(s)?;
        log::trace!("jetons: {}", jetons::format_tokens(&tokens));
        let rpn = rpn::to_rpn(&tokens)?;
        rpn::from_rpn(&rpn)
    }
}

impl MoteurMath for NoyauNumicore {
    fn evaluer(&self, source: &str) -> Result<Valeur, ErreurMoteur> {
        let expr = Self::analyser(source)?.simplify();
        let z = numerique::evaluer(&expr, &Portee::vide())?;
        if !z.re.is_finite() || !z.im.is_finite() {
            return Err(ErreurMoteur::NonFini);
        }
        Ok(Valeur::from(z))
    }

    fn deriver(&self, source: &str, var: &str) -> Result<Valeur, ErreurMoteur> {
        let expr = Self::analyser(source)?;
        Ok(Valeur::Symbolique(derivee::deriver(&expr, var)))
    }

    fn integrer(&self, source: &str, var: &str) -> Result<Valeur, ErreurMoteur> {
        let expr = Self::analyser(source)?;
        primitive::integrer(&expr, var).map(Valeur::Symbolique)
    }

    fn resoudre(&self, equation: &str, var: &str) -> Result<Vec<Valeur>, ErreurMoteur> {
        let expr = Self::analyser(equation)?;
        let racines = polynome::racines(&expr, var)?;
        Ok(racines.into_iter().map(Valeur::from).collect())
    }

    fn compiler(&self, source: &str) -> Result<ExprCompilee, ErreurMoteur> {
        let expr = Self::analyser(source)?.simplify();
        Ok(ExprCompilee { expr })
    }
}
