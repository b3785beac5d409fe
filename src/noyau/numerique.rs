// src/noyau/numerique.rs
//
// Évaluation numérique (flottants) d’un AST exact.
// - Chemin réel rapide tant que tout reste réel.
// - Bascule en complexe seulement quand le réel n’a pas de sens :
//   sqrt/log d’un négatif, puissance fractionnaire d’un négatif, asin/acos hors [-1, 1].
// - Les non-finis (1/0, log(0)) sont PROPAGÉS ici : c’est l’appelant qui tranche
//   (l’évaluation générale les refuse, le traceur en fait des trous).

use num_complex::Complex64;
use num_traits::ToPrimitive;

use super::erreur::ErreurMoteur;
use super::expr::{Expr, Fonction};

/// Liaisons variable -> valeur réelle (ex: {x: 1.5} pour le traceur).
#[derive(Clone, Debug, Default)]
pub struct Portee {
    liaisons: Vec<(String, f64)>,
}

impl Portee {
    pub fn vide() -> Self {
        Self::default()
    }

    pub fn avec(mut self, nom: &str, valeur: f64) -> Self {
        self.definir(nom, valeur);
        self
    }

    /// Remplace la valeur si la variable existe déjà (utile en boucle d’échantillonnage).
    pub fn definir(&mut self, nom: &str, valeur: f64) {
        match self.liaisons.iter_mut().find(|(n, _)| n == nom) {
            Some((_, v)) => *v = valeur,
            None => self.liaisons.push((nom.to_string(), valeur)),
        }
    }

    fn valeur(&self, nom: &str) -> Option<f64> {
        self.liaisons
            .iter()
            .find(|(n, _)| n == nom)
            .map(|(_, v)| *v)
    }
}

fn reel(x: f64) -> Complex64 {
    Complex64::new(x, 0.0)
}

fn est_reel(z: &Complex64) -> bool {
    z.im == 0.0
}

/// Évalue `expr` dans `portee`. Variable non liée => SymboleInconnu.
pub fn evaluer(expr: &Expr, portee: &Portee) -> Result<Complex64, ErreurMoteur> {
    use Expr::*;

    match expr {
        Rat(r) => Ok(reel(r.to_f64().unwrap_or(f64::NAN))),
        Pi => Ok(reel(std::f64::consts::PI)),
        E => Ok(reel(std::f64::consts::E)),
        I => Ok(Complex64::i()),
        Var(v) => portee
            .valeur(v)
            .map(reel)
            .ok_or_else(|| ErreurMoteur::SymboleInconnu(v.clone())),

        Neg(a) => Ok(-evaluer(a, portee)?),

        Add(a, b) => Ok(evaluer(a, portee)? + evaluer(b, portee)?),
        Sub(a, b) => Ok(evaluer(a, portee)? - evaluer(b, portee)?),
        Mul(a, b) => {
            let (x, y) = (evaluer(a, portee)?, evaluer(b, portee)?);
            if est_reel(&x) && est_reel(&y) {
                Ok(reel(x.re * y.re))
            } else {
                Ok(x * y)
            }
        }
        Div(a, b) => {
            let (x, y) = (evaluer(a, portee)?, evaluer(b, portee)?);
            // en réel, 1/0 donne ±inf (et non NaN+NaN·i comme en complexe)
            if est_reel(&x) && est_reel(&y) {
                Ok(reel(x.re / y.re))
            } else {
                Ok(x / y)
            }
        }
        Pow(a, b) => {
            let (x, y) = (evaluer(a, portee)?, evaluer(b, portee)?);
            Ok(puissance(x, y))
        }

        Fonc(f, a) => Ok(appliquer(*f, evaluer(a, portee)?)),
    }
}

fn puissance(x: Complex64, y: Complex64) -> Complex64 {
    if est_reel(&x) && est_reel(&y) && (x.re >= 0.0 || y.re.fract() == 0.0) {
        return reel(x.re.powf(y.re));
    }
    if x.re == 0.0 && x.im == 0.0 {
        return reel(0.0_f64.powf(y.re));
    }
    x.powc(y)
}

fn appliquer(f: Fonction, z: Complex64) -> Complex64 {
    use Fonction::*;

    if est_reel(&z) {
        let x = z.re;
        let r = match f {
            Sin => Some(x.sin()),
            Cos => Some(x.cos()),
            Tan => Some(x.tan()),
            Atan => Some(x.atan()),
            Sinh => Some(x.sinh()),
            Cosh => Some(x.cosh()),
            Tanh => Some(x.tanh()),
            Exp => Some(x.exp()),
            Abs => Some(x.abs()),
            Asin if (-1.0..=1.0).contains(&x) => Some(x.asin()),
            Acos if (-1.0..=1.0).contains(&x) => Some(x.acos()),
            Sqrt if x >= 0.0 => Some(x.sqrt()),
            Log if x >= 0.0 => Some(x.ln()),
            Log10 if x >= 0.0 => Some(x.log10()),
            Asin | Acos | Sqrt | Log | Log10 => None,
        };
        if let Some(v) = r {
            return reel(v);
        }
    }

    match f {
        Sin => z.sin(),
        Cos => z.cos(),
        Tan => z.tan(),
        Asin => z.asin(),
        Acos => z.acos(),
        Atan => z.atan(),
        Sinh => z.sinh(),
        Cosh => z.cosh(),
        Tanh => z.tanh(),
        Sqrt => z.sqrt(),
        Exp => z.exp(),
        Log => z.ln(),
        Log10 => z.log10(),
        Abs => reel(z.norm()),
    }
}
