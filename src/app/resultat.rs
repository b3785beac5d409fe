// src/app/resultat.rs
//
// Évaluation ("=" / Enter) et résolution d’équation ("Solve").
// Les échecs du moteur s’arrêtent ici : message fixe à l’écran, détail au journal.

use log::debug;

use crate::noyau::format::{format_complexe, format_nombre};
use crate::noyau::{ErreurMoteur, MoteurMath, Valeur};

use super::etat::{AppCalc, Mode};
use super::trace::Traceur;

pub const MSG_ERREUR: &str = "Error";
pub const MSG_SANS_EGAL: &str = "Use '=' in equation";
pub const MSG_EQUATION_INVALIDE: &str = "Invalid equation";
pub const MSG_AUCUNE_SOLUTION: &str = "No solution";
pub const MSG_EQN_INVALIDE: &str = "Invalid Eqn";

/// Seule variable connue de la calculatrice.
pub const VARIABLE: &str = "x";

const ENVELOPPE_DERIVEE: &str = "diff(";
const ENVELOPPE_PRIMITIVE: &str = "integrate(";

pub fn formater_valeur(v: &Valeur) -> String {
    match v {
        Valeur::Nombre(x) => format_nombre(*x),
        Valeur::Complexe(z) => format_complexe(*z),
        Valeur::Symbolique(e) => e.to_string(),
    }
}

/// Contenu de `enveloppe(...)`, si le tampon a exactement cette forme.
fn deballer<'a>(tampon: &'a str, enveloppe: &str) -> Option<&'a str> {
    tampon.strip_prefix(enveloppe)?.strip_suffix(')')
}

impl<M: MoteurMath, T: Traceur> AppCalc<M, T> {
    /// Succès : le résultat remplace le tampon. Échec : "Error", tampon vidé.
    pub fn evaluer(&mut self) {
        match self.calculer() {
            Ok(v) => {
                self.tampon = formater_valeur(&v);
                self.afficher_tampon();
            }
            Err(e) => {
                debug!("évaluation de {:?} refusée: {e}", self.tampon);
                self.afficher(MSG_ERREUR);
                self.tampon.clear();
            }
        }
    }

    fn calculer(&self) -> Result<Valeur, ErreurMoteur> {
        let t = self.tampon.as_str();
        if self.mode == Mode::Calcul {
            if let Some(corps) = deballer(t, ENVELOPPE_DERIVEE) {
                return self.moteur.deriver(corps, VARIABLE);
            }
            if let Some(corps) = deballer(t, ENVELOPPE_PRIMITIVE) {
                return self.moteur.integrer(corps, VARIABLE);
            }
        }
        self.moteur.evaluer(t)
    }

    /// Résout `gauche = droite` en x via la forme zéro `(gauche) - (droite)`.
    pub fn resoudre(&mut self) {
        let Some((gauche, droite)) = self.tampon.split_once('=') else {
            return self.afficher(MSG_SANS_EGAL);
        };
        if droite.contains('=') {
            return self.afficher(MSG_EQUATION_INVALIDE);
        }

        let equation = format!("({gauche}) - ({droite})");
        match self.moteur.resoudre(&equation, VARIABLE) {
            Ok(racines) if racines.is_empty() => self.afficher(MSG_AUCUNE_SOLUTION),
            Ok(racines) => {
                self.tampon = racines
                    .iter()
                    .map(|r| format!("{VARIABLE}={}", formater_valeur(r)))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.afficher_tampon();
            }
            Err(e) => {
                debug!("équation {equation:?} refusée: {e}");
                self.afficher(MSG_EQN_INVALIDE);
                self.tampon.clear();
            }
        }
    }
}
