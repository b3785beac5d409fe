// src/app/repartition.rs
//
// Point d’entrée unique des événements (boutons, clavier, sélecteur de mode).
//
// Routage des boutons, dans l’ordre :
//   "C" -> effacer | "=" -> évaluer | "Solve" -> résoudre | "Plot" -> tracer
//   sinon -> ajout verbatim du libellé
//
// Clavier : chiffres ASCII et + - * / ( ) . = x ^ (insensible à la casse) ajoutés tels quels,
// Enter évalue, Backspace retire un caractère, c/C efface, le reste est ignoré.

use log::debug;

use crate::noyau::MoteurMath;

use super::etat::{AppCalc, Mode};
use super::trace::Traceur;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Touche {
    Caractere(char),
    Entree,
    Retour,
    Autre,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Evenement {
    Bouton(String),
    Touche(Touche),
    ChangementMode(Mode),
}

/// Caractères ajoutés tels quels depuis le clavier.
pub fn caractere_accepte(c: char) -> bool {
    c.is_ascii_digit()
        || matches!(
            c.to_ascii_lowercase(),
            '+' | '-' | '*' | '/' | '(' | ')' | '.' | '=' | 'x' | '^'
        )
}

impl<M: MoteurMath, T: Traceur> AppCalc<M, T> {
    /// Traite un événement. Renvoie `true` s’il est consommé
    /// (le comportement par défaut de la plateforme doit alors être supprimé).
    pub fn gerer(&mut self, evt: Evenement) -> bool {
        debug!("événement: {evt:?}");
        match evt {
            Evenement::Bouton(libelle) => {
                self.gerer_bouton(&libelle);
                true
            }
            Evenement::Touche(touche) => self.gerer_touche(touche),
            Evenement::ChangementMode(mode) => {
                self.changer_mode(mode);
                true
            }
        }
    }

    fn gerer_bouton(&mut self, libelle: &str) {
        match libelle {
            "C" => self.effacer(),
            "=" => self.evaluer(),
            "Solve" => self.resoudre(),
            "Plot" => self.tracer(),
            _ => self.ajouter(libelle),
        }
    }

    fn gerer_touche(&mut self, touche: Touche) -> bool {
        match touche {
            Touche::Caractere(c) if caractere_accepte(c) => {
                let mut octets = [0u8; 4];
                self.ajouter(c.encode_utf8(&mut octets));
                true
            }
            Touche::Caractere('c' | 'C') => {
                self.effacer();
                true
            }
            Touche::Entree => {
                self.evaluer();
                true
            }
            Touche::Retour => {
                self.retour_arriere();
                true
            }
            Touche::Caractere(_) | Touche::Autre => false,
        }
    }
}
