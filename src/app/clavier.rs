// src/app/clavier.rs
//
// Dispositions de clavier par mode.
// Chaque bouton porte l’événement qu’il déclenche ; reconstruire remplace tout le clavier.

use crate::noyau::MoteurMath;

use super::etat::{AppCalc, Mode};
use super::repartition::Evenement;
use super::trace::Traceur;

const BASIQUE: &[&str] = &[
    "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "=", "+", "C",
];

const ALGEBRE: &[&str] = &[
    "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "x", "+", "C",
];

const EQUATION: &[&str] = &[
    "7", "8", "9", "/", "4", "5", "6", "*", "1", "2", "3", "-", "0", ".", "=", "+", "C",
    "Solve",
];

const CALCUL: &[&str] = &[
    "diff(", "integrate(", ")", "/", "x", "7", "8", "9", "*", "4", "5", "6", "-", "1", "2", "3",
    "+", "0", ".", "=", "C",
];

const TRIGO: &[&str] = &[
    "sin(", "cos(", "tan(", ")", "pi", "e", "7", "8", "9", "*", "4", "5", "6", "-", "1", "2",
    "3", "+", "0", ".", "=", "C",
];

const GRAPHE: &[&str] = &[
    "x", "^", "+", "-", "(", ")", "sin(", "cos(", "tan(", "pi", "e", "C", "Plot",
];

pub fn disposition(mode: Mode) -> &'static [&'static str] {
    match mode {
        Mode::Basique => BASIQUE,
        Mode::Algebre => ALGEBRE,
        Mode::Equation => EQUATION,
        Mode::Calcul => CALCUL,
        Mode::Trigo => TRIGO,
        Mode::Graphe => GRAPHE,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bouton {
    pub libelle: &'static str,
    pub action: Evenement,
}

/// Boutons du mode, dans l’ordre de la disposition.
pub fn construire(mode: Mode) -> Vec<Bouton> {
    disposition(mode)
        .iter()
        .map(|&libelle| Bouton {
            libelle,
            action: Evenement::Bouton(libelle.to_string()),
        })
        .collect()
}

impl<M: MoteurMath, T: Traceur> AppCalc<M, T> {
    /// Remplace le clavier, vide le tampon, surface de tracé visible ssi mode graph.
    pub fn charger_clavier(&mut self) {
        self.clavier = construire(self.mode);
        self.tampon.clear();
        self.surface_trace = self.mode == Mode::Graphe;
    }
}
