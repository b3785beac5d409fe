//! src/app/etat.rs
//!
//! État de la calculatrice (sans vue).
//!
//! Rôle : porter le tampon d’entrée, le mode actif, le texte affiché, le clavier courant
//! et la poignée de courbe, avec les opérations élémentaires sur le tampon.
//!
//! Contrats :
//! - Le tampon est exactement ce qui partira au moteur à la prochaine évaluation.
//! - Au plus une courbe vivante ; elle est détruite avant toute nouvelle création
//!   et à chaque effacement.
//! - Aucune persistance : tout repart de zéro au lancement.

use log::info;

use crate::noyau::{MoteurMath, NoyauNumicore};

use super::clavier::Bouton;
use super::graphique::TraceurEgui;
use super::trace::{PoigneeCourbe, Traceur};

/// Texte affiché quand le tampon est vide.
pub const AFFICHAGE_VIDE: &str = "0";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Basique,
    Algebre,
    Equation,
    Calcul,
    Trigo,
    Graphe,
}

impl Mode {
    /// Ordre du sélecteur.
    pub const TOUS: [Mode; 6] = [
        Mode::Basique,
        Mode::Algebre,
        Mode::Equation,
        Mode::Calcul,
        Mode::Trigo,
        Mode::Graphe,
    ];

    /// Nom externe (celui des dispositions de clavier).
    pub fn nom(self) -> &'static str {
        match self {
            Mode::Basique => "basic",
            Mode::Algebre => "algebra",
            Mode::Equation => "equation",
            Mode::Calcul => "calculus",
            Mode::Trigo => "trig",
            Mode::Graphe => "graph",
        }
    }

    /// Nom externe avec majuscule initiale : "Mode: Calculus".
    pub fn titre(self) -> String {
        let nom = self.nom();
        let mut car = nom.chars();
        match car.next() {
            Some(c) => c.to_uppercase().chain(car).collect(),
            None => String::new(),
        }
    }
}

pub struct AppCalc<M: MoteurMath = NoyauNumicore, T: Traceur = TraceurEgui> {
    // --- collaborateurs ---
    pub(crate) moteur: M,
    pub(crate) traceur: T,

    // --- état ---
    pub mode: Mode,
    pub tampon: String,
    pub affichage: String,

    // --- surface ---
    pub clavier: Vec<Bouton>,
    pub surface_trace: bool,
    pub(crate) courbe: Option<PoigneeCourbe>,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::nouveau(NoyauNumicore, TraceurEgui::default())
    }
}

impl<M: MoteurMath, T: Traceur> AppCalc<M, T> {
    /// État de démarrage : mode basic, tampon vide, "Mode: Basic" affiché.
    pub fn nouveau(moteur: M, traceur: T) -> Self {
        let mut app = Self {
            moteur,
            traceur,
            mode: Mode::default(),
            tampon: String::new(),
            affichage: String::new(),
            clavier: Vec::new(),
            surface_trace: false,
            courbe: None,
        };
        app.changer_mode(Mode::default());
        app
    }

    pub fn courbe_vivante(&self) -> bool {
        self.courbe.is_some()
    }

    /// Réaffiche le tampon ("0" s’il est vide).
    pub(crate) fn afficher_tampon(&mut self) {
        self.affichage = if self.tampon.is_empty() {
            AFFICHAGE_VIDE.to_string()
        } else {
            self.tampon.clone()
        };
    }

    pub(crate) fn afficher(&mut self, texte: &str) {
        self.affichage = texte.to_string();
    }

    /// Ajout verbatim en fin de tampon.
    pub fn ajouter(&mut self, texte: &str) {
        self.tampon.push_str(texte);
        self.afficher_tampon();
    }

    /// Retire le dernier caractère (sans effet sur un tampon vide).
    pub fn retour_arriere(&mut self) {
        self.tampon.pop();
        self.afficher_tampon();
    }

    /// C : tampon vide, courbe détruite, surface masquée, "0" affiché.
    pub fn effacer(&mut self) {
        self.tampon.clear();
        self.detruire_courbe();
        self.surface_trace = false;
        self.afficher(AFFICHAGE_VIDE);
    }

    /// Sélection explicite d’un mode par l’utilisateur.
    pub fn changer_mode(&mut self, mode: Mode) {
        info!("mode: {} -> {}", self.mode.nom(), mode.nom());
        self.mode = mode;
        self.detruire_courbe();
        self.charger_clavier();
        self.afficher(&format!("Mode: {}", mode.titre()));
    }
}
