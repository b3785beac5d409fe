// src/app/trace.rs
//
// Tracé de y = f(x) (bouton "Plot").
// - domaine fixe [X_MIN, X_MAX], pas PAS : 201 échantillons calculés par indice
//   (x_i = min + (max - min) * i / n), les deux bornes sont exactes
// - résultat complexe ou non fini => NaN (trou dans la courbe)
// - une seule courbe vivante : l’ancienne est détruite avant la création de la nouvelle

use eframe::egui::Color32;
use log::debug;

use crate::noyau::{ErreurMoteur, ExprCompilee, MoteurMath, Portee, Valeur};

use super::etat::AppCalc;
use super::resultat::VARIABLE;

pub const X_MIN: f64 = -10.0;
pub const X_MAX: f64 = 10.0;
pub const PAS: f64 = 0.1;

pub const MSG_TRACE_INVALIDE: &str = "Invalid expression for plot";

/// Poignée d’une courbe vivante chez le traceur. Ni Clone ni Copy : une seule propriétaire.
#[derive(Debug, PartialEq, Eq)]
pub struct PoigneeCourbe(u64);

impl PoigneeCourbe {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Série prête à tracer : une étiquette "{x:.2}" et une ordonnée par abscisse.
#[derive(Clone, Debug, PartialEq)]
pub struct SerieEchantillons {
    pub titre: String,
    pub etiquettes: Vec<String>,
    pub abscisses: Vec<f64>,
    pub ordonnees: Vec<f64>,
}

/// Style unique des courbes (tracé statique, sans animation).
#[derive(Clone, Debug, PartialEq)]
pub struct StyleCourbe {
    pub couleur: Color32,
    pub largeur_trait: f32,
    pub rayon_point: f32,
    pub tension: f32,
    pub titre_axe_x: &'static str,
    pub titre_axe_y: &'static str,
}

impl Default for StyleCourbe {
    fn default() -> Self {
        Self {
            couleur: Color32::from_rgb(0, 255, 255),
            largeur_trait: 2.0,
            rayon_point: 0.0,
            tension: 0.25,
            titre_axe_x: "x",
            titre_axe_y: "y",
        }
    }
}

/// Collaborateur de rendu des courbes.
pub trait Traceur {
    fn creer_courbe(&mut self, serie: SerieEchantillons, style: &StyleCourbe) -> PoigneeCourbe;

    fn detruire(&mut self, poignee: PoigneeCourbe);
}

fn nombre_intervalles() -> usize {
    ((X_MAX - X_MIN) / PAS).round() as usize
}

fn ordonnee(v: Valeur) -> f64 {
    match v {
        Valeur::Nombre(y) if y.is_finite() => y,
        Valeur::Nombre(_) | Valeur::Complexe(_) | Valeur::Symbolique(_) => f64::NAN,
    }
}

/// Échantillonne `f` sur le domaine ; la première erreur d’évaluation interrompt tout.
pub fn echantillonner(f: &ExprCompilee, source: &str) -> Result<SerieEchantillons, ErreurMoteur> {
    let n = nombre_intervalles();
    let mut serie = SerieEchantillons {
        titre: format!("y = {source}"),
        etiquettes: Vec::with_capacity(n + 1),
        abscisses: Vec::with_capacity(n + 1),
        ordonnees: Vec::with_capacity(n + 1),
    };

    let mut portee = Portee::vide().avec(VARIABLE, X_MIN);
    for i in 0..=n {
        let x = X_MIN + (X_MAX - X_MIN) * i as f64 / n as f64;
        portee.definir(VARIABLE, x);
        let y = ordonnee(f.evaluer(&portee)?);

        serie.etiquettes.push(format!("{x:.2}"));
        serie.abscisses.push(x);
        serie.ordonnees.push(y);
    }
    Ok(serie)
}

impl<M: MoteurMath, T: Traceur> AppCalc<M, T> {
    /// Plot : compile le tampon une fois, échantillonne, remplace la courbe vivante.
    /// En cas d’échec, l’ancienne courbe reste en place.
    pub fn tracer(&mut self) {
        self.surface_trace = true;

        let serie = self
            .moteur
            .compiler(&self.tampon)
            .and_then(|f| echantillonner(&f, &self.tampon));

        match serie {
            Ok(serie) => {
                self.detruire_courbe();
                let poignee = self.traceur.creer_courbe(serie, &StyleCourbe::default());
                debug!("courbe {} créée", poignee.id());
                self.courbe = Some(poignee);
            }
            Err(e) => {
                debug!("tracé de {:?} refusé: {e}", self.tampon);
                self.afficher(MSG_TRACE_INVALIDE);
            }
        }
    }

    pub(crate) fn detruire_courbe(&mut self) {
        if let Some(poignee) = self.courbe.take() {
            debug!("courbe {} détruite", poignee.id());
            self.traceur.detruire(poignee);
        }
    }
}
