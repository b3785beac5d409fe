// src/app.rs
//
// NumiCore: module App (racine)
// ------------------------------
// Rôle:
// - Déclarer les sous-modules (état, clavier, répartition, résultat, tracé, vue)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier physique : lu globalement à chaque frame (pas de champ texte à focaliser).
// Un événement consommé par `gerer` est retiré de l’entrée egui.

pub mod clavier;
pub mod etat;
pub mod graphique;
pub mod repartition;
pub mod resultat;
pub mod trace;
pub mod vue;

#[cfg(test)]
mod tests_scenarios;

pub use etat::AppCalc;

use eframe::egui;

use crate::noyau::MoteurMath;
use graphique::TraceurEgui;
use repartition::{Evenement, Touche};

/// Traduit un événement egui en touches de calculatrice.
fn touches(evt: &egui::Event) -> Vec<Touche> {
    match evt {
        egui::Event::Text(texte) => texte.chars().map(Touche::Caractere).collect(),
        egui::Event::Key {
            key, pressed: true, ..
        } => match key {
            egui::Key::Enter => vec![Touche::Entree],
            egui::Key::Backspace => vec![Touche::Retour],
            _ => vec![Touche::Autre],
        },
        _ => Vec::new(),
    }
}

impl<M: MoteurMath> AppCalc<M, TraceurEgui> {
    fn gerer_clavier(&mut self, ctx: &egui::Context) {
        let evenements = ctx.input(|i| i.events.clone());

        let mut consommes: Vec<usize> = Vec::new();
        for (rang, evt) in evenements.iter().enumerate() {
            let mut pris = false;
            for touche in touches(evt) {
                pris |= self.gerer(Evenement::Touche(touche));
            }
            if pris {
                consommes.push(rang);
            }
        }

        if !consommes.is_empty() {
            ctx.input_mut(|i| {
                let mut rang = 0;
                i.events.retain(|_| {
                    let garder = !consommes.contains(&rang);
                    rang += 1;
                    garder
                });
            });
        }
    }
}

impl<M: MoteurMath> eframe::App for AppCalc<M, TraceurEgui> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.gerer_clavier(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
