// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// - Sélecteur de mode, écran, clavier du mode, zone de tracé
// - Les clics ne modifient pas l’état pendant le rendu : ils sont collectés
//   puis envoyés à `gerer` une fois la frame construite
// - Le clavier physique est lu globalement dans app.rs

use eframe::egui;

use crate::noyau::MoteurMath;

use super::etat::{AppCalc, Mode};
use super::graphique::TraceurEgui;
use super::repartition::Evenement;

/// Colonnes du clavier.
const COLONNES: usize = 4;

/// Taille d’une touche (points logiques).
const TAILLE_TOUCHE: [f32; 2] = [64.0, 36.0];

impl<M: MoteurMath> AppCalc<M, TraceurEgui> {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        let mut evenements: Vec<Evenement> = Vec::new();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("NumiCore");
                ui.add_space(6.0);

                self.ui_mode(ui, &mut evenements);

                ui.add_space(8.0);
                Self::champ_ecran(ui, &self.affichage);

                ui.add_space(8.0);
                self.ui_clavier(ui, &mut evenements);

                if self.surface_trace {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.ui_trace(ui);
                }
            });

        for evt in evenements {
            self.gerer(evt);
        }
    }

    fn ui_mode(&self, ui: &mut egui::Ui, evenements: &mut Vec<Evenement>) {
        let mut choisi = self.mode;
        ui.horizontal(|ui| {
            ui.label("Mode :");
            egui::ComboBox::from_id_salt("selecteur_mode")
                .selected_text(self.mode.titre())
                .show_ui(ui, |ui| {
                    for mode in Mode::TOUS {
                        ui.selectable_value(&mut choisi, mode, mode.titre());
                    }
                });
        });
        if choisi != self.mode {
            evenements.push(Evenement::ChangementMode(choisi));
        }
    }

    fn ui_clavier(&self, ui: &mut egui::Ui, evenements: &mut Vec<Evenement>) {
        egui::Grid::new("clavier_numicore")
            .num_columns(COLONNES)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for (i, bouton) in self.clavier.iter().enumerate() {
                    let resp = ui.add_sized(TAILLE_TOUCHE, egui::Button::new(bouton.libelle));
                    if resp.clicked() {
                        evenements.push(bouton.action.clone());
                    }
                    if (i + 1) % COLONNES == 0 {
                        ui.end_row();
                    }
                }
            });
    }

    fn ui_trace(&self, ui: &mut egui::Ui) {
        if self.courbe_vivante() {
            self.traceur.peindre(ui);
        } else {
            ui.weak("Saisir f(x) puis Plot");
        }
    }

    fn champ_ecran(ui: &mut egui::Ui, contenu: &str) {
        // Écran lecture seule, aligné à droite comme une calculatrice.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(contenu).monospace().size(26.0));
                });
            });
    }
}
