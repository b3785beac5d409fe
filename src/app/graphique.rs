// src/app/graphique.rs
//
// Traceur livré : garde les séries vivantes et les peint avec le Painter egui.
// Repère : abscisses du domaine en largeur, ordonnées finies (marge 5 %) en hauteur.
// Un NaN coupe la courbe en segments indépendants.

use eframe::egui::{
    self, epaint::CubicBezierShape, Align2, Color32, FontId, Pos2, Rect, Sense, Stroke,
};

use super::trace::{PoigneeCourbe, SerieEchantillons, StyleCourbe, Traceur};

/// Hauteur de la zone de tracé (points logiques).
const HAUTEUR_ZONE: f32 = 260.0;

/// Une étiquette d’abscisse tous les N échantillons.
const PAS_ETIQUETTES: usize = 50;

struct CourbeVivante {
    id: u64,
    serie: SerieEchantillons,
    style: StyleCourbe,
}

#[derive(Default)]
pub struct TraceurEgui {
    vivantes: Vec<CourbeVivante>,
    prochain_id: u64,
}

impl Traceur for TraceurEgui {
    fn creer_courbe(&mut self, serie: SerieEchantillons, style: &StyleCourbe) -> PoigneeCourbe {
        self.prochain_id += 1;
        self.vivantes.push(CourbeVivante {
            id: self.prochain_id,
            serie,
            style: style.clone(),
        });
        PoigneeCourbe::new(self.prochain_id)
    }

    fn detruire(&mut self, poignee: PoigneeCourbe) {
        self.vivantes.retain(|c| c.id != poignee.id());
    }
}

/// Bornes finies d’une suite de valeurs ; None si aucune.
fn bornes(valeurs: &[f64]) -> Option<(f64, f64)> {
    valeurs
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Fenêtre en y : bornes finies avec marge, [-1, 1] par défaut.
fn fenetre_y(valeurs: &[f64]) -> (f64, f64) {
    match bornes(valeurs) {
        None => (-1.0, 1.0),
        Some((lo, hi)) if lo == hi => (lo - 1.0, hi + 1.0),
        Some((lo, hi)) => {
            let marge = (hi - lo) * 0.05;
            (lo - marge, hi + marge)
        }
    }
}

/// Points consécutifs définis (les NaN séparent les segments).
fn segments(points: impl Iterator<Item = Option<Pos2>>) -> Vec<Vec<Pos2>> {
    let mut out: Vec<Vec<Pos2>> = Vec::new();
    let mut courant: Vec<Pos2> = Vec::new();
    for p in points {
        match p {
            Some(p) => courant.push(p),
            None if !courant.is_empty() => out.push(std::mem::take(&mut courant)),
            None => {}
        }
    }
    if !courant.is_empty() {
        out.push(courant);
    }
    out
}

/// Lissage de type Catmull-Rom : un cubique de Bézier par intervalle.
fn peindre_lisse(painter: &egui::Painter, seg: &[Pos2], tension: f32, stroke: Stroke) {
    let k = tension / 2.0;
    let dernier = seg.len() - 1;
    for i in 0..dernier {
        let p0 = seg[i.saturating_sub(1)];
        let p1 = seg[i];
        let p2 = seg[i + 1];
        let p3 = seg[(i + 2).min(dernier)];
        let c1 = p1 + (p2 - p0) * k;
        let c2 = p2 - (p3 - p1) * k;
        painter.add(CubicBezierShape::from_points_stroke(
            [p1, c1, c2, p2],
            false,
            Color32::TRANSPARENT,
            stroke,
        ));
    }
}

impl TraceurEgui {
    /// Peint la dernière courbe vivante (rien si aucune).
    pub fn peindre(&self, ui: &mut egui::Ui) {
        let Some(courbe) = self.vivantes.last() else {
            return;
        };
        let serie = &courbe.serie;
        let style = &courbe.style;

        let taille = egui::vec2(ui.available_width(), HAUTEUR_ZONE);
        let (reponse, painter) = ui.allocate_painter(taille, Sense::hover());
        let zone: Rect = reponse.rect;
        let visuels = ui.visuals();

        painter.rect_filled(zone, 0.0, visuels.extreme_bg_color);

        let (x_min, x_max) = bornes(&serie.abscisses).unwrap_or((-1.0, 1.0));
        let (y_min, y_max) = fenetre_y(&serie.ordonnees);
        let vers_ecran = |x: f64, y: f64| -> Pos2 {
            let tx = if x_max > x_min { (x - x_min) / (x_max - x_min) } else { 0.5 };
            let ty = (y - y_min) / (y_max - y_min);
            Pos2::new(
                zone.left() + tx as f32 * zone.width(),
                zone.bottom() - ty as f32 * zone.height(),
            )
        };

        // axes
        let trait_axe = Stroke::new(1.0, visuels.weak_text_color());
        if (x_min..=x_max).contains(&0.0) {
            let haut = vers_ecran(0.0, y_max);
            let bas = vers_ecran(0.0, y_min);
            painter.line_segment([haut, bas], trait_axe);
        }
        if (y_min..=y_max).contains(&0.0) {
            let gauche = vers_ecran(x_min, 0.0);
            let droite = vers_ecran(x_max, 0.0);
            painter.line_segment([gauche, droite], trait_axe);
        }

        // étiquettes + titres
        let police = FontId::monospace(10.0);
        let couleur_texte = visuels.text_color();
        for (i, etiquette) in serie.etiquettes.iter().enumerate().step_by(PAS_ETIQUETTES) {
            let pos = Pos2::new(vers_ecran(serie.abscisses[i], y_min).x, zone.bottom() - 2.0);
            painter.text(pos, Align2::CENTER_BOTTOM, etiquette, police.clone(), couleur_texte);
        }
        painter.text(
            zone.right_bottom() + egui::vec2(-4.0, -14.0),
            Align2::RIGHT_BOTTOM,
            style.titre_axe_x,
            police.clone(),
            couleur_texte,
        );
        painter.text(
            zone.left_top() + egui::vec2(4.0, 4.0),
            Align2::LEFT_TOP,
            style.titre_axe_y,
            police.clone(),
            couleur_texte,
        );
        painter.text(
            zone.center_top() + egui::vec2(0.0, 4.0),
            Align2::CENTER_TOP,
            &serie.titre,
            FontId::proportional(13.0),
            style.couleur,
        );

        // courbe
        let trait_courbe = Stroke::new(style.largeur_trait, style.couleur);
        let points = serie
            .abscisses
            .iter()
            .zip(&serie.ordonnees)
            .map(|(&x, &y)| y.is_finite().then(|| vers_ecran(x, y)));

        for seg in segments(points) {
            if seg.len() >= 3 && style.tension > 0.0 {
                peindre_lisse(&painter, &seg, style.tension, trait_courbe);
            } else if seg.len() >= 2 {
                painter.line(seg.clone(), trait_courbe);
            }
            if style.rayon_point > 0.0 || seg.len() == 1 {
                let rayon = style.rayon_point.max(style.largeur_trait / 2.0);
                for p in &seg {
                    painter.circle_filled(*p, rayon, style.couleur);
                }
            }
        }
    }
}
