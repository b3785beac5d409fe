//! Scénarios utilisateur de bout en bout : événements -> tampon / écran / courbe.
//!
//! Le traceur est remplacé par un double qui enregistre les séries reçues
//! et compte les courbes vivantes.

use quickcheck::{Arbitrary, Gen, QuickCheck};

use crate::noyau::NoyauNumicore;

use super::clavier::disposition;
use super::etat::{AppCalc, Mode};
use super::repartition::{Evenement, Touche};
use super::trace::{PoigneeCourbe, SerieEchantillons, StyleCourbe, Traceur};

#[derive(Default)]
struct TraceurFactice {
    vivantes: Vec<u64>,
    series: Vec<SerieEchantillons>,
    styles: Vec<StyleCourbe>,
    prochain: u64,
}

impl Traceur for TraceurFactice {
    fn creer_courbe(&mut self, serie: SerieEchantillons, style: &StyleCourbe) -> PoigneeCourbe {
        self.prochain += 1;
        self.vivantes.push(self.prochain);
        self.series.push(serie);
        self.styles.push(style.clone());
        PoigneeCourbe::new(self.prochain)
    }

    fn detruire(&mut self, poignee: PoigneeCourbe) {
        self.vivantes.retain(|&id| id != poignee.id());
    }
}

type App = AppCalc<NoyauNumicore, TraceurFactice>;

fn app(mode: Mode) -> App {
    let mut a = AppCalc::nouveau(NoyauNumicore, TraceurFactice::default());
    a.gerer(Evenement::ChangementMode(mode));
    a
}

fn boutons(a: &mut App, libelles: &[&str]) {
    for l in libelles {
        a.gerer(Evenement::Bouton(l.to_string()));
    }
}

fn taper(a: &mut App, texte: &str) {
    for c in texte.chars() {
        a.gerer(Evenement::Touche(Touche::Caractere(c)));
    }
}

/* ------------------------ Démarrage / modes ------------------------ */

#[test]
fn demarrage() {
    let a = AppCalc::nouveau(NoyauNumicore, TraceurFactice::default());
    assert_eq!(a.mode, Mode::Basique);
    assert_eq!(a.affichage, "Mode: Basic");
    assert!(a.tampon.is_empty());
    assert!(!a.surface_trace);
    assert_eq!(a.clavier.len(), disposition(Mode::Basique).len());
}

#[test]
fn changement_de_mode() {
    let mut a = app(Mode::Basique);
    taper(&mut a, "12");
    a.gerer(Evenement::ChangementMode(Mode::Calcul));
    assert_eq!(a.affichage, "Mode: Calculus");
    assert!(a.tampon.is_empty());
    assert_eq!(a.clavier[0].libelle, "diff(");
    assert!(!a.surface_trace);

    a.gerer(Evenement::ChangementMode(Mode::Graphe));
    assert_eq!(a.affichage, "Mode: Graph");
    assert!(a.surface_trace);
}

#[test]
fn changer_de_mode_detruit_la_courbe() {
    let mut a = app(Mode::Graphe);
    boutons(&mut a, &["x", "Plot"]);
    assert_eq!(a.traceur.vivantes.len(), 1);
    a.gerer(Evenement::ChangementMode(Mode::Basique));
    assert!(a.traceur.vivantes.is_empty());
    assert!(!a.courbe_vivante());
}

/* ------------------------ Saisie ------------------------ */

#[test]
fn ajout_verbatim() {
    let mut a = app(Mode::Trigo);
    boutons(&mut a, &["sin(", "pi", ")"]);
    assert_eq!(a.tampon, "sin(pi)");
    assert_eq!(a.affichage, "sin(pi)");
}

#[test]
fn clavier_physique() {
    let mut a = app(Mode::Basique);
    assert!(a.gerer(Evenement::Touche(Touche::Caractere('7'))));
    assert!(a.gerer(Evenement::Touche(Touche::Caractere('X'))));
    assert!(!a.gerer(Evenement::Touche(Touche::Caractere('a'))));
    assert!(!a.gerer(Evenement::Touche(Touche::Autre)));
    assert_eq!(a.tampon, "7X");

    assert!(a.gerer(Evenement::Touche(Touche::Caractere('c'))));
    assert_eq!(a.affichage, "0");
    assert!(a.tampon.is_empty());
}

#[test]
fn retour_arriere() {
    let mut a = app(Mode::Basique);
    taper(&mut a, "12");
    a.gerer(Evenement::Touche(Touche::Retour));
    assert_eq!(a.affichage, "1");
    a.gerer(Evenement::Touche(Touche::Retour));
    assert_eq!(a.affichage, "0");

    // tampon vide : sans effet
    assert!(a.gerer(Evenement::Touche(Touche::Retour)));
    assert!(a.tampon.is_empty());
    assert_eq!(a.affichage, "0");
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn evaluation_simple() {
    let mut a = app(Mode::Basique);
    boutons(&mut a, &["4", "="]);
    assert_eq!(a.affichage, "4");

    let mut a = app(Mode::Basique);
    boutons(&mut a, &["2", "+", "3", "*", "4", "="]);
    assert_eq!(a.affichage, "14");
    assert_eq!(a.tampon, "14");

    // le résultat se prolonge
    boutons(&mut a, &["/", "7", "="]);
    assert_eq!(a.affichage, "2");
}

#[test]
fn entree_evalue() {
    let mut a = app(Mode::Basique);
    taper(&mut a, "0.1+0.2");
    a.gerer(Evenement::Touche(Touche::Entree));
    assert_eq!(a.affichage, "0.3");
}

#[test]
fn division_par_zero() {
    let mut a = app(Mode::Basique);
    boutons(&mut a, &["1", "/", "0", "="]);
    assert_eq!(a.affichage, "Error");
    assert!(a.tampon.is_empty());
}

#[test]
fn tampon_vide_evalue_en_erreur() {
    let mut a = app(Mode::Basique);
    boutons(&mut a, &["="]);
    assert_eq!(a.affichage, "Error");
}

#[test]
fn calcul_derivee_et_primitive() {
    let mut a = app(Mode::Calcul);
    boutons(&mut a, &["diff(", "x"]);
    taper(&mut a, "^2");
    boutons(&mut a, &[")", "="]);
    assert_eq!(a.affichage, "2 * x");

    let mut a = app(Mode::Calcul);
    boutons(&mut a, &["integrate(", "x", ")", "="]);
    assert_eq!(a.affichage, "x ^ 2 / 2");

    // hors enveloppe : évaluation générale
    let mut a = app(Mode::Calcul);
    boutons(&mut a, &["8", "/", "2", "="]);
    assert_eq!(a.affichage, "4");
}

#[test]
fn enveloppe_hors_mode_calcul() {
    let mut a = app(Mode::Basique);
    a.tampon = "diff(x^2)".to_string();
    boutons(&mut a, &["="]);
    assert_eq!(a.affichage, "Error");
}

#[test]
fn trigo_telle_quelle() {
    let mut a = app(Mode::Trigo);
    boutons(&mut a, &["cos(", "0", ")", "+", "e", "-", "e", "="]);
    assert_eq!(a.affichage, "1");
}

#[test]
fn resultat_complexe() {
    let mut a = app(Mode::Graphe);
    a.tampon = "sqrt(-4)".to_string();
    a.gerer(Evenement::Touche(Touche::Entree));
    assert_eq!(a.affichage, "2i");
}

#[test]
fn resultat_complexe_enchaine() {
    let mut a = app(Mode::Basique);
    a.tampon = "sqrt(-4)".to_string();
    boutons(&mut a, &["="]);
    assert_eq!(a.tampon, "2i");

    boutons(&mut a, &["+", "1", "="]);
    assert_eq!(a.affichage, "1 + 2i");
    assert_eq!(a.tampon, "1 + 2i");
}

/* ------------------------ Équations ------------------------ */

#[test]
fn equation_du_second_degre() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "x^2-4=0");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "x=2, x=-2");
    assert_eq!(a.tampon, "x=2, x=-2");
}

#[test]
fn equation_lineaire() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "2*x+1=7");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "x=3");
}

#[test]
fn equation_sans_egal() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "x+1");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "Use '=' in equation");
    assert_eq!(a.tampon, "x+1");
}

#[test]
fn equation_a_deux_egal() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "x=1=2");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "Invalid equation");
    assert_eq!(a.tampon, "x=1=2");

    let mut a = app(Mode::Equation);
    taper(&mut a, "x==2");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "Invalid equation");
}

#[test]
fn equation_sans_solution() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "x+1=x");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "No solution");
    assert_eq!(a.tampon, "x+1=x");
}

#[test]
fn equation_refusee() {
    for entree in ["x=x", "x^3=1", "(=2", "1/x=2"] {
        let mut a = app(Mode::Equation);
        taper(&mut a, entree);
        boutons(&mut a, &["Solve"]);
        assert_eq!(a.affichage, "Invalid Eqn", "{entree:?}");
        assert!(a.tampon.is_empty());
    }
}

#[test]
fn equation_de_degre_explosif() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "(((x^16)^16)^16)^16=0");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "Invalid Eqn");
    assert!(a.tampon.is_empty());
}

#[test]
fn equation_a_racines_complexes() {
    let mut a = app(Mode::Equation);
    taper(&mut a, "x^2+1=0");
    boutons(&mut a, &["Solve"]);
    assert_eq!(a.affichage, "x=i, x=-i");
}

/* ------------------------ Tracé ------------------------ */

#[test]
fn trace_du_sinus() {
    let mut a = app(Mode::Graphe);
    boutons(&mut a, &["sin(", "x", ")", "Plot"]);

    assert!(a.surface_trace);
    assert!(a.courbe_vivante());
    assert_eq!(a.traceur.vivantes.len(), 1);

    let serie = &a.traceur.series[0];
    assert_eq!(serie.titre, "y = sin(x)");
    assert_eq!(serie.etiquettes.len(), 201);
    assert_eq!(serie.ordonnees.len(), 201);
    assert_eq!(serie.etiquettes.first().map(String::as_str), Some("-10.00"));
    assert_eq!(serie.etiquettes.last().map(String::as_str), Some("10.00"));
    assert!(serie.ordonnees.iter().all(|y| !y.is_nan()));

    assert_eq!(a.traceur.styles[0], StyleCourbe::default());
}

#[test]
fn retracer_remplace_la_courbe() {
    let mut a = app(Mode::Graphe);
    boutons(&mut a, &["x", "Plot", "Plot", "Plot"]);
    assert_eq!(a.traceur.series.len(), 3);
    assert_eq!(a.traceur.vivantes, vec![3]);
}

#[test]
fn trace_invalide() {
    let mut a = app(Mode::Graphe);
    boutons(&mut a, &["sin(", "Plot"]);
    assert_eq!(a.affichage, "Invalid expression for plot");
    assert!(!a.courbe_vivante());
    assert!(a.surface_trace);
}

#[test]
fn trace_invalide_garde_l_ancienne_courbe() {
    let mut a = app(Mode::Graphe);
    boutons(&mut a, &["x", "Plot", "+", "Plot"]);
    assert_eq!(a.affichage, "Invalid expression for plot");
    assert_eq!(a.traceur.vivantes, vec![1]);
}

#[test]
fn effacer_detruit_la_courbe_et_masque_la_surface() {
    let mut a = app(Mode::Graphe);
    boutons(&mut a, &["x", "Plot", "C"]);
    assert!(a.traceur.vivantes.is_empty());
    assert!(!a.surface_trace);
    assert_eq!(a.affichage, "0");
}

/* ------------------------ Propriété : C remet à zéro ------------------------ */

#[derive(Clone, Debug)]
struct Scenario {
    mode: Mode,
    evenements: Vec<Evenement>,
}

impl Arbitrary for Scenario {
    fn arbitrary(g: &mut Gen) -> Self {
        let mode = *g.choose(&Mode::TOUS).unwrap_or(&Mode::Basique);
        let libelles = disposition(mode);
        let n = usize::arbitrary(g) % 16;
        let evenements = (0..n)
            .map(|_| match u8::arbitrary(g) % 4 {
                0 => Evenement::Touche(Touche::Caractere(char::arbitrary(g))),
                1 => Evenement::Touche(Touche::Retour),
                _ => {
                    let l = g.choose(libelles).copied().unwrap_or("1");
                    Evenement::Bouton(l.to_string())
                }
            })
            .collect();
        Scenario { mode, evenements }
    }
}

#[test]
fn c_remet_toujours_a_zero() {
    fn prop(s: Scenario) -> bool {
        let mut a = app(s.mode);
        for evt in s.evenements {
            a.gerer(evt);
        }
        a.gerer(Evenement::Bouton("C".to_string()));
        a.affichage == "0"
            && a.tampon.is_empty()
            && !a.courbe_vivante()
            && a.traceur.vivantes.is_empty()
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(Scenario) -> bool);
}
