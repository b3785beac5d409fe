//! Tests de bout en bout du noyau, vus depuis `MoteurMath`.
//!
//! - scénarios calculatrice (évaluation, dérivée, primitive, équation, compilation)
//! - robustesse : l’analyse ne panique jamais, quelle que soit l’entrée

use std::time::{Duration, Instant};

use num_complex::Complex64;
use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use super::{ErreurMoteur, MoteurMath, NoyauNumicore, Portee, Valeur};

fn moteur() -> NoyauNumicore {
    NoyauNumicore
}

fn texte(v: Valeur) -> String {
    match v {
        Valeur::Symbolique(e) => e.to_string(),
        autre => panic!("attendu Symbolique, obtenu {autre:?}"),
    }
}

/* ------------------------ Évaluation ------------------------ */

#[test]
fn evaluation_arithmetique() {
    let m = moteur();
    assert_eq!(m.evaluer("4"), Ok(Valeur::Nombre(4.0)));
    assert_eq!(m.evaluer("2+3*4"), Ok(Valeur::Nombre(14.0)));
    assert_eq!(m.evaluer("-2^2"), Ok(Valeur::Nombre(-4.0)));
    assert_eq!(m.evaluer("2(3+1)"), Ok(Valeur::Nombre(8.0)));
}

#[test]
fn evaluation_constantes_et_fonctions() {
    let m = moteur();
    let Ok(Valeur::Nombre(v)) = m.evaluer("sin(pi/2) + cos(0)") else {
        panic!("attendu un nombre");
    };
    assert!((v - 2.0).abs() < 1e-12);

    let Ok(Valeur::Nombre(v)) = m.evaluer("log(e)") else {
        panic!("attendu un nombre");
    };
    assert_eq!(v, 1.0);
}

#[test]
fn evaluation_complexe() {
    let Ok(Valeur::Complexe(z)) = moteur().evaluer("sqrt(-4)") else {
        panic!("attendu un complexe");
    };
    assert!(z.re.abs() < 1e-12);
    assert!((z.im - 2.0).abs() < 1e-12);
}

#[test]
fn evaluation_unite_imaginaire() {
    let m = moteur();
    assert_eq!(
        m.evaluer("2i+1"),
        Ok(Valeur::Complexe(Complex64::new(1.0, 2.0)))
    );
    assert_eq!(
        m.evaluer("(1 + 2i) - 1"),
        Ok(Valeur::Complexe(Complex64::new(0.0, 2.0)))
    );
    assert_eq!(m.evaluer("3 - 0i"), Ok(Valeur::Nombre(3.0)));
}

#[test]
fn puissances_geantes_refusees_sans_gel() {
    let debut = Instant::now();
    assert_eq!(
        moteur().evaluer("((10^1000)^1000)^1000"),
        Err(ErreurMoteur::NonFini)
    );
    assert!(debut.elapsed() < Duration::from_secs(2));
}

#[test]
fn evaluation_refusee() {
    let m = moteur();
    assert_eq!(m.evaluer("1/0"), Err(ErreurMoteur::NonFini));
    assert_eq!(m.evaluer(""), Err(ErreurMoteur::Vide));
    assert_eq!(m.evaluer("   "), Err(ErreurMoteur::Vide));
    assert_eq!(
        m.evaluer("x+1"),
        Err(ErreurMoteur::SymboleInconnu("x".into()))
    );
    assert_eq!(
        m.evaluer("2+3="),
        Err(ErreurMoteur::CaractereInattendu('='))
    );
    assert!(m.evaluer("2+").is_err());
    assert!(m.evaluer("(2").is_err());
    assert!(m.evaluer("foo(2)").is_err());
}

/* ------------------------ Calcul symbolique ------------------------ */

#[test]
fn derivees() {
    let m = moteur();
    assert_eq!(texte(m.deriver("x^2", "x").unwrap()), "2 * x");
    assert_eq!(texte(m.deriver("sin(x)", "x").unwrap()), "cos(x)");
    assert_eq!(texte(m.deriver("7", "x").unwrap()), "0");
    assert!(m.deriver("x^", "x").is_err());
}

#[test]
fn primitives() {
    let m = moteur();
    assert_eq!(texte(m.integrer("x^2", "x").unwrap()), "x ^ 3 / 3");
    assert_eq!(texte(m.integrer("cos(x)", "x").unwrap()), "sin(x)");
    assert!(matches!(
        m.integrer("sin(x^2)", "x"),
        Err(ErreurMoteur::PrimitiveInconnue(_))
    ));
}

/* ------------------------ Équations ------------------------ */

#[test]
fn resolution() {
    let m = moteur();
    assert_eq!(
        m.resoudre("(x^2-4) - (0)", "x"),
        Ok(vec![Valeur::Nombre(2.0), Valeur::Nombre(-2.0)])
    );
    assert_eq!(
        m.resoudre("(2*x+1) - (7)", "x"),
        Ok(vec![Valeur::Nombre(3.0)])
    );
    assert_eq!(
        m.resoudre("(x^2) - (-1)", "x"),
        Ok(vec![
            Valeur::Complexe(Complex64::new(0.0, 1.0)),
            Valeur::Complexe(Complex64::new(0.0, -1.0)),
        ])
    );
    assert_eq!(m.resoudre("(5) - (3)", "x"), Ok(vec![]));
    assert_eq!(m.resoudre("(x) - (x)", "x"), Err(ErreurMoteur::Indeterminee));
    assert!(m.resoudre("() - (2)", "x").is_err());
}

#[test]
fn resolution_degre_explosif_refusee_sans_gel() {
    let debut = Instant::now();
    assert_eq!(
        moteur().resoudre("((((x^16)^16)^16)^16) - (0)", "x"),
        Err(ErreurMoteur::DegreNonSupporte(256))
    );
    assert!(debut.elapsed() < Duration::from_secs(2));
}

/* ------------------------ Compilation ------------------------ */

#[test]
fn compilation_reutilisable() {
    let c = moteur().compiler("x^2 + 1").unwrap();
    let mut portee = Portee::vide();
    for (x, attendu) in [(0.0, 1.0), (2.0, 5.0), (-3.0, 10.0)] {
        portee.definir("x", x);
        assert_eq!(c.evaluer(&portee), Ok(Valeur::Nombre(attendu)));
    }
}

#[test]
fn compilation_propage_les_non_finis() {
    let c = moteur().compiler("1/x").unwrap();
    let Ok(Valeur::Nombre(v)) = c.evaluer(&Portee::vide().avec("x", 0.0)) else {
        panic!("attendu un nombre");
    };
    assert!(v.is_infinite());

    let c = moteur().compiler("sqrt(x)").unwrap();
    assert!(matches!(
        c.evaluer(&Portee::vide().avec("x", -1.0)),
        Ok(Valeur::Complexe(_))
    ));
}

#[test]
fn compilation_refusee() {
    assert!(moteur().compiler("sin(").is_err());
    let c = moteur().compiler("y + x").unwrap();
    assert_eq!(
        c.evaluer(&Portee::vide().avec("x", 1.0)),
        Err(ErreurMoteur::SymboleInconnu("y".into()))
    );
}

/* ------------------------ Robustesse ------------------------ */

/// Caractères plausibles au clavier de la calculatrice.
fn entree_calculatrice(g: &mut Gen) -> String {
    const ALPHABET: &[&str] = &[
        "0", "1", "2", "7", ".", "+", "-", "*", "/", "^", "(", ")", "x", "e", "pi", "sin(",
        "cos(", "tan(", "sqrt(", "log(", "=",
    ];
    let n = usize::arbitrary(g) % 24;
    (0..n)
        .map(|_| ALPHABET[usize::arbitrary(g) % ALPHABET.len()])
        .collect()
}

#[test]
fn l_analyse_ne_panique_jamais() {
    fn prop(entree: String) -> TestResult {
        let m = moteur();
        let _ = m.evaluer(&entree);
        let _ = m.compiler(&entree);
        TestResult::passed()
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(prop as fn(String) -> TestResult);
}

#[test]
fn les_entrees_du_clavier_ne_paniquent_jamais() {
    fn prop() -> bool {
        let mut g = Gen::new(16);
        let entree = entree_calculatrice(&mut g);
        let m = moteur();
        let _ = m.evaluer(&entree);
        let _ = m.deriver(&entree, "x");
        let _ = m.integrer(&entree, "x");
        let _ = m.resoudre(&entree, "x");
        true
    }
    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn() -> bool);
}
