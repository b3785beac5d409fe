// src/noyau/erreur.rs
//
// Erreurs du noyau.
// L’UI ne consomme que succès/échec : le message sert au journal et aux tests.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurMoteur {
    #[error("entrée vide")]
    Vide,

    #[error("caractère inattendu: '{0}'")]
    CaractereInattendu(char),

    #[error("nombre invalide: {0}")]
    NombreInvalide(String),

    #[error("syntaxe: {0}")]
    Syntaxe(&'static str),

    #[error("symbole non défini: {0}")]
    SymboleInconnu(String),

    #[error("fonction inconnue: {0}")]
    FonctionInconnue(String),

    #[error("résultat non fini")]
    NonFini,

    #[error("primitive inconnue pour {0}")]
    PrimitiveInconnue(String),

    #[error("équation non polynomiale en {0}")]
    NonPolynomial(String),

    #[error("degré {0} non supporté")]
    DegreNonSupporte(usize),

    #[error("équation indéterminée (toujours vraie)")]
    Indeterminee,
}
