// src/noyau/jetons.rs

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use super::erreur::ErreurMoteur;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(BigRational),
    Pi,
    E,
    // unité imaginaire
    I,

    // Fonctions + variables (tout ce qui n’est pas constante / opérateur / nombre)
    // NOTE: le parse (RPN->Expr) décidera si c’est une fonction (sin/cos/...) ou une variable.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    // Moins unaire : jamais produit par tokenize(), seulement par to_rpn().
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - décimaux exacts (ex: 12, 0.25, .5, 1.5e-3) -> Num(rationnel exact)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π ou pi, e, i (unité imaginaire : "2i" relit un résultat complexe)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
/// - √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurMoteur> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            'π' => Some(Tok::Pi),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::E),
                "i" => out.push(Tok::I),
                _ => out.push(Tok::Ident(w)),
            }
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let (rat, fin) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(rat));
            i = fin;
            continue;
        }

        return Err(ErreurMoteur::CaractereInattendu(c));
    }

    Ok(out)
}

/// Lit un décimal à partir de `debut` et renvoie (valeur exacte, indice de fin).
///
/// Forme : chiffres [ '.' chiffres ] [ ('e'|'E') ['+'|'-'] chiffres ]
/// L’exposant n’est consommé que s’il est suivi d’au moins un chiffre :
/// "2e" reste 2 suivi de la constante e.
fn lire_nombre(chars: &[char], debut: usize) -> Result<(BigRational, usize), ErreurMoteur> {
    let mut i = debut;
    let mut chiffres = String::new();
    let mut decimales: usize = 0;

    while i < chars.len() && chars[i].is_ascii_digit() {
        chiffres.push(chars[i]);
        i += 1;
    }

    if i < chars.len() && chars[i] == '.' {
        i += 1;
        while i < chars.len() && chars[i].is_ascii_digit() {
            chiffres.push(chars[i]);
            decimales += 1;
            i += 1;
        }
    }

    if chiffres.is_empty() {
        let brut: String = chars[debut..i].iter().collect();
        return Err(ErreurMoteur::NombreInvalide(brut));
    }

    let mut exposant: i64 = 0;
    if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
        let mut j = i + 1;
        let mut negatif = false;
        if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
            negatif = chars[j] == '-';
            j += 1;
        }
        if j < chars.len() && chars[j].is_ascii_digit() {
            let start = j;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            let txt: String = chars[start..j].iter().collect();
            let v: i64 = txt
                .parse()
                .map_err(|_| ErreurMoteur::NombreInvalide(txt.clone()))?;
            // garde-fou : 10^v doit rester raisonnable
            if v > 400 {
                return Err(ErreurMoteur::NombreInvalide(txt));
            }
            exposant = if negatif { -v } else { v };
            i = j;
        }
    }

    let mantisse = BigInt::parse_bytes(chiffres.as_bytes(), 10)
        .ok_or_else(|| ErreurMoteur::NombreInvalide(chiffres.clone()))?;

    let echelle = exposant - decimales as i64;
    let dix = BigInt::from(10);
    let rat = if echelle >= 0 {
        BigRational::from_integer(mantisse * dix.pow(echelle as u32))
    } else {
        BigRational::new(mantisse, dix.pow((-echelle) as u32))
    };

    Ok((rat, i))
}

/// Format utilitaire (debug) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    fn format_rat(r: &BigRational) -> String {
        let n = r.numer();
        let d = r.denom();
        if d.is_one() {
            format!("{n}")
        } else if n.is_zero() {
            "0".to_string()
        } else {
            format!("{n}/{d}")
        }
    }

    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(r) => format_rat(r),
            Tok::Pi => "π".to_string(),
            Tok::E => "e".to_string(),
            Tok::I => "i".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),
            Tok::Neg => "neg".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
