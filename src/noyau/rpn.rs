// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis reconstruire Expr
//
// Règles:
// - Ident(name):
//    - si name est une fonction connue => fonction unaire (postfixée en RPN)
//    - sinon => variable/atome (Expr::Var)
// - Moins unaire:
//    - si '-' arrive quand on n’attend PAS une valeur, il devient Tok::Neg
//    - Neg lie plus fort que * / mais moins que ^ : "-x^2" => -(x^2), "2*-3" => 2*(-3)
// - Multiplication implicite : "2x", "2(x+1)", "(x)(x)", "2pi" => '*' injecté
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs “collés” à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::ErreurMoteur;
use super::expr::{Expr, Fonction};
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        Tok::Caret => 4,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

/// Identificateurs reconnus comme fonctions (unaire).
fn is_fonction_ident(name: &str) -> bool {
    Fonction::depuis_nom(name).is_some()
}

fn is_fonction_tok(t: &Tok) -> bool {
    matches!(t, Tok::Ident(name) if is_fonction_ident(name))
}

/// Fin de valeur : nombre, constante, variable, ')'.
fn termine_valeur(t: &Tok) -> bool {
    match t {
        Tok::Num(_) | Tok::Pi | Tok::E | Tok::I | Tok::RPar => true,
        Tok::Ident(name) => !is_fonction_ident(name),
        _ => false,
    }
}

/// Début de valeur : nombre, constante, identifiant (fonction comprise), '('.
fn commence_valeur(t: &Tok) -> bool {
    matches!(
        t,
        Tok::Num(_) | Tok::Pi | Tok::E | Tok::I | Tok::Ident(_) | Tok::LPar
    )
}

/// Injecte les '*' implicites entre deux valeurs adjacentes.
fn multiplication_implicite(tokens: &[Tok]) -> Vec<Tok> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len() + 4);
    for tok in tokens {
        if let Some(prev) = out.last() {
            if termine_valeur(prev) && commence_valeur(tok) {
                out.push(Tok::Star);
            }
        }
        out.push(tok.clone());
    }
    out
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sin"), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Slash, Ident("sin")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurMoteur> {
    // "foo(" : appel d’une fonction inconnue ; "x(" reste une multiplication implicite
    for paire in tokens.windows(2) {
        if let [Tok::Ident(nom), Tok::LPar] = paire {
            if !is_fonction_ident(nom) && nom.chars().count() > 1 {
                return Err(ErreurMoteur::FonctionInconnue(nom.clone()));
            }
        }
    }

    let tokens = multiplication_implicite(tokens);

    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for (i, tok) in tokens.iter().cloned().enumerate() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::E | Tok::I => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // une fonction exige sa parenthèse : "sin x" est refusé
                    if !matches!(tokens.get(i + 1), Some(Tok::LPar)) {
                        return Err(ErreurMoteur::Syntaxe("fonction sans parenthèse"));
                    }
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    // variable/atome : sortie directe
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(ErreurMoteur::Syntaxe("parenthèse vide ou opérande manquant"));
                }

                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurMoteur::Syntaxe("parenthèse fermante sans ouvrante"));
                }

                // si une fonction est au sommet, on la sort aussi
                if ops.last().is_some_and(is_fonction_tok) {
                    if let Some(f) = ops.pop() {
                        out.push(f);
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus if !prev_was_value => {
                // moins unaire préfixe : ne dépile rien
                ops.push(Tok::Neg);
            }

            Tok::Plus if !prev_was_value => {
                // plus unaire : neutre
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                if !prev_was_value {
                    return Err(ErreurMoteur::Syntaxe("opérateur sans opérande gauche"));
                }

                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || is_fonction_tok(top) {
                        break;
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurMoteur::Syntaxe("jeton interne inattendu")),
        }
    }

    if !prev_was_value {
        return Err(ErreurMoteur::Syntaxe("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurMoteur::Syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Construit une Expr à partir d’une RPN.
///
/// - Ident(name):
///     - si name est une fonction connue => fonction unaire
///     - sinon => variable : Expr::Var(name)
pub fn from_rpn(rpn: &[Tok]) -> Result<Expr, ErreurMoteur> {
    const INVALIDE: ErreurMoteur = ErreurMoteur::Syntaxe("expression invalide");

    let mut st: Vec<Expr> = Vec::new();

    for tok in rpn.iter().cloned() {
        match tok {
            Tok::Num(r) => st.push(Expr::Rat(r)),
            Tok::Pi => st.push(Expr::Pi),
            Tok::E => st.push(Expr::E),
            Tok::I => st.push(Expr::I),

            Tok::Neg => {
                let a = st.pop().ok_or(INVALIDE)?;
                st.push(Expr::Neg(Box::new(a)));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = Box::new(st.pop().ok_or(INVALIDE)?);
                let a = Box::new(st.pop().ok_or(INVALIDE)?);

                let e = match tok {
                    Tok::Plus => Expr::Add(a, b),
                    Tok::Minus => Expr::Sub(a, b),
                    Tok::Star => Expr::Mul(a, b),
                    Tok::Slash => Expr::Div(a, b),
                    _ => Expr::Pow(a, b),
                };

                st.push(e);
            }

            Tok::Ident(name) => match Fonction::depuis_nom(&name) {
                Some(f) => {
                    let x = st.pop().ok_or(ErreurMoteur::Syntaxe("fonction sans argument"))?;
                    st.push(Expr::Fonc(f, Box::new(x)));
                }
                None => st.push(Expr::Var(name)),
            },

            Tok::LPar | Tok::RPar => {
                return Err(ErreurMoteur::Syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(e), true) => Ok(e),
        _ => Err(INVALIDE),
    }
}
