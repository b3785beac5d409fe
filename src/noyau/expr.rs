// src/noyau/expr.rs
//
// AST exact (constantes rationnelles, jamais de flottants dans l’arbre).
// - Rat    : rationnel exact
// - Pi, E  : constantes symboliques
// - I      : unité imaginaire
// - Var    : variable symbolique (ex: x)
// - Fonc   : fonction unaire connue (sin, sqrt, log, ...)
//
// IMPORTANT :
// - simplify() ne doit jamais “inventer” une valeur pour Var.
// - L’affichage (Display) produit la forme symbolique canonique renvoyée à l’UI :
//   opérateurs binaires espacés ("2 * x", "x ^ 3 / 3").

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Exp,
    Log,
    Log10,
    Abs,
}

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        use Fonction::*;
        let f = match nom {
            "sin" => Sin,
            "cos" => Cos,
            "tan" => Tan,
            "asin" => Asin,
            "acos" => Acos,
            "atan" => Atan,
            "sinh" => Sinh,
            "cosh" => Cosh,
            "tanh" => Tanh,
            "sqrt" => Sqrt,
            "exp" => Exp,
            "log" | "ln" => Log,
            "log10" => Log10,
            "abs" => Abs,
            _ => return None,
        };
        Some(f)
    }

    pub fn nom(self) -> &'static str {
        use Fonction::*;
        match self {
            Sin => "sin",
            Cos => "cos",
            Tan => "tan",
            Asin => "asin",
            Acos => "acos",
            Atan => "atan",
            Sinh => "sinh",
            Cosh => "cosh",
            Tanh => "tanh",
            Sqrt => "sqrt",
            Exp => "exp",
            Log => "log",
            Log10 => "log10",
            Abs => "abs",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Rat(BigRational),
    Pi,
    E,
    I,

    Var(String),

    Neg(Box<Expr>),

    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),

    Fonc(Fonction, Box<Expr>),
}

/* ------------------------ Constructeurs courts ------------------------ */

pub fn entier(n: i64) -> Expr {
    Expr::Rat(BigRational::from_integer(BigInt::from(n)))
}

pub fn var(nom: &str) -> Expr {
    Expr::Var(nom.to_string())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(Box::new(a))
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Add(Box::new(a), Box::new(b))
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Sub(Box::new(a), Box::new(b))
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Mul(Box::new(a), Box::new(b))
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Div(Box::new(a), Box::new(b))
}

pub fn pow(a: Expr, b: Expr) -> Expr {
    Expr::Pow(Box::new(a), Box::new(b))
}

pub fn fonc(f: Fonction, a: Expr) -> Expr {
    Expr::Fonc(f, Box::new(a))
}

/// Exposant au-delà duquel on ne replie plus une puissance rationnelle (anti-gel).
const EXPOSANT_MAX: i64 = 1024;

/// Taille maximale (en bits) d’un numérateur ou dénominateur produit par x^n.
const BITS_PUISSANCE_MAX: u64 = 1 << 16;

/// Anti-gel : x^n exact seulement si le résultat reste de taille raisonnable.
fn taille_puissance_ok(x: &BigRational, n: i64) -> bool {
    let bits = x.numer().bits().max(x.denom().bits());
    bits.saturating_mul(n.unsigned_abs()) <= BITS_PUISSANCE_MAX
}

impl Expr {
    fn est_rat(&self, pred: impl Fn(&BigRational) -> bool) -> bool {
        matches!(self, Expr::Rat(r) if pred(r))
    }

    pub fn est_zero(&self) -> bool {
        self.est_rat(|r| r.is_zero())
    }

    pub fn est_un(&self) -> bool {
        self.est_rat(|r| r.is_one())
    }

    /// Vrai si `nom` apparaît dans l’arbre.
    /// Itératif (pile explicite) : pas de récursion profonde sur les longues saisies.
    pub fn contient_var(&self, nom: &str) -> bool {
        self.premiere_var(|v| v == nom).is_some()
    }

    /// Première variable rencontrée qui satisfait `pred`.
    pub fn premiere_var(&self, pred: impl Fn(&str) -> bool) -> Option<&str> {
        use Expr::*;

        let mut pile: Vec<&Expr> = Vec::with_capacity(32);
        pile.push(self);

        while let Some(e) = pile.pop() {
            match e {
                Var(v) if pred(v) => return Some(v.as_str()),
                Var(_) | Rat(_) | Pi | E | I => {}
                Neg(a) | Fonc(_, a) => pile.push(a.as_ref()),
                Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) | Pow(a, b) => {
                    pile.push(b.as_ref());
                    pile.push(a.as_ref());
                }
            }
        }
        None
    }

    /// Simplification locale, sans heuristiques.
    /// Objectif: réduire ce qui est strictement démontrable sans exploser l’arbre.
    pub fn simplify(self) -> Expr {
        use Expr::*;

        match self {
            // Feuilles: aucune simplification à faire
            Rat(_) | Pi | E | I | Var(_) => self,

            Neg(a) => match a.simplify() {
                Rat(r) => Rat(-r),
                Neg(x) => *x,
                x => Neg(Box::new(x)),
            },

            Add(a, b) => {
                let a = a.simplify();
                let b = b.simplify();
                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x + y),
                    (a, b) if a.est_zero() => b,
                    (a, b) if b.est_zero() => a,
                    (a, Neg(b)) => sub(a, *b).simplify(),
                    (a, Rat(y)) if y.is_negative() => Sub(Box::new(a), Box::new(Rat(-y))),
                    (Neg(a), b) => sub(b, *a).simplify(),
                    (a, b) if a == b => mul(entier(2), a).simplify(),
                    (a, b) => Add(Box::new(a), Box::new(b)),
                }
            }

            Sub(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                // x - x => 0
                if a == b {
                    return Rat(BigRational::zero());
                }

                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x - y),
                    (a, b) if b.est_zero() => a,
                    (a, b) if a.est_zero() => neg(b).simplify(),
                    (a, Neg(b)) => add(a, *b).simplify(),
                    (a, Rat(y)) if y.is_negative() => Add(Box::new(a), Box::new(Rat(-y))),
                    (a, b) => Sub(Box::new(a), Box::new(b)),
                }
            }

            Mul(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                match (a, b) {
                    (Rat(x), Rat(y)) => Rat(x * y),
                    (a, b) if a.est_zero() || b.est_zero() => Rat(BigRational::zero()),
                    (a, b) if a.est_un() => b,
                    (a, b) if b.est_un() => a,
                    (Rat(x), b) if x == -BigRational::one() => neg(b).simplify(),
                    (Neg(a), Neg(b)) => mul(*a, *b).simplify(),
                    (Neg(a), b) => neg(mul(*a, b)).simplify(),
                    (a, Neg(b)) => neg(mul(a, *b)).simplify(),

                    // constante à gauche : x * 2 => 2 * x
                    (a, Rat(y)) => mul(Rat(y), a).simplify(),

                    // 2 * (3 * x) => 6 * x
                    (Rat(x), Mul(p, q)) => match *p {
                        Rat(y) => mul(Rat(x * y), *q).simplify(),
                        p => Mul(Box::new(Rat(x)), Box::new(Mul(Box::new(p), q))),
                    },

                    // 2 * (x / 4) => x / 2 ; 2 * (3 / x) => 6 / x
                    (Rat(x), Div(p, q)) => match (*p, *q) {
                        (p, Rat(y)) if !y.is_zero() => mul(Rat(x / y), p).simplify(),
                        (Rat(y), q) => div(Rat(x * y), q).simplify(),
                        (p, q) => Mul(Box::new(Rat(x)), Box::new(Div(Box::new(p), Box::new(q)))),
                    },

                    // x * x => x ^ 2
                    (a, b) if a == b => pow(a, entier(2)).simplify(),

                    (a, b) => Mul(Box::new(a), Box::new(b)),
                }
            }

            Div(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                match (a, b) {
                    // division par zéro : on garde symbolique (l’évaluation numérique tranchera)
                    (a, b) if b.est_zero() => Div(Box::new(a), Box::new(b)),
                    (Rat(x), Rat(y)) => Rat(x / y),
                    (a, _) if a.est_zero() => Rat(BigRational::zero()),
                    (a, b) if b.est_un() => a,
                    (Neg(a), b) => neg(div(*a, b)).simplify(),
                    (a, Neg(b)) => neg(div(a, *b)).simplify(),

                    // (2 * x) / 4 => x / 2
                    (Mul(p, q), Rat(y)) => match *p {
                        Rat(x) => mul(Rat(x / y), *q).simplify(),
                        p => Div(Box::new(Mul(Box::new(p), q)), Box::new(Rat(y))),
                    },

                    (a, b) => Div(Box::new(a), Box::new(b)),
                }
            }

            Pow(a, b) => {
                let a = a.simplify();
                let b = b.simplify();

                if b.est_zero() {
                    return entier(1);
                }
                if b.est_un() || a.est_un() {
                    return a;
                }

                match (a, b) {
                    (Rat(x), Rat(y)) => match exposant_entier(&y) {
                        Some(n)
                            if n.abs() <= EXPOSANT_MAX
                                && !(x.is_zero() && n < 0)
                                && taille_puissance_ok(&x, n) =>
                        {
                            Rat(rational_pow_int(x, n))
                        }
                        _ => Pow(Box::new(Rat(x)), Box::new(Rat(y))),
                    },

                    // (u ^ m) ^ n => u ^ (m*n) pour des exposants entiers
                    (Pow(u, m), Rat(n)) if n.is_integer() => match *m {
                        Rat(m) if m.is_integer() => pow(*u, Rat(m * n)).simplify(),
                        m => Pow(Box::new(Pow(u, Box::new(m))), Box::new(Rat(n))),
                    },

                    (a, b) => Pow(Box::new(a), Box::new(b)),
                }
            }

            Fonc(f, a) => {
                let a = a.simplify();
                let repli = match (f, &a) {
                    (Fonction::Sqrt, Rat(r)) => rational_sqrt_exact(r).map(Rat),
                    (Fonction::Log, E) => Some(entier(1)),
                    (Fonction::Log, Rat(r)) if r.is_one() => Some(entier(0)),
                    (Fonction::Exp, Rat(r)) if r.is_zero() => Some(entier(1)),
                    (Fonction::Sin | Fonction::Tan | Fonction::Sinh | Fonction::Tanh, Rat(r))
                        if r.is_zero() =>
                    {
                        Some(entier(0))
                    }
                    (Fonction::Cos | Fonction::Cosh, Rat(r)) if r.is_zero() => Some(entier(1)),
                    _ => None,
                };
                repli.unwrap_or_else(|| Fonc(f, Box::new(a)))
            }
        }
    }
}

/* ------------------------ Outils rationnels (utilisés par simplify) ------------------------ */

fn exposant_entier(r: &BigRational) -> Option<i64> {
    if !r.is_integer() {
        return None;
    }
    r.numer().to_i64()
}

pub(crate) fn rational_pow_int(base: BigRational, exp: i64) -> BigRational {
    if exp == 0 {
        return BigRational::one();
    }
    if exp < 0 {
        let pos = rational_pow_int(base, -exp);
        return BigRational::one() / pos;
    }

    let mut e = exp as u64;
    let mut acc = BigRational::one();
    let mut b = base;

    while e > 0 {
        if (e & 1) == 1 {
            acc *= b.clone();
        }
        e >>= 1;
        if e > 0 {
            b *= b.clone();
        }
    }
    acc
}

pub(crate) fn rational_sqrt_exact(r: &BigRational) -> Option<BigRational> {
    if r.is_negative() {
        return None;
    }
    let sn = int_sqrt_exact(r.numer())?;
    let sd = int_sqrt_exact(r.denom())?;
    Some(BigRational::new(sn, sd))
}

fn int_sqrt_exact(x: &BigInt) -> Option<BigInt> {
    if x.is_negative() {
        return None;
    }
    let s = x.sqrt();
    if &s * &s == *x {
        Some(s)
    } else {
        None
    }
}

/* ------------------------ Affichage symbolique ------------------------ */

/// Rang de précédence d’affichage (plus grand = lie plus fort).
fn rang(e: &Expr) -> u8 {
    use Expr::*;
    match e {
        Add(..) | Sub(..) => 1,
        Mul(..) | Div(..) => 2,
        Neg(..) => 3,
        Pow(..) => 4,
        Rat(r) if r.is_negative() => 3,
        Rat(r) if decimal_fini(r).is_none() => 2,
        Rat(_) | Pi | E | I | Var(_) | Fonc(..) => 5,
    }
}

/// Écrit un rationnel en décimal si son développement est fini (dénominateur 2^a·5^b).
fn decimal_fini(r: &BigRational) -> Option<String> {
    let mut d = r.denom().clone();
    let deux = BigInt::from(2);
    let cinq = BigInt::from(5);
    let mut k2 = 0u32;
    let mut k5 = 0u32;
    while (&d % &deux).is_zero() {
        d /= &deux;
        k2 += 1;
    }
    while (&d % &cinq).is_zero() {
        d /= &cinq;
        k5 += 1;
    }
    if !d.is_one() {
        return None;
    }
    let chiffres = k2.max(k5);

    let echelle = BigInt::from(10).pow(chiffres);
    let n = r.numer().abs() * &echelle / r.denom();
    let signe = if r.is_negative() { "-" } else { "" };
    if chiffres == 0 {
        return Some(format!("{signe}{n}"));
    }

    let mut txt = n.to_str_radix(10);
    while txt.len() <= chiffres as usize {
        txt.insert(0, '0');
    }
    let (ent, frac) = txt.split_at(txt.len() - chiffres as usize);
    Some(format!("{signe}{ent}.{frac}"))
}

fn ecrire_operande(f: &mut fmt::Formatter<'_>, e: &Expr, parentheses: bool) -> fmt::Result {
    if parentheses {
        write!(f, "({e})")
    } else {
        write!(f, "{e}")
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Expr::*;
        match self {
            Rat(r) => match decimal_fini(r) {
                Some(s) => write!(f, "{s}"),
                None => write!(f, "{} / {}", r.numer(), r.denom()),
            },
            Pi => write!(f, "pi"),
            E => write!(f, "e"),
            I => write!(f, "i"),
            Var(s) => write!(f, "{s}"),
            Fonc(g, x) => write!(f, "{}({x})", g.nom()),

            Neg(x) => {
                write!(f, "-")?;
                ecrire_operande(f, x, rang(x) < 3)
            }

            Pow(a, b) => {
                // associatif à droite : (a ^ b) ^ c garde ses parenthèses
                ecrire_operande(f, a, rang(a) <= 4)?;
                write!(f, " ^ ")?;
                ecrire_operande(f, b, rang(b) < 4)
            }

            Add(a, b) | Sub(a, b) | Mul(a, b) | Div(a, b) => {
                let (op, r) = match self {
                    Add(..) => ("+", 1),
                    Sub(..) => ("-", 1),
                    Mul(..) => ("*", 2),
                    _ => ("/", 2),
                };
                // associatif à gauche : a - (b + c), a / (b * c)
                let droite_strict = matches!(self, Sub(..) | Div(..));
                ecrire_operande(f, a, rang(a) < r)?;
                write!(f, " {op} ")?;
                ecrire_operande(f, b, rang(b) < r || (droite_strict && rang(b) == r))
            }
        }
    }
}
