// src/noyau/format.rs
//
// Affichage des nombres renvoyés à l’UI.
// - 14 chiffres significatifs (absorbe le bruit flottant : 0.1+0.2 => 0.3)
// - entiers sans décimales
// - notation exponentielle hors de [1e-7, 1e21) : "1e+21", "1.5e-8"
// - complexes : "2 + 3i", "2 - 3i", "3i", "i", "-i"

use num_complex::Complex64;

/// Précision d’affichage (chiffres significatifs).
const CHIFFRES_SIGNIFICATIFS: usize = 14;

/// Arrondit `v` à CHIFFRES_SIGNIFICATIFS chiffres significatifs.
fn arrondi_significatif(v: f64) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    format!("{:.*e}", CHIFFRES_SIGNIFICATIFS - 1, v)
        .parse()
        .unwrap_or(v)
}

pub fn format_nombre(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let r = arrondi_significatif(v);
    if r == 0.0 {
        // pas de "-0"
        return "0".to_string();
    }

    let a = r.abs();
    if !(1e-7..1e21).contains(&a) {
        // "1.5e21" => "1.5e+21"
        let s = format!("{r:e}");
        return match s.split_once('e') {
            Some((m, e)) if !e.starts_with('-') => format!("{m}e+{e}"),
            _ => s,
        };
    }

    format!("{r}")
}

pub fn format_complexe(z: Complex64) -> String {
    // une partie négligeable devant l’autre est du bruit d’arrondi
    let echelle = z.re.abs().max(z.im.abs()).max(1.0);
    let nettoie = |v: f64| {
        if v.abs() < 1e-14 * echelle {
            0.0
        } else {
            arrondi_significatif(v)
        }
    };
    let re = nettoie(z.re);
    let im = nettoie(z.im);

    if im == 0.0 {
        return format_nombre(re);
    }

    let partie_im = |v: f64| -> String {
        if v == 1.0 {
            "i".to_string()
        } else {
            format!("{}i", format_nombre(v))
        }
    };

    if re == 0.0 {
        return if im < 0.0 {
            format!("-{}", partie_im(-im))
        } else {
            partie_im(im)
        };
    }

    if im < 0.0 {
        format!("{} - {}", format_nombre(re), partie_im(-im))
    } else {
        format!("{} + {}", format_nombre(re), partie_im(im))
    }
}
