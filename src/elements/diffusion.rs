//! Diffusion and porous-electrode elements: W, Ws, Wo, Ls and G.

use num_complex::Complex64;

use super::math::{coth, tanh};
use super::{ElementDefinition, ParameterDefinition};
use crate::symbolic::Expr;

const INF: f64 = f64::INFINITY;

pub(super) const WARBURG: ElementDefinition = ElementDefinition {
    symbol: "W",
    description: "W: Warburg, semi-infinite diffusion",
    extended_description: "Warburg (semi-infinite)\n\n    Z = 1/(Y*(j*2*pi*f)^(1/2))\n",
    parameters: &[ParameterDefinition::new("Y", 1.0, 1.0e-24, INF, "S*s^(1/2)")],
};

pub(super) const WARBURG_SHORT: ElementDefinition = ElementDefinition {
    symbol: "Ws",
    description: "Ws: Warburg, finite length or short",
    extended_description: "Warburg (finite length, transmissive boundary)\n\n    \
        Z = tanh((B*j*2*pi*f)^n)/(Y*(j*2*pi*f)^n)\n",
    parameters: &[
        ParameterDefinition::new("Y", 1.0, 1.0e-24, INF, "S*s^n"),
        ParameterDefinition::new("B", 1.0, 1.0e-24, INF, "s"),
        ParameterDefinition::new("n", 0.5, 0.0, 1.0, ""),
    ],
};

pub(super) const WARBURG_OPEN: ElementDefinition = ElementDefinition {
    symbol: "Wo",
    description: "Wo: Warburg, finite space or open",
    extended_description: "Warburg (finite space, reflective boundary)\n\n    \
        Z = coth((B*j*2*pi*f)^n)/(Y*(j*2*pi*f)^n)\n",
    parameters: &[
        ParameterDefinition::new("Y", 1.0, 1.0e-24, INF, "S*s^n"),
        ParameterDefinition::new("B", 1.0, 1.0e-24, INF, "s"),
        ParameterDefinition::new("n", 0.5, 0.0, 1.0, ""),
    ],
};

pub(super) const DE_LEVIE_FINITE_LENGTH: ElementDefinition = ElementDefinition {
    symbol: "Ls",
    description: "Ls: de Levie pore, finite length",
    extended_description: "de Levie pore (finite length)\n\n    \
        Z = (Ri*Rr)^(1/2)*coth(d*(Ri/Rr)^(1/2)*(1 + Y*(j*2*pi*f)^n)^(1/2))/(1 + Y*(j*2*pi*f)^n)^(1/2)\n\n\
        Ri is the pore ionic resistance and Rr the interfacial (charge transfer)\n\
        resistance per unit length, d the pore length.\n",
    parameters: &[
        ParameterDefinition::new("Ri", 10.0, 0.0, INF, "ohm/m"),
        ParameterDefinition::new("Rr", 1.0, 0.0, INF, "ohm*m"),
        ParameterDefinition::new("Y", 0.01, 1.0e-24, INF, "S*s^n/m"),
        ParameterDefinition::new("n", 0.8, 0.0, 1.0, ""),
        ParameterDefinition::new("d", 0.2, 1.0e-24, INF, "m"),
    ],
};

pub(super) const GERISCHER: ElementDefinition = ElementDefinition {
    symbol: "G",
    description: "G: Gerischer",
    extended_description: "Gerischer\n\n    Z = 1/(Y*(k + j*2*pi*f)^n)\n",
    parameters: &[
        ParameterDefinition::new("Y", 1.0, 1.0e-24, INF, "S*s^n"),
        ParameterDefinition::new("k", 1.0, 1.0e-24, INF, "1/s"),
        ParameterDefinition::new("n", 0.5, 0.0, 1.0, ""),
    ],
};

pub(super) fn warburg(p: &[f64], jw: Complex64) -> Complex64 {
    (jw.sqrt() * p[0]).inv()
}

pub(super) fn warburg_short(p: &[f64], jw: Complex64) -> Complex64 {
    let (y, b, n) = (p[0], p[1], p[2]);
    tanh((jw * b).powf(n)) / (jw.powf(n) * y)
}

pub(super) fn warburg_open(p: &[f64], jw: Complex64) -> Complex64 {
    let (y, b, n) = (p[0], p[1], p[2]);
    coth((jw * b).powf(n)) / (jw.powf(n) * y)
}

pub(super) fn de_levie_finite_length(p: &[f64], jw: Complex64) -> Complex64 {
    let (ri, rr, y, n, d) = (p[0], p[1], p[2], p[3], p[4]);
    let root = (1.0 + jw.powf(n) * y).sqrt();
    (ri * rr).sqrt() * coth(root * (d * (ri / rr).sqrt())) / root
}

pub(super) fn gerischer(p: &[f64], jw: Complex64) -> Complex64 {
    let (y, k, n) = (p[0], p[1], p[2]);
    ((k + jw).powf(n) * y).inv()
}

pub(super) fn warburg_expr(p: &[Expr], jw: Expr) -> Expr {
    (p[0].clone() * jw.sqrt()).recip()
}

pub(super) fn warburg_short_expr(p: &[Expr], jw: Expr) -> Expr {
    let (y, b, n) = (&p[0], &p[1], &p[2]);
    (b.clone() * jw.clone()).pow(n.clone()).tanh() / (y.clone() * jw.pow(n.clone()))
}

pub(super) fn warburg_open_expr(p: &[Expr], jw: Expr) -> Expr {
    let (y, b, n) = (&p[0], &p[1], &p[2]);
    (b.clone() * jw.clone()).pow(n.clone()).coth() / (y.clone() * jw.pow(n.clone()))
}

pub(super) fn de_levie_finite_length_expr(p: &[Expr], jw: Expr) -> Expr {
    let (ri, rr, y, n, d) = (&p[0], &p[1], &p[2], &p[3], &p[4]);
    let root = (Expr::number(1.0) + y.clone() * jw.pow(n.clone())).sqrt();
    let ratio = (ri.clone() / rr.clone()).sqrt();
    (ri.clone() * rr.clone()).sqrt() * (d.clone() * ratio * root.clone()).coth() / root
}

pub(super) fn gerischer_expr(p: &[Expr], jw: Expr) -> Expr {
    let (y, k, n) = (&p[0], &p[1], &p[2]);
    (y.clone() * (k.clone() + jw).pow(n.clone())).recip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::math::jw;
    use approx::assert_relative_eq;

    #[test]
    fn test_warburg_has_45_degree_phase() {
        let z = warburg(&[1.0], jw(10.0));
        assert_relative_eq!(z.arg(), -std::f64::consts::FRAC_PI_4, epsilon = 1e-12);
    }

    #[test]
    fn test_warburg_short_approaches_resistance_at_low_frequency() {
        // tanh(x)/x -> 1, so Z -> B^n/Y
        let z = warburg_short(&[2.0, 4.0, 0.5], jw(1.0e-9));
        assert_relative_eq!(z.re, 2.0 / 2.0, max_relative = 1e-3);
        assert!(z.im.abs() < 1e-3);
    }

    #[test]
    fn test_warburg_variants_finite_at_high_frequency() {
        let p = [1.0, 1.0, 0.5];
        for z in [warburg_short(&p, jw(1.0e7)), warburg_open(&p, jw(1.0e7))] {
            assert!(z.re.is_finite() && z.im.is_finite());
        }
    }

    #[test]
    fn test_gerischer_low_frequency_limit() {
        let z = gerischer(&[2.0, 4.0, 0.5], jw(1.0e-9));
        assert_relative_eq!(z.re, 1.0 / (2.0 * 2.0), max_relative = 1e-6);
    }
}
