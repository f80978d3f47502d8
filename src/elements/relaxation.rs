//! Havriliak-Negami relaxation elements: H and Ha.

use num_complex::Complex64;

use super::{ElementDefinition, ParameterDefinition};
use crate::symbolic::Expr;

const INF: f64 = f64::INFINITY;

pub(super) const HAVRILIAK_NEGAMI: ElementDefinition = ElementDefinition {
    symbol: "H",
    description: "H: Havriliak-Negami relaxation",
    extended_description: "Havriliak-Negami relaxation\n\n    \
        Z = (1 + (j*2*pi*f*t)^a)^b/(j*2*pi*f*dC)\n\n\
        Reduces to Cole-Cole for b = 1 and to Cole-Davidson for a = 1.\n",
    parameters: &[
        ParameterDefinition::new("dC", 1.0e-6, 1.0e-24, INF, "F"),
        ParameterDefinition::new("t", 1.0, 1.0e-24, INF, "s"),
        ParameterDefinition::new("a", 0.9, 0.0, 1.0, ""),
        ParameterDefinition::new("b", 0.9, 0.0, 1.0, ""),
    ],
};

pub(super) const HAVRILIAK_NEGAMI_ALTERNATIVE: ElementDefinition = ElementDefinition {
    symbol: "Ha",
    description: "Ha: Havriliak-Negami relaxation (alternative form)",
    extended_description: "Havriliak-Negami relaxation (alternative form)\n\n    \
        Z = R/(1 + (j*2*pi*f*t)^a)^b\n",
    parameters: &[
        ParameterDefinition::new("R", 1.0, 0.0, INF, "ohm"),
        ParameterDefinition::new("t", 1.0, 1.0e-24, INF, "s"),
        ParameterDefinition::new("a", 0.7, 0.0, 1.0, ""),
        ParameterDefinition::new("b", 0.8, 0.0, 1.0, ""),
    ],
};

pub(super) fn havriliak_negami(p: &[f64], jw: Complex64) -> Complex64 {
    let (dc, t, a, b) = (p[0], p[1], p[2], p[3]);
    (1.0 + (jw * t).powf(a)).powf(b) / (jw * dc)
}

pub(super) fn havriliak_negami_alternative(p: &[f64], jw: Complex64) -> Complex64 {
    let (r, t, a, b) = (p[0], p[1], p[2], p[3]);
    r / (1.0 + (jw * t).powf(a)).powf(b)
}

pub(super) fn havriliak_negami_expr(p: &[Expr], jw: Expr) -> Expr {
    let (dc, t, a, b) = (&p[0], &p[1], &p[2], &p[3]);
    let relaxation = (Expr::number(1.0) + (jw.clone() * t.clone()).pow(a.clone())).pow(b.clone());
    relaxation / (jw * dc.clone())
}

pub(super) fn havriliak_negami_alternative_expr(p: &[Expr], jw: Expr) -> Expr {
    let (r, t, a, b) = (&p[0], &p[1], &p[2], &p[3]);
    r.clone() / (Expr::number(1.0) + (jw * t.clone()).pow(a.clone())).pow(b.clone())
}
