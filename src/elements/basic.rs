//! Ideal and fractional lumped elements: R, C, L, La, Q and the K helper.

use num_complex::Complex64;

use super::{ElementDefinition, ParameterDefinition};
use crate::symbolic::Expr;

const INF: f64 = f64::INFINITY;

pub(super) const RESISTOR: ElementDefinition = ElementDefinition {
    symbol: "R",
    description: "R: Resistor",
    extended_description: "Resistor\n\n    Z = R\n",
    parameters: &[ParameterDefinition::new("R", 1.0e3, 0.0, INF, "ohm")],
};

pub(super) const CAPACITOR: ElementDefinition = ElementDefinition {
    symbol: "C",
    description: "C: Capacitor",
    extended_description: "Capacitor\n\n    Z = 1/(C*j*2*pi*f)\n",
    parameters: &[ParameterDefinition::new("C", 1.0e-6, 1.0e-24, 1.0e3, "F")],
};

pub(super) const INDUCTOR: ElementDefinition = ElementDefinition {
    symbol: "L",
    description: "L: Inductor",
    extended_description: "Inductor\n\n    Z = L*j*2*pi*f\n",
    parameters: &[ParameterDefinition::new("L", 1.0e-6, 0.0, 1.0e3, "H")],
};

pub(super) const MODIFIED_INDUCTOR: ElementDefinition = ElementDefinition {
    symbol: "La",
    description: "La: Modified inductor",
    extended_description: "Modified inductor\n\n    Z = L*(j*2*pi*f)^n\n\n\
        An inductor with a non-ideal phase, 0 <= n <= 1.\n",
    parameters: &[
        ParameterDefinition::new("L", 1.0e-6, 0.0, 1.0e3, "H*s^(n-1)"),
        ParameterDefinition::new("n", 0.95, 0.0, 1.0, ""),
    ],
};

pub(super) const CONSTANT_PHASE_ELEMENT: ElementDefinition = ElementDefinition {
    symbol: "Q",
    description: "Q: Constant phase element",
    extended_description: "Constant phase element\n\n    Z = 1/(Y*(j*2*pi*f)^n)\n\n\
        Behaves as a capacitor for n = 1 and as a resistor for n = 0.\n",
    parameters: &[
        ParameterDefinition::new("Y", 1.0e-6, 1.0e-24, 1.0e3, "S*s^n"),
        ParameterDefinition::new("n", 0.95, 0.0, 1.0, ""),
    ],
};

pub(super) const KRAMERS_KRONIG_RC: ElementDefinition = ElementDefinition {
    symbol: "K",
    description: "K: Kramers-Kronig RC element",
    extended_description: "Kramers-Kronig RC element\n\n    Z = R/(1 + j*2*pi*f*t)\n\n\
        A parallel RC pair parametrised by its time constant t = R*C.\n",
    parameters: &[
        ParameterDefinition::new("R", 1.0, -INF, INF, "ohm"),
        ParameterDefinition::new("t", 1.0, 1.0e-24, INF, "s"),
    ],
};

pub(super) fn resistor(p: &[f64], _jw: Complex64) -> Complex64 {
    Complex64::new(p[0], 0.0)
}

pub(super) fn capacitor(p: &[f64], jw: Complex64) -> Complex64 {
    (jw * p[0]).inv()
}

pub(super) fn inductor(p: &[f64], jw: Complex64) -> Complex64 {
    jw * p[0]
}

pub(super) fn modified_inductor(p: &[f64], jw: Complex64) -> Complex64 {
    jw.powf(p[1]) * p[0]
}

pub(super) fn constant_phase_element(p: &[f64], jw: Complex64) -> Complex64 {
    (jw.powf(p[1]) * p[0]).inv()
}

pub(super) fn kramers_kronig_rc(p: &[f64], jw: Complex64) -> Complex64 {
    p[0] / (1.0 + jw * p[1])
}

pub(super) fn resistor_expr(p: &[Expr], _jw: Expr) -> Expr {
    p[0].clone()
}

pub(super) fn capacitor_expr(p: &[Expr], jw: Expr) -> Expr {
    (p[0].clone() * jw).recip()
}

pub(super) fn inductor_expr(p: &[Expr], jw: Expr) -> Expr {
    p[0].clone() * jw
}

pub(super) fn modified_inductor_expr(p: &[Expr], jw: Expr) -> Expr {
    p[0].clone() * jw.pow(p[1].clone())
}

pub(super) fn constant_phase_element_expr(p: &[Expr], jw: Expr) -> Expr {
    (p[0].clone() * jw.pow(p[1].clone())).recip()
}

pub(super) fn kramers_kronig_rc_expr(p: &[Expr], jw: Expr) -> Expr {
    p[0].clone() / (Expr::number(1.0) + jw * p[1].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::math::jw;
    use approx::assert_relative_eq;

    #[test]
    fn test_capacitor_is_negative_imaginary() {
        let z = capacitor(&[1.0e-6], jw(1.0e3));
        assert_relative_eq!(z.re, 0.0, epsilon = 1e-12);
        assert_relative_eq!(z.im, -1.0 / (2.0 * std::f64::consts::PI * 1.0e-3), max_relative = 1e-12);
    }

    #[test]
    fn test_cpe_with_unit_exponent_is_capacitor() {
        let w = jw(50.0);
        let q = constant_phase_element(&[2.0e-6, 1.0], w);
        let c = capacitor(&[2.0e-6], w);
        assert_relative_eq!(q.re, c.re, epsilon = 1e-9);
        assert_relative_eq!(q.im, c.im, max_relative = 1e-12);
    }

    #[test]
    fn test_kramers_kronig_rc_limits() {
        let low = kramers_kronig_rc(&[5.0, 1.0e-3], jw(1.0e-6));
        assert_relative_eq!(low.re, 5.0, max_relative = 1e-9);
        let high = kramers_kronig_rc(&[5.0, 1.0e-3], jw(1.0e9));
        assert!(high.norm() < 1e-3);
    }
}
