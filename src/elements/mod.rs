//! Circuit element models.
//!
//! Every supported element kind is listed in [`ElementKind`]. Per-kind
//! metadata (symbol, descriptions, parameter defaults and limits) lives in a
//! static [`ElementDefinition`] table; the impedance formula and its
//! symbolic counterpart are dispatched on the same enum.
//!
//! | Symbol | Element |
//! |--------|---------|
//! | R | Resistor |
//! | C | Capacitor |
//! | L | Inductor |
//! | La | Modified inductor |
//! | Q | Constant phase element |
//! | W | Warburg, semi-infinite |
//! | Ws | Warburg, finite length (short) |
//! | Wo | Warburg, finite space (open) |
//! | Ls | de Levie pore, finite length |
//! | G | Gerischer |
//! | H | Havriliak-Negami |
//! | Ha | Havriliak-Negami, alternative form |
//!
//! The Kramers-Kronig RC element `K` is also recognised by the parser but is
//! not part of [`known_elements`].

mod basic;
mod diffusion;
mod element;
pub(crate) mod math;
mod relaxation;

pub use element::{Element, Parameter};

use std::fmt;

use num_complex::Complex64;

use crate::symbolic::Expr;

/// Static description of one element parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterDefinition {
    pub name: &'static str,
    pub default: f64,
    pub fixed: bool,
    pub lower: f64,
    pub upper: f64,
    /// Cosmetic unit annotation, never used for conversion.
    pub unit: &'static str,
}

impl ParameterDefinition {
    const fn new(name: &'static str, default: f64, lower: f64, upper: f64, unit: &'static str) -> Self {
        Self {
            name,
            default,
            fixed: false,
            lower,
            upper,
            unit,
        }
    }
}

/// Static description of an element kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementDefinition {
    pub symbol: &'static str,
    /// One-line description, starting with the symbol.
    pub description: &'static str,
    /// Multi-line description including the impedance formula.
    pub extended_description: &'static str,
    pub parameters: &'static [ParameterDefinition],
}

impl ElementDefinition {
    /// Look up a parameter definition by name.
    pub fn parameter(&self, name: &str) -> Option<&'static ParameterDefinition> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// The element kinds understood by the parser and the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Resistor,
    Capacitor,
    Inductor,
    ModifiedInductor,
    ConstantPhaseElement,
    Warburg,
    WarburgShort,
    WarburgOpen,
    DeLevieFiniteLength,
    Gerischer,
    HavriliakNegami,
    HavriliakNegamiAlternative,
    KramersKronigRc,
}

impl ElementKind {
    /// Every kind, in registry order.
    pub const ALL: [ElementKind; 13] = [
        Self::Resistor,
        Self::Capacitor,
        Self::Inductor,
        Self::ModifiedInductor,
        Self::ConstantPhaseElement,
        Self::Warburg,
        Self::WarburgShort,
        Self::WarburgOpen,
        Self::DeLevieFiniteLength,
        Self::Gerischer,
        Self::HavriliakNegami,
        Self::HavriliakNegamiAlternative,
        Self::KramersKronigRc,
    ];

    /// Static metadata for this kind.
    pub fn definition(self) -> &'static ElementDefinition {
        match self {
            Self::Resistor => &basic::RESISTOR,
            Self::Capacitor => &basic::CAPACITOR,
            Self::Inductor => &basic::INDUCTOR,
            Self::ModifiedInductor => &basic::MODIFIED_INDUCTOR,
            Self::ConstantPhaseElement => &basic::CONSTANT_PHASE_ELEMENT,
            Self::Warburg => &diffusion::WARBURG,
            Self::WarburgShort => &diffusion::WARBURG_SHORT,
            Self::WarburgOpen => &diffusion::WARBURG_OPEN,
            Self::DeLevieFiniteLength => &diffusion::DE_LEVIE_FINITE_LENGTH,
            Self::Gerischer => &diffusion::GERISCHER,
            Self::HavriliakNegami => &relaxation::HAVRILIAK_NEGAMI,
            Self::HavriliakNegamiAlternative => &relaxation::HAVRILIAK_NEGAMI_ALTERNATIVE,
            Self::KramersKronigRc => &basic::KRAMERS_KRONIG_RC,
        }
    }

    pub fn symbol(self) -> &'static str {
        self.definition().symbol
    }

    /// Resolve a CDC symbol (case-sensitive).
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.symbol() == symbol)
    }

    /// Whether the kind is listed by [`known_elements`].
    pub fn is_public(self) -> bool {
        !matches!(self, Self::KramersKronigRc)
    }

    /// Create an element of this kind with default parameters.
    pub fn create(self) -> Element {
        Element::new(self)
    }

    pub(crate) fn impedance(self, values: &[f64], frequency: f64) -> Complex64 {
        let jw = math::jw(frequency);
        match self {
            Self::Resistor => basic::resistor(values, jw),
            Self::Capacitor => basic::capacitor(values, jw),
            Self::Inductor => basic::inductor(values, jw),
            Self::ModifiedInductor => basic::modified_inductor(values, jw),
            Self::ConstantPhaseElement => basic::constant_phase_element(values, jw),
            Self::Warburg => diffusion::warburg(values, jw),
            Self::WarburgShort => diffusion::warburg_short(values, jw),
            Self::WarburgOpen => diffusion::warburg_open(values, jw),
            Self::DeLevieFiniteLength => diffusion::de_levie_finite_length(values, jw),
            Self::Gerischer => diffusion::gerischer(values, jw),
            Self::HavriliakNegami => relaxation::havriliak_negami(values, jw),
            Self::HavriliakNegamiAlternative => relaxation::havriliak_negami_alternative(values, jw),
            Self::KramersKronigRc => basic::kramers_kronig_rc(values, jw),
        }
    }

    pub(crate) fn expression(self, parameters: &[Expr], jw: Expr) -> Expr {
        match self {
            Self::Resistor => basic::resistor_expr(parameters, jw),
            Self::Capacitor => basic::capacitor_expr(parameters, jw),
            Self::Inductor => basic::inductor_expr(parameters, jw),
            Self::ModifiedInductor => basic::modified_inductor_expr(parameters, jw),
            Self::ConstantPhaseElement => basic::constant_phase_element_expr(parameters, jw),
            Self::Warburg => diffusion::warburg_expr(parameters, jw),
            Self::WarburgShort => diffusion::warburg_short_expr(parameters, jw),
            Self::WarburgOpen => diffusion::warburg_open_expr(parameters, jw),
            Self::DeLevieFiniteLength => diffusion::de_levie_finite_length_expr(parameters, jw),
            Self::Gerischer => diffusion::gerischer_expr(parameters, jw),
            Self::HavriliakNegami => relaxation::havriliak_negami_expr(parameters, jw),
            Self::HavriliakNegamiAlternative => {
                relaxation::havriliak_negami_alternative_expr(parameters, jw)
            }
            Self::KramersKronigRc => basic::kramers_kronig_rc_expr(parameters, jw),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The public element registry, in a stable order.
pub fn known_elements() -> Vec<ElementKind> {
    ElementKind::ALL.into_iter().filter(|kind| kind.is_public()).collect()
}
