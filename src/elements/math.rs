//! Complex helpers shared by the numeric and symbolic evaluators.

use std::f64::consts::PI;

use num_complex::Complex64;

/// Angular frequency term `jω` for an excitation frequency in hertz.
pub fn jw(frequency: f64) -> Complex64 {
    Complex64::new(0.0, 2.0 * PI * frequency)
}

/// Hyperbolic tangent that stays finite for large real parts.
///
/// Evaluated through `exp(-2|z|)` instead of `sinh/cosh`, which overflow
/// once `|Re z|` exceeds ~355 (Warburg terms reach that at high frequency).
pub fn tanh(z: Complex64) -> Complex64 {
    if z.re < 0.0 {
        return -tanh(-z);
    }
    let e = (-2.0 * z).exp();
    (1.0 - e) / (1.0 + e)
}

/// Hyperbolic cotangent, see [`tanh`].
pub fn coth(z: Complex64) -> Complex64 {
    if z.re < 0.0 {
        return -coth(-z);
    }
    let e = (-2.0 * z).exp();
    (1.0 + e) / (1.0 - e)
}
