//! Model evaluation for the five elementary families.
//!
//! The fitter and reporting code rely on two primitive operations:
//! - predict y(x) given a family and its coefficients (for residuals/plots)
//! - render the fitted equation as a display string
//!
//! These are implemented here for each family. Coefficient layout:
//!
//! - Linear:      `[a, b]` for `y = a·x + b`
//! - Exponential: `[a, b]` for `y = a·e^(b·x)`
//! - Logarithmic: `[a, b]` for `y = a·ln(x) + b`
//! - Power:       `[a, b]` for `y = a·x^b`
//! - Quadratic:   `[a, b, c]` for `y = a·x² + b·x + c`

use crate::domain::ModelFamily;

/// Significant digits used when rendering coefficients in equation strings.
///
/// Display only: evaluators always use the unrounded coefficients.
pub const EQUATION_SIG_DIGITS: i32 = 4;

/// Predict `y(x)` for the given family.
///
/// Evaluation outside a family's domain (e.g., `ln(x)` for `x <= 0`) follows
/// IEEE semantics and yields NaN rather than panicking; callers treat
/// non-finite predictions as a failed candidate.
///
/// # Panics
/// Panics if `coeffs` is shorter than `family.coeff_len()`. Callers obtain
/// coefficient vectors from the fitters, which size them correctly.
pub fn predict(family: ModelFamily, x: f64, coeffs: &[f64]) -> f64 {
    match family {
        ModelFamily::Linear => coeffs[0] * x + coeffs[1],
        ModelFamily::Exponential => coeffs[0] * (coeffs[1] * x).exp(),
        ModelFamily::Logarithmic => coeffs[0] * x.ln() + coeffs[1],
        ModelFamily::Power => coeffs[0] * x.powf(coeffs[1]),
        ModelFamily::Quadratic => (coeffs[0] * x + coeffs[1]) * x + coeffs[2],
    }
}

/// Render the fitted equation for terminal/chart display.
pub fn equation_string(family: ModelFamily, coeffs: &[f64]) -> String {
    match family {
        ModelFamily::Linear => format!(
            "y = {}x {}",
            fmt_coeff(coeffs[0]),
            fmt_signed(coeffs[1])
        ),
        ModelFamily::Exponential => format!(
            "y = {}e^({}x)",
            fmt_coeff(coeffs[0]),
            fmt_coeff(coeffs[1])
        ),
        ModelFamily::Logarithmic => format!(
            "y = {}ln(x) {}",
            fmt_coeff(coeffs[0]),
            fmt_signed(coeffs[1])
        ),
        ModelFamily::Power => format!("y = {}x^{}", fmt_coeff(coeffs[0]), fmt_coeff(coeffs[1])),
        ModelFamily::Quadratic => format!(
            "y = {}x^2 {}x {}",
            fmt_coeff(coeffs[0]),
            fmt_signed(coeffs[1]),
            fmt_signed(coeffs[2])
        ),
    }
}

/// Round to `EQUATION_SIG_DIGITS` significant digits.
fn round_sig(v: f64) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let exp = v.abs().log10().floor() as i32;
    let factor = 10f64.powi(EQUATION_SIG_DIGITS - 1 - exp);
    (v * factor).round() / factor
}

fn fmt_coeff(v: f64) -> String {
    format!("{}", round_sig(v))
}

/// Render a trailing term with an explicit sign, e.g. `+ 3` or `- 0.5`.
fn fmt_signed(v: f64) -> String {
    let r = round_sig(v);
    if r < 0.0 {
        format!("- {}", -r)
    } else {
        format!("+ {r}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predict_matches_each_family() {
        assert_eq!(predict(ModelFamily::Linear, 2.0, &[3.0, 1.0]), 7.0);
        let y = predict(ModelFamily::Exponential, 1.0, &[2.0, 0.0]);
        assert!((y - 2.0).abs() < 1e-12);
        let y = predict(ModelFamily::Logarithmic, 1.0, &[5.0, 3.0]);
        assert!((y - 3.0).abs() < 1e-12);
        let y = predict(ModelFamily::Power, 3.0, &[2.0, 2.0]);
        assert!((y - 18.0).abs() < 1e-12);
        assert_eq!(predict(ModelFamily::Quadratic, 2.0, &[1.0, -1.0, 4.0]), 6.0);
    }

    #[test]
    fn predict_outside_domain_is_nan_not_panic() {
        assert!(predict(ModelFamily::Logarithmic, -1.0, &[1.0, 0.0]).is_nan());
        assert!(predict(ModelFamily::Power, -2.0, &[1.0, 0.5]).is_nan());
    }

    #[test]
    fn equation_strings_render_signs_and_precision() {
        assert_eq!(equation_string(ModelFamily::Linear, &[2.0, -3.0]), "y = 2x - 3");
        assert_eq!(equation_string(ModelFamily::Linear, &[2.0, 3.0]), "y = 2x + 3");
        assert_eq!(
            equation_string(ModelFamily::Quadratic, &[1.0, -2.0, 0.5]),
            "y = 1x^2 - 2x + 0.5"
        );
        assert_eq!(
            equation_string(ModelFamily::Exponential, &[1.5, 0.25]),
            "y = 1.5e^(0.25x)"
        );
        assert_eq!(
            equation_string(ModelFamily::Logarithmic, &[2.0, 1.0]),
            "y = 2ln(x) + 1"
        );
        assert_eq!(equation_string(ModelFamily::Power, &[2.0, 3.0]), "y = 2x^3");
    }

    #[test]
    fn coefficients_round_to_four_significant_digits() {
        assert_eq!(fmt_coeff(3.14159265), "3.142");
        assert_eq!(fmt_coeff(0.000123456), "0.0001235");
        assert_eq!(fmt_coeff(123456.0), "123500");
        assert_eq!(fmt_coeff(0.0), "0");
    }
}
