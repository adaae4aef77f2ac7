//! Closed-form function catalog
//!
//! Each demonstration works against a small, closed set of functions. The
//! derivative explorer wires exact derivatives; the integrator wires exact
//! definite integrals. A function is addressed by its [`FunctionKind`] tag
//! within a [`Catalog`], and dispatch is a plain `match` over [`FunctionId`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NumericError;

/// User-facing function tag
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionKind {
    Quadratic,
    Cubic,
    Sine,
    Exponential,
    Linear,
}

impl FunctionKind {
    /// Lowercase tag used in configuration and on the command line
    pub fn tag(self) -> &'static str {
        match self {
            FunctionKind::Quadratic => "quadratic",
            FunctionKind::Cubic => "cubic",
            FunctionKind::Sine => "sine",
            FunctionKind::Exponential => "exponential",
            FunctionKind::Linear => "linear",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for FunctionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quadratic" => Ok(FunctionKind::Quadratic),
            "cubic" => Ok(FunctionKind::Cubic),
            "sine" => Ok(FunctionKind::Sine),
            "exponential" => Ok(FunctionKind::Exponential),
            "linear" => Ok(FunctionKind::Linear),
            other => Err(format!("unknown function '{}'", other)),
        }
    }
}

/// Which demonstration's function set to resolve against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    /// Derivative explorer: value plus exact derivative
    Tangent,
    /// Riemann integrator: value plus exact definite integral
    Area,
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Catalog::Tangent => f.write_str("tangent"),
            Catalog::Area => f.write_str("area"),
        }
    }
}

impl Catalog {
    /// Function kinds this catalog wires, in menu order
    pub fn kinds(self) -> &'static [FunctionKind] {
        match self {
            Catalog::Tangent => &[
                FunctionKind::Quadratic,
                FunctionKind::Cubic,
                FunctionKind::Sine,
                FunctionKind::Exponential,
            ],
            Catalog::Area => &[
                FunctionKind::Quadratic,
                FunctionKind::Sine,
                FunctionKind::Linear,
                FunctionKind::Cubic,
            ],
        }
    }

    /// Resolve a function tag to its spec
    pub fn get(self, kind: FunctionKind) -> Result<FunctionSpec, NumericError> {
        let id = match (self, kind) {
            (Catalog::Tangent, FunctionKind::Quadratic) => {
                FunctionId::Tangent(TangentCurve::Quadratic)
            }
            (Catalog::Tangent, FunctionKind::Cubic) => FunctionId::Tangent(TangentCurve::Cubic),
            (Catalog::Tangent, FunctionKind::Sine) => FunctionId::Tangent(TangentCurve::Sine),
            (Catalog::Tangent, FunctionKind::Exponential) => {
                FunctionId::Tangent(TangentCurve::Exponential)
            }
            (Catalog::Area, FunctionKind::Quadratic) => FunctionId::Area(AreaCurve::Quadratic),
            (Catalog::Area, FunctionKind::Sine) => FunctionId::Area(AreaCurve::Sine),
            (Catalog::Area, FunctionKind::Linear) => FunctionId::Area(AreaCurve::Linear),
            (Catalog::Area, FunctionKind::Cubic) => FunctionId::Area(AreaCurve::Cubic),
            (catalog, kind) => return Err(NumericError::Unsupported { catalog, kind }),
        };
        Ok(FunctionSpec { id, kind })
    }
}

/// Curves of the derivative explorer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TangentCurve {
    Quadratic,
    Cubic,
    Sine,
    Exponential,
}

/// Curves of the Riemann integrator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AreaCurve {
    Quadratic,
    Sine,
    Linear,
    Cubic,
}

/// Resolved catalog entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FunctionId {
    Tangent(TangentCurve),
    Area(AreaCurve),
}

/// An immutable catalog entry: value, optional derivative, optional integral
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSpec {
    id: FunctionId,
    kind: FunctionKind,
}

impl FunctionSpec {
    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    pub fn catalog(&self) -> Catalog {
        match self.id {
            FunctionId::Tangent(_) => Catalog::Tangent,
            FunctionId::Area(_) => Catalog::Area,
        }
    }

    /// f(x)
    pub fn evaluate(&self, x: f64) -> f64 {
        match self.id {
            FunctionId::Tangent(TangentCurve::Quadratic) => 0.1 * x * x - 2.0,
            FunctionId::Tangent(TangentCurve::Cubic) => 0.01 * x * x * x - 0.1 * x * x - x + 2.0,
            FunctionId::Tangent(TangentCurve::Sine) => 3.0 * (x / 10.0).sin() + 1.0,
            FunctionId::Tangent(TangentCurve::Exponential) => (x / 20.0).exp() - 1.0,
            FunctionId::Area(AreaCurve::Quadratic) => 0.05 * x * x + 1.0,
            FunctionId::Area(AreaCurve::Sine) => 2.0 * (x / 5.0).sin() + 3.0,
            FunctionId::Area(AreaCurve::Linear) => 0.2 * x + 5.0,
            FunctionId::Area(AreaCurve::Cubic) => 0.001 * x * x * x + 0.1 * x + 3.0,
        }
    }

    /// f'(x), exact, when the catalog wires it
    pub fn derivative(&self, x: f64) -> Option<f64> {
        match self.id {
            FunctionId::Tangent(TangentCurve::Quadratic) => Some(0.2 * x),
            FunctionId::Tangent(TangentCurve::Cubic) => Some(0.03 * x * x - 0.2 * x - 1.0),
            FunctionId::Tangent(TangentCurve::Sine) => Some(0.3 * (x / 10.0).cos()),
            FunctionId::Tangent(TangentCurve::Exponential) => Some((x / 20.0).exp() / 20.0),
            FunctionId::Area(_) => None,
        }
    }

    /// Exact definite integral over [a, b], when the catalog wires it
    pub fn integral(&self, a: f64, b: f64) -> Option<f64> {
        match self.id {
            FunctionId::Area(AreaCurve::Quadratic) => {
                Some(0.05 * (b * b * b - a * a * a) / 3.0 + (b - a))
            }
            FunctionId::Area(AreaCurve::Sine) => {
                Some(-10.0 * ((b / 5.0).cos() - (a / 5.0).cos()) + 3.0 * (b - a))
            }
            FunctionId::Area(AreaCurve::Linear) => Some(0.1 * (b * b - a * a) + 5.0 * (b - a)),
            FunctionId::Area(AreaCurve::Cubic) => Some(
                0.00025 * (b * b * b * b - a * a * a * a) + 0.05 * (b * b - a * a) + 3.0 * (b - a),
            ),
            FunctionId::Tangent(_) => None,
        }
    }

    pub fn has_derivative(&self) -> bool {
        matches!(self.id, FunctionId::Tangent(_))
    }

    pub fn has_integral(&self) -> bool {
        matches!(self.id, FunctionId::Area(_))
    }

    /// Human-readable formula
    pub fn display_name(&self) -> &'static str {
        match self.id {
            FunctionId::Tangent(TangentCurve::Quadratic) => "f(x) = 0.1x² - 2",
            FunctionId::Tangent(TangentCurve::Cubic) => "f(x) = 0.01x³ - 0.1x² - x + 2",
            FunctionId::Tangent(TangentCurve::Sine) => "f(x) = 3sin(x/10) + 1",
            FunctionId::Tangent(TangentCurve::Exponential) => "f(x) = e^(x/20) - 1",
            FunctionId::Area(AreaCurve::Quadratic) => "f(x) = 0.05x² + 1",
            FunctionId::Area(AreaCurve::Sine) => "f(x) = 2sin(x/5) + 3",
            FunctionId::Area(AreaCurve::Linear) => "f(x) = 0.2x + 5",
            FunctionId::Area(AreaCurve::Cubic) => "f(x) = 0.001x³ + 0.1x + 3",
        }
    }

    /// Human-readable derivative formula
    pub fn derivative_name(&self) -> Option<&'static str> {
        match self.id {
            FunctionId::Tangent(TangentCurve::Quadratic) => Some("f'(x) = 0.2x"),
            FunctionId::Tangent(TangentCurve::Cubic) => Some("f'(x) = 0.03x² - 0.2x - 1"),
            FunctionId::Tangent(TangentCurve::Sine) => Some("f'(x) = 0.3cos(x/10)"),
            FunctionId::Tangent(TangentCurve::Exponential) => Some("f'(x) = (1/20)e^(x/20)"),
            FunctionId::Area(_) => None,
        }
    }

    /// Sample the curve on `[from, to]` every `step` (endpoint included when hit)
    ///
    /// An empty range or non-positive step yields no points.
    pub fn sample(&self, from: f64, to: f64, step: f64) -> Vec<(f64, f64)> {
        sample_points(from, to, step)
            .map(|x| (x, self.evaluate(x)))
            .collect()
    }

    /// Sample the derivative curve, when wired
    pub fn sample_derivative(&self, from: f64, to: f64, step: f64) -> Option<Vec<(f64, f64)>> {
        if !self.has_derivative() {
            return None;
        }
        Some(
            sample_points(from, to, step)
                .filter_map(|x| self.derivative(x).map(|dy| (x, dy)))
                .collect(),
        )
    }
}

/// Grid points `from + i * step` not exceeding `to`
///
/// Points are computed by index rather than by repeated addition so the grid
/// does not drift.
fn sample_points(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && to >= from {
        ((to - from) / step + 1e-9).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |i| from + i as f64 * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_kinds_resolve() {
        for catalog in [Catalog::Tangent, Catalog::Area] {
            for &kind in catalog.kinds() {
                let spec = catalog.get(kind).unwrap();
                assert_eq!(spec.kind(), kind);
                assert_eq!(spec.catalog(), catalog);
            }
        }
    }

    #[test]
    fn test_unsupported_kinds() {
        assert_eq!(
            Catalog::Tangent.get(FunctionKind::Linear),
            Err(NumericError::Unsupported {
                catalog: Catalog::Tangent,
                kind: FunctionKind::Linear
            })
        );
        assert!(Catalog::Area.get(FunctionKind::Exponential).is_err());
    }

    #[test]
    fn test_same_tag_differs_per_catalog() {
        let tangent = Catalog::Tangent.get(FunctionKind::Quadratic).unwrap();
        let area = Catalog::Area.get(FunctionKind::Quadratic).unwrap();
        assert_eq!(tangent.evaluate(10.0), 8.0);
        assert_eq!(area.evaluate(10.0), 6.0);
    }

    #[test]
    fn test_tangent_derivatives_match_finite_differences() {
        let h = 1e-5;
        for &kind in Catalog::Tangent.kinds() {
            let spec = Catalog::Tangent.get(kind).unwrap();
            for x in [-40.0, -12.5, 0.0, 7.0, 40.0] {
                let numeric = (spec.evaluate(x + h) - spec.evaluate(x - h)) / (2.0 * h);
                let exact = spec.derivative(x).unwrap();
                assert!(
                    (numeric - exact).abs() < 1e-4,
                    "{} at {}: numeric {} vs exact {}",
                    kind,
                    x,
                    numeric,
                    exact
                );
            }
        }
    }

    #[test]
    fn test_area_integrals_are_antiderivative_differences() {
        // d/db of the integral must give back f(b)
        let h = 1e-5;
        for &kind in Catalog::Area.kinds() {
            let spec = Catalog::Area.get(kind).unwrap();
            for b in [-15.0, -2.0, 3.0, 18.0] {
                let numeric = (spec.integral(-20.0, b + h).unwrap()
                    - spec.integral(-20.0, b - h).unwrap())
                    / (2.0 * h);
                assert!((numeric - spec.evaluate(b)).abs() < 1e-4, "{} at {}", kind, b);
            }
            assert!(spec.integral(4.0, 4.0).unwrap().abs() < 1e-12);
        }
    }

    #[test]
    fn test_missing_closed_forms() {
        let tangent = Catalog::Tangent.get(FunctionKind::Sine).unwrap();
        assert!(tangent.integral(0.0, 1.0).is_none());
        assert!(!tangent.has_integral());

        let area = Catalog::Area.get(FunctionKind::Sine).unwrap();
        assert!(area.derivative(1.0).is_none());
        assert!(area.derivative_name().is_none());
        assert!(area.sample_derivative(-1.0, 1.0, 0.5).is_none());
    }

    #[test]
    fn test_values_finite_over_sweep_domain() {
        for catalog in [Catalog::Tangent, Catalog::Area] {
            for &kind in catalog.kinds() {
                let spec = catalog.get(kind).unwrap();
                for (x, y) in spec.sample(-50.0, 50.0, 0.5) {
                    assert!(y.is_finite(), "{} not finite at {}", kind, x);
                }
            }
        }
    }

    #[test]
    fn test_sample_grid() {
        let spec = Catalog::Area.get(FunctionKind::Linear).unwrap();
        let points = spec.sample(-1.0, 1.0, 0.5);
        assert_eq!(points.len(), 5);
        assert_eq!(points[0].0, -1.0);
        assert!((points[0].1 - 4.8).abs() < 1e-12);
        assert_eq!(points[4].0, 1.0);

        assert!(spec.sample(1.0, -1.0, 0.5).is_empty());
        assert!(spec.sample(-1.0, 1.0, 0.0).is_empty());
    }

    #[test]
    fn test_kind_parse_roundtrip() {
        for kind in [
            FunctionKind::Quadratic,
            FunctionKind::Cubic,
            FunctionKind::Sine,
            FunctionKind::Exponential,
            FunctionKind::Linear,
        ] {
            assert_eq!(kind.to_string().parse::<FunctionKind>(), Ok(kind));
        }
        assert_eq!(" Sine ".parse::<FunctionKind>(), Ok(FunctionKind::Sine));
        assert!("tangent".parse::<FunctionKind>().is_err());
    }

    #[test]
    fn test_display_names() {
        let spec = Catalog::Tangent.get(FunctionKind::Exponential).unwrap();
        assert_eq!(spec.display_name(), "f(x) = e^(x/20) - 1");
        assert_eq!(spec.derivative_name(), Some("f'(x) = (1/20)e^(x/20)"));
    }
}
