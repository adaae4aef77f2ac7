//! Parameter store
//!
//! User-adjustable inputs live apart from simulation state. Every write goes
//! through a [`ParamRange`], so a stepper only ever sees validated values.

use std::fmt;
use std::str::FromStr;

use crate::clock::ClockState;
use crate::error::ParameterError;

/// Closed range a slider may take, with optional snapping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    /// Snap to `min + k * step` when set
    pub step: Option<f64>,
}

impl ParamRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max, step: None }
    }

    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Validate `value` for the parameter `name`
    ///
    /// Non-finite input is refused; anything else is snapped and clamped.
    pub fn apply(&self, name: &'static str, value: f64) -> Result<f64, ParameterError> {
        if !value.is_finite() {
            return Err(ParameterError::NotFinite { name, value });
        }
        let snapped = match self.step {
            Some(step) if step > 0.0 => self.min + ((value - self.min) / step).round() * step,
            _ => value,
        };
        let applied = snapped.clamp(self.min, self.max);
        if applied != value {
            log::debug!("{} = {} adjusted to {}", name, value, applied);
        }
        Ok(applied)
    }
}

/// Name of one parameter in a [`ParameterSet`]
pub trait ParamKey: Copy + fmt::Debug + fmt::Display + PartialEq + FromStr<Err = ParameterError> {
    /// Name used in config files, logs and errors
    fn name(self) -> &'static str;
}

/// A demonstration's set of numeric parameters
pub trait ParameterSet: Clone + fmt::Debug + PartialEq {
    type Key: ParamKey;

    fn keys() -> &'static [Self::Key];

    fn get(&self, key: Self::Key) -> f64;

    /// Store a validated value and return what was actually applied
    fn set(&mut self, key: Self::Key, value: f64) -> Result<f64, ParameterError>;

    /// Whether `key` is read-only while the clock is in `state`
    fn is_locked(_key: Self::Key, _state: ClockState) -> bool {
        false
    }
}

/// Declare a closed set of parameter keys with their config names
macro_rules! param_keys {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::params::ParamKey for $name {
            fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::params::ParamKey::name(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::ParameterError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let name = s.trim();
                $(
                    if name.eq_ignore_ascii_case($label) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::error::ParameterError::Unknown(name.to_string()))
            }
        }
    };
}

pub(crate) use param_keys;

/// Apply several values in order, stopping at the first refusal
pub fn apply_all<P: ParameterSet>(
    params: &mut P,
    values: &[(P::Key, f64)],
) -> Result<(), ParameterError> {
    for &(key, value) in values {
        params.set(key, value)?;
    }
    Ok(())
}
