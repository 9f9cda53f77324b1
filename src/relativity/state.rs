use super::error::Result;
use super::special::{
    EnergyBreakdown, NEAR_LIGHT_SPEED_BETA, SpacetimeHeading, VelocityFraction,
    energy_decomposition, length_contraction, lorentz_boost, lorentz_factor,
    relativistic_mass, spacetime_heading, time_dilation,
};

/// γ - 1 below which effects are too small to show on a readout.
const CLASSICAL_GAMMA_EXCESS: f64 = 1e-3;

/// Everything a caller can feed into one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateInputs {
    pub beta: f64,
    /// kg
    pub rest_mass: f64,
    /// seconds
    pub proper_time: f64,
    /// metres
    pub proper_length: f64,
    /// Event to boost into the moving frame, (metres, seconds).
    pub event: (f64, f64),
}

impl StateInputs {
    pub fn at(self, beta: f64) -> Self {
        Self { beta, ..self }
    }
}

impl Default for StateInputs {
    fn default() -> Self {
        Self {
            beta: 0.0,
            rest_mass: 1.0,
            proper_time: 1.0,
            proper_length: 1.0,
            event: (0.0, 0.0),
        }
    }
}

/// How far from Newtonian behaviour a velocity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    /// γ indistinguishable from 1 at display precision.
    Classical,
    Relativistic,
    /// β at or above [`NEAR_LIGHT_SPEED_BETA`]; readouts grow without bound.
    NearLightSpeed,
}

impl Regime {
    pub fn classify(beta: VelocityFraction) -> Self {
        if beta.get() >= NEAR_LIGHT_SPEED_BETA {
            Self::NearLightSpeed
        } else if beta.gamma() - 1.0 < CLASSICAL_GAMMA_EXCESS {
            Self::Classical
        } else {
            Self::Relativistic
        }
    }

    pub fn is_warning(self) -> bool {
        self == Self::NearLightSpeed
    }
}

/// Snapshot of every derived quantity for one set of inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativisticState {
    pub inputs: StateInputs,
    pub gamma: f64,
    /// Rate of the moving clock relative to the observer's, 1/γ.
    pub time_rate: f64,
    pub dilated_time: f64,
    pub contracted_length: f64,
    pub relativistic_mass: f64,
    pub energy: EnergyBreakdown,
    /// (x', t') of the input event.
    pub boosted_event: (f64, f64),
    pub heading: SpacetimeHeading,
    pub regime: Regime,
}

impl RelativisticState {
    pub fn compute(inputs: StateInputs) -> Result<Self> {
        let beta = VelocityFraction::new(inputs.beta)?;
        let b = beta.get();
        let gamma = lorentz_factor(b)?;
        let (x, t) = inputs.event;

        Ok(Self {
            inputs,
            gamma,
            time_rate: 1.0 / gamma,
            dilated_time: time_dilation(inputs.proper_time, b)?,
            contracted_length: length_contraction(inputs.proper_length, b)?,
            relativistic_mass: relativistic_mass(inputs.rest_mass, b)?,
            energy: energy_decomposition(inputs.rest_mass, b)?,
            boosted_event: lorentz_boost(x, t, b)?,
            heading: spacetime_heading(b)?,
            regime: Regime::classify(beta),
        })
    }

    pub fn beta(&self) -> f64 {
        self.inputs.beta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relativity::special::C;

    #[test]
    fn state_at_rest_is_newtonian() {
        let inputs = StateInputs {
            proper_time: 4.0,
            proper_length: 7.0,
            event: (C, 1.0),
            ..StateInputs::default()
        };
        let state = RelativisticState::compute(inputs).unwrap();

        assert_eq!(state.gamma, 1.0);
        assert_eq!(state.dilated_time, 4.0);
        assert_eq!(state.contracted_length, 7.0);
        assert_eq!(state.energy.kinetic, 0.0);
        assert_eq!(state.boosted_event, (C, 1.0));
        assert_eq!(state.regime, Regime::Classical);
    }

    #[test]
    fn state_matches_single_point_calls() {
        let inputs = StateInputs {
            beta: 0.6,
            rest_mass: 1.0,
            ..StateInputs::default()
        };
        let state = RelativisticState::compute(inputs).unwrap();

        assert!((state.gamma - 1.25).abs() < 1e-12);
        assert!((state.time_rate - 0.8).abs() < 1e-12);
        assert!((state.relativistic_mass - 1.25).abs() < 1e-12);
        assert_eq!(state.regime, Regime::Relativistic);
    }

    #[test]
    fn regime_boundaries() {
        let classify = |b| Regime::classify(VelocityFraction::new(b).unwrap());
        assert_eq!(classify(0.01), Regime::Classical);
        assert_eq!(classify(0.5), Regime::Relativistic);
        assert_eq!(classify(0.989), Regime::Relativistic);
        assert_eq!(classify(0.99), Regime::NearLightSpeed);
        assert!(classify(0.999).is_warning());
    }

    #[test]
    fn invalid_beta_propagates_domain_error() {
        let err = RelativisticState::compute(StateInputs::default().at(1.0)).unwrap_err();
        assert!(err.is_domain());
    }

    #[test]
    fn negative_mass_is_rejected() {
        let inputs = StateInputs {
            rest_mass: -1.0,
            ..StateInputs::default()
        };
        assert!(RelativisticState::compute(inputs).unwrap_err().is_domain());
    }
}
