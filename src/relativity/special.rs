use super::error::{Result, RelativityError, finite_input, finite_result, non_negative};

/// Speed of light in m/s.
pub const C: f64 = 299_792_458.0;

/// β at and above which a state is flagged as near light speed.
pub const NEAR_LIGHT_SPEED_BETA: f64 = 0.99;

/// Velocity as a fraction of light speed, guaranteed to lie in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct VelocityFraction(f64);

impl VelocityFraction {
    pub fn new(beta: f64) -> Result<Self> {
        if (0.0..1.0).contains(&beta) {
            Ok(Self(beta))
        } else {
            Err(RelativityError::Domain {
                quantity: "velocity fraction",
                value: beta,
                expected: "0 <= β < 1",
            })
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }

    pub fn gamma(self) -> f64 {
        1.0 / (1.0 - self.0 * self.0).sqrt()
    }
}

/// Lorentz factor γ = 1 / sqrt(1 - β²)
pub fn lorentz_factor(beta: f64) -> Result<f64> {
    Ok(VelocityFraction::new(beta)?.gamma())
}

/// Time dilation: t = τ γ
pub fn time_dilation(proper_time: f64, beta: f64) -> Result<f64> {
    let proper_time = non_negative("proper time", proper_time)?;
    finite_result("dilated time", proper_time * lorentz_factor(beta)?)
}

/// Length contraction: L = L0 / γ
pub fn length_contraction(proper_length: f64, beta: f64) -> Result<f64> {
    let proper_length = non_negative("proper length", proper_length)?;
    Ok(proper_length / lorentz_factor(beta)?)
}

/// Relativistic mass: m = m0 γ
pub fn relativistic_mass(rest_mass: f64, beta: f64) -> Result<f64> {
    let rest_mass = non_negative("rest mass", rest_mass)?;
    finite_result("relativistic mass", rest_mass * lorentz_factor(beta)?)
}

/// Rest, kinetic and total energy of a body, in joules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyBreakdown {
    pub rest: f64,
    pub kinetic: f64,
    pub total: f64,
}

/// E0 = m c², K = (γ - 1) m c², E = γ m c²
///
/// K is evaluated as m c² β² γ² / (γ + 1), which equals (γ - 1) m c² but
/// keeps full precision when γ is within rounding of 1.
pub fn energy_decomposition(rest_mass: f64, beta: f64) -> Result<EnergyBreakdown> {
    let rest_mass = non_negative("rest mass", rest_mass)?;
    let gamma = lorentz_factor(beta)?;
    let rest = finite_result("rest energy", rest_mass * C * C)?;
    let kinetic = finite_result(
        "kinetic energy",
        rest * (beta * gamma) * (beta * gamma) / (gamma + 1.0),
    )?;
    Ok(EnergyBreakdown {
        rest,
        kinetic,
        total: finite_result("total energy", rest + kinetic)?,
    })
}

/// Lorentz boost of an event (x in metres, t in seconds):
/// x' = γ(x - βct), t' = γ(t - βx/c)
pub fn lorentz_boost(x: f64, t: f64, beta: f64) -> Result<(f64, f64)> {
    let x = finite_input("event x", x)?;
    let t = finite_input("event t", t)?;
    let gamma = lorentz_factor(beta)?;
    let x_prime = gamma * (x - beta * C * t);
    let t_prime = gamma * (t - beta * x / C);
    Ok((
        finite_result("boosted x", x_prime)?,
        finite_result("boosted t", t_prime)?,
    ))
}

/// Direction of travel through spacetime, used by the "motion effects" view.
///
/// The time and space components form a unit vector: β² + 1/γ² = 1.
/// The angle is measured from the time axis, 0° at rest and approaching
/// 90° as β → 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpacetimeHeading {
    pub time_component: f64,
    pub space_component: f64,
    pub angle_degrees: f64,
}

pub fn spacetime_heading(beta: f64) -> Result<SpacetimeHeading> {
    let gamma = lorentz_factor(beta)?;
    let time_component = 1.0 / gamma;
    Ok(SpacetimeHeading {
        time_component,
        space_component: beta,
        angle_degrees: beta.atan2(time_component).to_degrees(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let tolerance = 1e-9 * expected.abs().max(1.0);
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    fn beta_grid() -> impl Iterator<Item = f64> {
        (0..1000).map(|i| i as f64 / 1000.0).chain([0.9999, 0.999_999])
    }

    #[test]
    fn gamma_is_one_at_rest() {
        assert_eq!(lorentz_factor(0.0), Ok(1.0));
    }

    #[test]
    fn gamma_is_at_least_one_and_increasing() {
        let mut previous = 0.0;
        for beta in beta_grid() {
            let gamma = lorentz_factor(beta).unwrap();
            assert!(gamma >= 1.0);
            assert!(gamma > previous, "γ not increasing at β = {beta}");
            previous = gamma;
        }
    }

    #[test]
    fn gamma_rejects_out_of_range_velocities() {
        for beta in [1.0, 1.5, -0.1, f64::NAN, f64::INFINITY] {
            let err = lorentz_factor(beta).unwrap_err();
            assert!(err.is_domain(), "β = {beta} should be a domain error");
        }
    }

    #[test]
    fn largest_representable_beta_stays_finite() {
        let beta = 1.0 - f64::EPSILON / 2.0;
        assert!(lorentz_factor(beta).unwrap().is_finite());
    }

    #[test]
    fn beta_point_six() {
        assert_close(lorentz_factor(0.6).unwrap(), 1.25);
        assert_close(time_dilation(1.0, 0.6).unwrap(), 1.25);
        assert_close(relativistic_mass(1.0, 0.6).unwrap(), 1.25);
        assert_close(length_contraction(1.0, 0.6).unwrap(), 0.8);
    }

    #[test]
    fn beta_point_eight_energies() {
        let energy = energy_decomposition(2.0, 0.8).unwrap();
        assert_close(lorentz_factor(0.8).unwrap(), 5.0 / 3.0);
        assert_close(energy.rest, 2.0 * C * C);
        assert_close(energy.kinetic, energy.rest * 2.0 / 3.0);
        assert_close(energy.total, energy.rest * 5.0 / 3.0);
    }

    #[test]
    fn energy_parts_sum_to_total() {
        for beta in beta_grid() {
            for mass in [0.0, 1e-3, 1.0, 2.0, 4.5e11] {
                let e = energy_decomposition(mass, beta).unwrap();
                assert_close(e.rest + e.kinetic, e.total);
            }
        }
    }

    #[test]
    fn dilation_and_contraction_bounds() {
        for beta in beta_grid() {
            let dilated = time_dilation(10.0, beta).unwrap();
            let contracted = length_contraction(100.0, beta).unwrap();
            if beta == 0.0 {
                assert_eq!(dilated, 10.0);
                assert_eq!(contracted, 100.0);
            } else {
                assert!(dilated > 10.0, "β = {beta}");
                assert!(contracted < 100.0, "β = {beta}");
            }
        }
    }

    #[test]
    fn newtonian_limit_near_rest() {
        let beta = 1e-4;
        assert!((time_dilation(3.0, beta).unwrap() - 3.0).abs() < 1e-7);
        let kinetic = energy_decomposition(1.0, beta).unwrap().kinetic;
        // ½ m v²
        let classical = 0.5 * (beta * C) * (beta * C);
        assert!((kinetic - classical).abs() / classical < 1e-3);
    }

    #[test]
    fn kinetic_energy_matches_half_mv_squared_at_walking_speed() {
        for beta in [1e-7, 1e-8] {
            let kinetic = energy_decomposition(2.0, beta).unwrap().kinetic;
            let classical = 0.5 * 2.0 * (beta * C) * (beta * C);
            assert!(
                (kinetic - classical).abs() / classical < 1e-6,
                "β = {beta}: kinetic {kinetic}, ½mv² {classical}"
            );
        }
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert!(time_dilation(-1.0, 0.5).unwrap_err().is_domain());
        assert!(length_contraction(-1.0, 0.5).unwrap_err().is_domain());
        assert!(relativistic_mass(-1.0, 0.5).unwrap_err().is_domain());
        assert!(energy_decomposition(-2.0, 0.5).unwrap_err().is_domain());
    }

    #[test]
    fn huge_mass_overflows_instead_of_producing_infinity() {
        let err = energy_decomposition(f64::MAX, 0.5).unwrap_err();
        assert_eq!(err, RelativityError::NumericOverflow { quantity: "rest energy" });
    }

    #[test]
    fn boost_is_identity_at_rest() {
        assert_eq!(lorentz_boost(12.5, -3.0, 0.0), Ok((12.5, -3.0)));
    }

    #[test]
    fn boost_of_comoving_origin_has_zero_position() {
        // An object at x = βct sits at the origin of the moving frame.
        let beta = 0.6;
        let t = 2.0;
        let (x_prime, t_prime) = lorentz_boost(beta * C * t, t, beta).unwrap();
        assert!(x_prime.abs() < 1e-6);
        assert_close(t_prime, t / 1.25);
    }

    #[test]
    fn boost_preserves_interval() {
        let (x, t) = (4.0e8, 3.0);
        let (xp, tp) = lorentz_boost(x, t, 0.8).unwrap();
        let before = (C * t).powi(2) - x * x;
        let after = (C * tp).powi(2) - xp * xp;
        assert!((before - after).abs() / before.abs() < 1e-9);
    }

    #[test]
    fn heading_is_unit_vector() {
        for beta in beta_grid() {
            let h = spacetime_heading(beta).unwrap();
            let norm = h.time_component.hypot(h.space_component);
            assert_close(norm, 1.0);
        }
        assert_eq!(spacetime_heading(0.0).unwrap().angle_degrees, 0.0);
        assert!(spacetime_heading(0.999_999).unwrap().angle_degrees > 89.0);
    }
}
