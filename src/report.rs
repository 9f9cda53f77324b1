//! Human-readable readouts for a [`RelativisticState`].

use crate::relativity::special::C;
use crate::relativity::units::kg_to_lbs;
use crate::relativity::{RelativisticState, Regime};

/// Everyday comparison for a speed in m/s.
pub fn speed_comparison(speed: f64) -> &'static str {
    const SCALE: [(f64, &str); 8] = [
        (1.0, "slower than a snail"),
        (5.0, "about walking speed"),
        (15.0, "about running speed"),
        (50.0, "faster than Usain Bolt"),
        (300.0, "faster than a cheetah"),
        (1_000.0, "faster than a bullet"),
        (8_000.0, "faster than the Space Station"),
        (30_000.0, "faster than any spacecraft"),
    ];
    SCALE
        .iter()
        .find(|(limit, _)| speed < *limit)
        .map_or("approaching light speed", |&(_, label)| label)
}

/// Everyday comparison for an energy in joules.
pub fn energy_comparison(joules: f64) -> String {
    if joules < 1e6 {
        format!("equivalent to {:.1} food Calories", joules / 4184.0)
    } else if joules < 1e9 {
        format!("equivalent to {:.1} kg of TNT", joules / 1e6)
    } else if joules < 1e12 {
        format!("equivalent to {:.1} tons of TNT", joules / 1e9)
    } else if joules < 1e15 {
        format!("equivalent to {:.1} kilotons of TNT", joules / 1e12)
    } else {
        format!("equivalent to {:.1} megatons of TNT", joules / 1e15)
    }
}

pub fn velocity_line(beta: f64) -> String {
    let speed = beta * C;
    format!(
        "Velocity: {:.1}% c ({:.1} m/s - {})",
        beta * 100.0,
        speed,
        speed_comparison(speed)
    )
}

pub fn regime_line(regime: Regime) -> &'static str {
    match regime {
        Regime::Classical => "Everyday speeds: relativistic effects are negligible",
        Regime::Relativistic => "Relativistic effects are significant",
        Regime::NearLightSpeed => "WARNING: near light speed, γ grows without bound",
    }
}

/// The full readout block shown by the TUI and the `state` command.
pub fn readout_lines(state: &RelativisticState) -> Vec<String> {
    let inputs = &state.inputs;
    let energy = &state.energy;
    let (x_prime, t_prime) = state.boosted_event;
    let (x, t) = inputs.event;

    vec![
        velocity_line(state.beta()),
        regime_line(state.regime).to_string(),
        String::new(),
        "Time dilation:".to_string(),
        format!(
            "• {:.3} s aboard the moving object take {:.3} s for the observer",
            inputs.proper_time, state.dilated_time
        ),
        format!(
            "• A signal sent every 1 s arrives every {:.2} s; the moving clock runs at {:.1}%",
            state.gamma,
            state.time_rate * 100.0
        ),
        String::new(),
        "Relativistic effects:".to_string(),
        format!("• Lorentz factor (γ): {:.4}", state.gamma),
        format!(
            "• Length contraction: {:.2} m appears as {:.2} m ({:.1}%)",
            inputs.proper_length,
            state.contracted_length,
            state.time_rate * 100.0
        ),
        format!(
            "• Motion through spacetime: {:.1}% time, {:.1}% space ({:.1}° from the time axis)",
            state.heading.time_component * 100.0,
            state.heading.space_component * 100.0,
            state.heading.angle_degrees
        ),
        format!(
            "• Event ({:.3} ls, {:.3} s) boosts to ({:.3} ls, {:.3} s)",
            x / C,
            t,
            x_prime / C,
            t_prime
        ),
        String::new(),
        "Energy (E = γmc²):".to_string(),
        format!(
            "• Rest mass: {:.3} kg ({:.1} lbs), relativistic mass {:.3} kg",
            inputs.rest_mass,
            kg_to_lbs(inputs.rest_mass),
            state.relativistic_mass
        ),
        format!("• Rest energy (E₀ = mc²): {:.1} GJ", energy.rest / 1e9),
        format!("• Total energy: {:.1} GJ", energy.total / 1e9),
        format!("• Kinetic energy: {:.1} GJ", energy.kinetic / 1e9),
        format!("  ({})", energy_comparison(energy.total)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relativity::StateInputs;

    #[test]
    fn speed_scale() {
        assert_eq!(speed_comparison(0.5), "slower than a snail");
        assert_eq!(speed_comparison(1.0), "about walking speed");
        assert_eq!(speed_comparison(40.0), "faster than Usain Bolt");
        assert_eq!(speed_comparison(7_700.0), "faster than the Space Station");
        assert_eq!(speed_comparison(0.5 * C), "approaching light speed");
    }

    #[test]
    fn energy_scale() {
        assert_eq!(energy_comparison(4184.0), "equivalent to 1.0 food Calories");
        assert_eq!(energy_comparison(2e6), "equivalent to 2.0 kg of TNT");
        assert_eq!(energy_comparison(3e9), "equivalent to 3.0 tons of TNT");
        assert_eq!(energy_comparison(4e12), "equivalent to 4.0 kilotons of TNT");
        assert_eq!(energy_comparison(9e16), "equivalent to 90.0 megatons of TNT");
    }

    #[test]
    fn readout_mentions_gamma_and_warning() {
        let state = RelativisticState::compute(StateInputs::default().at(0.995)).unwrap();
        let lines = readout_lines(&state);
        assert!(lines[1].starts_with("WARNING"));
        assert!(lines.iter().any(|l| l.contains("Lorentz factor (γ): 10.0")));
    }

    #[test]
    fn velocity_line_at_rest() {
        assert_eq!(velocity_line(0.0), "Velocity: 0.0% c (0.0 m/s - slower than a snail)");
    }
}
