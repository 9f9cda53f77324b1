//! Application configuration.
//!
//! [`AppConfig`] is built once at startup from the command line and handed
//! by reference to the TUI, the exporter and the report. The colour palette
//! is resolved from the [`Theme`] here, so renderers never look styles up
//! by name.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;

use crate::relativity::StateInputs;
use crate::relativity::special::C;
use crate::relativity::units::lbs_to_kg;

/// Largest rest mass accepted from the user, in pounds.
pub const MAX_MASS_LBS: f64 = 1e12;

/// Highest slider position; β = position / [`SLIDER_SCALE`].
pub const SLIDER_MAX: u16 = 999;
pub const SLIDER_SCALE: f64 = 1000.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("rest mass must be greater than 0 and at most 1e12 lbs, got {0}")]
    Mass(f64),

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("event coordinates must be finite")]
    Event,

    #[error("tick interval must be between 1 and 1000 ms, got {0}")]
    Tick(u64),

    #[error("velocity step must be between 1 and 999 permille, got {0}")]
    Step(u16),
}

/// Colour scheme selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// An sRGB colour, convertible into both ratatui and plotters colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for ratatui::style::Color {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        ratatui::style::Color::Rgb(r, g, b)
    }
}

impl From<Rgb> for plotters::style::RGBColor {
    fn from(Rgb(r, g, b): Rgb) -> Self {
        plotters::style::RGBColor(r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub plot_background: Rgb,
    pub grid: Rgb,
    pub highlight: Rgb,
    /// γ curve
    pub gamma: Rgb,
    /// clock rate curve
    pub time: Rgb,
    /// energy curve
    pub energy: Rgb,
    /// markers, clock hands and the near-light warning
    pub marker: Rgb,
}

const LIGHT: Palette = Palette {
    background: Rgb(255, 255, 255),
    foreground: Rgb(0, 0, 0),
    plot_background: Rgb(255, 255, 255),
    grid: Rgb(0xcc, 0xcc, 0xcc),
    highlight: Rgb(0x00, 0x7b, 0xff),
    gamma: Rgb(0, 160, 0),
    time: Rgb(0, 0, 255),
    energy: Rgb(0, 0, 255),
    marker: Rgb(255, 0, 0),
};

const DARK: Palette = Palette {
    background: Rgb(0x2b, 0x2b, 0x2b),
    foreground: Rgb(0xff, 0xff, 0xff),
    plot_background: Rgb(0x1e, 0x1e, 0x1e),
    grid: Rgb(0x40, 0x40, 0x40),
    highlight: Rgb(0x0d, 0x6e, 0xfd),
    gamma: Rgb(80, 220, 80),
    time: Rgb(100, 160, 255),
    energy: Rgb(100, 160, 255),
    marker: Rgb(255, 90, 90),
};

impl Theme {
    pub fn palette(self) -> &'static Palette {
        match self {
            Theme::Light => &LIGHT,
            Theme::Dark => &DARK,
        }
    }
}

/// Raw user-supplied settings, before validation.
#[derive(Debug, Clone, clap::Args)]
pub struct Settings {
    /// Colour theme for the TUI and exported plots
    #[arg(long, value_enum, default_value_t = Theme::Light, global = true)]
    pub theme: Theme,

    /// Rest mass of the moving object in pounds
    #[arg(long, default_value_t = 1.0, global = true)]
    pub mass_lbs: f64,

    /// Proper time in seconds, as measured aboard the moving object
    #[arg(long, default_value_t = 1.0, global = true)]
    pub proper_time: f64,

    /// Proper length in metres, as measured aboard the moving object
    #[arg(long, default_value_t = 100.0, global = true)]
    pub proper_length: f64,

    /// Position of the boosted event in metres (default: one light-second)
    #[arg(long, default_value_t = C, global = true, allow_negative_numbers = true)]
    pub event_x: f64,

    /// Time of the boosted event in seconds
    #[arg(long, default_value_t = 2.0, global = true, allow_negative_numbers = true)]
    pub event_t: f64,

    /// Clock animation tick in milliseconds
    #[arg(long, default_value_t = 50, global = true)]
    pub tick_ms: u64,

    /// Slider step for Left/Right, in thousandths of c
    #[arg(long, default_value_t = 10, global = true)]
    pub step: u16,

    /// Directory for CSV and PNG exports
    #[arg(long, default_value = ".", global = true)]
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            mass_lbs: 1.0,
            proper_time: 1.0,
            proper_length: 100.0,
            event_x: C,
            event_t: 2.0,
            tick_ms: 50,
            step: 10,
            output_dir: PathBuf::from("."),
        }
    }
}

/// Validated, immutable configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub theme: Theme,
    pub palette: &'static Palette,
    pub mass_lbs: f64,
    /// Template for every evaluation; callers only swap in β.
    pub inputs: StateInputs,
    pub tick: Duration,
    pub step: u16,
    pub output_dir: PathBuf,
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

/// `true` if the value is an acceptable rest mass in pounds.
pub fn valid_mass_lbs(mass_lbs: f64) -> bool {
    mass_lbs > 0.0 && mass_lbs <= MAX_MASS_LBS
}

impl TryFrom<Settings> for AppConfig {
    type Error = ConfigError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        if !valid_mass_lbs(settings.mass_lbs) {
            return Err(ConfigError::Mass(settings.mass_lbs));
        }
        non_negative("proper time", settings.proper_time)?;
        non_negative("proper length", settings.proper_length)?;
        if !(settings.event_x.is_finite() && settings.event_t.is_finite()) {
            return Err(ConfigError::Event);
        }
        if !(1..=1000).contains(&settings.tick_ms) {
            return Err(ConfigError::Tick(settings.tick_ms));
        }
        if !(1..=SLIDER_MAX).contains(&settings.step) {
            return Err(ConfigError::Step(settings.step));
        }

        Ok(Self::build(settings))
    }
}

impl AppConfig {
    fn build(settings: Settings) -> Self {
        Self {
            theme: settings.theme,
            palette: settings.theme.palette(),
            mass_lbs: settings.mass_lbs,
            inputs: StateInputs {
                beta: 0.0,
                rest_mass: lbs_to_kg(settings.mass_lbs),
                proper_time: settings.proper_time,
                proper_length: settings.proper_length,
                event: (settings.event_x, settings.event_t),
            },
            tick: Duration::from_millis(settings.tick_ms),
            step: settings.step,
            output_dir: settings.output_dir,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::build(Settings::default())
    }
}
