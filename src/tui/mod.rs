use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::canvas::{Canvas, Circle, Line as CanvasLine},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::Instant;
use tracing::{debug, warn};

use crate::clock::{ClockAnimator, ClockReading};
use crate::config::{AppConfig, MAX_MASS_LBS, Palette, SLIDER_MAX, SLIDER_SCALE, valid_mass_lbs};
use crate::metrics::{self, DataPoint, Sweep, DEFAULT_MAX_BETA};
use crate::relativity::units::lbs_to_kg;
use crate::relativity::{RelativisticState, RelativityError};
use crate::report;

/// Points on the background γ curve.
const CURVE_SAMPLES: usize = 200;

const HELP: &str =
    "←/→ velocity  [/] fine  ↑/↓ mass ×2/÷2  r reset clocks  q quit";

pub struct App {
    config: AppConfig,
    /// Slider position in thousandths of c.
    slider: u16,
    mass_lbs: f64,
    clock: ClockAnimator,
    /// (velocity %c, γ)
    gamma_curve: Vec<(f64, f64)>,
    gamma_max: f64,
    log: Vec<DataPoint>,
    quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let curve = metrics::collect(Sweep::new(config.inputs, DEFAULT_MAX_BETA, CURVE_SAMPLES))?;
        let gamma_curve: Vec<(f64, f64)> = curve
            .iter()
            .map(|d| (d.velocity_fraction * 100.0, d.gamma))
            .collect();
        let gamma_max = gamma_curve.iter().map(|&(_, g)| g).fold(1.0, f64::max);

        Ok(Self {
            clock: ClockAnimator::new(config.tick),
            mass_lbs: config.mass_lbs,
            config,
            slider: 0,
            gamma_curve,
            gamma_max,
            log: Vec::new(),
            quit: false,
        })
    }

    pub fn beta(&self) -> f64 {
        f64::from(self.slider) / SLIDER_SCALE
    }

    pub fn state(&self) -> Result<RelativisticState, RelativityError> {
        let mut inputs = self.config.inputs.at(self.beta());
        inputs.rest_mass = lbs_to_kg(self.mass_lbs);
        RelativisticState::compute(inputs)
    }

    fn set_slider(&mut self, position: u16) {
        let position = position.min(SLIDER_MAX);
        if position == self.slider {
            return;
        }
        self.slider = position;
        self.record();
    }

    fn set_mass(&mut self, mass_lbs: f64) {
        if !valid_mass_lbs(mass_lbs) || mass_lbs == self.mass_lbs {
            return;
        }
        self.mass_lbs = mass_lbs;
        self.record();
    }

    fn record(&mut self) {
        match self.state() {
            Ok(state) => {
                debug!(beta = state.beta(), gamma = state.gamma, mass_lbs = self.mass_lbs, "state updated");
                if state.regime.is_warning() {
                    debug!(beta = state.beta(), gamma = state.gamma, "near light speed");
                }
                self.log.push(DataPoint::from(&state));
            }
            Err(err) => warn!(%err, domain = err.is_domain(), "input rejected"),
        }
    }

    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Right => self.set_slider(self.slider.saturating_add(self.config.step)),
            KeyCode::Left => self.set_slider(self.slider.saturating_sub(self.config.step)),
            KeyCode::Char(']') => self.set_slider(self.slider.saturating_add(1)),
            KeyCode::Char('[') => self.set_slider(self.slider.saturating_sub(1)),
            KeyCode::Up => self.set_mass((self.mass_lbs * 2.0).min(MAX_MASS_LBS)),
            KeyCode::Down => self.set_mass(self.mass_lbs / 2.0),
            KeyCode::Char('r') => {
                debug!(proper_elapsed = self.clock.proper_elapsed(), "clocks reset");
                self.clock.reset();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    pub fn on_tick(&mut self) {
        self.clock.tick();
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Write the session log next to the other exports.
    pub fn export_session(&self) -> anyhow::Result<()> {
        if self.log.is_empty() {
            return Ok(());
        }
        let csv_path = self.config.output_dir.join("realtime.csv");
        let png_path = self.config.output_dir.join("realtime.png");
        metrics::export_csv(&self.log, &csv_path)?;
        metrics::plot_results(&self.log, self.config.palette, &png_path)?;
        println!("✅ Session exported to {} and {}", csv_path.display(), png_path.display());
        Ok(())
    }
}

pub fn start(config: AppConfig) -> anyhow::Result<()> {
    let mut app = App::new(config)?;

    // Setup terminal
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    crossterm::terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    crossterm::terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    app.export_session()
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    let tick = app.config.tick;
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        terminal.draw(|f| draw(f, app))?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        if last_tick.elapsed() >= tick {
            app.on_tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.config.palette;
    let base = Style::default()
        .fg(Color::from(palette.foreground))
        .bg(Color::from(palette.background));
    f.render_widget(Block::default().style(base), f.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(1)])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(14), Constraint::Min(8)])
        .split(columns[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Velocity"))
        .gauge_style(Style::default().fg(Color::from(palette.highlight)))
        .ratio(f64::from(app.slider) / f64::from(SLIDER_MAX))
        .label(report::velocity_line(app.beta()));
    f.render_widget(gauge, rows[0]);

    f.render_widget(
        Paragraph::new(HELP).style(Style::default().fg(Color::from(palette.grid))),
        rows[2],
    );

    let state = match app.state() {
        Ok(state) => state,
        Err(err) => {
            let message = Paragraph::new(format!("Cannot evaluate this input: {err}"))
                .style(Style::default().fg(Color::from(palette.marker)))
                .block(Block::default().borders(Borders::ALL).title("Readouts"));
            f.render_widget(message, rows[1]);
            return;
        }
    };

    draw_readouts(f, columns[0], &state, palette);
    draw_clocks(f, right[0], app, palette);
    draw_gamma_chart(f, right[1], app, &state, palette);
}

fn draw_readouts(f: &mut Frame, area: Rect, state: &RelativisticState, palette: &Palette) {
    let lines: Vec<Line> = report::readout_lines(state).into_iter().map(Line::from).collect();

    let mut block = Block::default().borders(Borders::ALL).title("Readouts");
    if state.regime.is_warning() {
        block = block
            .title("Near light speed")
            .border_style(Style::default().fg(Color::from(palette.marker)).add_modifier(Modifier::BOLD));
    }

    f.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), area);
}

fn draw_clocks(f: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    match app.clock.readings(app.beta()) {
        Ok(pair) => {
            draw_clock(f, halves[0], "Moving clock", pair.proper, palette);
            draw_clock(f, halves[1], "Observer clock (dilated)", pair.dilated, palette);
        }
        Err(err) => {
            let message = Paragraph::new(err.to_string())
                .style(Style::default().fg(Color::from(palette.marker)))
                .block(Block::default().borders(Borders::ALL).title("Clocks"));
            f.render_widget(message, area);
        }
    }
}

fn draw_clock(f: &mut Frame, area: Rect, title: &str, reading: ClockReading, palette: &Palette) {
    let face = Color::from(palette.foreground);
    let hand = Color::from(palette.marker);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{title}: {:.2} s", reading.seconds)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([-1.2, 1.2])
        .y_bounds([-1.2, 1.2])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius: 1.0,
                color: face,
            });
            for hour in 0..12 {
                let angle = f64::from(hour * 30).to_radians();
                let (sin, cos) = angle.sin_cos();
                ctx.draw(&CanvasLine {
                    x1: 0.85 * sin,
                    y1: 0.85 * cos,
                    x2: sin,
                    y2: cos,
                    color: face,
                });
            }
            let (x, y) = reading.hand_tip(0.8);
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: 0.0,
                x2: x,
                y2: y,
                color: hand,
            });
        });

    f.render_widget(canvas, area);
}

fn draw_gamma_chart(f: &mut Frame, area: Rect, app: &App, state: &RelativisticState, palette: &Palette) {
    let current = [(state.beta() * 100.0, state.gamma)];
    let y_max = app.gamma_max.max(state.gamma).ceil();

    let datasets = vec![
        Dataset::default()
            .name("γ")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::from(palette.gamma)))
            .data(&app.gamma_curve),
        Dataset::default()
            .name("now")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::from(palette.marker)))
            .data(&current),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().borders(Borders::ALL).title("Lorentz factor vs velocity"))
        .x_axis(
            Axis::default()
                .title("Velocity (%c)")
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        )
        .y_axis(
            Axis::default()
                .title("γ")
                .bounds([1.0, y_max])
                .labels(vec![Span::raw("1"), Span::raw(format!("{y_max:.0}"))]),
        );

    f.render_widget(chart, area);
}
