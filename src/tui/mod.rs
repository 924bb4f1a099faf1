//! Ratatui-based terminal UI.
//!
//! Three panels share one layout: a diagram on top and a slider list below.
//! Every key press recomputes the panel's model, so the chart and the headline
//! always show the current equilibrium.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs},
};

use crate::config::Config;
use crate::dynamics::{DEFAULT_STABLE_LEN, classify, generate_sequence, stable_values};
use crate::economy::{
    G0_RANGE, GoodsMarket, I0_RANGE, INCOME_RANGE, MS_RANGE, MoneyMarket, NX0_RANGE, PRICE_RANGE,
    ParamRange, T1_RANGE,
};
use crate::error::AppError;

mod plotters_chart;

use plotters_chart::{CYAN, ChartLine, DiagramChart, GRAY, GREEN};

const R_RANGE: ParamRange = ParamRange::new(0.0, 4.0, 0.01);
const X0_RANGE: ParamRange = ParamRange::new(0.01, 0.99, 0.01);
const LEN_RANGE: ParamRange = ParamRange::new(10.0, 300.0, 10.0);

const CURVE_POINTS: usize = 200;
/// Attractor levels are drawn only for short cycles.
const MAX_DRAWN_PERIOD: usize = 8;

/// Start the TUI.
pub fn run(config: &Config) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Goods,
    Money,
    Logistic,
}

impl Panel {
    const ALL: [Panel; 3] = [Panel::Goods, Panel::Money, Panel::Logistic];

    fn title(self) -> &'static str {
        match self {
            Panel::Goods => "Goods market",
            Panel::Money => "Money market",
            Panel::Logistic => "Logistic map",
        }
    }

    fn index(self) -> usize {
        match self {
            Panel::Goods => 0,
            Panel::Money => 1,
            Panel::Logistic => 2,
        }
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Slider metadata; the value itself lives in the model struct.
#[derive(Debug, Clone, Copy)]
struct Slider {
    label: &'static str,
    range: ParamRange,
    decimals: usize,
}

const GOODS_SLIDERS: [Slider; 4] = [
    Slider { label: "G0  government spending", range: G0_RANGE, decimals: 0 },
    Slider { label: "t1  tax rate", range: T1_RANGE, decimals: 2 },
    Slider { label: "I0  investment", range: I0_RANGE, decimals: 0 },
    Slider { label: "NX0 net exports", range: NX0_RANGE, decimals: 0 },
];

const MONEY_SLIDERS: [Slider; 3] = [
    Slider { label: "Ms  money supply", range: MS_RANGE, decimals: 0 },
    Slider { label: "Y   income", range: INCOME_RANGE, decimals: 0 },
    Slider { label: "P   price level", range: PRICE_RANGE, decimals: 1 },
];

const LOGISTIC_SLIDERS: [Slider; 3] = [
    Slider { label: "r   growth rate", range: R_RANGE, decimals: 2 },
    Slider { label: "x0  initial value", range: X0_RANGE, decimals: 2 },
    Slider { label: "n   steps shown", range: LEN_RANGE, decimals: 0 },
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct LogisticState {
    r: f64,
    x0: f64,
    n: usize,
}

/// Owned series for one frame; borrowed by [`DiagramChart`] at draw time.
struct ChartData {
    lines: Vec<(Vec<(f64, f64)>, plotters::style::RGBColor)>,
    points: Vec<(f64, f64)>,
    highlight: Vec<(f64, f64)>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
    x_label: &'static str,
    y_label: &'static str,
}

struct App {
    panel: Panel,
    selected: usize,
    goods: GoodsMarket,
    money: MoneyMarket,
    logistic: LogisticState,
    goods_y_max: f64,
    money_m_max: f64,
    money_i_max: f64,
    status: String,
}

impl App {
    fn new(config: &Config) -> Self {
        Self {
            panel: Panel::Goods,
            selected: 0,
            goods: config.goods.market(),
            money: config.money.market(),
            logistic: LogisticState {
                r: R_RANGE.nudge(config.logistic.r, 0),
                x0: X0_RANGE.nudge(config.logistic.x0, 0),
                n: LEN_RANGE.nudge(config.logistic.n as f64, 0) as usize,
            },
            goods_y_max: config.goods.y_max,
            money_m_max: config.money.m_max,
            money_i_max: config.money.i_max,
            status: "Ready.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.switch_panel(self.panel.next()),
            KeyCode::BackTab => self.switch_panel(self.panel.prev()),
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selected + 1 < self.sliders().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            _ => {}
        }
        false
    }

    fn switch_panel(&mut self, panel: Panel) {
        self.panel = panel;
        self.selected = 0;
        self.status = panel.title().to_string();
    }

    fn sliders(&self) -> &'static [Slider] {
        match self.panel {
            Panel::Goods => &GOODS_SLIDERS,
            Panel::Money => &MONEY_SLIDERS,
            Panel::Logistic => &LOGISTIC_SLIDERS,
        }
    }

    fn value(&self, idx: usize) -> f64 {
        match (self.panel, idx) {
            (Panel::Goods, 0) => self.goods.g0,
            (Panel::Goods, 1) => self.goods.t1,
            (Panel::Goods, 2) => self.goods.i0,
            (Panel::Goods, _) => self.goods.nx0,
            (Panel::Money, 0) => self.money.ms,
            (Panel::Money, 1) => self.money.y,
            (Panel::Money, _) => self.money.p,
            (Panel::Logistic, 0) => self.logistic.r,
            (Panel::Logistic, 1) => self.logistic.x0,
            (Panel::Logistic, _) => self.logistic.n as f64,
        }
    }

    fn set_value(&mut self, idx: usize, v: f64) {
        match (self.panel, idx) {
            (Panel::Goods, 0) => self.goods.g0 = v,
            (Panel::Goods, 1) => self.goods.t1 = v,
            (Panel::Goods, 2) => self.goods.i0 = v,
            (Panel::Goods, _) => self.goods.nx0 = v,
            (Panel::Money, 0) => self.money.ms = v,
            (Panel::Money, 1) => self.money.y = v,
            (Panel::Money, _) => self.money.p = v,
            (Panel::Logistic, 0) => self.logistic.r = v,
            (Panel::Logistic, 1) => self.logistic.x0 = v,
            (Panel::Logistic, _) => self.logistic.n = v.round() as usize,
        }
    }

    fn adjust_field(&mut self, delta: i32) {
        let Some(slider) = self.sliders().get(self.selected).copied() else {
            return;
        };
        let next = slider.range.nudge(self.value(self.selected), delta);
        self.set_value(self.selected, next);
        self.status = format!(
            "{}: {:.*}",
            slider.label.split_whitespace().next().unwrap_or(slider.label),
            slider.decimals,
            next
        );
    }

    fn headline(&self) -> String {
        match self.panel {
            Panel::Goods => match self.goods.equilibrium() {
                Ok(eq) => format!(
                    "Y* = {:.1} | multiplier {:.3} | autonomous spending {:.0}",
                    eq.income, eq.multiplier, eq.autonomous
                ),
                Err(e) => e.to_string(),
            },
            Panel::Money => match self.money.equilibrium() {
                Ok(eq) => format!("i* = {:.2}% | M/P = {:.1}", eq.rate, eq.real_supply),
                Err(e) => e.to_string(),
            },
            Panel::Logistic => {
                let LogisticState { r, x0, .. } = self.logistic;
                match stable_values(r, x0, DEFAULT_STABLE_LEN) {
                    Ok(values) => {
                        let regime = classify(&values, 64);
                        if values.len() <= MAX_DRAWN_PERIOD {
                            let shown: Vec<String> =
                                values.iter().map(|v| format!("{v:.3}")).collect();
                            format!("{regime} | stable values [{}]", shown.join(", "))
                        } else {
                            format!("{regime} | {} distinct values", values.len())
                        }
                    }
                    Err(e) => e.to_string(),
                }
            }
        }
    }

    fn chart_data(&self) -> ChartData {
        match self.panel {
            Panel::Goods => goods_chart(&self.goods, self.goods_y_max),
            Panel::Money => money_chart(&self.money, self.money_m_max, self.money_i_max),
            Panel::Logistic => logistic_chart(self.logistic),
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_body(frame, chunks[1]);
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Panel::ALL.iter().map(|p| Line::from(p.title())).collect();
        let tabs = Tabs::new(titles)
            .select(self.panel.index())
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

        let block = Block::default().borders(Borders::ALL).title(Span::styled(
            "econ",
            Style::default().fg(Color::Cyan),
        ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);
        frame.render_widget(tabs, rows[0]);

        let headline = Paragraph::new(Text::from(Line::from(Span::styled(
            self.headline(),
            Style::default().fg(Color::Gray),
        ))));
        frame.render_widget(headline, rows[1]);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let settings_height = self.sliders().len() as u16 + 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(settings_height)])
            .split(area);

        self.draw_chart(frame, chunks[0]);
        self.draw_settings(frame, chunks[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default().title(self.panel.title()).borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let data = self.chart_data();
        let lines: Vec<ChartLine<'_>> = data
            .lines
            .iter()
            .map(|(points, color)| ChartLine { points, color: *color })
            .collect();

        let (chart_rect, insets) = chart_layout(inner);
        let widget = DiagramChart {
            lines: &lines,
            points: &data.points,
            highlight: &data.highlight,
            x_bounds: data.x_bounds,
            y_bounds: data.y_bounds,
            x_label: data.x_label,
            y_label: data.y_label,
            fmt_x: fmt_axis,
            fmt_y: fmt_axis,
        };

        frame.render_widget(widget, chart_rect);
        if let Some(insets) = insets {
            draw_axis_ticks(frame, inner, chart_rect, insets, &data);
        }
    }

    fn draw_settings(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = self
            .sliders()
            .iter()
            .enumerate()
            .map(|(i, s)| {
                ListItem::new(format!(
                    "{:<26} {:>8.*}   [{} .. {}]",
                    s.label,
                    s.decimals,
                    self.value(i),
                    s.range.min,
                    s.range.max
                ))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Parameters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "↑/↓ select  ←/→ adjust  Tab panel  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn goods_chart(market: &GoodsMarket, y_max: f64) -> ChartData {
    let bounds = [0.0, y_max];
    let diagonal = vec![(0.0, 0.0), (y_max, y_max)];
    let demand = clip(market.demand_curve(y_max, CURVE_POINTS), bounds, bounds);
    let highlight = market
        .equilibrium()
        .map(|eq| clip(vec![(eq.income, eq.income)], bounds, bounds))
        .unwrap_or_default();

    ChartData {
        lines: vec![(diagonal, GRAY), (demand, CYAN)],
        points: Vec::new(),
        highlight,
        x_bounds: bounds,
        y_bounds: bounds,
        x_label: "Y",
        y_label: "DA",
    }
}

fn money_chart(market: &MoneyMarket, m_max: f64, i_max: f64) -> ChartData {
    let x_bounds = [0.0, m_max];
    let y_bounds = [0.0, i_max];
    let demand = clip(market.demand_curve(i_max, CURVE_POINTS), x_bounds, y_bounds);

    let (supply, highlight) = match market.equilibrium() {
        Ok(eq) => (
            clip(vec![(eq.real_supply, 0.0), (eq.real_supply, i_max)], x_bounds, y_bounds),
            clip(vec![(eq.real_supply, eq.rate)], x_bounds, y_bounds),
        ),
        Err(_) => (Vec::new(), Vec::new()),
    };

    ChartData {
        lines: vec![(supply, GREEN), (demand, CYAN)],
        points: Vec::new(),
        highlight,
        x_bounds,
        y_bounds,
        x_label: "M/P",
        y_label: "i (%)",
    }
}

fn logistic_chart(state: LogisticState) -> ChartData {
    let sequence = generate_sequence(state.x0, state.r, state.n);
    let path: Vec<(f64, f64)> = sequence
        .iter()
        .enumerate()
        .map(|(i, &x)| (i as f64, x))
        .collect();
    let last = state.n.saturating_sub(1).max(1) as f64;

    let mut lines = vec![(path.clone(), CYAN)];
    if let Ok(values) = stable_values(state.r, state.x0, DEFAULT_STABLE_LEN) {
        if values.len() <= MAX_DRAWN_PERIOD {
            lines.extend(
                values
                    .iter()
                    .filter(|v| v.is_finite())
                    .map(|&v| (vec![(0.0, v), (last, v)], GRAY)),
            );
        }
    }

    ChartData {
        lines,
        points: path,
        highlight: Vec::new(),
        x_bounds: [0.0, last],
        y_bounds: [0.0, 1.0],
        x_label: "step",
        y_label: "x",
    }
}

/// Keep only points inside the frame.
fn clip(points: Vec<(f64, f64)>, x: [f64; 2], y: [f64; 2]) -> Vec<(f64, f64)> {
    points
        .into_iter()
        .filter(|&(px, py)| px >= x[0] && px <= x[1] && py >= y[0] && py <= y[1])
        .collect()
}

fn fmt_axis(v: f64) -> String {
    if v.abs() >= 10.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.2}")
    }
}

#[derive(Debug, Clone, Copy)]
struct AxisInsets {
    left: u16,
    right: u16,
    top: u16,
    bottom: u16,
}

fn chart_layout(inner: Rect) -> (Rect, Option<AxisInsets>) {
    let insets = AxisInsets {
        left: 8,
        right: 2,
        top: 1,
        bottom: 2,
    };

    if inner.width <= insets.left + insets.right + 10
        || inner.height <= insets.top + insets.bottom + 5
    {
        return (inner, None);
    }

    let rect = Rect {
        x: inner.x + insets.left,
        y: inner.y + insets.top,
        width: inner.width - insets.left - insets.right,
        height: inner.height - insets.top - insets.bottom,
    };

    (rect, Some(insets))
}

fn draw_axis_ticks(
    frame: &mut ratatui::Frame<'_>,
    inner: Rect,
    chart: Rect,
    insets: AxisInsets,
    data: &ChartData,
) {
    let ticks = 5usize;
    let style = Style::default().fg(Color::Gray);
    let [x_lo, x_hi] = data.x_bounds;
    let [y_lo, y_hi] = data.y_bounds;

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis(x_lo + u * (x_hi - x_lo));
        let x = chart.x + ((chart.width - 1) as f64 * u).round() as u16;
        let label_len = label.len() as u16;
        let start = x.saturating_sub((label.len() / 2) as u16);
        let y = chart.y + chart.height;
        if y >= inner.y + inner.height - 1 {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    for i in 0..ticks {
        let u = i as f64 / (ticks as f64 - 1.0);
        let label = fmt_axis(y_lo + u * (y_hi - y_lo));
        let y = chart.y + (chart.height - 1) - ((chart.height - 1) as f64 * u).round() as u16;
        let label_len = label.len() as u16;
        let x = inner.x + insets.left.saturating_sub(1);
        let start = x.saturating_sub(label.len() as u16);
        if start < inner.x {
            continue;
        }
        frame.render_widget(
            Paragraph::new(label).style(style),
            Rect {
                x: start,
                y,
                width: label_len,
                height: 1,
            },
        );
    }

    let x_label = Paragraph::new(data.x_label)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    let x_rect = Rect {
        x: chart.x,
        y: chart.y + chart.height + 1,
        width: chart.width,
        height: 1,
    };
    if x_rect.y < inner.y + inner.height {
        frame.render_widget(x_label, x_rect);
    }

    let y_label = Paragraph::new(data.y_label)
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD));
    let y_rect = Rect {
        x: inner.x,
        y: inner.y,
        width: insets.left.saturating_sub(1),
        height: 1,
    };
    frame.render_widget(y_label, y_rect);
}
