use crate::encoder::Encoder;
use crate::geometry::LABEL_ROWS;
use crate::keys::KeyToggle;
use crate::osc::MessageSender;
use crate::widget::{fit_ratio, ControlWidget, EventMeta};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

const LOG_LIMIT: usize = 64;
const KEY_PANE_HEIGHT: u16 = 3;

/// Where each control was last drawn, for routing pointer events.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaneLayout {
    pub status: Rect,
    pub encoders: Vec<Rect>,
    pub keys: Vec<Rect>,
}

/// Splits the terminal into a status panel on top and one column per control
/// below it, each column holding an encoder above its key.
pub fn pane_layout(size: Rect, columns: usize, keys: usize, ratio: (u16, u16)) -> PaneLayout {
    let inner = Block::default().borders(Borders::ALL).inner(size);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(inner);

    let count = columns.max(keys).max(1);
    let column_constraints = vec![Constraint::Ratio(1, count as u32); count];
    let column_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(column_constraints)
        .split(vertical[1]);

    let mut layout = PaneLayout {
        status: vertical[0],
        ..PaneLayout::default()
    };
    for (idx, column) in column_chunks.iter().enumerate() {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(KEY_PANE_HEIGHT)])
            .split(*column);
        if idx < columns {
            layout.encoders.push(encoder_area(parts[0], ratio));
        }
        if idx < keys {
            layout.keys.push(parts[1]);
        }
    }
    layout
}

/// Fits the circle part of a pane to the encoder's ratio and keeps the label
/// rows below it.
fn encoder_area(pane: Rect, ratio: (u16, u16)) -> Rect {
    let label_rows = LABEL_ROWS.min(pane.height);
    let body = Rect {
        height: pane.height - label_rows,
        ..pane
    };
    let fitted = fit_ratio(body, ratio);
    Rect {
        height: fitted.height + label_rows,
        ..fitted
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.left() && column < area.right() && row >= area.top() && row < area.bottom()
}

/// The terminal control surface: encoders, toggle keys and a status panel.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    encoders: Vec<Arc<Encoder>>,
    keys: Vec<KeyToggle>,
    sender: Arc<dyn MessageSender>,
    endpoint: String,
    layout: PaneLayout,
    activity: VecDeque<String>,
    finished: bool,
}

impl Dashboard {
    pub fn new(
        encoders: Vec<Arc<Encoder>>,
        keys: Vec<KeyToggle>,
        sender: Arc<dyn MessageSender>,
        endpoint: String,
    ) -> io::Result<Self> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            encoders,
            keys,
            sender,
            endpoint,
            layout: PaneLayout::default(),
            activity: VecDeque::with_capacity(LOG_LIMIT),
            finished: false,
        })
    }

    /// Redraws every `redraw` and after each event until `quit_key` or Esc
    /// is pressed.
    pub fn run(&mut self, quit_key: char, redraw: Duration) -> io::Result<()> {
        self.log(format!(
            "press {quit_key} to quit, wheel over an encoder to turn it"
        ));
        loop {
            self.render(quit_key)?;
            if !event::poll(redraw)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if Self::is_quit(&key, quit_key) {
                        info!("quit requested");
                        break;
                    }
                    self.handle_key(&key);
                }
                Event::Mouse(mouse) => self.handle_mouse(&mouse),
                _ => {}
            }
        }
        self.finish()
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.restore_terminal()
    }

    fn is_quit(key: &KeyEvent, quit_key: char) -> bool {
        match key.code {
            KeyCode::Esc => true,
            KeyCode::Char(c) => c.eq_ignore_ascii_case(&quit_key),
            _ => false,
        }
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if let KeyCode::Char(c) = key.code {
            if let Some(idx) = self.keys.iter().position(|k| k.matches(c)) {
                self.toggle_key(idx);
                return;
            }
        }
        let meta = EventMeta { focused: false };
        for encoder in &self.encoders {
            if !encoder.options().want_keyboard {
                continue;
            }
            if let Err(err) = encoder.handle_keyboard(key, &meta) {
                warn!("keyboard event rejected: {err}");
            }
        }
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let (column, row) = (mouse.column, mouse.row);
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            if let Some(idx) = self.layout.keys.iter().position(|a| contains(*a, column, row)) {
                self.toggle_key(idx);
            }
            return;
        }

        let hit = self
            .layout
            .encoders
            .iter()
            .position(|a| contains(*a, column, row));
        let Some(idx) = hit else {
            return;
        };
        let Some(encoder) = self.encoders.get(idx).cloned() else {
            return;
        };
        if !encoder.options().want_mouse {
            return;
        }
        let meta = EventMeta { focused: true };
        match encoder.handle_mouse(mouse, &meta) {
            Ok(()) => {
                let state = encoder.state();
                let route = encoder.encoder_options().target.route;
                self.log(format!("{route} -> {}", state.progress_text()));
            }
            Err(err) => warn!("mouse event rejected: {err}"),
        }
    }

    fn toggle_key(&mut self, idx: usize) {
        let Some(key) = self.keys.get_mut(idx) else {
            return;
        };
        let state = key.toggle(self.sender.as_ref());
        let entry = format!("{} -> {state}", key.target.route);
        self.log(entry);
    }

    fn log(&mut self, entry: String) {
        push_log(&mut self.activity, entry);
    }

    fn render(&mut self, quit_key: char) -> io::Result<()> {
        let size = self.terminal.size()?;
        let ratio = self
            .encoders
            .first()
            .map(|e| e.options().ratio)
            .unwrap_or((1, 1));
        self.layout = pane_layout(size, self.encoders.len(), self.keys.len(), ratio);

        let layout = &self.layout;
        let encoders = &self.encoders;
        let keys = &self.keys;
        let status = Self::status_block(&self.endpoint, keys, &self.activity);
        let title = format!("PRESS {} TO QUIT", quit_key.to_ascii_uppercase());

        self.terminal.draw(|frame| {
            frame.render_widget(
                Block::default().title(title).borders(Borders::ALL),
                frame.size(),
            );
            frame.render_widget(status, layout.status);
            for (encoder, area) in encoders.iter().zip(&layout.encoders) {
                frame.render_widget(encoder.as_ref(), *area);
            }
            for (key, area) in keys.iter().zip(&layout.keys) {
                Self::render_key(frame, key, *area);
            }
        })?;
        Ok(())
    }

    fn status_block<'a>(
        endpoint: &str,
        keys: &[KeyToggle],
        activity: &'a VecDeque<String>,
    ) -> Paragraph<'a> {
        let mut lines = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("target: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(endpoint.to_string()),
        ]));
        let states: Vec<String> = keys
            .iter()
            .map(|k| format!("{}={}", k.label, k.state()))
            .collect();
        lines.push(Line::from(format!("keys: {}", states.join(" "))));
        lines.extend(activity.iter().rev().map(|entry| Line::from(entry.as_str())));
        Paragraph::new(lines)
            .block(Block::default().title("Status").borders(Borders::ALL))
            .style(Style::default().fg(Color::Gray))
    }

    fn render_key(frame: &mut Frame, key: &KeyToggle, area: Rect) {
        let style = if key.state() == 1 {
            Style::default().fg(Color::Black).bg(Color::Green)
        } else {
            Style::default().fg(Color::Green)
        };
        let text = Paragraph::new(Line::from(format!("{} [{}]", key.label, key.state())))
            .alignment(Alignment::Center)
            .style(style)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(text, area);
    }

    fn restore_terminal(&mut self) -> io::Result<()> {
        if self.finished {
            return Ok(());
        }
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        self.terminal.show_cursor()?;
        self.finished = true;
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}

fn push_log(logs: &mut VecDeque<String>, entry: String) {
    if logs.len() == LOG_LIMIT {
        logs.pop_front();
    }
    logs.push_back(entry);
}
