use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::models::SaveOutcome;
use crate::service::VerseLookupService;
use crate::store::{CorpusSource, FileCorpus, FsMarkerDir, MarkerDirectory};

use super::helpers::{key_hints, step_index};

/// Height of the reference input box, borders included.
const INPUT_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Width of the "Stored Markers" panel.
const MARKER_PANEL_WIDTH: u16 = 30;
/// Lines moved per PageUp/PageDown in the passage view.
const SCROLL_STEP: u16 = 5;
const INPUT_TITLE: &str = "Reference (e.g., JOH 3:16 or JOH 3:16-18)";

/// Which pane receives ordinary key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Input,
    Markers,
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Display state of the TUI. Lookups and marker writes are delegated to the
/// service; the app only keeps what is on screen.
pub struct App<C = FileCorpus, M = FsMarkerDir> {
    service: VerseLookupService<C, M>,
    input: String,
    passage: String,
    scroll: u16,
    markers: Vec<String>,
    selected: usize,
    focus: Focus,
    status: Option<StatusMessage>,
}

impl<C: CorpusSource, M: MarkerDirectory> App<C, M> {
    pub fn new(service: VerseLookupService<C, M>) -> Self {
        let mut app = Self {
            service,
            input: String::new(),
            passage: String::new(),
            scroll: 0,
            markers: Vec::new(),
            selected: 0,
            focus: Focus::Input,
            status: None,
        };
        app.refresh_markers();
        app
    }

    /// Process one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(SCROLL_STEP),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(SCROLL_STEP),
            KeyCode::Tab => self.toggle_focus(),
            _ => match self.focus {
                Focus::Input => self.handle_input_key(code),
                Focus::Markers => return self.handle_marker_key(code),
            },
        }
        false
    }

    fn handle_input_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => {
                let reference = self.input.trim().to_string();
                self.load(&reference);
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(ch) if !ch.is_control() => self.input.push(ch),
            _ => {}
        }
    }

    fn handle_marker_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.open_selected_marker(),
            _ => {}
        }
        false
    }

    /// Save a marker for the current input.
    pub(crate) fn handle_ctrl_s(&mut self) {
        if self.input.trim().is_empty() {
            return;
        }
        let outcome = self.service.save_marker(&self.input);
        let kind = match outcome {
            SaveOutcome::Created => {
                self.refresh_markers();
                StatusKind::Info
            }
            SaveOutcome::AlreadyExists => StatusKind::Info,
            SaveOutcome::IoFailure(_) => StatusKind::Error,
        };
        self.set_status(outcome.message(), kind);
    }

    /// Re-read the marker directory.
    pub(crate) fn handle_ctrl_r(&mut self) {
        self.refresh_markers();
        self.set_status(
            format!("{} stored marker(s).", self.markers.len()),
            StatusKind::Info,
        );
    }

    fn load(&mut self, reference: &str) {
        if reference.is_empty() {
            return;
        }
        self.passage = self.service.lookup(reference);
        self.scroll = 0;
        self.clear_status();
    }

    fn refresh_markers(&mut self) {
        self.markers = self.service.list_markers();
        if self.selected >= self.markers.len() {
            self.selected = self.markers.len().saturating_sub(1);
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input if !self.markers.is_empty() => Focus::Markers,
            _ => Focus::Input,
        };
    }

    fn move_selection(&mut self, offset: isize) {
        if self.markers.is_empty() {
            return;
        }
        let next = step_index(self.selected, offset, self.markers.len());
        if next != self.selected {
            self.selected = next;
            self.open_selected_marker();
        }
    }

    /// Copy the selected marker into the input and show its passage.
    fn open_selected_marker(&mut self) {
        if let Some(reference) = self.markers.get(self.selected).cloned() {
            self.input = reference.clone();
            self.load(&reference);
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(INPUT_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(MARKER_PANEL_WIDTH)])
            .split(rows[1]);

        self.draw_input(frame, rows[0]);
        self.draw_passage(frame, body[0]);
        self.draw_markers(frame, body[1]);
        self.draw_footer(frame, rows[2]);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(INPUT_TITLE)
            .border_style(self.border_style(Focus::Input));
        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(self.input.as_str()).block(block), area);

        if self.focus == Focus::Input && inner.width > 0 && inner.height > 0 {
            let offset = (self.input.chars().count() as u16).min(inner.width - 1);
            frame.set_cursor_position((inner.x + offset, inner.y));
        }
    }

    fn draw_passage(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Passage");
        let paragraph = Paragraph::new(self.passage.as_str())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_markers(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Stored Markers")
            .border_style(self.border_style(Focus::Markers));

        if self.markers.is_empty() {
            let message = Paragraph::new("No markers yet. Press Ctrl+S to save one.")
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(message, area);
            return;
        }

        let items: Vec<ListItem> = self
            .markers
            .iter()
            .map(|marker| ListItem::new(marker.as_str()))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        match self.focus {
            Focus::Input => key_hints(&[
                ("Enter", "Load Text"),
                ("Ctrl+S", "Save Marker"),
                ("Ctrl+R", "Refresh List"),
                ("Tab", "Markers"),
                ("PgUp/PgDn", "Scroll"),
                ("Esc", "Quit"),
            ]),
            Focus::Markers => key_hints(&[
                ("↑↓", "Select"),
                ("Enter", "Load"),
                ("Ctrl+R", "Refresh List"),
                ("Tab", "Reference"),
                ("q", "Quit"),
            ]),
        }
    }

    fn border_style(&self, pane: Focus) -> Style {
        if self.focus == pane {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::tests::{FakeCorpus, FakeMarkers};

    const CORPUS: &[&str] = &[
        "JOH 3:16 For God so loved the world",
        "PSA 23:1 The LORD is my shepherd",
        "PSA 23:2 He maketh me to lie down",
    ];

    fn app() -> App<FakeCorpus, FakeMarkers> {
        App::new(VerseLookupService::new(
            FakeCorpus::new(CORPUS),
            FakeMarkers::default(),
        ))
    }

    fn type_text(app: &mut App<FakeCorpus, FakeMarkers>, text: &str) {
        for ch in text.chars() {
            app.handle_key(KeyCode::Char(ch));
        }
    }

    #[test]
    fn enter_loads_the_typed_reference() {
        let mut app = app();
        type_text(&mut app, "PSA 23:1-2");
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(
            app.passage,
            "PSA 23:1 The LORD is my shepherd\n\nPSA 23:2 He maketh me to lie down"
        );
    }

    #[test]
    fn blank_input_leaves_the_passage_alone() {
        let mut app = app();
        app.passage = "previous".to_string();
        type_text(&mut app, "   ");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.passage, "previous");
    }

    #[test]
    fn saving_reports_created_then_existing() {
        let mut app = app();
        type_text(&mut app, "JOH 3:16");

        app.handle_ctrl_s();
        assert_eq!(app.status.as_ref().unwrap().text, "Marker saved!");
        assert_eq!(app.markers, vec!["JOH 3:16"]);

        app.handle_ctrl_s();
        assert_eq!(app.status.as_ref().unwrap().text, "Marker already exists.");
        assert_eq!(app.markers.len(), 1);
    }

    #[test]
    fn selecting_a_marker_fills_input_and_loads() {
        let mut app = app();
        type_text(&mut app, "JOH 3:16");
        app.handle_ctrl_s();
        app.input.clear();
        type_text(&mut app, "PSA 23:1-2");
        app.handle_ctrl_s();

        app.handle_key(KeyCode::Tab);
        assert_eq!(app.focus, Focus::Markers);

        // Markers come back sorted from the fake: "JOH 3:16", "PSA 23:1-2".
        app.handle_key(KeyCode::Down);
        assert_eq!(app.input, "PSA 23:1-2");
        assert!(app.passage.starts_with("PSA 23:1 The LORD"));

        app.handle_key(KeyCode::Up);
        assert_eq!(app.input, "JOH 3:16");
        assert_eq!(app.passage, "JOH 3:16 For God so loved the world");
    }

    #[test]
    fn tab_stays_on_input_without_markers() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn quit_keys_depend_on_focus() {
        let mut app = app();
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert_eq!(app.input, "q");
        assert!(app.handle_key(KeyCode::Esc));
    }

    #[test]
    fn loading_resets_scroll() {
        let mut app = app();
        app.handle_key(KeyCode::PageDown);
        assert_eq!(app.scroll, SCROLL_STEP);
        type_text(&mut app, "JOH 3:16");
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.scroll, 0);
    }
}
