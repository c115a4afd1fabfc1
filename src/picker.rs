//! Terminal chooser for picking one notice out of several matches

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

use crate::notice::NoticeError;
use crate::presenter::Chooser;

/// What a key press asks the picker to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    Select(usize),
    Cancel,
}

/// Selection state of the chooser list
#[derive(Debug)]
pub struct Picker {
    prompt: String,
    choices: Vec<String>,
    state: ListState,
}

impl Picker {
    pub fn new(prompt: &str, choices: &[String]) -> Self {
        let mut state = ListState::default();
        if !choices.is_empty() {
            state.select(Some(0));
        }

        Self {
            prompt: prompt.to_string(),
            choices: choices.to_vec(),
            state,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn next(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1) % self.choices.len(),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.choices.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.choices.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PickerAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(PickerAction::Cancel)
            }
            KeyCode::Esc | KeyCode::Char('q') => Some(PickerAction::Cancel),
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                None
            }
            KeyCode::Enter => self.selected().map(PickerAction::Select),
            _ => None,
        }
    }

    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.size());

        let items: Vec<ListItem> = self
            .choices
            .iter()
            .map(|choice| ListItem::new(choice.as_str()))
            .collect();

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(self.prompt.as_str()))
            .highlight_style(
                Style::default()
                    .bg(Color::LightBlue)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        f.render_stateful_widget(list, chunks[0], &mut self.state);

        let help = Paragraph::new("↑/↓ move  Enter select  q cancel")
            .style(Style::default().fg(Color::Gray));
        f.render_widget(help, chunks[1]);
    }
}

/// Full-screen chooser on the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose(&mut self, prompt: &str, choices: &[String]) -> Result<Option<usize>, NoticeError> {
        if choices.is_empty() {
            return Ok(None);
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut picker = Picker::new(prompt, choices);
        let result = run_picker(&mut terminal, &mut picker);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }
}

fn run_picker<B: Backend>(
    terminal: &mut Terminal<B>,
    picker: &mut Picker,
) -> Result<Option<usize>, NoticeError> {
    loop {
        terminal.draw(|f| picker.render(f))?;

        if let Event::Key(key) = event::read()? {
            match picker.handle_key(key) {
                Some(PickerAction::Select(index)) => return Ok(Some(index)),
                Some(PickerAction::Cancel) => return Ok(None),
                None => {}
            }
        }
    }
}
