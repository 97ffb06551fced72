//! # FaqPanel Component
//!
//! "자주 묻는 질문" accordion over the canned quick actions.
//!
//! Collapsed rows show the title and the question. At most one row is
//! expanded at a time; the expanded row also shows the canned answer.
//! `FaqState` persists in `TuiState`; `FaqPanel` is built each frame.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};

use crate::core::quick_actions::QuickAction;
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

const TITLE: &str = " 자주 묻는 질문 ";
/// Borders plus one cell of padding on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
const VERTICAL_OVERHEAD: u16 = 2;
/// Indent of the answer under an expanded row.
const ANSWER_INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq)]
pub enum FaqEvent {
    /// Run the quick action at this index
    Ask(usize),
}

/// Selection and expansion state of the accordion.
#[derive(Debug, Default)]
pub struct FaqState {
    pub selected: usize,
    pub expanded: Option<usize>,
    /// Number of rows, set by the parent from the quick action table
    pub len: usize,
}

impl FaqState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            expanded: None,
            len,
        }
    }

    /// Expand `index`, or collapse it if it is already the expanded row.
    pub fn toggle(&mut self, index: usize) {
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }
}

impl EventHandler for FaqState {
    type Event = FaqEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.len == 0 {
            return None;
        }
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                self.selected = (self.selected + 1).min(self.len - 1);
                None
            }
            TuiEvent::InputChar(' ') => {
                self.toggle(self.selected);
                None
            }
            TuiEvent::Submit => Some(FaqEvent::Ask(self.selected)),
            _ => None,
        }
    }
}

/// Stateless view of the accordion.
pub struct FaqPanel<'a> {
    pub state: &'a FaqState,
    pub actions: &'a [QuickAction],
    pub focused: bool,
    /// Dimmed while an answer is pending
    pub disabled: bool,
}

impl<'a> FaqPanel<'a> {
    pub fn new(state: &'a FaqState, actions: &'a [QuickAction]) -> Self {
        Self {
            state,
            actions,
            focused: false,
            disabled: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Height of the panel at `width`, including borders.
    pub fn calculate_height(state: &FaqState, actions: &[QuickAction], width: u16) -> u16 {
        let rows = actions.len() as u16;
        let answer_lines = state
            .expanded
            .and_then(|i| actions.get(i))
            .map(|action| answer_lines(action.answer, width).len() as u16)
            .unwrap_or(0);
        rows + answer_lines + VERTICAL_OVERHEAD
    }

    fn lines(&self, width: u16) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for (i, action) in self.actions.iter().enumerate() {
            let expanded = self.state.expanded == Some(i);
            let marker = if expanded { "▾ " } else { "▸ " };

            let mut title_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
            let mut prompt_style = Style::default().fg(Color::Gray);
            if self.focused && self.state.selected == i {
                title_style = title_style.add_modifier(Modifier::REVERSED);
            }
            if self.disabled {
                title_style = title_style.add_modifier(Modifier::DIM);
                prompt_style = prompt_style.add_modifier(Modifier::DIM);
            }

            lines.push(Line::from(vec![
                Span::raw(marker),
                Span::styled(action.title, title_style),
                Span::raw("  "),
                Span::styled(action.prompt, prompt_style),
            ]));

            if expanded {
                let answer_style = Style::default().add_modifier(Modifier::ITALIC);
                for text in answer_lines(action.answer, width) {
                    lines.push(Line::styled(format!("{ANSWER_INDENT}{text}"), answer_style));
                }
            }
        }
        lines
    }
}

/// Canned answer wrapped to the space left after borders and indent.
fn answer_lines(answer: &str, width: u16) -> Vec<String> {
    let inner = width
        .saturating_sub(HORIZONTAL_OVERHEAD)
        .saturating_sub(ANSWER_INDENT.len() as u16);
    if inner == 0 {
        return Vec::new();
    }
    textwrap::wrap(answer, textwrap::Options::new(inner as usize).break_words(true))
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

impl Widget for FaqPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match (self.disabled, self.focused) {
            (true, _) => Style::default().fg(Color::DarkGray),
            (false, true) => Style::default().fg(Color::Cyan),
            (false, false) => Style::default(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(TITLE)
            .title_bottom(Line::from(" ↑↓ 선택 · Space 펼치기 · Enter 질문 ").right_aligned());

        Paragraph::new(self.lines(area.width))
            .block(block)
            .render(area, buf);
    }
}
