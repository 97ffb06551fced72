//! # Header Component
//!
//! Top bar with the assistant's name, tagline, and status.
//!
//! ## Responsibilities
//!
//! - Display the service title and tagline
//! - Display the status line (e.g. "답변을 기다리는 중...")
//! - Show "↓ 새 메시지" when there's unseen content below the scroll position
//!
//! The header is stateless: every field is a prop supplied by the parent on
//! each frame.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

pub const TITLE: &str = "청년주택담보대출 AI";
pub const TAGLINE: &str = "스마트한 주택 대출 상담";
const UNSEEN_INDICATOR: &str = "↓ 새 메시지";

/// Fixed height: top border, one content row, bottom border.
pub const HEADER_HEIGHT: u16 = 3;

pub struct Header {
    /// Status message (e.g. "답변을 기다리는 중...", "요청 실패")
    pub status_message: String,
    /// Whether there's content below the current scroll position
    pub has_unseen_content: bool,
}

impl Header {
    pub fn new(status_message: String, has_unseen_content: bool) -> Self {
        Self {
            status_message,
            has_unseen_content,
        }
    }

    /// Right-hand status text: status, unseen indicator, or both.
    fn status_text(&self) -> String {
        match (self.status_message.is_empty(), self.has_unseen_content) {
            (true, false) => String::new(),
            (true, true) => UNSEEN_INDICATOR.to_string(),
            (false, false) => self.status_message.clone(),
            (false, true) => format!("{} | {}", self.status_message, UNSEEN_INDICATOR),
        }
    }
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = Style::default().fg(Color::Blue);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent.add_modifier(Modifier::DIM))
            .title(Span::styled(
                format!(" ✦ {TITLE} "),
                accent.add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let tagline = Paragraph::new(Line::from(Span::styled(
            TAGLINE,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(tagline, inner);

        let status = Paragraph::new(Line::from(Span::styled(
            self.status_text(),
            Style::default().fg(Color::Yellow),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(status, inner);
    }
}
