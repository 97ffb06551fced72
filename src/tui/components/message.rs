use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::conversation::{ConversationTurn, Speaker};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// User bubbles take this share of the row, right-aligned.
const USER_WIDTH_PERCENT: u16 = 80;

/// Pulse intensity threshold above which the border transitions from normal to BOLD.
const PULSE_BOLD_THRESHOLD: f32 = 0.6;
/// Pulse intensity threshold above which the border transitions from DIM to normal.
const PULSE_NORMAL_THRESHOLD: f32 = 0.2;

/// A stateless component that renders one conversation turn as a bubble.
///
/// # Styling
///
/// - **Assistant** (blue, full width, title "상담사"): may carry a follow-up
///   prompt and numbered suggestion chips below the answer.
/// - **User** (green, right-aligned at 80% width, title "나").
///
/// The display time sits in the bottom border. A pending assistant turn
/// pulses its border while the request is in flight.
///
/// # Height Calculation
///
/// [`calculate_height`](Self::calculate_height) predicts rendered height with
/// `textwrap`, using options that match ratatui's `Paragraph` wrapping, so the
/// message list can lay out the scroll view without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub turn: &'a ConversationTurn,
    /// Highlighted chip while the follow-up row has keyboard focus
    pub selected_chip: Option<usize>,
    /// False while a request is pending or when the chips belong to an older turn
    pub chips_enabled: bool,
    /// Current pulse intensity (0.0 to 1.0) for the pending animation
    pub pulse_intensity: f32,
}

impl<'a> Message<'a> {
    pub fn new(turn: &'a ConversationTurn) -> Self {
        Self {
            turn,
            selected_chip: None,
            chips_enabled: false,
            pulse_intensity: 0.0,
        }
    }

    pub fn chips(mut self, enabled: bool, selected: Option<usize>) -> Self {
        self.chips_enabled = enabled;
        self.selected_chip = selected;
        self
    }

    pub fn pulse(mut self, intensity: f32) -> Self {
        self.pulse_intensity = intensity;
        self
    }

    /// Calculate the height required for this turn given the full row width.
    pub fn calculate_height(turn: &ConversationTurn, width: u16) -> u16 {
        let bubble_width = bubble_width(turn.speaker, width);
        let content_width = bubble_width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Terminal too narrow for borders + padding.
            return 1;
        }

        let sections = Sections::measure(turn, content_width);
        sections.total() + VERTICAL_OVERHEAD
    }
}

/// Width of the bubble for a speaker within a row of `width` cells.
fn bubble_width(speaker: Speaker, width: u16) -> u16 {
    match speaker {
        Speaker::Assistant => width,
        Speaker::User => ((width as u32 * USER_WIDTH_PERCENT as u32) / 100) as u16,
    }
}

/// Bubble rect within the row area.
fn bubble_rect(speaker: Speaker, area: Rect) -> Rect {
    let width = bubble_width(speaker, area.width);
    Rect {
        x: area.x + area.width - width,
        width,
        ..area
    }
}

fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrapped line count for a block of text, 0 for empty text.
fn line_count(text: &str, width: u16) -> u16 {
    if text.is_empty() {
        return 0;
    }
    (textwrap::wrap(text, wrap_options(width)).len() as u16).max(1)
}

fn chip_label(index: usize, question: &str) -> String {
    format!("[{}] {}", index + 1, question)
}

/// Row heights of each part of a bubble's content area.
struct Sections {
    text: u16,
    /// Blank row between the answer and the follow-up block (0 or 1).
    spacer: u16,
    prompt: u16,
    chips: Vec<u16>,
}

impl Sections {
    fn measure(turn: &ConversationTurn, content_width: u16) -> Self {
        let text = line_count(turn.text.trim(), content_width);
        if turn.follow_ups.is_empty() {
            return Self {
                text,
                spacer: 0,
                prompt: 0,
                chips: Vec::new(),
            };
        }

        let prompt = turn
            .follow_up_prompt
            .as_deref()
            .map(|p| line_count(p, content_width))
            .unwrap_or(0);
        let chips = turn
            .follow_ups
            .iter()
            .enumerate()
            .map(|(i, q)| line_count(&chip_label(i, q), content_width))
            .collect();

        Self {
            text,
            spacer: 1,
            prompt,
            chips,
        }
    }

    fn total(&self) -> u16 {
        self.text + self.spacer + self.prompt + self.chips.iter().sum::<u16>()
    }
}

fn speaker_style(speaker: Speaker) -> Style {
    match speaker {
        Speaker::Assistant => Style::default().fg(Color::Blue),
        Speaker::User => Style::default().fg(Color::Green),
    }
}

fn chip_style(enabled: bool, selected: bool) -> Style {
    if !enabled {
        return Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::DIM);
    }
    let base = Style::default().fg(Color::Cyan);
    if selected {
        base.add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else {
        base
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let turn = self.turn;
        let area = bubble_rect(turn.speaker, area);
        let style = if turn.pending {
            speaker_style(turn.speaker).add_modifier(Modifier::ITALIC)
        } else {
            speaker_style(turn.speaker)
        };

        // Three-phase breathing: DIM → normal → BOLD
        let mut border_style = speaker_style(turn.speaker).add_modifier(Modifier::DIM);
        if self.pulse_intensity > PULSE_BOLD_THRESHOLD {
            border_style = border_style
                .remove_modifier(Modifier::DIM)
                .add_modifier(Modifier::BOLD);
        } else if self.pulse_intensity > PULSE_NORMAL_THRESHOLD {
            border_style = border_style.remove_modifier(Modifier::DIM);
        }

        let title = match turn.speaker {
            Speaker::Assistant => Line::from("상담사"),
            Speaker::User => Line::from("나").right_aligned(),
        };
        let block = Block::bordered()
            .title(title)
            .title_bottom(Line::from(turn.display_time.as_str()).right_aligned())
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let sections = Sections::measure(turn, inner.width);
        let mut y = inner.y;
        let bottom = inner.y + inner.height;
        let mut place = |height: u16| -> Option<Rect> {
            if height == 0 || y >= bottom {
                return None;
            }
            let rect = Rect::new(inner.x, y, inner.width, height.min(bottom - y));
            y += height;
            Some(rect)
        };

        if let Some(rect) = place(sections.text) {
            Paragraph::new(turn.text.trim())
                .style(style)
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }
        place(sections.spacer);
        if let (Some(prompt), Some(rect)) = (turn.follow_up_prompt.as_deref(), place(sections.prompt)) {
            Paragraph::new(prompt)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true })
                .render(rect, buf);
        }
        for (i, (question, height)) in turn.follow_ups.iter().zip(&sections.chips).enumerate() {
            if let Some(rect) = place(*height) {
                let selected = self.selected_chip == Some(i);
                Paragraph::new(chip_label(i, question))
                    .style(chip_style(self.chips_enabled, selected))
                    .wrap(Wrap { trim: true })
                    .render(rect, buf);
            }
        }
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}
