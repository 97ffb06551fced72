//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Tab / Shift+Tab cycle `Input → Faq → FollowUps`. `FollowUps` is skipped
//! while the newest assistant turn has no chips. Typing a character outside
//! the input moves focus back to it, except for Space (FAQ toggle) and the
//! digits 1-9 (follow-up shortcuts).
//!
//! ## Redraw Strategy
//!
//! - **Pending**: draws every ~80ms so the placeholder bubble pulses.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{ChatClient, ChatRequest};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::quick_actions::QUICK_ACTIONS;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{FaqEvent, FaqState, InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_FRAME: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(500);

/// Which region receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Faq,
    FollowUps,
}

impl Focus {
    pub fn next(self, has_chips: bool) -> Self {
        match self {
            Focus::Input => Focus::Faq,
            Focus::Faq if has_chips => Focus::FollowUps,
            Focus::Faq | Focus::FollowUps => Focus::Input,
        }
    }

    pub fn prev(self, has_chips: bool) -> Self {
        match self {
            Focus::Input if has_chips => Focus::FollowUps,
            Focus::Input | Focus::FollowUps => Focus::Faq,
            Focus::Faq => Focus::Input,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub faq: FaqState,
    pub focus: Focus,
    /// Highlighted chip of the active follow-up row
    pub selected_chip: usize,
    // Animation state
    pub pulse_value: f32,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            faq: FaqState::new(QUICK_ACTIONS.len()),
            focus: Focus::Input, // User expects to type immediately
            selected_chip: 0,
            pulse_value: 0.0,
        }
    }

    /// Leave the follow-up row once its chips are gone.
    fn sync_focus(&mut self, app: &App) {
        let chip_count = app
            .conversation
            .active_follow_ups()
            .map(|(_, turn)| turn.follow_ups.len())
            .unwrap_or(0);
        if chip_count == 0 {
            self.selected_chip = 0;
            if self.focus == Focus::FollowUps {
                self.focus = Focus::Input;
            }
        } else {
            self.selected_chip = self.selected_chip.min(chip_count - 1);
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // The keyboard enhancement protocol is ignored by terminals that lack it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let client = ChatClient::new(&config.base_url);
    info!("Chat endpoint: {}", client.endpoint());
    let mut app = App::new(Arc::new(client));
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    'event_loop: loop {
        tui.sync_focus(&app);

        let animating = app.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let elapsed = start_time.elapsed().as_secs_f32();
            tui.pulse_value = (elapsed * 5.0).sin() * 0.5 + 0.5;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_FRAME } else { IDLE_POLL };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let effect = dispatch(&mut app, &mut tui, event);
            if !apply_effect(&app, effect, &tx) {
                break 'event_loop;
            }
            tui.sync_focus(&app);
        }

        // Settled requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if !apply_effect(&app, effect, &tx) {
                break 'event_loop;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

/// Carry out an effect. Returns false when the loop should stop.
fn apply_effect(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => true,
        Effect::SpawnRequest(request) => {
            spawn_request(app, request, tx.clone());
            true
        }
        Effect::Quit => false,
    }
}

/// Route one terminal event to the focused region.
fn dispatch(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    let has_chips = app.conversation.active_follow_ups().is_some();

    match event {
        TuiEvent::Resize => return Effect::None,
        TuiEvent::ForceQuit => return update(app, Action::Quit),
        TuiEvent::FocusNext => {
            tui.focus = tui.focus.next(has_chips);
            return Effect::None;
        }
        TuiEvent::FocusPrev => {
            tui.focus = tui.focus.prev(has_chips);
            return Effect::None;
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            return Effect::None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Input => {
            // Esc leaves the input rather than quitting
            if event == TuiEvent::Escape {
                tui.focus = Focus::Faq;
                return Effect::None;
            }
            match tui.input_box.handle_event(&event) {
                Some(InputEvent::Submit(text)) => {
                    tui.message_list.stick_to_bottom = true;
                    update(app, Action::Submit(text))
                }
                Some(InputEvent::ContentChanged) | None => Effect::None,
            }
        }
        Focus::Faq => match event {
            TuiEvent::Escape => update(app, Action::Quit),
            TuiEvent::CursorEnd => {
                tui.message_list.handle_event(&TuiEvent::ScrollToBottom);
                Effect::None
            }
            TuiEvent::InputChar(c) if c != ' ' => match chip_shortcut(c) {
                Some(index) => click_chip(app, tui, index),
                None => type_into_input(tui, event),
            },
            TuiEvent::Paste(_) => type_into_input(tui, event),
            _ => match tui.faq.handle_event(&event) {
                Some(FaqEvent::Ask(index)) => {
                    tui.message_list.stick_to_bottom = true;
                    update(app, Action::QuickAction(index))
                }
                None => Effect::None,
            },
        },
        Focus::FollowUps => match event {
            TuiEvent::Escape => update(app, Action::Quit),
            TuiEvent::CursorEnd => {
                tui.message_list.handle_event(&TuiEvent::ScrollToBottom);
                Effect::None
            }
            TuiEvent::CursorLeft => {
                tui.selected_chip = tui.selected_chip.saturating_sub(1);
                Effect::None
            }
            TuiEvent::CursorRight => {
                tui.selected_chip += 1;
                tui.sync_focus(app);
                Effect::None
            }
            TuiEvent::Submit => {
                let index = tui.selected_chip;
                click_chip(app, tui, index)
            }
            TuiEvent::InputChar(c) => match chip_shortcut(c) {
                Some(index) => click_chip(app, tui, index),
                None => type_into_input(tui, event),
            },
            TuiEvent::Paste(_) => type_into_input(tui, event),
            _ => Effect::None,
        },
    }
}

/// Digits 1-9 map to chip indices 0-8.
fn chip_shortcut(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}

fn click_chip(app: &mut App, tui: &mut TuiState, index: usize) -> Effect {
    let question = app
        .conversation
        .active_follow_ups()
        .and_then(|(_, turn)| turn.follow_ups.get(index).cloned());
    match question {
        Some(question) => {
            tui.message_list.stick_to_bottom = true;
            update(app, Action::FollowUp(question))
        }
        None => {
            debug!("No follow-up chip at index {}", index);
            Effect::None
        }
    }
}

/// Typing outside the input switches focus to it and forwards the event.
fn type_into_input(tui: &mut TuiState, event: TuiEvent) -> Effect {
    tui.focus = Focus::Input;
    tui.input_box.handle_event(&event);
    Effect::None
}

fn spawn_request(app: &App, request: ChatRequest, tx: mpsc::Sender<Action>) {
    info!(
        "Spawning request via {} ({} chars)",
        app.service.name(),
        request.message.chars().count()
    );
    let service = app.service.clone();

    tokio::spawn(async move {
        let result = service.ask(&request).await;
        match &result {
            Ok(_) => info!("Request settled"),
            Err(e) => warn!("Request failed: {}", e),
        }
        if tx.send(Action::settle(result)).is_err() {
            warn!("Failed to send settle action: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    fn type_str(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            dispatch(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_focus_cycle_skips_follow_ups_without_chips() {
        assert_eq!(Focus::Input.next(false), Focus::Faq);
        assert_eq!(Focus::Faq.next(false), Focus::Input);
        assert_eq!(Focus::Faq.next(true), Focus::FollowUps);
        assert_eq!(Focus::FollowUps.next(true), Focus::Input);

        assert_eq!(Focus::Input.prev(false), Focus::Faq);
        assert_eq!(Focus::Input.prev(true), Focus::FollowUps);
        assert_eq!(Focus::FollowUps.prev(true), Focus::Faq);
    }

    #[test]
    fn test_submit_from_input_requests() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        type_str(&mut app, &mut tui, "금리 알려줘");
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        match effect {
            Effect::SpawnRequest(request) => assert_eq!(request.message, "금리 알려줘"),
            other => panic!("Expected SpawnRequest, got {:?}", other),
        }
        assert!(app.is_pending());
    }

    #[test]
    fn test_enter_while_pending_keeps_text() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_str(&mut app, &mut tui, "첫 질문");
        dispatch(&mut app, &mut tui, TuiEvent::Submit);

        tui.input_box.disabled = app.is_pending();
        type_str(&mut app, &mut tui, "둘째");
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(effect, Effect::None);
        assert_eq!(tui.input_box.buffer, "둘째");
    }

    #[test]
    fn test_escape_in_input_moves_focus_then_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::None);
        assert_eq!(tui.focus, Focus::Faq);
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    #[test]
    fn test_faq_enter_runs_quick_action() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.focus = Focus::Faq;
        let before = app.conversation.len();

        dispatch(&mut app, &mut tui, TuiEvent::CursorDown);
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(effect, Effect::None);
        assert_eq!(app.conversation.len(), before + 2);
        assert_eq!(app.conversation.turns()[before].text, QUICK_ACTIONS[1].prompt);
    }

    #[test]
    fn test_faq_space_toggles_without_typing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.focus = Focus::Faq;

        dispatch(&mut app, &mut tui, TuiEvent::InputChar(' '));
        assert_eq!(tui.faq.expanded, Some(0));
        assert!(tui.input_box.buffer.is_empty());
        assert_eq!(tui.focus, Focus::Faq);
    }

    #[test]
    fn test_typing_outside_input_switches_focus() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.focus = Focus::Faq;

        dispatch(&mut app, &mut tui, TuiEvent::InputChar('대'));
        assert_eq!(tui.focus, Focus::Input);
        assert_eq!(tui.input_box.buffer, "대");
    }

    #[test]
    fn test_follow_up_enter_clicks_selected_chip() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::QuickAction(0));

        dispatch(&mut app, &mut tui, TuiEvent::FocusNext);
        dispatch(&mut app, &mut tui, TuiEvent::FocusNext);
        assert_eq!(tui.focus, Focus::FollowUps);

        dispatch(&mut app, &mut tui, TuiEvent::CursorRight);
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        match effect {
            Effect::SpawnRequest(request) => {
                assert_eq!(request.message, QUICK_ACTIONS[0].follow_ups[1])
            }
            other => panic!("Expected SpawnRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_chip_selection_clamps() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::QuickAction(0));
        tui.focus = Focus::FollowUps;

        for _ in 0..5 {
            dispatch(&mut app, &mut tui, TuiEvent::CursorRight);
        }
        assert_eq!(tui.selected_chip, QUICK_ACTIONS[0].follow_ups.len() - 1);
    }

    #[test]
    fn test_digit_clicks_chip_from_faq() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::QuickAction(2));
        tui.focus = Focus::Faq;

        let effect = dispatch(&mut app, &mut tui, TuiEvent::InputChar('1'));
        match effect {
            Effect::SpawnRequest(request) => {
                assert_eq!(request.message, QUICK_ACTIONS[2].follow_ups[0])
            }
            other => panic!("Expected SpawnRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_digit_types_in_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::QuickAction(0));

        let effect = dispatch(&mut app, &mut tui, TuiEvent::InputChar('1'));
        assert_eq!(effect, Effect::None);
        assert_eq!(tui.input_box.buffer, "1");
    }

    #[test]
    fn test_digit_without_chip_is_ignored() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.focus = Focus::Faq;
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::InputChar('9')), Effect::None);
        assert_eq!(app.conversation.len(), 1);
    }

    #[test]
    fn test_focus_leaves_follow_ups_once_chips_are_gone() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::QuickAction(0));
        tui.focus = Focus::FollowUps;

        dispatch(&mut app, &mut tui, TuiEvent::Submit);
        tui.sync_focus(&app);

        // The pending placeholder is now the newest assistant turn
        assert_eq!(tui.focus, Focus::Input);
    }

    #[test]
    fn test_chip_shortcut_range() {
        assert_eq!(chip_shortcut('1'), Some(0));
        assert_eq!(chip_shortcut('9'), Some(8));
        assert_eq!(chip_shortcut('0'), None);
        assert_eq!(chip_shortcut('a'), None);
    }
}
