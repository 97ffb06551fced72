use crate::core::quick_actions::QUICK_ACTIONS;
use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{FaqPanel, HEADER_HEIGHT, Header, MessageList};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom.
struct Regions {
    header: Rect,
    messages: Rect,
    faq: Rect,
    input: Rect,
}

fn split(area: Rect, tui: &TuiState) -> Regions {
    use Constraint::{Length, Min};
    let faq_height = FaqPanel::calculate_height(&tui.faq, &QUICK_ACTIONS, area.width)
        .min(area.height / 2);
    let input_height = tui.input_box.calculate_height(area.width);

    let [header, messages, faq, input] = Layout::vertical([
        Length(HEADER_HEIGHT),
        Min(0),
        Length(faq_height),
        Length(input_height),
    ])
    .areas(area);

    Regions {
        header,
        messages,
        faq,
        input,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let regions = split(frame.area(), tui);
    let pending = app.is_pending();
    let turns = app.conversation.turns();

    let active_chips = app.conversation.active_follow_ups().map(|(idx, _)| idx);
    let selected_chip = (tui.focus == Focus::FollowUps).then_some(tui.selected_chip);

    MessageList::new(&mut tui.message_list, turns, pending, tui.pulse_value)
        .chips(active_chips, selected_chip)
        .render(frame, regions.messages);

    // After the list so the unseen indicator reflects this frame's layout
    Header::new(
        app.status_message.clone(),
        tui.message_list.has_unseen_content(),
    )
    .render(frame, regions.header);

    frame.render_widget(
        FaqPanel::new(&tui.faq, &QUICK_ACTIONS)
            .focused(tui.focus == Focus::Faq)
            .disabled(pending),
        regions.faq,
    );

    tui.input_box.disabled = pending;
    tui.input_box.focused = tui.focus == Focus::Input;
    tui.input_box.render(frame, regions.input);
}
