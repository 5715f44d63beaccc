use crate::ui::app::{Focus, View};
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use twisted_core::theme::Element;

pub fn render_footer(frame: &mut Frame, area: Rect, view: &View) {
    let theme = view.theme;
    let footer_block = Block::default()
        .borders(Borders::ALL)
        .style(theme.ratatui_style(Element::Border));

    let inner_area = footer_block.inner(area);

    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(key, theme.accent_style()),
            Span::styled(label, theme.inactive_style()),
        ]
    };

    let mut spans: Vec<Span> = Vec::new();
    let mut push = |pair: [Span<'static>; 2]| {
        if !spans.is_empty() {
            spans.push(Span::raw(" | "));
        }
        spans.extend(pair);
    };

    match (view.controller.is_open(), view.focus) {
        (true, Focus::Prompt) => {
            push(hint("[ENTER]", " Morph UI"));
            push(hint("[CTRL+G]", " Asset"));
            push(hint("[TAB]", " Page"));
        }
        (true, Focus::Page) => {
            push(hint("[↑↓]", " Navigate"));
            push(hint("[ENTER]", " Select"));
            push(hint("[TAB]", " Prompt"));
            push(hint("[ESC]", " Exit Architect"));
        }
        (false, _) => {
            push(hint("[CTRL+A]", " Invoke Agent"));
            push(hint("[ESC]", " Quit"));
        }
    }

    let content = Line::from(spans).alignment(Alignment::Center);
    let footer_paragraph = Paragraph::new(content).style(theme.text_style());

    frame.render_widget(footer_block, area);
    frame.render_widget(footer_paragraph, inner_area);
}
