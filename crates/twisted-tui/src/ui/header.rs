use crate::ui::app::View;
use ratatui::{
    prelude::{Alignment, Frame, Rect},
    text::{Line, Span},
    widgets::{block::Title, Block, Borders, Paragraph},
};
use twisted_core::theme::Element;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render_header(frame: &mut Frame, area: Rect, view: &View) {
    let theme = view.theme;
    let title = Title::from(Line::from(vec![
        Span::styled(" TWISTED", theme.ratatui_style(Element::Title)),
        Span::styled("STACKS ", theme.accent_style()),
    ]))
    .alignment(Alignment::Left);

    let (agent_text, agent_style) = if view.controller.is_busy() {
        let spin = SPINNER[(view.frame_count / 2) as usize % SPINNER.len()];
        (format!("{} BOOTING AGENT", spin), theme.ratatui_style(Element::Secondary))
    } else if view.controller.is_open() {
        ("[CTRL+A] EXIT ARCHITECT".to_string(), theme.ratatui_style(Element::Selected))
    } else {
        ("[CTRL+A] INVOKE AGENT".to_string(), theme.inactive_style())
    };

    let line = Line::from(vec![
        Span::styled("AGENTIC ENGINEERING", theme.inactive_style()),
        Span::raw("  |  "),
        Span::styled(agent_text, agent_style),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Right)
        .block(
            Block::new()
                .borders(Borders::ALL)
                .title(title)
                .style(theme.ratatui_style(Element::Border)),
        );

    frame.render_widget(header, area);
}
