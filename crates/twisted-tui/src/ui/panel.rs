use crate::ui::app::{Focus, View};
use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};
use twisted_core::{prompts::DESIGN_GUIDELINES, theme::Element, transcript::Role};

pub fn render_panel(frame: &mut Frame, area: Rect, view: &View) {
    let theme = view.theme;
    frame.render_widget(Clear, area);

    let block = Block::new()
        .title(" DESIGN ARCHITECT :: Neural Link Active ")
        .borders(Borders::ALL)
        .border_style(theme.accent_style())
        .style(theme.ratatui_style(Element::Panel));
    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(DESIGN_GUIDELINES.len() as u16 + 1), // Guidelines
            Constraint::Length(1),                                   // Target
            Constraint::Length(1),                                   // Asset
            Constraint::Min(3),                                      // Feed
            Constraint::Length(1),                                   // Notice
            Constraint::Length(5),                                   // Prompt
        ])
        .split(inner_area);

    let mut guidelines = vec![Line::from(Span::styled(
        "DESIGN GUIDELINES",
        theme.inactive_style().add_modifier(Modifier::BOLD),
    ))];
    guidelines.extend(DESIGN_GUIDELINES.iter().map(|rule| {
        Line::from(vec![
            Span::styled(" ✓ ", theme.accent_style()),
            Span::styled(*rule, theme.inactive_style()),
        ])
    }));
    frame.render_widget(Paragraph::new(guidelines), chunks[0]);

    let target = view
        .controller
        .target()
        .map(|t| format!("#{}", t))
        .unwrap_or_else(|| "--- NULL ---".to_string());
    let target_line = Line::from(vec![
        Span::styled("SELECTED COMPONENT  ", theme.inactive_style()),
        Span::styled(target, theme.accent_style()),
    ]);
    frame.render_widget(Paragraph::new(target_line), chunks[1]);

    let asset_line = match view.orchestrator.asset() {
        Some(asset) => Line::from(vec![
            Span::styled("GENERATED ASSET  ", theme.inactive_style()),
            Span::styled(
                format!("{} ({} base64 chars)", asset.mime_type, asset.data.len()),
                theme.ratatui_style(Element::Secondary),
            ),
        ]),
        None => Line::from(Span::styled("GENERATED ASSET  none", theme.inactive_style())),
    };
    frame.render_widget(Paragraph::new(asset_line), chunks[2]);

    render_feed(frame, chunks[3], view);

    if let Some(notice) = view.notice {
        frame.render_widget(
            Paragraph::new(notice).style(theme.ratatui_style(Element::Warning)),
            chunks[4],
        );
    }

    render_prompt(frame, chunks[5], view);
}

fn render_feed(frame: &mut Frame, area: Rect, view: &View) {
    let theme = view.theme;
    let transcript = view.orchestrator.transcript();

    if transcript.is_empty() {
        let waiting = Paragraph::new("AWAITING COMMAND...")
            .alignment(Alignment::Center)
            .style(theme.inactive_style());
        frame.render_widget(waiting, area);
        return;
    }

    let mut lines = Vec::new();
    for entry in transcript.newest_first() {
        let (label_style, text_style, alignment) = match entry.role {
            Role::User => (theme.accent_style(), theme.text_style(), Alignment::Right),
            Role::Agent => (theme.inactive_style(), theme.text_style(), Alignment::Left),
        };
        let label = entry.role.to_string().to_uppercase();
        lines.push(Line::from(Span::styled(label, label_style)).alignment(alignment));
        lines.extend(entry.text.lines().map(|l| {
            Line::from(Span::styled(l.to_string(), text_style)).alignment(alignment)
        }));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_prompt(frame: &mut Frame, area: Rect, view: &View) {
    let theme = view.theme;
    let editing = view.focus == Focus::Prompt;
    let busy = view.orchestrator.is_busy();
    let prompt = view.orchestrator.prompt();

    let title = if busy {
        " GENERATING... ".to_string()
    } else {
        format!(" {} chars ", prompt.chars().count())
    };
    let border_style = if editing {
        theme.accent_style()
    } else {
        theme.inactive_style()
    };

    let content = if prompt.is_empty() && !editing {
        let placeholder = if view.controller.target().is_some() {
            "Propose a mutation... [TAB]"
        } else {
            "Select component first..."
        };
        Line::from(Span::styled(placeholder, theme.inactive_style()))
    } else {
        let mut spans = vec![Span::styled(prompt.to_string(), theme.text_style())];
        if editing {
            spans.push(Span::styled("_", theme.accent_style()));
        }
        Line::from(spans)
    };

    let submit_style = if busy || prompt.is_empty() {
        theme.inactive_style()
    } else {
        theme.accent_style()
    };

    let paragraph = Paragraph::new(vec![
        content,
        Line::from(""),
        Line::from(Span::styled("[ENTER] MORPH UI | [CTRL+G] ASSET", submit_style)),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::new()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    frame.render_widget(paragraph, area);
}
