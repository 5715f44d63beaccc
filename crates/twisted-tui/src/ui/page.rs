use crate::ui::app::{Focus, View};
use ratatui::{
    prelude::{Alignment, Constraint, Direction, Frame, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use twisted_core::{
    catalog::{self, ElementKind, PageElement, PAGE_ELEMENTS},
    theme::{Element, Theme},
};

const INFRA_DIAGRAM: &str = r#"
 [ COCKPIT ]          [ FORGE ]            [ ARCHIVE ]
 Interactive Work     Autonomous Build     Knowledge Base
 Orchestration        Execution            Vector Store
      \___________________|___________________/
              TAILSCALE MESH NETWORK :: ENCRYPTED

 Input -> Context Engineering -> BMAD CORE ENGINE -> Guardrails -> Output
"#;

const INFRA_HEIGHT: u16 = 10;

pub fn render_page(frame: &mut Frame, area: Rect, view: &View) {
    let theme = view.theme;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Hero
            Constraint::Length(4), // Products header
            Constraint::Min(8),    // Cards
            Constraint::Length(INFRA_HEIGHT),
            Constraint::Length(1), // Architect banner
        ])
        .split(area);

    if let Some(hero) = catalog::find("hero") {
        let hero_lines = vec![
            Line::from(Span::styled(hero.eyebrow.to_uppercase(), theme.accent_style())),
            Line::from(Span::styled(hero.title, theme.ratatui_style(Element::Title))),
            Line::from(Span::styled(hero.description, theme.inactive_style())),
        ];
        frame.render_widget(
            Paragraph::new(hero_lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(element_block(hero, view)),
            chunks[0],
        );
    }

    let header = element_at(ElementKind::Header);
    let header_lines = vec![
        Line::from(Span::styled(header.eyebrow.to_uppercase(), theme.accent_style())),
        Line::from(Span::styled(header.title, theme.ratatui_style(Element::Title))),
    ];
    frame.render_widget(
        Paragraph::new(header_lines)
            .alignment(Alignment::Center)
            .block(element_block(header, view)),
        chunks[1],
    );

    let card_columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(chunks[2]);
    for (card, column) in catalog::cards().zip(card_columns.iter()) {
        render_card(frame, *column, card, view);
    }

    let infra = element_at(ElementKind::Section);
    frame.render_widget(
        Paragraph::new(INFRA_DIAGRAM)
            .style(theme.text_style())
            .block(
                element_block(infra, view)
                    .title(format!(" {} :: {} ", infra.eyebrow, infra.title)),
            ),
        chunks[3],
    );

    if view.controller.is_open() {
        let banner = Paragraph::new("ARCHITECT INTERACTION MODE :: select UI nodes to mutate state")
            .alignment(Alignment::Center)
            .style(theme.ratatui_style(Element::Selected));
        frame.render_widget(banner, chunks[4]);
    }
}

fn element_at(kind: ElementKind) -> &'static PageElement {
    PAGE_ELEMENTS
        .iter()
        .find(|element| element.kind == kind)
        .unwrap_or(&PAGE_ELEMENTS[0])
}

fn render_card(frame: &mut Frame, area: Rect, card: &PageElement, view: &View) {
    let theme = view.theme;
    let accent = Style::default().fg(theme.accent_color(card.accent));
    let mut lines = vec![
        Line::from(Span::styled(card.title, accent.add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(card.description, theme.text_style())),
        Line::from(""),
    ];
    let tags: Vec<Span> = card
        .tags
        .iter()
        .flat_map(|tag| {
            [
                Span::styled(format!("[{}]", tag), theme.inactive_style()),
                Span::raw(" "),
            ]
        })
        .collect();
    lines.push(Line::from(tags));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(element_block(card, view)),
        area,
    );
}

/// Border styling reflects selection and the architect cursor.
fn element_block<'a>(element: &PageElement, view: &View) -> Block<'a> {
    let selected = view.controller.is_selected(element.id);
    let under_cursor = view.controller.is_open()
        && view.focus == Focus::Page
        && PAGE_ELEMENTS[view.cursor].id == element.id;

    let border_style = border_style(view.theme, element, selected, under_cursor);
    let mut block = Block::new()
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(view.theme.text_style());
    if selected {
        block = block.title(format!(" #{} ", element.id));
    }
    block
}

fn border_style(theme: &Theme, element: &PageElement, selected: bool, under_cursor: bool) -> Style {
    if selected {
        theme.ratatui_style(Element::Selected)
    } else if under_cursor {
        theme.ratatui_style(Element::Focus)
    } else {
        Style::default()
            .fg(theme.accent_color(element.accent))
            .add_modifier(Modifier::DIM)
    }
}
