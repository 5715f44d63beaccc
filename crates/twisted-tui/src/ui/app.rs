use super::{footer::render_footer, header::render_header, page::render_page, panel::render_panel};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    prelude::{Constraint, CrosstermBackend, Direction, Layout, Terminal},
    widgets::{Block, Borders},
};
use std::io::Stdout;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};
use twisted_core::{
    catalog::PAGE_ELEMENTS,
    cloud::{GenerateContentResponse, TextResponse},
    error::Result as GenerativeResult,
    orchestrator::Orchestrator,
    selection::{SelectionController, Toggle},
    settings::Settings,
    theme::{Element, Theme},
};

const NO_TARGET_NOTICE: &str = "SELECT A UI ELEMENT TO BEGIN ARCHITECTING";
const ASSET_READY_NOTICE: &str = "Asset ready. [CTRL+S] Save | [CTRL+D] Dismiss";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Page,
    Prompt,
}

/// Results coming back from spawned generation tasks.
pub enum Completion {
    Mutation(GenerativeResult<TextResponse>),
    Asset(GenerativeResult<GenerateContentResponse>),
}

pub struct App {
    should_quit: bool,
    theme: Theme,
    settings: Settings,
    controller: SelectionController,
    orchestrator: Orchestrator,
    focus: Focus,
    cursor: usize,
    notice: Option<String>,
    frame_count: u64,
    tx: UnboundedSender<Completion>,
    rx: UnboundedReceiver<Completion>,
}

/// Read-only view handed to the render functions.
pub struct View<'a> {
    pub theme: &'a Theme,
    pub controller: &'a SelectionController,
    pub orchestrator: &'a Orchestrator,
    pub focus: Focus,
    pub cursor: usize,
    pub notice: Option<&'a str>,
    pub frame_count: u64,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            theme: Theme::new(settings.theme),
            controller: SelectionController::from_settings(&settings),
            orchestrator: Orchestrator::from_settings(&settings),
            settings,
            focus: Focus::Page,
            cursor: 0,
            notice: None,
            frame_count: 0,
            tx,
            rx,
        }
    }

    #[cfg(test)]
    fn with_orchestrator(settings: Settings, orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            ..Self::new(settings)
        }
    }

    pub async fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        while !self.should_quit {
            self.draw(terminal)?;
            self.handle_events()?;
            self.drain_completions();
            self.controller.tick(Instant::now());
            self.frame_count = self.frame_count.wrapping_add(1);
        }
        Ok(())
    }

    fn view(&self) -> View<'_> {
        View {
            theme: &self.theme,
            controller: &self.controller,
            orchestrator: &self.orchestrator,
            focus: self.focus,
            cursor: self.cursor,
            notice: self.notice.as_deref(),
            frame_count: self.frame_count,
        }
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        terminal.draw(|frame| {
            let view = self.view();
            let area = frame.size();
            frame.render_widget(
                Block::new()
                    .borders(Borders::NONE)
                    .style(self.theme.ratatui_style(Element::Background)),
                area,
            );

            let columns = if self.controller.is_open() {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                    .split(area)
            } else {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(100)])
                    .split(area)
            };

            let app_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(0),
                    Constraint::Length(3),
                ])
                .split(columns[0]);

            render_header(frame, app_chunks[0], &view);
            render_page(frame, app_chunks[1], &view);
            render_footer(frame, app_chunks[2], &view);

            if self.controller.is_open() {
                render_panel(frame, columns[1], &view);
            }
        })?;
        Ok(())
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key, Instant::now());
                }
            }
        }
        Ok(())
    }

    fn drain_completions(&mut self) {
        while let Ok(completion) = self.rx.try_recv() {
            self.apply_completion(completion);
        }
    }

    fn apply_completion(&mut self, completion: Completion) {
        match completion {
            Completion::Mutation(result) => self.orchestrator.complete_mutation(result),
            Completion::Asset(result) => {
                let before = self.orchestrator.asset().cloned();
                self.orchestrator.complete_asset(result);
                let after = self.orchestrator.asset();
                if after.is_some() && after != before.as_ref() {
                    self.notice = Some(ASSET_READY_NOTICE.to_string());
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Every key outside the prompt field reaches the watcher.
        if self.focus == Focus::Page {
            let name = if ctrl { "control".to_string() } else { key_name(key.code) };
            if self.controller.on_key(&name, false, now).is_some() {
                return;
            }
        }

        if ctrl {
            match key.code {
                KeyCode::Char('a') => self.toggle_overlay(now),
                KeyCode::Char('g') if self.controller.is_open() => self.submit_asset(),
                KeyCode::Char('d') if self.controller.is_open() => {
                    self.orchestrator.dismiss_asset();
                    if self.notice.as_deref() == Some(ASSET_READY_NOTICE) {
                        self.notice = None;
                    }
                }
                KeyCode::Char('s') if self.controller.is_open() => self.save_asset(),
                _ => {}
            }
            return;
        }

        match self.focus {
            Focus::Prompt => match key.code {
                KeyCode::Esc | KeyCode::Tab => self.focus = Focus::Page,
                KeyCode::Enter => self.submit_mutation(),
                KeyCode::Backspace => {
                    self.orchestrator.prompt_mut().pop();
                }
                KeyCode::Char(c) => self.orchestrator.prompt_mut().push(c),
                _ => {}
            },
            Focus::Page => match key.code {
                KeyCode::Esc if self.controller.is_open() => self.close_overlay(),
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Up | KeyCode::Left if self.controller.is_open() => {
                    self.cursor = self.cursor.checked_sub(1).unwrap_or(PAGE_ELEMENTS.len() - 1);
                }
                KeyCode::Down | KeyCode::Right if self.controller.is_open() => {
                    self.cursor = (self.cursor + 1) % PAGE_ELEMENTS.len();
                }
                KeyCode::Enter if self.controller.is_open() => {
                    self.controller.select(PAGE_ELEMENTS[self.cursor].id);
                }
                KeyCode::Tab if self.controller.is_open() => self.focus = Focus::Prompt,
                _ => {}
            },
        }
    }

    fn toggle_overlay(&mut self, now: Instant) {
        if self.controller.toggle_overlay(now) == Toggle::Closed {
            self.focus = Focus::Page;
        }
    }

    fn close_overlay(&mut self) {
        self.controller.close_overlay();
        self.focus = Focus::Page;
    }

    fn submit_mutation(&mut self) {
        let Some(target) = self.controller.target() else {
            self.notice = Some(NO_TARGET_NOTICE.to_string());
            return;
        };
        if let Some(request) = self.orchestrator.begin_mutation(Some(target.as_str())) {
            let backend = self.orchestrator.backend();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = backend.generate_text(&request).await;
                let _ = tx.send(Completion::Mutation(result));
            });
        }
    }

    fn submit_asset(&mut self) {
        let Some(target) = self.controller.target() else {
            self.notice = Some(NO_TARGET_NOTICE.to_string());
            return;
        };
        if let Some(request) = self.orchestrator.begin_asset(Some(target.as_str())) {
            let backend = self.orchestrator.backend();
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let result = backend.generate_image(&request).await;
                let _ = tx.send(Completion::Asset(result));
            });
        }
    }

    fn save_asset(&mut self) {
        let Some(asset) = self.orchestrator.asset() else {
            return;
        };
        match asset.save_to(&self.settings.asset_dir) {
            Ok(path) => {
                info!(path = %path.display(), "asset saved");
                self.notice = Some(format!("Asset saved to {}", path.display()));
            }
            Err(e) => {
                error!(error = %e, "asset save failed");
                self.notice = Some("Asset could not be saved. See log.".to_string());
            }
        }
    }
}

/// Lowercased key names as a browser reports them, so navigation keys land
/// in the keystroke window and break a partially typed phrase.
fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{}", n),
        KeyCode::Up => "arrowup".to_string(),
        KeyCode::Down => "arrowdown".to_string(),
        KeyCode::Left => "arrowleft".to_string(),
        KeyCode::Right => "arrowright".to_string(),
        KeyCode::Enter => "enter".to_string(),
        KeyCode::Tab | KeyCode::BackTab => "tab".to_string(),
        KeyCode::Backspace => "backspace".to_string(),
        KeyCode::Delete => "delete".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Home => "home".to_string(),
        KeyCode::End => "end".to_string(),
        KeyCode::PageUp => "pageup".to_string(),
        KeyCode::PageDown => "pagedown".to_string(),
        KeyCode::Esc => "escape".to_string(),
        _ => "unidentified".to_string(),
    }
}
