use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel::Receiver;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use textwrap::{wrap, Options as WrapOptions};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use url::Url;

use crate::card::{Card, ImageDisplay};
use crate::comments::{CommentsSignal, CommentsView};
use crate::data::CardRequest;
use crate::dispatch::{Effect, Gesture, Target};
use crate::media;

/// Bordered card height: seven body rows plus the frame.
pub const CARD_HEIGHT: u16 = 9;
const SUMMARY_ROWS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub border_idle: Color,
    pub border_focused: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,
    pub success: Color,
    pub warning: Color,
}

impl Palette {
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "mono" | "monochrome" => Self {
                background: Color::Reset,
                border_idle: Color::DarkGray,
                border_focused: Color::White,
                text_primary: Color::White,
                text_secondary: Color::Gray,
                accent: Color::White,
                success: Color::White,
                warning: Color::Gray,
            },
            _ => Self {
                background: Color::Rgb(30, 30, 46),
                border_idle: Color::Rgb(49, 50, 68),
                border_focused: Color::Rgb(137, 180, 250),
                text_primary: Color::Rgb(205, 214, 244),
                text_secondary: Color::Rgb(166, 173, 200),
                accent: Color::Rgb(137, 180, 250),
                success: Color::Rgb(166, 227, 161),
                warning: Color::Rgb(249, 226, 175),
            },
        }
    }
}

/// A control's position inside a card body, relative to the body's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlSpan {
    pub row: u16,
    pub start: u16,
    pub width: u16,
    pub target: Target,
}

pub struct CardBody {
    pub lines: Vec<Line<'static>>,
    pub controls: Vec<ControlSpan>,
}

struct ControlRow {
    spans: Vec<Span<'static>>,
    controls: Vec<ControlSpan>,
    row: u16,
    col: u16,
}

impl ControlRow {
    fn new(row: u16) -> Self {
        Self {
            spans: Vec::new(),
            controls: Vec::new(),
            row,
            col: 0,
        }
    }

    fn text(&mut self, text: impl Into<String>, style: Style) {
        let text = text.into();
        self.col = self.col.saturating_add(display_width(&text));
        self.spans.push(Span::styled(text, style));
    }

    fn control(&mut self, label: impl Into<String>, style: Style, target: Target) {
        let label = label.into();
        let width = display_width(&label);
        self.controls.push(ControlSpan {
            row: self.row,
            start: self.col,
            width,
            target,
        });
        self.text(label, style);
    }
}

fn display_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}

fn image_label(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            let host = parsed.host_str()?.to_string();
            let mut label = format!("{host}{}", parsed.path().trim_end_matches('/'));
            if let Some(query) = parsed.query() {
                label.push('?');
                label.push_str(query);
            }
            Some(label)
        })
        .unwrap_or_else(|| url.to_string())
}

fn source_label(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.trim_start_matches("www.").to_string()))
        .unwrap_or_else(|| url.to_string())
}

/// Lays out a card's body rows and records where each control sits.
pub fn card_body(card: &Card, width: u16, palette: &Palette) -> CardBody {
    let width = usize::from(width.max(1));
    let item = card.item();
    let state = card.state();
    let primary = Style::default().fg(palette.text_primary);
    let secondary = Style::default().fg(palette.text_secondary);
    let accent = Style::default().fg(palette.accent);

    let mut lines: Vec<Line<'static>> = Vec::new();

    let image_line = match card.image_display() {
        ImageDisplay::Placeholder => Span::styled(
            truncate_to_width("[loading image…]", width),
            secondary.add_modifier(Modifier::DIM),
        ),
        ImageDisplay::Image(url) => Span::styled(
            truncate_to_width(&format!("[image: {}]", image_label(url)), width),
            Style::default().fg(palette.success),
        ),
        ImageDisplay::Unavailable => Span::styled(
            truncate_to_width("[image unavailable]", width),
            Style::default().fg(palette.warning),
        ),
    };
    lines.push(Line::from(image_line));

    lines.push(Line::from(Span::styled(
        truncate_to_width(&item.title, width),
        primary.add_modifier(Modifier::BOLD),
    )));

    let wrapped = wrap(item.summary.trim(), WrapOptions::new(width));
    for index in 0..SUMMARY_ROWS {
        let text = match wrapped.get(index) {
            Some(row) if index + 1 == SUMMARY_ROWS && wrapped.len() > SUMMARY_ROWS => {
                truncate_to_width(&format!("{row}…"), width)
            }
            Some(row) => row.to_string(),
            None => String::new(),
        };
        lines.push(Line::from(Span::styled(text, secondary)));
    }

    let meta = [
        item.author.as_str(),
        item.published.as_str(),
        item.read_time.as_str(),
    ]
    .iter()
    .filter(|part| !part.trim().is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" · ");
    lines.push(Line::from(Span::styled(
        truncate_to_width(&meta, width),
        secondary,
    )));

    let mut controls = Vec::new();

    let source_row = lines.len() as u16;
    match item.original_url.as_deref().filter(|_| card.has_source_link()) {
        Some(url) => {
            let mut row = ControlRow::new(source_row);
            row.text("Source: ", secondary);
            let label = truncate_to_width(&source_label(url), width.saturating_sub(8));
            row.control(label, accent.add_modifier(Modifier::UNDERLINED), Target::SourceText);
            controls.extend(row.controls);
            lines.push(Line::from(row.spans));
        }
        None => lines.push(Line::default()),
    }

    let mut row = ControlRow::new(lines.len() as u16);
    if card.has_playback_control() {
        let label = if card.is_playing() {
            "[⏸ Pause]"
        } else {
            "[▶ Listen]"
        };
        row.control(label, accent, Target::PlayPause);
        row.text(" ", primary);
    }
    let comments_style = if state.comments_open() {
        accent.add_modifier(Modifier::REVERSED)
    } else {
        accent
    };
    row.control("[Comments]", comments_style, Target::Comments);
    row.text(" ", primary);
    if card.has_source_link() {
        row.control("[↗]", accent, Target::SourceIcon);
        row.text(" ", primary);
    }
    // hover nudges the arrow one column to the right
    let read_more = if state.hovered {
        "Read more  →"
    } else {
        "Read more →"
    };
    row.control(read_more, primary.add_modifier(Modifier::BOLD), Target::ReadMore);
    controls.extend(row.controls);
    lines.push(Line::from(row.spans));

    CardBody { lines, controls }
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Screen regions of one drawn card, used to route pointer events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardHits {
    pub index: usize,
    pub area: Rect,
    pub controls: Vec<(Rect, Target)>,
}

impl CardHits {
    pub fn from_body(index: usize, area: Rect, inner: Rect, controls: &[ControlSpan]) -> Self {
        let controls = controls
            .iter()
            .filter(|span| span.row < inner.height && span.start < inner.width)
            .map(|span| {
                let width = span.width.min(inner.width - span.start);
                (
                    Rect::new(inner.x + span.start, inner.y + span.row, width, 1),
                    span.target,
                )
            })
            .collect();
        Self {
            index,
            area,
            controls,
        }
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        rect_contains(self.area, column, row)
    }

    /// Innermost target under the pointer: a control when one is hit, the
    /// card body otherwise.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<Target> {
        if !self.contains(column, row) {
            return None;
        }
        let target = self
            .controls
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, target)| *target)
            .unwrap_or(Target::Body);
        Some(target)
    }
}

fn draw_card(
    frame: &mut Frame,
    area: Rect,
    card: &Card,
    index: usize,
    selected: bool,
    palette: &Palette,
) -> CardHits {
    let border = if selected {
        palette.border_focused
    } else {
        palette.border_idle
    };
    let category = if card.item().category.trim().is_empty() {
        "News".to_string()
    } else {
        card.item().category.clone()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {category} "),
            Style::default()
                .fg(palette.background)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    let body = card_body(card, inner.width, palette);
    frame.render_widget(Paragraph::new(Text::from(body.lines)).block(block), area);
    CardHits::from_body(index, area, inner, &body.controls)
}

/// Demo comments view. Comment data lives elsewhere; this pane only shows
/// that the card's visibility flag reached it and offers a close control.
#[derive(Debug, Default)]
pub struct CommentsPane {
    mounted: Option<String>,
    close_requested: bool,
}

impl CommentsPane {
    pub fn mounted(&self) -> Option<&str> {
        self.mounted.as_deref()
    }

    pub fn request_close(&mut self) {
        if self.mounted.is_some() {
            self.close_requested = true;
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, palette: &Palette) {
        let Some(item_id) = self.mounted.as_deref() else {
            return;
        };
        let popup = centered_rect(60, 40, area);
        let text = Text::from(vec![
            Line::from(Span::styled(
                format!("Comments for {item_id}"),
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "No comments yet.",
                Style::default().fg(palette.text_secondary),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Esc close",
                Style::default().fg(palette.accent),
            )),
        ]);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).wrap(Wrap { trim: true }).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(palette.border_focused))
                    .title(" Comments "),
            ),
            popup,
        );
    }
}

impl CommentsView for CommentsPane {
    fn sync(&mut self, item_id: &str, open: bool) -> CommentsSignal {
        match (open, self.mounted.as_deref()) {
            (true, Some(current)) if current == item_id => {
                if std::mem::take(&mut self.close_requested) {
                    self.mounted = None;
                    CommentsSignal::Close
                } else {
                    CommentsSignal::Idle
                }
            }
            (true, None) => {
                self.mounted = Some(item_id.to_string());
                self.close_requested = false;
                CommentsSignal::Idle
            }
            (false, Some(current)) if current == item_id => {
                self.mounted = None;
                self.close_requested = false;
                CommentsSignal::Idle
            }
            _ => CommentsSignal::Idle,
        }
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub struct Options {
    pub status_message: String,
    pub cards: Vec<Card>,
    pub requests: Receiver<CardRequest>,
    pub loader: Option<media::Loader>,
    pub palette: Palette,
    pub tick_rate: Duration,
}

pub struct Model {
    status_message: String,
    cards: Vec<Card>,
    selected: usize,
    scroll: usize,
    hits: Vec<CardHits>,
    pointer_over: Option<usize>,
    detail: Option<usize>,
    playing: Option<String>,
    comments: CommentsPane,
    requests: Receiver<CardRequest>,
    loader: Option<media::Loader>,
    palette: Palette,
    tick_rate: Duration,
    needs_redraw: bool,
}

impl Model {
    pub fn new(options: Options) -> Self {
        Self {
            status_message: options.status_message,
            cards: options.cards,
            selected: 0,
            scroll: 0,
            hits: Vec::new(),
            pointer_over: None,
            detail: None,
            playing: None,
            comments: CommentsPane::default(),
            requests: options.requests,
            loader: options.loader,
            palette: options.palette,
            tick_rate: options.tick_rate,
            needs_redraw: true,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(DisableMouseCapture)?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let mut last_tick = Instant::now();

        loop {
            if self.poll_async() {
                self.mark_dirty();
            }

            if self.needs_redraw {
                terminal.draw(|frame| self.draw(frame))?;
                self.needs_redraw = false;
            }

            let timeout = self
                .tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(16));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key.code) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(_, _) => self.mark_dirty(),
                    _ => {}
                }
            }

            if last_tick.elapsed() >= self.tick_rate {
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Feeds image signals, collaborator requests and comments-view state
    /// back into the cards. Returns true when anything changed.
    pub fn poll_async(&mut self) -> bool {
        let mut changed = false;

        for card in &mut self.cards {
            let Some(reference) = card.take_fetch_request() else {
                continue;
            };
            match &self.loader {
                Some(loader) => loader.enqueue(media::Request {
                    item_id: card.id().to_string(),
                    reference,
                }),
                None => {
                    card.on_image_error(&reference);
                    changed = true;
                }
            }
        }

        let signals = self
            .loader
            .as_ref()
            .map(|loader| loader.drain())
            .unwrap_or_default();
        for signal in signals {
            if let Some(card) = self.cards.iter_mut().find(|card| card.id() == signal.item_id) {
                match signal.result {
                    Ok(_) => {
                        card.on_image_loaded(&signal.reference);
                    }
                    Err(_) => {
                        card.on_image_error(&signal.reference);
                    }
                }
                changed = true;
            }
        }

        let requests: Vec<CardRequest> = self.requests.try_iter().collect();
        for request in requests {
            self.apply_request(request);
            changed = true;
        }

        for card in &mut self.cards {
            if card.sync_comments(&mut self.comments) {
                self.status_message = "Comments closed.".to_string();
                changed = true;
            }
        }

        changed
    }

    fn apply_request(&mut self, request: CardRequest) {
        match request {
            CardRequest::Detail { item_id } => {
                if let Some(index) = self.cards.iter().position(|card| card.id() == item_id) {
                    self.detail = Some(index);
                    self.status_message = format!(
                        "Reading \"{}\". Esc to go back.",
                        self.cards[index].item().title
                    );
                }
            }
            CardRequest::TogglePlayback { item_id, narration } => {
                if self.playing.as_deref() == Some(item_id.as_str()) {
                    self.playing = None;
                    self.status_message = "Narration paused.".to_string();
                } else {
                    self.status_message = format!(
                        "Narrating {} characters of {item_id}.",
                        narration.chars().count()
                    );
                    self.playing = Some(item_id);
                }
                for card in &mut self.cards {
                    let playing = self.playing.as_deref() == Some(card.id());
                    card.set_playing(playing);
                }
            }
        }
    }

    /// Returns true when the app should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.comments.mounted().is_some() {
            if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('c')) {
                self.comments.request_close();
                self.mark_dirty();
            }
            return false;
        }
        if self.detail.is_some() {
            if matches!(code, KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('q')) {
                self.detail = None;
                self.status_message = default_status();
                self.mark_dirty();
            }
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('j') | KeyCode::Down => self.select(self.selected.saturating_add(1)),
            KeyCode::Char('k') | KeyCode::Up => self.select(self.selected.saturating_sub(1)),
            KeyCode::Enter => self.click_selected(Target::ReadMore),
            KeyCode::Char(' ') | KeyCode::Char('p') => self.click_selected(Target::PlayPause),
            KeyCode::Char('c') => self.click_selected(Target::Comments),
            KeyCode::Char('o') => self.click_selected(Target::SourceIcon),
            _ => {}
        }
        false
    }

    fn select(&mut self, index: usize) {
        if self.cards.is_empty() {
            return;
        }
        let index = index.min(self.cards.len() - 1);
        if index != self.selected {
            self.selected = index;
            self.mark_dirty();
        }
    }

    fn click_selected(&mut self, target: Target) {
        // keyboard stands in for a click on the selected card's control
        if target == Target::PlayPause
            && !self
                .cards
                .get(self.selected)
                .is_some_and(Card::has_playback_control)
        {
            return;
        }
        self.dispatch(self.selected, Gesture::Click(target));
    }

    fn dispatch(&mut self, index: usize, gesture: Gesture) {
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        let effect = card.dispatch(gesture);
        match effect {
            Effect::Nothing => return,
            Effect::HoverChanged(_) | Effect::DetailRequested | Effect::PlaybackRequested => {}
            Effect::CommentsOpened => {
                self.status_message = "Comments open. Esc to close.".to_string();
            }
            Effect::CommentsClosed => {
                self.status_message = "Comments closed.".to_string();
            }
            Effect::SourceOpened(url) => {
                self.status_message = format!("Opened {url} in your browser.");
            }
            Effect::SourceOpenFailed(message) => {
                self.status_message = format!("Failed to open source: {message}");
            }
        }
        self.mark_dirty();
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.comments.mounted().is_some() || self.detail.is_some() {
            return;
        }
        let under = self
            .hits
            .iter()
            .find(|hits| hits.contains(mouse.column, mouse.row))
            .map(|hits| hits.index);

        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                if under != self.pointer_over {
                    if let Some(previous) = self.pointer_over {
                        self.dispatch(previous, Gesture::PointerLeave);
                    }
                    if let Some(next) = under {
                        self.dispatch(next, Gesture::PointerEnter);
                    }
                    self.pointer_over = under;
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self
                    .hits
                    .iter()
                    .find_map(|hits| {
                        hits.hit_test(mouse.column, mouse.row)
                            .map(|target| (hits.index, target))
                    });
                if let Some((index, target)) = target {
                    self.select(index);
                    self.dispatch(index, Gesture::Click(target));
                }
            }
            MouseEventKind::ScrollDown => self.select(self.selected.saturating_add(1)),
            MouseEventKind::ScrollUp => self.select(self.selected.saturating_sub(1)),
            _ => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.palette.background)),
            area,
        );
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(CARD_HEIGHT), Constraint::Length(1)])
            .split(area);
        let feed_area = chunks[0];

        let visible = usize::from((feed_area.height / CARD_HEIGHT).max(1));
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }

        self.hits.clear();
        let palette = self.palette;
        for (slot, index) in (self.scroll..self.cards.len()).take(visible).enumerate() {
            let y = feed_area.y + slot as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(feed_area.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }
            let card_area = Rect::new(feed_area.x, y, feed_area.width, height);
            let hits = draw_card(
                frame,
                card_area,
                &self.cards[index],
                index,
                index == self.selected,
                &palette,
            );
            self.hits.push(hits);
        }

        if let Some(index) = self.detail {
            self.draw_detail(frame, feed_area, index);
        }
        self.comments.draw(frame, feed_area, &palette);

        let status = Paragraph::new(Line::from(Span::styled(
            self.status_message.clone(),
            Style::default().fg(palette.text_secondary),
        )));
        frame.render_widget(status, chunks[1]);
    }

    fn draw_detail(&self, frame: &mut Frame, area: Rect, index: usize) {
        let Some(card) = self.cards.get(index) else {
            return;
        };
        let item = card.item();
        let palette = &self.palette;
        let mut lines = vec![
            Line::from(Span::styled(
                item.title.clone(),
                Style::default()
                    .fg(palette.text_primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} · {} · {}", item.author, item.published, item.read_time),
                Style::default().fg(palette.text_secondary),
            )),
            Line::default(),
            Line::from(Span::styled(
                item.summary.trim().to_string(),
                Style::default().fg(palette.text_primary),
            )),
        ];
        if let Some(url) = item.original_url.as_deref() {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                url.to_string(),
                Style::default().fg(palette.accent),
            )));
        }
        let popup = centered_rect(80, 70, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(Text::from(lines))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(palette.border_focused))
                        .title(format!(" {} ", item.category)),
                ),
            popup,
        );
    }
}

pub fn default_status() -> String {
    "j/k select · Enter read · p listen · c comments · o source · q quit".to_string()
}
