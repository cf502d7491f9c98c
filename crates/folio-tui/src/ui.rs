// UI rendering logic
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use folio_core::about::Slide;
use folio_core::contact::CopyTarget;
use folio_core::{CardSlot, ProjectCard};

use crate::app::{App, Focus, Hit, InputMode, LandingGeometry, ABOUT_SECTION, MAIN_SECTION, SIDE_SECTION};

pub fn render(frame: &mut Frame, app: &mut App) {
    app.hitboxes.clear();
    let presentation = *app.transition.presentation();
    let header_height = if presentation.hero_shrunk { 1 } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], presentation.hero_shrunk);

    // Geometry is needed in both views so scrolling back can collapse again
    let landing = landing_lines(app, chunks[1].width.saturating_sub(4));
    app.landing = LandingGeometry {
        about_end: landing.about_end,
        viewport_height: chunks[1].height,
    };

    if presentation.projects_visible {
        render_projects(frame, app, chunks[1]);
    } else {
        render_landing(frame, app, chunks[1], landing, presentation.scroll_hint_hidden);
    }

    render_status_bar(frame, app, chunks[2]);

    let mode = app.input_mode();
    if mode != InputMode::Normal {
        // Popups blur (here: dim) everything behind them
        let full = frame.area();
        frame
            .buffer_mut()
            .set_style(full, Style::default().add_modifier(Modifier::DIM));
    }

    match mode {
        InputMode::Normal => {}
        InputMode::Overlay => render_overlay(frame, app),
        InputMode::About => render_about_popup(frame, app),
        InputMode::Compose => render_compose(frame, app),
    }
}

fn copy_span(app: &App, text: &str, target: CopyTarget) -> Span<'static> {
    if app.is_flashing(target) {
        Span::styled(
            "Copied!",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            text.trim().to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        )
    }
}

/// Lay spans out left to right, recording hitboxes for the clickable ones
fn clickable_line(app: &mut App, area: Rect, row: u16, parts: Vec<(Span<'static>, Option<Hit>)>) -> Line<'static> {
    let mut x = area.x;
    let mut spans = Vec::with_capacity(parts.len());

    for (span, hit) in parts {
        let width = span.width() as u16;
        if let Some(hit) = hit {
            let visible = width.min(area.right().saturating_sub(x));
            if visible > 0 {
                app.hitboxes.push((Rect::new(x, row, visible, 1), hit));
            }
        }
        x = x.saturating_add(width);
        spans.push(span);
    }

    Line::from(spans)
}

fn contact_parts(app: &App) -> Vec<(Span<'static>, Option<Hit>)> {
    let contact = &app.config.contact;
    let sep = || -> (Span<'static>, Option<Hit>) {
        (Span::styled("  |  ", Style::default().fg(Color::DarkGray)), None)
    };
    let mut parts = Vec::new();

    if let Some(name) = &contact.name {
        parts.push((copy_span(app, name, CopyTarget::ContactName), Some(Hit::Copy(CopyTarget::ContactName))));
    }
    if let Some(email) = &contact.email {
        if !parts.is_empty() {
            parts.push(sep());
        }
        parts.push((copy_span(app, email, CopyTarget::ContactEmail), Some(Hit::Copy(CopyTarget::ContactEmail))));
    }
    if let Some(phone) = &contact.phone {
        if !parts.is_empty() {
            parts.push(sep());
        }
        parts.push((copy_span(app, phone, CopyTarget::ContactPhone), Some(Hit::Copy(CopyTarget::ContactPhone))));
    }
    parts
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect, shrunk: bool) {
    if area.height == 0 {
        return;
    }
    let heading = app.config.contact.name.clone().unwrap_or_else(|| "folio".to_string());
    let heading_span = if app.is_flashing(CopyTarget::ProfileName) {
        Span::styled("Copied!", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(heading, Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
    };
    let heading_part = (heading_span, Some(Hit::Copy(CopyTarget::ProfileName)));

    if shrunk {
        let mut parts = vec![heading_part];
        let contact = contact_parts(app);
        if !contact.is_empty() {
            parts.push((Span::raw("   "), None));
            parts.extend(contact);
        }
        let line = clickable_line(app, area, area.y, parts);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let heading_line = clickable_line(app, area, area.y, vec![heading_part]);
    let contact = contact_parts(app);
    let contact_line = clickable_line(app, area, area.y + 1, contact);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(vec![heading_line, contact_line]).block(block), area);
}

/// Greedy word wrap; long words are left to overflow
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

struct Landing {
    lines: Vec<Line<'static>>,
    /// One past the last line of the about section
    about_end: u16,
    read_more_row: u16,
}

fn landing_lines(app: &App, width: u16) -> Landing {
    let width = usize::from(width);
    let text_style = if app.reveal.is_revealed(ABOUT_SECTION) {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let about = &app.config.about;

    let mut lines: Vec<Line<'static>> = vec![
        Line::from(""),
        Line::from(Span::styled(
            "About Me",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    let push_paragraph = |lines: &mut Vec<Line<'static>>, text: &str| {
        lines.extend(wrap(text, width).into_iter().map(|l| Line::from(Span::styled(l, text_style))));
        lines.push(Line::from(""));
    };

    for paragraph in &about.summary {
        push_paragraph(&mut lines, paragraph);
    }
    if app.read_more.is_expanded() {
        for project in &about.projects {
            let text = match &project.description {
                Some(description) => format!("- {}: {}", project.title, description),
                None => format!("- {}", project.title),
            };
            push_paragraph(&mut lines, &text);
        }
        for paragraph in &about.extra {
            push_paragraph(&mut lines, paragraph);
        }
    }

    let read_more_row = lines.len() as u16;
    lines.push(Line::from(Span::styled(
        format!("[ {} ]", app.read_more.label()),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));

    Landing {
        about_end: lines.len() as u16,
        lines,
        read_more_row,
    }
}

fn render_landing(frame: &mut Frame, app: &mut App, area: Rect, landing: Landing, hint_hidden: bool) {
    let inner = Rect {
        x: area.x.saturating_add(2),
        width: area.width.saturating_sub(4),
        ..area
    };
    frame.render_widget(Paragraph::new(landing.lines).scroll((app.scroll, 0)), inner);

    if let Some(offset) = landing.read_more_row.checked_sub(app.scroll) {
        if offset < area.height {
            let label = format!("[ {} ]", app.read_more.label());
            app.hitboxes.push((
                Rect::new(inner.x, area.y + offset, label.len() as u16, 1),
                Hit::ReadMore,
            ));
        }
    }

    if !hint_hidden && area.height > 0 {
        let hint_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let hint = Paragraph::new(Span::styled(
            "v  scroll for projects (j)  v",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }
}

fn section_style(app: &App, id: &str) -> Style {
    if app.reveal.is_revealed(id) {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_projects(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12.min(area.height / 2)), Constraint::Min(4)])
        .split(area);

    render_carousel(frame, app, chunks[0]);
    render_side_grid(frame, app, chunks[1]);

    // Sections fade in on the frame after they first show up
    app.section_drawn(MAIN_SECTION, chunks[0], area);
    app.section_drawn(SIDE_SECTION, chunks[1], area);
}

fn render_card(frame: &mut Frame, card: &ProjectCard, area: Rect, selected: bool, style: Style) {
    let border_style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        style
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", card.record.title),
            style.add_modifier(Modifier::BOLD),
        ))
        .border_style(border_style);

    let mut lines = vec![Line::from(Span::styled(card.record.description.clone(), style))];
    if let Some(link) = &card.record.link {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(link.clone(), Style::default().fg(Color::Blue))));
    }

    frame.render_widget(
        Paragraph::new(lines).block(block).style(style).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_carousel(frame: &mut Frame, app: &mut App, area: Rect) {
    let style = section_style(app, MAIN_SECTION);
    let focused = app.focus == Focus::Carousel;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", CardSlot::Featured))
        .border_style(if focused { Style::default().fg(Color::Cyan) } else { style })
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(error) = &app.screen.error {
        let message = Paragraph::new(error.clone())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(message, inner);
        return;
    }

    let index = app.showcase.carousel().index();
    let Some(card) = app.screen.featured.get(index).cloned() else {
        let text = if app.showcase.is_loading() { "Loading..." } else { "No featured projects" };
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
        return;
    };
    app.hitboxes.push((inner, Hit::Carousel));

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(3), Constraint::Min(10), Constraint::Length(3)])
        .split(rows[0]);

    let arrow_row = |r: Rect| Rect::new(r.x, r.y + r.height / 2, r.width, 1.min(r.height));
    let prev_area = arrow_row(cols[0]);
    let next_area = arrow_row(cols[2]);
    frame.render_widget(Paragraph::new(" < ").alignment(Alignment::Center), prev_area);
    frame.render_widget(Paragraph::new(" > ").alignment(Alignment::Center), next_area);

    // Neighbours peek in at the edges; clicking one moves towards it
    let peek_style = style.fg(Color::DarkGray);
    let mut current = None;
    for (i, slot) in carousel_slots(app, cols[1]) {
        if i == index {
            current = Some(slot);
            continue;
        }
        if let Some(neighbour) = app.screen.featured.get(i) {
            render_card(frame, neighbour, slot, false, peek_style);
        }
        app.hitboxes
            .push((slot, if i < index { Hit::CarouselPrev } else { Hit::CarouselNext }));
    }
    let current = current.unwrap_or(cols[1]);
    render_card(frame, &card, current, focused, style);

    // Later hitboxes win, so the arrows and card sit above the track
    app.hitboxes.push((current, Hit::Card(CardSlot::Featured, card.position)));
    app.hitboxes.push((prev_area, Hit::CarouselPrev));
    app.hitboxes.push((next_area, Hit::CarouselNext));

    let dots: Vec<Span> = (0..app.showcase.carousel().len())
        .map(|i| {
            if i == index {
                Span::styled("o ", Style::default().fg(Color::Cyan))
            } else {
                Span::styled(". ", Style::default().fg(Color::DarkGray))
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(dots)).alignment(Alignment::Center), rows[1]);
}

/// Visible columns of each neighbouring card beyond the gap
const PEEK_COLUMNS: u16 = 4;
const MIN_CARD_WIDTH: u16 = 20;

/// Where each featured card lands inside `viewport`, clipped to it
///
/// Cards sit on one horizontal track, `carousel_gap` units apart, and the
/// track is shifted by the carousel offset. Too narrow for a peek, each
/// card becomes a full-width slide instead. The current card always lands
/// at the same place; cards entirely outside the viewport are left out.
fn carousel_slots(app: &App, viewport: Rect) -> Vec<(usize, Rect)> {
    let layout = &app.config.layout;
    let carousel = app.showcase.carousel();
    let cell = layout.cell_width.max(1.0);
    let gap_columns = (layout.carousel_gap / cell).round().clamp(0.0, f32::from(u16::MAX / 4)) as u16;
    let peek = gap_columns + PEEK_COLUMNS;
    let slides = u32::from(viewport.width) < u32::from(MIN_CARD_WIDTH) + 2 * u32::from(peek);

    // Card width in columns, and each card's track position in columns
    let (peek, card_width, track_x): (u16, u16, Box<dyn Fn(usize) -> f32>) = if slides {
        let width = f32::from(viewport.width);
        let shift = carousel.slide_offset_percent(100.0);
        (0, viewport.width, Box::new(move |i| (i as f32 * 100.0 + shift) / 100.0 * width))
    } else {
        let card_width = viewport.width - 2 * peek;
        let card_units = f32::from(card_width) * cell;
        let gap = layout.carousel_gap;
        let offset = carousel.offset(card_units, Some(gap));
        (
            peek,
            card_width,
            Box::new(move |i| (i as f32 * (card_units + gap) + offset) / cell),
        )
    };

    let origin = i32::from(viewport.x) + i32::from(peek);
    let left_edge = i32::from(viewport.x);
    let right_edge = i32::from(viewport.right());
    (0..app.screen.featured.len())
        .filter_map(|i| {
            let left = origin + track_x(i).round() as i32;
            let right = left + i32::from(card_width);
            let (left, right) = (left.max(left_edge), right.min(right_edge));
            (right > left).then(|| {
                (i, Rect::new(left as u16, viewport.y, (right - left) as u16, viewport.height))
            })
        })
        .collect()
}

fn grid_columns(page_size: usize) -> usize {
    match page_size {
        0 | 1 => 1,
        2..=6 => 2,
        _ => 3,
    }
}

fn render_side_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let style = section_style(app, SIDE_SECTION);
    let focused = app.focus == Focus::SideProjects;
    let page_label = match app.screen.page {
        Some((window, count)) => format!(" Page {}/{} ", window.index + 1, count),
        None => String::new(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", CardSlot::Side))
        .title_top(Line::from(page_label).right_aligned())
        .border_style(if focused { Style::default().fg(Color::Cyan) } else { style })
        .style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cards = app.screen.side.clone();
    if cards.is_empty() {
        if app.screen.error.is_none() {
            frame.render_widget(Paragraph::new("No side projects").alignment(Alignment::Center), inner);
        }
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);

    let columns = grid_columns(app.showcase.pager().size());
    let rows = cards.len().div_ceil(columns).max(1);
    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(chunks[0]);

    for (r, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, columns as u32); columns])
            .split(*row_area);

        for (c, cell) in cells.iter().enumerate() {
            let i = r * columns + c;
            let Some(card) = cards.get(i) else {
                break;
            };
            render_card(frame, card, *cell, focused && i == app.side_cursor, style);
            app.hitboxes.push((*cell, Hit::Card(CardSlot::Side, card.position)));
        }
    }

    let label = "[n] Next page";
    let next = Paragraph::new(Span::styled(label, Style::default().fg(Color::Cyan)));
    frame.render_widget(next, chunks[1]);
    app.hitboxes.push((
        Rect::new(chunks[1].x, chunks[1].y, label.len() as u16, 1),
        Hit::SideNext,
    ));
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.status {
        Some(status) => status.clone(),
        None => match app.input_mode() {
            InputMode::Normal => {
                "q quit | j/k scroll | Tab focus | </> move | [ ] carousel | Enter open | n next page | a read more | c contact | r reload"
                    .to_string()
            }
            InputMode::Overlay => "Esc close | o open link".to_string(),
            InputMode::About => "Esc close | </> page | E copy email | P copy phone".to_string(),
            InputMode::Compose => "Tab next field | Enter next/send | Alt+Enter new line | Esc cancel".to_string(),
        },
    };
    let bar = Paragraph::new(text).style(Style::default().fg(Color::Black).bg(Color::Gray));
    frame.render_widget(bar, area);
}

/// Close button in the top-right corner of a popup
fn close_button(frame: &mut Frame, app: &mut App, area: Rect, hit: Hit) {
    if area.width < 6 {
        return;
    }
    let button = Rect::new(area.right() - 5, area.y, 3, 1);
    frame.render_widget(Paragraph::new("[x]").style(Style::default().fg(Color::Red)), button);
    app.hitboxes.push((button, hit));
}

fn render_overlay(frame: &mut Frame, app: &mut App) {
    let Some(record) = app.screen.overlay.clone() else {
        return;
    };
    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {} ", record.title),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.hitboxes.push((area, Hit::OverlayContent));
    close_button(frame, app, area, Hit::OverlayClose);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(record.description.clone()).wrap(Wrap { trim: true }),
        chunks[0],
    );

    if record.has_link() {
        let label = "View on GitHub [o]";
        frame.render_widget(
            Paragraph::new(Span::styled(
                label,
                Style::default().fg(Color::Blue).add_modifier(Modifier::UNDERLINED),
            )),
            chunks[1],
        );
        app.hitboxes.push((
            Rect::new(chunks[1].x, chunks[1].y, (label.len() as u16).min(chunks[1].width), 1),
            Hit::OverlayLink,
        ));
    }
}

fn slide_lines(slide: Option<&Slide>) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    match slide {
        None => vec![],
        Some(Slide::Paragraph(text)) => vec![Line::from(text.clone())],
        Some(Slide::Project(project)) => {
            let mut lines = vec![Line::from(Span::styled(project.title.clone(), bold)), Line::from("")];
            if let Some(description) = &project.description {
                lines.push(Line::from(description.clone()));
            }
            lines
        }
        Some(Slide::ProjectList(projects)) => projects
            .iter()
            .map(|p| {
                let mut spans = vec![Span::styled(format!("- {}", p.title), bold)];
                if let Some(description) = &p.description {
                    spans.push(Span::raw(format!(": {}", description)));
                }
                Line::from(spans)
            })
            .collect(),
    }
}

fn render_about_popup(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(70, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" About Me ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    app.hitboxes.push((area, Hit::AboutContent));
    close_button(frame, app, area, Hit::AboutClose);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(slide_lines(app.about.current())).wrap(Wrap { trim: true }),
        chunks[0],
    );

    let mut contact = Vec::new();
    if let Some(email) = app.config.contact.email.clone() {
        contact.push((copy_span(app, &email, CopyTarget::PopupEmail), Some(Hit::Copy(CopyTarget::PopupEmail))));
        contact.push((Span::raw("   "), None));
    }
    if let Some(phone) = app.config.contact.phone.clone() {
        contact.push((copy_span(app, &phone, CopyTarget::PopupPhone), Some(Hit::Copy(CopyTarget::PopupPhone))));
    }
    let contact_line = clickable_line(app, chunks[1], chunks[1].y, contact);
    frame.render_widget(Paragraph::new(contact_line), chunks[1]);

    let enabled = |on: bool| {
        if on {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let nav = vec![
        (Span::styled("< Prev", enabled(app.about.can_prev())), Some(Hit::AboutPrev)),
        (
            Span::raw(format!("   {}/{}   ", app.about.index() + 1, app.about.len().max(1))),
            None,
        ),
        (Span::styled("Next >", enabled(app.about.can_next())), Some(Hit::AboutNext)),
    ];
    let nav_line = clickable_line(app, chunks[2], chunks[2].y, nav);
    frame.render_widget(Paragraph::new(nav_line), chunks[2]);
}

fn render_compose(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 60, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Send a message ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let fields = [
        ("Name", &app.compose.name),
        ("Email", &app.compose.email),
        ("Message", &app.compose.message),
    ];
    for (i, (title, value)) in fields.iter().enumerate() {
        let current = i == app.compose.field;
        let border = if current {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let text = if current { format!("{}_", value) } else { value.to_string() };
        let input = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(*title).border_style(border))
            .wrap(Wrap { trim: false });
        frame.render_widget(input, chunks[i]);
    }

    let to = app.config.contact.recipient().unwrap_or("(no recipient)");
    frame.render_widget(
        Paragraph::new(Span::styled(format!("To: {}", to.trim()), Style::default().fg(Color::DarkGray))),
        chunks[3],
    );
}

/// Helper function to create a centered rect using up certain percentage of the available rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::loaded_app;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use folio_core::{Error, LOAD_FAILED};
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal.backend().to_string()
    }

    fn expand(app: &mut App) {
        draw(app, 150, 40);
        app.scroll_by(i32::from(app.landing.about_end));
        assert!(app.transition.presentation().projects_visible);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("", 10), vec![""]);
        assert_eq!(wrap("unbreakable", 4), vec!["unbreakable"]);
    }

    #[test]
    fn test_landing_shows_about_not_projects() {
        let (mut app, _) = loaded_app(3);
        let screen = draw(&mut app, 150, 40);

        assert!(screen.contains("About Me"));
        assert!(screen.contains("Hello there."));
        assert!(screen.contains("[ Read More ]"));
        assert!(screen.contains("scroll for projects"));
        assert!(!screen.contains("Main Projects"));
        assert!(app.hitboxes.iter().any(|(_, hit)| *hit == Hit::ReadMore));
        assert!(app.landing.about_end > 0);
    }

    #[test]
    fn test_expanded_view_shows_both_sections() {
        let (mut app, _) = loaded_app(20);
        expand(&mut app);
        let screen = draw(&mut app, 150, 40);

        assert!(screen.contains("Main Projects"));
        assert!(screen.contains("Side Projects"));
        assert!(screen.contains("HackerGO"));
        assert!(screen.contains("side00"));
        assert!(screen.contains("Page 1/3"));
        assert!(!screen.contains("scroll for projects"));
        assert!(app
            .hitboxes
            .iter()
            .any(|(_, hit)| *hit == Hit::Card(CardSlot::Side, 8)));
    }

    #[test]
    fn test_sections_reveal_once_drawn() {
        let (mut app, _) = loaded_app(1);
        expand(&mut app);
        assert!(!app.reveal.is_revealed(MAIN_SECTION));
        draw(&mut app, 150, 40);
        assert!(app.reveal.is_revealed(MAIN_SECTION));
        assert!(app.reveal.is_revealed(SIDE_SECTION));
    }

    #[test]
    fn test_carousel_track_follows_offset() {
        let (mut app, _) = loaded_app(0);
        let viewport = Rect::new(10, 5, 100, 8);

        // 40 units of gap at 8 units per column: 5 columns, plus 4 of peek
        assert_eq!(
            carousel_slots(&app, viewport),
            vec![(0, Rect::new(19, 5, 82, 8)), (1, Rect::new(106, 5, 4, 8))]
        );

        app.showcase.carousel_mut().next();
        assert_eq!(
            carousel_slots(&app, viewport),
            vec![(0, Rect::new(10, 5, 4, 8)), (1, Rect::new(19, 5, 82, 8))]
        );
    }

    #[test]
    fn test_carousel_gap_is_configurable() {
        let (mut app, _) = loaded_app(0);
        app.config.layout.carousel_gap = 80.0;

        let slots = carousel_slots(&app, Rect::new(0, 0, 100, 8));
        assert_eq!(slots[0].1, Rect::new(14, 0, 72, 8));
        assert_eq!(slots[1].1.x, 96);
    }

    #[test]
    fn test_narrow_carousel_shows_one_slide() {
        let (mut app, _) = loaded_app(0);
        let viewport = Rect::new(0, 0, 30, 8);
        assert_eq!(carousel_slots(&app, viewport), vec![(0, viewport)]);

        app.showcase.carousel_mut().next();
        assert_eq!(carousel_slots(&app, viewport), vec![(1, viewport)]);
    }

    #[test]
    fn test_carousel_draws_neighbour_peek() {
        let (mut app, _) = loaded_app(0);
        expand(&mut app);
        draw(&mut app, 150, 40);

        // One arrow each way, plus the peek of the second card on the right
        let count = |wanted: Hit| app.hitboxes.iter().filter(|(_, hit)| *hit == wanted).count();
        assert_eq!(count(Hit::CarouselNext), 2);
        assert_eq!(count(Hit::CarouselPrev), 1);
    }

    #[test]
    fn test_failed_load_shows_message() {
        let (mut app, _) = loaded_app(3);
        let ticket = app.begin_load();
        app.finish_load(ticket, Err(Error::NetworkError("boom".into())));
        expand(&mut app);

        let screen = draw(&mut app, 150, 40);
        assert!(screen.contains(LOAD_FAILED));
        assert!(!screen.contains("side00"));
    }

    #[test]
    fn test_overlay_draws_snapshot_and_hitboxes() {
        let (mut app, _) = loaded_app(1);
        expand(&mut app);
        app.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));

        let screen = draw(&mut app, 150, 40);
        assert!(screen.contains("No description"));
        assert!(screen.contains("View on GitHub"));
        let hits: Vec<Hit> = app.hitboxes.iter().map(|(_, hit)| *hit).collect();
        assert!(hits.contains(&Hit::OverlayContent));
        assert!(hits.contains(&Hit::OverlayClose));
        assert!(hits.contains(&Hit::OverlayLink));
    }

    #[test]
    fn test_about_popup_has_copy_targets() {
        let (mut app, _) = loaded_app(0);
        app.resize(100, 40);
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));

        let screen = draw(&mut app, 100, 40);
        assert!(screen.contains("About Me"));
        assert!(screen.contains("1/3"));
        assert!(app
            .hitboxes
            .iter()
            .any(|(_, hit)| *hit == Hit::Copy(CopyTarget::PopupEmail)));
    }
}
