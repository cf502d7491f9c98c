// TUI application state and event handling
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, warn};

use folio_core::about::{AboutPopup, ReadMore, ReadMoreAction};
use folio_core::carousel::ArrowKey;
use folio_core::contact::{compose_mailto, Clipboard, CopyFeedback, CopyTarget};
use folio_core::overlay::PointerTarget;
use folio_core::scroll::{visible_fraction, RevealTracker, ScrollTransition, Transition, INTRO_DELAY};
use folio_core::{
    CardSlot, Config, LoadTicket, PageWindow, ProjectCard, ProjectDisplayRecord, RepositoryRecord, Renderer,
    Showcase,
};

/// Sections that fade in once they scroll into view
pub const MAIN_SECTION: &str = "main-projects";
pub const SIDE_SECTION: &str = "side-projects";
/// Faded in by the intro timer, not by scrolling
pub const ABOUT_SECTION: &str = "about";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Carousel,
    SideProjects,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Overlay,
    About,
    Compose,
}

/// Side effects the runner performs on the app's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reload,
    Open(String),
}

/// Clickable regions recorded during the last draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Card(CardSlot, usize),
    /// The whole carousel track, for drags
    Carousel,
    CarouselPrev,
    CarouselNext,
    SideNext,
    ReadMore,
    Copy(CopyTarget),
    OverlayContent,
    OverlayClose,
    OverlayLink,
    AboutContent,
    AboutClose,
    AboutPrev,
    AboutNext,
}

/// Everything the core last asked us to show
#[derive(Debug, Default)]
pub struct Screen {
    pub featured: Vec<ProjectCard>,
    pub side: Vec<ProjectCard>,
    pub page: Option<(PageWindow, usize)>,
    pub overlay: Option<ProjectDisplayRecord>,
    pub error: Option<String>,
}

impl Renderer for Screen {
    fn render_cards(&mut self, slot: CardSlot, cards: &[ProjectCard]) {
        match slot {
            CardSlot::Featured => {
                self.error = None;
                self.featured = cards.to_vec();
            }
            CardSlot::Side => self.side = cards.to_vec(),
        }
    }

    fn set_page(&mut self, window: PageWindow, page_count: usize) {
        self.page = Some((window, page_count));
    }

    fn show_overlay(&mut self, record: &ProjectDisplayRecord) {
        self.overlay = Some(record.clone());
    }

    fn hide_overlay(&mut self) {
        self.overlay = None;
    }

    fn show_error(&mut self, message: &str) {
        self.featured.clear();
        self.error = Some(message.to_string());
    }
}

/// The contact form behind the compose action
#[derive(Debug, Clone, Default)]
pub struct ComposeForm {
    pub open: bool,
    pub name: String,
    pub email: String,
    pub message: String,
    /// 0 = name, 1 = email, 2 = message
    pub field: usize,
}

impl ComposeForm {
    fn current_mut(&mut self) -> &mut String {
        match self.field {
            0 => &mut self.name,
            1 => &mut self.email,
            _ => &mut self.message,
        }
    }
}

/// Where the about section ends on the scrolling landing page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LandingGeometry {
    /// Row (in landing-page coordinates) just past the about section
    pub about_end: u16,
    pub viewport_height: u16,
}

pub struct App {
    pub config: Config,
    pub showcase: Showcase,
    pub screen: Screen,
    pub focus: Focus,
    pub side_cursor: usize,
    pub scroll: u16,
    pub landing: LandingGeometry,
    pub transition: ScrollTransition,
    pub reveal: RevealTracker,
    pub about: AboutPopup,
    pub read_more: ReadMore,
    pub copy_feedback: CopyFeedback,
    pub compose: ComposeForm,
    pub hitboxes: Vec<(Rect, Hit)>,
    pub status: Option<String>,
    pub columns: u16,
    pub rows: u16,
    pub should_quit: bool,
    drag_start: Option<(u16, u16)>,
    started_at: Instant,
    clipboard: Box<dyn Clipboard>,
}

impl App {
    pub fn new(config: Config, columns: u16, rows: u16, clipboard: Box<dyn Clipboard>) -> Self {
        let width = config.layout.width_of(columns);
        let showcase = Showcase::new(
            config.featured.clone(),
            config.classify.exclusion,
            config.layout.breakpoints(),
            width,
        );
        let compact = config.layout.breakpoints().is_compact(width);
        let about = AboutPopup::new(config.about.slides(compact));
        let transition = ScrollTransition::new(config.layout.scroll_threshold);

        let mut reveal = RevealTracker::new();
        reveal.observe(MAIN_SECTION, false);
        reveal.observe(SIDE_SECTION, false);
        reveal.observe(ABOUT_SECTION, true);

        Self {
            config,
            showcase,
            screen: Screen::default(),
            focus: Focus::Carousel,
            side_cursor: 0,
            scroll: 0,
            landing: LandingGeometry::default(),
            transition,
            reveal,
            about,
            read_more: ReadMore::default(),
            copy_feedback: CopyFeedback::new(),
            compose: ComposeForm::default(),
            hitboxes: Vec::new(),
            status: None,
            columns,
            rows,
            should_quit: false,
            drag_start: None,
            started_at: Instant::now(),
            clipboard,
        }
    }

    /// Terminal width in layout units
    pub fn width(&self) -> f32 {
        self.config.layout.width_of(self.columns)
    }

    pub fn is_compact(&self) -> bool {
        self.config.layout.breakpoints().is_compact(self.width())
    }

    pub fn input_mode(&self) -> InputMode {
        if self.compose.open {
            InputMode::Compose
        } else if self.about.is_open() {
            InputMode::About
        } else if self.showcase.overlay().is_open() {
            InputMode::Overlay
        } else {
            InputMode::Normal
        }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.status = Some("Loading repositories...".to_string());
        self.showcase.begin_load()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: folio_core::Result<Vec<RepositoryRecord>>) {
        if self.showcase.finish_load(ticket, result, &mut self.screen) {
            self.side_cursor = 0;
            self.status = None;
        }
    }

    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.columns = columns;
        self.rows = rows;
        let width = self.width();
        self.showcase.resize(width, &mut self.screen);
        self.side_cursor = 0;
        debug!("Resized to {}x{} ({} units, {} per page)", columns, rows, width, self.showcase.pager().size());
    }

    /// Periodic housekeeping: expire copy flashes, run the intro fade
    pub fn tick(&mut self, now: Instant) {
        self.copy_feedback.tick(now);
        if !self.reveal.is_revealed(ABOUT_SECTION) && now.duration_since(self.started_at) >= INTRO_DELAY {
            self.reveal.reveal(ABOUT_SECTION);
        }
    }

    /// Re-evaluate the collapsed/expanded transition for the current scroll
    pub fn sync_scroll(&mut self) -> Option<Transition> {
        let bottom = f32::from(self.landing.about_end) - f32::from(self.scroll);
        let transition = self
            .transition
            .observe(bottom, f32::from(self.landing.viewport_height));
        if let Some(t) = transition {
            debug!("Scroll transition: {:?}", t);
        }
        transition
    }

    /// Report where a section was drawn so it can fade in
    pub fn section_drawn(&mut self, id: &str, area: Rect, viewport: Rect) {
        let top = f32::from(area.y) - f32::from(viewport.y);
        let fraction = visible_fraction(top, f32::from(area.height), f32::from(viewport.height));
        self.reveal.intersect(id, fraction);
    }

    pub fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.landing.about_end);
        let next = (i32::from(self.scroll) + delta).clamp(0, max.max(0));
        self.scroll = next as u16;
        self.sync_scroll();
    }

    pub fn is_flashing(&self, target: CopyTarget) -> bool {
        self.copy_feedback.is_flashing(target, Instant::now())
    }

    fn copy(&mut self, target: CopyTarget) {
        match self
            .copy_feedback
            .copy(target, &self.config.contact, self.clipboard.as_mut(), Instant::now())
        {
            Ok(true) => self.status = Some("Copied!".to_string()),
            Ok(false) => {}
            Err(e) => {
                warn!("Copy failed: {}", e);
                self.status = Some(format!("Copy failed: {}", e));
            }
        }
    }

    fn press_read_more(&mut self) {
        let compact = self.is_compact();
        if self.read_more.press(compact) == ReadMoreAction::OpenPopup {
            // Slides depend on width, so rebuild them for the current one
            self.about = AboutPopup::new(self.config.about.slides(compact));
            self.about.open();
        } else if !self.read_more.is_expanded() {
            // Collapsing scrolls the about section back into view
            self.scroll = 0;
            self.sync_scroll();
        }
    }

    fn activate_focused(&mut self) {
        match self.focus {
            Focus::Carousel => {
                let index = self.showcase.carousel().index();
                self.showcase.activate(CardSlot::Featured, index, &mut self.screen);
            }
            Focus::SideProjects => {
                if let Some(card) = self.screen.side.get(self.side_cursor) {
                    let position = card.position;
                    self.showcase.activate(CardSlot::Side, position, &mut self.screen);
                }
            }
        }
    }

    fn move_side_cursor(&mut self, forward: bool) {
        let len = self.screen.side.len();
        if len == 0 {
            return;
        }
        self.side_cursor = if forward {
            (self.side_cursor + 1).min(len - 1)
        } else {
            self.side_cursor.saturating_sub(1)
        };
    }

    fn next_side_page(&mut self) {
        self.showcase.next_page(&mut self.screen);
        self.side_cursor = 0;
    }

    fn submit_compose(&mut self) -> Option<Command> {
        let Some(recipient) = self.config.contact.recipient() else {
            self.status = Some("No contact address configured".to_string());
            return None;
        };
        let url = compose_mailto(
            recipient.trim(),
            self.compose.name.trim(),
            self.compose.email.trim(),
            &self.compose.message,
        );
        self.compose = ComposeForm::default();
        self.status = Some("Opening mail client...".to_string());
        Some(Command::Open(url))
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Command> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return Some(Command::Quit);
        }

        match self.input_mode() {
            InputMode::Compose => match key.code {
                KeyCode::Esc => self.compose.open = false,
                KeyCode::Tab => self.compose.field = (self.compose.field + 1) % 3,
                KeyCode::BackTab => self.compose.field = (self.compose.field + 2) % 3,
                // Alt+Enter (or Ctrl+J where the terminal eats Alt) breaks the message line
                KeyCode::Enter if self.compose.field == 2 && key.modifiers.contains(KeyModifiers::ALT) => {
                    self.compose.message.push('\n')
                }
                KeyCode::Char('j') if self.compose.field == 2 && key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.compose.message.push('\n')
                }
                KeyCode::Enter if self.compose.field < 2 => self.compose.field += 1,
                KeyCode::Enter => return self.submit_compose(),
                KeyCode::Backspace => {
                    self.compose.current_mut().pop();
                }
                KeyCode::Char(c) => self.compose.current_mut().push(c),
                _ => {}
            },
            InputMode::About => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => {
                    self.about.close();
                }
                KeyCode::Left | KeyCode::Char('h') => {
                    self.about.prev();
                }
                KeyCode::Right | KeyCode::Char('l') => {
                    self.about.next();
                }
                KeyCode::Char('E') => self.copy(CopyTarget::PopupEmail),
                KeyCode::Char('P') => self.copy(CopyTarget::PopupPhone),
                _ => {}
            },
            InputMode::Overlay => match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => {
                    self.showcase.close_overlay(&mut self.screen);
                }
                KeyCode::Char('o') | KeyCode::Enter => {
                    if let Some(link) = self.screen.overlay.as_ref().and_then(|r| r.link.clone()) {
                        return Some(Command::Open(link));
                    }
                }
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return Some(Command::Quit);
                }
                KeyCode::Char('r') => return Some(Command::Reload),
                KeyCode::Tab => {
                    self.focus = match self.focus {
                        Focus::Carousel => Focus::SideProjects,
                        Focus::SideProjects => Focus::Carousel,
                    };
                }
                KeyCode::Left | KeyCode::Right => {
                    let forward = key.code == KeyCode::Right;
                    match self.focus {
                        Focus::Carousel => {
                            let arrow = if forward { ArrowKey::Right } else { ArrowKey::Left };
                            self.showcase.carousel_mut().key(arrow, true);
                        }
                        Focus::SideProjects => self.move_side_cursor(forward),
                    }
                }
                KeyCode::Char('[') => self.showcase.carousel_mut().prev(),
                KeyCode::Char(']') => self.showcase.carousel_mut().next(),
                KeyCode::Char('n') => self.next_side_page(),
                KeyCode::Enter => self.activate_focused(),
                KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
                KeyCode::PageDown => self.scroll_by(i32::from(self.rows / 2).max(1)),
                KeyCode::PageUp => self.scroll_by(-(i32::from(self.rows / 2).max(1))),
                KeyCode::Char('a') => self.press_read_more(),
                KeyCode::Char('y') => self.copy(CopyTarget::ProfileName),
                KeyCode::Char('e') => self.copy(CopyTarget::ContactEmail),
                KeyCode::Char('p') => self.copy(CopyTarget::ContactPhone),
                KeyCode::Char('N') => self.copy(CopyTarget::ContactName),
                KeyCode::Char('c') => {
                    self.compose.open = true;
                    self.compose.field = 0;
                }
                _ => {}
            },
        }
        None
    }

    fn hit_at(&self, column: u16, row: u16) -> Option<Hit> {
        let position = Position::new(column, row);
        self.hitboxes
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, hit)| *hit)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<Command> {
        match mouse.kind {
            MouseEventKind::ScrollDown if self.input_mode() == InputMode::Normal => self.scroll_by(1),
            MouseEventKind::ScrollUp if self.input_mode() == InputMode::Normal => self.scroll_by(-1),
            MouseEventKind::Down(MouseButton::Left) => {
                self.drag_start = Some((mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.drag_start.take();
                if let Some((start_col, start_row)) = start {
                    if self.input_mode() == InputMode::Normal
                        && self.hit_at(start_col, start_row).is_some_and(|hit| {
                            matches!(hit, Hit::Carousel | Hit::Card(CardSlot::Featured, _))
                        })
                    {
                        let cell = self.config.layout.cell_width;
                        let swiped = self.showcase.carousel_mut().swipe(
                            f32::from(start_col) * cell,
                            f32::from(mouse.column) * cell,
                            self.config.layout.swipe_threshold,
                        );
                        if swiped {
                            return None;
                        }
                    }
                }
                return self.click(mouse.column, mouse.row);
            }
            _ => {}
        }
        None
    }

    fn click(&mut self, column: u16, row: u16) -> Option<Command> {
        let hit = self.hit_at(column, row);

        match self.input_mode() {
            InputMode::Compose => {}
            InputMode::Overlay => match hit {
                Some(Hit::OverlayClose) => self.showcase.close_overlay(&mut self.screen),
                Some(Hit::OverlayLink) => {
                    return self.screen.overlay.as_ref().and_then(|r| r.link.clone()).map(Command::Open);
                }
                Some(Hit::OverlayContent) => {
                    self.showcase.overlay_pointer(PointerTarget::Content, &mut self.screen)
                }
                _ => self
                    .showcase
                    .overlay_pointer(PointerTarget::Background, &mut self.screen),
            },
            InputMode::About => match hit {
                Some(Hit::AboutClose) => {
                    self.about.close();
                }
                Some(Hit::AboutPrev) => {
                    self.about.prev();
                }
                Some(Hit::AboutNext) => {
                    self.about.next();
                }
                Some(Hit::Copy(target)) => self.copy(target),
                Some(Hit::AboutContent) => {}
                _ => {
                    self.about.close();
                }
            },
            InputMode::Normal => match hit {
                Some(Hit::Card(slot, position)) => {
                    self.showcase.activate(slot, position, &mut self.screen);
                }
                Some(Hit::CarouselPrev) => self.showcase.carousel_mut().prev(),
                Some(Hit::CarouselNext) => self.showcase.carousel_mut().next(),
                Some(Hit::SideNext) => self.next_side_page(),
                Some(Hit::ReadMore) => self.press_read_more(),
                Some(Hit::Copy(target)) => self.copy(target),
                _ => {}
            },
        }
        None
    }
}
