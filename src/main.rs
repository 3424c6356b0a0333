use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use crossbeam_channel::Receiver;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use indoc::indoc;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use ratatui::{Frame, Terminal};

use pane_wm::animate::AnimationCoordinator;
use pane_wm::chrome::{self, HeaderAction};
use pane_wm::config::WmConfig;
use pane_wm::content::{ContentKind, ContentProvider, ContentRegistry, SizeHints};
use pane_wm::dock::{Dock, DockEntry};
use pane_wm::geometry::{SurfacePoint, SurfaceRect};
use pane_wm::gesture::drag::DragController;
use pane_wm::gesture::resize::ResizeController;
use pane_wm::gesture::snap::{SnapEngine, SnapPreview};
use pane_wm::registry::WindowRegistry;
use pane_wm::surface::SurfaceMetrics;
use pane_wm::theme;

const TOP_BAR_ROWS: u16 = 1;
const DOCK_ROWS: u16 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "pane-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Floating-pane workspace demo: drag titles, resize borders, snap to edges"
)]
struct Cli {
    /// Frame interval in milliseconds.
    #[arg(long = "tick", value_name = "MS", default_value_t = 16)]
    tick_ms: u64,

    /// Skip minimize/restore transitions and flip state immediately.
    #[arg(long = "no-animate")]
    no_animate: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    pane_wm::tracing_sub::init_default();

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli.no_animate);
    let result = run(&mut terminal, &mut app, Duration::from_millis(cli.tick_ms));

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result
}

/// Terminal-backed surface metrics, read live on every query so a host
/// resize is reflected in the very next gesture sample.
struct TermSurface;

impl SurfaceMetrics for TermSurface {
    fn viewport_width(&self) -> u16 {
        terminal::size().map(|(w, _)| w).unwrap_or(80)
    }

    fn viewport_height(&self) -> u16 {
        terminal::size().map(|(_, h)| h).unwrap_or(24)
    }

    fn top_bar_height(&self) -> u16 {
        TOP_BAR_ROWS
    }

    fn dock_height(&self) -> u16 {
        DOCK_ROWS
    }
}

struct PlaceholderPane {
    label: &'static str,
    icon: &'static str,
    blurb: &'static str,
}

impl ContentProvider for PlaceholderPane {
    fn label(&self) -> &str {
        self.label
    }

    fn icon(&self) -> Option<&str> {
        Some(self.icon)
    }

    fn size_hints(&self) -> SizeHints {
        SizeHints {
            default_size: Some((46, 14)),
            ..SizeHints::default()
        }
    }

    fn render_body(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let style = if focused {
            Style::default()
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        let lines = vec![
            Line::from(Span::styled(self.blurb, style)),
            Line::from(""),
            Line::from(Span::styled(
                "(content is provided externally; this is a placeholder)",
                Style::default().add_modifier(Modifier::DIM),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

struct App {
    config: WmConfig,
    registry: WindowRegistry,
    content: ContentRegistry,
    drag: DragController,
    resize: ResizeController,
    snap: SnapEngine,
    coordinator: AnimationCoordinator,
    dock: Dock,
    surface: TermSurface,
    preview_rx: Receiver<Option<SnapPreview>>,
    snap_overlay: Option<SnapPreview>,
    drag_preview: Option<SurfaceRect>,
    resize_preview: Option<SurfaceRect>,
    last_pointer: Option<SurfacePoint>,
    animate: bool,
    help_visible: bool,
}

impl App {
    fn new(no_animate: bool) -> Self {
        // terminal cells are coarse; scale the gesture tunables down from
        // the content-unit defaults
        let config = WmConfig {
            min_width: 16,
            min_height: 5,
            snap_side_thickness: 2,
            snap_top_thickness: 1,
            ..WmConfig::default()
        };
        config.validate().expect("demo config is valid");

        let mut content = ContentRegistry::new();
        content.register(
            ContentKind::new("shell"),
            Box::new(PlaceholderPane {
                label: "Shell",
                icon: "$",
                blurb: "Remote shell session",
            }),
        );
        content.register(
            ContentKind::new("editor"),
            Box::new(PlaceholderPane {
                label: "Editor",
                icon: "E",
                blurb: "Code editor",
            }),
        );
        content.register(
            ContentKind::new("assistant"),
            Box::new(PlaceholderPane {
                label: "Assistant",
                icon: "A",
                blurb: "AI assistant chat",
            }),
        );

        let registry = WindowRegistry::new(config.z_max);
        let coordinator = AnimationCoordinator::new(&config);
        let mut snap = SnapEngine::new(config.clone());
        let preview_rx = snap.subscribe();

        Self {
            registry,
            content,
            drag: DragController::new(),
            resize: ResizeController::new(),
            snap,
            coordinator,
            dock: Dock::new(),
            surface: TermSurface,
            preview_rx,
            snap_overlay: None,
            drag_preview: None,
            resize_preview: None,
            last_pointer: None,
            animate: !no_animate,
            help_visible: false,
            config,
        }
    }

    fn to_surface(&self, column: u16, row: u16) -> SurfacePoint {
        SurfacePoint::new(column as i32, row as i32 - self.surface.top_bar_height() as i32)
    }

    /// Map a surface rect back into terminal cells, clipped to the frame.
    fn to_screen(&self, rect: SurfaceRect, frame_area: Rect) -> Option<Rect> {
        let top = self.surface.top_bar_height() as i32;
        let x0 = rect.x.max(0);
        let y0 = (rect.y + top).max(0);
        let x1 = rect.right().min(frame_area.width as i32);
        let y1 = (rect.bottom() + top).min(frame_area.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }

    fn anchor_for(&self, id: pane_wm::registry::WindowId) -> Option<SurfaceRect> {
        if !self.animate {
            return None;
        }
        self.dock
            .anchor_for_window(&self.registry, &self.content, &self.surface, id)
    }

    fn handle_mouse(&mut self, mouse: crossterm::event::MouseEvent, now: Instant) {
        let point = self.to_surface(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if point.y < 0 {
                    return;
                }
                if self.surface.dock_strip().contains(point) {
                    self.handle_dock_click(point, now);
                    return;
                }
                let Some(id) = self.registry.window_at(point) else {
                    return;
                };
                let rect = match self.registry.get(id) {
                    Some(window) => window.rect,
                    None => return,
                };
                match chrome::header_hit(rect, point) {
                    Some(HeaderAction::Minimize) => {
                        let anchor = self.anchor_for(id);
                        self.coordinator
                            .begin_minimize(&mut self.registry, id, anchor, now);
                    }
                    Some(HeaderAction::Maximize) => {
                        if self.registry.get(id).is_some_and(|window| window.maximized) {
                            self.registry.restore(id);
                        } else {
                            let workspace = self.surface.workspace();
                            self.registry.maximize(id, workspace);
                        }
                        self.registry.focus(id);
                    }
                    Some(HeaderAction::Close) => {
                        self.coordinator.cancel(&mut self.registry, id);
                        self.registry.close(id);
                    }
                    Some(HeaderAction::Drag) => {
                        self.drag.begin(&mut self.registry, id, point);
                        self.last_pointer = Some(point);
                    }
                    None => {
                        if let Some(edge) = chrome::resize_edge_at(rect, point) {
                            self.resize.begin(&mut self.registry, id, edge, point);
                        } else {
                            self.registry.focus(id);
                        }
                    }
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.resize.is_active() {
                    self.resize.sample(point);
                } else if self.drag.is_active() {
                    self.drag.sample(point);
                    self.last_pointer = Some(point);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let workspace = self.surface.workspace();
                if self.resize.is_active() {
                    self.resize
                        .release(&mut self.registry, &self.config, workspace, point);
                    self.resize_preview = None;
                } else if self.drag.is_active() {
                    if let Some(end) = self.drag.release(&mut self.registry, point) {
                        self.snap
                            .release(&mut self.registry, end.id, point, workspace, now);
                    }
                    self.drag_preview = None;
                    self.last_pointer = None;
                    self.snap_overlay = None;
                }
            }
            _ => {}
        }
    }

    fn handle_dock_click(&mut self, point: SurfacePoint, now: Instant) {
        let slots = self
            .dock
            .slots(&self.registry, &self.content, &self.surface);
        let Some(slot) = Dock::slot_at(&slots, point) else {
            return;
        };
        match slot.entry.clone() {
            DockEntry::Launcher(kind) => {
                self.dock.activate(
                    &mut self.registry,
                    &mut self.coordinator,
                    &self.content,
                    &self.surface,
                    &kind,
                    now,
                );
            }
            DockEntry::Minimized(id) => {
                self.dock.restore(
                    &mut self.registry,
                    &mut self.coordinator,
                    &self.content,
                    &self.surface,
                    id,
                    now,
                );
            }
        }
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                // abandon the live gesture without committing anything
                if self.drag.is_active() || self.resize.is_active() {
                    self.drag.cancel();
                    self.resize.cancel();
                    self.snap.reset();
                    self.drag_preview = None;
                    self.resize_preview = None;
                    self.last_pointer = None;
                    self.snap_overlay = None;
                }
            }
            KeyCode::Char('?') | KeyCode::Char('h') => {
                self.help_visible = !self.help_visible;
            }
            KeyCode::Char(c @ ('1' | '2' | '3')) => {
                let kinds = ["shell", "editor", "assistant"];
                let kind = ContentKind::new(kinds[c as usize - '1' as usize]);
                self.dock.activate(
                    &mut self.registry,
                    &mut self.coordinator,
                    &self.content,
                    &self.surface,
                    &kind,
                    now,
                );
            }
            KeyCode::Char('m') => {
                if let Some(id) = self.registry.active()
                    && self.registry.get(id).is_some()
                {
                    let anchor = self.anchor_for(id);
                    self.coordinator
                        .begin_minimize(&mut self.registry, id, anchor, now);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = self.registry.active()
                    && let Some(window) = self.registry.get(id)
                {
                    if window.maximized {
                        self.registry.restore(id);
                    } else {
                        let workspace = self.surface.workspace();
                        self.registry.maximize(id, workspace);
                    }
                }
            }
            _ => {}
        }
        false
    }

    /// Per-frame work: drain coalesced samples, advance the snap debounce,
    /// collect transition frames, and pick up snap-overlay signals.
    fn frame(&mut self, now: Instant) {
        self.drag_preview = self.drag.frame(&mut self.registry);
        let workspace = self.surface.workspace();
        self.resize_preview = self.resize.frame(&self.config, workspace);
        if self.drag.is_active()
            && let Some(pointer) = self.last_pointer
        {
            self.snap.update(pointer, workspace, now);
        }
        while let Ok(signal) = self.preview_rx.try_recv() {
            self.snap_overlay = signal;
        }
    }

    fn render(&mut self, frame: &mut Frame, now: Instant) {
        let area = frame.area();
        self.render_top_bar(frame, area);

        let transition_frames = self.coordinator.tick(&mut self.registry, now);

        for id in self.registry.draw_order() {
            if self.registry.is_animating(id) {
                continue;
            }
            let Some(window) = self.registry.get(id) else {
                continue;
            };
            let focused = window.focused;
            let title = window.title.clone();
            let kind = window.kind.clone();
            let mut rect = window.rect;
            if self.drag.active_window() == Some(id)
                && let Some(preview) = self.drag_preview
            {
                rect = preview;
            }
            if self.resize.active_window() == Some(id)
                && let Some(preview) = self.resize_preview
            {
                rect = preview;
            }
            self.render_window(frame, area, rect, &title, &kind, focused);
        }

        // panes mid-transition draw on top, chrome only
        for transition in &transition_frames {
            if let Some(screen) = self.to_screen(transition.rect, area) {
                frame.render_widget(Clear, screen);
                let block = Block::bordered()
                    .border_type(BorderType::Plain)
                    .border_style(Style::default().fg(theme::border()));
                frame.render_widget(block, screen);
            }
        }

        if let Some(preview) = self.snap_overlay
            && let Some(screen) = self.to_screen(preview.rect, area)
        {
            let overlay = Block::default().style(Style::default().bg(theme::snap_preview_bg()));
            frame.render_widget(overlay, screen);
        }

        self.render_dock(frame, area);

        if self.help_visible {
            self.render_help(frame, area);
        }
    }

    fn render_top_bar(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let bar = Rect {
            height: TOP_BAR_ROWS.min(area.height),
            ..area
        };
        let text = " pane-wm    1/2/3: launch   m: minimize   x: maximize   h: help   q: quit";
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().bg(theme::top_bar_bg()).fg(theme::top_bar_fg())),
            bar,
        );
    }

    fn render_window(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        rect: SurfaceRect,
        title: &str,
        kind: &ContentKind,
        focused: bool,
    ) {
        let Some(screen) = self.to_screen(rect, area) else {
            return;
        };
        if screen.width < 3 || screen.height < 3 {
            return;
        }
        frame.render_widget(Clear, screen);
        let block = Block::bordered()
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(if focused {
                theme::accent()
            } else {
                theme::border()
            }));
        let inner = block.inner(screen);
        frame.render_widget(block, screen);

        // header row: title left, buttons right
        let header = Rect {
            height: 1,
            ..inner
        };
        let header_style = Style::default()
            .bg(theme::header_bg(focused))
            .fg(theme::header_fg());
        let buttons = "_ □ ×";
        let pad = (header.width as usize)
            .saturating_sub(title.chars().count())
            .saturating_sub(buttons.chars().count());
        let text = format!("{title}{}{buttons}", " ".repeat(pad));
        frame.render_widget(Paragraph::new(text).style(header_style), header);

        let body = Rect {
            y: inner.y + 1,
            height: inner.height.saturating_sub(1),
            ..inner
        };
        if body.height > 0 {
            self.content.render_body(kind, frame, body, focused);
        }
    }

    fn render_dock(&self, frame: &mut Frame, area: Rect) {
        let slots = self
            .dock
            .slots(&self.registry, &self.content, &self.surface);
        let strip = self.surface.dock_strip();
        if let Some(screen) = self.to_screen(strip, area) {
            frame.render_widget(
                Block::default().style(Style::default().bg(theme::dock_bg())),
                screen,
            );
        }
        for slot in &slots {
            let Some(screen) = self.to_screen(slot.rect, area) else {
                continue;
            };
            let (label, style) = match &slot.entry {
                DockEntry::Launcher(kind) => (
                    format!("{} {}", self.content.icon(kind), self.content.label(kind)),
                    Style::default().bg(theme::dock_bg()).fg(theme::dock_fg()),
                ),
                DockEntry::Minimized(id) => {
                    let title = self
                        .registry
                        .get(*id)
                        .map(|window| window.title.clone())
                        .unwrap_or_default();
                    (
                        format!("▾ {title}"),
                        Style::default()
                            .bg(theme::dock_bg())
                            .fg(theme::dock_minimized_fg()),
                    )
                }
            };
            frame.render_widget(Paragraph::new(label).style(style), screen);
        }
    }

    fn render_help(&self, frame: &mut Frame, area: Rect) {
        let text = indoc! {"
            pane-wm demo

            mouse
              drag a title bar        move a pane
              drag a border or corner resize
              drag to an edge         snap (left/right half, top maximizes)
              header buttons          _ minimize   □ maximize   × close
              dock icons              launch / restore panes

            keys
              1 / 2 / 3   launch shell / editor / assistant
              m           minimize the focused pane
              x           toggle maximize
              h or ?      toggle this help
              q           quit
        "};
        let width = 50u16.min(area.width);
        let height = 18u16.min(area.height);
        let popup = Rect {
            x: (area.width - width) / 2,
            y: (area.height - height) / 2,
            width,
            height,
        };
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text).block(Block::bordered().title(" help ")),
            popup,
        );
    }
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    tick: Duration,
) -> io::Result<()>
where
    io::Error: From<<B as ratatui::backend::Backend>::Error>,
{
    // start with one shell pane so the workspace is not empty
    app.dock.activate(
        &mut app.registry,
        &mut app.coordinator,
        &app.content,
        &app.surface,
        &ContentKind::new("shell"),
        Instant::now(),
    );

    let mut last_frame = Instant::now();
    loop {
        let timeout = tick.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) => {
                    if app.handle_key(key, now) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                Event::Resize(_, _) => {
                    // surface metrics are read live; nothing to invalidate
                }
                _ => {}
            }
        }
        if last_frame.elapsed() >= tick {
            let now = Instant::now();
            app.frame(now);
            terminal.draw(|frame| app.render(frame, now))?;
            last_frame = Instant::now();
        }
    }
}
