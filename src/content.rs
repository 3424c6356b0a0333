//! Opaque content providers.
//!
//! The manager never knows what a pane shows. It looks the provider up by
//! tag, asks for size hints when opening, and hands the body an area to
//! draw into. An unregistered tag resolves to a visible fallback rather
//! than a crash.

use std::collections::BTreeMap;
use std::fmt;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

/// Tag selecting which external provider renders a pane's body.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContentKind(String);

impl ContentKind {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContentKind {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Optional geometry hints a provider may supply for new panes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeHints {
    pub default_size: Option<(u16, u16)>,
    pub min_size: Option<(u16, u16)>,
    pub max_size: Option<(u16, u16)>,
}

/// External collaborator supplying a pane's rendered body.
pub trait ContentProvider {
    /// Human-readable label used for fresh pane titles and dock launchers.
    fn label(&self) -> &str;

    fn render_body(&mut self, frame: &mut Frame, area: Rect, focused: bool);

    /// Single-glyph dock icon. Defaults to the first character of the label.
    fn icon(&self) -> Option<&str> {
        None
    }

    fn size_hints(&self) -> SizeHints {
        SizeHints::default()
    }
}

/// Registry of providers keyed by content kind.
///
/// Lookups are total: a missing provider degrades to a placeholder body so
/// a stale workspace entry still renders something actionable.
#[derive(Default)]
pub struct ContentRegistry {
    providers: BTreeMap<ContentKind, Box<dyn ContentProvider>>,
}

impl ContentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: ContentKind, provider: Box<dyn ContentProvider>) {
        tracing::debug!(kind = %kind, "registered content provider");
        self.providers.insert(kind, provider);
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ContentKind> {
        self.providers.keys()
    }

    pub fn is_registered(&self, kind: &ContentKind) -> bool {
        self.providers.contains_key(kind)
    }

    pub fn label(&self, kind: &ContentKind) -> String {
        match self.providers.get(kind) {
            Some(provider) => provider.label().to_string(),
            None => kind.to_string(),
        }
    }

    pub fn icon(&self, kind: &ContentKind) -> String {
        if let Some(provider) = self.providers.get(kind) {
            if let Some(icon) = provider.icon() {
                return icon.to_string();
            }
            if let Some(first) = provider.label().chars().next() {
                return first.to_uppercase().to_string();
            }
        }
        "?".to_string()
    }

    pub fn size_hints(&self, kind: &ContentKind) -> SizeHints {
        self.providers
            .get(kind)
            .map(|provider| provider.size_hints())
            .unwrap_or_default()
    }

    /// Render the body for `kind`, falling back to a placeholder when no
    /// provider is registered.
    pub fn render_body(&mut self, kind: &ContentKind, frame: &mut Frame, area: Rect, focused: bool) {
        match self.providers.get_mut(kind) {
            Some(provider) => provider.render_body(frame, area, focused),
            None => render_fallback(kind, frame, area),
        }
    }
}

fn render_fallback(kind: &ContentKind, frame: &mut Frame, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let lines = vec![
        Line::from(Span::styled(
            "unknown content type",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("no provider registered for \"{kind}\"")),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}
