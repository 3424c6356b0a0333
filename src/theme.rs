use ratatui::style::Color;

// Centralized chrome colors for the interactive harness.

pub fn accent() -> Color {
    Color::Rgb(200, 100, 0)
}

pub fn header_bg(focused: bool) -> Color {
    if focused { Color::Blue } else { Color::DarkGray }
}

pub fn header_fg() -> Color {
    Color::White
}

pub fn border() -> Color {
    Color::DarkGray
}

pub fn top_bar_bg() -> Color {
    Color::DarkGray
}

pub fn top_bar_fg() -> Color {
    Color::Black
}

pub fn dock_bg() -> Color {
    Color::DarkGray
}

pub fn dock_fg() -> Color {
    Color::White
}

pub fn dock_minimized_fg() -> Color {
    Color::Gray
}

pub fn snap_preview_bg() -> Color {
    accent()
}
