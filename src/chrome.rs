//! Window chrome geometry and hit-testing.
//!
//! Pure helpers shared by the interactive harness: where the title region
//! sits, which header button a point lands on, and which resize edge a
//! border point maps to. Controllers never hit-test themselves; callers
//! decide what a pointer-down means and then drive the right controller.

use crate::geometry::{SurfacePoint, SurfaceRect};
use crate::gesture::resize::ResizeEdge;

/// Height of the title region, in content units.
pub const HEADER_HEIGHT: u16 = 1;

/// Width of one header button cell, right-aligned in the title region.
const BUTTON_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    Drag,
    Minimize,
    Maximize,
    Close,
}

/// The draggable title region: the row below the top border, excluding the
/// corner cells that belong to the resize handles.
pub fn header_region(rect: SurfaceRect) -> SurfaceRect {
    if rect.width < 3 || rect.height < 2 {
        return SurfaceRect::default();
    }
    SurfaceRect::new(rect.x + 1, rect.y + 1, rect.width - 2, HEADER_HEIGHT)
}

/// Bounds of the three header buttons, left-to-right: minimize, maximize,
/// close. Empty when the pane is too narrow to show them.
pub fn header_buttons(rect: SurfaceRect) -> Vec<(HeaderAction, SurfaceRect)> {
    let header = header_region(rect);
    if header.width < BUTTON_WIDTH * 3 + 4 {
        return Vec::new();
    }
    let actions = [
        HeaderAction::Minimize,
        HeaderAction::Maximize,
        HeaderAction::Close,
    ];
    actions
        .iter()
        .enumerate()
        .map(|(idx, &action)| {
            let offset = (actions.len() - idx) as i32 * BUTTON_WIDTH as i32;
            (
                action,
                SurfaceRect::new(header.right() - offset, header.y, BUTTON_WIDTH, header.height),
            )
        })
        .collect()
}

/// What a pointer-down in the title region means.
pub fn header_hit(rect: SurfaceRect, point: SurfacePoint) -> Option<HeaderAction> {
    let header = header_region(rect);
    if !header.contains(point) {
        return None;
    }
    for (action, bounds) in header_buttons(rect) {
        if bounds.contains(point) {
            return Some(action);
        }
    }
    Some(HeaderAction::Drag)
}

/// Which resize edge a point on the pane border maps to, if any. Corner
/// cells win over the edges they join.
pub fn resize_edge_at(rect: SurfaceRect, point: SurfacePoint) -> Option<ResizeEdge> {
    if rect.width == 0 || rect.height == 0 || !rect.contains(point) {
        return None;
    }
    let left = point.x == rect.x;
    let right = point.x == rect.right() - 1;
    let top = point.y == rect.y;
    let bottom = point.y == rect.bottom() - 1;
    match (left, right, top, bottom) {
        (true, _, true, _) => Some(ResizeEdge::TopLeft),
        (_, true, true, _) => Some(ResizeEdge::TopRight),
        (true, _, _, true) => Some(ResizeEdge::BottomLeft),
        (_, true, _, true) => Some(ResizeEdge::BottomRight),
        (true, _, _, _) => Some(ResizeEdge::Left),
        (_, true, _, _) => Some(ResizeEdge::Right),
        (_, _, true, _) => Some(ResizeEdge::Top),
        (_, _, _, true) => Some(ResizeEdge::Bottom),
        _ => None,
    }
}
