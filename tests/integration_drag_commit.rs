use pane_wm::content::ContentKind;
use pane_wm::geometry::{SurfacePoint, SurfaceRect};
use pane_wm::gesture::drag::DragController;
use pane_wm::registry::{OpenRequest, WindowId, WindowRegistry};

fn open_at(registry: &mut WindowRegistry, rect: SurfaceRect) -> WindowId {
    registry.open(OpenRequest {
        kind: ContentKind::new("shell"),
        title: "Shell".into(),
        rect,
    })
}

#[test]
fn title_drag_commits_exactly_the_pointer_offset() {
    // open at {50, 50, 400x300}, drag the title bar by (100, 0)
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let id = open_at(&mut registry, SurfaceRect::new(50, 50, 400, 300));
    let mut drag = DragController::new();

    assert!(drag.begin(&mut registry, id, SurfacePoint::new(120, 51)));
    drag.sample(SurfacePoint::new(170, 51));
    drag.frame(&mut registry);
    drag.sample(SurfacePoint::new(220, 51));
    drag.frame(&mut registry);
    drag.release(&mut registry, SurfacePoint::new(220, 51));

    let window = registry.get(id).unwrap();
    assert_eq!(window.rect, SurfaceRect::new(150, 50, 400, 300));
}

#[test]
fn intermediate_samples_are_never_committed() {
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let id = open_at(&mut registry, SurfaceRect::new(50, 50, 400, 300));
    let mut drag = DragController::new();

    drag.begin(&mut registry, id, SurfacePoint::new(120, 51));
    for step in 1..100 {
        drag.sample(SurfacePoint::new(120 + step, 51 + step));
        drag.frame(&mut registry);
        assert_eq!(
            registry.get(id).unwrap().rect,
            SurfaceRect::new(50, 50, 400, 300),
            "geometry must not change before release"
        );
    }
    drag.cancel();
    assert_eq!(registry.get(id).unwrap().rect, SurfaceRect::new(50, 50, 400, 300));
}

#[test]
fn commit_clamps_to_the_surface_origin() {
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let id = open_at(&mut registry, SurfaceRect::new(50, 50, 400, 300));
    let mut drag = DragController::new();

    drag.begin(&mut registry, id, SurfacePoint::new(120, 51));
    drag.release(&mut registry, SurfacePoint::new(-500, -500));
    let rect = registry.get(id).unwrap().rect;
    assert_eq!((rect.x, rect.y), (0, 0));
    assert_eq!((rect.width, rect.height), (400, 300));
}

#[test]
fn zero_delta_drag_leaves_geometry_bit_identical() {
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let id = open_at(&mut registry, SurfaceRect::new(333, 77, 512, 384));
    let before = registry.get(id).unwrap().rect;
    let mut drag = DragController::new();

    drag.begin(&mut registry, id, SurfacePoint::new(400, 78));
    drag.release(&mut registry, SurfacePoint::new(400, 78));
    assert_eq!(registry.get(id).unwrap().rect, before);
}

#[test]
fn drag_survives_the_pointer_leaving_the_window() {
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let id = open_at(&mut registry, SurfaceRect::new(50, 50, 100, 80));
    let mut drag = DragController::new();

    drag.begin(&mut registry, id, SurfacePoint::new(60, 51));
    // pointer is far outside the pane now; the gesture must keep tracking
    drag.sample(SurfacePoint::new(800, 500));
    drag.frame(&mut registry);
    assert!(drag.is_active());
    drag.release(&mut registry, SurfacePoint::new(810, 510));
    let rect = registry.get(id).unwrap().rect;
    assert_eq!((rect.x, rect.y), (50 + 750, 50 + 459));
}
