use pane_wm::content::ContentKind;
use pane_wm::geometry::SurfaceRect;
use pane_wm::registry::{OpenRequest, WindowRegistry};

fn request(kind: &str, x: i32) -> OpenRequest {
    OpenRequest {
        kind: ContentKind::new(kind),
        title: kind.to_string(),
        rect: SurfaceRect::new(x, 40, 400, 300),
    }
}

#[test]
fn z_order_is_unique_and_focus_holds_the_maximum() {
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let ids: Vec<_> = (0..6)
        .map(|i| registry.open(request("shell", i * 30)))
        .collect();

    // an arbitrary interleaving of focus calls
    for &id in &[ids[2], ids[0], ids[5], ids[0], ids[3]] {
        registry.focus(id);

        let mut ranks: Vec<u32> = registry.windows().iter().map(|window| window.z).collect();
        ranks.sort_unstable();
        ranks.dedup();
        assert_eq!(ranks.len(), registry.len(), "z ranks must stay unique");

        let focused_z = registry.get(id).unwrap().z;
        let max_z = registry.windows().iter().map(|window| window.z).max().unwrap();
        assert_eq!(focused_z, max_z, "most recent focus must hold the maximum");
        assert_eq!(registry.draw_order().last(), Some(&id));
    }
}

#[test]
fn z_ceiling_saturates_instead_of_wrapping() {
    let mut registry = WindowRegistry::new(5);
    let a = registry.open(request("shell", 0));
    let b = registry.open(request("editor", 30));
    for _ in 0..50 {
        registry.focus(a);
        registry.focus(b);
        assert!(registry.get(a).unwrap().z <= 5);
        assert!(registry.get(b).unwrap().z <= 5);
    }
    assert_eq!(registry.get(a).unwrap().z, 5);
    assert_eq!(registry.get(b).unwrap().z, 5);
    // opening at the ceiling still succeeds and stays at the ceiling
    let c = registry.open(request("assistant", 60));
    assert_eq!(registry.get(c).unwrap().z, 5);
}

#[test]
fn focus_on_an_empty_registry_records_intent_without_windows() {
    // scenario: focus a not-yet-rendered id on an empty registry
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let ghost = {
        let mut seed = WindowRegistry::new(u32::MAX - 1);
        seed.open(request("shell", 0))
    };
    registry.focus(ghost);
    assert_eq!(registry.active(), Some(ghost));
    assert_eq!(registry.len(), 0);
}

#[test]
fn minimize_and_close_drop_the_active_pointer_to_none() {
    let mut registry = WindowRegistry::new(u32::MAX - 1);
    let a = registry.open(request("shell", 0));
    let b = registry.open(request("editor", 30));

    registry.minimize(b);
    assert_eq!(registry.active(), None, "minimize must not reassign focus");

    registry.focus(a);
    registry.close(a);
    assert_eq!(registry.active(), None, "close must not reassign focus");
    assert_eq!(registry.len(), 1);
}
