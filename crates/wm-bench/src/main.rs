//! Gesture-throughput benchmark.
//!
//! Floods the drag and resize controllers with synthetic pointer streams
//! at a configurable sample rate, pacing applications to a target frame
//! rate, and reports how much work per-frame coalescing saved.

use std::time::{Duration, Instant};

use clap::Parser;

use pane_wm::config::WmConfig;
use pane_wm::content::ContentKind;
use pane_wm::geometry::{SurfacePoint, SurfaceRect};
use pane_wm::gesture::drag::DragController;
use pane_wm::gesture::resize::{ResizeController, ResizeEdge};
use pane_wm::gesture::snap::SnapEngine;
use pane_wm::registry::{OpenRequest, WindowRegistry};
use pane_wm::surface::{FixedSurface, SurfaceMetrics};

#[derive(Parser, Debug)]
#[command(
    name = "wm-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Synthetic pointer-storm benchmark for the pane window manager"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 5.0
    )]
    duration_seconds: f64,

    /// Pointer samples delivered per frame (simulating a fast input device).
    #[arg(short = 's', long = "samples", value_name = "N", default_value_t = 32)]
    samples_per_frame: u32,

    /// Target frames per second for the application pacing.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    target_fps: f64,
}

impl BenchCli {
    fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.duration_seconds)
    }

    fn frame_budget(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }
}

struct Totals {
    frames: u64,
    samples: u64,
    drag_commits: u64,
    resize_commits: u64,
    snap_commits: u64,
}

fn main() {
    let cli = BenchCli::parse();
    let config = WmConfig::default();
    let surface = FixedSurface::with_reservations(1920, 1080, 24, 40);
    let workspace = surface.workspace();

    let mut registry = WindowRegistry::new(config.z_max);
    let id = registry.open(OpenRequest {
        kind: ContentKind::new("bench"),
        title: "Bench".into(),
        rect: SurfaceRect::new(200, 200, 640, 480),
    });

    let mut drag = DragController::new();
    let mut resize = ResizeController::new();
    let mut snap = SnapEngine::new(config.clone());

    let mut totals = Totals {
        frames: 0,
        samples: 0,
        drag_commits: 0,
        resize_commits: 0,
        snap_commits: 0,
    };

    let started = Instant::now();
    let deadline = started + cli.duration();
    let mut phase: u64 = 0;

    while Instant::now() < deadline {
        let frame_start = Instant::now();
        let now = frame_start;
        phase += 1;

        // alternate between a drag storm and a resize storm
        if phase % 2 == 1 {
            drag.begin(&mut registry, id, SurfacePoint::new(400, 210));
            for step in 0..cli.samples_per_frame {
                let x = 400 + ((phase as i32 * 7 + step as i32 * 3) % 800);
                drag.sample(SurfacePoint::new(x, 210 + (step as i32 % 60)));
                totals.samples += 1;
            }
            drag.frame(&mut registry);
            let release = SurfacePoint::new(400 + (phase as i32 % 800), 240);
            if let Some(end) = drag.release(&mut registry, release) {
                totals.drag_commits += 1;
                if snap.release(&mut registry, end.id, release, workspace, now) {
                    totals.snap_commits += 1;
                    registry.restore(end.id);
                    registry.resize(id, 640, 480);
                    registry.move_to(id, 200, 200);
                }
            }
        } else {
            resize.begin(&mut registry, id, ResizeEdge::BottomRight, SurfacePoint::new(840, 680));
            for step in 0..cli.samples_per_frame {
                let dx = (phase as i32 * 5 + step as i32) % 300;
                resize.sample(SurfacePoint::new(840 + dx, 680 + dx / 2));
                totals.samples += 1;
            }
            resize.frame(&config, workspace);
            if resize
                .release(&mut registry, &config, workspace, SurfacePoint::new(900, 700))
                .is_some()
            {
                totals.resize_commits += 1;
                registry.resize(id, 640, 480);
                registry.move_to(id, 200, 200);
            }
        }
        totals.frames += 1;

        let elapsed = frame_start.elapsed();
        if elapsed < cli.frame_budget() {
            std::thread::sleep(cli.frame_budget() - elapsed);
        }
    }

    let wall = started.elapsed();
    let applied = totals.frames; // one coalesced application per frame
    println!("ran            {:.2}s", wall.as_secs_f64());
    println!("frames         {}", totals.frames);
    println!("samples fed    {}", totals.samples);
    println!("samples applied {applied} (coalesced {:.1}x)", {
        if applied == 0 {
            0.0
        } else {
            totals.samples as f64 / applied as f64
        }
    });
    println!("drag commits   {}", totals.drag_commits);
    println!("resize commits {}", totals.resize_commits);
    println!("snap commits   {}", totals.snap_commits);
}
