// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated slide presentation that exercises ordering, hit testing, and
//! the diagnostics pipeline.
//!
//! Builds a flat panel (slide image, a controls bar with previous/next
//! buttons, and two scene-switcher info buttons), then sweeps a pointer across
//! it. Focused info buttons grow and are raised above their sibling, the same
//! way a focus animation would. Clicks on the arrow buttons page through the
//! slides. Every event goes to a
//! [`PrettyPrintSink`](strata_debug::pretty::PrettyPrintSink) on stdout and a
//! [`RecorderSink`](strata_debug::recorder::RecorderSink), which is exported
//! as `slide_trace.json` at the end.

use std::fs::File;
use std::io::{self, BufWriter};

use kurbo::Point;
use strata_core::hover::HoverState;
use strata_core::quad::Quad;
use strata_core::scene::Scene;
use strata_core::trace::{CommitEvent, HitTestEvent, OrderUpdateEvent, TraceSink, Tracer, ViewChange};
use strata_core::view::ViewId;
use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;
use strata_render::RenderPlan;

const SLIDES: [&str; 4] = [
    "First Slide",
    "Pre-requisite",
    "Difference between JS and React",
    "Let's React",
];

const INFO_WIDTH: f64 = 180.0;
const INFO_HEIGHT: f64 = 70.0;
const FOCUS_SCALE: f64 = 1.3;
const INFO_Y: f64 = 380.0;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_commit(&mut self, e: &CommitEvent) {
        self.a.on_commit(e);
        self.b.on_commit(e);
    }

    fn on_order_update(&mut self, e: &OrderUpdateEvent) {
        self.a.on_order_update(e);
        self.b.on_order_update(e);
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        self.a.on_hit_test(e);
        self.b.on_hit_test(e);
    }

    fn on_view_changes(&mut self, commit_index: u64, changes: &[ViewChange]) {
        self.a.on_view_changes(commit_index, changes);
        self.b.on_view_changes(commit_index, changes);
    }
}

/// An info button with its resting geometry.
#[derive(Clone, Copy)]
struct InfoButton {
    view: ViewId,
    label: &'static str,
    x: f64,
}

impl InfoButton {
    fn quad(self, focused: bool) -> Quad {
        let width = if focused {
            INFO_WIDTH * FOCUS_SCALE
        } else {
            INFO_WIDTH
        };
        Quad::new(self.x, INFO_Y, width, INFO_HEIGHT)
    }
}

struct Deck {
    scene: Scene,
    prev: ViewId,
    next: ViewId,
    title: ViewId,
    info: [InfoButton; 2],
    slide: usize,
}

impl Deck {
    fn build() -> Self {
        let mut scene = Scene::new();
        let panel = scene.create_view();
        let image = scene.create_view();
        let controls = scene.create_view();
        let prev = scene.create_view();
        let title = scene.create_view();
        let next = scene.create_view();
        let info_row = scene.create_view();
        let intro = scene.create_view();
        let slides = scene.create_view();

        scene.set_root_view(Some(panel));
        scene.set_child_at_index(panel, 0, image);
        scene.set_child_at_index(panel, 1, controls);
        scene.set_child_at_index(panel, 2, info_row);
        scene.set_child_at_index(controls, 0, prev);
        scene.set_child_at_index(controls, 1, title);
        scene.set_child_at_index(controls, 2, next);
        scene.set_child_at_index(info_row, 0, intro);
        scene.set_child_at_index(info_row, 1, slides);

        let info = [
            InfoButton {
                view: intro,
                label: "Intro",
                x: 200.0,
            },
            InfoButton {
                view: slides,
                label: "Slides",
                x: 420.0,
            },
        ];

        let store = scene.store_mut();
        store.set_quad(panel, Some(Quad::new(0.0, 0.0, 800.0, 470.0)));
        store.set_quad(image, Some(Quad::new(0.0, 0.0, 800.0, 300.0)));
        store.set_quad(controls, Some(Quad::new(0.0, 300.0, 800.0, 64.0)));
        store.set_quad(prev, Some(Quad::new(10.0, 310.0, 40.0, 44.0)));
        store.set_quad(title, Some(Quad::new(60.0, 310.0, 680.0, 44.0)));
        store.set_quad(next, Some(Quad::new(750.0, 310.0, 40.0, 44.0)));
        for button in info {
            store.set_quad(button.view, Some(button.quad(false)));
        }

        Self {
            scene,
            prev,
            next,
            title,
            info,
            slide: 0,
        }
    }

    fn info_button(&self, view: ViewId) -> Option<InfoButton> {
        self.info.iter().copied().find(|b| b.view == view)
    }

    fn set_focus(&mut self, view: ViewId, focused: bool) {
        if let Some(button) = self.info_button(view) {
            let store = self.scene.store_mut();
            store.set_z_index(view, i32::from(focused));
            store.set_quad(view, Some(button.quad(focused)));
            let verb = if focused { "focus" } else { "blur" };
            println!("  {verb} {}", button.label);
        }
    }

    fn click(&mut self, point: Point, tracer: &mut Tracer<'_>) {
        let Some(target) = self.scene.hit_test(point, tracer) else {
            return;
        };
        if target == self.prev {
            self.slide = (self.slide + SLIDES.len() - 1) % SLIDES.len();
        } else if target == self.next {
            self.slide = (self.slide + 1) % SLIDES.len();
        } else if let Some(button) = self.info_button(target) {
            println!("  open scene {}", button.label);
            return;
        } else {
            return;
        }
        println!("  slide {}: {}", self.slide + 1, SLIDES[self.slide]);
    }
}

fn main() -> io::Result<()> {
    let mut pretty = PrettyPrintSink::new(Box::new(io::stdout()));
    let mut recorder = RecorderSink::new();
    let mut deck = Deck::build();

    {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        deck.scene.commit(&mut tracer);

        // -- pointer sweep across the info buttons -------------------------
        let mut hover = HoverState::new();
        for step in 0..=32 {
            let point = Point::new(f64::from(step) * 25.0, INFO_Y + 20.0);
            let hit = deck.scene.hit_test(point, &mut tracer);
            let change = hover.update(hit);
            if change.is_empty() {
                continue;
            }
            if let Some(view) = change.exited {
                deck.set_focus(view, false);
            }
            if let Some(view) = change.entered {
                deck.set_focus(view, true);
            }
            deck.scene.commit(&mut tracer);
        }

        // -- clicks ----------------------------------------------------------
        for point in [
            Point::new(770.0, 330.0),
            Point::new(770.0, 330.0),
            Point::new(30.0, 330.0),
            Point::new(400.0, 330.0),
            Point::new(300.0, 400.0),
        ] {
            deck.click(point, &mut tracer);
        }
        deck.scene.commit(&mut tracer);
    }

    // -- final paint order ---------------------------------------------------
    let plan = RenderPlan::build(deck.scene.store(), deck.scene.root().root_view());
    println!("paint order:");
    for item in plan.items() {
        let tag = if item.view == deck.title {
            " (title)"
        } else {
            ""
        };
        println!("  {:>2} {:?}{tag}", item.render_order, item.view);
    }

    // -- export ----------------------------------------------------------------
    let path = "slide_trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    strata_debug::json::export(recorder.as_bytes(), &mut writer)?;
    println!("Wrote {path} ({} commits)", deck.scene.commit_index());
    Ok(())
}
