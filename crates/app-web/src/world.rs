//! Applies the session's world requests to the page.
//!
//! The 3D scene itself lives in JS; it reads the `data-*` attributes written
//! here and supplies the terrain query through `window.isValidWaterPosition`.

use crate::assets;
use crate::constants::*;
use crate::dom;
use crate::overlay;
use crate::scheduler::BrowserScheduler;
use app_core::{CatchKind, FishingSession, MarkerPose, Terrain, VisualRequest, WorldRequest};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub type Session = FishingSession<BrowserScheduler, StdRng>;
pub type SharedSession = Rc<RefCell<Session>>;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = window, js_name = isValidWaterPosition)]
    fn js_is_valid_water_position(x: f32, z: f32) -> Result<bool, JsValue>;
}

/// Terrain query answered by the scene script. A missing or throwing hook
/// reads as dry land, so casts fall back to the default target.
pub struct JsTerrain;

impl Terrain for JsTerrain {
    fn is_valid_water_position(&self, x: f32, z: f32) -> bool {
        match js_is_valid_water_position(x, z) {
            Ok(wet) => wet,
            Err(e) => {
                log::debug!("[terrain] water query failed: {:?}", e);
                false
            }
        }
    }
}

pub struct WebWorld {
    pub document: web::Document,
    pub session: SharedSession,
}

fn ledger_count_id(kind: CatchKind) -> String {
    format!("{}{}", LEDGER_COUNT_PREFIX, kind.id())
}

fn fmt_vec3(v: Vec3) -> String {
    format!("{:.3},{:.3},{:.3}", v.x, v.y, v.z)
}

impl WebWorld {
    pub fn new(document: web::Document, session: SharedSession) -> Rc<Self> {
        Rc::new(Self { document, session })
    }

    /// Must be called with the session unborrowed.
    pub fn apply(self: &Rc<Self>, requests: &[WorldRequest]) {
        let doc = &self.document;
        for req in requests {
            match req {
                WorldRequest::SetMarkerVisible(v) => dom::set_visible(doc, MARKER_ID, *v),
                WorldRequest::SetLineVisible(v) => dom::set_visible(doc, LINE_ID, *v),
                WorldRequest::ShowBiteIndicator(pos) => {
                    dom::set_data(doc, BITE_INDICATOR_ID, "data-pos", &fmt_vec3(*pos));
                    dom::set_visible(doc, BITE_INDICATOR_ID, true);
                }
                WorldRequest::HideBiteIndicator => dom::set_visible(doc, BITE_INDICATOR_ID, false),
                WorldRequest::RequestCatchVisual { kind, request } => {
                    self.resolve_catch_visual(*kind, *request)
                }
                WorldRequest::AttachCatchVisual { kind, .. } => {
                    let visual = kind.visual();
                    dom::set_data(doc, MARKER_ID, "data-catch", kind.id());
                    dom::set_data(doc, MARKER_ID, "data-catch-asset", visual.asset_path);
                    dom::set_data(doc, MARKER_ID, "data-catch-scale", &format!("{:.3}", visual.scale));
                    dom::set_data(doc, MARKER_ID, "data-catch-offset", &fmt_vec3(visual.offset));
                }
                WorldRequest::DetachCatchVisual => {
                    for attr in [
                        "data-catch",
                        "data-catch-asset",
                        "data-catch-scale",
                        "data-catch-offset",
                        "data-spin",
                    ] {
                        dom::clear_data(doc, MARKER_ID, attr);
                    }
                }
                WorldRequest::LedgerIncrement { kind, total } => {
                    let id = ledger_count_id(*kind);
                    dom::set_text(doc, &id, &total.to_string());
                    dom::set_data(doc, &id, "data-celebrate", "1");
                    dom::clear_data_later(doc, &id, "data-celebrate", CELEBRATE_MS);
                    self.refresh_completion();
                }
                WorldRequest::SpecialEvent => {
                    log::info!("[fishing] contact card landed");
                    overlay::show(doc);
                }
            }
        }
    }

    /// Write every ledger counter, e.g. at start-up.
    pub fn render_ledger(&self) {
        let Ok(session) = self.session.try_borrow() else {
            return;
        };
        for (kind, count) in session.ledger().iter() {
            dom::set_text(&self.document, &ledger_count_id(kind), &count.to_string());
        }
    }

    /// Pose and catch spin for the scene renderer, once per frame.
    pub fn publish_marker(&self, pose: MarkerPose, spin: Option<Quat>) {
        let doc = &self.document;
        dom::set_data(doc, MARKER_ID, "data-pos", &fmt_vec3(pose.position));
        dom::set_data(doc, MARKER_ID, "data-roll", &format!("{:.4}", pose.roll));
        if let Some(q) = spin {
            dom::set_data(
                doc,
                MARKER_ID,
                "data-spin",
                &format!("{:.4},{:.4},{:.4},{:.4}", q.x, q.y, q.z, q.w),
            );
        }
    }

    fn refresh_completion(&self) {
        let complete = self
            .session
            .try_borrow()
            .map(|s| s.ledger().is_complete())
            .unwrap_or(false);
        if complete {
            dom::set_data(&self.document, LEDGER_ID, "data-complete", "1");
        }
    }

    fn resolve_catch_visual(self: &Rc<Self>, kind: CatchKind, request: VisualRequest) {
        let world = self.clone();
        spawn_local(async move {
            let result = assets::fetch_catch_visual(kind).await;
            let mut out = Vec::new();
            world
                .session
                .borrow_mut()
                .on_catch_visual_resolved(request, result, &mut out);
            world.apply(&out);
        });
    }
}
