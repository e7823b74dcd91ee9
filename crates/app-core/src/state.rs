//! Session-side state types shared with the drivers.
//!
//! These types avoid platform APIs so the web and native frontends can both
//! consume them. Drivers read [`MarkerPose`] each frame and apply the
//! [`WorldRequest`]s the session emits.

use crate::catch::{CatchKind, VisualRequest};
use glam::Vec3;

/// Discrete phase of the fishing mini-game. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FishingState {
    #[default]
    Ready,
    Casting,
    Waiting,
    Biting,
    Reeling,
}

/// Where the bobber is this frame. `roll` is the bite wobble in radians
/// about the forward axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MarkerPose {
    pub position: Vec3,
    pub roll: f32,
}

/// Side effects the session asks its world to perform.
#[derive(Clone, Debug, PartialEq)]
pub enum WorldRequest {
    SetMarkerVisible(bool),
    SetLineVisible(bool),
    ShowBiteIndicator(Vec3),
    HideBiteIndicator,
    /// Start resolving the model for `kind`; report back through
    /// `FishingSession::on_catch_visual_resolved`.
    RequestCatchVisual {
        kind: CatchKind,
        request: VisualRequest,
    },
    /// The resolved visual for `request` should now hang from the marker.
    AttachCatchVisual {
        kind: CatchKind,
        request: VisualRequest,
    },
    DetachCatchVisual,
    LedgerIncrement {
        kind: CatchKind,
        total: u32,
    },
    /// First award of the special kind; drives a one-time dialog.
    SpecialEvent,
}

/// Terrain/world passability query.
pub trait Terrain {
    fn is_valid_water_position(&self, x: f32, z: f32) -> bool;
}

impl<F> Terrain for F
where
    F: Fn(f32, f32) -> bool,
{
    fn is_valid_water_position(&self, x: f32, z: f32) -> bool {
        self(x, z)
    }
}
