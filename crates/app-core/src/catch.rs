//! Catch catalogue, per-kind presentation data and the collection ledger.

use fnv::FnvHashMap;
use glam::Vec3;
use thiserror::Error;

/// What a completed reel can land.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatchKind {
    Perch,
    Trout,
    Pike,
    /// The one-time contact card. Awarding it ends the reel immediately.
    Contact,
}

impl CatchKind {
    pub const ALL: [CatchKind; 4] = [
        CatchKind::Perch,
        CatchKind::Trout,
        CatchKind::Pike,
        CatchKind::Contact,
    ];

    /// Kinds eligible for the random roll.
    pub const ORDINARY: [CatchKind; 3] = [CatchKind::Perch, CatchKind::Trout, CatchKind::Pike];

    #[inline]
    pub fn is_special(self) -> bool {
        matches!(self, CatchKind::Contact)
    }

    /// Stable lowercase id, used for DOM ids and log lines.
    pub fn id(self) -> &'static str {
        match self {
            CatchKind::Perch => "perch",
            CatchKind::Trout => "trout",
            CatchKind::Pike => "pike",
            CatchKind::Contact => "contact",
        }
    }

    pub fn visual(self) -> &'static CatchVisual {
        &CATCH_VISUALS[self as usize]
    }
}

/// Presentation data the render collaborator applies to a hooked catch.
#[derive(Clone, Debug, PartialEq)]
pub struct CatchVisual {
    pub label: &'static str,
    pub asset_path: &'static str,
    pub scale: f32,
    /// Offset from the marker to the model's pivot.
    pub offset: Vec3,
    pub spin_axis: Vec3,
}

// Indexed by `CatchKind as usize`.
static CATCH_VISUALS: [CatchVisual; 4] = [
    CatchVisual {
        label: "Perch",
        asset_path: "assets/models/perch.glb",
        scale: 0.6,
        offset: Vec3::new(0.0, -0.35, 0.0),
        spin_axis: Vec3::Z,
    },
    CatchVisual {
        label: "Trout",
        asset_path: "assets/models/trout.glb",
        scale: 0.8,
        offset: Vec3::new(0.0, -0.45, 0.0),
        spin_axis: Vec3::Z,
    },
    CatchVisual {
        label: "Pike",
        asset_path: "assets/models/pike.glb",
        scale: 1.1,
        offset: Vec3::new(0.0, -0.6, 0.0),
        spin_axis: Vec3::X,
    },
    CatchVisual {
        label: "Contact card",
        asset_path: "assets/models/contact_card.glb",
        scale: 0.9,
        offset: Vec3::new(0.0, -0.3, 0.0),
        spin_axis: Vec3::Y,
    },
];

/// Identifies one asynchronous catch-visual resolution. Results carrying an
/// older request are stale and get dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VisualRequest(pub u64);

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CatchVisualError {
    #[error("fetching catch visual failed: {0}")]
    Fetch(String),
    #[error("catch visual {path} returned HTTP {status}")]
    Status { path: String, status: u16 },
}

/// Per-kind catch counts for the life of the program.
#[derive(Clone, Debug, Default)]
pub struct CollectionLedger {
    counts: FnvHashMap<CatchKind, u32>,
}

impl CollectionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: CatchKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Add one catch and return the new total for that kind.
    pub fn record(&mut self, kind: CatchKind) -> u32 {
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(1);
        *entry
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Number of kinds caught at least once.
    pub fn distinct(&self) -> usize {
        self.counts.values().filter(|c| **c > 0).count()
    }

    pub fn is_complete(&self) -> bool {
        CatchKind::ALL.iter().all(|k| self.count(*k) > 0)
    }

    /// All kinds in catalogue order, including zero counts.
    pub fn iter(&self) -> impl Iterator<Item = (CatchKind, u32)> + '_ {
        CatchKind::ALL.iter().map(move |k| (*k, self.count(*k)))
    }
}
