use glam::Vec3;

// Fishing tuning constants shared by the web and native drivers.

// Per-tick progress steps
pub const CAST_STEP: f32 = 0.02; // 50 ticks from rod tip to splash
pub const REEL_STEP: f32 = 0.015; // ~67 ticks from splash to dock
pub const PROGRESS_EPSILON: f32 = 1e-4; // accumulated f32 steps snap to 1.0 within this

// Cast throw
pub const CAST_ARC_HEIGHT: f32 = 2.5; // peak height above the straight line
pub const CAST_TARGET_ATTEMPTS: u32 = 10; // terrain queries before falling back
pub const CAST_SPREAD_RADIANS: f32 = 0.6; // half-angle of the forward cone
pub const CAST_MIN_DISTANCE: f32 = 6.0;
pub const CAST_MAX_DISTANCE: f32 = 14.0;
pub const WATER_LEVEL: f32 = 0.0;

// Marker motion (amplitudes in world units, frequencies in rad/s)
pub const IDLE_BOB_AMPLITUDE: f32 = 0.05;
pub const IDLE_BOB_FREQUENCY: f32 = 2.0;
pub const BITE_BOB_AMPLITUDE: f32 = 0.15;
pub const BITE_BOB_FREQUENCY: f32 = 12.0;
pub const BITE_WOBBLE_AMPLITUDE: f32 = 0.3; // radians of roll
pub const BITE_WOBBLE_FREQUENCY: f32 = 15.0;
pub const CATCH_SPIN_RATE: f32 = 2.0; // rad/s while reeling

// Timers
pub const BITE_DELAY_MIN_SEC: f32 = 1.5;
pub const BITE_DELAY_MAX_SEC: f32 = 4.0;
pub const RESET_DELAY_SEC: f32 = 2.5; // how long a landed catch stays on display

// Catch policy
pub const SPECIAL_CATCH_CAST: u32 = 2; // the contact card is forced on this cast

// Scene anchors
pub const ROD_TIP_POSITION: Vec3 = Vec3::new(0.0, 3.2, 1.5);
pub const REEL_DESTINATION: Vec3 = Vec3::new(0.0, 2.0, 2.0);
pub const DEFAULT_CAST_TARGET: Vec3 = Vec3::new(0.0, WATER_LEVEL, -10.0);
pub const CAST_FORWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0); // boat faces -Z
