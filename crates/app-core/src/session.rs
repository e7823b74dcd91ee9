//! The fishing mini-game state machine.
//!
//! `Ready -> Casting -> Waiting -> Biting -> Reeling -> Ready`, driven by one
//! ambiguous input trigger, a per-frame tick and two fire-once alarms. The
//! session never renders: every visible consequence is pushed as a
//! [`WorldRequest`] into the caller's buffer.

use crate::catch::{CatchKind, CatchVisualError, CollectionLedger, VisualRequest};
use crate::constants::*;
use crate::motion::{self, Oscillation};
use crate::random::RandomSource;
use crate::scheduler::{Alarm, Scheduler, TimerHandle};
use crate::state::{FishingState, MarkerPose, Terrain, WorldRequest};
use glam::{Quat, Vec3};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct FishingParams {
    /// Cast progress added per tick.
    pub cast_step: f32,
    /// Reel progress added per tick.
    pub reel_step: f32,
    /// Peak height of the cast arc above the straight line, world units.
    pub arc_height: f32,
    /// Rod tip; the line starts here and the cast departs from here.
    pub start_position: Vec3,
    /// Where a reeled-in marker ends up.
    pub reel_destination: Vec3,
    /// Used when no sampled target lands in water.
    pub default_cast_target: Vec3,
    /// Centre direction of the cast cone.
    pub cast_forward: Vec3,
    /// Half-angle of the cast cone, radians.
    pub cast_spread_radians: f32,
    /// Distance range from the rod tip, world units.
    pub cast_min_distance: f32,
    pub cast_max_distance: f32,
    pub cast_target_attempts: u32,
    /// Height the marker floats at.
    pub water_level: f32,
    pub idle_bob: Oscillation,
    pub bite_bob: Oscillation,
    pub bite_wobble: Oscillation,
    pub spin_rate: f32,
    pub bite_delay_min: Duration,
    pub bite_delay_max: Duration,
    pub reset_delay: Duration,
    pub special_catch_cast: u32,
}

impl Default for FishingParams {
    fn default() -> Self {
        Self {
            cast_step: CAST_STEP,
            reel_step: REEL_STEP,
            arc_height: CAST_ARC_HEIGHT,
            start_position: ROD_TIP_POSITION,
            reel_destination: REEL_DESTINATION,
            default_cast_target: DEFAULT_CAST_TARGET,
            cast_forward: CAST_FORWARD,
            cast_spread_radians: CAST_SPREAD_RADIANS,
            cast_min_distance: CAST_MIN_DISTANCE,
            cast_max_distance: CAST_MAX_DISTANCE,
            cast_target_attempts: CAST_TARGET_ATTEMPTS,
            water_level: WATER_LEVEL,
            idle_bob: Oscillation::new(IDLE_BOB_AMPLITUDE, IDLE_BOB_FREQUENCY),
            bite_bob: Oscillation::new(BITE_BOB_AMPLITUDE, BITE_BOB_FREQUENCY),
            bite_wobble: Oscillation::new(BITE_WOBBLE_AMPLITUDE, BITE_WOBBLE_FREQUENCY),
            spin_rate: CATCH_SPIN_RATE,
            bite_delay_min: Duration::from_secs_f32(BITE_DELAY_MIN_SEC),
            bite_delay_max: Duration::from_secs_f32(BITE_DELAY_MAX_SEC),
            reset_delay: Duration::from_secs_f32(RESET_DELAY_SEC),
            special_catch_cast: SPECIAL_CATCH_CAST,
        }
    }
}

/// Progress of the hooked catch's model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatchVisualSlot {
    #[default]
    Empty,
    Pending {
        kind: CatchKind,
        request: VisualRequest,
    },
    Attached {
        kind: CatchKind,
        request: VisualRequest,
    },
}

#[derive(Debug)]
pub struct FishingSession<S, R> {
    pub params: FishingParams,
    state: FishingState,
    cast_progress: f32,
    reel_progress: f32,
    target_position: Vec3,
    pending_catch: Option<CatchKind>,
    cast_count: u32,
    bite_timer: Option<TimerHandle>,
    reset_timer: Option<TimerHandle>,
    awarded: bool,
    special_announced: bool,
    catch_visual: CatchVisualSlot,
    next_visual_request: u64,
    marker: MarkerPose,
    reel_started_at: f64,
    last_tick_sec: f64,
    ledger: CollectionLedger,
    scheduler: S,
    rng: R,
}

impl<S: Scheduler, R: RandomSource> FishingSession<S, R> {
    pub fn new(params: FishingParams, scheduler: S, rng: R) -> Self {
        let marker = MarkerPose {
            position: params.start_position,
            roll: 0.0,
        };
        let target_position = params.default_cast_target;
        Self {
            params,
            state: FishingState::Ready,
            cast_progress: 0.0,
            reel_progress: 0.0,
            target_position,
            pending_catch: None,
            cast_count: 0,
            bite_timer: None,
            reset_timer: None,
            awarded: false,
            special_announced: false,
            catch_visual: CatchVisualSlot::Empty,
            next_visual_request: 0,
            marker,
            reel_started_at: 0.0,
            last_tick_sec: 0.0,
            ledger: CollectionLedger::new(),
            scheduler,
            rng,
        }
    }

    pub fn state(&self) -> FishingState {
        self.state
    }

    pub fn cast_progress(&self) -> f32 {
        self.cast_progress
    }

    pub fn reel_progress(&self) -> f32 {
        self.reel_progress
    }

    pub fn cast_count(&self) -> u32 {
        self.cast_count
    }

    pub fn target_position(&self) -> Vec3 {
        self.target_position
    }

    pub fn start_position(&self) -> Vec3 {
        self.params.start_position
    }

    pub fn pending_catch(&self) -> Option<CatchKind> {
        self.pending_catch
    }

    pub fn ledger(&self) -> &CollectionLedger {
        &self.ledger
    }

    pub fn marker(&self) -> MarkerPose {
        self.marker
    }

    pub fn catch_visual(&self) -> CatchVisualSlot {
        self.catch_visual
    }

    pub fn bite_timer(&self) -> Option<TimerHandle> {
        self.bite_timer
    }

    pub fn reset_timer(&self) -> Option<TimerHandle> {
        self.reset_timer
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Reeling finished and the catch is on display.
    pub fn is_reel_complete(&self) -> bool {
        self.state == FishingState::Reeling && self.reel_progress >= 1.0
    }

    /// Spin for the attached catch model, if one is hanging from the line.
    pub fn catch_spin(&self, now_sec: f64) -> Option<Quat> {
        match (self.state, self.catch_visual) {
            (FishingState::Reeling, CatchVisualSlot::Attached { kind, .. }) => Some(motion::catch_spin(
                kind.visual().spin_axis,
                now_sec - self.reel_started_at,
                self.params.spin_rate,
            )),
            _ => None,
        }
    }

    /// The single pointer/tap input: cast when ready, reel while the line is
    /// in the water, dismiss a landed catch.
    pub fn on_cast_or_reel_or_dismiss<T: Terrain + ?Sized>(
        &mut self,
        terrain: &T,
        out: &mut Vec<WorldRequest>,
    ) -> bool {
        match self.state {
            FishingState::Ready => self.cast(terrain, out),
            FishingState::Waiting | FishingState::Biting => self.reel(out),
            FishingState::Reeling => self.dismiss(out),
            FishingState::Casting => {
                log::trace!("[fishing] input ignored while casting");
                false
            }
        }
    }

    pub fn cast<T: Terrain + ?Sized>(&mut self, terrain: &T, out: &mut Vec<WorldRequest>) -> bool {
        if self.state != FishingState::Ready {
            log::trace!("[fishing] cast ignored in {:?}", self.state);
            return false;
        }
        self.cast_count += 1;
        self.cast_progress = 0.0;
        self.awarded = false;
        self.target_position = pick_cast_target(&self.params, terrain, &mut self.rng);
        self.marker = MarkerPose {
            position: self.params.start_position,
            roll: 0.0,
        };
        self.state = FishingState::Casting;
        out.push(WorldRequest::SetMarkerVisible(true));
        out.push(WorldRequest::SetLineVisible(true));
        log::debug!(
            "[fishing] cast #{} -> ({:.2},{:.2},{:.2})",
            self.cast_count,
            self.target_position.x,
            self.target_position.y,
            self.target_position.z
        );
        true
    }

    pub fn reel(&mut self, out: &mut Vec<WorldRequest>) -> bool {
        match self.state {
            FishingState::Waiting => {
                // nothing on the hook yet
                self.pending_catch = None;
            }
            FishingState::Biting => out.push(WorldRequest::HideBiteIndicator),
            _ => {
                log::trace!("[fishing] reel ignored in {:?}", self.state);
                return false;
            }
        }
        self.cancel_bite_timer();
        self.state = FishingState::Reeling;
        self.reel_progress = 0.0;
        self.awarded = false;
        self.reel_started_at = self.last_tick_sec;
        if let Some(kind) = self.pending_catch {
            self.next_visual_request += 1;
            let request = VisualRequest(self.next_visual_request);
            self.catch_visual = CatchVisualSlot::Pending { kind, request };
            out.push(WorldRequest::RequestCatchVisual { kind, request });
        }
        log::debug!("[fishing] reeling, hooked={:?}", self.pending_catch);
        true
    }

    /// Skip the display delay after a completed reel.
    pub fn dismiss(&mut self, out: &mut Vec<WorldRequest>) -> bool {
        if !self.is_reel_complete() {
            log::trace!("[fishing] dismiss ignored in {:?}", self.state);
            return false;
        }
        self.finish_round(out);
        true
    }

    /// Deliver every alarm the scheduler reports as fired. Call once per
    /// frame before [`on_tick`](Self::on_tick).
    pub fn pump_timers(&mut self, out: &mut Vec<WorldRequest>) {
        while let Some(alarm) = self.scheduler.poll_fired() {
            self.on_alarm(alarm, out);
        }
    }

    /// Handle one alarm. Hosts that deliver alarms themselves instead of
    /// through [`pump_timers`](Self::pump_timers) may call this directly; the
    /// matching scheduled alarm is cancelled so it cannot fire again later.
    pub fn on_alarm(&mut self, alarm: Alarm, out: &mut Vec<WorldRequest>) {
        match alarm {
            Alarm::Bite => {
                self.cancel_bite_timer();
                if self.state != FishingState::Waiting {
                    return;
                }
                self.state = FishingState::Biting;
                out.push(WorldRequest::ShowBiteIndicator(self.marker.position));
                log::debug!("[fishing] bite");
            }
            Alarm::Reset => {
                if let Some(handle) = self.reset_timer.take() {
                    self.scheduler.cancel(handle);
                }
                if self.is_reel_complete() {
                    self.finish_round(out);
                }
            }
        }
    }

    /// Advance progress and the marker pose for one rendered frame.
    pub fn on_tick(&mut self, now_sec: f64, out: &mut Vec<WorldRequest>) {
        self.last_tick_sec = now_sec;
        match self.state {
            FishingState::Ready => {}
            FishingState::Casting => {
                self.cast_progress = step_progress(self.cast_progress, self.params.cast_step);
                self.marker = MarkerPose {
                    position: motion::cast_position(
                        self.params.start_position,
                        self.target_position,
                        self.cast_progress,
                        self.params.arc_height,
                    ),
                    roll: 0.0,
                };
                if self.cast_progress >= 1.0 {
                    self.land_cast();
                }
            }
            FishingState::Waiting => {
                self.marker = MarkerPose {
                    position: self.target_position + Vec3::Y * self.params.idle_bob.sample(now_sec),
                    roll: 0.0,
                };
            }
            FishingState::Biting => {
                self.marker = MarkerPose {
                    position: self.target_position + Vec3::Y * self.params.bite_bob.sample(now_sec),
                    roll: self.params.bite_wobble.sample(now_sec),
                };
            }
            FishingState::Reeling => {
                if self.reel_progress < 1.0 {
                    self.reel_progress = step_progress(self.reel_progress, self.params.reel_step);
                }
                self.marker = MarkerPose {
                    position: motion::reel_position(
                        self.target_position,
                        self.params.reel_destination,
                        self.reel_progress,
                    ),
                    roll: 0.0,
                };
                if self.reel_progress >= 1.0 && !self.awarded {
                    self.settle_reel(out);
                }
            }
        }
    }

    /// Finish an asynchronous catch-visual resolution. Returns whether the
    /// visual was attached. Results for a request that is no longer current
    /// are dropped; failures leave the line empty but change nothing else.
    pub fn on_catch_visual_resolved(
        &mut self,
        request: VisualRequest,
        result: Result<(), CatchVisualError>,
        out: &mut Vec<WorldRequest>,
    ) -> bool {
        let kind = match self.catch_visual {
            CatchVisualSlot::Pending { kind, request: r } if r == request => kind,
            _ => {
                log::trace!("[assets] stale catch visual {:?} dropped", request);
                return false;
            }
        };
        match result {
            Ok(()) => {
                self.catch_visual = CatchVisualSlot::Attached { kind, request };
                out.push(WorldRequest::AttachCatchVisual { kind, request });
                true
            }
            Err(e) => {
                log::warn!("[assets] {} visual unavailable: {}", kind.id(), e);
                self.catch_visual = CatchVisualSlot::Empty;
                false
            }
        }
    }

    fn land_cast(&mut self) {
        self.state = FishingState::Waiting;
        self.cast_progress = 0.0;
        self.marker = MarkerPose {
            position: self.target_position,
            roll: 0.0,
        };
        let kind = self.choose_catch();
        self.pending_catch = Some(kind);
        let min = self.params.bite_delay_min.as_secs_f32();
        let max = self.params.bite_delay_max.as_secs_f32().max(min);
        let delay = Duration::from_secs_f32(self.rng.range(min, max));
        self.cancel_bite_timer();
        self.bite_timer = Some(self.scheduler.schedule_once(delay, Alarm::Bite));
        log::debug!(
            "[fishing] landed in water, {} bites in {:.2}s",
            kind.id(),
            delay.as_secs_f32()
        );
    }

    fn choose_catch(&mut self) -> CatchKind {
        if self.cast_count == self.params.special_catch_cast
            && self.ledger.count(CatchKind::Contact) == 0
        {
            return CatchKind::Contact;
        }
        CatchKind::ORDINARY[self.rng.index(CatchKind::ORDINARY.len())]
    }

    fn settle_reel(&mut self, out: &mut Vec<WorldRequest>) {
        self.awarded = true;
        if let Some(kind) = self.pending_catch.take() {
            let total = self.ledger.record(kind);
            out.push(WorldRequest::LedgerIncrement { kind, total });
            log::info!("[fishing] caught {} (x{})", kind.visual().label, total);
            if kind.is_special() {
                if !self.special_announced {
                    self.special_announced = true;
                    out.push(WorldRequest::SpecialEvent);
                }
                self.finish_round(out);
                return;
            }
        } else {
            log::debug!("[fishing] reeled in an empty line");
        }
        self.reset_timer = Some(
            self.scheduler
                .schedule_once(self.params.reset_delay, Alarm::Reset),
        );
    }

    fn finish_round(&mut self, out: &mut Vec<WorldRequest>) {
        if let Some(handle) = self.reset_timer.take() {
            self.scheduler.cancel(handle);
        }
        self.cancel_bite_timer();
        out.push(WorldRequest::SetMarkerVisible(false));
        out.push(WorldRequest::SetLineVisible(false));
        out.push(WorldRequest::DetachCatchVisual);
        self.catch_visual = CatchVisualSlot::Empty;
        self.pending_catch = None;
        self.state = FishingState::Ready;
        self.cast_progress = 0.0;
        self.reel_progress = 0.0;
        self.awarded = false;
        self.marker = MarkerPose {
            position: self.params.start_position,
            roll: 0.0,
        };
        log::debug!("[fishing] ready");
    }

    fn cancel_bite_timer(&mut self) {
        if let Some(handle) = self.bite_timer.take() {
            self.scheduler.cancel(handle);
        }
    }
}

#[inline]
fn step_progress(progress: f32, step: f32) -> f32 {
    let next = progress + step;
    if next >= 1.0 - PROGRESS_EPSILON {
        1.0
    } else {
        next
    }
}

/// Pick where the bobber lands: up to `cast_target_attempts` samples in a
/// cone in front of the rod tip, first one on water wins, otherwise the
/// default target.
pub fn pick_cast_target<T, R>(params: &FishingParams, terrain: &T, rng: &mut R) -> Vec3
where
    T: Terrain + ?Sized,
    R: RandomSource + ?Sized,
{
    let forward = Vec3::new(params.cast_forward.x, 0.0, params.cast_forward.z).normalize_or_zero();
    let start = params.start_position;
    for attempt in 0..params.cast_target_attempts {
        let angle = rng.range(-params.cast_spread_radians, params.cast_spread_radians);
        let distance = rng.range(params.cast_min_distance, params.cast_max_distance);
        let dir = Quat::from_rotation_y(angle) * forward;
        let x = start.x + dir.x * distance;
        let z = start.z + dir.z * distance;
        if terrain.is_valid_water_position(x, z) {
            return Vec3::new(x, params.water_level, z);
        }
        log::trace!("[fishing] cast sample {} at ({:.2},{:.2}) hit land", attempt, x, z);
    }
    log::debug!(
        "[fishing] no water found in {} samples, using default target",
        params.cast_target_attempts
    );
    params.default_cast_target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use crate::scheduler::ManualScheduler;
    use std::cell::Cell;

    fn everywhere_water(_x: f32, _z: f32) -> bool {
        true
    }

    fn session() -> FishingSession<ManualScheduler, SequenceRandom> {
        FishingSession::new(
            FishingParams::default(),
            ManualScheduler::new(),
            SequenceRandom::constant(0.5),
        )
    }

    #[test]
    fn step_progress_snaps_to_one() {
        let mut p = 0.0;
        let mut ticks = 0;
        while p < 1.0 {
            p = step_progress(p, CAST_STEP);
            ticks += 1;
        }
        assert_eq!(ticks, 50);
        assert_eq!(p, 1.0);
    }

    #[test]
    fn target_search_gives_up_after_attempt_budget() {
        let calls = Cell::new(0u32);
        let never = |_x: f32, _z: f32| {
            calls.set(calls.get() + 1);
            false
        };
        let params = FishingParams::default();
        let mut rng = SequenceRandom::constant(0.3);
        let target = pick_cast_target(&params, &never, &mut rng);
        assert_eq!(target, params.default_cast_target);
        assert_eq!(calls.get(), params.cast_target_attempts);
    }

    #[test]
    fn target_search_takes_first_water_sample_in_cone() {
        let params = FishingParams::default();
        // centre of the cone, middle distance
        let mut rng = SequenceRandom::constant(0.5);
        let target = pick_cast_target(&params, &everywhere_water, &mut rng);
        let expected_distance = (params.cast_min_distance + params.cast_max_distance) / 2.0;
        assert!((target.x - params.start_position.x).abs() < 1e-4);
        assert!((params.start_position.z - target.z - expected_distance).abs() < 1e-3);
        assert_eq!(target.y, params.water_level);
    }

    #[test]
    fn casting_ignores_input_until_it_lands() {
        let mut s = session();
        let mut out = Vec::new();
        assert!(s.on_cast_or_reel_or_dismiss(&everywhere_water, &mut out));
        assert_eq!(s.state(), FishingState::Casting);
        assert!(!s.on_cast_or_reel_or_dismiss(&everywhere_water, &mut out));
        assert!(!s.reel(&mut out));
        assert_eq!(s.cast_count(), 1);
    }

    #[test]
    fn marker_arcs_above_the_line_mid_cast() {
        let mut s = session();
        let mut out = Vec::new();
        s.cast(&everywhere_water, &mut out);
        for i in 0..25 {
            s.on_tick(i as f64 / 60.0, &mut out);
        }
        let start = s.start_position();
        let target = s.target_position();
        let straight = start.y + (target.y - start.y) * 0.5;
        assert!(s.marker().position.y > straight + 0.5 * s.params.arc_height);
    }

    #[test]
    fn failed_visual_degrades_to_empty_line() {
        let mut s = session();
        let mut out = Vec::new();
        s.cast(&everywhere_water, &mut out);
        for i in 0..50 {
            s.on_tick(i as f64 / 60.0, &mut out);
        }
        s.on_alarm(Alarm::Bite, &mut out);
        assert_eq!(s.state(), FishingState::Biting);
        out.clear();
        s.reel(&mut out);
        let request = out
            .iter()
            .find_map(|r| match r {
                WorldRequest::RequestCatchVisual { request, .. } => Some(*request),
                _ => None,
            })
            .expect("catch visual requested");
        let attached = s.on_catch_visual_resolved(
            request,
            Err(CatchVisualError::Fetch("offline".into())),
            &mut out,
        );
        assert!(!attached);
        assert_eq!(s.catch_visual(), CatchVisualSlot::Empty);
        assert_eq!(s.state(), FishingState::Reeling);
        assert!(s.pending_catch().is_some());
    }
}
