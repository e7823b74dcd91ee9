use anyhow::{bail, ensure};
use app_core::{
    FishingParams, FishingSession, FishingState, ManualScheduler, Terrain, WorldRequest,
};
use clap::Parser;
use glam::{Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Headless lakeside fishing run
#[derive(Parser, Debug)]
#[command(name = "app-native")]
#[command(
    version,
    about = "Plays scripted fishing sessions against the core state machine"
)]
struct Cli {
    /// Seed for catch rolls, cast targets and bite delays
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of casts to play
    #[arg(short, long, default_value_t = 10)]
    casts: u32,

    /// Simulated frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Reel in before the bite on every Nth cast (0 = never)
    #[arg(long, default_value_t = 0)]
    early_reel_every: u32,

    /// Radius of the lake in front of the boat
    #[arg(long, default_value_t = 12.0)]
    lake_radius: f32,
}

/// Circular lake; everything outside the shoreline is land.
struct Lake {
    centre: Vec2,
    radius: f32,
}

impl Terrain for Lake {
    fn is_valid_water_position(&self, x: f32, z: f32) -> bool {
        Vec2::new(x, z).distance(self.centre) <= self.radius
    }
}

// Upper bound on simulated time per cast before the run is considered stuck
const MAX_SECONDS_PER_CAST: f64 = 60.0;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    ensure!(cli.fps > 0.0, "--fps must be positive");
    ensure!(cli.lake_radius > 0.0, "--lake-radius must be positive");

    let params = FishingParams::default();
    let lake_centre: Vec3 = params.start_position + params.cast_forward * params.cast_max_distance;
    let lake = Lake {
        centre: Vec2::new(lake_centre.x, lake_centre.z),
        radius: cli.lake_radius,
    };
    let mut session = FishingSession::new(
        params,
        ManualScheduler::new(),
        StdRng::seed_from_u64(cli.seed),
    );
    log::info!(
        "[native] seed={} casts={} fps={:.0} lake r={:.1}",
        cli.seed,
        cli.casts,
        cli.fps,
        cli.lake_radius
    );

    let dt = Duration::from_secs_f64(1.0 / cli.fps);
    let max_frames = (cli.casts.max(1) as f64 * MAX_SECONDS_PER_CAST * cli.fps) as u64;
    let mut out = Vec::new();
    let mut frames = 0u64;

    loop {
        frames += 1;
        if frames > max_frames {
            bail!(
                "run stalled in {:?} after {} frames",
                session.state(),
                frames - 1
            );
        }
        session.scheduler_mut().advance(dt);
        let now = session.scheduler().now().as_secs_f64();
        session.pump_timers(&mut out);
        session.on_tick(now, &mut out);

        let cast = session.cast_count();
        match session.state() {
            FishingState::Ready if cast >= cli.casts => break,
            FishingState::Ready => {
                session.on_cast_or_reel_or_dismiss(&lake, &mut out);
            }
            FishingState::Waiting
                if cli.early_reel_every > 0 && cast % cli.early_reel_every == 0 =>
            {
                session.reel(&mut out);
            }
            FishingState::Biting => {
                session.reel(&mut out);
            }
            // every other landed catch is dismissed instead of waiting out the display
            FishingState::Reeling if session.is_reel_complete() && cast % 2 == 0 => {
                session.dismiss(&mut out);
            }
            _ => {}
        }

        // no assets to load headless: every catch visual resolves at once
        let requested: Vec<_> = out
            .iter()
            .filter_map(|r| match r {
                WorldRequest::RequestCatchVisual { request, .. } => Some(*request),
                _ => None,
            })
            .collect();
        for request in requested {
            session.on_catch_visual_resolved(request, Ok(()), &mut out);
        }
        for req in out.drain(..) {
            report(now, &req);
        }
    }

    println!(
        "Played {} casts in {:.1}s of simulated time",
        session.cast_count(),
        session.scheduler().now().as_secs_f64()
    );
    for (kind, count) in session.ledger().iter() {
        println!("  {:<14} {}", kind.visual().label, count);
    }
    if session.ledger().is_complete() {
        println!("Collection complete!");
    }
    Ok(())
}

fn report(now: f64, req: &WorldRequest) {
    match req {
        WorldRequest::LedgerIncrement { kind, total } => {
            log::info!("[native] t={:.2}s caught {} (x{})", now, kind.id(), total)
        }
        WorldRequest::SpecialEvent => log::info!("[native] t={:.2}s contact card dialog", now),
        WorldRequest::ShowBiteIndicator(pos) => log::debug!(
            "[native] t={:.2}s bite at ({:.2},{:.2},{:.2})",
            now,
            pos.x,
            pos.y,
            pos.z
        ),
        other => log::trace!("[native] t={:.2}s {:?}", now, other),
    }
}
