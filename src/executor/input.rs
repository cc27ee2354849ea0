// Physical pointer movement. Everything here blocks; run it off the async
// runtime (spawn_blocking).
use std::f64::consts::TAU;
use std::time::Duration;

use enigo::{Coordinate, Enigo, Mouse, Settings};

use crate::errors::{PagePointerError, PagePointerResult};
use crate::perception::types::{DisplayBounds, ScreenPoint};

/// Moves the real cursor. Coordinates are absolute physical pixels.
pub trait PointerControl {
    fn location(&self) -> PagePointerResult<(i32, i32)>;
    fn move_to(&mut self, point: ScreenPoint) -> PagePointerResult<()>;
}

pub struct EnigoPointer {
    enigo: Enigo,
}

impl EnigoPointer {
    pub fn new() -> PagePointerResult<Self> {
        let enigo = Enigo::new(&Settings::default())
            .map_err(|e| PagePointerError::Pointer(format!("input backend: {e}")))?;
        Ok(Self { enigo })
    }
}

impl PointerControl for EnigoPointer {
    fn location(&self) -> PagePointerResult<(i32, i32)> {
        self.enigo
            .location()
            .map_err(|e| PagePointerError::Pointer(format!("location: {e}")))
    }

    fn move_to(&mut self, point: ScreenPoint) -> PagePointerResult<()> {
        // ScreenPoint is always inside a display, far below i32::MAX.
        let x = i32::try_from(point.x).unwrap_or(i32::MAX);
        let y = i32::try_from(point.y).unwrap_or(i32::MAX);
        self.enigo
            .move_mouse(x, y, Coordinate::Abs)
            .map_err(|e| PagePointerError::Pointer(format!("move to ({x}, {y}): {e}")))
    }
}

/// Straight-line glide parameters.
#[derive(Debug, Clone, Copy)]
pub struct Motion {
    pub duration: Duration,
    pub steps: u32,
}

impl Motion {
    pub fn instant() -> Self {
        Self { duration: Duration::ZERO, steps: 1 }
    }
}

/// Small circle traced around a point after arriving on it.
#[derive(Debug, Clone, Copy)]
pub struct Hover {
    pub radius: f64,
    pub loops: u32,
    pub steps_per_loop: u32,
    pub loop_duration: Duration,
}

/// Evenly spaced points from `from` to `to`, excluding the start and always
/// ending exactly on `to`.
pub fn glide_path(from: ScreenPoint, to: ScreenPoint, steps: u32) -> Vec<ScreenPoint> {
    let steps = steps.max(1);
    let (fx, fy) = (f64::from(from.x), f64::from(from.y));
    let (dx, dy) = (f64::from(to.x) - fx, f64::from(to.y) - fy);
    (1..=steps)
        .map(|i| {
            if i == steps {
                return to;
            }
            let t = f64::from(i) / f64::from(steps);
            ScreenPoint::new((fx + dx * t).round() as u32, (fy + dy * t).round() as u32)
        })
        .collect()
}

/// Points of `hover.loops` circles around `center`, clamped into `display`,
/// finishing back on `center`.
pub fn hover_path(
    center: ScreenPoint,
    hover: &Hover,
    display: DisplayBounds,
) -> PagePointerResult<Vec<ScreenPoint>> {
    let per_loop = hover.steps_per_loop.max(3);
    let total = per_loop.checked_mul(hover.loops).ok_or_else(|| {
        PagePointerError::Config(format!(
            "hover of {} loops x {per_loop} steps is too long",
            hover.loops
        ))
    })?;
    let (cx, cy) = (f64::from(center.x), f64::from(center.y));
    let mut path: Vec<ScreenPoint> = (1..=total)
        .map(|i| {
            let angle = TAU * f64::from(i) / f64::from(per_loop);
            display.clamp(cx + hover.radius * angle.cos(), cy + hover.radius * angle.sin())
        })
        .collect();
    path.push(center);
    Ok(path)
}

/// Visit every point of `path`, spreading `duration` evenly between moves.
pub fn follow_path<P: PointerControl>(
    pointer: &mut P,
    path: &[ScreenPoint],
    duration: Duration,
) -> PagePointerResult<()> {
    let Ok(count) = u32::try_from(path.len()) else {
        return Err(PagePointerError::Pointer("path too long".into()));
    };
    let pause = if count > 1 { duration / count } else { Duration::ZERO };
    for (i, point) in path.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            std::thread::sleep(pause);
        }
        pointer.move_to(*point)?;
    }
    Ok(())
}

/// Move the cursor onto `target`, gliding from wherever it is now.
pub fn glide_to<P: PointerControl>(
    pointer: &mut P,
    target: ScreenPoint,
    motion: Motion,
    display: DisplayBounds,
) -> PagePointerResult<()> {
    if motion.duration.is_zero() {
        return pointer.move_to(target);
    }
    let (x, y) = pointer.location()?;
    let start = display.clamp(f64::from(x), f64::from(y));
    let path = glide_path(start, target, motion.steps);
    tracing::debug!(?start, ?target, steps = path.len(), "gliding pointer");
    follow_path(pointer, &path, motion.duration)
}

pub fn hover_around<P: PointerControl>(
    pointer: &mut P,
    center: ScreenPoint,
    hover: &Hover,
    display: DisplayBounds,
) -> PagePointerResult<()> {
    if hover.loops == 0 {
        return Ok(());
    }
    let duration = hover.loop_duration.checked_mul(hover.loops).ok_or_else(|| {
        PagePointerError::Config(format!(
            "hover of {} loops x {:?} is too long",
            hover.loops, hover.loop_duration
        ))
    })?;
    let path = hover_path(center, hover, display)?;
    tracing::debug!(?center, radius = hover.radius, loops = hover.loops, "hovering");
    follow_path(pointer, &path, duration)
}
