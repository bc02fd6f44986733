//! Leaf action parameters and their validated constructors.
//!
//! Every constructor fails fast with [`ActionError::InvalidParameter`] on
//! out-of-range input: negative or non-finite durations, factors outside
//! [0,1], non-finite geometry. Nothing is clamped or passed through.

use serde::{Deserialize, Serialize};

use crate::callback::{Callback, ProgressCallback};
use crate::error::{ActionError, Result};
use crate::runnable::Runnable;

/// 2D vector for positions and offsets in host units.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Wait {
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motion {
    /// Absolute position in the parent's space.
    To(Vec2),
    /// Relative offset from wherever the node is when the action starts.
    By(Vec2),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub motion: Motion,
    pub duration: f32,
}

/// Relative rotation in radians.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rotate {
    pub angle: f32,
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    To(f32),
    /// Multiplies the current scale.
    By(f32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub mode: ScaleMode,
    pub duration: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeMode {
    In,
    Out,
    ToAlpha(f32),
    ByAlpha(f32),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fade {
    pub mode: FadeMode,
    pub duration: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Colorize {
    /// Linear RGBA, components in [0,1].
    pub color: [f32; 4],
    pub blend_factor: f32,
    pub duration: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaySound {
    pub file: String,
    #[serde(default)]
    pub wait_for_completion: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Custom {
    pub duration: f32,
    pub callback: ProgressCallback,
}

/// Passthrough for an action the host understands natively. The payload is
/// opaque to this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Native {
    pub name: String,
    pub duration: f32,
    #[serde(default)]
    pub payload: serde_json::Value,
}

// ----- validation -----

pub(crate) fn check_duration(action: &'static str, duration: f32) -> Result<f32> {
    if !duration.is_finite() {
        return Err(invalid(action, "duration", duration, "must be finite"));
    }
    if duration < 0.0 {
        return Err(invalid(action, "duration", duration, "must be >= 0"));
    }
    Ok(duration)
}

pub(crate) fn check_unit(action: &'static str, parameter: &'static str, v: f32) -> Result<f32> {
    if !(0.0..=1.0).contains(&v) {
        return Err(invalid(action, parameter, v, "must be within [0, 1]"));
    }
    Ok(v)
}

pub(crate) fn check_finite(action: &'static str, parameter: &'static str, v: f32) -> Result<f32> {
    if !v.is_finite() {
        return Err(invalid(action, parameter, v, "must be finite"));
    }
    Ok(v)
}

fn check_vec2(action: &'static str, v: Vec2) -> Result<Vec2> {
    check_finite(action, "x", v.x)?;
    check_finite(action, "y", v.y)?;
    Ok(v)
}

fn invalid(
    action: &'static str,
    parameter: &'static str,
    value: f32,
    reason: &'static str,
) -> ActionError {
    ActionError::InvalidParameter {
        action,
        parameter,
        value,
        reason,
    }
}

// ----- constructors -----

pub fn wait(duration: f32) -> Result<Runnable> {
    Ok(Runnable::Wait(Wait {
        duration: check_duration("wait", duration)?,
    }))
}

pub fn move_to(position: impl Into<Vec2>, duration: f32) -> Result<Runnable> {
    Ok(Runnable::Move(Move {
        motion: Motion::To(check_vec2("move", position.into())?),
        duration: check_duration("move", duration)?,
    }))
}

pub fn move_by(delta: impl Into<Vec2>, duration: f32) -> Result<Runnable> {
    Ok(Runnable::Move(Move {
        motion: Motion::By(check_vec2("move", delta.into())?),
        duration: check_duration("move", duration)?,
    }))
}

pub fn rotate_by(radians: f32, duration: f32) -> Result<Runnable> {
    Ok(Runnable::Rotate(Rotate {
        angle: check_finite("rotate", "angle", radians)?,
        duration: check_duration("rotate", duration)?,
    }))
}

pub fn scale_to(factor: f32, duration: f32) -> Result<Runnable> {
    Ok(Runnable::Scale(Scale {
        mode: ScaleMode::To(check_finite("scale", "factor", factor)?),
        duration: check_duration("scale", duration)?,
    }))
}

pub fn scale_by(factor: f32, duration: f32) -> Result<Runnable> {
    Ok(Runnable::Scale(Scale {
        mode: ScaleMode::By(check_finite("scale", "factor", factor)?),
        duration: check_duration("scale", duration)?,
    }))
}

pub fn fade_in(duration: f32) -> Result<Runnable> {
    fade(FadeMode::In, duration)
}

pub fn fade_out(duration: f32) -> Result<Runnable> {
    fade(FadeMode::Out, duration)
}

pub fn fade_alpha_to(alpha: f32, duration: f32) -> Result<Runnable> {
    fade(FadeMode::ToAlpha(check_unit("fade", "alpha", alpha)?), duration)
}

/// Relative alpha change; `delta` must lie within [-1, 1].
pub fn fade_alpha_by(delta: f32, duration: f32) -> Result<Runnable> {
    if !(-1.0..=1.0).contains(&delta) {
        return Err(invalid("fade", "delta", delta, "must be within [-1, 1]"));
    }
    fade(FadeMode::ByAlpha(delta), duration)
}

fn fade(mode: FadeMode, duration: f32) -> Result<Runnable> {
    Ok(Runnable::Fade(Fade {
        mode,
        duration: check_duration("fade", duration)?,
    }))
}

pub fn colorize(color: [f32; 4], blend_factor: f32, duration: f32) -> Result<Runnable> {
    for c in color {
        check_unit("colorize", "color", c)?;
    }
    Ok(Runnable::Colorize(Colorize {
        color,
        blend_factor: check_unit("colorize", "blend_factor", blend_factor)?,
        duration: check_duration("colorize", duration)?,
    }))
}

pub fn hide() -> Runnable {
    Runnable::Hide
}

pub fn unhide() -> Runnable {
    Runnable::Unhide
}

pub fn play_sound(file: impl Into<String>, wait_for_completion: bool) -> Runnable {
    Runnable::PlaySound(PlaySound {
        file: file.into(),
        wait_for_completion,
    })
}

/// Detach the node from its parent. Instantaneous and not reversible.
pub fn remove() -> Runnable {
    Runnable::Remove
}

/// Timed callback receiving the node and the elapsed fraction each host step.
pub fn custom<F>(duration: f32, label: impl Into<String>, f: F) -> Result<Runnable>
where
    F: Fn(&crate::NodeHandle, f32) + Send + Sync + 'static,
{
    Ok(Runnable::Custom(Custom {
        duration: check_duration("custom", duration)?,
        callback: ProgressCallback::new(label, f),
    }))
}

/// Instantaneous callback, run once.
pub fn run_block<F>(label: impl Into<String>, f: F) -> Runnable
where
    F: Fn() + Send + Sync + 'static,
{
    Runnable::Run(Callback::new(label, f))
}

pub fn native(
    name: impl Into<String>,
    duration: f32,
    payload: serde_json::Value,
) -> Result<Runnable> {
    let native = Native {
        name: name.into(),
        duration: check_duration("native", duration)?,
        payload,
    };
    Ok(Runnable::Action(crate::Action::new(crate::Effect::Native(native))))
}
