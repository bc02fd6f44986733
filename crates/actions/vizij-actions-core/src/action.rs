//! Immutable action descriptors handed to the host executor.
//!
//! An [`Action`] is an [`Effect`] plus playback modifiers (speed, timing curve,
//! duration override). Modifiers never touch the receiver; each returns a new
//! value, so a descriptor shared between composites can't change under them.

use serde::Serialize;

use crate::callback::Callback;
use crate::composite::RepeatCount;
use crate::curve::TimingCurve;
use crate::error::{ActionError, Result};
use crate::ids::NodeHandle;
use crate::leaf::{
    check_duration, check_finite, Colorize, Custom, Fade, FadeMode, Motion, Move, Native,
    PlaySound, Rotate, Scale, ScaleMode, Wait,
};

/// What an action does, independent of playback modifiers.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Wait(Wait),
    Move(Move),
    Rotate(Rotate),
    Scale(Scale),
    Fade(Fade),
    Colorize(Colorize),
    Hide,
    Unhide,
    PlaySound(PlaySound),
    Remove,
    Custom(Custom),
    Run {
        callback: Callback,
    },
    Native(Native),
    Sequence {
        actions: Vec<Action>,
    },
    Group {
        actions: Vec<Action>,
    },
    Repeat {
        count: RepeatCount,
        action: Box<Action>,
    },
    /// Dispatch `action` to another node; completes immediately in its parent.
    RunOn {
        node: NodeHandle,
        action: Box<Action>,
    },
}

impl Effect {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Effect::Wait(_) => "wait",
            Effect::Move(_) => "move",
            Effect::Rotate(_) => "rotate",
            Effect::Scale(_) => "scale",
            Effect::Fade(_) => "fade",
            Effect::Colorize(_) => "colorize",
            Effect::Hide => "hide",
            Effect::Unhide => "unhide",
            Effect::PlaySound(_) => "play_sound",
            Effect::Remove => "remove",
            Effect::Custom(_) => "custom",
            Effect::Run { .. } => "run",
            Effect::Native(_) => "native",
            Effect::Sequence { .. } => "sequence",
            Effect::Group { .. } => "group",
            Effect::Repeat { .. } => "repeat",
            Effect::RunOn { .. } => "run_on",
        }
    }

    /// Duration stored on the leaf itself, if this kind carries one.
    fn intrinsic_duration(&self) -> Option<f32> {
        match self {
            Effect::Wait(w) => Some(w.duration),
            Effect::Move(m) => Some(m.duration),
            Effect::Rotate(r) => Some(r.duration),
            Effect::Scale(s) => Some(s.duration),
            Effect::Fade(f) => Some(f.duration),
            Effect::Colorize(c) => Some(c.duration),
            Effect::Custom(c) => Some(c.duration),
            Effect::Native(n) => Some(n.duration),
            _ => None,
        }
    }

    fn set_intrinsic_duration(&mut self, d: f32) -> bool {
        let slot = match self {
            Effect::Wait(w) => &mut w.duration,
            Effect::Move(m) => &mut m.duration,
            Effect::Rotate(r) => &mut r.duration,
            Effect::Scale(s) => &mut s.duration,
            Effect::Fade(f) => &mut f.duration,
            Effect::Colorize(c) => &mut c.duration,
            Effect::Custom(c) => &mut c.duration,
            Effect::Native(n) => &mut n.duration,
            _ => return false,
        };
        *slot = d;
        true
    }

    fn reversed(&self) -> Result<Effect> {
        let unsupported = || -> Result<Effect> {
            Err(ActionError::unsupported(self.kind_name(), "reversal"))
        };
        Ok(match self {
            Effect::Wait(w) => Effect::Wait(w.clone()),
            Effect::Move(Move {
                motion: Motion::By(delta),
                duration,
            }) => Effect::Move(Move {
                motion: Motion::By(-*delta),
                duration: *duration,
            }),
            Effect::Rotate(r) => Effect::Rotate(Rotate {
                angle: -r.angle,
                duration: r.duration,
            }),
            Effect::Scale(Scale {
                mode: ScaleMode::By(factor),
                duration,
            }) if *factor != 0.0 => Effect::Scale(Scale {
                mode: ScaleMode::By(factor.recip()),
                duration: *duration,
            }),
            Effect::Fade(Fade { mode, duration }) => {
                let mode = match mode {
                    FadeMode::In => FadeMode::Out,
                    FadeMode::Out => FadeMode::In,
                    FadeMode::ByAlpha(delta) => FadeMode::ByAlpha(-delta),
                    FadeMode::ToAlpha(_) => return unsupported(),
                };
                Effect::Fade(Fade {
                    mode,
                    duration: *duration,
                })
            }
            Effect::Hide => Effect::Unhide,
            Effect::Unhide => Effect::Hide,
            Effect::Sequence { actions } => Effect::Sequence {
                actions: actions
                    .iter()
                    .rev()
                    .map(Action::reversed)
                    .collect::<Result<Vec<_>>>()?,
            },
            Effect::Group { actions } => Effect::Group {
                actions: actions
                    .iter()
                    .map(Action::reversed)
                    .collect::<Result<Vec<_>>>()?,
            },
            Effect::Repeat { count, action } => Effect::Repeat {
                count: *count,
                action: Box::new(action.reversed()?),
            },
            Effect::RunOn { node, action } => Effect::RunOn {
                node: node.clone(),
                action: Box::new(action.reversed()?),
            },
            Effect::Move(_)
            | Effect::Scale(_)
            | Effect::Colorize(_)
            | Effect::PlaySound(_)
            | Effect::Remove
            | Effect::Custom(_)
            | Effect::Run { .. }
            | Effect::Native(_) => return unsupported(),
        })
    }
}

fn is_unit_speed(speed: &f32) -> bool {
    *speed == 1.0
}

fn is_linear(curve: &TimingCurve) -> bool {
    *curve == TimingCurve::Linear
}

/// Immutable descriptor of a timed effect, as consumed by the host executor.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Action {
    #[serde(flatten)]
    effect: Effect,
    #[serde(skip_serializing_if = "is_unit_speed")]
    speed: f32,
    #[serde(skip_serializing_if = "is_linear")]
    curve: TimingCurve,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_override: Option<f32>,
}

impl Action {
    pub fn new(effect: Effect) -> Self {
        Self {
            effect,
            speed: 1.0,
            curve: TimingCurve::Linear,
            duration_override: None,
        }
    }

    pub fn sequence(actions: Vec<Action>) -> Self {
        log::debug!("render sequence ({} children)", actions.len());
        Self::new(Effect::Sequence { actions })
    }

    pub fn group(actions: Vec<Action>) -> Self {
        log::debug!("render group ({} children)", actions.len());
        Self::new(Effect::Group { actions })
    }

    pub fn repeat(count: RepeatCount, action: Action) -> Self {
        log::debug!("render repeat ({count:?})");
        Self::new(Effect::Repeat {
            count,
            action: Box::new(action),
        })
    }

    pub fn run(callback: Callback) -> Self {
        Self::new(Effect::Run { callback })
    }

    #[inline]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn curve(&self) -> TimingCurve {
        self.curve
    }

    #[inline]
    pub fn duration_override(&self) -> Option<f32> {
        self.duration_override
    }

    pub fn kind_name(&self) -> &'static str {
        self.effect.kind_name()
    }

    /// Duration before speed and overrides are applied.
    pub fn natural_duration(&self) -> f32 {
        if let Some(d) = self.effect.intrinsic_duration() {
            return d;
        }
        match &self.effect {
            Effect::Sequence { actions } => actions.iter().map(Action::duration).sum(),
            Effect::Group { actions } => actions.iter().map(Action::duration).fold(0.0, f32::max),
            Effect::Repeat { count, action } => match count {
                RepeatCount::Times(0) => 0.0,
                RepeatCount::Times(n) => *n as f32 * action.duration(),
                RepeatCount::Forever => f32::INFINITY,
            },
            _ => 0.0,
        }
    }

    /// Wall-clock duration in the parent's time, `f32::INFINITY` for endless repeats.
    pub fn duration(&self) -> f32 {
        self.duration_override.unwrap_or_else(|| self.natural_duration()) / self.speed
    }

    pub fn is_finite(&self) -> bool {
        self.duration().is_finite()
    }

    /// Copy with a new duration. Timed leaves take it directly; other kinds
    /// record an override and the host rescales their children.
    pub fn with_duration(&self, duration: f32) -> Result<Action> {
        let duration = check_duration(self.kind_name(), duration)?;
        let mut next = self.clone();
        if !next.effect.set_intrinsic_duration(duration) {
            next.duration_override = Some(duration);
        }
        Ok(next)
    }

    /// Copy played back at `factor` times normal speed.
    pub fn with_speed(&self, factor: f32) -> Result<Action> {
        let factor = check_finite(self.kind_name(), "speed", factor)?;
        if factor <= 0.0 {
            return Err(ActionError::InvalidParameter {
                action: self.kind_name(),
                parameter: "speed",
                value: factor,
                reason: "must be > 0",
            });
        }
        Ok(Action {
            speed: factor,
            ..self.clone()
        })
    }

    pub fn with_timing_curve(&self, curve: TimingCurve) -> Action {
        Action {
            curve,
            ..self.clone()
        }
    }

    /// Wrapper that tells `node` to run this action.
    pub fn retarget(&self, node: impl Into<NodeHandle>) -> Action {
        Action::new(Effect::RunOn {
            node: node.into(),
            action: Box::new(self.clone()),
        })
    }

    /// The time-reversed action, with a mirrored timing curve.
    pub fn reversed(&self) -> Result<Action> {
        Ok(Action {
            effect: self.effect.reversed()?,
            speed: self.speed,
            curve: self.curve.mirrored(),
            duration_override: self.duration_override,
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub(crate) fn with_override_unchecked(mut self, duration: Option<f32>) -> Action {
        self.duration_override = duration;
        self
    }
}
