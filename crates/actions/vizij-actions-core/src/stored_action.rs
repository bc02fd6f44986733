use serde::Deserialize;

use crate::action::Action;
use crate::composite::RepeatCount;
use crate::config::Config;
use crate::curve::TimingCurve;
use crate::error::{ActionError, Result};
use crate::ids::NodeHandle;
use crate::leaf::{self, check_duration, FadeMode, Motion, ScaleMode};
use crate::runnable::ToAction;

/// Public API: parse a tagged JSON action graph (the shape produced by
/// [`Action::to_json`]) into a validated [`Action`], using default config.
///
/// Notes:
/// - Omitted leaf durations fall back to `Config::default_duration`.
/// - Omitted colorize blend factors fall back to `Config::default_blend_factor`.
/// - Every value goes through the same checks as the leaf constructors;
///   bezier curves need x1 and x2 within [0,1].
/// - Callback kinds (`custom`, `run`) only exist in code and are rejected.
pub fn parse_action_json(s: &str) -> Result<Action> {
    parse_action_json_with(s, &Config::default())
}

pub fn parse_action_json_with(s: &str, cfg: &Config) -> Result<Action> {
    let raw: RawAction =
        serde_json::from_str(s).map_err(|e| ActionError::Parse(e.to_string()))?;
    to_core_action(raw, cfg)
}

fn to_core_action(raw: RawAction, cfg: &Config) -> Result<Action> {
    let dur = |d: Option<f32>| d.unwrap_or(cfg.default_duration);

    let action = match raw.effect {
        RawEffect::Wait { duration } => leaf::wait(dur(duration))?.to_action(),
        RawEffect::Move { motion, duration } => match motion {
            Motion::To(p) => leaf::move_to(p, dur(duration))?.to_action(),
            Motion::By(d) => leaf::move_by(d, dur(duration))?.to_action(),
        },
        RawEffect::Rotate { angle, duration } => {
            leaf::rotate_by(angle, dur(duration))?.to_action()
        }
        RawEffect::Scale { mode, duration } => match mode {
            ScaleMode::To(f) => leaf::scale_to(f, dur(duration))?.to_action(),
            ScaleMode::By(f) => leaf::scale_by(f, dur(duration))?.to_action(),
        },
        RawEffect::Fade { mode, duration } => match mode {
            FadeMode::In => leaf::fade_in(dur(duration))?.to_action(),
            FadeMode::Out => leaf::fade_out(dur(duration))?.to_action(),
            FadeMode::ToAlpha(a) => leaf::fade_alpha_to(a, dur(duration))?.to_action(),
            FadeMode::ByAlpha(d) => leaf::fade_alpha_by(d, dur(duration))?.to_action(),
        },
        RawEffect::Colorize {
            color,
            blend_factor,
            duration,
        } => leaf::colorize(
            color,
            blend_factor.unwrap_or(cfg.default_blend_factor),
            dur(duration),
        )?
        .to_action(),
        RawEffect::Hide => leaf::hide().to_action(),
        RawEffect::Unhide => leaf::unhide().to_action(),
        RawEffect::PlaySound {
            file,
            wait_for_completion,
        } => leaf::play_sound(file, wait_for_completion).to_action(),
        RawEffect::Remove => leaf::remove().to_action(),
        RawEffect::Custom {} => return Err(unsupported("custom")),
        RawEffect::Run {} => return Err(unsupported("run")),
        RawEffect::Native {
            name,
            duration,
            payload,
        } => leaf::native(name, dur(duration), payload)?.to_action(),
        RawEffect::Sequence { actions } => Action::sequence(to_core_actions(actions, cfg)?),
        RawEffect::Group { actions } => Action::group(to_core_actions(actions, cfg)?),
        RawEffect::Repeat { count, action } => {
            Action::repeat(count, to_core_action(*action, cfg)?)
        }
        RawEffect::RunOn { node, action } => to_core_action(*action, cfg)?.retarget(node),
    };

    let action = match raw.speed {
        Some(speed) => action.with_speed(speed)?,
        None => action,
    };
    let action = match raw.curve {
        Some(curve) => action.with_timing_curve(curve.check()?),
        None => action,
    };
    let action = match raw.duration_override {
        Some(d) => {
            let d = check_duration(action.kind_name(), d)?;
            action.with_override_unchecked(Some(d))
        }
        None => action,
    };
    Ok(action)
}

fn to_core_actions(raw: Vec<RawAction>, cfg: &Config) -> Result<Vec<Action>> {
    raw.into_iter().map(|a| to_core_action(a, cfg)).collect()
}

fn unsupported(kind: &str) -> ActionError {
    ActionError::UnsupportedJson {
        kind: kind.to_string(),
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawAction {
    #[serde(flatten)]
    effect: RawEffect,
    #[serde(default)]
    speed: Option<f32>,
    #[serde(default)]
    curve: Option<TimingCurve>,
    #[serde(default)]
    duration_override: Option<f32>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawEffect {
    Wait {
        #[serde(default)]
        duration: Option<f32>,
    },
    Move {
        motion: Motion,
        #[serde(default)]
        duration: Option<f32>,
    },
    Rotate {
        angle: f32,
        #[serde(default)]
        duration: Option<f32>,
    },
    Scale {
        mode: ScaleMode,
        #[serde(default)]
        duration: Option<f32>,
    },
    Fade {
        mode: FadeMode,
        #[serde(default)]
        duration: Option<f32>,
    },
    Colorize {
        color: [f32; 4],
        #[serde(default)]
        blend_factor: Option<f32>,
        #[serde(default)]
        duration: Option<f32>,
    },
    Hide,
    Unhide,
    PlaySound {
        file: String,
        #[serde(default)]
        wait_for_completion: bool,
    },
    Remove,
    Custom {},
    Run {},
    Native {
        name: String,
        #[serde(default)]
        duration: Option<f32>,
        #[serde(default)]
        payload: serde_json::Value,
    },
    Sequence {
        #[serde(default)]
        actions: Vec<RawAction>,
    },
    Group {
        #[serde(default)]
        actions: Vec<RawAction>,
    },
    Repeat {
        count: RepeatCount,
        action: Box<RawAction>,
    },
    RunOn {
        node: NodeHandle,
        action: Box<RawAction>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Effect;

    #[test]
    fn omitted_fields_take_config_defaults() {
        let cfg = Config {
            default_duration: 0.25,
            default_blend_factor: 0.75,
            ..Config::default()
        };
        let a = parse_action_json_with(
            r#"{ "type": "colorize", "color": [1, 0, 0, 1] }"#,
            &cfg,
        )
        .unwrap();
        assert_eq!(a.duration(), 0.25);
        match a.effect() {
            Effect::Colorize(c) => assert_eq!(c.blend_factor, 0.75),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn callbacks_are_rejected() {
        let err = parse_action_json(r#"{ "type": "custom", "duration": 1, "callback": "x" }"#)
            .unwrap_err();
        assert_eq!(
            err,
            ActionError::UnsupportedJson {
                kind: "custom".into()
            }
        );
    }

    #[test]
    fn invalid_values_fail_like_constructors() {
        let err = parse_action_json(r#"{ "type": "wait", "duration": -2 }"#).unwrap_err();
        assert!(matches!(err, ActionError::InvalidParameter { .. }));
        let err = parse_action_json(r#"{ "type": "wait", "speed": 0 }"#).unwrap_err();
        assert!(matches!(err, ActionError::InvalidParameter { .. }));
        let err = parse_action_json(
            r#"{ "type": "wait", "curve": { "cubic_bezier": [1.4, 0, 0.5, 1] } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ActionError::InvalidParameter {
                action: "curve",
                parameter: "x1",
                ..
            }
        ));
        let err = parse_action_json(r#"{ "type": "teleport" }"#).unwrap_err();
        assert!(matches!(err, ActionError::Parse(_)));
    }
}
