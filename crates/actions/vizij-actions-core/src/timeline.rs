//! Timeline lowering: when each leaf of an action would start and stop.
//!
//! This is a description of the host's scheduling rules, not a player. It is
//! used to check composites (ordering, parallel starts, repeat expansion) and
//! by hosts that want a flat schedule. Endless repeats are cut at
//! `Config::timeline_horizon` or `Config::max_repeat_expansion`.

use crate::action::{Action, Effect};
use crate::composite::RepeatCount;
use crate::config::Config;
use crate::curve::TimingCurve;
use crate::ids::NodeHandle;

/// One leaf placed on the timeline (seconds from the root action's start).
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledEffect {
    pub start: f32,
    pub duration: f32,
    /// Node the effect runs on when retargeted; `None` means the root node.
    pub node: Option<NodeHandle>,
    pub effect: Effect,
    pub curve: TimingCurve,
}

impl ScheduledEffect {
    #[inline]
    pub fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Eased progress at absolute time `t`: 0 before start, 1 after end.
    pub fn progress_at(&self, t: f32) -> f32 {
        if t < self.start {
            return 0.0;
        }
        if self.duration <= 0.0 || t >= self.end() {
            return 1.0;
        }
        self.curve.apply((t - self.start) / self.duration)
    }

    pub fn is_active_at(&self, t: f32) -> bool {
        t >= self.start && t < self.end()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Timeline {
    effects: Vec<ScheduledEffect>,
    total: f32,
    truncated: bool,
}

struct Lowering<'a> {
    cfg: &'a Config,
    out: Vec<ScheduledEffect>,
    truncated: bool,
}

impl Timeline {
    pub fn lower(action: &Action, cfg: &Config) -> Timeline {
        let mut ctx = Lowering {
            cfg,
            out: Vec::new(),
            truncated: false,
        };
        ctx.visit(action, 0.0, 1.0, None);
        // stable: equal starts keep lowering order
        ctx.out.sort_by(|a, b| a.start.total_cmp(&b.start));
        Timeline {
            effects: ctx.out,
            total: action.duration(),
            truncated: ctx.truncated,
        }
    }

    pub fn effects(&self) -> &[ScheduledEffect] {
        &self.effects
    }

    /// Duration of the lowered action; `f32::INFINITY` for endless ones.
    pub fn total_duration(&self) -> f32 {
        self.total
    }

    /// True when an endless or oversized repeat was cut short.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn active_at(&self, t: f32) -> impl Iterator<Item = &ScheduledEffect> {
        self.effects.iter().filter(move |e| e.is_active_at(t))
    }

    pub fn kinds(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.effect.kind_name()).collect()
    }
}

impl Lowering<'_> {
    /// Places `action` at `start` with parent time scale `scale`; returns the
    /// span it occupies (truncated when endless).
    fn visit(
        &mut self,
        action: &Action,
        start: f32,
        scale: f32,
        node: Option<&NodeHandle>,
    ) -> f32 {
        let span = action.duration() * scale;

        // child time scale: parent scale, own speed, and any duration override
        let mut k = scale / action.speed();
        if let Some(d) = action.duration_override() {
            let natural = action.natural_duration();
            if natural > 0.0 && natural.is_finite() {
                k *= d / natural;
            }
        }

        match action.effect() {
            Effect::Sequence { actions } => {
                let mut t = start;
                for child in actions {
                    t += self.visit(child, t, k, node);
                    if !child.is_finite() {
                        break;
                    }
                }
                if span.is_finite() {
                    span
                } else {
                    t - start
                }
            }
            Effect::Group { actions } => {
                let mut longest = 0.0f32;
                for child in actions {
                    longest = longest.max(self.visit(child, start, k, node));
                }
                if span.is_finite() {
                    span
                } else {
                    longest
                }
            }
            Effect::Repeat { count, action: body } => {
                let wanted = match count {
                    RepeatCount::Times(n) => Some(*n),
                    RepeatCount::Forever => None,
                };
                let mut t = start;
                let mut i = 0u32;
                loop {
                    if wanted.is_some_and(|n| i >= n) {
                        break;
                    }
                    if i >= self.cfg.max_repeat_expansion
                        || (wanted.is_none() && t >= self.cfg.timeline_horizon)
                    {
                        log::warn!(
                            "timeline: repeat cut after {i} iterations at t={t}s ({count:?})"
                        );
                        self.truncated = true;
                        break;
                    }
                    t += self.visit(body, t, k, node);
                    i += 1;
                    if !body.is_finite() {
                        break;
                    }
                }
                // a capped finite repeat still occupies its full span
                if span.is_finite() {
                    span
                } else {
                    t - start
                }
            }
            Effect::RunOn {
                node: target,
                action: inner,
            } => {
                self.visit(inner, start, k, Some(target));
                span
            }
            leaf => {
                self.out.push(ScheduledEffect {
                    start,
                    duration: span,
                    node: node.cloned(),
                    effect: leaf.clone(),
                    curve: action.curve(),
                });
                span
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::{Group, Repeat, Sequence};
    use crate::error::Result;
    use crate::leaf::{fade_in, fade_out, move_by, remove, wait};
    use crate::runnable::ToAction;

    fn approx(a: f32, b: f32) {
        assert!((a - b).abs() <= 1e-5, "left={a} right={b}");
    }

    #[test]
    fn sequence_children_start_back_to_back() -> Result<()> {
        let seq = Sequence::from_actions(vec![
            fade_in(0.5)?.to_action(),
            wait(1.0)?.to_action(),
            remove().to_action(),
        ])
        .to_action();
        let tl = Timeline::lower(&seq, &Config::default());
        let starts: Vec<f32> = tl.effects().iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![0.0, 0.5, 1.5]);
        assert_eq!(tl.kinds(), vec!["fade", "wait", "remove"]);
        approx(tl.total_duration(), 1.5);
        Ok(())
    }

    #[test]
    fn group_children_share_a_start() -> Result<()> {
        let grp = Group::from_actions(vec![
            fade_in(0.5)?.to_action(),
            move_by((0.0, 30.0), 2.0)?.to_action(),
        ])
        .to_action();
        let tl = Timeline::lower(&grp, &Config::default());
        assert!(tl.effects().iter().all(|e| e.start == 0.0));
        assert_eq!(tl.active_at(1.0).count(), 1);
        Ok(())
    }

    #[test]
    fn speed_and_overrides_rescale_children() -> Result<()> {
        let seq = Sequence::from_actions(vec![wait(1.0)?.to_action(), wait(3.0)?.to_action()])
            .to_action()
            .with_duration(2.0)?;
        let tl = Timeline::lower(&seq, &Config::default());
        approx(tl.effects()[0].duration, 0.5);
        approx(tl.effects()[1].start, 0.5);
        approx(tl.effects()[1].duration, 1.5);

        let fast = fade_out(2.0)?.to_action().with_speed(4.0)?;
        let tl = Timeline::lower(&fast, &Config::default());
        approx(tl.effects()[0].duration, 0.5);
        Ok(())
    }

    #[test]
    fn endless_repeats_stop_at_the_horizon() -> Result<()> {
        let cfg = Config {
            timeline_horizon: 3.0,
            ..Config::default()
        };
        let pulse = Repeat::forever(vec![wait(1.0)?.to_action()]).to_action();
        let tl = Timeline::lower(&pulse, &cfg);
        assert_eq!(tl.effects().len(), 3);
        assert!(tl.is_truncated());
        assert!(tl.total_duration().is_infinite());
        Ok(())
    }

    #[test]
    fn zero_length_endless_body_hits_the_iteration_cap() {
        let cfg = Config {
            max_repeat_expansion: 5,
            ..Config::default()
        };
        let spin = Repeat::forever(vec![remove().to_action()]).to_action();
        let tl = Timeline::lower(&spin, &cfg);
        assert_eq!(tl.effects().len(), 5);
        assert!(tl.is_truncated());
    }

    #[test]
    fn capped_finite_repeat_keeps_later_siblings_in_place() -> Result<()> {
        let cfg = Config {
            max_repeat_expansion: 5,
            ..Config::default()
        };
        let seq = Sequence::from_actions(vec![
            Repeat::times(10, vec![wait(1.0)?.to_action()]).to_action(),
            fade_in(1.0)?.to_action(),
        ])
        .to_action();
        let tl = Timeline::lower(&seq, &cfg);
        assert!(tl.is_truncated());
        approx(tl.total_duration(), 11.0);

        let fade = tl
            .effects()
            .iter()
            .find(|e| e.effect.kind_name() == "fade")
            .expect("fade scheduled");
        approx(fade.start, 10.0);
        assert_eq!(tl.effects().len(), 6);
        Ok(())
    }

    #[test]
    fn progress_follows_the_leaf_curve() -> Result<()> {
        let a = fade_in(2.0)?
            .to_action()
            .with_timing_curve(TimingCurve::EaseIn);
        let tl = Timeline::lower(&a, &Config::default());
        let e = &tl.effects()[0];
        assert_eq!(e.progress_at(-1.0), 0.0);
        assert!(e.progress_at(1.0) < 0.5);
        assert_eq!(e.progress_at(2.0), 1.0);
        Ok(())
    }
}
