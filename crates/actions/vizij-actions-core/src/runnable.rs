//! The `Runnable` value and the [`ToAction`] capability shared by everything
//! that can yield an [`Action`].

use crate::action::{Action, Effect};
use crate::callback::Callback;
use crate::composite::{Group, Repeat, RepeatCount, Sequence};
use crate::curve::TimingCurve;
use crate::error::Result;
use crate::ids::NodeHandle;
use crate::leaf::{Colorize, Custom, Fade, Move, PlaySound, Rotate, Scale, Wait};

/// Anything that can be rendered to an [`Action`].
///
/// The provided methods are pure: each renders `self` and returns a new
/// descriptor, leaving `self` as it was.
pub trait ToAction {
    fn to_action(&self) -> Action;

    fn reversed(&self) -> Result<Action> {
        self.to_action().reversed()
    }

    fn with_timing_curve(&self, curve: TimingCurve) -> Action {
        self.to_action().with_timing_curve(curve)
    }

    fn with_duration(&self, duration: f32) -> Result<Action> {
        self.to_action().with_duration(duration)
    }

    fn with_speed(&self, factor: f32) -> Result<Action> {
        self.to_action().with_speed(factor)
    }

    fn retarget(&self, node: NodeHandle) -> Action {
        self.to_action().retarget(node)
    }

    /// `self` followed by `next`; same as `self + next`.
    fn then(&self, next: &dyn ToAction) -> Runnable {
        Sequence::from_actions(vec![self.to_action(), next.to_action()]).into()
    }

    /// `self` alongside `other`; same as `self & other`.
    fn with(&self, other: &dyn ToAction) -> Runnable {
        Group::from_actions(vec![self.to_action(), other.to_action()]).into()
    }

    /// `self` run `n` times; same as `self * n`.
    fn repeated(&self, n: u32) -> Runnable {
        Repeat::times(n, vec![self.to_action()]).into()
    }

    fn repeated_forever(&self) -> Runnable {
        Repeat::forever(vec![self.to_action()]).into()
    }
}

/// One variant per leaf and composite kind, plus a passthrough for
/// descriptors that already exist (modified, retargeted, native, loaded).
#[derive(Clone, Debug, PartialEq)]
pub enum Runnable {
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
    Run(Callback),
    Sequence(Sequence),
    Group(Group),
    Repeat(Repeat),
    Action(Action),
}

impl Runnable {
    pub fn repeat_count(&self) -> Option<RepeatCount> {
        match self {
            Runnable::Repeat(r) => Some(r.count()),
            _ => None,
        }
    }
}

impl ToAction for Runnable {
    fn to_action(&self) -> Action {
        match self {
            Runnable::Wait(w) => Action::new(Effect::Wait(w.clone())),
            Runnable::Move(m) => Action::new(Effect::Move(m.clone())),
            Runnable::Rotate(r) => Action::new(Effect::Rotate(r.clone())),
            Runnable::Scale(s) => Action::new(Effect::Scale(s.clone())),
            Runnable::Fade(f) => Action::new(Effect::Fade(f.clone())),
            Runnable::Colorize(c) => Action::new(Effect::Colorize(c.clone())),
            Runnable::Hide => Action::new(Effect::Hide),
            Runnable::Unhide => Action::new(Effect::Unhide),
            Runnable::PlaySound(p) => Action::new(Effect::PlaySound(p.clone())),
            Runnable::Remove => Action::new(Effect::Remove),
            Runnable::Custom(c) => Action::new(Effect::Custom(c.clone())),
            Runnable::Run(cb) => Action::run(cb.clone()),
            Runnable::Sequence(s) => s.to_action(),
            Runnable::Group(g) => g.to_action(),
            Runnable::Repeat(r) => r.to_action(),
            Runnable::Action(a) => a.clone(),
        }
    }
}

impl ToAction for Action {
    fn to_action(&self) -> Action {
        self.clone()
    }
}

impl From<Action> for Runnable {
    fn from(action: Action) -> Self {
        Runnable::Action(action)
    }
}

impl From<Sequence> for Runnable {
    fn from(s: Sequence) -> Self {
        Runnable::Sequence(s)
    }
}

impl From<Group> for Runnable {
    fn from(g: Group) -> Self {
        Runnable::Group(g)
    }
}

impl From<Repeat> for Runnable {
    fn from(r: Repeat) -> Self {
        Runnable::Repeat(r)
    }
}
