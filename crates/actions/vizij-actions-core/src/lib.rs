//! Vizij Actions Core (engine-agnostic)
//!
//! Declarative, immutable action descriptors (move, fade, scale, rotate,
//! wait, ...) and the combinators that compose them (sequence, group,
//! repeat, reversal), plus a block builder with conditionals and loops.
//! Nothing here plays anything back: hosts implement [`ActionNode`] and
//! execute the rendered [`Action`] with their own executor.
//!
//! ```
//! use vizij_actions_core::*;
//!
//! let entrance = group(|b| {
//!     Ok::<_, ActionError>(
//!         b.add(fade_in(0.7)?)
//!             .add(scale_by(1.5, 0.7)?)
//!             .add(move_to((0.0, 30.0), 0.7)?),
//!     )
//! })?;
//! let life = sequence(|b| {
//!     Ok::<_, ActionError>(
//!         b.add(entrance)
//!             .add(wait(1.0)?)
//!             .add(fade_out(1.0)?)
//!             .add(remove()),
//!     )
//! })?;
//! assert!((life.to_action().duration() - 2.7).abs() < 1e-5);
//! # Ok::<(), ActionError>(())
//! ```

pub mod action;
pub mod block;
pub mod callback;
pub mod composite;
pub mod config;
pub mod curve;
pub mod error;
pub mod host;
pub mod ids;
pub mod leaf;
pub mod ops;
pub mod runnable;
pub mod stored_action;
pub mod timeline;

// Re-exports for consumers (hosts)
pub use action::{Action, Effect};
pub use block::Block;
pub use callback::{Callback, ProgressCallback};
pub use composite::{group, repeat, sequence, Group, Repeat, RepeatCount, Sequence};
pub use config::{Config, DEFAULT_BLEND_FACTOR, DEFAULT_DURATION};
pub use curve::TimingCurve;
pub use error::{ActionError, Result};
pub use host::{ActionNode, RecordingNode, RunRecord};
pub use ids::{ActionKey, NodeHandle};
pub use leaf::{
    colorize, custom, fade_alpha_by, fade_alpha_to, fade_in, fade_out, hide, move_by, move_to,
    native, play_sound, remove, rotate_by, run_block, scale_by, scale_to, unhide, wait, Motion,
    Vec2,
};
pub use runnable::{Runnable, ToAction};
pub use stored_action::{parse_action_json, parse_action_json_with};
pub use timeline::{ScheduledEffect, Timeline};
