//! Side-effecting callbacks carried inside action descriptors.
//!
//! Callbacks are shared (`Arc`) so a descriptor can be cloned into several
//! composites. Equality is pointer identity; serialization emits the label only.

use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::ids::NodeHandle;

type ProgressFn = dyn Fn(&NodeHandle, f32) + Send + Sync;
type InstantFn = dyn Fn() + Send + Sync;

/// Timed callback invoked by the host with the node and elapsed fraction in [0,1].
#[derive(Clone)]
pub struct ProgressCallback {
    label: String,
    f: Arc<ProgressFn>,
}

impl ProgressCallback {
    pub fn new<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn(&NodeHandle, f32) + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            f: Arc::new(f),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn call(&self, node: &NodeHandle, elapsed_fraction: f32) {
        (self.f)(node, elapsed_fraction)
    }
}

/// Instantaneous callback, run once with no timing.
#[derive(Clone)]
pub struct Callback {
    label: String,
    f: Arc<InstantFn>,
}

impl Callback {
    pub fn new<F>(label: impl Into<String>, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            f: Arc::new(f),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn call(&self) {
        (self.f)()
    }
}

impl fmt::Debug for ProgressCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProgressCallback").field(&self.label).finish()
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callback").field(&self.label).finish()
    }
}

impl PartialEq for ProgressCallback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

impl Serialize for ProgressCallback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl Serialize for Callback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}
