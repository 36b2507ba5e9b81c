//! This module contains a lock for tests that keep a core busy.
use crate::loom_bindings::sync::Mutex;

/// Serializes the tests whose workers busy-spin, so they do not starve each other.
pub(crate) static TEST_LOCK: Mutex<()> = Mutex::const_new(());
