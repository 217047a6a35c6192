//! Usage: Shared Tauri state types used by commands and event handlers.

use crate::domain::delivery::recency::RecencyStack;
use std::sync::Mutex;

/// Delivery-side mutable state: the blur history. Constructed once at
/// startup and owned by Tauri for the process lifetime; mutated only on the
/// main thread.
#[derive(Default)]
pub(crate) struct DeliveryState(pub(crate) Mutex<RecencyStack>);

/// Debug mode, read once from the environment at startup. Call sites log
/// through `tracing` unconditionally; this value only picks the verbose
/// filter and the extra debug menu surface.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DebugMode(pub(crate) bool);
