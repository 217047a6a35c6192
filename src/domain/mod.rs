//! Usage: Toolkit-independent core logic (notification delivery).

pub(crate) mod delivery;
