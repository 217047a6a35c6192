//! Usage: Notification delivery core (window ports, recency stack, delivery policy).

pub(crate) mod policy;
pub(crate) mod recency;
pub(crate) mod registry;
