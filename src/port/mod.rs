//! Ports decoupling the tracking core from its collaborators.

pub mod outbound;
