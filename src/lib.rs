//! Fruit Slash, a gesture-controlled fruit-slicing arcade game.
//!
//! A hand-landmark source (a webcam model in the real deployment, the
//! mouse in the terminal build) drives a smoothed, velocity-annotated
//! blade through a population of falling fruit. The crate splits into
//! pure data (`entities`), the pose boundary (`pose`), per-frame hand
//! smoothing and prediction (`tracker`), the gated blade trail
//! (`trail`), and pure game logic with injected RNG and timestamps
//! (`compute`). Rendering and input live in the binary.

pub mod compute;
pub mod entities;
pub mod pose;
pub mod tracker;
pub mod trail;
