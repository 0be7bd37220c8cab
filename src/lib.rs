//! Needs-and-emotion simulation for a desktop cat.
//!
//! [`PetEngine`] owns the state, advances it with [`PetEngine::tick`], reacts to
//! [`PetAction`]s and now and then produces a speech [`Bubble`].

pub mod clock;
pub mod config;
pub mod error;
pub mod lines;
pub mod logging;
pub mod model;
pub mod rng;
pub mod sim;

pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::error::{EngineError, Result};
pub use crate::model::{Bubble, Emotion, PetAction, PetSeed, PetState, Rules, TickOutput};
pub use crate::rng::{RandomSource, SequenceSource, SplitMix64};
pub use crate::sim::{emotion_from, PetEngine};
