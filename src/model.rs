use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ENERGY_RANGE: (f64, f64) = (0.0, 100.0);
pub const MOOD_RANGE: (f64, f64) = (-100.0, 100.0);
pub const METER_RANGE: (f64, f64) = (0.0, 100.0);

pub(crate) fn clamp_to(v: f64, range: (f64, f64)) -> f64 {
    v.clamp(range.0, range.1)
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PetState {
    pub energy: f64,
    pub mood: f64,
    /// 0 = full, 100 = starving.
    pub hunger: f64,
    pub boredom: f64,
    pub attachment: f64,
    /// Reserved: nothing mutates it yet.
    pub trust: f64,
    /// Epoch milliseconds of the last applied action.
    pub last_interaction_at: i64,
}

impl PetState {
    pub fn in_bounds(&self) -> bool {
        let within = |v: f64, (lo, hi): (f64, f64)| v >= lo && v <= hi;
        within(self.energy, ENERGY_RANGE)
            && within(self.mood, MOOD_RANGE)
            && within(self.hunger, METER_RANGE)
            && within(self.boredom, METER_RANGE)
            && within(self.attachment, METER_RANGE)
            && within(self.trust, METER_RANGE)
    }
}

/// Partial override of the starting attributes. Unset fields take the defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetSeed {
    pub energy: Option<f64>,
    pub mood: Option<f64>,
    pub hunger: Option<f64>,
    pub boredom: Option<f64>,
    pub attachment: Option<f64>,
    pub trust: Option<f64>,
    pub last_interaction_at: Option<i64>,
}

impl PetSeed {
    /// Resolve against the defaults. Non-finite values are rejected, out-of-range
    /// values are clamped and reported.
    pub fn resolve(&self, now_ms: i64) -> Result<PetState> {
        let pick = |field: &'static str,
                    value: Option<f64>,
                    default: f64,
                    range: (f64, f64)|
         -> Result<f64> {
            let Some(v) = value else {
                return Ok(default);
            };
            if !v.is_finite() {
                return Err(EngineError::InvalidOverride { field, value: v });
            }
            let c = clamp_to(v, range);
            if c != v {
                tracing::warn!(field, requested = v, clamped = c, "initial value out of range");
            }
            Ok(c)
        };

        Ok(PetState {
            energy: pick("energy", self.energy, 70.0, ENERGY_RANGE)?,
            mood: pick("mood", self.mood, 10.0, MOOD_RANGE)?,
            hunger: pick("hunger", self.hunger, 20.0, METER_RANGE)?,
            boredom: pick("boredom", self.boredom, 20.0, METER_RANGE)?,
            attachment: pick("attachment", self.attachment, 40.0, METER_RANGE)?,
            trust: pick("trust", self.trust, 40.0, METER_RANGE)?,
            last_interaction_at: resolve_timestamp(self.last_interaction_at, now_ms),
        })
    }
}

/// Interactions cannot predate the epoch or happen in the future.
fn resolve_timestamp(value: Option<i64>, now_ms: i64) -> i64 {
    let Some(t) = value else {
        return now_ms;
    };
    let c = t.clamp(0, now_ms.max(0));
    if c != t {
        tracing::warn!(requested = t, clamped = c, "last_interaction_at out of range");
    }
    c
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetAction {
    Pet,
    Feed,
    Play,
    WorkModeOn,
    WorkModeOff,
}

impl PetAction {
    pub const ALL: [PetAction; 5] = [
        PetAction::Pet,
        PetAction::Feed,
        PetAction::Play,
        PetAction::WorkModeOn,
        PetAction::WorkModeOff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PetAction::Pet => "pet",
            PetAction::Feed => "feed",
            PetAction::Play => "play",
            PetAction::WorkModeOn => "work_mode_on",
            PetAction::WorkModeOff => "work_mode_off",
        }
    }
}

impl fmt::Display for PetAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetAction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        PetAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| EngineError::UnknownAction(s.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Happy,
    Neutral,
    Sad,
    Grumpy,
    Sleepy,
    Excited,
    Shy,
    Jealous,
}

impl Emotion {
    pub fn as_str(self) -> &'static str {
        match self {
            Emotion::Happy => "happy",
            Emotion::Neutral => "neutral",
            Emotion::Sad => "sad",
            Emotion::Grumpy => "grumpy",
            Emotion::Sleepy => "sleepy",
            Emotion::Excited => "excited",
            Emotion::Shy => "shy",
            Emotion::Jealous => "jealous",
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub text: String,
    pub emotion: Emotion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickOutput {
    pub state: PetState,
    pub bubble: Option<Bubble>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rules {
    // signed deltas applied by each action
    pub pet_mood: f64,
    pub pet_attachment: f64,
    pub pet_boredom: f64,
    pub feed_hunger: f64,
    pub feed_mood: f64,
    pub feed_energy: f64,
    pub play_boredom: f64,
    pub play_energy: f64,
    pub play_mood: f64,

    pub hunger_per_sec: f64,
    pub boredom_per_sec: f64,
    pub energy_per_sec: f64,

    pub hungry_mood_threshold: f64, // hunger above this sours mood
    pub hungry_mood_penalty: f64,
    pub bored_mood_threshold: f64,
    pub bored_mood_penalty: f64,
    pub rested_mood_threshold: f64, // energy above this lifts mood
    pub rested_mood_bonus: f64,

    pub bubble_base: f64,
    pub bubble_hungry_threshold: f64,
    pub bubble_hungry_bonus: f64,
    pub bubble_bored_threshold: f64,
    pub bubble_bored_bonus: f64,
    pub neglect_after_ms: i64,
    pub bubble_neglect_bonus: f64,
    /// Extra draw that must pass before any bubble while work mode is on.
    pub quiet_gate: f64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            pet_mood: 12.0,
            pet_attachment: 2.0,
            pet_boredom: -10.0,
            feed_hunger: -35.0,
            feed_mood: 6.0,
            feed_energy: 4.0,
            play_boredom: -35.0,
            play_energy: -12.0,
            play_mood: 10.0,

            hunger_per_sec: 2.0,
            boredom_per_sec: 1.5,
            energy_per_sec: 1.2,

            hungry_mood_threshold: 70.0,
            hungry_mood_penalty: 1.6,
            bored_mood_threshold: 75.0,
            bored_mood_penalty: 1.2,
            rested_mood_threshold: 60.0,
            rested_mood_bonus: 0.2,

            bubble_base: 0.02,
            bubble_hungry_threshold: 75.0,
            bubble_hungry_bonus: 0.08,
            bubble_bored_threshold: 75.0,
            bubble_bored_bonus: 0.06,
            neglect_after_ms: 5 * 60 * 1000,
            bubble_neglect_bonus: 0.05,
            quiet_gate: 0.005,
        }
    }
}
