use crate::clock::{Clock, SystemClock};
use crate::error::{EngineError, Result};
use crate::lines::lines_for;
use crate::model::{
    clamp_to, Bubble, Emotion, PetAction, PetSeed, PetState, Rules, TickOutput, ENERGY_RANGE,
    METER_RANGE, MOOD_RANGE,
};
use crate::rng::{RandomSource, SplitMix64};

/// Owns one pet's state. Every read hands out a copy.
pub struct PetEngine<R = SplitMix64, C = SystemClock> {
    state: PetState,
    rules: Rules,
    quiet: bool,
    rng: R,
    clock: C,
}

impl PetEngine {
    /// System clock, generator seeded from the clock.
    pub fn new(seed: PetSeed) -> Result<Self> {
        let clock = SystemClock;
        let rng_seed = clock.now_ms() as u64 ^ 0xC0FFEE;
        Self::with_parts(seed, Rules::default(), SplitMix64::new(rng_seed), clock)
    }

    /// System clock, fixed generator seed.
    pub fn seeded(seed: PetSeed, rng_seed: u64) -> Result<Self> {
        Self::with_parts(seed, Rules::default(), SplitMix64::new(rng_seed), SystemClock)
    }
}

impl<R: RandomSource, C: Clock> PetEngine<R, C> {
    pub fn with_parts(seed: PetSeed, rules: Rules, rng: R, clock: C) -> Result<Self> {
        let state = seed.resolve(clock.now_ms())?;
        Ok(Self {
            state,
            rules,
            quiet: false,
            rng,
            clock,
        })
    }

    pub fn apply(&mut self, action: PetAction) {
        let r = &self.rules;
        let s = &mut self.state;
        s.last_interaction_at = self.clock.now_ms();

        match action {
            PetAction::Pet => {
                s.mood = clamp_to(s.mood + r.pet_mood, MOOD_RANGE);
                s.attachment = clamp_to(s.attachment + r.pet_attachment, METER_RANGE);
                s.boredom = clamp_to(s.boredom + r.pet_boredom, METER_RANGE);
            }
            PetAction::Feed => {
                s.hunger = clamp_to(s.hunger + r.feed_hunger, METER_RANGE);
                s.mood = clamp_to(s.mood + r.feed_mood, MOOD_RANGE);
                s.energy = clamp_to(s.energy + r.feed_energy, ENERGY_RANGE);
            }
            PetAction::Play => {
                s.boredom = clamp_to(s.boredom + r.play_boredom, METER_RANGE);
                s.energy = clamp_to(s.energy + r.play_energy, ENERGY_RANGE);
                s.mood = clamp_to(s.mood + r.play_mood, MOOD_RANGE);
            }
            PetAction::WorkModeOn => self.quiet = true,
            PetAction::WorkModeOff => self.quiet = false,
        }

        tracing::debug!(%action, quiet = self.quiet, "applied action");
    }

    /// Advance the simulation by `dt` seconds. The step must be finite and positive.
    pub fn tick(&mut self, dt: f64) -> Result<TickOutput> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(EngineError::InvalidStep(dt));
        }

        let r = &self.rules;
        let s = &mut self.state;

        // metabolism
        s.hunger = clamp_to(s.hunger + r.hunger_per_sec * dt, METER_RANGE);
        s.boredom = clamp_to(s.boredom + r.boredom_per_sec * dt, METER_RANGE);
        s.energy = clamp_to(s.energy - r.energy_per_sec * dt, ENERGY_RANGE);

        let mut delta = 0.0;
        if s.hunger > r.hungry_mood_threshold {
            delta -= r.hungry_mood_penalty * dt;
        }
        if s.boredom > r.bored_mood_threshold {
            delta -= r.bored_mood_penalty * dt;
        }
        if s.energy > r.rested_mood_threshold {
            delta += r.rested_mood_bonus * dt;
        }
        s.mood = clamp_to(s.mood + delta, MOOD_RANGE);

        tracing::trace!(
            dt,
            hunger = s.hunger,
            boredom = s.boredom,
            energy = s.energy,
            mood = s.mood,
            "tick"
        );

        let bubble = if self.quiet {
            if self.rng.next_unit() < self.rules.quiet_gate {
                self.maybe_bubble()
            } else {
                None
            }
        } else {
            self.maybe_bubble()
        };

        Ok(TickOutput {
            state: self.state,
            bubble,
        })
    }

    pub fn state(&self) -> PetState {
        self.state
    }

    pub fn get_state(&self) -> PetState {
        self.state()
    }

    pub fn quiet_mode(&self) -> bool {
        self.quiet
    }

    pub fn emotion(&self) -> Emotion {
        emotion_from(&self.state)
    }

    /// Say something now, skipping every probability gate. Leaves the state alone.
    pub fn speak(&mut self) -> Bubble {
        let emotion = emotion_from(&self.state);
        self.line_for(emotion)
    }

    /// Chance that a bubble fires this tick, before the quiet-mode gate.
    pub fn bubble_probability(&self) -> f64 {
        let r = &self.rules;
        let s = &self.state;
        let mut p = r.bubble_base;
        if s.hunger > r.bubble_hungry_threshold {
            p += r.bubble_hungry_bonus;
        }
        if s.boredom > r.bubble_bored_threshold {
            p += r.bubble_bored_bonus;
        }
        if self.clock.now_ms().saturating_sub(s.last_interaction_at) > r.neglect_after_ms {
            p += r.bubble_neglect_bonus;
        }
        p
    }

    fn maybe_bubble(&mut self) -> Option<Bubble> {
        let p = self.bubble_probability();
        if self.rng.next_unit() > p {
            return None;
        }
        let bubble = self.line_for(emotion_from(&self.state));
        tracing::debug!(emotion = %bubble.emotion, text = %bubble.text, p, "bubble");
        Some(bubble)
    }

    fn line_for(&mut self, emotion: Emotion) -> Bubble {
        let lines = lines_for(emotion);
        let text = lines[self.rng.pick_index(lines.len())];
        Bubble {
            text: text.to_string(),
            emotion,
        }
    }
}

/// Priority-ordered: the first rule that matches wins.
pub fn emotion_from(s: &PetState) -> Emotion {
    if s.energy < 20.0 {
        return Emotion::Sleepy;
    }
    if s.mood < -40.0 {
        return Emotion::Grumpy;
    }
    if s.hunger > 70.0 {
        return Emotion::Sad;
    }
    if s.attachment > 70.0 && s.mood > 20.0 {
        return Emotion::Happy;
    }
    Emotion::Neutral
}
