use crate::model::Emotion;

pub const GREETING: &str = "Mrrp... you're here! Pet me~";

const HAPPY: &[&str] = &[
    "Meow~ I really like you.",
    "I feel safe when you're around.",
    "Pet me, pet me!",
];
const NEUTRAL: &[&str] = &["Meow.", "I'm right here with you.", "Notice me?"];
const SAD: &[&str] = &[
    "I'm a little hungry...",
    "Could I have something to eat?",
    "My tummy is rumbling.",
];
const GRUMPY: &[&str] = &[
    "Hmph...",
    "You ignored me just now.",
    "I'm not in a good mood.",
];
const SLEEPY: &[&str] = &[
    "Gonna nap for a bit...",
    "Mew... so sleepy.",
    "I want to sleep.",
];
const EXCITED: &[&str] = &["Let's go! Play time!", "Meow meow meow!", "I'm full of beans!"];
const SHY: &[&str] = &[
    "D-don't stare at me like that...",
    "Mew... that's embarrassing.",
    "Um...",
];
const JEALOUS: &[&str] = &[
    "Are you looking at another kitty?",
    "Hmph, I want attention too.",
    "Mew... I'm jealous.",
];

pub fn lines_for(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Happy => HAPPY,
        Emotion::Neutral => NEUTRAL,
        Emotion::Sad => SAD,
        Emotion::Grumpy => GRUMPY,
        Emotion::Sleepy => SLEEPY,
        Emotion::Excited => EXCITED,
        Emotion::Shy => SHY,
        Emotion::Jealous => JEALOUS,
    }
}
