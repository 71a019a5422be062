//! Emotion aggregation over combined body-part states.
//!
//! [`aggregate`] is a single `match` over the three optional states. Rows
//! are tried top to bottom and the first match wins; anything without a
//! rule, including a state with no parts at all, is [`EmotionLabel::Neutral`].
//!
//! | eye | mouth | tail | emotion |
//! |---|---|---|---|
//! | wide_open | closed | up | alert |
//! | wide_open | closed | down | fearful |
//! | wide_open | closed | left, right | curious |
//! | wide_open | open | up | excited |
//! | wide_open | open | down | aggressive |
//! | normal | closed | up, down | content |
//! | normal | closed | left, right | relaxed |
//! | normal | open | up | playful |
//! | closed | closed | down | sleepy |
//! | closed | closed | up, left, right | relaxed |
//! | wide_open | closed | - | alert |
//! | wide_open | open | -, left, right | excited |
//! | normal | closed | - | content |
//! | normal | open | any other | playful |
//! | closed | any | any | sleepy |
//! | wide_open | - | up | alert |
//! | wide_open | - | down | fearful |
//! | wide_open | - | left, right, - | curious |
//! | normal | - | down | relaxed |
//! | - | open | up | playful |
//! | - | open | down | aggressive |
//! | - | - | up | curious |
//! | otherwise | | | neutral |
//!
//! `-` means the part was not detected.

mod table;

pub use table::{decision_table, TableRow};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{BodyPartState, EyeState, MouthState, TailPosition};

/// Coarse mood of the cat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmotionLabel {
    Alert,
    Fearful,
    Content,
    Playful,
    Sleepy,
    Excited,
    Aggressive,
    Relaxed,
    Curious,
    Neutral,
}

impl EmotionLabel {
    pub const ALL: [EmotionLabel; 10] = [
        EmotionLabel::Alert,
        EmotionLabel::Fearful,
        EmotionLabel::Content,
        EmotionLabel::Playful,
        EmotionLabel::Sleepy,
        EmotionLabel::Excited,
        EmotionLabel::Aggressive,
        EmotionLabel::Relaxed,
        EmotionLabel::Curious,
        EmotionLabel::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionLabel::Alert => "alert",
            EmotionLabel::Fearful => "fearful",
            EmotionLabel::Content => "content",
            EmotionLabel::Playful => "playful",
            EmotionLabel::Sleepy => "sleepy",
            EmotionLabel::Excited => "excited",
            EmotionLabel::Aggressive => "aggressive",
            EmotionLabel::Relaxed => "relaxed",
            EmotionLabel::Curious => "curious",
            EmotionLabel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for EmotionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmotionLabel::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown emotion '{}'", s))
    }
}

/// Maps a body-part state to an emotion. Pure and total.
pub fn aggregate(state: &BodyPartState) -> EmotionLabel {
    classify(state.eye_state, state.mouth_state, state.tail_position())
}

/// The decision table behind [`aggregate`].
pub fn classify(
    eye: Option<EyeState>,
    mouth: Option<MouthState>,
    tail: Option<TailPosition>,
) -> EmotionLabel {
    use EmotionLabel::*;
    use EyeState::{Closed as EyesClosed, Normal as EyesNormal, WideOpen};
    use MouthState::{Closed as MouthClosed, Open as MouthOpen};
    use TailPosition::{Down, Left, Right, Up};

    match (eye, mouth, tail) {
        // All three parts.
        (Some(WideOpen), Some(MouthClosed), Some(Up)) => Alert,
        (Some(WideOpen), Some(MouthClosed), Some(Down)) => Fearful,
        (Some(WideOpen), Some(MouthClosed), Some(Left | Right)) => Curious,
        (Some(WideOpen), Some(MouthOpen), Some(Up)) => Excited,
        (Some(WideOpen), Some(MouthOpen), Some(Down)) => Aggressive,
        (Some(EyesNormal), Some(MouthClosed), Some(Up | Down)) => Content,
        (Some(EyesNormal), Some(MouthClosed), Some(Left | Right)) => Relaxed,
        (Some(EyesNormal), Some(MouthOpen), Some(Up)) => Playful,
        (Some(EyesClosed), Some(MouthClosed), Some(Down)) => Sleepy,
        (Some(EyesClosed), Some(MouthClosed), Some(Up | Left | Right)) => Relaxed,

        // Eyes and mouth decide when the tail adds nothing.
        (Some(WideOpen), Some(MouthClosed), None) => Alert,
        (Some(WideOpen), Some(MouthOpen), _) => Excited,
        (Some(EyesNormal), Some(MouthClosed), None) => Content,
        (Some(EyesNormal), Some(MouthOpen), _) => Playful,
        (Some(EyesClosed), _, _) => Sleepy,

        // Eyes and tail only.
        (Some(WideOpen), None, Some(Up)) => Alert,
        (Some(WideOpen), None, Some(Down)) => Fearful,
        (Some(WideOpen), None, _) => Curious,
        (Some(EyesNormal), None, Some(Down)) => Relaxed,

        // No eyes.
        (None, Some(MouthOpen), Some(Up)) => Playful,
        (None, Some(MouthOpen), Some(Down)) => Aggressive,
        (None, None, Some(Up)) => Curious,

        _ => Neutral,
    }
}
