//! Discrete body-part states derived from image regions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Eye openness, ordered from most closed to most open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EyeState {
    Closed,
    Normal,
    WideOpen,
}

/// Mouth openness.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouthState {
    Closed,
    Open,
}

/// Cardinal direction the tail points toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TailPosition {
    Up,
    Down,
    Left,
    Right,
}

impl EyeState {
    pub const ALL: [EyeState; 3] = [EyeState::Closed, EyeState::Normal, EyeState::WideOpen];

    pub fn as_str(&self) -> &'static str {
        match self {
            EyeState::Closed => "closed",
            EyeState::Normal => "normal",
            EyeState::WideOpen => "wide_open",
        }
    }
}

impl MouthState {
    pub const ALL: [MouthState; 2] = [MouthState::Closed, MouthState::Open];

    pub fn as_str(&self) -> &'static str {
        match self {
            MouthState::Closed => "closed",
            MouthState::Open => "open",
        }
    }
}

impl TailPosition {
    pub const ALL: [TailPosition; 4] = [
        TailPosition::Up,
        TailPosition::Down,
        TailPosition::Left,
        TailPosition::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TailPosition::Up => "up",
            TailPosition::Down => "down",
            TailPosition::Left => "left",
            TailPosition::Right => "right",
        }
    }

    /// The angle, in degrees, this direction is centered on.
    pub fn center_angle(&self) -> f64 {
        match self {
            TailPosition::Right => 0.0,
            TailPosition::Up => 90.0,
            TailPosition::Left => 180.0,
            TailPosition::Down => 270.0,
        }
    }
}

macro_rules! impl_state_text {
    ($ty:ident, $what:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $ty::ALL
                    .into_iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| {
                        let names: Vec<&str> = $ty::ALL.iter().map(|v| v.as_str()).collect();
                        format!(
                            "invalid {} '{}' (expected one of: {})",
                            $what,
                            s,
                            names.join(", ")
                        )
                    })
            }
        }
    };
}

impl_state_text!(EyeState, "eye state");
impl_state_text!(MouthState, "mouth state");
impl_state_text!(TailPosition, "tail position");

/// Tail direction together with the angle it was bucketed from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TailPose {
    pub position: TailPosition,
    /// Degrees in `[0, 360)`, 0 pointing right, counter-clockwise positive.
    pub angle: f64,
}

/// The combined per-image body-part classification.
///
/// Tail position and angle are stored as one [`TailPose`], so the angle is
/// present exactly when the position is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyPartState {
    pub eye_state: Option<EyeState>,
    pub mouth_state: Option<MouthState>,
    pub tail: Option<TailPose>,
}

impl BodyPartState {
    pub fn new(
        eye_state: Option<EyeState>,
        mouth_state: Option<MouthState>,
        tail: Option<TailPose>,
    ) -> Self {
        Self {
            eye_state,
            mouth_state,
            tail,
        }
    }

    pub fn tail_position(&self) -> Option<TailPosition> {
        self.tail.map(|t| t.position)
    }

    pub fn tail_angle(&self) -> Option<f64> {
        self.tail.map(|t| t.angle)
    }

    /// Returns true if no body part produced a state.
    pub fn is_empty(&self) -> bool {
        self.eye_state.is_none() && self.mouth_state.is_none() && self.tail.is_none()
    }
}

/// Flat wire form: `{eye_state, mouth_state, tail_position, tail_angle}`.
#[derive(Serialize, Deserialize)]
struct BodyPartStateWire {
    #[serde(default)]
    eye_state: Option<EyeState>,
    #[serde(default)]
    mouth_state: Option<MouthState>,
    #[serde(default)]
    tail_position: Option<TailPosition>,
    #[serde(default)]
    tail_angle: Option<f64>,
}

impl Serialize for BodyPartState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        BodyPartStateWire {
            eye_state: self.eye_state,
            mouth_state: self.mouth_state,
            tail_position: self.tail_position(),
            tail_angle: self.tail_angle(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BodyPartState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = BodyPartStateWire::deserialize(deserializer)?;
        let tail = match (wire.tail_position, wire.tail_angle) {
            (Some(position), Some(angle)) => Some(TailPose { position, angle }),
            (None, None) => None,
            _ => {
                return Err(serde::de::Error::custom(
                    "tail_position and tail_angle must be given together",
                ))
            }
        };
        Ok(BodyPartState {
            eye_state: wire.eye_state,
            mouth_state: wire.mouth_state,
            tail,
        })
    }
}
