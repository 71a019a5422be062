//! Multi-frame behavior summary.
//!
//! A clip gives one [`BodyPartState`] per frame. [`summarize`] reduces them
//! to the state that best describes the whole clip, which can then be fed to
//! [`aggregate`](crate::emotion::aggregate) like a single frame.

use crate::analysis::tail::normalize_angle;
use crate::model::{BodyPartState, TailPose};

/// Most common value, ties resolved by first appearance.
pub fn dominant<T: PartialEq + Copy>(values: &[T]) -> Option<T> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for &value in values {
        match counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, n)) => *n += 1,
            None => counts.push((value, 1)),
        }
    }

    let mut best: Option<(T, usize)> = None;
    for (value, n) in counts {
        if best.map_or(true, |(_, m)| n > m) {
            best = Some((value, n));
        }
    }
    best.map(|(value, _)| value)
}

/// Circular mean of angles in degrees, `[0, 360)`.
///
/// Returns `None` for an empty slice or when the angles cancel out.
pub fn circular_mean(angles: &[f64]) -> Option<f64> {
    if angles.is_empty() {
        return None;
    }
    let (sin, cos) = angles.iter().fold((0.0, 0.0), |(s, c), a| {
        let (sa, ca) = a.to_radians().sin_cos();
        (s + sa, c + ca)
    });
    if sin.hypot(cos) < 1e-9 {
        return None;
    }
    Some(normalize_angle(sin.atan2(cos).to_degrees()))
}

/// Combines per-frame states into one.
///
/// Each part takes its dominant value over the frames where it was
/// detected. The tail angle is the circular mean over frames showing the
/// dominant tail position. Returns `None` if no frame has any part.
pub fn summarize(states: &[BodyPartState]) -> Option<BodyPartState> {
    let eyes: Vec<_> = states.iter().filter_map(|s| s.eye_state).collect();
    let mouths: Vec<_> = states.iter().filter_map(|s| s.mouth_state).collect();
    let tails: Vec<TailPose> = states.iter().filter_map(|s| s.tail).collect();

    let positions: Vec<_> = tails.iter().map(|t| t.position).collect();
    let tail = dominant(&positions).map(|position| {
        let angles: Vec<f64> = tails
            .iter()
            .filter(|t| t.position == position)
            .map(|t| t.angle)
            .collect();
        TailPose {
            position,
            angle: circular_mean(&angles).unwrap_or_else(|| position.center_angle()),
        }
    });

    let summary = BodyPartState::new(dominant(&eyes), dominant(&mouths), tail);
    (!summary.is_empty()).then_some(summary)
}
