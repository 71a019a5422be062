use serde::Serialize;

use super::{classify, EmotionLabel};
use crate::model::{EyeState, MouthState, TailPosition};

/// One fully expanded combination of optional part states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub eye_state: Option<EyeState>,
    pub mouth_state: Option<MouthState>,
    pub tail_position: Option<TailPosition>,
    pub emotion: EmotionLabel,
}

fn with_absent<T: Copy>(values: &[T]) -> Vec<Option<T>> {
    std::iter::once(None)
        .chain(values.iter().copied().map(Some))
        .collect()
}

/// Every eye, mouth and tail combination (absent included) with its label.
///
/// Rows are ordered by eye, then mouth, then tail, absent first.
pub fn decision_table() -> Vec<TableRow> {
    let eyes = with_absent(&EyeState::ALL);
    let mouths = with_absent(&MouthState::ALL);
    let tails = with_absent(&TailPosition::ALL);

    let mut rows = Vec::with_capacity(eyes.len() * mouths.len() * tails.len());
    for &eye_state in &eyes {
        for &mouth_state in &mouths {
            for &tail_position in &tails {
                rows.push(TableRow {
                    eye_state,
                    mouth_state,
                    tail_position,
                    emotion: classify(eye_state, mouth_state, tail_position),
                });
            }
        }
    }
    rows
}
