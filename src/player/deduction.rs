use super::board::PlayerBoard;
use crate::Position;
use itertools::Itertools;
use log::trace;
use std::collections::HashSet;

/// Conclusions of one deduction pass. Both lists are deduplicated and free
/// of anything already in the known-mine set handed to [`deduce`]; order
/// follows the row-major sensor sweep.
#[derive(Debug, Default)]
pub(super) struct Deductions {
    pub mines: Vec<Position>,
    pub safe: Vec<Position>,
}

/// Runs the three deduction phases over the current board view.
///
/// `known_mines` is the session's accumulated knowledge; mines it already
/// contains are not reported again, but they do participate in the
/// safe-cell arithmetic.
pub(super) fn deduce(board: &PlayerBoard, known_mines: &HashSet<Position>) -> Deductions {
    let sensors = board.sensors();
    let mut known = known_mines.clone();
    let mut result = Deductions::default();

    direct_mines(board, &sensors, &mut known, &mut result);
    direct_safe(board, &sensors, &known, &mut result);

    // Overlap reasoning is comparatively expensive and only consulted once
    // the cheap counting rules stop producing safe moves.
    if result.safe.is_empty() {
        overlap_deduction(board, &sensors, &mut known, &mut result);
    }

    result
}

/// Phase A: a sensor whose hidden-neighbor count equals its hint has no
/// slack left; every hidden neighbor is a mine.
fn direct_mines(
    board: &PlayerBoard,
    sensors: &[Position],
    known: &mut HashSet<Position>,
    out: &mut Deductions,
) {
    for &pos in sensors {
        let Some(hint) = board.hint(pos) else { continue };
        let hidden = board.hidden_neighbors(pos);

        if hidden.len() == hint as usize {
            for neighbor in hidden {
                if known.insert(neighbor) {
                    trace!("sensor {pos:?} pins mine at {neighbor:?}");
                    out.mines.push(neighbor);
                }
            }
        }
    }
}

/// Phase B: when the known mines among a sensor's hidden neighbors already
/// account for its whole hint, the remaining hidden neighbors are safe.
fn direct_safe(
    board: &PlayerBoard,
    sensors: &[Position],
    known: &HashSet<Position>,
    out: &mut Deductions,
) {
    let mut queued: HashSet<Position> = HashSet::new();

    for &pos in sensors {
        let Some(hint) = board.hint(pos) else { continue };
        let hidden = board.hidden_neighbors(pos);
        let clear: Vec<Position> = hidden
            .iter()
            .copied()
            .filter(|p| !known.contains(p))
            .collect();

        if hidden.len() - clear.len() == hint as usize {
            for neighbor in clear {
                if queued.insert(neighbor) {
                    out.safe.push(neighbor);
                }
            }
        }
    }
}

/// A sensor prepared for overlap comparison: its unflagged hidden
/// neighborhood and how many of those cells must still be mines.
#[derive(Debug)]
struct OpenSensor {
    pos: Position,
    unflagged: HashSet<Position>,
    need: usize,
}

/// Phase C: set-difference reasoning over pairs of sensors that share part
/// of their hidden neighborhood.
///
/// For an ordered pair (T, V) with a nonempty shared unflagged region:
/// - equal need with the shared region covering all of T's unflagged
///   cells means V's need is satisfiable inside T's cells alone, so V's
///   exclusive cells are safe;
/// - V needing strictly more than T, with exactly need-delta exclusive
///   cells, forces every exclusive cell to be a mine.
fn overlap_deduction(
    board: &PlayerBoard,
    sensors: &[Position],
    known: &mut HashSet<Position>,
    out: &mut Deductions,
) {
    // Sensors whose hint is already matched by their hidden-neighbor count
    // carry no overlap information; phase A has them fully resolved.
    let open: Vec<OpenSensor> = sensors
        .iter()
        .filter_map(|&pos| {
            let hint = board.hint(pos)? as usize;
            let hidden = board.hidden_neighbors(pos);
            if hidden.len() <= hint {
                return None;
            }
            let unflagged: HashSet<Position> = hidden
                .iter()
                .copied()
                .filter(|&p| !board.is_flagged(p))
                .collect();
            let need = hint.saturating_sub(hidden.len() - unflagged.len());
            Some(OpenSensor {
                pos,
                unflagged,
                need,
            })
        })
        .collect();

    let mut queued_safe: HashSet<Position> = HashSet::new();

    for (t, v) in open.iter().cartesian_product(open.iter()) {
        if t.pos == v.pos {
            continue;
        }

        let shared: HashSet<Position> =
            t.unflagged.intersection(&v.unflagged).copied().collect();
        if shared.is_empty() {
            continue;
        }

        if v.need == t.need && shared.len() == t.unflagged.len() {
            // Whatever satisfies T lives entirely in the shared region, and
            // V asks for nothing beyond it.
            for &pos in v.unflagged.difference(&shared) {
                if queued_safe.insert(pos) {
                    trace!("overlap of {:?}/{:?} clears {pos:?}", t.pos, v.pos);
                    out.safe.push(pos);
                }
            }
        }

        if v.need > t.need {
            let exclusive: Vec<Position> =
                v.unflagged.difference(&shared).copied().collect();
            // Only an exact count match localizes the excess mines.
            if exclusive.len() == v.need - t.need {
                for pos in exclusive {
                    if known.insert(pos) {
                        trace!("overlap of {:?}/{:?} pins mine at {pos:?}", t.pos, v.pos);
                        out.mines.push(pos);
                    }
                }
            }
        }
    }
}
