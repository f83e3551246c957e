use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::trace;

use crate::infra::{Action, ObservationWindow};

fn pick<R: Rng + ?Sized>(candidates: &[Action], rng: &mut R) -> Action {
    candidates.choose(rng).copied().unwrap_or(Action::Stay)
}

/// Greedy chase for the leader, unless it is walled in.
pub fn leader_action(window: &ObservationWindow) -> Action {
    if window.legal_moves().is_empty() {
        return Action::Stay;
    }
    window.greedy_chase_action()
}

/// Movement when no agent on the team sees a target.
///
/// With `keep_prev_action` a legal previous move is repeated without drawing
/// from `rng`. Without it the previous move is dropped from the candidates
/// whenever something else is available.
#[tracing::instrument(level = "trace", skip(window, rng))]
pub fn patrol_action<R: Rng + ?Sized>(
    window: &ObservationWindow,
    prev_action: Action,
    keep_prev_action: bool,
    rng: &mut R,
) -> Action {
    let mut candidates = window.legal_moves();
    if candidates.is_empty() {
        return Action::Stay;
    }

    if !keep_prev_action && candidates.contains(&prev_action) && candidates.len() > 1 {
        candidates.retain(|&action| action != prev_action);
    }

    if keep_prev_action && prev_action != Action::Stay && candidates.contains(&prev_action) {
        trace!("continuing {}", prev_action);
        return prev_action;
    }

    pick(&candidates, rng)
}

/// Movement for a non-leader while the leader chases.
///
/// A helper that sees a target chases it itself. Otherwise it follows the
/// leader's move, then tries the perpendicular axis to flank, then anything
/// legal.
#[tracing::instrument(level = "trace", skip(window, rng))]
pub fn helper_action<R: Rng + ?Sized>(
    window: &ObservationWindow,
    leader_action: Action,
    rng: &mut R,
) -> Action {
    let legal = window.legal_moves();
    if legal.is_empty() {
        return Action::Stay;
    }

    if window.contains_target() {
        let chase = window.greedy_chase_action();
        if legal.contains(&chase) {
            return chase;
        }
        return pick(&legal, rng);
    }

    if leader_action != Action::Stay && legal.contains(&leader_action) {
        return leader_action;
    }

    let flanking: Vec<Action> = legal
        .iter()
        .copied()
        .filter(|action| leader_action.orthogonal().contains(action))
        .collect();
    if !flanking.is_empty() {
        trace!("flanking {:?}", flanking);
        return pick(&flanking, rng);
    }

    pick(&legal, rng)
}
