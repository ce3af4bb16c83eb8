//! Scoped "try move"
//!
//! Hypothetical moves are played on the live position behind a guard. The guard
//! records the cells the move touches and puts them back when it goes out of
//! scope, whichever way the caller leaves.

use std::ops::Deref;

use tracing::trace;

use crate::board::{Color, MoveEffect, Position, Undo};

use super::attack;

pub struct Probe<'a> {
    position: &'a mut Position,
    undo: Option<Undo>,
}

impl<'a> Probe<'a> {
    pub fn new(position: &'a mut Position, effect: &MoveEffect) -> Self {
        trace!(from = %effect.from, to = %effect.to, "probe");
        let undo = position.apply(effect);
        Self {
            position,
            undo: Some(undo),
        }
    }
}

impl Deref for Probe<'_> {
    type Target = Position;

    fn deref(&self) -> &Position {
        &*self.position
    }
}

impl Drop for Probe<'_> {
    fn drop(&mut self) {
        if let Some(undo) = self.undo.take() {
            self.position.undo(undo);
        }
    }
}

/// Plays `effect` hypothetically and reports whether `color`'s king is then in check.
pub fn leaves_in_check(position: &mut Position, effect: &MoveEffect, color: Color) -> bool {
    let probe = Probe::new(position, effect);
    attack::in_check(&probe, color)
}
