use std::fmt;
use std::sync::{Mutex, MutexGuard};

use crate::game::CheckersGame;


pub const DEFAULT_MAX_SESSIONS: usize = 50;

// Index of a slot in `SessionRegistry`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SessionId(usize);

impl SessionId {
    pub fn index(self) -> usize { self.0 }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "#{}", self.0) }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RegistryFull;

impl fmt::Display for RegistryFull {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "all game slots are taken")
    }
}

// Board, turn and the active flag are guarded together by the slot lock.
#[derive(Debug)]
pub struct GameSlot {
    pub game: CheckersGame,
    pub active: bool,
}

// Fixed pool of game slots. A slot is free iff it's not active.
pub struct SessionRegistry {
    slots: Vec<Mutex<GameSlot>>,
    // Serializes scan-and-claim. Gameplay never takes this lock.
    allocation: Mutex<()>,
}

impl SessionRegistry {
    pub fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Mutex::new(GameSlot { game: CheckersGame::new(), active: false }))
            .collect();
        SessionRegistry { slots, allocation: Mutex::new(()) }
    }

    pub fn capacity(&self) -> usize { self.slots.len() }

    // Claims the first free slot and resets it to the starting position.
    pub fn allocate(&self) -> Result<SessionId, RegistryFull> {
        let _allocation = self.allocation.lock().unwrap();
        for (index, slot) in self.slots.iter().enumerate() {
            let mut slot = slot.lock().unwrap();
            if !slot.active {
                *slot = GameSlot { game: CheckersGame::new(), active: true };
                return Ok(SessionId(index));
            }
        }
        Err(RegistryFull)
    }

    // Marks the slot as free. Releasing a free slot is a no-op.
    pub fn release(&self, id: SessionId) { self.slot(id).active = false; }

    pub fn slot(&self, id: SessionId) -> MutexGuard<'_, GameSlot> {
        self.slots[id.0].lock().unwrap()
    }

    pub fn is_active(&self, id: SessionId) -> bool { self.slot(id).active }

    pub fn num_active(&self) -> usize {
        self.slots.iter().filter(|slot| slot.lock().unwrap().active).count()
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use itertools::Itertools;

    use super::*;
    use crate::board::TurnMove;
    use crate::coord::Coord;
    use crate::force::Force;

    #[test]
    fn allocate_until_full() {
        let registry = SessionRegistry::new(2);
        let a = registry.allocate().unwrap();
        let b = registry.allocate().unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.allocate(), Err(RegistryFull));
        assert_eq!(registry.num_active(), 2);
    }

    #[test]
    fn released_slot_is_reused_with_fresh_board() {
        let registry = SessionRegistry::new(1);
        let id = registry.allocate().unwrap();
        let mv = TurnMove {
            from: Coord::from_zero_based(2, 1),
            to: Coord::from_zero_based(3, 2),
        };
        registry.slot(id).game.try_turn(Force::White, mv).unwrap();
        registry.release(id);
        registry.release(id);
        assert!(!registry.is_active(id));
        assert_eq!(registry.num_active(), 0);

        let id2 = registry.allocate().unwrap();
        assert_eq!(id2, id);
        let slot = registry.slot(id2);
        assert!(slot.active);
        assert_eq!(slot.game.active_force(), Force::White);
        assert_eq!(slot.game.board(), &crate::board::Board::new());
    }

    #[test]
    fn concurrent_allocations_get_distinct_slots() {
        let registry = Arc::new(SessionRegistry::new(8));
        let handles = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.allocate().unwrap())
            })
            .collect_vec();
        let ids = handles.into_iter().map(|h| h.join().unwrap()).sorted().collect_vec();
        assert_eq!(ids.iter().map(|id| id.index()).collect_vec(), (0..8).collect_vec());
        assert_eq!(registry.allocate(), Err(RegistryFull));
    }
}
