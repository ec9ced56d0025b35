use std::sync::Mutex;


#[derive(Debug, PartialEq, Eq)]
pub enum MatchmakingResult<C> {
    // The connection is parked until the next arrival.
    Waiting,
    // The earlier arrival comes first: it plays white.
    Paired(C, C),
}

// Pairs connections in arrival order. At most one connection waits at any time.
pub struct Matchmaker<C> {
    waiting: Mutex<Option<C>>,
}

impl<C> Matchmaker<C> {
    pub fn new() -> Self { Matchmaker { waiting: Mutex::new(None) } }

    pub fn offer(&self, conn: C) -> MatchmakingResult<C> {
        let mut waiting = self.waiting.lock().unwrap();
        match waiting.take() {
            None => {
                *waiting = Some(conn);
                MatchmakingResult::Waiting
            }
            Some(first) => MatchmakingResult::Paired(first, conn),
        }
    }

    pub fn has_waiting(&self) -> bool { self.waiting.lock().unwrap().is_some() }
}
