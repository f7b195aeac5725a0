use uuid::Uuid;

use crate::traits::WorldState;

/// The caller's current unit of work against world state.
///
/// Every contract operation receives one of these explicitly; nothing is
/// kept between calls.
#[derive(Clone, Copy)]
pub struct TxContext<'a> {
    tx_id: Uuid,
    state: &'a dyn WorldState,
}

impl<'a> TxContext<'a> {
    pub fn new(state: &'a dyn WorldState) -> Self {
        Self::with_tx_id(Uuid::new_v4(), state)
    }

    pub fn with_tx_id(tx_id: Uuid, state: &'a dyn WorldState) -> Self {
        Self { tx_id, state }
    }

    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    pub fn state(&self) -> &'a dyn WorldState {
        self.state
    }
}

impl std::fmt::Debug for TxContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxContext")
            .field("tx_id", &self.tx_id)
            .finish_non_exhaustive()
    }
}
