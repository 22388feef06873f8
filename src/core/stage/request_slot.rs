//=========================================================================
// Stage Request Slot
//=========================================================================
//
// Holds the single live stage-switch request.
//
// Menus, scripts and death handling submit here during a tick. The frame
// loop stops as soon as the slot is occupied, and the outer loop takes
// the request at the top of its next iteration.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::StageSwitchRequest;

//=== StageRequestSlot ====================================================

/// One-element mailbox for stage-switch requests. Last writer wins.
#[derive(Debug, Clone, Default)]
pub struct StageRequestSlot {
    pending: Option<StageSwitchRequest>,
}

impl StageRequestSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Submits a request, replacing any request not yet consumed.
    pub fn submit(&mut self, request: StageSwitchRequest) {
        if let Some(previous) = self.pending.replace(request) {
            debug!(
                "Stage request {:?} superseded by {:?}",
                previous.action, request.action
            );
        }
    }

    /// Returns the pending request, if any.
    pub fn pending(&self) -> Option<&StageSwitchRequest> {
        self.pending.as_ref()
    }

    /// Returns true if a request is waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending request, leaving the slot empty.
    pub fn take(&mut self) -> Option<StageSwitchRequest> {
        self.pending.take()
    }

    /// Drops any pending request ("stay in the current stage").
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
