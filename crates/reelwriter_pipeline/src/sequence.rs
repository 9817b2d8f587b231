//! Per-stage request sequencing.

use reelwriter_core::Stage;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued generation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    stage: Stage,
    seq: u64,
}

impl Ticket {
    /// Stage the request was issued for.
    pub fn stage(&self) -> Stage {
        self.stage
    }
}

/// Hands out increasing sequence numbers per stage.
///
/// Only the most recently issued ticket for a stage is current; a response
/// carrying any older ticket is stale.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    research: AtomicU64,
    hooks: AtomicU64,
    script: AtomicU64,
    captions: AtomicU64,
    other: AtomicU64,
}

impl RequestSequencer {
    fn counter(&self, stage: Stage) -> &AtomicU64 {
        match stage {
            Stage::Research => &self.research,
            Stage::HookSelection => &self.hooks,
            Stage::ScriptDrafting => &self.script,
            Stage::CaptionGeneration => &self.captions,
            Stage::ApiKeySetup | Stage::Complete => &self.other,
        }
    }

    /// Issue a ticket that supersedes every earlier one for `stage`.
    pub fn issue(&self, stage: Stage) -> Ticket {
        let seq = self.counter(stage).fetch_add(1, Ordering::SeqCst) + 1;
        Ticket { stage, seq }
    }

    /// True when no newer ticket has been issued for the ticket's stage.
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.counter(ticket.stage).load(Ordering::SeqCst) == ticket.seq
    }

    /// Make every outstanding ticket stale.
    pub fn invalidate_all(&self) {
        for stage in [
            Stage::Research,
            Stage::HookSelection,
            Stage::ScriptDrafting,
            Stage::CaptionGeneration,
            Stage::Complete,
        ] {
            self.counter(stage).fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_ticket_supersedes_older() {
        let sequencer = RequestSequencer::default();
        let first = sequencer.issue(Stage::HookSelection);
        let second = sequencer.issue(Stage::HookSelection);
        assert!(!sequencer.is_current(&first));
        assert!(sequencer.is_current(&second));
    }

    #[test]
    fn stages_are_independent() {
        let sequencer = RequestSequencer::default();
        let hooks = sequencer.issue(Stage::HookSelection);
        let _script = sequencer.issue(Stage::ScriptDrafting);
        assert!(sequencer.is_current(&hooks));

        sequencer.invalidate_all();
        assert!(!sequencer.is_current(&hooks));
    }
}
