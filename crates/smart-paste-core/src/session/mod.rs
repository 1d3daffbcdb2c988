mod shared;
mod state;

pub use {
    shared::SharedSession,
    state::{ResolvedContent, SessionState, TriggerOutcome},
};
