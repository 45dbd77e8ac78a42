use serde::{Deserialize, Serialize};

/// Handle for one scheduled reveal. The token only proves which
/// generation of the session scheduled it; a fired callback checks
/// liveness before touching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealToken {
    generation: u64,
}

impl RevealToken {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Owner of the reveal timers a lesson screen schedules. The browser
/// still runs the actual timeouts; this registry only decides whether a
/// callback that fires is still current. Any state-resetting action
/// (new problem, restart, teardown) cancels every outstanding token in
/// one move by bumping the generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealTimers {
    generation: u64,
}

impl RevealTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a token tied to the current generation. Tokens issued
    /// within one generation fire in the order the browser schedules
    /// them; the registry does not reorder anything.
    pub fn issue(&self) -> RevealToken {
        RevealToken {
            generation: self.generation,
        }
    }

    /// Invalidates every token issued so far.
    pub fn cancel_all(&mut self) {
        self.generation += 1;
        log::debug!("cancelled reveal timers; generation now {}", self.generation);
    }

    /// Whether a callback holding this token may still mutate state.
    pub fn is_live(&self, token: RevealToken) -> bool {
        token.generation == self.generation
    }

    /// Liveness check for a token that crossed a boundary as its raw
    /// generation number.
    pub fn is_live_generation(&self, generation: u64) -> bool {
        generation == self.generation
    }
}
