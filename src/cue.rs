/// The five prompts a round can throw at the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum CueKind {
    Jab,
    Cross,
    Hook,
    Uppercut,
    Block,
}

/// Fixed key table. Index order matches `CueKind::ALL`.
const KEY_BINDINGS: [(CueKind, char, &str); 5] = [
    (CueKind::Jab, 'j', "J"),
    (CueKind::Cross, 'k', "K"),
    (CueKind::Hook, 'l', "L"),
    (CueKind::Uppercut, 'i', "I"),
    (CueKind::Block, ' ', "SPACE"),
];

impl CueKind {
    pub const ALL: [CueKind; 5] = [
        CueKind::Jab,
        CueKind::Cross,
        CueKind::Hook,
        CueKind::Uppercut,
        CueKind::Block,
    ];

    fn binding(self) -> (CueKind, char, &'static str) {
        KEY_BINDINGS[self as usize]
    }

    /// Key that answers this cue.
    pub fn key(self) -> char {
        self.binding().1
    }

    /// Label shown next to the prompt, e.g. "J" or "SPACE".
    pub fn key_label(self) -> &'static str {
        self.binding().2
    }

    /// Maps a pressed key back to an action. Case-insensitive.
    pub fn from_key(c: char) -> Option<CueKind> {
        let c = c.to_ascii_lowercase();
        KEY_BINDINGS
            .iter()
            .find(|(_, key, _)| *key == c)
            .map(|(kind, _, _)| *kind)
    }

    pub fn punch_sound(self) -> Sound {
        match self {
            CueKind::Jab | CueKind::Cross => Sound::LightPunch,
            CueKind::Hook | CueKind::Uppercut => Sound::HeavyPunch,
            CueKind::Block => Sound::Block,
        }
    }
}

/// Sounds the engine asks the audio collaborator to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Sound {
    LightPunch,
    HeavyPunch,
    Block,
    StreakMilestone,
    HeartLoss,
    Miss,
}

/// A cue that is on screen and waiting for an answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingCue {
    pub kind: CueKind,
    pub issued_at: f64,
    pub display_duration: f64,
    pub timing_window: f64,
    pub resolved: bool,
}

impl PendingCue {
    pub fn new(kind: CueKind, issued_at: f64, display_duration: f64, timing_window: f64) -> Self {
        Self {
            kind,
            issued_at,
            display_duration,
            timing_window,
            resolved: false,
        }
    }

    pub fn expected_action(&self) -> CueKind {
        self.kind
    }

    /// Instant after which the cue counts as missed.
    pub fn deadline(&self) -> f64 {
        self.issued_at + self.display_duration
    }

    /// Reference instant for timing offsets: the middle of the display window.
    pub fn midpoint(&self) -> f64 {
        self.issued_at + self.display_duration * 0.5
    }

    /// Signed offset of `now` from the midpoint. Negative is early.
    pub fn timing_offset(&self, now: f64) -> f64 {
        now - self.midpoint()
    }
}
