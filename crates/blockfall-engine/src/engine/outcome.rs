use serde::Serialize;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    /// A newly spawned piece collided with the stack.
    ToppedOut,
    /// The player asked to quit.
    Quit,
}

/// Final result of a session, reported once when it ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub score: usize,
    pub lines_cleared: usize,
    pub pieces_locked: usize,
    pub level: usize,
    pub reason: EndReason,
}

impl SessionOutcome {
    /// Score points per experience point earned.
    pub const SCORE_PER_EXPERIENCE: usize = 10;

    /// A session counts as won when it scored at least one point.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.score > 0
    }

    /// Experience a profile earns from this session.
    #[must_use]
    pub fn experience(&self) -> usize {
        self.score / Self::SCORE_PER_EXPERIENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(score: usize) -> SessionOutcome {
        SessionOutcome {
            score,
            lines_cleared: score / 100,
            pieces_locked: 12,
            level: 1,
            reason: EndReason::ToppedOut,
        }
    }

    #[test]
    fn test_won_and_experience() {
        assert!(!outcome(0).is_won());
        assert_eq!(outcome(0).experience(), 0);
        assert!(outcome(300).is_won());
        assert_eq!(outcome(300).experience(), 30);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&SessionOutcome {
            reason: EndReason::Quit,
            ..outcome(200)
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"score":200,"lines_cleared":2,"pieces_locked":12,"level":1,"reason":"quit"}"#
        );
    }
}
