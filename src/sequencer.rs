/// Overlay state gating input during a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum OverlayPhase {
    /// No overlay; typing is live
    None,
    Init,
    RoundAnnounce,
    Countdown(u8),
    TimeUp,
    RoundResult,
}

impl OverlayPhase {
    pub fn blocks_typing(&self) -> bool {
        !matches!(self, OverlayPhase::None)
    }

    /// Text shown on the overlay card; the result card draws its own content
    pub fn overlay_text(&self, round_index: usize) -> Option<String> {
        match self {
            OverlayPhase::Init => Some("Initializing round...".to_string()),
            OverlayPhase::RoundAnnounce => Some(format!("Round {}.", round_index + 1)),
            OverlayPhase::Countdown(n) => Some(n.to_string()),
            OverlayPhase::TimeUp => Some("Time's up.".to_string()),
            OverlayPhase::None | OverlayPhase::RoundResult => None,
        }
    }
}

/// Phase transitions of a round, as offsets from round start
pub const ROUND_TIMELINE: [(u64, OverlayPhase); 6] = [
    (0, OverlayPhase::Init),
    (2_000, OverlayPhase::RoundAnnounce),
    (4_000, OverlayPhase::Countdown(3)),
    (5_000, OverlayPhase::Countdown(2)),
    (6_000, OverlayPhase::Countdown(1)),
    (7_000, OverlayPhase::None),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_is_sorted_and_ends_live() {
        assert!(ROUND_TIMELINE.windows(2).all(|w| w[0].0 < w[1].0));
        assert_eq!(ROUND_TIMELINE[0].1, OverlayPhase::Init);
        assert_eq!(ROUND_TIMELINE.last().map(|e| e.1), Some(OverlayPhase::None));
    }

    #[test]
    fn overlay_text() {
        assert_eq!(
            OverlayPhase::Init.overlay_text(0).as_deref(),
            Some("Initializing round...")
        );
        assert_eq!(
            OverlayPhase::RoundAnnounce.overlay_text(2).as_deref(),
            Some("Round 3.")
        );
        assert_eq!(OverlayPhase::Countdown(2).overlay_text(0).as_deref(), Some("2"));
        assert_eq!(OverlayPhase::TimeUp.overlay_text(0).as_deref(), Some("Time's up."));
        assert_eq!(OverlayPhase::RoundResult.overlay_text(0), None);
        assert_eq!(OverlayPhase::None.overlay_text(0), None);
    }

    #[test]
    fn only_none_allows_typing() {
        assert!(!OverlayPhase::None.blocks_typing());
        assert!(OverlayPhase::Countdown(1).blocks_typing());
        assert!(OverlayPhase::RoundResult.blocks_typing());
    }

    #[test]
    fn display_names() {
        assert_eq!(OverlayPhase::RoundAnnounce.to_string(), "round-announce");
        assert_eq!(OverlayPhase::TimeUp.to_string(), "time-up");
    }
}
