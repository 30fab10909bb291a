//! Game event types.
//!
//! Every cross-component notification is a `GameEvent`: a typed payload
//! plus a timestamp and a human-readable description. The payload is a
//! tagged union with one variant per event type, so listeners match on
//! fields instead of digging through untyped maps.

use serde::{Deserialize, Serialize};

use crate::core::{ChessmanRef, PlayerId};

/// Event type discriminant. Subscriptions are keyed by this.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    GameInitialized,
    GameStarted,
    GameStopped,
    GamePaused,
    GameResumed,
    TurnStarted,
    DiceRolled,
    EndTurn,
    TurnEnded,
    ChessmanTakeOff,
    ChessmanMoveEasing,
    ChessmanMoved,
    ChessmanOverEnd,
    BlockEffect,
    GrantNewTurn,
    GameOver,
}

impl EventKind {
    /// Stable type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EventKind::GameInitialized => "GameInitialized",
            EventKind::GameStarted => "GameStarted",
            EventKind::GameStopped => "GameStopped",
            EventKind::GamePaused => "GamePaused",
            EventKind::GameResumed => "GameResumed",
            EventKind::TurnStarted => "TurnStarted",
            EventKind::DiceRolled => "DiceRolled",
            EventKind::EndTurn => "EndTurn",
            EventKind::TurnEnded => "TurnEnded",
            EventKind::ChessmanTakeOff => "ChessmanTakeOff",
            EventKind::ChessmanMoveEasing => "ChessmanMoveEasing",
            EventKind::ChessmanMoved => "ChessmanMoved",
            EventKind::ChessmanOverEnd => "ChessmanOverEnd",
            EventKind::BlockEffect => "BlockEffect",
            EventKind::GrantNewTurn => "GrantNewTurn",
            EventKind::GameOver => "GameOver",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed event payload, one variant per [`EventKind`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventPayload {
    GameInitialized { players: Vec<PlayerId> },
    GameStarted,
    GameStopped,
    GamePaused,
    GameResumed,
    TurnStarted { player: PlayerId },
    DiceRolled { player: PlayerId, dice_value: u32 },
    EndTurn { dice_value: u32 },
    TurnEnded {
        player: PlayerId,
        dice_value: u32,
        has_extra_turn: bool,
    },
    ChessmanTakeOff { chessman: ChessmanRef },
    /// Intermediate step of a multi-step move. Cosmetic only.
    ChessmanMoveEasing {
        chessman: ChessmanRef,
        from: i32,
        to: i32,
    },
    /// Authoritative position change.
    ChessmanMoved {
        chessman: ChessmanRef,
        from: i32,
        to: i32,
    },
    ChessmanOverEnd {
        chessman: ChessmanRef,
        target_position: i32,
        end_position: i32,
        over_steps: i32,
    },
    BlockEffect { chessman: ChessmanRef, message: String },
    GrantNewTurn { chessman: ChessmanRef, message: String },
    GameOver { winner: Option<PlayerId> },
}

impl EventPayload {
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::GameInitialized { .. } => EventKind::GameInitialized,
            EventPayload::GameStarted => EventKind::GameStarted,
            EventPayload::GameStopped => EventKind::GameStopped,
            EventPayload::GamePaused => EventKind::GamePaused,
            EventPayload::GameResumed => EventKind::GameResumed,
            EventPayload::TurnStarted { .. } => EventKind::TurnStarted,
            EventPayload::DiceRolled { .. } => EventKind::DiceRolled,
            EventPayload::EndTurn { .. } => EventKind::EndTurn,
            EventPayload::TurnEnded { .. } => EventKind::TurnEnded,
            EventPayload::ChessmanTakeOff { .. } => EventKind::ChessmanTakeOff,
            EventPayload::ChessmanMoveEasing { .. } => EventKind::ChessmanMoveEasing,
            EventPayload::ChessmanMoved { .. } => EventKind::ChessmanMoved,
            EventPayload::ChessmanOverEnd { .. } => EventKind::ChessmanOverEnd,
            EventPayload::BlockEffect { .. } => EventKind::BlockEffect,
            EventPayload::GrantNewTurn { .. } => EventKind::GrantNewTurn,
            EventPayload::GameOver { .. } => EventKind::GameOver,
        }
    }

    /// The chessman this event concerns, if any.
    #[must_use]
    pub fn chessman(&self) -> Option<ChessmanRef> {
        match self {
            EventPayload::ChessmanTakeOff { chessman }
            | EventPayload::ChessmanMoveEasing { chessman, .. }
            | EventPayload::ChessmanMoved { chessman, .. }
            | EventPayload::ChessmanOverEnd { chessman, .. }
            | EventPayload::BlockEffect { chessman, .. }
            | EventPayload::GrantNewTurn { chessman, .. } => Some(*chessman),
            _ => None,
        }
    }
}

/// A published event. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Milliseconds since the Unix epoch at creation.
    pub timestamp: u64,

    pub description: String,

    pub payload: EventPayload,
}

impl GameEvent {
    /// Create an event stamped with the current time.
    pub fn new(payload: EventPayload, description: impl Into<String>) -> Self {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        Self {
            timestamp,
            description: description.into(),
            payload,
        }
    }

    #[must_use]
    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }

    /// Type name, e.g. `"ChessmanMoved"`.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        self.kind().as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_payload() {
        let chessman = ChessmanRef::new(PlayerId::new(0), 1);
        let event = GameEvent::new(
            EventPayload::ChessmanMoved { chessman, from: 2, to: 3 },
            "moved",
        );

        assert_eq!(event.kind(), EventKind::ChessmanMoved);
        assert_eq!(event.event_type(), "ChessmanMoved");
        assert_eq!(event.payload.chessman(), Some(chessman));
        assert!(event.timestamp > 0);
    }

    #[test]
    fn test_lifecycle_events_have_no_chessman() {
        assert_eq!(EventPayload::GameStarted.chessman(), None);
        assert_eq!(EventPayload::GameOver { winner: None }.chessman(), None);
    }

    #[test]
    fn test_event_serialization() {
        let event = GameEvent::new(
            EventPayload::TurnEnded {
                player: PlayerId::new(2),
                dice_value: 6,
                has_extra_turn: true,
            },
            "turn over",
        );
        let json = serde_json::to_string(&event).unwrap();
        let deserialized: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}
