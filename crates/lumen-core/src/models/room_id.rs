use std::fmt;

use serde::{Deserialize, Serialize};

/// Rooms the occupancy model produces forecasts for.
///
/// The numbering has a gap (8–10 do not exist); ids travel as plain integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum RoomId {
    Room1,
    Room2,
    Room3,
    Room4,
    Room5,
    Room6,
    Room7,
    Room11,
}

impl RoomId {
    /// All rooms, in the order the backend reports them.
    pub const ALL: [RoomId; 8] = [
        RoomId::Room1,
        RoomId::Room2,
        RoomId::Room3,
        RoomId::Room4,
        RoomId::Room5,
        RoomId::Room6,
        RoomId::Room7,
        RoomId::Room11,
    ];

    pub fn number(self) -> u8 {
        match self {
            RoomId::Room1 => 1,
            RoomId::Room2 => 2,
            RoomId::Room3 => 3,
            RoomId::Room4 => 4,
            RoomId::Room5 => 5,
            RoomId::Room6 => 6,
            RoomId::Room7 => 7,
            RoomId::Room11 => 11,
        }
    }
}

impl TryFrom<u8> for RoomId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        RoomId::ALL
            .into_iter()
            .find(|room| room.number() == value)
            .ok_or_else(|| format!("unknown room id {value}"))
    }
}

impl From<RoomId> for u8 {
    fn from(room: RoomId) -> Self {
        room.number()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_ids_are_rejected() {
        for n in [0u8, 8, 9, 10, 12] {
            assert!(RoomId::try_from(n).is_err(), "{n} should be rejected");
        }
    }

    #[test]
    fn serde_uses_plain_integers() {
        assert_eq!(serde_json::to_string(&RoomId::Room11).unwrap(), "11");
        let room: RoomId = serde_json::from_str("7").unwrap();
        assert_eq!(room, RoomId::Room7);
        assert!(serde_json::from_str::<RoomId>("9").is_err());
    }
}
