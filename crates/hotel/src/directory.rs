use serde::Serialize;

use ck_domain::hotel::{HotelInfo, Reservation, Room, RoomUpgrade};

/// Result of a lookup by guest name.
///
/// Exactly one of three shapes comes back: a reservation (exact
/// first+last match holding a confirmed booking), a non-empty list of
/// suggestions (guests whose first or last name matched, any status),
/// or neither.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    pub reservation: Option<Reservation>,
    pub suggestions: Vec<NameSuggestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NameSuggestion {
    pub first_name: String,
    pub last_name: String,
}

impl NameSuggestion {
    /// Render as the "First Last" string shown in clarification prompts.
    pub fn display(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Read access to hotel data. Not-found is `None`/empty, never an error —
/// lookup misses are an expected, frequent part of the check-in flow.
#[async_trait::async_trait]
pub trait HotelDirectory: Send + Sync {
    async fn hotel_info(&self) -> HotelInfo;

    /// Rooms open for booking, optionally constrained by stay dates.
    async fn available_rooms(&self, check_in: Option<&str>, check_out: Option<&str>) -> Vec<Room>;

    /// Upgrade paths offered from the given room type.
    async fn room_upgrades(&self, room_type: &str) -> Vec<RoomUpgrade>;

    /// Exact match on confirmation code (case-insensitive) or record id.
    async fn reservation_by_code(&self, query: &str) -> Option<Reservation>;

    /// Exact passport-number match against a confirmed reservation.
    async fn reservation_by_passport(&self, passport_number: &str) -> Option<Reservation>;

    /// Case-insensitive first+last name match; near-misses come back as
    /// suggestions so the conversation can recover from misheard names.
    async fn reservation_by_name(&self, first_name: &str, last_name: &str) -> NameLookup;
}
