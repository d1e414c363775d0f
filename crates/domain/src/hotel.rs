//! Hotel domain records.
//!
//! Field names serialize in camelCase — these structs are the wire shape
//! consumed by the kiosk UI and embedded verbatim in model context.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelInfo {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    pub website: String,
    pub description: String,
    pub amenities: Vec<String>,
    pub check_in_time: String,
    pub check_out_time: String,
    pub wifi_password: String,
    pub emergency_contact: String,
    pub nearby_attractions: Vec<Attraction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub name: String,
    pub distance: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub floor: u32,
    pub price_per_night: f64,
    pub currency: String,
    pub max_occupancy: u32,
    pub bed_type: String,
    pub amenities: Vec<String>,
    pub is_available: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpgrade {
    pub id: String,
    pub from_room_type: String,
    pub to_room_type: String,
    pub additional_cost_per_night: f64,
    pub currency: String,
    pub description: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub passport_number: String,
    pub date_of_birth: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: String,
    pub confirmation_code: String,
    pub guest_id: String,
    pub room_id: String,
    /// ISO date (YYYY-MM-DD).
    pub check_in_date: String,
    pub check_out_date: String,
    pub number_of_guests: u32,
    pub status: ReservationStatus,
    #[serde(default)]
    pub special_requests: Option<String>,
    pub total_amount: f64,
    pub currency: String,
    /// Populated on lookup responses; absent on bare records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<Guest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl PartialEq for Reservation {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reservation_serializes_camel_case() {
        let r = Reservation {
            id: "res-9".into(),
            confirmation_code: "GAH-2024-009".into(),
            guest_id: "guest-9".into(),
            room_id: "room-9".into(),
            check_in_date: "2026-08-07".into(),
            check_out_date: "2026-08-10".into(),
            number_of_guests: 2,
            status: ReservationStatus::Confirmed,
            special_requests: None,
            total_amount: 1050.0,
            currency: "SGD".into(),
            guest: None,
            room: None,
        };
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["confirmationCode"], "GAH-2024-009");
        assert_eq!(v["status"], "confirmed");
        assert!(v.get("guest").is_none());
    }

    #[test]
    fn room_type_uses_type_key() {
        let room = Room {
            id: "room-1".into(),
            room_number: "1204".into(),
            room_type: "standard".into(),
            floor: 12,
            price_per_night: 350.0,
            currency: "SGD".into(),
            max_occupancy: 2,
            bed_type: "King".into(),
            amenities: vec![],
            is_available: true,
            description: String::new(),
        };
        let v = serde_json::to_value(&room).unwrap();
        assert_eq!(v["type"], "standard");
        assert_eq!(v["roomNumber"], "1204");
    }
}
