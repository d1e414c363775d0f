//! Deterministic in-memory dataset used when no reservation system is
//! wired up — the Grand Azure Hotel, four rooms, three guests with
//! confirmed bookings spanning today.

use chrono::{Duration, Utc};

use ck_domain::hotel::{
    Attraction, Guest, HotelInfo, Reservation, ReservationStatus, Room, RoomUpgrade,
};

use crate::directory::{HotelDirectory, NameLookup, NameSuggestion};

pub struct MockDirectory {
    info: HotelInfo,
    rooms: Vec<Room>,
    upgrades: Vec<RoomUpgrade>,
    guests: Vec<Guest>,
    reservations: Vec<Reservation>,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDirectory {
    pub fn new() -> Self {
        let today = Utc::now().date_naive();
        let iso = |days: i64| (today + Duration::days(days)).format("%Y-%m-%d").to_string();

        let info = HotelInfo {
            id: "1".into(),
            name: "The Grand Azure Hotel".into(),
            address: "1 Marina Boulevard".into(),
            city: "Singapore".into(),
            country: "Singapore".into(),
            phone: "+65 6888 8888".into(),
            email: "info@grandazure.com".into(),
            website: "https://grandazure.com".into(),
            description: "A luxury 5-star hotel overlooking Marina Bay, offering world-class amenities and personalized service.".into(),
            amenities: [
                "Infinity Pool", "Spa & Wellness Center", "Fitness Center",
                "Azure Restaurant", "Rooftop Bar", "Business Center",
                "Concierge Service", "Valet Parking", "Free Wi-Fi",
                "Room Service 24/7", "Laundry Service", "Airport Shuttle",
            ]
            .map(String::from)
            .to_vec(),
            check_in_time: "3:00 PM".into(),
            check_out_time: "11:00 AM".into(),
            wifi_password: "AZURE2024".into(),
            emergency_contact: "+65 6888 8999".into(),
            nearby_attractions: vec![
                attraction("Gardens by the Bay", "0.5 km", "Iconic nature park with Supertrees and Cloud Forest"),
                attraction("Marina Bay Sands", "0.3 km", "Entertainment complex with SkyPark observation deck"),
                attraction("Merlion Park", "1.0 km", "Iconic Singapore landmark and photo spot"),
                attraction("Chinatown", "2.5 km", "Vibrant cultural district with food and shopping"),
            ],
        };

        let rooms = vec![
            Room {
                id: "room-1".into(),
                room_number: "1204".into(),
                room_type: "standard".into(),
                floor: 12,
                price_per_night: 350.0,
                currency: "SGD".into(),
                max_occupancy: 2,
                bed_type: "King".into(),
                amenities: ["City View", "Mini Bar", "Rain Shower", "55\" Smart TV", "Nespresso Machine"]
                    .map(String::from)
                    .to_vec(),
                is_available: true,
                description: "Elegant room with city skyline views and modern amenities.".into(),
            },
            Room {
                id: "room-2".into(),
                room_number: "1508".into(),
                room_type: "deluxe".into(),
                floor: 15,
                price_per_night: 520.0,
                currency: "SGD".into(),
                max_occupancy: 2,
                bed_type: "King".into(),
                amenities: [
                    "Marina Bay View", "Mini Bar", "Rainfall Shower", "65\" Smart TV",
                    "Nespresso Machine", "Bathrobe & Slippers", "Turndown Service",
                ]
                .map(String::from)
                .to_vec(),
                is_available: true,
                description: "Spacious room with panoramic Marina Bay views and premium touches.".into(),
            },
            Room {
                id: "room-3".into(),
                room_number: "2001".into(),
                room_type: "suite".into(),
                floor: 20,
                price_per_night: 880.0,
                currency: "SGD".into(),
                max_occupancy: 3,
                bed_type: "King + Sofa Bed".into(),
                amenities: [
                    "Panoramic Bay View", "Separate Living Area", "Walk-in Closet", "Jacuzzi Tub",
                    "Premium Mini Bar", "75\" Smart TV", "Butler Service", "Complimentary Breakfast",
                ]
                .map(String::from)
                .to_vec(),
                is_available: true,
                description: "Luxurious suite with separate living area and butler service.".into(),
            },
            Room {
                id: "room-4".into(),
                room_number: "2501".into(),
                room_type: "penthouse".into(),
                floor: 25,
                price_per_night: 2200.0,
                currency: "SGD".into(),
                max_occupancy: 4,
                bed_type: "King + Twin".into(),
                amenities: [
                    "360° Panoramic View", "Private Terrace", "Full Kitchen", "Dining Room",
                    "Private Pool", "Home Theater", "Butler Service", "Complimentary Spa",
                    "Airport Transfer",
                ]
                .map(String::from)
                .to_vec(),
                is_available: true,
                description: "The pinnacle of luxury — a private penthouse with terrace pool and 360° views.".into(),
            },
        ];

        let upgrades = vec![
            upgrade("upgrade-1", "standard", "Deluxe Room", 170.0,
                "Upgrade to a Deluxe Room with Marina Bay views",
                &["Bay View", "Turndown Service", "Premium Amenities"]),
            upgrade("upgrade-2", "standard", "Suite", 530.0,
                "Upgrade to a Suite with living area and butler service",
                &["Living Area", "Jacuzzi", "Butler Service", "Free Breakfast"]),
            upgrade("upgrade-3", "deluxe", "Suite", 360.0,
                "Upgrade to a Suite with living area and butler service",
                &["Living Area", "Jacuzzi", "Butler Service", "Free Breakfast"]),
            upgrade("upgrade-4", "deluxe", "Penthouse", 1680.0,
                "Upgrade to the Penthouse with private pool and terrace",
                &["Private Pool", "Terrace", "360° Views", "Home Theater"]),
        ];

        let guests = vec![
            Guest {
                id: "guest-1".into(),
                first_name: "James".into(),
                last_name: "Chen".into(),
                email: "james.chen@email.com".into(),
                phone: "+65 9123 4567".into(),
                nationality: "Singapore".into(),
                passport_number: "E1234567A".into(),
                date_of_birth: "1985-03-15".into(),
            },
            Guest {
                id: "guest-2".into(),
                first_name: "Sarah".into(),
                last_name: "Williams".into(),
                email: "sarah.w@email.com".into(),
                phone: "+44 7700 900123".into(),
                nationality: "United Kingdom".into(),
                passport_number: "GB9876543".into(),
                date_of_birth: "1990-07-22".into(),
            },
            Guest {
                id: "guest-3".into(),
                first_name: "Yuki".into(),
                last_name: "Tanaka".into(),
                email: "yuki.t@email.com".into(),
                phone: "+81 90 1234 5678".into(),
                nationality: "Japan".into(),
                passport_number: "TK5551234".into(),
                date_of_birth: "1988-11-08".into(),
            },
        ];

        let reservations = vec![
            Reservation {
                id: "res-1".into(),
                confirmation_code: "GAH-2024-001".into(),
                guest_id: "guest-1".into(),
                room_id: "room-1".into(),
                check_in_date: iso(0),
                check_out_date: iso(3),
                number_of_guests: 2,
                status: ReservationStatus::Confirmed,
                special_requests: Some("High floor, extra pillows".into()),
                total_amount: 1050.0,
                currency: "SGD".into(),
                guest: None,
                room: None,
            },
            Reservation {
                id: "res-2".into(),
                confirmation_code: "GAH-2024-002".into(),
                guest_id: "guest-2".into(),
                room_id: "room-2".into(),
                check_in_date: iso(0),
                check_out_date: iso(5),
                number_of_guests: 1,
                status: ReservationStatus::Confirmed,
                special_requests: None,
                total_amount: 2600.0,
                currency: "SGD".into(),
                guest: None,
                room: None,
            },
            Reservation {
                id: "res-3".into(),
                confirmation_code: "GAH-2024-003".into(),
                guest_id: "guest-3".into(),
                room_id: "room-3".into(),
                check_in_date: iso(0),
                check_out_date: iso(2),
                number_of_guests: 2,
                status: ReservationStatus::Confirmed,
                special_requests: Some("Late check-in, Japanese newspaper".into()),
                total_amount: 1760.0,
                currency: "SGD".into(),
                guest: None,
                room: None,
            },
        ];

        Self { info, rooms, upgrades, guests, reservations }
    }

    pub fn guest_by_passport(&self, passport_number: &str) -> Option<&Guest> {
        self.guests.iter().find(|g| g.passport_number == passport_number)
    }

    pub fn room_by_id(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }

    /// Attach the guest and room records to a reservation for the wire.
    fn enrich(&self, reservation: &Reservation) -> Reservation {
        let mut r = reservation.clone();
        r.guest = self.guests.iter().find(|g| g.id == r.guest_id).cloned();
        r.room = self.rooms.iter().find(|rm| rm.id == r.room_id).cloned();
        r
    }

    fn confirmed_for_guest(&self, guest_id: &str) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.guest_id == guest_id && r.status == ReservationStatus::Confirmed)
    }
}

#[async_trait::async_trait]
impl HotelDirectory for MockDirectory {
    async fn hotel_info(&self) -> HotelInfo {
        self.info.clone()
    }

    async fn available_rooms(&self, _check_in: Option<&str>, _check_out: Option<&str>) -> Vec<Room> {
        // The mock inventory ignores stay dates; everything marked
        // available is offered.
        self.rooms.iter().filter(|r| r.is_available).cloned().collect()
    }

    async fn room_upgrades(&self, room_type: &str) -> Vec<RoomUpgrade> {
        self.upgrades
            .iter()
            .filter(|u| u.from_room_type.eq_ignore_ascii_case(room_type))
            .cloned()
            .collect()
    }

    async fn reservation_by_code(&self, query: &str) -> Option<Reservation> {
        self.reservations
            .iter()
            .find(|r| r.confirmation_code.eq_ignore_ascii_case(query) || r.id == query)
            .map(|r| self.enrich(r))
    }

    async fn reservation_by_passport(&self, passport_number: &str) -> Option<Reservation> {
        let guest = self.guest_by_passport(passport_number)?;
        self.confirmed_for_guest(&guest.id).map(|r| self.enrich(r))
    }

    async fn reservation_by_name(&self, first_name: &str, last_name: &str) -> NameLookup {
        let exact = self.guests.iter().find(|g| {
            g.first_name.eq_ignore_ascii_case(first_name)
                && g.last_name.eq_ignore_ascii_case(last_name)
        });

        if let Some(guest) = exact {
            if let Some(r) = self.confirmed_for_guest(&guest.id) {
                return NameLookup { reservation: Some(self.enrich(r)), suggestions: Vec::new() };
            }
        }

        // No bookable exact match — collect near misses (either name
        // component matches) so the concierge can ask "did you mean".
        let suggestions = self
            .guests
            .iter()
            .filter(|g| {
                g.first_name.eq_ignore_ascii_case(first_name)
                    || g.last_name.eq_ignore_ascii_case(last_name)
            })
            .map(|g| NameSuggestion {
                first_name: g.first_name.clone(),
                last_name: g.last_name.clone(),
            })
            .collect();

        NameLookup { reservation: None, suggestions }
    }
}

fn attraction(name: &str, distance: &str, description: &str) -> Attraction {
    Attraction {
        name: name.into(),
        distance: distance.into(),
        description: description.into(),
    }
}

fn upgrade(
    id: &str,
    from: &str,
    to: &str,
    additional: f64,
    description: &str,
    highlights: &[&str],
) -> RoomUpgrade {
    RoomUpgrade {
        id: id.into(),
        from_room_type: from.into(),
        to_room_type: to.into(),
        additional_cost_per_night: additional,
        currency: "SGD".into(),
        description: description.into(),
        highlights: highlights.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn code_lookup_is_case_insensitive_and_enriched() {
        let dir = MockDirectory::new();
        let r = dir.reservation_by_code("gah-2024-001").await.unwrap();
        assert_eq!(r.id, "res-1");
        assert_eq!(r.guest.as_ref().unwrap().first_name, "James");
        assert_eq!(r.room.as_ref().unwrap().room_number, "1204");

        assert!(dir.reservation_by_code("GAH-2024-999").await.is_none());
    }

    #[tokio::test]
    async fn record_id_lookup_matches_exactly() {
        let dir = MockDirectory::new();
        assert!(dir.reservation_by_code("res-2").await.is_some());
        assert!(dir.reservation_by_code("RES-2").await.is_none());
    }

    #[tokio::test]
    async fn passport_lookup_finds_confirmed_booking() {
        let dir = MockDirectory::new();
        let r = dir.reservation_by_passport("TK5551234").await.unwrap();
        assert_eq!(r.guest.as_ref().unwrap().last_name, "Tanaka");
        assert!(dir.reservation_by_passport("XX0000000").await.is_none());
    }

    #[tokio::test]
    async fn name_lookup_exact_match() {
        let dir = MockDirectory::new();
        let lookup = dir.reservation_by_name("james", "CHEN").await;
        let r = lookup.reservation.unwrap();
        assert_eq!(r.confirmation_code, "GAH-2024-001");
        assert!(lookup.suggestions.is_empty());
    }

    #[tokio::test]
    async fn name_lookup_near_miss_suggests() {
        let dir = MockDirectory::new();
        let lookup = dir.reservation_by_name("Jams", "Chen").await;
        assert!(lookup.reservation.is_none());
        assert_eq!(lookup.suggestions.len(), 1);
        assert_eq!(lookup.suggestions[0].display(), "James Chen");
    }

    #[tokio::test]
    async fn name_lookup_total_miss_is_empty() {
        let dir = MockDirectory::new();
        let lookup = dir.reservation_by_name("Ada", "Lovelace").await;
        assert!(lookup.reservation.is_none());
        assert!(lookup.suggestions.is_empty());
    }

    #[tokio::test]
    async fn upgrades_filter_by_room_type() {
        let dir = MockDirectory::new();
        let ups = dir.room_upgrades("standard").await;
        assert_eq!(ups.len(), 2);
        assert!(ups.iter().all(|u| u.from_room_type == "standard"));
        assert!(dir.room_upgrades("penthouse").await.is_empty());
    }

    #[tokio::test]
    async fn reservation_dates_span_today() {
        let dir = MockDirectory::new();
        let r = dir.reservation_by_code("res-1").await.unwrap();
        let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
        assert_eq!(r.check_in_date, today);
        assert!(r.check_out_date > r.check_in_date);
    }
}
