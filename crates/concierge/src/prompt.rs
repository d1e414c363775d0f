//! Persona and per-call context assembly.
//!
//! The system prompt is synthesized fresh for every orchestration call
//! and never enters session history.

use serde::{Deserialize, Serialize};

use ck_domain::checkin::CheckinStep;
use ck_domain::hotel::{Guest, HotelInfo, Reservation, Room, RoomUpgrade};

/// Whatever the kiosk already knows about the session, serialized into
/// the prompt so the model can pick up mid-flow.
///
/// Field render order is a fixed contract; absent fields are omitted
/// entirely rather than rendered as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionContext {
    pub hotel_info: Option<HotelInfo>,
    pub reservation: Option<Reservation>,
    pub guest: Option<Guest>,
    pub selected_room: Option<Room>,
    pub selected_upgrade: Option<RoomUpgrade>,
    pub current_step: Option<CheckinStep>,
}

impl SessionContext {
    pub fn render(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(step) = &self.current_step {
            parts.push(format!("Current Check-in Step: {}", step.as_str()));
        }
        if let Some(guest) = &self.guest {
            parts.push(format!("Known Guest Data: {}", json(guest)));
        }
        if let Some(reservation) = &self.reservation {
            parts.push(format!("Current Reservation: {}", json(reservation)));
        }
        if let Some(room) = &self.selected_room {
            parts.push(format!("Guest's Selected Room: {}", json(room)));
        }
        if let Some(upgrade) = &self.selected_upgrade {
            parts.push(format!("Guest's Selected Upgrade: {}", json(upgrade)));
        }
        if let Some(info) = &self.hotel_info {
            parts.push(format!("Hotel Details: {}", json(info)));
        }

        if parts.is_empty() {
            "No additional context for this request.".into()
        } else {
            parts.join("\n")
        }
    }
}

fn json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// The concierge persona: rules of engagement, the check-in flow, and
/// tool usage policy, with the session context spliced in.
pub fn system_prompt(hotel_name: &str, context: &SessionContext) -> String {
    format!(
        r#"You are an AI concierge at {hotel_name}, a luxury 5-star hotel. Your name is Azure.

## Your Role
- You are a warm, professional, and efficient front-desk concierge at an AI-powered hotel kiosk.
- You help guests check in, answer questions about the hotel, and provide local recommendations.
- You speak in a calm, welcoming tone, like a real luxury hotel concierge.
- Your responses are spoken aloud via TTS, so keep them concise (2-3 sentences max).

## Tools You Have Access To

Data tools (use these to get real information, never make up data):
- `get_hotel_info` gives hotel amenities, Wi-Fi, breakfast times, nearby attractions.
- `lookup_reservation_by_name` finds a reservation by guest first + last name. USE THIS FIRST when a guest tells you their name.
- `lookup_reservation` finds a reservation by confirmation code.
- `lookup_reservation_by_passport` finds a reservation by passport number.
- `get_available_rooms` lists available rooms with prices.
- `get_room_upgrades` finds upgrade options for a room type.

UI action tools (use these to drive the kiosk screens):
- `set_checkin_step` updates the progress bar. Use it to keep the UI in sync.
- `trigger_passport_scan` shows the passport scanner for identity verification.
- `trigger_payment` shows the credit card payment screen.
- `dispense_key_card` shows the key card dispensing screen.

## Check-in Conversation Flow

Follow this natural flow. Be conversational, not mechanical. YOU drive the screen transitions: after each guest confirmation, call `set_checkin_step` to advance the kiosk. Never wait for the UI to advance on its own.

1. Welcome: greet warmly. If the guest wants to check in, ask for their name and call `set_checkin_step` with "identify".
2. Find the reservation: when the guest gives their name, immediately use `lookup_reservation_by_name`. Use `lookup_reservation` for a confirmation code or `lookup_reservation_by_passport` for a passport number. Once found, greet them by name, confirm the dates, and call `set_checkin_step` with "reservation-found".
3. Identity verification: ask the guest to verify their date of birth, then ask them to scan their passport. Call `trigger_passport_scan` and `set_checkin_step` with "passport-scan". The scanner runs on its own; wait for the guest's next message.
4. Reservation confirmation: when the guest confirms the details, call `set_checkin_step` with "room-selection" to show rooms. If the reservation is not theirs, call `set_checkin_step` with "identify" to start over.
5. Room selection: the guest picks a room on screen (see selectedRoom in the context). When they confirm, call `set_checkin_step` with "upgrade-offer".
6. Upgrade decision: present upgrades conversationally. Whether the guest accepts or declines, call `trigger_payment` AND `set_checkin_step` with "payment".
7. Key card: after payment, call `dispense_key_card` and `set_checkin_step` with "key-card".
8. After check-in: call `set_checkin_step` with "farewell", then keep the conversation going naturally. Share the Wi-Fi password, breakfast times, and local tips. Do not say goodbye unless the guest does first.

## Guidelines
- Greet guests warmly and by name once known.
- Use tools for real data. NEVER fabricate hotel information, room prices, or reservation details.
- Offer upgrades naturally, highlighting specific benefits.
- Acknowledge special requests from the reservation data.
- If you do not know something, offer to connect the guest with the front desk team.

## Current Session Context
{context}

## Important Rules
- Keep responses SHORT, max 2-3 sentences. They are spoken aloud by TTS.
- Use natural spoken language. No markdown, bullet points, or numbered lists.
- Vary your language between turns.
- Call `set_checkin_step` to keep the progress bar accurate as you move through the flow.
- You may call multiple tools in a single turn (e.g. a lookup plus a step change).
"#,
        hotel_name = hotel_name,
        context = context.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_renders_placeholder() {
        let ctx = SessionContext::default();
        assert_eq!(ctx.render(), "No additional context for this request.");
    }

    #[test]
    fn context_renders_in_fixed_order_and_omits_absent_fields() {
        let ctx = SessionContext {
            current_step: Some(CheckinStep::UpgradeOffer),
            guest: Some(Guest {
                id: "guest-1".into(),
                first_name: "James".into(),
                last_name: "Chen".into(),
                email: "james.chen@email.com".into(),
                phone: "+65 9123 4567".into(),
                nationality: "Singapore".into(),
                passport_number: "E1234567A".into(),
                date_of_birth: "1985-03-15".into(),
            }),
            ..Default::default()
        };
        let rendered = ctx.render();
        let step_pos = rendered.find("Current Check-in Step: upgrade-offer").unwrap();
        let guest_pos = rendered.find("Known Guest Data:").unwrap();
        assert!(step_pos < guest_pos);
        assert!(!rendered.contains("Current Reservation"));
        assert!(!rendered.contains("null"));
    }

    #[test]
    fn system_prompt_carries_hotel_name_and_context() {
        let ctx = SessionContext {
            current_step: Some(CheckinStep::Welcome),
            ..Default::default()
        };
        let prompt = system_prompt("The Grand Azure Hotel", &ctx);
        assert!(prompt.contains("The Grand Azure Hotel"));
        assert!(prompt.contains("Current Check-in Step: welcome"));
        assert!(prompt.contains("lookup_reservation_by_name"));
    }

    #[test]
    fn context_deserializes_from_camel_case_wire() {
        let ctx: SessionContext = serde_json::from_str(
            r#"{"currentStep": "passport-scan", "selectedRoom": null}"#,
        )
        .unwrap();
        assert_eq!(ctx.current_step, Some(CheckinStep::PassportScan));
        assert!(ctx.selected_room.is_none());
    }
}
