//! The fixed tool catalog presented to the model on every call.
//!
//! Two families: data tools (read-only lookups against the hotel
//! directory) and action tools (emit a UI action for the kiosk client).
//! Built once at engine construction; shared read-only across sessions.

use ck_domain::checkin::CheckinStep;
use ck_domain::tool::ToolDefinition;

/// Build the complete set of tool definitions exposed to the LLM.
pub fn tool_definitions() -> Vec<ToolDefinition> {
    let mut defs = Vec::new();

    // ── Data tools ────────────────────────────────────────────────
    defs.push(ToolDefinition {
        name: "lookup_reservation".into(),
        description: "Find a reservation by confirmation code (e.g. GAH-2024-001).".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "query": { "type": "string", "description": "Confirmation code or reservation id" }
            },
            "required": ["query"]
        }),
    });

    defs.push(ToolDefinition {
        name: "lookup_reservation_by_name".into(),
        description: "Find a reservation by guest first and last name. Use this first when a guest gives their name.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "firstName": { "type": "string", "description": "Guest first name" },
                "lastName": { "type": "string", "description": "Guest last name" }
            },
            "required": ["firstName", "lastName"]
        }),
    });

    defs.push(ToolDefinition {
        name: "lookup_reservation_by_passport".into(),
        description: "Find a reservation by passport number, e.g. after a passport scan.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "passportNumber": { "type": "string", "description": "Passport number" }
            },
            "required": ["passportNumber"]
        }),
    });

    defs.push(ToolDefinition {
        name: "get_hotel_info".into(),
        description: "Hotel amenities, Wi-Fi, check-in/out times, nearby attractions.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    });

    defs.push(ToolDefinition {
        name: "get_available_rooms".into(),
        description: "List available rooms with prices, optionally for a date range.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "checkIn": { "type": "string", "description": "Check-in date (YYYY-MM-DD)" },
                "checkOut": { "type": "string", "description": "Check-out date (YYYY-MM-DD)" }
            }
        }),
    });

    defs.push(ToolDefinition {
        name: "get_room_upgrades".into(),
        description: "Upgrade options from the guest's current room type.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "currentRoomType": { "type": "string", "description": "Current room type (e.g. standard, deluxe)" }
            },
            "required": ["currentRoomType"]
        }),
    });

    // ── UI action tools ───────────────────────────────────────────
    defs.push(ToolDefinition {
        name: "trigger_passport_scan".into(),
        description: "Show the passport scanner screen for identity verification.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    });

    defs.push(ToolDefinition {
        name: "trigger_payment".into(),
        description: "Show the credit card payment screen.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    });

    defs.push(ToolDefinition {
        name: "dispense_key_card".into(),
        description: "Show the key card dispensing screen.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {}
        }),
    });

    let steps: Vec<&str> = CheckinStep::ALL.iter().map(|s| s.as_str()).collect();
    defs.push(ToolDefinition {
        name: "set_checkin_step".into(),
        description: "Advance the kiosk progress bar to the given check-in step.".into(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "step": {
                    "type": "string",
                    "enum": steps,
                    "description": "The check-in step to show"
                }
            },
            "required": ["step"]
        }),
    });

    defs
}
