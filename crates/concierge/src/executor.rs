//! Tool executor — runs one tool call against the hotel directory or
//! synthesizes a UI action.
//!
//! Nothing here returns an error: lookup misses, unknown tools, and
//! missing arguments all become JSON payloads the model can read and
//! recover from conversationally.

use serde_json::{json, Value};

use ck_domain::checkin::{CheckinStep, UiAction};
use ck_domain::trace::TraceEvent;
use ck_hotel::HotelDirectory;

/// Result of executing a single tool call.
#[derive(Debug)]
pub struct ToolOutcome {
    /// JSON fed back to the model as the tool's output.
    pub result: Value,
    /// UI action for the kiosk client, if this tool emits one.
    pub action: Option<UiAction>,
}

impl ToolOutcome {
    fn data(result: Value) -> Self {
        Self { result, action: None }
    }
    fn with_action(result: Value, action: UiAction) -> Self {
        Self { result, action: Some(action) }
    }
}

/// Execute one tool call. The executor never mutates session state; its
/// only output is the returned value.
pub async fn dispatch_tool(
    directory: &dyn HotelDirectory,
    tool_name: &str,
    arguments: &Value,
) -> ToolOutcome {
    let outcome = match tool_name {
        "lookup_reservation" => lookup_reservation(directory, arguments).await,
        "lookup_reservation_by_name" => lookup_by_name(directory, arguments).await,
        "lookup_reservation_by_passport" => lookup_by_passport(directory, arguments).await,
        "get_hotel_info" => ToolOutcome::data(json_of(&directory.hotel_info().await)),
        "get_available_rooms" => {
            let check_in = arguments.get("checkIn").and_then(|v| v.as_str());
            let check_out = arguments.get("checkOut").and_then(|v| v.as_str());
            ToolOutcome::data(json_of(&directory.available_rooms(check_in, check_out).await))
        }
        "get_room_upgrades" => {
            let room_type = str_arg(arguments, "currentRoomType");
            ToolOutcome::data(json_of(&directory.room_upgrades(room_type).await))
        }
        "trigger_passport_scan" => ToolOutcome::with_action(
            json!("Passport scanner activated on the kiosk."),
            UiAction::ShowPassportScanner,
        ),
        "trigger_payment" => ToolOutcome::with_action(
            json!("Payment screen shown on the kiosk."),
            UiAction::ShowPayment,
        ),
        "dispense_key_card" => ToolOutcome::with_action(
            json!("Key card dispensing screen shown on the kiosk."),
            UiAction::ShowKeyCard,
        ),
        "set_checkin_step" => set_checkin_step(arguments),
        _ => {
            TraceEvent::UnknownTool { tool_name: tool_name.to_owned() }.emit();
            ToolOutcome::data(json!({ "error": format!("Unknown tool: {tool_name}") }))
        }
    };

    TraceEvent::ToolDispatched {
        tool_name: tool_name.to_owned(),
        emitted_action: outcome.action.is_some(),
        is_error: outcome.result.get("error").is_some(),
    }
    .emit();

    outcome
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Per-tool handlers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

async fn lookup_reservation(directory: &dyn HotelDirectory, arguments: &Value) -> ToolOutcome {
    let query = str_arg(arguments, "query");
    match directory.reservation_by_code(query).await {
        Some(reservation) => {
            let result = json_of(&reservation);
            ToolOutcome::with_action(result, UiAction::StoreReservation(reservation))
        }
        None => ToolOutcome::data(json!({ "error": "No reservation found with that code." })),
    }
}

/// The three-way name policy: exact match → reservation + store action;
/// near miss → suggestions with no action; total miss → plain error
/// steering the model toward code/passport lookup.
async fn lookup_by_name(directory: &dyn HotelDirectory, arguments: &Value) -> ToolOutcome {
    let first = str_arg(arguments, "firstName");
    let last = str_arg(arguments, "lastName");

    let lookup = directory.reservation_by_name(first, last).await;

    if let Some(reservation) = lookup.reservation {
        let result = json_of(&reservation);
        return ToolOutcome::with_action(result, UiAction::StoreReservation(reservation));
    }

    if !lookup.suggestions.is_empty() {
        let names: Vec<String> = lookup.suggestions.iter().map(|s| s.display()).collect();
        return ToolOutcome::data(json!({
            "error": format!("No reservation found under the name {first} {last}."),
            "didYouMean": names,
            "hint": "Ask the guest whether one of these names is theirs, then look that name up.",
        }));
    }

    ToolOutcome::data(json!({
        "error": format!(
            "No reservation found under the name {first} {last}. \
             Ask for a confirmation code or passport number instead."
        ),
    }))
}

async fn lookup_by_passport(directory: &dyn HotelDirectory, arguments: &Value) -> ToolOutcome {
    let passport = str_arg(arguments, "passportNumber");
    match directory.reservation_by_passport(passport).await {
        Some(reservation) => {
            let result = json_of(&reservation);
            ToolOutcome::with_action(result, UiAction::StoreReservation(reservation))
        }
        None => ToolOutcome::data(json!({
            "error": "No reservation found for that passport number."
        })),
    }
}

fn set_checkin_step(arguments: &Value) -> ToolOutcome {
    let step = str_arg(arguments, "step").to_owned();
    // The step is echoed verbatim — the kiosk UI owns presentation of
    // whatever the model sends. Off-enum values only get a warning.
    if CheckinStep::parse(&step).is_none() {
        tracing::warn!(step = %step, "set_checkin_step called with a step outside the enum");
    }
    ToolOutcome::with_action(
        json!(format!("Check-in step set to '{step}'.")),
        UiAction::SetStep { step },
    )
}

// ── Helpers ────────────────────────────────────────────────────────

fn str_arg<'a>(arguments: &'a Value, key: &str) -> &'a str {
    arguments.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn json_of<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
