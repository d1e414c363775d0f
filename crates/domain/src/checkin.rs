//! The check-in wire contract shared with the kiosk UI.
//!
//! `CheckinStep` values and the `UiAction` shape are string-matched by the
//! frontend's dispatch switch — the serde renames here are load-bearing.

use serde::{Deserialize, Serialize};

use crate::hotel::Reservation;

/// Stages of the check-in wizard, in presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckinStep {
    Welcome,
    Identify,
    PassportScan,
    ReservationFound,
    RoomSelection,
    UpgradeOffer,
    Payment,
    KeyCard,
    Farewell,
}

impl CheckinStep {
    /// Wire literal for this step (e.g. `"passport-scan"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckinStep::Welcome => "welcome",
            CheckinStep::Identify => "identify",
            CheckinStep::PassportScan => "passport-scan",
            CheckinStep::ReservationFound => "reservation-found",
            CheckinStep::RoomSelection => "room-selection",
            CheckinStep::UpgradeOffer => "upgrade-offer",
            CheckinStep::Payment => "payment",
            CheckinStep::KeyCard => "key-card",
            CheckinStep::Farewell => "farewell",
        }
    }

    /// Parse a wire literal. Returns `None` for values outside the enum
    /// (the model occasionally invents steps; callers decide what to do).
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "welcome" => CheckinStep::Welcome,
            "identify" => CheckinStep::Identify,
            "passport-scan" => CheckinStep::PassportScan,
            "reservation-found" => CheckinStep::ReservationFound,
            "room-selection" => CheckinStep::RoomSelection,
            "upgrade-offer" => CheckinStep::UpgradeOffer,
            "payment" => CheckinStep::Payment,
            "key-card" => CheckinStep::KeyCard,
            "farewell" => CheckinStep::Farewell,
            _ => return None,
        })
    }

    /// All steps the tool schema advertises to the model.
    pub const ALL: [CheckinStep; 9] = [
        CheckinStep::Welcome,
        CheckinStep::Identify,
        CheckinStep::PassportScan,
        CheckinStep::ReservationFound,
        CheckinStep::RoomSelection,
        CheckinStep::UpgradeOffer,
        CheckinStep::Payment,
        CheckinStep::KeyCard,
        CheckinStep::Farewell,
    ];
}

/// A data-only instruction for the kiosk client. The core emits these in
/// tool-execution order and never acts on them itself.
///
/// Note `SetStep` carries a raw string: step values from the model are
/// passed through verbatim, not clamped to [`CheckinStep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum UiAction {
    SetStep { step: String },
    ShowPassportScanner,
    ShowPayment,
    ShowKeyCard,
    StoreReservation(Reservation),
}
