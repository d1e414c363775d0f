//! Keyword-matched canned replies — the non-AI safety net used when every
//! configured provider has failed. Pure string matching; cannot fail.

/// Pick an in-character concierge reply for the given guest message.
pub fn reply(message: &str) -> String {
    let lower = message.to_lowercase();

    if lower.contains("hello") || lower.contains("hi") {
        return "Welcome to The Grand Azure Hotel! I'm Azure, your AI concierge. \
                How can I help you check in today?"
            .into();
    }
    if lower.contains("room") || lower.contains("upgrade") {
        return "We have some wonderful room options available. Our Deluxe rooms offer \
                stunning ocean views, and our Suites include a private balcony and lounge area."
            .into();
    }
    if lower.contains("breakfast") || lower.contains("restaurant") {
        return "Breakfast is served daily from 6:30 AM to 10:30 AM in the Azure Restaurant \
                on the ground floor. We offer both buffet and à la carte options."
            .into();
    }
    if lower.contains("wifi") || lower.contains("internet") {
        return "Our complimentary Wi-Fi network is \"GrandAzure-Guest\" and the password is \
                AZURE2024. You'll find it connects automatically in most rooms."
            .into();
    }
    if lower.contains("checkout") || lower.contains("check-out") || lower.contains("check out") {
        return "Check-out time is 11:00 AM. If you need a late check-out, I can arrange \
                that for you — just let me know!"
            .into();
    }

    "Thank you for your message. Is there anything specific about your stay I can help you with?"
        .into()
}
