//! Canned answers for queries that match no service.

/// Reply when neither a service nor a FAQ keyword matched.
pub const FALLBACK_ANSWER: &str = "I'm here to help! You can ask about our services, \
requirements, or start a service request. What would you like to know?";

/// Keyword -> answer table, checked in order.
const FAQ: [(&str, &str); 5] = [
    (
        "services",
        "We offer 15+ government services including Iqama renewal, National ID, and Vehicle registration.",
    ),
    (
        "cost",
        "Service costs vary. Iqama renewal: 100 SAR, National ID: 85 SAR, Vehicle registration: 200 SAR",
    ),
    (
        "time",
        "Processing times vary by service (1-14 days). Most services can be tracked in real-time.",
    ),
    (
        "hours",
        "Absher services are available 24/7 through this platform.",
    ),
    (
        "help",
        "How can I assist you today? You can ask about any of our services or start a service request.",
    ),
];

/// First FAQ answer whose keyword occurs in the lower-cased query.
pub fn lookup(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    FAQ.iter()
        .find(|(keyword, _)| query.contains(keyword))
        .map(|(_, answer)| *answer)
}

/// FAQ answer or the generic fallback.
pub fn answer(query: &str) -> &'static str {
    lookup(query).unwrap_or(FALLBACK_ANSWER)
}
