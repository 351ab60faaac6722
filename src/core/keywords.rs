//! Keyword sets used by the semantic rules
//!
//! Every rule classifies free text (a verb or a channel) by case-insensitive
//! substring match against one of these lists. Word stems such as `deceiv`
//! and `imperson` are used so that inflections ("deceived",
//! "impersonation") match too.
//!
//! Substring matching over-fires and under-fires: "text" matches "context",
//! and "sim swap" is not considered communicative on its own. That imprecision
//! is part of the heuristic; see the `heuristic_*` tests in `core::rules`.

/// Verbs that imply communication or volition
pub const AGENCY_VERBS: &[&str] = &[
    "phish",
    "imperson",
    "pretend",
    "pose",
    "deceiv",
    "trick",
    "manipulat",
    "convince",
    "persuad",
    "social-engineer",
    "social engineer",
    "request",
    "ask",
    "contact",
    "negotiate",
];

/// Channels only a person can use
pub const AGENCY_CHANNELS: &[&str] = &[
    "call",
    "phone",
    "email",
    "sms",
    "text",
    "chat",
    "voice",
    "in-person",
    "meeting",
];

/// Verbs of handing something over
pub const DISCLOSURE_VERBS: &[&str] = &[
    "submit", "send", "provide", "give", "share", "reveal", "disclose", "tell", "supply",
    "furnish",
];

/// Terms naming personal or account information
pub const INFORMATION_TERMS: &[&str] = &[
    "info",
    "data",
    "credential",
    "password",
    "ssn",
    "dob",
    "detail",
];

/// Verbs that work on a mind, not a ledger
pub const MANIPULATION_VERBS: &[&str] = &[
    "phish",
    "social-engineer",
    "social engineer",
    "manipulat",
    "trick",
    "deceiv",
    "convince",
    "persuad",
    "imperson",
    "pretend",
    "scam",
];

/// Terms marking identity-based actions
pub const IDENTITY_TERMS: &[&str] = &["identity", "impersonat"];

/// Verbs describing system-level interaction between accounts
pub const TECHNICAL_VERBS: &[&str] = &[
    "takeover",
    "access",
    "login",
    "authenticate",
    "hack",
    "breach",
    "exploit",
    "inject",
    "query",
    "request",
    "api",
    "database",
];

/// True if `text` contains any keyword, ignoring case
///
/// Keywords must be lowercase.
pub fn matches_any(text: &str, keywords: &[&str]) -> bool {
    let text = text.to_lowercase();
    keywords.iter().any(|keyword| text.contains(keyword))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_keyword_sets_are_lowercase() {
        for set in [
            AGENCY_VERBS,
            AGENCY_CHANNELS,
            DISCLOSURE_VERBS,
            INFORMATION_TERMS,
            MANIPULATION_VERBS,
            IDENTITY_TERMS,
            TECHNICAL_VERBS,
        ] {
            for keyword in set {
                assert_eq!(*keyword, keyword.to_lowercase(), "keyword '{}' not lowercase", keyword);
            }
        }
    }

    #[rstest]
    #[case("Impersonation", true)]
    #[case("deceived the victim", true)]
    #[case("Social Engineering", true)]
    #[case("social-engineering", true)]
    #[case("requested number change", true)]
    #[case("sim swap", false)]
    #[case("payment", false)]
    fn test_agency_verbs(#[case] verb: &str, #[case] expected: bool) {
        assert_eq!(matches_any(verb, AGENCY_VERBS), expected);
    }

    #[rstest]
    #[case("Call", true)]
    #[case("SMS", true)]
    #[case("email", true)]
    #[case("phone", true)]
    #[case("in-person", true)]
    #[case("online banking", false)]
    #[case("api", false)]
    fn test_agency_channels(#[case] channel: &str, #[case] expected: bool) {
        assert_eq!(matches_any(channel, AGENCY_CHANNELS), expected);
    }

    #[rstest]
    #[case("credential disclosure", false, true)] // "disclosure" does not contain "disclose"
    #[case("revealed password", true, true)]
    #[case("send password", true, true)]
    #[case("Sensitive Info Submission", false, true)] // "submission" does not contain "submit"
    #[case("share screen", true, false)]
    fn test_disclosure_and_information(
        #[case] verb: &str,
        #[case] disclosure: bool,
        #[case] information: bool,
    ) {
        assert_eq!(matches_any(verb, DISCLOSURE_VERBS), disclosure);
        assert_eq!(matches_any(verb, INFORMATION_TERMS), information);
    }

    #[rstest]
    #[case("phishing", true)]
    #[case("romance scam", true)]
    #[case("Pretended to be support", true)]
    #[case("account takeover", false)]
    fn test_manipulation_verbs(#[case] verb: &str, #[case] expected: bool) {
        assert_eq!(matches_any(verb, MANIPULATION_VERBS), expected);
    }

    #[rstest]
    #[case("identity theft", true)]
    #[case("Impersonating", true)]
    #[case("impersonation", true)]
    #[case("imposter call", false)]
    fn test_identity_terms(#[case] verb: &str, #[case] expected: bool) {
        assert_eq!(matches_any(verb, IDENTITY_TERMS), expected);
    }

    #[rstest]
    #[case("account takeover", true)]
    #[case("API call", true)]
    #[case("SQL injection", true)]
    #[case("Login", true)]
    #[case("sim swap", false)]
    #[case("transfer", false)]
    fn test_technical_verbs(#[case] verb: &str, #[case] expected: bool) {
        assert_eq!(matches_any(verb, TECHNICAL_VERBS), expected);
    }
}
