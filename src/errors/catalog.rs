/// Gateway error codes as returned in `MESSAGEACK.GUID.ERROR.CODE`.
///
/// Loaded once at compile time; unknown codes resolve to [`DEFAULT_MESSAGE`].
const CODE_MESSAGES: &[(i64, &str)] = &[
    (8, "Message submission failed at the gateway"),
    (13, "Invalid sender identifier"),
    (17, "Invalid recipient"),
    (28, "Invalid or expired authentication token"),
    (44, "Message exceeds the allowed length"),
    (57, "Template not registered for this sender"),
    (58, "Template parameter mismatch"),
    (65, "Account suspended"),
    (322, "Insufficient credits"),
    (413, "Duplicate message submission"),
];

pub const DEFAULT_MESSAGE: &str = "An unknown error occurred";

pub fn message_for(code: i64) -> &'static str {
    CODE_MESSAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, msg)| *msg)
        .unwrap_or(DEFAULT_MESSAGE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn known_code_resolves() {
        assert_eq!(message_for(17), "Invalid recipient");
        assert_eq!(message_for(322), "Insufficient credits");
    }

    #[test]
    fn unknown_code_falls_back() {
        assert_eq!(message_for(0), DEFAULT_MESSAGE);
        assert_eq!(message_for(-1), DEFAULT_MESSAGE);
        assert_eq!(message_for(99999), DEFAULT_MESSAGE);
    }
}
