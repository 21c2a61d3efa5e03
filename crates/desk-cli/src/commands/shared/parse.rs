use serde::de::DeserializeOwned;

/// Parse a snake_case enum value using serde-deserialization.
///
/// Accepts menu labels too: `"Pending"` and `"in-progress"` normalize to
/// `"pending"` and `"in_progress"`.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: DeserializeOwned,
{
    let normalized = raw.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(normalized))
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

#[cfg(test)]
mod tests {
    use desk_core::enums::TicketStatus;

    use super::parse_enum;

    #[test]
    fn parses_snake_case_enum() {
        let status: TicketStatus = parse_enum("closed", "status").expect("status should parse");
        assert_eq!(status, TicketStatus::Closed);
    }

    #[test]
    fn parses_menu_label() {
        let status: TicketStatus = parse_enum(" Pending ", "status").expect("status should parse");
        assert_eq!(status, TicketStatus::Pending);
    }

    #[test]
    fn errors_on_invalid_enum() {
        let err = parse_enum::<TicketStatus>("done", "status").expect_err("should fail");
        assert!(err.to_string().contains("invalid status 'done'"));
    }
}
