/// Format a number of seconds as `m:ss`
pub fn format_seconds(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Parse a duration given either as `m:ss` or as a plain number of seconds
pub fn parse_duration(input: &str) -> Result<u32, String> {
    let input = input.trim();
    let Some((minutes, seconds)) = input.split_once(':') else {
        return input
            .parse::<u32>()
            .map_err(|_| format!("invalid duration '{input}', expected m:ss or seconds"));
    };

    let minutes: u32 = minutes
        .parse()
        .map_err(|_| format!("invalid minutes in '{input}'"))?;
    let seconds: u32 = seconds
        .parse()
        .map_err(|_| format!("invalid seconds in '{input}'"))?;
    if seconds >= 60 {
        return Err(format!("seconds must be below 60 in '{input}'"));
    }
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| format!("duration '{input}' is too large"))
}
