//! Codec for the composite text fields used by databases created before
//! the column split: check-in/out stored as `"Day N|HH:MM"`, transport
//! routes as `"A -> B"` and leg timings as `"Day N HH:MM"`.
//!
//! Decoding is forgiving on purpose. These strings were edited by hand
//! for years; an unreadable day falls back to day 1 and an unreadable
//! time to the empty string, so a migration can never fail on them.

/// Render a day number in the label form the old files used.
pub fn encode_day(day: i64) -> String {
    format!("Day {}", day)
}

/// Parse a `"Day N"` label. Any failure yields day 1.
pub fn decode_day(s: &str) -> i64 {
    s.trim()
        .strip_prefix("Day ")
        .and_then(|n| n.trim().parse::<i64>().ok())
        .unwrap_or(1)
}

/// Encode a check-in/out pair as `"Day N|HH:MM"`. An empty time leaves
/// the label alone, without the separator.
pub fn encode_day_time(day: i64, time: &str) -> String {
    if time.is_empty() {
        encode_day(day)
    } else {
        format!("{}|{}", encode_day(day), time)
    }
}

/// Split a `"Day N|HH:MM"` pair. A missing separator means no time; a
/// garbled label means day 1.
pub fn decode_day_time(s: &str) -> (i64, String) {
    match s.split_once('|') {
        Some((label, time)) => (decode_day(label), time.trim().to_string()),
        None => (decode_day(s), String::new()),
    }
}

/// Encode a transport route as `"A -> B"`. Both sides empty encodes as
/// the empty string.
pub fn encode_route(from: &str, to: &str) -> String {
    if from.is_empty() && to.is_empty() {
        String::new()
    } else {
        format!("{} -> {}", from, to)
    }
}

/// Split a route on `" -> "`, or on the `" > "` some old sheets used.
/// Without either separator the whole string is the origin.
pub fn decode_route(s: &str) -> (String, String) {
    for sep in [" -> ", " > "] {
        if let Some((from, to)) = s.split_once(sep) {
            return (from.trim().to_string(), to.trim().to_string());
        }
    }
    let s = s.trim();
    if s.is_empty() {
        (String::new(), String::new())
    } else {
        (s.to_string(), String::new())
    }
}

/// Encode a transport leg timing as `"Day N HH:MM"`.
pub fn encode_leg(day: i64, time: &str) -> String {
    if time.is_empty() {
        encode_day(day)
    } else {
        format!("{} {}", encode_day(day), time)
    }
}

/// Split a `"Day N HH:MM"` leg timing: the first two whitespace tokens
/// are the day label, the third (if any) the time.
pub fn decode_leg(s: &str) -> (i64, String) {
    let tokens: Vec<&str> = s.split_whitespace().collect();
    match tokens.as_slice() {
        [] => (1, String::new()),
        [one] => (decode_day(one), String::new()),
        [a, b] => (decode_day(&format!("{} {}", a, b)), String::new()),
        [a, b, time, ..] => (decode_day(&format!("{} {}", a, b)), time.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_labels_round_trip_for_any_integer() {
        for n in [-3, -1, 0, 1, 2, 14, 100] {
            assert_eq!(decode_day(&encode_day(n)), n);
        }
    }

    #[test]
    fn garbled_day_labels_fall_back_to_one() {
        assert_eq!(decode_day(""), 1);
        assert_eq!(decode_day("day 3"), 1);
        assert_eq!(decode_day("Day three"), 1);
        assert_eq!(decode_day("3"), 1);
    }

    #[test]
    fn day_time_pairs_round_trip() {
        assert_eq!(decode_day_time(&encode_day_time(2, "15:00")), (2, "15:00".into()));
        assert_eq!(decode_day_time(&encode_day_time(-1, "")), (-1, String::new()));
    }

    #[test]
    fn day_time_decode_never_fails() {
        assert_eq!(decode_day_time(""), (1, String::new()));
        assert_eq!(decode_day_time("Day 4"), (4, String::new()));
        assert_eq!(decode_day_time("nonsense|10:30"), (1, "10:30".into()));
        assert_eq!(decode_day_time("|"), (1, String::new()));
    }

    #[test]
    fn routes_round_trip_and_accept_the_old_separator() {
        assert_eq!(
            decode_route(&encode_route("Rome", "Florence")),
            ("Rome".into(), "Florence".into())
        );
        assert_eq!(decode_route("Rome > Florence"), ("Rome".into(), "Florence".into()));
        assert_eq!(decode_route("Rome"), ("Rome".into(), String::new()));
        assert_eq!(decode_route(""), (String::new(), String::new()));
        assert_eq!(encode_route("", ""), "");
    }

    #[test]
    fn leg_timings_round_trip() {
        assert_eq!(decode_leg(&encode_leg(3, "09:45")), (3, "09:45".into()));
        assert_eq!(decode_leg(&encode_leg(0, "")), (0, String::new()));
    }

    #[test]
    fn leg_decode_falls_back_token_by_token() {
        assert_eq!(decode_leg(""), (1, String::new()));
        assert_eq!(decode_leg("10:15"), (1, String::new()));
        assert_eq!(decode_leg("Day 2"), (2, String::new()));
        assert_eq!(decode_leg("Day x 10:15"), (1, "10:15".into()));
    }
}
