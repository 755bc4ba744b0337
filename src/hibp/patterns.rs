use once_cell::sync::Lazy;
use regex::Regex;

/// First single digit in a rate-limit message ("Try again in 2 seconds.").
pub static DELAY_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d").unwrap());

/// `YYYY-MM-DD` prefix of a paste timestamp.
pub static PASTE_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d\d\d\d-\d\d-\d\d").unwrap());

/// Links inside a breach description. Descriptions are HTML, so quotes and
/// angle brackets end a match.
pub static DESCRIPTION_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>]+"#).unwrap());

/// Loose email-address shape used when scanning console blocks.
pub static EMAIL_ADDRESS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9.!#$%&'*+/=?^_`{|}~\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap()
});

/// Last link found in a description, if any.
pub fn last_url(description: &str) -> Option<&str> {
    DESCRIPTION_URL
        .find_iter(description)
        .last()
        .map(|m| m.as_str().trim_end_matches(['.', ',', ')']))
}

/// Delay hint in whole seconds: the first digit of `message`.
pub fn first_digit(message: &str) -> Option<u64> {
    DELAY_DIGIT
        .find(message)
        .and_then(|m| m.as_str().parse().ok())
}

pub fn paste_date(raw: &str) -> Option<&str> {
    PASTE_DATE.find(raw).map(|m| m.as_str())
}
