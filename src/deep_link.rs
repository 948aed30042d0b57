use crate::error::{BookingError, Result};
use crate::models::BookingId;

const BOOKING_PARAM: &str = "booking";

/// Достает id брони из ссылки вида `https://host/?booking=<id>`.
/// Принимает полный URL или просто строку запроса.
pub fn parse_booking_link(input: &str) -> Result<Option<BookingId>> {
    let input = input.trim();
    let query = match input.split_once('?') {
        Some((_, query)) => query,
        None if input.contains("://") => return Ok(None),
        None => input,
    };
    // фрагмент после # в запрос не входит
    let query = query.split('#').next().unwrap_or_default();

    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)
        .map_err(|e| BookingError::InvalidLink(format!("{}: {}", input, e)))?;

    // при повторе параметра берется первое значение
    Ok(pairs
        .into_iter()
        .find(|(key, _)| key == BOOKING_PARAM)
        .map(|(_, id)| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .map(BookingId::from))
}

/// Ссылка для шаринга брони.
pub fn share_url(base_url: &str, booking_id: &BookingId) -> Result<String> {
    let query = serde_urlencoded::to_string([(BOOKING_PARAM, booking_id.as_str())])
        .map_err(|e| BookingError::InvalidLink(e.to_string()))?;
    Ok(format!("{}?{}", base_url.trim_end_matches('?'), query))
}
