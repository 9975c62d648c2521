//! Small text helpers shared by every program

use std::fmt::Display;

/// `address:port` string, e.g. `10.0.0.5:9123`
pub fn format_endpoint(address: impl Display, port: u16) -> String {
    format!("{}:{}", address, port)
}

/// Lowercase hex, one space-separated two-character group per byte
pub fn hex_dump(bytes: impl AsRef<[u8]>) -> String {
    let encoded = hex::encode(bytes);
    encoded
        .as_bytes()
        .chunks(2)
        // hex output is ASCII
        .map(|pair| std::str::from_utf8(pair).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Seconds since the Unix epoch, the common clock for execution timing
pub fn tick() -> f64 {
    let now = chrono::Utc::now();
    now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1_000_000.0
}
