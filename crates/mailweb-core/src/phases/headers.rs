//! Line-oriented header scanning: turns raw message text into sender/recipient records.
//!
//! Only three headers matter. `Message-ID:` starts a new message and drops
//! anything pending, `From:` sets the sender, `To:` adds comma-separated
//! recipients. A record is emitted as soon as a sender and at least one
//! recipient are both pending. Continuation lines are not followed.

use regex::Regex;
use std::sync::LazyLock;

use crate::config::MailRecord;

const ADDRESS: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

static MESSAGE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Message-ID: (.*)").unwrap());

static FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"From: ({ADDRESS})")).unwrap());

static TO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"To: (.*)").unwrap());

static FULL_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"^{ADDRESS}$")).unwrap());

/// Split a `To:` value on commas and keep the well-formed addresses.
pub fn parse_recipients(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|addr| is_address(addr))
        .map(String::from)
        .collect()
}

/// True if `addr` is a single well-formed address with nothing around it.
pub fn is_address(addr: &str) -> bool {
    FULL_ADDRESS.is_match(addr)
}

/// Scan `text` and return one record per completed sender/recipient group.
pub fn parse_messages(text: &str) -> Vec<MailRecord> {
    let mut records = Vec::new();
    let mut sender: Option<String> = None;
    let mut recipients: Vec<String> = Vec::new();

    // A lone '\r' also ends a line; the empty piece of "\r\n" matches nothing.
    for line in text.split(['\r', '\n']) {
        if MESSAGE_ID.is_match(line) {
            sender = None;
            recipients.clear();
        } else if let Some(caps) = FROM.captures(line) {
            sender = Some(caps[1].to_string());
        } else if let Some(caps) = TO.captures(line) {
            recipients.extend(parse_recipients(&caps[1]));
        }

        if !recipients.is_empty() {
            if let Some(from) = sender.take() {
                records.push(MailRecord::new(from, std::mem::take(&mut recipients)));
            }
        }
    }

    records
}
