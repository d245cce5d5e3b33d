//! Timestamped, tagged progress lines on stdout
//!
//! Every provisioning step reports through one of three tags:
//! `[---info---]`, `[---success---]`, `[---fail---]`. Consumers of the
//! tool grep for these tags, so the format is part of the CLI contract.

use chrono::{SecondsFormat, Utc};

fn render(tag: &str, msg: &str) -> String {
    format!(
        "{} [---{tag}---] {msg}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

pub fn info(msg: impl AsRef<str>) {
    println!("{}", render("info", msg.as_ref()));
}

pub fn success(msg: impl AsRef<str>) {
    println!("{}", render("success", msg.as_ref()));
}

pub fn fail(msg: impl AsRef<str>) {
    println!("{}", render("fail", msg.as_ref()));
}
