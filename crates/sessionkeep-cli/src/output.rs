//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use sessionkeep::UserProfile;

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a warning message.
pub fn warning(msg: &str) {
    eprintln!("{} {}", "!".yellow(), msg);
}

/// Print a labeled field.
pub fn field(label: &str, value: &str) {
    println!("{}: {}", label.dimmed(), value);
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a user profile as labeled fields.
pub fn profile(user: &UserProfile) {
    field("Username", &user.username);
    if let Some(id) = &user.id {
        field("ID", id);
    }
    for (key, value) in &user.extra {
        match value.as_str() {
            Some(s) => field(key, s),
            None => field(key, &value.to_string()),
        }
    }
}
