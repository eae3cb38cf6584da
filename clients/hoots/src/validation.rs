//! Input validation for the authentication forms
//!
//! These checks only spare a round trip; the server validates again.

use common::models::{SignInForm, SignUpForm};
use regex::Regex;
use std::sync::OnceLock;

const MAX_USERNAME_CHARS: usize = 40;

/// Validate the username chosen at sign-up
///
/// Usernames are shown beside every hoot and comment, so they must be a
/// single word of letters, digits, `_`, `.` or `-`. Non-ASCII letters are
/// fine and the limit counts characters, not bytes.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }

    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(format!(
            "Username must be at most {} characters long",
            MAX_USERNAME_CHARS
        ));
    }

    static HANDLE: OnceLock<Regex> = OnceLock::new();
    let handle = HANDLE.get_or_init(|| {
        Regex::new(r"^[\p{L}\p{N}_.\-]+$").expect("username pattern is valid")
    });

    if !handle.is_match(username) {
        return Err("Username may only use letters, digits, '_', '.' and '-'".to_string());
    }

    Ok(())
}

/// Validate password presence
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    Ok(())
}

/// Validate a sign-up form
pub fn validate_sign_up(form: &SignUpForm) -> Result<(), String> {
    validate_username(&form.username)?;
    validate_password(&form.password)?;

    if form.password != form.password_conf {
        return Err("Passwords do not match".to_string());
    }

    Ok(())
}

/// Validate a sign-in form
pub fn validate_sign_in(form: &SignInForm) -> Result<(), String> {
    if form.username.trim().is_empty() {
        return Err("Username is required".to_string());
    }
    validate_password(&form.password)
}
