#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:3000"  // Local relay during development
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Served by the relay itself in production
}

/// Where the contact form posts from script.
pub fn contact_endpoint() -> String {
    format!("{}/api/contact", get_backend_url())
}

/// Action of the contact form when the browser posts it natively.
pub fn native_form_action() -> String {
    format!("{}/send_mail", get_backend_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_share_the_backend() {
        assert!(contact_endpoint().starts_with(get_backend_url()));
        assert!(contact_endpoint().ends_with("/api/contact"));
        assert!(native_form_action().ends_with("/send_mail"));
    }
}
