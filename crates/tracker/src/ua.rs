//! Device/browser capture via user agent parsing.
//!
//! Uses woothee to fill the session record's `device` and `browser` fields
//! at (re)initialization. Classification is a separate concern: the UA
//! denylist in the classifier runs first, so by the time this executes the
//! visitor is already considered human.

use woothee::parser::Parser;

use footfall_core::UaProfile;

/// User agent capture for session initialization.
pub struct UaCapture {
    parser: Parser,
}

impl UaCapture {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Derive device/browser from the user agent; unparseable input keeps
    /// the "unknown" defaults.
    pub fn profile(&self, user_agent: &str) -> UaProfile {
        let mut profile = UaProfile::default();
        if user_agent.is_empty() {
            return profile;
        }

        if let Some(result) = self.parser.parse(user_agent) {
            if !result.name.is_empty() && result.name != "UNKNOWN" {
                profile.browser = result.name.to_string();
            }

            // woothee categories: pc, smartphone, mobilephone, crawler,
            // appliance, misc
            profile.device = match result.category {
                "pc" => "desktop",
                "smartphone" | "mobilephone" => "mobile",
                "crawler" => "bot",
                "appliance" => "other",
                _ => "unknown",
            }
            .to_string();
        }

        profile
    }
}

impl Default for UaCapture {
    fn default() -> Self {
        Self::new()
    }
}
