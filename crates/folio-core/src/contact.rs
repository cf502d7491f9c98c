// Contact affordances: click-to-copy fields and the compose action
use std::collections::HashMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Something that can take text, e.g. the system clipboard
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Contact details shown on the page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default)]
    pub name: Option<String>,
    /// Copied instead of the visible name when set
    #[serde(default)]
    pub name_copy: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Copied instead of the visible phone number when set
    #[serde(default)]
    pub phone_copy: Option<String>,
    /// Where composed messages go; defaults to `email`
    #[serde(default)]
    pub recipient: Option<String>,
}

impl ContactDetails {
    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref().or(self.email.as_deref())
    }
}

/// Fields that copy something when clicked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    /// The heading name; copies the email address
    ProfileName,
    ContactName,
    ContactPhone,
    ContactEmail,
    /// Copy icons next to the email/phone inside the About popup
    PopupEmail,
    PopupPhone,
}

impl CopyTarget {
    /// How long the "copied" acknowledgement stays up
    pub fn ack_duration(self) -> Duration {
        match self {
            CopyTarget::PopupEmail | CopyTarget::PopupPhone => Duration::from_millis(600),
            _ => Duration::from_millis(1200),
        }
    }

    /// The text this target puts on the clipboard, if the field exists
    pub fn text(self, details: &ContactDetails) -> Option<String> {
        let text = match self {
            CopyTarget::ProfileName | CopyTarget::ContactEmail => details.email.clone(),
            CopyTarget::ContactName => details.name_copy.clone().or_else(|| details.name.clone()),
            CopyTarget::ContactPhone => details.phone_copy.clone().or_else(|| details.phone.clone()),
            CopyTarget::PopupEmail => details.email.as_deref().map(|e| e.trim().to_string()),
            CopyTarget::PopupPhone => details.phone.as_deref().map(|p| p.trim().to_string()),
        };
        text.filter(|t| !t.is_empty())
    }
}

/// Which targets are currently showing their acknowledgement
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    until: HashMap<CopyTarget, Instant>,
}

impl CopyFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a target's text and flash its acknowledgement
    ///
    /// A missing field is a silent no-op (`Ok(false)`). The flash is only
    /// shown once the clipboard accepted the text.
    pub fn copy(
        &mut self,
        target: CopyTarget,
        details: &ContactDetails,
        clipboard: &mut dyn Clipboard,
        now: Instant,
    ) -> Result<bool> {
        let Some(text) = target.text(details) else {
            return Ok(false);
        };

        clipboard.write_text(&text)?;
        debug!("Copied {:?} to clipboard", target);
        self.until.insert(target, now + target.ack_duration());
        Ok(true)
    }

    pub fn is_flashing(&self, target: CopyTarget, now: Instant) -> bool {
        self.until.get(&target).is_some_and(|until| now < *until)
    }

    /// Drop expired acknowledgements. Returns true if any were cleared.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.until.len();
        self.until.retain(|_, until| now < *until);
        self.until.len() != before
    }
}

/// Build the "compose message" link for the contact form
///
/// Nothing is sent over the network; the link is handed to the OS mail
/// client.
pub fn compose_mailto(recipient: &str, name: &str, email: &str, message: &str) -> String {
    let subject = format!("Message from {}", name);
    let body = format!("Name: {}\nEmail: {}\n\n{}", name, email, message);
    format!(
        "mailto:{}?subject={}&body={}",
        recipient,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct MemoryClipboard {
        contents: Vec<String>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::ClipboardError("no display".into()));
            }
            self.contents.push(text.to_string());
            Ok(())
        }
    }

    fn details() -> ContactDetails {
        ContactDetails {
            name: Some("Nathan Brown-Bennett".into()),
            name_copy: None,
            email: Some(" nathan@example.com ".into()),
            phone: Some("+44 7700 900000".into()),
            phone_copy: Some("+447700900000".into()),
            recipient: None,
        }
    }

    #[test]
    fn test_copy_text_per_target() {
        let details = details();
        assert_eq!(CopyTarget::ContactName.text(&details).as_deref(), Some("Nathan Brown-Bennett"));
        assert_eq!(CopyTarget::ContactPhone.text(&details).as_deref(), Some("+447700900000"));
        assert_eq!(CopyTarget::PopupPhone.text(&details).as_deref(), Some("+44 7700 900000"));
        assert_eq!(CopyTarget::PopupEmail.text(&details).as_deref(), Some("nathan@example.com"));
        assert_eq!(CopyTarget::ProfileName.text(&details).as_deref(), Some(" nathan@example.com "));
    }

    #[test]
    fn test_flash_expires() {
        let mut feedback = CopyFeedback::new();
        let mut clipboard = MemoryClipboard::default();
        let now = Instant::now();

        assert!(feedback
            .copy(CopyTarget::PopupEmail, &details(), &mut clipboard, now)
            .unwrap());
        assert_eq!(clipboard.contents, vec!["nathan@example.com"]);
        assert!(feedback.is_flashing(CopyTarget::PopupEmail, now + Duration::from_millis(599)));
        assert!(!feedback.is_flashing(CopyTarget::PopupEmail, now + Duration::from_millis(600)));

        assert!(!feedback.tick(now + Duration::from_millis(100)));
        assert!(feedback.tick(now + Duration::from_millis(700)));
    }

    #[test]
    fn test_profile_name_flash_is_longer() {
        assert_eq!(CopyTarget::ProfileName.ack_duration(), Duration::from_millis(1200));
        assert_eq!(CopyTarget::PopupPhone.ack_duration(), Duration::from_millis(600));
    }

    #[test]
    fn test_missing_field_is_a_no_op() {
        let mut feedback = CopyFeedback::new();
        let mut clipboard = MemoryClipboard::default();
        let copied = feedback
            .copy(CopyTarget::ContactPhone, &ContactDetails::default(), &mut clipboard, Instant::now())
            .unwrap();

        assert!(!copied);
        assert!(clipboard.contents.is_empty());
    }

    #[test]
    fn test_clipboard_failure_shows_no_flash() {
        let mut feedback = CopyFeedback::new();
        let mut clipboard = MemoryClipboard {
            fail: true,
            ..Default::default()
        };
        let now = Instant::now();

        assert!(feedback.copy(CopyTarget::ContactName, &details(), &mut clipboard, now).is_err());
        assert!(!feedback.is_flashing(CopyTarget::ContactName, now));
    }

    #[test]
    fn test_compose_mailto() {
        let url = compose_mailto("me@example.com", "Ada", "ada@example.com", "Hi & bye");
        assert_eq!(
            url,
            "mailto:me@example.com?subject=Message%20from%20Ada&body=Name%3A%20Ada%0AEmail%3A%20ada%40example.com%0A%0AHi%20%26%20bye"
        );
    }

    #[test]
    fn test_recipient_defaults_to_email() {
        let mut details = details();
        assert_eq!(details.recipient(), Some(" nathan@example.com "));
        details.recipient = Some("inbox@example.com".into());
        assert_eq!(details.recipient(), Some("inbox@example.com"));
    }
}
