use lettre::message::Mailbox;

use crate::{config::RelayCredentials, models::contact::ContactSubmission};

pub const NOTIFICATION_SUBJECT: &str = "Thank you for contacting Tempest!";

/// A rendered thank-you email, ready to hand to a [`Mailer`](super::smtp_mailer::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedNotification {
    pub sender: Mailbox,
    pub recipient: Mailbox,
    pub subject: String,
    pub html_body: String,
}

const TEMPLATE_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Thank you for contacting Tempest!</title>
    <style>
        body {
            font-family: Arial, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 600px;
            margin: 0 auto;
            padding: 20px;
        }
        .header {
            background: linear-gradient(135deg, #00AEC7, #0E4D8D);
            color: white;
            padding: 30px;
            text-align: center;
            border-radius: 10px 10px 0 0;
        }
        .content {
            background: #f9f9f9;
            padding: 30px;
            border-radius: 0 0 10px 10px;
        }
        .highlight {
            color: #00AEC7;
            font-weight: bold;
        }
        .footer {
            text-align: center;
            margin-top: 20px;
            color: #666;
            font-size: 14px;
        }
        .message-box {
            background: white;
            border-left: 4px solid #00AEC7;
            padding: 15px;
            margin: 20px 0;
            border-radius: 5px;
        }
    </style>
</head>
<body>
    <div class="header">
        <h1>Thank You for Contacting Tempest!</h1>
        <p>We appreciate your interest in our services</p>
    </div>

    <div class="content">
"#;

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn text_to_html(input: &str) -> String {
    let escaped = escape_html(input);
    let mut html = String::with_capacity(escaped.len());
    for ch in escaped.chars() {
        match ch {
            '\r' => {}
            '\n' => html.push_str("<br/>"),
            _ => html.push(ch),
        }
    }
    html
}

const TEMPLATE_SIGNATURE: &str = r#"        <p>Our team will review your request and get back to you within 24 hours.</p>

        <p>Best regards,<br>
        <strong>The Tempest Team</strong><br>
        <span class="highlight">Empowering Institutions with AI Solutions</span></p>
    </div>

"#;

/// Renders the HTML body for a validated submission.
///
/// Every user-supplied value is escaped before it lands in the document.
pub fn render_body(submission: &ContactSubmission) -> String {
    let mut body = String::from(TEMPLATE_HEAD);

    body.push_str(&format!(
        r#"        <p>Dear <strong>{name}</strong>,</p>

        <p>Thank you for reaching out to <span class="highlight">Tempest</span>!
        We've received your inquiry about <strong>{service}</strong>.</p>

"#,
        name = escape_html(&submission.name),
        service = escape_html(&submission.service),
    ));

    if let Some(organization) = submission.organization.as_deref().filter(|o| !o.is_empty()) {
        body.push_str(&format!(
            "        <p><strong>Organization:</strong> {}</p>\n\n",
            escape_html(organization)
        ));
    }

    body.push_str(&format!(
        r#"        <div class="message-box">
            <strong>Your Message:</strong><br>
            {}
        </div>

"#,
        text_to_html(&submission.message)
    ));
    body.push_str(TEMPLATE_SIGNATURE);
    body.push_str(&format!(
        r#"    <div class="footer">
        <p>This email was sent to {} | &copy; 2025 Tempest.</p>
    </div>
</body>
</html>
"#,
        escape_html(&submission.email.to_string())
    ));

    body
}

pub fn compose(submission: &ContactSubmission, relay: &RelayCredentials) -> ComposedNotification {
    ComposedNotification {
        sender: relay.sender.clone(),
        recipient: Mailbox::new(None, submission.email.clone()),
        subject: NOTIFICATION_SUBJECT.to_string(),
        html_body: render_body(submission),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_relay;

    fn submission(organization: Option<&str>) -> ContactSubmission {
        ContactSubmission {
            name: "Ana".to_string(),
            email: "ana@example.com".parse().unwrap(),
            service: "Consulting".to_string(),
            message: "Hello there".to_string(),
            organization: organization.map(str::to_string),
        }
    }

    #[test]
    fn addresses_reply_from_relay_sender_to_submitter() {
        let relay = test_relay();
        let notification = compose(&submission(None), &relay);

        assert_eq!(notification.sender, relay.sender);
        assert_eq!(notification.recipient.email.to_string(), "ana@example.com");
        assert_eq!(notification.subject, "Thank you for contacting Tempest!");
    }

    #[test]
    fn body_contains_submitted_values() {
        let body = compose(&submission(Some("Acme")), &test_relay()).html_body;

        for needle in ["Ana", "Consulting", "Hello there", "Acme", "ana@example.com"] {
            assert!(body.contains(needle), "missing {needle:?}");
        }
    }

    #[test]
    fn organization_line_only_when_present() {
        let with_org = render_body(&submission(Some("Acme")));
        assert_eq!(with_org.matches("Organization:").count(), 1);
        assert!(with_org.contains("<p><strong>Organization:</strong> Acme</p>"));

        assert!(!render_body(&submission(None)).contains("Organization"));
        assert!(!render_body(&submission(Some(""))).contains("Organization"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_body(&submission(Some("Acme")));
        let second = render_body(&submission(Some("Acme")));
        assert_eq!(first.as_bytes(), second.as_bytes());
    }

    #[test]
    fn user_markup_is_escaped() {
        let mut hostile = submission(Some("<b>Acme</b>"));
        hostile.name = "<script>alert('x')</script>".to_string();
        hostile.service = "A & B".to_string();
        hostile.message = "line one\nline \"two\"".to_string();

        let body = render_body(&hostile);
        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(body.contains("&lt;b&gt;Acme&lt;/b&gt;"));
        assert!(body.contains("A &amp; B"));
        assert!(body.contains("line one<br/>line &quot;two&quot;"));
    }

    #[test]
    fn sections_render_in_template_order() {
        let body = render_body(&submission(Some("Acme")));

        let positions: Vec<usize> = [
            "<p>Dear <strong>Ana</strong>,</p>",
            "inquiry about <strong>Consulting</strong>.</p>",
            "<p><strong>Organization:</strong> Acme</p>",
            "<strong>Your Message:</strong><br>\n            Hello there\n",
            "The Tempest Team",
            "This email was sent to ana@example.com | &copy; 2025 Tempest.",
        ]
        .iter()
        .map(|needle| body.find(needle).unwrap_or_else(|| panic!("missing {needle:?}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(body.ends_with("</html>\n"));
    }
}
