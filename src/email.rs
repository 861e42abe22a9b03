// ABOUTME: Transactional email sending through the Brevo HTTP API
// ABOUTME: The Mailer trait is the seam; tests substitute a scripted implementation

use async_trait::async_trait;
use serde::Serialize;

const BREVO_API_URL: &str = "https://api.brevo.com/v3/smtp/email";

/// Outbound transactional email collaborator.
///
/// `Ok(true)` means the provider accepted the message, `Ok(false)` means the
/// provider rejected it without a transport error, and `Err` is a transport
/// or serialization failure.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, html_content: &str) -> anyhow::Result<bool>;
}

pub struct BrevoMailer {
    api_url: String,
    api_key: String,
    sender_email: String,
    sender_name: String,
    client: reqwest::Client,
}

impl BrevoMailer {
    pub fn from_env() -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_url: BREVO_API_URL.to_string(),
            api_key: std::env::var("BREVO_API_KEY").unwrap_or_default(),
            sender_email: std::env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "no-reply@carelog.app".to_string()),
            sender_name: std::env::var("SENDER_NAME").unwrap_or_else(|_| "Carelog".to_string()),
            client,
        }
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    sender: EmailParty<'a>,
    to: Vec<EmailParty<'a>>,
    subject: &'a str,
    #[serde(rename = "htmlContent")]
    html_content: &'a str,
}

#[derive(Serialize)]
struct EmailParty<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    email: &'a str,
}

#[async_trait]
impl Mailer for BrevoMailer {
    async fn send(&self, recipient: &str, subject: &str, html_content: &str) -> anyhow::Result<bool> {
        let request = SendEmailRequest {
            sender: EmailParty {
                name: Some(&self.sender_name),
                email: &self.sender_email,
            },
            to: vec![EmailParty {
                name: None,
                email: recipient,
            }],
            subject,
            html_content,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::warn!("Email provider returned {}", response.status());
            return Ok(false);
        }

        Ok(true)
    }
}

/// Wrap a plain-text body in the fixed test email template.
pub fn render_test_email(body: &str) -> String {
    format!(
        r#"<html>
  <body style="font-family: Arial, sans-serif; color: #333333; margin: 0; padding: 0;">
    <div style="max-width: 600px; margin: 0 auto; padding: 24px;">
      <h2 style="color: #2c7a7b;">Carelog</h2>
      <p>{body}</p>
      <hr style="border: none; border-top: 1px solid #e2e8f0;" />
      <p style="font-size: 12px; color: #718096;">
        This is a test email sent from the Carelog testing endpoint.
      </p>
    </div>
  </body>
</html>"#
    )
}
