use std::collections::HashMap;

use async_trait::async_trait;
use lettre::message::{header, Mailbox};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::AppConfig;
use crate::models::AggregateSnapshot;
use crate::notify::{format_body, Notifier};
use crate::utils::error::Result;

/// SMTP delivery over STARTTLS to a single recipient.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    site_urls: HashMap<String, String>,
}

impl EmailNotifier {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let credentials = Credentials::new(
            config.smtp.username.clone(),
            config.smtp.password.clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp.host)?
            .port(config.smtp.port)
            .credentials(credentials)
            .build();

        let from: Mailbox =
            format!("{} <{}>", config.smtp.from_name, config.smtp.username).parse()?;
        let to: Mailbox = config.watcher.to_address.parse()?;

        let site_urls = config
            .sites
            .iter()
            .filter_map(|(site, site_config)| {
                site_config.url.clone().map(|url| (site.clone(), url))
            })
            .collect();

        Ok(Self {
            transport,
            from,
            to,
            site_urls,
        })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, subject: &str, snapshot: &AggregateSnapshot) -> Result<()> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(header::ContentType::TEXT_PLAIN)
            .body(format_body(snapshot, &self.site_urls))?;

        self.transport.send(message).await?;
        Ok(())
    }
}
