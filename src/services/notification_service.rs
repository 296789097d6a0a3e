// src/services/notification_service.rs

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::models::inquiry::InquiryItem;
use crate::services::quotation_service::format_currency;

// ---
// Notificação por e-mail de novas consultas
// ---
// Efeito colateral de melhor esforço: o envio acontece DEPOIS da
// persistência e falha de envio jamais derruba a resposta ao cliente
// (quem chama faz tokio::spawn e só loga o erro). SMTP sem configurar
// é um estado válido — o serviço vira um no-op com warning.
#[derive(Clone)]
pub struct NotificationService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Option<String>,
    notify_to: Option<String>,
}

pub struct InquiryNotification {
    pub tenant_name: String,
    pub customer_name: String,
    pub customer_contact: String,
    pub message: Option<String>,
    pub items: Vec<InquiryItem>,
    pub total_amount: i64,
}

impl NotificationService {
    /// Monta o transporte a partir das variáveis SMTP_* do ambiente.
    /// Qualquer variável essencial ausente desabilita o serviço.
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("SMTP_HOST").ok();
        let user = std::env::var("SMTP_USER").ok();
        let password = std::env::var("SMTP_PASSWORD").ok();
        let from = std::env::var("SMTP_FROM").ok();
        let notify_to = std::env::var("NOTIFICATION_EMAIL").ok();

        let transport = match (&host, &user, &password) {
            (Some(host), Some(user), Some(password)) => {
                let port: u16 = std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587);

                let creds = Credentials::new(user.clone(), password.clone());
                let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
                    .port(port)
                    .credentials(creds)
                    .build();

                Some(transport)
            }
            _ => {
                tracing::warn!("SMTP não configurado; notificações de consulta desabilitadas.");
                None
            }
        };

        Ok(Self {
            transport,
            from,
            notify_to,
        })
    }

    #[cfg(test)]
    pub fn disabled() -> Self {
        Self {
            transport: None,
            from: None,
            notify_to: None,
        }
    }

    pub async fn send_inquiry_notification(
        &self,
        data: InquiryNotification,
    ) -> anyhow::Result<()> {
        let Some(transport) = &self.transport else {
            tracing::warn!("Transporte de e-mail ausente; notificação ignorada.");
            return Ok(());
        };
        let Some(notify_to) = &self.notify_to else {
            tracing::warn!("NOTIFICATION_EMAIL ausente; notificação ignorada.");
            return Ok(());
        };

        let from: Mailbox = self
            .from
            .as_deref()
            .unwrap_or("no-reply@localhost")
            .parse()
            .map_err(|e| anyhow::anyhow!("Remetente inválido: {}", e))?;
        let to: Mailbox = notify_to
            .parse()
            .map_err(|e| anyhow::anyhow!("Destinatário inválido: {}", e))?;

        let subject = format!("[Nova consulta] {}", data.customer_name);
        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(render_body(&data))
            .map_err(|e| anyhow::anyhow!("Falha ao montar a mensagem: {}", e))?;

        transport.send(message).await?;
        tracing::info!(cliente = %data.customer_name, "Notificação de consulta enviada");
        Ok(())
    }
}

fn render_body(data: &InquiryNotification) -> String {
    let mut body = String::new();
    body.push_str(&format!("Nova consulta recebida — {}\n\n", data.tenant_name));
    body.push_str(&format!("Cliente: {}\n", data.customer_name));
    body.push_str(&format!("Contato: {}\n", data.customer_contact));

    if let Some(message) = &data.message {
        body.push_str(&format!("\nMensagem:\n{}\n", message));
    }

    body.push_str("\nItens:\n");
    for item in &data.items {
        body.push_str(&format!(
            "  {} x{} — {}\n",
            item.product_name,
            item.quantity,
            format_currency(item.subtotal)
        ));
    }
    body.push_str(&format!("\nTotal: {}\n", format_currency(data.total_amount)));

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn corpo_contem_itens_e_total() {
        let body = render_body(&InquiryNotification {
            tenant_name: "Loja".to_string(),
            customer_name: "Cliente".to_string(),
            customer_contact: "11 99999-0000".to_string(),
            message: Some("Preciso para sexta.".to_string()),
            items: vec![InquiryItem {
                product_id: Uuid::new_v4(),
                product_name: "Furadeira".to_string(),
                product_price: 150_000,
                quantity: 2,
                subtotal: 300_000,
            }],
            total_amount: 300_000,
        });

        assert!(body.contains("Furadeira x2"));
        assert!(body.contains("300,000원"));
        assert!(body.contains("Preciso para sexta."));
    }

    #[tokio::test]
    async fn sem_transporte_o_envio_e_noop() {
        let service = NotificationService::disabled();
        let result = service
            .send_inquiry_notification(InquiryNotification {
                tenant_name: "Loja".to_string(),
                customer_name: "Cliente".to_string(),
                customer_contact: "contato".to_string(),
                message: None,
                items: vec![],
                total_amount: 0,
            })
            .await;

        assert!(result.is_ok());
    }
}
