use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::mailer::{self, MailAttachment};
use crate::shared::config::Config;
use crate::shared::format::format_date;

const MAX_FILE_BYTES: usize = 10 * 1024 * 1024;

/// Request body cap for the application form: four attachments at the
/// per-file limit plus text fields and multipart framing. Overrides
/// axum's 2 MB default, which would reject the form before any field
/// validation runs.
pub const APPLICATION_BODY_LIMIT: usize = 45 * 1024 * 1024;

const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];
const OTHER_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "jpg", "jpeg", "png"];

/// Uniform response body for the public mail endpoints
#[derive(Debug, Serialize)]
pub struct MailResponse {
    pub success: bool,
    pub message: String,
}

impl MailResponse {
    fn ok(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.to_string(),
        })
    }

    fn rejected(message: String) -> (StatusCode, Json<Self>) {
        (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Self {
                success: false,
                message,
            }),
        )
    }

    fn failed() -> (StatusCode, Json<Self>) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Self {
                success: false,
                message: "No se ha podido enviar el mensaje, inténtelo más tarde".to_string(),
            }),
        )
    }
}

fn allowed_extensions(field: &str) -> &'static [&'static str] {
    if field == "other" {
        OTHER_EXTENSIONS
    } else {
        DOCUMENT_EXTENSIONS
    }
}

fn check_file(field: &str, filename: &str, size: usize) -> Result<(), String> {
    let extension = filename
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    if !allowed_extensions(field).contains(&extension.as_str()) {
        return Err(format!(
            "Tipo de archivo no permitido para '{}': {}",
            field, filename
        ));
    }
    if size > MAX_FILE_BYTES {
        return Err(format!("El archivo '{}' supera los 10 MB", filename));
    }
    Ok(())
}

#[derive(Default)]
struct ApplicationForm {
    name: String,
    email: String,
    phone: String,
    message: String,
    attachments: Vec<MailAttachment>,
}

async fn read_application(multipart: &mut Multipart) -> Result<ApplicationForm, String> {
    let mut form = ApplicationForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| "Formulario no válido".to_string())?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => form.name = field.text().await.unwrap_or_default(),
            "email" => form.email = field.text().await.unwrap_or_default(),
            "phone" => form.phone = field.text().await.unwrap_or_default(),
            "message" => form.message = field.text().await.unwrap_or_default(),
            "cv" | "cover_letter" | "certificates" | "other" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                if filename.is_empty() {
                    continue;
                }
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|_| format!("No se ha podido leer el archivo '{}'", filename))?;
                check_file(&field_name, &filename, data.len())?;
                form.attachments.push(MailAttachment {
                    filename,
                    content_type,
                    data: data.to_vec(),
                });
            }
            _ => {}
        }
    }

    if form.name.trim().is_empty() || form.email.trim().is_empty() {
        return Err("El nombre y el email son obligatorios".to_string());
    }
    Ok(form)
}

/// POST /api/submit-application
pub async fn submit_application(
    State(config): State<Config>,
    mut multipart: Multipart,
) -> Result<Json<MailResponse>, (StatusCode, Json<MailResponse>)> {
    let form = match read_application(&mut multipart).await {
        Ok(form) => form,
        Err(message) => return Err(MailResponse::rejected(message)),
    };

    let subject = format!("Nueva candidatura: {}", form.name);
    let body = format!(
        "Nombre: {}\nEmail: {}\nTeléfono: {}\n\n{}",
        form.name, form.email, form.phone, form.message
    );

    let smtp = config.smtp.clone();
    let mail = config.mail.clone();
    let reply_to = form.email.clone();
    let attachments = form.attachments;

    let result = tokio::task::spawn_blocking(move || {
        mailer::send_with_attachments(&smtp, &mail, &subject, body, Some(&reply_to), attachments)
    })
    .await;

    match result {
        Ok(Ok(())) => Ok(MailResponse::ok("Candidatura enviada correctamente")),
        Ok(Err(e)) => {
            tracing::error!("Failed to send application mail: {}", e);
            Err(MailResponse::failed())
        }
        Err(e) => {
            tracing::error!("Mail task panicked: {}", e);
            Err(MailResponse::failed())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

/// POST /api/contact
pub async fn contact(
    State(config): State<Config>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<MailResponse>, (StatusCode, Json<MailResponse>)> {
    if payload.name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.message.trim().is_empty()
    {
        return Err(MailResponse::rejected(
            "El nombre, el email y el mensaje son obligatorios".to_string(),
        ));
    }

    let subject = if payload.subject.trim().is_empty() {
        format!("Mensaje de contacto de {}", payload.name)
    } else {
        format!("Contacto: {}", payload.subject)
    };
    let body = format!(
        "Nombre: {}\nEmail: {}\nFecha: {}\n\n{}",
        payload.name,
        payload.email,
        format_date(chrono::Utc::now().date_naive()),
        payload.message
    );

    let smtp = config.smtp.clone();
    let mail = config.mail.clone();
    let reply_to = payload.email.clone();

    let result =
        tokio::task::spawn_blocking(move || {
            mailer::send_plain(&smtp, &mail, &subject, body, Some(&reply_to))
        })
        .await;

    match result {
        Ok(Ok(())) => Ok(MailResponse::ok("Mensaje enviado correctamente")),
        Ok(Err(e)) => {
            tracing::error!("Failed to send contact mail: {}", e);
            Err(MailResponse::failed())
        }
        Err(e) => {
            tracing::error!("Mail task panicked: {}", e);
            Err(MailResponse::failed())
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_extension_allow_list() {
        assert!(check_file("cv", "curriculum.pdf", 1024).is_ok());
        assert!(check_file("cv", "curriculum.docx", 1024).is_ok());
        assert!(check_file("cv", "foto.jpg", 1024).is_err());
        assert!(check_file("cv", "script.exe", 1024).is_err());
    }

    #[test]
    fn test_other_field_accepts_images() {
        assert!(check_file("other", "obra.jpg", 1024).is_ok());
        assert!(check_file("other", "obra.png", 1024).is_ok());
        assert!(check_file("other", "video.mp4", 1024).is_err());
    }

    #[test]
    fn test_size_limit() {
        assert!(check_file("cv", "grande.pdf", MAX_FILE_BYTES + 1).is_err());
        assert!(check_file("cv", "justo.pdf", MAX_FILE_BYTES).is_ok());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        assert!(check_file("cv", "CURRICULUM.PDF", 1024).is_ok());
    }

    #[test]
    fn test_body_limit_admits_four_full_attachments() {
        // A form with every attachment at the per-file cap must fit
        // under the request body limit, with room for text fields and
        // multipart framing. A mid-size file like a 5 MB CV passes the
        // per-file check and must not be cut off by the transport.
        assert!(APPLICATION_BODY_LIMIT > 4 * MAX_FILE_BYTES);
        assert!(check_file("cv", "curriculum.pdf", 5 * 1024 * 1024).is_ok());
    }
}
