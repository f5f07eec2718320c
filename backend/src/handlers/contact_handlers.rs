use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        FromRequest, Multipart, Request, State,
    },
    http::{header, HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::mailer::{MailError, OutgoingInquiry};
use crate::handlers::contact_dtos::ContactResponse;
use crate::models::contact_models::ContactSubmission;
use crate::utils::html_page::render_result_page;
use crate::utils::inquiry_body::{format_timestamp, render_inquiry_body};
use crate::AppState;

pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed. Please submit the contact form via POST.";
pub const SENT_MESSAGE: &str = "Message sent successfully.";
pub const TRANSPORT_FAILED_MESSAGE: &str = "Failed to send email. Mail server may be unavailable.";
pub const UNREADABLE_BODY_MESSAGE: &str = "Request body too large or unreadable.";

#[derive(Debug, Error)]
pub enum FormReadError {
    #[error("multipart body rejected: {0}")]
    Multipart(#[from] MultipartRejection),

    #[error("malformed multipart field: {0}")]
    Field(#[from] MultipartError),

    #[error("failed to read body: {0}")]
    Body(#[from] axum::Error),
}

/// Script callers flag themselves with `X-Requested-With: XMLHttpRequest` and get JSON back.
pub fn is_programmatic(headers: &HeaderMap) -> bool {
    headers
        .get("x-requested-with")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.eq_ignore_ascii_case("xmlhttprequest"))
        .unwrap_or(false)
}

/// Outcome of one contact request, rendered as JSON or as an HTML page
/// depending on who asked.
#[derive(Debug)]
pub struct ContactReply {
    status: StatusCode,
    programmatic: bool,
    title: &'static str,
    page_text: String,
    back_href: String,
    json: ContactResponse,
}

impl ContactReply {
    fn method_not_allowed(programmatic: bool, back_href: String) -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            programmatic,
            title: "405 - Method Not Allowed",
            page_text: METHOD_NOT_ALLOWED_MESSAGE.to_string(),
            back_href,
            json: ContactResponse {
                success: false,
                error: Some(METHOD_NOT_ALLOWED_MESSAGE.to_string()),
                ..Default::default()
            },
        }
    }

    fn unreadable(programmatic: bool, back_href: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            programmatic,
            title: "Unreadable request",
            page_text: UNREADABLE_BODY_MESSAGE.to_string(),
            back_href,
            json: ContactResponse {
                success: false,
                error: Some(UNREADABLE_BODY_MESSAGE.to_string()),
                ..Default::default()
            },
        }
    }

    fn invalid(programmatic: bool, errors: Vec<String>, back_href: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            programmatic,
            title: "Form validation error",
            page_text: errors.join("\n"),
            back_href,
            json: ContactResponse {
                success: false,
                errors: Some(errors),
                ..Default::default()
            },
        }
    }

    fn sent(programmatic: bool, preview: String, back_href: String) -> Self {
        Self {
            status: StatusCode::OK,
            programmatic,
            title: "Message Sent Successfully",
            page_text: preview.clone(),
            back_href,
            json: ContactResponse {
                success: true,
                message: Some(SENT_MESSAGE.to_string()),
                preview: Some(preview),
                ..Default::default()
            },
        }
    }

    fn transport_failed(programmatic: bool, preview: String, back_href: String) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            programmatic,
            title: "Email Sending Failed",
            page_text: format!("{}\n\n{}", TRANSPORT_FAILED_MESSAGE, preview),
            back_href,
            json: ContactResponse {
                success: false,
                error: Some(TRANSPORT_FAILED_MESSAGE.to_string()),
                preview: Some(preview),
                ..Default::default()
            },
        }
    }
}

impl IntoResponse for ContactReply {
    fn into_response(self) -> Response {
        if self.programmatic {
            (self.status, Json(self.json)).into_response()
        } else {
            let page = render_result_page(self.title, &self.page_text, &self.back_href);
            (self.status, Html(page)).into_response()
        }
    }
}

async fn read_form_fields(request: Request, limit: usize) -> Result<Vec<(String, String)>, FormReadError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false);

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await?;
        let mut fields = Vec::new();
        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            let value = field.text().await?;
            fields.push((name, value));
        }
        return Ok(fields);
    }

    let bytes = axum::body::to_bytes(request.into_body(), limit).await?;
    Ok(url::form_urlencoded::parse(&bytes).into_owned().collect())
}

pub async fn send_contact(State(state): State<Arc<AppState>>, request: Request) -> ContactReply {
    let programmatic = is_programmatic(request.headers());
    let back_href = state.config.contact_page_url.clone();

    if request.method() != Method::POST {
        info!(method = %request.method(), programmatic, "contact endpoint called without POST");
        return ContactReply::method_not_allowed(programmatic, back_href);
    }

    let fields = match read_form_fields(request, state.config.max_body_bytes).await {
        Ok(fields) => fields,
        Err(e) => {
            warn!(error = %e, programmatic, "could not read contact form body");
            return ContactReply::unreadable(programmatic, back_href);
        }
    };

    let submission = ContactSubmission::from_fields(fields);
    let errors = submission.validate();
    if !errors.is_empty() {
        info!(count = errors.len(), programmatic, "contact submission failed validation");
        return ContactReply::invalid(programmatic, errors, back_href);
    }

    let body = render_inquiry_body(&submission, &format_timestamp(Utc::now()));
    let inquiry = OutgoingInquiry {
        reply_to_name: submission.full_name(),
        reply_to_email: submission.email.clone(),
        body: body.clone(),
    };

    let mailer = state.mailer.clone();
    let delivery = tokio::task::spawn_blocking(move || mailer.deliver(&inquiry))
        .await
        .map_err(|e| MailError::Worker(e.to_string()))
        .and_then(|result| result);

    match delivery {
        Ok(()) => {
            info!(email = %submission.email, industry = %submission.industry, "contact inquiry relayed");
            ContactReply::sent(programmatic, body, back_href)
        }
        Err(e) => {
            error!(email = %submission.email, error = %e, "failed to relay contact inquiry");
            ContactReply::transport_failed(programmatic, body, back_href)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mailer::MockInquiryMailer;
    use crate::config::mailer_config::MailerConfig;
    use crate::models::contact_models::{CONSENT_REQUIRED, SERVICE_REQUIRED};
    use axum::body::Body;
    use axum::http::Request;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    const BOUNDARY: &str = "----ootb-test-boundary";

    fn app(mailer: MockInquiryMailer) -> Router {
        let config = MailerConfig::from_lookup(|_| None).unwrap();
        crate::build_router(Arc::new(AppState {
            config,
            mailer: Arc::new(mailer),
        }))
    }

    fn idle_mailer() -> MockInquiryMailer {
        let mut mailer = MockInquiryMailer::new();
        mailer.expect_deliver().never();
        mailer
    }

    fn jane_fields() -> Vec<(&'static str, &'static str)> {
        vec![
            ("firstName", "Jane"),
            ("lastName", "Doe"),
            ("email", "jane@x.com"),
            ("company", ""),
            ("industry", "gaming"),
            ("budget", ""),
            ("message", "Hi"),
            ("services", "ppc"),
            ("privacy", "on"),
        ]
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            ));
        }
        body.push_str(&format!("--{}--\r\n", BOUNDARY));
        body
    }

    fn post_multipart(fields: &[(&str, &str)], programmatic: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/api/contact")
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={}", BOUNDARY));
        if programmatic {
            builder = builder.header("X-Requested-With", "XMLHttpRequest");
        }
        builder.body(Body::from(multipart_body(fields))).unwrap()
    }

    async fn read_body(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn read_json(response: Response) -> ContactResponse {
        serde_json::from_str(&read_body(response).await).unwrap()
    }

    #[test]
    fn test_programmatic_header_is_case_insensitive() {
        let mut headers = HeaderMap::new();
        assert!(!is_programmatic(&headers));
        headers.insert("x-requested-with", "xmlHttpRequest".parse().unwrap());
        assert!(is_programmatic(&headers));
        headers.insert("x-requested-with", "fetch".parse().unwrap());
        assert!(!is_programmatic(&headers));
    }

    #[tokio::test]
    async fn test_get_is_method_not_allowed() {
        let request = Request::builder()
            .method("GET")
            .uri("/api/contact")
            .header("X-Requested-With", "XMLHttpRequest")
            .body(Body::from(multipart_body(&jane_fields())))
            .unwrap();
        let response = app(idle_mailer()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let json = read_json(response).await;
        assert!(!json.success);
        assert_eq!(json.error.as_deref(), Some(METHOD_NOT_ALLOWED_MESSAGE));
    }

    #[tokio::test]
    async fn test_get_without_header_renders_html() {
        let request = Request::builder()
            .method("GET")
            .uri("/send_mail")
            .body(Body::empty())
            .unwrap();
        let response = app(idle_mailer()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let page = read_body(response).await;
        assert!(page.contains("405 - Method Not Allowed"));
    }

    #[tokio::test]
    async fn test_missing_privacy_is_rejected() {
        let fields: Vec<_> = jane_fields().into_iter().filter(|(k, _)| *k != "privacy").collect();
        let response = app(idle_mailer()).oneshot(post_multipart(&fields, true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert!(!json.success);
        assert_eq!(json.errors, Some(vec![CONSENT_REQUIRED.to_string()]));
        assert!(json.preview.is_none());
    }

    #[tokio::test]
    async fn test_empty_post_lists_every_error() {
        let response = app(idle_mailer()).oneshot(post_multipart(&[], true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let errors = read_json(response).await.errors.unwrap();
        assert_eq!(errors.len(), 7);
        assert!(errors.contains(&SERVICE_REQUIRED.to_string()));
    }

    #[tokio::test]
    async fn test_validation_errors_as_html() {
        let fields: Vec<_> = jane_fields().into_iter().filter(|(k, _)| *k != "services").collect();
        let response = app(idle_mailer()).oneshot(post_multipart(&fields, false)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let page = read_body(response).await;
        assert!(page.contains("Form validation error"));
        assert!(page.contains(SERVICE_REQUIRED));
    }

    #[tokio::test]
    async fn test_successful_relay_returns_preview() {
        let mut mailer = MockInquiryMailer::new();
        mailer
            .expect_deliver()
            .times(1)
            .withf(|inquiry: &OutgoingInquiry| {
                inquiry.reply_to_name == "Jane Doe"
                    && inquiry.reply_to_email == "jane@x.com"
                    && inquiry.body.contains("Company: Not specified\n")
            })
            .returning(|_| Ok(()));

        let response = app(mailer).oneshot(post_multipart(&jane_fields(), true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = read_json(response).await;
        assert!(json.success);
        assert_eq!(json.message.as_deref(), Some(SENT_MESSAGE));
        let preview = json.preview.unwrap();
        assert!(preview.starts_with("New Campaign Inquiry - OOTB Media\n"));
        assert!(preview.contains("Services Interested In: ppc\n"));
        assert!(preview.contains("Monthly Budget: Not specified\n"));
    }

    #[tokio::test]
    async fn test_urlencoded_native_submission() {
        let mut mailer = MockInquiryMailer::new();
        mailer.expect_deliver().times(1).returning(|_| Ok(()));

        let body = "firstName=Jane&lastName=Doe&email=jane%40x.com&industry=gaming&message=Hi+there\
&services=ppc&services=seo&privacy=on";
        let request = Request::builder()
            .method("POST")
            .uri("/send_mail")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        let response = app(mailer).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let page = read_body(response).await;
        assert!(page.contains("Message Sent Successfully"));
        assert!(page.contains("Services Interested In: ppc, seo"));
        assert!(page.contains("Hi there"));
    }

    #[tokio::test]
    async fn test_transport_failure_echoes_body() {
        let mut mailer = MockInquiryMailer::new();
        mailer
            .expect_deliver()
            .times(1)
            .returning(|_| Err(MailError::Worker("sendmail not installed".to_string())));

        let response = app(mailer).oneshot(post_multipart(&jane_fields(), true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = read_json(response).await;
        assert!(!json.success);
        assert_eq!(json.error.as_deref(), Some(TRANSPORT_FAILED_MESSAGE));
        assert!(json.preview.unwrap().contains("Name: Jane Doe\n"));
    }

    #[tokio::test]
    async fn test_transport_failure_as_html() {
        let mut mailer = MockInquiryMailer::new();
        mailer
            .expect_deliver()
            .times(1)
            .returning(|_| Err(MailError::Worker("sendmail not installed".to_string())));

        let response = app(mailer).oneshot(post_multipart(&jane_fields(), false)).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let page = read_body(response).await;
        assert!(page.contains("<title>Email Sending Failed</title>"));
        assert!(page.contains(&format!(
            "{}\n\nNew Campaign Inquiry - OOTB Media\n",
            TRANSPORT_FAILED_MESSAGE
        )));
        assert!(page.contains("Name: Jane Doe\n"));
    }

    #[tokio::test]
    async fn test_oversized_body_is_not_reported_as_missing_fields() {
        let long_message = "a".repeat(70 * 1024);
        let fields: Vec<(&str, &str)> = jane_fields()
            .into_iter()
            .map(|(name, value)| if name == "message" { (name, long_message.as_str()) } else { (name, value) })
            .collect();

        let response = app(idle_mailer()).oneshot(post_multipart(&fields, true)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = read_json(response).await;
        assert!(!json.success);
        assert_eq!(json.error.as_deref(), Some(UNREADABLE_BODY_MESSAGE));
        assert!(json.errors.is_none());
    }

    #[tokio::test]
    async fn test_oversized_body_as_html() {
        let long_message = "a".repeat(70 * 1024);
        let body = format!("firstName=Jane&message={}", long_message);
        let request = Request::builder()
            .method("POST")
            .uri("/send_mail")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();

        let response = app(idle_mailer()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let page = read_body(response).await;
        assert!(page.contains(UNREADABLE_BODY_MESSAGE));
        assert!(!page.contains("First name is required."));
    }

    #[tokio::test]
    async fn test_health_check() {
        let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
        let response = app(idle_mailer()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response).await, "OK");
    }
}
