//! Registration resource.
//!
//! ```text
//! POST /api/v1/register   first_name=Ada&last_name=Lovelace&...   (form, multipart or JSON)
//! GET  /api/v1/register?action=input_click&input=email
//! ```
//!
//! Every other method, and any GET without `action=input_click`, answers
//! 405 with the standard error envelope.

use actix_multipart::form::MultipartForm;
use actix_multipart::form::text::Text;
use actix_web::error::InternalError;
use actix_web::http::{StatusCode, header};
use actix_web::middleware::DefaultHeaders;
use actix_web::{Either, HttpResponse, Resource, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use zeroize::Zeroizing;

use super::envelope::{ErrorResponse, FieldErrorsResponse, SuccessResponse};
use super::error::ApiResult;
use super::state::HttpState;
use crate::domain::{RegistrationRequest, acknowledge_input};

/// Message returned after a user has been stored.
pub const REGISTRATION_SUCCESS_MESSAGE: &str = "Registration successful.";
/// Message returned for unsupported methods and actions.
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Method Not Allowed";
/// Message returned when the body cannot be decoded at all.
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";
/// Message returned when the body exceeds the buffered payload limit.
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request body too large.";
/// Query `action` value selecting the input echo.
pub const INPUT_CLICK_ACTION: &str = "input_click";

/// Registration submission as sent by the browser form.
///
/// Missing keys decode as empty strings so they surface as "required"
/// messages rather than decoding failures.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct RegistrationForm {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[schema(example = "ada_l")]
    pub username: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "analytical")]
    pub password: String,
    #[serde(rename = "repeatPassword", alias = "repeat_password")]
    #[schema(example = "analytical")]
    pub repeat_password: String,
    /// `YYYY-MM-DD`.
    #[schema(example = "1990-12-10")]
    pub birthdate: String,
}

impl From<RegistrationForm> for RegistrationRequest {
    fn from(form: RegistrationForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            username: form.username,
            email: form.email,
            password: Zeroizing::new(form.password),
            repeat_password: Zeroizing::new(form.repeat_password),
            birthdate: form.birthdate,
        }
    }
}

/// The same submission sent as `multipart/form-data`, as a browser
/// `FormData` object produces.
#[derive(MultipartForm)]
pub struct RegistrationMultipart {
    pub first_name: Option<Text<String>>,
    pub last_name: Option<Text<String>>,
    pub username: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub password: Option<Text<String>>,
    #[multipart(rename = "repeatPassword")]
    pub repeat_password: Option<Text<String>>,
    #[multipart(rename = "repeat_password")]
    pub repeat_password_alias: Option<Text<String>>,
    pub birthdate: Option<Text<String>>,
}

fn text_part(part: Option<Text<String>>) -> String {
    part.map(|text| text.0).unwrap_or_default()
}

impl From<RegistrationMultipart> for RegistrationForm {
    fn from(parts: RegistrationMultipart) -> Self {
        Self {
            first_name: text_part(parts.first_name),
            last_name: text_part(parts.last_name),
            username: text_part(parts.username),
            email: text_part(parts.email),
            password: text_part(parts.password),
            repeat_password: text_part(parts.repeat_password.or(parts.repeat_password_alias)),
            birthdate: text_part(parts.birthdate),
        }
    }
}

/// Query string accepted by `GET /api/v1/register`.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InputClickQuery {
    /// Must be `input_click`.
    pub action: Option<String>,
    /// Label to echo back.
    pub input: Option<String>,
}

/// JSON, urlencoded, or multipart decoder, chosen by content type.
type RegistrationBody = Either<
    web::Json<RegistrationForm>,
    Either<web::Form<RegistrationForm>, MultipartForm<RegistrationMultipart>>,
>;

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/v1/register",
    request_body(
        content(
            (RegistrationForm = "application/x-www-form-urlencoded"),
            (RegistrationForm = "multipart/form-data"),
            (RegistrationForm = "application/json")
        ),
        description = "Registration fields"
    ),
    responses(
        (status = 200, description = "Account created", body = SuccessResponse),
        (status = 400, description = "Invalid or duplicate fields", body = FieldErrorsResponse),
        (status = 413, description = "Body over the payload limit", body = ErrorResponse),
        (status = 500, description = "Store or hashing failure", body = ErrorResponse)
    ),
    tags = ["registration"],
    operation_id = "register"
)]
pub async fn register(
    state: web::Data<HttpState>,
    payload: Result<RegistrationBody, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let form = match payload {
        Ok(Either::Left(json)) => json.into_inner(),
        Ok(Either::Right(Either::Left(form))) => form.into_inner(),
        Ok(Either::Right(Either::Right(parts))) => parts.0.into(),
        Err(err) => return Ok(rejected_body(&err)),
    };
    state.registration.register(form.into()).await?;
    Ok(HttpResponse::Ok().json(SuccessResponse::new(REGISTRATION_SUCCESS_MESSAGE)))
}

/// Echo the label of a clicked form input.
#[utoipa::path(
    get,
    path = "/api/v1/register",
    params(InputClickQuery),
    responses(
        (status = 200, description = "Input acknowledged", body = SuccessResponse),
        (status = 405, description = "Unsupported action", body = ErrorResponse)
    ),
    tags = ["registration"],
    operation_id = "inputClick"
)]
pub async fn input_click(query: web::Query<InputClickQuery>) -> HttpResponse {
    let InputClickQuery { action, input } = query.into_inner();
    if action.as_deref() != Some(INPUT_CLICK_ACTION) {
        debug!(?action, "unsupported registration action");
        return method_not_allowed_response();
    }
    let label = input.unwrap_or_default();
    HttpResponse::Ok().json(SuccessResponse::new(acknowledge_input(&label)))
}

/// Fallback for every unsupported method.
pub async fn method_not_allowed() -> HttpResponse {
    method_not_allowed_response()
}

fn method_not_allowed_response() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(ErrorResponse::new(METHOD_NOT_ALLOWED_MESSAGE))
}

/// The buffered `Either` read fails with a bare 413 before either decoder's
/// error handler runs, so that case is rewrapped in the envelope here.
fn rejected_body(err: &actix_web::Error) -> HttpResponse {
    if err.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
        debug!(error = %err, "registration body over the payload limit");
        return HttpResponse::PayloadTooLarge()
            .json(ErrorResponse::new(PAYLOAD_TOO_LARGE_MESSAGE));
    }
    err.error_response()
}

fn invalid_body<E>(err: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    debug!(error = %err, "rejected registration body");
    InternalError::from_response(
        err,
        HttpResponse::BadRequest().json(ErrorResponse::new(INVALID_BODY_MESSAGE)),
    )
    .into()
}

/// Headers attached to every registration response.
pub fn response_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::CACHE_CONTROL, "no-store, no-cache, must-revalidate"))
        .add((header::PRAGMA, "no-cache"))
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST"))
        .add((
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            "Content-Type, Authorization",
        ))
}

/// The `/register` resource with its body decoders and method fallback.
pub fn resource() -> Resource {
    web::resource("/register")
        .app_data(web::JsonConfig::default().error_handler(|err, _req| invalid_body(err)))
        .app_data(web::FormConfig::default().error_handler(|err, _req| invalid_body(err)))
        .route(web::post().to(register))
        .route(web::get().to(input_click))
        .default_service(web::to(method_not_allowed))
}

/// Mount the registration API under `/api/v1`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use registration::inbound::http::registration::configure;
///
/// let _app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .wrap(response_headers())
            .service(resource()),
    );
}
