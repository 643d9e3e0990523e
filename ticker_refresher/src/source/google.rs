//! Google Sheets implementation of [`SheetSource`].
//!
//! Authentication follows the service-account flow: the key file's private key
//! signs an RS256 JWT which is exchanged at the key's `token_uri` for a bearer
//! token. The spreadsheet is looked up by title through Drive, then the whole tab
//! is read through the Sheets `values` endpoint.

use std::fs;
use std::io::ErrorKind;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use ticker_common::FetchError;

use super::{Rows, SheetSession, SheetSource};

const SCOPES: &str = "https://www.googleapis.com/auth/spreadsheets.readonly \
                      https://www.googleapis.com/auth/drive.readonly";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DRIVE_FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const SHEETS_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";
const TOKEN_LIFETIME_SECS: i64 = 3600;
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Relevant part of a service-account JSON key.
#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// Google Sheets client factory.
pub struct GoogleSheets {
    client: Client,
}

impl GoogleSheets {
    /// Builds the HTTP client shared by every session.
    pub fn new() -> reqwest::Result<Self> {
        let client = Client::builder().timeout(HTTP_TIMEOUT).build()?;
        Ok(Self { client })
    }

    fn load_key(credentials: &str) -> Result<ServiceAccountKey, FetchError> {
        let content = fs::read_to_string(credentials).map_err(|e| match e.kind() {
            ErrorKind::NotFound => {
                FetchError::Auth(format!("Credentials file not found at path: {credentials}"))
            }
            _ => FetchError::Auth(format!("Cannot read credentials file {credentials}: {e}")),
        })?;
        serde_json::from_str(&content)
            .map_err(|e| FetchError::Auth(format!("Invalid service account key: {e}")))
    }

    fn signed_assertion(key: &ServiceAccountKey) -> Result<String, FetchError> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            iss: &key.client_email,
            scope: SCOPES,
            aud: &key.token_uri,
            iat,
            exp: iat + TOKEN_LIFETIME_SECS,
        };
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| FetchError::Auth(format!("Invalid private key: {e}")))?;
        jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &signing_key)
            .map_err(|e| FetchError::Auth(format!("Cannot sign token request: {e}")))
    }
}

impl SheetSource for GoogleSheets {
    type Session = GoogleSession;

    fn authenticate(&self, credentials: &str) -> Result<GoogleSession, FetchError> {
        let key = Self::load_key(credentials)?;
        let assertion = Self::signed_assertion(&key)?;

        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .map_err(transport_error)?;
        // The token endpoint answers a rejected grant with 400.
        let response = match response.status() {
            StatusCode::BAD_REQUEST => {
                return Err(FetchError::Auth(format!(
                    "Token request rejected: {}",
                    body_text(response)
                )));
            }
            _ => check_status(response, "token request")?,
        };
        let token: TokenResponse = response.json().map_err(transport_error)?;
        debug!("Obtained access token for {}", key.client_email);

        Ok(GoogleSession {
            client: self.client.clone(),
            access_token: token.access_token,
        })
    }

    fn requests_per_fetch(&self) -> u32 {
        3
    }
}

/// Bearer-token session against the Drive and Sheets APIs.
pub struct GoogleSession {
    client: Client,
    access_token: String,
}

impl GoogleSession {
    /// Resolves a spreadsheet title to its id.
    fn find_spreadsheet(&self, title: &str) -> Result<String, FetchError> {
        let query = format!(
            "name = '{}' and mimeType = '{}' and trashed = false",
            escape_drive_literal(title),
            SPREADSHEET_MIME
        );
        let response = self
            .client
            .get(DRIVE_FILES_URL)
            .bearer_auth(&self.access_token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id)"),
                ("pageSize", "1"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .map_err(transport_error)?;
        let list: FileList = check_status(response, "spreadsheet lookup")?
            .json()
            .map_err(transport_error)?;

        list.files
            .into_iter()
            .next()
            .map(|file| file.id)
            .ok_or_else(|| FetchError::NotFound(format!("spreadsheet '{title}'")))
    }
}

impl SheetSession for GoogleSession {
    fn read_all_rows(&self, worksheet: &str, sheet: &str) -> Result<Rows, FetchError> {
        let spreadsheet_id = self.find_spreadsheet(worksheet)?;
        let url = values_url(&spreadsheet_id, sheet)?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .query(&[("majorDimension", "ROWS")])
            .send()
            .map_err(transport_error)?;
        if response.status() == StatusCode::BAD_REQUEST {
            let body = body_text(response);
            if body.contains("Unable to parse range") {
                return Err(FetchError::NotFound(format!(
                    "sheet '{sheet}' in spreadsheet '{worksheet}'"
                )));
            }
            return Err(FetchError::Remote(format!("values read: HTTP 400: {body}")));
        }
        let range: ValueRange = check_status(response, "values read")?
            .json()
            .map_err(transport_error)?;

        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }
}

/// `.../spreadsheets/{id}/values/{'tab'}` with every segment percent-encoded.
fn values_url(spreadsheet_id: &str, sheet: &str) -> Result<Url, FetchError> {
    let mut url = Url::parse(SHEETS_URL).map_err(|e| FetchError::Unknown(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::Unknown(format!("{SHEETS_URL} cannot be a base URL")))?
        .push(spreadsheet_id)
        .push("values")
        .push(&a1_sheet_range(sheet));
    Ok(url)
}

/// A1 range covering a whole tab: the name quoted, inner quotes doubled.
fn a1_sheet_range(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// Escapes a string literal for a Drive `q` expression.
fn escape_drive_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_decode() {
        FetchError::Unknown(format!("Unexpected response body: {e}"))
    } else {
        FetchError::Remote(e.to_string())
    }
}

fn body_text(response: Response) -> String {
    response.text().unwrap_or_default()
}

fn check_status(response: Response, context: &str) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(classify_status(status, &body_text(response), context))
}

fn classify_status(status: StatusCode, body: &str, context: &str) -> FetchError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            FetchError::Auth(format!("{context}: HTTP {status}: {body}"))
        }
        StatusCode::NOT_FOUND => FetchError::NotFound(format!("{context}: {body}")),
        _ => FetchError::Remote(format!("{context}: HTTP {status}: {body}")),
    }
}
