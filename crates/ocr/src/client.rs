use base64::{Engine as _, engine::general_purpose::STANDARD};
use engine::{ExtractedItem, ReceiptExtractor, ReceiptImage, ResultEngine};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

use crate::{error::OcrError, parse_receipt_text};

pub const DEFAULT_ENDPOINT: &str = "https://api.ocr.space/parse/image";
pub const DEFAULT_LANGUAGE: &str = "eng";
pub const DEFAULT_ENGINE: u8 = 2;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrResponse {
    #[serde(default)]
    parsed_results: Vec<ParsedResult>,
    #[serde(rename = "OCRExitCode", default)]
    ocr_exit_code: Value,
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    file_parse_exit_code: Value,
    #[serde(default)]
    parsed_text: Option<String>,
}

/// Receipt extractor backed by the OCR.space parse API.
#[derive(Debug, Clone)]
pub struct OcrSpaceClient {
    endpoint: Url,
    api_key: String,
    engine: u8,
    http: reqwest::Client,
}

impl OcrSpaceClient {
    pub fn new(api_key: &str) -> Result<Self, OcrError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Result<Self, OcrError> {
        let endpoint = Url::parse(endpoint).map_err(|err| OcrError::Endpoint(err.to_string()))?;
        Ok(Self {
            endpoint,
            api_key: api_key.to_string(),
            engine: DEFAULT_ENGINE,
            http: reqwest::Client::new(),
        })
    }

    /// Select the OCR.space engine (1, 2 or 3).
    #[must_use]
    pub fn engine(mut self, engine: u8) -> Self {
        self.engine = engine;
        self
    }

    /// Send the image and return the recognized text of every parsed page.
    pub async fn recognize(&self, image: &ReceiptImage) -> Result<String, OcrError> {
        let data_url = format!(
            "data:{};base64,{}",
            image.content_type,
            STANDARD.encode(&image.bytes)
        );
        let language = image.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);
        let engine = self.engine.to_string();
        let form = [
            ("base64Image", data_url.as_str()),
            ("language", language),
            ("OCREngine", engine.as_str()),
            ("isTable", "true"),
            ("scale", "true"),
            ("isOverlayRequired", "false"),
        ];

        let res = self
            .http
            .post(self.endpoint.clone())
            .header("apikey", &self.api_key)
            .form(&form)
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(OcrError::Status(res.status().as_u16()));
        }

        let body = res.json::<OcrResponse>().await?;
        collect_text(body)
    }
}

impl ReceiptExtractor for OcrSpaceClient {
    async fn extract(&self, image: &ReceiptImage) -> ResultEngine<Vec<ExtractedItem>> {
        let text = self.recognize(image).await?;
        let items = parse_receipt_text(&text);
        tracing::debug!(
            lines = text.lines().count(),
            items = items.len(),
            "receipt text parsed"
        );
        Ok(items)
    }
}

fn code_is(value: &Value, code: u64) -> bool {
    match value {
        Value::Number(n) => n.as_u64() == Some(code),
        Value::String(s) => s.trim().parse::<u64>().ok() == Some(code),
        _ => false,
    }
}

fn error_message(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Array(parts) => {
            let parts: Vec<String> = parts
                .into_iter()
                .filter_map(|part| part.as_str().map(ToString::to_string))
                .collect();
            (!parts.is_empty()).then(|| parts.join(" "))
        }
        _ => None,
    }
}

fn collect_text(body: OcrResponse) -> Result<String, OcrError> {
    if body.is_errored_on_processing || code_is(&body.ocr_exit_code, 4) {
        let message = error_message(body.error_message)
            .unwrap_or_else(|| "OCR processing failed".to_string());
        return Err(OcrError::Processing(message));
    }

    let text: String = body
        .parsed_results
        .into_iter()
        .filter(|result| code_is(&result.file_parse_exit_code, 1))
        .filter_map(|result| result.parsed_text)
        .map(|text| text + "\n")
        .collect();

    if text.trim().is_empty() {
        return Err(OcrError::NoText);
    }
    Ok(text)
}
