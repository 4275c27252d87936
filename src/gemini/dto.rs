use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct Content<'a> {
    pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct Part<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerationConfig<'a> {
    pub response_mime_type: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    pub fn single_prompt(text: &'a str, response_mime_type: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text }],
            }],
            generation_config: GenerationConfig { response_mime_type },
        }
    }
}

/// Only the path `candidates[0].content.parts[0].text` is read.
#[derive(Debug, Default, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    pub fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ApiErrorEnvelope {
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
