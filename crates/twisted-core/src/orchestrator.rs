//! Generative request orchestration for the design architect panel.
//!
//! Every operation exists in a split form (`begin_*` / `complete_*`) so an
//! event loop can hand the network call to a task and keep drawing, and as a
//! single `async fn` that runs both halves against the backend. Failures are
//! logged here and never returned to the caller.

use crate::asset::GeneratedAsset;
use crate::cloud::{
    GeminiClient, GenerateContentResponse, GenerativeBackend, ImageRequest, TextRequest,
    TextResponse,
};
use crate::error::Result;
use crate::prompts::{
    asset_prompt, mutation_prompt, DESIGN_SYSTEM_INSTRUCTION, EMPTY_RESPONSE_FALLBACK,
    FAILURE_MESSAGE,
};
use crate::settings::Settings;
use crate::transcript::{Transcript, TranscriptEntry};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
struct ModelConfig {
    text_model: String,
    image_model: String,
    aspect_ratio: String,
    image_size: String,
}

pub struct Orchestrator {
    backend: Arc<dyn GenerativeBackend>,
    models: ModelConfig,
    transcript: Transcript,
    asset: Option<GeneratedAsset>,
    prompt: String,
    /// Shared by the text and image paths: one call in flight at a time
    busy: bool,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn GenerativeBackend>, settings: &Settings) -> Self {
        Self {
            backend,
            models: ModelConfig {
                text_model: settings.text_model.clone(),
                image_model: settings.image_model.clone(),
                aspect_ratio: settings.aspect_ratio.clone(),
                image_size: settings.image_size.clone(),
            },
            transcript: Transcript::new(),
            asset: None,
            prompt: String::new(),
            busy: false,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(GeminiClient::new(settings.clone())), settings)
    }

    pub fn backend(&self) -> Arc<dyn GenerativeBackend> {
        Arc::clone(&self.backend)
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn asset(&self) -> Option<&GeneratedAsset> {
        self.asset.as_ref()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn prompt_mut(&mut self) -> &mut String {
        &mut self.prompt
    }

    /// Starts a text mutation for `target` using the current prompt.
    ///
    /// Returns `None`, changing nothing, when the prompt is empty or a call
    /// is already in flight. Otherwise the user entry is appended right away
    /// and the busy flag stays set until [`Self::complete_mutation`].
    pub fn begin_mutation(&mut self, target: Option<&str>) -> Option<TextRequest> {
        if self.prompt.is_empty() {
            return None;
        }
        if self.busy {
            debug!("mutation ignored, a generation is already in flight");
            return None;
        }

        self.busy = true;
        self.transcript.push(TranscriptEntry::user(self.prompt.clone()));
        debug!(?target, "design mutation requested");

        Some(TextRequest {
            model: self.models.text_model.clone(),
            contents: mutation_prompt(target, &self.prompt),
            system_instruction: DESIGN_SYSTEM_INSTRUCTION.to_string(),
        })
    }

    pub fn complete_mutation(&mut self, result: Result<TextResponse>) {
        if !self.busy {
            warn!("dropping mutation result with no request in flight");
            return;
        }
        self.busy = false;

        match result {
            Ok(response) => {
                let text = response.text.unwrap_or_else(|| {
                    warn!("text response carried no text");
                    EMPTY_RESPONSE_FALLBACK.to_string()
                });
                info!(chars = text.len(), "design mutation received");
                self.transcript.push(TranscriptEntry::agent(text));
                self.prompt.clear();
            }
            Err(e) => {
                error!(error = %e, "design mutation failed");
                self.transcript.push(TranscriptEntry::agent(FAILURE_MESSAGE));
            }
        }
    }

    pub async fn request_mutation(&mut self, target: Option<&str>) {
        if let Some(request) = self.begin_mutation(target) {
            let backend = self.backend();
            let result = backend.generate_text(&request).await;
            self.complete_mutation(result);
        }
    }

    /// Starts an image generation from the current prompt. Same precondition
    /// and busy discipline as [`Self::begin_mutation`], but nothing is
    /// written to the transcript.
    pub fn begin_asset(&mut self, target: Option<&str>) -> Option<ImageRequest> {
        if self.prompt.is_empty() {
            return None;
        }
        if self.busy {
            debug!("asset request ignored, a generation is already in flight");
            return None;
        }

        self.busy = true;
        debug!(?target, "asset generation requested");

        Some(ImageRequest {
            model: self.models.image_model.clone(),
            prompt: asset_prompt(&self.prompt),
            aspect_ratio: self.models.aspect_ratio.clone(),
            image_size: self.models.image_size.clone(),
        })
    }

    /// A response without an image part leaves the current asset alone, and
    /// a failure is only logged. Neither reaches the transcript.
    pub fn complete_asset(&mut self, result: Result<GenerateContentResponse>) {
        if !self.busy {
            warn!("dropping asset result with no request in flight");
            return;
        }
        self.busy = false;

        match result {
            Ok(response) => match response.first_inline_image() {
                Some(inline) => {
                    let asset = GeneratedAsset::from(inline);
                    info!(mime = %asset.mime_type, bytes = asset.data.len(), "asset generated");
                    self.asset = Some(asset);
                }
                None => warn!("image response carried no inline image data"),
            },
            Err(e) => error!(error = %e, "asset generation failed"),
        }
    }

    pub async fn request_asset(&mut self, target: Option<&str>) {
        if let Some(request) = self.begin_asset(target) {
            let backend = self.backend();
            let result = backend.generate_image(&request).await;
            self.complete_asset(result);
        }
    }

    pub fn dismiss_asset(&mut self) {
        self.asset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::{Candidate, CandidateContent, InlineData, ResponsePart};
    use crate::error::GenerativeError;
    use crate::transcript::Role;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    #[derive(Default)]
    struct StubBackend {
        text: Option<&'static str>,
        image: Option<InlineData>,
        fail: bool,
        last_text: Mutex<Option<TextRequest>>,
        last_image: Mutex<Option<ImageRequest>>,
    }

    impl StubBackend {
        fn failure() -> GenerativeError {
            GenerativeError::Api {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "overloaded".to_string(),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for StubBackend {
        async fn generate_text(&self, request: &TextRequest) -> Result<TextResponse> {
            *self.last_text.lock().unwrap() = Some(request.clone());
            if self.fail {
                return Err(Self::failure());
            }
            Ok(TextResponse {
                text: self.text.map(str::to_string),
            })
        }

        async fn generate_image(&self, request: &ImageRequest) -> Result<GenerateContentResponse> {
            *self.last_image.lock().unwrap() = Some(request.clone());
            if self.fail {
                return Err(Self::failure());
            }
            let mut parts = vec![ResponsePart {
                text: Some("rendered".to_string()),
                ..ResponsePart::default()
            }];
            if let Some(inline) = &self.image {
                parts.push(ResponsePart {
                    inline_data: Some(inline.clone()),
                    ..ResponsePart::default()
                });
            }
            Ok(GenerateContentResponse {
                candidates: vec![Candidate {
                    content: Some(CandidateContent { parts }),
                }],
            })
        }
    }

    fn orchestrator(stub: StubBackend) -> (Orchestrator, Arc<StubBackend>) {
        let stub = Arc::new(stub);
        let backend: Arc<dyn GenerativeBackend> = stub.clone();
        (Orchestrator::new(backend, &Settings::default()), stub)
    }

    fn png(data: &str) -> InlineData {
        InlineData {
            mime_type: Some("image/png".to_string()),
            data: data.to_string(),
        }
    }

    #[tokio::test]
    async fn empty_prompt_is_ignored() {
        let (mut orch, stub) = orchestrator(StubBackend::default());
        orch.request_mutation(Some("core-card")).await;
        orch.request_asset(Some("core-card")).await;

        assert!(orch.transcript().is_empty());
        assert!(!orch.is_busy());
        assert!(orch.begin_mutation(Some("core-card")).is_none());
        assert!(!orch.is_busy());
        assert!(stub.last_text.lock().unwrap().is_none());
        assert!(stub.last_image.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn successful_mutation_appends_user_then_agent() {
        let (mut orch, stub) = orchestrator(StubBackend {
            text: Some("Increase luminance."),
            ..StubBackend::default()
        });
        orch.set_prompt("make it brighter");
        orch.request_mutation(Some("core-card")).await;

        assert_eq!(
            orch.transcript().entries(),
            &[
                TranscriptEntry::user("make it brighter"),
                TranscriptEntry::agent("Increase luminance."),
            ]
        );
        assert_eq!(orch.prompt(), "");
        assert!(!orch.is_busy());

        let sent = stub.last_text.lock().unwrap().clone().unwrap();
        assert_eq!(sent.model, "gemini-3-flash-preview");
        assert!(sent.contents.contains("\"core-card\""));
        assert!(sent.contents.contains("\"make it brighter\""));
        assert_eq!(sent.system_instruction, DESIGN_SYSTEM_INSTRUCTION);
    }

    #[tokio::test]
    async fn response_without_text_uses_fallback() {
        let (mut orch, _) = orchestrator(StubBackend::default());
        orch.set_prompt("make it brighter");
        orch.request_mutation(Some("core-card")).await;

        let last = orch.transcript().newest_first().next().unwrap();
        assert_eq!(last, &TranscriptEntry::agent(EMPTY_RESPONSE_FALLBACK));
        assert_eq!(orch.prompt(), "");
    }

    #[tokio::test]
    async fn failed_mutation_keeps_prompt_and_reports_generically() {
        let (mut orch, _) = orchestrator(StubBackend {
            fail: true,
            ..StubBackend::default()
        });
        orch.set_prompt("make it brighter");
        orch.request_mutation(Some("core-card")).await;

        assert_eq!(
            orch.transcript().entries(),
            &[
                TranscriptEntry::user("make it brighter"),
                TranscriptEntry::agent(FAILURE_MESSAGE),
            ]
        );
        assert_eq!(orch.prompt(), "make it brighter");
        assert!(!orch.is_busy());
    }

    #[test]
    fn user_entry_is_optimistic() {
        let (mut orch, _) = orchestrator(StubBackend::default());
        orch.set_prompt("tighten spacing");
        let request = orch.begin_mutation(None).unwrap();

        assert!(orch.is_busy());
        assert!(request.contents.contains("\"unselected\""));
        assert_eq!(orch.transcript().len(), 1);
        assert_eq!(orch.transcript().entries()[0].role, Role::User);
    }

    #[test]
    fn busy_flag_is_shared_between_paths() {
        let (mut orch, _) = orchestrator(StubBackend::default());
        orch.set_prompt("hologram");
        assert!(orch.begin_mutation(Some("core-card")).is_some());
        assert!(orch.begin_asset(Some("core-card")).is_none());
        assert!(orch.begin_mutation(Some("core-card")).is_none());
        assert_eq!(orch.transcript().len(), 1);

        orch.complete_mutation(Ok(TextResponse {
            text: Some("done".to_string()),
        }));
        assert!(!orch.is_busy());
    }

    #[test]
    fn completion_without_request_is_dropped() {
        let (mut orch, _) = orchestrator(StubBackend::default());
        orch.complete_mutation(Ok(TextResponse {
            text: Some("late".to_string()),
        }));
        orch.complete_asset(Ok(GenerateContentResponse::default()));
        assert!(orch.transcript().is_empty());
        assert!(orch.asset().is_none());
    }

    #[tokio::test]
    async fn asset_success_stores_first_image_and_keeps_prompt() {
        let (mut orch, stub) = orchestrator(StubBackend {
            image: Some(png("iVBORw0KGgo=")),
            ..StubBackend::default()
        });
        orch.set_prompt("a glowing cube");
        orch.request_asset(Some("core-card")).await;

        let asset = orch.asset().unwrap();
        assert_eq!(asset.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(orch.prompt(), "a glowing cube");
        assert!(orch.transcript().is_empty());

        let sent = stub.last_image.lock().unwrap().clone().unwrap();
        assert_eq!(sent.model, "gemini-3-pro-image-preview");
        assert_eq!((sent.aspect_ratio.as_str(), sent.image_size.as_str()), ("1:1", "1K"));
        assert!(sent.prompt.starts_with("TwistedStacks high-tech UI asset: a glowing cube."));
    }

    #[tokio::test]
    async fn asset_without_image_leaves_previous_asset() {
        let (mut orch, _) = orchestrator(StubBackend::default());
        orch.set_prompt("a glowing cube");

        orch.request_asset(None).await;
        assert!(orch.asset().is_none());

        assert!(orch.begin_asset(None).is_some());
        let mut with_image = GenerateContentResponse::default();
        with_image.candidates.push(Candidate {
            content: Some(CandidateContent {
                parts: vec![ResponsePart {
                    inline_data: Some(png("AAAA")),
                    ..ResponsePart::default()
                }],
            }),
        });
        orch.complete_asset(Ok(with_image));
        assert_eq!(orch.asset().map(|a| a.data.as_str()), Some("AAAA"));

        orch.request_asset(None).await;
        assert_eq!(orch.asset().map(|a| a.data.as_str()), Some("AAAA"));
        assert!(orch.transcript().is_empty());
    }

    #[tokio::test]
    async fn asset_failure_is_silent() {
        let (mut orch, _) = orchestrator(StubBackend {
            fail: true,
            ..StubBackend::default()
        });
        orch.set_prompt("a glowing cube");
        orch.request_asset(None).await;

        assert!(orch.asset().is_none());
        assert!(orch.transcript().is_empty());
        assert!(!orch.is_busy());
        assert_eq!(orch.prompt(), "a glowing cube");
    }

    #[tokio::test]
    async fn dismiss_clears_asset() {
        let (mut orch, _) = orchestrator(StubBackend {
            image: Some(png("AAAA")),
            ..StubBackend::default()
        });
        orch.set_prompt("a glowing cube");
        orch.request_asset(None).await;
        assert!(orch.asset().is_some());

        orch.dismiss_asset();
        assert!(orch.asset().is_none());
    }
}
