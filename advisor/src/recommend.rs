//! Query pipeline: embed the question, retrieve context, generate the answer.
//!
//! Each query is independent and stateless: embed → retrieve → (empty-result
//! fallback | compose → generate). Any stage failure is reported once via
//! `tracing` and converted into a fixed user-visible fallback string; nothing
//! is retried and no raw error detail reaches the caller.

use std::sync::Arc;
use std::{future::Future, pin::Pin};

use clinic_store::{ClinicHit, ClinicStore, EmbeddingMode, EmbeddingsProvider, StoreError};
use tracing::{debug, error, info};

use crate::generate::TextGenerator;
use crate::prompt::{build_prompt, compose_context};

/// Returned when retrieval finds nothing relevant; the generation service is
/// not consulted in that case.
pub const FALLBACK_NO_MATCH: &str = "I'm sorry, I could not find a clinic suggestion related to \
                                     your complaints. Please consult a healthcare provider directly.";

/// Returned when any service call fails mid-query.
pub const FALLBACK_FAILURE: &str =
    "I'm sorry, I ran into a problem while processing your answer. Please try again.";

/// Default retrieval depth.
pub const DEFAULT_TOP_K: u64 = 3;

/// Source of ranked context hits for a query vector.
///
/// The seam exists so the pipeline can be exercised against a mock
/// collection; production code passes a [`ClinicStore`].
pub trait ContextSource: Send + Sync {
    /// Top-K nearest entries for the query vector, most similar first.
    fn top_hits<'a>(
        &'a self,
        query_vector: Vec<f32>,
        top_k: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ClinicHit>, StoreError>> + Send + 'a>>;
}

impl ContextSource for ClinicStore {
    fn top_hits<'a>(
        &'a self,
        query_vector: Vec<f32>,
        top_k: u64,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<ClinicHit>, StoreError>> + Send + 'a>> {
        Box::pin(self.search_by_vector(query_vector, top_k))
    }
}

/// The query-time pipeline with its dependencies injected.
///
/// Holds handles only; no state survives between [`Advisor::recommend`]
/// calls.
pub struct Advisor {
    source: Arc<dyn ContextSource>,
    embedder: Arc<dyn EmbeddingsProvider>,
    generator: Arc<dyn TextGenerator>,
    top_k: u64,
}

impl Advisor {
    /// Wires the pipeline from its three collaborators.
    pub fn new(
        source: Arc<dyn ContextSource>,
        embedder: Arc<dyn EmbeddingsProvider>,
        generator: Arc<dyn TextGenerator>,
        top_k: u64,
    ) -> Self {
        Self {
            source,
            embedder,
            generator,
            top_k: top_k.max(1),
        }
    }

    /// Produces a natural-language clinic recommendation for a free-text
    /// question.
    ///
    /// Never fails: service errors degrade into [`FALLBACK_FAILURE`] and an
    /// empty retrieval into [`FALLBACK_NO_MATCH`].
    pub async fn recommend(&self, question: &str) -> String {
        let query_vector = match self.embedder.embed(question, EmbeddingMode::Query).await {
            Ok(v) => v,
            Err(e) => {
                error!("Query embedding failed: {e}");
                return FALLBACK_FAILURE.to_string();
            }
        };

        let hits = match self.source.top_hits(query_vector, self.top_k).await {
            Ok(h) => h,
            Err(e) => {
                error!("Retrieval failed: {e}");
                return FALLBACK_FAILURE.to_string();
            }
        };

        if hits.is_empty() {
            info!("Retrieval returned no documents, answering with fallback");
            return FALLBACK_NO_MATCH.to_string();
        }
        debug!("Retrieved {} context hits", hits.len());

        let context = compose_context(&hits);
        let prompt = build_prompt(question, &context);

        match self.generator.generate(&prompt).await {
            Ok(answer) => answer,
            Err(e) => {
                error!("Generation failed: {e}");
                FALLBACK_FAILURE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AdvisorError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubEmbedder {
        fail: bool,
    }

    impl EmbeddingsProvider for StubEmbedder {
        fn embed<'a>(
            &'a self,
            _text: &'a str,
            _mode: EmbeddingMode,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<f32>, StoreError>> + Send + 'a>> {
            Box::pin(async move {
                if self.fail {
                    Err(StoreError::Embedding("simulated outage".into()))
                } else {
                    Ok(vec![0.1, 0.2, 0.3])
                }
            })
        }
    }

    struct StubSource {
        hits: Vec<ClinicHit>,
        fail: bool,
    }

    impl ContextSource for StubSource {
        fn top_hits<'a>(
            &'a self,
            _query_vector: Vec<f32>,
            _top_k: u64,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<ClinicHit>, StoreError>> + Send + 'a>>
        {
            Box::pin(async move {
                if self.fail {
                    Err(StoreError::Qdrant("simulated outage".into()))
                } else {
                    Ok(self.hits.clone())
                }
            })
        }
    }

    /// Echoes the prompt back so assertions can look inside the context.
    struct EchoGenerator {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl TextGenerator for EchoGenerator {
        fn generate<'a>(
            &'a self,
            prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, AdvisorError>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if self.fail {
                    Err(AdvisorError::Llm(
                        ai_llm_service::AiLlmError::EmptyCandidates,
                    ))
                } else {
                    Ok(prompt.to_string())
                }
            })
        }
    }

    fn advisor(
        hits: Vec<ClinicHit>,
        embed_fail: bool,
        source_fail: bool,
        gen_fail: bool,
    ) -> (Advisor, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let adv = Advisor::new(
            Arc::new(StubSource {
                hits,
                fail: source_fail,
            }),
            Arc::new(StubEmbedder { fail: embed_fail }),
            Arc::new(EchoGenerator {
                calls: calls.clone(),
                fail: gen_fail,
            }),
            DEFAULT_TOP_K,
        );
        (adv, calls)
    }

    fn neurology_hit() -> ClinicHit {
        ClinicHit {
            score: 0.95,
            symptom: "severe headache and sensitivity to light".to_string(),
            clinic: "Neurology".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_retrieval_short_circuits_without_generation() {
        let (adv, calls) = advisor(vec![], false, false, false);
        let answer = adv.recommend("my elbow itches").await;
        assert_eq!(answer, FALLBACK_NO_MATCH);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn matching_symptom_surfaces_its_clinic() {
        let (adv, calls) = advisor(vec![neurology_hit()], false, false, false);
        let answer = adv.recommend("terrible headache, light hurts my eyes").await;
        assert!(answer.contains("Neurology"));
        assert!(answer.contains(
            "Related Symptom: severe headache and sensitivity to light, \
             Clinic to visit: Neurology"
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn embedding_failure_degrades_to_fallback() {
        let (adv, calls) = advisor(vec![neurology_hit()], true, false, false);
        let answer = adv.recommend("headache").await;
        assert_eq!(answer, FALLBACK_FAILURE);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn retrieval_failure_degrades_to_fallback() {
        let (adv, _) = advisor(vec![], false, true, false);
        let answer = adv.recommend("headache").await;
        assert_eq!(answer, FALLBACK_FAILURE);
    }

    #[tokio::test]
    async fn generation_failure_degrades_to_fallback() {
        let (adv, calls) = advisor(vec![neurology_hit()], false, false, true);
        let answer = adv.recommend("headache").await;
        assert_eq!(answer, FALLBACK_FAILURE);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
