//! Prompt builder: fixed persona instructions + retrieved context block.

use clinic_store::ClinicHit;

/// Joins retrieved pairs into the context block, one line per hit, most
/// similar first. The line format is load-bearing: downstream instructions
/// tell the model to only recommend clinics named here.
pub fn compose_context(hits: &[ClinicHit]) -> String {
    hits.iter()
        .map(|h| format!("Related Symptom: {}, Clinic to visit: {}", h.symptom, h.clinic))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds the full generation prompt from the user question and the composed
/// context block.
pub fn build_prompt(question: &str, context: &str) -> String {
    format!(
        r#"You are an assistant that suggests which clinic a user should visit based on their health complaints.
You are given the user's question and the most relevant known symptoms retrieved from the database.
Based on this information, give the user a polite, friendly, and clear recommendation.
State that you are not making a medical diagnosis, only pointing them in the right direction.
Only recommend clinics that appear in the provided information below.

PROVIDED INFORMATION:
{context}

USER QUESTION:
"{question}"

ANSWER:
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(symptom: &str, clinic: &str) -> ClinicHit {
        ClinicHit {
            score: 0.9,
            symptom: symptom.to_string(),
            clinic: clinic.to_string(),
        }
    }

    #[test]
    fn context_format_is_exact() {
        let hits = vec![hit("fever", "Internal Medicine"), hit("cough", "Pulmonology")];
        assert_eq!(
            compose_context(&hits),
            "Related Symptom: fever, Clinic to visit: Internal Medicine\n\
             Related Symptom: cough, Clinic to visit: Pulmonology"
        );
    }

    #[test]
    fn context_preserves_retrieval_order() {
        let hits = vec![hit("b", "B"), hit("a", "A")];
        let ctx = compose_context(&hits);
        assert!(ctx.find("Related Symptom: b").unwrap() < ctx.find("Related Symptom: a").unwrap());
    }

    #[test]
    fn empty_hits_compose_to_empty_block() {
        assert_eq!(compose_context(&[]), "");
    }

    #[test]
    fn prompt_embeds_question_and_context() {
        let ctx = compose_context(&[hit("fever", "Internal Medicine")]);
        let prompt = build_prompt("I feel feverish", &ctx);
        assert!(prompt.contains("\"I feel feverish\""));
        assert!(prompt.contains("Related Symptom: fever, Clinic to visit: Internal Medicine"));
        assert!(prompt.contains("not making a medical diagnosis"));
        assert!(prompt.contains("Only recommend clinics"));
    }
}
