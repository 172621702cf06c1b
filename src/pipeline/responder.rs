use std::sync::Arc;
use chrono::Datelike;
use tracing::{debug, warn};

use crate::config::{ResponderMode, ResponderSettings};
use crate::db::Database;
use crate::errors::GuardiaoError;
use crate::llm::TextGenerator;
use crate::models::{AggregatedAnalysis, FraudReport};
use crate::prompts::{PromptLoader, PromptVariables};
use crate::search::WebSearch;
use crate::utils::truncation::{truncate_error, truncate_for_log};

/// Suggested when the analysis names no fraud type at all.
pub const DEFAULT_SUGGESTION: &str = "Phishing";

const TOP_TYPES_IN_CONTEXT: usize = 3;
const PREVENTION_TIPS: usize = 3;

const GENERIC_TIPS: [&str; 3] = [
    "Verifique sempre a fonte antes de clicar em links ou compartilhar informações.",
    "Desconfie de promessas de ganhos rápidos ou mensagens urgentes.",
    "Use autenticação de dois fatores em suas contas.",
];

const OVERVIEW_TIPS: [&str; 3] = [
    "Nunca compartilhe senhas ou códigos de verificação.",
    "Desconfie de mensagens ou ligações inesperadas.",
    "Consulte fontes oficiais antes de tomar qualquer ação.",
];

const PIX_EXAMPLE: &str = "Você recebe um SMS dizendo que ganhou um sorteio e precisa fazer um PIX para liberar o prêmio. **O que fazer?** Ignore a mensagem e nunca faça transferências sem verificar diretamente com a instituição oficial.";
const GENERIC_EXAMPLE: &str = "Você recebe um e-mail pedindo para atualizar seus dados bancários. **O que fazer?** Não clique no link e entre em contato com seu banco pelos canais oficiais.";

/// Answers questions about fraud prevention grounded in the current analysis.
pub struct Responder {
    db: Database,
    llm: Option<Arc<dyn TextGenerator>>,
    search: Option<Arc<dyn WebSearch>>,
    settings: ResponderSettings,
    prompts: Arc<PromptLoader>,
}

impl Responder {
    pub fn new(
        db: Database,
        llm: Option<Arc<dyn TextGenerator>>,
        search: Option<Arc<dyn WebSearch>>,
        settings: ResponderSettings,
        prompts: Arc<PromptLoader>,
    ) -> Self {
        Self { db, llm, search, settings, prompts }
    }

    /// Markdown answer to `question`. Never fails: generation errors produce
    /// an apology that points at a fraud type worth asking about.
    pub async fn respond(&self, question: &str, analysis: &AggregatedAnalysis) -> String {
        let matched = match_fraud_type(question, analysis);
        debug!(question, matched = ?matched.map(|(t, _)| t), mode = %self.settings.mode, "Answering question");

        match self.settings.mode {
            ResponderMode::Template => self.template_response(analysis, matched).await,
            ResponderMode::Llm => match self.generate(question, analysis, matched).await {
                Ok(answer) => answer,
                Err(e) => {
                    warn!(question, error = %truncate_error(&e.to_string()), "Answer generation failed");
                    let suggestion = matched
                        .map(|(t, _)| t)
                        .or_else(|| analysis.top_fraud_types(1).first().map(|(t, _)| *t))
                        .unwrap_or(DEFAULT_SUGGESTION);
                    fallback_message(suggestion)
                }
            },
        }
    }

    async fn generate(
        &self,
        question: &str,
        analysis: &AggregatedAnalysis,
        matched: Option<(&str, u64)>,
    ) -> Result<String, GuardiaoError> {
        let llm = self
            .llm
            .as_ref()
            .ok_or_else(|| GuardiaoError::Config("responder.mode 'llm' requires an LLM provider".into()))?;

        let samples = match self.db.recent_reports(self.settings.sample_rows) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "Could not load sample reports, answering without them");
                Vec::new()
            }
        };

        let vars = PromptVariables {
            question: question.to_string(),
            top_fraud_types: format_top_types(analysis),
            matched_fraud_type: matched.map(|(t, n)| format!("Golpe relacionado à pergunta: {}: {} casos\n", t, n)),
            sample_rows: format_samples(&samples),
            max_words: self.settings.max_words.to_string(),
            ..Default::default()
        };
        let prompt = self.prompts.render("responder", &vars)?;

        let response = llm.complete(&prompt, None).await?;
        debug!(reply = %truncate_for_log(&response.content), "Responder reply received");
        if response.content.trim().is_empty() {
            return Err(GuardiaoError::MalformedResponse("empty answer".into()));
        }
        Ok(response.content)
    }

    async fn template_response(&self, analysis: &AggregatedAnalysis, matched: Option<(&str, u64)>) -> String {
        let Some((fraud_type, count)) = matched else {
            return overview_response(analysis);
        };

        let mut out = vec![
            format!("### Sobre o {}\n", fraud_type),
            format!(
                "O **{}** é um dos golpes mais comuns no Brasil, com **{} casos** registrados em nossa base.\n",
                fraud_type, count
            ),
        ];

        let tips = self.prevention_tips(fraud_type).await;
        if tips.is_empty() {
            out.push("#### Dicas gerais de prevenção:\n".to_string());
            out.extend(numbered(&GENERIC_TIPS));
        } else {
            out.push("#### Como se prevenir:\n".to_string());
            out.extend(numbered(&tips));
        }

        out.push("#### Exemplo prático:\n".to_string());
        let example = if fraud_type.to_lowercase().contains("pix") { PIX_EXAMPLE } else { GENERIC_EXAMPLE };
        out.push(format!("{}\n", example));
        out.join("\n")
    }

    /// Live prevention snippets from the web-search capability, when configured.
    async fn prevention_tips(&self, fraud_type: &str) -> Vec<String> {
        let Some(search) = &self.search else {
            return Vec::new();
        };
        let query = format!("Como se prevenir de {} Brasil {}", fraud_type, chrono::Local::now().year());
        match search.search(&query, 5).await {
            Ok(items) => items
                .into_iter()
                .map(|item| item.snippet.trim().to_string())
                .filter(|s| !s.is_empty())
                .take(PREVENTION_TIPS)
                .collect(),
            Err(e) => {
                warn!(fraud_type, error = %e, "Prevention tip search failed");
                Vec::new()
            }
        }
    }
}

/// The stored fraud type the question mentions. Candidates are tried by
/// descending count, ties broken alphabetically; the first substring hit wins.
pub fn match_fraud_type<'a>(question: &str, analysis: &'a AggregatedAnalysis) -> Option<(&'a str, u64)> {
    let lowered = question.to_lowercase();
    analysis
        .top_fraud_types(usize::MAX)
        .into_iter()
        .find(|(fraud_type, _)| lowered.contains(&fraud_type.to_lowercase()))
}

pub fn fallback_message(suggestion: &str) -> String {
    format!(
        "Desculpe, não consegui gerar uma resposta agora. Tente novamente em instantes ou pergunte sobre um golpe específico, por exemplo: \"Como me proteger do {}?\"",
        suggestion
    )
}

fn overview_response(analysis: &AggregatedAnalysis) -> String {
    let mut out = vec![
        "### Informações Gerais sobre Golpes Financeiros\n".to_string(),
        "Os golpes financeiros estão cada vez mais sofisticados. Aqui estão os três tipos mais comuns atualmente:\n"
            .to_string(),
    ];
    for (fraud_type, count) in analysis.top_fraud_types(TOP_TYPES_IN_CONTEXT) {
        out.push(format!("- **{}**: {} casos registrados.\n", fraud_type, count));
    }
    out.push("\n#### Dicas gerais de prevenção:\n".to_string());
    out.extend(numbered(&OVERVIEW_TIPS));
    out.join("\n")
}

fn numbered<S: AsRef<str>>(items: &[S]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, tip)| format!("{}. {}\n", i + 1, tip.as_ref()))
        .collect()
}

fn format_top_types(analysis: &AggregatedAnalysis) -> String {
    let top = analysis.top_fraud_types(TOP_TYPES_IN_CONTEXT);
    if top.is_empty() {
        return "(nenhum golpe registrado)".to_string();
    }
    top.iter()
        .map(|(t, n)| format!("- {}: {} casos", t, n))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_samples(samples: &[FraudReport]) -> String {
    if samples.is_empty() {
        return "(sem registros)".to_string();
    }
    samples
        .iter()
        .map(|r| {
            format!(
                "- {} | {} | {} | {} | {} | {}",
                r.report_date, r.source, r.fraud_type, r.channel, r.target_audience, r.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use async_trait::async_trait;
    use crate::llm::LLMResponse;
    use crate::models::Category;
    use crate::search::SearchItem;

    /// Replies with the prompt it was given.
    struct EchoGenerator;

    #[async_trait]
    impl TextGenerator for EchoGenerator {
        async fn complete(&self, prompt: &str, _system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
            Ok(LLMResponse::text(prompt, "echo"))
        }
        fn provider_name(&self) -> &str { "echo" }
        fn model_name(&self) -> &str { "echo" }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, GuardiaoError> {
            Err(GuardiaoError::Timeout("deadline exceeded".into()))
        }
        fn provider_name(&self) -> &str { "failing" }
        fn model_name(&self) -> &str { "failing" }
    }

    struct TipSearch;

    #[async_trait]
    impl WebSearch for TipSearch {
        async fn search(&self, _query: &str, _num: u32) -> Result<Vec<SearchItem>, GuardiaoError> {
            Ok((1..=5)
                .map(|i| SearchItem { title: format!("t{}", i), link: format!("l{}", i), snippet: format!("Dica {}", i) })
                .collect())
        }
    }

    fn analysis(counts: &[(&str, u64)]) -> AggregatedAnalysis {
        let mut a = AggregatedAnalysis::empty();
        a.set_scalar(Category::TotalFraudCount, counts.iter().map(|(_, n)| n).sum());
        a.set_grouped(
            Category::CountsByFraudType,
            counts.iter().map(|(t, n)| (t.to_string(), *n)).collect::<BTreeMap<_, _>>(),
        );
        a
    }

    fn responder(llm: Option<Arc<dyn TextGenerator>>, search: Option<Arc<dyn WebSearch>>, mode: ResponderMode) -> Responder {
        Responder::new(
            Database::in_memory().unwrap(),
            llm,
            search,
            ResponderSettings { mode, sample_rows: 5, max_words: 500 },
            Arc::new(PromptLoader::default()),
        )
    }

    #[test]
    fn test_match_prefers_higher_count_then_lexical() {
        let a = analysis(&[("Golpe do Pix", 4), ("Pix", 4), ("Phishing", 9)]);
        assert_eq!(match_fraud_type("golpe do pix e phishing", &a), Some(("Phishing", 9)));
        assert_eq!(match_fraud_type("como evitar o golpe do pix?", &a), Some(("Golpe do Pix", 4)));
        assert_eq!(match_fraud_type("o que é boleto falso?", &a), None);
    }

    #[tokio::test]
    async fn test_llm_answer_grounded_in_counts() {
        let r = responder(Some(Arc::new(EchoGenerator)), None, ResponderMode::Llm);
        let answer = r.respond("Como evitar phishing?", &analysis(&[("Phishing", 5)])).await;
        assert!(answer.contains("Phishing"));
        assert!(answer.contains("5"));
        assert!(answer.contains("Como evitar phishing?"));
    }

    #[tokio::test]
    async fn test_llm_failure_falls_back_to_matched_type() {
        let r = responder(Some(Arc::new(FailingGenerator)), None, ResponderMode::Llm);
        let a = analysis(&[("Phishing", 5), ("Golpe do Pix", 7)]);
        assert!(r.respond("e o phishing?", &a).await.contains("Phishing"));
        assert!(r.respond("oi", &a).await.contains("Golpe do Pix"));
        assert!(r.respond("oi", &AggregatedAnalysis::empty()).await.contains(DEFAULT_SUGGESTION));
    }

    #[tokio::test]
    async fn test_template_matched_with_canned_tips() {
        let r = responder(None, None, ResponderMode::Template);
        let answer = r.respond("Como evitar phishing?", &analysis(&[("Phishing", 5)])).await;
        assert!(answer.contains("### Sobre o Phishing"));
        assert!(answer.contains("**5 casos**"));
        assert!(answer.contains(GENERIC_TIPS[0]));
        assert!(answer.contains(GENERIC_EXAMPLE));
    }

    #[tokio::test]
    async fn test_template_pix_example_and_live_tips() {
        let r = responder(None, Some(Arc::new(TipSearch)), ResponderMode::Template);
        let answer = r.respond("golpe do pix", &analysis(&[("Golpe do Pix", 2)])).await;
        assert!(answer.contains(PIX_EXAMPLE));
        assert!(answer.contains("3. Dica 3"));
        assert!(!answer.contains("Dica 4"));
    }

    #[tokio::test]
    async fn test_template_overview_lists_top_three() {
        let r = responder(None, None, ResponderMode::Template);
        let a = analysis(&[("Phishing", 5), ("Golpe do Pix", 7), ("Deepfake / IA", 1), ("Perfil Falso", 3)]);
        let answer = r.respond("quais golpes existem?", &a).await;
        assert!(answer.contains("- **Golpe do Pix**: 7 casos registrados."));
        assert!(answer.contains("- **Perfil Falso**: 3 casos registrados."));
        assert!(!answer.contains("Deepfake"));
        assert!(answer.contains(OVERVIEW_TIPS[0]));
    }
}
