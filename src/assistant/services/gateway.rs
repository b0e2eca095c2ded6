//! Strict gateway between the task domain and the completion service.

use super::prompts::{
    ANALYZE_WORKLOAD, OperationProfile, PARSE_TASK, RECOMMEND_TASKS, SUGGEST_PRIORITY,
    parsed_task_schema, priority_suggestion_schema, recommendations_schema,
    workload_analysis_schema,
};
use crate::assistant::{
    domain::{
        AiServiceError, AiServiceResult, ParsedTask, PrioritySuggestion, TaskRecommendation,
        WorkloadAnalysis, parse_deadline,
    },
    ports::{CompletionClient, CompletionRequest},
};
use crate::context::domain::ContextEntry;
use crate::task::domain::{Priority, Task, TaskTitle};
use chrono::{DateTime, Utc};
use minijinja::context;
use mockable::Clock;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Context entries used to ground a priority suggestion.
const PRIORITY_CONTEXT_LIMIT: usize = 10;
/// Context entries used to ground natural-language parsing.
const PARSE_CONTEXT_LIMIT: usize = 5;
/// Context entries used to ground recommendations.
const RECOMMEND_CONTEXT_LIMIT: usize = 20;
/// Context entries used to ground a workload analysis.
const ANALYZE_CONTEXT_LIMIT: usize = 20;
/// Open tasks listed in a recommendation or analysis prompt, most urgent first.
const PROMPT_TASK_LIMIT: usize = 25;
/// Upper bound on recommendations in a single reply.
const MAX_RECOMMENDATIONS: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct PrioritySuggestionReply {
    priority: i64,
    deadline: Option<String>,
    reasoning: String,
    context_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ParsedTaskReply {
    title: String,
    description: Option<String>,
    priority: i64,
    deadline: Option<String>,
    context_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecommendationsReply {
    recommendations: Vec<RecommendationReply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RecommendationReply {
    title: String,
    description: String,
    priority: i64,
    reasoning: String,
    context_tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WorkloadAnalysisReply {
    workload_assessment: String,
    priority_distribution: String,
    scheduling_insights: String,
    management_suggestions: Vec<String>,
}

/// Assistant gateway.
///
/// Each operation renders a prompt, sends it with a strict schema, and
/// validates the reply. Shape or range violations fail closed as
/// [`AiServiceError::InvalidReply`].
pub struct AiGateway<G, C>
where
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    client: Arc<G>,
    clock: Arc<C>,
}

impl<G, C> Clone for AiGateway<G, C>
where
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<G, C> AiGateway<G, C>
where
    G: CompletionClient + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a gateway over the given completion client.
    #[must_use]
    pub const fn new(client: Arc<G>, clock: Arc<C>) -> Self {
        Self { client, clock }
    }

    /// Suggests priority, deadline and tags for a task about to be created.
    ///
    /// `context` is expected newest first; only the ten most recent entries
    /// are sent.
    ///
    /// # Errors
    ///
    /// Returns [`AiServiceError`] when the call fails or the reply is
    /// invalid.
    pub async fn suggest_task_priority(
        &self,
        title: &str,
        description: Option<&str>,
        context: &[ContextEntry],
    ) -> AiServiceResult<PrioritySuggestion> {
        let profile = &SUGGEST_PRIORITY;
        let prompt = profile.render(context! {
            title => title,
            description => description.unwrap_or_default(),
            today => self.today(),
            context => context_lines(context, PRIORITY_CONTEXT_LIMIT),
        })?;
        let reply: PrioritySuggestionReply = self
            .call(profile, prompt, priority_suggestion_schema())
            .await?;

        Ok(PrioritySuggestion {
            priority: validate_priority(profile, reply.priority)?,
            deadline: validate_deadline(profile, reply.deadline.as_deref())?,
            reasoning: reply.reasoning.trim().to_owned(),
            context_tags: reply.context_tags.into_iter().collect(),
        })
    }

    /// Parses free-form input into a structured task.
    ///
    /// `context` is expected newest first; only the five most recent entries
    /// are sent.
    ///
    /// # Errors
    ///
    /// Returns [`AiServiceError`] when the call fails or the reply is
    /// invalid, including an empty or overlong title.
    pub async fn parse_natural_language_task(
        &self,
        input: &str,
        context: &[ContextEntry],
    ) -> AiServiceResult<ParsedTask> {
        let profile = &PARSE_TASK;
        let prompt = profile.render(context! {
            input => input,
            today => self.today(),
            context => context_lines(context, PARSE_CONTEXT_LIMIT),
        })?;
        let reply: ParsedTaskReply = self.call(profile, prompt, parsed_task_schema()).await?;

        let title = TaskTitle::new(reply.title)
            .map_err(|err| AiServiceError::invalid_reply(profile.operation, err.to_string()))?;
        Ok(ParsedTask {
            title,
            description: reply
                .description
                .map(|text| text.trim().to_owned())
                .filter(|text| !text.is_empty()),
            priority: validate_priority(profile, reply.priority)?,
            deadline: validate_deadline(profile, reply.deadline.as_deref())?,
            context_tags: reply.context_tags.into_iter().collect(),
        })
    }

    /// Recommends up to five new tasks grounded in recent context.
    ///
    /// Returns an empty list without calling the service when `context` is
    /// empty. The prompt carries the 20 most recent entries and the 25 most
    /// urgent open titles; recommendations repeating any existing task title
    /// are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AiServiceError`] when the call fails or the reply is
    /// invalid, including more than five recommendations.
    pub async fn recommend_tasks(
        &self,
        context: &[ContextEntry],
        existing: &[Task],
    ) -> AiServiceResult<Vec<TaskRecommendation>> {
        if context.is_empty() {
            debug!("no recent context, skipping recommendations");
            return Ok(Vec::new());
        }

        let profile = &RECOMMEND_TASKS;
        let open_titles: Vec<&str> = existing
            .iter()
            .filter(|task| !task.status().is_completed())
            .take(PROMPT_TASK_LIMIT)
            .map(|task| task.title().as_str())
            .collect();
        let prompt = profile.render(context! {
            today => self.today(),
            context => context_lines(context, RECOMMEND_CONTEXT_LIMIT),
            existing => open_titles,
        })?;
        let reply: RecommendationsReply =
            self.call(profile, prompt, recommendations_schema()).await?;

        if reply.recommendations.len() > MAX_RECOMMENDATIONS {
            return Err(AiServiceError::invalid_reply(
                profile.operation,
                format!(
                    "expected at most {MAX_RECOMMENDATIONS} recommendations, got {}",
                    reply.recommendations.len()
                ),
            ));
        }

        let mut recommendations = Vec::with_capacity(reply.recommendations.len());
        for item in reply.recommendations {
            let title = item.title.trim().to_owned();
            if title.is_empty() {
                return Err(AiServiceError::invalid_reply(
                    profile.operation,
                    "recommendation title is empty",
                ));
            }
            let priority = validate_priority(profile, item.priority)?;
            if existing.iter().any(|task| task.title().matches(&title)) {
                debug!(title = %title, "dropping recommendation that repeats an existing task");
                continue;
            }
            recommendations.push(TaskRecommendation {
                title,
                description: item.description.trim().to_owned(),
                priority,
                reasoning: item.reasoning.trim().to_owned(),
                context_tags: item.context_tags.into_iter().collect(),
            });
        }
        Ok(recommendations)
    }

    /// Assesses the open workload against recent context.
    ///
    /// Completed tasks are ignored and the prompt carries at most 25 open
    /// tasks and 20 context entries. Returns `None` without calling the
    /// service when there are neither open tasks nor context entries.
    ///
    /// # Errors
    ///
    /// Returns [`AiServiceError`] when the call fails or the reply is
    /// invalid, including a suggestion count outside two to three.
    pub async fn analyze_tasks(
        &self,
        tasks: &[Task],
        context: &[ContextEntry],
    ) -> AiServiceResult<Option<WorkloadAnalysis>> {
        let open: Vec<&Task> = tasks
            .iter()
            .filter(|task| !task.status().is_completed())
            .collect();
        if open.is_empty() && context.is_empty() {
            debug!("nothing to analyse, skipping workload analysis");
            return Ok(None);
        }

        let profile = &ANALYZE_WORKLOAD;
        let prompt = profile.render(context! {
            today => self.today(),
            tasks => open
                .iter()
                .take(PROMPT_TASK_LIMIT)
                .map(|task| task_line(task))
                .collect::<Vec<_>>(),
            context => context_lines(context, ANALYZE_CONTEXT_LIMIT),
        })?;
        let reply: WorkloadAnalysisReply =
            self.call(profile, prompt, workload_analysis_schema()).await?;

        let suggestions: Vec<String> = reply
            .management_suggestions
            .into_iter()
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty())
            .collect();
        if !(2..=3).contains(&suggestions.len()) {
            return Err(AiServiceError::invalid_reply(
                profile.operation,
                format!(
                    "expected 2 to 3 management suggestions, got {}",
                    suggestions.len()
                ),
            ));
        }

        Ok(Some(WorkloadAnalysis {
            workload_assessment: reply.workload_assessment.trim().to_owned(),
            priority_distribution: reply.priority_distribution.trim().to_owned(),
            scheduling_insights: reply.scheduling_insights.trim().to_owned(),
            management_suggestions: suggestions,
        }))
    }

    fn today(&self) -> String {
        self.clock.utc().date_naive().to_string()
    }

    async fn call<T>(
        &self,
        profile: &OperationProfile,
        user_prompt: String,
        schema: Value,
    ) -> AiServiceResult<T>
    where
        T: DeserializeOwned,
    {
        let operation = profile.operation;
        let request = CompletionRequest {
            operation,
            system_prompt: profile.system_prompt.to_owned(),
            user_prompt,
            schema_name: profile.schema_name,
            schema,
            temperature: profile.temperature,
            max_tokens: profile.max_tokens,
        };

        let reply = self.client.complete(request).await.map_err(|source| {
            warn!(operation, kind = %source.kind, error = %source, "completion call failed");
            AiServiceError::Completion { operation, source }
        })?;

        serde_json::from_value(reply).map_err(|err| {
            warn!(operation, error = %err, "completion reply did not match schema");
            AiServiceError::invalid_reply(operation, err.to_string())
        })
    }
}

fn context_lines(context: &[ContextEntry], limit: usize) -> Vec<String> {
    context
        .iter()
        .take(limit)
        .map(|entry| format!("{}: {}", entry.entry_type(), entry.content().as_str()))
        .collect()
}

fn task_line(task: &Task) -> String {
    let deadline = task.deadline().map_or_else(
        || "no deadline".to_owned(),
        |due| format!("due {}", due.format("%Y-%m-%d %H:%M UTC")),
    );
    format!(
        "[{}] {} ({}, {deadline})",
        task.priority().label(),
        task.title(),
        task.status()
    )
}

fn validate_priority(profile: &OperationProfile, raw: i64) -> AiServiceResult<Priority> {
    Priority::try_from(raw)
        .map_err(|err| AiServiceError::invalid_reply(profile.operation, err.to_string()))
}

fn validate_deadline(
    profile: &OperationProfile,
    raw: Option<&str>,
) -> AiServiceResult<Option<DateTime<Utc>>> {
    match raw.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => parse_deadline(text).map(Some).ok_or_else(|| {
            AiServiceError::invalid_reply(
                profile.operation,
                format!("unrecognised deadline '{text}'"),
            )
        }),
    }
}

