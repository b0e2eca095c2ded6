//! Prompt templates, response schemas and call parameters for each
//! assistant operation.

use crate::assistant::domain::{AiServiceError, AiServiceResult};
use minijinja::Environment;
use serde::Serialize;
use serde_json::{Value, json};

/// Fixed parameters of one assistant operation.
pub(super) struct OperationProfile {
    pub operation: &'static str,
    pub schema_name: &'static str,
    pub system_prompt: &'static str,
    pub template: &'static str,
    pub temperature: f64,
    pub max_tokens: u32,
}

pub(super) const SUGGEST_PRIORITY: OperationProfile = OperationProfile {
    operation: "suggest_priority",
    schema_name: "priority_suggestion",
    system_prompt: "You are a productivity assistant. Judge how urgent and important a task is \
        from its wording and the user's recent context. Reply only with JSON matching the schema.",
    template: "Suggest a priority and a realistic deadline for this task.

Title: {{ title }}
{% if description %}Description: {{ description }}
{% endif %}Today: {{ today }}

Recent context:
{% for line in context %}- {{ line }}
{% else %}(none)
{% endfor %}
Use priority 1 for high, 2 for medium and 3 for low. Give the deadline as an ISO 8601 \
timestamp, or null when nothing suggests one. Keep the reasoning to one or two sentences \
and derive a few specific context tags.",
    temperature: 0.3,
    max_tokens: 600,
};

pub(super) const PARSE_TASK: OperationProfile = OperationProfile {
    operation: "parse_task",
    schema_name: "parsed_task",
    system_prompt: "You turn free-form notes into a single well-formed todo item. \
        Reply only with JSON matching the schema.",
    template: "Extract one task from the input below.

Input: {{ input }}
Today: {{ today }}

Recent context:
{% for line in context %}- {{ line }}
{% else %}(none)
{% endfor %}
Write a concise, actionable title and a short description (null if there is nothing to add). \
Use priority 1 for high, 2 for medium and 3 for low. Resolve relative dates against today and \
give the deadline as an ISO 8601 timestamp, or null. Add a few specific context tags.",
    temperature: 0.2,
    max_tokens: 600,
};

pub(super) const RECOMMEND_TASKS: OperationProfile = OperationProfile {
    operation: "recommend_tasks",
    schema_name: "task_recommendations",
    system_prompt: "You are a proactive assistant. Anticipate what the user needs to do next \
        from their recent communications. Never propose a task already on their list. \
        Reply only with JSON matching the schema.",
    template: "Recommend up to 5 new tasks.

Today: {{ today }}

Recent context:
{% for line in context %}- {{ line }}
{% endfor %}
Tasks already on the list (do not repeat these):
{% for title in existing %}- {{ title }}
{% else %}(none)
{% endfor %}
For each recommendation give a title, a description of why it is needed, a priority \
(1 high, 2 medium, 3 low), a short reasoning and a few context tags. Return an empty list \
when nothing new is warranted.",
    temperature: 0.5,
    max_tokens: 1200,
};

pub(super) const ANALYZE_WORKLOAD: OperationProfile = OperationProfile {
    operation: "analyze_workload",
    schema_name: "workload_analysis",
    system_prompt: "You are a workload coach. Assess the user's open tasks against their recent \
        context and give practical advice. Reply only with JSON matching the schema.",
    template: "Analyse this workload.

Today: {{ today }}

Open tasks:
{% for line in tasks %}- {{ line }}
{% else %}(none)
{% endfor %}
Recent context:
{% for line in context %}- {{ line }}
{% else %}(none)
{% endfor %}
Assess the overall load, comment on how priorities are distributed, note scheduling risks \
such as clustered or missed deadlines, and give 2 or 3 concrete management suggestions.",
    temperature: 0.4,
    max_tokens: 900,
};

impl OperationProfile {
    /// Renders the user prompt for this operation.
    pub(super) fn render(&self, context: impl Serialize) -> AiServiceResult<String> {
        Environment::new()
            .render_str(self.template, context)
            .map_err(|err| AiServiceError::Prompt {
                operation: self.operation,
                reason: err.to_string(),
            })
    }
}

fn nullable(kind: &str) -> Value {
    json!({ "type": [kind, "null"] })
}

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn priority() -> Value {
    json!({ "type": "integer", "enum": [1, 2, 3] })
}

pub(super) fn priority_suggestion_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "priority": priority(),
            "deadline": nullable("string"),
            "reasoning": { "type": "string" },
            "contextTags": string_array(),
        },
        "required": ["priority", "deadline", "reasoning", "contextTags"],
        "additionalProperties": false,
    })
}

pub(super) fn parsed_task_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "description": nullable("string"),
            "priority": priority(),
            "deadline": nullable("string"),
            "contextTags": string_array(),
        },
        "required": ["title", "description", "priority", "deadline", "contextTags"],
        "additionalProperties": false,
    })
}

pub(super) fn recommendations_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "recommendations": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "title": { "type": "string" },
                        "description": { "type": "string" },
                        "priority": priority(),
                        "reasoning": { "type": "string" },
                        "contextTags": string_array(),
                    },
                    "required": ["title", "description", "priority", "reasoning", "contextTags"],
                    "additionalProperties": false,
                },
            },
        },
        "required": ["recommendations"],
        "additionalProperties": false,
    })
}

pub(super) fn workload_analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "workloadAssessment": { "type": "string" },
            "priorityDistribution": { "type": "string" },
            "schedulingInsights": { "type": "string" },
            "managementSuggestions": string_array(),
        },
        "required": [
            "workloadAssessment",
            "priorityDistribution",
            "schedulingInsights",
            "managementSuggestions",
        ],
        "additionalProperties": false,
    })
}
