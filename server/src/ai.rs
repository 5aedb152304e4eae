//! DeepSeek adapter: turns a decision context into one of the five actions.
//!
//! The adapter never fails from the room's point of view. Missing
//! credentials, transport errors, malformed replies and illegal suggestions
//! all collapse into the deterministic fallback (check, else call if
//! affordable, else fold), with the reason logged.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::game::AiContext;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const HISTORY_WINDOW: usize = 12;

/// What the model chose. `action` is kept as the raw label; the room parses
/// and legality-checks it before applying.
#[derive(Clone, Debug)]
pub struct ActionDecision {
    pub action: String,
    pub amount: u32,
    pub explanation: Option<String>,
}

#[derive(Debug)]
pub struct DeepSeekClient {
    api_key: Option<String>,
    model: String,
    url: String,
    http: reqwest::Client,
}

impl DeepSeekClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("building HTTP client for the AI adapter")?;
        Ok(DeepSeekClient {
            api_key: settings.deepseek_api_key.clone(),
            model: settings.deepseek_model.clone(),
            url: settings.deepseek_url.clone(),
            http,
        })
    }

    /// Pick an action for the seat described by `ctx`. Always returns a
    /// decision; on any failure it is the fallback.
    pub async fn choose_action(&self, ctx: &AiContext) -> ActionDecision {
        let Some(api_key) = self.api_key.as_deref() else {
            return fallback(ctx, "missing DEEPSEEK_API_KEY");
        };
        match self.request_decision(api_key, ctx).await {
            Ok(decision) => {
                let legal = ctx
                    .legal_actions
                    .iter()
                    .any(|kind| kind.label() == decision.action);
                if legal {
                    decision
                } else {
                    tracing::warn!(
                        player = %ctx.player_name,
                        action = %decision.action,
                        "model suggested an illegal action"
                    );
                    fallback(ctx, "illegal action suggested")
                }
            }
            Err(err) => {
                tracing::warn!(player = %ctx.player_name, error = %format!("{:#}", err), "AI request failed");
                fallback(ctx, &format!("{:#}", err))
            }
        }
    }

    async fn request_decision(&self, api_key: &str, ctx: &AiContext) -> Result<ActionDecision> {
        let payload = json!({
            "model": self.model,
            "messages": build_messages(ctx),
            "temperature": 0.2,
        });
        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .context("DeepSeek request failed")?
            .error_for_status()
            .context("DeepSeek returned an error status")?;
        let body: Value = response
            .json()
            .await
            .context("DeepSeek response was not JSON")?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .context("DeepSeek response missing message content")?;
        parse_decision(content)
    }
}

fn build_messages(ctx: &AiContext) -> Value {
    let history: Vec<String> = ctx
        .actions
        .iter()
        .rev()
        .take(HISTORY_WINDOW)
        .rev()
        .map(|record| {
            format!(
                "- {} -> {} ({}) during {}",
                record.player_name, record.action, record.amount, record.phase
            )
        })
        .collect();
    let history_text = if history.is_empty() {
        "No actions yet.".to_string()
    } else {
        history.join("\n")
    };
    let board = join_labels(&ctx.community_cards, "None");
    let cards = join_labels(&ctx.hole_cards, "Unknown");
    let legal: Vec<&str> = ctx.legal_actions.iter().map(|kind| kind.label()).collect();

    let prompt = format!(
        "You control a single seat in a No-Limit Texas Hold'em poker game. \
         Always return a single JSON object with fields action, amount, and explanation. \
         Allowed actions: fold, check, call, bet, raise. \
         For bet/raise set amount to the FINAL total bet size (chips in front of you after the action). \
         \nCommunity cards: {board}\
         \nYour hole cards: {cards}\
         \nCurrent pot: {pot} | Stack: {stack} | To call: {to_call} | Min raise: {min_raise}\
         \nCurrent phase: {phase}\
         \nAction history:\n{history_text}\
         \nLegal actions right now: {legal}\
         \nOnly output JSON like {{\"action\":\"call\",\"amount\":0,\"explanation\":\"reason\"}}.",
        board = board,
        cards = cards,
        pot = ctx.pot,
        stack = ctx.stack,
        to_call = ctx.to_call,
        min_raise = ctx.min_raise,
        phase = ctx.phase,
        history_text = history_text,
        legal = legal.join(", "),
    );
    json!([
        {
            "role": "system",
            "content": "You are DeepSeek, a disciplined poker assistant. Always obey the betting rules.",
        },
        { "role": "user", "content": prompt },
    ])
}

/// Extract the outermost `{…}` span from the reply and parse it.
fn parse_decision(message: &str) -> Result<ActionDecision> {
    let start = message.find('{').context("no JSON object in response")?;
    let end = message.rfind('}').context("no JSON object in response")?;
    if end < start {
        bail!("no JSON object in response");
    }
    let data: Value =
        serde_json::from_str(&message[start..=end]).context("malformed JSON in response")?;
    let action = data
        .get("action")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_ascii_lowercase();
    let amount = match data.get("amount") {
        None | Some(Value::Null) => 0,
        Some(value) => value
            .as_u64()
            .with_context(|| format!("bad amount in response: {}", value))?
            as u32,
    };
    let explanation = data
        .get("explanation")
        .and_then(Value::as_str)
        .map(str::to_string);
    Ok(ActionDecision {
        action,
        amount,
        explanation,
    })
}

fn fallback(ctx: &AiContext, reason: &str) -> ActionDecision {
    use poker_shared::ActionKind;
    if ctx.legal_actions.contains(&ActionKind::Check) {
        return ActionDecision {
            action: "check".to_string(),
            amount: 0,
            explanation: Some(reason.to_string()),
        };
    }
    if ctx.legal_actions.contains(&ActionKind::Call) && ctx.stack >= ctx.to_call {
        return ActionDecision {
            action: "call".to_string(),
            amount: ctx.to_call,
            explanation: Some(reason.to_string()),
        };
    }
    ActionDecision {
        action: "fold".to_string(),
        amount: 0,
        explanation: Some(reason.to_string()),
    }
}

fn join_labels(cards: &[poker_shared::Card], when_empty: &str) -> String {
    if cards.is_empty() {
        return when_empty.to_string();
    }
    cards
        .iter()
        .map(|c| c.label())
        .collect::<Vec<_>>()
        .join(", ")
}
