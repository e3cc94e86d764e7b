// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Classification of push-channel frames.
//!
//! The learning service pushes loosely shaped JSON events. Interesting
//! fields may sit at the top level or one level down under `data`, and
//! step telemetry is distinguished from generic lifecycle events by an
//! explicit `learning.step` discriminator or a routing key containing
//! `.step.`. Everything is normalized here into a tagged union; frames
//! that are not JSON at all become [`LiveEvent::Raw`] rather than being
//! dropped.

use crate::id::RunId;
use crate::step::StepEvent;
use serde_json::Value;

/// Discriminator value marking step-level telemetry.
pub const STEP_MARKER: &str = "learning.step";

/// Lifecycle event names that warrant a directory refresh of the run.
const REFRESH_EVENTS: [&str; 4] = [
    "learning.run.started",
    "learning.run.completed",
    "learning.run.completed.interim",
    "learning.run.failed",
];

/// A run-lifecycle notification (started/completed/failed/...).
#[derive(Debug, Clone, PartialEq)]
pub struct RunLifecycle {
    pub run_id: RunId,
    pub name: String,
}

impl RunLifecycle {
    /// True for the lifecycle events on which the store re-fetches the
    /// run snapshot.
    pub fn triggers_refresh(&self) -> bool {
        REFRESH_EVENTS.contains(&self.name.as_str())
    }
}

/// One classified push-channel event.
#[derive(Debug, Clone, PartialEq)]
pub enum LiveEvent {
    /// Step-level telemetry for one run.
    Step(StepEvent),
    /// Run lifecycle notification.
    Lifecycle(RunLifecycle),
    /// Frame that was not valid JSON; forwarded, never dropped.
    Raw { text: String },
    /// Valid JSON that matched no known shape.
    Unrecognized(Value),
}

impl LiveEvent {
    /// Classify one UTF-8 frame from the push channel.
    pub fn parse_frame(text: &str) -> LiveEvent {
        let Ok(value) = serde_json::from_str::<Value>(text) else {
            return LiveEvent::Raw { text: text.to_string() };
        };
        Self::classify(value)
    }

    /// Classify an already parsed event payload. Accepts the fields at
    /// the top level or wrapped under `data`.
    pub fn classify(value: Value) -> LiveEvent {
        let body = value.get("data").filter(|d| d.is_object()).unwrap_or(&value);

        if is_step_shaped(&value, body) && has_explicit_status(body) {
            if let Ok(step) = serde_json::from_value::<StepEvent>(body.clone()) {
                if !step.run_id.is_empty() && !step.step.id.is_empty() {
                    return LiveEvent::Step(step);
                }
            }
        }

        let name = discriminator(&value).or_else(|| discriminator(body));
        let run_id = body
            .get("run_id")
            .or_else(|| value.get("run_id"))
            .and_then(Value::as_str);
        if let (Some(name), Some(run_id)) = (name, run_id) {
            return LiveEvent::Lifecycle(RunLifecycle {
                run_id: run_id.into(),
                name: name.to_string(),
            });
        }

        LiveEvent::Unrecognized(value)
    }
}

/// `event`/`type` discriminator of an event object.
fn discriminator(v: &Value) -> Option<&str> {
    v.get("event")
        .or_else(|| v.get("type"))
        .and_then(Value::as_str)
}

/// A step event must carry an explicit `status`; a step-shaped frame
/// without one is malformed and never classifies as [`LiveEvent::Step`].
fn has_explicit_status(body: &Value) -> bool {
    body.get("status").and_then(Value::as_str).is_some()
}

fn is_step_shaped(envelope: &Value, body: &Value) -> bool {
    if discriminator(envelope) == Some(STEP_MARKER) || discriminator(body) == Some(STEP_MARKER) {
        return true;
    }
    let routing = envelope
        .get("routing_key")
        .or_else(|| body.get("routing_key"))
        .and_then(Value::as_str);
    routing.is_some_and(|r| r.contains(".step."))
        || body.get("step").is_some_and(|s| s.get("id").is_some())
}

/// One-line human-readable summary of a frame for the diagnostic log:
/// `[LEVEL] event: message {remaining fields}`. Non-JSON frames pass
/// through verbatim. This must never fail — it backs a logging path
/// that may not interfere with delivery.
pub fn summarize_frame(text: &str) -> String {
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(text) else {
        return text.to_string();
    };

    let evt = obj
        .get("event")
        .or_else(|| obj.get("type"))
        .and_then(Value::as_str)
        .unwrap_or("event");
    let lvl = obj
        .get("level")
        .or_else(|| obj.get("severity"))
        .and_then(Value::as_str)
        .unwrap_or("info")
        .to_uppercase();
    let msg = obj
        .get("message")
        .or_else(|| obj.get("text"))
        .or_else(|| obj.get("detail"))
        .and_then(Value::as_str)
        .unwrap_or("");

    const CONSUMED: [&str; 7] =
        ["event", "type", "level", "severity", "message", "text", "detail"];
    let rest: serde_json::Map<String, Value> = obj
        .iter()
        .filter(|(k, _)| !CONSUMED.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    let tail = if rest.is_empty() {
        String::new()
    } else {
        // compact serialization of a Map of Values cannot fail
        serde_json::to_string(&rest)
            .map(|s| format!(" {}", s))
            .unwrap_or_default()
    };

    format!("[{}] {}: {}{}", lvl, evt, msg, tail)
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
