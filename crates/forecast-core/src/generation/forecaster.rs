//! Plan generation with a latest-request-wins policy.
//!
//! Each call takes a ticket from a shared counter. When the model answers,
//! the result is kept only if no newer call has started since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::model::{CompletionRequest, LanguageModel};
use super::prompts::{directive_prompt, resolve_directive};
use crate::battle::Dice;
use crate::error::GenerationError;
use crate::plan::{DailyPlan, GeneratedContent};

pub struct Forecaster<M: LanguageModel + ?Sized> {
    model: Arc<M>,
    latest: AtomicU64,
}

impl<M: LanguageModel + ?Sized> Forecaster<M> {
    pub fn new(model: Arc<M>) -> Self {
        Self {
            model,
            latest: AtomicU64::new(0),
        }
    }

    /// Generate a plan for `directive` (blank picks a default directive).
    ///
    /// # Errors
    /// `Superseded` when a later call started before this one resolved;
    /// otherwise whatever the model or validation reports.
    pub async fn forecast<D: Dice + ?Sized>(
        &self,
        directive: &str,
        dice: &mut D,
        now: DateTime<Utc>,
    ) -> Result<DailyPlan, GenerationError> {
        let directive = resolve_directive(directive, dice);
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(ticket, %directive, "forecast requested");

        let result = self
            .model
            .complete(CompletionRequest::json(directive_prompt(&directive)))
            .await;

        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!(ticket, "forecast superseded");
            return Err(GenerationError::Superseded);
        }

        let text = result.inspect_err(|e| warn!(error = %e, "forecast failed"))?;
        let content = GeneratedContent::parse(&text)
            .inspect_err(|e| warn!(error = %e, "generated content rejected"))?;
        let plan = DailyPlan::from_generated(directive, content, now);
        info!(plan_id = %plan.id, "forecast ready");
        Ok(plan)
    }
}
