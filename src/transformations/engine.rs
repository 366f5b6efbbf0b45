//! Transform engine that drives envelope flattening.
//!
//! The engine walks the input batch in order. For each envelope it normalizes
//! the enqueued time, re-decodes the embedded payload, dispatches to the
//! registered handlers, and appends the resulting rows to the matching
//! dataset. Datasets are handed over only after the full pass completes, so a
//! fatal error never leaves a partially flushed output behind.

use serde_json::Value;

use super::context::EnvelopeContext;
use super::error::TransformError;
use super::registry::TransformRegistry;
use super::util::time::enqueued_time_to_local_date;
use crate::sink::DatasetBatch;
use crate::source::Envelope;

/// Outcome of one full input pass.
#[derive(Debug)]
pub struct TransformReport {
    pub batch: DatasetBatch,
    /// Envelopes dropped because their payload text was not valid JSON.
    pub skipped_envelopes: usize,
}

/// The transform engine processes envelopes and collects dataset rows.
pub struct TransformEngine {
    registry: TransformRegistry,
}

impl TransformEngine {
    pub fn new(registry: TransformRegistry) -> Self {
        Self { registry }
    }

    /// Run a full pass over the input batch.
    ///
    /// A payload that fails to decode skips its envelope and the pass
    /// continues; timestamp and payload shape errors abort the run.
    pub fn run(&self, envelopes: &[Envelope]) -> Result<TransformReport, TransformError> {
        let mut batch = DatasetBatch::new();
        let mut skipped = 0usize;

        for envelope in envelopes {
            let local_date = enqueued_time_to_local_date(&envelope.enqueued_time_utc)?;

            let payload: Value = match serde_json::from_str(&envelope.payload) {
                Ok(payload) => payload,
                Err(e) => {
                    tracing::warn!(
                        event_name = %envelope.event_name,
                        enqueued_time_utc = %envelope.enqueued_time_utc,
                        "Failed to decode payload, skipping envelope: {}",
                        e
                    );
                    skipped += 1;
                    continue;
                }
            };

            let ctx = EnvelopeContext::new(&envelope.event_name, &local_date, &payload);

            for handler in self.registry.handlers_for(&envelope.event_name) {
                let ops = handler.handle(&ctx)?;

                tracing::debug!(
                    handler = handler.name(),
                    rows = ops.len(),
                    "Handler produced rows"
                );

                for op in ops {
                    batch.dataset_mut(op.table).push(op.values);
                }
            }
        }

        Ok(TransformReport {
            batch,
            skipped_envelopes: skipped,
        })
    }
}
