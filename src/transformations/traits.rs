//! Core trait for event flattening handlers.
//!
//! Handlers implement this trait to receive decoded envelopes, flatten the
//! payload, and produce row operations for the dataset assembler.

use super::context::EnvelopeContext;
use super::error::TransformError;
use crate::sink::RowOp;

/// An event handler flattens envelopes of one event kind into dataset rows.
///
/// Handlers are registered at startup and invoked for every envelope whose
/// event name matches one of their triggers. Envelopes with no matching
/// handler contribute no rows, which is not an error.
pub trait EventHandler: Send + Sync + 'static {
    /// Unique name for this handler (used in logging).
    fn name(&self) -> &'static str;

    /// Event names this handler responds to.
    fn triggers(&self) -> Vec<&'static str>;

    /// Flatten one envelope into zero or more row operations.
    ///
    /// The returned order is preserved by the assembler, so fan-out rows keep
    /// the order of their source payload elements.
    fn handle(&self, ctx: &EnvelopeContext<'_>) -> Result<Vec<RowOp>, TransformError>;
}
