//! Flattening for `CurateOffer_Result` envelopes.
//!
//! The payload is a sequence of curation results, each carrying its own
//! `options` sequence. One row is emitted per option across all results,
//! preserving result and option order.

use serde_json::Value;

use crate::sink::{CsvValue, RowOp, TableKind};
use crate::transformations::context::{cell_value, EnvelopeContext, FieldMap};
use crate::transformations::error::TransformError;
use crate::transformations::traits::EventHandler;

const EVENT_NAME: &str = "CurateOffer_Result";

pub struct CurateOfferHandler;

impl EventHandler for CurateOfferHandler {
    fn name(&self) -> &'static str {
        "CurateOfferHandler"
    }

    fn triggers(&self) -> Vec<&'static str> {
        vec![EVENT_NAME]
    }

    fn handle(&self, ctx: &EnvelopeContext<'_>) -> Result<Vec<RowOp>, TransformError> {
        let results = ctx.payload_array()?;

        let mut ops = Vec::new();
        for result in results {
            let result = FieldMap::from_value(result).ok_or_else(|| {
                TransformError::shape(EVENT_NAME, "curation result is not an object")
            })?;

            let curation_provider = result.value("curationProvider");
            let offer_id = result.value("offerId");
            let dealer_id = result.value("dealerId");

            // An absent options list means this result produced no candidates.
            let options: &[Value] = match result.get("options") {
                None => &[],
                Some(value) => value.as_array().map(Vec::as_slice).ok_or_else(|| {
                    TransformError::shape(EVENT_NAME, "options is not an array")
                })?,
            };

            for option in options {
                let option = FieldMap::from_value(option).ok_or_else(|| {
                    TransformError::shape(EVENT_NAME, "option entry is not an object")
                })?;

                ops.push(RowOp::new(
                    TableKind::CuratedOfferOptions,
                    vec![
                        curation_provider.clone(),
                        offer_id.clone(),
                        dealer_id.clone(),
                        option.value("uniqueOptionId"),
                        option.value("optionId"),
                        option.value("isMobileDealer"),
                        option.value("isOpen"),
                        option.value("eta"),
                        option.value("chamaScore"),
                        option.value("productBrand"),
                        option.value("isWinner"),
                        option.value("minimumPrice"),
                        option.value("maximumPrice"),
                        option.value("dynamicPrice"),
                        option.value("finalPrice"),
                        option.value_or_empty("defeatPrimaryReason"),
                        defeat_reasons(&option)?,
                        CsvValue::text(ctx.local_date),
                    ],
                ));
            }
        }

        Ok(ops)
    }
}

/// Normalize `defeatReasons`: a sequence of strings joins with commas, absent
/// or null becomes an empty string, any other value passes through as-is.
fn defeat_reasons(option: &FieldMap<'_>) -> Result<CsvValue, TransformError> {
    match option.get("defeatReasons") {
        None | Some(Value::Null) => Ok(CsvValue::text("")),
        Some(Value::Array(reasons)) => {
            let parts: Vec<&str> = reasons
                .iter()
                .map(|reason| {
                    reason.as_str().ok_or_else(|| {
                        TransformError::shape(EVENT_NAME, "defeatReasons entry is not a string")
                    })
                })
                .collect::<Result<_, _>>()?;
            Ok(CsvValue::Text(parts.join(",")))
        }
        Some(other) => Ok(cell_value(other)),
    }
}
