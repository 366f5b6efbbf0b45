//! Flattening for `DynamicPrice_Result` envelopes.
//!
//! The payload carries a `provider` sub-discriminator selecting one of two
//! pricing algorithms with different `algorithmOutput` shapes: a single
//! mapping for the range algorithm, a sequence of option mappings for the
//! per-option algorithm.

use crate::sink::{CsvValue, RowOp, TableKind};
use crate::transformations::context::{EnvelopeContext, FieldMap};
use crate::transformations::error::TransformError;
use crate::transformations::traits::EventHandler;

const EVENT_NAME: &str = "DynamicPrice_Result";

const PROVIDER_RANGE: &str = "ApplyDynamicPriceRange";
const PROVIDER_PER_OPTION: &str = "ApplyDynamicPricePerOption";

pub struct DynamicPriceHandler;

impl EventHandler for DynamicPriceHandler {
    fn name(&self) -> &'static str {
        "DynamicPriceHandler"
    }

    fn triggers(&self) -> Vec<&'static str> {
        vec![EVENT_NAME]
    }

    fn handle(&self, ctx: &EnvelopeContext<'_>) -> Result<Vec<RowOp>, TransformError> {
        let payload = ctx.payload_object()?;
        let provider = payload.value("provider");
        let offer_id = payload.value("offerId");

        match payload.str("provider") {
            Some(PROVIDER_RANGE) => {
                let output = payload.object("algorithmOutput").ok_or_else(|| {
                    TransformError::shape(EVENT_NAME, "algorithmOutput is not an object")
                })?;

                Ok(vec![RowOp::new(
                    TableKind::DynamicPriceRange,
                    vec![
                        provider,
                        offer_id,
                        output.value("min_global"),
                        output.value("min_recommended"),
                        output.value("max_recommended"),
                        output.value("differenceMinRecommendMinTheory"),
                        CsvValue::text(ctx.local_date),
                    ],
                )])
            }
            Some(PROVIDER_PER_OPTION) => {
                let options = payload.array("algorithmOutput").ok_or_else(|| {
                    TransformError::shape(EVENT_NAME, "algorithmOutput is not an array")
                })?;

                let mut ops = Vec::with_capacity(options.len());
                for option in options {
                    let option = FieldMap::from_value(option).ok_or_else(|| {
                        TransformError::shape(EVENT_NAME, "algorithmOutput entry is not an object")
                    })?;

                    ops.push(RowOp::new(
                        TableKind::DynamicPriceOption,
                        vec![
                            provider.clone(),
                            offer_id.clone(),
                            option.value("uniqueOptionId"),
                            option.value("bestPrice"),
                            CsvValue::text(ctx.local_date),
                        ],
                    ));
                }
                Ok(ops)
            }
            // Unknown providers are tolerated and contribute no rows.
            _ => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn handle(payload: serde_json::Value) -> Result<Vec<RowOp>, TransformError> {
        let ctx = EnvelopeContext::new(EVENT_NAME, "05/09/2021", &payload);
        DynamicPriceHandler.handle(&ctx)
    }

    #[test]
    fn test_range_provider_emits_one_row() {
        let ops = handle(json!({
            "provider": "ApplyDynamicPriceRange",
            "offerId": "offer-7",
            "algorithmOutput": {
                "min_global": 10.0,
                "min_recommended": 12.5,
                "max_recommended": 20.0,
                "differenceMinRecommendMinTheory": 2.5
            }
        }))
        .unwrap();

        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].table, TableKind::DynamicPriceRange);
        assert_eq!(ops[0].values[0], CsvValue::text("ApplyDynamicPriceRange"));
        assert_eq!(ops[0].values[1], CsvValue::text("offer-7"));
        assert_eq!(ops[0].values[6], CsvValue::text("05/09/2021"));
    }

    #[test]
    fn test_per_option_provider_fans_out_in_order() {
        let ops = handle(json!({
            "provider": "ApplyDynamicPricePerOption",
            "offerId": "offer-7",
            "algorithmOutput": [
                { "uniqueOptionId": "opt-1", "bestPrice": 99.9 },
                { "uniqueOptionId": "opt-2", "bestPrice": 101.0 }
            ]
        }))
        .unwrap();

        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| op.table == TableKind::DynamicPriceOption));
        assert_eq!(ops[0].values[2], CsvValue::text("opt-1"));
        assert_eq!(ops[1].values[2], CsvValue::text("opt-2"));
    }

    #[test]
    fn test_empty_option_list_emits_no_rows() {
        let ops = handle(json!({
            "provider": "ApplyDynamicPricePerOption",
            "offerId": "offer-7",
            "algorithmOutput": []
        }))
        .unwrap();

        assert!(ops.is_empty());
    }

    #[test]
    fn test_unknown_provider_emits_no_rows() {
        let ops = handle(json!({
            "provider": "ApplySomethingElse",
            "offerId": "offer-7",
            "algorithmOutput": {}
        }))
        .unwrap();

        assert!(ops.is_empty());
    }

    #[test]
    fn test_missing_field_becomes_null_cell() {
        let ops = handle(json!({
            "provider": "ApplyDynamicPriceRange",
            "algorithmOutput": { "min_global": 10 }
        }))
        .unwrap();

        // offerId absent, and four of the five output fields absent
        assert_eq!(ops[0].values[1], CsvValue::Null);
        assert_eq!(ops[0].values[3], CsvValue::Null);
    }

    #[test]
    fn test_range_output_with_wrong_shape_is_fatal() {
        let err = handle(json!({
            "provider": "ApplyDynamicPriceRange",
            "offerId": "offer-7",
            "algorithmOutput": [1, 2, 3]
        }))
        .unwrap_err();

        assert!(matches!(err, TransformError::UnexpectedShape { .. }));
    }
}
