use serde_json::Number;

/// A single cell value destined for a CSV dataset.
///
/// Each variant carries its own serialization policy: text is quoted, numbers
/// are written as parsed, booleans are bare literal tokens, null is an empty
/// cell. The sink consumes this policy in `render_cell`.
#[derive(Debug, Clone, PartialEq)]
pub enum CsvValue {
    /// Absent field
    Null,
    /// Boolean, serialized as the unquoted literal `true`/`false`
    Bool(bool),
    /// Number, serialized unquoted in its JSON representation
    Number(Number),
    /// Text (including dates), serialized double-quoted
    Text(String),
}

impl CsvValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, CsvValue::Null)
    }

    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        CsvValue::Text(value.into())
    }
}

/// Target dataset for a flattened row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    CuratedOfferOptions,
    DynamicPriceOption,
    DynamicPriceRange,
}

impl TableKind {
    /// Dataset name, also the output file stem.
    pub fn name(&self) -> &'static str {
        match self {
            TableKind::CuratedOfferOptions => "CuratedOfferOptions",
            TableKind::DynamicPriceOption => "DynamicPriceOption",
            TableKind::DynamicPriceRange => "DynamicPriceRange",
        }
    }

    /// Column schema, in output order.
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            TableKind::CuratedOfferOptions => &[
                "CurationProvider",
                "OfferId",
                "DealerId",
                "UniqueOptionId",
                "OptionId",
                "IsMobileDealer",
                "IsOpen",
                "Eta",
                "ChamaScore",
                "ProductBrand",
                "IsWinner",
                "MinimumPrice",
                "MaximumPrice",
                "DynamicPrice",
                "FinalPrice",
                "DefeatPrimaryReason",
                "DefeatReasons",
                "EnqueuedTimeSP",
            ],
            TableKind::DynamicPriceOption => &[
                "Provider",
                "OfferId",
                "UniqueOptionId",
                "BestPrice",
                "EnqueuedTimeSP",
            ],
            TableKind::DynamicPriceRange => &[
                "Provider",
                "OfferId",
                "MinGlobal",
                "MinRecommended",
                "MaxRecommended",
                "DifferenceMinRecommendMinTheory",
                "EnqueuedTimeSP",
            ],
        }
    }
}

/// Row operation returned by handlers: one flattened row appended to a table.
#[derive(Debug, Clone)]
pub struct RowOp {
    pub table: TableKind,
    pub values: Vec<CsvValue>,
}

impl RowOp {
    /// Create a row operation. The value count must match the table schema.
    pub fn new(table: TableKind, values: Vec<CsvValue>) -> Self {
        debug_assert_eq!(
            values.len(),
            table.columns().len(),
            "row width must match the {} schema",
            table.name()
        );
        Self { table, values }
    }
}

/// An ordered, schema-fixed collection of flattened rows.
///
/// Rows keep their append order; the assembler never reorders or mutates them
/// after construction.
#[derive(Debug)]
pub struct Dataset {
    kind: TableKind,
    rows: Vec<Vec<CsvValue>>,
}

impl Dataset {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    /// Append a row. The value count must match the table schema.
    pub fn push(&mut self, values: Vec<CsvValue>) {
        debug_assert_eq!(
            values.len(),
            self.kind.columns().len(),
            "row width must match the {} schema",
            self.kind.name()
        );
        self.rows.push(values);
    }

    pub fn rows(&self) -> &[Vec<CsvValue>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// An empty dataset is still a valid zero-row table; the sink skips it.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The three datasets produced by one full input pass.
///
/// Handed to the sink only after the pass completes without a fatal error.
#[derive(Debug)]
pub struct DatasetBatch {
    pub curated_offer_options: Dataset,
    pub dynamic_price_option: Dataset,
    pub dynamic_price_range: Dataset,
}

impl DatasetBatch {
    pub fn new() -> Self {
        Self {
            curated_offer_options: Dataset::new(TableKind::CuratedOfferOptions),
            dynamic_price_option: Dataset::new(TableKind::DynamicPriceOption),
            dynamic_price_range: Dataset::new(TableKind::DynamicPriceRange),
        }
    }

    /// The accumulator a row operation targets.
    pub fn dataset_mut(&mut self, kind: TableKind) -> &mut Dataset {
        match kind {
            TableKind::CuratedOfferOptions => &mut self.curated_offer_options,
            TableKind::DynamicPriceOption => &mut self.dynamic_price_option,
            TableKind::DynamicPriceRange => &mut self.dynamic_price_range,
        }
    }

    /// All datasets, in sink output order.
    pub fn datasets(&self) -> [&Dataset; 3] {
        [
            &self.curated_offer_options,
            &self.dynamic_price_option,
            &self.dynamic_price_range,
        ]
    }
}

impl Default for DatasetBatch {
    fn default() -> Self {
        Self::new()
    }
}
