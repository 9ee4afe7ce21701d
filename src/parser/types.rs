use chrono::NaiveDateTime;

/// Raw text of the columns we read from one CSV record.
#[derive(Debug, Clone, Default)]
pub struct OrderLineRaw {
    pub order_id: Option<String>,
    pub order_item_id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub product_category_name: Option<String>,
    pub order_purchase_timestamp: Option<String>,
    pub price: Option<String>,
}

/// One product entry of a customer order, as loaded from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineItem {
    pub order_id: String,
    pub order_item_id: u32,
    pub customer_id: String,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
    pub product_category_name: Option<String>,
    pub order_purchase_timestamp: NaiveDateTime,
    pub price: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ParseWarning {
    pub line: usize,
    pub message: String,
}
