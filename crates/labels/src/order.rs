use serde::{Deserialize, Serialize};

use cartonforge_core::{DomainError, DomainResult, Entity, EntryId, find_entity};

/// Envelope returned by the order proxy: either an order or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProxyResponse {
    #[serde(default)]
    pub order: Option<OrderPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProxyResponse {
    /// Decode a proxy response body and extract the order.
    ///
    /// An `error` field wins over an `order` field, matching how the proxy
    /// reports lookup failures with a 200 status.
    pub fn from_json(body: &str) -> DomainResult<OrderPayload> {
        let response: ProxyResponse =
            serde_json::from_str(body).map_err(|e| DomainError::malformed(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(DomainError::upstream(error));
        }

        response
            .order
            .ok_or_else(|| DomainError::malformed("response carries neither order nor error"))
    }
}

/// Order as delivered by the ERP proxy (NetSuite field names).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(default)]
    pub id: String,
    pub tran_id: String,
    #[serde(default)]
    pub entity: String,
    #[serde(default)]
    pub entity_contact: String,
    #[serde(default)]
    pub ship_address: String,
    #[serde(default)]
    pub transaction_date: String,
    #[serde(default)]
    pub po_number: Option<String>,
    pub is_sales_order: bool,
    #[serde(default)]
    pub items: Vec<OrderLinePayload>,
}

/// One order line as delivered by the proxy.
///
/// Any upstream `entryId` is ignored; identities are assigned on load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLinePayload {
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub item_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub units: Option<String>,
    #[serde(default)]
    pub quantity_ordered: u32,
    #[serde(default)]
    pub quantity_committed: u32,
}

/// Order line as seen by the split engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub entry_id: EntryId,
    pub item: String,
    pub item_id: Option<String>,
    pub description: String,
    pub location: String,
    pub units: Option<String>,
    pub quantity_ordered: u32,
    pub quantity_committed: u32,
}

impl OrderLine {
    pub fn from_payload(payload: OrderLinePayload) -> Self {
        Self {
            entry_id: EntryId::new(),
            item: payload.item,
            item_id: payload.item_id,
            description: payload.description,
            location: payload.location,
            units: payload.units,
            quantity_ordered: payload.quantity_ordered,
            quantity_committed: payload.quantity_committed,
        }
    }

    /// Authoritative quantity for labels: committed on sales orders, ordered
    /// on fulfillments.
    pub fn total_quantity(&self, is_sales_order: bool) -> u32 {
        if is_sales_order {
            self.quantity_committed
        } else {
            self.quantity_ordered
        }
    }

    /// Part number printed on the label.
    ///
    /// Sales order items read "PART description..."; fulfillments carry the
    /// part number in `item_id`.
    pub fn part_number(&self, is_sales_order: bool) -> String {
        if is_sales_order {
            return self
                .item
                .split_whitespace()
                .next()
                .unwrap_or("Unknown Item")
                .to_string();
        }

        match self.item_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => self.item.clone(),
        }
    }

    /// Description printed on the label.
    pub fn label_description(&self, is_sales_order: bool) -> String {
        if !is_sales_order {
            return self.item.clone();
        }

        let rest = self.item.split_whitespace().skip(1).collect::<Vec<_>>().join(" ");
        if rest.is_empty() {
            "No Description".to_string()
        } else {
            rest
        }
    }
}

impl Entity for OrderLine {
    type Id = EntryId;

    fn id(&self) -> &EntryId {
        &self.entry_id
    }
}

/// A loaded sales order or item fulfillment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    pub id: String,
    pub tran_id: String,
    pub entity: String,
    pub entity_contact: String,
    pub ship_address: String,
    pub transaction_date: String,
    pub po_number: String,
    pub is_sales_order: bool,
    pub items: Vec<OrderLine>,
}

impl OrderData {
    /// Build engine order data, assigning a fresh entry id to every line.
    pub fn from_payload(payload: OrderPayload) -> Self {
        Self {
            id: payload.id,
            tran_id: payload.tran_id,
            entity: payload.entity,
            entity_contact: payload.entity_contact,
            ship_address: payload.ship_address,
            transaction_date: payload.transaction_date,
            po_number: payload.po_number.unwrap_or_default(),
            is_sales_order: payload.is_sales_order,
            items: payload.items.into_iter().map(OrderLine::from_payload).collect(),
        }
    }

    /// Decode a proxy response body straight into order data.
    pub fn from_proxy_json(body: &str) -> DomainResult<Self> {
        ProxyResponse::from_json(body).map(Self::from_payload)
    }

    pub fn line(&self, entry_id: &EntryId) -> Option<&OrderLine> {
        find_entity(&self.items, entry_id)
    }

    pub fn total_quantity(&self, line: &OrderLine) -> u32 {
        line.total_quantity(self.is_sales_order)
    }

    /// Total quantity of a line by identity, `None` for unknown lines.
    pub fn total_of(&self, entry_id: &EntryId) -> Option<u32> {
        self.line(entry_id).map(|line| self.total_quantity(line))
    }

    /// Lines with something to print, in line order.
    pub fn printable_lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.items
            .iter()
            .filter(move |line| self.total_quantity(line) > 0)
    }

    /// Move lines without a committed quantity to the bottom, keeping the
    /// relative order otherwise.
    pub fn sort_uncommitted_last(&mut self) {
        self.items.sort_by_key(|line| line.quantity_committed == 0);
    }
}
