use std::fmt;

/// Header carrying the base64-encoded HMAC-SHA256 signature of the raw body
pub const WEBHOOK_HMAC_HEADER: &str = "X-Shopify-Hmac-SHA256";

/// Header carrying the webhook event topic (e.g. `orders/create`)
pub const WEBHOOK_TOPIC_HEADER: &str = "X-Shopify-Topic";

/// Header carrying the shop domain the notification originates from
pub const WEBHOOK_DOMAIN_HEADER: &str = "X-Shopify-Shop-Domain";

/// Webhook event topics.
///
/// Topics arrive as a `<resource>/<event>` header value. Values outside the
/// known set are preserved verbatim in [`Topic::Other`] so that new platform
/// topics pass through without a library upgrade; `as_str()` round-trips the
/// original header value exactly in both cases.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Topic {
    AppUninstalled,
    CartsCreate,
    CartsUpdate,
    CheckoutsCreate,
    CheckoutsDelete,
    CheckoutsUpdate,
    CollectionsCreate,
    CollectionsDelete,
    CollectionsUpdate,
    CustomersCreate,
    CustomersDelete,
    CustomersDisable,
    CustomersEnable,
    CustomersUpdate,
    DraftOrdersCreate,
    DraftOrdersDelete,
    DraftOrdersUpdate,
    FulfillmentsCreate,
    FulfillmentsUpdate,
    OrdersCancelled,
    OrdersCreate,
    OrdersDelete,
    OrdersFulfilled,
    OrdersPaid,
    OrdersPartiallyFulfilled,
    OrdersUpdated,
    ProductsCreate,
    ProductsDelete,
    ProductsUpdate,
    RefundsCreate,
    ShopUpdate,
    ThemesCreate,
    ThemesDelete,
    ThemesPublish,
    ThemesUpdate,
    /// A topic outside the known enumeration, preserved verbatim
    Other(String),
}

impl Topic {
    /// Parse a topic from its `X-Shopify-Topic` header value
    pub fn from_header_value(value: &str) -> Self {
        match value {
            "app/uninstalled" => Self::AppUninstalled,
            "carts/create" => Self::CartsCreate,
            "carts/update" => Self::CartsUpdate,
            "checkouts/create" => Self::CheckoutsCreate,
            "checkouts/delete" => Self::CheckoutsDelete,
            "checkouts/update" => Self::CheckoutsUpdate,
            "collections/create" => Self::CollectionsCreate,
            "collections/delete" => Self::CollectionsDelete,
            "collections/update" => Self::CollectionsUpdate,
            "customers/create" => Self::CustomersCreate,
            "customers/delete" => Self::CustomersDelete,
            "customers/disable" => Self::CustomersDisable,
            "customers/enable" => Self::CustomersEnable,
            "customers/update" => Self::CustomersUpdate,
            "draft_orders/create" => Self::DraftOrdersCreate,
            "draft_orders/delete" => Self::DraftOrdersDelete,
            "draft_orders/update" => Self::DraftOrdersUpdate,
            "fulfillments/create" => Self::FulfillmentsCreate,
            "fulfillments/update" => Self::FulfillmentsUpdate,
            "orders/cancelled" => Self::OrdersCancelled,
            "orders/create" => Self::OrdersCreate,
            "orders/delete" => Self::OrdersDelete,
            "orders/fulfilled" => Self::OrdersFulfilled,
            "orders/paid" => Self::OrdersPaid,
            "orders/partially_fulfilled" => Self::OrdersPartiallyFulfilled,
            "orders/updated" => Self::OrdersUpdated,
            "products/create" => Self::ProductsCreate,
            "products/delete" => Self::ProductsDelete,
            "products/update" => Self::ProductsUpdate,
            "refunds/create" => Self::RefundsCreate,
            "shop/update" => Self::ShopUpdate,
            "themes/create" => Self::ThemesCreate,
            "themes/delete" => Self::ThemesDelete,
            "themes/publish" => Self::ThemesPublish,
            "themes/update" => Self::ThemesUpdate,
            other => Self::Other(other.to_string()),
        }
    }

    /// The topic as it appears on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Self::AppUninstalled => "app/uninstalled",
            Self::CartsCreate => "carts/create",
            Self::CartsUpdate => "carts/update",
            Self::CheckoutsCreate => "checkouts/create",
            Self::CheckoutsDelete => "checkouts/delete",
            Self::CheckoutsUpdate => "checkouts/update",
            Self::CollectionsCreate => "collections/create",
            Self::CollectionsDelete => "collections/delete",
            Self::CollectionsUpdate => "collections/update",
            Self::CustomersCreate => "customers/create",
            Self::CustomersDelete => "customers/delete",
            Self::CustomersDisable => "customers/disable",
            Self::CustomersEnable => "customers/enable",
            Self::CustomersUpdate => "customers/update",
            Self::DraftOrdersCreate => "draft_orders/create",
            Self::DraftOrdersDelete => "draft_orders/delete",
            Self::DraftOrdersUpdate => "draft_orders/update",
            Self::FulfillmentsCreate => "fulfillments/create",
            Self::FulfillmentsUpdate => "fulfillments/update",
            Self::OrdersCancelled => "orders/cancelled",
            Self::OrdersCreate => "orders/create",
            Self::OrdersDelete => "orders/delete",
            Self::OrdersFulfilled => "orders/fulfilled",
            Self::OrdersPaid => "orders/paid",
            Self::OrdersPartiallyFulfilled => "orders/partially_fulfilled",
            Self::OrdersUpdated => "orders/updated",
            Self::ProductsCreate => "products/create",
            Self::ProductsDelete => "products/delete",
            Self::ProductsUpdate => "products/update",
            Self::RefundsCreate => "refunds/create",
            Self::ShopUpdate => "shop/update",
            Self::ThemesCreate => "themes/create",
            Self::ThemesDelete => "themes/delete",
            Self::ThemesPublish => "themes/publish",
            Self::ThemesUpdate => "themes/update",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-scoped state attached after a successful verification.
///
/// Inserted into the request extensions by the verification layer; downstream
/// handlers extract it with `axum::Extension<WebhookState>`. It is never
/// present on a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookState {
    /// Event topic from the topic header
    pub topic: Topic,
    /// Shop domain from the domain header
    pub domain: String,
}
