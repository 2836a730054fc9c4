//! Contract value objects.
//!
//! These only describe the field layout the wire uses for instruments;
//! nothing here validates that a contract makes sense.

use bytes::Bytes;

/// A `(tag, value)` pair used by algo parameters, smart combo routing
/// parameters and security-id lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagValue {
    pub tag: Bytes,
    pub value: Bytes,
}

/// One leg of a combo (BAG) contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboLeg {
    pub con_id: i32,
    pub ratio: i32,
    pub action: Bytes,
    pub exchange: Bytes,

    /// 0 = same as parent, 1 = open, 2 = close, 3 = unknown.
    pub open_close: i32,

    // Institutional short sale fields.
    pub short_sale_slot: i32,
    pub designated_location: Bytes,
    pub exempt_code: i32,
}

impl Default for ComboLeg {
    fn default() -> Self {
        ComboLeg {
            con_id: 0,
            ratio: 0,
            action: Bytes::new(),
            exchange: Bytes::new(),
            open_close: 0,
            short_sale_slot: 0,
            designated_location: Bytes::new(),
            exempt_code: -1,
        }
    }
}

/// Delta-neutral underlying component.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct UnderComp {
    pub con_id: i32,
    pub delta: f64,
    pub price: f64,
}

/// An instrument as it appears inside orders, executions, positions and
/// portfolio updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contract {
    pub con_id: i32,
    pub symbol: Bytes,
    pub sec_type: Bytes,
    pub expiry: Bytes,
    pub strike: f64,
    pub right: Bytes,
    pub multiplier: Bytes,
    pub exchange: Bytes,
    pub primary_exchange: Bytes,
    pub currency: Bytes,
    pub local_symbol: Bytes,
    pub trading_class: Bytes,

    // Combo legs.
    pub combo_legs_descrip: Bytes,
    pub combo_legs: Vec<ComboLeg>,

    /// Delta-neutral component, when the open order carried one.
    pub under_comp: Option<UnderComp>,
}

/// Full contract description returned by contract-detail requests.
///
/// Bond-only fields (`cusip` through `notes`) stay empty for other
/// security types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContractDetails {
    pub summary: Contract,
    pub market_name: Bytes,
    pub min_tick: f64,
    pub order_types: Bytes,
    pub valid_exchanges: Bytes,
    pub price_magnifier: i32,
    pub under_con_id: i32,
    pub long_name: Bytes,
    pub contract_month: Bytes,
    pub industry: Bytes,
    pub category: Bytes,
    pub subcategory: Bytes,
    pub time_zone_id: Bytes,
    pub trading_hours: Bytes,
    pub liquid_hours: Bytes,
    pub ev_rule: Bytes,
    pub ev_multiplier: f64,
    pub sec_id_list: Vec<TagValue>,

    // Bond values.
    pub cusip: Bytes,
    pub ratings: Bytes,
    pub desc_append: Bytes,
    pub bond_type: Bytes,
    pub coupon_type: Bytes,
    pub callable: bool,
    pub putable: bool,
    pub coupon: f64,
    pub convertible: bool,
    pub maturity: Bytes,
    pub issue_date: Bytes,
    pub next_option_date: Bytes,
    pub next_option_type: Bytes,
    pub next_option_partial: bool,
    pub notes: Bytes,
}
