//! tws-core
//!
//! Transport-agnostic data for the TWS wire protocol client:
//! - unset sentinels for optional numeric fields
//! - tick types
//! - contract / order / execution value objects (field layouts only)
//! - the [`Event`] enum and the [`EventSink`] it is delivered through

pub mod unset;
pub mod tick_type;
pub mod contract;
pub mod order;
pub mod execution;
pub mod bar;
pub mod events;
pub mod error;

pub use tick_type::TickType;
pub use unset::{UNSET_DOUBLE, UNSET_INTEGER, UNSET_LONG};

pub use contract::{ComboLeg, Contract, ContractDetails, TagValue, UnderComp};
pub use order::{Order, OrderComboLeg, OrderState};
pub use execution::{CommissionReport, Execution};
pub use bar::{Bar, RealTimeBar, ScanRow};

pub use events::{
    AccountSummary,
    AccountValue,
    ApiError,
    Event,
    EventSink,
    FnSink,
    MarketDepth,
    MarketDepthL2,
    NewsBulletin,
    OpenOrder,
    OrderStatus,
    PortfolioUpdate,
    Position,
    TickEfp,
    TickOptionComputation,
    TickPrice,
    TickSize,
};

pub use error::{ClientError, CodeMsg};
