//! Tick types carried by market data messages.
//!
//! The server identifies each tick with a plain integer. New tick types
//! appear over time, so this is a newtype over the wire value with named
//! constants for the ones this protocol generation knows about, rather
//! than a closed enum: an unknown number is passed through untouched.

use std::fmt;

/// Numeric tick type as sent on the wire.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TickType(pub i32);

impl TickType {
    pub const BID_SIZE: TickType = TickType(0);
    pub const BID: TickType = TickType(1);
    pub const ASK: TickType = TickType(2);
    pub const ASK_SIZE: TickType = TickType(3);
    pub const LAST: TickType = TickType(4);
    pub const LAST_SIZE: TickType = TickType(5);
    pub const HIGH: TickType = TickType(6);
    pub const LOW: TickType = TickType(7);
    pub const VOLUME: TickType = TickType(8);
    pub const CLOSE: TickType = TickType(9);
    pub const BID_OPTION_COMPUTATION: TickType = TickType(10);
    pub const ASK_OPTION_COMPUTATION: TickType = TickType(11);
    pub const LAST_OPTION_COMPUTATION: TickType = TickType(12);
    pub const MODEL_OPTION: TickType = TickType(13);
    pub const OPEN: TickType = TickType(14);
    pub const LOW_13_WEEK: TickType = TickType(15);
    pub const HIGH_13_WEEK: TickType = TickType(16);
    pub const LOW_26_WEEK: TickType = TickType(17);
    pub const HIGH_26_WEEK: TickType = TickType(18);
    pub const LOW_52_WEEK: TickType = TickType(19);
    pub const HIGH_52_WEEK: TickType = TickType(20);
    pub const AVG_VOLUME: TickType = TickType(21);
    pub const OPEN_INTEREST: TickType = TickType(22);
    pub const OPTION_HISTORICAL_VOL: TickType = TickType(23);
    pub const OPTION_IMPLIED_VOL: TickType = TickType(24);
    pub const OPTION_BID_EXCH: TickType = TickType(25);
    pub const OPTION_ASK_EXCH: TickType = TickType(26);
    pub const OPTION_CALL_OPEN_INTEREST: TickType = TickType(27);
    pub const OPTION_PUT_OPEN_INTEREST: TickType = TickType(28);
    pub const OPTION_CALL_VOLUME: TickType = TickType(29);
    pub const OPTION_PUT_VOLUME: TickType = TickType(30);
    pub const INDEX_FUTURE_PREMIUM: TickType = TickType(31);
    pub const BID_EXCH: TickType = TickType(32);
    pub const ASK_EXCH: TickType = TickType(33);
    pub const AUCTION_VOLUME: TickType = TickType(34);
    pub const AUCTION_PRICE: TickType = TickType(35);
    pub const AUCTION_IMBALANCE: TickType = TickType(36);
    pub const MARK_PRICE: TickType = TickType(37);
    pub const BID_EFP_COMPUTATION: TickType = TickType(38);
    pub const ASK_EFP_COMPUTATION: TickType = TickType(39);
    pub const LAST_EFP_COMPUTATION: TickType = TickType(40);
    pub const OPEN_EFP_COMPUTATION: TickType = TickType(41);
    pub const HIGH_EFP_COMPUTATION: TickType = TickType(42);
    pub const LOW_EFP_COMPUTATION: TickType = TickType(43);
    pub const CLOSE_EFP_COMPUTATION: TickType = TickType(44);
    pub const LAST_TIMESTAMP: TickType = TickType(45);
    pub const SHORTABLE: TickType = TickType(46);
    pub const FUNDAMENTAL_RATIOS: TickType = TickType(47);
    pub const RT_VOLUME: TickType = TickType(48);
    pub const HALTED: TickType = TickType(49);
    pub const BID_YIELD: TickType = TickType(50);
    pub const ASK_YIELD: TickType = TickType(51);
    pub const LAST_YIELD: TickType = TickType(52);
    pub const CUST_OPTION_COMPUTATION: TickType = TickType(53);
    pub const TRADE_COUNT: TickType = TickType(54);
    pub const TRADE_RATE: TickType = TickType(55);
    pub const VOLUME_RATE: TickType = TickType(56);
    pub const LAST_RTH_TRADE: TickType = TickType(57);

    /// Placeholder used by callers that need "no tick type".
    pub const NOT_SET: TickType = TickType(i32::MAX);

    /// The size tick that accompanies a price tick of this type.
    ///
    /// Only BID, ASK and LAST price ticks carry a companion size.
    pub fn companion_size(self) -> Option<TickType> {
        match self {
            TickType::BID => Some(TickType::BID_SIZE),
            TickType::ASK => Some(TickType::ASK_SIZE),
            TickType::LAST => Some(TickType::LAST_SIZE),
            _ => None,
        }
    }

    /// Human-readable name, or `None` for a number this table doesn't know.
    pub fn name(self) -> Option<&'static str> {
        const NAMES: [&str; 58] = [
            "bidSize",
            "bidPrice",
            "askPrice",
            "askSize",
            "lastPrice",
            "lastSize",
            "high",
            "low",
            "volume",
            "close",
            "bidOptComp",
            "askOptComp",
            "lastOptComp",
            "modelOptComp",
            "open",
            "13WeekLow",
            "13WeekHigh",
            "26WeekLow",
            "26WeekHigh",
            "52WeekLow",
            "52WeekHigh",
            "AvgVolume",
            "OpenInterest",
            "OptionHistoricalVolatility",
            "OptionImpliedVolatility",
            "OptionBidExchStr",
            "OptionAskExchStr",
            "OptionCallOpenInterest",
            "OptionPutOpenInterest",
            "OptionCallVolume",
            "OptionPutVolume",
            "IndexFuturePremium",
            "bidExch",
            "askExch",
            "auctionVolume",
            "auctionPrice",
            "auctionImbalance",
            "markPrice",
            "bidEFP",
            "askEFP",
            "lastEFP",
            "openEFP",
            "highEFP",
            "lowEFP",
            "closeEFP",
            "lastTimestamp",
            "shortable",
            "fundamentals",
            "RTVolume",
            "halted",
            "bidYield",
            "askYield",
            "lastYield",
            "custOptComp",
            "trades",
            "trades/min",
            "volume/min",
            "lastRTHTrade",
        ];
        usize::try_from(self.0)
            .ok()
            .and_then(|idx| NAMES.get(idx).copied())
    }
}

impl From<i32> for TickType {
    fn from(v: i32) -> Self {
        TickType(v)
    }
}

impl fmt::Display for TickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "tickType({})", self.0),
        }
    }
}
