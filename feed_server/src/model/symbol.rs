//! Ticker symbols the replay server draws synthetic records from.
//!
//! Every symbol is exactly four ASCII letters so it fills the fixed-width
//! symbol field of a record frame without padding.

use strum_macros::{Display, EnumIter, EnumString};

/// Set of four-letter symbols used by the synthetic feed.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Display, EnumString, EnumIter, Hash, Eq, PartialEq)]
#[strum(ascii_case_insensitive)]
pub enum Symbol {
    AAPL,
    MSFT,
    AMZN,
    NVDA,
    META,
    TSLA,
    GOOG,
    PYPL,
    NFLX,
    ADBE,
    INTC,
    CSCO,
    QCOM,
    ORCL,
    AMGN,
    SBUX,
    INTU,
    ISRG,
    GILD,
    BKNG,
    KLAC,
    APTV,
}
