//! # Pricer XVA (L4: Application)
//!
//! Netting set exposure and collateral aggregation over pre-simulated NPV cubes.
//!
//! This crate provides:
//! - Portfolio structures: trades, counterparties, netting sets with CSA terms
//! - Cube, market, scenario and dynamic initial margin contracts with in-memory implementations
//! - Collateral path adapter and a deterministic variation margin provider
//! - Netted exposure aggregation (EPE, ENE, PFE, EE_B, EEE_B, expected collateral)
//! - COLVA and collateral floor accrual, regulatory time-weighted EPE/EEPE
//! - Marginal allocation of netting set exposure to trades
//! - CVA/DVA summary and CSV reports
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_xva (L4)              │
//! ├─────────────────────────────────────────┤
//! │  portfolio/  - Trade, Counterparty,    │
//! │               NettingSet, CsaDetails    │
//! │  cube/       - NPV, netted, exposure   │
//! │  market/     - Market, ScenarioData    │
//! │  collateral/ - paths, adapter, replay  │
//! │  exposure/   - netted exposure engine  │
//! │  xva/        - CVA, DVA summary        │
//! │  report      - CSV writers             │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │            pricer_core (L1)            │
//! │  Dates, calendars, currencies, curves  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Performance
//!
//! - Netting sets run in parallel with Rayon
//! - Output cubes are split into disjoint per-netting-set slots, so workers never lock
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::{Currency, Date};
//! use pricer_xva::portfolio::{
//!     Counterparty, CounterpartyId, CreditParams, CsaDetails, NettingSet, NettingSetId,
//!     PortfolioBuilder, Trade, TradeId,
//! };
//!
//! let maturity = Date::from_ymd(2030, 6, 14).unwrap();
//! let portfolio = PortfolioBuilder::new()
//!     .add_counterparty(Counterparty::new(
//!         CounterpartyId::new("CP001"),
//!         CreditParams::new(0.02, 0.6).unwrap(),
//!     ))
//!     .add_netting_set(
//!         NettingSet::new(NettingSetId::new("NS001"))
//!             .with_csa(CsaDetails::new(Currency::EUR).with_index("EUR-EONIA"))
//!             .unwrap(),
//!     )
//!     .add_trade(Trade::new(
//!         TradeId::new("T001"),
//!         CounterpartyId::new("CP001"),
//!         NettingSetId::new("NS001"),
//!         maturity,
//!     ))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(portfolio.trade_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod collateral;
pub mod config;
pub mod cube;
pub mod dim;
pub mod error;
pub mod exposure;
pub mod market;
pub mod portfolio;
pub mod report;
pub mod xva;

// Re-export commonly used types
pub use config::{ConfigError, ExposureConfig};
pub use error::ExposureError;
pub use exposure::{ExposureInputs, ExposureResults, NettedExposureCalculator};
pub use portfolio::{
    Counterparty, CounterpartyId, CreditParams, CsaDetails, NettingSet, NettingSetId, Portfolio,
    PortfolioBuilder, PortfolioError, Trade, TradeId,
};
pub use xva::{XvaCalculator, XvaSummary};
