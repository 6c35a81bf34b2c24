//! Per-netting-set exposure aggregation.

use std::borrow::Cow;

use pricer_core::market_data::DiscountCurve;
use pricer_core::types::{Currency, Date, DayCountConvention};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use super::allocation::{allocate, AllocationBuffer, TradeAllocation};
use super::mpor::MporCashFlows;
use super::regulatory::{regulatory_window_end, time_weighted_exposures};
use super::result::{ExposureResults, NettingSetExposure};
use super::standalone::trade_exposures;
use super::ExposureCalculator;
use crate::collateral::{
    CollateralBalances, CollateralCalculationType, CollateralPathAdapter, CollateralPathProvider,
};
use crate::config::ExposureConfig;
use crate::cube::{
    CubeSlotMut, ExposureCube, InMemoryCube, NettedCube, NpvCube, TradeAllocationCube,
    ALLOCATED_ENE_DEPTH, ALLOCATED_EPE_DEPTH, ENE_DEPTH, EPE_DEPTH,
};
use crate::dim::DimProvider;
use crate::error::ExposureError;
use crate::market::{Market, ScenarioData, ScenarioDataKind};
use crate::portfolio::{CounterpartyId, CsaDetails, NettingSet, Portfolio};

/// Read-only inputs of an exposure run.
#[derive(Clone, Copy)]
pub struct ExposureInputs<'a> {
    /// Trades, netting sets and CSA terms.
    pub portfolio: &'a Portfolio,
    /// Simulated trade default values, in portfolio trade order.
    pub cube: &'a dyn NpvCube,
    /// Simulated trade close-out values, required for `NoLag` collateral.
    pub close_out_cube: Option<&'a dyn NpvCube>,
    /// Cash flows inside the margin period of risk, required unless `BothPay`.
    pub mpor_cash_flows: Option<MporCashFlows<'a>>,
    /// Today's market.
    pub market: &'a dyn Market,
    /// Simulated FX, index fixings and numeraire.
    pub scenario: &'a dyn ScenarioData,
    /// Dynamic initial margin profiles.
    pub dim: &'a dyn DimProvider,
    /// Collateral balance simulator.
    pub collateral: &'a dyn CollateralPathProvider,
    /// Today's collateral balances.
    pub balances: &'a CollateralBalances,
}

/// Netted exposure calculator.
///
/// Aggregates trade values into netting set values, subtracts simulated
/// collateral and dynamic initial margin, and produces EPE/ENE/PFE profiles,
/// expected collateral, COLVA and collateral floor values, regulatory
/// time-weighted exposures and, optionally, trade allocations. Netting sets
/// are processed in parallel; each worker writes only its own cube slots.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::DiscountCurve;
/// use pricer_core::types::{Currency, Date, DayCountConvention};
/// use pricer_xva::collateral::{CollateralBalances, VariationMarginReplay};
/// use pricer_xva::config::ExposureConfig;
/// use pricer_xva::cube::InMemoryCube;
/// use pricer_xva::dim::NoDim;
/// use pricer_xva::exposure::{ExposureInputs, NettedExposureCalculator};
/// use pricer_xva::market::{InMemoryScenarioData, SimpleMarket};
/// use pricer_xva::portfolio::{
///     Counterparty, CounterpartyId, CreditParams, NettingSet, NettingSetId, PortfolioBuilder, Trade,
///     TradeId,
/// };
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let date = Date::from_ymd(2025, 1, 2).unwrap();
/// let portfolio = PortfolioBuilder::new()
///     .add_counterparty(Counterparty::new(CounterpartyId::new("CP"), CreditParams::new(0.01, 0.6).unwrap()))
///     .add_netting_set(NettingSet::new(NettingSetId::new("NS")))
///     .add_trade(Trade::new(TradeId::new("T1"), "CP".into(), "NS".into(), date))
///     .build()
///     .unwrap();
/// let cube = InMemoryCube::from_values(today, vec![date], vec![1.0], &[vec![vec![100.0, -50.0]]]).unwrap();
/// let market = SimpleMarket::new(today)
///     .with_discount_curve(Currency::EUR, DiscountCurve::flat(today, 0.0, DayCountConvention::ActualActual365));
/// let scenario = InMemoryScenarioData::new(1, 2);
/// let balances = CollateralBalances::new();
///
/// let results = NettedExposureCalculator::new(ExposureConfig::default())
///     .unwrap()
///     .build(&ExposureInputs {
///         portfolio: &portfolio,
///         cube: &cube,
///         close_out_cube: None,
///         mpor_cash_flows: None,
///         market: &market,
///         scenario: &scenario,
///         dim: &NoDim,
///         collateral: &VariationMarginReplay::new(0),
///         balances: &balances,
///     })
///     .unwrap();
///
/// let ns = results.netting_set(&NettingSetId::new("NS")).unwrap();
/// assert_eq!(ns.epe, vec![1.0, 50.0]);
/// assert_eq!(ns.ene, vec![0.0, 25.0]);
/// ```
#[derive(Debug, Clone)]
pub struct NettedExposureCalculator {
    config: ExposureConfig,
}

/// Run-wide values shared by all netting set workers.
struct RunContext<'a> {
    inputs: &'a ExposureInputs<'a>,
    as_of: Date,
    dates: &'a [Date],
    samples: usize,
    times: Vec<f64>,
    discount_factors: Vec<f64>,
}

/// Per-netting-set worker output.
struct NettingSetRun {
    exposure: NettingSetExposure,
    allocations: Vec<TradeAllocation>,
}

impl NettedExposureCalculator {
    /// Calculator for a validated configuration.
    pub fn new(config: ExposureConfig) -> Result<Self, ExposureError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run configuration.
    #[inline]
    pub fn config(&self) -> &ExposureConfig {
        &self.config
    }

    /// Runs the aggregation over all netting sets that hold trades.
    ///
    /// # Errors
    ///
    /// The first failing netting set aborts the run; see [`ExposureError`].
    pub fn build(&self, inputs: &ExposureInputs<'_>) -> Result<ExposureResults, ExposureError> {
        self.validate_inputs(inputs)?;

        let as_of = inputs.market.as_of_date();
        let dates = inputs.cube.dates();
        let samples = inputs.cube.samples();
        let netting_sets = inputs.portfolio.populated_netting_sets();
        info!(
            netting_sets = netting_sets.len(),
            trades = inputs.portfolio.trade_count(),
            dates = dates.len(),
            samples,
            "exposure aggregation started"
        );

        let curve = inputs
            .market
            .discount_curve(self.config.base_currency, &self.config.market_configuration)?;
        let context = RunContext {
            inputs,
            as_of,
            dates,
            samples,
            times: dates
                .iter()
                .map(|&d| DayCountConvention::ActualActualIsda.year_fraction_dates(as_of, d))
                .collect(),
            discount_factors: discount_factors(curve, dates)?,
        };

        let exposure_samples = if self.config.multi_path { samples } else { 1 };
        let mut netted_cube: NettedCube =
            InMemoryCube::new(as_of, netting_sets.len(), dates.to_vec(), samples, 1);
        let mut exposure_cube: ExposureCube =
            InMemoryCube::new(as_of, netting_sets.len(), dates.to_vec(), exposure_samples, 2);

        let runs = netting_sets
            .into_par_iter()
            .zip(netted_cube.slots_mut())
            .zip(exposure_cube.slots_mut())
            .map(|((netting_set, netted), exposure)| {
                self.process_netting_set(&context, netting_set, netted, exposure)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let allocation_cube = self.config.marginal_allocation.then(|| {
            let mut cube: TradeAllocationCube = InMemoryCube::new(
                as_of,
                inputs.portfolio.trade_count(),
                dates.to_vec(),
                exposure_samples,
                2,
            );
            scatter_allocations(&mut cube, &runs);
            cube
        });

        let trade_ids: Vec<_> = inputs.portfolio.trades().iter().map(|t| t.id().clone()).collect();
        let trades = trade_exposures(inputs.cube, &trade_ids, self.sign());

        let mut times = Vec::with_capacity(dates.len() + 1);
        times.push(0.0);
        times.extend_from_slice(&context.times);

        let netting_set_order: Vec<_> = runs
            .iter()
            .map(|run| run.exposure.netting_set_id.clone())
            .collect();
        let netting_sets = runs
            .into_iter()
            .map(|run| (run.exposure.netting_set_id.clone(), run.exposure))
            .collect();

        info!("exposure aggregation finished");
        Ok(ExposureResults {
            as_of,
            dates: dates.to_vec(),
            times,
            trade_ids,
            netting_set_order,
            netting_sets,
            netted_cube,
            exposure_cube,
            allocation_cube,
            trade_exposures: trades,
        })
    }

    #[inline]
    fn sign(&self) -> f64 {
        if self.config.flip_view {
            -1.0
        } else {
            1.0
        }
    }

    fn validate_inputs(&self, inputs: &ExposureInputs<'_>) -> Result<(), ExposureError> {
        let cube = inputs.cube;
        let trades = inputs.portfolio.trade_count();
        check_cube("NPV cube", cube, trades, cube)?;
        if cube.dates().windows(2).any(|w| w[0] >= w[1]) {
            return Err(ExposureError::Configuration(
                "simulation dates must be strictly increasing".to_string(),
            ));
        }
        if let Some(close_out) = inputs.close_out_cube {
            check_cube("close-out cube", close_out, trades, cube)?;
        }
        match inputs.mpor_cash_flows {
            Some(flows) => {
                check_cube("MPOR received cash flow cube", flows.received, trades, cube)?;
                check_cube("MPOR paid cash flow cube", flows.paid, trades, cube)?;
            }
            None if self.config.mpor_cash_flow_mode.needs_cash_flows() => {
                return Err(ExposureError::Configuration(format!(
                    "MPOR cash flow mode {:?} requires cash flow cubes",
                    self.config.mpor_cash_flow_mode
                )));
            }
            None => {}
        }
        if inputs.scenario.n_dates() != cube.dates().len() {
            return Err(ExposureError::dimension(
                "scenario dates",
                cube.dates().len(),
                inputs.scenario.n_dates(),
            ));
        }
        if inputs.scenario.n_samples() != cube.samples() {
            return Err(ExposureError::dimension(
                "scenario samples",
                cube.samples(),
                inputs.scenario.n_samples(),
            ));
        }
        Ok(())
    }

    fn process_netting_set(
        &self,
        ctx: &RunContext<'_>,
        netting_set: &NettingSet,
        mut netted: CubeSlotMut<'_>,
        mut exposure_slot: CubeSlotMut<'_>,
    ) -> Result<NettingSetRun, ExposureError> {
        let inputs = ctx.inputs;
        let config = &self.config;
        let id = netting_set.id();
        let sign = self.sign();
        let n_dates = ctx.dates.len();
        let samples = ctx.samples;
        let trade_indices = inputs.portfolio.trade_indices_in_netting_set(id);

        let (counterparty_id, maturity) = self.counterparty_and_maturity(ctx, netting_set, &trade_indices)?;

        let csa: Option<Cow<'_, CsaDetails>> = if netting_set.active_csa() {
            let details = netting_set
                .csa()
                .ok_or_else(|| ExposureError::MissingCsaDetails(id.to_string()))?;
            Some(if config.flip_view {
                Cow::Owned(details.inverted())
            } else {
                Cow::Borrowed(details)
            })
        } else {
            None
        };

        let value_today = sign * trade_indices.iter().map(|&i| inputs.cube.get_t0(i)).sum::<f64>();
        let values = netting_set_values(inputs.cube, &trade_indices, n_dates, samples, sign);
        let close_out_cube = match (&csa, config.calculation_type) {
            (Some(_), CollateralCalculationType::NoLag) => {
                Some(inputs.close_out_cube.ok_or_else(|| {
                    ExposureError::Configuration(format!(
                        "close-out values required for NoLag collateral in netting set {}",
                        id
                    ))
                })?)
            }
            _ => None,
        };
        let close_out_values = close_out_cube
            .map(|cube| netting_set_values(cube, &trade_indices, n_dates, samples, sign));
        let data = close_out_values.as_ref().unwrap_or(&values);
        let data_cube = close_out_cube.unwrap_or(inputs.cube);

        // Today's collateral position in base currency
        let balance = inputs.balances.get(id);
        let balance_fx = match balance.currency {
            Some(ccy) => self.fx_rate(inputs.market, ccy, config.base_currency)?,
            None => 1.0,
        };
        let vm_base = balance.vm * balance_fx;
        let im_base = balance.im * balance_fx;
        let initial_balance = match (&csa, balance.currency) {
            (Some(csa), Some(ccy)) => balance.vm * self.fx_rate(inputs.market, ccy, csa.currency())?,
            _ => balance.vm,
        };

        let adapter = CollateralPathAdapter::new(
            inputs.market,
            inputs.scenario,
            inputs.collateral,
            config.base_currency,
            &config.market_configuration,
            config.calculation_type,
        );
        let paths = adapter.collateral_paths(
            id,
            csa.as_deref(),
            ctx.dates,
            samples,
            value_today,
            &values,
            initial_balance,
        )?;

        let csa_applies_im = csa.as_ref().is_some_and(|c| c.apply_initial_margin());
        if csa.is_some() && csa_applies_im != config.apply_initial_margin {
            warn!(
                netting_set = %id,
                csa_flag = csa_applies_im,
                analytics_flag = config.apply_initial_margin,
                "initial margin flags differ between CSA and analytics, IM is not applied"
            );
        }
        let dim = if csa_applies_im && config.apply_initial_margin && paths.is_some() {
            let profile = inputs
                .dim
                .dynamic_im(id)
                .ok_or_else(|| ExposureError::MissingDim(id.to_string()))?;
            check_dim_profile(id.as_str(), profile, n_dates, samples)?;
            Some(profile)
        } else {
            None
        };
        let im_type = csa.as_ref().map(|c| c.initial_margin_type()).unwrap_or_default();

        // Funding index for COLVA accrual
        let csa_index = match &csa {
            Some(c) if !c.index().is_empty() => {
                Some(inputs.market.ibor_index(c.index(), &config.market_configuration)?)
            }
            _ => None,
        };
        let colva_day_count = csa_index
            .map(|index| index.day_count())
            .unwrap_or(DayCountConvention::ActualActualIsda);
        let scenario_fx_key = csa
            .as_ref()
            .filter(|c| c.currency() != config.base_currency)
            .map(|c| c.currency().code());

        let mpor_adjustment = config.mpor_cash_flow_mode.adjustment();
        let mpor_flows = inputs
            .mpor_cash_flows
            .filter(|_| config.mpor_cash_flow_mode.needs_cash_flows());

        let mut epe = vec![0.0; n_dates + 1];
        let mut ene = vec![0.0; n_dates + 1];
        let mut pfe = vec![0.0; n_dates + 1];
        let mut ee_b = vec![0.0; n_dates + 1];
        let mut eab = vec![0.0; n_dates + 1];
        let mut colva_increments = vec![0.0; n_dates + 1];
        let mut floor_increments = vec![0.0; n_dates + 1];
        let mut colva = 0.0;
        let mut collateral_floor = 0.0;

        if config.full_initial_collateralisation && csa.is_some() {
            epe[0] = 0.0;
            ene[0] = 0.0;
        } else {
            epe[0] = (value_today - vm_base - im_base).max(0.0);
            ene[0] = (-value_today + vm_base).max(0.0);
        }
        eab[0] = value_today;
        ee_b[0] = epe[0];
        pfe[0] = epe[0];

        netted.set_t0(value_today, 0);
        exposure_slot.set_t0(epe[0], EPE_DEPTH);
        exposure_slot.set_t0(ene[0], ENE_DEPTH);

        let mut allocations = config.marginal_allocation.then(|| {
            let slots = if config.multi_path { samples } else { 1 };
            AllocationBuffer::new(&trade_indices, n_dates, samples, slots)
        });

        let inv_samples = if samples > 0 { 1.0 / samples as f64 } else { 0.0 };
        let mut distribution = vec![0.0; samples];

        for (j, &date) in ctx.dates.iter().enumerate() {
            let prev_date = if j == 0 { ctx.as_of } else { ctx.dates[j - 1] };
            let dcf = colva_day_count.year_fraction_dates(prev_date, date);

            for k in 0..samples {
                let mut balance = 0.0;
                if let Some(paths) = &paths {
                    balance = paths[k].balance(date);
                    if let Some(ccy) = scenario_fx_key {
                        balance *= inputs
                            .scenario
                            .get(j, k, ScenarioDataKind::FxSpot, ccy)
                            .map_err(|e| e.at(id, j, k))?;
                    }
                }
                eab[j + 1] += balance * inv_samples;

                let mpor_cash_flow = match &mpor_flows {
                    Some(flows) => {
                        let (received, paid) =
                            flows.netting_set_flows(&trade_indices, j, k, config.flip_view);
                        mpor_adjustment(received, paid)
                    }
                    None => 0.0,
                };
                let exposure = data[j][k] - balance + mpor_cash_flow;

                let (dim_epe, dim_ene) = match dim {
                    Some(profile) => {
                        let value = profile[j][k];
                        if value < 0.0 {
                            return Err(ExposureError::NegativeDim {
                                netting_set: id.to_string(),
                                date_index: j,
                                sample_index: k,
                                value,
                            });
                        }
                        (
                            if im_type.reduces_epe() { value } else { 0.0 },
                            if im_type.reduces_ene() { value } else { 0.0 },
                        )
                    }
                    None => (0.0, 0.0),
                };

                let epe_k = (exposure - dim_epe).max(0.0);
                let ene_k = (-exposure - dim_ene).max(0.0);
                epe[j + 1] += epe_k * inv_samples;
                ene[j + 1] += ene_k * inv_samples;
                distribution[k] = exposure - dim_epe;

                netted.set(exposure, j, k, 0);
                if config.multi_path {
                    exposure_slot.set(epe_k, j, k, EPE_DEPTH);
                    exposure_slot.set(ene_k, j, k, ENE_DEPTH);
                }

                if let Some(csa) = &csa {
                    let index_value = match csa_index {
                        Some(index) => {
                            inputs
                                .scenario
                                .get(j, k, ScenarioDataKind::IndexFixing, index.name())
                                .map_err(|e| e.at(id, j, k))?
                        }
                        None => 0.0,
                    };
                    let spread = if balance >= 0.0 {
                        csa.collateral_spread_rcv()
                    } else {
                        csa.collateral_spread_pay()
                    };
                    let numeraire = inputs
                        .scenario
                        .get(j, k, ScenarioDataKind::Numeraire, "")
                        .map_err(|e| e.at(id, j, k))?;
                    let colva_delta = -balance * spread * dcf / numeraire * inv_samples;
                    let floor_delta =
                        -balance * (-(index_value - spread)).max(0.0) * dcf / numeraire * inv_samples;
                    colva_increments[j + 1] += colva_delta;
                    floor_increments[j + 1] += floor_delta;
                    colva += colva_delta;
                    collateral_floor += floor_delta;
                }

                if let Some(buffer) = allocations.as_mut() {
                    for (position, &i) in trade_indices.iter().enumerate() {
                        let trade_value = sign * data_cube.get(i, j, k);
                        let trade_exposure = match &mpor_flows {
                            Some(flows) => {
                                let (received, paid) =
                                    flows.trade_flows(i, j, k, config.flip_view);
                                trade_value + mpor_adjustment(received, paid)
                            }
                            None => trade_value,
                        };
                        let allocation = allocate(
                            exposure,
                            balance,
                            data[j][k],
                            trade_value,
                            trade_exposure,
                            trade_indices.len(),
                            config.marginal_allocation_limit,
                        );
                        buffer.record(position, j, k, exposure, allocation);
                    }
                }
            }

            if !config.multi_path {
                exposure_slot.set(epe[j + 1], j, 0, EPE_DEPTH);
                exposure_slot.set(ene[j + 1], j, 0, ENE_DEPTH);
            }
            ee_b[j + 1] = epe[j + 1] / ctx.discount_factors[j];
            pfe[j + 1] =
                ExposureCalculator::potential_future_exposure(&mut distribution, config.quantile);
        }

        let window_end = regulatory_window_end(ctx.as_of, maturity);
        let maturity_time = DayCountConvention::ActualActualIsda.year_fraction_dates(ctx.as_of, window_end);
        let eee_b = ExposureCalculator::effective_expected_exposure(&ee_b);
        let (epe_b, eepe_b) = time_weighted_exposures(&ctx.times, &ee_b, &eee_b, maturity_time);

        debug!(
            netting_set = %id,
            trades = trade_indices.len(),
            collateralised = paths.is_some(),
            epe_b,
            eepe_b,
            colva,
            "netting set aggregated"
        );

        Ok(NettingSetRun {
            exposure: NettingSetExposure {
                netting_set_id: id.clone(),
                counterparty_id,
                maturity,
                value_today,
                epe,
                ene,
                pfe,
                ee_b,
                eee_b,
                eab,
                colva_increments,
                floor_increments,
                colva,
                collateral_floor,
                epe_b,
                eepe_b,
                trade_indices,
            },
            allocations: allocations
                .map(AllocationBuffer::into_allocations)
                .unwrap_or_default(),
        })
    }

    /// The unique counterparty and the latest maturity of a netting set.
    fn counterparty_and_maturity(
        &self,
        ctx: &RunContext<'_>,
        netting_set: &NettingSet,
        trade_indices: &[usize],
    ) -> Result<(CounterpartyId, Date), ExposureError> {
        let trades = ctx.inputs.portfolio.trades();
        let mut counterparty: Option<&CounterpartyId> = None;
        let mut maturity = ctx.as_of;
        for &i in trade_indices {
            let trade = &trades[i];
            match counterparty {
                None => counterparty = Some(trade.counterparty_id()),
                Some(first) if first != trade.counterparty_id() => {
                    return Err(ExposureError::CounterpartyMismatch {
                        netting_set: netting_set.id().to_string(),
                        first: first.to_string(),
                        second: trade.counterparty_id().to_string(),
                    });
                }
                Some(_) => {}
            }
            maturity = maturity.max(trade.maturity());
        }
        Ok((counterparty.cloned().unwrap_or_default(), maturity))
    }

    fn fx_rate(&self, market: &dyn Market, from: Currency, to: Currency) -> Result<f64, ExposureError> {
        if from == to {
            return Ok(1.0);
        }
        Ok(market.fx_rate(&from.pair_code(to), &self.config.market_configuration)?)
    }
}

fn check_cube(
    what: &str,
    cube: &dyn NpvCube,
    trades: usize,
    reference: &dyn NpvCube,
) -> Result<(), ExposureError> {
    if cube.num_ids() != trades {
        return Err(ExposureError::dimension(format!("{} trades", what), trades, cube.num_ids()));
    }
    if cube.dates() != reference.dates() {
        return Err(ExposureError::dimension(
            format!("{} dates", what),
            reference.dates().len(),
            cube.dates().len(),
        ));
    }
    if cube.samples() != reference.samples() {
        return Err(ExposureError::dimension(
            format!("{} samples", what),
            reference.samples(),
            cube.samples(),
        ));
    }
    Ok(())
}

fn check_dim_profile(
    netting_set: &str,
    profile: &[Vec<f64>],
    dates: usize,
    samples: usize,
) -> Result<(), ExposureError> {
    if profile.len() != dates {
        return Err(ExposureError::dimension(
            format!("DIM dates of netting set {}", netting_set),
            dates,
            profile.len(),
        ));
    }
    if let Some(row) = profile.iter().find(|row| row.len() != samples) {
        return Err(ExposureError::dimension(
            format!("DIM samples of netting set {}", netting_set),
            samples,
            row.len(),
        ));
    }
    Ok(())
}

fn discount_factors(curve: &DiscountCurve, dates: &[Date]) -> Result<Vec<f64>, ExposureError> {
    dates
        .iter()
        .map(|&d| curve.discount(d).map_err(ExposureError::from))
        .collect()
}

/// Sum of member trade values, `[date][sample]`.
fn netting_set_values(
    cube: &dyn NpvCube,
    trade_indices: &[usize],
    dates: usize,
    samples: usize,
    sign: f64,
) -> Vec<Vec<f64>> {
    (0..dates)
        .map(|j| {
            (0..samples)
                .map(|k| sign * trade_indices.iter().map(|&i| cube.get(i, j, k)).sum::<f64>())
                .collect()
        })
        .collect()
}

fn scatter_allocations(cube: &mut TradeAllocationCube, runs: &[NettingSetRun]) {
    let slots = cube.samples();
    for trade in runs.iter().flat_map(|run| &run.allocations) {
        for (slot, (&epe, &ene)) in trade.epe.iter().zip(&trade.ene).enumerate() {
            let (date, sample) = (slot / slots, slot % slots);
            cube.set(epe, trade.trade_index, date, sample, ALLOCATED_EPE_DEPTH);
            cube.set(ene, trade.trade_index, date, sample, ALLOCATED_ENE_DEPTH);
        }
    }
}
