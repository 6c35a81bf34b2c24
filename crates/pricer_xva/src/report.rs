//! CSV renderings of an exposure run.
//!
//! Column layouts:
//!
//! - trade exposure: `TradeId,Period,Time,EPE,ENE,AllocatedEPE,AllocatedENE`
//! - netting set exposure: `NettingSetId,Period,Time,EPE,ENE,ExpectedCollateral`
//! - XVA summary: `TradeId,NettingSetId,CVA,DVA,COLVA,CollateralFloor,BaselEPE,BaselEEPE`
//!
//! Exposure reports start with a row for the as-of date at time zero.

use std::io::Write;

use crate::error::ExposureError;
use crate::exposure::ExposureResults;
use crate::xva::XvaSummary;

const TRADE_HEADER: [&str; 7] = [
    "TradeId",
    "Period",
    "Time",
    "EPE",
    "ENE",
    "AllocatedEPE",
    "AllocatedENE",
];

const NETTING_SET_HEADER: [&str; 6] = [
    "NettingSetId",
    "Period",
    "Time",
    "EPE",
    "ENE",
    "ExpectedCollateral",
];

const XVA_HEADER: [&str; 8] = [
    "TradeId",
    "NettingSetId",
    "CVA",
    "DVA",
    "COLVA",
    "CollateralFloor",
    "BaselEPE",
    "BaselEEPE",
];

fn time(t: f64) -> String {
    format!("{:.6}", t)
}

fn amount(x: f64) -> String {
    format!("{:.2}", x)
}

/// Stand-alone and allocated exposure per trade and date.
pub fn write_trade_exposures<W: Write>(
    writer: W,
    results: &ExposureResults,
) -> Result<(), ExposureError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(TRADE_HEADER)?;
    let periods: Vec<String> = std::iter::once(results.as_of())
        .chain(results.dates().iter().copied())
        .map(|d| d.to_string())
        .collect();
    for (i, trade) in results.trade_exposures().iter().enumerate() {
        let allocated_epe = results.allocated_epe(i);
        let allocated_ene = results.allocated_ene(i);
        for (j, period) in periods.iter().enumerate() {
            let allocated = |profile: &Option<Vec<f64>>| {
                profile
                    .as_ref()
                    .and_then(|p| p.get(j).copied())
                    .unwrap_or(0.0)
            };
            wtr.write_record([
                trade.trade_id.as_str(),
                period.as_str(),
                time(results.times()[j]).as_str(),
                amount(trade.epe[j]).as_str(),
                amount(trade.ene[j]).as_str(),
                amount(allocated(&allocated_epe)).as_str(),
                amount(allocated(&allocated_ene)).as_str(),
            ])?;
        }
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Collateralised exposure and expected collateral per netting set and date.
pub fn write_netting_set_exposures<W: Write>(
    writer: W,
    results: &ExposureResults,
) -> Result<(), ExposureError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(NETTING_SET_HEADER)?;
    for ns in results.netting_sets() {
        let dates = std::iter::once(results.as_of()).chain(results.dates().iter().copied());
        for (j, date) in dates.enumerate() {
            wtr.write_record([
                ns.netting_set_id.as_str(),
                date.to_string().as_str(),
                time(results.times()[j]).as_str(),
                amount(ns.epe[j]).as_str(),
                amount(ns.ene[j]).as_str(),
                amount(ns.eab[j]).as_str(),
            ])?;
        }
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Netting set rows (empty `TradeId`) followed by allocated trade rows.
pub fn write_xva_summary<W: Write>(writer: W, summary: &XvaSummary) -> Result<(), ExposureError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(XVA_HEADER)?;
    for ns in &summary.netting_sets {
        wtr.write_record([
            "",
            ns.netting_set_id.as_str(),
            amount(ns.cva).as_str(),
            amount(ns.dva).as_str(),
            amount(ns.colva).as_str(),
            amount(ns.collateral_floor).as_str(),
            amount(ns.basel_epe).as_str(),
            amount(ns.basel_eepe).as_str(),
        ])?;
    }
    for trade in &summary.trades {
        wtr.write_record([
            trade.trade_id.as_str(),
            trade.netting_set_id.as_str(),
            amount(trade.cva).as_str(),
            amount(trade.dva).as_str(),
            "",
            "",
            "",
            "",
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::{CounterpartyId, NettingSetId, TradeId};
    use crate::xva::{NettingSetXva, TradeXva};

    #[test]
    fn test_xva_summary_layout() {
        let summary = XvaSummary {
            netting_sets: vec![NettingSetXva {
                netting_set_id: NettingSetId::new("NS1"),
                counterparty_id: CounterpartyId::new("CP1"),
                cva: 12.3456,
                dva: 1.0,
                colva: -0.5,
                collateral_floor: 0.25,
                basel_epe: 100.0,
                basel_eepe: 110.0,
            }],
            trades: vec![TradeXva {
                trade_id: TradeId::new("T1"),
                netting_set_id: NettingSetId::new("NS1"),
                cva: 6.0,
                dva: 0.5,
            }],
        };
        let mut out = Vec::new();
        write_xva_summary(&mut out, &summary).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "TradeId,NettingSetId,CVA,DVA,COLVA,CollateralFloor,BaselEPE,BaselEEPE"
        );
        assert_eq!(lines[1], ",NS1,12.35,1.00,-0.50,0.25,100.00,110.00");
        assert_eq!(lines[2], "T1,NS1,6.00,0.50,,,,");
    }
}
