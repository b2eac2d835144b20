//! CSV export of case results.

use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::ivp::IvpComparison;
use crate::rlc::RlcSeries;

pub fn ivp_csv(comparison: &IvpComparison) -> String {
    let mut csv = String::from("x,exact,numerical,abs_error\n");
    for row in &comparison.rows {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            row.x, row.exact, row.numerical, row.abs_error
        ));
    }
    csv
}

pub fn rlc_csv(series: &RlcSeries) -> String {
    let mut csv = String::from("time_s,i1_a,i2_a,v_c_v\n");
    for ((t, i1), vc) in series.t.iter().zip(&series.i1).zip(&series.v_c) {
        csv.push_str(&format!("{},{},{},{}\n", t, i1, i1, vc));
    }
    csv
}

pub fn write_ivp_csv(path: &Path, comparison: &IvpComparison) -> AppResult<()> {
    write(path, ivp_csv(comparison))
}

pub fn write_rlc_csv(path: &Path, series: &RlcSeries) -> AppResult<()> {
    write(path, rlc_csv(series))
}

fn write(path: &Path, csv: String) -> AppResult<()> {
    std::fs::write(path, csv).map_err(|e| AppError::Export {
        path: path.to_path_buf(),
        source: e,
    })
}
