//! Anomalous scattering factor lookup for mirror coating materials.
//!
//! A coarse excerpt of the Chantler tabulation, dense enough for grazing
//! incidence mirror work where the reflectivity varies slowly off the
//! absorption edges. f1 interpolates linearly, f2 log-log, matching the usual
//! treatment of these tables. Energies outside the tabulated span are a
//! lookup failure, never an extrapolation.

/// Tabulated f1/f2 for one element, parallel arrays ordered by energy.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScatteringTable {
    pub(crate) symbol: &'static str,
    pub(crate) energies_ev: &'static [f64],
    pub(crate) f1: &'static [f64],
    pub(crate) f2: &'static [f64],
}

impl ScatteringTable {
    pub(crate) fn energy_range_ev(&self) -> (f64, f64) {
        (
            self.energies_ev[0],
            self.energies_ev[self.energies_ev.len() - 1],
        )
    }

    /// `(f1, f2)` at `energy_ev`, or `None` outside the tabulated range.
    pub(crate) fn anomalous_factors(&self, energy_ev: f64) -> Option<(f64, f64)> {
        let (lower, upper) = self.energy_range_ev();
        if !energy_ev.is_finite() || energy_ev < lower || energy_ev > upper {
            return None;
        }

        let segment = match self
            .energies_ev
            .binary_search_by(|probe| probe.total_cmp(&energy_ev))
        {
            Ok(index) => return Some((self.f1[index], self.f2[index])),
            Err(insertion) => insertion - 1,
        };

        let e0 = self.energies_ev[segment];
        let e1 = self.energies_ev[segment + 1];
        let fraction = (energy_ev - e0) / (e1 - e0);

        let f1 = self.f1[segment] + fraction * (self.f1[segment + 1] - self.f1[segment]);

        let log_fraction = (energy_ev.ln() - e0.ln()) / (e1.ln() - e0.ln());
        let f2 = (self.f2[segment].ln()
            + log_fraction * (self.f2[segment + 1].ln() - self.f2[segment].ln()))
        .exp();

        Some((f1, f2))
    }
}

pub(crate) fn table_for_material(symbol: &str) -> Option<&'static ScatteringTable> {
    TABLES
        .iter()
        .find(|table| table.symbol.eq_ignore_ascii_case(symbol.trim()))
}

static TABLES: [ScatteringTable; 1] = [PLATINUM];

// Platinum (Z = 78). Edge structure retained at the M edges (~2.1-3.3 keV),
// the L edges (11.56, 13.27, 13.88 keV) and the K edge (78.4 keV).
const PLATINUM: ScatteringTable = ScatteringTable {
    symbol: "Pt",
    energies_ev: &[
        90.0, 120.0, 160.0, 220.0, 300.0, 400.0, 550.0, 750.0, 1_000.0, 1_400.0, 1_900.0,
        2_100.0, 2_150.0, 2_800.0, 3_300.0, 4_500.0, 6_000.0, 8_000.0, 10_000.0, 11_000.0,
        11_560.0, 11_600.0, 12_500.0, 13_270.0, 13_300.0, 13_880.0, 13_900.0, 15_000.0,
        17_000.0, 20_000.0, 24_000.0, 29_000.0, 35_000.0, 42_000.0, 50_000.0, 60_000.0,
        70_000.0, 78_390.0, 78_400.0, 85_000.0, 100_000.0, 110_000.0,
    ],
    f1: &[
        10.2, 12.1, 14.6, 17.1, 19.2, 21.6, 24.1, 27.2, 30.6, 35.1, 40.2, 42.0, 41.2, 46.1,
        50.2, 56.3, 61.2, 65.6, 68.5, 69.4, 64.1, 63.6, 67.2, 65.6, 65.1, 66.0, 65.8, 69.1,
        71.2, 73.1, 74.6, 75.6, 76.3, 76.8, 77.1, 77.3, 77.4, 74.1, 73.6, 76.0, 77.0, 77.2,
    ],
    f2: &[
        12.1, 14.4, 16.2, 17.6, 18.6, 19.4, 20.1, 20.6, 21.0, 20.1, 18.0, 16.6, 22.1, 19.4,
        17.1, 13.0, 9.6, 6.8, 5.2, 4.6, 4.3, 9.8, 9.0, 8.6, 11.2, 10.8, 12.1, 10.9, 9.2, 7.3,
        5.6, 4.2, 3.1, 2.3, 1.7, 1.25, 0.95, 0.78, 4.3, 3.9, 3.2, 2.9,
    ],
};
