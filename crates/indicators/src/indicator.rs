//! World Bank indicator catalog and display formatting.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::error::{IndicatorError, Result};

/// Indicators shown on the country dashboard. The static string of each
/// variant is its World Bank series code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
pub enum Indicator {
    #[strum(serialize = "SP.POP.TOTL")]
    Population,
    #[strum(serialize = "SP.POP.GROW")]
    PopulationGrowth,
    #[strum(serialize = "SP.DYN.LE00.IN")]
    LifeExpectancy,
    #[strum(serialize = "SE.ADT.LITR.ZS")]
    AdultLiteracyRate,
    #[strum(serialize = "EN.ATM.CO2E.PC")]
    Co2Emissions,
    #[strum(serialize = "AG.LND.FRST.ZS")]
    ForestArea,
    #[strum(serialize = "EG.ELC.ACCS.ZS")]
    AccessToElectricity,
    #[strum(serialize = "SL.UEM.TOTL.ZS")]
    UnemploymentRate,
    #[strum(serialize = "NY.GDP.MKTP.CD")]
    Gdp,
    #[strum(serialize = "NY.GDP.PCAP.CD")]
    GdpPerCapita,
    #[strum(serialize = "NY.GDP.MKTP.KD.ZG")]
    GdpGrowth,
    #[strum(serialize = "NY.GNP.PCAP.CD")]
    GniPerCapita,
    #[strum(serialize = "FP.CPI.TOTL.ZG")]
    Inflation,
    #[strum(serialize = "NE.RSB.GNFS.ZS")]
    TradeBalance,
}

impl Indicator {
    pub fn all() -> impl Iterator<Item = Indicator> {
        Indicator::iter()
    }

    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn from_code(code: &str) -> Result<Self> {
        Indicator::iter()
            .find(|i| i.code() == code)
            .ok_or_else(|| IndicatorError::UnknownIndicator(code.to_string()))
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Population => "Population",
            Indicator::PopulationGrowth => "Population Growth",
            Indicator::LifeExpectancy => "Life Expectancy",
            Indicator::AdultLiteracyRate => "Adult Literacy Rate",
            Indicator::Co2Emissions => "CO2 Emissions",
            Indicator::ForestArea => "Forest Area",
            Indicator::AccessToElectricity => "Access to Electricity",
            Indicator::UnemploymentRate => "Unemployment Rate",
            Indicator::Gdp => "GDP",
            Indicator::GdpPerCapita => "GDP Per Capita",
            Indicator::GdpGrowth => "GDP Growth",
            Indicator::GniPerCapita => "GNI Per Capita",
            Indicator::Inflation => "Inflation",
            Indicator::TradeBalance => "Trade Balance",
        }
    }

    /// Render a raw series value with this indicator's unit.
    pub fn format_value(self, value: f64) -> String {
        match self {
            Indicator::Population => format_number(value, 0),
            Indicator::PopulationGrowth
            | Indicator::GdpGrowth
            | Indicator::Inflation => format!("{}%", format_number(value, 2)),
            Indicator::LifeExpectancy => format!("{} years", format_number(value, 1)),
            Indicator::AdultLiteracyRate => format!("{}%", format_number(value, 1)),
            Indicator::Co2Emissions => {
                format!("{} metric tons per capita", format_number(value, 2))
            }
            Indicator::ForestArea => format!("{}% of land area", format_number(value, 2)),
            Indicator::AccessToElectricity => {
                format!("{}% of population", format_number(value, 2))
            }
            Indicator::UnemploymentRate => format!("{}%", format_number(value, 3)),
            Indicator::Gdp => format!("${} billion", format_number(value / 1e9, 2)),
            Indicator::GdpPerCapita => format!("${}", format_number(value, 2)),
            Indicator::GniPerCapita => format!("${}", format_number(value, 0)),
            Indicator::TradeBalance => format!("{}% of GDP", format_number(value, 2)),
        }
    }
}

/// Fixed-precision number with thousands separators. Magnitudes of a
/// million or more are scaled down and suffixed.
pub fn format_number(value: f64, decimals: usize) -> String {
    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{} billion", group_thousands(value / 1e9, decimals))
    } else if magnitude >= 1e6 {
        format!("{} million", group_thousands(value / 1e6, decimals))
    } else {
        group_thousands(value, decimals)
    }
}

fn group_thousands(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 {
        out.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}
