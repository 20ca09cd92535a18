//! Shared fixture rows for the view pipeline tests.

use labor_dashboard::queries::{cpi_variable, dataset};
use labor_dashboard::warehouse::{FixtureExecutor, Row, SqlValue};
use labor_timeseries::pivot::measure;

pub fn monthly_cpi_row(geo_id: &str, variable: &str, product: &str, date: &str, value: f64) -> Row {
    Row::from_pairs([
        ("GEO_ID", SqlValue::Text(geo_id.into())),
        ("GEO_NAME", SqlValue::Text("United States".into())),
        ("VARIABLE", SqlValue::Text(variable.into())),
        ("VARIABLE_NAME", SqlValue::Text(variable.into())),
        ("PRODUCT", SqlValue::Text(product.into())),
        ("VALUE", SqlValue::Float(value)),
        ("LEVEL", SqlValue::Text("Country".into())),
        ("DATE", SqlValue::Text(date.into())),
    ])
}

pub fn state_jolts_row(id: &str, name: &str, m: &str, date: &str, value: f64) -> Row {
    Row::from_pairs([
        ("VARIABLE", SqlValue::Text("v".into())),
        ("VALUE", SqlValue::Float(value)),
        ("DATE", SqlValue::Text(date.into())),
        ("MEASURE", SqlValue::Text(m.into())),
        ("INDUSTRY", SqlValue::Text("Total nonfarm".into())),
        ("ID", SqlValue::Text(id.into())),
        ("GEO_NAME", SqlValue::Text(name.into())),
    ])
}

/// A fixture covering every dataset the monthly CPI pipeline touches:
/// four months of national data for two products, plus a Canadian row the
/// geography filter must discard.
pub fn monthly_cpi_fixture() -> FixtureExecutor {
    let mut rows = Vec::new();
    let months = [
        ("2023-01-01", 100.0, 50.0),
        ("2023-02-01", 102.0, 51.0),
        ("2023-03-01", 104.04, 51.0),
        ("2023-04-01", 104.04, 53.55),
    ];
    for (date, all_items, food) in months {
        rows.push(monthly_cpi_row(
            "country/USA",
            cpi_variable::ALL_ITEMS_MONTHLY,
            "All items",
            date,
            all_items,
        ));
        rows.push(monthly_cpi_row(
            "country/USA",
            cpi_variable::FOOD_MONTHLY,
            "Food",
            date,
            food,
        ));
    }
    rows.push(monthly_cpi_row(
        "country/CAN",
        cpi_variable::ALL_ITEMS_MONTHLY,
        "All items",
        "2023-04-01",
        999.0,
    ));

    FixtureExecutor::new()
        .with_dataset(
            dataset::MAX_EMPLOYMENT_DATE,
            vec![Row::from_pairs([(
                "MAX_DATE",
                SqlValue::Text("2023-04-01".into()),
            )])],
        )
        .with_dataset(dataset::CPI_MONTHLY, rows)
}

/// Two states for one year; Texas has a fetched residual, California only
/// its components.
pub fn state_jolts_fixture() -> FixtureExecutor {
    FixtureExecutor::new().with_dataset(
        dataset::JOLTS_STATE,
        vec![
            state_jolts_row("geography/48", "Texas", measure::TOTAL_SEPARATIONS, "2021-06-01", 100.0),
            state_jolts_row("geography/48", "Texas", measure::QUITS, "2021-06-01", 40.0),
            state_jolts_row(
                "geography/48",
                "Texas",
                measure::LAYOFFS_AND_DISCHARGES,
                "2021-06-01",
                20.0,
            ),
            state_jolts_row(
                "geography/48",
                "Texas",
                measure::OTHER_SEPARATIONS,
                "2021-06-01",
                37.5,
            ),
            state_jolts_row(
                "geography/6",
                "California",
                measure::TOTAL_SEPARATIONS,
                "2021-06-01",
                250.0,
            ),
            state_jolts_row("geography/6", "California", measure::QUITS, "2021-06-01", 130.0),
            state_jolts_row(
                "geography/6",
                "California",
                measure::LAYOFFS_AND_DISCHARGES,
                "2021-06-01",
                70.0,
            ),
        ],
    )
}
