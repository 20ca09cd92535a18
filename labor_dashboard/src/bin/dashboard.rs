use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use labor_dashboard::cache::CachedExecutor;
use labor_dashboard::render::{CrossSectionDisplay, WideTableDisplay};
use labor_dashboard::views;
use labor_dashboard::warehouse::FixtureExecutor;
use shared_utils::config::WarehouseConfig;

#[derive(Parser)]
#[command(version, about = "Labor statistics dashboard CLI")]
struct Cli {
    /// JSON file of dataset name -> rows, served as the query results
    #[arg(long, value_name = "FILE")]
    fixture: String,

    /// Warehouse connection settings (TOML); validated and reported, the
    /// live connector itself is not part of this binary
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Also print the view's chart specs as JSON
    #[arg(long)]
    charts: bool,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Annual national CPI by headline category
    CpiAnnual {
        /// First year of the range (defaults to 20 years before the last)
        #[arg(long)]
        start_year: Option<i32>,
        /// Last year of the range
        #[arg(long)]
        end_year: Option<i32>,
    },
    /// Trailing-twelve-month CPI with month-over-month changes
    CpiMonthly,
    /// National JOLTS annual totals
    Jolts,
    /// JOLTS measures by state for one year
    JoltsStates {
        /// Year to compare (defaults to the latest with data)
        #[arg(long)]
        year: Option<i32>,
    },
    /// Metro-area employment for selected industries
    StateMetro {
        /// Comma-separated industry labels
        #[arg(long, value_delimiter = ',')]
        industries: Vec<String>,
        /// Comma-separated metro-area names
        #[arg(long, value_delimiter = ',')]
        areas: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config {
        let cfg = WarehouseConfig::from_file(path)
            .with_context(|| format!("loading warehouse config {path}"))?;
        cfg.password().context("warehouse credentials")?;
        println!("warehouse account: {} ({}/{})", cfg.account, cfg.database, cfg.schema);
    }

    let text = std::fs::read_to_string(&cli.fixture)
        .with_context(|| format!("reading fixture {}", cli.fixture))?;
    let fixture = FixtureExecutor::from_json_str(&text).context("parsing fixture rows")?;
    let mut exec = CachedExecutor::new(fixture);

    match cli.cmd {
        Cmd::CpiAnnual {
            start_year,
            end_year,
        } => {
            let selection = match (start_year, end_year) {
                (Some(start), Some(end)) => Some((start, end)),
                _ => None,
            };
            let view = views::cpi_annual::build(&mut exec, selection)?;
            println!("{}", WideTableDisplay(&view.table));
            if cli.charts {
                println!("{}", serde_json::to_string_pretty(&view.chart)?);
            }
        }
        Cmd::CpiMonthly => {
            let view = views::cpi_monthly::build(&mut exec)?;
            println!("{}", WideTableDisplay(&view.table));
            println!();
            println!("{}", WideTableDisplay(&view.percentages));
            if cli.charts {
                println!("{}", serde_json::to_string_pretty(&view.value_chart)?);
                println!("{}", serde_json::to_string_pretty(&view.percentage_chart)?);
            }
        }
        Cmd::Jolts => {
            let view = views::jolts_national::build(&mut exec)?;
            println!("{}", WideTableDisplay(&view.table));
            if cli.charts {
                println!("{}", serde_json::to_string_pretty(&view.chart)?);
            }
        }
        Cmd::JoltsStates { year } => {
            let year = match year {
                Some(year) => year,
                None => *views::jolts_by_state::available_years(&mut exec)?
                    .last()
                    .context("no state-level JOLTS data in the fixture")?,
            };
            let view = views::jolts_by_state::build(&mut exec, year)?;
            println!("JOLTS by state, {year}");
            println!("{}", CrossSectionDisplay(&view.table));
            if cli.charts {
                for (measure, chart) in &view.charts {
                    println!("-- {measure}");
                    println!("{}", serde_json::to_string_pretty(chart)?);
                }
            }
        }
        Cmd::StateMetro { industries, areas } => {
            let today = chrono::Local::now().date_naive();
            let view = views::state_metro::build(&mut exec, &industries, &areas, today)?;
            for area in &view.areas {
                println!("== {}", area.area);
                for row in &area.rows {
                    println!("{}  {}  {:.1}", row.month, row.industry, row.value);
                }
                if cli.charts {
                    println!("{}", serde_json::to_string_pretty(&area.chart)?);
                }
            }
        }
    }

    Ok(())
}
