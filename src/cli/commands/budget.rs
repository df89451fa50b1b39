use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::budget::BudgetLogic;
use crate::db::pool::DbPool;
use crate::db::trips;
use crate::errors::AppResult;
use crate::ui::messages::{info, trip_header};
use crate::utils::formatting::bold;
use crate::utils::money::format_amount_with;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Budget { trip } = cmd else {
        return Ok(());
    };

    let pool = DbPool::new(&cfg.database)?;

    let t = trips::get_trip(&pool.conn, *trip)?;
    let report = BudgetLogic::report(&pool.conn, *trip)?;

    trip_header(&t.title, &format!("{} -> {}", t.start_str(), t.end_str()));

    if report.stays.is_empty() && report.categories.is_empty() {
        info("Nothing budgeted yet for this trip.");
        return Ok(());
    }

    if !report.stays.is_empty() {
        println!("\n{}", bold("Stays"));
        let mut table = Table::auto(&["Stay", "Nights", "Cost", ""]);
        for s in &report.stays {
            let flag = if s.unmatched {
                "(no matching item)".to_string()
            } else {
                String::new()
            };
            table.add_row(vec![
                s.name.clone(),
                s.nights.to_string(),
                format_amount_with(s.cost, &cfg.currency),
                flag,
            ]);
        }
        print!("{}", table.render());
    }

    if !report.categories.is_empty() {
        println!("\n{}", bold("Spending by category"));
        let mut table = Table::auto(&["Category", "Items", "Total"]);
        for c in &report.categories {
            table.add_row(vec![
                c.category.label().to_string(),
                c.items.to_string(),
                format_amount_with(c.total, &cfg.currency),
            ]);
        }
        print!("{}", table.render());
    }

    println!(
        "\n{} {}",
        bold("Grand total:"),
        format_amount_with(report.grand_total, &cfg.currency)
    );
    Ok(())
}
