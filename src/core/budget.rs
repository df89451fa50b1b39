use std::collections::HashMap;

use rusqlite::Connection;

use crate::db::{days, schedule};
use crate::errors::AppResult;
use crate::models::{BudgetReport, Category, CategoryTotal, StayLine};

/// Budget assembly for one trip.
pub struct BudgetLogic;

impl BudgetLogic {
    /// Build the report: one line per distinct stay name plus per-category
    /// totals.
    ///
    /// Day rows sharing a stay name collapse into a single line whose
    /// night count is the number of rows. The cost comes from the
    /// accommodation item with the same title; a stay without such an
    /// item costs 0 and is flagged, never an error. Name equality is the
    /// only link between the two tables.
    pub fn report(conn: &Connection, trip_id: i64) -> AppResult<BudgetReport> {
        let infos = days::load_day_infos(conn, trip_id)?;
        let cost_by_name: HashMap<String, i64> = schedule::accommodation_costs(conn, trip_id)?
            .into_iter()
            .collect();

        let mut stays: Vec<StayLine> = Vec::new();
        for info in &infos {
            if info.stay_name.is_empty() {
                continue;
            }
            match stays.iter_mut().find(|s| s.name == info.stay_name) {
                Some(line) => line.nights += 1,
                None => stays.push(StayLine {
                    name: info.stay_name.clone(),
                    nights: 1,
                    cost: 0,
                    unmatched: false,
                }),
            }
        }
        for line in &mut stays {
            match cost_by_name.get(&line.name) {
                Some(c) => line.cost = *c,
                None => line.unmatched = true,
            }
        }

        let mut categories = Vec::new();
        let mut grand_total = 0;
        for (cat, items, total) in schedule::category_totals(conn, trip_id)? {
            grand_total += total;
            categories.push(CategoryTotal {
                category: Category::from_db_str(&cat).unwrap_or(Category::Other),
                items,
                total,
            });
        }

        Ok(BudgetReport {
            stays,
            categories,
            grand_total,
        })
    }
}
