//! Fixed menus the feed draws from.

use kds_schemas::{NewOrder, Platform, Priority, Station};
use rand::seq::SliceRandom;
use rand::Rng;

pub const CUSTOMERS: &[&str] = &[
    "Arjun Sharma",
    "Kavya Patel",
    "Rohit Kumar",
    "Ananya Singh",
    "Vikram Gupta",
];

/// Item combos and the station that cooks them.
pub const DISHES: &[(&[&str], Station)] = &[
    (&["Paneer Tikka", "Naan"], Station::Tandoor),
    (&["Pasta Arrabiata", "Garlic Bread"], Station::Pizza),
    (&["Chicken Burger", "Fries"], Station::Grill),
    (&["Mutton Biryani", "Raita"], Station::Curry),
    (&["Margherita Pizza"], Station::Pizza),
];

pub const PLATFORMS: &[Platform] = &[Platform::Swiggy, Platform::Zomato, Platform::Direct];

/// Totals are drawn from `[MIN_TOTAL, MAX_TOTAL)`.
pub const MIN_TOTAL: i64 = 200;
pub const MAX_TOTAL: i64 = 500;

/// Draw one order from the menus.
pub fn random_order(rng: &mut impl Rng, prep_secs: i64, urgent_probability: f64) -> NewOrder {
    let customer = CUSTOMERS.choose(rng).copied().unwrap_or(CUSTOMERS[0]);
    let (items, station) = DISHES.choose(rng).copied().unwrap_or(DISHES[0]);
    let platform = PLATFORMS.choose(rng).copied().unwrap_or(Platform::Direct);
    let total = rng.gen_range(MIN_TOTAL..MAX_TOTAL);
    let priority = if rng.gen_bool(urgent_probability) {
        Priority::Urgent
    } else {
        Priority::Normal
    };

    NewOrder::new(customer, items.iter().copied(), total, station, platform)
        .with_priority(priority)
        .due_in(prep_secs)
}
