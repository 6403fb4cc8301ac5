use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a kitchen order.
///
/// ```text
/// New ──► Preparing ──► Ready ──► Dispatched (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Accepted, not yet picked up by a station.
    New,
    /// A station is working on it.
    Preparing,
    /// Packed and waiting for the rider.
    Ready,
    /// Handed over. **Terminal.** Dispatched orders are no longer active.
    Dispatched,
}

impl OrderStatus {
    /// `true` while the order still occupies the kitchen queue.
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Dispatched)
    }

    /// Returns `true` if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Dispatched)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Dispatched => "dispatched",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Display priority. `Ready` is derived from status and cannot be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Normal,
    Urgent,
    Ready,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
            Self::Ready => "ready",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Station
// ---------------------------------------------------------------------------

/// Kitchen sub-line preparing a category of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Station {
    Grill,
    Curry,
    Pizza,
    Tandoor,
    Dessert,
}

impl Station {
    pub const ALL: [Station; 5] = [
        Station::Grill,
        Station::Curry,
        Station::Pizza,
        Station::Tandoor,
        Station::Dessert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Grill => "grill",
            Self::Curry => "curry",
            Self::Pizza => "pizza",
            Self::Tandoor => "tandoor",
            Self::Dessert => "dessert",
        }
    }

    /// Parse a station tab selector. `"all"` means no filter and yields `Ok(None)`.
    pub fn parse_filter(s: &str) -> Result<Option<Station>, UnknownVariant> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(None);
        }
        s.parse().map(Some)
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Station {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Station::ALL
            .iter()
            .copied()
            .find(|st| st.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| UnknownVariant {
                kind: "station",
                value: t.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// Channel the order came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Swiggy,
    Zomato,
    Direct,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Swiggy, Platform::Zomato, Platform::Direct];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Swiggy => "Swiggy",
            Self::Zomato => "Zomato",
            Self::Direct => "Direct",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.as_str().eq_ignore_ascii_case(t))
            .ok_or_else(|| UnknownVariant {
                kind: "platform",
                value: t.to_string(),
            })
    }
}

/// Returned when a station / platform name does not match any variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

// ---------------------------------------------------------------------------
// Order
// ---------------------------------------------------------------------------

/// One customer order as owned by the order store.
///
/// Everything except `status`, `priority` and `overdue` is fixed at creation.
/// Remaining preparation time is never stored; derive it from
/// `(due_in_secs, created_at, now)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: String,
    pub items: Vec<String>,
    /// Minor currency units (paise).
    pub total: i64,
    pub status: OrderStatus,
    pub station: Station,
    pub priority: Priority,
    pub platform: Platform,
    /// Logical seconds.
    pub created_at: i64,
    pub due_in_secs: i64,
    /// Sticky: once set it never clears.
    pub overdue: bool,
}

impl Order {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}

/// Creation input for an order. The store assigns id, status and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub customer: String,
    pub items: Vec<String>,
    pub total: i64,
    pub station: Station,
    pub platform: Platform,
    pub priority: Priority,
    pub due_in_secs: i64,
}

impl NewOrder {
    pub fn new<S, I, T>(
        customer: S,
        items: I,
        total: i64,
        station: Station,
        platform: Platform,
    ) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            customer: customer.into(),
            items: items.into_iter().map(Into::into).collect(),
            total,
            station,
            platform,
            priority: Priority::Normal,
            due_in_secs: 0,
        }
    }

    pub fn urgent(mut self) -> Self {
        self.priority = Priority::Urgent;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_in(mut self, secs: i64) -> Self {
        self.due_in_secs = secs;
        self
    }
}

// ---------------------------------------------------------------------------
// DailyStats
// ---------------------------------------------------------------------------

/// Running aggregates for the service day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStats {
    /// Orders ever created. Never decreases.
    pub total_orders: u64,
    /// Orders in New, Preparing or Ready.
    pub active_orders: u64,
    /// Recognized at creation; dispatch does not touch it.
    pub revenue: i64,
    /// Percentage in `[0, 100]`.
    pub efficiency: f64,
}

impl DailyStats {
    pub fn new(initial_efficiency: f64) -> Self {
        Self {
            total_orders: 0,
            active_orders: 0,
            revenue: 0,
            efficiency: clamp_efficiency(initial_efficiency),
        }
    }
}

impl Default for DailyStats {
    fn default() -> Self {
        Self::new(100.0)
    }
}

pub const EFFICIENCY_MIN: f64 = 0.0;
pub const EFFICIENCY_MAX: f64 = 100.0;

/// Clamp into `[0, 100]`. NaN maps to the lower bound.
pub fn clamp_efficiency(v: f64) -> f64 {
    if v.is_nan() {
        return EFFICIENCY_MIN;
    }
    v.clamp(EFFICIENCY_MIN, EFFICIENCY_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_parse_is_case_insensitive() {
        assert_eq!("Curry".parse::<Station>().unwrap(), Station::Curry);
        assert_eq!(" pizza ".parse::<Station>().unwrap(), Station::Pizza);
        assert!("sushi".parse::<Station>().is_err());
    }

    #[test]
    fn station_filter_all_means_none() {
        assert_eq!(Station::parse_filter("all").unwrap(), None);
        assert_eq!(Station::parse_filter("ALL").unwrap(), None);
        assert_eq!(Station::parse_filter("grill").unwrap(), Some(Station::Grill));
    }

    #[test]
    fn platform_roundtrips_display() {
        for p in Platform::ALL {
            assert_eq!(p.to_string().parse::<Platform>().unwrap(), p);
        }
    }

    #[test]
    fn only_dispatched_is_terminal() {
        assert!(!OrderStatus::New.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
        assert!(OrderStatus::Dispatched.is_terminal());
        assert!(!OrderStatus::Dispatched.is_active());
    }

    #[test]
    fn efficiency_is_clamped() {
        assert_eq!(clamp_efficiency(120.0), 100.0);
        assert_eq!(clamp_efficiency(-3.0), 0.0);
        assert_eq!(clamp_efficiency(f64::NAN), 0.0);
        assert_eq!(DailyStats::new(250.0).efficiency, 100.0);
    }

    #[test]
    fn order_serializes_with_snake_case_enums() {
        let o = Order {
            id: "ORD-001".to_string(),
            customer: "Rahul Sharma".to_string(),
            items: vec!["Butter Chicken".to_string()],
            total: 520,
            status: OrderStatus::Preparing,
            station: Station::Curry,
            priority: Priority::Normal,
            platform: Platform::Swiggy,
            created_at: 0,
            due_in_secs: 480,
            overdue: false,
        };
        let v = serde_json::to_value(&o).unwrap();
        assert_eq!(v["status"], "preparing");
        assert_eq!(v["station"], "curry");
        assert_eq!(v["platform"], "swiggy");
    }
}
