use kds_schemas::{Order, Station};

/// Read-only snapshot of the active orders, optionally narrowed to one station.
///
/// Filtering is applied lazily on each call to [`OrderView::iter`], and the
/// view can be iterated any number of times. Later store mutations are not
/// reflected; take a fresh view for that.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    orders: Vec<Order>,
    station: Option<Station>,
}

impl OrderView {
    pub(crate) fn new(orders: Vec<Order>, station: Option<Station>) -> Self {
        Self { orders, station }
    }

    pub fn station(&self) -> Option<Station> {
        self.station
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.orders.iter(),
            station: self.station,
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(|o| o.id.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a OrderView {
    type Item = &'a Order;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Order>,
    station: Option<Station>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Order;

    fn next(&mut self) -> Option<Self::Item> {
        let station = self.station;
        self.inner
            .find(|o| station.map_or(true, |s| o.station == s))
    }
}
