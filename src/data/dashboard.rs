use super::aggregate::{aggregate, AggregateTable};
use super::filter::{filter, HostSiteSelection};
use super::model::{Dataset, Dimension};

/// Everything the dashboard shows for one Host Site selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    /// Respondents passing the filter, whether or not they answered
    /// every charted question.
    pub record_count: usize,
    /// One table per [`Dimension::ALL`] entry, same order.
    pub tables: Vec<AggregateTable>,
}

impl DashboardView {
    #[cfg(test)]
    pub fn table(&self, dimension: Dimension) -> Option<&AggregateTable> {
        self.tables.iter().find(|t| t.dimension == dimension)
    }
}

/// Filter, then aggregate each dimension independently.
pub fn compute(dataset: &Dataset, selection: &HostSiteSelection) -> DashboardView {
    let view = filter(dataset, selection);
    let tables = Dimension::ALL
        .into_iter()
        .map(|dimension| aggregate(view.records(), dimension))
        .collect();

    DashboardView {
        record_count: view.len(),
        tables,
    }
}
