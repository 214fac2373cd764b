use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// Host Site selection
// ---------------------------------------------------------------------------

/// The Host Site labels currently ticked in the sidebar.
/// An empty selection means "show nothing", not "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSiteSelection {
    selected: BTreeSet<String>,
}

impl HostSiteSelection {
    /// Every Host Site present in the dataset (the dashboard default).
    pub fn all(dataset: &Dataset) -> Self {
        Self {
            selected: dataset.host_sites.iter().cloned().collect(),
        }
    }

    /// Nothing selected.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn contains(&self, host_site: &str) -> bool {
        self.selected.contains(host_site)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Flip one label in or out of the selection.
    pub fn toggle(&mut self, host_site: &str) {
        if !self.selected.remove(host_site) {
            self.selected.insert(host_site.to_string());
        }
    }
}

impl<S: Into<String>> FromIterator<S> for HostSiteSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Records of a dataset that passed the Host Site filter, in dataset order.
/// Borrows the dataset; nothing is copied or mutated.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Indices into `dataset.records`.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }
}

/// Keep the records whose Host Site is in `selection`.
pub fn filter<'a>(dataset: &'a Dataset, selection: &HostSiteSelection) -> FilteredView<'a> {
    let indices = if selection.len() == dataset.host_sites.len()
        && dataset.host_sites.iter().all(|h| selection.contains(h))
    {
        // everything selected, no filtering needed
        (0..dataset.len()).collect()
    } else {
        dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, rec)| selection.contains(&rec.host_site))
            .map(|(i, _)| i)
            .collect()
    };

    FilteredView { dataset, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::respondent;

    fn sample() -> Dataset {
        Dataset::from_records(vec![
            respondent("Vista", Some("Path")),
            respondent("EarthCorps", Some("Clarity")),
            respondent("Vista", None),
            respondent("Common Threads Farm", Some("Alignment")),
        ])
    }

    #[test]
    fn selecting_everything_keeps_every_row() {
        let ds = sample();
        let view = filter(&ds, &HostSiteSelection::all(&ds));
        assert_eq!(view.len(), ds.len());
        assert_eq!(view.indices(), [0, 1, 2, 3]);
    }

    #[test]
    fn empty_selection_yields_no_rows() {
        let ds = sample();
        let view = filter(&ds, &HostSiteSelection::none());
        assert!(view.is_empty());
        assert_eq!(view.records().count(), 0);
    }

    #[test]
    fn subset_preserves_dataset_order() {
        let ds = sample();
        let selection: HostSiteSelection = ["Vista", "Common Threads Farm"].into_iter().collect();
        let view = filter(&ds, &selection);
        let sites: Vec<&str> = view.records().map(|r| r.host_site.as_str()).collect();
        assert_eq!(sites, ["Vista", "Vista", "Common Threads Farm"]);
    }

    #[test]
    fn labels_absent_from_the_data_select_nothing() {
        let ds = sample();
        let selection: HostSiteSelection = ["Vista", "EarthCorps", "Nowhere"].into_iter().collect();
        assert_eq!(selection.len(), ds.host_sites.len());
        assert_eq!(filter(&ds, &selection).len(), 3);
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut selection = HostSiteSelection::none();
        selection.toggle("Vista");
        assert!(selection.contains("Vista"));
        selection.toggle("Vista");
        assert!(selection.is_empty());
    }
}
