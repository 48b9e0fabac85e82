//! Filtered and paginated catalogues of designers and companies
//!
//! A [`Catalogue`] combines three inputs: the cached entity list of a
//! [`RemoteSource`], the active [`Facet`] (at most one) and a 1-based page
//! cursor. Selecting or clearing a filter always brings the cursor back to page 1.
//!
//! ```no_run
//! use plateforme_client::Plateforme;
//! use plateforme_client::catalogue::DesignerFacet;
//! use plateforme_client::scope::Scope;
//!
//! # async fn run() -> Result<(), plateforme_client::error::Error> {
//! let client = Plateforme::new("http://localhost:8080/api")?;
//! let catalogue = client.designer_catalogue();
//! catalogue.load(client.designers()).await?;
//!
//! let mut scope = Scope::new();
//! let view = catalogue.bind(&mut scope);
//! catalogue.research(DesignerFacet::Country("France".to_string()));
//! println!("{} designers in France", view.get().total);
//! # Ok(())
//! # }
//! ```

mod filter;
mod pagination;

use async_trait::async_trait;

use crate::error::Error;
use crate::scope::Scope;
use crate::store::{Store, StoreView};

pub use filter::*;
pub use pagination::*;

/// Remote list the catalogue is built from
#[async_trait]
pub trait RemoteSource: Send + Sync {
    type Item: Clone + Send + Sync + 'static;

    /// Fetch every entity and publish them into the cache
    async fn fetch_all(&self) -> Result<Vec<Self::Item>, Error>;

    /// The cached list
    fn cache(&self) -> StoreView<Vec<Self::Item>>;
}

/// One rendered state of a catalogue
#[derive(Clone)]
pub struct CatalogueView<F: Facet> {
    /// Entities of the current page
    pub items: Vec<F::Entity>,
    /// Current page, 1-based
    pub page: usize,
    pub max_page: usize,
    /// Number of entities passing the filter
    pub total: usize,
    pub criteria: Option<F>,
}

/// Entities passing `criteria`; everything when there is no filter
pub fn apply_filter<F: Facet>(items: &[F::Entity], criteria: Option<&F>) -> Vec<F::Entity> {
    match criteria {
        Some(facet) => items.iter().filter(|e| facet.matches(e)).cloned().collect(),
        None => items.to_vec(),
    }
}

fn render<F: Facet>(
    pagination: Pagination,
    items: &[F::Entity],
    criteria: Option<F>,
    page: usize,
) -> CatalogueView<F> {
    let filtered = apply_filter::<F>(items, criteria.as_ref());
    CatalogueView {
        items: pagination.slice(&filtered, page).to_vec(),
        page,
        max_page: pagination.max_page(filtered.len()),
        total: filtered.len(),
        criteria,
    }
}

/// Filter criteria and page cursor over a cached entity list
#[derive(Clone)]
pub struct Catalogue<F: Facet> {
    source: StoreView<Vec<F::Entity>>,
    criteria: Store<Option<F>>,
    page: Store<usize>,
    pagination: Pagination,
}

impl<F: Facet> Catalogue<F> {
    pub fn new(source: StoreView<Vec<F::Entity>>, page_size: usize) -> Self {
        Self {
            source,
            criteria: Store::new(None),
            page: Store::new(1),
            pagination: Pagination::new(page_size),
        }
    }

    /// Catalogue over the cache of `source`
    pub fn from_source<S>(source: &S, page_size: usize) -> Self
    where
        S: RemoteSource<Item = F::Entity>,
    {
        Self::new(source.cache(), page_size)
    }

    /// Refresh the cached list from `source`, which must own the cache this
    /// catalogue reads
    pub async fn load<S>(&self, source: &S) -> Result<usize, Error>
    where
        S: RemoteSource<Item = F::Entity>,
    {
        if !source.cache().same_store(&self.source) {
            return Err(Error::general("catalogue is not built on this source"));
        }
        let items = source.fetch_all().await?;
        Ok(items.len())
    }

    /// Apply `facet`, replacing any previous filter, and go back to page 1
    pub fn research(&self, facet: F) {
        self.criteria.publish(Some(facet));
        self.page.publish(1);
    }

    /// Apply a filter given as strings; an unknown category is rejected and
    /// leaves the current filter untouched
    pub fn research_str(&self, category: &str, item: &str) -> Result<(), Error> {
        let facet = F::parse(category, item).map_err(crate::forms::ValidationErrors::from)?;
        self.research(facet);
        Ok(())
    }

    /// Clear the filter and go back to page 1
    pub fn reset_research(&self) {
        self.criteria.publish(None);
        self.page.publish(1);
    }

    /// Move forward one page, stopping at the last one
    pub fn next_page(&self) {
        let max_page = self.max_page();
        self.page.update(|page| {
            if *page < max_page {
                *page += 1;
            }
        });
    }

    /// Move back one page, stopping at the first one
    pub fn prev_page(&self) {
        self.page.update(|page| {
            if *page > 1 {
                *page -= 1;
            }
        });
    }

    /// Jump to `page`, clamped to the available pages
    pub fn go_to_page(&self, page: usize) {
        let len = self.filtered().len();
        self.page.publish(self.pagination.clamp(page, len));
    }

    pub fn criteria(&self) -> Option<F> {
        self.criteria.get()
    }

    pub fn current_page(&self) -> usize {
        self.page.get()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    /// Every entity passing the active filter
    pub fn filtered(&self) -> Vec<F::Entity> {
        let criteria = self.criteria.get();
        self.source
            .with(|items| apply_filter::<F>(items, criteria.as_ref()))
    }

    pub fn max_page(&self) -> usize {
        self.pagination.max_page(self.filtered().len())
    }

    /// Entities of the current page
    pub fn page_items(&self) -> Vec<F::Entity> {
        self.snapshot().items
    }

    /// Current state computed from the latest inputs
    pub fn snapshot(&self) -> CatalogueView<F> {
        let criteria = self.criteria.get();
        let page = self.page.get();
        self.source
            .with(|items| render::<F>(self.pagination, items, criteria, page))
    }

    /// Distinct trimmed values present for `kind`, in first-seen order
    pub fn facet_options(&self, kind: F::Kind) -> Vec<String> {
        self.source.with(|items| {
            let mut options: Vec<String> = Vec::new();
            for value in items.iter().flat_map(|entity| F::values(kind, entity)) {
                let value = value.trim();
                if !value.is_empty() && !options.iter().any(|o| o == value) {
                    options.push(value.to_string());
                }
            }
            options
        })
    }

    /// Send the cursor back to page 1 when it lies past the last page.
    ///
    /// The check runs under the page lock against the live filter and list, so
    /// a page published after a filter change is never judged against the old
    /// filter.
    fn settle_page(&self) -> bool {
        self.page.update_if(|page| {
            let max_page = self.pagination.max_page(self.filtered().len());
            if *page > max_page {
                *page = 1;
                true
            } else {
                false
            }
        })
    }

    /// Keep a derived view up to date for as long as `scope` lives.
    ///
    /// Any change of the source list, filter or page recomputes the view from
    /// the latest values of all three. When the list shrinks under the current
    /// page, the cursor goes back to page 1.
    pub fn bind(&self, scope: &mut Scope) -> StoreView<CatalogueView<F>> {
        let out = Store::new(self.snapshot());
        let sink = out.clone();
        let catalogue = self.clone();
        let mut items_rx = self.source.subscribe();
        let mut criteria_rx = self.criteria.subscribe();
        let mut page_rx = self.page.subscribe();

        scope.spawn(async move {
            loop {
                tokio::select! {
                    next = items_rx.next() => if next.is_none() { break },
                    next = criteria_rx.next() => if next.is_none() { break },
                    next = page_rx.next() => if next.is_none() { break },
                }

                if catalogue.settle_page() {
                    // the reset wakes this task again through the page store
                    continue;
                }
                sink.publish(catalogue.snapshot());
            }
        });

        out.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designers::Designer;
    use std::time::Duration;

    fn designers(n: usize) -> Vec<Designer> {
        (0..n)
            .map(|i| Designer {
                id: i.to_string(),
                profession: if i % 2 == 0 { "Architect" } else { "Illustrator" }.to_string(),
                country_of_residence: if i < 10 { "france " } else { "Italy" }.to_string(),
                specialties: vec![format!("spec{}", i % 3)],
                ..Default::default()
            })
            .collect()
    }

    fn catalogue(n: usize) -> (Store<Vec<Designer>>, Catalogue<DesignerFacet>) {
        let source = Store::new(designers(n));
        let catalogue = Catalogue::new(source.view(), 50);
        (source, catalogue)
    }

    fn ids(items: &[Designer]) -> Vec<usize> {
        items.iter().map(|d| d.id.parse().unwrap()).collect()
    }

    #[test]
    fn pages_of_a_hundred_twenty() {
        let (_source, catalogue) = catalogue(120);
        assert_eq!(catalogue.max_page(), 3);
        assert_eq!(ids(&catalogue.page_items()), (0..50).collect::<Vec<_>>());

        catalogue.go_to_page(3);
        assert_eq!(ids(&catalogue.page_items()), (100..120).collect::<Vec<_>>());
    }

    #[test]
    fn filter_then_clear_restores_list_and_page() {
        let (source, catalogue) = catalogue(120);
        catalogue.go_to_page(2);

        catalogue.research(DesignerFacet::Country("France".to_string()));
        assert_eq!(catalogue.current_page(), 1);
        assert_eq!(catalogue.filtered().len(), 10);

        catalogue.go_to_page(3);
        catalogue.reset_research();
        assert_eq!(catalogue.current_page(), 1);
        assert_eq!(catalogue.filtered(), source.get());
    }

    #[test]
    fn selecting_a_filter_always_resets_page() {
        let (_source, catalogue) = catalogue(120);
        for page in 1..=3 {
            catalogue.go_to_page(page);
            catalogue.research(DesignerFacet::Profession("architect".to_string()));
            assert_eq!(catalogue.current_page(), 1);
            catalogue.reset_research();
        }
    }

    #[test]
    fn new_filter_replaces_old_one() {
        let (_source, catalogue) = catalogue(120);
        catalogue.research(DesignerFacet::Country("France".to_string()));
        catalogue.research(DesignerFacet::Specialty("spec0".to_string()));
        assert_eq!(catalogue.filtered().len(), 40);
    }

    #[test]
    fn paging_stays_in_bounds() {
        let (_source, catalogue) = catalogue(60);
        catalogue.prev_page();
        assert_eq!(catalogue.current_page(), 1);
        catalogue.next_page();
        catalogue.next_page();
        assert_eq!(catalogue.current_page(), 2);
        catalogue.go_to_page(40);
        assert_eq!(catalogue.current_page(), 2);
    }

    #[test]
    fn unknown_category_keeps_current_filter() {
        let (_source, catalogue) = catalogue(20);
        catalogue.research_str("country", "Italy").unwrap();
        assert!(catalogue.research_str("planet", "Mars").is_err());
        assert_eq!(
            catalogue.criteria(),
            Some(DesignerFacet::Country("Italy".to_string()))
        );
    }

    #[test]
    fn empty_result_is_an_empty_page() {
        let (_source, catalogue) = catalogue(20);
        catalogue.research(DesignerFacet::Country("Peru".to_string()));
        assert!(catalogue.page_items().is_empty());
        assert_eq!(catalogue.max_page(), 1);
    }

    #[test]
    fn facet_options_are_unique_and_trimmed() {
        let (_source, catalogue) = catalogue(20);
        assert_eq!(
            catalogue.facet_options(DesignerFacetKind::Country),
            vec!["france".to_string(), "Italy".to_string()]
        );
        assert_eq!(catalogue.facet_options(DesignerFacetKind::Specialty).len(), 3);
    }

    #[tokio::test]
    async fn bound_view_follows_latest_inputs() {
        let (source, catalogue) = catalogue(120);
        let mut scope = Scope::new();
        let view = catalogue.bind(&mut scope);
        assert_eq!(view.get().max_page, 3);

        catalogue.go_to_page(3);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(view.get().items.len(), 20);

        // the list shrinks under page 3
        source.publish(designers(30));
        tokio::time::sleep(Duration::from_millis(50)).await;
        let current = view.get();
        assert_eq!(current.page, 1);
        assert_eq!(current.total, 30);
        assert_eq!(catalogue.current_page(), 1);

        scope.close().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn bound_view_keeps_page_chosen_after_filter_change() {
        for _ in 0..50 {
            let (_source, catalogue) = catalogue(120);
            catalogue.research(DesignerFacet::Country("France".to_string()));
            let mut scope = Scope::new();
            let view = catalogue.bind(&mut scope);
            tokio::time::sleep(Duration::from_millis(5)).await;

            catalogue.research(DesignerFacet::Country("Italy".to_string()));
            catalogue.go_to_page(2);
            assert_eq!(catalogue.current_page(), 2);

            tokio::time::sleep(Duration::from_millis(10)).await;
            assert_eq!(catalogue.current_page(), 2);
            assert_eq!(view.get().page, 2);
            assert_eq!(view.get().total, 110);

            scope.close().await;
        }
    }

    struct FixedSource {
        items: Store<Vec<Designer>>,
    }

    #[async_trait]
    impl RemoteSource for FixedSource {
        type Item = Designer;

        async fn fetch_all(&self) -> Result<Vec<Designer>, Error> {
            let items = designers(3);
            self.items.publish(items.clone());
            Ok(items)
        }

        fn cache(&self) -> StoreView<Vec<Designer>> {
            self.items.view()
        }
    }

    #[tokio::test]
    async fn load_only_accepts_own_source() {
        let own = FixedSource {
            items: Store::new(Vec::new()),
        };
        let other = FixedSource {
            items: Store::new(Vec::new()),
        };
        let catalogue: Catalogue<DesignerFacet> = Catalogue::from_source(&own, 50);

        assert!(catalogue.load(&other).await.is_err());
        assert!(other.items.get().is_empty());

        assert_eq!(catalogue.load(&own).await.unwrap(), 3);
        assert_eq!(catalogue.filtered().len(), 3);
    }
}
