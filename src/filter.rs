use crate::catalog::Product;
use std::time::{Duration, Instant};

pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    category: Option<String>,
}

impl FilterState {
    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.trim().to_lowercase();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category.filter(|value| !value.is_empty());
    }

    pub fn clear(&mut self) {
        self.search.clear();
        self.category = None;
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

/// Pure projection of the catalog through the current filter. The result is
/// always a subset of `catalog`; both filters empty yields the full catalog.
pub fn filter(catalog: &[Product], state: &FilterState) -> Vec<Product> {
    catalog
        .iter()
        .filter(|product| matches_category(product, state) && matches_search(product, state))
        .cloned()
        .collect()
}

fn matches_category(product: &Product, state: &FilterState) -> bool {
    match state.category() {
        Some(category) => product.category.eq_ignore_ascii_case(category),
        None => true,
    }
}

fn matches_search(product: &Product, state: &FilterState) -> bool {
    if state.search().is_empty() {
        return true;
    }
    searchable_text(product).contains(state.search())
}

fn searchable_text(product: &Product) -> String {
    let mut text = format!(
        "{} {} {}",
        product.name, product.brand, product.category
    );
    if let Some(description) = &product.description {
        text.push(' ');
        text.push_str(description);
    }
    text.to_lowercase()
}

/// Cancellable scheduled task for search input: each keystroke supersedes the
/// previous schedule, so only the last value within the quiescence window is
/// ever applied.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn schedule(&mut self, value: String, now: Instant) {
        self.pending = Some((value, now + SEARCH_DEBOUNCE));
    }

    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let fired = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if fired {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::{filter, Debouncer, FilterState, SEARCH_DEBOUNCE};
    use crate::catalog::Product;
    use std::time::{Duration, Instant};

    fn product(id: u32, name: &str, brand: &str, category: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            brand: brand.to_string(),
            category: category.to_string(),
            image: format!("img/{id}.png"),
            description: None,
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product(1, "Hydrating Cleanser", "CeraVe", "skincare"),
            product(2, "Great Lash Mascara", "Maybelline", "makeup"),
            product(3, "Fructis Shampoo", "Garnier", "haircare"),
        ]
    }

    #[test]
    fn empty_filter_returns_full_catalog() {
        let catalog = catalog();
        let state = FilterState::default();
        assert_eq!(filter(&catalog, &state), catalog);
    }

    #[test]
    fn category_filter_yields_exact_category_matches() {
        let catalog = catalog();
        let mut state = FilterState::default();
        state.set_category(Some("skincare".to_string()));

        let visible = filter(&catalog, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 1);
    }

    #[test]
    fn search_matches_brand_case_insensitively() {
        let catalog = catalog();
        let mut state = FilterState::default();
        state.set_search("cera");

        let visible = filter(&catalog, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].brand, "CeraVe");
    }

    #[test]
    fn search_matches_description_text() {
        let mut catalog = catalog();
        catalog[1].description = Some("Volumizing formula with collagen".to_string());
        let mut state = FilterState::default();
        state.set_search("COLLAGEN");

        let visible = filter(&catalog, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);
    }

    #[test]
    fn filter_output_is_subset_and_idempotent() {
        let catalog = catalog();
        let mut state = FilterState::default();
        state.set_search("a");
        state.set_category(Some("makeup".to_string()));

        let once = filter(&catalog, &state);
        assert!(once.iter().all(|product| catalog.contains(product)));
        assert_eq!(filter(&once, &state), once);
    }

    #[test]
    fn search_text_is_normalized() {
        let mut state = FilterState::default();
        state.set_search("  CeRaVe  ");
        assert_eq!(state.search(), "cerave");
    }

    #[test]
    fn debouncer_fires_after_quiescence() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        debouncer.schedule("cer".to_string(), start);
        assert_eq!(debouncer.poll(start), None);
        assert_eq!(
            debouncer.poll(start + SEARCH_DEBOUNCE),
            Some("cer".to_string())
        );
        assert_eq!(debouncer.poll(start + SEARCH_DEBOUNCE), None);
    }

    #[test]
    fn newer_keystroke_supersedes_pending_value() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();
        let later = start + Duration::from_millis(100);

        debouncer.schedule("cer".to_string(), start);
        debouncer.schedule("cera".to_string(), later);

        // The first deadline passes without firing the stale value.
        assert_eq!(debouncer.poll(start + SEARCH_DEBOUNCE), None);
        assert_eq!(
            debouncer.poll(later + SEARCH_DEBOUNCE),
            Some("cera".to_string())
        );
    }

    #[test]
    fn cancel_drops_pending_value() {
        let mut debouncer = Debouncer::default();
        let start = Instant::now();

        debouncer.schedule("cer".to_string(), start);
        debouncer.cancel();
        assert_eq!(debouncer.poll(start + SEARCH_DEBOUNCE), None);
        assert!(debouncer.next_deadline().is_none());
    }
}
