use crate::catalog::Product;

/// The set of products the user has picked. Unique by id; insertion order is
/// kept for the selected-products panel.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    items: Vec<Product>,
}

impl SelectionStore {
    /// Rebuilds a selection from persisted records, dropping duplicate ids.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut store = Self::default();
        for product in products {
            if !store.contains(product.id) {
                store.items.push(product);
            }
        }
        store
    }

    pub fn contains(&self, id: u32) -> bool {
        self.items.iter().any(|product| product.id == id)
    }

    /// Removes the product when present, otherwise adds it. Returns true when
    /// the product was added.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.items.push(product.clone());
            true
        }
    }

    pub fn remove(&mut self, id: u32) {
        self.items.retain(|product| product.id != id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.items
    }
}
