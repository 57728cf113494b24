//! Editable item candidates coming out of receipt extraction.
//!
//! Candidates live apart from the line-item store until the user commits
//! them; prices are kept as the raw text being edited.

use crate::{EngineError, ExtractedItem, ItemId, LineItem, MoneyCents, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateItem {
    pub id: ItemId,
    pub name: String,
    pub price: String,
    pub is_editing: bool,
}

impl CandidateItem {
    fn from_extracted(item: ExtractedItem) -> Self {
        let price = MoneyCents::from_major(item.price)
            .map(|p| p.to_string())
            .unwrap_or_else(|_| item.price.to_string());
        Self {
            id: ItemId::new(),
            name: item.name,
            price,
            is_editing: false,
        }
    }

    /// Parses the candidate into an unsplit line item, keeping its id.
    pub fn to_line_item(&self) -> ResultEngine<LineItem> {
        let price: MoneyCents = self.price.parse().map_err(|_| {
            EngineError::InvalidInput(format!(
                "invalid price \"{}\" for item \"{}\"",
                self.price, self.name
            ))
        })?;
        LineItem::with_id(self.id, &self.name, price)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CandidateList {
    items: Vec<CandidateItem>,
}

impl CandidateList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_extracted(items: Vec<ExtractedItem>) -> Self {
        Self {
            items: items.into_iter().map(CandidateItem::from_extracted).collect(),
        }
    }

    fn require_mut(&mut self, id: ItemId) -> ResultEngine<&mut CandidateItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| EngineError::KeyNotFound(id.to_string()))
    }

    pub fn update_name(&mut self, id: ItemId, name: &str) -> ResultEngine<()> {
        self.require_mut(id)?.name = name.to_string();
        Ok(())
    }

    pub fn update_price(&mut self, id: ItemId, price: &str) -> ResultEngine<()> {
        self.require_mut(id)?.price = price.to_string();
        Ok(())
    }

    pub fn start_editing(&mut self, id: ItemId) -> ResultEngine<()> {
        self.require_mut(id)?.is_editing = true;
        Ok(())
    }

    pub fn finish_editing(&mut self, id: ItemId) -> ResultEngine<()> {
        self.require_mut(id)?.is_editing = false;
        Ok(())
    }

    pub fn remove(&mut self, id: ItemId) -> ResultEngine<CandidateItem> {
        match self.items.iter().position(|item| item.id == id) {
            Some(index) => Ok(self.items.remove(index)),
            None => Err(EngineError::KeyNotFound(id.to_string())),
        }
    }

    /// Converts every candidate, failing on the first invalid one.
    pub fn to_line_items(&self) -> ResultEngine<Vec<LineItem>> {
        self.items.iter().map(CandidateItem::to_line_item).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CandidateItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(name: &str, price: f64) -> ExtractedItem {
        ExtractedItem {
            name: name.to_string(),
            price,
        }
    }

    #[test]
    fn prices_become_two_decimal_text() {
        let list = CandidateList::from_extracted(vec![
            extracted("Noodles", 120.0),
            extracted("Tea", 0.1 + 0.2),
        ]);
        let prices: Vec<_> = list.as_slice().iter().map(|c| c.price.as_str()).collect();
        assert_eq!(prices, vec!["120.00", "0.30"]);
        assert!(list.as_slice().iter().all(|c| !c.is_editing));
    }

    #[test]
    fn edits_apply_to_one_candidate() {
        let mut list =
            CandidateList::from_extracted(vec![extracted("Noodle", 1.0), extracted("Tea", 2.0)]);
        let id = list.as_slice()[0].id;
        list.start_editing(id).unwrap();
        list.update_name(id, "Noodles").unwrap();
        list.update_price(id, "1,50").unwrap();
        list.finish_editing(id).unwrap();

        let items = list.to_line_items().unwrap();
        assert_eq!(items[0].id, id);
        assert_eq!(items[0].name, "Noodles");
        assert_eq!(items[0].price.cents(), 150);
        assert_eq!(items[1].price.cents(), 200);
    }

    #[test]
    fn invalid_price_fails_conversion() {
        let mut list = CandidateList::from_extracted(vec![extracted("Tea", 2.0)]);
        let id = list.as_slice()[0].id;
        list.update_price(id, "two").unwrap();
        assert_eq!(
            list.to_line_items(),
            Err(EngineError::InvalidInput(
                "invalid price \"two\" for item \"Tea\"".to_string()
            ))
        );
    }

    #[test]
    fn remove_unknown_candidate() {
        let mut list = CandidateList::new();
        assert!(matches!(
            list.remove(ItemId::new()),
            Err(EngineError::KeyNotFound(_))
        ));
    }
}
