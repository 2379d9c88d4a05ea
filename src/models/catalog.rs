//! Vocabulary catalog: a fixed, ordered list of items the scheduler enumerates.
//! The scheduler only reads ids from here; text and category are for display.
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabItem {
    pub id: String,
    pub text: String,
    pub category: String,
}

impl VocabItem {
    pub fn new(id: &str, text: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            category: category.to_string(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    pub items: Vec<VocabItem>,
}

impl Catalog {
    pub fn new(items: Vec<VocabItem>) -> Self {
        Self { items }
    }

    pub fn get(&self, id: &str) -> Option<&VocabItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Category tags in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for item in &self.items {
            if !categories.contains(&item.category.as_str()) {
                categories.push(&item.category);
            }
        }
        categories
    }

    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a VocabItem> {
        self.items.iter().filter(move |item| item.category == category)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Small built-in set used when no catalog file is given.
    pub fn sample() -> Self {
        Self::new(vec![
            VocabItem::new("你好", "nǐ hǎo - hello", "greetings"),
            VocabItem::new("谢谢", "xièxie - thank you", "greetings"),
            VocabItem::new("再见", "zàijiàn - goodbye", "greetings"),
            VocabItem::new("一", "yī - one", "numbers"),
            VocabItem::new("二", "èr - two", "numbers"),
            VocabItem::new("三", "sān - three", "numbers"),
            VocabItem::new("水", "shuǐ - water", "food"),
            VocabItem::new("茶", "chá - tea", "food"),
            VocabItem::new("米饭", "mǐfàn - cooked rice", "food"),
        ])
    }
}
