//! Display helpers for the selection card and group listings.

use crate::catalog::Group;
use crate::types::Item;
use serde::Serialize;
use std::fmt;

/// Everything the selection card shows for a chosen item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    /// Banner line, e.g. "You selected 嘻豆-黑白豆".
    pub message: String,
    pub title: String,
    pub price: String,
    pub description: String,
    pub image: String,
    pub qr_image: String,
}

impl SelectionSummary {
    pub fn from_item(item: &Item) -> Self {
        Self {
            message: format!("You selected {}", item.title),
            title: item.title.clone(),
            price: item.subtitle.clone(),
            description: item.description.clone(),
            image: item.image.clone(),
            qr_image: item.secondary_image.clone(),
        }
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f)?;
        writeln!(f, "  {}  {}", self.title, self.price)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        writeln!(f, "  image: {}", self.image)?;
        write!(f, "  qr:    {}", self.qr_image)
    }
}

/// One row of a group listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub item_count: usize,
    pub top_count: usize,
}

impl GroupSummary {
    pub fn from_group(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            title: group.title.clone(),
            subtitle: group.subtitle.clone(),
            item_count: group.len(),
            top_count: group.top_items().len(),
        }
    }
}

impl fmt::Display for GroupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<10} {:<20} {:>3} items ({} shown)",
            self.id, self.title, self.item_count, self.top_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_summary_fields() {
        let mut item = Item::new("g0-1", "嘻豆-黑白豆", "NT$ 130");
        item.image = "http://example.test/t5.jpg".into();
        item.secondary_image = "http://example.test/qr?data=1571".into();
        let summary = SelectionSummary::from_item(&item);
        assert_eq!(summary.message, "You selected 嘻豆-黑白豆");
        assert_eq!(summary.price, "NT$ 130");
        assert_eq!(summary.qr_image, "http://example.test/qr?data=1571");

        let card = summary.to_string();
        assert!(card.starts_with("You selected"));
        assert!(card.contains("qr:    http://example.test/qr?data=1571"));
        // Empty description line is skipped.
        assert_eq!(card.lines().count(), 5);
    }

    #[test]
    fn test_group_summary_counts() {
        let mut group = Group::new("g", "Snacks");
        for i in 0..14 {
            group.push(Item::new(format!("i{i}"), "t", "s")).unwrap();
        }
        let summary = GroupSummary::from_group(&group);
        assert_eq!(summary.item_count, 14);
        assert_eq!(summary.top_count, 12);
        assert!(summary.to_string().contains("(12 shown)"));
    }
}
