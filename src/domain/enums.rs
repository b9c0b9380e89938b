use serde::{Deserialize, Serialize};

/// How a note body's lines are rendered and toggled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    Text,
    Bullet,
    Checkbox,
}

impl Default for NoteType {
    fn default() -> Self {
        NoteType::Text
    }
}

/// Fixed palette for visual grouping of items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemColor {
    Blue,
    Red,
    Yellow,
    Green,
    Purple,
}

impl Default for ItemColor {
    fn default() -> Self {
        ItemColor::Blue
    }
}

impl ItemColor {
    /// All palette colors, in picker order
    pub fn all() -> &'static [ItemColor] {
        &[
            ItemColor::Blue,
            ItemColor::Red,
            ItemColor::Yellow,
            ItemColor::Green,
            ItemColor::Purple,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemColor::Blue => "blue",
            ItemColor::Red => "red",
            ItemColor::Yellow => "yellow",
            ItemColor::Green => "green",
            ItemColor::Purple => "purple",
        }
    }
}

/// Where a restored item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestoredKind {
    Calendar,
    Archive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_type_wire_names() {
        assert_eq!(serde_json::to_string(&NoteType::Text).unwrap(), "\"text\"");
        assert_eq!(serde_json::to_string(&NoteType::Bullet).unwrap(), "\"bullet\"");
        assert_eq!(
            serde_json::to_string(&NoteType::Checkbox).unwrap(),
            "\"checkbox\""
        );
    }

    #[test]
    fn test_item_color_wire_names_round_trip() {
        for color in ItemColor::all() {
            let json = serde_json::to_string(color).unwrap();
            assert_eq!(json, format!("\"{}\"", color.name()));
            let back: ItemColor = serde_json::from_str(&json).unwrap();
            assert_eq!(back, *color);
        }
    }

    #[test]
    fn test_defaults() {
        assert_eq!(NoteType::default(), NoteType::Text);
        assert_eq!(ItemColor::default(), ItemColor::Blue);
    }

    #[test]
    fn test_restored_kind_wire_names() {
        assert_eq!(
            serde_json::to_string(&RestoredKind::Calendar).unwrap(),
            "\"calendar\""
        );
        assert_eq!(
            serde_json::to_string(&RestoredKind::Archive).unwrap(),
            "\"archive\""
        );
    }
}
