use serde::{Deserialize, Serialize};

pub const CATALOG_SIZE: usize = 100;

const FLOWER_TYPES: [(&str, &str, &str, &str); 10] = [
    ("Rose", "🌹", "#ff6b9d", "Symbol of love and passion"),
    ("Sunflower", "🌻", "#ffd93d", "Bright and cheerful"),
    ("Tulip", "🌷", "#ff6b9d", "Perfect love and elegance"),
    ("Cherry Blossom", "🌸", "#ffb7c5", "Beauty and renewal"),
    ("Hibiscus", "🌺", "#ff1744", "Delicate beauty"),
    ("Blossom", "🌼", "#fff176", "Joy and happiness"),
    ("Lotus", "💮", "#f8bbd0", "Purity and enlightenment"),
    ("Bouquet", "💐", "#ff4081", "Celebration and gratitude"),
    ("Daisy", "🌼", "#ffeb3b", "Innocence and purity"),
    ("Lily", "🌷", "#e91e63", "Devotion and purity"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerType {
    pub name: String,
    pub emoji: String,
    pub color: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowerCard {
    pub id: u32,
    #[serde(flatten)]
    pub flower: FlowerType,
}

/// 卡片按类型循环展开：`cards[i]` 的类型为 `types[i % types.len()]`，id 为 `i + 1`
#[derive(Debug, Clone)]
pub struct Catalog {
    types: Vec<FlowerType>,
    cards: Vec<FlowerCard>,
}

impl Catalog {
    pub fn generate(types: Vec<FlowerType>, size: usize) -> Self {
        let cards = if types.is_empty() {
            Vec::new()
        } else {
            (0..size)
                .map(|i| FlowerCard {
                    id: i as u32 + 1,
                    flower: types[i % types.len()].clone(),
                })
                .collect()
        };

        Self { types, cards }
    }

    pub fn types(&self) -> &[FlowerType] {
        &self.types
    }

    pub fn cards(&self) -> &[FlowerCard] {
        &self.cards
    }

    pub fn get(&self, id: u32) -> Option<&FlowerCard> {
        self.cards.iter().find(|c| c.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let types = FLOWER_TYPES
            .iter()
            .map(|&(name, emoji, color, description)| FlowerType {
                name: name.into(),
                emoji: emoji.into(),
                color: color.into(),
                description: description.into(),
            })
            .collect();

        Self::generate(types, CATALOG_SIZE)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
}

impl<T: Clone> From<&[T]> for ListResponse<T> {
    fn from(items: &[T]) -> Self {
        Self {
            count: items.len(),
            data: items.to_vec(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub data: FlowerCard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_repeats_types_cyclically() {
        let catalog = Catalog::default();
        assert_eq!(catalog.types().len(), 10);
        assert_eq!(catalog.cards().len(), CATALOG_SIZE);

        for (i, card) in catalog.cards().iter().enumerate() {
            assert_eq!(card.id as usize, i + 1);
            assert_eq!(card.flower, catalog.types()[i % 10]);
        }
    }

    #[test]
    fn lookup_by_id_stays_within_range() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(1).unwrap().flower.name, "Rose");
        assert_eq!(catalog.get(11).unwrap().flower, catalog.types()[0]);
        assert_eq!(catalog.get(100).unwrap().flower.name, "Lily");
        assert!(catalog.get(0).is_none());
        assert!(catalog.get(101).is_none());
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(Catalog::default().cards(), Catalog::default().cards());
    }

    #[test]
    fn empty_type_list_yields_empty_catalog() {
        let catalog = Catalog::generate(Vec::new(), 5);
        assert!(catalog.cards().is_empty());
    }

    #[test]
    fn card_serializes_flat() {
        let catalog = Catalog::default();
        let value = serde_json::to_value(catalog.get(2).unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": 2,
                "name": "Sunflower",
                "emoji": "🌻",
                "color": "#ffd93d",
                "description": "Bright and cheerful",
            })
        );
    }
}
