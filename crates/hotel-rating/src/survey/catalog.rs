use crate::rating::Category;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a survey criterion, e.g. `dining.taste`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CriterionId(pub String);

impl CriterionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CriterionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CriterionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// One question asked within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub id: CriterionId,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    pub category: Category,
    pub name: String,
    pub description: String,
    pub criteria: Vec<CriterionSpec>,
}

/// Ordered list of categories and the criteria surveyed for each.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyCatalog {
    categories: Vec<CategorySpec>,
}

impl SurveyCatalog {
    pub fn new(categories: Vec<CategorySpec>) -> Self {
        Self { categories }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            category_spec(
                Category::ServiceQuality,
                "How guests are received and looked after by the staff.",
                &[
                    ("service.check_in_speed", "Check-in speed", "from very slow to very fast"),
                    ("service.staff_courtesy", "Staff courtesy", "from rude to very courteous"),
                    (
                        "service.languages",
                        "Foreign language skills",
                        "from none to several languages",
                    ),
                    (
                        "service.helpfulness",
                        "Willingness to help",
                        "from ignoring guests to always ready to help",
                    ),
                    (
                        "service.professionalism",
                        "Professionalism",
                        "from unprofessional to highly professional",
                    ),
                ],
            ),
            category_spec(
                Category::Infrastructure,
                "Facilities and amenities available on site.",
                &[
                    (
                        "infrastructure.pool",
                        "Swimming pool",
                        "from none, through indoor only, to indoor and outdoor",
                    ),
                    (
                        "infrastructure.fitness",
                        "Fitness center",
                        "from none, through minimal, to fully equipped",
                    ),
                    ("infrastructure.spa", "Spa services", "from none to a wide selection"),
                    (
                        "infrastructure.business_center",
                        "Business center",
                        "from none to fully equipped",
                    ),
                    (
                        "infrastructure.lounges",
                        "Relaxation areas",
                        "from none to many comfortable areas",
                    ),
                    (
                        "infrastructure.playgrounds",
                        "Children's playgrounds",
                        "from none to staffed with entertainers",
                    ),
                ],
            ),
            category_spec(
                Category::Location,
                "Where the hotel is and how easy it is to get around.",
                &[
                    (
                        "location.city_center",
                        "Proximity to the city center",
                        "from very far to in the center",
                    ),
                    ("location.transport", "Transport access", "from poor to excellent"),
                    ("location.landmarks", "Proximity to landmarks", "from far to close by"),
                    ("location.quiet", "Peace and quiet", "from noisy to quiet"),
                    ("location.safety", "Neighborhood safety", "from unsafe to safe"),
                ],
            ),
            category_spec(
                Category::Dining,
                "Restaurants, food and drink.",
                &[
                    ("dining.cleanliness", "Cleanliness", "from dirty to spotless"),
                    ("dining.presentation", "Presentation", "from unappealing to a masterpiece"),
                    ("dining.serving_speed", "Serving speed", "from slow to fast"),
                    ("dining.taste", "Taste", "from bland to delicious"),
                    ("dining.menu_variety", "Menu variety", "from limited to a wide choice"),
                    (
                        "dining.dietary_needs",
                        "Dietary preferences",
                        "from ignored to fully accommodated",
                    ),
                ],
            ),
            category_spec(
                Category::RoomComfort,
                "State and equipment of the guest rooms.",
                &[
                    ("room.cleanliness", "Cleanliness", "from dirty to spotless"),
                    (
                        "room.bed_quality",
                        "Bed quality",
                        "from uncomfortable to very comfortable",
                    ),
                    ("room.size", "Room size", "from cramped to spacious"),
                    ("room.soundproofing", "Soundproofing", "from poor to excellent"),
                    ("room.furniture", "Furniture condition", "from worn out to new"),
                    ("room.appliances", "In-room appliances", "from minimal to modern"),
                    ("room.internet", "Internet quality", "from none or slow to fast"),
                    ("room.view", "Window view", "from unpleasant to beautiful"),
                    (
                        "room.air_conditioning",
                        "Air conditioning",
                        "from missing to working perfectly",
                    ),
                    ("room.bathroom", "Bathroom", "from minimal fittings to luxurious"),
                ],
            ),
        ])
    }

    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    pub fn category(&self, category: Category) -> Option<&CategorySpec> {
        self.categories
            .iter()
            .find(|spec| spec.category == category)
    }

    /// Looks up a criterion and the category it belongs to.
    pub fn criterion(&self, id: &CriterionId) -> Option<(Category, &CriterionSpec)> {
        self.categories.iter().find_map(|spec| {
            spec.criteria
                .iter()
                .find(|criterion| criterion.id == *id)
                .map(|criterion| (spec.category, criterion))
        })
    }

    pub fn criteria_count(&self) -> usize {
        self.categories
            .iter()
            .map(|spec| spec.criteria.len())
            .sum()
    }
}

impl Default for SurveyCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn category_spec(
    category: Category,
    description: &str,
    criteria: &[(&str, &str, &str)],
) -> CategorySpec {
    CategorySpec {
        category,
        name: category.label().to_string(),
        description: description.to_string(),
        criteria: criteria
            .iter()
            .map(|(id, name, description)| CriterionSpec {
                id: CriterionId::from(*id),
                name: name.to_string(),
                description: description.to_string(),
            })
            .collect(),
    }
}
