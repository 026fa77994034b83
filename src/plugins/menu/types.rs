use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user: String,
    pub rating: u8,
    pub comment: String,
    /// Display date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub created_at: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub preparation: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub avg_rating: Option<f64>,
}

impl Dish {
    /// Recomputes the cached average from current reviews, rounded to two
    /// decimals. Unreviewed dishes have no average.
    pub fn recompute_avg_rating(&mut self) {
        if self.reviews.is_empty() {
            self.avg_rating = None;
            return;
        }
        let total: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        let avg = f64::from(total) / self.reviews.len() as f64;
        self.avg_rating = Some((avg * 100.0).round() / 100.0);
    }

    /// Load-time normalization: tags sorted case-insensitively, reviews
    /// newest-first, average refreshed.
    pub fn normalize(&mut self) {
        self.tags.sort_by_key(|t| t.to_lowercase());
        sort_reviews(&mut self.reviews);
        self.recompute_avg_rating();
    }
}

/// Newest-first; `created_at` breaks ties within a day.
pub fn sort_reviews(reviews: &mut [Review]) {
    reviews.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
}

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MenuData {
    #[serde(default)]
    pub dishes: Vec<Dish>,
}

impl MenuData {
    pub fn normalize(&mut self) {
        for dish in &mut self.dishes {
            dish.normalize();
        }
    }

    pub fn review_count(&self) -> usize {
        self.dishes.iter().map(|d| d.reviews.len()).sum()
    }
}

/// Listing returned to the dishes view: the (possibly filtered) dishes plus
/// the full tag universe that feeds the tag buttons.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishListing {
    pub dishes: Vec<DishSummary>,
    pub tags: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DishSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub avg_rating: Option<f64>,
    pub review_count: usize,
}

impl From<&Dish> for DishSummary {
    fn from(dish: &Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name.clone(),
            description: dish.description.clone(),
            image: dish.image.clone(),
            tags: dish.tags.clone(),
            avg_rating: dish.avg_rating,
            review_count: dish.reviews.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8, date: &str, created_at: i64) -> Review {
        Review {
            id: format!("r-{}-{}", date, created_at),
            user: "guest".to_string(),
            rating,
            comment: "ok".to_string(),
            date: date.to_string(),
            created_at,
        }
    }

    #[test]
    fn test_avg_rating_rounds_to_two_decimals() {
        let mut dish = Dish {
            id: 1,
            name: "Feijoada".to_string(),
            description: String::new(),
            image: String::new(),
            ingredients: vec![],
            preparation: vec![],
            tags: vec![],
            reviews: vec![
                review(5, "2025-08-01", 1),
                review(4, "2025-08-02", 2),
                review(4, "2025-08-03", 3),
            ],
            avg_rating: None,
        };
        dish.recompute_avg_rating();
        assert_eq!(dish.avg_rating, Some(4.33));

        dish.reviews.clear();
        dish.recompute_avg_rating();
        assert_eq!(dish.avg_rating, None);
    }

    #[test]
    fn test_normalize_sorts_tags_and_reviews() {
        let mut dish = Dish {
            id: 1,
            name: "Moqueca".to_string(),
            description: String::new(),
            image: String::new(),
            ingredients: vec![],
            preparation: vec![],
            tags: vec!["Seafood".to_string(), "brazilian".to_string()],
            reviews: vec![
                review(3, "2025-07-01", 10),
                review(5, "2025-08-01", 30),
                review(4, "2025-08-01", 20),
            ],
            avg_rating: None,
        };
        dish.normalize();

        assert_eq!(dish.tags, ["brazilian", "Seafood"]);
        let dates: Vec<(&str, i64)> = dish
            .reviews
            .iter()
            .map(|r| (r.date.as_str(), r.created_at))
            .collect();
        assert_eq!(
            dates,
            [("2025-08-01", 30), ("2025-08-01", 20), ("2025-07-01", 10)]
        );
        assert_eq!(dish.avg_rating, Some(4.0));
    }
}
